//! rss2org - RSS summaries for an Org-mode knowledge base
//!
//! Pulls the latest entries from a fixed list of RSS/Atom feeds, asks a
//! language model to summarize each new one, and writes the results to a
//! dated Org file.

pub mod config;
pub mod context;
pub mod dedup;
pub mod document;
pub mod error;
pub mod fetcher;
pub mod normalizer;
pub mod openai;
pub mod pipeline;
pub mod summarizer;
pub mod writer;
