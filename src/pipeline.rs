use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::config::Config;
use crate::context::Context;
use crate::dedup::{Admission, SeenSlugs};
use crate::document::Document;
use crate::error::WriteError;
use crate::fetcher::{FeedEntry, FeedSource};
use crate::normalizer::to_plain_text;
use crate::summarizer::Summarizer;
use crate::writer::write_document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Another entry with the same slug was already handled this run
    Duplicate { slug: String },
    SummaryFailed(String),
}

/// What happened to one entry that made it past the per-feed limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    Summarized { entry: FeedEntry, summary: String },
    Skipped { title: String, reason: SkipReason },
}

impl EntryOutcome {
    pub fn is_summarized(&self) -> bool {
        matches!(self, EntryOutcome::Summarized { .. })
    }
}

#[derive(Debug)]
pub struct Digest {
    pub document: Document,
    pub outcomes: Vec<EntryOutcome>,
}

impl Digest {
    pub fn summarized(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_summarized()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.summarized()
    }
}

#[derive(Debug)]
pub struct RunReport {
    pub path: PathBuf,
    pub digest: Digest,
}

/// Walk every section and feed in order, summarizing the first
/// `max_entries_per_feed` entries of each feed.
pub async fn assemble<F, S>(config: &Config, source: &F, summarizer: &S, date: NaiveDate) -> Digest
where
    F: FeedSource + ?Sized,
    S: Summarizer + ?Sized,
{
    let mut document = Document::new(date, &config.tags);
    let mut seen = SeenSlugs::new();
    let mut outcomes = Vec::new();

    for section in &config.sections {
        document.push_section(&section.name);

        for url in &section.feeds {
            let feed = source.fetch(url).await;
            document.push_feed(&feed.title);

            for entry in feed.entries.into_iter().take(config.max_entries_per_feed) {
                let outcome = process_entry(&mut seen, summarizer, entry).await;
                if let EntryOutcome::Summarized { entry, summary } = &outcome {
                    document.push_entry(entry, &feed.title, summary);
                }
                outcomes.push(outcome);
            }
        }
    }

    Digest { document, outcomes }
}

async fn process_entry<S>(seen: &mut SeenSlugs, summarizer: &S, entry: FeedEntry) -> EntryOutcome
where
    S: Summarizer + ?Sized,
{
    if let Admission::Duplicate(slug) = seen.admit(&entry.title) {
        info!("Skipping duplicate: {}", entry.title);
        return EntryOutcome::Skipped {
            title: entry.title,
            reason: SkipReason::Duplicate { slug },
        };
    }

    info!("Summarizing: {}", entry.title);
    let text = to_plain_text(&entry.raw_summary);
    match summarizer.summarize(&entry.title, &text, &entry.link).await {
        Ok(summary) => EntryOutcome::Summarized { entry, summary },
        Err(e) => {
            error!("Error summarizing {}: {}", entry.title, e);
            EntryOutcome::Skipped {
                title: entry.title,
                reason: SkipReason::SummaryFailed(e.to_string()),
            }
        }
    }
}

/// Assemble the digest and write it to today's file in the output directory.
/// Taking a [`Context`] means a run cannot start without an API key.
pub async fn run<F, S>(
    ctx: &Context,
    source: &F,
    summarizer: &S,
    date: NaiveDate,
) -> Result<RunReport, WriteError>
where
    F: FeedSource + ?Sized,
    S: Summarizer + ?Sized,
{
    let config = ctx.config();
    let digest = assemble(config, source, summarizer, date).await;
    let path = write_document(&config.output_path(), date, &digest.document.render())?;

    info!(
        "Saved: {} ({} summarized, {} skipped)",
        path.display(),
        digest.summarized(),
        digest.skipped()
    );

    Ok(RunReport { path, digest })
}
