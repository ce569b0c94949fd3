use chrono::NaiveDate;

use crate::fetcher::FeedEntry;

/// An Org-mode note built line by line, in the order headings are added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn new(date: NaiveDate, tags: &str) -> Self {
        let date = date.format("%Y-%m-%d");
        Self {
            lines: vec![
                format!("#+TITLE: RSS Summaries {}", date),
                format!("#+DATE: {}", date),
                format!("#+FILETAGS: {}", tags),
                String::new(),
            ],
        }
    }

    pub fn push_section(&mut self, name: &str) {
        self.lines.push(format!("* {}", name));
    }

    pub fn push_feed(&mut self, feed_title: &str) {
        self.lines.push(format!("** Feed: {}", feed_title));
    }

    pub fn push_entry(&mut self, entry: &FeedEntry, feed_title: &str, summary: &str) {
        self.lines.push(format!("*** {}", entry.title));
        if !entry.link.is_empty() {
            self.lines
                .push(format!("[[{}][Link to original article]]", entry.link));
        }
        self.lines.push(String::new());
        self.lines.push(format!("Summary from feed: *{}*", feed_title));
        self.lines.push(String::new());
        self.lines.push(summary.to_string());
        self.lines.push(String::new());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}
