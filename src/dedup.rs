use std::collections::HashSet;

const SLUG_MAX_CHARS: usize = 50;

/// Lowercased title with spaces and slashes turned into hyphens, cut to 50 characters.
pub fn slug(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '/' { '-' } else { c })
        .take(SLUG_MAX_CHARS)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Proceed(String),
    Duplicate(String),
}

/// Slugs already handled during this run.
#[derive(Debug, Default)]
pub struct SeenSlugs {
    seen: HashSet<String>,
}

impl SeenSlugs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the title's slug and returns `Proceed`, or `Duplicate` without
    /// touching the set if it was already recorded.
    pub fn admit(&mut self, title: &str) -> Admission {
        let slug = slug(title);
        if self.seen.contains(&slug) {
            Admission::Duplicate(slug)
        } else {
            self.seen.insert(slug.clone());
            Admission::Proceed(slug)
        }
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
