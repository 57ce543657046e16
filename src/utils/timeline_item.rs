use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::author::Author;

/// One post on the home timeline. Ids grow over time, so ordering by id
/// descending puts the newest item first.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimelineItem {
    id: u64,
    body: String,
    created_at: DateTime<Utc>,
    author: Author,
}

impl TimelineItem {
    pub fn new(id: u64, body: String, created_at: DateTime<Utc>, author: Author) -> Self {
        Self {
            id,
            body,
            created_at,
            author,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn body(&self) -> &String {
        &self.body
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }

    pub fn author(&self) -> &Author {
        &self.author
    }
}

/// Distinct authors of a page, in first-seen order. A later occurrence of the
/// same author id wins, matching the store's last-write-wins upsert.
pub fn authors_of(items: &[TimelineItem]) -> Vec<Author> {
    let mut seen = HashSet::new();
    let mut authors: Vec<Author> = Vec::new();
    for item in items {
        let author = item.author();
        if seen.insert(author.id()) {
            authors.push(author.clone());
        } else if let Some(existing) = authors.iter_mut().find(|a| a.id() == author.id()) {
            *existing = author.clone();
        }
    }
    authors
}
