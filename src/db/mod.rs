//! Best-effort local cache of the home timeline.

use crate::utils::author::Author;
use crate::utils::errors::StoreError;
use crate::utils::timeline_item::{authors_of, TimelineItem};

pub mod authors;
pub mod config;
pub mod items;
pub mod store;

pub trait TimelineStore: Send + Sync {
    /// Most recent cached items, newest-first. Never fails: store errors are
    /// logged and yield whatever could be read.
    fn load_recent(&self, limit: usize) -> Vec<TimelineItem>;

    fn upsert_authors(&self, authors: &[Author]) -> Result<(), StoreError>;

    fn upsert_items(&self, items: &[TimelineItem]) -> Result<(), StoreError>;

    /// Two-phase write of a fetched page: authors first so every stored item
    /// resolves its author, then the items. Errors are logged, never returned.
    fn persist_page(&self, items: &[TimelineItem]) {
        let authors = authors_of(items);
        if let Err(e) = self.upsert_authors(&authors) {
            log::error!("[persist_page] Failed to upsert {} authors, skipping items: {:?}", authors.len(), e);
            return;
        }
        if let Err(e) = self.upsert_items(items) {
            log::error!("[persist_page] Failed to upsert {} items: {:?}", items.len(), e);
            return;
        }
        log::debug!("[persist_page] Cached {} items from {} authors", items.len(), authors.len());
    }
}
