use sled::{Db, Tree};

use crate::db::authors::{author_from_db, save_authors_to_db};
use crate::db::config::{open_db, temporary_db, AUTHORS_TREE, ITEMS_TREE};
use crate::db::items::{recent_items_from_db, save_items_to_db};
use crate::db::TimelineStore;
use crate::utils::author::Author;
use crate::utils::errors::StoreError;
use crate::utils::timeline_item::TimelineItem;

pub struct SledTimelineStore {
    _db: Db,
    authors: Tree,
    items: Tree,
}

impl SledTimelineStore {
    pub fn open(path: &str) -> Result<Self, StoreError> {
        Self::from_db(open_db(path)?)
    }

    pub fn temporary() -> Result<Self, StoreError> {
        Self::from_db(temporary_db()?)
    }

    fn from_db(db: Db) -> Result<Self, StoreError> {
        let authors = db.open_tree(AUTHORS_TREE)?;
        let items = db.open_tree(ITEMS_TREE)?;
        Ok(Self { _db: db, authors, items })
    }

    #[cfg(test)]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    #[cfg(test)]
    pub fn author_count(&self) -> usize {
        self.authors.len()
    }
}

impl TimelineStore for SledTimelineStore {
    fn load_recent(&self, limit: usize) -> Vec<TimelineItem> {
        let items: Vec<TimelineItem> = recent_items_from_db(&self.items)
            .filter_map(|stored| {
                let author = match author_from_db(&self.authors, stored.author_id) {
                    Ok(Some(author)) => author,
                    Ok(None) => {
                        log::warn!("[load_recent] Item {} references missing author {}, skipping",
                            stored.id, stored.author_id);
                        return None;
                    }
                    Err(e) => {
                        log::error!("[load_recent] Unable to read author {}: {:?}", stored.author_id, e);
                        return None;
                    }
                };
                Some(TimelineItem::new(stored.id, stored.body, stored.created_at, author))
            })
            .take(limit)
            .collect();
        log::info!("[load_recent] Loaded {} cached items", items.len());
        items
    }

    fn upsert_authors(&self, authors: &[Author]) -> Result<(), StoreError> {
        save_authors_to_db(&self.authors, authors)
    }

    fn upsert_items(&self, items: &[TimelineItem]) -> Result<(), StoreError> {
        save_items_to_db(&self.items, items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn author(id: u64, name: &str) -> Author {
        Author::new(id, name.to_string(), name.to_lowercase(), format!("https://img/{}.png", id))
    }

    fn item(id: u64, author: Author) -> TimelineItem {
        let created_at = Utc.with_ymd_and_hms(2020, 10, 8, 12, 0, 0).unwrap();
        TimelineItem::new(id, format!("post {}", id), created_at, author)
    }

    #[test]
    fn empty_store_loads_nothing() {
        let store = SledTimelineStore::temporary().unwrap();
        assert!(store.load_recent(10).is_empty());
    }

    #[test]
    fn persist_then_load_newest_first_with_authors() {
        let store = SledTimelineStore::temporary().unwrap();
        let ada = author(1, "Ada");
        let bob = author(2, "Bob");
        store.persist_page(&[item(100, ada.clone()), item(98, bob.clone()), item(99, ada.clone())]);

        let loaded = store.load_recent(10);

        let ids: Vec<u64> = loaded.iter().map(|i| i.id()).collect();
        assert_eq!(ids, vec![100, 99, 98]);
        assert_eq!(loaded[2].author(), &bob);
        assert_eq!(store.author_count(), 2);
    }

    #[test]
    fn load_recent_respects_limit() {
        let store = SledTimelineStore::temporary().unwrap();
        let ada = author(1, "Ada");
        let page: Vec<TimelineItem> = (1..=20).map(|id| item(id, ada.clone())).collect();
        store.persist_page(&page);

        let ids: Vec<u64> = store.load_recent(3).iter().map(|i| i.id()).collect();

        assert_eq!(ids, vec![20, 19, 18]);
    }

    #[test]
    fn ids_sort_numerically_across_byte_boundaries() {
        let store = SledTimelineStore::temporary().unwrap();
        let ada = author(1, "Ada");
        store.persist_page(&[item(255, ada.clone()), item(256, ada.clone()), item(1_000_000, ada)]);

        let ids: Vec<u64> = store.load_recent(10).iter().map(|i| i.id()).collect();

        assert_eq!(ids, vec![1_000_000, 256, 255]);
    }

    #[test]
    fn upserts_overwrite_without_duplicates() {
        let store = SledTimelineStore::temporary().unwrap();
        store.persist_page(&[item(5, author(1, "Ada"))]);
        store.persist_page(&[item(5, author(1, "Ada Lovelace"))]);

        let loaded = store.load_recent(10);

        assert_eq!(store.item_count(), 1);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].author().name(), "Ada Lovelace");
    }

    #[test]
    fn item_with_missing_author_is_skipped() {
        let store = SledTimelineStore::temporary().unwrap();
        let ada = author(1, "Ada");
        store.upsert_authors(&[ada.clone()]).unwrap();
        store.upsert_items(&[item(2, ada), item(3, author(9, "Ghost"))]).unwrap();

        let ids: Vec<u64> = store.load_recent(10).iter().map(|i| i.id()).collect();

        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn orphans_do_not_eat_into_the_limit() {
        let store = SledTimelineStore::temporary().unwrap();
        let ada = author(1, "Ada");
        let ghost = author(9, "Ghost");
        store.upsert_authors(&[ada.clone()]).unwrap();
        store
            .upsert_items(&[item(10, ghost.clone()), item(9, ghost), item(8, ada.clone()), item(7, ada.clone()), item(6, ada)])
            .unwrap();

        let ids: Vec<u64> = store.load_recent(2).iter().map(|i| i.id()).collect();

        assert_eq!(ids, vec![8, 7]);
    }
}
