use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sled::{Batch, Tree};

use crate::db::config::id_key;
use crate::utils::errors::StoreError;
use crate::utils::timeline_item::TimelineItem;

/// Persisted row: references its author by id instead of embedding it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StoredItem {
    pub id: u64,
    pub author_id: u64,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<&TimelineItem> for StoredItem {
    fn from(item: &TimelineItem) -> Self {
        Self {
            id: item.id(),
            author_id: item.author().id(),
            body: item.body().to_string(),
            created_at: *item.created_at(),
        }
    }
}

pub fn save_items_to_db(tree: &Tree, items: &[TimelineItem]) -> Result<(), StoreError> {
    let mut batch = Batch::default();
    for item in items {
        let stored_json = serde_json::to_vec(&StoredItem::from(item))?;
        batch.insert(&id_key(item.id())[..], stored_json);
    }
    tree.apply_batch(batch)?;
    tree.flush()?;
    log::debug!("[save_items_to_db] {} items upserted", items.len());
    Ok(())
}

/// Stored rows, highest id first, read lazily so callers can stop early.
/// Rows that fail to decode are logged and skipped; a read error ends the scan.
pub fn recent_items_from_db(tree: &Tree) -> impl Iterator<Item = StoredItem> + '_ {
    tree.iter()
        .rev()
        .map_while(|entry_res| match entry_res {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::error!("[recent_items_from_db] Unable to read cached item: {:?}", e);
                None
            }
        })
        .filter_map(|(key, value)| match serde_json::from_slice::<StoredItem>(&value) {
            Ok(item) => Some(item),
            Err(e) => {
                log::error!("[recent_items_from_db] Unable to deserialize item {:?}: {:?}", key, e);
                None
            }
        })
}
