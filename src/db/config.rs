use sled::{Config, Db};

use crate::utils::errors::StoreError;

pub const AUTHORS_TREE: &str = "authors";
pub const ITEMS_TREE: &str = "items";

pub fn open_db(path: &str) -> Result<Db, StoreError> {
    let db = sled::open(path).map_err(|e| {
        log::error!("[open_db] Unable to open sled db at {}: {:?}", path, e);
        e
    })?;
    log::info!("[open_db] Opened timeline cache at {}", path);
    Ok(db)
}

/// In-memory database removed on drop. Used by tests and as a fallback when
/// the on-disk cache cannot be opened.
pub fn temporary_db() -> Result<Db, StoreError> {
    Ok(Config::new().temporary(true).open()?)
}

/// Big-endian so that sled's lexicographic key order is the numeric id order.
pub fn id_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}
