use sled::{Batch, Tree};

use crate::db::config::id_key;
use crate::utils::author::Author;
use crate::utils::errors::StoreError;

pub fn save_authors_to_db(tree: &Tree, authors: &[Author]) -> Result<(), StoreError> {
    let mut batch = Batch::default();
    for author in authors {
        let author_json = serde_json::to_vec(author)?;
        batch.insert(&id_key(author.id())[..], author_json);
    }
    tree.apply_batch(batch)?;
    tree.flush()?;
    log::debug!("[save_authors_to_db] {} authors upserted", authors.len());
    Ok(())
}

pub fn author_from_db(tree: &Tree, author_id: u64) -> Result<Option<Author>, StoreError> {
    let author_opt = tree.get(id_key(author_id))?;
    match author_opt {
        None => Ok(None),
        Some(author_ivec) => Ok(Some(serde_json::from_slice::<Author>(&author_ivec)?)),
    }
}
