//! Bookmark storage.
//!
//! Handlers only ever see a [`BookmarkStore`]; which backend sits behind it is
//! decided once at startup. [`MemoryStore`] keeps bookmarks in a vector for
//! the lifetime of the process, [`crate::db::Database`] keeps them in a libsql
//! table.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StorageError;
use crate::model::{Bookmark, NewBookmark};

#[async_trait]
pub trait BookmarkStore: Send + Sync {
    /// All bookmarks, in insertion order.
    async fn list_all(&self) -> Result<Vec<Bookmark>, StorageError>;

    /// `Ok(None)` when no bookmark has this id.
    async fn get_by_id(&self, id: &str) -> Result<Option<Bookmark>, StorageError>;

    /// Assigns a fresh id and stores the candidate.
    async fn insert(&self, candidate: NewBookmark) -> Result<Bookmark, StorageError>;

    /// Number of rows removed: 0 or 1.
    async fn delete_by_id(&self, id: &str) -> Result<u64, StorageError>;
}

pub fn demo_bookmarks() -> Vec<NewBookmark> {
    [
        ("Thinkful", "https://www.thinkful.com", "Think outside the classroom", 5.0),
        ("Google", "https://www.google.com", "Where we find everything else", 4.0),
        ("MDN", "https://developer.mozilla.org", "The only place to find web documentation", 5.0),
        ("hello", "https://repl.it/@HaliPower/youtube-example-1", "hello", 3.0),
        ("great website", "https://www.greatwebsite.com", "", 1.0),
    ]
    .into_iter()
    .map(|(title, url, description, rating)| NewBookmark {
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        rating,
    })
    .collect()
}

/// Inserts [`demo_bookmarks`] unless the store already holds something.
/// Returns how many were inserted.
pub async fn seed_if_empty(store: &dyn BookmarkStore) -> Result<usize, StorageError> {
    if !store.list_all().await?.is_empty() {
        tracing::debug!("store not empty, skipping seed");
        return Ok(0);
    }

    let mut inserted = 0;
    for candidate in demo_bookmarks() {
        store.insert(candidate).await?;
        inserted += 1;
    }
    tracing::info!(count = inserted, "seeded demo bookmarks");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{MAX_RATING, MIN_RATING, is_well_formed_url};

    #[test]
    fn demo_bookmarks_are_valid() {
        for b in demo_bookmarks() {
            assert!(!b.title.is_empty());
            assert!(is_well_formed_url(&b.url), "{}", b.url);
            assert!((MIN_RATING..=MAX_RATING).contains(&b.rating));
        }
    }

    #[tokio::test]
    async fn seed_only_fills_an_empty_store() {
        let store = MemoryStore::new();
        assert_eq!(seed_if_empty(&store).await.unwrap(), 5);
        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);
        assert_eq!(store.list_all().await.unwrap().len(), 5);
    }
}
