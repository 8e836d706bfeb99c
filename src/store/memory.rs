use async_trait::async_trait;
use tokio::sync::RwLock;

use super::BookmarkStore;
use crate::error::StorageError;
use crate::model::{Bookmark, NewBookmark, new_id};

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    bookmarks: RwLock<Vec<Bookmark>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookmarks(bookmarks: Vec<Bookmark>) -> Self {
        MemoryStore {
            bookmarks: RwLock::new(bookmarks),
        }
    }
}

#[async_trait]
impl BookmarkStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StorageError> {
        Ok(self.bookmarks.read().await.clone())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Bookmark>, StorageError> {
        let bookmarks = self.bookmarks.read().await;
        Ok(bookmarks.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, candidate: NewBookmark) -> Result<Bookmark, StorageError> {
        let mut bookmarks = self.bookmarks.write().await;
        let mut id = new_id();
        while bookmarks.iter().any(|b| b.id == id) {
            id = new_id();
        }
        let bookmark = candidate.into_bookmark(id);
        bookmarks.push(bookmark.clone());
        Ok(bookmark)
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64, StorageError> {
        let mut bookmarks = self.bookmarks.write().await;
        match bookmarks.iter().position(|b| b.id == id) {
            Some(index) => {
                bookmarks.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }
}
