use anyhow::Result;
use async_trait::async_trait;
use libsql::{Builder, Connection, Database as LibsqlDatabase};
use std::path::Path;

use crate::error::StorageError;
use crate::model::{Bookmark, NewBookmark, new_id};
use crate::store::BookmarkStore;

const SCHEMA: &str = include_str!("schema.sql");

pub const IN_MEMORY: &str = ":memory:";

pub struct Database {
    // Keeps the underlying database alive for as long as the connection is used.
    _db: LibsqlDatabase,
    conn: Connection,
}

impl Database {
    /// Opens (or creates) a local database. `database` is resolved against
    /// `data_dir` unless it is absolute or [`IN_MEMORY`].
    pub async fn new(database: &str, data_dir: &Path) -> Result<Self> {
        if database == IN_MEMORY {
            return Self::open(IN_MEMORY).await;
        }

        let path = data_dir.join(database);
        tracing::info!(path = ?path, "[db] opening local database");
        Self::open(&path).await
    }

    pub async fn in_memory() -> Result<Self> {
        Self::open(IN_MEMORY).await
    }

    async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        conn.query("SELECT 1", ()).await?;

        conn.execute_batch(SCHEMA)
            .await
            .map_err(|e| anyhow::anyhow!("failed to create bookmarks table: {e}"))?;

        Ok(Database { _db: db, conn })
    }

    fn row_to_bookmark(row: &libsql::Row) -> Result<Bookmark, StorageError> {
        Ok(Bookmark {
            id: row.get(0)?,
            title: row.get(1)?,
            url: row.get(2)?,
            description: row.get::<Option<String>>(3)?.unwrap_or_default(),
            rating: row.get(4)?,
        })
    }
}

#[async_trait]
impl BookmarkStore for Database {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StorageError> {
        let query = r#"
            SELECT id, title, url, description, rating
            FROM bookmarks
            ORDER BY rowid
        "#;

        let mut rows = self.conn.query(query, ()).await?;
        let mut bookmarks = Vec::new();

        while let Some(row) = rows.next().await? {
            bookmarks.push(Self::row_to_bookmark(&row)?);
        }

        Ok(bookmarks)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Bookmark>, StorageError> {
        let query = r#"
            SELECT id, title, url, description, rating
            FROM bookmarks WHERE id = ?
        "#;

        let mut rows = self.conn.query(query, libsql::params![id]).await?;

        if let Some(row) = rows.next().await? {
            Ok(Some(Self::row_to_bookmark(&row)?))
        } else {
            Ok(None)
        }
    }

    async fn insert(&self, candidate: NewBookmark) -> Result<Bookmark, StorageError> {
        let query = r#"
            INSERT INTO bookmarks (id, title, url, description, rating)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, url, description, rating
        "#;

        let mut rows = self
            .conn
            .query(
                query,
                libsql::params![
                    new_id(),
                    candidate.title,
                    candidate.url,
                    candidate.description,
                    candidate.rating
                ],
            )
            .await?;

        if let Some(row) = rows.next().await? {
            Self::row_to_bookmark(&row)
        } else {
            Err(StorageError::MissingRow("bookmarks"))
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64, StorageError> {
        let removed = self
            .conn
            .execute("DELETE FROM bookmarks WHERE id = ?", libsql::params![id])
            .await?;
        Ok(removed)
    }
}
