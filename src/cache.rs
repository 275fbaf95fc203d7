use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// A stored response body, keyed by request method and URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub fetched_at: String,
}

/// File-backed HTTP response cache. Entries never expire; they stay until
/// [`ResponseCache::clear`] is called.
pub struct ResponseCache {
    conn: Connection,
}

impl ResponseCache {
    pub fn open(path: &Path) -> Result<Self> {
        let start_time = Instant::now();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open response cache at {:?}", path))?;
        let cache = Self::init(conn)?;
        info!(
            action = "open",
            component = "response_cache",
            path = ?path,
            entries = cache.len()?,
            duration_ms = start_time.elapsed().as_millis(),
            "Response cache opened"
        );
        Ok(cache)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS responses (
                method     TEXT    NOT NULL,
                url        TEXT    NOT NULL,
                status     INTEGER NOT NULL,
                body       BLOB    NOT NULL,
                fetched_at TEXT    NOT NULL,
                PRIMARY KEY (method, url)
            )",
        )
        .context("Failed to create response cache table")?;
        Ok(Self { conn })
    }

    pub fn get(&self, method: &str, url: &str) -> Result<Option<CachedResponse>> {
        let hit = self
            .conn
            .query_row(
                "SELECT status, body, fetched_at FROM responses WHERE method = ?1 AND url = ?2",
                params![method, url],
                |row| {
                    Ok(CachedResponse {
                        status: row.get(0)?,
                        body: row.get(1)?,
                        fetched_at: row.get(2)?,
                    })
                },
            )
            .optional()
            .context("Failed to read response cache")?;
        debug!(action = "lookup", component = "response_cache", method, url, hit = hit.is_some(), "Cache lookup");
        Ok(hit)
    }

    pub fn put(&self, method: &str, url: &str, status: u16, body: &[u8]) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO responses (method, url, status, body, fetched_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![method, url, status, body, Utc::now().to_rfc3339()],
            )
            .context("Failed to write response cache")?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        let removed = self
            .conn
            .execute("DELETE FROM responses", [])
            .context("Failed to clear response cache")?;
        info!(action = "clear", component = "response_cache", removed, "Response cache cleared");
        Ok(())
    }

    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn close(self) -> Result<()> {
        info!(action = "close", component = "response_cache", "Closing response cache");
        self.conn
            .close()
            .map_err(|(_, e)| anyhow::Error::new(e).context("Failed to close response cache"))
    }
}
