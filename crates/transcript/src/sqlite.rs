//! SQLite transcript store.
//!
//! One table, `chat_messages`, keyed by an autoincrement id; read-back is
//! ordered by that id, which is the insertion order.

use async_trait::async_trait;
use arise_core::error::TranscriptError;
use arise_core::transcript::{Speaker, TranscriptStore, Turn};
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Row, SqlitePool};
use std::path::Path;
use tracing::{debug, info};

pub struct SqliteTranscript {
    pool: SqlitePool,
}

impl SqliteTranscript {
    /// Open (creating if missing) a transcript database file.
    pub async fn open(path: &Path) -> Result<Self, TranscriptError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                TranscriptError::Storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .connect_with(options)
            .await
            .map_err(|e| TranscriptError::Storage(format!("Failed to open SQLite: {e}")))?;

        let store = Self::from_pool(pool).await?;
        info!("SQLite transcript initialized at {}", path.display());
        Ok(store)
    }

    /// Ephemeral database; a single connection so every query sees the same data.
    pub async fn in_memory() -> Result<Self, TranscriptError> {
        let options = SqliteConnectOptions::new().in_memory(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| TranscriptError::Storage(format!("Failed to open SQLite: {e}")))?;
        Self::from_pool(pool).await
    }

    pub async fn from_pool(pool: SqlitePool) -> Result<Self, TranscriptError> {
        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), TranscriptError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_messages (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                speaker   TEXT NOT NULL,
                text      TEXT NOT NULL,
                timestamp TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| TranscriptError::MigrationFailed(format!("chat_messages table: {e}")))?;

        debug!("SQLite transcript migrations complete");
        Ok(())
    }

    fn row_to_turn(row: &sqlx::sqlite::SqliteRow) -> Result<Turn, TranscriptError> {
        let speaker: String = row
            .try_get("speaker")
            .map_err(|e| TranscriptError::QueryFailed(format!("speaker column: {e}")))?;
        let text: String = row
            .try_get("text")
            .map_err(|e| TranscriptError::QueryFailed(format!("text column: {e}")))?;
        let timestamp: Option<String> = row
            .try_get("timestamp")
            .map_err(|e| TranscriptError::QueryFailed(format!("timestamp column: {e}")))?;

        let speaker = Speaker::parse(&speaker)
            .ok_or_else(|| TranscriptError::QueryFailed(format!("unknown speaker '{speaker}'")))?;

        let timestamp = timestamp.and_then(|ts| {
            chrono::DateTime::parse_from_rfc3339(&ts)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        });

        Ok(Turn {
            speaker,
            text,
            timestamp,
        })
    }
}

#[async_trait]
impl TranscriptStore for SqliteTranscript {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn append(&self, turns: Vec<Turn>) -> Result<(), TranscriptError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| TranscriptError::Storage(format!("begin: {e}")))?;

        for turn in &turns {
            sqlx::query("INSERT INTO chat_messages (speaker, text, timestamp) VALUES (?, ?, ?)")
                .bind(turn.speaker.as_str())
                .bind(&turn.text)
                .bind(turn.timestamp.map(|t| t.to_rfc3339()))
                .execute(&mut *tx)
                .await
                .map_err(|e| TranscriptError::QueryFailed(format!("insert: {e}")))?;
        }

        tx.commit()
            .await
            .map_err(|e| TranscriptError::Storage(format!("commit: {e}")))?;
        Ok(())
    }

    async fn turns(&self) -> Result<Vec<Turn>, TranscriptError> {
        let rows = sqlx::query("SELECT speaker, text, timestamp FROM chat_messages ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| TranscriptError::QueryFailed(format!("select: {e}")))?;

        rows.iter().map(Self::row_to_turn).collect()
    }

    async fn clear(&self) -> Result<(), TranscriptError> {
        sqlx::query("DELETE FROM chat_messages")
            .execute(&self.pool)
            .await
            .map_err(|e| TranscriptError::QueryFailed(format!("delete: {e}")))?;
        Ok(())
    }

    async fn len(&self) -> Result<usize, TranscriptError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM chat_messages")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| TranscriptError::QueryFailed(format!("count: {e}")))?;
        let n: i64 = row
            .try_get("n")
            .map_err(|e| TranscriptError::QueryFailed(format!("count column: {e}")))?;
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn append_and_read_back_in_order() {
        let store = SqliteTranscript::in_memory().await.unwrap();
        store
            .append(vec![Turn::user("What is axum?"), Turn::assistant("A web framework.")])
            .await
            .unwrap();
        store.append(vec![Turn::user("Thanks")]).await.unwrap();

        let turns = store.turns().await.unwrap();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[1].text, "A web framework.");
        assert_eq!(turns[2].text, "Thanks");
        assert!(turns[0].timestamp.is_some());
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let store = SqliteTranscript::in_memory().await.unwrap();
        store.append(vec![Turn::user("hi")]).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.len().await.unwrap(), 0);
        assert!(store.turns().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chat.db");

        {
            let store = SqliteTranscript::open(&path).await.unwrap();
            store
                .append(vec![Turn::user("persist me"), Turn::assistant("ok")])
                .await
                .unwrap();
            store.pool.close().await;
        }

        let reopened = SqliteTranscript::open(&path).await.unwrap();
        let turns = reopened.turns().await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].text, "persist me");
    }
}
