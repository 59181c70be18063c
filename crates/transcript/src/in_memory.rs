//! In-memory transcript: the default for a single-process deployment.

use async_trait::async_trait;
use arise_core::error::TranscriptError;
use arise_core::transcript::{TranscriptStore, Turn};
use tokio::sync::RwLock;

/// A transcript held in a Vec. Lost on restart.
pub struct InMemoryTranscript {
    turns: RwLock<Vec<Turn>>,
}

impl InMemoryTranscript {
    pub fn new() -> Self {
        Self {
            turns: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryTranscript {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranscriptStore for InMemoryTranscript {
    fn name(&self) -> &str {
        "memory"
    }

    async fn append(&self, turns: Vec<Turn>) -> Result<(), TranscriptError> {
        self.turns.write().await.extend(turns);
        Ok(())
    }

    async fn turns(&self) -> Result<Vec<Turn>, TranscriptError> {
        Ok(self.turns.read().await.clone())
    }

    async fn clear(&self) -> Result<(), TranscriptError> {
        self.turns.write().await.clear();
        Ok(())
    }

    async fn len(&self) -> Result<usize, TranscriptError> {
        Ok(self.turns.read().await.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arise_core::transcript::Speaker;

    #[tokio::test]
    async fn append_preserves_order() {
        let store = InMemoryTranscript::new();
        store
            .append(vec![Turn::user("first"), Turn::assistant("second")])
            .await
            .unwrap();
        store.append(vec![Turn::user("third")]).await.unwrap();

        let turns = store.turns().await.unwrap();
        let texts: Vec<&str> = turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
        assert_eq!(turns[1].speaker, Speaker::Assistant);
    }

    #[tokio::test]
    async fn clear_empties() {
        let store = InMemoryTranscript::new();
        store.append(vec![Turn::user("hi")]).await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.len().await.unwrap(), 0);
    }
}
