//! Transcript types and the `TranscriptStore` trait.
//!
//! A transcript is the visitor-facing history of one conversation: an
//! append-only sequence of turns read back in insertion order.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::error::TranscriptError;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Label used when rendering a transcript for the model.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Assistant => "A.R.I.S.E",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "assistant",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Speaker::User),
            "assistant" => Some(Speaker::Assistant),
            _ => None,
        }
    }
}

/// One message exchange unit. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            timestamp: Some(Utc::now()),
        }
    }
}

/// Render turns as alternating speaker-labeled lines.
pub fn render(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|t| format!("{}: {}", t.speaker.label(), t.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Append-only turn log with ordered read-back.
///
/// Implementations: in-memory, SQLite.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// The backend name (e.g., "memory", "sqlite").
    fn name(&self) -> &str;

    /// Append turns atomically, in the given order.
    async fn append(&self, turns: Vec<Turn>) -> Result<(), TranscriptError>;

    /// All turns in insertion order.
    async fn turns(&self) -> Result<Vec<Turn>, TranscriptError>;

    /// Remove every turn.
    async fn clear(&self) -> Result<(), TranscriptError>;

    async fn len(&self) -> Result<usize, TranscriptError> {
        Ok(self.turns().await?.len())
    }
}
