//! Error types for the A.R.I.S.E. domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all A.R.I.S.E. operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A blank message was submitted. Rejected before classification.
    #[error("No message provided")]
    EmptyInput,

    /// The request body could not be read as a chat message.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // --- Backend errors ---
    #[error("Backend error: {0}")]
    Provider(#[from] ProviderError),

    // --- Tool errors ---
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),

    // --- Transcript errors ---
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    // --- Document errors ---
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable, machine-readable failure kind for user-facing error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::EmptyInput => "empty_input",
            Error::InvalidRequest(_) => "invalid_request",
            Error::Provider(_) => "backend_failure",
            Error::Tool(_) => "tool_execution_failure",
            Error::Transcript(_) => "transcript_failure",
            Error::Document(_) => "document_load_failure",
            Error::Config { .. } => "configuration_failure",
            Error::Serialization(_) => "serialization_failure",
            Error::Internal(_) => "internal_failure",
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError {
        status_code: u16,
        message: String,
    },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    NotFound(String),

    #[error("Tool execution failed: {tool_name}: {reason}")]
    ExecutionFailed { tool_name: String, reason: String },

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),
}

#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Document collection not found: {0}")]
    CollectionMissing(String),

    #[error("Failed to read {filename}: {reason}")]
    Unreadable { filename: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ApiError {
            status_code: 429,
            message: "Too many requests".into(),
        });
        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("Too many requests"));
    }

    #[test]
    fn tool_error_displays_correctly() {
        let err = Error::Tool(ToolError::ExecutionFailed {
            tool_name: "web_search".into(),
            reason: "upstream unavailable".into(),
        });
        assert!(err.to_string().contains("web_search"));
        assert!(err.to_string().contains("upstream"));
    }

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(Error::EmptyInput.kind(), "empty_input");
        assert_eq!(Error::InvalidRequest("not json".into()).kind(), "invalid_request");
        assert_eq!(
            Error::from(ProviderError::Network("down".into())).kind(),
            "backend_failure"
        );
        assert_eq!(
            Error::from(ToolError::NotFound("x".into())).kind(),
            "tool_execution_failure"
        );
    }
}
