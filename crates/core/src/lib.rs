//! # A.R.I.S.E Core
//!
//! Domain types, traits, and error definitions for the A.R.I.S.E portfolio
//! assistant. This crate has **zero framework dependencies**: it defines the
//! domain model that all other crates implement against.
//!
//! Every collaborator of the conversation pipeline is a trait here:
//! the language backend ([`Provider`]), locally callable functions
//! ([`Tool`]), the turn log ([`TranscriptStore`]) and the document
//! collection ([`DocumentSource`]). Implementations live in their own crates
//! and tests swap in mocks.

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;
pub mod transcript;
pub mod document;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{Message, Role, Conversation, ConversationId};
pub use provider::{BackendReply, Provider, ProviderRequest, ProviderResponse};
pub use tool::{Tool, ToolCall, ToolResult, ToolRegistry};
pub use transcript::{Speaker, Turn, TranscriptStore};
pub use document::DocumentSource;
