//! Provider trait: the abstraction over generative-language backends.
//!
//! A Provider knows how to send a conversation to a model and get a
//! complete response back. Conversation state lives with the caller; a
//! provider is stateless between requests.
//!
//! Implementations: Gemini, OpenAI-compatible endpoints.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ProviderError;
use crate::message::Message;
use crate::tool::ToolCall;

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gemini-2.0-flash", "gpt-4o-mini")
    pub model: String,

    /// The conversation messages
    pub messages: Vec<Message>,

    /// Temperature (0.0 = deterministic, 1.0 = creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Available tools the model can call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
}

fn default_temperature() -> f32 {
    0.7
}

/// A tool definition sent to the model so it knows what tools it can call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// The tool name
    pub name: String,

    /// Description of what the tool does
    pub description: String,

    /// JSON Schema describing the tool's parameters
    pub parameters: serde_json::Value,
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated message
    pub message: Message,

    /// Token usage statistics
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// What the model answered with: plain text, or a request to run a tool.
#[derive(Debug, Clone)]
pub enum BackendReply {
    Text(String),
    Call(ToolCall),
}

impl ProviderResponse {
    /// Interpret the response as a [`BackendReply`].
    ///
    /// Only the first tool call is honoured; one round-trip per turn.
    pub fn reply(&self) -> Result<BackendReply, ProviderError> {
        match self.message.tool_calls.first() {
            None => Ok(BackendReply::Text(self.message.content.clone())),
            Some(tc) => {
                let arguments = if tc.arguments.trim().is_empty() {
                    serde_json::Value::Object(serde_json::Map::new())
                } else {
                    serde_json::from_str(&tc.arguments).map_err(|e| {
                        ProviderError::MalformedResponse(format!(
                            "tool call '{}' has unparseable arguments: {e}",
                            tc.name
                        ))
                    })?
                };
                Ok(BackendReply::Call(ToolCall {
                    id: tc.id.clone(),
                    name: tc.name.clone(),
                    arguments,
                }))
            }
        }
    }
}

/// The core Provider trait.
///
/// Every backend implements this trait. The session and orchestrator call
/// `complete()` without knowing which provider is being used.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(&self, request: ProviderRequest) -> std::result::Result<ProviderResponse, ProviderError>;

    /// Health check: can we reach the provider?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}
