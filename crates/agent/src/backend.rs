//! The language backend as the pipeline sees it: one-shot generation plus
//! a stateful chat handle with a single tool round-trip per turn.

use std::sync::Arc;
use arise_core::error::ProviderError;
use arise_core::message::{Conversation, ConversationId, Message};
use arise_core::provider::{BackendReply, Provider, ProviderRequest, ToolDefinition};
use arise_core::tool::{ToolCall, ToolResult};
use tracing::debug;

/// A provider bound to a model and sampling settings.
#[derive(Clone)]
pub struct Backend {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
}

impl Backend {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.7,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    fn request(&self, messages: Vec<Message>, tools: Vec<ToolDefinition>) -> ProviderRequest {
        ProviderRequest {
            model: self.model.clone(),
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            tools,
        }
    }

    /// Stateless generation: no history, no tools.
    pub async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let response = self
            .provider
            .complete(self.request(vec![Message::user(prompt)], vec![]))
            .await?;
        match response.reply()? {
            BackendReply::Text(text) => Ok(text),
            BackendReply::Call(call) => Err(ProviderError::MalformedResponse(format!(
                "unexpected tool call '{}' in tool-less request",
                call.name
            ))),
        }
    }

    /// Open a fresh conversation with empty history.
    pub fn start_chat(&self, tools: Vec<ToolDefinition>) -> ChatHandle {
        ChatHandle {
            backend: self.clone(),
            tools,
            history: Conversation::new(),
            pending: Vec::new(),
        }
    }
}

/// A live backend conversation.
///
/// Messages of the turn in progress are staged and only committed to the
/// history once the turn produces its final text. A failed or abandoned
/// turn leaves the history exactly as it was.
pub struct ChatHandle {
    backend: Backend,
    tools: Vec<ToolDefinition>,
    history: Conversation,
    pending: Vec<Message>,
}

impl ChatHandle {
    pub fn id(&self) -> &ConversationId {
        &self.history.id
    }

    /// Committed messages, oldest first.
    pub fn history(&self) -> &[Message] {
        &self.history.messages
    }

    fn staged_request(&self) -> ProviderRequest {
        let messages = self
            .history
            .messages
            .iter()
            .chain(self.pending.iter())
            .cloned()
            .collect();
        self.backend.request(messages, self.tools.clone())
    }

    fn commit(&mut self) {
        self.history.extend(self.pending.drain(..));
    }

    /// Drop the staged messages of an unfinished turn.
    pub fn abandon_turn(&mut self) {
        if !self.pending.is_empty() {
            debug!(conversation_id = %self.history.id, staged = self.pending.len(), "Abandoning turn");
        }
        self.pending.clear();
    }

    /// Send a user prompt as a new turn.
    ///
    /// On `Text` the turn is complete. On `Call` the turn stays open until
    /// [`submit_tool_result`](Self::submit_tool_result) or
    /// [`abandon_turn`](Self::abandon_turn).
    pub async fn send_turn(&mut self, prompt: &str) -> Result<BackendReply, ProviderError> {
        self.pending.clear();
        self.pending.push(Message::user(prompt));

        let response = match self.backend.provider.complete(self.staged_request()).await {
            Ok(r) => r,
            Err(e) => {
                self.abandon_turn();
                return Err(e);
            }
        };

        let reply = match response.reply() {
            Ok(r) => r,
            Err(e) => {
                self.abandon_turn();
                return Err(e);
            }
        };

        match &reply {
            BackendReply::Text(_) => {
                self.pending.push(response.message);
                self.commit();
            }
            BackendReply::Call(call) => {
                // Keep only the call being answered; one round-trip per turn.
                let mut message = response.message;
                message.tool_calls.retain(|tc| tc.id == call.id);
                self.pending.push(message);
            }
        }

        Ok(reply)
    }

    /// Answer the open tool call and take the follow-up as the turn's text.
    pub async fn submit_tool_result(
        &mut self,
        call: &ToolCall,
        result: &ToolResult,
    ) -> Result<String, ProviderError> {
        if self.pending.is_empty() {
            return Err(ProviderError::MalformedResponse(format!(
                "no open turn for tool result '{}'",
                call.name
            )));
        }
        self.pending
            .push(Message::tool_result(&call.id, &call.name, &result.output));

        let outcome = self.backend.provider.complete(self.staged_request()).await;
        let mut response = match outcome {
            Ok(r) => r,
            Err(e) => {
                self.abandon_turn();
                return Err(e);
            }
        };

        if response.message.content.is_empty() && !response.message.tool_calls.is_empty() {
            self.abandon_turn();
            return Err(ProviderError::MalformedResponse(
                "backend requested a nested tool call instead of answering".into(),
            ));
        }

        response.message.tool_calls.clear();
        let text = response.message.content.clone();
        self.pending.push(response.message);
        self.commit();
        Ok(text)
    }
}
