//! Per-turn answer pipeline: canned replies for short-circuit classes,
//! otherwise prompt assembly, one backend turn and at most one tool
//! round-trip. Every returned text is sanitized.

use std::sync::Arc;
use arise_core::error::{Error, Result};
use arise_core::provider::{BackendReply, ToolDefinition};
use arise_core::tool::ToolRegistry;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::ChatHandle;
use crate::classifier::{Classification, Polarity};
use crate::context_cache::ContextCache;
use crate::prompts;
use crate::sanitizer::sanitize;

/// Which path produced an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    GreetingHandler,
    ScopeGuard,
    Model,
    Tool,
}

impl SourceTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTag::GreetingHandler => "greeting_handler",
            SourceTag::ScopeGuard => "scope_guard",
            SourceTag::Model => "model",
            SourceTag::Tool => "tool",
        }
    }
}

impl std::fmt::Display for SourceTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub text: String,
    pub source: SourceTag,
}

impl Answer {
    fn new(text: impl AsRef<str>, source: SourceTag) -> Self {
        Self {
            text: sanitize(text.as_ref()),
            source,
        }
    }
}

pub struct Orchestrator {
    tools: Arc<ToolRegistry>,
    system_instruction: String,
    prompt_char_budget: usize,
}

impl Orchestrator {
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self {
            tools,
            system_instruction: prompts::SYSTEM_INSTRUCTION.to_string(),
            prompt_char_budget: 3000,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    /// Maximum context characters embedded in a prompt.
    pub fn with_prompt_char_budget(mut self, budget: usize) -> Self {
        self.prompt_char_budget = budget;
        self
    }

    /// Definitions for the tools a chat handle may request.
    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.definitions()
    }

    /// Produce the answer for one classified message.
    ///
    /// On error the handle's history is unchanged.
    pub async fn answer(
        &self,
        message: &str,
        classification: &Classification,
        context: &ContextCache,
        handle: &mut ChatHandle,
    ) -> Result<Answer> {
        match classification {
            Classification::Greeting(Polarity::Hello) => {
                return Ok(Answer::new(prompts::GREETING_REPLY, SourceTag::GreetingHandler));
            }
            Classification::Greeting(Polarity::Bye) => {
                return Ok(Answer::new(prompts::FAREWELL_REPLY, SourceTag::GreetingHandler));
            }
            Classification::OutOfScope => {
                return Ok(Answer::new(prompts::OUT_OF_SCOPE_REPLY, SourceTag::ScopeGuard));
            }
            Classification::NeedsContext | Classification::General => {}
        }

        let capped = context.capped(self.prompt_char_budget).await;
        let prompt = prompts::turn_prompt(&self.system_instruction, &capped, message);
        debug!(
            classification = ?classification,
            prompt_chars = prompt.chars().count(),
            "Sending turn to backend"
        );

        match handle.send_turn(&prompt).await? {
            BackendReply::Text(text) => Ok(Answer::new(text, SourceTag::Model)),
            BackendReply::Call(call) => {
                info!(tool = %call.name, call_id = %call.id, "Backend requested tool");
                let result = match self.tools.execute(&call).await {
                    Ok(r) => r,
                    Err(e) => {
                        warn!(tool = %call.name, error = %e, "Tool execution failed");
                        handle.abandon_turn();
                        return Err(Error::Tool(e));
                    }
                };
                let text = handle.submit_tool_result(&call, &result).await?;
                Ok(Answer::new(text, SourceTag::Tool))
            }
        }
    }
}
