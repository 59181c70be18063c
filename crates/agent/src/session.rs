//! The single logical conversation: transcript, live backend handle and
//! the transcript-derived helpers.

use std::sync::Arc;
use arise_core::error::{Error, Result};
use arise_core::transcript::{self, Speaker, TranscriptStore, Turn};
use tracing::{debug, info};

use crate::backend::{Backend, ChatHandle};
use crate::classifier::Classifier;
use crate::context_cache::ContextCache;
use crate::orchestrator::{Answer, Orchestrator};
use crate::prompts;
use crate::sanitizer::sanitize;

const QUOTES: &[char] = &['"', '\'', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];

pub struct Session {
    backend: Backend,
    classifier: Classifier,
    orchestrator: Orchestrator,
    context: Arc<ContextCache>,
    transcript: Arc<dyn TranscriptStore>,
    handle: ChatHandle,
    refresh_context_on_reset: bool,
}

impl Session {
    pub fn new(
        backend: Backend,
        classifier: Classifier,
        orchestrator: Orchestrator,
        context: Arc<ContextCache>,
        transcript: Arc<dyn TranscriptStore>,
    ) -> Self {
        let handle = backend.start_chat(orchestrator.tool_definitions());
        Self {
            backend,
            classifier,
            orchestrator,
            context,
            transcript,
            handle,
            refresh_context_on_reset: false,
        }
    }

    /// Invalidate the document context whenever the session is reset.
    pub fn with_refresh_context_on_reset(mut self, refresh: bool) -> Self {
        self.refresh_context_on_reset = refresh;
        self
    }

    /// Answer one user message and record the exchange.
    ///
    /// A successful send appends exactly one User turn and one Assistant
    /// turn. A failed send appends nothing.
    pub async fn send(&mut self, message: &str) -> Result<Answer> {
        let message = message.trim();
        if message.is_empty() {
            return Err(Error::EmptyInput);
        }

        let classification = self.classifier.classify(message);
        debug!(classification = ?classification, "Classified message");

        let answer = self
            .orchestrator
            .answer(message, &classification, &self.context, &mut self.handle)
            .await?;

        self.transcript
            .append(vec![Turn::user(message), Turn::assistant(&answer.text)])
            .await?;

        info!(
            source = %answer.source,
            chars = answer.text.chars().count(),
            conversation_id = %self.handle.id(),
            "Turn completed"
        );
        Ok(answer)
    }

    /// Start over with a fresh backend conversation and an empty transcript.
    pub async fn reset(&mut self) -> Result<()> {
        self.transcript.clear().await?;
        self.handle = self.backend.start_chat(self.orchestrator.tool_definitions());
        if self.refresh_context_on_reset {
            self.context.invalidate();
        }
        info!(conversation_id = %self.handle.id(), "Session reset");
        Ok(())
    }

    /// Summarize the conversation so far.
    pub async fn summarize(&self) -> Result<String> {
        let turns = self.transcript.turns().await?;
        if turns.is_empty() {
            return Ok(prompts::NOTHING_TO_SUMMARIZE.to_string());
        }
        let prompt = prompts::conversation_summary_prompt(&transcript::render(&turns));
        let summary = self.backend.generate(&prompt).await?;
        Ok(sanitize(&summary))
    }

    /// Suggest a follow-up to the latest assistant reply.
    pub async fn suggest_next(&self) -> Result<String> {
        let turns = self.transcript.turns().await?;
        let Some(last) = turns.iter().rev().find(|t| t.speaker == Speaker::Assistant) else {
            return Ok(prompts::DEFAULT_SUGGESTION.to_string());
        };
        let suggestion = self
            .backend
            .generate(&prompts::suggestion_prompt(&last.text))
            .await?;
        Ok(sanitize(&suggestion).trim().trim_matches(QUOTES).trim().to_string())
    }

    pub async fn transcript(&self) -> Result<Vec<Turn>> {
        Ok(self.transcript.turns().await?)
    }

    pub fn context(&self) -> &Arc<ContextCache> {
        &self.context
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }
}
