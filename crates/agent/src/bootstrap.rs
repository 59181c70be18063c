//! Assemble a [`Session`] from configuration.

use std::sync::Arc;
use arise_config::AppConfig;
use arise_core::error::{Error, Result};
use arise_core::provider::Provider;
use arise_core::transcript::TranscriptStore;
use arise_documents::DirectorySource;
use arise_transcript::{InMemoryTranscript, SqliteTranscript};
use tracing::info;

use crate::backend::Backend;
use crate::classifier::Classifier;
use crate::context_cache::{ContextCache, ContextOptions};
use crate::orchestrator::Orchestrator;
use crate::session::Session;

/// Open the configured transcript store.
pub async fn open_transcript(config: &AppConfig) -> Result<Arc<dyn TranscriptStore>> {
    match config.transcript.backend.as_str() {
        "memory" => Ok(Arc::new(InMemoryTranscript::new())),
        "sqlite" => {
            let path = config.transcript.sqlite_path();
            info!(path = %path.display(), "Opening SQLite transcript");
            Ok(Arc::new(SqliteTranscript::open(&path).await?))
        }
        other => Err(Error::Config {
            message: format!("unknown transcript backend '{other}'"),
        }),
    }
}

pub fn backend_for(config: &AppConfig, provider: Arc<dyn Provider>, model: impl Into<String>) -> Backend {
    Backend::new(provider, model)
        .with_temperature(config.default_temperature)
        .with_max_tokens(config.default_max_tokens)
}

/// Build the session with the given backend: directory documents, the
/// default tool set and the configured transcript store.
pub async fn build_session(config: &AppConfig, backend: Backend) -> Result<Session> {
    let context = Arc::new(ContextCache::new(
        Arc::new(DirectorySource::from_config(&config.documents)),
        backend.clone(),
        ContextOptions::from(&config.context),
    ));

    let mut orchestrator = Orchestrator::new(Arc::new(arise_tools::default_registry()))
        .with_prompt_char_budget(config.context.prompt_char_budget);
    if let Some(instruction) = &config.identity.system_prompt_override {
        orchestrator = orchestrator.with_system_instruction(instruction.clone());
    }

    let classifier = Classifier::new(
        &config.scope.extra_domain_keywords,
        &config.scope.extra_out_of_scope_keywords,
    );
    let transcript = open_transcript(config).await?;

    info!(
        provider = backend.provider_name(),
        model = backend.model(),
        transcript = transcript.name(),
        documents = %config.documents.dir.display(),
        "Session assembled"
    );

    Ok(
        Session::new(backend, classifier, orchestrator, context, transcript)
            .with_refresh_context_on_reset(config.context.refresh_on_reset),
    )
}
