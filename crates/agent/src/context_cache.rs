//! Document context cache.
//!
//! The document collection is read once, compressed with one summarization
//! call, sanitized, and memoized until [`ContextCache::invalidate`]. Loading
//! never fails: a missing collection yields the no-documents sentinel and a
//! failed summarization falls back to a prefix of the raw text.

use std::sync::{Arc, RwLock};
use arise_config::ContextConfig;
use arise_core::document::DocumentSource;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::backend::Backend;
use crate::prompts;
use crate::sanitizer::sanitize;

#[derive(Debug, Clone)]
pub struct ContextOptions {
    pub summarize: bool,
    pub summary_word_limit: usize,
    pub fallback_chars: usize,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self::from(&ContextConfig::default())
    }
}

impl From<&ContextConfig> for ContextOptions {
    fn from(c: &ContextConfig) -> Self {
        Self {
            summarize: c.summarize,
            summary_word_limit: c.summary_word_limit,
            fallback_chars: c.fallback_chars,
        }
    }
}

pub struct ContextCache {
    source: Arc<dyn DocumentSource>,
    backend: Backend,
    options: ContextOptions,
    cell: RwLock<Arc<OnceCell<String>>>,
}

impl ContextCache {
    pub fn new(source: Arc<dyn DocumentSource>, backend: Backend, options: ContextOptions) -> Self {
        Self {
            source,
            backend,
            options,
            cell: RwLock::new(Arc::new(OnceCell::new())),
        }
    }

    fn current(&self) -> Arc<OnceCell<String>> {
        self.cell
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The document context, computing it on first use.
    ///
    /// Concurrent first callers share one computation.
    pub async fn get_context(&self) -> String {
        let cell = self.current();
        cell.get_or_init(|| self.compute()).await.clone()
    }

    /// The context cut to `budget` characters, with a marker when cut.
    pub async fn capped(&self, budget: usize) -> String {
        let context = self.get_context().await;
        match context.char_indices().nth(budget) {
            Some((cut, _)) => format!("{}{}", &context[..cut], prompts::CONTEXT_TRUNCATED),
            None => context,
        }
    }

    /// Force recomputation on the next call.
    ///
    /// A computation already in flight finishes into the discarded cell and
    /// its callers receive that result. Callers arriving after `invalidate`
    /// start a fresh computation, so two summarizations can briefly overlap.
    pub fn invalidate(&self) {
        *self.cell.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(OnceCell::new());
        debug!("Document context invalidated");
    }

    pub fn is_loaded(&self) -> bool {
        self.current().initialized()
    }

    async fn compute(&self) -> String {
        let raw = self.load_raw().await;
        if raw.trim().is_empty() {
            info!("No documents found; using sentinel context");
            return prompts::NO_DOCUMENTS.to_string();
        }

        if !self.options.summarize {
            info!(chars = raw.chars().count(), "Document context cached without summarization");
            return raw;
        }

        let prompt = prompts::document_summary_prompt(self.options.summary_word_limit, &raw);
        match self.backend.generate(&prompt).await {
            Ok(summary) => {
                let cleaned = sanitize(&summary);
                if cleaned.is_empty() {
                    warn!("Summarization returned no text; using raw prefix");
                    return self.fallback(&raw);
                }
                info!(chars = cleaned.chars().count(), "Documents summarized and cached");
                cleaned
            }
            Err(e) => {
                warn!(error = %e, "Summarization failed; using raw prefix");
                self.fallback(&raw)
            }
        }
    }

    fn fallback(&self, raw: &str) -> String {
        let prefix: String = raw.chars().take(self.options.fallback_chars).collect();
        format!("{prefix}{}", prompts::RAW_TRUNCATED)
    }

    async fn load_raw(&self) -> String {
        let names = match self.source.list().await {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "Document collection unavailable");
                return String::new();
            }
        };

        let mut raw = String::new();
        for name in names {
            match self.source.read_text(&name).await {
                Ok(Some(text)) => {
                    debug!(file = %name, chars = text.len(), "Loaded document");
                    raw.push_str(&format!("\n--- {name} ---\n{text}\n"));
                }
                Ok(None) => debug!(file = %name, "Skipped non-extractable document"),
                Err(e) => warn!(file = %name, error = %e, "Skipping unreadable document"),
            }
        }
        raw
    }
}
