//! Directory-backed document source.

use async_trait::async_trait;
use arise_config::DocumentsConfig;
use arise_core::document::DocumentSource;
use arise_core::error::DocumentError;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::pdf;

/// Reads a flat directory: text files by extension, PDFs via extraction.
pub struct DirectorySource {
    dir: PathBuf,
    text_extensions: Vec<String>,
    include_pdf: bool,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let defaults = DocumentsConfig::default();
        Self {
            dir: dir.into(),
            text_extensions: defaults.text_extensions,
            include_pdf: defaults.include_pdf,
        }
    }

    pub fn from_config(config: &DocumentsConfig) -> Self {
        Self {
            dir: config.dir.clone(),
            text_extensions: config
                .text_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
            include_pdf: config.include_pdf,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn kind_of(&self, filename: &str) -> Kind {
        let ext = Path::new(filename)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if ext == "pdf" {
            if self.include_pdf { Kind::Pdf } else { Kind::Skipped }
        } else if self.text_extensions.contains(&ext) {
            Kind::Text
        } else {
            Kind::Skipped
        }
    }
}

enum Kind {
    Text,
    Pdf,
    Skipped,
}

#[async_trait]
impl DocumentSource for DirectorySource {
    async fn list(&self) -> Result<Vec<String>, DocumentError> {
        let missing = || DocumentError::CollectionMissing(self.dir.display().to_string());

        let mut entries = tokio::fs::read_dir(&self.dir).await.map_err(|_| missing())?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|_| missing())? {
            let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
            if is_file {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn read_text(&self, filename: &str) -> Result<Option<String>, DocumentError> {
        let path = self.dir.join(filename);
        let unreadable = |reason: String| DocumentError::Unreadable {
            filename: filename.to_string(),
            reason,
        };

        match self.kind_of(filename) {
            Kind::Skipped => {
                debug!(file = filename, "Skipping non-extractable document");
                Ok(None)
            }
            Kind::Text => tokio::fs::read_to_string(&path)
                .await
                .map(Some)
                .map_err(|e| unreadable(e.to_string())),
            Kind::Pdf => {
                let text = tokio::task::spawn_blocking(move || pdf::extract_text(&path))
                    .await
                    .map_err(|e| unreadable(e.to_string()))??;
                Ok((!text.is_empty()).then_some(text))
            }
        }
    }
}
