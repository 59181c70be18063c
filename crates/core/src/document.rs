//! Document source trait: supplier of raw text blobs keyed by filename.

use async_trait::async_trait;
use crate::error::DocumentError;

#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Filenames in the collection, in a stable order.
    ///
    /// Fails with `CollectionMissing` when the collection does not exist.
    async fn list(&self) -> Result<Vec<String>, DocumentError>;

    /// Extracted text of one document.
    ///
    /// `Ok(None)` means the type is not extractable and should be skipped.
    async fn read_text(&self, filename: &str) -> Result<Option<String>, DocumentError>;
}
