//! PDF text extraction.

use arise_core::error::DocumentError;
use std::path::Path;
use tracing::{debug, warn};

/// Extract the text of every page, one page per line block.
///
/// Pages that fail to extract are skipped. Returns an empty string when no
/// page yields text.
pub fn extract_text(path: &Path) -> Result<String, DocumentError> {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let doc = lopdf::Document::load(path).map_err(|e| DocumentError::Unreadable {
        filename: filename.clone(),
        reason: e.to_string(),
    })?;

    let mut text = String::new();
    for page_number in doc.get_pages().keys() {
        match doc.extract_text(&[*page_number]) {
            Ok(page) if !page.trim().is_empty() => {
                text.push_str(page.trim_end());
                text.push('\n');
            }
            Ok(_) => debug!(file = %filename, page = page_number, "PDF page has no text"),
            Err(e) => warn!(file = %filename, page = page_number, error = %e, "Skipping unreadable PDF page"),
        }
    }

    Ok(text)
}
