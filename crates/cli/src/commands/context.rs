//! `arise context`: load the documents and print the resulting context.

use super::{CmdResult, load_config, session_from};
use std::path::Path;

pub async fn run(config_path: Option<&Path>) -> CmdResult {
    let config = load_config(config_path)?;
    let session = session_from(&config).await?;

    eprintln!("  Loading documents from {}...", config.documents.dir.display());
    let context = session.context().get_context().await;

    println!("{context}");
    eprintln!();
    eprintln!(
        "  {} characters ({} sent per prompt at most)",
        context.chars().count(),
        config.context.prompt_char_budget
    );
    Ok(())
}
