//! Subcommand implementations and the setup they share.

pub mod chat;
pub mod config_cmd;
pub mod context;
pub mod serve;

use arise_agent::{Session, backend_for, build_session};
use arise_config::AppConfig;
use std::path::Path;

pub type CmdResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub fn load_config(path: Option<&Path>) -> CmdResult<AppConfig> {
    let config = match path {
        Some(p) => AppConfig::load_with_env(p),
        None => AppConfig::load(),
    };
    Ok(config.map_err(|e| format!("Failed to load config: {e}"))?)
}

/// Build the session against the configured default provider.
pub async fn session_from(config: &AppConfig) -> CmdResult<Session> {
    if !config.has_api_key() && config.default_provider != "ollama" {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables (or put it in .env):");
        eprintln!("    GEMINI_API_KEY = '...'   (default provider)");
        eprintln!("    OPENAI_API_KEY = 'sk-...'");
        eprintln!("    ARISE_API_KEY  = '...'   (generic)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let router = arise_providers::build_from_config(config);
    let provider = router.default().ok_or("No default provider configured")?;
    let backend = backend_for(config, provider, arise_providers::default_model(config));
    Ok(build_session(config, backend).await?)
}
