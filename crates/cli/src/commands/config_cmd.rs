//! `arise config`: print the default configuration or check the current one.

use super::{CmdResult, load_config};
use arise_config::AppConfig;
use std::path::Path;

pub fn show_default() {
    println!("# {}", AppConfig::config_dir().join("config.toml").display());
    println!("{}", AppConfig::default_toml());
}

/// Warnings that do not make the configuration invalid.
pub fn warnings(config: &AppConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    if !config.has_api_key() {
        warnings.push("No API key set (set GEMINI_API_KEY or ARISE_API_KEY)".to_string());
    }
    if !config.documents.dir.is_dir() {
        warnings.push(format!(
            "Documents directory {} does not exist; answers will have no portfolio context",
            config.documents.dir.display()
        ));
    }
    if let Some(dir) = &config.gateway.static_dir {
        if !dir.join("index.html").is_file() {
            warnings.push(format!("Static site {} has no index.html", dir.display()));
        }
    }
    if config.gateway.host == "0.0.0.0" && config.gateway.allowed_origins.is_empty() {
        warnings.push("Gateway bound to 0.0.0.0 with CORS open to any origin".to_string());
    }

    warnings
}

pub fn check(config_path: Option<&Path>) -> CmdResult {
    println!("Validating configuration...");
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("   Config error: {e}");
            return Err(e);
        }
    };
    println!("   Config parsed successfully");

    let warnings = warnings(&config);
    if warnings.is_empty() {
        println!("   All checks passed");
    } else {
        println!();
        for w in &warnings {
            println!("   warning: {w}");
        }
    }

    println!();
    println!("   Provider:   {}", config.default_provider);
    println!("   Model:      {}", arise_providers::default_model(&config));
    println!("   Gateway:    {}:{}", config.gateway.host, config.gateway.port);
    println!("   Documents:  {}", config.documents.dir.display());
    println!("   Transcript: {}", config.transcript.backend);
    println!("   Summarize:  {}", config.context.summarize);

    Ok(())
}
