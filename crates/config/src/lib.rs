//! Configuration loading, validation, and management for A.R.I.S.E.
//!
//! Loads configuration from `~/.arise/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.arise/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key (can be overridden per-provider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Default language backend
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Default model
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Default temperature
    #[serde(default = "default_temperature")]
    pub default_temperature: f32,

    /// Default max tokens per backend response
    #[serde(default = "default_max_tokens")]
    pub default_max_tokens: u32,

    /// HTTP gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Document collection configuration
    #[serde(default)]
    pub documents: DocumentsConfig,

    /// Context cache configuration
    #[serde(default)]
    pub context: ContextConfig,

    /// Transcript persistence configuration
    #[serde(default)]
    pub transcript: TranscriptConfig,

    /// Assistant identity configuration
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Classifier keyword extensions
    #[serde(default)]
    pub scope: ScopeConfig,

    /// Provider-specific configurations
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

fn default_provider() -> String {
    "gemini".into()
}
fn default_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    2048
}

fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_provider", &self.default_provider)
            .field("default_model", &self.default_model)
            .field("default_temperature", &self.default_temperature)
            .field("default_max_tokens", &self.default_max_tokens)
            .field("gateway", &self.gateway)
            .field("documents", &self.documents)
            .field("context", &self.context)
            .field("transcript", &self.transcript)
            .field("identity", &self.identity)
            .field("scope", &self.scope)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("default_model", &self.default_model)
            .finish()
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Directory holding `index.html` and `assets/`. Unset = API only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,

    /// CORS origins. Empty = allow any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

fn default_port() -> u16 {
    5000
}
fn default_host() -> String {
    "127.0.0.1".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            static_dir: None,
            allowed_origins: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentsConfig {
    /// Directory scanned for portfolio documents
    #[serde(default = "default_docs_dir")]
    pub dir: PathBuf,

    /// File extensions read as UTF-8 text (lower-case, no dot)
    #[serde(default = "default_text_extensions")]
    pub text_extensions: Vec<String>,

    /// Whether PDFs are extracted
    #[serde(default = "default_true")]
    pub include_pdf: bool,
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("docs")
}
fn default_text_extensions() -> Vec<String> {
    ["py", "js", "html", "css", "txt", "md"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            text_extensions: default_text_extensions(),
            include_pdf: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Compress the document collection with one summarization call
    #[serde(default = "default_true")]
    pub summarize: bool,

    /// Word limit requested from the summarizer
    #[serde(default = "default_summary_word_limit")]
    pub summary_word_limit: usize,

    /// Raw-prefix length used when summarization fails
    #[serde(default = "default_fallback_chars")]
    pub fallback_chars: usize,

    /// Character budget of the context placed in each prompt
    #[serde(default = "default_prompt_char_budget")]
    pub prompt_char_budget: usize,

    /// Recompute the document context when a chat is reset
    #[serde(default)]
    pub refresh_on_reset: bool,
}

fn default_summary_word_limit() -> usize {
    1000
}
fn default_fallback_chars() -> usize {
    2000
}
fn default_prompt_char_budget() -> usize {
    3000
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            summarize: true,
            summary_word_limit: default_summary_word_limit(),
            fallback_chars: default_fallback_chars(),
            prompt_char_budget: default_prompt_char_budget(),
            refresh_on_reset: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptConfig {
    /// "memory" or "sqlite"
    #[serde(default = "default_transcript_backend")]
    pub backend: String,

    /// SQLite database file (defaults to `~/.arise/chat.db`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_transcript_backend() -> String {
    "memory".into()
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            backend: default_transcript_backend(),
            path: None,
        }
    }
}

impl TranscriptConfig {
    /// Resolved SQLite path.
    pub fn sqlite_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| AppConfig::config_dir().join("chat.db"))
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentityConfig {
    /// Replace the built-in system instruction entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_override: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Extra terms that mark a question as needing portfolio context
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_domain_keywords: Vec<String>,

    /// Extra terms that mark a question as out of scope
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_out_of_scope_keywords: Vec<String>,
}

const KNOWN_TRANSCRIPT_BACKENDS: &[&str] = &["memory", "sqlite"];

impl AppConfig {
    /// Load configuration from the default path (~/.arise/config.toml).
    ///
    /// Environment variables override file values:
    /// - `ARISE_API_KEY` (highest priority), `GEMINI_API_KEY`, `OPENAI_API_KEY`
    /// - `ARISE_PROVIDER`, `ARISE_MODEL`
    /// - `PORT`, `ARISE_DOCS_DIR`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        Self::load_with_env(&config_path)
    }

    /// Load from `path`, then apply process environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if self.api_key.is_none() {
            self.api_key = lookup("ARISE_API_KEY")
                .or_else(|| lookup("GEMINI_API_KEY"))
                .or_else(|| lookup("OPENAI_API_KEY"));
        }

        if let Some(provider) = lookup("ARISE_PROVIDER") {
            self.default_provider = provider;
        }

        if let Some(model) = lookup("ARISE_MODEL") {
            self.default_model = model;
        }

        if let Some(port) = lookup("PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("PORT must be a port number, got '{port}'"))
            })?;
        }

        if let Some(dir) = lookup("ARISE_DOCS_DIR") {
            self.documents.dir = PathBuf::from(dir);
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".arise")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_temperature < 0.0 || self.default_temperature > 2.0 {
            return Err(ConfigError::ValidationError(
                "default_temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.context.prompt_char_budget == 0 {
            return Err(ConfigError::ValidationError(
                "context.prompt_char_budget must be > 0".into(),
            ));
        }

        if !KNOWN_TRANSCRIPT_BACKENDS.contains(&self.transcript.backend.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown transcript backend '{}' (expected one of: {})",
                self.transcript.backend,
                KNOWN_TRANSCRIPT_BACKENDS.join(", ")
            )));
        }

        Ok(())
    }

    /// Check if an API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
            || self
                .providers
                .get(&self.default_provider)
                .is_some_and(|p| p.api_key.is_some())
    }

    /// Generate a default config TOML string (for the `config` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            default_max_tokens: default_max_tokens(),
            gateway: GatewayConfig::default(),
            documents: DocumentsConfig::default(),
            context: ContextConfig::default(),
            transcript: TranscriptConfig::default(),
            identity: IdentityConfig::default(),
            scope: ScopeConfig::default(),
            providers: HashMap::new(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for arise_core::Error {
    fn from(e: ConfigError) -> Self {
        arise_core::Error::Config {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert_eq!(config.default_provider, "gemini");
        assert_eq!(config.default_model, "gemini-2.0-flash");
        assert_eq!(config.gateway.port, 5000);
        assert_eq!(config.context.prompt_char_budget, 3000);
        assert!(!config.context.refresh_on_reset);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.default_provider, config.default_provider);
        assert_eq!(parsed.documents.dir, config.documents.dir);
        assert_eq!(parsed.context.fallback_chars, config.context.fallback_chars);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let config = AppConfig {
            default_temperature: 5.0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_prompt_budget_rejected() {
        let mut config = AppConfig::default();
        config.context.prompt_char_budget = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_transcript_backend_rejected() {
        let mut config = AppConfig::default();
        config.transcript.backend = "redis".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("redis"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.default_provider, "gemini");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_model = "gemini-1.5-pro"

[context]
summarize = false

[transcript]
backend = "sqlite"
path = "/var/lib/arise/chat.db"

[scope]
extra_domain_keywords = ["rustacean"]
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.default_model, "gemini-1.5-pro");
        assert!(!config.context.summarize);
        assert_eq!(config.context.summary_word_limit, 1000);
        assert_eq!(
            config.transcript.sqlite_path(),
            PathBuf::from("/var/lib/arise/chat.db")
        );
        assert_eq!(config.scope.extra_domain_keywords, vec!["rustacean"]);
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "default_temperature = \"hot\"").unwrap();
        let err = AppConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = AppConfig::default();
        config
            .apply_env(env_from(&[
                ("GEMINI_API_KEY", "g-key"),
                ("OPENAI_API_KEY", "o-key"),
                ("ARISE_MODEL", "gemini-1.5-flash"),
                ("PORT", "8080"),
                ("ARISE_DOCS_DIR", "/srv/docs"),
            ]))
            .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("g-key"));
        assert_eq!(config.default_model, "gemini-1.5-flash");
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.documents.dir, PathBuf::from("/srv/docs"));
    }

    #[test]
    fn file_api_key_beats_env() {
        let mut config = AppConfig {
            api_key: Some("from-file".into()),
            ..AppConfig::default()
        };
        config.apply_env(env_from(&[("ARISE_API_KEY", "from-env")])).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn bad_port_env_rejected() {
        let mut config = AppConfig::default();
        let err = config.apply_env(env_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn debug_redacts_keys() {
        let mut config = AppConfig {
            api_key: Some("super-secret".into()),
            ..AppConfig::default()
        };
        config.providers.insert(
            "openai".into(),
            ProviderConfig {
                api_key: Some("sk-also-secret".into()),
                api_url: None,
                default_model: None,
            },
        );
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(!dbg.contains("sk-also-secret"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("gemini-2.0-flash"));
        assert!(toml_str.contains("5000"));
        assert!(toml_str.contains("[context]"));
    }
}
