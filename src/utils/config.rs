//! Configuration for the LawboxAI client registry
//!
//! Every client handle the registry builds is described here. Values come
//! from three layers, later layers winning:
//!
//! 1. Built-in defaults (the model ids, temperatures and Qdrant host the
//!    LawboxAI services run with)
//! 2. An optional TOML file (`lawbox.toml`)
//! 3. Environment variables named by the `*_env` fields, optionally seeded
//!    from a `.env` file
//!
//! Loading is an explicit step: [`RegistryConfig::validate`] reports every
//! missing or malformed field at once, before any client is constructed.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable holding the primary Ollama endpoint.
pub const PRIMARY_ENDPOINT_ENV: &str = "OLLAMA_SERVER";

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "lawbox.toml";

/// Root configuration structure loaded from lawbox.toml and the environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Locally hosted chat model (Ollama)
    #[serde(default)]
    pub primary: PrimaryLlmConfig,

    /// Optional cloud chat model (Groq)
    #[serde(default)]
    pub secondary: SecondaryLlmConfig,

    /// Vector database (Qdrant)
    #[serde(default)]
    pub vector_db: VectorDbConfig,
}

// ============= Primary LLM Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryLlmConfig {
    /// Environment variable containing the Ollama server address
    #[serde(default = "default_primary_endpoint_env")]
    pub base_url_env: String,

    /// Explicit endpoint. When unset it is resolved from `base_url_env`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_primary_model")]
    pub model: String,

    #[serde(default = "default_primary_temperature")]
    pub temperature: f32,
}

fn default_primary_endpoint_env() -> String {
    PRIMARY_ENDPOINT_ENV.to_string()
}

fn default_primary_model() -> String {
    "llama3.2:latest".to_string()
}

fn default_primary_temperature() -> f32 {
    0.8
}

impl Default for PrimaryLlmConfig {
    fn default() -> Self {
        Self {
            base_url_env: default_primary_endpoint_env(),
            base_url: None,
            model: default_primary_model(),
            temperature: default_primary_temperature(),
        }
    }
}

impl PrimaryLlmConfig {
    /// The resolved endpoint, or an empty string when none is known.
    pub fn endpoint(&self) -> &str {
        self.base_url.as_deref().unwrap_or("")
    }
}

// ============= Secondary LLM Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecondaryLlmConfig {
    /// Build the secondary handle. Defaults to on only when the `groq`
    /// feature is compiled in.
    #[serde(default = "default_secondary_enabled")]
    pub enabled: bool,

    #[serde(default = "default_secondary_model")]
    pub model: String,

    #[serde(default = "default_secondary_temperature")]
    pub temperature: f32,

    /// Environment variable containing the Groq API key
    #[serde(default = "default_secondary_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_secondary_api_base")]
    pub api_base: String,

    /// Resolved from `api_key_env`; never written back to disk.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_secondary_enabled() -> bool {
    cfg!(feature = "groq")
}

fn default_secondary_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_secondary_temperature() -> f32 {
    0.0
}

fn default_secondary_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_secondary_api_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

impl Default for SecondaryLlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_secondary_enabled(),
            model: default_secondary_model(),
            temperature: default_secondary_temperature(),
            api_key_env: default_secondary_api_key_env(),
            api_base: default_secondary_api_base(),
            api_key: None,
        }
    }
}

// ============= Vector Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// Qdrant host name. Not read from the environment.
    #[serde(default = "default_qdrant_host")]
    pub host: String,

    /// Qdrant gRPC port
    #[serde(default = "default_qdrant_port")]
    pub port: u16,

    /// Environment variable for the Qdrant API key (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_qdrant_host() -> String {
    "lawboxai_qdrant".to_string()
}

fn default_qdrant_port() -> u16 {
    6334
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        Self {
            host: default_qdrant_host(),
            port: default_qdrant_port(),
            api_key_env: None,
            api_key: None,
        }
    }
}

impl VectorDbConfig {
    /// gRPC URL the Qdrant client is pointed at.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

// ============= Configuration Loading & Validation =============

/// A single problem found while validating a configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigIssue {
    MissingEnvVar { field: &'static str, var: String },
    InvalidUrl { field: &'static str, value: String, reason: String },
    TemperatureOutOfRange { field: &'static str, value: f32 },
    EmptyValue { field: &'static str },
    InvalidPort { field: &'static str },
    ProviderNotCompiled { field: &'static str, feature: &'static str },
}

impl ConfigIssue {
    /// Dotted path of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ConfigIssue::MissingEnvVar { field, .. }
            | ConfigIssue::InvalidUrl { field, .. }
            | ConfigIssue::TemperatureOutOfRange { field, .. }
            | ConfigIssue::EmptyValue { field }
            | ConfigIssue::InvalidPort { field }
            | ConfigIssue::ProviderNotCompiled { field, .. } => field,
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigIssue::MissingEnvVar { field, var } => {
                write!(f, "{}: environment variable '{}' is not set", field, var)
            }
            ConfigIssue::InvalidUrl {
                field,
                value,
                reason,
            } => write!(f, "{}: '{}' is not a valid URL ({})", field, value, reason),
            ConfigIssue::TemperatureOutOfRange { field, value } => {
                write!(f, "{}: temperature {} is outside 0.0..=2.0", field, value)
            }
            ConfigIssue::EmptyValue { field } => write!(f, "{}: must not be empty", field),
            ConfigIssue::InvalidPort { field } => write!(f, "{}: port must be non-zero", field),
            ConfigIssue::ProviderNotCompiled { field, feature } => write!(
                f,
                "{}: enabled but this build lacks the '{}' feature",
                field, feature
            ),
        }
    }
}

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Invalid configuration: {}", join_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl ConfigError {
    /// Validation issues carried by this error, if any
    pub fn issues(&self) -> &[ConfigIssue] {
        match self {
            ConfigError::Invalid(issues) => issues,
            _ => &[],
        }
    }
}

/// Parse an endpoint address into a URL usable by an HTTP client.
///
/// A value without a scheme (`ollama:11434`) is taken as plain `http`. Only
/// `http` and `https` URLs with a host are accepted.
pub fn parse_endpoint(raw: &str) -> Result<Url, String> {
    let raw = raw.trim();
    let url = if raw.contains("://") {
        Url::parse(raw)
    } else {
        Url::parse(&format!("http://{}", raw))
    }
    .map_err(|e| e.to_string())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err("missing host".to_string());
    }
    Ok(url)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RegistryConfig {
    /// Parse a TOML document without touching the environment
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load, resolve and validate a TOML file against the process environment
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        load_dotenv();
        debug!("Loading configuration from {}", path.display());

        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;
        config.resolve(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Load `path` when it exists, otherwise fall back to [`Self::from_env`]
    pub fn load_or_env<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!(
                "No config file at {}, using defaults and environment",
                path.display()
            );
            Self::from_env()
        }
    }

    /// Build from defaults and the process environment (seeded from `.env`)
    pub fn from_env() -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from defaults, resolving variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.resolve(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Fill every env-backed field that has no explicit value yet
    pub fn resolve<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if non_empty(self.primary.base_url.clone()).is_none() {
            self.primary.base_url = non_empty(lookup(&self.primary.base_url_env));
        }

        if self.secondary.enabled && self.secondary.api_key.is_none() {
            self.secondary.api_key = non_empty(lookup(&self.secondary.api_key_env));
        }

        if let Some(ref env) = self.vector_db.api_key_env {
            if self.vector_db.api_key.is_none() {
                self.vector_db.api_key = non_empty(lookup(env));
            }
        }
    }

    /// Check the resolved configuration, reporting every problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let issues = self.collect_issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }

    fn collect_issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        match self.primary.base_url.as_deref() {
            None => issues.push(ConfigIssue::MissingEnvVar {
                field: "primary.base_url",
                var: self.primary.base_url_env.clone(),
            }),
            Some(url) => {
                if let Err(reason) = parse_endpoint(url) {
                    issues.push(ConfigIssue::InvalidUrl {
                        field: "primary.base_url",
                        value: url.to_string(),
                        reason,
                    });
                }
            }
        }
        if self.primary.model.trim().is_empty() {
            issues.push(ConfigIssue::EmptyValue {
                field: "primary.model",
            });
        }
        check_temperature(&mut issues, "primary.temperature", self.primary.temperature);

        if self.secondary.enabled {
            if !cfg!(feature = "groq") {
                issues.push(ConfigIssue::ProviderNotCompiled {
                    field: "secondary",
                    feature: "groq",
                });
            }
            if self.secondary.api_key.is_none() {
                issues.push(ConfigIssue::MissingEnvVar {
                    field: "secondary.api_key",
                    var: self.secondary.api_key_env.clone(),
                });
            }
            if let Err(reason) = parse_endpoint(&self.secondary.api_base) {
                issues.push(ConfigIssue::InvalidUrl {
                    field: "secondary.api_base",
                    value: self.secondary.api_base.clone(),
                    reason,
                });
            }
            if self.secondary.model.trim().is_empty() {
                issues.push(ConfigIssue::EmptyValue {
                    field: "secondary.model",
                });
            }
            check_temperature(
                &mut issues,
                "secondary.temperature",
                self.secondary.temperature,
            );
        }

        if self.vector_db.host.trim().is_empty() {
            issues.push(ConfigIssue::EmptyValue {
                field: "vector_db.host",
            });
        }
        if self.vector_db.port == 0 {
            issues.push(ConfigIssue::InvalidPort {
                field: "vector_db.port",
            });
        }
        if let Some(ref env) = self.vector_db.api_key_env {
            if self.vector_db.api_key.is_none() {
                issues.push(ConfigIssue::MissingEnvVar {
                    field: "vector_db.api_key",
                    var: env.clone(),
                });
            }
        }

        issues
    }

    /// Render as TOML. Resolved secrets are skipped.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn check_temperature(issues: &mut Vec<ConfigIssue>, field: &'static str, value: f32) {
    if !(0.0..=2.0).contains(&value) {
        issues.push(ConfigIssue::TemperatureOutOfRange { field, value });
    }
}

fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }
}
