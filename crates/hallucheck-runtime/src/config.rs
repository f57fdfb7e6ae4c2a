//! Runtime configuration.
//!
//! Everything a run needs besides the API keys: endpoints, models,
//! timeouts, judge sampling settings and the optional concurrency limit.
//! [`RuntimeConfig::default`] reproduces the stock setup; a YAML file can
//! override any subset of it:
//!
//! ```yaml
//! answerer:
//!   model: sonar-pro
//!   timeout: 3m
//! judge:
//!   url: https://my-proxy.internal/v1/chat/completions
//!   api_key_env: JUDGE_KEY
//! max_concurrency: 8
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::providers::CompletionConfig;

/// Default answering endpoint.
pub const DEFAULT_ANSWER_URL: &str = "https://api.perplexity.ai/chat/completions";
/// Default answering model.
pub const DEFAULT_ANSWER_MODEL: &str = "sonar";
/// Default environment variable holding the answering API key.
pub const DEFAULT_ANSWER_KEY_ENV: &str = "PPLX_KEY";

/// Default judge endpoint.
pub const DEFAULT_JUDGE_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default judge model.
pub const DEFAULT_JUDGE_MODEL: &str = "gpt-4.1";
/// Default environment variable holding the judge API key.
pub const DEFAULT_JUDGE_KEY_ENV: &str = "GPT4O_MINI_KEY";
/// The judge only ever needs to say YES or NO.
pub const DEFAULT_JUDGE_MAX_TOKENS: u32 = 5;

/// Errors from loading configuration or secrets.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid duration '{value}' for {field}: {reason}")]
    InvalidDuration {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid endpoint for {field}: '{url}' must start with http:// or https://")]
    InvalidEndpoint { field: &'static str, url: String },

    #[error("Invalid setting {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("{name} not set: configure the '{env_var}' environment variable")]
    MissingSecret { name: &'static str, env_var: String },

    #[error("API keys not set: configure the {} environment variables", .0.join(" and "))]
    MissingSecrets(Vec<String>),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Settings for one chat-completions endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    /// Full URL of the chat-completions route
    pub url: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Environment variable holding the bearer token
    pub api_key_env: String,

    /// Output token cap (omitted from the request when `None`)
    pub max_tokens: Option<u32>,

    /// Sampling temperature (omitted from the request when `None`)
    pub temperature: Option<f32>,
}

impl EndpointConfig {
    /// Stock answering endpoint: no sampling overrides, two-minute timeout.
    pub fn answerer() -> Self {
        Self {
            url: DEFAULT_ANSWER_URL.to_string(),
            model: DEFAULT_ANSWER_MODEL.to_string(),
            timeout: Duration::from_secs(120),
            api_key_env: DEFAULT_ANSWER_KEY_ENV.to_string(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Stock judge endpoint: deterministic, five tokens, 30 second timeout.
    pub fn judge() -> Self {
        Self {
            url: DEFAULT_JUDGE_URL.to_string(),
            model: DEFAULT_JUDGE_MODEL.to_string(),
            timeout: Duration::from_secs(30),
            api_key_env: DEFAULT_JUDGE_KEY_ENV.to_string(),
            max_tokens: Some(DEFAULT_JUDGE_MAX_TOKENS),
            temperature: Some(0.0),
        }
    }

    /// Request settings derived from this endpoint.
    pub fn completion_config(&self) -> CompletionConfig {
        CompletionConfig {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            timeout: self.timeout,
        }
    }

    fn apply(&mut self, file: EndpointFile, section: &'static str) -> Result<(), ConfigError> {
        if let Some(url) = file.url {
            self.url = url;
        }
        if let Some(model) = file.model {
            self.model = model;
        }
        if let Some(timeout) = file.timeout {
            self.timeout = parse_duration(section, &timeout)?;
        }
        if let Some(env) = file.api_key_env {
            self.api_key_env = env;
        }
        if let Some(max_tokens) = file.max_tokens {
            self.max_tokens = Some(max_tokens);
        }
        if let Some(temperature) = file.temperature {
            self.temperature = Some(temperature);
        }
        Ok(())
    }

    fn validate(&self, section: &'static str) -> Result<(), ConfigError> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint {
                field: section,
                url: self.url.clone(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: section,
                reason: "model must not be empty".to_string(),
            });
        }
        if self.timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                field: section,
                reason: "timeout must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration for an evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Model under evaluation
    pub answerer: EndpointConfig,

    /// Fact-checking model
    pub judge: EndpointConfig,

    /// Maximum items evaluated at once; `None` launches every item together
    pub max_concurrency: Option<usize>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            answerer: EndpointConfig::answerer(),
            judge: EndpointConfig::judge(),
            max_concurrency: None,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        // A document of only comments parses as null.
        let file: FileConfig = serde_yaml::from_str::<Option<FileConfig>>(yaml)?.unwrap_or_default();
        let mut config = Self::default();

        if let Some(answerer) = file.answerer {
            config.answerer.apply(answerer, "answerer")?;
        }
        if let Some(judge) = file.judge {
            config.judge.apply(judge, "judge")?;
        }
        if file.max_concurrency.is_some() {
            config.max_concurrency = file.max_concurrency;
        }

        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Set the concurrency limit.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit;
        self
    }

    /// Check endpoints and limits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.answerer.validate("answerer")?;
        self.judge.validate("judge")?;
        if self.max_concurrency == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "max_concurrency",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// On-disk shape: every field optional, applied over the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    answerer: Option<EndpointFile>,
    judge: Option<EndpointFile>,
    max_concurrency: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EndpointFile {
    url: Option<String>,
    model: Option<String>,
    timeout: Option<String>,
    api_key_env: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

fn parse_duration(field: &'static str, value: &str) -> Result<Duration, ConfigError> {
    humantime::parse_duration(value.trim()).map_err(|e| ConfigError::InvalidDuration {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
