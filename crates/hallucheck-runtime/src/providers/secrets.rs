//! Secure credential handling for the answering and judge APIs.
//!
//! Credentials are wrapped in [`secrecy::SecretString`] as soon as they are
//! read and only exposed at the point where the `Authorization` header is
//! built.
//!
//! ## Usage
//!
//! ```ignore
//! let config = RuntimeConfig::default();
//! let credentials = Credentials::load(&config)?;
//!
//! // Use in HTTP header (explicit exposure)
//! request.bearer_auth(credentials.answerer().expose());
//! ```

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

use crate::config::{ConfigError, RuntimeConfig};

/// Where a credential was loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Loaded from environment variable
    Environment,
    /// Provided programmatically
    Programmatic,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment => write!(f, "environment"),
            CredentialSource::Programmatic => write!(f, "programmatic"),
        }
    }
}

/// A securely-stored API credential.
///
/// `Debug` and `Display` show `[REDACTED]` instead of the value; the value
/// is zeroed on drop by `secrecy`.
pub struct ApiCredential {
    value: SecretString,
    source: CredentialSource,
    name: &'static str,
}

impl ApiCredential {
    /// Create a new credential from a string value.
    pub fn new(value: impl Into<String>, source: CredentialSource, name: &'static str) -> Self {
        Self {
            value: SecretString::from(value.into()),
            source,
            name,
        }
    }

    /// Load credential from an environment variable.
    ///
    /// An unset or empty variable is reported as [`ConfigError::MissingSecret`].
    pub fn from_env(env_var: &str, name: &'static str) -> Result<Self, ConfigError> {
        match std::env::var(env_var) {
            Ok(value) if !value.trim().is_empty() => {
                Ok(Self::new(value, CredentialSource::Environment, name))
            }
            _ => Err(ConfigError::MissingSecret {
                name,
                env_var: env_var.to_string(),
            }),
        }
    }

    /// Expose the credential value for use in API calls.
    ///
    /// Only call this where the value is put on the wire. Never store it.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    /// Check if the credential is empty.
    pub fn is_empty(&self) -> bool {
        self.value.expose_secret().is_empty()
    }

    /// Get the source of this credential.
    pub fn source(&self) -> CredentialSource {
        self.source
    }

    /// Get the human-readable name of this credential.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCredential")
            .field("value", &"[REDACTED]")
            .field("source", &self.source)
            .field("name", &self.name)
            .finish()
    }
}

impl fmt::Display for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {} [REDACTED]", self.name, self.source)
    }
}

/// The two keys a run needs.
#[derive(Debug)]
pub struct Credentials {
    answerer: ApiCredential,
    judge: ApiCredential,
}

impl Credentials {
    /// Bundle already-loaded credentials.
    pub fn new(answerer: ApiCredential, judge: ApiCredential) -> Self {
        Self { answerer, judge }
    }

    /// Read both keys from the environment variables named in `config`.
    ///
    /// Both variables are checked before returning so the error names every
    /// missing secret, not just the first.
    pub fn load(config: &RuntimeConfig) -> Result<Self, ConfigError> {
        let answerer = ApiCredential::from_env(&config.answerer.api_key_env, "Answering API key");
        let judge = ApiCredential::from_env(&config.judge.api_key_env, "Judge API key");

        match (answerer, judge) {
            (Ok(answerer), Ok(judge)) => Ok(Self { answerer, judge }),
            (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
            (Err(_), Err(_)) => Err(ConfigError::MissingSecrets(vec![
                config.answerer.api_key_env.clone(),
                config.judge.api_key_env.clone(),
            ])),
        }
    }

    /// Key for the answering API.
    pub fn answerer(&self) -> &ApiCredential {
        &self.answerer
    }

    /// Key for the judge API.
    pub fn judge(&self) -> &ApiCredential {
        &self.judge
    }

    /// Split into `(answerer, judge)` so each provider owns its key.
    pub fn into_parts(self) -> (ApiCredential, ApiCredential) {
        (self.answerer, self.judge)
    }
}
