//! Configuration for the verification API client

use crate::error::{
    Error,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default request timeout; a verification call never hangs longer.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Hosted verification endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://sqwevzxsufrbsyjrucuw.supabase.co/functions/v1/verify-prescription-api";

/// Environment for the verification API client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    /// Local service stack
    Development,
    /// Hosted verification service
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Production
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(Error::Config(format!(
                "Invalid environment '{s}'. Valid values are: development, dev, production, prod"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => write!(f, "Development"),
            Environment::Production => write!(f, "Production"),
        }
    }
}

impl Environment {
    /// Get the verification endpoint for this environment
    pub fn endpoint(&self) -> &'static str {
        match self {
            Environment::Development => {
                "http://localhost:54321/functions/v1/verify-prescription-api"
            }
            Environment::Production => DEFAULT_ENDPOINT,
        }
    }

    /// Load environment from the `RX_VERIFY_ENV` environment variable.
    ///
    /// Valid values: "development", "dev", "production", "prod"
    /// (case-insensitive). Returns None when unset or invalid.
    pub fn from_env() -> Option<Self> {
        std::env::var("RX_VERIFY_ENV")
            .ok()
            .and_then(|val| val.parse().ok())
    }

    /// Same as `from_env()` but falls back to `default` when the variable
    /// is unset or invalid.
    pub fn from_env_or(default: Self) -> Self {
        Self::from_env().unwrap_or(default)
    }
}

/// Configuration for the verification API client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Verification endpoint the client POSTs to
    pub endpoint: String,
    /// API key sent in the credential header; its absence makes every
    /// `verify` call fail before any I/O
    pub api_key: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Config {
    /// Create a new configuration with the default timeout
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a new configuration from an Environment
    pub fn from_environment(env: Environment) -> Self {
        Self::new(env.endpoint())
    }

    /// Create a configuration from environment variables.
    ///
    /// `RX_VERIFY_ENV` selects the endpoint (defaulting to production);
    /// `RX_VERIFY_API_KEY` supplies the credential when set.
    pub fn from_env() -> Self {
        let env = Environment::from_env_or(Environment::default());
        let mut config = Self::from_environment(env);
        if let Ok(key) = std::env::var("RX_VERIFY_API_KEY") {
            config.api_key = Some(key);
        }
        config
    }

    /// Set the API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::Config("Endpoint cannot be empty".to_string()));
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(Error::Config(
                "Endpoint must start with http:// or https://".to_string(),
            ));
        }

        if let Some(key) = &self.api_key {
            if key.trim().is_empty() {
                return Err(Error::Config(
                    "API key cannot be empty or whitespace".to_string(),
                ));
            }
        }

        if self.timeout.is_zero() {
            return Err(Error::Config("Timeout must be non-zero".to_string()));
        }

        Ok(())
    }
}
