//! Configuration management with serde serialization/deserialization
//!
//! Service settings load from an optional JSON file with CLI flags taking
//! precedence. Provider credentials are environment-only so they never end
//! up in config files or logs.

use crate::error::CaptureError;
use serde::{Deserialize, Serialize};
use url::Url;

pub const ACCESS_KEY_ENV: &str = "SCREENSHOT_API_ACCESS_KEY";
pub const SECRET_KEY_ENV: &str = "SCREENSHOT_API_SECRET_KEY";

/// Main configuration structure for the signing service.
///
/// # Examples
///
/// ```rust
/// use screenshot_signer::Config;
///
/// // Use default configuration
/// let config = Config::default();
///
/// // Create custom configuration
/// let config = Config {
///     port: 3000,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Address the HTTP server binds to (default: 0.0.0.0)
    pub bind_address: String,

    /// Port the HTTP server listens on (default: 8080)
    pub port: u16,

    /// Base URL of the provider's take endpoint. Signed URLs are formed by
    /// appending the query string and signature to this.
    pub api_base_url: String,

    /// The well-known demo URL. Captures of it share the fixed cache key
    /// and the long TTL so the example screenshot stays cheap to re-serve.
    pub example_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            api_base_url: "https://api.screenshotone.com/take".to_string(),
            example_url: "https://example.com".to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), CaptureError> {
        if self.port == 0 {
            return Err(CaptureError::ConfigurationError(
                "Port must be greater than 0".to_string(),
            ));
        }

        Url::parse(&self.api_base_url).map_err(|e| {
            CaptureError::ConfigurationError(format!("Invalid api_base_url: {e}"))
        })?;

        Url::parse(&self.example_url).map_err(|e| {
            CaptureError::ConfigurationError(format!("Invalid example_url: {e}"))
        })?;

        Ok(())
    }
}

/// The two required provider secrets.
#[derive(Clone)]
pub struct Credentials {
    pub access_key: String,
    pub secret_key: String,
}

impl Credentials {
    /// Read both credentials from the environment. Both are required; a
    /// missing or empty one is a startup error, matching the provider SDK
    /// contract that signing needs the full key pair.
    pub fn from_env() -> Result<Self, CaptureError> {
        Ok(Self {
            access_key: require_env(ACCESS_KEY_ENV)?,
            secret_key: require_env(SECRET_KEY_ENV)?,
        })
    }
}

fn require_env(name: &str) -> Result<String, CaptureError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CaptureError::MissingCredential(name.to_string())),
    }
}

// Keep the secret key out of debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
