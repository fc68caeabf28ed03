//! Client configuration loaded from TOML.
//!
//! Example:
//! ```toml
//! base_url = "https://mes.example.com/api/v1"
//! connect_timeout_secs = 5
//! request_timeout_secs = 30
//! default_page_size = 50
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ecnflow_contracts::error::{EcnflowError, EcnflowResult};

/// Largest page size the client will ask for.
pub const MAX_PAGE_SIZE: u32 = 500;

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> u32 {
    20
}

fn default_user_agent() -> String {
    concat!("ecnflow/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Connection settings for the REST backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root, e.g. `https://mes.example.com/api/v1`. Endpoint paths are
    /// appended to it.
    pub base_url: String,

    /// Time allowed to establish a connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout. Absent means the HTTP client's default (none).
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Page size used by list commands when none is given.
    #[serde(default = "default_page_size")]
    pub default_page_size: u32,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    /// A config with every optional field at its default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
            default_page_size: default_page_size(),
            user_agent: default_user_agent(),
        }
    }

    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `EcnflowError::ConfigError` if the TOML is malformed, a field
    /// has the wrong type, or a value is out of range.
    pub fn from_toml_str(s: &str) -> EcnflowResult<Self> {
        let config: ClientConfig = toml::from_str(s).map_err(|e| EcnflowError::ConfigError {
            reason: format!("failed to parse client TOML: {}", e),
        })?;
        config.validate()?;
        debug!(base_url = %config.base_url, "client configuration loaded");
        Ok(config)
    }

    /// Read the file at `path` and parse it as client configuration.
    pub fn from_file(path: &Path) -> EcnflowResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| EcnflowError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Replace `base_url`, re-validating. Used for command-line overrides.
    pub fn override_base_url(mut self, base_url: impl Into<String>) -> EcnflowResult<Self> {
        self.base_url = base_url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> EcnflowResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(EcnflowError::ConfigError {
                reason: format!(
                    "base_url '{}' must start with http:// or https://",
                    self.base_url
                ),
            });
        }
        if self.default_page_size == 0 || self.default_page_size > MAX_PAGE_SIZE {
            return Err(EcnflowError::ConfigError {
                reason: format!(
                    "default_page_size must be between 1 and {}, got {}",
                    MAX_PAGE_SIZE, self.default_page_size
                ),
            });
        }
        Ok(())
    }

    /// `base_url` without trailing slashes.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
