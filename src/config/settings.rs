//! Client Configuration
//!
//! Defines the client settings and the on-disk configuration schema.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Base URL of the Slovak Finstat API
pub const SK_API_URL: &str = "https://www.finstat.sk/api";

/// Base URL of the Czech Finstat API
pub const CZ_API_URL: &str = "https://cz.finstat.sk/api";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Immutable settings for a [`crate::FinstatClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL for the API
    pub base_url: String,

    /// Public API key, sent with every request
    pub api_key: String,

    /// Private key, only used to compute the verification hash
    pub private_key: String,

    /// Free-text identifier of the calling station
    pub station_id: String,

    /// Free-text name or description of the calling station
    pub station_name: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with empty station identifiers and the default timeout
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            private_key: private_key.into(),
            station_id: String::new(),
            station_name: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the station id and name used for usage attribution
    pub fn with_station(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.station_id = id.into();
        self.station_name = name.into();
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// Keys stay out of Debug output so configs can be logged safely.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("private_key", &"<redacted>")
            .field("station_id", &self.station_id)
            .field("station_name", &self.station_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Configuration file structure; every field may be overridden from the environment
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    /// Base URL for the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Public API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Private key used for signing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,

    /// Station identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_id: Option<String>,

    /// Station name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub station_name: Option<String>,

    /// Timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Overlay another config on top of this one (set fields win)
    pub fn merge(&mut self, other: FileConfig) {
        if other.base_url.is_some() {
            self.base_url = other.base_url;
        }
        if other.api_key.is_some() {
            self.api_key = other.api_key;
        }
        if other.private_key.is_some() {
            self.private_key = other.private_key;
        }
        if other.station_id.is_some() {
            self.station_id = other.station_id;
        }
        if other.station_name.is_some() {
            self.station_name = other.station_name;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
    }

    /// Resolve into a client config, requiring both keys
    pub fn into_client_config(self) -> Option<ClientConfig> {
        let api_key = self.api_key.filter(|k| !k.is_empty())?;
        let private_key = self.private_key.filter(|k| !k.is_empty())?;

        Some(ClientConfig {
            base_url: self.base_url.unwrap_or_else(|| SK_API_URL.to_string()),
            api_key,
            private_key,
            station_id: self.station_id.unwrap_or_default(),
            station_name: self.station_name.unwrap_or_default(),
            timeout: Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}
