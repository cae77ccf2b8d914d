//! Blocking Client
//!
//! Synchronous wrapper over [`crate::FinstatClient`] for callers without an
//! async runtime. Each call runs to completion on a private current-thread
//! Tokio runtime, so it must not be used from inside another runtime.

use crate::config::{ClientConfig, ConfigLoader};
use crate::error::{FinstatError, Result};
use crate::{ApiResponse, AutoCompleteResult, DailyDiffList, DetailResult, RateLimits};
use std::path::Path;
use tokio::runtime::{Builder, Runtime};

/// Blocking Finstat client
pub struct FinstatClient {
    inner: crate::FinstatClient,
    runtime: Runtime,
}

impl FinstatClient {
    /// Create a client from an explicit config
    pub fn new(config: ClientConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| FinstatError::Config(format!("Failed to create runtime: {}", e)))?;

        Ok(Self {
            inner: crate::FinstatClient::new(config)?,
            runtime,
        })
    }

    /// Create a client from `.env`, the default config files and `FINSTAT_*` variables
    pub fn from_env() -> Result<Self> {
        Self::new(ConfigLoader::new()?.into_client_config()?)
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    /// Look up a company by its ICO
    pub fn detail(&self, ico: &str) -> Result<ApiResponse<DetailResult>> {
        self.runtime.block_on(self.inner.detail(ico))
    }

    /// Search companies by partial name or ICO
    pub fn autocomplete(&self, query: &str) -> Result<ApiResponse<AutoCompleteResult>> {
        self.runtime.block_on(self.inner.autocomplete(query))
    }

    /// List the daily diff files available for download
    pub fn daily_diffs(&self) -> Result<ApiResponse<DailyDiffList>> {
        self.runtime.block_on(self.inner.daily_diffs())
    }

    /// Download a daily diff file to `destination`, returning the bytes written
    pub fn download_daily_diff(
        &self,
        file_name: &str,
        destination: impl AsRef<Path>,
    ) -> Result<ApiResponse<u64>> {
        self.runtime
            .block_on(self.inner.download_daily_diff(file_name, destination))
    }

    /// Quota state reported by the most recently completed request
    pub fn rate_limits(&self) -> Result<RateLimits> {
        self.inner.rate_limits()
    }
}
