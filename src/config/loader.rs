//! Configuration Loader
//!
//! Loads client settings from a JSON file and the environment. Later sources
//! override earlier ones: config file, then `FINSTAT_*` environment variables.

use crate::config::settings::{ClientConfig, FileConfig};
use crate::error::{FinstatError, Result};
use std::path::{Path, PathBuf};

/// Configuration loader with support for multiple sources
pub struct ConfigLoader {
    config: FileConfig,
}

impl ConfigLoader {
    /// Load `.env`, the first config file found in the default locations, then env overrides
    pub fn new() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let mut loader = Self {
            config: FileConfig::default(),
        };

        if let Some(path) = Self::get_config_paths().into_iter().find(|p| p.exists()) {
            loader.load_from_file(&path)?;
        }

        loader.apply_env_overrides()?;
        Ok(loader)
    }

    /// Create a loader with a specific config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut loader = Self {
            config: FileConfig::default(),
        };

        loader.load_from_file(path)?;
        loader.apply_env_overrides()?;

        Ok(loader)
    }

    /// Get list of config paths to check
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Environment variable
        if let Ok(custom_path) = std::env::var("FINSTAT_CONFIG_PATH") {
            paths.push(PathBuf::from(custom_path));
        }

        // 2. Current directory
        paths.push(PathBuf::from("finstat.json"));

        // 3. User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("finstat").join("config.json"));
        }

        // 4. Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".finstat").join("config.json"));
        }

        paths
    }

    /// Load configuration from a specific file
    fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FinstatError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: FileConfig = serde_json::from_str(&content).map_err(|e| {
            FinstatError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "loaded finstat config file");
        self.config.merge(config);
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay values from a variable lookup (the environment in production)
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let timeout_secs = match lookup("FINSTAT_TIMEOUT") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                FinstatError::Config(format!("FINSTAT_TIMEOUT must be whole seconds, got '{}'", raw))
            })?),
            None => None,
        };

        self.config.merge(FileConfig {
            base_url: lookup("FINSTAT_API_URL"),
            api_key: lookup("FINSTAT_API_KEY"),
            private_key: lookup("FINSTAT_PRIVATE_KEY"),
            station_id: lookup("FINSTAT_STATION_ID"),
            station_name: lookup("FINSTAT_STATION_NAME"),
            timeout_secs,
        });
        Ok(())
    }

    /// Get the loaded configuration
    pub fn config(&self) -> &FileConfig {
        &self.config
    }

    /// Resolve the loaded values into a client config
    pub fn into_client_config(self) -> Result<ClientConfig> {
        self.config.into_client_config().ok_or_else(|| {
            FinstatError::Config(
                "No API credentials. Set FINSTAT_API_KEY and FINSTAT_PRIVATE_KEY or add api_key/private_key to finstat.json".to_string(),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::CZ_API_URL;
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn loader_from(json: &str) -> ConfigLoader {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", json).unwrap();

        let mut loader = ConfigLoader {
            config: FileConfig::default(),
        };
        loader.load_from_file(file.path()).unwrap();
        loader
    }

    #[test]
    fn test_load_from_custom_file() {
        let loader = loader_from(
            r#"{
                "base_url": "https://cz.finstat.sk/api",
                "api_key": "key",
                "private_key": "secret",
                "station_name": "Api test"
            }"#,
        );

        let config = loader.into_client_config().unwrap();
        assert_eq!(config.base_url, CZ_API_URL);
        assert_eq!(config.api_key, "key");
        assert_eq!(config.station_name, "Api test");
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut loader = loader_from(r#"{ "api_key": "file-key", "private_key": "file-secret" }"#);

        let env: HashMap<&str, &str> = [("FINSTAT_API_KEY", "env-key"), ("FINSTAT_TIMEOUT", "25")]
            .into_iter()
            .collect();
        loader
            .apply_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();

        let config = loader.into_client_config().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.private_key, "file-secret");
        assert_eq!(config.timeout, Duration::from_secs(25));
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        let mut loader = loader_from("{}");
        let result = loader.apply_overrides(|name| {
            (name == "FINSTAT_TIMEOUT").then(|| "ten".to_string())
        });
        assert!(matches!(result, Err(FinstatError::Config(_))));
    }

    #[test]
    fn test_missing_credentials() {
        let loader = loader_from(r#"{ "api_key": "key" }"#);
        assert!(matches!(
            loader.into_client_config(),
            Err(FinstatError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_json_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();

        let result = ConfigLoader::from_path(file.path());
        assert!(matches!(result, Err(FinstatError::Config(_))));
    }
}
