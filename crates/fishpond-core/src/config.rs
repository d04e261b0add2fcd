//! Configuration for the prediction service
//!
//! Values are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. a TOML file: `$FISHPOND_CONFIG`, else `./fishpond.toml`, else
//!    `<config dir>/fishpond/config.toml`
//! 3. environment overrides (`FISHPOND_ADDR`, `FISHPOND_MODEL_PATH`, `FISHPOND_LOG`)
//!
//! ```toml
//! bind_addr = "0.0.0.0:5001"
//! model_path = "/srv/fishpond/water_quality_model.json"
//! log_filter = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Names an explicit config file; a missing file is then an error
pub const CONFIG_ENV: &str = "FISHPOND_CONFIG";
pub const ADDR_ENV: &str = "FISHPOND_ADDR";
pub const MODEL_PATH_ENV: &str = "FISHPOND_MODEL_PATH";
pub const LOG_ENV: &str = "FISHPOND_LOG";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: String,
    /// Path to the classifier artifact
    pub model_path: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:5001".to_string(),
            model_path: PathBuf::from("models").join("water_quality_model.json"),
            log_filter: "info,tower_http=debug".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load from the standard locations and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok(), &default_config_paths())
    }

    /// Load using `env` for variable lookup and `fallbacks` as candidate files
    /// when no explicit config file is named
    pub fn load_with(
        env: impl Fn(&str) -> Option<String>,
        fallbacks: &[PathBuf],
    ) -> Result<Self, ConfigError> {
        let mut config = match env(CONFIG_ENV) {
            Some(path) => Self::from_file(path)?,
            None => match fallbacks.iter().find(|p| p.is_file()) {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };

        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml(&content)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = env(ADDR_ENV) {
            self.bind_addr = addr;
        }
        if let Some(path) = env(MODEL_PATH_ENV) {
            self.model_path = PathBuf::from(path);
        }
        if let Some(filter) = env(LOG_ENV) {
            self.log_filter = filter;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("model_path must not be empty".to_string()));
        }

        let port_ok = self
            .bind_addr
            .rsplit_once(':')
            .map(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok())
            .unwrap_or(false);
        if !port_ok {
            return Err(ConfigError::Invalid(format!(
                "bind_addr must be host:port, got {:?}",
                self.bind_addr
            )));
        }

        Ok(())
    }
}

/// Candidate config files, in priority order
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("fishpond.toml")];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("fishpond").join("config.toml"));
    }
    paths
}

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {message}")]
    Io { path: String, message: String },

    /// Config file is not valid TOML for this schema
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A value is out of its valid range
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr, "127.0.0.1:5001");
    }

    #[test]
    fn test_default_model_path_is_bundled_artifact() {
        let bundled = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(ServerConfig::default().model_path);
        assert!(bundled.is_file(), "{:?}", bundled);
    }

    #[test]
    fn test_no_sources_gives_defaults() {
        let config = ServerConfig::load_with(env_from(&[]), &[]).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml(r#"model_path = "/srv/model.json""#).unwrap();
        assert_eq!(config.model_path, PathBuf::from("/srv/model.json"));
        assert_eq!(config.bind_addr, "127.0.0.1:5001");
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ServerConfig::default();
        let parsed = ServerConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_fallback_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fishpond.toml");
        std::fs::write(&path, "bind_addr = \"0.0.0.0:8080\"\n").unwrap();

        let missing = dir.path().join("absent.toml");
        let config = ServerConfig::load_with(env_from(&[]), &[missing, path]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "bind_addr = \"0.0.0.0:8080\"\nlog_filter = \"warn\"\n",
        )
        .unwrap();

        let env = env_from(&[
            (CONFIG_ENV, path.to_str().unwrap()),
            (ADDR_ENV, "127.0.0.1:9000"),
            (MODEL_PATH_ENV, "/models/pond.json"),
        ]);
        let config = ServerConfig::load_with(env, &[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.model_path, PathBuf::from("/models/pond.json"));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let env = env_from(&[(CONFIG_ENV, "/nonexistent/fishpond.toml")]);
        assert!(matches!(
            ServerConfig::load_with(env, &[]),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(matches!(
            ServerConfig::from_toml("bind_addr = 5001"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_values() {
        let mut config = ServerConfig::default();
        config.bind_addr = "no-port".to_string();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.bind_addr = "127.0.0.1:99999".to_string();
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.model_path = PathBuf::new();
        assert!(config.validate().is_err());
    }
}
