//! Application-level configuration loading: listening port and storage backend.

use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "TICTACTOE_BACK_CONFIG_PATH";
/// Environment variable that overrides the configured database URL.
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "sqlite://tictactoe.db?mode=rwc";

/// Which [`GameStore`](crate::dao::game_store::GameStore) implementation to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Relational store on SQLite.
    Sqlite,
    /// Process-local map, lost on restart.
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// TCP port the HTTP server binds on all interfaces.
    pub port: u16,
    /// Backend the storage supervisor connects to.
    pub storage: StorageBackend,
    /// Connection string used by the SQLite backend.
    pub database_url: String,
}

impl AppConfig {
    /// Load the configuration from disk, then apply environment overrides.
    pub fn load() -> Self {
        let mut config = Self::from_file(&resolve_config_path());
        config.apply_env_overrides(|key| env::var(key).ok());
        config
    }

    fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        storage = ?app_config.storage,
                        "loaded configuration file"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// `PORT` (or `SERVER_PORT`) and `DATABASE_URL` win over the file.
    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(port) = lookup("PORT")
            .or_else(|| lookup("SERVER_PORT"))
            .and_then(|value| value.parse::<u16>().ok())
        {
            self.port = port;
        }

        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.database_url = url;
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            storage: StorageBackend::Sqlite,
            database_url: DEFAULT_DATABASE_URL.to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    storage: Option<RawStorage>,
}

#[derive(Debug, Deserialize)]
struct RawStorage {
    backend: Option<StorageBackend>,
    database_url: Option<String>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = Self::default();
        let (storage, database_url) = match value.storage {
            Some(storage) => (
                storage.backend.unwrap_or(defaults.storage),
                storage.database_url.unwrap_or(defaults.database_url),
            ),
            None => (defaults.storage, defaults.database_url),
        };

        Self {
            port: value.port.unwrap_or(defaults.port),
            storage,
            database_url,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn parse(json: &str) -> AppConfig {
        serde_json::from_str::<RawConfig>(json).unwrap().into()
    }

    #[test]
    fn empty_file_keeps_defaults() {
        assert_eq!(parse("{}"), AppConfig::default());
    }

    #[test]
    fn file_selects_backend_and_port() {
        let config = parse(r#"{"port": 9000, "storage": {"backend": "memory"}}"#);
        assert_eq!(config.port, 9000);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        assert!(serde_json::from_str::<RawConfig>(r#"{"storage": {"backend": "mongo"}}"#).is_err());
    }

    #[test]
    fn environment_overrides_file_values() {
        let vars = HashMap::from([
            ("SERVER_PORT", "7000".to_owned()),
            ("DATABASE_URL", "sqlite::memory:".to_owned()),
        ]);
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| vars.get(key).cloned());
        assert_eq!(config.port, 7000);
        assert_eq!(config.database_url, "sqlite::memory:");

        let vars = HashMap::from([("PORT", "not-a-port".to_owned())]);
        config.apply_env_overrides(|key| vars.get(key).cloned());
        assert_eq!(config.port, 7000);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::from_file(Path::new("does/not/exist.json"));
        assert_eq!(config, AppConfig::default());
    }
}
