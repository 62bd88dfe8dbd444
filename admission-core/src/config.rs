use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{AdmissionError, Result};

/// Default pool cap; kept low, one admission service per database.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Default seconds to wait for a pooled connection before giving up.
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Centralized configuration for the admission persistence layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionConfig {
    pub database: DatabaseConfig,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

impl DatabaseConfig {
    pub fn max_connections(&self) -> u32 {
        self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }

    pub fn acquire_timeout_secs(&self) -> u64 {
        self.acquire_timeout_secs
            .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS)
    }
}

impl AdmissionConfig {
    /// Load config from ~/.admission/config.toml
    ///
    /// `DATABASE_URL` (from the environment or a `.env` file) overrides
    /// the file's database url.
    pub fn load() -> Result<Self> {
        // A missing .env is fine; only real parse errors matter
        let _ = dotenvy::dotenv();

        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path (used by tests and deployments
    /// that don't keep config in the home directory).
    pub fn load_from(path: &Path) -> Result<Self> {
        tracing::debug!(?path, "loading admission config");

        if !path.exists() {
            return Err(AdmissionError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;

        let mut config: Self = toml::from_str(&content).map_err(|err| {
            AdmissionError::config(format!("invalid TOML in {:?}: {}", path, err))
        })?;

        config.apply_env_overrides();
        Ok(config)
    }

    /// Get config file path: ~/.admission/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".admission/config.toml")
    }

    /// Environment wins over file contents for the database url.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("DATABASE_URL") {
            if !url.is_empty() {
                self.database.url = url;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_minimal_config() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[database]\nurl = \"postgres://localhost/admission\"\nmax_connections = 3"
        )
        .expect("write config");

        let config = AdmissionConfig::load_from(file.path()).expect("load config");
        assert_eq!(config.database.max_connections(), 3);
        assert_eq!(
            config.database.acquire_timeout_secs(),
            DEFAULT_ACQUIRE_TIMEOUT_SECS
        );
        // DATABASE_URL in the test environment may override the file value
        assert!(!config.database.url.is_empty());
    }

    #[test]
    fn rejects_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[database\nurl =").expect("write config");

        let err = AdmissionConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, AdmissionError::Config { .. }));
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn missing_file_yields_config_not_found() {
        let err =
            AdmissionConfig::load_from(Path::new("/nonexistent/admission.toml")).unwrap_err();
        assert!(matches!(err, AdmissionError::ConfigNotFound { .. }));
    }
}
