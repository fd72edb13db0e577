//! Configuration module
//!
//! Settings are read from a TOML file (`~/.config/copshop/config.toml` by
//! default). Every section and key is optional; missing values fall back to
//! the defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::database::DatabaseConfig;
use crate::infrastructure::geocoding::NominatimSettings;

/// Environment variable that overrides `[database] url`
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Root of the TOML configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub logging: LoggingSection,
    pub geocoding: GeocodingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerSection {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let defaults = DatabaseConfig::default();
        Self {
            url: defaults.url,
            max_connections: defaults.max_connections,
        }
    }
}

impl From<&DatabaseSection> for DatabaseConfig {
    fn from(section: &DatabaseSection) -> Self {
        Self {
            url: section.url.clone(),
            max_connections: section.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or `copshop=debug`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingSection {
    pub enabled: bool,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub min_interval_ms: u64,
}

impl Default for GeocodingSection {
    fn default() -> Self {
        let defaults = NominatimSettings::default();
        Self {
            enabled: true,
            base_url: defaults.base_url,
            user_agent: defaults.user_agent,
            timeout_secs: defaults.timeout.as_secs(),
            min_interval_ms: defaults.min_interval.as_millis() as u64,
        }
    }
}

impl From<&GeocodingSection> for NominatimSettings {
    fn from(section: &GeocodingSection) -> Self {
        Self {
            base_url: section.base_url.clone(),
            user_agent: section.user_agent.clone(),
            timeout: Duration::from_secs(section.timeout_secs),
            min_interval: Duration::from_millis(section.min_interval_ms),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults. `DATABASE_URL` wins over the file.
    /// An unreadable, malformed or invalid file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_database_url(path, std::env::var(DATABASE_URL_ENV).ok())
    }

    fn load_with_database_url(
        path: &Path,
        database_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            Self::default()
        };

        config.apply_database_url(database_url);
        config.validate()?;
        Ok(config)
    }

    /// Replace `[database] url` with a non-blank override.
    pub fn apply_database_url(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.database.url = url;
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".into()));
        }
        if !matches!(self.logging.format.to_lowercase().as_str(), "text" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                self.logging.format
            )));
        }
        if self.geocoding.enabled && self.geocoding.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "geocoding.user_agent is required when geocoding is enabled".into(),
            ));
        }
        Ok(())
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::from(&self.database)
    }

    pub fn nominatim_settings(&self) -> NominatimSettings {
        NominatimSettings::from(&self.geocoding)
    }
}

/// `~/.config/copshop/config.toml`, or `./config.toml` when no config
/// directory can be determined.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("copshop").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
        assert!(config.geocoding.enabled);
        assert_eq!(config.geocoding.user_agent, "CopShop-App/1.0");
        assert_eq!(config.geocoding.min_interval_ms, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [server]
            port = 9100

            [geocoding]
            enabled = false
            timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.server.address(), "0.0.0.0:9100");
        assert_eq!(config.server.shutdown_timeout, 30);
        assert!(!config.geocoding.enabled);

        let settings = config.nominatim_settings();
        assert_eq!(settings.timeout, Duration::from_secs(3));
        assert_eq!(settings.base_url, "https://nominatim.openstreetmap.org");
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let config = AppConfig::from_toml("[logging]\nformat = \"xml\"").unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_file_reports_path() {
        let path = std::env::temp_dir().join(format!("copshop-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("copshop-"));
    }

    fn temp_config(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("copshop-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn database_url_overrides_file() {
        let path = temp_config("[database]\nurl = \"sqlite://./file.db?mode=rwc\"");
        let config = AppConfig::load_with_database_url(
            &path,
            Some("sqlite://./prod.db?mode=rwc".to_string()),
        );
        std::fs::remove_file(&path).ok();

        assert_eq!(config.unwrap().database.url, "sqlite://./prod.db?mode=rwc");
    }

    #[test]
    fn blank_database_url_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_database_url(Some("  ".to_string()));
        assert_eq!(config.database.url, DatabaseConfig::default().url);
    }

    #[test]
    fn invalid_file_is_an_error_even_with_database_url() {
        let path = temp_config("[logging]\nformat = \"yaml\"");
        let result = AppConfig::load_with_database_url(
            &path,
            Some("sqlite://./prod.db?mode=rwc".to_string()),
        );
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("copshop-missing-{}.toml", uuid::Uuid::new_v4()));
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn default_path_ends_in_copshop_dir() {
        let path = default_config_path();
        assert!(path.ends_with("copshop/config.toml") || path.ends_with("config.toml"));
    }
}
