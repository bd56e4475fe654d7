//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::stats::{DEFAULT_RECENT_LIMIT, DEFAULT_WINDOW_DAYS, KST_OFFSET_MINUTES};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub stats: StatsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which record store implementation to run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON array file on disk
    #[default]
    File,
    /// Process memory only (lost on restart)
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Record store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default = "default_records_file")]
    pub records_file: String,

    #[serde(default)]
    pub backend: StorageBackend,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("replog").to_string_lossy().to_string())
        .unwrap_or_else(|| "./replog_data".to_string())
}

fn default_records_file() -> String {
    "records.json".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            records_file: default_records_file(),
            backend: StorageBackend::default(),
        }
    }
}

impl StorageConfig {
    /// Full path of the records file, with a leading `~/` expanded
    pub fn records_path(&self) -> PathBuf {
        let data_dir = match (self.data_dir.strip_prefix("~/"), dirs::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(&self.data_dir),
        };
        data_dir.join(&self.records_file)
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_max_body_size")]
    pub max_body_size: usize,

    #[serde(default = "default_enable_export")]
    pub enable_export: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_max_body_size() -> usize {
    1024 * 1024 // 1 MB
}

fn default_enable_export() -> bool {
    true
}

impl ApiConfig {
    /// Socket address to bind
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            max_body_size: default_max_body_size(),
            enable_export: default_enable_export(),
        }
    }
}

/// Statistics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StatsConfig {
    /// Service timezone as minutes east of UTC
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,

    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    #[serde(default = "default_window_days")]
    pub default_window_days: i64,
}

fn default_utc_offset_minutes() -> i32 {
    KST_OFFSET_MINUTES
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

fn default_window_days() -> i64 {
    DEFAULT_WINDOW_DAYS
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
            recent_limit: default_recent_limit(),
            default_window_days: default_window_days(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub fn filter_directive(&self) -> String {
        format!("replog={},tower_http=debug", self.level)
    }

    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load from `REPLOG_CONFIG`, default locations, or environment.
    ///
    /// Runs before logging is installed, so the caller reports the source.
    pub fn load_default() -> Result<(Self, ConfigSource), ConfigError> {
        let explicit = std::env::var_os("REPLOG_CONFIG").map(PathBuf::from);
        Self::load_from(explicit.as_deref())
    }

    /// Load from an explicit path, else the first existing default location,
    /// else the environment alone.
    ///
    /// A file that exists but fails to load is an error, never a silent fallback.
    pub fn load_from(explicit: Option<&Path>) -> Result<(Self, ConfigSource), ConfigError> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::search_paths().into_iter().find(|p| p.exists()),
        };

        match path {
            Some(path) => {
                let config = Self::load_with_env(&path)?;
                Ok((config, ConfigSource::File(path)))
            }
            None => Ok((Self::from_env()?, ConfigSource::Environment)),
        }
    }

    /// Default config locations, most specific first
    pub fn search_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("replog").join("config.toml")),
            Some(PathBuf::from("/etc/replog/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        // Storage overrides
        if let Ok(data_dir) = std::env::var("REPLOG_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }
        if let Ok(backend) = std::env::var("REPLOG_STORAGE_BACKEND") {
            self.storage.backend = parse_env("REPLOG_STORAGE_BACKEND", backend)?;
        }

        // API overrides
        if let Ok(host) = std::env::var("REPLOG_API_HOST") {
            self.api.host = host;
        }
        if let Ok(port) = std::env::var("REPLOG_API_PORT") {
            self.api.port = parse_env("REPLOG_API_PORT", port)?;
        }

        // Stats overrides
        if let Ok(offset) = std::env::var("REPLOG_UTC_OFFSET_MINUTES") {
            self.stats.utc_offset_minutes = parse_env("REPLOG_UTC_OFFSET_MINUTES", offset)?;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("REPLOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("REPLOG_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

fn parse_env<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Env { var, value })
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    File(PathBuf),
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Environment => write!(f, "defaults with environment overrides"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid value for {var}: {value:?}")]
    Env { var: &'static str, value: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Replog Configuration
#
# Environment variables override these settings:
# - REPLOG_DATA_DIR
# - REPLOG_STORAGE_BACKEND
# - REPLOG_API_HOST
# - REPLOG_API_PORT
# - REPLOG_UTC_OFFSET_MINUTES
# - REPLOG_LOG_LEVEL
# - REPLOG_LOG_FORMAT

[storage]
# Directory holding the records file
data_dir = "~/.local/share/replog"

# Records file name inside data_dir
records_file = "records.json"

# Backend: file or memory
backend = "file"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 5000

# Allowed CORS origins (empty = permissive)
cors_origins = []

# Maximum request body size (bytes)
max_body_size = 1048576

# Enable the CSV export endpoint
enable_export = true

[stats]
# Service timezone, minutes east of UTC (540 = KST)
utc_offset_minutes = 540

# Records in the recent-activity feed
recent_limit = 20

# Trailing window (days) when no date range is requested
default_window_days = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.stats.utc_offset_minutes, 540);
        assert_eq!(config.stats.recent_limit, 20);
        assert_eq!(config.stats.default_window_days, 30);
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.records_file, "records.json");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.port, 5000);
        assert_eq!(config.stats.utc_offset_minutes, 540);
        assert!(config.api.enable_export);
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::parse(
            r#"
            [storage]
            backend = "memory"

            [stats]
            recent_limit = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.stats.recent_limit, 5);
        assert_eq!(config.stats.utc_offset_minutes, 540);
        assert_eq!(config.api.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_config() {
        let err = Config::parse("[api]\nport = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[logging]\nformat = \"json\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert!(config.logging.is_json());

        let missing = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }

    #[test]
    fn test_explicit_config_must_load() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("absent.toml");
        let err = Config::load_from(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::Io { ref path, .. } if *path == missing));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "[api]\nport = \"many\"\n").unwrap();
        let err = Config::load_from(Some(&broken)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { ref path, .. } if *path == broken));

        let good = dir.path().join("config.toml");
        std::fs::write(&good, "[api]\nport = 6001\n").unwrap();
        let (config, source) = Config::load_from(Some(&good)).unwrap();
        assert_eq!(config.api.port, 6001);
        assert_eq!(source, ConfigSource::File(good));
    }

    #[test]
    fn test_bad_env_value_is_an_error() {
        let err = parse_env::<u16>("REPLOG_API_PORT", "many".to_string()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value for REPLOG_API_PORT: \"many\""
        );
        assert_eq!(
            parse_env::<StorageBackend>("REPLOG_STORAGE_BACKEND", "Memory".to_string()).unwrap(),
            StorageBackend::Memory
        );
    }

    #[test]
    fn test_records_path() {
        let storage = StorageConfig {
            data_dir: "/tmp/replog".to_string(),
            ..Default::default()
        };
        assert_eq!(storage.records_path(), PathBuf::from("/tmp/replog/records.json"));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("FILE".parse::<StorageBackend>(), Ok(StorageBackend::File));
        assert_eq!("memory".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert!("sqlite".parse::<StorageBackend>().is_err());
    }
}
