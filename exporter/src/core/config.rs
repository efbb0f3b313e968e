use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::utils::file::expand_path;

use super::cli::CliConfig;
use super::constants::{
    APP_DOT_FOLDER, CONFIG_FILE_NAME, MONGO_DEFAULT_SERVER_SELECTION_TIMEOUT_SECS, MONGODB_SECTION,
};

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors
///
/// Every variant is fatal for the exporter: it must not run with partial settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No configuration found (looked for {searched})")]
    NotFound { searched: String },

    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No MongoDB configuration found (missing '{0}' section)")]
    MissingSection(&'static str),

    #[error("Error in the MongoDB configuration: missing key '{0}'")]
    MissingKey(&'static str),

    #[error("Error in the MongoDB configuration: invalid port '{0}' (expected 1-65535)")]
    InvalidPort(String),

    #[error("Error in the MongoDB configuration: {0}")]
    Invalid(String),
}

// =============================================================================
// File Config Structs (JSON deserialization)
// =============================================================================

/// Port as written in the config file: `27017` or `"27017"`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(i64),
    Text(String),
}

impl PortValue {
    /// Convert to a TCP port, rejecting anything outside 1-65535
    pub fn to_port(&self) -> Result<u16, ConfigError> {
        let raw = match self {
            PortValue::Number(n) => *n,
            PortValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ConfigError::InvalidPort(s.clone()))?,
        };
        u16::try_from(raw)
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| ConfigError::InvalidPort(raw.to_string()))
    }
}

impl From<u16> for PortValue {
    fn from(port: u16) -> Self {
        PortValue::Number(i64::from(port))
    }
}

/// MongoDB configuration section (from JSON config file)
#[derive(Debug, Default, Clone, Deserialize)]
pub struct MongoFileConfig {
    pub host: Option<String>,
    pub port: Option<PortValue>,
    pub db: Option<String>,
    /// May be empty, but must be present
    pub username: Option<String>,
    /// May be empty, but must be present
    pub password: Option<String>,
    pub collection: Option<String>,
    /// Timeout for the startup connectivity check (default: 10)
    pub server_selection_timeout_secs: Option<u64>,
    /// Application name reported to the server
    pub app_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

/// File-based configuration (JSON)
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub mongodb: Option<MongoFileConfig>,
    #[serde(flatten)]
    pub extra: serde_json::Value,
}

impl FileConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::debug!(path = %path.display(), "Loading config file");
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::trace!(has_mongodb = config.mongodb.is_some(), "Parsed config file");
        Ok(config)
    }

    /// Warn about unknown fields in the config
    fn warn_unknown_fields(&self) {
        warn_unknown(&self.extra, "Unknown fields in config file (possible typos)");
        if let Some(ref mongodb) = self.mongodb {
            warn_unknown(
                &mongodb.extra,
                "Unknown fields in mongodb section (possible typos)",
            );
        }
    }

    /// Merge another FileConfig into this one (other takes precedence)
    fn merge(&mut self, other: FileConfig) {
        if let Some(mongodb) = other.mongodb {
            let current = self.mongodb.get_or_insert_with(MongoFileConfig::default);
            if mongodb.host.is_some() {
                tracing::trace!(host = ?mongodb.host, "Merging mongodb.host");
                current.host = mongodb.host;
            }
            if mongodb.port.is_some() {
                tracing::trace!(port = ?mongodb.port, "Merging mongodb.port");
                current.port = mongodb.port;
            }
            if mongodb.db.is_some() {
                tracing::trace!(db = ?mongodb.db, "Merging mongodb.db");
                current.db = mongodb.db;
            }
            if mongodb.username.is_some() {
                tracing::trace!(username = "***", "Merging mongodb.username");
                current.username = mongodb.username;
            }
            if mongodb.password.is_some() {
                tracing::trace!(password = "***", "Merging mongodb.password");
                current.password = mongodb.password;
            }
            if mongodb.collection.is_some() {
                tracing::trace!(collection = ?mongodb.collection, "Merging mongodb.collection");
                current.collection = mongodb.collection;
            }
            if mongodb.server_selection_timeout_secs.is_some() {
                tracing::trace!(
                    server_selection_timeout_secs = ?mongodb.server_selection_timeout_secs,
                    "Merging mongodb.server_selection_timeout_secs"
                );
                current.server_selection_timeout_secs = mongodb.server_selection_timeout_secs;
            }
            if mongodb.app_name.is_some() {
                tracing::trace!(app_name = ?mongodb.app_name, "Merging mongodb.app_name");
                current.app_name = mongodb.app_name;
            }
        }
    }

    /// Load and merge the given files in order (later files take precedence)
    pub fn load_layered(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut file_config = FileConfig::default();
        for path in paths {
            let overlay = FileConfig::load_from_file(path)?;
            overlay.warn_unknown_fields();
            file_config.merge(overlay);
        }
        Ok(file_config)
    }
}

fn warn_unknown(extra: &serde_json::Value, message: &str) {
    if let serde_json::Value::Object(map) = extra
        && !map.is_empty()
    {
        let keys_str: String = map
            .keys()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        tracing::warn!(fields = %keys_str, "{}", message);
    }
}

// =============================================================================
// Runtime Config (final merged configuration)
// =============================================================================

/// MongoDB connection configuration (final/runtime)
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct MongoConfig {
    pub host: String,
    pub port: u16,
    pub db: String,
    pub collection: String,
    /// Empty when not set
    pub username: String,
    /// Empty when not set
    pub password: String,
    pub server_selection_timeout: Duration,
    pub app_name: Option<String>,
}

impl fmt::Debug for MongoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MongoConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db", &self.db)
            .field("collection", &self.collection)
            .field("username", &self.username)
            .field("password", &"***")
            .field("server_selection_timeout", &self.server_selection_timeout)
            .field("app_name", &self.app_name)
            .finish()
    }
}

impl MongoConfig {
    /// Load configuration from all sources
    ///
    /// Priority (lowest to highest):
    /// 1. Profile directory config (~/.mongo-exporter/mongo-exporter.json)
    /// 2. Local directory config OR CLI-specified config path
    /// 3. CLI arguments (which include env var fallbacks via clap)
    pub fn load(cli: &CliConfig) -> Result<Self, ConfigError> {
        tracing::debug!("Loading exporter configuration");

        let paths = config_paths(cli)?;
        tracing::debug!(
            configs = ?paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            "Config files found"
        );

        if paths.is_empty() && !cli.has_mongo_overrides() {
            return Err(ConfigError::NotFound {
                searched: searched_locations(),
            });
        }

        let file_config = FileConfig::load_layered(&paths)?;
        let config = Self::from_sources(file_config, cli)?;

        tracing::debug!(
            host = %config.host,
            port = config.port,
            db = %config.db,
            collection = %config.collection,
            credentials_set = !config.username.is_empty() || !config.password.is_empty(),
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Build the runtime config from a merged file config and CLI overrides
    pub fn from_sources(file_config: FileConfig, cli: &CliConfig) -> Result<Self, ConfigError> {
        let file_mongo = match file_config.mongodb {
            Some(section) => section,
            None if cli.has_mongo_overrides() => MongoFileConfig::default(),
            None => return Err(ConfigError::MissingSection(MONGODB_SECTION)),
        };

        let host = cli
            .mongo_host
            .clone()
            .or(file_mongo.host)
            .ok_or(ConfigError::MissingKey("host"))?;
        let port = cli
            .mongo_port
            .map(PortValue::from)
            .or(file_mongo.port)
            .ok_or(ConfigError::MissingKey("port"))?
            .to_port()?;
        let db = cli
            .mongo_db
            .clone()
            .or(file_mongo.db)
            .ok_or(ConfigError::MissingKey("db"))?;
        let username = cli
            .mongo_username
            .clone()
            .or(file_mongo.username)
            .ok_or(ConfigError::MissingKey("username"))?;
        let password = cli
            .mongo_password
            .clone()
            .or(file_mongo.password)
            .ok_or(ConfigError::MissingKey("password"))?;
        let collection = cli
            .mongo_collection
            .clone()
            .or(file_mongo.collection)
            .ok_or(ConfigError::MissingKey("collection"))?;

        let server_selection_timeout = Duration::from_secs(
            file_mongo
                .server_selection_timeout_secs
                .unwrap_or(MONGO_DEFAULT_SERVER_SELECTION_TIMEOUT_SECS),
        );

        let config = Self {
            host,
            port,
            db,
            collection,
            username,
            password,
            server_selection_timeout,
            app_name: file_mongo.app_name.filter(|n| !n.is_empty()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency and correctness
    fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::Invalid("host must not be empty".to_string()));
        }
        if self.db.trim().is_empty() {
            return Err(ConfigError::Invalid("db must not be empty".to_string()));
        }
        if self.collection.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "collection must not be empty".to_string(),
            ));
        }
        if self.server_selection_timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "server_selection_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Resolve which config files to read, in merge order
fn config_paths(cli: &CliConfig) -> Result<Vec<PathBuf>, ConfigError> {
    let mut paths = Vec::new();

    if let Some(profile_path) = get_profile_config_path()
        && profile_path.exists()
    {
        paths.push(profile_path);
    }

    if let Some(ref path) = cli.config {
        let expanded = expand_path(&path.to_string_lossy());
        if !expanded.exists() {
            return Err(ConfigError::FileNotFound(expanded));
        }
        paths.push(expanded);
    } else {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            paths.push(local);
        }
    }

    Ok(paths)
}

fn searched_locations() -> String {
    let mut locations = Vec::new();
    if let Some(profile_path) = get_profile_config_path() {
        locations.push(profile_path.display().to_string());
    }
    locations.push(format!("./{}", CONFIG_FILE_NAME));
    locations.join(", ")
}

/// Get the profile config path (~/.mongo-exporter/mongo-exporter.json)
fn get_profile_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(APP_DOT_FOLDER).join(CONFIG_FILE_NAME))
}
