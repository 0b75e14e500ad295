//! Configuration management
//!
//! This module handles loading the s3-browser configuration file.
//! The configuration file is stored in TOML format at
//! ~/.config/s3-browser/config.toml. Command-line flags and environment
//! variables override individual values after loading.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::folder::DEFAULT_DELETE_CONCURRENCY;
use crate::store::StoreConfig;

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Default lifetime of generated download links
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 3600;

/// Longest download link lifetime S3 accepts (7 days)
pub const MAX_PRESIGN_EXPIRY_SECS: u64 = 7 * 24 * 60 * 60;

/// Default request body limit for uploads (5 GiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerSettings,

    /// Browsed bucket
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address to bind
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the browser UI
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Lifetime of download links in seconds
    #[serde(default = "default_presign_expiry")]
    pub presign_expiry_secs: u64,

    /// Deletes kept in flight during folder deletion
    #[serde(default = "default_delete_concurrency")]
    pub delete_concurrency: usize,

    /// Largest accepted upload request body in bytes
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_presign_expiry() -> u64 {
    DEFAULT_PRESIGN_EXPIRY_SECS
}

fn default_delete_concurrency() -> usize {
    DEFAULT_DELETE_CONCURRENCY
}

fn default_max_upload_bytes() -> u64 {
    DEFAULT_MAX_UPLOAD_BYTES
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            static_dir: default_static_dir(),
            presign_expiry_secs: default_presign_expiry(),
            delete_concurrency: default_delete_concurrency(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerSettings {
    /// `host:port` to bind
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    pub fn presign_expiry(&self) -> Duration {
        Duration::from_secs(self.presign_expiry_secs)
    }

    /// Upload limit in bytes, saturated to what this platform can address
    pub fn upload_limit(&self) -> usize {
        usize::try_from(self.max_upload_bytes).unwrap_or(usize::MAX)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            server: ServerSettings::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    /// Check that the merged configuration can start a server
    pub fn validate(&self) -> Result<()> {
        self.store.validate()?;

        if self.server.presign_expiry_secs == 0 {
            return Err(Error::Config(
                "Presign expiry must be at least one second".into(),
            ));
        }
        if self.server.presign_expiry_secs > MAX_PRESIGN_EXPIRY_SECS {
            return Err(Error::Config(format!(
                "Presign expiry must be at most {MAX_PRESIGN_EXPIRY_SECS} seconds (7 days)"
            )));
        }
        if self.server.delete_concurrency == 0 {
            return Err(Error::Config(
                "Delete concurrency must be at least 1".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration manager handles locating and loading config
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("s3-browser").join("config.toml");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade s3-browser.",
                config.schema_version, SCHEMA_VERSION
            )));
        }
        config.schema_version = SCHEMA_VERSION;

        Ok(config)
    }
}
