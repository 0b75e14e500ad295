//! Command-line arguments
//!
//! Every setting can come from the configuration file, a flag, or an
//! environment variable. Flags and environment variables win over the file.

use std::path::PathBuf;

use clap::Parser;
use sb_core::{Config, ConfigManager, Error, Result};

/// s3-browser - Browse an S3 bucket from a web browser
///
/// Serves a file manager UI and a JSON API for listing, uploading,
/// downloading and deleting objects in one S3-compatible bucket.
#[derive(Parser, Debug, Default)]
#[command(name = "s3-browser")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "S3_BROWSER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "BIND_ADDRESS")]
    pub bind: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Directory holding the browser UI
    #[arg(long, env = "STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// S3 endpoint URL
    #[arg(long, env = "S3_ENDPOINT")]
    pub endpoint: Option<String>,

    /// S3 region
    #[arg(long, env = "S3_REGION")]
    pub region: Option<String>,

    /// Access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key: Option<String>,

    /// Secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_key: Option<String>,

    /// Bucket to browse
    #[arg(long, env = "S3_BUCKET_NAME")]
    pub bucket: Option<String>,

    /// Bucket lookup style: auto, path, or dns
    #[arg(long, env = "S3_BUCKET_LOOKUP")]
    pub bucket_lookup: Option<String>,

    /// Lifetime of download links in seconds
    #[arg(long, env = "PRESIGN_EXPIRY_SECS")]
    pub presign_expiry: Option<u64>,

    /// Deletes kept in flight while deleting a folder
    #[arg(long, env = "DELETE_CONCURRENCY")]
    pub delete_concurrency: Option<usize>,

    /// Largest accepted upload in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: Option<u64>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,
}

impl Cli {
    /// Load the configuration file and apply overrides
    pub fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                ConfigManager::with_path(path.clone()).load()?
            }
            None => match ConfigManager::new() {
                Ok(manager) => manager.load()?,
                Err(_) => Config::default(),
            },
        };

        Ok(self.apply(config))
    }

    /// Overlay the values given on the command line or environment
    pub fn apply(&self, mut config: Config) -> Config {
        let server = &mut config.server;
        if let Some(bind) = &self.bind {
            server.bind_address = bind.clone();
        }
        if let Some(port) = self.port {
            server.port = port;
        }
        if let Some(dir) = &self.static_dir {
            server.static_dir = dir.clone();
        }
        if let Some(secs) = self.presign_expiry {
            server.presign_expiry_secs = secs;
        }
        if let Some(n) = self.delete_concurrency {
            server.delete_concurrency = n;
        }
        if let Some(n) = self.max_upload_bytes {
            server.max_upload_bytes = n;
        }

        let store = &mut config.store;
        if let Some(endpoint) = &self.endpoint {
            store.endpoint = endpoint.clone();
        }
        if let Some(region) = &self.region {
            store.region = region.clone();
        }
        if let Some(key) = &self.access_key {
            store.access_key = key.clone();
        }
        if let Some(secret) = &self.secret_key {
            store.secret_key = secret.clone();
        }
        if let Some(bucket) = &self.bucket {
            store.bucket = bucket.clone();
        }
        if let Some(lookup) = &self.bucket_lookup {
            store.bucket_lookup = lookup.clone();
        }

        config
    }
}
