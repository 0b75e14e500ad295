//! Object store connection settings
//!
//! Describes the single S3-compatible bucket the server browses, including
//! connection details and credentials.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Connection settings for the browsed bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// S3 endpoint URL
    #[serde(default)]
    pub endpoint: String,

    /// Access key ID
    #[serde(default)]
    pub access_key: String,

    /// Secret access key
    #[serde(default)]
    pub secret_key: String,

    /// Bucket to browse
    #[serde(default)]
    pub bucket: String,

    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,

    /// Bucket lookup style: "auto", "path", or "dns"
    #[serde(default = "default_bucket_lookup")]
    pub bucket_lookup: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket_lookup() -> String {
    "auto".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            bucket: String::new(),
            region: default_region(),
            bucket_lookup: default_bucket_lookup(),
        }
    }
}

impl StoreConfig {
    /// Create store settings with required fields
    pub fn new(
        endpoint: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_key: access_key.into(),
            secret_key: secret_key.into(),
            bucket: bucket.into(),
            ..Default::default()
        }
    }

    /// Whether requests use path-style addressing (`endpoint/bucket/key`)
    ///
    /// Most S3-compatible services need path style, so "auto" selects it.
    pub fn force_path_style(&self) -> bool {
        self.bucket_lookup == "path" || self.bucket_lookup == "auto"
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.is_empty() {
            return Err(Error::Config("S3 endpoint is not set".into()));
        }
        url::Url::parse(&self.endpoint)?;

        if self.bucket.is_empty() {
            return Err(Error::Config("S3 bucket name is not set".into()));
        }
        if self.access_key.is_empty() || self.secret_key.is_empty() {
            return Err(Error::Config("S3 credentials are not set".into()));
        }

        match self.bucket_lookup.as_str() {
            "auto" | "path" | "dns" => Ok(()),
            other => Err(Error::Config(format!(
                "Unknown bucket lookup style '{other}', expected auto, path or dns"
            ))),
        }
    }
}
