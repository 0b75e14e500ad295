//! ObjectStore trait definition
//!
//! This trait defines the interface for S3-compatible storage operations.
//! It allows the server to be decoupled from the specific S3 SDK implementation.
//! An `ObjectStore` is bound to a single bucket, so operations take bare keys.

use std::time::Duration;

use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Delimiter used to emulate folders on top of flat keys
pub const DELIMITER: &str = "/";

/// Metadata for an object or common prefix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectInfo {
    /// Object key, or the common prefix for directories
    pub key: String,

    /// Size in bytes (None for prefixes)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<i64>,

    /// Last modified timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<Timestamp>,

    /// ETag without surrounding quotes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    /// Content type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Whether this is a common prefix rather than an object
    pub is_dir: bool,
}

impl ObjectInfo {
    /// Create a new ObjectInfo for a file
    pub fn file(key: impl Into<String>, size: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes: Some(size),
            last_modified: None,
            etag: None,
            content_type: None,
            is_dir: false,
        }
    }

    /// Create a new ObjectInfo for a common prefix
    pub fn dir(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            size_bytes: None,
            last_modified: None,
            etag: None,
            content_type: None,
            is_dir: true,
        }
    }

    /// Set the last modified timestamp
    pub fn with_last_modified(mut self, ts: Timestamp) -> Self {
        self.last_modified = Some(ts);
        self
    }
}

/// Result of a single list page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListResult {
    /// Common prefixes first, then objects, in store order
    pub items: Vec<ObjectInfo>,

    /// Whether the result is truncated (more items available)
    pub truncated: bool,

    /// Continuation token for pagination
    #[serde(skip_serializing_if = "Option::is_none")]
    pub continuation_token: Option<String>,
}

/// Options for list operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    /// Delimiter for grouping (usually "/")
    pub delimiter: Option<String>,

    /// Prefix to filter by
    pub prefix: Option<String>,

    /// Continuation token for pagination
    pub continuation_token: Option<String>,

    /// Whether to list recursively (ignore delimiter)
    pub recursive: bool,
}

impl ListOptions {
    /// One level below `prefix`, grouped by `/`
    pub fn shallow(prefix: &str) -> Self {
        Self {
            prefix: non_empty(prefix),
            delimiter: Some(DELIMITER.to_string()),
            ..Default::default()
        }
    }

    /// Every key under `prefix`, no grouping
    pub fn recursive(prefix: &str) -> Self {
        Self {
            prefix: non_empty(prefix),
            recursive: true,
            ..Default::default()
        }
    }

    /// Continue from a previous page
    pub fn after(mut self, token: Option<String>) -> Self {
        self.continuation_token = token;
        self
    }
}

fn non_empty(prefix: &str) -> Option<String> {
    (!prefix.is_empty()).then(|| prefix.to_string())
}

/// Trait for S3-compatible storage operations
///
/// This trait is implemented by the S3 adapter and can be mocked for testing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List one page of objects and common prefixes
    async fn list_objects(&self, options: ListOptions) -> Result<ListResult>;

    /// Get object metadata
    async fn head_object(&self, key: &str) -> Result<ObjectInfo>;

    /// Get object content as bytes
    async fn get_object(&self, key: &str) -> Result<Vec<u8>>;

    /// Write an object, replacing any existing object at `key`
    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo>;

    /// Delete a single object
    async fn delete_object(&self, key: &str) -> Result<()>;

    /// Generate a time-limited GET URL for an object
    async fn presigned_url(&self, key: &str, expires: Duration) -> Result<String>;
}
