//! sb-core: Core library for the s3-browser file manager
//!
//! This crate provides the core functionality for s3-browser, including:
//! - Configuration management
//! - ObjectStore trait for S3 operations
//! - Folder listing on top of delimiter listings
//! - Recursive folder deletion
//!
//! This crate is designed to be independent of any specific S3 SDK,
//! allowing for easy testing and potential future support for other backends.

pub mod config;
pub mod error;
pub mod folder;
pub mod listing;
pub mod prefix;
pub mod store;
pub mod traits;

pub use config::{Config, ConfigManager, ServerSettings};
pub use error::{Error, Result};
pub use folder::{FolderDeletion, delete_folder};
pub use listing::{Entry, EntryKind, Listing, list_prefix};
pub use store::StoreConfig;
pub use traits::{ListOptions, ListResult, ObjectInfo, ObjectStore};
