//! Folder listing
//!
//! Reshapes a delimiter listing of the store into the folder/file view the
//! browser renders.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::prefix::{file_name, folder_name};
use crate::traits::{ListOptions, ObjectInfo, ObjectStore};

/// Kind of listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

/// A single folder or file shown in the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Display name (last path segment)
    pub name: String,

    /// Full key for files, common prefix for folders
    pub path: String,

    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Size in bytes, null for folders
    pub size: Option<i64>,

    /// Null for folders
    pub last_modified: Option<Timestamp>,
}

impl Entry {
    /// Folder entry for a common prefix listed under `parent`
    pub fn folder(common_prefix: &str, parent: &str) -> Self {
        Self {
            name: folder_name(common_prefix, parent),
            path: common_prefix.to_string(),
            kind: EntryKind::Folder,
            size: None,
            last_modified: None,
        }
    }

    /// File entry for a stored object
    pub fn file(info: &ObjectInfo) -> Self {
        Self {
            name: file_name(&info.key).to_string(),
            path: info.key.clone(),
            kind: EntryKind::File,
            size: info.size_bytes,
            last_modified: info.last_modified,
        }
    }
}

/// Contents of one folder
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub folders: Vec<Entry>,
    pub files: Vec<Entry>,
    pub prefix: String,
}

impl Listing {
    /// Total number of entries
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// List the direct children of `prefix`
///
/// Follows continuation tokens until the store reports no more pages. The
/// object whose key equals `prefix` (a folder marker) is never listed.
pub async fn list_prefix(store: &dyn ObjectStore, prefix: &str) -> Result<Listing> {
    let mut listing = Listing {
        prefix: prefix.to_string(),
        ..Default::default()
    };
    let mut continuation_token: Option<String> = None;

    loop {
        let options = ListOptions::shallow(prefix).after(continuation_token.take());
        let page = store.list_objects(options).await?;

        for item in &page.items {
            if item.is_dir {
                listing.folders.push(Entry::folder(&item.key, prefix));
            } else if item.key != prefix {
                listing.files.push(Entry::file(item));
            }
        }

        match page.continuation_token {
            Some(token) if page.truncated => continuation_token = Some(token),
            _ => break,
        }
    }

    tracing::debug!(
        prefix,
        folders = listing.folders.len(),
        files = listing.files.len(),
        "Listed prefix"
    );

    Ok(listing)
}
