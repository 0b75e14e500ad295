//! Folder deletion
//!
//! The store has no directories, so deleting a folder means enumerating every
//! key under its prefix and deleting each one. This is not atomic: a failure
//! part way through leaves the folder partially deleted.

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::traits::{ListOptions, ObjectStore};

/// Default number of deletes kept in flight
pub const DEFAULT_DELETE_CONCURRENCY: usize = 16;

/// Outcome of a folder deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderDeletion {
    /// Number of objects removed
    pub deleted: usize,
}

/// Collect every key under `prefix`, across all pages
pub async fn collect_keys(store: &dyn ObjectStore, prefix: &str) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    let mut continuation_token: Option<String> = None;

    loop {
        let options = ListOptions::recursive(prefix).after(continuation_token.take());
        let page = store.list_objects(options).await?;

        keys.extend(
            page.items
                .into_iter()
                .filter(|item| !item.is_dir)
                .map(|item| item.key),
        );

        match page.continuation_token {
            Some(token) if page.truncated => continuation_token = Some(token),
            _ => break,
        }
    }

    Ok(keys)
}

/// Delete every object under `prefix`
///
/// Deletes run concurrently, at most `concurrency` at a time. All of them are
/// awaited before returning; if any failed, the first error is returned.
pub async fn delete_folder(
    store: &dyn ObjectStore,
    prefix: &str,
    concurrency: usize,
) -> Result<FolderDeletion> {
    if prefix.is_empty() {
        return Err(Error::MissingParameter("Prefix"));
    }

    let keys = collect_keys(store, prefix).await?;
    if keys.is_empty() {
        tracing::debug!(prefix, "No objects under prefix");
        return Ok(FolderDeletion { deleted: 0 });
    }

    let total = keys.len();
    let results: Vec<(String, Result<()>)> = stream::iter(keys)
        .map(|key| async move {
            let result = store.delete_object(&key).await;
            (key, result)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut first_error = None;
    let mut failed = Vec::new();
    for (key, result) in results {
        if let Err(e) = result {
            failed.push(key);
            first_error.get_or_insert(e);
        }
    }

    if let Some(e) = first_error {
        tracing::warn!(
            prefix,
            total,
            failed = failed.len(),
            "Failed to delete some objects: {:?}",
            failed
        );
        return Err(e);
    }

    tracing::info!(prefix, deleted = total, "Deleted folder");
    Ok(FolderDeletion { deleted: total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use crate::traits::{ListResult, MockObjectStore, ObjectInfo};

    fn files(keys: &[&str]) -> ListResult {
        ListResult {
            items: keys.iter().map(|k| ObjectInfo::file(*k, 1)).collect(),
            truncated: false,
            continuation_token: None,
        }
    }

    #[tokio::test]
    async fn test_delete_folder_counts() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .withf(|opts| opts.recursive && opts.prefix.as_deref() == Some("docs/"))
            .times(1)
            .returning(|_| Ok(files(&["docs/", "docs/a.txt", "docs/sub/b.txt"])));
        store
            .expect_delete_object()
            .times(3)
            .returning(|_| Ok(()));

        let result = delete_folder(&store, "docs/", 2).await.unwrap();
        assert_eq!(result.deleted, 3);
    }

    #[tokio::test]
    async fn test_delete_missing_prefix_is_zero() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .returning(|_| Ok(ListResult::default()));
        store.expect_delete_object().never();

        let result = delete_folder(&store, "nothing/", 4).await.unwrap();
        assert_eq!(result, FolderDeletion { deleted: 0 });
    }

    #[tokio::test]
    async fn test_delete_empty_prefix_rejected() {
        let store = MockObjectStore::new();
        let err = delete_folder(&store, "", 4).await.unwrap_err();
        assert!(matches!(err, Error::MissingParameter(_)));
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_delete_partial_failure() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .returning(|_| Ok(files(&["d/a", "d/b", "d/c"])));
        store
            .expect_delete_object()
            .withf(|key| key == "d/b")
            .times(1)
            .returning(|_| Err(Error::Auth("AccessDenied".into())));
        store
            .expect_delete_object()
            .withf(|key| key != "d/b")
            .times(2)
            .returning(|_| Ok(()));

        let err = delete_folder(&store, "d/", 3).await.unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }

    #[tokio::test]
    async fn test_collect_keys_paginates() {
        let mut store = MockObjectStore::new();
        store
            .expect_list_objects()
            .withf(|opts| opts.continuation_token.is_none())
            .times(1)
            .returning(|_| {
                Ok(ListResult {
                    items: vec![ObjectInfo::file("p/1", 1)],
                    truncated: true,
                    continuation_token: Some("t1".into()),
                })
            });
        store
            .expect_list_objects()
            .withf(|opts| opts.continuation_token.as_deref() == Some("t1"))
            .times(1)
            .returning(|_| Ok(files(&["p/2"])));

        let keys = collect_keys(&store, "p/").await.unwrap();
        assert_eq!(keys, ["p/1", "p/2"]);
    }

    /// Store that records how many deletes run at once
    struct InFlightStore {
        keys: Vec<String>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl InFlightStore {
        fn with_keys(count: usize) -> Self {
            Self {
                keys: (0..count).map(|i| format!("bulk/{i}")).collect(),
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl ObjectStore for InFlightStore {
        async fn list_objects(&self, _options: ListOptions) -> Result<ListResult> {
            Ok(ListResult {
                items: self.keys.iter().map(|k| ObjectInfo::file(k, 1)).collect(),
                ..Default::default()
            })
        }

        async fn head_object(&self, key: &str) -> Result<ObjectInfo> {
            Err(Error::NotFound(key.to_string()))
        }

        async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
            Err(Error::NotFound(key.to_string()))
        }

        async fn put_object(
            &self,
            key: &str,
            _data: Vec<u8>,
            _content_type: Option<String>,
        ) -> Result<ObjectInfo> {
            Err(Error::General(format!("read-only: {key}")))
        }

        async fn delete_object(&self, _key: &str) -> Result<()> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(1)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }

        async fn presigned_url(&self, key: &str, _expires: Duration) -> Result<String> {
            Err(Error::NotFound(key.to_string()))
        }
    }

    #[tokio::test]
    async fn test_delete_respects_concurrency_limit() {
        let store = InFlightStore::with_keys(50);

        let result = delete_folder(&store, "bulk/", 4).await.unwrap();

        assert_eq!(result.deleted, 50);
        assert_eq!(store.peak.load(Ordering::SeqCst), 4);
        assert_eq!(store.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_zero_concurrency_runs_serially() {
        let store = InFlightStore::with_keys(5);

        let result = delete_folder(&store, "bulk/", 0).await.unwrap();

        assert_eq!(result.deleted, 5);
        assert_eq!(store.peak.load(Ordering::SeqCst), 1);
    }
}
