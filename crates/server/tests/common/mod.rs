//! Test doubles for the object store

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use jiff::Timestamp;
use sb_core::{Error, ListOptions, ListResult, ObjectInfo, ObjectStore, Result, ServerSettings};
use tower::ServiceExt;

use s3_browser::{AppState, router};

/// Stored object in [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
    pub modified: Timestamp,
}

/// In-memory bucket with S3 delimiter semantics
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, StoredObject>>,
    /// Keys whose delete always fails
    fail_delete: Mutex<BTreeSet<String>>,
}

impl MemoryStore {
    pub fn with_keys(keys: &[&str]) -> Self {
        let store = Self::default();
        for key in keys {
            store.insert(key, key.as_bytes());
        }
        store
    }

    pub fn insert(&self, key: &str, data: &[u8]) {
        let modified = Timestamp::from_second(1_700_000_000).unwrap();
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data: data.to_vec(),
                content_type: None,
                modified,
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn fail_delete_of(&self, key: &str) {
        self.fail_delete.lock().unwrap().insert(key.to_string());
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list_objects(&self, options: ListOptions) -> Result<ListResult> {
        let objects = self.objects.lock().unwrap();
        let prefix = options.prefix.unwrap_or_default();

        let mut prefixes = Vec::new();
        let mut seen = BTreeSet::new();
        let mut files = Vec::new();

        for (key, object) in objects.iter().filter(|(k, _)| k.starts_with(&prefix)) {
            let rest = &key[prefix.len()..];
            if !options.recursive {
                if let Some(pos) = rest.find('/') {
                    let common = format!("{prefix}{}", &rest[..=pos]);
                    if seen.insert(common.clone()) {
                        prefixes.push(ObjectInfo::dir(common));
                    }
                    continue;
                }
            }
            files.push(
                ObjectInfo::file(key, object.data.len() as i64)
                    .with_last_modified(object.modified),
            );
        }

        prefixes.extend(files);
        Ok(ListResult {
            items: prefixes,
            truncated: false,
            continuation_token: None,
        })
    }

    async fn head_object(&self, key: &str) -> Result<ObjectInfo> {
        let object = self
            .get(key)
            .ok_or_else(|| Error::NotFound(key.to_string()))?;

        let mut info = ObjectInfo::file(key, object.data.len() as i64)
            .with_last_modified(object.modified);
        info.etag = Some(format!("etag-{}", object.data.len()));
        info.content_type = object.content_type;
        Ok(info)
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        self.get(key)
            .map(|o| o.data)
            .ok_or_else(|| Error::NotFound(key.to_string()))
    }

    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo> {
        let info = ObjectInfo::file(key, data.len() as i64);
        self.objects.lock().unwrap().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type,
                modified: Timestamp::now(),
            },
        );
        Ok(info)
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        if self.fail_delete.lock().unwrap().contains(key) {
            return Err(Error::Auth(format!("Access Denied: {key}")));
        }
        // S3 deletes are idempotent
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }

    async fn presigned_url(&self, key: &str, expires: Duration) -> Result<String> {
        Ok(format!(
            "http://store.test/bucket/{key}?X-Amz-Expires={}",
            expires.as_secs()
        ))
    }
}

/// Store whose every call fails like an unreachable endpoint
pub struct FailingStore;

#[async_trait]
impl ObjectStore for FailingStore {
    async fn list_objects(&self, _options: ListOptions) -> Result<ListResult> {
        Err(Error::Network("connection refused".into()))
    }

    async fn head_object(&self, _key: &str) -> Result<ObjectInfo> {
        Err(Error::Network("connection refused".into()))
    }

    async fn get_object(&self, _key: &str) -> Result<Vec<u8>> {
        Err(Error::Network("connection refused".into()))
    }

    async fn put_object(
        &self,
        _key: &str,
        _data: Vec<u8>,
        _content_type: Option<String>,
    ) -> Result<ObjectInfo> {
        Err(Error::Network("connection refused".into()))
    }

    async fn delete_object(&self, _key: &str) -> Result<()> {
        Err(Error::Network("connection refused".into()))
    }

    async fn presigned_url(&self, _key: &str, _expires: Duration) -> Result<String> {
        Err(Error::Network("connection refused".into()))
    }
}

/// Router over `store` with default settings
pub fn app(store: Arc<dyn ObjectStore>) -> Router {
    app_with(store, ServerSettings::default())
}

/// Router over `store` with custom settings
pub fn app_with(store: Arc<dyn ObjectStore>, settings: ServerSettings) -> Router {
    router(AppState::new(store, &settings), &settings)
}

/// Send a request and decode the JSON response
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

const BOUNDARY: &str = "s3-browser-test-boundary";

/// One part of a multipart form: name, optional filename, content
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn field(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            filename: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }

    pub fn file(filename: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name: "file",
            filename: Some(filename),
            content_type: Some(content_type),
            data,
        }
    }
}

/// Build a `POST /api/upload` request with a multipart body
pub fn upload(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{filename}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(ct) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
