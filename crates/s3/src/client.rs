//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from sb-core.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_smithy_types::DateTime;

use sb_core::{Error, ListOptions, ListResult, ObjectInfo, ObjectStore, Result, StoreConfig};

/// S3 client wrapper bound to one bucket
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Client {
    /// Create a new S3 client from store settings
    pub async fn new(store: &StoreConfig) -> Result<Self> {
        // Build credentials provider
        let credentials = aws_credential_types::Credentials::new(
            store.access_key.clone(),
            store.secret_key.clone(),
            None, // session token
            None, // expiry
            "s3-browser-static-credentials",
        );

        // Build SDK config
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(store.region.clone()))
            .endpoint_url(&store.endpoint)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(store.force_path_style())
            .build();

        let client = aws_sdk_s3::Client::from_conf(s3_config);

        tracing::debug!(
            endpoint = %store.endpoint,
            bucket = %store.bucket,
            path_style = store.force_path_style(),
            "Created S3 client"
        );

        Ok(Self {
            inner: client,
            bucket: store.bucket.clone(),
        })
    }

    /// Name of the browsed bucket
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// Convert an SDK failure into a store error carrying the service's message
fn store_error<E, R>(err: SdkError<E, R>, target: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if let Some(service) = err.as_service_error() {
        let code = service.code().map(str::to_string);
        let message = service.message().map(str::to_string);
        return classify(code.as_deref(), message, target);
    }

    Error::Network(DisplayErrorContext(err).to_string())
}

/// Map an S3 error code and message onto the error taxonomy
fn classify(code: Option<&str>, message: Option<String>, target: &str) -> Error {
    match code {
        Some("NoSuchKey" | "NotFound" | "NoSuchBucket") => {
            Error::NotFound(message.unwrap_or_else(|| target.to_string()))
        }
        Some(c @ ("AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch")) => {
            Error::Auth(message.unwrap_or_else(|| c.to_string()))
        }
        Some(c) => match message {
            Some(m) => Error::General(format!("{c}: {m}")),
            None => Error::General(format!("{c}: {target}")),
        },
        None => Error::General(message.unwrap_or_else(|| format!("Request failed: {target}"))),
    }
}

fn to_timestamp(dt: &DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::new(dt.secs(), dt.subsec_nanos() as i32).ok()
}

fn trim_etag(etag: &str) -> String {
    etag.trim_matches('"').to_string()
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_objects(&self, options: ListOptions) -> Result<ListResult> {
        let mut request = self.inner.list_objects_v2().bucket(&self.bucket);

        if let Some(p) = &options.prefix {
            request = request.prefix(p);
        }

        // Set delimiter (for non-recursive listing)
        if !options.recursive {
            request = request.delimiter(options.delimiter.as_deref().unwrap_or("/"));
        }

        if let Some(token) = &options.continuation_token {
            request = request.continuation_token(token);
        }

        let target = options.prefix.as_deref().unwrap_or("/");
        let response = request.send().await.map_err(|e| store_error(e, target))?;

        let mut items = Vec::new();

        // Add common prefixes (directories)
        for prefix in response.common_prefixes() {
            if let Some(p) = prefix.prefix() {
                items.push(ObjectInfo::dir(p));
            }
        }

        // Add objects
        for object in response.contents() {
            let key = object.key().unwrap_or_default().to_string();
            let size = object.size().unwrap_or(0);
            let mut info = ObjectInfo::file(&key, size);

            info.last_modified = object.last_modified().and_then(to_timestamp);
            info.etag = object.e_tag().map(trim_etag);

            items.push(info);
        }

        Ok(ListResult {
            items,
            truncated: response.is_truncated().unwrap_or(false),
            continuation_token: response.next_continuation_token().map(|s| s.to_string()),
        })
    }

    async fn head_object(&self, key: &str) -> Result<ObjectInfo> {
        let response = self
            .inner
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| store_error(e, key))?;

        let size = response.content_length().unwrap_or(0);
        let mut info = ObjectInfo::file(key, size);

        info.last_modified = response.last_modified().and_then(to_timestamp);
        info.etag = response.e_tag().map(trim_etag);
        info.content_type = response.content_type().map(str::to_string);

        Ok(info)
    }

    async fn get_object(&self, key: &str) -> Result<Vec<u8>> {
        let response = self
            .inner
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| store_error(e, key))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Network(e.to_string()))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    async fn put_object(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<ObjectInfo> {
        let size = data.len() as i64;
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        let mut request = self
            .inner
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body);

        if let Some(ct) = &content_type {
            request = request.content_type(ct);
        }

        let response = request.send().await.map_err(|e| store_error(e, key))?;

        let mut info = ObjectInfo::file(key, size).with_last_modified(jiff::Timestamp::now());
        info.etag = response.e_tag().map(trim_etag);
        info.content_type = content_type;

        Ok(info)
    }

    async fn delete_object(&self, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| store_error(e, key))?;

        Ok(())
    }

    async fn presigned_url(&self, key: &str, expires: Duration) -> Result<String> {
        let presigning =
            PresigningConfig::expires_in(expires).map_err(|e| Error::Config(e.to_string()))?;

        let request = self
            .inner
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| store_error(e, key))?;

        Ok(request.uri().to_string())
    }
}
