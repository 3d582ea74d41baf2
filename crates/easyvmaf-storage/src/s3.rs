use crate::traits::{read_upload_source, Storage, StorageError, StorageResult};
use crate::{StorageBackend, StorageLocator};
use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, PutPayload, Result as ObjectResult};
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// S3 storage implementation
///
/// Locators name their own bucket, so a client is built per call for the
/// locator's bucket; region, endpoint and credentials are shared.
#[derive(Clone)]
pub struct S3Storage {
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        if region.trim().is_empty() {
            return Err(StorageError::ConfigError("S3 region is empty".to_string()));
        }

        Ok(S3Storage {
            region,
            endpoint_url,
        })
    }

    /// Build an object store bound to `bucket` from environment and explicit settings.
    fn store_for(&self, bucket: &str) -> StorageResult<AmazonS3> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(self.region.clone())
            .with_bucket_name(bucket.to_string());

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }
}

/// Map a locator key to an object path without rewriting it.
///
/// `ObjectPath::from` percent-encodes and drops empty segments, so the key is
/// parsed instead and anything object_store would store under a different
/// name (empty segments, leading or trailing `/`, `.`/`..` segments) is
/// rejected.
fn object_path(locator: &StorageLocator) -> StorageResult<ObjectPath> {
    let invalid = |reason: String| {
        StorageError::InvalidKey(format!(
            "Storage key '{}' cannot be addressed in S3: {}",
            locator.key, reason
        ))
    };

    let path = ObjectPath::parse(&locator.key).map_err(|e| invalid(e.to_string()))?;
    let stored: &str = path.as_ref();
    if stored != locator.key {
        return Err(invalid(format!("would be stored as '{}'", path)));
    }
    Ok(path)
}

#[async_trait]
impl Storage for S3Storage {
    async fn download_to_file(
        &self,
        locator: &StorageLocator,
        local_path: &Path,
    ) -> StorageResult<u64> {
        let location = object_path(locator)?;
        let store = self.store_for(&locator.bucket)?;
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(locator.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %locator.bucket,
                    key = %locator.key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let mut file = fs::File::create(local_path).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to create file {}: {}",
                local_path.display(),
                e
            ))
        })?;

        let mut stream = result.into_stream();
        let mut size: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %locator.bucket,
                    key = %locator.key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download stream error"
                );
                StorageError::DownloadFailed(e.to_string())
            })?;
            file.write_all(&chunk).await.map_err(|e| {
                StorageError::DownloadFailed(format!(
                    "Failed to write file {}: {}",
                    local_path.display(),
                    e
                ))
            })?;
            size += chunk.len() as u64;
        }

        file.sync_all().await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to sync file {}: {}",
                local_path.display(),
                e
            ))
        })?;

        tracing::info!(
            bucket = %locator.bucket,
            key = %locator.key,
            path = %local_path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(size)
    }

    async fn upload_from_file(
        &self,
        local_path: &Path,
        locator: &StorageLocator,
    ) -> StorageResult<u64> {
        let location = object_path(locator)?;
        let data = read_upload_source(local_path).await?;
        let store = self.store_for(&locator.bucket)?;
        let size = data.len() as u64;
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = store
            .put(&location, PutPayload::from(Bytes::from(data)))
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %locator.bucket,
                key = %locator.key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "S3 upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        tracing::info!(
            bucket = %locator.bucket,
            key = %locator.key,
            path = %local_path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(size)
    }

    async fn exists(&self, locator: &StorageLocator) -> StorageResult<bool> {
        let location = object_path(locator)?;
        let store = self.store_for(&locator.bucket)?;
        match store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
