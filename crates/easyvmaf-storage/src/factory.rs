#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use easyvmaf_core::StorageConfig;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &StorageConfig) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config.region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage = S3Storage::new(region, endpoint)?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;

            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(backend: StorageBackend) -> StorageConfig {
        StorageConfig {
            storage_backend: Some(backend),
            s3_region: None,
            aws_region: None,
            s3_endpoint: None,
            local_storage_path: None,
        }
    }

    #[cfg(feature = "storage-s3")]
    #[tokio::test]
    async fn s3_requires_region() {
        let result = create_storage(&config(StorageBackend::S3)).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));

        let mut with_region = config(StorageBackend::S3);
        with_region.aws_region = Some("eu-north-1".to_string());
        let storage = create_storage(&with_region).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::S3);
    }

    #[cfg(feature = "storage-local")]
    #[tokio::test]
    async fn local_uses_configured_root() {
        let result = create_storage(&config(StorageBackend::Local)).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));

        let dir = tempfile::tempdir().unwrap();
        let mut with_path = config(StorageBackend::Local);
        with_path.local_storage_path = Some(dir.path().join("buckets").display().to_string());
        let storage = create_storage(&with_path).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
        assert!(dir.path().join("buckets").is_dir());
    }
}
