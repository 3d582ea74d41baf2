use crate::traits::{read_upload_source, Storage, StorageError, StorageResult};
use crate::{StorageBackend, StorageLocator};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Buckets are sub-directories of `base_path`; keys are relative paths below them.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding one directory per bucket (e.g., "/var/lib/easyvmaf/buckets")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a locator to a filesystem path with security validation
    ///
    /// The bucket must be a single plain path component and every key
    /// component must be a plain name; `..`, `.`, empty segments and absolute
    /// keys are rejected. Existing paths must also resolve inside the base
    /// directory, so a symlink cannot lead out of it.
    async fn locator_to_path(&self, locator: &StorageLocator) -> StorageResult<PathBuf> {
        if !is_single_normal_component(&locator.bucket) {
            return Err(StorageError::InvalidKey(format!(
                "Bucket name '{}' contains invalid characters",
                locator.bucket
            )));
        }
        if !locator.key.split('/').all(is_single_normal_component) {
            return Err(StorageError::InvalidKey(format!(
                "Storage key '{}' contains invalid characters",
                locator.key
            )));
        }

        let path = self.base_path.join(&locator.bucket).join(&locator.key);

        let base_canonical = fs::canonicalize(&self.base_path).await.map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        if let Ok(canonical) = fs::canonicalize(&path).await {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(format!(
                    "Storage key '{}' resolves outside storage directory",
                    locator.key
                )));
            }
        }

        Ok(path)
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

fn is_single_normal_component(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(name)), None) if name == segment
    )
}

#[async_trait]
impl Storage for LocalStorage {
    async fn download_to_file(
        &self,
        locator: &StorageLocator,
        local_path: &Path,
    ) -> StorageResult<u64> {
        let path = self.locator_to_path(locator).await?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await? {
            return Err(StorageError::NotFound(locator.to_string()));
        }

        let size = fs::copy(&path, local_path).await.map_err(|e| {
            StorageError::DownloadFailed(format!(
                "Failed to copy {} to {}: {}",
                path.display(),
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
            "Local storage download successful"
        );

        Ok(size)
    }

    async fn upload_from_file(
        &self,
        local_path: &Path,
        locator: &StorageLocator,
    ) -> StorageResult<u64> {
        let path = self.locator_to_path(locator).await?;
        let data = read_upload_source(local_path).await?;
        let size = data.len() as u64;

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            bucket = %locator.bucket,
            key = %locator.key,
            path = %path.display(),
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(size)
    }

    async fn exists(&self, locator: &StorageLocator) -> StorageResult<bool> {
        let path = self.locator_to_path(locator).await?;
        Ok(fs::try_exists(&path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
