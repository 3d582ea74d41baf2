//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::{StorageBackend, StorageLocator};
use async_trait::async_trait;
use easyvmaf_core::{ErrorMetadata, LogLevel};
use std::path::Path;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ErrorMetadata for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            StorageError::UploadFailed(_) => "STORAGE_UPLOAD_FAILED",
            StorageError::DownloadFailed(_) => "STORAGE_DOWNLOAD_FAILED",
            StorageError::NotFound(_) => "STORAGE_NOT_FOUND",
            StorageError::InvalidKey(_) => "STORAGE_INVALID_KEY",
            StorageError::BackendError(_) => "STORAGE_BACKEND_ERROR",
            StorageError::IoError(_) => "STORAGE_IO_ERROR",
            StorageError::ConfigError(_) => "STORAGE_CONFIG_ERROR",
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            StorageError::ConfigError(_) => 1,
            _ => 3,
        }
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Error
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// Objects are always materialized on local disk; nothing is kept in memory
/// across calls.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Download an object to `local_path`, overwriting any existing file.
    ///
    /// Returns the number of bytes written. A missing object is reported as
    /// `StorageError::NotFound`.
    async fn download_to_file(
        &self,
        locator: &StorageLocator,
        local_path: &Path,
    ) -> StorageResult<u64>;

    /// Upload the file at `local_path`, creating or overwriting the object.
    ///
    /// Returns the number of bytes uploaded.
    async fn upload_from_file(
        &self,
        local_path: &Path,
        locator: &StorageLocator,
    ) -> StorageResult<u64>;

    /// Check if an object exists
    async fn exists(&self, locator: &StorageLocator) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

/// Read a local file for upload, mapping a missing file to `UploadFailed`.
pub(crate) async fn read_upload_source(local_path: &Path) -> StorageResult<Vec<u8>> {
    tokio::fs::read(local_path).await.map_err(|e| {
        StorageError::UploadFailed(format!(
            "Failed to read local file {}: {}",
            local_path.display(),
            e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_exit_with_config_code() {
        assert_eq!(StorageError::ConfigError("x".into()).exit_code(), 1);
        assert_eq!(StorageError::NotFound("x".into()).exit_code(), 3);
        assert_eq!(
            StorageError::NotFound("x".into()).error_code(),
            "STORAGE_NOT_FOUND"
        );
    }

    #[tokio::test]
    async fn missing_upload_source_is_upload_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_upload_source(&dir.path().join("missing_vmaf.json")).await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
    }
}
