//! Test doubles for driving the pipeline without S3 or easyVMAF

#![allow(dead_code)]

use async_trait::async_trait;
use easyvmaf_core::{AnalysisOutcome, AnalysisRequest};
use easyvmaf_processing::{report_path, AnalysisRunner, AnalysisToolError};
use easyvmaf_storage::{Storage, StorageBackend, StorageError, StorageLocator, StorageResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// In-memory storage keyed by (bucket, key) that records every call
#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    downloads: Mutex<Vec<(StorageLocator, PathBuf)>>,
    uploads: Mutex<Vec<(PathBuf, StorageLocator)>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an object in the mock storage
    pub fn put_object(&self, bucket: &str, key: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data.to_vec());
    }

    /// Get object data (for test assertions)
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn downloads(&self) -> Vec<(StorageLocator, PathBuf)> {
        self.downloads.lock().unwrap().clone()
    }

    pub fn uploads(&self) -> Vec<(PathBuf, StorageLocator)> {
        self.uploads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn download_to_file(
        &self,
        locator: &StorageLocator,
        local_path: &Path,
    ) -> StorageResult<u64> {
        self.downloads
            .lock()
            .unwrap()
            .push((locator.clone(), local_path.to_path_buf()));

        let data = self
            .object(&locator.bucket, &locator.key)
            .ok_or_else(|| StorageError::NotFound(locator.to_string()))?;
        tokio::fs::write(local_path, &data).await?;
        Ok(data.len() as u64)
    }

    async fn upload_from_file(
        &self,
        local_path: &Path,
        locator: &StorageLocator,
    ) -> StorageResult<u64> {
        self.uploads
            .lock()
            .unwrap()
            .push((local_path.to_path_buf(), locator.clone()));

        let data = tokio::fs::read(local_path)
            .await
            .map_err(|e| StorageError::UploadFailed(e.to_string()))?;
        self.put_object(&locator.bucket, &locator.key, &data);
        Ok(data.len() as u64)
    }

    async fn exists(&self, locator: &StorageLocator) -> StorageResult<bool> {
        Ok(self.object(&locator.bucket, &locator.key).is_some())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// Stand-in for easyVMAF: records requests and optionally writes a report
pub struct MockRunner {
    exit_code: Option<i32>,
    report: Option<String>,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl MockRunner {
    /// Exits 0 and writes a small libvmaf-style report
    pub fn succeeding() -> Self {
        Self {
            exit_code: Some(0),
            report: Some(r#"{"pooled_metrics":{"vmaf":{"mean":95.5,"harmonic_mean":95.25}}}"#.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_exit_code(mut self, exit_code: Option<i32>) -> Self {
        self.exit_code = exit_code;
        self
    }

    pub fn with_report(mut self, report: Option<&str>) -> Self {
        self.report = report.map(String::from);
        self
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisRunner for MockRunner {
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, AnalysisToolError> {
        self.requests.lock().unwrap().push(request.clone());

        let report_path = report_path(&request.distorted_path);
        if let Some(ref report) = self.report {
            tokio::fs::write(&report_path, report)
                .await
                .map_err(|source| AnalysisToolError::ReportIo {
                    path: report_path.clone(),
                    source,
                })?;
        }

        Ok(AnalysisOutcome {
            exit_code: self.exit_code,
            stdout: String::new(),
            stderr: if self.exit_code == Some(0) {
                String::new()
            } else {
                "easyVmaf failed".to_string()
            },
            report_path,
        })
    }
}
