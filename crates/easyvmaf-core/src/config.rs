//! Configuration module
//!
//! Storage and analysis-tool settings read from the environment (a `.env`
//! file is loaded first when present). Per-run settings such as the three
//! locators come from the command line and live in the CLI's pipeline config.

use std::env;

use crate::constants::{DEFAULT_EASYVMAF_PATH, DEFAULT_PYTHON_PATH};
use crate::storage_types::StorageBackend;

/// Object storage configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub storage_backend: Option<StorageBackend>,
    pub s3_region: Option<String>,
    pub aws_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub local_storage_path: Option<String>,
}

impl StorageConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_backend = lookup("STORAGE_BACKEND")
            .map(|value| value.parse::<StorageBackend>())
            .transpose()?;

        Ok(StorageConfig {
            storage_backend,
            s3_region: lookup("S3_REGION"),
            aws_region: lookup("AWS_REGION"),
            s3_endpoint: lookup("S3_ENDPOINT"),
            local_storage_path: lookup("LOCAL_STORAGE_PATH"),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        match self.storage_backend() {
            StorageBackend::S3 => {
                if self.region().is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set for the s3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set for the local storage backend"
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.storage_backend.unwrap_or(StorageBackend::S3)
    }

    /// `S3_REGION` wins over `AWS_REGION`
    pub fn region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.local_storage_path.as_deref()
    }
}

/// How to launch easyVMAF
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolConfig {
    pub python_path: String,
    pub easyvmaf_path: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            python_path: DEFAULT_PYTHON_PATH.to_string(),
            easyvmaf_path: DEFAULT_EASYVMAF_PATH.to_string(),
        }
    }
}

impl ToolConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            python_path: lookup("EASYVMAF_PYTHON")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.python_path),
            easyvmaf_path: lookup("EASYVMAF_PATH")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.easyvmaf_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn storage_defaults_to_s3() {
        let config = StorageConfig::from_lookup(lookup(&[("AWS_REGION", "eu-north-1")])).unwrap();
        assert_eq!(config.storage_backend(), StorageBackend::S3);
        assert_eq!(config.region(), Some("eu-north-1"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn s3_region_overrides_aws_region() {
        let config = StorageConfig::from_lookup(lookup(&[
            ("AWS_REGION", "eu-north-1"),
            ("S3_REGION", "us-east-1"),
        ]))
        .unwrap();
        assert_eq!(config.region(), Some("us-east-1"));
    }

    #[test]
    fn s3_without_region_is_invalid() {
        let config = StorageConfig::from_lookup(lookup(&[])).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn local_backend_requires_path() {
        let config = StorageConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "local")])).unwrap();
        assert!(config.validate().is_err());

        let config = StorageConfig::from_lookup(lookup(&[
            ("STORAGE_BACKEND", "local"),
            ("LOCAL_STORAGE_PATH", "/tmp/buckets"),
        ]))
        .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.local_storage_path(), Some("/tmp/buckets"));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(StorageConfig::from_lookup(lookup(&[("STORAGE_BACKEND", "ftp")])).is_err());
    }

    #[test]
    fn tool_config_defaults_and_overrides() {
        let config = ToolConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ToolConfig::default());
        assert_eq!(config.python_path, "python3");
        assert_eq!(config.easyvmaf_path, "easyVmaf.py");

        let config = ToolConfig::from_lookup(lookup(&[
            ("EASYVMAF_PYTHON", "/usr/bin/python3.11"),
            ("EASYVMAF_PATH", "/opt/easyVmaf/easyVmaf.py"),
        ]));
        assert_eq!(config.python_path, "/usr/bin/python3.11");
        assert_eq!(config.easyvmaf_path, "/opt/easyVmaf/easyVmaf.py");
    }
}
