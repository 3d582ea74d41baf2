//! Storage locator parsing
//!
//! A locator has the shape `<scheme>://<bucket>/<key...>`. The key may itself
//! contain `/`. No URL-decoding or trailing-slash trimming is performed.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::SCHEME_SEPARATOR;
use crate::error::{ErrorMetadata, LogLevel};

/// Malformed locator input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocatorParseError {
    #[error("Locator '{0}' has no scheme separator (expected <scheme>://<bucket>/<key>)")]
    MissingScheme(String),

    #[error("Locator '{0}' has an empty scheme")]
    EmptyScheme(String),

    #[error("Locator '{0}' has an empty bucket")]
    EmptyBucket(String),

    #[error("Locator '{0}' has no key segment")]
    MissingKey(String),
}

impl ErrorMetadata for LocatorParseError {
    fn error_code(&self) -> &'static str {
        match self {
            LocatorParseError::MissingScheme(_) => "LOCATOR_MISSING_SCHEME",
            LocatorParseError::EmptyScheme(_) => "LOCATOR_EMPTY_SCHEME",
            LocatorParseError::EmptyBucket(_) => "LOCATOR_EMPTY_BUCKET",
            LocatorParseError::MissingKey(_) => "LOCATOR_MISSING_KEY",
        }
    }

    fn exit_code(&self) -> i32 {
        2
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Error
    }
}

/// Bucket and key of an object in the storage service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageLocator {
    pub scheme: String,
    pub bucket: String,
    pub key: String,
}

impl StorageLocator {
    /// Parse `scheme://bucket/key...` into its parts.
    ///
    /// The remainder after the scheme separator is split on its first `/`;
    /// everything after that belongs to the key.
    pub fn parse(url: &str) -> Result<Self, LocatorParseError> {
        let (scheme, rest) = url
            .split_once(SCHEME_SEPARATOR)
            .ok_or_else(|| LocatorParseError::MissingScheme(url.to_string()))?;

        if scheme.is_empty() {
            return Err(LocatorParseError::EmptyScheme(url.to_string()));
        }

        let (bucket, key) = rest
            .split_once('/')
            .ok_or_else(|| LocatorParseError::MissingKey(url.to_string()))?;

        if bucket.is_empty() {
            return Err(LocatorParseError::EmptyBucket(url.to_string()));
        }
        if key.is_empty() {
            return Err(LocatorParseError::MissingKey(url.to_string()));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }

    /// Last path segment of the key
    pub fn file_name(&self) -> &str {
        self.key.rsplit('/').next().unwrap_or(&self.key)
    }
}

impl FromStr for StorageLocator {
    type Err = LocatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Display for StorageLocator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}{}{}/{}",
            self.scheme, SCHEME_SEPARATOR, self.bucket, self.key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_bucket_and_nested_key() {
        let locator = StorageLocator::parse("s3://bucket/key1/key2").unwrap();
        assert_eq!(locator.scheme, "s3");
        assert_eq!(locator.bucket, "bucket");
        assert_eq!(locator.key, "key1/key2");
    }

    #[test]
    fn parse_simple_key() {
        let locator: StorageLocator = "s3://in/ref.mp4".parse().unwrap();
        assert_eq!(locator.bucket, "in");
        assert_eq!(locator.key, "ref.mp4");
        assert_eq!(locator.file_name(), "ref.mp4");
    }

    #[test]
    fn parse_keeps_key_verbatim() {
        // No decoding or trimming.
        let locator = StorageLocator::parse("s3://b/dir/with%20space/").unwrap();
        assert_eq!(locator.key, "dir/with%20space/");
    }

    #[test]
    fn parse_accepts_other_schemes() {
        let locator = StorageLocator::parse("gs://media/clips/a.mov").unwrap();
        assert_eq!(locator.scheme, "gs");
        assert_eq!(locator.bucket, "media");
        assert_eq!(locator.key, "clips/a.mov");
    }

    #[test]
    fn parse_rejects_missing_key() {
        assert!(matches!(
            StorageLocator::parse("s3://bucket"),
            Err(LocatorParseError::MissingKey(_))
        ));
        assert!(matches!(
            StorageLocator::parse("s3://bucket/"),
            Err(LocatorParseError::MissingKey(_))
        ));
    }

    #[test]
    fn parse_rejects_empty_bucket() {
        assert!(matches!(
            StorageLocator::parse("s3:///key.mp4"),
            Err(LocatorParseError::EmptyBucket(_))
        ));
    }

    #[test]
    fn parse_rejects_missing_scheme() {
        assert!(matches!(
            StorageLocator::parse("bucket/key.mp4"),
            Err(LocatorParseError::MissingScheme(_))
        ));
        assert!(matches!(
            StorageLocator::parse("://bucket/key.mp4"),
            Err(LocatorParseError::EmptyScheme(_))
        ));
    }

    #[test]
    fn display_round_trips() {
        let url = "s3://out/reports/run-1/report.json";
        let locator = StorageLocator::parse(url).unwrap();
        assert_eq!(locator.to_string(), url);
        assert_eq!(locator.file_name(), "report.json");
    }

    #[test]
    fn parse_error_metadata() {
        let err = StorageLocator::parse("s3://bucket").unwrap_err();
        assert_eq!(err.error_code(), "LOCATOR_MISSING_KEY");
        assert_eq!(err.exit_code(), 2);
    }
}
