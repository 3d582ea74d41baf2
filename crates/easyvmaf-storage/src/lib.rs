//! easyvmaf storage library
//!
//! Object storage access for the analysis pipeline: a `Storage` trait with a
//! get-to-file / put-from-file contract, plus S3 and local filesystem backends.
//!
//! # Addressing
//!
//! Every call takes a `StorageLocator` (bucket + key). Backends never rewrite
//! keys: a key a backend cannot address verbatim is rejected as
//! `InvalidKey`. The local backend maps `bucket/key` to `{root}/{bucket}/{key}`.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use easyvmaf_core::{StorageBackend, StorageLocator};
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
