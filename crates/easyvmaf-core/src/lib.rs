//! easyvmaf core library
//!
//! Domain types shared by every stage of the analysis pipeline: storage
//! locators, the analysis request/outcome models, configuration and the
//! error metadata contract.

pub mod config;
pub mod constants;
pub mod error;
pub mod locator;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{StorageConfig, ToolConfig};
pub use error::{ErrorMetadata, LogLevel};
pub use locator::{LocatorParseError, StorageLocator};
pub use models::{AnalysisOutcome, AnalysisRequest};
pub use storage_types::StorageBackend;
