//! Error metadata
//!
//! Each crate defines its own `thiserror` enum; the pipeline reports any of
//! them through the `ErrorMetadata` trait so the binary can pick a log level
//! and a process exit code without knowing the concrete variant.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for failures that abort the run
    Error,
}

/// Metadata for error reporting - defines how an error surfaces to the operator
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "STORAGE_NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Process exit code for this error
    ///
    /// `1` configuration, `2` locator parse, `3` storage, `4` analysis tool.
    fn exit_code(&self) -> i32;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}
