use std::path::PathBuf;

use easyvmaf_core::{ErrorMetadata, LogLevel};

/// Failures of the external analysis tool
#[derive(Debug, thiserror::Error)]
pub enum AnalysisToolError {
    #[error("Invalid tool path '{0}': contains dangerous characters")]
    InvalidToolPath(String),

    #[error("Failed to execute {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Analysis tool exited with {}: {stderr}", exit_code_display(.exit_code))]
    NonZeroExit {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Analysis tool did not produce a report at {}", .0.display())]
    MissingReport(PathBuf),

    #[error("Report at {} is not valid JSON: {source}", .path.display())]
    InvalidReport {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read report at {}: {source}", .path.display())]
    ReportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn exit_code_display(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl ErrorMetadata for AnalysisToolError {
    fn error_code(&self) -> &'static str {
        match self {
            AnalysisToolError::InvalidToolPath(_) => "ANALYSIS_INVALID_TOOL_PATH",
            AnalysisToolError::Spawn { .. } => "ANALYSIS_SPAWN_FAILED",
            AnalysisToolError::NonZeroExit { .. } => "ANALYSIS_NON_ZERO_EXIT",
            AnalysisToolError::MissingReport(_) => "ANALYSIS_MISSING_REPORT",
            AnalysisToolError::InvalidReport { .. } => "ANALYSIS_INVALID_REPORT",
            AnalysisToolError::ReportIo { .. } => "ANALYSIS_REPORT_IO",
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            AnalysisToolError::InvalidToolPath(_) => 1,
            _ => 4,
        }
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Error
    }
}
