//! easyvmaf processing library
//!
//! Runs the external easyVMAF tool over a pair of local files: argument
//! building, process execution, report location and report checks. Also owns
//! the scoped cleanup of local working files.

pub mod analysis;
pub mod error;
pub mod local_files;

pub use analysis::{
    build_args, report_file_name, report_path, verify_outcome, AnalysisRunner, EasyVmafRunner,
    ExitStatusPolicy, ReportSummary,
};
pub use error::AnalysisToolError;
pub use local_files::LocalFileGuard;
