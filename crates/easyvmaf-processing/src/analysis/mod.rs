//! easyVMAF analysis
//!
//! `args` builds the tool's argument list and locates its report, `easyvmaf`
//! runs the tool as a child process, `report` checks what the run produced.

mod args;
mod easyvmaf;
mod report;

pub use args::{build_args, report_file_name, report_path};
pub use easyvmaf::EasyVmafRunner;
pub use report::{verify_outcome, ExitStatusPolicy, ReportSummary};

use async_trait::async_trait;
use easyvmaf_core::{AnalysisOutcome, AnalysisRequest};

use crate::error::AnalysisToolError;

/// Executes one analysis run to completion
///
/// Implementations only run the tool and capture what it did; judging the
/// outcome is left to [`verify_outcome`].
#[async_trait]
pub trait AnalysisRunner: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest)
        -> Result<AnalysisOutcome, AnalysisToolError>;
}
