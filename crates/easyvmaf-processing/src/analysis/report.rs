use std::path::PathBuf;

use easyvmaf_core::AnalysisOutcome;
use serde::Serialize;

use crate::error::AnalysisToolError;

/// How a non-zero tool exit is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitStatusPolicy {
    /// Non-zero exit fails the run
    #[default]
    Strict,
    /// Non-zero exit is logged; the run continues if a report was written
    Permissive,
}

/// What was found at the report path after a run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Headline score: pooled harmonic mean, else pooled mean, else legacy `VMAF score`
    pub vmaf_score: Option<f64>,
    pub vmaf_harmonic_mean: Option<f64>,
    pub vmaf_mean: Option<f64>,
}

/// Check a finished run: exit status per `policy`, then the report must exist and be JSON.
pub async fn verify_outcome(
    outcome: &AnalysisOutcome,
    policy: ExitStatusPolicy,
) -> Result<ReportSummary, AnalysisToolError> {
    if !outcome.success() {
        match policy {
            ExitStatusPolicy::Strict => {
                return Err(AnalysisToolError::NonZeroExit {
                    exit_code: outcome.exit_code,
                    stderr: outcome.stderr.trim().to_string(),
                });
            }
            ExitStatusPolicy::Permissive => {
                tracing::warn!(
                    exit_code = ?outcome.exit_code,
                    stderr = %outcome.stderr.trim(),
                    "Analysis tool exited unsuccessfully, continuing"
                );
            }
        }
    }

    let path = outcome.report_path.clone();
    let exists = tokio::fs::try_exists(&path)
        .await
        .map_err(|source| AnalysisToolError::ReportIo {
            path: path.clone(),
            source,
        })?;
    if !exists {
        return Err(AnalysisToolError::MissingReport(path));
    }

    let data = tokio::fs::read(&path)
        .await
        .map_err(|source| AnalysisToolError::ReportIo {
            path: path.clone(),
            source,
        })?;

    let report: serde_json::Value =
        serde_json::from_slice(&data).map_err(|source| AnalysisToolError::InvalidReport {
            path: path.clone(),
            source,
        })?;

    let pooled = &report["pooled_metrics"]["vmaf"];
    let vmaf_harmonic_mean = pooled["harmonic_mean"].as_f64();
    let vmaf_mean = pooled["mean"].as_f64();

    Ok(ReportSummary {
        path,
        size_bytes: data.len() as u64,
        // libvmaf 2.x pools under `pooled_metrics.vmaf`; older reports carry `VMAF score`.
        vmaf_score: vmaf_harmonic_mean
            .or(vmaf_mean)
            .or_else(|| report["VMAF score"].as_f64()),
        vmaf_harmonic_mean,
        vmaf_mean,
    })
}
