//! easyVMAF runner - executes `python3 easyVmaf.py <reference> <distorted> [...]`

use std::process::Stdio;

use async_trait::async_trait;
use easyvmaf_core::{AnalysisOutcome, AnalysisRequest, ToolConfig};
use tokio::process::Command;

use super::args::{build_args, report_path};
use super::AnalysisRunner;
use crate::error::AnalysisToolError;

/// Validate that a path doesn't contain shell metacharacters
fn validate_tool_path(path: &str) -> Result<(), AnalysisToolError> {
    let dangerous_chars = [';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
    if path.trim().is_empty() || path.chars().any(|c| dangerous_chars.contains(&c)) {
        return Err(AnalysisToolError::InvalidToolPath(path.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct EasyVmafRunner {
    python_path: String,
    easyvmaf_path: String,
}

impl EasyVmafRunner {
    pub fn new(config: &ToolConfig) -> Result<Self, AnalysisToolError> {
        validate_tool_path(&config.python_path)?;
        validate_tool_path(&config.easyvmaf_path)?;

        Ok(Self {
            python_path: config.python_path.clone(),
            easyvmaf_path: config.easyvmaf_path.clone(),
        })
    }
}

#[async_trait]
impl AnalysisRunner for EasyVmafRunner {
    #[tracing::instrument(skip(self, request), fields(
        process.executable.path = %self.python_path,
        easyvmaf.script = %self.easyvmaf_path,
        reference = %request.reference_path.display(),
        distorted = %request.distorted_path.display(),
    ))]
    async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisOutcome, AnalysisToolError> {
        let start = std::time::Instant::now();
        let args = build_args(request);

        tracing::debug!(args = ?args, "Starting easyVMAF");

        let output = Command::new(&self.python_path)
            .arg(&self.easyvmaf_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| AnalysisToolError::Spawn {
                program: self.python_path.clone(),
                source,
            })?;

        let outcome = AnalysisOutcome {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            report_path: report_path(&request.distorted_path),
        };

        tracing::info!(
            exit_code = ?outcome.exit_code,
            duration_ms = start.elapsed().as_millis(),
            "easyVMAF finished"
        );
        tracing::debug!(stdout = %outcome.stdout, stderr = %outcome.stderr, "easyVMAF output");

        Ok(outcome)
    }
}
