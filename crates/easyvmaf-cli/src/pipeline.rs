//! The fetch → analyze → publish pipeline
//!
//! `Start → Parsed → Fetched → Analyzed → Published → Done`, with any stage
//! moving to `Failed` on error. Stages run one after another and none is
//! re-entered; nothing is retried.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use easyvmaf_core::constants::{DISTORTED_FILE_NAME, REFERENCE_FILE_NAME};
use easyvmaf_core::{AnalysisRequest, ErrorMetadata, LocatorParseError, LogLevel, StorageLocator};
use easyvmaf_processing::{
    report_path, verify_outcome, AnalysisRunner, AnalysisToolError, ExitStatusPolicy,
    LocalFileGuard, ReportSummary,
};
use easyvmaf_storage::{Storage, StorageError};
use serde::Serialize;

use crate::cli::Cli;

/// Everything a run needs; built once and passed to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub reference_input: String,
    pub distorted_input: String,
    pub output: String,
    pub use_phone_model: bool,
    pub model: Option<String>,
    pub work_dir: PathBuf,
    pub exit_status_policy: ExitStatusPolicy,
    pub keep_files: bool,
}

impl PipelineConfig {
    pub fn new(
        reference_input: impl Into<String>,
        distorted_input: impl Into<String>,
        output: impl Into<String>,
        work_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            reference_input: reference_input.into(),
            distorted_input: distorted_input.into(),
            output: output.into(),
            use_phone_model: false,
            model: None,
            work_dir: work_dir.into(),
            exit_status_policy: ExitStatusPolicy::Strict,
            keep_files: false,
        }
    }

    pub fn reference_path(&self) -> PathBuf {
        self.work_dir.join(REFERENCE_FILE_NAME)
    }

    pub fn distorted_path(&self) -> PathBuf {
        self.work_dir.join(DISTORTED_FILE_NAME)
    }
}

impl From<Cli> for PipelineConfig {
    fn from(cli: Cli) -> Self {
        Self {
            reference_input: cli.reference_input,
            distorted_input: cli.distorted_input,
            output: cli.output,
            use_phone_model: cli.phone,
            model: cli.model,
            work_dir: cli.work_dir,
            exit_status_policy: if cli.ignore_exit_status {
                ExitStatusPolicy::Permissive
            } else {
                ExitStatusPolicy::Strict
            },
            keep_files: cli.keep_files,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
    Start,
    Parsed,
    Fetched,
    Analyzed,
    Published,
    Done,
    Failed,
}

impl Display for PipelineState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            PipelineState::Start => "start",
            PipelineState::Parsed => "parsed",
            PipelineState::Fetched => "fetched",
            PipelineState::Analyzed => "analyzed",
            PipelineState::Published => "published",
            PipelineState::Done => "done",
            PipelineState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Invalid locator: {0}")]
    Locator(#[from] LocatorParseError),

    #[error("Failed to prepare working directory {}: {source}", .path.display())]
    WorkDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Pipeline already ran (state: {0})")]
    AlreadyRan(PipelineState),

    #[error("Failed to fetch {locator}: {source}")]
    Fetch {
        locator: StorageLocator,
        #[source]
        source: StorageError,
    },

    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisToolError),

    #[error("Failed to publish report to {locator}: {source}")]
    Publish {
        locator: StorageLocator,
        #[source]
        source: StorageError,
    },
}

impl ErrorMetadata for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            PipelineError::Locator(e) => e.error_code(),
            PipelineError::WorkDir { .. } => "WORK_DIR_UNAVAILABLE",
            PipelineError::AlreadyRan(_) => "PIPELINE_ALREADY_RAN",
            PipelineError::Fetch { source, .. } | PipelineError::Publish { source, .. } => {
                source.error_code()
            }
            PipelineError::Analysis(e) => e.error_code(),
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            PipelineError::Locator(e) => e.exit_code(),
            PipelineError::WorkDir { .. } | PipelineError::AlreadyRan(_) => 1,
            PipelineError::Fetch { source, .. } | PipelineError::Publish { source, .. } => {
                source.exit_code()
            }
            PipelineError::Analysis(e) => e.exit_code(),
        }
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Error
    }
}

/// Result of a successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineOutput {
    pub output: StorageLocator,
    pub report: ReportSummary,
}

/// Parsed form of the three locator inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLocators {
    pub reference: StorageLocator,
    pub distorted: StorageLocator,
    pub output: StorageLocator,
}

impl ParsedLocators {
    pub fn parse(config: &PipelineConfig) -> Result<Self, LocatorParseError> {
        Ok(Self {
            reference: StorageLocator::parse(&config.reference_input)?,
            distorted: StorageLocator::parse(&config.distorted_input)?,
            output: StorageLocator::parse(&config.output)?,
        })
    }
}

/// Download `locator` to `local_path`, overwriting it.
pub async fn fetch(
    storage: &dyn Storage,
    locator: &StorageLocator,
    local_path: &Path,
) -> Result<u64, PipelineError> {
    storage
        .download_to_file(locator, local_path)
        .await
        .map_err(|source| PipelineError::Fetch {
            locator: locator.clone(),
            source,
        })
}

/// Upload `local_path` to `locator`, creating or overwriting the object.
pub async fn publish(
    storage: &dyn Storage,
    local_path: &Path,
    locator: &StorageLocator,
) -> Result<u64, PipelineError> {
    storage
        .upload_from_file(local_path, locator)
        .await
        .map_err(|source| PipelineError::Publish {
            locator: locator.clone(),
            source,
        })
}

pub struct Pipeline {
    config: PipelineConfig,
    storage: Arc<dyn Storage>,
    runner: Arc<dyn AnalysisRunner>,
    state: PipelineState,
}

impl Pipeline {
    pub fn new(
        config: PipelineConfig,
        storage: Arc<dyn Storage>,
        runner: Arc<dyn AnalysisRunner>,
    ) -> Self {
        Self {
            config,
            storage,
            runner,
            state: PipelineState::Start,
        }
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Run every stage once. A pipeline is single-use; a second call fails
    /// without touching storage.
    pub async fn run(&mut self) -> Result<PipelineOutput, PipelineError> {
        if self.state != PipelineState::Start {
            return Err(PipelineError::AlreadyRan(self.state));
        }

        match self.execute().await {
            Ok(output) => {
                self.transition(PipelineState::Done);
                Ok(output)
            }
            Err(e) => {
                tracing::debug!(
                    error_code = e.error_code(),
                    failed_after = %self.state,
                    "Pipeline failed"
                );
                self.state = PipelineState::Failed;
                Err(e)
            }
        }
    }

    async fn execute(&mut self) -> Result<PipelineOutput, PipelineError> {
        let locators = ParsedLocators::parse(&self.config)?;
        self.transition(PipelineState::Parsed);

        tokio::fs::create_dir_all(&self.config.work_dir)
            .await
            .map_err(|source| PipelineError::WorkDir {
                path: self.config.work_dir.clone(),
                source,
            })?;

        let mut files = LocalFileGuard::new(self.config.keep_files);
        let reference_path = files.track(self.config.reference_path());
        let distorted_path = files.track(self.config.distorted_path());

        fetch(self.storage.as_ref(), &locators.reference, &reference_path).await?;
        fetch(self.storage.as_ref(), &locators.distorted, &distorted_path).await?;
        self.transition(PipelineState::Fetched);

        files.track(report_path(&distorted_path));
        let request = AnalysisRequest::new(&reference_path, &distorted_path)
            .with_phone_model(self.config.use_phone_model)
            .with_model(self.config.model.clone());

        let outcome = self.runner.analyze(&request).await?;
        let report = verify_outcome(&outcome, self.config.exit_status_policy).await?;
        tracing::info!(
            report = %report.path.display(),
            size_bytes = report.size_bytes,
            vmaf_score = ?report.vmaf_score,
            "Report ready"
        );
        self.transition(PipelineState::Analyzed);

        publish(self.storage.as_ref(), &report.path, &locators.output).await?;
        self.transition(PipelineState::Published);

        Ok(PipelineOutput {
            output: locators.output,
            report,
        })
    }

    fn transition(&mut self, next: PipelineState) {
        tracing::info!(from = %self.state, to = %next, "Pipeline stage complete");
        self.state = next;
    }
}
