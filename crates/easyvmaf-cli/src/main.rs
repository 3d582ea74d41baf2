//! easyvmaf-s3: run easyVMAF on a reference/distorted pair stored in S3.
//!
//! Storage is configured through STORAGE_BACKEND, S3_REGION/AWS_REGION,
//! S3_ENDPOINT and LOCAL_STORAGE_PATH; the tool through EASYVMAF_PYTHON and
//! EASYVMAF_PATH. A `.env` file is honoured.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use easyvmaf_cli::{init_tracing, Cli, Pipeline, PipelineConfig, PipelineError};
use easyvmaf_core::{ErrorMetadata, LogLevel, StorageConfig, ToolConfig};
use easyvmaf_processing::EasyVmafRunner;
use easyvmaf_storage::{create_storage, StorageError};

async fn run(cli: Cli) -> anyhow::Result<()> {
    let storage_config = StorageConfig::from_env().context("Invalid storage configuration")?;
    storage_config
        .validate()
        .context("Invalid storage configuration")?;
    let tool_config = ToolConfig::from_env();

    let storage = create_storage(&storage_config).await?;
    let runner = Arc::new(EasyVmafRunner::new(&tool_config)?);

    tracing::info!(
        storage_backend = %storage.backend_type(),
        reference = %cli.reference_input,
        distorted = %cli.distorted_input,
        output = %cli.output,
        "Starting easyVMAF run"
    );

    let mut pipeline = Pipeline::new(PipelineConfig::from(cli), storage, runner);
    let output = pipeline.run().await?;

    let summary = serde_json::to_string_pretty(&output).context("Serialize run summary")?;
    println!("{}", summary);
    Ok(())
}

/// Exit code and log level for a top-level error
fn classify(err: &anyhow::Error) -> (i32, LogLevel) {
    if let Some(e) = err.downcast_ref::<PipelineError>() {
        return (e.exit_code(), e.log_level());
    }
    if let Some(e) = err.downcast_ref::<StorageError>() {
        return (e.exit_code(), e.log_level());
    }
    if let Some(e) = err.downcast_ref::<easyvmaf_processing::AnalysisToolError>() {
        return (e.exit_code(), e.log_level());
    }
    (1, LogLevel::Error)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let (code, level) = classify(&err);
            match level {
                LogLevel::Debug => tracing::debug!(error = ?err, exit_code = code, "Run aborted"),
                LogLevel::Warn => tracing::warn!(error = ?err, exit_code = code, "Run aborted"),
                LogLevel::Error => tracing::error!(error = ?err, exit_code = code, "Run aborted"),
            }
            eprintln!("Error: {:#}", err);
            ExitCode::from(code as u8)
        }
    }
}
