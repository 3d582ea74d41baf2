//! easyvmaf-s3: run easyVMAF on two objects in S3 and publish the report.
//!
//! The binary wires environment configuration, storage and the easyVMAF
//! runner into a [`pipeline::Pipeline`]; everything it needs is exposed here
//! so the pipeline can be driven with other backends in tests.

pub mod cli;
pub mod pipeline;

pub use cli::Cli;
pub use pipeline::{Pipeline, PipelineConfig, PipelineError, PipelineOutput, PipelineState};

/// Initialize tracing for CLI binaries.
///
/// `RUST_LOG` controls filtering (default `info`); `LOG_FORMAT=json` switches
/// to JSON lines.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
