use std::path::PathBuf;

use clap::Parser;

/// Command-line arguments of `easyvmaf-s3`
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "easyvmaf-s3",
    about = "Run easyVMAF on files in an S3 bucket",
    version
)]
pub struct Cli {
    /// The s3-url of the reference input. Example: s3://input-bucket/reference.mp4
    #[arg(short = 'r', value_name = "URL")]
    pub reference_input: String,

    /// The s3-url of the distorted input. Example: s3://input-bucket/distorted.mp4
    #[arg(short = 'd', value_name = "URL")]
    pub distorted_input: String,

    /// The s3-url of the output. This file will be created. Example: s3://output-bucket/file_vmaf.json
    #[arg(short = 'o', value_name = "URL")]
    pub output: String,

    /// Whether or not to use the phone model for VMAF analysis
    #[arg(long)]
    pub phone: bool,

    /// The VMAF model to use, e.g. HD or 4K
    #[arg(long)]
    pub model: Option<String>,

    /// Directory the inputs are downloaded to and the report is written in
    #[arg(long, env = "EASYVMAF_WORK_DIR", default_value = ".")]
    pub work_dir: PathBuf,

    /// Publish the report even if easyVMAF exits with a non-zero status
    #[arg(long)]
    pub ignore_exit_status: bool,

    /// Keep the downloaded inputs and the report after the run
    #[arg(long)]
    pub keep_files: bool,
}
