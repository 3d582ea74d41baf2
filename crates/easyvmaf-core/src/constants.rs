//! Fixed names used by the pipeline's local file layout.

/// Local filename the reference input is downloaded to.
pub const REFERENCE_FILE_NAME: &str = "reference.mp4";

/// Local filename the distorted input is downloaded to.
pub const DISTORTED_FILE_NAME: &str = "distorted.mp4";

/// Suffix easyVMAF appends to the distorted file stem when writing its report.
pub const REPORT_SUFFIX: &str = "_vmaf.json";

/// Separator between a locator's scheme and its bucket.
pub const SCHEME_SEPARATOR: &str = "://";

pub const DEFAULT_PYTHON_PATH: &str = "python3";
pub const DEFAULT_EASYVMAF_PATH: &str = "easyVmaf.py";
