use std::ffi::OsString;
use std::path::{Path, PathBuf};

use easyvmaf_core::constants::REPORT_SUFFIX;
use easyvmaf_core::AnalysisRequest;

/// Argument list for easyVMAF: reference, distorted, then `-phone` and `-model <name>` when requested.
pub fn build_args(request: &AnalysisRequest) -> Vec<OsString> {
    let mut args = vec![
        request.reference_path.as_os_str().to_os_string(),
        request.distorted_path.as_os_str().to_os_string(),
    ];

    if request.use_phone_model {
        args.push(OsString::from("-phone"));
    }
    if let Some(ref model) = request.model {
        args.push(OsString::from("-model"));
        args.push(OsString::from(model));
    }

    args
}

/// Report filename for a distorted input: extension stripped, `_vmaf.json` appended.
pub fn report_file_name(distorted: &Path) -> OsString {
    let mut name = distorted
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    name.push(REPORT_SUFFIX);
    name
}

/// Where easyVMAF writes its report: next to the distorted file.
pub fn report_path(distorted: &Path) -> PathBuf {
    distorted.with_file_name(report_file_name(distorted))
}
