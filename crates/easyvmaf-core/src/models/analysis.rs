use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One easyVMAF run over a pair of local files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub reference_path: PathBuf,
    pub distorted_path: PathBuf,
    /// Forward `-phone` to the tool
    pub use_phone_model: bool,
    /// Forwarded as `-model <name>`; membership (e.g. `HD`, `4K`) is checked by the tool
    pub model: Option<String>,
}

impl AnalysisRequest {
    pub fn new(reference_path: impl Into<PathBuf>, distorted_path: impl Into<PathBuf>) -> Self {
        Self {
            reference_path: reference_path.into(),
            distorted_path: distorted_path.into(),
            use_phone_model: false,
            model: None,
        }
    }

    pub fn with_phone_model(mut self, use_phone_model: bool) -> Self {
        self.use_phone_model = use_phone_model;
        self
    }

    pub fn with_model(mut self, model: Option<String>) -> Self {
        self.model = model;
        self
    }
}

/// Structured result of a finished tool process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Where the tool is expected to have written its report
    pub report_path: PathBuf,
}

impl AnalysisOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_sets_options() {
        let request = AnalysisRequest::new("reference.mp4", "distorted.mp4")
            .with_phone_model(true)
            .with_model(Some("4K".to_string()));

        assert_eq!(request.reference_path, PathBuf::from("reference.mp4"));
        assert_eq!(request.distorted_path, PathBuf::from("distorted.mp4"));
        assert!(request.use_phone_model);
        assert_eq!(request.model.as_deref(), Some("4K"));
    }

    #[test]
    fn outcome_success_requires_zero_exit() {
        let mut outcome = AnalysisOutcome {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
            report_path: PathBuf::from("distorted_vmaf.json"),
        };
        assert!(outcome.success());

        outcome.exit_code = Some(1);
        assert!(!outcome.success());

        outcome.exit_code = None;
        assert!(!outcome.success());
    }
}
