use std::path::PathBuf;

use serde::Serialize;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum OperationStatus {
    Succeeded,
    Failed,
    Skipped,
}

impl OperationStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Succeeded => "Succeeded",
            Self::Failed => "Failed",
            Self::Skipped => "Skipped",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OperationResult {
    pub path: PathBuf,
    pub status: OperationStatus,
    pub error: Option<String>,
}

impl OperationResult {
    pub fn success(path: PathBuf) -> Self {
        Self {
            path,
            status: OperationStatus::Succeeded,
            error: None,
        }
    }

    pub fn failure(path: PathBuf, error: impl Into<String>) -> Self {
        Self {
            path,
            status: OperationStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn skipped(path: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            path,
            status: OperationStatus::Skipped,
            error: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Succeeded
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProgressEvent {
    pub current: usize,
    pub total: usize,
    pub filename: String,
    pub success: bool,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OperationSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub cancelled: usize,
}

impl OperationSummary {
    pub fn from_results(expected_total: usize, results: &[OperationResult]) -> Self {
        let count = |status: OperationStatus| results.iter().filter(|r| r.status == status).count();

        Self {
            total: expected_total,
            succeeded: count(OperationStatus::Succeeded),
            failed: count(OperationStatus::Failed),
            skipped: count(OperationStatus::Skipped),
            cancelled: expected_total.saturating_sub(results.len()),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.cancelled == 0
    }
}
