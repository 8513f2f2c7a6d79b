//! REST API types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::importer::ImportReport;
use crate::models::{FailureKind, ImportOutcome};

/// Response sent after a roster upload.
///
/// A rejected roster is still a successful response: the outcome carries
/// every diagnostic.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    /// Unique job identifier
    pub job_id: String,

    /// "ready" when the roster can be enrolled, "invalid" otherwise
    pub status: String,

    pub outcome: ImportOutcome,

    pub metadata: ImportMetadata,
}

/// Summary of the upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportMetadata {
    pub file_name: Option<String>,
    pub encoding: String,
    pub line_count: usize,
    pub columns: Vec<String>,
    pub record_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub failure_kind: Option<FailureKind>,
}

impl ImportResponse {
    pub fn from_report(report: ImportReport, file_name: Option<String>) -> Self {
        let outcome = report.outcome;
        let status = if outcome.is_accepted() { "ready" } else { "invalid" };

        let metadata = ImportMetadata {
            file_name,
            encoding: report.source.encoding,
            line_count: report.source.line_count,
            columns: report.source.columns,
            record_count: outcome.records.len(),
            error_count: outcome.errors.len(),
            warning_count: outcome.warnings.len(),
            failure_kind: outcome.failure_kind(),
        };

        Self {
            job_id: Uuid::new_v4().to_string(),
            status: status.to_string(),
            outcome,
            metadata,
        }
    }
}

impl From<ImportReport> for ImportResponse {
    fn from(report: ImportReport) -> Self {
        Self::from_report(report, None)
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "outcome": {
            "records": [],
            "errors": [],
            "warnings": []
        }
    })
}
