//! Domain models for roster imports.
//!
//! - [`RosterRecord`] - One accepted student row
//! - [`EnrollmentStatus`] - Enrollment state assigned at import
//! - [`RowError`] - A diagnostic tied to an input row
//! - [`ImportOutcome`] - Result of one import attempt
//! - [`FailureKind`] - Structural vs row-level failure
//! - [`RosterSnapshot`] - Already-enrolled students, passed explicitly

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{ImportError, ImportResult};

// =============================================================================
// Roster Record
// =============================================================================

/// Enrollment state of an imported student.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    /// Every record created by an import starts active.
    #[default]
    Active,
}

impl EnrollmentStatus {
    /// Wire name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
        }
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single student accepted from a roster file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterRecord {
    /// Display name, never empty.
    pub name: String,
    /// Contact email, shaped like `local@domain.tld`.
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    /// Assigned by the importer, never read from input.
    pub enrollment_timestamp: DateTime<Utc>,
    #[serde(default)]
    pub status: EnrollmentStatus,
}

// =============================================================================
// Import Outcome
// =============================================================================

/// A diagnostic for one input row.
///
/// Rows are numbered from 1 and the header is row 1, so the first data row
/// is row 2. Structural problems are reported against row 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RowError {
    pub row_number: usize,
    pub message: String,
}

impl RowError {
    pub fn new(row_number: usize, message: impl Into<String>) -> Self {
        Self {
            row_number,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row {}: {}", self.row_number, self.message)
    }
}

/// How an import failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// No data rows, or required headers absent. Nothing was processed.
    Structural,
    /// One or more data rows were rejected.
    RowLevel,
}

/// Result of one import attempt.
///
/// `records` is empty whenever `errors` is not: a single bad row voids the
/// whole batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub records: Vec<RosterRecord>,
    pub errors: Vec<RowError>,
    pub warnings: Vec<String>,
}

impl ImportOutcome {
    /// Outcome carrying a single structural error against the header row.
    pub fn structural(message: impl Into<String>, warnings: Vec<String>) -> Self {
        Self {
            records: Vec::new(),
            errors: vec![RowError::new(1, message)],
            warnings,
        }
    }

    /// Whether the roster was accepted.
    pub fn is_accepted(&self) -> bool {
        self.errors.is_empty()
    }

    /// Classify the failure, if any.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self.errors.as_slice() {
            [] => None,
            [only] if only.row_number <= 1 => Some(FailureKind::Structural),
            _ => Some(FailureKind::RowLevel),
        }
    }
}

// =============================================================================
// Roster Snapshot
// =============================================================================

/// Students already enrolled in the target batch.
///
/// Built once by the caller and handed to the importer; it is never mutated
/// and never cached globally. Emails compare case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    emails: HashSet<String>,
    student_ids: HashSet<String>,
}

impl RosterSnapshot {
    /// Snapshot of the given records.
    pub fn from_records(records: &[RosterRecord]) -> Self {
        Self {
            emails: records.iter().map(|r| r.email.to_lowercase()).collect(),
            student_ids: records
                .iter()
                .filter_map(|r| r.student_id.clone())
                .collect(),
        }
    }

    /// Load a snapshot from a JSON array of records.
    pub fn from_json(json: &str) -> ImportResult<Self> {
        let records: Vec<RosterRecord> =
            serde_json::from_str(json).map_err(|e| ImportError::Snapshot(e.to_string()))?;
        Ok(Self::from_records(&records))
    }

    /// Load a snapshot from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ImportResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn contains_email(&self, email: &str) -> bool {
        self.emails.contains(&email.to_lowercase())
    }

    pub fn contains_student_id(&self, student_id: &str) -> bool {
        self.student_ids.contains(student_id)
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
