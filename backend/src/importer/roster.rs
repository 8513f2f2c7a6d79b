//! Roster importer
//!
//! Turns raw comma-separated text into validated [`RosterRecord`]s. The
//! importer is pure: no I/O, no logging, no shared state. Every problem is
//! reported through [`ImportOutcome`], and any row error voids the batch.

use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::models::{
    EnrollmentStatus, ImportOutcome, RosterRecord, RosterSnapshot, RowError,
};
use crate::parser::{normalize_header, split_fields, split_lines};
use crate::validation::{has_required_fields, is_valid_email, missing_required_headers};

pub const MSG_NO_DATA_ROWS: &str = "CSV must contain a header row and at least one data row";
pub const MSG_COLUMN_COUNT: &str = "Column count mismatch";
pub const MSG_MISSING_FIELDS: &str = "Missing required fields (name or email)";
pub const MSG_INVALID_EMAIL: &str = "Invalid email format";

// =============================================================================
// Clock
// =============================================================================

/// Source of the enrollment timestamp.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// =============================================================================
// Header layout
// =============================================================================

/// A header the importer maps onto a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosterColumn {
    Name,
    Email,
    Phone,
    RollNumber,
    StudentId,
}

impl RosterColumn {
    /// Match a normalized (lower-cased) header.
    pub fn from_header(header: &str) -> Option<Self> {
        match header {
            "name" => Some(Self::Name),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "rollnumber" => Some(Self::RollNumber),
            "studentid" => Some(Self::StudentId),
            _ => None,
        }
    }

    /// Record field name.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::RollNumber => "rollNumber",
            Self::StudentId => "studentId",
        }
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone)]
struct HeaderLayout {
    width: usize,
    positions: HashMap<RosterColumn, usize>,
}

impl HeaderLayout {
    /// Resolve the header row, appending header warnings.
    fn resolve(headers: &[String], warnings: &mut Vec<String>) -> Self {
        let mut positions = HashMap::new();
        let mut unrecognized = Vec::new();

        for (idx, header) in headers.iter().enumerate() {
            match RosterColumn::from_header(header) {
                Some(column) => {
                    if positions.contains_key(&column) {
                        warnings.push(format!(
                            "Duplicate column '{}' ignored (column {})",
                            column.field_name(),
                            idx + 1
                        ));
                    } else {
                        positions.insert(column, idx);
                    }
                }
                None if header.is_empty() => {
                    unrecognized.push(format!("(blank column {})", idx + 1))
                }
                None => unrecognized.push(header.clone()),
            }
        }

        if !unrecognized.is_empty() {
            warnings.push(format!(
                "Unrecognized columns ignored: {}",
                unrecognized.join(", ")
            ));
        }

        Self {
            width: headers.len(),
            positions,
        }
    }

    fn value<'a>(&self, fields: &'a [String], column: RosterColumn) -> Option<&'a str> {
        self.positions
            .get(&column)
            .and_then(|&idx| fields.get(idx))
            .map(String::as_str)
    }

    fn optional(&self, fields: &[String], column: RosterColumn) -> Option<String> {
        self.value(fields, column)
            .filter(|v| !v.is_empty())
            .map(String::from)
    }
}

// =============================================================================
// Importer
// =============================================================================

/// Parses roster text into an [`ImportOutcome`].
#[derive(Debug, Clone, Default)]
pub struct RosterImporter<C = SystemClock> {
    clock: C,
}

impl RosterImporter<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> RosterImporter<C> {
    /// Importer stamping records with the given clock.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Parse a roster.
    pub fn parse(&self, raw: &str) -> ImportOutcome {
        self.run(raw, None)
    }

    /// Parse a roster and warn about students already in `snapshot`.
    pub fn parse_against(&self, raw: &str, snapshot: &RosterSnapshot) -> ImportOutcome {
        self.run(raw, Some(snapshot))
    }

    fn run(&self, raw: &str, snapshot: Option<&RosterSnapshot>) -> ImportOutcome {
        let lines = split_lines(raw);
        let mut warnings = Vec::new();

        let (header_line, data_lines) = match lines.split_first() {
            Some((header, rest)) if !rest.is_empty() => (*header, rest),
            _ => return ImportOutcome::structural(MSG_NO_DATA_ROWS, warnings),
        };

        let headers: Vec<String> = split_fields(header_line)
            .iter()
            .map(|h| normalize_header(h))
            .collect();
        let layout = HeaderLayout::resolve(&headers, &mut warnings);

        let missing = missing_required_headers(&headers);
        if !missing.is_empty() {
            return ImportOutcome::structural(
                format!("Missing required headers: {}", missing.join(", ")),
                warnings,
            );
        }

        let enrolled_at = self.clock.now();
        let mut records = Vec::new();
        let mut errors = Vec::new();
        let mut first_seen: HashMap<String, usize> = HashMap::new();

        for (idx, line) in data_lines.iter().enumerate() {
            let row_number = idx + 2;
            match map_row(&layout, line, enrolled_at) {
                Ok(record) => {
                    let key = record.email.to_lowercase();
                    if let Some(first) = first_seen.get(&key) {
                        warnings.push(format!(
                            "Row {}: duplicate email {} (first seen on row {})",
                            row_number, record.email, first
                        ));
                    } else {
                        first_seen.insert(key, row_number);
                    }
                    if let Some(snapshot) = snapshot {
                        check_snapshot(snapshot, &record, row_number, &mut warnings);
                    }
                    records.push(record);
                }
                Err(message) => errors.push(RowError::new(row_number, message)),
            }
        }

        if !errors.is_empty() {
            records.clear();
        }

        ImportOutcome {
            records,
            errors,
            warnings,
        }
    }
}

/// Parse a roster with the system clock.
pub fn parse_roster(raw: &str) -> ImportOutcome {
    RosterImporter::new().parse(raw)
}

fn map_row(
    layout: &HeaderLayout,
    line: &str,
    enrolled_at: DateTime<Utc>,
) -> Result<RosterRecord, &'static str> {
    let fields = split_fields(line);
    if fields.len() != layout.width {
        return Err(MSG_COLUMN_COUNT);
    }

    let name = layout.value(&fields, RosterColumn::Name).unwrap_or("");
    let email = layout.value(&fields, RosterColumn::Email).unwrap_or("");
    if !has_required_fields(name, email) {
        return Err(MSG_MISSING_FIELDS);
    }
    if !is_valid_email(email) {
        return Err(MSG_INVALID_EMAIL);
    }

    Ok(RosterRecord {
        name: name.to_string(),
        email: email.to_string(),
        phone: layout.optional(&fields, RosterColumn::Phone),
        roll_number: layout.optional(&fields, RosterColumn::RollNumber),
        student_id: layout.optional(&fields, RosterColumn::StudentId),
        enrollment_timestamp: enrolled_at,
        status: EnrollmentStatus::Active,
    })
}

fn check_snapshot(
    snapshot: &RosterSnapshot,
    record: &RosterRecord,
    row_number: usize,
    warnings: &mut Vec<String>,
) {
    if snapshot.contains_email(&record.email) {
        warnings.push(format!(
            "Row {}: {} is already enrolled",
            row_number, record.email
        ));
    }
    if let Some(ref student_id) = record.student_id {
        if snapshot.contains_student_id(student_id) {
            warnings.push(format!(
                "Row {}: student id {} is already enrolled",
                row_number, student_id
            ));
        }
    }
}
