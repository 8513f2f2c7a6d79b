//! High-level import API: bytes or files in, [`ImportReport`] out.
//!
//! Wraps the pure [`RosterImporter`] with decoding and progress logging.
//!
//! # Example
//!
//! ```rust,ignore
//! use rosterload::importer::{import_file, ImportOptions};
//!
//! let report = import_file("batch-a.csv", &ImportOptions::default())?;
//! if report.outcome.is_accepted() {
//!     println!("{} students ready", report.outcome.records.len());
//! }
//! ```

use serde::Serialize;
use std::path::Path;

use super::roster::RosterImporter;
use crate::api::logs::{log_info, log_success, LogEntry, LogLevel, LOG_BROADCASTER};
use crate::error::ImportResult;
use crate::models::{ImportOutcome, RosterSnapshot};
use crate::parser::{decode_auto, decode_content, split_fields, split_lines};

/// Options for an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Already-enrolled students to warn about.
    pub snapshot: Option<RosterSnapshot>,
    /// Encoding label; detected when absent.
    pub encoding: Option<String>,
}

/// Facts about the input text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub encoding: String,
    /// Non-blank lines, header included.
    pub line_count: usize,
    /// Header cells as written.
    pub columns: Vec<String>,
}

/// Outcome of an import plus source metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub outcome: ImportOutcome,
    pub source: SourceInfo,
}

/// Import a roster file.
pub fn import_file(path: impl AsRef<Path>, options: &ImportOptions) -> ImportResult<ImportReport> {
    let path = path.as_ref();
    log_info(format!("📖 Reading roster file: {}", path.display()));
    let bytes = std::fs::read(path)?;
    import_bytes(&bytes, options)
}

/// Import roster bytes.
pub fn import_bytes(bytes: &[u8], options: &ImportOptions) -> ImportResult<ImportReport> {
    let (text, encoding) = match options.encoding {
        Some(ref label) => (decode_content(bytes, label)?, label.to_lowercase()),
        None => {
            let (text, detected) = decode_auto(bytes)?;
            log_success(format!("Detected encoding: {}", detected));
            (text, detected)
        }
    };

    let lines = split_lines(&text);
    let source = SourceInfo {
        encoding,
        line_count: lines.len(),
        columns: lines.first().map(|h| split_fields(h)).unwrap_or_default(),
    };
    log_success(format!("Read {} lines", source.line_count));
    if !source.columns.is_empty() {
        log_info(format!("📋 Columns: {}", source.columns.join(", ")));
    }

    let importer = RosterImporter::new();
    let outcome = match options.snapshot {
        Some(ref snapshot) => {
            log_info(format!("Checking against {} enrolled students", snapshot.len()));
            importer.parse_against(&text, snapshot)
        }
        None => importer.parse(&text),
    };

    print_outcome(&outcome);

    Ok(ImportReport { outcome, source })
}

/// One-line summary of an outcome. Individual rows are left to the caller.
pub fn outcome_summary(outcome: &ImportOutcome) -> (LogLevel, String) {
    let warnings = match outcome.warnings.len() {
        0 => String::new(),
        n => format!(", {} warning(s)", n),
    };

    if outcome.is_accepted() {
        (
            LogLevel::Success,
            format!("✅ {} students ready to enroll{}", outcome.records.len(), warnings),
        )
    } else {
        (
            LogLevel::Error,
            format!(
                "Roster rejected: {} error(s){}, nothing imported",
                outcome.errors.len(),
                warnings
            ),
        )
    }
}

fn print_outcome(outcome: &ImportOutcome) {
    let (level, message) = outcome_summary(outcome);
    LOG_BROADCASTER.log(LogEntry::new(level, message));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;
    use crate::models::FailureKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_bytes_accepted() {
        let report = import_bytes(
            b"Name,Email,Grade\nJohn,john@example.com,A\n",
            &ImportOptions::default(),
        )
        .unwrap();

        assert!(report.outcome.is_accepted());
        assert_eq!(report.outcome.records.len(), 1);
        assert_eq!(report.source.encoding, "utf-8");
        assert_eq!(report.source.line_count, 2);
        assert_eq!(report.source.columns, vec!["Name", "Email", "Grade"]);
    }

    #[test]
    fn test_import_bytes_explicit_latin1() {
        let mut bytes = b"name,email\nJos".to_vec();
        bytes.push(0xE9);
        bytes.extend_from_slice(b",jose@example.com");

        let options = ImportOptions {
            encoding: Some("ISO-8859-1".into()),
            ..Default::default()
        };
        let report = import_bytes(&bytes, &options).unwrap();

        assert_eq!(report.source.encoding, "iso-8859-1");
        assert_eq!(report.outcome.records[0].name, "José");
    }

    #[test]
    fn test_import_bytes_invalid_utf8() {
        let options = ImportOptions {
            encoding: Some("utf-8".into()),
            ..Default::default()
        };
        let err = import_bytes(&[0xFF, 0xFE, 0x00, 0x61], &options).unwrap_err();
        assert!(matches!(err, ImportError::Encoding(_)));
    }

    #[test]
    fn test_import_file_with_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "name,email").unwrap();
        writeln!(file, "John,john@example.com").unwrap();

        let existing = crate::importer::parse_roster("name,email\nJohn,john@example.com").records;
        let options = ImportOptions {
            snapshot: Some(RosterSnapshot::from_records(&existing)),
            ..Default::default()
        };
        let report = import_file(file.path(), &options).unwrap();

        assert!(report.outcome.is_accepted());
        assert_eq!(
            report.outcome.warnings,
            vec!["Row 2: john@example.com is already enrolled"]
        );
    }

    #[test]
    fn test_import_file_rejected_roster_is_ok() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "email\njohn@example.com").unwrap();

        let report = import_file(file.path(), &ImportOptions::default()).unwrap();
        assert_eq!(report.outcome.failure_kind(), Some(FailureKind::Structural));
    }

    #[test]
    fn test_summary_accepted() {
        let outcome = crate::importer::parse_roster("name,email,grade\nJohn,john@example.com,A");
        let (level, message) = outcome_summary(&outcome);

        assert_eq!(level, LogLevel::Success);
        assert_eq!(message, "✅ 1 students ready to enroll, 1 warning(s)");
    }

    #[test]
    fn test_summary_rejected_omits_row_details() {
        let outcome =
            crate::importer::parse_roster("name,email,grade\nJohn,bad,A\n,x@y.z,B");
        let (level, message) = outcome_summary(&outcome);

        assert_eq!(level, LogLevel::Error);
        assert_eq!(message, "Roster rejected: 2 error(s), 1 warning(s), nothing imported");
        assert!(!message.contains("Invalid email format"));
        assert!(!message.contains("grade"));
    }

    #[test]
    fn test_import_missing_file() {
        let err = import_file("/definitely/not/here.csv", &ImportOptions::default()).unwrap_err();
        assert!(matches!(err, ImportError::Io(_)));
    }
}
