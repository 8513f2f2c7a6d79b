//! CSV export of accepted records.

use std::io::Write;

use crate::error::ImportResult;
use crate::models::RosterRecord;

/// Column order of exported rosters.
pub const EXPORT_HEADERS: [&str; 7] = [
    "name",
    "email",
    "phone",
    "rollNumber",
    "studentId",
    "enrollmentTimestamp",
    "status",
];

/// Write records as CSV with a camelCase header row.
pub fn write_records_csv<W: Write>(records: &[RosterRecord], writer: W) -> ImportResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(EXPORT_HEADERS)?;

    for record in records {
        let timestamp = record.enrollment_timestamp.to_rfc3339();
        wtr.write_record([
            record.name.as_str(),
            record.email.as_str(),
            record.phone.as_deref().unwrap_or(""),
            record.roll_number.as_deref().unwrap_or(""),
            record.student_id.as_deref().unwrap_or(""),
            timestamp.as_str(),
            record.status.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render records as a CSV string.
pub fn records_to_csv(records: &[RosterRecord]) -> ImportResult<String> {
    let mut buf = Vec::new();
    write_records_csv(records, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::roster::{FixedClock, RosterImporter};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_export_header_and_rows() {
        let importer = RosterImporter::with_clock(FixedClock(
            Utc.with_ymd_and_hms(2024, 9, 1, 8, 0, 0).unwrap(),
        ));
        let outcome = importer.parse("name,email,phone\nJohn Doe,john@example.com,555-1234");
        let csv = records_to_csv(&outcome.records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "name,email,phone,rollNumber,studentId,enrollmentTimestamp,status"
        );
        assert_eq!(
            lines[1],
            "John Doe,john@example.com,555-1234,,,2024-09-01T08:00:00+00:00,active"
        );
    }

    #[test]
    fn test_export_status_from_record() {
        let records = RosterImporter::new()
            .parse("name,email\nJohn,john@example.com")
            .records;
        let csv = records_to_csv(&records).unwrap();
        let row = csv.lines().nth(1).unwrap();

        assert!(row.ends_with(&format!(",{}", records[0].status)));
    }

    #[test]
    fn test_export_quotes_embedded_commas() {
        let importer = RosterImporter::new();
        let mut records = importer.parse("name,email\nJohn,john@example.com").records;
        records[0].name = "Doe, John".into();

        let csv = records_to_csv(&records).unwrap();
        assert!(csv.contains("\"Doe, John\""));
    }

    #[test]
    fn test_export_empty() {
        let csv = records_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
