//! Downloadable roster template.

/// Example roster offered to users as a starting point.
pub const TEMPLATE_CSV: &str = "name,email\nJohn Doe,john@example.com\nJane Smith,jane@example.com\n";

/// Suggested file name for the template download.
pub const TEMPLATE_FILE_NAME: &str = "roster-template.csv";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::roster::parse_roster;

    #[test]
    fn test_template_imports_cleanly() {
        let outcome = parse_roster(TEMPLATE_CSV);

        assert!(outcome.errors.is_empty());
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[1].email, "jane@example.com");
    }
}
