//! Roster import.
//!
//! - Roster: header resolution, row mapping, all-or-nothing outcome
//! - Pipeline: decoding, snapshot checks and progress logging
//! - Export: accepted records as CSV
//! - Template: the example roster offered for download

pub mod export;
pub mod pipeline;
pub mod roster;
pub mod template;

pub use export::{records_to_csv, write_records_csv};
pub use pipeline::{
    import_bytes, import_file, outcome_summary, ImportOptions, ImportReport, SourceInfo,
};
pub use roster::{parse_roster, Clock, FixedClock, RosterColumn, RosterImporter, SystemClock};
pub use template::{TEMPLATE_CSV, TEMPLATE_FILE_NAME};
