//! # Rosterload - student roster validation and import
//!
//! Rosterload turns a comma-separated student roster into validated records
//! ready for enrollment, or into a complete list of what is wrong with it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌────────────────┐     ┌──────────────┐
//! │  CSV bytes  │────▶│   Parser    │────▶│ RosterImporter │────▶│ ImportOutcome│
//! │ (any enc.)  │     │ (decode,    │     │ (headers, rows,│     │ records OR   │
//! │             │     │  split)     │     │  validation)   │     │ errors       │
//! └─────────────┘     └─────────────┘     └────────────────┘     └──────────────┘
//! ```
//!
//! An import is all-or-nothing: one bad row rejects the whole roster, and
//! every bad row is reported in the same pass.
//!
//! ## Quick Start
//!
//! ```rust
//! use rosterload::parse_roster;
//!
//! let outcome = parse_roster("name,email\nJohn Doe,john@example.com");
//! assert!(outcome.is_accepted());
//! assert_eq!(outcome.records[0].name, "John Doe");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types
//! - [`config`] - Environment configuration
//! - [`models`] - Records, outcomes and snapshots
//! - [`parser`] - Decoding and splitting
//! - [`validation`] - Email and required-field rules
//! - [`importer`] - Importer, pipeline, export and template
//! - [`api`] - HTTP API server

// Core modules
pub mod config;
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Validation
pub mod validation;

// Import
pub mod importer;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports - Errors and config
// =============================================================================

pub use config::AppConfig;
pub use error::{ConfigError, ImportError, ImportResult, ServerError, ServerResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    EnrollmentStatus,
    FailureKind,
    ImportOutcome,
    RosterRecord,
    RosterSnapshot,
    RowError,
};

// =============================================================================
// Re-exports - Parsing and validation
// =============================================================================

pub use parser::{decode_auto, decode_content, detect_encoding, split_fields, split_lines};
pub use validation::{is_valid_email, missing_required_headers};

// =============================================================================
// Re-exports - Import
// =============================================================================

pub use importer::{
    import_bytes,
    import_file,
    parse_roster,
    records_to_csv,
    write_records_csv,
    Clock,
    FixedClock,
    ImportOptions,
    ImportReport,
    RosterImporter,
    SourceInfo,
    SystemClock,
    TEMPLATE_CSV,
};

// =============================================================================
// Re-exports - API
// =============================================================================

pub use api::types::{error_response, ImportMetadata, ImportResponse};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
