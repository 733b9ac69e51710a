//! rulediff core - alert rule document comparison
//!
//! This crate provides the data structures and operations behind `rulediff`,
//! including:
//! - Rule document model and the YAML/JSON document parser
//! - Whitespace-insensitive expression normalization
//! - Per-alert-name rule collection with duplicate diagnostics
//! - Diff classification and report rendering
//! - Error and structured logging facilities

pub mod collect;
pub mod diagnostics;
pub mod diff;
pub mod document;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod normalize;

pub use rulediff_core_types::schema;

// Re-export commonly used types
pub use collect::{collect_alerts, AlertCollection};
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, NullSink, TracingSink};
pub use diff::{compute_diff, diff_documents, DiffReason, DiffRecord};
pub use document::{load_document, load_pair, parse_document};
pub use errors::{ExError, ExErrorKind, Result, RuleDiffError};
pub use model::{Expression, Rule, RuleDocument, RuleGroup};
pub use normalize::{expressions_equivalent, normalize_expression};
