//! Alert diff engine.
//!
//! Compares the alerts of two rule documents and produces one record per
//! alert name that differs, plus renderers for those records.
//!
//! ## Entry point
//!
//! ```
//! use rulediff_core::diagnostics::NullSink;
//! use rulediff_core::diff::{diff_documents, render_human_summary};
//! use rulediff_core::model::{Rule, RuleDocument, RuleGroup};
//!
//! let a = RuleDocument::from_groups(vec![RuleGroup::new("g", vec![Rule::alerting("X", "a > 1")])]);
//! let b = RuleDocument::from_groups(vec![RuleGroup::new("g", vec![Rule::alerting("X", "a  >  1")])]);
//! let diffs = diff_documents(&a, &b, &NullSink);
//! assert!(diffs.is_empty());
//! assert!(render_human_summary(&diffs).contains("No diffs found"));
//! ```
//!
//! ## Guarantees
//!
//! - **Exclusivity**: each alert name appears in at most one record.
//! - **Whitespace insensitivity**: reformatted expressions are not differences.
//! - **Determinism**: identical inputs produce identical record order.

pub mod engine;
pub mod human_summary;
pub mod json_report;
pub mod model;

pub use engine::{compute_diff, diff_documents, mismatched_expression_indices, unique_diffs};
pub use human_summary::render_human_summary;
pub use json_report::render_json_report;
pub use model::{DiffReason, DiffRecord};
