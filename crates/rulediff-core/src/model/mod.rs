//! Rule document data model
//!
//! Parsed, in-memory form of a rule file. Values are built by the
//! [`document`](crate::document) parser and treated as read-only afterwards.

pub mod document;
pub mod rule;
pub(crate) mod scalar;

pub use document::{DocumentLayout, RuleDocument, SourceEncoding};
pub use rule::{Expression, Rule, RuleGroup};
