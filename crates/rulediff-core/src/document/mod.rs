//! Rule file decoding and loading
//!
//! Turns YAML or JSON rule files into [`RuleDocument`](crate::model::RuleDocument)s.
//! Both the `PrometheusRule` resource shape (`spec.groups`) and the plain
//! rule-file shape (root `groups`) are accepted; a file populating both is
//! rejected.

pub mod format;
pub mod loader;
pub mod parser;

pub use format::{ConflictingLayouts, ObjectMeta, RuleFile, SpecBody};
pub use loader::{load_document, load_pair};
pub use parser::{parse_document, parse_document_at, INLINE_ORIGIN};
