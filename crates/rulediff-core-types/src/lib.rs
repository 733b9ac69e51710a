//! Core types shared across rulediff facilities
//!
//! This crate provides foundational types used by the error handling,
//! logging and reporting layers:
//!
//! - **Input sides**: InputSide marks which of the two compared documents
//!   a value belongs to
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod side;

pub use side::InputSide;
