//! Rule file loading from disk

use crate::document::parser::parse_document_at;
use crate::errors::{ExError, Result, RuleDiffError};
use crate::model::RuleDocument;
use crate::{log_op_end, log_op_error, log_op_start};
use rulediff_core_types::InputSide;
use std::fs;
use std::path::Path;
use std::time::Instant;

/// Read and parse the rule file at `path`
///
/// The returned document records `path` as its source.
///
/// # Errors
///
/// `Io` when the file cannot be read, otherwise whatever
/// [`parse_document_at`] reports for the file's bytes.
pub fn load_document(path: &Path) -> Result<RuleDocument> {
    let start = Instant::now();
    log_op_start!("load_document", path = %path.display());

    let result = fs::read(path)
        .map_err(|e| RuleDiffError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
        .and_then(|bytes| parse_document_at(&bytes, path))
        .map(|document| document.with_source(path));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(document) => {
            log_op_end!(
                "load_document",
                duration_ms = duration_ms,
                group_count = document.groups().len(),
                rule_count = document.rule_count()
            );
        }
        Err(err) => {
            log_op_error!("load_document", err.clone(), duration_ms = duration_ms);
        }
    }

    result
}

/// Load both inputs of a comparison
///
/// Errors are tagged with the side that failed; the first file is loaded
/// first and a failure there skips the second.
pub fn load_pair(
    first: &Path,
    second: &Path,
) -> std::result::Result<(RuleDocument, RuleDocument), ExError> {
    let load = |path: &Path, side: InputSide| {
        load_document(path).map_err(|err| ExError::from(err).with_side(side))
    };

    Ok((load(first, InputSide::First)?, load(second, InputSide::Second)?))
}
