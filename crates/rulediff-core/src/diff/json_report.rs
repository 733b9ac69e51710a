//! Machine-readable renderer for alert diffs.

use crate::diff::model::DiffRecord;
use crate::errors::Result;

/// Render diff records as a pretty-printed JSON array.
///
/// Each element carries `alert`, `reason` (kebab-case), `message`, and the
/// `first` / `second` rule lists.
///
/// # Errors
///
/// `Serialization` if encoding fails.
pub fn render_json_report(diffs: &[DiffRecord]) -> Result<String> {
    let mut rendered = serde_json::to_string_pretty(diffs)?;
    rendered.push('\n');
    Ok(rendered)
}
