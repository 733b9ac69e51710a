//! Rule file parser
//!
//! Decodes raw bytes as YAML first and JSON second, resolves the group
//! layout and annotates expressions with their source lines.

use crate::document::format::RuleFile;
use crate::errors::{Result, RuleDiffError};
use crate::model::scalar::json_scalars_as_text;
use crate::model::{RuleDocument, SourceEncoding};
use serde::Deserialize;
use std::path::Path;

/// Origin reported for documents parsed from bytes without a file
pub const INLINE_ORIGIN: &str = "<inline>";

/// Parse a rule document from bytes
pub fn parse_document(bytes: &[u8]) -> Result<RuleDocument> {
    parse_document_at(bytes, Path::new(INLINE_ORIGIN))
}

/// Parse a rule document from bytes read from `origin`
///
/// `origin` only names the input in errors; the returned document has no
/// source until the loader stamps one.
///
/// # Errors
///
/// - `CorruptedDocument` when the bytes decode as neither YAML nor JSON
/// - `MalformedDocument` when both `spec.groups` and root `groups` are populated
pub fn parse_document_at(bytes: &[u8], origin: &Path) -> Result<RuleDocument> {
    let (file, encoding) = decode(bytes).ok_or_else(|| RuleDiffError::CorruptedDocument {
        path: origin.to_path_buf(),
    })?;

    let mut document = RuleDocument::try_from(file)
        .map_err(|conflict| {
            tracing::debug!(
                op = "parse_document",
                origin = %origin.display(),
                %conflict,
                "conflicting group layouts"
            );
            RuleDiffError::MalformedDocument {
                path: origin.to_path_buf(),
            }
        })?
        .with_encoding(encoding);

    if encoding == SourceEncoding::Yaml {
        annotate_expression_lines(&mut document, bytes);
    }

    Ok(document)
}

fn decode(bytes: &[u8]) -> Option<(RuleFile, SourceEncoding)> {
    match decode_yaml(bytes) {
        Ok(file) => return Some((file, SourceEncoding::Yaml)),
        Err(err) => tracing::debug!(op = "parse_document", error = %err, "not yaml"),
    }

    match decode_json(bytes) {
        Ok(file) => Some((file, SourceEncoding::Json)),
        Err(err) => {
            tracing::debug!(op = "parse_document", error = %err, "not json");
            None
        }
    }
}

/// Numbers and booleans are turned into their literal text before the rule
/// model reads the tree.
fn decode_json(bytes: &[u8]) -> std::result::Result<RuleFile, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;
    Ok(serde_json::from_value::<Option<RuleFile>>(json_scalars_as_text(value))?.unwrap_or_default())
}

/// First document of the stream; an empty stream reads as an empty file.
fn decode_yaml(bytes: &[u8]) -> std::result::Result<RuleFile, serde_yaml::Error> {
    match serde_yaml::Deserializer::from_slice(bytes).next() {
        Some(first) => Ok(Option::<RuleFile>::deserialize(first)?.unwrap_or_default()),
        None => Ok(RuleFile::default()),
    }
}

/// Assign `expr` key lines to expressions in document order.
///
/// Lines are only assigned when the text holds exactly one rule-level `expr`
/// key per parsed rule; anything else leaves every line unknown.
fn annotate_expression_lines(document: &mut RuleDocument, bytes: &[u8]) {
    let text = String::from_utf8_lossy(bytes);
    let lines = expression_key_lines(&text).unwrap_or_default();
    if lines.len() != document.rule_count() {
        tracing::debug!(
            op = "parse_document",
            expr_keys = lines.len(),
            rule_count = document.rule_count(),
            "expression lines unavailable"
        );
        return;
    }

    for (expr, line) in document.expressions_mut().zip(lines) {
        expr.set_line(line);
    }
}

const EXPR_KEYS: [&str; 3] = ["expr:", "\"expr\":", "'expr':"];

/// 1-based lines of rule-level `expr` keys within the first YAML document.
///
/// A key counts when it opens its line and sits at the key column of the
/// innermost open sequence item, so `expr` keys nested under `labels` or
/// inside block scalars are skipped. Text without block sequences (JSON)
/// counts every leading `expr` key. `None` when an `expr` key appears
/// after other content on a line, as in flow-style rules.
pub(crate) fn expression_key_lines(text: &str) -> Option<Vec<usize>> {
    let mut lines = Vec::new();
    // Key columns of the open block sequence items, outermost first
    let mut items: Vec<usize> = Vec::new();
    // Indentation of the line that opened the current block scalar
    let mut block_scalar: Option<usize> = None;
    let mut seen_content = false;

    for (idx, raw) in text.lines().enumerate() {
        let marker = raw.trim_end();
        if marker == "..." || (marker == "---" && seen_content) {
            break;
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() || marker == "---" {
            continue;
        }

        let content = raw.trim_start();
        let indent = raw.len() - content.len();
        match block_scalar {
            Some(opener) if indent > opener => continue,
            _ => block_scalar = None,
        }
        if trimmed.starts_with('#') {
            continue;
        }
        seen_content = true;

        while items.last().is_some_and(|&column| column > indent) {
            items.pop();
        }

        let mut key = content;
        let mut key_column = indent;
        if let Some(rest) = content.strip_prefix("- ") {
            key = rest.trim_start();
            key_column = indent + (content.len() - key.len());
            items.push(key_column);
        }

        // Block content is indented past the key that opened it
        if opens_block_scalar(key) {
            block_scalar = Some(key_column);
        }

        let leading = EXPR_KEYS.iter().find(|k| key.starts_with(**k));
        let remainder = &key[leading.map_or(0, |k| k.len())..];
        if has_inline_expr_key(remainder) {
            return None;
        }

        let at_item_level = items.last().map_or(true, |&column| column == key_column);
        if leading.is_some() && at_item_level {
            lines.push(idx + 1);
        }
    }

    Some(lines)
}

/// `key: |`, `key: >-` and the like
fn opens_block_scalar(line: &str) -> bool {
    let line = line.trim_end();
    let Some((_, value)) = line.rsplit_once(": ") else {
        return false;
    };
    let mut chars = value.chars();
    matches!(chars.next(), Some('|' | '>'))
        && chars.all(|c| c == '-' || c == '+' || c.is_ascii_digit())
}

/// An `expr` key following a flow-mapping opener or separator
fn has_inline_expr_key(text: &str) -> bool {
    EXPR_KEYS.iter().any(|key| {
        text.match_indices(key).any(|(pos, _)| {
            text[..pos]
                .trim_end()
                .chars()
                .last()
                .is_some_and(|c| c == '{' || c == ',')
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expression_key_lines() {
        let text = "groups:\n- name: g\n  rules:\n  - alert: A\n    expr: up == 0\n  - expr: x\n    record: r\n";
        assert_eq!(expression_key_lines(text), Some(vec![5, 6]));
    }

    #[test]
    fn test_expression_key_lines_stop_at_second_document() {
        let text = "---\ngroups:\n- rules:\n  - expr: a\n---\ngroups:\n- rules:\n  - expr: b\n";
        assert_eq!(expression_key_lines(text), Some(vec![4]));
    }

    #[test]
    fn test_expression_key_lines_quoted_keys() {
        let text = "{\n \"groups\": [{\"rules\": [\n  {\"alert\": \"A\",\n   \"expr\": \"up\"}]}]\n}\n";
        assert_eq!(expression_key_lines(text), Some(vec![4]));
    }

    #[test]
    fn test_expression_key_lines_skip_nested_keys() {
        let text = "groups:\n- name: g\n  rules:\n  - alert: A\n    labels:\n      expr: label\n    expr: up\n  - alert: B\n    annotations:\n      description: |\n        - expr: quoted\n    expr: down\n";
        assert_eq!(expression_key_lines(text), Some(vec![7, 12]));
    }

    #[test]
    fn test_expression_key_lines_give_up_on_flow_rules() {
        let text = "groups:\n- name: g\n  rules:\n  - {alert: A, expr: x}\n  - alert: B\n    expr: y\n";
        assert_eq!(expression_key_lines(text), None);
    }

    #[test]
    fn test_block_expression_does_not_hide_sibling_keys() {
        let text = "groups:\n- name: g\n  rules:\n  - alert: A\n    expr: |\n      up\n        == 0\n    for: 5m\n  - alert: B\n    expr: down\n";
        assert_eq!(expression_key_lines(text), Some(vec![5, 10]));
    }

    #[test]
    fn test_block_scalar_openers() {
        assert!(opens_block_scalar("description: |"));
        assert!(opens_block_scalar("expr: >-"));
        assert!(opens_block_scalar("summary: |2+"));
        assert!(!opens_block_scalar("expr: a > b"));
        assert!(!opens_block_scalar("expr: up"));
    }

    #[test]
    fn test_inline_expr_key_detection() {
        assert!(has_inline_expr_key("{alert: A, expr: x}"));
        assert!(has_inline_expr_key("{\"expr\": \"up\"}"));
        assert!(!has_inline_expr_key(" sum(job_expr:rate5m) > 1"));
    }

    #[test]
    fn test_empty_input_is_empty_document() {
        let doc = parse_document(b"").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_corrupted_input_names_inline_origin() {
        let err = parse_document(b"groups: [unterminated").unwrap_err();
        assert_eq!(
            err,
            RuleDiffError::CorruptedDocument {
                path: INLINE_ORIGIN.into()
            }
        );
    }
}
