//! Human-readable (pretty-print) renderer for alert diffs.

use crate::diff::model::{DiffReason, DiffRecord};
use crate::model::Rule;
use std::fmt::Write as _;

const SEPARATOR: &str = "--";

/// Render diff records as the plain-text pretty-print report.
///
/// One block per record, numbered from 1, separated by `--` lines. An empty
/// input renders a single "No diffs found" block.
pub fn render_human_summary(diffs: &[DiffRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{SEPARATOR}");

    if diffs.is_empty() {
        let _ = writeln!(out, "No diffs found");
        let _ = writeln!(out, "{SEPARATOR}");
        return out;
    }

    for (idx, diff) in diffs.iter().enumerate() {
        let _ = writeln!(out, "Alert #{:02}: {}", idx + 1, diff.alert());
        let _ = writeln!(out, "Reasons  :");
        let _ = writeln!(out, "  Reason : {}", diff.reason().name());
        let _ = writeln!(out, "  Message: {}", diff.message());

        match diff.reason() {
            DiffReason::DifferentRuleCount => {
                let _ = writeln!(out, "  Alert File 1 #Rules: {}", diff.first().len());
                let _ = writeln!(out, "  Alert File 2 #Rules: {}", diff.second().len());
            }
            DiffReason::DifferentExpression => {
                for (first, second) in diff.expression_pairs() {
                    let _ = writeln!(out, "  Expression 1: {}", expression_line(first));
                    let _ = writeln!(out, "  Expression 2: {}", expression_line(second));
                }
            }
            DiffReason::AlertOnlyInFirst
            | DiffReason::AlertOnlyInSecond
            | DiffReason::NoDifference => {}
        }
        let _ = writeln!(out, "{SEPARATOR}");
    }

    out
}

fn expression_line(rule: &Rule) -> String {
    match rule.expr.line() {
        Some(line) => format!("{} (line {})", rule.expr.text(), line),
        None => rule.expr.text().to_string(),
    }
}
