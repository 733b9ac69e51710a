//! Alert diff computation engine.
//!
//! The entry point is [`compute_diff`], which classifies every alert name of
//! two [`AlertCollection`]s. [`diff_documents`] builds the collections first.

use crate::collect::{collect_alerts, AlertCollection};
use crate::diagnostics::DiagnosticSink;
use crate::diff::model::DiffRecord;
use crate::model::{Rule, RuleDocument};
use crate::{log_op_end, log_op_start};
use std::collections::BTreeSet;
use std::time::Instant;

/// Collect both documents and diff the resulting collections.
///
/// Duplicate-alert diagnostics of either document go to `sink`.
pub fn diff_documents(
    first: &RuleDocument,
    second: &RuleDocument,
    sink: &dyn DiagnosticSink,
) -> Vec<DiffRecord> {
    let first_alerts = collect_alerts(first, sink);
    let second_alerts = collect_alerts(second, sink);
    compute_diff(&first_alerts, &second_alerts)
}

/// Classify every alert name of `first` and `second`.
///
/// Records come out grouped by phase: names only in `first`, names only in
/// `second`, then names in both whose rules differ. Within each group the
/// names ascend. Names whose rules match produce no record.
pub fn compute_diff(first: &AlertCollection, second: &AlertCollection) -> Vec<DiffRecord> {
    let start = Instant::now();
    log_op_start!(
        "compute_diff",
        first_alerts = first.len(),
        second_alerts = second.len()
    );

    // Phase 1: names present on one side only
    let mut diffs = unique_diffs(first, second);

    // Phase 2: those names are settled
    let resolved: BTreeSet<&str> = diffs.iter().map(DiffRecord::alert).collect();

    // Phase 3: names present on both sides
    let mut common = Vec::new();
    for (alert, first_rules) in first.iter() {
        if resolved.contains(alert) {
            continue;
        }
        let Some(second_rules) = second.rules(alert) else {
            continue;
        };
        common.extend(compare_common_alert(alert, first_rules, second_rules));
    }
    diffs.extend(common);

    log_op_end!(
        "compute_diff",
        duration_ms = start.elapsed().as_millis() as u64,
        diff_count = diffs.len()
    );
    diffs
}

/// Records for the names present in exactly one collection.
///
/// The two directions are independent read-only traversals and run as two
/// scoped tasks, each owning its output; `first`'s records come first.
pub fn unique_diffs(first: &AlertCollection, second: &AlertCollection) -> Vec<DiffRecord> {
    let (mut only_first, only_second) = std::thread::scope(|scope| {
        let first_task = scope.spawn(|| {
            alerts_missing_from(first, second)
                .map(|(alert, rules)| DiffRecord::only_in_first(alert, rules.to_vec()))
                .collect::<Vec<_>>()
        });
        let second_task = scope.spawn(|| {
            alerts_missing_from(second, first)
                .map(|(alert, rules)| DiffRecord::only_in_second(alert, rules.to_vec()))
                .collect::<Vec<_>>()
        });
        (join_task(first_task), join_task(second_task))
    });
    only_first.extend(only_second);
    only_first
}

fn alerts_missing_from<'a>(
    present: &'a AlertCollection,
    other: &'a AlertCollection,
) -> impl Iterator<Item = (&'a str, &'a [Rule])> {
    present
        .iter()
        .filter(move |(alert, _)| !other.contains(alert))
}

fn join_task<T>(handle: std::thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}

/// Classify one alert name present on both sides.
fn compare_common_alert(alert: &str, first: &[Rule], second: &[Rule]) -> Option<DiffRecord> {
    if first.len() != second.len() {
        return DiffRecord::rule_count(alert, first.to_vec(), second.to_vec());
    }

    // An unmatched rule is paired with the rule at the same index on the
    // other side, not with its closest counterpart.
    let pairs = mismatched_expression_indices(first, second)
        .into_iter()
        .map(|idx| (first[idx].clone(), second[idx].clone()))
        .collect();
    DiffRecord::different_expression(alert, pairs)
}

/// Indices of `first` rules whose expression matches no rule of `second`.
///
/// All-pairs search; per-name lists are tiny.
pub fn mismatched_expression_indices(first: &[Rule], second: &[Rule]) -> Vec<usize> {
    first
        .iter()
        .enumerate()
        .filter(|(_, rule)| !second.iter().any(|other| other.expr.is_equivalent(&rule.expr)))
        .map(|(idx, _)| idx)
        .collect()
}
