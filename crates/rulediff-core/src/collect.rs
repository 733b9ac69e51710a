//! Per-alert-name collection of rules.

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::model::{Rule, RuleDocument};
use std::collections::BTreeMap;

/// Alert name → deduplicated rules declared under that name.
///
/// Names are never empty and every list holds at least one rule. Within a
/// list, rules keep first-seen order. Names iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertCollection {
    alerts: BTreeMap<String, Vec<Rule>>,
}

impl AlertCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn contains(&self, alert: &str) -> bool {
        self.alerts.contains_key(alert)
    }

    /// Rules collected under `alert`
    pub fn rules(&self, alert: &str) -> Option<&[Rule]> {
        self.alerts.get(alert).map(Vec::as_slice)
    }

    /// Alert names in ascending order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.alerts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.alerts
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }
}

/// Builds a collection from prepared lists; empty names and empty lists are
/// dropped so the collection invariants hold. No deduplication is applied.
impl FromIterator<(String, Vec<Rule>)> for AlertCollection {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Rule>)>>(iter: I) -> Self {
        let mut alerts: BTreeMap<String, Vec<Rule>> = BTreeMap::new();
        for (name, rules) in iter {
            if name.is_empty() || rules.is_empty() {
                continue;
            }
            alerts.entry(name).or_default().extend(rules);
        }
        Self { alerts }
    }
}

/// Collect every alerting rule of `document` under its alert name.
///
/// Recording rules (no alert name) are skipped. A rule whose expression is
/// equivalent to one already collected under the same name is dropped; a
/// rule with a new expression is kept and reported to `sink` as a
/// [`Diagnostic::DuplicateAlert`].
pub fn collect_alerts(document: &RuleDocument, sink: &dyn DiagnosticSink) -> AlertCollection {
    let mut alerts: BTreeMap<String, Vec<Rule>> = BTreeMap::new();

    for (group, rule) in document.rules() {
        let Some(name) = rule.alert_name() else {
            continue;
        };

        match alerts.get_mut(name) {
            None => {
                alerts.insert(name.to_string(), vec![rule.clone()]);
            }
            Some(collected) => {
                if collected.iter().any(|c| c.expr.is_equivalent(&rule.expr)) {
                    continue;
                }
                collected.push(rule.clone());
                sink.report(Diagnostic::DuplicateAlert {
                    alert: name.to_string(),
                    group: group.name.clone(),
                    source: document.source().map(|p| p.display().to_string()),
                    line: rule.expr.line(),
                    occurrences: collected.len(),
                });
            }
        }
    }

    tracing::debug!(
        op = "collect_alerts",
        alert_count = alerts.len(),
        rule_count = document.rule_count(),
        "collected alerts"
    );

    AlertCollection { alerts }
}
