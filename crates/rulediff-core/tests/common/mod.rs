use rulediff_core::diagnostics::NullSink;
use rulediff_core::{collect_alerts, parse_document, AlertCollection, Rule, RuleDocument, RuleGroup};

/// Wrapped (`spec.groups`) resource with two node alerts and a recording rule
#[allow(dead_code)]
pub const WRAPPED_YAML: &str = r#"apiVersion: monitoring.coreos.com/v1
kind: PrometheusRule
metadata:
  name: node-rules
spec:
  groups:
  - name: node
    interval: 30s
    rules:
    - record: job:up:sum
      expr: sum by (job) (up)
    - alert: NodeDown
      expr: up{job="node"} == 0
      for: 5m
      labels:
        severity: critical
    - alert: DiskFull
      expr: node_filesystem_free_bytes < 1e9
      annotations:
        summary: disk almost full
"#;

/// Plain rule file with root-level `groups`
#[allow(dead_code)]
pub const ROOT_LEVEL_YAML: &str = r#"groups:
- name: node
  rules:
  - alert: NodeDown
    expr: |
      up{job="node"}
        == 0
  - alert: HighLoad
    expr: node_load1 > 10
"#;

/// Parse fixture text, panicking on failure
#[allow(dead_code)]
pub fn parse(text: &str) -> RuleDocument {
    parse_document(text.as_bytes()).expect("fixture should parse")
}

/// Single-group document from `(alert, expr)` pairs
#[allow(dead_code)]
pub fn document(rules: &[(&str, &str)]) -> RuleDocument {
    RuleDocument::from_groups(vec![RuleGroup::new(
        "test",
        rules
            .iter()
            .map(|(alert, expr)| Rule::alerting(*alert, *expr))
            .collect(),
    )])
}

/// Collection built from `(alert, expr)` pairs without diagnostics
#[allow(dead_code)]
pub fn collection(rules: &[(&str, &str)]) -> AlertCollection {
    collect_alerts(&document(rules), &NullSink)
}
