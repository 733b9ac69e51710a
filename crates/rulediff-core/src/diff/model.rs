//! Diff output types.
//!
//! A [`DiffRecord`] can only be built through its reason-specific
//! constructors, which keep the two rule lists consistent with the reason.

use crate::model::Rule;
use serde::Serialize;

/// Why an alert name differs between the two documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffReason {
    /// Never emitted; kept so every outcome of a comparison has a name
    NoDifference,
    /// Same number of rules, at least one expression without a counterpart
    DifferentExpression,
    AlertOnlyInFirst,
    AlertOnlyInSecond,
    /// The alert name carries a different number of rules on each side
    DifferentRuleCount,
}

impl DiffReason {
    /// Stable display name used in reports
    pub fn name(&self) -> &'static str {
        match self {
            DiffReason::NoDifference => "NoDifference",
            DiffReason::DifferentExpression => "DifferentExpression",
            DiffReason::AlertOnlyInFirst => "AlertOnlyInFirst",
            DiffReason::AlertOnlyInSecond => "AlertOnlyInSecond",
            DiffReason::DifferentRuleCount => "DifferentRuleCount",
        }
    }

    /// Default human-readable message attached to records
    pub fn message(&self) -> &'static str {
        match self {
            DiffReason::NoDifference => "no difference",
            DiffReason::DifferentExpression => "rule expressions don't match",
            DiffReason::AlertOnlyInFirst => "alert only in file 1",
            DiffReason::AlertOnlyInSecond => "alert only in file 2",
            DiffReason::DifferentRuleCount => "number of rules for the alert differs",
        }
    }
}

/// The classified difference for a single alert name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRecord {
    alert: String,
    reason: DiffReason,
    message: String,
    first: Vec<Rule>,
    second: Vec<Rule>,
}

impl DiffRecord {
    fn new(alert: &str, reason: DiffReason, first: Vec<Rule>, second: Vec<Rule>) -> Self {
        Self {
            alert: alert.to_string(),
            reason,
            message: reason.message().to_string(),
            first,
            second,
        }
    }

    /// Alert present only in the first document, with all its rules
    pub fn only_in_first(alert: &str, rules: Vec<Rule>) -> Self {
        Self::new(alert, DiffReason::AlertOnlyInFirst, rules, Vec::new())
    }

    /// Alert present only in the second document, with all its rules
    pub fn only_in_second(alert: &str, rules: Vec<Rule>) -> Self {
        Self::new(alert, DiffReason::AlertOnlyInSecond, Vec::new(), rules)
    }

    /// Both full rule lists; `None` when the counts are in fact equal
    pub fn rule_count(alert: &str, first: Vec<Rule>, second: Vec<Rule>) -> Option<Self> {
        (first.len() != second.len())
            .then(|| Self::new(alert, DiffReason::DifferentRuleCount, first, second))
    }

    /// Rule pairs at matching positions; `None` when there are no pairs
    pub fn different_expression(alert: &str, pairs: Vec<(Rule, Rule)>) -> Option<Self> {
        if pairs.is_empty() {
            return None;
        }
        let (first, second) = pairs.into_iter().unzip();
        Some(Self::new(alert, DiffReason::DifferentExpression, first, second))
    }

    pub fn alert(&self) -> &str {
        &self.alert
    }

    pub fn reason(&self) -> DiffReason {
        self.reason
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Rules from the first document relevant to the reason
    pub fn first(&self) -> &[Rule] {
        &self.first
    }

    /// Rules from the second document relevant to the reason
    pub fn second(&self) -> &[Rule] {
        &self.second
    }

    /// Positional (first, second) pairs of a `DifferentExpression` record
    pub fn expression_pairs(&self) -> impl Iterator<Item = (&Rule, &Rule)> {
        self.first.iter().zip(self.second.iter())
    }
}
