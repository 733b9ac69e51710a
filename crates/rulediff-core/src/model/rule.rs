//! Rules, rule groups and rule expressions

use crate::model::scalar;
use crate::normalize::{expressions_equivalent, normalize_expression};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// The raw condition text of a rule.
///
/// Compared only through [`Expression::is_equivalent`], which ignores
/// whitespace layout. The source line of the `expr` key is kept for
/// diagnostics and is never part of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    text: String,
    line: Option<usize>,
}

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            line: None,
        }
    }

    /// Attach the 1-based source line of the `expr` key
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Raw text exactly as written in the document
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Source line, when the parser could determine it
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Whitespace-normalized form used for equivalence
    pub fn normalized(&self) -> String {
        normalize_expression(&self.text)
    }

    /// True when both expressions normalize to the same string
    pub fn is_equivalent(&self, other: &Expression) -> bool {
        expressions_equivalent(&self.text, &other.text)
    }

    pub(crate) fn set_line(&mut self, line: usize) {
        self.line = Some(line);
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Expression {
    fn from(text: &str) -> Self {
        Expression::new(text)
    }
}

impl From<String> for Expression {
    fn from(text: String) -> Self {
        Expression::new(text)
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        scalar::text(deserializer).map(Expression::new)
    }
}

/// One alerting or recording rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Recording rule output series
    #[serde(
        default,
        deserialize_with = "scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub record: Option<String>,
    /// Alert name; absent or empty on recording rules
    #[serde(
        default,
        deserialize_with = "scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub alert: Option<String>,
    #[serde(default)]
    pub expr: Expression,
    /// Pending duration (`for:`)
    #[serde(
        default,
        rename = "for",
        deserialize_with = "scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar::text_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub labels: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "scalar::text_map",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub annotations: BTreeMap<String, String>,
}

impl Rule {
    /// Alerting rule with the given name and expression
    pub fn alerting(name: impl Into<String>, expr: impl Into<Expression>) -> Self {
        Self {
            alert: Some(name.into()),
            expr: expr.into(),
            ..Self::default()
        }
    }

    /// Recording rule with the given output series and expression
    pub fn recording(record: impl Into<String>, expr: impl Into<Expression>) -> Self {
        Self {
            record: Some(record.into()),
            expr: expr.into(),
            ..Self::default()
        }
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_annotation(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.annotations.insert(key.into(), value.into());
        self
    }

    /// The alert name, or `None` for recording rules and empty names
    pub fn alert_name(&self) -> Option<&str> {
        self.alert.as_deref().filter(|name| !name.is_empty())
    }
}

/// A named, ordered sequence of rules sharing evaluation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleGroup {
    #[serde(default, deserialize_with = "scalar::text")]
    pub name: String,
    #[serde(
        default,
        deserialize_with = "scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval: Option<String>,
    #[serde(default, deserialize_with = "scalar::null_as_default")]
    pub rules: Vec<Rule>,
    #[serde(
        default,
        deserialize_with = "scalar::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub partial_response_strategy: Option<String>,
}

impl RuleGroup {
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            rules,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_name_filters_empty() {
        assert_eq!(Rule::alerting("HighLoad", "x > 1").alert_name(), Some("HighLoad"));
        assert_eq!(Rule::alerting("", "x > 1").alert_name(), None);
        assert_eq!(Rule::recording("job:x:sum", "sum(x)").alert_name(), None);
    }

    #[test]
    fn test_line_does_not_affect_equivalence() {
        let a = Expression::new("up == 0").with_line(3);
        let b = Expression::new("up  ==\n 0").with_line(40);
        assert!(a.is_equivalent(&b));
        assert_eq!(a.line(), Some(3));
    }

    #[test]
    fn test_expression_serializes_as_plain_text() {
        let rule = Rule::alerting("A", "up == 0").with_duration("5m");
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["expr"], "up == 0");
        assert_eq!(json["for"], "5m");
        assert!(json.get("record").is_none());
    }

    #[test]
    fn test_scalar_fields_read_as_text() {
        let rule: Rule = serde_yaml::from_str(
            "alert: A\nexpr: 1.50\nlabels:\n  severity: 2\n  page: true\n",
        )
        .unwrap();
        assert_eq!(rule.expr.text(), "1.50");
        assert_eq!(rule.labels["severity"], "2");
        assert_eq!(rule.labels["page"], "true");
    }
}
