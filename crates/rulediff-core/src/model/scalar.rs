//! Lenient scalar decoding shared by the rule model.
//!
//! Rule files written by hand routinely carry `expr: 1` or
//! `severity: 2`. Those scalars are read as the text written in the file:
//! `1.50`, `1e3` and `0x10` stay exactly that, never a re-rendered number.

use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Source text of any scalar.
///
/// Requests a string from the deserializer, which makes the YAML decoder
/// hand over a plain scalar's text before any numeric resolution. The
/// number visits only serve decoders that cannot do that.
struct RawText(String);

impl<'de> Deserialize<'de> for RawText {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(RawTextVisitor).map(RawText)
    }
}

struct RawTextVisitor;

impl<'de> Visitor<'de> for RawTextVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<String, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<String, E> {
        Ok(value.to_string())
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<String, E> {
        Ok(value.to_string())
    }
}

/// Any scalar as text; `null` reads as the empty string.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawText>::deserialize(deserializer)?
        .map(|raw| raw.0)
        .unwrap_or_default())
}

/// Any optional scalar as text.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawText>::deserialize(deserializer)?.map(|raw| raw.0))
}

/// String-keyed map whose values may be any scalar; `null` reads as empty.
pub(crate) fn text_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Option<RawText>>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, v.map(|raw| raw.0).unwrap_or_default()))
        .collect())
}

/// `null` or a missing value reads as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Replace every number and boolean in a JSON tree with its source text.
///
/// JSON decoding cannot hand a number to a string request, so JSON-only
/// input is passed through here before the rule model reads it. With
/// `arbitrary_precision`, a number's text is the literal from the file.
pub(crate) fn json_scalars_as_text(value: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match value {
        Value::Number(n) => Value::String(n.to_string()),
        Value::Bool(b) => Value::String(b.to_string()),
        Value::Array(items) => Value::Array(items.into_iter().map(json_scalars_as_text).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, json_scalars_as_text(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(default, deserialize_with = "text")]
        value: String,
    }

    fn yaml_text(scalar: &str) -> String {
        serde_yaml::from_str::<Holder>(&format!("value: {scalar}\n"))
            .unwrap()
            .value
    }

    #[test]
    fn test_yaml_numbers_keep_source_text() {
        for literal in ["1.50", "1e3", "0x10", "007", "+1", ".5", "true", "2"] {
            assert_eq!(yaml_text(literal), literal);
        }
    }

    #[test]
    fn test_yaml_null_reads_empty() {
        assert_eq!(yaml_text("~"), "");
        assert_eq!(yaml_text(""), "");
    }

    #[test]
    fn test_json_scalars_as_text_keeps_literals() {
        let raw: serde_json::Value =
            serde_json::from_str(r#"{"a": 1.50, "b": [1e3, true], "c": null}"#).unwrap();
        let value = json_scalars_as_text(raw);
        assert_eq!(value["a"], "1.50");
        assert_eq!(value["b"][0], "1e3");
        assert_eq!(value["b"][1], "true");
        assert!(value["c"].is_null());
    }
}
