//! The normalized financial record.

use crate::derive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Source label used for records built in memory.
pub const IN_MEMORY_SOURCE: &str = "<memory>";

/// Raw value of a single field as it was read from the source.
///
/// Text is kept as-is; the engine decides whether it coerces to a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A numeric value (may be NaN, which the engine treats as unknown)
    Number(f64),
    /// Unparsed text
    Text(String),
    /// Present in the source but blank
    Empty,
}

impl FieldValue {
    /// Classifies a raw cell: blank becomes `Empty`, anything that parses as a
    /// float becomes `Number`, the rest stays `Text`.
    pub fn from_cell(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::Empty
        } else {
            trimmed
                .parse::<f64>()
                .map_or_else(|_| Self::Text(trimmed.to_string()), Self::Number)
        }
    }

    /// Returns the value as a finite float, coercing text when possible.
    pub fn as_finite(&self) -> Option<f64> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Empty => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Empty, Self::Number)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::Empty => Ok(()),
        }
    }
}

/// A single-period set of financial facts keyed by field name.
///
/// Built once per analysis and never mutated afterwards. An absent key and a
/// non-numeric value both mean "unknown".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    source: String,
    fields: BTreeMap<String, FieldValue>,
}

impl FinancialRecord {
    /// Creates a record from `(name, value)` pairs. Later duplicates win.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs.into_iter().collect()
    }

    /// Sets the label describing where the record came from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Fills in fields that can be worked out from other facts.
    pub(crate) fn with_derived_fields(mut self) -> Self {
        derive::fill_missing(&mut self.fields);
        self
    }

    /// Where the record came from (file name, or `<memory>`).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Raw value for `field`, if the source carried it.
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Whether the source carried `field` at all.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for FinancialRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            source: IN_MEMORY_SOURCE.to_string(),
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", FieldValue::Empty)]
    #[case("   ", FieldValue::Empty)]
    #[case("42", FieldValue::Number(42.0))]
    #[case(" -1.5 ", FieldValue::Number(-1.5))]
    #[case("1e3", FieldValue::Number(1000.0))]
    #[case("n/a", FieldValue::Text("n/a".to_string()))]
    #[case("1,000", FieldValue::Text("1,000".to_string()))]
    fn test_from_cell(#[case] raw: &str, #[case] expected: FieldValue) {
        assert_eq!(FieldValue::from_cell(raw), expected);
    }

    #[rstest]
    #[case(FieldValue::Number(3.5), Some(3.5))]
    #[case(FieldValue::Number(f64::NAN), None)]
    #[case(FieldValue::Number(f64::INFINITY), None)]
    #[case(FieldValue::Text(" 12 ".to_string()), Some(12.0))]
    #[case(FieldValue::Text("abc".to_string()), None)]
    #[case(FieldValue::Text("inf".to_string()), None)]
    #[case(FieldValue::Empty, None)]
    fn test_as_finite(#[case] value: FieldValue, #[case] expected: Option<f64>) {
        assert_eq!(value.as_finite(), expected);
    }

    #[test]
    fn test_record_from_pairs() {
        let record = FinancialRecord::from_pairs([("Revenue", 1000.0), ("COGS", 600.0)]);

        assert_eq!(record.len(), 2);
        assert!(record.contains("Revenue"));
        assert!(!record.contains("EPS"));
        assert_eq!(record.get("COGS"), Some(&FieldValue::Number(600.0)));
        assert_eq!(record.source(), IN_MEMORY_SOURCE);
    }

    #[test]
    fn test_record_with_source() {
        let record = FinancialRecord::from_pairs([("EPS", "10")]).with_source("filing.xml");
        assert_eq!(record.source(), "filing.xml");
        assert_eq!(record.get("EPS"), Some(&FieldValue::Text("10".to_string())));
    }

    #[test]
    fn test_record_iterates_in_name_order() {
        let record = FinancialRecord::from_pairs([("b", 2.0), ("a", 1.0), ("c", 3.0)]);
        let names: Vec<&str> = record.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_field_value_json_shape() {
        let record = FinancialRecord::from_pairs([
            ("EPS", FieldValue::Number(2.5)),
            ("Note", FieldValue::Text("restated".to_string())),
            ("COGS", FieldValue::Empty),
        ]);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["fields"]["EPS"], serde_json::json!(2.5));
        assert_eq!(json["fields"]["Note"], serde_json::json!("restated"));
        assert!(json["fields"]["COGS"].is_null());
    }
}
