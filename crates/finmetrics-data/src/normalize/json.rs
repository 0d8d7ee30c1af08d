use crate::error::{DataError, Result};
use crate::record::{FieldValue, FinancialRecord};
use serde_json::Value;

/// Parse a flat JSON object (`{"Revenue": 1000, "EPS": "10"}`) into a record.
pub fn parse_json(text: &str, source: &str) -> Result<FinancialRecord> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(map) = value else {
        return Err(DataError::Parse(
            "JSON source must be an object of field names to values".to_string(),
        ));
    };

    let record = map
        .into_iter()
        .map(|(name, value)| {
            let field = match value {
                Value::Null => FieldValue::Empty,
                Value::Number(n) => n.as_f64().map_or(FieldValue::Empty, FieldValue::Number),
                Value::String(s) => FieldValue::from_cell(&s),
                other => FieldValue::Text(other.to_string()),
            };
            (name, field)
        })
        .collect::<FinancialRecord>()
        .with_source(source)
        .with_derived_fields();

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_object() {
        let text = r#"{"Revenue": 1000, "EPS": "10", "COGS": null, "Note": true}"#;
        let record = parse_json(text, "facts.json").unwrap();

        assert_eq!(record.get("Revenue"), Some(&FieldValue::Number(1000.0)));
        assert_eq!(record.get("EPS"), Some(&FieldValue::Number(10.0)));
        assert_eq!(record.get("COGS"), Some(&FieldValue::Empty));
        assert_eq!(record.get("Note"), Some(&FieldValue::Text("true".to_string())));
    }

    #[test]
    fn test_array_is_rejected() {
        let err = parse_json("[1, 2, 3]", "facts.json").unwrap_err();
        assert!(matches!(err, DataError::Parse(_)));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_json("invalid json", "facts.json").unwrap_err();
        assert!(matches!(err, DataError::Json(_)));
    }
}
