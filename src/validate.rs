// genestat: Genetic record ingestion, sequence analysis and collection statistics.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use serde_json::Value;

use crate::RawRecord;
use crate::error::ValidationError;

/// Fields every record must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["character_name", "affiliation", "genetic_sequence", "power_level"];

/// The required fields of a [RawRecord] with their types checked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedRecord {
    pub character_name: String,
    pub affiliation: String,
    pub genetic_sequence: String,
    pub power_level: i64,
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn read_text(
    record: &RawRecord,
    field: &'static str,
) -> Result<String, ValidationError> {
    match record.get(field) {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(value.to_string()),
        Some(value) => Err(ValidationError::InvalidField { field, kind: value_kind(value) }),
        None => Err(ValidationError::MissingField(field)),
    }
}

fn read_power_level(
    record: &RawRecord,
) -> Result<i64, ValidationError> {
    let value = record.get("power_level").ok_or(ValidationError::MissingField("power_level"))?;
    let power_level = match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            // Accept 80.0 but not 80.5
            number.as_f64()
                .filter(|x| x.fract() == 0.0 && *x >= i64::MIN as f64 && *x <= i64::MAX as f64)
                .map(|x| x as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    power_level.ok_or_else(|| ValidationError::InvalidPowerLevel(value.to_string()))
}

/// Check that `record` has all [REQUIRED_FIELDS].
///
/// Text fields accept strings, numbers, and booleans. `power_level` accepts
/// an integer or a string holding an integer.
///
/// ## Errors
///
/// Returns [ValidationError::MissingField] for the first absent field in
/// [REQUIRED_FIELDS] order, before any type is checked.
///
pub fn validate(
    record: &RawRecord,
) -> Result<ValidatedRecord, ValidationError> {
    if let Some(missing) = REQUIRED_FIELDS.iter().copied().find(|field| !record.contains_key(*field)) {
        return Err(ValidationError::MissingField(missing))
    }

    Ok(ValidatedRecord {
        character_name: read_text(record, "character_name")?,
        affiliation: read_text(record, "affiliation")?,
        genetic_sequence: read_text(record, "genetic_sequence")?,
        power_level: read_power_level(record)?,
    })
}

// Tests
#[cfg(test)]
mod tests {
    use crate::RawRecord;
    use serde_json::json;

    fn groot() -> RawRecord {
        let mut record = RawRecord::new();
        record.insert("character_name".to_string(), json!("Groot"));
        record.insert("affiliation".to_string(), json!("Guardians"));
        record.insert("genetic_sequence".to_string(), json!("GGCCGGCC"));
        record.insert("power_level".to_string(), json!(80));
        record
    }

    #[test]
    fn validate_complete_record() {
        use super::{validate, ValidatedRecord};

        let got = validate(&groot()).unwrap();
        let expected = ValidatedRecord {
            character_name: "Groot".to_string(),
            affiliation: "Guardians".to_string(),
            genetic_sequence: "GGCCGGCC".to_string(),
            power_level: 80,
        };

        assert_eq!(got, expected);
    }

    #[test]
    fn validate_missing_power_level() {
        use super::validate;
        use crate::error::ValidationError;

        let mut record = groot();
        record.shift_remove("power_level");

        let got = validate(&record).unwrap_err();

        assert_eq!(got, ValidationError::MissingField("power_level"));
    }

    #[test]
    fn validate_reports_first_missing_field() {
        use super::validate;
        use crate::error::ValidationError;

        let mut record = RawRecord::new();
        record.insert("power_level".to_string(), json!("not a number"));

        let got = validate(&record).unwrap_err();

        assert_eq!(got, ValidationError::MissingField("character_name"));
    }

    #[test]
    fn validate_power_level_from_text() {
        use super::validate;

        let mut record = groot();
        record.insert("power_level".to_string(), json!(" 40 "));

        let got = validate(&record).unwrap();

        assert_eq!(got.power_level, 40);
    }

    #[test]
    fn validate_power_level_integral_float() {
        use super::validate;

        let mut record = groot();
        record.insert("power_level".to_string(), json!(40.0));

        let got = validate(&record).unwrap();

        assert_eq!(got.power_level, 40);
    }

    #[test]
    fn validate_rejects_non_integer_power_level() {
        use super::validate;
        use crate::error::ValidationError;

        for value in [json!("forty"), json!(40.5), json!(true), json!(null), json!([40])] {
            let mut record = groot();
            record.insert("power_level".to_string(), value);

            let got = validate(&record).unwrap_err();

            assert!(matches!(got, ValidationError::InvalidPowerLevel(_)));
        }
    }

    #[test]
    fn validate_rejects_nested_text_field() {
        use super::validate;
        use crate::error::ValidationError;

        let mut record = groot();
        record.insert("affiliation".to_string(), json!({"team": "Guardians"}));

        let got = validate(&record).unwrap_err();

        assert_eq!(got, ValidationError::InvalidField { field: "affiliation", kind: "an object" });
    }

    #[test]
    fn validate_stringifies_scalar_text_fields() {
        use super::validate;

        let mut record = groot();
        record.insert("character_name".to_string(), json!(616));

        let got = validate(&record).unwrap();

        assert_eq!(got.character_name, "616");
    }

    #[test]
    fn validate_ignores_extra_fields() {
        use super::validate;

        let mut record = groot();
        record.insert("gc_content".to_string(), json!(12.5));
        record.insert("species".to_string(), json!("Flora colossus"));

        assert!(validate(&record).is_ok());
    }
}
