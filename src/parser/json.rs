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
use crate::error::MalformedInputError;

/// Parse a JSON document
///
/// Reads a document holding an array of objects. Each object becomes one
/// [RawRecord] with its keys in document order.
///
pub fn read_json(
    content: &str,
) -> Result<Vec<RawRecord>, MalformedInputError> {
    let document: Value = serde_json::from_str(content)?;

    let Value::Array(elements) = document else {
        return Err(MalformedInputError::NotAnArray)
    };

    elements.into_iter().enumerate().map(|(index, element)| {
        match element {
            Value::Object(fields) => Ok(fields.into_iter().collect::<RawRecord>()),
            _ => Err(MalformedInputError::NotAnObject { index }),
        }
    }).collect()
}

/// Parse a single JSON object
///
/// Returns None if `text` is not JSON or is JSON but not an object.
///
pub fn read_json_object(
    text: &str,
) -> Option<RawRecord> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(fields)) => Some(fields.into_iter().collect()),
        _ => None,
    }
}

// Tests
#[cfg(test)]
mod tests {

    #[test]
    fn read_json_array() {
        use super::read_json;
        use serde_json::json;

        let data = r#"[
            {"character_name": "Groot", "affiliation": "Guardians", "genetic_sequence": "GGCC", "power_level": 80},
            {"character_name": "Rocket", "power_level": "40"}
        ]"#;

        let got = read_json(data).unwrap();

        assert_eq!(got.len(), 2);
        assert_eq!(got[0]["character_name"], json!("Groot"));
        assert_eq!(got[0]["power_level"], json!(80));
        assert_eq!(got[1]["power_level"], json!("40"));
    }

    #[test]
    fn read_json_preserves_key_order() {
        use super::read_json;

        let data = r#"[{"zeta": 1, "alpha": 2, "mid": 3}]"#;

        let got = read_json(data).unwrap();
        let keys: Vec<&str> = got[0].keys().map(|x| x.as_str()).collect();

        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn read_json_empty_array() {
        use super::read_json;

        let got = read_json("[]").unwrap();

        assert!(got.is_empty());
    }

    #[test]
    fn read_json_invalid_document() {
        use super::read_json;
        use crate::error::MalformedInputError;

        let got = read_json("[{\"character_name\": ");

        assert!(matches!(got, Err(MalformedInputError::Json(_))));
    }

    #[test]
    fn read_json_not_an_array() {
        use super::read_json;
        use crate::error::MalformedInputError;

        let got = read_json(r#"{"character_name": "Groot"}"#);

        assert!(matches!(got, Err(MalformedInputError::NotAnArray)));
    }

    #[test]
    fn read_json_element_not_an_object() {
        use super::read_json;
        use crate::error::MalformedInputError;

        let got = read_json(r#"[{"character_name": "Groot"}, 42]"#);

        assert!(matches!(got, Err(MalformedInputError::NotAnObject { index: 1 })));
    }

    #[test]
    fn read_json_object_only_accepts_objects() {
        use super::read_json_object;

        assert!(read_json_object(r#"{"a": "b"}"#).is_some());
        assert!(read_json_object(r#"[{"a": "b"}]"#).is_none());
        assert!(read_json_object("42").is_none());
        assert!(read_json_object("a: b").is_none());
    }
}
