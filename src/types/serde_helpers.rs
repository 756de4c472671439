//! Custom serde deserializers for flexible type handling
//!
//! The Classic API is not consistent about scalar types: a computer ID is a
//! number in some payloads and a quoted string in others.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, de};

/// Deserialize an identifier that can be:
/// - Non-negative integer: `42`
/// - String of ASCII digits: `"42"` (surrounding whitespace is trimmed)
///
/// Anything else (negative numbers, floats, empty or non-numeric strings)
/// is rejected.
pub fn deserialize_flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlexibleId {
        Int(u64),
        String(String),
    }

    match FlexibleId::deserialize(deserializer)? {
        FlexibleId::Int(i) => Ok(i.to_string()),
        FlexibleId::String(s) => {
            let trimmed = s.trim();
            if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
                Ok(trimmed.to_string())
            } else {
                Err(de::Error::custom(format!("invalid numeric id: {:?}", s)))
            }
        }
    }
}

/// Deserialize a plain string into a [`SecretString`]
pub fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(SecretString::from(value))
}

/// Parse a flexible boolean string: `"0"`, `"1"`, `"false"`, `"true"`
/// (case-insensitive). Strings like "yes"/"no" are NOT accepted.
pub fn parse_flexible_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestStruct {
        #[serde(deserialize_with = "deserialize_flexible_id")]
        id: String,
    }

    #[test]
    fn test_deserialize_id_from_string() {
        let result: TestStruct = serde_json::from_value(json!({"id": "42"})).unwrap();
        assert_eq!(result.id, "42");
    }

    #[test]
    fn test_deserialize_id_from_int() {
        let result: TestStruct = serde_json::from_value(json!({"id": 42})).unwrap();
        assert_eq!(result.id, "42");
    }

    #[test]
    fn test_deserialize_id_trims_whitespace() {
        let result: TestStruct = serde_json::from_value(json!({"id": " 7 "})).unwrap();
        assert_eq!(result.id, "7");
    }

    #[test]
    fn test_deserialize_id_rejects_non_numeric() {
        let result: Result<TestStruct, _> = serde_json::from_value(json!({"id": "abc"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_id_rejects_empty() {
        let result: Result<TestStruct, _> = serde_json::from_value(json!({"id": ""}));
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_id_rejects_negative() {
        let result: Result<TestStruct, _> = serde_json::from_value(json!({"id": -1}));
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_secret() {
        #[derive(Deserialize)]
        struct Creds {
            #[serde(deserialize_with = "deserialize_secret")]
            password: SecretString,
        }

        let creds: Creds = serde_json::from_value(json!({"password": "hunter2"})).unwrap();
        assert_eq!(creds.password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_parse_flexible_bool() {
        assert_eq!(parse_flexible_bool("true"), Some(true));
        assert_eq!(parse_flexible_bool("TRUE"), Some(true));
        assert_eq!(parse_flexible_bool("1"), Some(true));
        assert_eq!(parse_flexible_bool(" false "), Some(false));
        assert_eq!(parse_flexible_bool("0"), Some(false));
        assert_eq!(parse_flexible_bool("yes"), None);
        assert_eq!(parse_flexible_bool(""), None);
    }
}
