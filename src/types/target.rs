//! Target type definitions
//!
//! Defines how the user names the computer whose key should be retrieved.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use super::serde_helpers::deserialize_flexible_id;

/// Numeric JSS computer ID
///
/// Always a non-empty string of ASCII digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct ComputerId(#[serde(deserialize_with = "deserialize_flexible_id")] String);

impl ComputerId {
    /// Get the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ComputerId {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(crate::Error::config(format!(
                "computer id must be numeric, got {:?}",
                s
            )));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl fmt::Display for ComputerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The computer to retrieve a key for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Look the computer up by name through the REST API
    Name(String),
    /// Use the computer ID directly
    Id(ComputerId),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "computer named {:?}", name),
            Self::Id(id) => write!(f, "computer id {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computer_id_parse() {
        let id: ComputerId = "42".parse().unwrap();
        assert_eq!(id.as_str(), "42");
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_computer_id_rejects_non_numeric() {
        assert!("4a2".parse::<ComputerId>().is_err());
        assert!("".parse::<ComputerId>().is_err());
        assert!("-1".parse::<ComputerId>().is_err());
    }

    #[test]
    fn test_computer_id_deserialize_number_and_string() {
        let from_int: ComputerId = serde_json::from_str("42").unwrap();
        let from_str: ComputerId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_int, from_str);
    }

    #[test]
    fn test_target_display() {
        let by_id = Target::Id("42".parse().unwrap());
        let by_name = Target::Name("mbp-alice".to_string());
        assert_eq!(by_id.to_string(), "computer id 42");
        assert_eq!(by_name.to_string(), "computer named \"mbp-alice\"");
    }
}
