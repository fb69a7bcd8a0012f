//! The policy document and its constant tables.

use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::PolicyError;
use crate::types::statement::plain_string;
use crate::types::statement_or_list::StatementOrList;

/// The literal principal matching all principals.
pub const PRINCIPAL_ALL: &str = "*";

/// Statement effect permitting the described access.
pub const EFFECT_ALLOW: &str = "Allow";

/// Statement effect denying the described access.
pub const EFFECT_DENY: &str = "Deny";

/// The current policy language version.
pub const VERSION_2012_10_17: &str = "2012-10-17";

/// The legacy policy language version.
pub const VERSION_2008_10_17: &str = "2008-10-17";

/// The latest policy language version.
pub const VERSION_LATEST: &str = VERSION_2012_10_17;

/// A policy document.
///
/// No validation is performed on the content, so it is possible to build
/// documents no service would accept; the codec only guarantees that what
/// was decoded re-encodes with the same shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Policy {
    #[serde(rename = "Id", skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(rename = "Statement")]
    pub statements: StatementOrList,

    #[serde(rename = "Version")]
    pub version: String,
}

impl Policy {
    /// Decode a document leniently from JSON bytes. Use
    /// [`Decoder`](crate::Decoder) to reject unknown fields instead.
    pub fn from_json(bytes: &[u8]) -> Result<Self, PolicyError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Policy::from_value(&value, false)
    }

    /// Decode from a generic JSON value, threading the strict flag into
    /// every nested decode.
    pub fn from_value(value: &Value, strict: bool) -> Result<Self, PolicyError> {
        let Value::Object(fields) = value else {
            return Err(PolicyError::InvalidShape(
                "policy document must be a JSON object".to_string(),
            ));
        };
        let mut policy = Policy::default();
        for (key, field) in fields {
            match key.as_str() {
                "Id" => policy.id = plain_string(field, "Id")?,
                "Statement" => policy.statements = StatementOrList::from_value(field, strict)?,
                "Version" => policy.version = plain_string(field, "Version")?,
                _ if strict => return Err(PolicyError::UnknownField(key.clone())),
                _ => {}
            }
        }
        Ok(policy)
    }

    /// Encode as compact JSON.
    pub fn to_json(&self) -> Result<String, PolicyError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, PolicyError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromStr for Policy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Policy::from_json(s.as_bytes())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Policy::from_value(&value, false).map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::statement::Statement;
    use crate::types::string_or_list::StringOrList;

    fn minimal_policy_json() -> &'static str {
        concat!(
            r#"{"Statement":{"Action":"s3:GetObject","Effect":"Allow","#,
            r#""Resource":"arn:aws:s3:::examplebucket"},"Version":"2012-10-17"}"#,
        )
    }

    #[test]
    fn test_decode_minimal_policy() {
        let policy: Policy = minimal_policy_json().parse().unwrap();
        assert_eq!(policy.version, VERSION_2012_10_17);
        assert_eq!(policy.id, "");
        assert!(policy.statements.is_singular());
        assert_eq!(policy.statements.len(), 1);
    }

    #[test]
    fn test_round_trip_preserves_bytes() {
        let policy: Policy = minimal_policy_json().parse().unwrap();
        assert_eq!(policy.to_json().unwrap(), minimal_policy_json());
    }

    #[test]
    fn test_empty_id_is_omitted() {
        let policy = Policy {
            version: VERSION_LATEST.to_string(),
            ..Policy::default()
        };
        assert_eq!(
            policy.to_json().unwrap(),
            r#"{"Statement":[],"Version":"2012-10-17"}"#
        );
    }

    #[test]
    fn test_id_is_encoded_first() {
        let policy = Policy {
            id: "S3AccessPolicy".to_string(),
            version: VERSION_LATEST.to_string(),
            statements: StatementOrList::list([Statement {
                effect: EFFECT_ALLOW.to_string(),
                action: Some(StringOrList::new(true, ["s3:GetObject"])),
                ..Statement::default()
            }]),
        };
        assert_eq!(
            policy.to_json().unwrap(),
            concat!(
                r#"{"Id":"S3AccessPolicy","#,
                r#""Statement":[{"Action":"s3:GetObject","Effect":"Allow"}],"#,
                r#""Version":"2012-10-17"}"#,
            )
        );
    }

    #[test]
    fn test_missing_statement_defaults_to_empty_list() {
        let policy: Policy = r#"{"Version":"2012-10-17"}"#.parse().unwrap();
        assert!(policy.statements.is_empty());
        assert!(!policy.statements.is_singular());
    }

    #[test]
    fn test_decode_rejects_non_object() {
        let err = Policy::from_value(&serde_json::json!(["nope"]), false).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidShape(_)));
    }

    #[test]
    fn test_decode_rejects_non_string_version() {
        let err = Policy::from_json(br#"{"Version":2012}"#).unwrap_err();
        assert_eq!(
            err,
            PolicyError::InvalidValue("Version must be a string".to_string())
        );
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        let err = Policy::from_json(b"{").unwrap_err();
        assert!(matches!(err, PolicyError::ParseError(_)));
    }

    #[test]
    fn test_lenient_decode_ignores_unknown_document_field() {
        let policy: Policy = r#"{"Version":"2012-10-17","NewField":"NewValue"}"#
            .parse()
            .unwrap();
        assert_eq!(policy.version, VERSION_2012_10_17);
    }
}
