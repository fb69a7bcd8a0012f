//! Decoding entry points with caller-selected strictness.

use serde_json::Value;
use tracing::{debug, trace};

use crate::error::PolicyError;
use crate::types::Policy;

/// Decodes policy documents from JSON, with a caller-selected strictness.
///
/// A lenient decoder ignores JSON object keys it does not recognize, which
/// tolerates future grammar extensions. A strict decoder rejects any
/// unrecognized key at any nesting level with
/// [`PolicyError::UnknownField`] naming the offending field.
///
/// The flag is carried by value through every nested decode, so a decoder
/// is reentrant and safe to share across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoder {
    strict: bool,
}

impl Decoder {
    /// Create a lenient decoder.
    pub fn new() -> Self {
        Decoder { strict: false }
    }

    /// Create a strict decoder, rejecting unknown fields at every nesting
    /// level.
    pub fn strict() -> Self {
        Decoder { strict: true }
    }

    /// Whether this decoder rejects unknown fields.
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Decode a policy document from JSON bytes.
    pub fn decode(&self, bytes: &[u8]) -> Result<Policy, PolicyError> {
        debug!(strict = self.strict, len = bytes.len(), "decoding policy document");
        let value: Value = serde_json::from_slice(bytes)?;
        self.decode_value(&value)
    }

    /// Decode a policy document from JSON text.
    pub fn decode_str(&self, text: &str) -> Result<Policy, PolicyError> {
        self.decode(text.as_bytes())
    }

    /// Decode a policy document from an already-parsed JSON value.
    pub fn decode_value(&self, value: &Value) -> Result<Policy, PolicyError> {
        let policy = Policy::from_value(value, self.strict)?;
        trace!(statements = policy.statements.len(), "decoded policy document");
        Ok(policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY: &str = concat!(
        r#"{"Id":"CloudTrailBucketPolicy","#,
        r#""Statement":[{"Action":"s3:PutObject","Effect":"Allow"}],"#,
        r#""Version":"2012-10-17"}"#,
    );

    #[test]
    fn test_lenient_by_default() {
        let decoder = Decoder::new();
        assert!(!decoder.is_strict());
        assert_eq!(decoder, Decoder::default());
    }

    #[test]
    fn test_decode_well_formed_document() {
        let policy = Decoder::new().decode_str(POLICY).unwrap();
        assert_eq!(policy.id, "CloudTrailBucketPolicy");
        assert_eq!(policy.statements.len(), 1);
    }

    #[test]
    fn test_strict_and_lenient_agree_on_clean_input() {
        let lenient = Decoder::new().decode_str(POLICY).unwrap();
        let strict = Decoder::strict().decode_str(POLICY).unwrap();
        assert_eq!(lenient, strict);
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = Decoder::new().decode(b"{").unwrap_err();
        assert!(matches!(err, PolicyError::ParseError(_)));
    }

    #[test]
    fn test_decode_value_shares_the_strict_flag() {
        let value: serde_json::Value =
            serde_json::from_str(r#"{"Version":"2012-10-17","Foo":"bar"}"#).unwrap();
        assert!(Decoder::new().decode_value(&value).is_ok());
        let err = Decoder::strict().decode_value(&value).unwrap_err();
        assert_eq!(err, PolicyError::UnknownField("Foo".to_string()));
    }
}
