//! Types for the AWS IAM policy grammar with shape-preserving JSON
//! serialization and deserialization.
//!
//! Policy JSON is polymorphic: many fields may appear either as a bare
//! scalar or as a list of scalars. The types here remember which form a
//! document used, so a decoded document re-encodes with the same shape.
//! No validation is performed on the policy itself, so it is possible to
//! build documents no service would accept.
//!
//! Building and serializing a document:
//!
//! ```rust
//! use iam_policy_core::{
//!     EFFECT_ALLOW, Policy, Principal, Statement, StatementOrList, StringOrList, VERSION_LATEST,
//! };
//!
//! let policy = Policy {
//!     id: "S3AccessPolicy".to_string(),
//!     statements: StatementOrList::singular(Statement {
//!         sid: "S3Access".to_string(),
//!         effect: EFFECT_ALLOW.to_string(),
//!         principal: Some(Principal::from_aws(["arn:aws:iam::123456789012:role/my-role"])),
//!         action: Some(StringOrList::new(true, ["s3:ListBucket"])),
//!         resource: Some(StringOrList::new(true, ["arn:aws:s3:::examplebucket"])),
//!         ..Statement::default()
//!     }),
//!     version: VERSION_LATEST.to_string(),
//! };
//!
//! let json = policy.to_json().unwrap();
//! assert!(json.contains(r#""Action":"s3:ListBucket""#));
//! ```
//!
//! Decoding, strictly or leniently:
//!
//! ```rust
//! use iam_policy_core::{Decoder, PolicyError};
//!
//! let document = r#"{"Version":"2012-10-17","Statement":[],"Extra":"field"}"#;
//! assert!(Decoder::new().decode_str(document).is_ok());
//! let err = Decoder::strict().decode_str(document).unwrap_err();
//! assert_eq!(err, PolicyError::UnknownField("Extra".to_string()));
//! ```

pub use decoder::Decoder;
pub use error::PolicyError;
pub use types::{
    ConditionMap, ConditionValue, EFFECT_ALLOW, EFFECT_DENY, PRINCIPAL_ALL, Policy, Principal,
    PrincipalKind, Statement, StatementOrList, StringOrList, VERSION_2008_10_17,
    VERSION_2012_10_17, VERSION_LATEST,
};

mod decoder;
mod error;
mod types;

#[cfg(test)]
mod tests;
