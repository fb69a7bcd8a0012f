//! Data model types for policy documents.
//!
//! Wire forms, per the IAM policy grammar:
//! - Document: `{ "Id": string?, "Statement": stmt | [stmt, ...], "Version": string }`
//! - Statement fields `Action`/`NotAction`/`Resource`/`NotResource`: `string | [string, ...]`
//! - `Principal`/`NotPrincipal`: `"*"` or `{ "AWS" | "CanonicalUser" | "Federated" | "Service": string | [string, ...] }`
//! - `Condition`: `{ operator: { key: scalar | [scalar, ...] } }` where a
//!   scalar is a string, bool or number
//!
//! Every `x | [x, ...]` position remembers which form it was decoded from
//! and re-encodes in that form.

mod condition_value;
mod policy;
mod principal;
mod statement;
mod statement_or_list;
mod string_or_list;

pub use condition_value::ConditionValue;
pub use policy::{
    EFFECT_ALLOW, EFFECT_DENY, PRINCIPAL_ALL, Policy, VERSION_2008_10_17, VERSION_2012_10_17,
    VERSION_LATEST,
};
pub use principal::{Principal, PrincipalKind};
pub use statement::{ConditionMap, Statement};
pub use statement_or_list::StatementOrList;
pub use string_or_list::StringOrList;
