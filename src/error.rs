use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while decoding or mutating policy documents.
///
/// Decode errors are always returned, never panicked, and a failed decode
/// leaves the target value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PolicyError {
    #[error("failed to parse policy JSON: {0}")]
    ParseError(String),

    #[error("invalid shape: {0}")]
    InvalidShape(String),

    #[error("invalid list element: {0}")]
    InvalidSlice(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("invalid principal: {0}")]
    InvalidPrincipal(String),

    #[error("type conflict: {0}")]
    TypeConflict(String),

    #[error("unknown field {0:?}")]
    UnknownField(String),

    #[error("not a list of statements: {0}")]
    StatementList(Box<PolicyError>),

    #[error("neither a single statement nor a list of statements: {0}")]
    SingleStatement(Box<PolicyError>),
}

impl PolicyError {
    /// Unwrap statement classification wrappers down to the innermost error.
    ///
    /// A nested statement decode failure is reported as `StatementList` or
    /// `SingleStatement` so callers can tell which union interpretation was
    /// attempted; the underlying field-level error stays reachable here.
    pub fn root_cause(&self) -> &PolicyError {
        match self {
            PolicyError::StatementList(inner) | PolicyError::SingleStatement(inner) => {
                inner.root_cause()
            }
            other => other,
        }
    }
}

impl From<serde_json::Error> for PolicyError {
    fn from(err: serde_json::Error) -> Self {
        PolicyError::ParseError(err.to_string())
    }
}
