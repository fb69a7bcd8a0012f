//! The statement block: one statement or a list of statements.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::PolicyError;
use crate::types::statement::Statement;

/// The `Statement` block of a policy document, which may appear on the wire
/// as a single statement object or as a list of them.
///
/// Statement elements always decode strictly enough to be classified:
/// a nested failure is wrapped so callers can tell "not a list of
/// statements" apart from "neither a single statement nor a list".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatementOrList {
    statements: Vec<Statement>,
    singular: bool,
}

impl StatementOrList {
    /// Create a block that serializes as a bare statement object.
    pub fn singular(statement: Statement) -> Self {
        StatementOrList {
            statements: vec![statement],
            singular: true,
        }
    }

    /// Create a block that serializes as a list, whatever its length.
    pub fn list<I>(statements: I) -> Self
    where
        I: IntoIterator<Item = Statement>,
    {
        StatementOrList {
            statements: statements.into_iter().collect(),
            singular: false,
        }
    }

    /// Append a statement. Once more than one statement is present the
    /// singular wire form is no longer available and the flag is cleared.
    pub fn add(&mut self, statement: Statement) {
        self.statements.push(statement);
        if self.statements.len() > 1 {
            self.singular = false;
        }
    }

    /// Get the statements.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// The number of statements held.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check whether no statements are held.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// True if the block serializes as a bare statement object.
    pub fn is_singular(&self) -> bool {
        self.singular
    }

    /// Decode from a generic JSON value, threading the strict flag into
    /// every nested statement decode.
    pub fn from_value(value: &Value, strict: bool) -> Result<Self, PolicyError> {
        match value {
            Value::Array(items) => {
                let mut statements = Vec::with_capacity(items.len());
                for item in items {
                    let statement = Statement::from_value(item, strict)
                        .map_err(|e| PolicyError::StatementList(Box::new(e)))?;
                    statements.push(statement);
                }
                Ok(StatementOrList {
                    statements,
                    singular: false,
                })
            }
            Value::Object(_) => {
                let statement = Statement::from_value(value, strict)
                    .map_err(|e| PolicyError::SingleStatement(Box::new(e)))?;
                Ok(StatementOrList::singular(statement))
            }
            _ => Err(PolicyError::InvalidShape(
                "expected a statement object or a list of statements".to_string(),
            )),
        }
    }
}

impl Serialize for StatementOrList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.singular && self.statements.len() == 1 {
            self.statements[0].serialize(serializer)
        } else {
            serializer.collect_seq(&self.statements)
        }
    }
}

impl<'de> Deserialize<'de> for StatementOrList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        StatementOrList::from_value(&value, false).map_err(DeError::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::policy::{EFFECT_ALLOW, EFFECT_DENY};

    fn statement(sid: &str, effect: &str) -> Statement {
        Statement {
            sid: sid.to_string(),
            effect: effect.to_string(),
            ..Statement::default()
        }
    }

    #[test]
    fn test_singular_constructor() {
        let block = StatementOrList::singular(statement("1", EFFECT_ALLOW));
        assert!(block.is_singular());
        assert_eq!(block.len(), 1);
    }

    #[test]
    fn test_add_clears_singular_past_one() {
        let mut block = StatementOrList::singular(statement("1", EFFECT_ALLOW));
        block.add(statement("2", EFFECT_DENY));
        assert!(!block.is_singular());
        assert_eq!(
            block
                .statements()
                .iter()
                .map(|s| s.sid.as_str())
                .collect::<Vec<_>>(),
            vec!["1", "2"]
        );
    }

    #[test]
    fn test_add_to_list_stays_list() {
        let mut block =
            StatementOrList::list([statement("1", EFFECT_ALLOW), statement("2", EFFECT_DENY)]);
        block.add(statement("3", EFFECT_ALLOW));
        assert!(!block.is_singular());
        assert_eq!(block.len(), 3);
    }

    #[test]
    fn test_decode_single_object_is_singular() {
        let value: Value =
            serde_json::from_str(r#"{"Effect":"Allow","Action":"s3:GetObject"}"#).unwrap();
        let block = StatementOrList::from_value(&value, false).unwrap();
        assert!(block.is_singular());
        assert_eq!(block.len(), 1);
        assert_eq!(block.statements()[0].effect, EFFECT_ALLOW);
    }

    #[test]
    fn test_decode_one_element_list_is_not_singular() {
        let value: Value =
            serde_json::from_str(r#"[{"Effect":"Allow","Action":"s3:GetObject"}]"#).unwrap();
        let block = StatementOrList::from_value(&value, false).unwrap();
        assert!(!block.is_singular());
        assert_eq!(block.len(), 1);
    }

    #[test]
    fn test_decode_empty_list() {
        let block = StatementOrList::from_value(&serde_json::json!([]), false).unwrap();
        assert!(!block.is_singular());
        assert!(block.is_empty());
        assert_eq!(serde_json::to_string(&block).unwrap(), "[]");
    }

    #[test]
    fn test_decode_rejects_scalar() {
        let err = StatementOrList::from_value(&serde_json::json!(true), false).unwrap_err();
        assert!(matches!(err, PolicyError::InvalidShape(_)));
    }

    #[test]
    fn test_strict_list_element_error_is_classified() {
        let value: Value =
            serde_json::from_str(r#"[{"Effect":"Allow","NotAField":"s3:GetObject"}]"#).unwrap();
        let err = StatementOrList::from_value(&value, true).unwrap_err();
        match &err {
            PolicyError::StatementList(inner) => {
                assert_eq!(**inner, PolicyError::UnknownField("NotAField".to_string()));
            }
            other => panic!("expected StatementList, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            r#"not a list of statements: unknown field "NotAField""#
        );
    }

    #[test]
    fn test_strict_single_statement_error_is_classified() {
        let value: Value =
            serde_json::from_str(r#"{"Effect":"Allow","NotAField":"s3:GetObject"}"#).unwrap();
        let err = StatementOrList::from_value(&value, true).unwrap_err();
        match &err {
            PolicyError::SingleStatement(inner) => {
                assert_eq!(**inner, PolicyError::UnknownField("NotAField".to_string()));
            }
            other => panic!("expected SingleStatement, got {other:?}"),
        }
        assert_eq!(err.root_cause(), &PolicyError::UnknownField("NotAField".to_string()));
    }

    #[test]
    fn test_lenient_decode_accepts_unknown_fields() {
        let value: Value =
            serde_json::from_str(r#"[{"Effect":"Allow","NotAField":"s3:GetObject"}]"#).unwrap();
        assert!(StatementOrList::from_value(&value, false).is_ok());
    }

    #[test]
    fn test_serialize_singular_emits_bare_object() {
        let block = StatementOrList::singular(statement("1", EFFECT_ALLOW));
        assert_eq!(
            serde_json::to_string(&block).unwrap(),
            r#"{"Effect":"Allow","Sid":"1"}"#
        );
    }

    #[test]
    fn test_serialize_one_element_list_emits_list() {
        let block = StatementOrList::list([statement("1", EFFECT_ALLOW)]);
        assert_eq!(
            serde_json::to_string(&block).unwrap(),
            r#"[{"Effect":"Allow","Sid":"1"}]"#
        );
    }

    #[test]
    fn test_round_trip_preserves_shape() {
        for input in [
            r#"{"Effect":"Allow","Sid":"1"}"#,
            r#"[{"Effect":"Allow","Sid":"1"}]"#,
            "[]",
        ] {
            let block: StatementOrList = serde_json::from_str(input).unwrap();
            assert_eq!(serde_json::to_string(&block).unwrap(), input);
        }
    }
}
