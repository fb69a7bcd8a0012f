//! A single statement in a policy document.

use std::collections::BTreeMap;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::PolicyError;
use crate::types::condition_value::ConditionValue;
use crate::types::principal::Principal;
use crate::types::string_or_list::StringOrList;

/// A condition block: operator name → condition key → value.
///
/// `BTreeMap` keeps operators and keys in a deterministic order on encode,
/// so re-serialized documents are stable.
pub type ConditionMap = BTreeMap<String, BTreeMap<String, ConditionValue>>;

/// A single statement in a policy document. Field order here is the wire
/// order; absent optional fields are omitted entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Statement {
    #[serde(rename = "Action", skip_serializing_if = "Option::is_none")]
    pub action: Option<StringOrList>,

    #[serde(rename = "Condition", skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionMap>,

    #[serde(rename = "Effect")]
    pub effect: String,

    #[serde(rename = "NotAction", skip_serializing_if = "Option::is_none")]
    pub not_action: Option<StringOrList>,

    #[serde(rename = "NotResource", skip_serializing_if = "Option::is_none")]
    pub not_resource: Option<StringOrList>,

    #[serde(rename = "Principal", skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,

    #[serde(rename = "NotPrincipal", skip_serializing_if = "Option::is_none")]
    pub not_principal: Option<Principal>,

    #[serde(rename = "Resource", skip_serializing_if = "Option::is_none")]
    pub resource: Option<StringOrList>,

    #[serde(rename = "Sid", skip_serializing_if = "String::is_empty")]
    pub sid: String,
}

impl Statement {
    /// Decode from a generic JSON value. Unknown keys fail in strict mode
    /// and are ignored otherwise; the flag is passed down to the nested
    /// principal decodes.
    pub fn from_value(value: &Value, strict: bool) -> Result<Self, PolicyError> {
        let Value::Object(fields) = value else {
            return Err(PolicyError::InvalidShape(
                "statement must be a JSON object".to_string(),
            ));
        };
        let mut statement = Statement::default();
        for (key, field) in fields {
            match key.as_str() {
                "Action" => statement.action = Some(StringOrList::from_value(field)?),
                "Condition" => statement.condition = Some(condition_from_value(field)?),
                "Effect" => statement.effect = plain_string(field, "Effect")?,
                "NotAction" => statement.not_action = Some(StringOrList::from_value(field)?),
                "NotResource" => statement.not_resource = Some(StringOrList::from_value(field)?),
                "Principal" => statement.principal = Some(Principal::from_value(field, strict)?),
                "NotPrincipal" => {
                    statement.not_principal = Some(Principal::from_value(field, strict)?);
                }
                "Resource" => statement.resource = Some(StringOrList::from_value(field)?),
                "Sid" => statement.sid = plain_string(field, "Sid")?,
                _ if strict => return Err(PolicyError::UnknownField(key.clone())),
                _ => {}
            }
        }
        Ok(statement)
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Statement::from_value(&value, false).map_err(DeError::custom)
    }
}

pub(crate) fn plain_string(value: &Value, field: &str) -> Result<String, PolicyError> {
    value
        .as_str()
        .map(ToString::to_string)
        .ok_or_else(|| PolicyError::InvalidValue(format!("{field} must be a string")))
}

fn condition_from_value(value: &Value) -> Result<ConditionMap, PolicyError> {
    let Value::Object(operators) = value else {
        return Err(PolicyError::InvalidValue(
            "Condition must be a map of operator blocks".to_string(),
        ));
    };
    let mut condition = ConditionMap::new();
    for (operator, block) in operators {
        let Value::Object(entries) = block else {
            return Err(PolicyError::InvalidValue(format!(
                "condition operator {operator:?} must be a map of keys to values"
            )));
        };
        let mut decoded = BTreeMap::new();
        for (key, entry) in entries {
            decoded.insert(key.clone(), ConditionValue::from_value(entry)?);
        }
        condition.insert(operator.clone(), decoded);
    }
    Ok(condition)
}
