//! Condition values: scalar-or-list of strings, bools or numbers.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

use crate::error::PolicyError;

/// A condition value holding strings, bools or numbers — one kind at a
/// time — and remembering whether the original JSON form was a bare scalar
/// or a list.
///
/// Numbers are kept as [`serde_json::Number`] so the lexical form survives
/// a round-trip (`123` does not come back as `123.0`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionValue {
    strings: Vec<String>,
    bools: Vec<bool>,
    numbers: Vec<Number>,
    singular: bool,
}

impl ConditionValue {
    /// Create a string-kind condition value. If `singular` is true and there
    /// is exactly one element, it serializes as a bare string.
    pub fn from_strings<I, S>(singular: bool, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConditionValue {
            strings: values.into_iter().map(Into::into).collect(),
            singular,
            ..ConditionValue::default()
        }
    }

    /// Create a bool-kind condition value.
    pub fn from_bools<I>(singular: bool, values: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        ConditionValue {
            bools: values.into_iter().collect(),
            singular,
            ..ConditionValue::default()
        }
    }

    /// Create a number-kind condition value. Integer literals convert
    /// directly; floats go through [`Number::from_f64`].
    pub fn from_numbers<I, N>(singular: bool, values: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Number>,
    {
        ConditionValue {
            numbers: values.into_iter().map(Into::into).collect(),
            singular,
            ..ConditionValue::default()
        }
    }

    /// Append strings. Fails if the value already holds bools or numbers.
    pub fn add_strings<I, S>(&mut self, values: I) -> Result<(), PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.bools.is_empty() {
            return Err(PolicyError::TypeConflict(
                "cannot add strings, value already holds bools".to_string(),
            ));
        }
        if !self.numbers.is_empty() {
            return Err(PolicyError::TypeConflict(
                "cannot add strings, value already holds numbers".to_string(),
            ));
        }
        self.strings.extend(values.into_iter().map(Into::into));
        self.clamp_singular();
        Ok(())
    }

    /// Append bools. Fails if the value already holds strings or numbers.
    pub fn add_bools<I>(&mut self, values: I) -> Result<(), PolicyError>
    where
        I: IntoIterator<Item = bool>,
    {
        if !self.strings.is_empty() {
            return Err(PolicyError::TypeConflict(
                "cannot add bools, value already holds strings".to_string(),
            ));
        }
        if !self.numbers.is_empty() {
            return Err(PolicyError::TypeConflict(
                "cannot add bools, value already holds numbers".to_string(),
            ));
        }
        self.bools.extend(values);
        self.clamp_singular();
        Ok(())
    }

    /// Append numbers. Fails if the value already holds strings or bools.
    pub fn add_numbers<I, N>(&mut self, values: I) -> Result<(), PolicyError>
    where
        I: IntoIterator<Item = N>,
        N: Into<Number>,
    {
        if !self.strings.is_empty() {
            return Err(PolicyError::TypeConflict(
                "cannot add numbers, value already holds strings".to_string(),
            ));
        }
        if !self.bools.is_empty() {
            return Err(PolicyError::TypeConflict(
                "cannot add numbers, value already holds bools".to_string(),
            ));
        }
        self.numbers.extend(values.into_iter().map(Into::into));
        self.clamp_singular();
        Ok(())
    }

    /// Get the string values.
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Get the bool values.
    pub fn bools(&self) -> &[bool] {
        &self.bools
    }

    /// Get the number values.
    pub fn numbers(&self) -> &[Number] {
        &self.numbers
    }

    /// The number of elements held across all three kinds.
    pub fn len(&self) -> usize {
        self.strings.len() + self.bools.len() + self.numbers.len()
    }

    /// Check whether no elements are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if the value serializes in (or is still eligible for) the bare
    /// scalar form: the singular flag is set and at most one element is held.
    pub fn is_singular(&self) -> bool {
        self.singular && self.len() <= 1
    }

    fn clamp_singular(&mut self) {
        if self.len() > 1 {
            self.singular = false;
        }
    }

    /// Decode from a generic JSON value. A bare string, bool or number is
    /// singular; a list never is. List elements are bucketed by type, so
    /// order is preserved within a kind but not across kinds.
    pub fn from_value(value: &Value) -> Result<Self, PolicyError> {
        match value {
            Value::String(s) => Ok(ConditionValue {
                strings: vec![s.clone()],
                singular: true,
                ..ConditionValue::default()
            }),
            Value::Bool(b) => Ok(ConditionValue {
                bools: vec![*b],
                singular: true,
                ..ConditionValue::default()
            }),
            Value::Number(n) => Ok(ConditionValue {
                numbers: vec![n.clone()],
                singular: true,
                ..ConditionValue::default()
            }),
            Value::Array(items) => {
                let mut decoded = ConditionValue::default();
                for item in items {
                    match item {
                        Value::String(s) => decoded.strings.push(s.clone()),
                        Value::Bool(b) => decoded.bools.push(*b),
                        Value::Number(n) => decoded.numbers.push(n.clone()),
                        _ => {
                            return Err(PolicyError::InvalidSlice(
                                "list element is not a string, bool or number".to_string(),
                            ));
                        }
                    }
                }
                Ok(decoded)
            }
            _ => Err(PolicyError::InvalidValue(
                "field is not a string, bool, number or a list of those".to_string(),
            )),
        }
    }
}

impl Serialize for ConditionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.singular && self.len() == 1 {
            if let Some(s) = self.strings.first() {
                return serializer.serialize_str(s);
            }
            if let Some(b) = self.bools.first() {
                return serializer.serialize_bool(*b);
            }
            if let Some(n) = self.numbers.first() {
                return n.serialize(serializer);
            }
        }
        if !self.strings.is_empty() {
            serializer.collect_seq(&self.strings)
        } else if !self.bools.is_empty() {
            serializer.collect_seq(&self.bools)
        } else {
            serializer.collect_seq(&self.numbers)
        }
    }
}

impl<'de> Deserialize<'de> for ConditionValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ConditionValue::from_value(&value).map_err(DeError::custom)
    }
}
