//! A string field that may appear on the wire as a bare string or a list.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::PolicyError;

/// A value that holds one or more strings and remembers whether the original
/// JSON form was a bare string or a list.
///
/// `Action`, `NotAction`, `Resource` and `NotResource` statement fields, as
/// well as the principal kind entries, all use this type so that a document
/// re-serializes with the same shape it was read with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringOrList {
    values: Vec<String>,
    singular: bool,
}

impl StringOrList {
    /// Create a new `StringOrList`. If `singular` is true and there is
    /// exactly one value, the value serializes as a bare string instead of
    /// a list.
    pub fn new<I, S>(singular: bool, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StringOrList {
            values: values.into_iter().map(Into::into).collect(),
            singular,
        }
    }

    /// Append values. Once more than one value is present the singular
    /// wire form is no longer available and the flag is cleared.
    pub fn add<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        if self.values.len() > 1 {
            self.singular = false;
        }
    }

    /// Get the values.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// The number of values held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether no values are held.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True if the value serializes in (or is still eligible for) the bare
    /// string form: the singular flag is set and at most one value is held.
    pub fn is_singular(&self) -> bool {
        self.singular && self.values.len() <= 1
    }

    /// Decode from a generic JSON value, inferring the shape from the form
    /// actually seen: a bare string is singular, a list never is, whatever
    /// its length.
    pub fn from_value(value: &Value) -> Result<Self, PolicyError> {
        match value {
            Value::String(s) => Ok(StringOrList {
                values: vec![s.clone()],
                singular: true,
            }),
            Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => values.push(s.clone()),
                        _ => {
                            return Err(PolicyError::InvalidSlice(
                                "list element is not a string".to_string(),
                            ));
                        }
                    }
                }
                Ok(StringOrList {
                    values,
                    singular: false,
                })
            }
            _ => Err(PolicyError::InvalidShape(
                "field is neither a string nor a list of strings".to_string(),
            )),
        }
    }
}

impl Display for StringOrList {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.singular && self.values.len() == 1 {
            write!(f, "{}", self.values[0])
        } else {
            write!(f, "[{}]", self.values.iter().join(", "))
        }
    }
}

impl Serialize for StringOrList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.singular && self.values.len() == 1 {
            serializer.serialize_str(&self.values[0])
        } else {
            serializer.collect_seq(&self.values)
        }
    }
}

impl<'de> Deserialize<'de> for StringOrList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        StringOrList::from_value(&value).map_err(DeError::custom)
    }
}
