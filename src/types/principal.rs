//! Principal values: the wildcard literal or a record of principal kinds.

use std::fmt::{Display, Formatter, Result as FmtResult};

use itertools::Itertools;
use serde::de::Error as DeError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use strum_macros::{Display as StrumDisplay, EnumString};

use crate::error::PolicyError;
use crate::types::string_or_list::StringOrList;

/// The principal kinds a keyed principal record may carry, plus `All` for
/// the literal `"*"` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString)]
pub enum PrincipalKind {
    All,
    #[strum(serialize = "AWS")]
    Aws,
    CanonicalUser,
    Federated,
    Service,
}

/// A principal in a policy statement.
///
/// On the wire this is either a bare string (usually `"*"`, matching every
/// principal) or a record keyed by principal kind. The two forms are
/// mutually exclusive; decode picks one from the JSON shape seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    form: PrincipalForm,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PrincipalForm {
    Literal(String),
    Keyed(PrincipalMap),
}

/// The keyed record form. Field order here is the wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PrincipalMap {
    aws: Option<StringOrList>,
    canonical_user: Option<StringOrList>,
    federated: Option<StringOrList>,
    service: Option<StringOrList>,
}

impl Principal {
    /// Create the wildcard principal, matching all principals.
    pub fn wildcard() -> Self {
        Principal::from_literal(crate::types::policy::PRINCIPAL_ALL)
    }

    /// Create a literal-form principal from any string. No semantic meaning
    /// is attached; `"*"` is the only value AWS itself uses.
    pub fn from_literal<S: Into<String>>(literal: S) -> Self {
        Principal {
            form: PrincipalForm::Literal(literal.into()),
        }
    }

    /// Create a principal matching one or more AWS accounts.
    pub fn from_aws<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Principal::keyed(|map| map.aws = Some(StringOrList::new(true, values)))
    }

    /// Create a principal matching one or more canonical users.
    pub fn from_canonical_user<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Principal::keyed(|map| map.canonical_user = Some(StringOrList::new(true, values)))
    }

    /// Create a principal matching one or more federated identity providers.
    pub fn from_federated<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Principal::keyed(|map| map.federated = Some(StringOrList::new(true, values)))
    }

    /// Create a principal matching one or more services.
    pub fn from_service<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Principal::keyed(|map| map.service = Some(StringOrList::new(true, values)))
    }

    fn keyed(populate: impl FnOnce(&mut PrincipalMap)) -> Self {
        let mut map = PrincipalMap::default();
        populate(&mut map);
        Principal {
            form: PrincipalForm::Keyed(map),
        }
    }

    /// The literal string, if this principal is in literal form.
    pub fn literal(&self) -> Option<&str> {
        match &self.form {
            PrincipalForm::Literal(s) => Some(s),
            PrincipalForm::Keyed(_) => None,
        }
    }

    /// True for the literal `"*"` principal.
    pub fn is_wildcard(&self) -> bool {
        self.literal() == Some(crate::types::policy::PRINCIPAL_ALL)
    }

    /// The kinds present on this principal. A literal-form principal
    /// reports `[PrincipalKind::All]`; a keyed one reports its populated
    /// kinds in wire order.
    pub fn kinds(&self) -> Vec<PrincipalKind> {
        match &self.form {
            PrincipalForm::Literal(_) => vec![PrincipalKind::All],
            PrincipalForm::Keyed(map) => {
                let mut kinds = Vec::new();
                if map.aws.is_some() {
                    kinds.push(PrincipalKind::Aws);
                }
                if map.canonical_user.is_some() {
                    kinds.push(PrincipalKind::CanonicalUser);
                }
                if map.federated.is_some() {
                    kinds.push(PrincipalKind::Federated);
                }
                if map.service.is_some() {
                    kinds.push(PrincipalKind::Service);
                }
                kinds
            }
        }
    }

    /// The AWS account values, if present. `None` on a literal-form
    /// principal rather than an error.
    pub fn aws(&self) -> Option<&StringOrList> {
        self.kind_values(|map| map.aws.as_ref())
    }

    /// The canonical user values, if present.
    pub fn canonical_user(&self) -> Option<&StringOrList> {
        self.kind_values(|map| map.canonical_user.as_ref())
    }

    /// The federated identity provider values, if present.
    pub fn federated(&self) -> Option<&StringOrList> {
        self.kind_values(|map| map.federated.as_ref())
    }

    /// The service values, if present.
    pub fn service(&self) -> Option<&StringOrList> {
        self.kind_values(|map| map.service.as_ref())
    }

    fn kind_values<'a>(
        &'a self,
        select: impl FnOnce(&'a PrincipalMap) -> Option<&'a StringOrList>,
    ) -> Option<&'a StringOrList> {
        match &self.form {
            PrincipalForm::Literal(_) => None,
            PrincipalForm::Keyed(map) => select(map),
        }
    }

    /// Append AWS account values, creating the kind entry if absent.
    /// Returns false without applying anything when the principal is in
    /// literal form, whose wire shape has no kind entries to extend.
    pub fn add_aws<I, S>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_kind(values, |map| &mut map.aws)
    }

    /// Append canonical user values; see [`Principal::add_aws`].
    pub fn add_canonical_user<I, S>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_kind(values, |map| &mut map.canonical_user)
    }

    /// Append federated identity provider values; see [`Principal::add_aws`].
    pub fn add_federated<I, S>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_kind(values, |map| &mut map.federated)
    }

    /// Append service values; see [`Principal::add_aws`].
    pub fn add_service<I, S>(&mut self, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_kind(values, |map| &mut map.service)
    }

    fn add_kind<I, S>(
        &mut self,
        values: I,
        select: impl FnOnce(&mut PrincipalMap) -> &mut Option<StringOrList>,
    ) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match &mut self.form {
            PrincipalForm::Literal(_) => false,
            PrincipalForm::Keyed(map) => {
                select(map)
                    .get_or_insert_with(|| StringOrList::new(true, std::iter::empty::<String>()))
                    .add(values);
                true
            }
        }
    }

    /// Decode from a generic JSON value: a bare string becomes the literal
    /// form, an object the keyed form. Unknown keys in the record fail in
    /// strict mode and are ignored otherwise.
    pub fn from_value(value: &Value, strict: bool) -> Result<Self, PolicyError> {
        match value {
            Value::String(s) => Ok(Principal::from_literal(s.clone())),
            Value::Object(fields) => {
                let mut map = PrincipalMap::default();
                for (key, field) in fields {
                    match key.as_str() {
                        "AWS" => map.aws = Some(StringOrList::from_value(field)?),
                        "CanonicalUser" => {
                            map.canonical_user = Some(StringOrList::from_value(field)?);
                        }
                        "Federated" => map.federated = Some(StringOrList::from_value(field)?),
                        "Service" => map.service = Some(StringOrList::from_value(field)?),
                        _ if strict => return Err(PolicyError::UnknownField(key.clone())),
                        _ => {}
                    }
                }
                Ok(Principal {
                    form: PrincipalForm::Keyed(map),
                })
            }
            _ => Err(PolicyError::InvalidPrincipal(
                "principal is neither a string nor a map of principal kinds".to_string(),
            )),
        }
    }
}

impl Default for Principal {
    fn default() -> Self {
        Principal {
            form: PrincipalForm::Keyed(PrincipalMap::default()),
        }
    }
}

impl Display for Principal {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.form {
            PrincipalForm::Literal(s) => write!(f, "{s}"),
            PrincipalForm::Keyed(_) => write!(f, "{{{}}}", self.kinds().iter().join(", ")),
        }
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.form {
            PrincipalForm::Literal(s) => serializer.serialize_str(s),
            PrincipalForm::Keyed(map) => {
                let entries = [
                    ("AWS", &map.aws),
                    ("CanonicalUser", &map.canonical_user),
                    ("Federated", &map.federated),
                    ("Service", &map.service),
                ];
                let present = entries.iter().filter(|(_, v)| v.is_some()).count();
                let mut record = serializer.serialize_map(Some(present))?;
                for (key, value) in entries {
                    if let Some(value) = value {
                        record.serialize_entry(key, value)?;
                    }
                }
                record.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Principal::from_value(&value, false).map_err(DeError::custom)
    }
}
