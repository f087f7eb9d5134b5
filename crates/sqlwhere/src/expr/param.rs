//! Value collections: per-condition [`Values`] and merged [`BoundValues`].

use crate::error::{WhereError, WhereResult};
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::ops::Index;

/// Values attached to a single condition.
///
/// A condition binds either `?` placeholders (positional) or `:name`
/// placeholders (named), never both.
#[derive(Clone, Debug, PartialEq)]
pub enum Values {
    /// Values for `?` placeholders, in order.
    Positional(Vec<Value>),
    /// Values for `:name` placeholders. Keys are stored without the colon.
    Named(Vec<(String, Value)>),
}

impl Default for Values {
    fn default() -> Self {
        Values::Positional(Vec::new())
    }
}

impl Values {
    /// Build a positional collection.
    pub fn positional<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Self {
        Values::Positional(values.into_iter().map(Into::into).collect())
    }

    /// Build a named collection. A leading `:` on a key is ignored.
    ///
    /// # Example
    /// ```ignore
    /// let values = Values::named([("status", "active")]);
    /// ```
    pub fn named<K: Into<String>, V: Into<Value>>(pairs: impl IntoIterator<Item = (K, V)>) -> Self {
        Values::Named(
            pairs
                .into_iter()
                .map(|(k, v)| {
                    let key: String = k.into();
                    let key = match key.strip_prefix(':') {
                        Some(stripped) => stripped.to_string(),
                        None => key,
                    };
                    (key, v.into())
                })
                .collect(),
        )
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        match self {
            Values::Positional(v) => v.len(),
            Values::Named(v) => v.len(),
        }
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if this is a named collection.
    pub fn is_named(&self) -> bool {
        matches!(self, Values::Named(_))
    }

    /// Reject named collections that bind the same key twice.
    pub(crate) fn check_unique_names(&self) -> WhereResult<()> {
        if let Values::Named(pairs) = self {
            for (i, (key, _)) in pairs.iter().enumerate() {
                if pairs[..i].iter().any(|(k, _)| k == key) {
                    return Err(WhereError::DuplicateNamedValue(key.clone()));
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<Value>> for Values {
    fn from(values: Vec<Value>) -> Self {
        Values::Positional(values)
    }
}

/// Key of a bound value: a dense positional slot or a placeholder name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ParamKey {
    Position(usize),
    Name(String),
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKey::Position(i) => write!(f, "{i}"),
            ParamKey::Name(name) => write!(f, ":{name}"),
        }
    }
}

/// Values collected from one or more expressions, in emission order.
///
/// Positional values are re-slotted as they are collected so that their keys
/// are always `0..N-1`; named values keep their key. A statement may hold
/// both kinds, e.g. positional JOIN values followed by named WHERE values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundValues {
    entries: Vec<(ParamKey, Value)>,
    positional: usize,
}

impl BoundValues {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of positional values.
    pub fn positional_len(&self) -> usize {
        self.positional
    }

    /// Number of named values.
    pub fn named_len(&self) -> usize {
        self.entries.len() - self.positional
    }

    /// True when the collection is non-empty and holds positional values only.
    pub fn is_positional(&self) -> bool {
        !self.entries.is_empty() && self.named_len() == 0
    }

    /// Value bound to positional slot `index`.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.entries.iter().find_map(|(k, v)| match k {
            ParamKey::Position(i) if *i == index => Some(v),
            _ => None,
        })
    }

    /// Value bound to `:name` (pass the name without the colon).
    pub fn get_named(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find_map(|(k, v)| match k {
            ParamKey::Name(n) if n == name => Some(v),
            _ => None,
        })
    }

    /// Iterate over all entries in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (&ParamKey, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterate over positional values in slot order.
    pub fn positional_values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().filter_map(|(k, v)| match k {
            ParamKey::Position(_) => Some(v),
            ParamKey::Name(_) => None,
        })
    }

    /// Iterate over named values in emission order.
    pub fn named_values(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().filter_map(|(k, v)| match k {
            ParamKey::Name(name) => Some((name.as_str(), v)),
            ParamKey::Position(_) => None,
        })
    }

    /// All values in emission order, keys dropped.
    pub fn to_vec(&self) -> Vec<Value> {
        self.entries.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Append a value at the next positional slot.
    pub(crate) fn push_positional(&mut self, value: Value) {
        self.entries
            .push((ParamKey::Position(self.positional), value));
        self.positional += 1;
    }

    /// Append a named value.
    ///
    /// Binding a name again to an equal value is a no-op; binding it to a
    /// different value fails.
    pub(crate) fn push_named(&mut self, name: &str, value: Value) -> WhereResult<()> {
        match self.get_named(name) {
            Some(existing) if *existing == value => Ok(()),
            Some(_) => Err(WhereError::DuplicateNamedValue(name.to_string())),
            None => {
                self.entries.push((ParamKey::Name(name.to_string()), value));
                Ok(())
            }
        }
    }

    /// Append a condition's raw values.
    ///
    /// Expression trees are checked for conflicting names when they are
    /// composed, so a name already present here is skipped.
    pub(crate) fn absorb(&mut self, values: &Values) {
        match values {
            Values::Positional(list) => {
                for value in list {
                    self.push_positional(value.clone());
                }
            }
            Values::Named(pairs) => {
                for (name, value) in pairs {
                    if self.get_named(name).is_none() {
                        self.entries.push((ParamKey::Name(name.clone()), value.clone()));
                    }
                }
            }
        }
    }

    /// Append another collection, re-slotting its positional values.
    ///
    /// Fails when a name is bound to different values on both sides.
    pub fn merge(&mut self, other: &BoundValues) -> WhereResult<()> {
        for (key, value) in &other.entries {
            match key {
                ParamKey::Position(_) => self.push_positional(value.clone()),
                ParamKey::Name(name) => self.push_named(name, value.clone())?,
            }
        }
        Ok(())
    }
}

impl Index<usize> for BoundValues {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get(index)
            .unwrap_or_else(|| panic!("no positional value at slot {index}"))
    }
}

impl Index<&str> for BoundValues {
    type Output = Value;

    fn index(&self, name: &str) -> &Value {
        self.get_named(name)
            .unwrap_or_else(|| panic!("no value bound to :{name}"))
    }
}

/// Positional-only collections serialize as a sequence, anything else as a
/// map keyed by slot number or name.
impl Serialize for BoundValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.named_len() == 0 {
            return serializer.collect_seq(self.entries.iter().map(|(_, v)| v));
        }
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            match key {
                ParamKey::Position(i) => map.serialize_entry(&i.to_string(), value)?,
                ParamKey::Name(name) => map.serialize_entry(name, value)?,
            }
        }
        map.end()
    }
}
