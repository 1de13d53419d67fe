//! Raw JSON storage behind every model.
//!
//! Each model owns a [`RawData`] map holding the JSON it was built from or
//! assigned. Typed accessors are projections over that map, so a field that
//! was never set stays absent on the wire, an explicit null stays null, and
//! keys the crate does not know about survive a deserialize/serialize cycle.

use std::{borrow::Cow, collections::BTreeMap};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{Error, Result};

/// How a declared field treats absence and JSON null.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be present and non-null for `validate()` to pass.
    Required,
    /// May be omitted; an explicit null is a meaningful, transmitted value.
    Nullable,
    /// May be omitted; assigning null is the same as leaving it unset.
    Optional,
}

/// Schema entry for one declared field of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub presence: Presence,
}

/// Ordered map of wire keys to raw JSON values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawData(Map<String, Value>);

impl RawData {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Borrows the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Consumes the wrapper and returns the JSON object.
    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Number of entries, unknown keys included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no key has been set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if the key is present, even when its value is null.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Raw JSON stored under `key`, null included.
    pub fn get_raw(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Inserts a raw JSON value. Existing keys keep their position.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Removes a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Serializes `value` into the map.
    pub fn set<T: FieldValue>(&mut self, key: &str, value: &T) {
        self.0.insert(key.to_string(), value.to_json());
    }

    /// Records an explicit JSON null.
    pub fn set_null(&mut self, key: &str) {
        self.0.insert(key.to_string(), Value::Null);
    }

    /// Drops the key so it is absent on the wire.
    pub fn unset(&mut self, key: &str) {
        self.0.shift_remove(key);
    }

    /// Typed read. Absent and JSON-null entries both read as `None`.
    pub fn get<T: FieldValue>(&self, key: &str) -> Result<Option<T>> {
        match self.0.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::from_json(value, key).map(Some),
        }
    }

    /// Typed read of a field that must be present and non-null.
    pub fn required<T: FieldValue>(&self, key: &str) -> Result<T> {
        self.get(key)?.ok_or_else(|| Error::missing(key))
    }

    /// Checks one declared field against its presence rule and value type.
    pub fn validate_field<T: FieldValue>(
        &self,
        key: &str,
        presence: Presence,
        parent: &str,
    ) -> Result<()> {
        match self.0.get(key) {
            None | Some(Value::Null) if presence == Presence::Required => {
                Err(Error::missing(field_path(parent, key)))
            }
            None | Some(Value::Null) => Ok(()),
            Some(value) => T::validate_json(value, &field_path(parent, key)),
        }
    }

    /// Compares one declared field of two maps by its typed value.
    ///
    /// Absent and null stay distinct; present values go through
    /// [`FieldValue::eq_json`].
    pub fn field_eq<T: FieldValue>(&self, other: &RawData, key: &str) -> bool {
        match (self.0.get(key), other.0.get(key)) {
            (None, None) => true,
            (Some(a), Some(b)) => T::eq_json(a, b),
            _ => false,
        }
    }

    /// Writes a fixed discriminator value. An absent key is placed first.
    pub fn ensure_tag(&mut self, key: &str, tag: &str) {
        if matches!(self.0.get(key), Some(Value::String(value)) if value == tag) {
            return;
        }
        if self.0.contains_key(key) {
            self.0.insert(key.to_string(), Value::from(tag));
            return;
        }
        let mut map = Map::with_capacity(self.0.len() + 1);
        map.insert(key.to_string(), Value::from(tag));
        map.extend(std::mem::take(&mut self.0));
        self.0 = map;
    }

    /// Borrows the map if the discriminator already holds `tag`, otherwise
    /// returns a copy with the tag written.
    pub fn with_tag(&self, key: &str, tag: &str) -> Cow<'_, RawData> {
        match self.0.get(key) {
            Some(Value::String(value)) if value == tag => Cow::Borrowed(self),
            _ => {
                let mut copy = self.clone();
                copy.ensure_tag(key, tag);
                Cow::Owned(copy)
            }
        }
    }
}

impl From<Map<String, Value>> for RawData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<RawData> for Value {
    fn from(raw: RawData) -> Self {
        Value::Object(raw.0)
    }
}

/// Joins a parent path and a key into `parent.key`.
pub(crate) fn field_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn index_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

/// A model backed by [`RawData`].
pub trait Model: Sized {
    /// Declared fields, discriminator included.
    const FIELDS: &'static [FieldSpec];

    fn raw_data(&self) -> &RawData;

    /// Mutable access to the raw map, e.g. for properties this crate does not declare.
    fn raw_data_mut(&mut self) -> &mut RawData;

    fn from_raw_data(raw: RawData) -> Self;

    /// The map as it goes on the wire. Tagged models always carry their
    /// fixed discriminator here, whatever `raw_data_mut` did to it.
    fn wire_data(&self) -> Cow<'_, RawData> {
        Cow::Borrowed(self.raw_data())
    }

    /// Validates with error paths rooted at `path`.
    fn validate_at(&self, path: &str) -> Result<()>;

    fn validate(&self) -> Result<()> {
        self.validate_at("")
    }

    fn to_json_string(&self) -> Result<String> {
        serde_json::to_string(&*self.wire_data()).map_err(Error::from)
    }

    fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawData = serde_json::from_str(json)?;
        Ok(Self::from_raw_data(raw))
    }
}

/// A model whose discriminator field carries a fixed value.
pub trait Tagged: Model {
    const TAG_FIELD: &'static str;
    const TAG: &'static str;
}

/// Conversion between a typed field value and its raw JSON form.
pub trait FieldValue: Sized {
    fn to_json(&self) -> Value;

    /// Reads a raw value. Never rejects unknown enum members.
    fn from_json(value: &Value, path: &str) -> Result<Self>;

    /// Checks a raw value the way `validate()` does.
    fn validate_json(value: &Value, path: &str) -> Result<()> {
        Self::from_json(value, path).map(|_| ())
    }

    /// Equality of two raw values as this type reads them.
    fn eq_json(a: &Value, b: &Value) -> bool {
        a == b
    }
}

/// Compares through the typed projection, falling back to raw equality when
/// either side does not read as `T`.
pub(crate) fn typed_eq<T: FieldValue + PartialEq>(a: &Value, b: &Value) -> bool {
    match (T::from_json(a, ""), T::from_json(b, "")) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

impl FieldValue for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_json(value: &Value, path: &str) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::invalid_field(path, format!("expected a string, got {value}")))
    }
}

impl FieldValue for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_json(value: &Value, path: &str) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| Error::invalid_field(path, format!("expected a boolean, got {value}")))
    }
}

impl FieldValue for i64 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(value: &Value, path: &str) -> Result<Self> {
        value
            .as_i64()
            .ok_or_else(|| Error::invalid_field(path, format!("expected an integer, got {value}")))
    }

    fn eq_json(a: &Value, b: &Value) -> bool {
        typed_eq::<f64>(a, b)
    }
}

/// JSON has no NaN or infinity. Non-finite values are stored as their text so
/// they fail `validate()` as an invalid number instead of reading as missing.
impl FieldValue for f64 {
    fn to_json(&self) -> Value {
        if self.is_finite() {
            Value::from(*self)
        } else {
            Value::String(self.to_string())
        }
    }

    fn from_json(value: &Value, path: &str) -> Result<Self> {
        match value {
            Value::String(text) if text.parse::<f64>().is_ok_and(|n| !n.is_finite()) => Err(
                Error::invalid_field(path, format!("non-finite number {text} has no JSON form")),
            ),
            _ => value
                .as_f64()
                .ok_or_else(|| Error::invalid_field(path, format!("expected a number, got {value}"))),
        }
    }

    fn eq_json(a: &Value, b: &Value) -> bool {
        typed_eq::<f64>(a, b)
    }
}

impl FieldValue for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }

    fn from_json(value: &Value, _path: &str) -> Result<Self> {
        Ok(value.clone())
    }
}

impl FieldValue for DateTime<Utc> {
    fn to_json(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }

    fn from_json(value: &Value, path: &str) -> Result<Self> {
        let text = value.as_str().ok_or_else(|| {
            Error::invalid_field(path, format!("expected an RFC 3339 timestamp, got {value}"))
        })?;
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|err| Error::invalid_field(path, err))
    }

    fn eq_json(a: &Value, b: &Value) -> bool {
        typed_eq::<Self>(a, b)
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(value) => value.to_json(),
            None => Value::Null,
        }
    }

    fn from_json(value: &Value, path: &str) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_json(other, path).map(Some),
        }
    }

    fn validate_json(value: &Value, path: &str) -> Result<()> {
        match value {
            Value::Null => Ok(()),
            other => T::validate_json(other, path),
        }
    }

    fn eq_json(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Null, Value::Null) => true,
            (Value::Null, _) | (_, Value::Null) => false,
            (a, b) => T::eq_json(a, b),
        }
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(FieldValue::to_json).collect())
    }

    fn from_json(value: &Value, path: &str) -> Result<Self> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::invalid_field(path, format!("expected an array, got {value}")))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| T::from_json(item, &index_path(path, i)))
            .collect()
    }

    fn validate_json(value: &Value, path: &str) -> Result<()> {
        let items = value
            .as_array()
            .ok_or_else(|| Error::invalid_field(path, format!("expected an array, got {value}")))?;
        for (i, item) in items.iter().enumerate() {
            T::validate_json(item, &index_path(path, i))?;
        }
        Ok(())
    }

    fn eq_json(a: &Value, b: &Value) -> bool {
        match (a.as_array(), b.as_array()) {
            (Some(a), Some(b)) => a.len() == b.len() && a.iter().zip(b).all(|(x, y)| T::eq_json(x, y)),
            _ => a == b,
        }
    }
}

impl<T: FieldValue> FieldValue for BTreeMap<String, T> {
    fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }

    fn from_json(value: &Value, path: &str) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::invalid_field(path, format!("expected an object, got {value}")))?;
        map.iter()
            .map(|(k, v)| Ok((k.clone(), T::from_json(v, &field_path(path, k))?)))
            .collect()
    }

    fn validate_json(value: &Value, path: &str) -> Result<()> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::invalid_field(path, format!("expected an object, got {value}")))?;
        for (k, v) in map {
            T::validate_json(v, &field_path(path, k))?;
        }
        Ok(())
    }

    fn eq_json(a: &Value, b: &Value) -> bool {
        match (a.as_object(), b.as_object()) {
            (Some(a), Some(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, x)| b.get(k).is_some_and(|y| T::eq_json(x, y)))
            }
            _ => a == b,
        }
    }
}
