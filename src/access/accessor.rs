use std::borrow::Cow;

use time::OffsetDateTime;

use super::coerce::{to_date, to_number, truthy};
use super::AccessError;
use crate::{Map, Value};

const ANY: &str = "any value";
const STRING: &str = "string";
const NUMBER: &str = "number";
const BOOLEAN: &str = "boolean";
const DATE: &str = "date";
const ARRAY: &str = "array";
const OBJECT: &str = "object";
const OBJECT_ARRAY: &str = "array of objects";

/// A labeled, read-only view over a key-value mapping with type-checked getters.
///
/// The label identifies the accessor's position in a larger structure
/// (`"config.server"`, `"config.servers[2]"`) and appears in every error it
/// raises. Traversing into nested objects yields child accessors whose labels
/// extend the parent's.
///
/// Every getter resolves its key the same way:
///
/// 1. A key that is present is used, whatever its value (`null`, `false`,
///    `0` and `""` included).
/// 2. An absent key falls back to the supplied default, if any.
/// 3. Otherwise the read fails with [`AccessError::MissingKey`].
///
/// The `_or` variants take the fallback, which goes through the same
/// coercion as a stored value. The `_opt` variants return `Ok(None)` for an
/// absent key but still fail on a present value of the wrong type.
///
/// ## Example
///
/// ```
/// use dragon_access::TypedAccessor;
/// use serde_json::json;
///
/// let data = dragon_access::Value::from(json!({
///     "server": { "host": "localhost", "port": "8080" },
/// }));
/// let config = TypedAccessor::new("config", &data)?;
///
/// let server = config.get_object("server")?;
/// assert_eq!(server.label(), "config.server");
/// assert_eq!(server.get_string("host")?, "localhost");
/// assert_eq!(server.get_number("port")?, 8080.0);
/// assert!(!server.get_boolean_or("tls", false)?);
/// # Ok::<(), dragon_access::AccessError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TypedAccessor<'a> {
    label: String,
    source: Cow<'a, Map>,
}

impl<'a> TypedAccessor<'a> {
    /// Wraps a borrowed value, which must be an object.
    pub fn new(label: impl Into<String>, source: &'a Value) -> Result<Self, AccessError> {
        let label = label.into();
        match source {
            Value::Object(map) => Ok(Self::from_map(label, map)),
            other => Err(AccessError::InvalidInput {
                label,
                found: other.to_string(),
            }),
        }
    }

    /// Wraps an owned value, which must be an object.
    pub fn from_value(label: impl Into<String>, source: Value) -> Result<Self, AccessError> {
        let label = label.into();
        match source {
            Value::Object(map) => Ok(Self {
                label,
                source: Cow::Owned(map),
            }),
            other => Err(AccessError::InvalidInput {
                label,
                found: other.to_string(),
            }),
        }
    }

    /// Wraps a borrowed mapping.
    pub fn from_map(label: impl Into<String>, source: &'a Map) -> Self {
        Self {
            label: label.into(),
            source: Cow::Borrowed(source),
        }
    }

    pub(crate) fn from_owned_map(label: impl Into<String>, source: Map) -> Self {
        Self {
            label: label.into(),
            source: Cow::Owned(source),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns `true` if `key` is present, even when its value is null.
    pub fn has(&self, key: &str) -> bool {
        self.source.contains_key(key)
    }

    /// Returns the keys of the wrapped mapping in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.source.keys().map(String::as_str)
    }

    /// Returns the wrapped mapping, bypassing all validation.
    pub fn raw(&self) -> &Map {
        &self.source
    }

    /// Returns the untyped value at `key`.
    pub fn get(&self, key: &str) -> Result<&Value, AccessError> {
        self.source.get(key).ok_or_else(|| self.missing(key, ANY))
    }

    /// Returns the untyped value at `key`, or `fallback` if the key is absent.
    pub fn get_or(&self, key: &str, fallback: impl Into<Value>) -> Cow<'_, Value> {
        match self.source.get(key) {
            Some(value) => Cow::Borrowed(value),
            None => Cow::Owned(fallback.into()),
        }
    }

    pub fn get_string(&self, key: &str) -> Result<String, AccessError> {
        self.string(key, None)
    }

    pub fn get_string_or(
        &self,
        key: &str,
        fallback: impl Into<Value>,
    ) -> Result<String, AccessError> {
        self.string(key, Some(fallback.into()))
    }

    pub fn get_string_opt(&self, key: &str) -> Result<Option<String>, AccessError> {
        self.optional(key, || self.string(key, None))
    }

    /// Reads a finite number.
    ///
    /// Strings are parsed: as a float when they contain a `.`, otherwise as
    /// an integer (with `0x` hexadecimal support). Leading whitespace is
    /// skipped and the longest numeric prefix is used.
    pub fn get_number(&self, key: &str) -> Result<f64, AccessError> {
        self.number(key, None)
    }

    pub fn get_number_or(&self, key: &str, fallback: impl Into<Value>) -> Result<f64, AccessError> {
        self.number(key, Some(fallback.into()))
    }

    pub fn get_number_opt(&self, key: &str) -> Result<Option<f64>, AccessError> {
        self.optional(key, || self.number(key, None))
    }

    /// Reads a boolean, coercing any other value by truthiness.
    ///
    /// Null, zero, NaN and the empty string are false; everything else is
    /// true. Only a missing key can make this fail.
    pub fn get_boolean(&self, key: &str) -> Result<bool, AccessError> {
        self.boolean(key, None)
    }

    pub fn get_boolean_or(
        &self,
        key: &str,
        fallback: impl Into<Value>,
    ) -> Result<bool, AccessError> {
        self.boolean(key, Some(fallback.into()))
    }

    pub fn get_boolean_opt(&self, key: &str) -> Result<Option<bool>, AccessError> {
        self.optional(key, || self.boolean(key, None))
    }

    /// Reads a date.
    ///
    /// Strings are parsed as calendar date-times and numbers are taken as
    /// milliseconds since the Unix epoch. Either must land strictly after the
    /// epoch.
    pub fn get_date(&self, key: &str) -> Result<OffsetDateTime, AccessError> {
        self.date(key, None)
    }

    pub fn get_date_or(
        &self,
        key: &str,
        fallback: impl Into<Value>,
    ) -> Result<OffsetDateTime, AccessError> {
        self.date(key, Some(fallback.into()))
    }

    pub fn get_date_opt(&self, key: &str) -> Result<Option<OffsetDateTime>, AccessError> {
        self.optional(key, || self.date(key, None))
    }

    /// Reads an array without inspecting its elements.
    pub fn get_array(&self, key: &str) -> Result<Cow<'_, [Value]>, AccessError> {
        self.array(key, None, ARRAY)
    }

    pub fn get_array_or(
        &self,
        key: &str,
        fallback: impl Into<Value>,
    ) -> Result<Cow<'_, [Value]>, AccessError> {
        self.array(key, Some(fallback.into()), ARRAY)
    }

    /// Reads an array of objects, wrapping each element in a child accessor
    /// labeled `label.key[index]`.
    pub fn get_object_array(&self, key: &str) -> Result<Vec<TypedAccessor<'_>>, AccessError> {
        self.object_array(key, None)
    }

    pub fn get_object_array_or(
        &self,
        key: &str,
        fallback: impl Into<Value>,
    ) -> Result<Vec<TypedAccessor<'_>>, AccessError> {
        self.object_array(key, Some(fallback.into()))
    }

    /// Reads a nested object as a child accessor labeled `label.key`.
    pub fn get_object(&self, key: &str) -> Result<TypedAccessor<'_>, AccessError> {
        self.object(key, None)
    }

    pub fn get_object_or(
        &self,
        key: &str,
        fallback: impl Into<Value>,
    ) -> Result<TypedAccessor<'_>, AccessError> {
        self.object(key, Some(fallback.into()))
    }

    /// Reads a nested object without wrapping it.
    pub fn get_raw_object(&self, key: &str) -> Result<Cow<'_, Map>, AccessError> {
        self.raw_object(key, None, OBJECT)
    }

    pub fn get_raw_object_or(
        &self,
        key: &str,
        fallback: impl Into<Value>,
    ) -> Result<Cow<'_, Map>, AccessError> {
        self.raw_object(key, Some(fallback.into()), OBJECT)
    }

    /// Resolves `key` to its stored value, else the fallback, else fails.
    fn lookup(
        &self,
        key: &str,
        fallback: Option<Value>,
        expected: &'static str,
    ) -> Result<Cow<'_, Value>, AccessError> {
        if let Some(value) = self.source.get(key) {
            return Ok(Cow::Borrowed(value));
        }
        match fallback {
            Some(value) => {
                tracing::trace!(label = %self.label, key, "key absent, using fallback");
                Ok(Cow::Owned(value))
            }
            None => Err(self.missing(key, expected)),
        }
    }

    fn optional<T>(
        &self,
        key: &str,
        read: impl FnOnce() -> Result<T, AccessError>,
    ) -> Result<Option<T>, AccessError> {
        if self.has(key) {
            read().map(Some)
        } else {
            Ok(None)
        }
    }

    fn string(&self, key: &str, fallback: Option<Value>) -> Result<String, AccessError> {
        match self.lookup(key, fallback, STRING)? {
            Cow::Borrowed(Value::String(s)) => Ok(s.clone()),
            Cow::Owned(Value::String(s)) => Ok(s),
            other => Err(self.mismatch(key, STRING, other.to_string())),
        }
    }

    fn number(&self, key: &str, fallback: Option<Value>) -> Result<f64, AccessError> {
        let value = self.lookup(key, fallback, NUMBER)?;
        to_number(&value).ok_or_else(|| self.mismatch(key, NUMBER, value.to_string()))
    }

    fn boolean(&self, key: &str, fallback: Option<Value>) -> Result<bool, AccessError> {
        let value = self.lookup(key, fallback, BOOLEAN)?;
        Ok(truthy(&value))
    }

    fn date(&self, key: &str, fallback: Option<Value>) -> Result<OffsetDateTime, AccessError> {
        let value = self.lookup(key, fallback, DATE)?;
        to_date(&value).ok_or_else(|| self.mismatch(key, DATE, value.to_string()))
    }

    fn array(
        &self,
        key: &str,
        fallback: Option<Value>,
        expected: &'static str,
    ) -> Result<Cow<'_, [Value]>, AccessError> {
        match self.lookup(key, fallback, expected)? {
            Cow::Borrowed(Value::Array(items)) => Ok(Cow::Borrowed(items.as_slice())),
            Cow::Owned(Value::Array(items)) => Ok(Cow::Owned(items)),
            other => Err(self.mismatch(key, expected, other.to_string())),
        }
    }

    fn object_array(
        &self,
        key: &str,
        fallback: Option<Value>,
    ) -> Result<Vec<TypedAccessor<'_>>, AccessError> {
        let elements: Vec<Cow<'_, Value>> = match self.array(key, fallback, OBJECT_ARRAY)? {
            Cow::Borrowed(items) => items.iter().map(Cow::Borrowed).collect(),
            Cow::Owned(items) => items.into_iter().map(Cow::Owned).collect(),
        };

        elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                into_map(element)
                    .map(|map| TypedAccessor {
                        label: format!("{}.{key}[{index}]", self.label),
                        source: map,
                    })
                    .map_err(|bad| {
                        self.mismatch(key, OBJECT_ARRAY, format!("{bad} at index {index}"))
                    })
            })
            .collect()
    }

    fn object(
        &self,
        key: &str,
        fallback: Option<Value>,
    ) -> Result<TypedAccessor<'_>, AccessError> {
        let map = self.raw_object(key, fallback, OBJECT)?;
        Ok(TypedAccessor {
            label: format!("{}.{key}", self.label),
            source: map,
        })
    }

    fn raw_object(
        &self,
        key: &str,
        fallback: Option<Value>,
        expected: &'static str,
    ) -> Result<Cow<'_, Map>, AccessError> {
        let value = self.lookup(key, fallback, expected)?;
        into_map(value).map_err(|bad| self.mismatch(key, expected, bad.to_string()))
    }

    fn missing(&self, key: &str, expected: &'static str) -> AccessError {
        AccessError::MissingKey {
            key: key.to_string(),
            label: self.label.clone(),
            expected,
        }
    }

    fn mismatch(&self, key: &str, expected: &'static str, found: String) -> AccessError {
        AccessError::TypeMismatch {
            key: key.to_string(),
            label: self.label.clone(),
            expected,
            found,
        }
    }
}

/// Unwraps an object value, handing anything else back unchanged.
fn into_map(value: Cow<'_, Value>) -> Result<Cow<'_, Map>, Cow<'_, Value>> {
    match value {
        Cow::Borrowed(Value::Object(map)) => Ok(Cow::Borrowed(map)),
        Cow::Owned(Value::Object(map)) => Ok(Cow::Owned(map)),
        other => Err(other),
    }
}
