use crate::{Error, Result};

use serde::{de::DeserializeOwned, Serialize};

/// An entity property value.
///
/// Composite values (`Object`, `Array`) are kept structured here; they are
/// only flattened into a storage-safe form by
/// [`ColumnValue::encode`](super::ColumnValue::encode).
#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),

    /// A structured object, stored as a serialized blob
    Object(serde_json::Map<String, serde_json::Value>),

    /// A list, stored as a JSON string
    Array(Vec<serde_json::Value>),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for values that can be compared with `=` in a WHERE
    /// clause and used as a primary key.
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Bool(_) | Self::I64(_) | Self::String(_))
    }

    /// Serializes `value` into an `Object`.
    ///
    /// Fails if `value` does not serialize to a JSON object.
    pub fn object<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => Ok(Self::Object(map)),
            serde_json::Value::Null => Ok(Self::Null),
            other => Err(Error::type_conversion(json_kind_name(&other), "Object")),
        }
    }

    /// Converts a JSON value into its `Value` form.
    ///
    /// Fails on numbers that do not fit in an `i64`.
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        Ok(match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(v) => Self::Bool(v),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(v) => Self::I64(v),
                None => return Err(Error::type_conversion("Number", "I64")),
            },
            serde_json::Value::String(v) => Self::String(v),
            serde_json::Value::Array(v) => Self::Array(v),
            serde_json::Value::Object(v) => Self::Object(v),
        })
    }

    /// Deserializes this value into `T` through its JSON form.
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(self.into_json())?)
    }

    pub fn into_json(self) -> serde_json::Value {
        match self {
            Self::Bool(v) => serde_json::Value::Bool(v),
            Self::I64(v) => serde_json::Value::from(v),
            Self::Null => serde_json::Value::Null,
            Self::String(v) => serde_json::Value::String(v),
            Self::Object(v) => serde_json::Value::Object(v),
            Self::Array(v) => serde_json::Value::Array(v),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::I64(_) => "I64",
            Self::Null => "Null",
            Self::String(_) => "String",
            Self::Object(_) => "Object",
            Self::Array(_) => "Array",
        }
    }
}

fn json_kind_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "Null",
        serde_json::Value::Bool(_) => "Bool",
        serde_json::Value::Number(_) => "Number",
        serde_json::Value::String(_) => "String",
        serde_json::Value::Array(_) => "Array",
        serde_json::Value::Object(_) => "Object",
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I64(src.into())
    }
}

impl From<u32> for Value {
    fn from(src: u32) -> Self {
        Self::I64(src.into())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Value {
    fn from(src: serde_json::Map<String, serde_json::Value>) -> Self {
        Self::Object(src)
    }
}

impl From<Vec<serde_json::Value>> for Value {
    fn from(src: Vec<serde_json::Value>) -> Self {
        Self::Array(src)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Value::from(value),
            None => Value::Null,
        }
    }
}

/// Conversion from a [`Value`] read out of a [`Record`](super::Record).
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            Value::I64(v) => Ok(v != 0),
            other => Err(Error::type_conversion(other.kind_name(), "bool")),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => Ok(v),
            other => Err(Error::type_conversion(other.kind_name(), "i64")),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => i32::try_from(v).map_err(|_| Error::type_conversion("I64", "i32")),
            other => Err(Error::type_conversion(other.kind_name(), "i32")),
        }
    }
}

impl FromValue for u32 {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::I64(v) => u32::try_from(v).map_err(|_| Error::type_conversion("I64", "u32")),
            other => Err(Error::type_conversion(other.kind_name(), "u32")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::String(v) => Ok(v),
            other => Err(Error::type_conversion(other.kind_name(), "String")),
        }
    }
}

impl FromValue for serde_json::Map<String, serde_json::Value> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(v) => Ok(v),
            other => Err(Error::type_conversion(other.kind_name(), "Object")),
        }
    }
}

impl FromValue for Vec<serde_json::Value> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Array(v) => Ok(v),
            other => Err(Error::type_conversion(other.kind_name(), "Array")),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            value => T::from_value(value).map(Some),
        }
    }
}
