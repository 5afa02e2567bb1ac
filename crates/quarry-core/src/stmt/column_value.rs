use super::Value;
use crate::{schema::ScalarKind, Error, Result};

/// The storage-safe form of a [`Value`], as bound to and read from a driver.
///
/// Objects become a serialized blob and arrays a JSON string; scalars pass
/// through unchanged.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum ColumnValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    SerializedObject(Vec<u8>),
    JsonArray(String),
}

impl ColumnValue {
    /// Flattens a property value into its stored form.
    pub fn encode(value: &Value) -> Result<Self> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(v) => Self::Bool(*v),
            Value::I64(v) => Self::Int(*v),
            Value::String(v) => Self::Text(v.clone()),
            Value::Object(v) => Self::SerializedObject(serde_json::to_vec(v)?),
            Value::Array(v) => Self::JsonArray(serde_json::to_string(v)?),
        })
    }

    /// Restores a property value from its stored form.
    ///
    /// `kind` is the declared kind of the property the value is read into.
    /// Drivers cannot tell a JSON string from plain text, nor a boolean from
    /// an integer, so the declared kind decides. Without a kind, values
    /// decode to their most literal form.
    pub fn decode(self, kind: Option<ScalarKind>) -> Result<Value> {
        Ok(match (self, kind) {
            (Self::Null, _) => Value::Null,
            (Self::Bool(v), _) => Value::Bool(v),
            (Self::Int(v), Some(ScalarKind::Bool)) => Value::Bool(v != 0),
            (Self::Int(v), _) => Value::I64(v),
            (Self::Text(v), Some(ScalarKind::Object)) => decode_object(v.as_bytes())?,
            (Self::Text(v), Some(ScalarKind::Array)) => decode_array(&v)?,
            (Self::Text(v), _) => Value::String(v),
            (Self::SerializedObject(v), Some(ScalarKind::String)) => {
                Value::String(String::from_utf8(v).map_err(|_| {
                    Error::type_conversion("SerializedObject", "String")
                })?)
            }
            (Self::SerializedObject(v), _) => decode_object(&v)?,
            (Self::JsonArray(v), Some(ScalarKind::String)) => Value::String(v),
            (Self::JsonArray(v), _) => decode_array(&v)?,
        })
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "Null",
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Text(_) => "Text",
            Self::SerializedObject(_) => "SerializedObject",
            Self::JsonArray(_) => "JsonArray",
        }
    }
}

fn decode_object(bytes: &[u8]) -> Result<Value> {
    match serde_json::from_slice(bytes)? {
        serde_json::Value::Object(map) => Ok(Value::Object(map)),
        serde_json::Value::Null => Ok(Value::Null),
        _ => Err(Error::type_conversion("SerializedObject", "Object")),
    }
}

fn decode_array(text: &str) -> Result<Value> {
    match serde_json::from_str(text)? {
        serde_json::Value::Array(items) => Ok(Value::Array(items)),
        serde_json::Value::Null => Ok(Value::Null),
        _ => Err(Error::type_conversion("JsonArray", "Array")),
    }
}
