use quarry_core::{stmt::ColumnValue, Error, Result};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

/// Borrowed wrapper binding a [`ColumnValue`] as a SQLite parameter.
#[derive(Debug)]
pub struct Value<'a>(&'a ColumnValue);

impl<'a> From<&'a ColumnValue> for Value<'a> {
    fn from(value: &'a ColumnValue) -> Self {
        Self(value)
    }
}

impl Value<'_> {
    /// Reads one column of a fetched row.
    ///
    /// SQLite has no boolean or JSON storage class, so integers and text
    /// come back as-is and the entity layer restores the declared kind.
    pub fn from_sql(value: ValueRef<'_>) -> Result<ColumnValue> {
        Ok(match value {
            ValueRef::Null => ColumnValue::Null,
            ValueRef::Integer(v) => ColumnValue::Int(v),
            ValueRef::Text(v) => ColumnValue::Text(
                std::str::from_utf8(v)
                    .map_err(|_| Error::type_conversion("Text", "String"))?
                    .to_owned(),
            ),
            ValueRef::Blob(v) => ColumnValue::SerializedObject(v.to_vec()),
            ValueRef::Real(_) => return Err(Error::type_conversion("Real", "ColumnValue")),
        })
    }
}

impl ToSql for Value<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self.0 {
            ColumnValue::Null => ToSqlOutput::Owned(SqlValue::Null),
            ColumnValue::Bool(true) => ToSqlOutput::Owned(SqlValue::Integer(1)),
            ColumnValue::Bool(false) => ToSqlOutput::Owned(SqlValue::Integer(0)),
            ColumnValue::Int(v) => ToSqlOutput::Owned(SqlValue::Integer(*v)),
            ColumnValue::Text(v) | ColumnValue::JsonArray(v) => {
                ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))
            }
            ColumnValue::SerializedObject(v) => ToSqlOutput::Borrowed(ValueRef::Blob(&v[..])),
        })
    }
}
