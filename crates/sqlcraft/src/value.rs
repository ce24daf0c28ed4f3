//! Opaque parameter values.
//!
//! Builders never inspect a [`Value`]; they only record it in call order so the
//! connectivity layer can bind it by position. [`Value`] implements
//! [`ToSql`] for that purpose and [`FromValue`] converts values back into Rust
//! types when mapping rows.

use crate::error::{SqlError, SqlResult};
use crate::normalize::ValueKind;
use bytes::BytesMut;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use uuid::Uuid;

/// A bound parameter or column value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    Json(serde_json::Value),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// The kind of this value, used by normalizers to pick a conversion.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Json(_) => ValueKind::Json,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```ignore
/// let params = sqlcraft::params![1, "alice", true];
/// ```
#[macro_export]
macro_rules! params {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}

macro_rules! impl_from_value {
    ($($ty:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v $(as $cast)?)
                }
            }
        )*
    };
}

impl_from_value! {
    bool => Bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float,
    String => Text,
    Vec<u8> => Bytes,
    serde_json::Value => Json,
    Uuid => Uuid,
    DateTime<Utc> => Timestamp,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Value::Text(v.clone())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Bytes(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql_checked(ty, out),
            Value::Int(v) => {
                if *ty == Type::INT2 {
                    i16::try_from(*v)?.to_sql_checked(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*v)?.to_sql_checked(ty, out)
                } else {
                    v.to_sql_checked(ty, out)
                }
            }
            Value::Float(v) => {
                if *ty == Type::FLOAT4 {
                    (*v as f32).to_sql_checked(ty, out)
                } else {
                    v.to_sql_checked(ty, out)
                }
            }
            Value::Text(v) => v.to_sql_checked(ty, out),
            Value::Bytes(v) => v.to_sql_checked(ty, out),
            Value::Json(v) => v.to_sql_checked(ty, out),
            Value::Uuid(v) => v.to_sql_checked(ty, out),
            Value::Timestamp(v) => v.to_sql_checked(ty, out),
        }
    }

    /// Any column type; each variant checks the actual type when binding.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// Conversion from a [`Value`] into a Rust type.
///
/// `KIND` is the value kind the type expects; row mapping normalizes column
/// values to it before converting.
pub trait FromValue: Sized {
    const KIND: ValueKind;

    fn from_value(value: Value) -> SqlResult<Self>;
}

fn mismatch<T>(expected: ValueKind, value: &Value) -> SqlResult<T> {
    Err(SqlError::conversion(
        format!("{expected:?}"),
        format!("{:?}", value.kind()),
    ))
}

macro_rules! impl_from_value_trait {
    ($($ty:ty => $kind:ident, $variant:ident);* $(;)?) => {
        $(
            impl FromValue for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn from_value(value: Value) -> SqlResult<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => mismatch(Self::KIND, &other),
                    }
                }
            }
        )*
    };
}

impl_from_value_trait! {
    bool => Bool, Bool;
    i64 => Int, Int;
    f64 => Float, Float;
    String => Text, Text;
    Vec<u8> => Bytes, Bytes;
    serde_json::Value => Json, Json;
    Uuid => Uuid, Uuid;
    DateTime<Utc> => Timestamp, Timestamp;
}

impl FromValue for i32 {
    const KIND: ValueKind = ValueKind::Int;

    fn from_value(value: Value) -> SqlResult<Self> {
        let v = i64::from_value(value)?;
        i32::try_from(v).map_err(|_| SqlError::conversion("i32", format!("out of range integer {v}")))
    }
}

impl<T: FromValue> FromValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn from_value(value: Value) -> SqlResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for Value {
    const KIND: ValueKind = ValueKind::Any;

    fn from_value(value: Value) -> SqlResult<Self> {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_macro_converts_each_expression() {
        let params = crate::params![1, "a", true, None::<i32>];
        assert_eq!(
            params,
            vec![
                Value::Int(1),
                Value::Text("a".to_string()),
                Value::Bool(true),
                Value::Null,
            ]
        );
        assert!(crate::params![].is_empty());
    }

    #[test]
    fn from_value_rejects_mismatched_kind() {
        let err = i64::from_value(Value::from("x")).unwrap_err();
        assert!(matches!(err, SqlError::Conversion { .. }));
        assert_eq!(Option::<i64>::from_value(Value::Null).unwrap(), None);
        assert_eq!(i32::from_value(Value::Int(7)).unwrap(), 7);
        assert!(i32::from_value(Value::Int(i64::MAX)).is_err());
    }

    #[test]
    fn binding_rejects_mismatched_column_types() {
        let mut buf = BytesMut::new();
        assert!(Value::Int(10).to_sql_checked(&Type::FLOAT8, &mut buf).is_err());
        assert!(Value::from("abcdefgh").to_sql_checked(&Type::INT8, &mut buf).is_err());
        assert!(Value::Bool(true).to_sql_checked(&Type::TEXT, &mut buf).is_err());
        assert!(buf.is_empty());
    }

    #[test]
    fn binding_narrows_to_column_width() {
        let mut buf = BytesMut::new();
        Value::Int(10).to_sql_checked(&Type::INT4, &mut buf).unwrap();
        assert_eq!(&buf[..], &[0, 0, 0, 10]);

        buf.clear();
        Value::Float(1.5).to_sql_checked(&Type::FLOAT4, &mut buf).unwrap();
        assert_eq!(buf.len(), 4);

        assert!(Value::Int(i64::MAX).to_sql_checked(&Type::INT2, &mut buf).is_err());
        assert!(matches!(
            Value::Null.to_sql_checked(&Type::INT8, &mut buf),
            Ok(IsNull::Yes)
        ));
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(Value::Int(5)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "int", "value": 5}));
        let null = serde_json::to_value(Value::Null).unwrap();
        assert_eq!(null, serde_json::json!({"type": "null"}));
    }
}
