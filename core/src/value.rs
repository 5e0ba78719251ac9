//! Scalar values and column type descriptors.
//!
//! This module defines the engine-facing scalar representation used on both
//! sides of the mapping layer. [`Value`] is what a record field becomes on
//! the way into the database; [`FromValue`] converts it back on the way out.
//! [`ColumnType`] and [`Column`] describe the shape of a single table column,
//! and [`FieldType`] maps a Rust field type to its column type at compile
//! time so record declarations never spell out SQL types.
//!
//! Coercions are deliberately lossless: an integer cell may become an `f64`,
//! a `0`/`1` integer may become a `bool`, and nothing else converts across
//! kinds. Anything lossy is reported as a [`TypeMismatch`].

use serde::{Deserialize, Serialize};

/// One scalar cell as stored by the engine.
///
/// Booleans are stored as integers (`0`/`1`), matching the engine's own
/// storage classes. `Null` doubles as "column absent" on the read path.
///
/// # Examples
///
/// ```
/// use record_store_core::Value;
///
/// let v = Value::from(true);
/// assert_eq!(v, Value::Integer(1));
///
/// let v = Value::from("hello");
/// assert_eq!(v, Value::Text("hello".to_string()));
///
/// let v = Value::from(None::<i64>);
/// assert_eq!(v, Value::Null);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Value {
    /// Absent value (SQL `NULL`).
    #[default]
    Null,
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit floating point.
    Real(f64),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

impl Value {
    /// Returns the storage-class name of this value, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Text(_) => "text",
            Value::Blob(_) => "blob",
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Blob(v.to_vec())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

/// A failed scalar coercion: the value's storage class did not match the
/// requested field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeMismatch {
    /// What the field type asked for.
    pub expected: &'static str,
    /// The storage class actually found.
    pub found: &'static str,
}

/// Conversion from an engine scalar back into a Rust field value.
///
/// Implementations only accept lossless conversions; see the module docs.
pub trait FromValue: Sized {
    /// Converts a non-null [`Value`] into `Self`.
    fn from_value(value: &Value) -> Result<Self, TypeMismatch>;
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Integer(v) => Ok(*v),
            other => Err(TypeMismatch {
                expected: "integer",
                found: other.kind(),
            }),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Integer(v) => i32::try_from(*v).map_err(|_| TypeMismatch {
                expected: "32-bit integer",
                found: "integer",
            }),
            other => Err(TypeMismatch {
                expected: "32-bit integer",
                found: other.kind(),
            }),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Integer(0) => Ok(false),
            Value::Integer(1) => Ok(true),
            other => Err(TypeMismatch {
                expected: "boolean (0 or 1)",
                found: other.kind(),
            }),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Real(v) => Ok(*v),
            // Integer cells widen losslessly for REAL columns read back
            // through an integer-affinity path.
            Value::Integer(v) => Ok(*v as f64),
            other => Err(TypeMismatch {
                expected: "real",
                found: other.kind(),
            }),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Text(v) => Ok(v.clone()),
            other => Err(TypeMismatch {
                expected: "text",
                found: other.kind(),
            }),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Blob(v) => Ok(v.clone()),
            other => Err(TypeMismatch {
                expected: "blob",
                found: other.kind(),
            }),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// Semantic type of a table column.
///
/// Maps one-to-one onto the engine's storage classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// UTF-8 text (`TEXT`).
    Text,
    /// 64-bit integer, also used for booleans (`INTEGER`).
    Integer,
    /// Floating point (`REAL`).
    Real,
    /// Raw bytes (`BLOB`).
    Blob,
}

impl ColumnType {
    /// Returns the SQL type keyword for this column type.
    pub fn sql(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Blob => "BLOB",
        }
    }
}

/// One declared column of a record type: a name and a semantic type.
///
/// # Examples
///
/// ```
/// use record_store_core::{Column, ColumnType};
///
/// let col = Column::new("age", ColumnType::Integer);
/// assert_eq!(col.name, "age");
/// assert_eq!(col.ty.sql(), "INTEGER");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, identical to the declared field name.
    pub name: String,
    /// Semantic column type.
    pub ty: ColumnType,
}

impl Column {
    /// Creates a column descriptor.
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Compile-time mapping from a Rust field type to its column type.
///
/// Implemented for the supported field types; `Option<T>` inherits the
/// column type of `T` (the column simply becomes nullable).
pub trait FieldType {
    /// The column type this field maps to.
    const COLUMN_TYPE: ColumnType;
}

impl FieldType for String {
    const COLUMN_TYPE: ColumnType = ColumnType::Text;
}

impl FieldType for i64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Integer;
}

impl FieldType for i32 {
    const COLUMN_TYPE: ColumnType = ColumnType::Integer;
}

impl FieldType for bool {
    const COLUMN_TYPE: ColumnType = ColumnType::Integer;
}

impl FieldType for f64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Real;
}

impl FieldType for Vec<u8> {
    const COLUMN_TYPE: ColumnType = ColumnType::Blob;
}

impl<T: FieldType> FieldType for Option<T> {
    const COLUMN_TYPE: ColumnType = T::COLUMN_TYPE;
}
