//! The record descriptor trait and the row representation.
//!
//! A [`Record`] carries its own schema: the declared columns in declaration
//! order, the canonical table name, and the two conversions between an
//! instance and a [`Row`]. Declaring the schema alongside the type replaces
//! runtime introspection — the mapping layer never inspects a record beyond
//! what the trait exposes.
//!
//! [`Row`] is the ephemeral column→value mapping produced per result tuple
//! and consumed per write; it preserves column order and is never cached.

use thiserror::Error;

use crate::value::{Column, FromValue, Value};

/// A failed field read or write on a record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A row cell could not be coerced into the declared field type.
    #[error("field `{field}`: expected {expected}, found {found}")]
    FieldAccess {
        /// The declared field (column) name.
        field: String,
        /// The field's expected storage class.
        expected: &'static str,
        /// The storage class actually present in the row.
        found: &'static str,
    },
}

/// An ordered column→value mapping for one engine tuple.
///
/// Produced by `Record::to_row` on the write path and captured from a result
/// set on the read path. Lookup is linear; rows are small and short-lived.
///
/// # Examples
///
/// ```
/// use record_store_core::{Row, Value};
///
/// let mut row = Row::new();
/// row.push("name", "ada");
/// row.push("age", 36i64);
///
/// assert_eq!(row.get("age"), Some(&Value::Integer(36)));
/// assert_eq!(row.field::<String>("name").unwrap(), "ada");
/// // Absent columns read back as the field type's default.
/// assert_eq!(row.field::<i64>("missing").unwrap(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. Order is preserved.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.columns.push((name.into(), value.into()));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(name, value);
        self
    }

    /// Looks up a column by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the row carries a column with this name.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of columns in the row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates columns in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Reads a column as a typed field value.
    ///
    /// Absent columns and `NULL` cells fall back to the field type's
    /// `Default`, so instances can still be constructed from projected
    /// result sets or rows that predate an added column. A present cell of
    /// the wrong storage class is a [`RecordError::FieldAccess`].
    pub fn field<T: FromValue + Default>(&self, name: &str) -> Result<T, RecordError> {
        match self.get(name) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(value) => T::from_value(value).map_err(|m| RecordError::FieldAccess {
                field: name.to_string(),
                expected: m.expected,
                found: m.found,
            }),
        }
    }
}

/// A user-defined data shape mapped to a table.
///
/// Implementations declare their columns once, in field declaration order,
/// and provide the instance↔row conversions. The [`record!`](crate::record)
/// macro generates all of this from a struct definition.
///
/// # Examples
///
/// ```
/// use record_store_core::{Column, ColumnType, Record, RecordError, Row};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Bookmark {
///     url: String,
///     visits: i64,
/// }
///
/// impl Record for Bookmark {
///     fn columns() -> Vec<Column> {
///         vec![
///             Column::new("url", ColumnType::Text),
///             Column::new("visits", ColumnType::Integer),
///         ]
///     }
///
///     fn to_row(&self) -> Row {
///         Row::new()
///             .with("url", self.url.clone())
///             .with("visits", self.visits)
///     }
///
///     fn from_row(row: &Row) -> Result<Self, RecordError> {
///         Ok(Self {
///             url: row.field("url")?,
///             visits: row.field("visits")?,
///         })
///     }
/// }
///
/// assert_eq!(Bookmark::table_name(), "bookmark");
/// ```
pub trait Record {
    /// Stable identifier for this record type, used as the registry key.
    ///
    /// Defaults to the fully-qualified Rust type name.
    fn type_id() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Canonical table name: the last path segment of
    /// [`type_id`](Self::type_id), lower-cased.
    fn table_name() -> String {
        let id = Self::type_id();
        id.rsplit("::").next().unwrap_or(id).to_ascii_lowercase()
    }

    /// Declared columns in field declaration order.
    ///
    /// The identity column is never declared here; the engine adds it when
    /// the table is created with identity.
    fn columns() -> Vec<Column>;

    /// Converts this instance into a column→value row for writes.
    fn to_row(&self) -> Row;

    /// Constructs an instance from a result row.
    ///
    /// Unmapped row columns (e.g. the identity column) are ignored; declared
    /// fields absent from the row fall back to their defaults.
    fn from_row(row: &Row) -> Result<Self, RecordError>
    where
        Self: Sized;
}

/// Object-safe view of a record, for heterogeneous containers.
///
/// Blanket-implemented for every [`Record`]; exposes exactly what the write
/// path needs (identity, table, schema, row), since reads are always typed.
/// Method names are distinct from [`Record`]'s so code with both traits in
/// scope never hits method-resolution ambiguity on concrete record types.
pub trait AnyRecord {
    /// See [`Record::type_id`].
    fn record_type_id(&self) -> &'static str;
    /// See [`Record::table_name`].
    fn record_table_name(&self) -> String;
    /// See [`Record::columns`].
    fn record_columns(&self) -> Vec<Column>;
    /// See [`Record::to_row`].
    fn record_row(&self) -> Row;
}

impl<T: Record> AnyRecord for T {
    fn record_type_id(&self) -> &'static str {
        T::type_id()
    }

    fn record_table_name(&self) -> String {
        T::table_name()
    }

    fn record_columns(&self) -> Vec<Column> {
        T::columns()
    }

    fn record_row(&self) -> Row {
        T::to_row(self)
    }
}
