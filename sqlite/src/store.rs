//! The CRUD engine: table creation, saves, updates, deletes, and retrieval.
//!
//! [`RecordStore`] borrows one open connection for its lifetime and
//! orchestrates the other modules: DDL from [`schema`](crate::schema),
//! membership through [`Registry`](crate::Registry), and row conversion
//! through the internal bridging layer. It imposes no locking of its own;
//! concurrent use relies entirely on the engine's serialization.
//!
//! Write-path failures are explicit [`StoreError`] values. Read paths keep
//! soft semantics: a retrieve or column listing against a missing table or
//! column logs a warning and returns empty rather than failing the caller.
//!
//! # Example
//!
//! ```no_run
//! use record_store_core::record;
//! use record_store_sqlite::{Order, RecordStore, Select};
//! use rusqlite::Connection;
//!
//! record! {
//!     pub struct Person {
//!         pub name: String,
//!         pub age: i64,
//!     }
//! }
//!
//! let conn = Connection::open("app.db").unwrap();
//! let store = RecordStore::open(&conn).unwrap();
//!
//! // First save creates the table and registers the type.
//! store.save(&Person { name: "ada".into(), age: 36 }).unwrap();
//!
//! let adults: Vec<Person> = store
//!     .retrieve(&Select::new()
//!         .filter("age >= ?", vec![18i64.into()])
//!         .order_by("age", Order::Descending))
//!     .unwrap();
//! println!("{} adults", adults.len());
//! ```

use record_store_core::{AnyRecord, Batch, Column, Record, Value};
use rusqlite::{Connection, params_from_iter};
use tracing::{debug, warn};

use crate::convert;
use crate::error::{Result, StoreError};
use crate::registry::{REGISTRY_TABLE, Registry};
use crate::schema;

/// Sort direction for [`Select::order_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Ascending (the default).
    #[default]
    Ascending,
    /// Descending.
    Descending,
}

impl Order {
    fn sql(self) -> &'static str {
        match self {
            Order::Ascending => "ASC",
            Order::Descending => "DESC",
        }
    }
}

/// Shape of a retrieval: optional column projection, optional parameterized
/// filter, optional single-column ordering.
///
/// The filter predicate is raw SQL owned by the caller; its `?` placeholders
/// bind the supplied parameters in order. Projected column names and the
/// ordering field are validated as plain identifiers before being
/// interpolated.
///
/// # Examples
///
/// ```
/// use record_store_sqlite::{Order, Select};
///
/// let select = Select::new()
///     .columns(["name"])
///     .filter("age > ?", vec![30i64.into()])
///     .order_by("name", Order::Ascending);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Select {
    columns: Vec<String>,
    filter: Option<(String, Vec<Value>)>,
    order: Option<(String, Order)>,
}

impl Select {
    /// An unconstrained select: all columns, no filter, engine-default order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the projection to the given columns.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Filters rows by a caller-supplied predicate with `?` placeholders.
    pub fn filter(mut self, predicate: impl Into<String>, params: Vec<Value>) -> Self {
        self.filter = Some((predicate.into(), params));
        self
    }

    /// Orders by a single column.
    pub fn order_by(mut self, field: impl Into<String>, order: Order) -> Self {
        self.order = Some((field.into(), order));
        self
    }

    fn build(&self, table: &str) -> Result<(String, Vec<rusqlite::types::Value>)> {
        schema::validate_identifier(table)?;

        let projection = if self.columns.is_empty() {
            "*".to_string()
        } else {
            for column in &self.columns {
                schema::validate_identifier(column)?;
            }
            self.columns.join(", ")
        };

        let mut sql = format!("SELECT {projection} FROM {table}");
        let mut params = Vec::new();
        if let Some((predicate, values)) = &self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(predicate);
            params.extend(values.iter().map(convert::to_sql_value));
        }
        if let Some((field, order)) = &self.order {
            schema::validate_identifier(field)?;
            sql.push_str(&format!(" ORDER BY {field} {}", order.sql()));
        }
        Ok((sql, params))
    }
}

/// Outcome of a batch save: how many records were written, and which
/// elements failed. Successes are never rolled back by later failures.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of records inserted.
    pub saved: usize,
    /// Failed elements as `(batch index, error)`, in batch order.
    pub failures: Vec<(usize, StoreError)>,
}

impl BatchReport {
    /// Returns `true` when every record in the batch was saved.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// High-level mapping engine over one open connection.
///
/// Construction opens the persisted [`Registry`]. The connection is
/// borrowed, never owned: acquisition and teardown stay with the caller.
pub struct RecordStore<'a> {
    conn: &'a Connection,
    registry: Registry<'a>,
}

impl<'a> RecordStore<'a> {
    /// Opens a store over the given connection, creating the registry's
    /// index table if this is a fresh database.
    pub fn open(conn: &'a Connection) -> Result<Self> {
        let registry = Registry::open(conn)?;
        Ok(Self { conn, registry })
    }

    /// Returns the underlying connection.
    pub fn connection(&self) -> &Connection {
        self.conn
    }

    /// Returns the persisted registry.
    pub fn registry(&self) -> &Registry<'a> {
        &self.registry
    }

    /// Creates the table for `T` under its canonical name, with an identity
    /// column, and registers the type.
    pub fn create_table<T: Record>(&self) -> Result<()> {
        self.create_table_as::<T>(&T::table_name(), true)
    }

    /// Creates the table for `T` under an explicit name, optionally with the
    /// autoincrement identity column.
    ///
    /// # Errors
    ///
    /// Reserved or invalid names fail with
    /// [`StoreError::ReservedTableName`]/[`StoreError::InvalidIdentifier`]
    /// before any DDL is issued. Re-creating an existing table surfaces the
    /// engine's failure as [`StoreError::Schema`]; the type stays registered
    /// from the first creation.
    pub fn create_table_as<T: Record>(&self, table: &str, with_identity: bool) -> Result<()> {
        self.create_table_for(T::type_id(), table, &T::columns(), with_identity)
    }

    fn create_table_for(
        &self,
        type_id: &str,
        table: &str,
        columns: &[Column],
        with_identity: bool,
    ) -> Result<()> {
        let sql = schema::create_table_sql(table, columns, with_identity)?;
        debug!(table = %table, type_id = %type_id, "creating table");
        self.conn
            .execute_batch(&sql)
            .map_err(|e| StoreError::Schema(format!("failed to create table `{table}`: {e}")))?;
        // Register only after the DDL succeeds so a failed create never
        // leaves a stale entry.
        self.registry.register(type_id)
    }

    /// Saves one record, creating and registering its table first if the
    /// type has never been seen by this database.
    ///
    /// Returns the new row's identity. An insert failure — typically a
    /// registry entry gone stale because the table was dropped out-of-band —
    /// is returned, not swallowed; re-create the table explicitly to
    /// recover.
    pub fn save<T: Record>(&self, record: &T) -> Result<i64> {
        self.save_any(record)
    }

    fn save_any(&self, record: &dyn AnyRecord) -> Result<i64> {
        let type_id = record.record_type_id();
        if !self.registry.is_registered(type_id)? {
            self.create_table_for(
                type_id,
                &record.record_table_name(),
                &record.record_columns(),
                true,
            )?;
        }
        self.insert(&record.record_table_name(), &record.record_row())
    }

    fn insert(&self, table: &str, row: &record_store_core::Row) -> Result<i64> {
        schema::validate_identifier(table)?;
        if row.is_empty() {
            return Err(StoreError::Query(format!(
                "record for table `{table}` produced no columns"
            )));
        }
        let mut columns = Vec::with_capacity(row.len());
        for (name, _) in row.iter() {
            schema::validate_identifier(name)?;
            columns.push(name);
        }
        let placeholders = vec!["?"; columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({placeholders})",
            columns.join(", ")
        );
        self.conn
            .execute(&sql, params_from_iter(convert::params_from_row(row)))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Saves every record in a batch independently, in order.
    ///
    /// Not a transaction: per-element failures are logged, collected into
    /// the report, and do not roll back earlier saves. Callers wanting
    /// atomicity can wrap the call in their own transaction.
    pub fn save_batch(&self, batch: &Batch) -> BatchReport {
        let mut report = BatchReport::default();
        for (index, record) in batch.records().iter().enumerate() {
            match self.save_any(record.as_ref()) {
                Ok(_) => report.saved += 1,
                Err(e) => {
                    warn!(
                        index,
                        table = %record.record_table_name(),
                        error = %e,
                        "batch save: record skipped"
                    );
                    report.failures.push((index, e));
                }
            }
        }
        report
    }

    /// Updates rows matching a caller-supplied predicate with the record's
    /// column values. Returns the number of rows affected.
    ///
    /// There is no implicit identity matching: the caller owns the
    /// predicate, whose `?` placeholders bind `params` after the record's
    /// columns.
    pub fn update<T: Record>(&self, record: &T, predicate: &str, params: &[Value]) -> Result<usize> {
        let table = T::table_name();
        schema::validate_identifier(&table)?;
        let row = record.to_row();
        if row.is_empty() {
            return Err(StoreError::Query(format!(
                "record for table `{table}` produced no columns"
            )));
        }
        let mut assignments = Vec::with_capacity(row.len());
        for (name, _) in row.iter() {
            schema::validate_identifier(name)?;
            assignments.push(format!("{name} = ?"));
        }
        let sql = format!(
            "UPDATE {table} SET {} WHERE {predicate}",
            assignments.join(", ")
        );
        let mut bound = convert::params_from_row(&row);
        bound.extend(params.iter().map(convert::to_sql_value));
        Ok(self.conn.execute(&sql, params_from_iter(bound))?)
    }

    /// Deletes rows matching a caller-supplied predicate; an empty predicate
    /// deletes every row. Returns the number of rows affected.
    ///
    /// A missing table is an explicit error the caller may ignore.
    pub fn delete<T: Record>(&self, predicate: &str, params: &[Value]) -> Result<usize> {
        let table = T::table_name();
        schema::validate_identifier(&table)?;
        let sql = if predicate.trim().is_empty() {
            format!("DELETE FROM {table}")
        } else {
            format!("DELETE FROM {table} WHERE {predicate}")
        };
        let bound: Vec<_> = params.iter().map(convert::to_sql_value).collect();
        Ok(self.conn.execute(&sql, params_from_iter(bound))?)
    }

    /// Removes every row from `T`'s table.
    pub fn clear<T: Record>(&self) -> Result<usize> {
        self.delete::<T>("", &[])
    }

    /// Drops `T`'s table and deregisters the type, so a later save
    /// re-creates the table instead of failing against a stale registry.
    pub fn drop_table<T: Record>(&self) -> Result<()> {
        let table = T::table_name();
        let sql = schema::drop_table_sql(&table)?;
        self.conn
            .execute_batch(&sql)
            .map_err(|e| StoreError::Schema(format!("failed to drop table `{table}`: {e}")))?;
        self.registry.deregister(T::type_id())?;
        Ok(())
    }

    /// Adds a column to `T`'s existing table — the only supported schema
    /// change. Existing rows read the new column back as the field default.
    pub fn add_column<T: Record>(&self, column: &Column) -> Result<()> {
        let table = T::table_name();
        let sql = schema::add_column_sql(&table, column)?;
        debug!(table = %table, column = %column.name, "adding column");
        self.conn
            .execute_batch(&sql)
            .map_err(|e| StoreError::Schema(format!("failed to alter table `{table}`: {e}")))?;
        Ok(())
    }

    /// Retrieves records of `T` matching the select shape, in result order.
    ///
    /// A missing table or column yields an empty vector with a logged
    /// warning — retrieval failures from schema divergence are deliberately
    /// soft. A row that cannot be converted into `T` is a hard error.
    pub fn retrieve<T: Record>(&self, select: &Select) -> Result<Vec<T>> {
        let table = T::table_name();
        let (sql, params) = select.build(&table)?;
        let mut stmt = match self.conn.prepare(&sql) {
            Ok(stmt) => stmt,
            Err(e) if convert::is_missing_schema(&e) => {
                warn!(table = %table, error = %e, "retrieve: empty result for missing schema");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        let rows = stmt.query_map(params_from_iter(params), |row| convert::capture_row(row))?;
        convert::collect_records(rows)
    }

    /// Retrieves every record of `T` in engine-default order.
    pub fn retrieve_all<T: Record>(&self) -> Result<Vec<T>> {
        self.retrieve(&Select::new())
    }

    /// Lists the user tables in this database from the engine catalog,
    /// excluding the engine's sequence table and the registry index.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type = ?1 ORDER BY name")?;
        let names = stmt
            .query_map(["table"], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names
            .into_iter()
            .filter(|name| name != "sqlite_sequence" && name != REGISTRY_TABLE)
            .collect())
    }

    /// Reads the column names of `T`'s table from a zero-row projection's
    /// result metadata. Missing table yields an empty vector.
    pub fn table_columns<T: Record>(&self) -> Result<Vec<String>> {
        let table = T::table_name();
        schema::validate_identifier(&table)?;
        let stmt = match self.conn.prepare(&format!("SELECT * FROM {table} LIMIT 0")) {
            Ok(stmt) => stmt,
            Err(e) if convert::is_missing_schema(&e) => {
                warn!(table = %table, error = %e, "table_columns: table missing");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };
        Ok(stmt.column_names().into_iter().map(String::from).collect())
    }

    /// All record type identifiers registered in this database, sorted.
    pub fn registered_types(&self) -> Result<Vec<String>> {
        self.registry.list()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_store_core::record;

    record! {
        struct Sample { tag: String }
    }

    #[test]
    fn test_open_creates_registry_index() {
        let conn = Connection::open_in_memory().unwrap();
        let store = RecordStore::open(&conn).unwrap();
        assert!(store.registered_types().unwrap().is_empty());
        // The registry index never shows up in the table catalog.
        assert!(store.table_names().unwrap().is_empty());
    }

    #[test]
    fn test_select_builds_expected_sql() {
        let select = Select::new()
            .columns(["tag"])
            .filter("tag != ?", vec!["x".into()])
            .order_by("tag", Order::Descending);
        let (sql, params) = select.build("sample").unwrap();
        assert_eq!(
            sql,
            "SELECT tag FROM sample WHERE tag != ? ORDER BY tag DESC"
        );
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_select_rejects_bad_order_field() {
        let select = Select::new().order_by("tag; DROP", Order::Ascending);
        assert!(matches!(
            select.build("sample"),
            Err(StoreError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn test_update_requires_existing_table() {
        let conn = Connection::open_in_memory().unwrap();
        let store = RecordStore::open(&conn).unwrap();
        let err = store
            .update(&Sample { tag: "t".into() }, "tag = ?", &["t".into()])
            .unwrap_err();
        assert!(matches!(err, StoreError::Engine(_)));
    }
}
