//! DDL derivation from record schema descriptors.
//!
//! Produces `CREATE TABLE`, `ALTER TABLE … ADD COLUMN`, and `DROP TABLE`
//! statements from a table name and declared [`Column`]s. Table and column
//! names are interpolated into the SQL text, so every identifier is
//! validated first: it must match `[A-Za-z_][A-Za-z0-9_]*`, and table names
//! must not collide with names the engine reserves (`table`, the
//! `sqlite_*` catalog namespace, and the registry index table).
//!
//! Nothing here touches the database; execution is the
//! [`RecordStore`](crate::RecordStore)'s responsibility.

use record_store_core::Column;

use crate::error::{Result, StoreError};
use crate::registry::REGISTRY_TABLE;

/// Name of the engine-managed identity column added by
/// [`create_table_sql`] when requested.
pub const IDENTITY_COLUMN: &str = "id";

/// Validates that a name is a plain SQL identifier.
pub(crate) fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !valid_start || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(StoreError::InvalidIdentifier(name.to_string()));
    }
    Ok(())
}

/// Validates a table name: a plain identifier that is not reserved.
pub(crate) fn validate_table_name(name: &str) -> Result<()> {
    validate_identifier(name)?;
    let lower = name.to_ascii_lowercase();
    if lower == "table" || lower == REGISTRY_TABLE || lower.starts_with("sqlite_") {
        return Err(StoreError::ReservedTableName(name.to_string()));
    }
    Ok(())
}

/// Derives the `CREATE TABLE` statement for a record type's columns.
///
/// Columns appear in declaration order. When `with_identity` is set, an
/// autoincrement primary-key [`IDENTITY_COLUMN`] is prepended; record types
/// never declare it themselves.
///
/// # Errors
///
/// Returns [`StoreError::ReservedTableName`] or
/// [`StoreError::InvalidIdentifier`] for bad names, and
/// [`StoreError::Schema`] when the type declares no columns and no identity
/// is requested (the statement would be empty).
pub fn create_table_sql(table: &str, columns: &[Column], with_identity: bool) -> Result<String> {
    validate_table_name(table)?;
    if columns.is_empty() && !with_identity {
        return Err(StoreError::Schema(format!(
            "table `{table}` would have no columns"
        )));
    }

    let mut defs = Vec::with_capacity(columns.len() + 1);
    if with_identity {
        defs.push(format!(
            "{IDENTITY_COLUMN} INTEGER PRIMARY KEY AUTOINCREMENT"
        ));
    }
    for column in columns {
        validate_identifier(&column.name)?;
        defs.push(format!("{} {}", column.name, column.ty.sql()));
    }

    Ok(format!("CREATE TABLE {table} ({})", defs.join(", ")))
}

/// Derives the additive `ALTER TABLE … ADD COLUMN` statement — the only
/// schema change this layer supports.
pub fn add_column_sql(table: &str, column: &Column) -> Result<String> {
    validate_table_name(table)?;
    validate_identifier(&column.name)?;
    Ok(format!(
        "ALTER TABLE {table} ADD COLUMN {} {}",
        column.name,
        column.ty.sql()
    ))
}

/// Derives the `DROP TABLE` statement for a record type's table.
pub fn drop_table_sql(table: &str) -> Result<String> {
    validate_table_name(table)?;
    Ok(format!("DROP TABLE {table}"))
}
