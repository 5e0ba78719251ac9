//! Bridging between core scalar values and the engine's types.
//!
//! Handles both directions of the row boundary: turning a
//! [`Row`](record_store_core::Row) into bindable engine parameters for
//! writes, and capturing a result tuple (column names plus typed cells)
//! back into a [`Row`] for reads. Also classifies the engine errors the
//! read path deliberately softens.

use record_store_core::{Record, Row, Value};
use rusqlite::types::{Value as SqlValue, ValueRef};

use crate::error::Result;

/// Converts one core scalar into an owned engine value.
pub(crate) fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(v) => SqlValue::Integer(*v),
        Value::Real(v) => SqlValue::Real(*v),
        Value::Text(v) => SqlValue::Text(v.clone()),
        Value::Blob(v) => SqlValue::Blob(v.clone()),
    }
}

/// Converts a row's values into positional parameters, in column order.
pub(crate) fn params_from_row(row: &Row) -> Vec<SqlValue> {
    row.iter().map(|(_, v)| to_sql_value(v)).collect()
}

/// Converts one engine cell into a core scalar.
pub(crate) fn from_sql_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::Integer(v),
        ValueRef::Real(v) => Value::Real(v),
        ValueRef::Text(v) => Value::Text(String::from_utf8_lossy(v).into_owned()),
        ValueRef::Blob(v) => Value::Blob(v.to_vec()),
    }
}

/// Snapshots one result tuple into an owned [`Row`].
///
/// Column order follows the statement's projection, so captured rows carry
/// exactly the columns the query selected.
pub(crate) fn capture_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Row> {
    let statement = row.as_ref();
    let mut captured = Row::new();
    for (index, name) in statement.column_names().into_iter().enumerate() {
        captured.push(name, from_sql_ref(row.get_ref(index)?));
    }
    Ok(captured)
}

/// Reconstructs typed records from captured rows, preserving row order.
pub(crate) fn collect_records<T: Record>(
    rows: impl Iterator<Item = rusqlite::Result<Row>>,
) -> Result<Vec<T>> {
    let mut records = Vec::new();
    for row in rows {
        records.push(T::from_row(&row?)?);
    }
    Ok(records)
}

/// Returns `true` for the engine errors the read path treats as "schema
/// missing": no such table, or no such column in a projection or ordering.
pub(crate) fn is_missing_schema(err: &rusqlite::Error) -> bool {
    // Depending on whether the statement failed at prepare or execute time
    // the engine reports through different variants.
    let message = match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => message,
        rusqlite::Error::SqlInputError { msg, .. } => msg,
        _ => return false,
    };
    message.starts_with("no such table") || message.starts_with("no such column")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_scalar_bridging_roundtrip() {
        let values = [
            Value::Null,
            Value::Integer(-3),
            Value::Real(2.25),
            Value::Text("text".into()),
            Value::Blob(vec![0, 255]),
        ];
        let conn = Connection::open_in_memory().unwrap();
        for value in values {
            let back: Value = conn
                .query_row("SELECT ?1", [to_sql_value(&value)], |row| {
                    Ok(from_sql_ref(row.get_ref(0)?))
                })
                .unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_capture_row_preserves_projection_order() {
        let conn = Connection::open_in_memory().unwrap();
        let row = conn
            .query_row("SELECT 1 AS b, 'x' AS a", [], |row| capture_row(row))
            .unwrap();
        let names: Vec<&str> = row.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(row.get("b"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_missing_schema_classification() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.prepare("SELECT * FROM no_such").unwrap_err();
        assert!(is_missing_schema(&err));

        conn.execute_batch("CREATE TABLE t (a TEXT)").unwrap();
        let err = conn.prepare("SELECT b FROM t").unwrap_err();
        assert!(is_missing_schema(&err));

        let err = conn.prepare("NOT EVEN SQL").unwrap_err();
        assert!(!is_missing_schema(&err));
    }
}
