//! The persisted table registry.
//!
//! Tracks which record types have been materialized into tables for this
//! database. The registry is an explicit index table in the same database
//! (one row per record type identifier), so it travels with the database
//! file, registration is engine-level atomic, and dropping a table through
//! this layer can deregister the type explicitly.
//!
//! The registry can still go stale when a table is dropped by an external
//! tool: the entry survives, a later save skips recreation, and the insert
//! surfaces an engine error. That error is the signal to re-create the
//! table explicitly.

use rusqlite::Connection;

use crate::error::Result;

/// Name of the registry index table. Reserved; record types cannot map to it.
pub(crate) const REGISTRY_TABLE: &str = "_record_store_registry";

/// Persisted set of record type identifiers materialized in this database.
///
/// Membership is keyed by [`Record::type_id`](record_store_core::Record::type_id).
/// Every operation hits the database directly — nothing is cached, since
/// external processes may touch the same file between calls.
pub struct Registry<'a> {
    conn: &'a Connection,
}

impl<'a> Registry<'a> {
    /// Opens the registry, creating its index table if absent.
    pub fn open(conn: &'a Connection) -> Result<Self> {
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {REGISTRY_TABLE} (type_id TEXT PRIMARY KEY) WITHOUT ROWID"
        ))?;
        Ok(Self { conn })
    }

    /// Idempotently records that a record type has a table.
    ///
    /// `INSERT OR IGNORE` makes concurrent registration of the same type
    /// safe without extra locking.
    pub fn register(&self, type_id: &str) -> Result<()> {
        self.conn.execute(
            &format!("INSERT OR IGNORE INTO {REGISTRY_TABLE} (type_id) VALUES (?1)"),
            [type_id],
        )?;
        Ok(())
    }

    /// Removes a type's entry. Returns whether an entry existed.
    pub fn deregister(&self, type_id: &str) -> Result<bool> {
        let rows = self.conn.execute(
            &format!("DELETE FROM {REGISTRY_TABLE} WHERE type_id = ?1"),
            [type_id],
        )?;
        Ok(rows > 0)
    }

    /// Membership check for one record type.
    pub fn is_registered(&self, type_id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {REGISTRY_TABLE} WHERE type_id = ?1"),
            [type_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// All registered type identifiers, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT type_id FROM {REGISTRY_TABLE} ORDER BY type_id"))?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_conn() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_register_is_idempotent() {
        let conn = registry_conn();
        let registry = Registry::open(&conn).unwrap();

        registry.register("app::Person").unwrap();
        registry.register("app::Person").unwrap();

        assert!(registry.is_registered("app::Person").unwrap());
        assert_eq!(registry.list().unwrap(), ["app::Person"]);
    }

    #[test]
    fn test_unknown_type_is_not_registered() {
        let conn = registry_conn();
        let registry = Registry::open(&conn).unwrap();
        assert!(!registry.is_registered("app::Ghost").unwrap());
    }

    #[test]
    fn test_deregister() {
        let conn = registry_conn();
        let registry = Registry::open(&conn).unwrap();

        registry.register("app::Person").unwrap();
        assert!(registry.deregister("app::Person").unwrap());
        assert!(!registry.deregister("app::Person").unwrap());
        assert!(!registry.is_registered("app::Person").unwrap());
    }

    #[test]
    fn test_list_is_sorted() {
        let conn = registry_conn();
        let registry = Registry::open(&conn).unwrap();

        registry.register("b::Second").unwrap();
        registry.register("a::First").unwrap();

        assert_eq!(registry.list().unwrap(), ["a::First", "b::Second"]);
    }

    #[test]
    fn test_open_survives_reopen() {
        let conn = registry_conn();
        {
            let registry = Registry::open(&conn).unwrap();
            registry.register("app::Person").unwrap();
        }
        let registry = Registry::open(&conn).unwrap();
        assert!(registry.is_registered("app::Person").unwrap());
    }
}
