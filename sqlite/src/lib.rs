//! SQLite mapping engine for record types.
//!
//! This crate turns [`Record`](record_store_core::Record) declarations into
//! tables, rows, and fixed-shape queries against an embedded SQLite
//! database, without hand-written SQL. It pairs with
//! [`record_store_core`], which holds the data model.
//!
//! # Architecture
//!
//! The crate is organized into four modules:
//!
//! - **`schema`** — DDL derivation from declared columns, with identifier
//!   and reserved-name validation
//! - **`registry`** — the persisted per-database index of materialized
//!   record types
//! - **`convert`** — scalar bridging and result-row capture (internal)
//! - **`store`** — the CRUD engine ([`RecordStore`]) and the [`Select`]
//!   query shape
//!
//! # Quick start
//!
//! ```no_run
//! use record_store_core::{record, Batch};
//! use record_store_sqlite::RecordStore;
//! use rusqlite::Connection;
//!
//! record! {
//!     pub struct Person {
//!         pub name: String,
//!         pub age: i64,
//!     }
//! }
//! record! {
//!     pub struct Visit {
//!         pub person: String,
//!         pub day: String,
//!     }
//! }
//!
//! let conn = Connection::open("app.db").unwrap();
//! let store = RecordStore::open(&conn).unwrap();
//!
//! // Tables appear on first save; no DDL written by hand.
//! store.save(&Person { name: "ada".into(), age: 36 }).unwrap();
//!
//! // Heterogeneous batch, saved element by element.
//! let batch = Batch::new()
//!     .with(Person { name: "grace".into(), age: 45 })
//!     .with(Visit { person: "ada".into(), day: "mon".into() });
//! let report = store.save_batch(&batch);
//! assert!(report.is_complete());
//!
//! let people: Vec<Person> = store.retrieve_all().unwrap();
//! println!("{} people", people.len());
//! ```
//!
//! # Failure semantics
//!
//! Write paths return explicit errors the caller may propagate or ignore.
//! Read paths are soft: retrieving from a table that was never created (or
//! was dropped by an external tool) returns an empty result and logs a
//! warning through [`tracing`].

mod convert;
mod error;
mod registry;
mod schema;
mod store;

pub use error::{Result, StoreError};
pub use registry::Registry;
pub use schema::{IDENTITY_COLUMN, add_column_sql, create_table_sql, drop_table_sql};
pub use store::{BatchReport, Order, RecordStore, Select};
