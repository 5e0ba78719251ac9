//! Core data model for the record-store mapping layer.
//!
//! This crate defines everything the engine-facing crates build on:
//!
//! - [`Value`] — one engine scalar cell (text, integer, real, blob, null),
//!   with lossless [`FromValue`] coercions back into Rust field types.
//! - [`Column`] / [`ColumnType`] / [`FieldType`] — schema descriptors for a
//!   single declared column.
//! - [`Record`] — the trait a type implements to be mapped to a table:
//!   declared columns in order, a canonical table name, and the
//!   instance↔[`Row`] conversions. Declared once per type, no runtime
//!   introspection.
//! - [`Batch`] — an ordered aggregate of heterogeneous records saved in one
//!   logical call, without atomicity.
//! - [`record!`] — declares a struct and generates its [`Record`] impl.
//!
//! # Example
//!
//! ```
//! use record_store_core::{record, Record, Value};
//!
//! record! {
//!     pub struct Person {
//!         pub name: String,
//!         pub age: i64,
//!     }
//! }
//!
//! let alice = Person { name: "alice".into(), age: 34 };
//! let row = alice.to_row();
//! assert_eq!(row.get("age"), Some(&Value::Integer(34)));
//!
//! let back = Person::from_row(&row).unwrap();
//! assert_eq!(back, alice);
//! assert_eq!(Person::table_name(), "person");
//! ```

mod batch;
mod macros;
mod record;
mod value;

pub use batch::Batch;
pub use record::{AnyRecord, Record, RecordError, Row};
pub use value::{Column, ColumnType, FieldType, FromValue, TypeMismatch, Value};
