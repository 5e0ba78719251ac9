//! The `record!` declaration macro.

/// Declares a struct and derives its [`Record`](crate::Record)
/// implementation from the field list.
///
/// Columns are emitted in field declaration order with the field name as
/// the column name; column types come from each field's
/// [`FieldType`](crate::FieldType) mapping. The struct additionally derives
/// `Debug`, `Clone`, `Default`, and `PartialEq`, so every field type must
/// support those (all supported field types do).
///
/// # Examples
///
/// ```
/// use record_store_core::{record, ColumnType, Record};
///
/// record! {
///     /// A tracked download.
///     pub struct Download {
///         pub url: String,
///         pub bytes: i64,
///         pub finished: bool,
///     }
/// }
///
/// let cols = Download::columns();
/// assert_eq!(cols.len(), 3);
/// assert_eq!(cols[2].name, "finished");
/// assert_eq!(cols[2].ty, ColumnType::Integer);
/// assert_eq!(Download::table_name(), "download");
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $field_ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $field_ty,
            )*
        }

        impl $crate::Record for $name {
            fn columns() -> ::std::vec::Vec<$crate::Column> {
                ::std::vec![
                    $(
                        $crate::Column::new(
                            ::std::stringify!($field),
                            <$field_ty as $crate::FieldType>::COLUMN_TYPE,
                        ),
                    )*
                ]
            }

            fn to_row(&self) -> $crate::Row {
                let mut row = $crate::Row::new();
                $(
                    row.push(
                        ::std::stringify!($field),
                        $crate::Value::from(self.$field.clone()),
                    );
                )*
                row
            }

            fn from_row(row: &$crate::Row) -> ::std::result::Result<Self, $crate::RecordError> {
                ::std::result::Result::Ok(Self {
                    $(
                        $field: row.field(::std::stringify!($field))?,
                    )*
                })
            }
        }
    };
}
