//! Heterogeneous record batches.

use crate::record::{AnyRecord, Record};

/// An ordered collection of records of possibly mixed types, saved in one
/// logical call.
///
/// Purely a data holder — persistence lives in the store, and a batch is
/// not a transaction boundary: each element is saved independently and a
/// failure does not roll back earlier elements.
///
/// # Examples
///
/// ```
/// use record_store_core::{record, Batch};
///
/// record! {
///     pub struct City { pub name: String }
/// }
/// record! {
///     pub struct Road { pub km: f64 }
/// }
///
/// let batch = Batch::new()
///     .with(City { name: "Turku".into() })
///     .with(Road { km: 165.0 })
///     .with(City { name: "Tampere".into() });
/// assert_eq!(batch.len(), 3);
/// ```
#[derive(Default)]
pub struct Batch {
    records: Vec<Box<dyn AnyRecord>>,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record. Order is preserved.
    pub fn push<T: Record + 'static>(&mut self, record: T) {
        self.records.push(Box::new(record));
    }

    /// Builder-style [`push`](Self::push).
    pub fn with<T: Record + 'static>(mut self, record: T) -> Self {
        self.push(record);
        self
    }

    /// The records in insertion order.
    pub fn records(&self) -> &[Box<dyn AnyRecord>] {
        &self.records
    }

    /// Number of records in the batch.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl std::fmt::Debug for Batch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Batch")
            .field("len", &self.records.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    record! {
        struct Left { tag: String }
    }

    record! {
        struct Right { n: i64 }
    }

    #[test]
    fn test_batch_preserves_order_across_types() {
        let batch = Batch::new()
            .with(Left { tag: "a".into() })
            .with(Right { n: 1 })
            .with(Left { tag: "b".into() });

        let tables: Vec<String> = batch
            .records()
            .iter()
            .map(|r| r.record_table_name())
            .collect();
        assert_eq!(tables, ["left", "right", "left"]);
    }

    #[test]
    fn test_empty_batch() {
        let batch = Batch::new();
        assert!(batch.is_empty());
        assert_eq!(batch.len(), 0);
    }
}
