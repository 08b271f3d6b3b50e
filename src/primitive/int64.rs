//! 64-bit signed integer physical type column buffer.

use tracing::trace;

use super::scalar::ScalarBuffer;
use super::ColumnBuffer;
use crate::error::{Result, WriteOutcome};
use crate::ordering::Orderable;
use crate::page::{Page, PageValues};
use crate::value::{Row, Value, ValueKind};

/// Dense storage for the Parquet INT64 physical type. `less` is natural
/// signed order.
#[derive(Debug, Clone)]
pub struct Int64ColumnBuffer {
    pub(crate) storage: ScalarBuffer<i64>,
}

impl Int64ColumnBuffer {
    pub fn new(column_index: i32, capacity: usize) -> Self {
        trace!(column_index, capacity, "new int64 column buffer");
        Self { storage: ScalarBuffer::with_capacity(column_index, capacity) }
    }

    fn extract(kind: &ValueKind) -> Option<i64> {
        match kind {
            ValueKind::Int64(v) => Some(*v),
            _ => None,
        }
    }
}

impl Orderable for Int64ColumnBuffer {
    fn less(&self, i: usize, j: usize) -> bool {
        self.storage.values[i] < self.storage.values[j]
    }
}

impl ColumnBuffer for Int64ColumnBuffer {
    fn write_value(&mut self, v: Value) -> Result<()> {
        self.storage.write_value(&v, Self::extract)
    }

    fn write_values(&mut self, vs: &[Value]) -> WriteOutcome {
        self.storage.write_values(vs, Self::extract)
    }

    fn write_row(&mut self, row: &Row) -> Result<()> {
        self.storage.write_row(row, Self::extract)
    }

    fn read_row_at(&self, index: i64) -> Result<Row> {
        self.storage.read_row_at(index, ValueKind::Int64, 0)
    }

    fn length(&self) -> usize {
        self.storage.length()
    }

    fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    fn size_in_bytes(&self) -> usize {
        self.storage.length() * std::mem::size_of::<i64>()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.storage.swap(i, j)
    }

    fn reset(&mut self) {
        trace!("reset int64 column buffer");
        self.storage.reset()
    }

    fn column_index(&self) -> i32 {
        self.storage.column_index()
    }

    fn page(&mut self) -> Page {
        Page::primitive(PageValues::Int64(&self.storage.values), self.storage.column_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn val(i: i64) -> Value {
        Value::new(ValueKind::Int64(i), 0, 0, 0)
    }

    #[test]
    fn round_trip_of_rows() {
        let mut buf = Int64ColumnBuffer::new(0, 4);
        for v in [3_i64, 1, 2] {
            buf.write_row(&Row::new(vec![val(v)])).unwrap();
        }
        assert_eq!(buf.length(), 3);
        assert_eq!(buf.read_row_at(1).unwrap().0[0].kind, ValueKind::Int64(1));
    }

    #[test]
    fn clone_is_isolated_from_original() {
        let mut buf = Int64ColumnBuffer::new(0, 4);
        buf.write_value(val(1)).unwrap();
        let mut cloned = buf.clone();
        cloned.write_value(val(2)).unwrap();
        assert_eq!(buf.length(), 1);
        assert_eq!(cloned.length(), 2);
    }

    #[test]
    fn swap_then_page_reflects_new_order() {
        let mut buf = Int64ColumnBuffer::new(0, 4);
        buf.write_value(val(10)).unwrap();
        buf.write_value(val(20)).unwrap();
        buf.swap(0, 1);
        if let PageValues::Int64(vs) = buf.page().values {
            assert_eq!(vs, &[20, 10]);
        } else {
            panic!("expected Int64 page values");
        }
    }
}
