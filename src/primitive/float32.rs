//! 32-bit IEEE-754 float physical type column buffer.

use tracing::trace;

use super::scalar::ScalarBuffer;
use super::ColumnBuffer;
use crate::error::{Result, WriteOutcome};
use crate::ordering::Orderable;
use crate::page::{Page, PageValues};
use crate::value::{Row, Value, ValueKind};

/// Dense storage for the Parquet FLOAT physical type.
///
/// `less(i, j)` is natural IEEE-754 order; NaN is incomparable and never
/// compares less than anything (spec §4.1 — page min/max statistics are a
/// collaborator's concern, not this buffer's).
#[derive(Debug, Clone)]
pub struct Float32ColumnBuffer {
    storage: ScalarBuffer<f32>,
}

impl Float32ColumnBuffer {
    pub fn new(column_index: i32, capacity: usize) -> Self {
        trace!(column_index, capacity, "new float32 column buffer");
        Self { storage: ScalarBuffer::with_capacity(column_index, capacity) }
    }

    fn extract(kind: &ValueKind) -> Option<f32> {
        match kind {
            ValueKind::Float32(v) => Some(*v),
            _ => None,
        }
    }
}

impl Orderable for Float32ColumnBuffer {
    fn less(&self, i: usize, j: usize) -> bool {
        self.storage.values[i] < self.storage.values[j]
    }
}

impl ColumnBuffer for Float32ColumnBuffer {
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
        self.storage.read_row_at(index, ValueKind::Float32, 0)
    }

    fn length(&self) -> usize {
        self.storage.length()
    }

    fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    fn size_in_bytes(&self) -> usize {
        self.storage.length() * std::mem::size_of::<f32>()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.storage.swap(i, j)
    }

    fn reset(&mut self) {
        trace!("reset float32 column buffer");
        self.storage.reset()
    }

    fn column_index(&self) -> i32 {
        self.storage.column_index()
    }

    fn page(&mut self) -> Page {
        Page::primitive(PageValues::Float32(&self.storage.values), self.storage.column_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn val(f: f32) -> Value {
        Value::new(ValueKind::Float32(f), 0, 0, 0)
    }

    #[test]
    fn less_is_natural_float_order() {
        let mut buf = Float32ColumnBuffer::new(0, 4);
        buf.write_value(val(-1.5)).unwrap();
        buf.write_value(val(2.5)).unwrap();
        assert!(buf.less(0, 1));
        assert!(!buf.less(1, 0));
    }

    #[test]
    fn nan_is_incomparable() {
        let mut buf = Float32ColumnBuffer::new(0, 4);
        buf.write_value(val(f32::NAN)).unwrap();
        buf.write_value(val(1.0)).unwrap();
        assert!(!buf.less(0, 1));
        assert!(!buf.less(1, 0));
    }
}
