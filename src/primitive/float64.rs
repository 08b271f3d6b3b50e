//! 64-bit IEEE-754 float physical type column buffer.

use tracing::trace;

use super::scalar::ScalarBuffer;
use super::ColumnBuffer;
use crate::error::{Result, WriteOutcome};
use crate::ordering::Orderable;
use crate::page::{Page, PageValues};
use crate::value::{Row, Value, ValueKind};

/// Dense storage for the Parquet DOUBLE physical type. `less` follows the
/// same NaN-incomparable convention as [`super::float32::Float32ColumnBuffer`].
#[derive(Debug, Clone)]
pub struct Float64ColumnBuffer {
    storage: ScalarBuffer<f64>,
}

impl Float64ColumnBuffer {
    pub fn new(column_index: i32, capacity: usize) -> Self {
        trace!(column_index, capacity, "new float64 column buffer");
        Self { storage: ScalarBuffer::with_capacity(column_index, capacity) }
    }

    fn extract(kind: &ValueKind) -> Option<f64> {
        match kind {
            ValueKind::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl Orderable for Float64ColumnBuffer {
    fn less(&self, i: usize, j: usize) -> bool {
        self.storage.values[i] < self.storage.values[j]
    }
}

impl ColumnBuffer for Float64ColumnBuffer {
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
        self.storage.read_row_at(index, ValueKind::Float64, 0)
    }

    fn length(&self) -> usize {
        self.storage.length()
    }

    fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    fn size_in_bytes(&self) -> usize {
        self.storage.length() * std::mem::size_of::<f64>()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.storage.swap(i, j)
    }

    fn reset(&mut self) {
        trace!("reset float64 column buffer");
        self.storage.reset()
    }

    fn column_index(&self) -> i32 {
        self.storage.column_index()
    }

    fn page(&mut self) -> Page {
        Page::primitive(PageValues::Float64(&self.storage.values), self.storage.column_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn val(f: f64) -> Value {
        Value::new(ValueKind::Float64(f), 0, 0, 0)
    }

    #[test]
    fn round_trip_of_rows() {
        let mut buf = Float64ColumnBuffer::new(0, 4);
        buf.write_row(&Row::new(vec![val(3.14)])).unwrap();
        assert_eq!(buf.read_row_at(0).unwrap().0[0].kind, ValueKind::Float64(3.14));
    }

    #[test]
    fn nan_never_compares_less() {
        let mut buf = Float64ColumnBuffer::new(0, 4);
        buf.write_value(val(1.0)).unwrap();
        buf.write_value(val(f64::NAN)).unwrap();
        assert!(!buf.less(1, 0));
        assert!(!buf.less(0, 1));
    }
}
