//! 32-bit signed integer physical type column buffer.

use tracing::trace;

use super::scalar::ScalarBuffer;
use super::ColumnBuffer;
use crate::error::{Result, WriteOutcome};
use crate::ordering::Orderable;
use crate::page::{Page, PageValues};
use crate::value::{Row, Value, ValueKind};

/// Dense storage for the Parquet INT32 physical type. `less` is natural
/// signed order.
#[derive(Debug, Clone)]
pub struct Int32ColumnBuffer {
    pub(crate) storage: ScalarBuffer<i32>,
}

impl Int32ColumnBuffer {
    pub fn new(column_index: i32, capacity: usize) -> Self {
        trace!(column_index, capacity, "new int32 column buffer");
        Self { storage: ScalarBuffer::with_capacity(column_index, capacity) }
    }

    fn extract(kind: &ValueKind) -> Option<i32> {
        match kind {
            ValueKind::Int32(v) => Some(*v),
            _ => None,
        }
    }
}

impl Orderable for Int32ColumnBuffer {
    fn less(&self, i: usize, j: usize) -> bool {
        self.storage.values[i] < self.storage.values[j]
    }
}

impl ColumnBuffer for Int32ColumnBuffer {
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
        self.storage.read_row_at(index, ValueKind::Int32, 0)
    }

    fn length(&self) -> usize {
        self.storage.length()
    }

    fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    fn size_in_bytes(&self) -> usize {
        self.storage.length() * std::mem::size_of::<i32>()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.storage.swap(i, j)
    }

    fn reset(&mut self) {
        trace!("reset int32 column buffer");
        self.storage.reset()
    }

    fn column_index(&self) -> i32 {
        self.storage.column_index()
    }

    fn page(&mut self) -> Page {
        Page::primitive(PageValues::Int32(&self.storage.values), self.storage.column_index())
    }
}
