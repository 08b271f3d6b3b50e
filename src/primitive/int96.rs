//! 96-bit integer physical type column buffer (legacy Parquet INT96,
//! three 32-bit words).

use tracing::trace;

use super::scalar::ScalarBuffer;
use super::ColumnBuffer;
use crate::error::{Result, WriteOutcome};
use crate::ordering::Orderable;
use crate::page::{Page, PageValues};
use crate::value::{Row, Value, ValueKind};

/// Dense storage for the Parquet INT96 physical type.
///
/// `less(i, j)` is lexicographic over the three words, word `0` most
/// significant, each word compared as unsigned (spec §4.1: "Parquet's
/// defined lexicographic order on the three 32-bit words").
#[derive(Debug, Clone)]
pub struct Int96ColumnBuffer {
    storage: ScalarBuffer<[u32; 3]>,
}

impl Int96ColumnBuffer {
    pub fn new(column_index: i32, capacity: usize) -> Self {
        trace!(column_index, capacity, "new int96 column buffer");
        Self { storage: ScalarBuffer::with_capacity(column_index, capacity) }
    }

    fn extract(kind: &ValueKind) -> Option<[u32; 3]> {
        match kind {
            ValueKind::Int96(v) => Some(*v),
            _ => None,
        }
    }
}

impl Orderable for Int96ColumnBuffer {
    fn less(&self, i: usize, j: usize) -> bool {
        self.storage.values[i] < self.storage.values[j]
    }
}

impl ColumnBuffer for Int96ColumnBuffer {
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
        self.storage.read_row_at(index, ValueKind::Int96, 0)
    }

    fn length(&self) -> usize {
        self.storage.length()
    }

    fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    fn size_in_bytes(&self) -> usize {
        self.storage.length() * std::mem::size_of::<[u32; 3]>()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.storage.swap(i, j)
    }

    fn reset(&mut self) {
        trace!("reset int96 column buffer");
        self.storage.reset()
    }

    fn column_index(&self) -> i32 {
        self.storage.column_index()
    }

    fn page(&mut self) -> Page {
        Page::primitive(PageValues::Int96(&self.storage.values), self.storage.column_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn val(words: [u32; 3]) -> Value {
        Value::new(ValueKind::Int96(words), 0, 0, 0)
    }

    #[test]
    fn less_compares_word_zero_first() {
        let mut buf = Int96ColumnBuffer::new(0, 4);
        buf.write_value(val([1, 9, 9])).unwrap();
        buf.write_value(val([2, 0, 0])).unwrap();
        assert!(buf.less(0, 1));
    }

    #[test]
    fn less_falls_through_to_later_words_on_tie() {
        let mut buf = Int96ColumnBuffer::new(0, 4);
        buf.write_value(val([1, 1, 5])).unwrap();
        buf.write_value(val([1, 1, 9])).unwrap();
        assert!(buf.less(0, 1));
        assert!(!buf.less(1, 0));
    }

    #[test]
    fn round_trip_through_read_row_at() {
        let mut buf = Int96ColumnBuffer::new(0, 4);
        buf.write_row(&Row::new(vec![val([7, 8, 9])])).unwrap();
        assert_eq!(buf.read_row_at(0).unwrap().0[0].kind, ValueKind::Int96([7, 8, 9]));
    }
}
