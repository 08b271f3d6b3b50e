//! Variable-length byte array physical type column buffer.
//!
//! Storage is a flat byte arena plus a sequence of `(offset, length)`
//! spans (spec §3 "Primitive column buffer"). `swap` exchanges spans, not
//! bytes, so sorting a column of long strings costs two `usize` pairs per
//! exchange rather than a byte copy.

use tracing::trace;

use super::ColumnBuffer;
use crate::error::{ColumnError, Result, WriteOutcome};
use crate::ordering::Orderable;
use crate::page::{Page, PageValues};
use crate::value::{Row, Value, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    offset: usize,
    length: usize,
}

/// Dense storage for the Parquet BYTE_ARRAY physical type.
#[derive(Debug, Clone)]
pub struct ByteArrayColumnBuffer {
    arena: Vec<u8>,
    spans: Vec<Span>,
    column_tag: i32,
}

impl ByteArrayColumnBuffer {
    pub fn new(column_index: i32, capacity: usize) -> Self {
        trace!(column_index, capacity, "new byte array column buffer");
        Self {
            arena: Vec::with_capacity(capacity * 16),
            spans: Vec::with_capacity(capacity),
            column_tag: crate::value::column_tag(column_index),
        }
    }

    fn extract(kind: &ValueKind) -> Option<&[u8]> {
        match kind {
            ValueKind::ByteArray(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    fn push_bytes(&mut self, bytes: &[u8]) {
        let offset = self.arena.len();
        self.arena.extend_from_slice(bytes);
        self.spans.push(Span { offset, length: bytes.len() });
    }

    fn bytes_at(&self, idx: usize) -> &[u8] {
        let span = self.spans[idx];
        &self.arena[span.offset..span.offset + span.length]
    }
}

impl Orderable for ByteArrayColumnBuffer {
    fn less(&self, i: usize, j: usize) -> bool {
        self.bytes_at(i) < self.bytes_at(j)
    }
}

impl ColumnBuffer for ByteArrayColumnBuffer {
    fn write_value(&mut self, v: Value) -> Result<()> {
        match Self::extract(&v.kind) {
            Some(bytes) => {
                self.push_bytes(bytes);
                Ok(())
            }
            None => Err(ColumnError::WrongKind),
        }
    }

    fn write_values(&mut self, vs: &[Value]) -> WriteOutcome {
        for (i, v) in vs.iter().enumerate() {
            match Self::extract(&v.kind) {
                Some(bytes) => self.push_bytes(bytes),
                None => return WriteOutcome::failed(i, ColumnError::WrongKind),
            }
        }
        WriteOutcome::ok(vs.len())
    }

    fn write_row(&mut self, row: &Row) -> Result<()> {
        match row.len() {
            0 => Err(ColumnError::RowHasTooFewValues),
            1 => self.write_value(row.0[0].clone()),
            n => Err(ColumnError::RowHasTooManyValues(n)),
        }
    }

    fn read_row_at(&self, index: i64) -> Result<Row> {
        if index < 0 {
            return Err(ColumnError::RowIndexOutOfBounds { index, length: self.spans.len() });
        }
        let idx = index as usize;
        if idx >= self.spans.len() {
            return Err(ColumnError::EndOfStream);
        }
        let bytes = self.bytes_at(idx).to_vec();
        Ok(Row::new(vec![Value::new(ValueKind::ByteArray(bytes), 0, 0, self.column_index())]))
    }

    fn length(&self) -> usize {
        self.spans.len()
    }

    fn capacity(&self) -> usize {
        self.spans.capacity()
    }

    fn size_in_bytes(&self) -> usize {
        self.arena.len() + self.spans.len() * std::mem::size_of::<Span>()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.spans.swap(i, j);
    }

    fn reset(&mut self) {
        trace!("reset byte array column buffer");
        self.arena.clear();
        self.spans.clear();
    }

    fn column_index(&self) -> i32 {
        crate::value::column_index_from_tag(self.column_tag)
    }

    fn page(&mut self) -> Page {
        let slices: Vec<&[u8]> = self.spans.iter().map(|s| &self.arena[s.offset..s.offset + s.length]).collect();
        Page::primitive(PageValues::ByteArray(slices), self.column_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn val(s: &str) -> Value {
        Value::new(ValueKind::ByteArray(s.as_bytes().to_vec()), 0, 0, 0)
    }

    #[test]
    fn round_trip_of_rows() {
        let mut buf = ByteArrayColumnBuffer::new(0, 4);
        for s in ["hello", "world"] {
            buf.write_row(&Row::new(vec![val(s)])).unwrap();
        }
        assert_eq!(buf.read_row_at(0).unwrap().0[0].kind, ValueKind::ByteArray(b"hello".to_vec()));
        assert_eq!(buf.read_row_at(1).unwrap().0[0].kind, ValueKind::ByteArray(b"world".to_vec()));
    }

    #[test]
    fn less_is_lexicographic() {
        let mut buf = ByteArrayColumnBuffer::new(0, 4);
        buf.write_value(val("apple")).unwrap();
        buf.write_value(val("banana")).unwrap();
        assert!(buf.less(0, 1));
        assert!(!buf.less(1, 0));
    }

    #[test]
    fn swap_exchanges_spans_without_moving_bytes() {
        let mut buf = ByteArrayColumnBuffer::new(0, 4);
        buf.write_value(val("one")).unwrap();
        buf.write_value(val("two")).unwrap();
        let arena_before = buf.arena.clone();
        buf.swap(0, 1);
        assert_eq!(buf.arena, arena_before);
        assert_eq!(buf.read_row_at(0).unwrap().0[0].kind, ValueKind::ByteArray(b"two".to_vec()));
        assert_eq!(buf.read_row_at(1).unwrap().0[0].kind, ValueKind::ByteArray(b"one".to_vec()));
    }

    #[test]
    fn page_reflects_span_order_not_arena_order() {
        let mut buf = ByteArrayColumnBuffer::new(0, 4);
        buf.write_value(val("one")).unwrap();
        buf.write_value(val("two")).unwrap();
        buf.swap(0, 1);
        if let PageValues::ByteArray(slices) = buf.page().values {
            assert_eq!(slices, vec![b"two".as_slice(), b"one".as_slice()]);
        } else {
            panic!("expected ByteArray page values");
        }
    }
}
