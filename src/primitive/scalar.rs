//! Internal storage shared by the fixed-size scalar buffer variants
//! (boolean, int32, int64, int96, float32, float64). Each public wrapper
//! type in this module composes one of these rather than re-deriving the
//! same append/read/swap/reset bookkeeping by hand.

use crate::error::{ColumnError, Result, WriteOutcome};
use crate::value::{Row, Value, ValueKind};

/// Dense, tightly-packed storage for one scalar physical type, plus the
/// column identity tag (spec §3 "Primitive column buffer").
#[derive(Debug, Clone)]
pub(crate) struct ScalarBuffer<T> {
    pub(crate) values: Vec<T>,
    column_tag: i32,
}

impl<T: Clone> ScalarBuffer<T> {
    pub(crate) fn with_capacity(column_index: i32, capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            column_tag: crate::value::column_tag(column_index),
        }
    }

    pub(crate) fn column_index(&self) -> i32 {
        crate::value::column_index_from_tag(self.column_tag)
    }

    pub(crate) fn length(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub(crate) fn reset(&mut self) {
        self.values.clear();
    }

    pub(crate) fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
    }

    /// Appends one already-extracted scalar. Used internally by nullable
    /// and repeated wrappers, which have already validated the physical
    /// type and definition level before forwarding here.
    pub(crate) fn push(&mut self, v: T) {
        self.values.push(v);
    }

    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.values.get(index)
    }

    /// Generic `write_value`: extracts the scalar with `extract`, which
    /// returns `None` on a physical-type mismatch.
    pub(crate) fn write_value(&mut self, v: &Value, extract: impl Fn(&ValueKind) -> Option<T>) -> Result<()> {
        match extract(&v.kind) {
            Some(t) => {
                self.values.push(t);
                Ok(())
            }
            None => Err(ColumnError::WrongKind),
        }
    }

    pub(crate) fn write_values(&mut self, vs: &[Value], extract: impl Fn(&ValueKind) -> Option<T>) -> WriteOutcome {
        for (i, v) in vs.iter().enumerate() {
            match extract(&v.kind) {
                Some(t) => self.values.push(t),
                None => return WriteOutcome::failed(i, ColumnError::WrongKind),
            }
        }
        WriteOutcome::ok(vs.len())
    }

    pub(crate) fn write_row(&mut self, row: &Row, extract: impl Fn(&ValueKind) -> Option<T>) -> Result<()> {
        match row.len() {
            0 => Err(ColumnError::RowHasTooFewValues),
            1 => self.write_value(&row.0[0], extract),
            n => Err(ColumnError::RowHasTooManyValues(n)),
        }
    }

    pub(crate) fn read_row_at(
        &self,
        index: i64,
        wrap: impl Fn(T) -> ValueKind,
        definition_level: u8,
    ) -> Result<Row> {
        if index < 0 {
            return Err(ColumnError::RowIndexOutOfBounds { index, length: self.values.len() });
        }
        let idx = index as usize;
        match self.values.get(idx) {
            Some(t) => Ok(Row::new(vec![Value::new(wrap(t.clone()), 0, definition_level, self.column_index())])),
            None => Err(ColumnError::EndOfStream),
        }
    }
}
