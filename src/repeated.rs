//! Repeated wrapper (spec §4.3): partitions the level arrays into per-row
//! regions, intercepts writes so only present values reach `base`, and
//! reorders by cloning and streaming rows rather than in-place permutation
//! (the regions are ragged, so there is no cheap block rotation).

use tracing::{debug, trace};

use crate::error::{ColumnError, Result, WriteOutcome};
use crate::ordering::{NullOrdering, Orderable};
use crate::page::Page;
use crate::primitive::ColumnBuffer;
use crate::value::{Row, Value, ValueKind};

/// A `(offset, length)` span into the level arrays, one per logical row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    offset: usize,
    length: usize,
}

/// Payload carried by a level position that has no corresponding entry in
/// `base`; never read by a caller that checks the definition level first.
fn null_placeholder() -> ValueKind {
    ValueKind::Boolean(false)
}

/// Wraps one (optionally nullable) primitive buffer, adding repetition.
#[derive(Debug, Clone)]
pub struct RepeatedColumnBuffer<P> {
    base: P,
    max_repetition_level: u8,
    max_definition_level: u8,
    rows: Vec<Region>,
    repetition_levels: Vec<u8>,
    definition_levels: Vec<u8>,
    /// For each level position: the value's index into `base` if its
    /// definition level is at the maximum, else `-1`. Append order into
    /// `base` tracks level-position order, so this stays valid as long as
    /// `swap` only ever touches `rows` (spec §4.3 "swap").
    value_index: Vec<i64>,
    value_scratch: Vec<Value>,
    reordering: Option<Box<RepeatedColumnBuffer<P>>>,
    null_ordering: NullOrdering,
}

impl<P: ColumnBuffer + Clone> RepeatedColumnBuffer<P> {
    pub fn new(base: P, max_repetition_level: u8, max_definition_level: u8, null_ordering: NullOrdering) -> Self {
        trace!(max_repetition_level, max_definition_level, "new repeated column buffer");
        Self {
            base,
            max_repetition_level,
            max_definition_level,
            rows: Vec::new(),
            repetition_levels: Vec::new(),
            definition_levels: Vec::new(),
            value_index: Vec::new(),
            value_scratch: Vec::new(),
            reordering: None,
            null_ordering,
        }
    }

    pub fn base(&self) -> &P {
        &self.base
    }

    pub fn length(&self) -> usize {
        self.rows.len()
    }

    pub fn capacity(&self) -> usize {
        self.rows.capacity()
    }

    pub fn size_in_bytes(&self) -> usize {
        self.base.size_in_bytes()
            + self.repetition_levels.len()
            + self.definition_levels.len()
            + self.value_index.len() * std::mem::size_of::<i64>()
    }

    pub fn column_index(&self) -> i32 {
        self.base.column_index()
    }

    pub fn null_count(&self) -> usize {
        self.definition_levels.iter().filter(|&&d| d < self.max_definition_level).count()
    }

    pub fn stats(&self) -> crate::stats::ColumnBufferStats {
        crate::stats::ColumnBufferStats::with_nulls(self.length(), self.capacity(), self.size_in_bytes(), self.null_count())
    }

    pub fn reset(&mut self) {
        trace!("reset repeated column buffer");
        self.base.reset();
        self.rows.clear();
        self.repetition_levels.clear();
        self.definition_levels.clear();
        self.value_index.clear();
    }

    /// Exchanges the region entries only; level arrays and `base` are
    /// untouched (spec §4.3 "swap").
    pub fn swap(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
    }

    /// Appends one value at a time, starting a new region whenever a value
    /// carries repetition level zero and the slice isn't continuing the
    /// buffer's last row (spec §4.3 "write_values"). This also implements
    /// `write_row`, whose single caller-side invariant — the first value of
    /// a row has repetition level zero — guarantees exactly one region is
    /// created per call.
    pub fn write_values(&mut self, values: &[Value]) -> WriteOutcome {
        let mut written = 0;
        for v in values {
            let continues_last_row = v.repetition_level != 0 && !self.rows.is_empty();
            if !continues_last_row {
                let offset = self.repetition_levels.len();
                self.rows.push(Region { offset, length: 0 });
            }
            let last = self.rows.len() - 1;
            self.repetition_levels.push(v.repetition_level);
            self.definition_levels.push(v.definition_level);
            self.rows[last].length += 1;
            if v.definition_level == self.max_definition_level {
                let idx = self.base.length();
                if let Err(e) = self.base.write_row(&Row::new(vec![v.clone()])) {
                    return WriteOutcome::failed(written, e);
                }
                self.value_index.push(idx as i64);
            } else {
                self.value_index.push(-1);
            }
            written += 1;
        }
        WriteOutcome::ok(written)
    }

    /// Rejects empty rows, then delegates to [`Self::write_values`] (spec
    /// §4.3 "write_row").
    pub fn write_row(&mut self, row: &Row) -> Result<()> {
        if row.is_empty() {
            return Err(ColumnError::RowHasTooFewValues);
        }
        self.write_values(&row.0).into_result().map(|_| ())
    }

    /// Appends a logical row with zero elements — a present but empty
    /// repeated field (`[[]]`), which is a zero-length region and not the
    /// malformed, argument-less call `write_row` rejects.
    pub fn write_empty_row(&mut self) {
        let offset = self.repetition_levels.len();
        self.rows.push(Region { offset, length: 0 });
    }

    pub fn read_row_at(&self, index: i64) -> Result<Row> {
        if index < 0 {
            return Err(ColumnError::RowIndexOutOfBounds { index, length: self.rows.len() });
        }
        let idx = index as usize;
        if idx >= self.rows.len() {
            return Err(ColumnError::EndOfStream);
        }
        let region = self.rows[idx];
        let column_index = self.base.column_index();
        let mut values = Vec::with_capacity(region.length);
        for k in 0..region.length {
            let pos = region.offset + k;
            let rep = self.repetition_levels[pos];
            let def = self.definition_levels[pos];
            if def == self.max_definition_level {
                let mut v = self.base.read_row_at(self.value_index[pos])?.0.remove(0);
                v.repetition_level = rep;
                v.definition_level = def;
                values.push(v);
            } else {
                values.push(Value::new(null_placeholder(), rep, def, column_index));
            }
        }
        Ok(Row::new(values))
    }

    /// Three-way comparison of one level position against another, using
    /// the bound null-ordering policy over `base` for present positions.
    fn compare_position(&self, pos_i: usize, pos_j: usize) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        let max = self.max_definition_level;
        let i_null = self.definition_levels[pos_i] < max;
        let j_null = self.definition_levels[pos_j] < max;
        match (i_null, j_null) {
            (true, true) => Ordering::Equal,
            (true, false) => {
                if self.null_ordering.less(true, false, || unreachable!()) {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, true) => {
                if self.null_ordering.less(false, true, || unreachable!()) {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => {
                let vi = self.value_index[pos_i] as usize;
                let vj = self.value_index[pos_j] as usize;
                if self.base.less(vi, vj) {
                    Ordering::Less
                } else if self.base.less(vj, vi) {
                    Ordering::Greater
                } else {
                    Ordering::Equal
                }
            }
        }
    }

    fn is_in_append_order(&self) -> bool {
        let mut expected = 0usize;
        for r in &self.rows {
            if r.offset != expected {
                return false;
            }
            expected += r.length;
        }
        true
    }

    fn empty_like(&self) -> Self {
        let mut base = self.base.clone();
        base.reset();
        Self {
            base,
            max_repetition_level: self.max_repetition_level,
            max_definition_level: self.max_definition_level,
            rows: Vec::new(),
            repetition_levels: Vec::new(),
            definition_levels: Vec::new(),
            value_index: Vec::new(),
            value_scratch: Vec::new(),
            reordering: None,
            null_ordering: self.null_ordering,
        }
    }

    fn take_scratch(&mut self) -> Box<Self> {
        match self.reordering.take() {
            Some(mut scratch) => {
                scratch.reset();
                scratch
            }
            None => Box::new(self.empty_like()),
        }
    }

    /// Streams rows into a scratch clone in current (possibly sorted)
    /// order, then swaps storage with it (spec §4.3 "page materialisation"
    /// steps 1-4). A no-op when the regions are still in append order.
    pub fn materialize(&mut self) {
        if self.is_in_append_order() {
            return;
        }
        debug!(rows = self.rows.len(), "materializing repeated column buffer via clone-and-stream");
        let mut scratch = self.take_scratch();
        for k in 0..self.rows.len() {
            let region = self.rows[k];
            self.value_scratch.clear();
            for i in 0..region.length {
                let pos = region.offset + i;
                let rep = self.repetition_levels[pos];
                let def = self.definition_levels[pos];
                if def == self.max_definition_level {
                    let mut v = self.base.read_row_at(self.value_index[pos]).expect("region value index in range").0.remove(0);
                    v.repetition_level = rep;
                    v.definition_level = def;
                    self.value_scratch.push(v);
                } else {
                    self.value_scratch.push(Value::new(null_placeholder(), rep, def, self.base.column_index()));
                }
            }
            if region.length == 0 {
                scratch.write_empty_row();
            } else {
                scratch.write_row(&Row::new(self.value_scratch.clone())).expect("row reconstructed from valid state");
            }
        }
        std::mem::swap(&mut self.base, &mut scratch.base);
        std::mem::swap(&mut self.rows, &mut scratch.rows);
        std::mem::swap(&mut self.repetition_levels, &mut scratch.repetition_levels);
        std::mem::swap(&mut self.definition_levels, &mut scratch.definition_levels);
        std::mem::swap(&mut self.value_index, &mut scratch.value_index);
        self.reordering = Some(scratch);
    }

    /// Materialises, then returns a page wrapping `base`'s page together
    /// with both level arrays.
    pub fn page(&mut self) -> Page {
        self.materialize();
        let column_index = self.base.column_index();
        Page::repeated(self.base.page().values, &self.definition_levels, &self.repetition_levels, column_index)
    }
}

impl<P: ColumnBuffer + Clone> Orderable for RepeatedColumnBuffer<P> {
    /// Lexicographic comparison over `min(len_i, len_j)` level pairs, each
    /// taken from the row's own region (the spec-directed resolution of
    /// the open question in spec §9, rather than a shared slot index). Ties
    /// on the common prefix resolve by shorter row first.
    fn less(&self, i: usize, j: usize) -> bool {
        use std::cmp::Ordering;
        let ri = self.rows[i];
        let rj = self.rows[j];
        let common = ri.length.min(rj.length);
        for k in 0..common {
            match self.compare_position(ri.offset + k, rj.offset + k) {
                Ordering::Less => return true,
                Ordering::Greater => return false,
                Ordering::Equal => continue,
            }
        }
        ri.length < rj.length
    }
}
