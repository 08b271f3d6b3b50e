//! Nullable (optional) wrapper (spec §4.2): tracks definition levels,
//! keeps nulls out of the wrapped primitive buffer, and performs the
//! one-pass cyclic compaction that reconciles physical and logical order
//! at page materialisation time.

use tracing::{debug, trace};

use crate::error::{ColumnError, Result, WriteOutcome};
use crate::ordering::{NullOrdering, Orderable};
use crate::page::Page;
use crate::primitive::ColumnBuffer;
use crate::value::{Row, Value};

/// Wraps one primitive column buffer, adding optionality.
///
/// Only values at `max_definition_level` reach `base`; everything below it
/// is recorded purely as a `-1` marker in `rows` plus the level in
/// `definition_levels` (spec §3 "Nullable wrapper state").
#[derive(Debug, Clone)]
pub struct NullableColumnBuffer<P> {
    base: P,
    max_definition_level: u8,
    /// For logical row `k`: `-1` if null, else the value's current index
    /// into `base`.
    rows: Vec<i64>,
    definition_levels: Vec<u8>,
    /// Scratch permutation buffer reused across page materialisations.
    sort_index: Vec<usize>,
    null_ordering: NullOrdering,
}

impl<P: ColumnBuffer> NullableColumnBuffer<P> {
    pub fn new(base: P, max_definition_level: u8, null_ordering: NullOrdering) -> Self {
        trace!(max_definition_level, "new nullable column buffer");
        Self {
            base,
            max_definition_level,
            rows: Vec::new(),
            definition_levels: Vec::new(),
            sort_index: Vec::new(),
            null_ordering,
        }
    }

    pub fn base(&self) -> &P {
        &self.base
    }

    pub fn null_count(&self) -> usize {
        self.rows.iter().filter(|&&r| r < 0).count()
    }

    fn is_present(level: u8, max: u8) -> bool {
        level == max
    }

    /// Appends one already-leveled value, routing it to `base` when
    /// present per spec §4.2 "`write_value` contract".
    fn push_one(&mut self, v: &Value) -> Result<()> {
        if Self::is_present(v.definition_level, self.max_definition_level) {
            let idx = self.base.length();
            self.base.write_value(v.clone())?;
            self.rows.push(idx as i64);
        } else {
            self.rows.push(-1);
        }
        self.definition_levels.push(v.definition_level);
        Ok(())
    }
}

impl<P: ColumnBuffer> Orderable for NullableColumnBuffer<P> {
    fn less(&self, i: usize, j: usize) -> bool {
        let max = self.max_definition_level;
        let i_null = self.definition_levels[i] < max;
        let j_null = self.definition_levels[j] < max;
        self.null_ordering.less(i_null, j_null, || self.base.less(self.rows[i] as usize, self.rows[j] as usize))
    }
}

impl<P: ColumnBuffer> ColumnBuffer for NullableColumnBuffer<P> {
    fn write_value(&mut self, v: Value) -> Result<()> {
        self.push_one(&v)
    }

    /// Walks `vs` once, forwarding maximal runs of present values to
    /// `base.write_values` and recording null markers for the rest (spec
    /// §4.2). Stops and surfaces the underlying error on a short write.
    fn write_values(&mut self, vs: &[Value]) -> WriteOutcome {
        let mut i = 0;
        let max = self.max_definition_level;
        while i < vs.len() {
            if !Self::is_present(vs[i].definition_level, max) {
                self.rows.push(-1);
                self.definition_levels.push(vs[i].definition_level);
                i += 1;
                continue;
            }
            let start = i;
            while i < vs.len() && Self::is_present(vs[i].definition_level, max) {
                i += 1;
            }
            let run = &vs[start..i];
            let next_value_index = self.base.length();
            let outcome = self.base.write_values(run);
            for offset in 0..outcome.written {
                self.rows.push((next_value_index + offset) as i64);
                self.definition_levels.push(max);
            }
            if let Some(err) = outcome.error {
                return WriteOutcome::failed(start + outcome.written, err);
            }
        }
        WriteOutcome::ok(vs.len())
    }

    fn write_row(&mut self, row: &Row) -> Result<()> {
        match row.len() {
            0 => Err(ColumnError::RowHasTooFewValues),
            1 => self.push_one(&row.0[0]),
            n => Err(ColumnError::RowHasTooManyValues(n)),
        }
    }

    fn read_row_at(&self, index: i64) -> Result<Row> {
        if index < 0 {
            return Err(ColumnError::RowIndexOutOfBounds { index, length: self.rows.len() });
        }
        let idx = index as usize;
        if idx >= self.rows.len() {
            return Err(ColumnError::EndOfStream);
        }
        let level = self.definition_levels[idx];
        if self.rows[idx] < 0 {
            // the payload is never read by a caller that checks
            // `is_null` first; only the level and column identity carry
            // meaning for a null row.
            let placeholder = Value::new(crate::value::ValueKind::Boolean(false), 0, level, self.base.column_index());
            Ok(Row::new(vec![placeholder]))
        } else {
            self.base.read_row_at(self.rows[idx])
        }
    }

    fn length(&self) -> usize {
        self.rows.len()
    }

    fn capacity(&self) -> usize {
        self.rows.capacity()
    }

    fn size_in_bytes(&self) -> usize {
        self.base.size_in_bytes() + self.definition_levels.len() + self.rows.len() * std::mem::size_of::<i64>()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.rows.swap(i, j);
        self.definition_levels.swap(i, j);
    }

    fn reset(&mut self) {
        trace!("reset nullable column buffer");
        self.base.reset();
        self.rows.clear();
        self.definition_levels.clear();
    }

    fn column_index(&self) -> i32 {
        self.base.column_index()
    }

    /// Performs the cyclic compaction of spec §4.2, then returns a page
    /// borrowing from `base`'s now-reordered storage.
    fn page(&mut self) -> Page {
        self.materialize();
        let column_index = self.base.column_index();
        Page::nullable(self.base.page().values, &self.definition_levels, column_index)
    }

    fn stats(&self) -> crate::stats::ColumnBufferStats {
        crate::stats::ColumnBufferStats::with_nulls(self.length(), self.capacity(), self.size_in_bytes(), self.null_count())
    }
}

impl<P: ColumnBuffer> NullableColumnBuffer<P> {
    /// In-place variant of page materialisation: physically compacts
    /// `base` and renumbers `rows` so that `rows[k] == k` for every
    /// non-null logical row `k`, per spec §4.2 step 4. Call this once
    /// after sorting and before repeated calls to [`ColumnBuffer::page`]
    /// to avoid re-cloning `base` on every call.
    pub fn materialize(&mut self) {
        let v = self.rows.iter().filter(|&&r| r >= 0).count();
        self.sort_index.clear();
        self.sort_index.resize(v, 0);
        let mut rank = 0usize;
        for &r in &self.rows {
            if r >= 0 {
                self.sort_index[r as usize] = rank;
                rank += 1;
            }
        }
        debug!(values = v, "materializing nullable column buffer");
        apply_cyclic_permutation(&mut self.base, &mut self.sort_index);

        let mut rank = 0i64;
        for r in &mut self.rows {
            if *r >= 0 {
                *r = rank;
                rank += 1;
            }
        }
    }
}

/// The one-pass cyclic-swap permutation application of spec §4.2 step 3 /
/// §9 "Cyclic permutation compaction": at most `V - 1` swaps, one
/// auxiliary array, works for any [`ColumnBuffer::swap`] implementation
/// regardless of whether its elements are byte-identical or variable-span.
fn apply_cyclic_permutation<P: ColumnBuffer>(base: &mut P, perm: &mut [usize]) {
    for i in 0..perm.len() {
        while perm[i] != i {
            let target = perm[i];
            base.swap(i, target);
            perm.swap(i, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Int32ColumnBuffer;
    use crate::value::ValueKind;

    fn present(v: i32) -> Value {
        Value::new(ValueKind::Int32(v), 0, 1, 0)
    }

    fn null() -> Value {
        Value::new(ValueKind::Int32(0), 0, 0, 0)
    }

    fn new_buf() -> NullableColumnBuffer<Int32ColumnBuffer> {
        NullableColumnBuffer::new(Int32ColumnBuffer::new(0, 8), 1, NullOrdering::NullsLast)
    }

    #[test]
    fn null_preservation_through_writes() {
        let mut buf = new_buf();
        for v in [present(5), null(), present(1), null(), present(3)] {
            buf.write_row(&Row::new(vec![v])).unwrap();
        }
        assert_eq!(buf.base().length(), 3);
        assert_eq!(buf.null_count(), 2);
        assert!(!buf.read_row_at(0).unwrap().0[0].is_null(1));
        assert!(buf.read_row_at(1).unwrap().0[0].is_null(1));
    }

    #[test]
    fn scenario_a_optional_int32_nulls_last_ascending() {
        let mut buf = new_buf();
        for v in [present(5), null(), present(1), null(), present(3)] {
            buf.write_row(&Row::new(vec![v])).unwrap();
        }
        // selection sort via less/swap
        let n = buf.length();
        for i in 0..n {
            let mut min = i;
            for j in (i + 1)..n {
                if buf.less(j, min) {
                    min = j;
                }
            }
            buf.swap(i, min);
        }
        let order: Vec<Option<i32>> = (0..n)
            .map(|k| {
                let row = buf.read_row_at(k as i64).unwrap();
                match &row.0[0].kind {
                    ValueKind::Int32(v) if !row.0[0].is_null(1) => Some(*v),
                    _ => None,
                }
            })
            .collect();
        assert_eq!(order, vec![Some(1), Some(3), Some(5), None, None]);

        buf.materialize();
        assert_eq!(buf.base().length(), 3);
        for k in 0..3 {
            assert_eq!(buf.read_row_at(k as i64).unwrap().0[0].kind, ValueKind::Int32([1, 3, 5][k]));
        }
    }

    #[test]
    fn cyclic_compaction_has_no_duplicates_or_losses() {
        let mut buf = new_buf();
        for v in [present(1), null(), present(2), present(3), null(), present(4), null(), present(5)] {
            buf.write_row(&Row::new(vec![v])).unwrap();
        }
        let n = buf.length();
        for i in 0..n {
            let mut min = i;
            for j in (i + 1)..n {
                if buf.less(j, min) {
                    min = j;
                }
            }
            buf.swap(i, min);
        }
        buf.materialize();
        let mut seen = vec![false; buf.base().length()];
        for k in 0..buf.length() {
            if buf.rows[k] >= 0 {
                let p = buf.rows[k] as usize;
                assert!(!seen[p], "duplicate physical position {p}");
                seen[p] = true;
                assert_eq!(buf.rows[k] as usize, k - buf.rows[..k].iter().filter(|&&r| r < 0).count());
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn page_is_idempotent_without_intervening_mutation() {
        let mut buf = new_buf();
        for v in [present(1), null(), present(2)] {
            buf.write_row(&Row::new(vec![v])).unwrap();
        }
        // `page()` borrows `buf` mutably for the page's lifetime, so we
        // snapshot each call's output before taking the next one.
        let snapshot1 = format!("{:?}", ColumnBuffer::page(&mut buf));
        let snapshot2 = format!("{:?}", ColumnBuffer::page(&mut buf));
        assert_eq!(snapshot1, snapshot2);
    }

    #[test]
    fn stats_report_null_count() {
        let mut buf = new_buf();
        for v in [present(1), null(), present(2)] {
            buf.write_row(&Row::new(vec![v])).unwrap();
        }
        let stats = buf.stats();
        assert_eq!(stats.len, 3);
        assert_eq!(stats.null_count, Some(1));
    }

    #[test]
    fn clone_is_isolated() {
        let mut buf = new_buf();
        buf.write_row(&Row::new(vec![present(1)])).unwrap();
        let mut cloned = buf.clone();
        cloned.write_row(&Row::new(vec![present(2)])).unwrap();
        assert_eq!(buf.length(), 1);
        assert_eq!(cloned.length(), 2);
    }
}
