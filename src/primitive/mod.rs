//! Primitive column buffers: one variant per Parquet physical type, plus
//! two unsigned adapter views. This is the leaf layer of the four
//! component stack in spec §2.
//!
//! The capability set every buffer in this module exposes is the one spec
//! §9 "Polymorphism" names: append-value, append-row, read-row-at, swap,
//! less, length, capacity, size, clone, reset, page. It is captured here as
//! the [`ColumnBuffer`] trait rather than a class hierarchy, per that same
//! note ("avoid deep inheritance hierarchies").

mod scalar;

pub mod boolean;
pub mod byte_array;
pub mod fixed_len_byte_array;
pub mod float32;
pub mod float64;
pub mod int32;
pub mod int64;
pub mod int96;
pub mod unsigned;

pub use boolean::BooleanColumnBuffer;
pub use byte_array::ByteArrayColumnBuffer;
pub use fixed_len_byte_array::FixedLenByteArrayColumnBuffer;
pub use float32::Float32ColumnBuffer;
pub use float64::Float64ColumnBuffer;
pub use int32::Int32ColumnBuffer;
pub use int64::Int64ColumnBuffer;
pub use int96::Int96ColumnBuffer;
pub use unsigned::{UInt32View, UInt64View};

use crate::error::{Result, WriteOutcome};
use crate::ordering::{Orderable, Reversed};
use crate::page::Page;
use crate::value::{Row, Value};

/// Shared capability set implemented by every primitive column buffer.
///
/// Implementations never suspend and never touch shared global state
/// (spec §5); every method runs to completion against owned storage.
pub trait ColumnBuffer: Orderable {
    /// Appends one value. Fails with [`crate::error::ColumnError::WrongKind`]
    /// if `v`'s physical type does not match this buffer's.
    fn write_value(&mut self, v: Value) -> Result<()>;

    /// Appends many values, stopping at the first type mismatch. The
    /// buffer is left consistent for whatever prefix was accepted.
    fn write_values(&mut self, vs: &[Value]) -> WriteOutcome;

    /// Appends a single-value row. Fails if `row` does not contain exactly
    /// one value.
    fn write_row(&mut self, row: &Row) -> Result<()>;

    /// Reads back the single-value row at `index`, tagged with this
    /// buffer's column identity.
    fn read_row_at(&self, index: i64) -> Result<Row>;

    fn length(&self) -> usize;

    fn capacity(&self) -> usize;

    fn size_in_bytes(&self) -> usize;

    /// Exchanges the values at `i` and `j`. For value-typed buffers this
    /// swaps the elements directly; for variable byte array it swaps
    /// `(offset, length)` spans, not bytes.
    fn swap(&mut self, i: usize, j: usize);

    /// Empties the buffer; capacity is preserved.
    fn reset(&mut self);

    /// The identity tag woven into this buffer's emitted values (spec §9).
    fn column_index(&self) -> i32;

    /// Returns an immutable page view over the current contents.
    ///
    /// Takes `&mut self` rather than `&self`: materialising a page for a
    /// wrapper (nullable, repeated) physically reorders its backing
    /// storage to match the logical order sort produced, and the returned
    /// page borrows from that now-reordered storage. Plain primitive
    /// buffers don't need the mutability but share the signature so every
    /// buffer in this crate exposes page behind the same capability.
    fn page(&mut self) -> Page;

    /// Read-only snapshot of size and null accounting. Primitive buffers
    /// have no null concept, so the default reports `null_count: None`;
    /// [`crate::nullable::NullableColumnBuffer`] overrides it.
    fn stats(&self) -> crate::stats::ColumnBufferStats {
        crate::stats::ColumnBufferStats::primitive(self.length(), self.capacity(), self.size_in_bytes())
    }
}

/// Every capability but `less` passes straight through to the wrapped
/// buffer (spec §4.4: "all other operations pass through"). This is what
/// lets a descending sort be built by wrapping a buffer's *base* in
/// `Reversed` before handing it to a nullable or repeated wrapper: the
/// null-ordering policy stays fixed (nulls-first stays first) while only
/// the value comparison among present entries flips.
impl<B: ColumnBuffer> ColumnBuffer for Reversed<B> {
    fn write_value(&mut self, v: Value) -> Result<()> {
        self.inner.write_value(v)
    }

    fn write_values(&mut self, vs: &[Value]) -> WriteOutcome {
        self.inner.write_values(vs)
    }

    fn write_row(&mut self, row: &Row) -> Result<()> {
        self.inner.write_row(row)
    }

    fn read_row_at(&self, index: i64) -> Result<Row> {
        self.inner.read_row_at(index)
    }

    fn length(&self) -> usize {
        self.inner.length()
    }

    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn size_in_bytes(&self) -> usize {
        self.inner.size_in_bytes()
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.inner.swap(i, j)
    }

    fn reset(&mut self) {
        self.inner.reset()
    }

    fn column_index(&self) -> i32 {
        self.inner.column_index()
    }

    fn page(&mut self) -> Page {
        self.inner.page()
    }
}

#[cfg(test)]
mod reversed_tests {
    use super::*;
    use crate::value::ValueKind;
    use super::int32::Int32ColumnBuffer;

    #[test]
    fn reversed_primitive_buffer_passes_through_everything_but_less() {
        let mut buf = Reversed::new(Int32ColumnBuffer::new(0, 4));
        buf.write_value(Value::new(ValueKind::Int32(1), 0, 0, 0)).unwrap();
        buf.write_value(Value::new(ValueKind::Int32(2), 0, 0, 0)).unwrap();
        assert_eq!(buf.length(), 2);
        assert!(buf.less(1, 0));
        assert!(!buf.less(0, 1));
        assert_eq!(buf.read_row_at(0).unwrap().0[0].kind, ValueKind::Int32(1));
    }
}
