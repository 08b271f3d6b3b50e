//! Unsigned views over the 32- and 64-bit signed integer buffers.
//!
//! These reuse the signed buffer's storage and override only `less`,
//! comparing the same bit pattern as an unsigned integer (spec §4.1, §9
//! "Polymorphism": "implement as a thin adapter that borrows the inner
//! buffer"). They do not own storage and are not full [`super::ColumnBuffer`]
//! implementations — they exist only to bind an unsigned ordering for sort.

use super::int32::Int32ColumnBuffer;
use super::int64::Int64ColumnBuffer;
use crate::ordering::Orderable;

/// Unsigned-ordering view over an [`Int32ColumnBuffer`]'s storage.
pub struct UInt32View<'a> {
    inner: &'a mut Int32ColumnBuffer,
}

impl<'a> UInt32View<'a> {
    pub fn new(inner: &'a mut Int32ColumnBuffer) -> Self {
        Self { inner }
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.inner.storage.swap(i, j);
    }
}

impl<'a> Orderable for UInt32View<'a> {
    fn less(&self, i: usize, j: usize) -> bool {
        (self.inner.storage.values[i] as u32) < (self.inner.storage.values[j] as u32)
    }
}

/// Unsigned-ordering view over an [`Int64ColumnBuffer`]'s storage.
pub struct UInt64View<'a> {
    inner: &'a mut Int64ColumnBuffer,
}

impl<'a> UInt64View<'a> {
    pub fn new(inner: &'a mut Int64ColumnBuffer) -> Self {
        Self { inner }
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.inner.storage.swap(i, j);
    }
}

impl<'a> Orderable for UInt64View<'a> {
    fn less(&self, i: usize, j: usize) -> bool {
        (self.inner.storage.values[i] as u64) < (self.inner.storage.values[j] as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::ColumnBuffer;
    use crate::value::{Row, Value, ValueKind};

    #[test]
    fn unsigned_view_treats_negative_as_large() {
        let mut buf = Int32ColumnBuffer::new(0, 4);
        buf.write_row(&Row::new(vec![Value::new(ValueKind::Int32(-1), 0, 0, 0)])).unwrap();
        buf.write_row(&Row::new(vec![Value::new(ValueKind::Int32(1), 0, 0, 0)])).unwrap();

        // signed: -1 < 1
        assert!(buf.less(0, 1));

        let view = UInt32View::new(&mut buf);
        // unsigned: 0xFFFF_FFFF > 1
        assert!(!view.less(0, 1));
        assert!(view.less(1, 0));
    }

    #[test]
    fn unsigned_view_swap_mutates_shared_storage() {
        let mut buf = Int64ColumnBuffer::new(0, 4);
        buf.write_row(&Row::new(vec![Value::new(ValueKind::Int64(10), 0, 0, 0)])).unwrap();
        buf.write_row(&Row::new(vec![Value::new(ValueKind::Int64(20), 0, 0, 0)])).unwrap();
        {
            let mut view = UInt64View::new(&mut buf);
            view.swap(0, 1);
        }
        assert_eq!(buf.read_row_at(0).unwrap().0[0].kind, ValueKind::Int64(20));
    }
}
