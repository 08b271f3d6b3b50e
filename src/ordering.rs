//! Order-inversion wrapper and null-ordering policies (spec §4.4).
//!
//! These are value-level functions bound once, at buffer construction, and
//! never changed during a buffer's lifetime. A descending sort is obtained
//! by composing a null-ordering policy with the [`Reversed`] adapter, not
//! by mutating the policy in place.

/// Placement of NULL values in a sorted column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    NullsFirst,
    NullsLast,
}

impl NullOrdering {
    /// Compares logical row `i` against row `j` given whether each is null
    /// and, when both are non-null, the ordering of their underlying
    /// values. This is the single entry point [`crate::nullable`] and
    /// [`crate::repeated`] delegate `less` to.
    pub fn less(&self, i_is_null: bool, j_is_null: bool, values_less: impl FnOnce() -> bool) -> bool {
        match self {
            // nulls-first: i < j iff i is null and j isn't, or both present
            // and the underlying values compare less.
            NullOrdering::NullsFirst => {
                if i_is_null && !j_is_null {
                    true
                } else if !i_is_null && !j_is_null {
                    values_less()
                } else {
                    false
                }
            }
            // nulls-last: i < j iff i is non-null and either j is null or
            // the underlying values compare less.
            NullOrdering::NullsLast => {
                if i_is_null {
                    false
                } else if j_is_null {
                    true
                } else {
                    values_less()
                }
            }
        }
    }
}

/// Flips `less` for a descending sort; every other operation on the
/// wrapped buffer is expected to pass straight through.
#[derive(Debug, Clone, Copy)]
pub struct Reversed<B> {
    pub inner: B,
}

impl<B> Reversed<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

/// Capability implemented by anything `Reversed` can adapt: a row-indexed
/// ordering relation.
pub trait Orderable {
    fn less(&self, i: usize, j: usize) -> bool;
}

impl<B: Orderable> Orderable for Reversed<B> {
    fn less(&self, i: usize, j: usize) -> bool {
        self.inner.less(j, i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ints(Vec<i32>);
    impl Orderable for Ints {
        fn less(&self, i: usize, j: usize) -> bool {
            self.0[i] < self.0[j]
        }
    }

    #[test]
    fn reversed_flips_less() {
        let asc = Ints(vec![1, 2]);
        assert!(asc.less(0, 1));
        let desc = Reversed::new(Ints(vec![1, 2]));
        assert!(!desc.less(0, 1));
        assert!(desc.less(1, 0));
    }

    #[test]
    fn nulls_first_orders_null_before_any_present() {
        let policy = NullOrdering::NullsFirst;
        assert!(policy.less(true, false, || unreachable!()));
        assert!(!policy.less(false, true, || unreachable!()));
        assert!(!policy.less(true, true, || unreachable!()));
        assert!(policy.less(false, false, || true));
        assert!(!policy.less(false, false, || false));
    }

    #[test]
    fn nulls_last_orders_null_after_any_present() {
        let policy = NullOrdering::NullsLast;
        assert!(!policy.less(true, false, || unreachable!()));
        assert!(policy.less(false, true, || unreachable!()));
        assert!(!policy.less(true, true, || unreachable!()));
        assert!(policy.less(false, false, || true));
        assert!(!policy.less(false, false, || false));
    }
}
