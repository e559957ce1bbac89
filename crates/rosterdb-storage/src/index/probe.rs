//! Per-operation result carrying its comparison cost.

/// The value produced by an index operation together with the number of
/// key comparisons it performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe<T> {
    /// Operation result.
    pub value: T,
    /// Key comparisons performed by this operation alone.
    pub comparisons: u64,
}

impl<T> Probe<T> {
    /// Creates a probe result.
    #[inline]
    pub fn new(value: T, comparisons: u64) -> Self {
        Self { value, comparisons }
    }

    /// Transforms the value, keeping the comparison count.
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Probe<U> {
        Probe {
            value: f(self.value),
            comparisons: self.comparisons,
        }
    }
}
