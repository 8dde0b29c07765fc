//! Half-open key ranges with open-ended bounds.

use std::ops::Bound;

/// A `[start, end)` scan request. Empty strings mean "unbounded".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyRange<'a> {
    pub start: &'a str,
    pub end: &'a str,
}

impl<'a> KeyRange<'a> {
    pub fn new(start: &'a str, end: &'a str) -> Self {
        Self { start, end }
    }

    /// Byte bounds suitable for ordered-map and LMDB range iteration.
    pub fn bounds(&self) -> (Bound<&'a [u8]>, Bound<&'a [u8]>) {
        let lower = if self.start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(self.start.as_bytes())
        };
        let upper = if self.end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(self.end.as_bytes())
        };
        (lower, upper)
    }

    /// Whether the range cannot contain any key.
    ///
    /// Ordered-map iteration panics on inverted bounds, so callers check
    /// this first.
    pub fn is_empty(&self) -> bool {
        !self.start.is_empty() && !self.end.is_empty() && self.start >= self.end
    }

    pub fn contains(&self, key: &str) -> bool {
        (self.start.is_empty() || key >= self.start) && (self.end.is_empty() || key < self.end)
    }
}
