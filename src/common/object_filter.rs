// Filtering of listed objects
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use super::ObjectRecord;

/// An inclusive range of object sizes in bytes.
///
/// Either bound may be absent. A range with `min > max` is not rejected, it
/// simply matches nothing.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SizeRange {
    /// Smallest matching size.
    pub min: Option<u64>,

    /// Largest matching size.
    pub max: Option<u64>,
}

impl SizeRange {
    /// Returns `true` if `size` lies within the range.
    pub fn contains(&self, size: u64) -> bool {
        self.min.map_or(true, |min| size >= min)
            && self.max.map_or(true, |max| size <= max)
    }

    /// Returns `true` if neither bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Selects which listed objects are printed.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ObjectFilter {
    /// Substring that object keys must contain. Empty matches everything.
    pub key: String,

    /// Range that object sizes must fall in.
    pub size_range: SizeRange,
}

impl ObjectFilter {
    /// Returns `true` if `record` passes both the key and size filters.
    pub fn matches(&self, record: &ObjectRecord) -> bool {
        record.key.contains(self.key.as_str())
            && self.size_range.contains(record.size)
    }

    /// Returns `true` if this filter lets every object through.
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() && self.size_range.is_unbounded()
    }
}
