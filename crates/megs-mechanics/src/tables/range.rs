//! Range bands: mapping raw AP values onto table indices.

use serde::{Deserialize, Serialize};

/// One inclusive `[min, max]` band of AP values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band(pub i32, pub i32);

impl Band {
    /// Smallest AP value in the band.
    pub fn min(self) -> i32 {
        self.0
    }

    /// Largest AP value in the band.
    pub fn max(self) -> i32 {
        self.1
    }

    /// Returns true if `value` lies inside the band.
    pub fn contains(self, value: i32) -> bool {
        (self.0..=self.1).contains(&value)
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == self.1 {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{}-{}", self.0, self.1)
        }
    }
}

/// The ordered range bands that turn AP values into Action/Result Table indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeTable {
    bands: Vec<Band>,
}

impl RangeTable {
    /// Wrap a list of bands. Shape checks live in [`validate_tables`](super::validate_tables).
    pub fn new(bands: Vec<Band>) -> Self {
        Self { bands }
    }

    /// The bands in index order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Returns true if there are no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Index of the band containing `value`.
    ///
    /// Values above the last band map to the last index and values below the
    /// first band map to 0, so the result is always a valid index for a
    /// non-empty table.
    pub fn index_for(&self, value: i32) -> usize {
        if let Some(idx) = self.bands.iter().position(|band| band.contains(value)) {
            return idx;
        }
        match self.bands.first() {
            Some(first) if value < first.min() => 0,
            _ => self.bands.len().saturating_sub(1),
        }
    }
}
