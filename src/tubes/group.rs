//! Ball groups: contiguous same-colored runs treated as one movable unit.

use serde::{Deserialize, Serialize};

use crate::core::ColorId;

/// A maximal run of same-colored balls.
///
/// A group holds at least one ball. When the last ball of a group is
/// removed, the group is dropped from its tube - it is never kept around at
/// count zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallGroup {
    /// Color of every ball in the run.
    pub color: ColorId,

    /// Number of balls in the run. Always at least 1.
    pub count: usize,
}

impl BallGroup {
    /// Create a group of `count` balls of one color.
    #[must_use]
    pub fn new(color: ColorId, count: usize) -> Self {
        assert!(count >= 1, "a ball group holds at least one ball");
        Self { color, count }
    }

    /// Check whether `other` would merge into this group when stacked on it.
    #[must_use]
    pub fn same_color_as(&self, other: &BallGroup) -> bool {
        self.color == other.color
    }
}
