//! Move history records.
//!
//! A `MoveRecord` names tubes by stable index rather than by reference, so
//! the same record can be replayed forwards (redo) and backwards (undo)
//! against whatever the tubes hold at that moment, and serializes without
//! any aliasing concerns.

use serde::{Deserialize, Serialize};

/// One executed move: `count` balls poured from `source` onto `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Index of the tube the balls left.
    pub source: usize,

    /// Index of the tube the balls landed on.
    pub target: usize,

    /// Number of balls moved. Always at least 1.
    pub count: usize,
}

impl MoveRecord {
    /// Create a new move record.
    #[must_use]
    pub fn new(source: usize, target: usize, count: usize) -> Self {
        Self {
            source,
            target,
            count,
        }
    }
}
