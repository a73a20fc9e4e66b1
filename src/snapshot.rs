//! Saved-game snapshots.
//!
//! The snapshot is the engine's only persisted structure: the declared tube
//! capacity, each tube's ball colors bottom-to-top, and both history stacks.
//! How the bytes reach disk is a caller concern. The engine guarantees that
//! `PuzzleEngine::from_snapshot` applied to `engine.snapshot()` rebuilds the
//! same tubes and history; the pending selection is transient UI state and
//! intentionally not persisted.
//!
//! A snapshot is validated before any board is built from it - the engine
//! never silently constructs an inconsistent board.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::ColorId;
use crate::engine::MoveRecord;

/// Full persisted state of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Capacity of every tube.
    pub balls_per_tube: usize,

    /// One inner list per tube, bottom-to-top.
    pub balls: Vec<Vec<ColorId>>,

    /// Moves that can be undone, oldest first.
    pub undo_stack: Vec<MoveRecord>,

    /// Moves that can be redone, oldest first.
    pub redo_stack: Vec<MoveRecord>,
}

impl Snapshot {
    /// Check internal consistency before a board is built from this data.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.balls_per_tube == 0 {
            return Err(LoadError::ZeroCapacity);
        }

        for (tube, colors) in self.balls.iter().enumerate() {
            if colors.len() > self.balls_per_tube {
                return Err(LoadError::TubeOverfilled {
                    tube,
                    len: colors.len(),
                    capacity: self.balls_per_tube,
                });
            }
        }

        let num_tubes = self.balls.len();
        for record in self.undo_stack.iter().chain(self.redo_stack.iter()) {
            for index in [record.source, record.target] {
                if index >= num_tubes {
                    return Err(LoadError::TubeIndexOutOfRange { index, num_tubes });
                }
            }
            // The engine never produces zero-ball moves or moves larger than
            // a tube; either marks a corrupt snapshot.
            if record.count == 0 || record.count > self.balls_per_tube {
                return Err(LoadError::BadMoveCount {
                    count: record.count,
                    capacity: self.balls_per_tube,
                });
            }
        }

        Ok(())
    }
}

/// Why a snapshot was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The declared tube capacity is zero.
    #[error("declared tube capacity must be at least 1")]
    ZeroCapacity,

    /// A tube's ball list exceeds the declared capacity.
    #[error("tube {tube} holds {len} balls but the declared capacity is {capacity}")]
    TubeOverfilled {
        tube: usize,
        len: usize,
        capacity: usize,
    },

    /// A history record references a tube the board does not have.
    #[error("history record references tube {index} but the board has {num_tubes} tubes")]
    TubeIndexOutOfRange { index: usize, num_tubes: usize },

    /// A history record's ball count is impossible for this board.
    #[error("history record moves {count} balls, outside 1..={capacity}")]
    BadMoveCount { count: usize, capacity: usize },
}
