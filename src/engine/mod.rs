//! Move execution, history, and advisory search.

pub mod history;
pub mod puzzle;

pub use history::MoveRecord;
pub use puzzle::{PuzzleEngine, SelectOutcome};
