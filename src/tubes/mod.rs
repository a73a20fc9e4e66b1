//! Tubes and ball groups: the board's building blocks.

pub mod group;
pub mod tube;

pub use group::BallGroup;
pub use tube::Tube;
