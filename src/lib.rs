//! # ballsort
//!
//! State engine for a ball-sort puzzle: a fixed set of tubes (bounded
//! stacks) holds colored balls, and a legal move pours the contiguous
//! same-colored top run of one tube onto a compatible target.
//!
//! ## Design Principles
//!
//! 1. **One engine instance per game session**: all board and history state
//!    lives in an explicit `PuzzleEngine` value - no globals. Embedders in
//!    concurrent hosts serialize access to each instance externally.
//!
//! 2. **Index-based identity**: tubes are addressed by stable index
//!    everywhere (selection, history records, snapshots), never by
//!    reference.
//!
//! 3. **Illegal taps are not errors**: tapping an incompatible target is a
//!    normal branch of the selection protocol. Recoverable errors exist
//!    only at the snapshot boundary (`LoadError`); internal invariant
//!    violations fail fast.
//!
//! 4. **Rules as configuration**: the classic whole-group pour and the
//!    partial pour are one `TransferRule` flag, not separate code paths.
//!
//! ## Modules
//!
//! - `core`: color ids, game configuration, deterministic RNG
//! - `tubes`: `BallGroup` and `Tube`, the board's building blocks
//! - `engine`: `PuzzleEngine` - selection protocol, undo/redo, suggestions
//! - `snapshot`: the persisted save format and its validation

pub mod core;
pub mod engine;
pub mod snapshot;
pub mod tubes;

// Re-export commonly used types
pub use crate::core::{ColorId, GameConfig, GameRng, TransferRule};
pub use crate::engine::{MoveRecord, PuzzleEngine, SelectOutcome};
pub use crate::snapshot::{LoadError, Snapshot};
pub use crate::tubes::{BallGroup, Tube};
