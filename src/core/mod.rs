//! Core types: colors, configuration, RNG.
//!
//! These are the fundamental building blocks the rest of the engine is
//! assembled from. None of them knows anything about tubes or moves.

pub mod color;
pub mod config;
pub mod rng;

pub use color::ColorId;
pub use config::{GameConfig, TransferRule};
pub use rng::GameRng;
