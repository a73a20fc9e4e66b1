//! Engine configuration.
//!
//! A `GameConfig` describes the board a fresh deal produces: how many
//! colors, how deep each tube is, and how many spare empty tubes the player
//! gets. It also selects the pour rule - the classic whole-group variant and
//! the partial-pour variant are one configuration flag, not two code paths.

use serde::{Deserialize, Serialize};

/// Which pour rule the engine enforces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferRule {
    /// The whole top run must fit in the target (classic rule).
    Full,
    /// Pour as many balls as fit; the remainder stays behind.
    #[default]
    Partial,
}

impl TransferRule {
    /// Whether a target must have room for the entire group.
    #[must_use]
    pub fn requires_full_fit(self) -> bool {
        matches!(self, TransferRule::Full)
    }
}

/// Board setup for a new game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of distinct ball colors; also the number of full tubes dealt.
    pub num_colors: usize,

    /// Balls per color, and the capacity of every tube.
    pub balls_per_tube: usize,

    /// Extra empty tubes dealt alongside the full ones.
    pub free_tubes: usize,

    /// Pour rule for this game.
    pub transfer: TransferRule,
}

impl GameConfig {
    /// Create a configuration with the default (partial) pour rule.
    #[must_use]
    pub fn new(num_colors: usize, balls_per_tube: usize, free_tubes: usize) -> Self {
        assert!(num_colors >= 1, "must have at least 1 color");
        assert!(num_colors <= 256, "at most 256 colors supported");
        assert!(balls_per_tube >= 1, "tubes must hold at least 1 ball");

        Self {
            num_colors,
            balls_per_tube,
            free_tubes,
            transfer: TransferRule::default(),
        }
    }

    /// Select a pour rule.
    #[must_use]
    pub fn with_transfer(mut self, transfer: TransferRule) -> Self {
        self.transfer = transfer;
        self
    }

    /// Total tube count a deal produces: one full tube per color plus the
    /// free tubes.
    #[must_use]
    pub fn num_tubes(&self) -> usize {
        self.num_colors + self.free_tubes
    }
}

impl Default for GameConfig {
    /// The original game's board: 16 colors, 6 balls per tube, 3 free tubes.
    fn default() -> Self {
        Self::new(16, 6, 3)
    }
}
