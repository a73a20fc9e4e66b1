//! Color identification.
//!
//! Every ball carries a `ColorId`. The engine never interprets colors -
//! they are opaque identifiers compared for equality. A renderer maps them
//! to actual paint.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a ball color.
///
/// A fresh deal uses ids `0..num_colors`; loaded boards may carry any ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColorId(pub u8);

impl ColorId {
    /// Create a new color ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for ColorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Color({})", self.0)
    }
}
