//! Type-safe tile identifier.
//!
//! Tile identifiers are handed out sequentially while a grid is generated,
//! starting at [`TileId::FIRST`] and following row-major order. They are
//! plain integers so that saved grids and layouts stay human readable.

use serde::{Deserialize, Serialize};

/// Unique identifier for a tile in the hex grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl TileId {
    /// The first identifier assigned by grid generation.
    pub const FIRST: Self = Self(1);

    /// Return the inner integer value.
    pub const fn into_inner(self) -> u32 {
        self.0
    }

    /// Return the identifier that follows this one, or `None` on overflow.
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl core::fmt::Display for TileId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TileId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<TileId> for u32 {
    fn from(id: TileId) -> Self {
        id.0
    }
}
