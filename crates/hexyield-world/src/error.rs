//! Error types for the `hexyield-world` crate.
//!
//! Every error here is fatal to the enclosing operation: grid construction
//! aborts on the first invalid cell, and a production query aborts on the
//! first bad catalog reference or malformed effect. Whether a failed query
//! for one tile should sink a whole turn is the caller's decision.

use hexyield_types::TileId;

/// Which kind of catalog entry a compatibility error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A terrain feature.
    Feature,
    /// A terrain improvement.
    Improvement,
}

impl core::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Feature => f.write_str("feature"),
            Self::Improvement => f.write_str("improvement"),
        }
    }
}

/// Errors that can occur while building the grid or computing production.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The terrain identifier is not in the catalog.
    #[error("unknown terrain type {0}")]
    UnknownTerrain(String),

    /// The feature identifier is not in the catalog.
    #[error("unknown terrain feature {0}")]
    UnknownTerrainFeature(String),

    /// The improvement identifier is not in the catalog.
    #[error("unknown terrain improvement {0}")]
    UnknownTerrainImprovement(String),

    /// A feature or improvement was placed on a terrain it does not allow.
    #[error("{kind} {key} not allowed on terrain {terrain}")]
    TerrainIncompatible {
        /// Feature or improvement.
        kind: EntryKind,
        /// The offending identifier.
        key: String,
        /// The tile's terrain.
        terrain: String,
    },

    /// An effect key does not have one or two non-empty `.`-separated parts.
    #[error("invalid effect key \"{0}\"")]
    InvalidEffectKey(String),

    /// An operation set names something other than `add`, `set` or `mult`.
    #[error("unknown effect op {0}")]
    UnknownEffectOperation(String),

    /// No tile with this identifier exists in the grid.
    #[error("tile not found: {0}")]
    TileNotFound(TileId),

    /// A layout cell index does not fit an axial coordinate.
    #[error("layout cell at row {row}, column {column} is out of coordinate range")]
    PositionOutOfRange {
        /// Layout row index.
        row: usize,
        /// Layout column index.
        column: usize,
    },

    /// Two tiles claim the same axial position.
    #[error("duplicate tile position (r {r}, q {q})")]
    DuplicatePosition {
        /// Row.
        r: i32,
        /// Column.
        q: i32,
    },

    /// Two tiles claim the same identifier.
    #[error("duplicate tile id: {0}")]
    DuplicateTileId(TileId),

    /// The identifier counter ran out during generation.
    #[error("tile identifier space exhausted")]
    IdentifierOverflow,
}
