//! Shared type definitions for the hexyield terrain effect engine.
//!
//! This crate holds the plain data model consumed by the engine: tile
//! identifiers, hex coordinates, order-preserving maps, effect definitions,
//! catalog entry shapes, and the tile/layout records. It carries no rules
//! logic; evaluation lives in `hexyield-world`.
//!
//! # Modules
//!
//! - [`ids`] -- Sequential tile identifier
//! - [`coords`] -- Axial and cube hex coordinates
//! - [`ordered`] -- Order-preserving maps ([`OrderedMap`], [`PairList`])
//! - [`effects`] -- Effect definitions and operation sets
//! - [`structs`] -- Catalog entries, tiles, and static layouts

pub mod coords;
pub mod effects;
pub mod ids;
pub mod ordered;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use coords::{Axial, Cube};
pub use effects::{EffectDefinition, OperationSet};
pub use ids::TileId;
pub use ordered::{OrderedMap, PairList};
pub use structs::{
    FeatureDefinition, ImprovementClass, ImprovementDefinition, Layout, ResourceMap,
    TerrainDefinition, Tile, TileSpec,
};
