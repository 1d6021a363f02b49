//! Hex grid, terrain catalog, and terrain effect engine for hexyield.
//!
//! This crate computes what each tile of a hex map produces. A tile's output
//! starts from its terrain's base yield and is then folded through the
//! effects of its features, its improvements, and the area effects of the
//! improvements on its worked neighbors.
//!
//! # Modules
//!
//! - [`hex`] -- Storage/cube coordinate conversion, distance, and the
//!   fixed-order neighbor directions.
//! - [`catalog`] -- The injected terrain/feature/improvement registry,
//!   compatibility checks, and the exclusivity-aware improvement listing.
//! - [`effect`] -- Effect keys, the `add`/`set`/`mult` operations, and the
//!   order-preserving evaluator.
//! - [`grid`] -- [`HexGrid`]: generation from layout data, validation,
//!   lookup, and gameplay flag mutation.
//! - [`production`] -- [`ProductionResolver`]: the four-stage tile
//!   production pipeline.
//! - [`terrain_map`] -- [`TerrainMap`]: catalog and grid behind one API,
//!   plus center-tile tracking and saved state.
//! - [`starting_map`] -- Built-in catalog and nine-row starting layout.
//! - [`error`] -- Error types for grid construction and production.

pub mod catalog;
pub mod effect;
pub mod error;
pub mod grid;
pub mod hex;
pub mod production;
pub mod starting_map;
pub mod terrain_map;

// Re-export primary types at crate root.
pub use catalog::{AvailableImprovement, Catalog};
pub use effect::{EffectKey, EffectOperation, apply_effects, validate_effects};
pub use error::{EntryKind, WorldError};
pub use grid::HexGrid;
pub use hex::{HEX_DIRECTIONS, axial_to_cube, cube_distance, cube_to_axial, distance};
pub use production::ProductionResolver;
pub use starting_map::{create_starting_map, default_catalog, default_layout};
pub use terrain_map::{CENTER_IMPROVEMENT, TerrainMap};
