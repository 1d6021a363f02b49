//! Catalog entries, tiles, and static layouts.
//!
//! The catalog entry shapes ([`TerrainDefinition`], [`FeatureDefinition`],
//! [`ImprovementDefinition`]) are authored externally and read-only to the
//! engine. [`TileSpec`] and [`Layout`] describe the static map before
//! generation; [`Tile`] is the validated record produced by generation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::coords::Axial;
use crate::effects::EffectDefinition;
use crate::ids::TileId;
use crate::ordered::OrderedMap;

/// Accumulated production: resource identifier to amount.
pub type ResourceMap = BTreeMap<String, f64>;

// ---------------------------------------------------------------------------
// Catalog entries
// ---------------------------------------------------------------------------

/// Base yields of a terrain type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainDefinition {
    /// Resource identifier to amount, seeded into every tile of this terrain.
    pub base_yield: OrderedMap<f64>,
}

/// A natural tile feature (forest, river, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureDefinition {
    /// Terrains this feature may appear on. `None` allows every terrain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<Vec<String>>,

    /// Effects applied to the tile carrying the feature.
    #[serde(default)]
    pub effects: EffectDefinition,
}

impl FeatureDefinition {
    /// Whether the feature may appear on the given terrain.
    pub fn allows_terrain(&self, terrain: &str) -> bool {
        terrain_allowed(self.terrain.as_deref(), terrain)
    }
}

/// Class tag(s) of an improvement, marking mutually exclusive groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImprovementClass {
    /// A single class identifier.
    One(String),
    /// Several class identifiers.
    Many(Vec<String>),
}

impl ImprovementClass {
    /// Iterate over the class identifiers.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice = match self {
            Self::One(class) => std::slice::from_ref(class),
            Self::Many(classes) => classes.as_slice(),
        };
        slice.iter().map(String::as_str)
    }

    /// Whether the given class identifier is one of ours.
    pub fn contains(&self, class: &str) -> bool {
        self.iter().any(|c| c == class)
    }
}

/// A buildable tile improvement (city, farm, road, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementDefinition {
    /// Terrains this improvement may be built on. `None` allows every terrain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<Vec<String>>,

    /// Exclusivity class(es).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<ImprovementClass>,

    /// Effects applied to the tile carrying the improvement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effects: Option<EffectDefinition>,

    /// Effects applied to every neighbor of a worked tile carrying the
    /// improvement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_effects: Option<EffectDefinition>,
}

impl ImprovementDefinition {
    /// Whether the improvement may be built on the given terrain.
    pub fn allows_terrain(&self, terrain: &str) -> bool {
        terrain_allowed(self.terrain.as_deref(), terrain)
    }

    /// Whether this improvement shares at least one class with `other`.
    pub fn shares_class_with(&self, other: &Self) -> bool {
        match (&self.class, &other.class) {
            (Some(ours), Some(theirs)) => ours.iter().any(|c| theirs.contains(c)),
            _ => false,
        }
    }
}

fn terrain_allowed(allowed: Option<&[String]>, terrain: &str) -> bool {
    allowed.is_none_or(|list| list.iter().any(|t| t == terrain))
}

// ---------------------------------------------------------------------------
// Tiles
// ---------------------------------------------------------------------------

/// A validated tile in the hex grid.
///
/// `improvements` is total over every catalog improvement compatible with
/// `terrain`: absent improvements are stored as explicit `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Sequential identifier.
    pub id: TileId,
    /// Axial row.
    pub r: i32,
    /// Axial column.
    pub q: i32,
    /// Terrain identifier. Immutable after creation.
    #[serde(rename = "type")]
    pub terrain: String,
    /// Feature identifier to presence flag, in declaration order.
    #[serde(default)]
    pub features: OrderedMap<bool>,
    /// Improvement identifier to presence flag.
    #[serde(default)]
    pub improvements: OrderedMap<bool>,
    /// Whether the tile is actively producing (and projecting area effects).
    #[serde(default)]
    pub worked: bool,
    /// Ownership flag. Does not affect production.
    #[serde(default)]
    pub owned: bool,
}

impl Tile {
    /// The tile's axial position.
    pub const fn position(&self) -> Axial {
        Axial::new(self.r, self.q)
    }

    /// Identifiers of the features present on the tile, in map order.
    pub fn active_features(&self) -> impl Iterator<Item = &str> {
        present_keys(&self.features)
    }

    /// Identifiers of the improvements present on the tile, in map order.
    pub fn active_improvements(&self) -> impl Iterator<Item = &str> {
        present_keys(&self.improvements)
    }

    /// Whether the improvement is present on the tile.
    pub fn has_improvement(&self, key: &str) -> bool {
        self.improvements.get(key).copied().unwrap_or(false)
    }
}

fn present_keys(flags: &OrderedMap<bool>) -> impl Iterator<Item = &str> {
    flags
        .iter()
        .filter(|(_, present)| **present)
        .map(|(key, _)| key)
}

// ---------------------------------------------------------------------------
// Static layout
// ---------------------------------------------------------------------------

/// A partial tile description from static layout data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    /// Terrain identifier.
    #[serde(rename = "type")]
    pub terrain: String,
    /// Declared features.
    #[serde(default)]
    pub features: OrderedMap<bool>,
    /// Declared improvements.
    #[serde(default)]
    pub improvements: OrderedMap<bool>,
    /// Initial ownership.
    #[serde(default)]
    pub owned: bool,
    /// Initial worked state.
    #[serde(default)]
    pub worked: bool,
}

impl TileSpec {
    /// A bare tile of the given terrain.
    pub fn new(terrain: impl Into<String>) -> Self {
        Self {
            terrain: terrain.into(),
            features: OrderedMap::new(),
            improvements: OrderedMap::new(),
            owned: false,
            worked: false,
        }
    }

    /// Declare a feature as present.
    #[must_use]
    pub fn with_feature(mut self, key: impl Into<String>) -> Self {
        self.features.insert(key, true);
        self
    }

    /// Declare an improvement as present.
    #[must_use]
    pub fn with_improvement(mut self, key: impl Into<String>) -> Self {
        self.improvements.insert(key, true);
        self
    }

    /// Mark the tile as owned.
    #[must_use]
    pub const fn owned(mut self) -> Self {
        self.owned = true;
        self
    }
}

/// Sparse rows of optional tile specs. `None` cells are holes, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    /// Row-major cells.
    pub rows: Vec<Vec<Option<TileSpec>>>,
}

impl Layout {
    /// Wrap pre-built rows.
    pub const fn new(rows: Vec<Vec<Option<TileSpec>>>) -> Self {
        Self { rows }
    }

    /// Present cells as `(row, column, spec)`, row-major then column order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &TileSpec)> {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(column, cell)| cell.as_ref().map(|spec| (row, column, spec)))
        })
    }
}
