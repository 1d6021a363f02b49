//! Default catalog and starting map.
//!
//! A nine-row sparse layout with a city on the central hill, surrounded by
//! a handful of owned tiles. Plains and hills to the north, mountains to
//! the south, a river running through the middle rows.

use hexyield_types::{
    EffectDefinition, FeatureDefinition, ImprovementClass, ImprovementDefinition, Layout,
    OperationSet, TerrainDefinition, TileSpec,
};

use crate::catalog::Catalog;
use crate::error::WorldError;
use crate::terrain_map::TerrainMap;

/// Helper to build a [`TerrainDefinition`].
fn terrain(base_yield: &[(&str, f64)]) -> TerrainDefinition {
    TerrainDefinition {
        base_yield: base_yield
            .iter()
            .map(|(resource, amount)| (*resource, *amount))
            .collect(),
    }
}

fn terrains(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|key| (*key).to_owned()).collect()
}

fn class(names: &[&str]) -> ImprovementClass {
    match names {
        [one] => ImprovementClass::One((*one).to_owned()),
        many => ImprovementClass::Many(many.iter().map(|name| (*name).to_owned()).collect()),
    }
}

/// The built-in terrain catalog.
pub fn default_catalog() -> Catalog {
    Catalog::new()
        // ---------------------------------------------------------------
        // Terrain
        // ---------------------------------------------------------------
        .with_terrain("grass", terrain(&[("food", 2.0)]))
        .with_terrain("plain", terrain(&[("food", 1.0), ("production", 1.0)]))
        .with_terrain("hill", terrain(&[("production", 2.0)]))
        .with_terrain("mountain", terrain(&[("production", 1.0)]))
        // ---------------------------------------------------------------
        // Features
        // ---------------------------------------------------------------
        .with_feature(
            "forest",
            FeatureDefinition {
                terrain: Some(terrains(&["plain", "hill", "mountain"])),
                effects: EffectDefinition::new()
                    .with("production", OperationSet::new().add(1.0))
                    .with("plain.food", OperationSet::new().add(-1.0)),
            },
        )
        .with_feature(
            "river",
            FeatureDefinition {
                terrain: None,
                effects: EffectDefinition::new()
                    .with("food", OperationSet::new().add(1.0))
                    .with("gold", OperationSet::new().add(1.0)),
            },
        )
        // ---------------------------------------------------------------
        // Improvements
        // ---------------------------------------------------------------
        .with_improvement(
            "city",
            ImprovementDefinition {
                terrain: Some(terrains(&["grass", "plain", "hill"])),
                class: Some(class(&["settlement", "land"])),
                effects: Some(
                    EffectDefinition::new()
                        .with("food", OperationSet::new().add(2.0))
                        .with("production", OperationSet::new().add(1.0))
                        .with("gold", OperationSet::new().add(1.0)),
                ),
                area_effects: None,
            },
        )
        .with_improvement(
            "farm",
            ImprovementDefinition {
                terrain: Some(terrains(&["grass", "plain"])),
                class: Some(class(&["land"])),
                effects: Some(EffectDefinition::new().with("food", OperationSet::new().mult(1.5))),
                area_effects: None,
            },
        )
        .with_improvement(
            "mine",
            ImprovementDefinition {
                terrain: Some(terrains(&["hill", "mountain"])),
                class: Some(class(&["land"])),
                effects: Some(
                    EffectDefinition::new().with("production", OperationSet::new().add(2.0)),
                ),
                area_effects: None,
            },
        )
        .with_improvement(
            "road",
            ImprovementDefinition {
                terrain: None,
                class: Some(class(&["route"])),
                effects: None,
                area_effects: Some(
                    EffectDefinition::new().with("grass.gold", OperationSet::new().add(1.0)),
                ),
            },
        )
}

/// Helper to build a layout cell.
fn cell(terrain: &str, features: &[&str]) -> TileSpec {
    features
        .iter()
        .fold(TileSpec::new(terrain), |spec, key| spec.with_feature(*key))
}

fn owned(terrain: &str, features: &[&str]) -> TileSpec {
    cell(terrain, features).owned()
}

/// The built-in nine-row layout.
#[allow(clippy::too_many_lines)]
pub fn default_layout() -> Layout {
    const F: &[&str] = &["forest"];
    const R: &[&str] = &["river"];
    const FR: &[&str] = &["forest", "river"];
    const NONE: &[&str] = &[];

    Layout::new(vec![
        // Row 0 carries no features.
        vec![
            None,
            None,
            Some(cell("hill", NONE)),
            Some(cell("hill", NONE)),
            Some(cell("hill", NONE)),
            Some(cell("hill", NONE)),
            Some(cell("hill", NONE)),
            None,
            None,
        ],
        vec![
            None,
            Some(cell("mountain", NONE)),
            Some(cell("hill", F)),
            Some(cell("hill", F)),
            Some(cell("plain", F)),
            Some(cell("hill", F)),
            Some(cell("plain", FR)),
            None,
        ],
        vec![
            None,
            Some(cell("hill", F)),
            Some(cell("plain", F)),
            Some(cell("hill", NONE)),
            Some(cell("plain", F)),
            Some(cell("hill", F)),
            Some(cell("plain", NONE)),
            Some(cell("hill", FR)),
            None,
        ],
        vec![
            Some(cell("hill", FR)),
            Some(cell("plain", FR)),
            Some(cell("plain", FR)),
            Some(owned("plain", R)),
            Some(owned("plain", FR)),
            Some(cell("plain", R)),
            Some(cell("plain", FR)),
            Some(cell("plain", R)),
        ],
        vec![
            Some(cell("hill", NONE)),
            Some(cell("plain", F)),
            Some(cell("plain", NONE)),
            Some(owned("grass", NONE)),
            Some(owned("hill", NONE).with_improvement("city")),
            Some(owned("grass", NONE)),
            Some(cell("plain", FR)),
            Some(cell("plain", F)),
            Some(cell("hill", F)),
        ],
        vec![
            Some(cell("plain", F)),
            Some(cell("plain", NONE)),
            Some(cell("grass", NONE)),
            Some(owned("grass", NONE)),
            Some(owned("plain", NONE)),
            Some(cell("grass", R)),
            Some(cell("plain", NONE)),
            Some(cell("grass", NONE)),
        ],
        vec![
            None,
            Some(cell("plain", NONE)),
            Some(cell("hill", NONE)),
            Some(cell("grass", NONE)),
            Some(cell("mountain", F)),
            Some(cell("plain", R)),
            Some(cell("mountain", F)),
            Some(cell("plain", NONE)),
            None,
        ],
        vec![
            None,
            Some(cell("mountain", F)),
            Some(cell("mountain", F)),
            Some(cell("mountain", F)),
            Some(cell("mountain", FR)),
            Some(cell("mountain", F)),
            Some(cell("mountain", F)),
            None,
        ],
        vec![
            None,
            None,
            Some(cell("mountain", F)),
            Some(cell("mountain", F)),
            Some(cell("mountain", F)),
            Some(cell("mountain", FR)),
            Some(cell("mountain", F)),
            None,
            None,
        ],
    ])
}

/// Generate the default starting map from [`default_catalog`] and
/// [`default_layout`].
///
/// # Errors
///
/// Returns [`WorldError`] if generation fails (should not happen with the
/// built-in data).
pub fn create_starting_map() -> Result<TerrainMap, WorldError> {
    TerrainMap::generate(default_catalog(), &default_layout())
}
