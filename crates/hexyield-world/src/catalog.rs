//! The terrain catalog: static definitions keyed by identifier.
//!
//! A [`Catalog`] is external, read-only data. It is passed explicitly to
//! grid generation and to the production resolver instead of living in a
//! global, so tests can build synthetic catalogs and a host can swap the
//! catalog between queries.
//!
//! All three tables are order-preserving. Improvement order matters: it
//! decides the order in which absent improvements are filled into a tile and
//! the order of [`Catalog::available_improvements`].

use hexyield_types::{
    FeatureDefinition, ImprovementDefinition, OrderedMap, TerrainDefinition, Tile,
};
use serde::{Deserialize, Serialize};

use crate::effect::validate_effects;
use crate::error::{EntryKind, WorldError};

/// Terrain, feature, and improvement definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Terrain identifier to base yields.
    #[serde(default)]
    pub terrain: OrderedMap<TerrainDefinition>,

    /// Feature identifier to definition.
    #[serde(default)]
    pub features: OrderedMap<FeatureDefinition>,

    /// Improvement identifier to definition.
    #[serde(default)]
    pub improvements: OrderedMap<ImprovementDefinition>,
}

/// An improvement that may be built on (or is already on) a tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailableImprovement<'a> {
    /// Catalog identifier.
    pub key: &'a str,
    /// Catalog definition.
    pub definition: &'a ImprovementDefinition,
    /// Whether the improvement is currently present on the tile.
    pub active: bool,
}

impl Catalog {
    /// Create an empty catalog.
    pub const fn new() -> Self {
        Self {
            terrain: OrderedMap::new(),
            features: OrderedMap::new(),
            improvements: OrderedMap::new(),
        }
    }

    /// Builder: register a terrain.
    #[must_use]
    pub fn with_terrain(mut self, key: impl Into<String>, definition: TerrainDefinition) -> Self {
        self.terrain.insert(key, definition);
        self
    }

    /// Builder: register a feature.
    #[must_use]
    pub fn with_feature(mut self, key: impl Into<String>, definition: FeatureDefinition) -> Self {
        self.features.insert(key, definition);
        self
    }

    /// Builder: register an improvement.
    #[must_use]
    pub fn with_improvement(
        mut self,
        key: impl Into<String>,
        definition: ImprovementDefinition,
    ) -> Self {
        self.improvements.insert(key, definition);
        self
    }

    // -------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------

    /// Look up a terrain.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownTerrain`] if the identifier is missing.
    pub fn terrain(&self, key: &str) -> Result<&TerrainDefinition, WorldError> {
        self.terrain
            .get(key)
            .ok_or_else(|| WorldError::UnknownTerrain(key.to_owned()))
    }

    /// Look up a feature.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownTerrainFeature`] if the identifier is
    /// missing.
    pub fn feature(&self, key: &str) -> Result<&FeatureDefinition, WorldError> {
        self.features
            .get(key)
            .ok_or_else(|| WorldError::UnknownTerrainFeature(key.to_owned()))
    }

    /// Look up an improvement.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownTerrainImprovement`] if the identifier is
    /// missing.
    pub fn improvement(&self, key: &str) -> Result<&ImprovementDefinition, WorldError> {
        self.improvements
            .get(key)
            .ok_or_else(|| WorldError::UnknownTerrainImprovement(key.to_owned()))
    }

    /// Look up a feature and check it may appear on `terrain`.
    ///
    /// # Errors
    ///
    /// [`WorldError::UnknownTerrainFeature`] or
    /// [`WorldError::TerrainIncompatible`].
    pub fn compatible_feature(
        &self,
        terrain: &str,
        key: &str,
    ) -> Result<&FeatureDefinition, WorldError> {
        let definition = self.feature(key)?;
        if !definition.allows_terrain(terrain) {
            return Err(incompatible(EntryKind::Feature, key, terrain));
        }
        Ok(definition)
    }

    /// Look up an improvement and check it may be built on `terrain`.
    ///
    /// # Errors
    ///
    /// [`WorldError::UnknownTerrainImprovement`] or
    /// [`WorldError::TerrainIncompatible`].
    pub fn compatible_improvement(
        &self,
        terrain: &str,
        key: &str,
    ) -> Result<&ImprovementDefinition, WorldError> {
        let definition = self.improvement(key)?;
        if !definition.allows_terrain(terrain) {
            return Err(incompatible(EntryKind::Improvement, key, terrain));
        }
        Ok(definition)
    }

    /// Every improvement that may be built on `terrain`, in catalog order.
    pub fn improvements_for<'a>(
        &'a self,
        terrain: &str,
    ) -> impl Iterator<Item = (&'a str, &'a ImprovementDefinition)> {
        self.improvements
            .iter()
            .filter(move |(_, definition)| definition.allows_terrain(terrain))
    }

    // -------------------------------------------------------------------
    // Improvement listing
    // -------------------------------------------------------------------

    /// List the improvements a player could pick for `tile`.
    ///
    /// Includes every catalog improvement compatible with the tile's terrain,
    /// minus those sharing a class with a *different* improvement already
    /// active on the tile. Active improvements stay listed (flagged
    /// `active`). Active identifiers missing from the catalog are ignored.
    ///
    /// Exclusivity is only applied here; toggling `tile.improvements`
    /// directly is not checked against classes.
    pub fn available_improvements(&self, tile: &Tile) -> Vec<AvailableImprovement<'_>> {
        let active: Vec<(&str, &ImprovementDefinition)> = tile
            .active_improvements()
            .filter_map(|key| {
                self.improvements
                    .iter()
                    .find(|(candidate, _)| *candidate == key)
            })
            .collect();

        self.improvements_for(&tile.terrain)
            .filter(|(key, definition)| {
                !active
                    .iter()
                    .any(|(other, other_def)| other != key && definition.shares_class_with(other_def))
            })
            .map(|(key, definition)| AvailableImprovement {
                key,
                definition,
                active: active.iter().any(|(other, _)| *other == key),
            })
            .collect()
    }

    // -------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------

    /// Eagerly check every feature and improvement effect definition.
    ///
    /// Production queries validate lazily; this lets a host reject a
    /// malformed catalog at load time instead.
    ///
    /// # Errors
    ///
    /// The first [`WorldError::InvalidEffectKey`] or
    /// [`WorldError::UnknownEffectOperation`] found.
    pub fn validate_effects(&self) -> Result<(), WorldError> {
        for definition in self.features.values() {
            validate_effects(&definition.effects)?;
        }
        for definition in self.improvements.values() {
            if let Some(effects) = &definition.effects {
                validate_effects(effects)?;
            }
            if let Some(area_effects) = &definition.area_effects {
                validate_effects(area_effects)?;
            }
        }
        Ok(())
    }
}

fn incompatible(kind: EntryKind, key: &str, terrain: &str) -> WorldError {
    WorldError::TerrainIncompatible {
        kind,
        key: key.to_owned(),
        terrain: terrain.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hexyield_types::{EffectDefinition, ImprovementClass, OperationSet, TileId};

    use super::*;

    fn restricted_to(terrains: &[&str]) -> Vec<String> {
        terrains.iter().map(|t| (*t).to_owned()).collect()
    }

    fn improvement(terrains: Option<&[&str]>, class: Option<&str>) -> ImprovementDefinition {
        ImprovementDefinition {
            terrain: terrains.map(restricted_to),
            class: class.map(|c| ImprovementClass::One(c.to_owned())),
            ..ImprovementDefinition::default()
        }
    }

    fn sample_catalog() -> Catalog {
        Catalog::new()
            .with_terrain("grass", TerrainDefinition::default())
            .with_terrain("hill", TerrainDefinition::default())
            .with_feature(
                "forest",
                FeatureDefinition {
                    terrain: Some(restricted_to(&["hill"])),
                    effects: EffectDefinition::new(),
                },
            )
            .with_improvement("city", improvement(None, Some("settlement")))
            .with_improvement("farm", improvement(Some(&["grass"]), Some("land")))
            .with_improvement("pasture", improvement(Some(&["grass", "hill"]), Some("land")))
            .with_improvement("mine", improvement(Some(&["hill"]), Some("land")))
            .with_improvement("road", improvement(None, None))
    }

    fn grass_tile(active: &[&str]) -> Tile {
        let catalog = sample_catalog();
        let improvements = catalog
            .improvements_for("grass")
            .map(|(key, _)| (key, active.contains(&key)))
            .collect();
        Tile {
            id: TileId(1),
            r: 0,
            q: 0,
            terrain: "grass".to_owned(),
            features: OrderedMap::new(),
            improvements,
            worked: false,
            owned: false,
        }
    }

    fn keys<'a>(listing: &[AvailableImprovement<'a>]) -> Vec<&'a str> {
        listing.iter().map(|i| i.key).collect()
    }

    #[test]
    fn lookups_report_the_missing_kind() {
        let catalog = sample_catalog();
        assert!(matches!(
            catalog.terrain("swamp"),
            Err(WorldError::UnknownTerrain(_))
        ));
        assert!(matches!(
            catalog.feature("reef"),
            Err(WorldError::UnknownTerrainFeature(_))
        ));
        assert!(matches!(
            catalog.improvement("port"),
            Err(WorldError::UnknownTerrainImprovement(_))
        ));
    }

    #[test]
    fn compatibility_checks_allowed_terrain() {
        let catalog = sample_catalog();
        assert!(catalog.compatible_feature("hill", "forest").is_ok());
        let err = catalog.compatible_feature("grass", "forest").unwrap_err();
        assert!(matches!(
            err,
            WorldError::TerrainIncompatible {
                kind: EntryKind::Feature,
                ..
            }
        ));
        assert!(catalog.compatible_improvement("hill", "road").is_ok());
        assert!(catalog.compatible_improvement("hill", "farm").is_err());
    }

    #[test]
    fn improvements_for_keeps_catalog_order() {
        let catalog = sample_catalog();
        let grass: Vec<&str> = catalog.improvements_for("grass").map(|(k, _)| k).collect();
        assert_eq!(grass, vec!["city", "farm", "pasture", "road"]);
    }

    #[test]
    fn listing_without_active_improvements_shows_all_compatible() {
        let catalog = sample_catalog();
        let listing = catalog.available_improvements(&grass_tile(&[]));
        assert_eq!(keys(&listing), vec!["city", "farm", "pasture", "road"]);
        assert!(listing.iter().all(|i| !i.active));
    }

    #[test]
    fn active_improvement_hides_same_class_alternatives() {
        let catalog = sample_catalog();
        let listing = catalog.available_improvements(&grass_tile(&["farm"]));
        assert_eq!(keys(&listing), vec!["city", "farm", "road"]);
        let farm = listing.iter().find(|i| i.key == "farm").unwrap();
        assert!(farm.active);
    }

    #[test]
    fn class_lists_exclude_on_any_overlap() {
        let catalog = sample_catalog().with_improvement(
            "estate",
            ImprovementDefinition {
                class: Some(ImprovementClass::Many(vec![
                    "settlement".to_owned(),
                    "noble".to_owned(),
                ])),
                ..ImprovementDefinition::default()
            },
        );
        let mut tile = grass_tile(&["city"]);
        tile.improvements.insert("estate", false);
        let listing = catalog.available_improvements(&tile);
        assert!(!keys(&listing).contains(&"estate"));
    }

    #[test]
    fn validate_effects_finds_bad_area_effects() {
        let catalog = sample_catalog().with_improvement(
            "shrine",
            ImprovementDefinition {
                area_effects: Some(
                    EffectDefinition::new().with("faith", OperationSet::new().with("pow", 2.0)),
                ),
                ..ImprovementDefinition::default()
            },
        );
        assert!(sample_catalog().validate_effects().is_ok());
        assert!(matches!(
            catalog.validate_effects(),
            Err(WorldError::UnknownEffectOperation(_))
        ));
    }

    #[test]
    fn yaml_catalog_keeps_declaration_order() {
        let yaml = "
terrain:
  plain: { food: 1, production: 1 }
  grass: { food: 2 }
improvements:
  road:
    class: route
    areaEffects:
      grass.gold: { add: 1 }
  farm:
    terrain: [grass, plain]
    class: [land]
    effects:
      food: { add: 1, mult: 1.5 }
";
        let catalog: Catalog = serde_yml::from_str(yaml).unwrap();
        let terrains: Vec<&str> = catalog.terrain.keys().collect();
        assert_eq!(terrains, ["plain", "grass"]);
        let improvements: Vec<&str> = catalog.improvements_for("grass").map(|(k, _)| k).collect();
        assert_eq!(improvements, ["road", "farm"]);

        let farm = catalog.compatible_improvement("plain", "farm").unwrap();
        let (_, operations) = farm.effects.as_ref().unwrap().iter().next().unwrap();
        let names: Vec<&str> = operations.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["add", "mult"]);
        assert!(catalog.validate_effects().is_ok());
    }
}
