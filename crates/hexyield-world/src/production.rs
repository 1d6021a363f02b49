//! Tile production: folding every effect source into one output map.
//!
//! The pipeline runs strictly in this order, all stages writing into the
//! same accumulator:
//!
//! 1. Seed from the terrain's base yields.
//! 2. Effects of each feature present on the tile.
//! 3. Effects of each improvement present on the tile.
//! 4. Area effects of each improvement present on each *worked* neighbor.
//!
//! Every stage evaluates with the tile's own terrain as the acting terrain.
//! That includes area effects, so a neighbor's `grass.gold` bonus lands only
//! on grass tiles.
//!
//! Catalog lookups are repeated on every query rather than trusted from
//! generation, since the catalog may have been swapped in between.

use hexyield_types::{ResourceMap, TerrainDefinition, Tile};

use crate::catalog::Catalog;
use crate::effect::apply_effects;
use crate::error::WorldError;
use crate::grid::HexGrid;

/// Computes tile production against an injected catalog and grid.
#[derive(Debug, Clone, Copy)]
pub struct ProductionResolver<'a> {
    catalog: &'a Catalog,
    grid: &'a HexGrid,
}

impl<'a> ProductionResolver<'a> {
    /// Create a resolver over `catalog` and `grid`.
    pub const fn new(catalog: &'a Catalog, grid: &'a HexGrid) -> Self {
        Self { catalog, grid }
    }

    /// Compute the output map for one tile.
    ///
    /// Pure: reads the tile, its neighbors and the catalog, mutates nothing.
    ///
    /// # Errors
    ///
    /// [`WorldError::UnknownTerrain`] (checked first),
    /// [`WorldError::UnknownTerrainFeature`],
    /// [`WorldError::UnknownTerrainImprovement`], or any effect evaluation
    /// error.
    pub fn tile_production(&self, tile: &Tile) -> Result<ResourceMap, WorldError> {
        let terrain = self.catalog.terrain(&tile.terrain)?;
        let acting = tile.terrain.as_str();

        let mut output = ResourceMap::new();
        seed_base_yield(&mut output, terrain);

        for key in tile.active_features() {
            let feature = self.catalog.feature(key)?;
            apply_effects(&mut output, acting, &feature.effects)?;
        }

        for key in tile.active_improvements() {
            let improvement = self.catalog.improvement(key)?;
            if let Some(effects) = &improvement.effects {
                apply_effects(&mut output, acting, effects)?;
            }
        }

        for neighbor in self.grid.neighbors(tile) {
            if !neighbor.worked {
                continue;
            }
            for key in neighbor.active_improvements() {
                let improvement = self.catalog.improvement(key)?;
                if let Some(area_effects) = &improvement.area_effects {
                    apply_effects(&mut output, acting, area_effects)?;
                }
            }
        }

        Ok(output)
    }
}

fn seed_base_yield(output: &mut ResourceMap, terrain: &TerrainDefinition) {
    for (resource, amount) in terrain.base_yield.iter() {
        *output.entry(resource.to_owned()).or_insert(0.0) += amount;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use hexyield_types::{
        Axial, EffectDefinition, FeatureDefinition, ImprovementDefinition, Layout, OperationSet,
        OrderedMap, TileSpec,
    };

    use super::*;

    fn yields(pairs: &[(&str, f64)]) -> TerrainDefinition {
        TerrainDefinition {
            base_yield: pairs.iter().map(|(k, v)| (*k, *v)).collect(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::new()
            .with_terrain("grass", yields(&[("food", 2.0)]))
            .with_terrain("hill", yields(&[("production", 2.0), ("food", 0.0)]))
            .with_feature(
                "river",
                FeatureDefinition {
                    terrain: None,
                    effects: EffectDefinition::new()
                        .with("food", OperationSet::new().add(1.0))
                        .with("gold", OperationSet::new().add(1.0)),
                },
            )
            .with_feature(
                "forest",
                FeatureDefinition {
                    terrain: Some(vec!["hill".to_owned()]),
                    effects: EffectDefinition::new()
                        .with("production", OperationSet::new().add(1.0)),
                },
            )
            .with_improvement(
                "farm",
                ImprovementDefinition {
                    terrain: Some(vec!["grass".to_owned()]),
                    effects: Some(
                        EffectDefinition::new().with("food", OperationSet::new().mult(1.5)),
                    ),
                    ..ImprovementDefinition::default()
                },
            )
            .with_improvement(
                "road",
                ImprovementDefinition {
                    area_effects: Some(
                        EffectDefinition::new().with("grass.gold", OperationSet::new().add(2.0)),
                    ),
                    ..ImprovementDefinition::default()
                },
            )
    }

    /// Grass with river and farm in the middle, flanked by a grass tile and
    /// a hill tile that both carry roads.
    fn grid(catalog: &Catalog) -> HexGrid {
        let layout = Layout::new(vec![vec![
            Some(TileSpec::new("grass").with_improvement("road")),
            Some(
                TileSpec::new("grass")
                    .with_feature("river")
                    .with_improvement("farm"),
            ),
            Some(TileSpec::new("hill").with_feature("forest").with_improvement("road")),
        ]]);
        HexGrid::generate(catalog, &layout).unwrap()
    }

    #[test]
    fn base_yield_seeds_output() {
        let catalog = catalog();
        let grid = grid(&catalog);
        let hill = grid.tile(Axial::new(0, 2)).unwrap();
        let mut bare = hill.clone();
        bare.features = OrderedMap::new();
        let output = ProductionResolver::new(&catalog, &grid)
            .tile_production(&bare)
            .unwrap();
        assert_eq!(output["production"], 2.0);
        assert_eq!(output["food"], 0.0);
    }

    #[test]
    fn features_then_improvements_apply_in_order() {
        let catalog = catalog();
        let grid = grid(&catalog);
        let middle = grid.tile(Axial::new(0, 1)).unwrap();
        let output = ProductionResolver::new(&catalog, &grid)
            .tile_production(middle)
            .unwrap();
        // (2 base + 1 river) * 1.5 farm, rounded up.
        assert_eq!(output["food"], 5.0);
        assert_eq!(output["gold"], 1.0);
    }

    #[test]
    fn area_effects_need_a_worked_neighbor() {
        let catalog = catalog();
        let mut grid = grid(&catalog);
        let middle_id = grid.tile(Axial::new(0, 1)).unwrap().id;
        let west_id = grid.tile(Axial::new(0, 0)).unwrap().id;

        let gold_before = {
            let resolver = ProductionResolver::new(&catalog, &grid);
            let middle = grid.find_tile_by_id(middle_id).unwrap();
            resolver.tile_production(middle).unwrap()["gold"]
        };

        grid.set_worked(west_id, true).unwrap();
        let resolver = ProductionResolver::new(&catalog, &grid);
        let middle = grid.find_tile_by_id(middle_id).unwrap();
        let gold_after = resolver.tile_production(middle).unwrap()["gold"];

        assert_eq!(gold_before, 1.0);
        assert_eq!(gold_after, 3.0);
    }

    #[test]
    fn area_effects_use_the_receiving_terrain() {
        let catalog = catalog();
        let mut grid = grid(&catalog);
        let middle_id = grid.tile(Axial::new(0, 1)).unwrap().id;
        let hill_id = grid.tile(Axial::new(0, 2)).unwrap().id;
        let west_id = grid.tile(Axial::new(0, 0)).unwrap().id;
        grid.set_worked(hill_id, true).unwrap();
        grid.set_worked(middle_id, true).unwrap();

        let resolver = ProductionResolver::new(&catalog, &grid);

        // The hill's road boosts the grass tile next to it...
        let middle = grid.find_tile_by_id(middle_id).unwrap();
        assert_eq!(resolver.tile_production(middle).unwrap()["gold"], 3.0);

        // ...but the west road never reaches the hill, and a grass-scoped
        // bonus would not apply to it anyway.
        let hill = grid.find_tile_by_id(hill_id).unwrap();
        assert!(!resolver.tile_production(hill).unwrap().contains_key("gold"));

        // West grass is only next to the middle tile, which has no road.
        let west = grid.find_tile_by_id(west_id).unwrap();
        assert!(!resolver.tile_production(west).unwrap().contains_key("gold"));
    }

    #[test]
    fn production_is_idempotent() {
        let catalog = catalog();
        let grid = grid(&catalog);
        let resolver = ProductionResolver::new(&catalog, &grid);
        let middle = grid.tile(Axial::new(0, 1)).unwrap();
        assert_eq!(
            resolver.tile_production(middle).unwrap(),
            resolver.tile_production(middle).unwrap()
        );
    }

    #[test]
    fn unknown_terrain_is_checked_first() {
        let catalog = catalog();
        let grid = grid(&catalog);
        let mut tile = grid.tile(Axial::new(0, 1)).unwrap().clone();
        tile.terrain = "lava".to_owned();
        tile.features.insert("bogus", true);
        let err = ProductionResolver::new(&catalog, &grid)
            .tile_production(&tile)
            .unwrap_err();
        assert!(matches!(err, WorldError::UnknownTerrain(ref t) if t == "lava"));
    }

    #[test]
    fn catalog_swap_is_seen_by_later_queries() {
        let catalog = catalog();
        let grid = grid(&catalog);
        let middle = grid.tile(Axial::new(0, 1)).unwrap();

        let mut reloaded = catalog.clone();
        reloaded.features = OrderedMap::new().with("forest", FeatureDefinition::default());
        let err = ProductionResolver::new(&reloaded, &grid)
            .tile_production(middle)
            .unwrap_err();
        assert!(matches!(err, WorldError::UnknownTerrainFeature(ref f) if f == "river"));
    }

    /// The test catalog with the road dropped, as after a reload.
    fn without_road(catalog: &Catalog) -> Catalog {
        let mut reloaded = catalog.clone();
        let farm = catalog.improvements.get("farm").unwrap().clone();
        reloaded.improvements = OrderedMap::new().with("farm", farm);
        reloaded
    }

    /// The test catalog with the road's area effects replaced.
    fn with_road_area_effects(catalog: &Catalog, area_effects: EffectDefinition) -> Catalog {
        let mut reloaded = catalog.clone();
        reloaded.improvements.insert(
            "road",
            ImprovementDefinition {
                area_effects: Some(area_effects),
                ..ImprovementDefinition::default()
            },
        );
        reloaded
    }

    #[test]
    fn dropped_improvement_fails_own_tile_query() {
        let catalog = catalog();
        let grid = grid(&catalog);
        let reloaded = without_road(&catalog);
        let west = grid.tile(Axial::new(0, 0)).unwrap();
        let err = ProductionResolver::new(&reloaded, &grid)
            .tile_production(west)
            .unwrap_err();
        assert!(matches!(err, WorldError::UnknownTerrainImprovement(ref i) if i == "road"));
    }

    #[test]
    fn dropped_improvement_on_neighbor_matters_only_once_worked() {
        let catalog = catalog();
        let mut grid = grid(&catalog);
        let reloaded = without_road(&catalog);
        let middle_id = grid.tile(Axial::new(0, 1)).unwrap().id;
        let west_id = grid.tile(Axial::new(0, 0)).unwrap().id;

        // Idle neighbors are never consulted.
        {
            let middle = grid.find_tile_by_id(middle_id).unwrap();
            let output = ProductionResolver::new(&reloaded, &grid)
                .tile_production(middle)
                .unwrap();
            assert_eq!(output["food"], 5.0);
        }

        grid.set_worked(west_id, true).unwrap();
        let middle = grid.find_tile_by_id(middle_id).unwrap();
        let err = ProductionResolver::new(&reloaded, &grid)
            .tile_production(middle)
            .unwrap_err();
        assert!(matches!(err, WorldError::UnknownTerrainImprovement(ref i) if i == "road"));
    }

    #[test]
    fn malformed_area_effect_key_surfaces_from_production() {
        let catalog = catalog();
        let mut grid = grid(&catalog);
        let broken = with_road_area_effects(
            &catalog,
            EffectDefinition::new().with("grass.gold.extra", OperationSet::new().add(2.0)),
        );
        let middle_id = grid.tile(Axial::new(0, 1)).unwrap().id;
        let west_id = grid.tile(Axial::new(0, 0)).unwrap().id;
        grid.set_worked(west_id, true).unwrap();

        let middle = grid.find_tile_by_id(middle_id).unwrap();
        let err = ProductionResolver::new(&broken, &grid)
            .tile_production(middle)
            .unwrap_err();
        assert!(matches!(err, WorldError::InvalidEffectKey(ref k) if k == "grass.gold.extra"));
    }

    #[test]
    fn unknown_area_effect_operation_surfaces_from_production() {
        let catalog = catalog();
        let mut grid = grid(&catalog);
        let broken = with_road_area_effects(
            &catalog,
            EffectDefinition::new().with("grass.gold", OperationSet::new().with("pow", 2.0)),
        );
        let middle_id = grid.tile(Axial::new(0, 1)).unwrap().id;
        let hill_id = grid.tile(Axial::new(0, 2)).unwrap().id;
        grid.set_worked(hill_id, true).unwrap();

        let middle = grid.find_tile_by_id(middle_id).unwrap();
        let err = ProductionResolver::new(&broken, &grid)
            .tile_production(middle)
            .unwrap_err();
        assert!(matches!(err, WorldError::UnknownEffectOperation(ref op) if op == "pow"));
    }

    #[test]
    fn absent_features_contribute_nothing() {
        let catalog = catalog();
        let grid = grid(&catalog);
        let mut tile = grid.tile(Axial::new(0, 1)).unwrap().clone();
        tile.features.insert("river", false);
        tile.features.insert("unlisted", false);
        let output = ProductionResolver::new(&catalog, &grid)
            .tile_production(&tile)
            .unwrap();
        assert_eq!(output["food"], 3.0);
        assert!(!output.contains_key("gold"));
    }
}
