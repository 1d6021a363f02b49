//! Whole-map production reports.
//!
//! A [`ProductionReport`] snapshots the output of every tile on a
//! [`TerrainMap`] and sums the output of the worked ones, which is what a
//! turn actually yields.

use hexyield_types::{ResourceMap, TileId};
use hexyield_world::{TerrainMap, WorldError};
use serde::Serialize;
use tracing::debug;

/// Production of one tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileProduction {
    /// Tile identifier.
    pub id: TileId,
    /// Row.
    pub r: i32,
    /// Column.
    pub q: i32,
    /// Terrain identifier.
    #[serde(rename = "type")]
    pub terrain: String,
    /// Whether the tile counts towards [`ProductionReport::worked_total`].
    pub worked: bool,
    /// Computed output.
    pub output: ResourceMap,
}

/// Production of a whole map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionReport {
    /// Display name of the map.
    pub map_name: String,
    /// The map's center tile, if any.
    pub center_tile: Option<TileId>,
    /// Every tile, in row-major order.
    pub tiles: Vec<TileProduction>,
    /// Sum of the output of all worked tiles.
    pub worked_total: ResourceMap,
}

impl ProductionReport {
    /// Compute production for every tile of `map`.
    ///
    /// # Errors
    ///
    /// Returns the first [`WorldError`] raised by a tile's production
    /// query. Callers that would rather skip a failing tile should query
    /// [`TerrainMap::tile_production`] per tile instead.
    pub fn build(map_name: impl Into<String>, map: &TerrainMap) -> Result<Self, WorldError> {
        let mut tiles = Vec::new();
        let mut worked_total = ResourceMap::new();

        for tile in map.tiles() {
            let output = map.tile_production(tile)?;
            if tile.worked {
                for (resource, amount) in &output {
                    *worked_total.entry(resource.clone()).or_insert(0.0) += amount;
                }
            }
            tiles.push(TileProduction {
                id: tile.id,
                r: tile.r,
                q: tile.q,
                terrain: tile.terrain.clone(),
                worked: tile.worked,
                output,
            });
        }

        debug!(
            tile_count = tiles.len(),
            worked_count = tiles.iter().filter(|tile| tile.worked).count(),
            "Production report built"
        );

        Ok(Self {
            map_name: map_name.into(),
            center_tile: map.center_tile().map(|tile| tile.id),
            tiles,
            worked_total,
        })
    }

    /// Number of worked tiles.
    pub fn worked_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.worked).count()
    }

    /// Production of the tile with the given identifier.
    pub fn tile(&self, id: TileId) -> Option<&TileProduction> {
        self.tiles.iter().find(|tile| tile.id == id)
    }
}
