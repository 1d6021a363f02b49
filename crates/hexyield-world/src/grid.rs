//! The hex grid: a sparse map from position to tile.
//!
//! [`HexGrid::generate`] builds tiles from a static [`Layout`] and validates
//! every reference against the [`Catalog`] up front. The first bad cell
//! aborts construction and no grid is returned. [`HexGrid::from_tiles`]
//! accepts an already-validated tile list (saved state) and only checks
//! structure.
//!
//! Tiles are keyed by [`Axial`] in a `BTreeMap`, which gives row-major
//! iteration for free; holes in the layout are simply absent keys.

use std::collections::{BTreeMap, BTreeSet};

use hexyield_types::{Axial, Layout, Tile, TileId, TileSpec};
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::WorldError;
use crate::hex;

/// All tiles of the map, indexed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HexGrid {
    tiles: BTreeMap<Axial, Tile>,
}

impl HexGrid {
    /// Create an empty grid.
    pub const fn new() -> Self {
        Self {
            tiles: BTreeMap::new(),
        }
    }

    // -------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------

    /// Generate a grid from static layout data.
    ///
    /// Present cells receive identifiers from 1 upward in row-major order.
    /// Each cell's terrain, features and improvements are checked against
    /// the catalog, and every compatible improvement missing from the cell
    /// is filled in as `false`.
    ///
    /// # Errors
    ///
    /// The first [`WorldError::UnknownTerrain`],
    /// [`WorldError::UnknownTerrainFeature`],
    /// [`WorldError::UnknownTerrainImprovement`] or
    /// [`WorldError::TerrainIncompatible`] encountered, or
    /// [`WorldError::PositionOutOfRange`] if a cell index does not fit.
    pub fn generate(catalog: &Catalog, layout: &Layout) -> Result<Self, WorldError> {
        let mut tiles = BTreeMap::new();
        let mut next_id = Some(TileId::FIRST);

        for (row, column, spec) in layout.cells() {
            let position = cell_position(row, column)?;
            let id = next_id.ok_or(WorldError::IdentifierOverflow)?;
            let tile = build_tile(catalog, spec, position, id)?;
            tiles.insert(position, tile);
            next_id = id.checked_next();
        }

        debug!(tile_count = tiles.len(), "Generated hex grid from layout");
        Ok(Self { tiles })
    }

    /// Build a grid from previously generated tiles.
    ///
    /// Catalog references are trusted; only structural uniqueness is checked.
    ///
    /// # Errors
    ///
    /// [`WorldError::DuplicatePosition`] or [`WorldError::DuplicateTileId`].
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Result<Self, WorldError> {
        let mut grid = Self::new();
        let mut seen_ids = BTreeSet::new();
        for tile in tiles {
            if !seen_ids.insert(tile.id) {
                return Err(WorldError::DuplicateTileId(tile.id));
            }
            let position = tile.position();
            if grid.tiles.contains_key(&position) {
                return Err(WorldError::DuplicatePosition {
                    r: position.r,
                    q: position.q,
                });
            }
            grid.tiles.insert(position, tile);
        }
        debug!(tile_count = grid.tiles.len(), "Loaded hex grid from saved tiles");
        Ok(grid)
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// The tile at a position, if any.
    pub fn tile(&self, position: Axial) -> Option<&Tile> {
        self.tiles.get(&position)
    }

    /// Find a tile by identifier (linear scan).
    pub fn find_tile_by_id(&self, id: TileId) -> Option<&Tile> {
        self.tiles.values().find(|tile| tile.id == id)
    }

    /// Iterate over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid has no tiles.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles adjacent to `tile`, in [`hex::HEX_DIRECTIONS`] order.
    ///
    /// At most six; holes and positions outside the grid are skipped.
    pub fn neighbors(&self, tile: &Tile) -> Vec<&Tile> {
        hex::neighbor_positions(tile.position())
            .filter_map(|position| self.tiles.get(&position))
            .collect()
    }

    /// Consume the grid, returning its tiles in row-major order.
    pub fn into_tiles(self) -> Vec<Tile> {
        self.tiles.into_values().collect()
    }

    // -------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------

    /// Set a tile's `worked` flag.
    ///
    /// # Errors
    ///
    /// [`WorldError::TileNotFound`] if no tile has this identifier.
    pub fn set_worked(&mut self, id: TileId, worked: bool) -> Result<(), WorldError> {
        self.tile_mut(id)?.worked = worked;
        Ok(())
    }

    /// Set a tile's `owned` flag.
    ///
    /// # Errors
    ///
    /// [`WorldError::TileNotFound`] if no tile has this identifier.
    pub fn set_owned(&mut self, id: TileId, owned: bool) -> Result<(), WorldError> {
        self.tile_mut(id)?.owned = owned;
        Ok(())
    }

    /// Toggle an improvement on a tile.
    ///
    /// The improvement must exist in the catalog and be compatible with the
    /// tile's terrain. Class exclusivity is not enforced here.
    ///
    /// # Errors
    ///
    /// [`WorldError::TileNotFound`],
    /// [`WorldError::UnknownTerrainImprovement`] or
    /// [`WorldError::TerrainIncompatible`].
    pub fn set_improvement(
        &mut self,
        catalog: &Catalog,
        id: TileId,
        key: &str,
        present: bool,
    ) -> Result<(), WorldError> {
        let tile = self.tile_mut(id)?;
        catalog.compatible_improvement(&tile.terrain, key)?;
        tile.improvements.insert(key, present);
        Ok(())
    }

    fn tile_mut(&mut self, id: TileId) -> Result<&mut Tile, WorldError> {
        self.tiles
            .values_mut()
            .find(|tile| tile.id == id)
            .ok_or(WorldError::TileNotFound(id))
    }
}

fn cell_position(row: usize, column: usize) -> Result<Axial, WorldError> {
    match (i32::try_from(row), i32::try_from(column)) {
        (Ok(r), Ok(q)) => Ok(Axial::new(r, q)),
        _ => Err(WorldError::PositionOutOfRange { row, column }),
    }
}

fn build_tile(
    catalog: &Catalog,
    spec: &TileSpec,
    position: Axial,
    id: TileId,
) -> Result<Tile, WorldError> {
    let terrain = spec.terrain.as_str();
    catalog.terrain(terrain)?;

    for key in spec.features.keys() {
        catalog.compatible_feature(terrain, key)?;
    }
    for key in spec.improvements.keys() {
        catalog.compatible_improvement(terrain, key)?;
    }

    let mut improvements = spec.improvements.clone();
    for (key, _) in catalog.improvements_for(terrain) {
        if !improvements.contains_key(key) {
            improvements.insert(key, false);
        }
    }

    Ok(Tile {
        id,
        r: position.r,
        q: position.q,
        terrain: spec.terrain.clone(),
        features: spec.features.clone(),
        improvements,
        worked: spec.worked,
        owned: spec.owned,
    })
}
