//! The map facade: catalog and grid behind one API.
//!
//! [`TerrainMap`] owns the injected [`Catalog`] and the [`HexGrid`] and
//! exposes the lookup and production operations a game loop needs. It also
//! remembers the map's center tile: the first tile, in row-major order,
//! carrying a `city` improvement when the map was built or loaded.

use hexyield_types::{Layout, ResourceMap, Tile, TileId};
use tracing::{debug, warn};

use crate::catalog::{AvailableImprovement, Catalog};
use crate::error::WorldError;
use crate::grid::HexGrid;
use crate::hex;
use crate::production::ProductionResolver;

/// Improvement that marks the center tile.
pub const CENTER_IMPROVEMENT: &str = "city";

/// A hex map with its terrain catalog.
#[derive(Debug, Clone)]
pub struct TerrainMap {
    catalog: Catalog,
    grid: HexGrid,
    center_tile: Option<TileId>,
}

impl TerrainMap {
    /// Generate a map from static layout data.
    ///
    /// # Errors
    ///
    /// Any validation error from [`HexGrid::generate`]; no map is returned.
    pub fn generate(catalog: Catalog, layout: &Layout) -> Result<Self, WorldError> {
        let grid = HexGrid::generate(&catalog, layout)?;
        Ok(Self::assemble(catalog, grid))
    }

    /// Rebuild a map from saved tiles, skipping generation.
    ///
    /// # Errors
    ///
    /// Any structural error from [`HexGrid::from_tiles`].
    pub fn from_saved(catalog: Catalog, tiles: Vec<Tile>) -> Result<Self, WorldError> {
        let grid = HexGrid::from_tiles(tiles)?;
        let map = Self::assemble(catalog, grid);
        if map.center_tile.is_none() {
            warn!("Saved grid has no {CENTER_IMPROVEMENT} tile");
        }
        Ok(map)
    }

    fn assemble(catalog: Catalog, grid: HexGrid) -> Self {
        let center_tile = grid
            .tiles()
            .find(|tile| tile.has_improvement(CENTER_IMPROVEMENT))
            .map(|tile| tile.id);
        Self {
            catalog,
            grid,
            center_tile,
        }
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    /// The catalog in use.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The underlying grid.
    pub const fn grid(&self) -> &HexGrid {
        &self.grid
    }

    /// Iterate over all tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.grid.tiles()
    }

    /// The center tile, if the map had a city when it was built.
    pub fn center_tile(&self) -> Option<&Tile> {
        self.center_tile
            .and_then(|id| self.grid.find_tile_by_id(id))
    }

    /// A copy of every tile, suitable for saving.
    pub fn saved_state(&self) -> Vec<Tile> {
        self.grid.tiles().cloned().collect()
    }

    /// Swap in a new catalog, returning the old one.
    ///
    /// Tiles are not revalidated; production queries check references
    /// against the new catalog as they run.
    pub fn replace_catalog(&mut self, catalog: Catalog) -> Catalog {
        debug!(
            terrain_count = catalog.terrain.len(),
            feature_count = catalog.features.len(),
            improvement_count = catalog.improvements.len(),
            "Replacing terrain catalog"
        );
        std::mem::replace(&mut self.catalog, catalog)
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Find a tile by identifier.
    pub fn find_tile_by_id(&self, id: TileId) -> Option<&Tile> {
        self.grid.find_tile_by_id(id)
    }

    /// Compute a tile's production.
    ///
    /// # Errors
    ///
    /// See [`ProductionResolver::tile_production`].
    pub fn tile_production(&self, tile: &Tile) -> Result<ResourceMap, WorldError> {
        ProductionResolver::new(&self.catalog, &self.grid).tile_production(tile)
    }

    /// Compute production for the tile with the given identifier.
    ///
    /// # Errors
    ///
    /// [`WorldError::TileNotFound`], or see
    /// [`ProductionResolver::tile_production`].
    pub fn tile_production_by_id(&self, id: TileId) -> Result<ResourceMap, WorldError> {
        let tile = self
            .grid
            .find_tile_by_id(id)
            .ok_or(WorldError::TileNotFound(id))?;
        self.tile_production(tile)
    }

    /// Tiles adjacent to `tile`.
    pub fn neighbors(&self, tile: &Tile) -> Vec<&Tile> {
        self.grid.neighbors(tile)
    }

    /// Hex distance between two tiles.
    #[allow(clippy::unused_self)]
    pub fn distance(&self, a: &Tile, b: &Tile) -> u64 {
        hex::distance(a, b)
    }

    /// Improvements that could be picked for `tile`.
    pub fn improvements(&self, tile: &Tile) -> Vec<AvailableImprovement<'_>> {
        self.catalog.available_improvements(tile)
    }

    // -------------------------------------------------------------------
    // Gameplay mutation
    // -------------------------------------------------------------------

    /// See [`HexGrid::set_worked`].
    ///
    /// # Errors
    ///
    /// [`WorldError::TileNotFound`].
    pub fn set_worked(&mut self, id: TileId, worked: bool) -> Result<(), WorldError> {
        self.grid.set_worked(id, worked)
    }

    /// See [`HexGrid::set_owned`].
    ///
    /// # Errors
    ///
    /// [`WorldError::TileNotFound`].
    pub fn set_owned(&mut self, id: TileId, owned: bool) -> Result<(), WorldError> {
        self.grid.set_owned(id, owned)
    }

    /// See [`HexGrid::set_improvement`].
    ///
    /// # Errors
    ///
    /// [`WorldError::TileNotFound`],
    /// [`WorldError::UnknownTerrainImprovement`] or
    /// [`WorldError::TerrainIncompatible`].
    pub fn set_improvement(
        &mut self,
        id: TileId,
        key: &str,
        present: bool,
    ) -> Result<(), WorldError> {
        self.grid.set_improvement(&self.catalog, id, key, present)
    }
}
