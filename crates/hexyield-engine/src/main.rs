//! Engine binary for hexyield.
//!
//! Loads configuration, builds the terrain map, and prints the map's
//! production report as JSON on stdout. Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `hexyield-config.yaml` (or `HEXYIELD_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Build the map: load saved state, or generate from the layout
//! 4. Mark the configured tiles as worked
//! 5. Optionally validate every catalog effect definition
//! 6. Build and print the production report

mod error;

use std::path::Path;

use hexyield_core::config::{self, HexyieldConfig};
use hexyield_core::report::ProductionReport;
use hexyield_world::TerrainMap;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, map construction, or any production
/// query fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging is not up yet, so the outcome is
    //    reported once the subscriber is installed.
    let config_path = config::config_path();
    let (config, found) = load_config(&config_path)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    info!("hexyield-engine starting");
    if found {
        info!(path = %config_path.display(), map_name = config.map.name, "Configuration loaded");
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
    }

    // 3-4. Build the map and apply gameplay state.
    let map = build_map(&config)?;
    info!(
        tile_count = map.grid().len(),
        center_tile = ?map.center_tile().map(|tile| tile.id),
        worked_count = map.tiles().filter(|tile| tile.worked).count(),
        "Map ready"
    );

    // 5. Catch catalog authoring errors before any query runs.
    if config.map.validate_effects {
        map.catalog()
            .validate_effects()
            .map_err(EngineError::from)?;
        info!("Catalog effects validated");
    }

    // 6. Build and print the report.
    let report = ProductionReport::build(&config.map.name, &map).map_err(EngineError::from)?;
    info!(
        worked_count = report.worked_count(),
        worked_total = ?report.worked_total,
        "Production report built"
    );
    println!("{}", render_report(&report)?);

    Ok(())
}

/// Load the configuration from `path`.
///
/// Returns the defaults, and `false`, if the file does not exist.
fn load_config(path: &Path) -> Result<(HexyieldConfig, bool), EngineError> {
    if path.exists() {
        let config = HexyieldConfig::from_file(path)?;
        Ok((config, true))
    } else {
        Ok((HexyieldConfig::default(), false))
    }
}

/// Build the map from saved state if configured, otherwise from the layout,
/// then mark the configured tiles as worked.
fn build_map(config: &HexyieldConfig) -> Result<TerrainMap, EngineError> {
    let catalog = config.catalog_or_default();
    let mut map = if let Some(tiles) = config.load_saved_state()? {
        info!(tile_count = tiles.len(), "Loading saved map state");
        TerrainMap::from_saved(catalog, tiles)?
    } else {
        TerrainMap::generate(catalog, &config.layout_or_default())?
    };

    for id in &config.map.worked {
        map.set_worked(*id, true)?;
        debug!(tile_id = %id, "Tile marked worked");
    }

    Ok(map)
}

/// Serialize the report as pretty-printed JSON.
fn render_report(report: &ProductionReport) -> Result<String, EngineError> {
    Ok(serde_json::to_string_pretty(report)?)
}
