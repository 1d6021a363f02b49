//! Integration tests for loading configuration and saved state from disk.
//!
//! Each test works in its own scratch directory under the system temp dir.

// Panicking on failure is the correct behavior in test code.
#![allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]

use std::fs;
use std::path::PathBuf;

use hexyield_core::config::{ConfigError, HexyieldConfig};
use hexyield_core::report::ProductionReport;
use hexyield_types::TileId;
use hexyield_world::{TerrainMap, create_starting_map};

/// Create an empty scratch directory unique to this process and test.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("hexyield-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn saved_state_path_is_relative_to_config_file() {
    let dir = scratch_dir("relative");
    let mut map = create_starting_map().unwrap();
    map.set_worked(TileId(31), true).unwrap();
    fs::write(
        dir.join("save.json"),
        serde_json::to_string(&map.saved_state()).unwrap(),
    )
    .unwrap();
    fs::write(
        dir.join("hexyield-config.yaml"),
        "map:\n  saved_state: save.json\n  worked: [30]\n",
    )
    .unwrap();

    let config = HexyieldConfig::from_file(&dir.join("hexyield-config.yaml")).unwrap();
    assert_eq!(config.map.saved_state, Some(dir.join("save.json")));

    let tiles = config.load_saved_state().unwrap().unwrap();
    let mut restored = TerrainMap::from_saved(config.catalog_or_default(), tiles).unwrap();
    for id in &config.map.worked {
        restored.set_worked(*id, true).unwrap();
    }

    let report = ProductionReport::build(&config.map.name, &restored).unwrap();
    assert_eq!(report.worked_count(), 2);
    assert_eq!(report.center_tile, Some(TileId(31)));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn malformed_saved_state_is_reported_with_its_path() {
    let dir = scratch_dir("malformed");
    fs::write(dir.join("save.json"), r#"{"tiles": "nope"}"#).unwrap();
    fs::write(
        dir.join("hexyield-config.yaml"),
        "map:\n  saved_state: save.json\n",
    )
    .unwrap();

    let config = HexyieldConfig::from_file(&dir.join("hexyield-config.yaml")).unwrap();
    let err = config.load_saved_state().unwrap_err();
    assert!(matches!(err, ConfigError::SavedState { ref path, .. } if *path == dir.join("save.json")));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = scratch_dir("missing");
    let result = HexyieldConfig::from_file(&dir.join("absent.yaml"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn configured_catalog_and_layout_drive_generation() {
    let yaml = r"
catalog:
  terrain:
    grass: { food: 2 }
  improvements:
    road:
      areaEffects:
        grass.gold: { add: 2 }
layout:
  - [{ type: grass, improvements: { road: true } }, { type: grass }]
map:
  worked: [1]
";
    let config = HexyieldConfig::parse(yaml).unwrap();
    let mut map = TerrainMap::generate(config.catalog_or_default(), &config.layout_or_default())
        .unwrap();
    for id in &config.map.worked {
        map.set_worked(*id, true).unwrap();
    }

    let report = ProductionReport::build("tiny", &map).unwrap();
    let east = &report.tile(TileId(2)).unwrap().output;
    assert_eq!(east["gold"], 2.0);
    assert_eq!(report.worked_total["food"], 2.0);
    assert!(!report.worked_total.contains_key("gold"));
}
