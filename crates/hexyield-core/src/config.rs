//! Configuration loading and typed config structures for hexyield.
//!
//! The canonical configuration lives in `hexyield-config.yaml` in the working
//! directory; `HEXYIELD_CONFIG` points somewhere else. Every section is
//! optional. Without a `catalog` or `layout` section the built-in starting
//! data is used, and a `map.saved_state` path replaces generation entirely.

use std::path::{Path, PathBuf};

use hexyield_types::{Layout, Tile, TileId};
use hexyield_world::Catalog;
use serde::Deserialize;

/// Default configuration file name, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "hexyield-config.yaml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "HEXYIELD_CONFIG";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The saved grid state file is not a valid tile list.
    #[error("failed to parse saved state {}: {source}", path.display())]
    SavedState {
        /// Path of the saved state file.
        path: PathBuf,
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `hexyield-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HexyieldConfig {
    /// Map selection and gameplay state.
    #[serde(default)]
    pub map: MapConfig,

    /// Terrain catalog. Falls back to the built-in catalog.
    #[serde(default)]
    pub catalog: Option<Catalog>,

    /// Static layout. Falls back to the built-in layout. Ignored when
    /// `map.saved_state` is set.
    #[serde(default)]
    pub layout: Option<Layout>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HexyieldConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// A relative `map.saved_state` path is resolved against the config
    /// file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        if let Some(saved) = config.map.saved_state.as_mut().filter(|saved| saved.is_relative()) {
            *saved = dir.join(&*saved);
        }
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog_or_default(&self) -> Catalog {
        self.catalog
            .clone()
            .unwrap_or_else(hexyield_world::default_catalog)
    }

    /// The configured layout, or the built-in one.
    pub fn layout_or_default(&self) -> Layout {
        self.layout
            .clone()
            .unwrap_or_else(hexyield_world::default_layout)
    }

    /// Read the saved grid state, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::SavedState`] if it is not a JSON tile list.
    pub fn load_saved_state(&self) -> Result<Option<Vec<Tile>>, ConfigError> {
        let Some(path) = &self.map.saved_state else {
            return Ok(None);
        };
        let contents = std::fs::read_to_string(path)?;
        let tiles = serde_json::from_str(&contents).map_err(|source| ConfigError::SavedState {
            path: path.clone(),
            source,
        })?;
        Ok(Some(tiles))
    }
}

/// Resolve the configuration file path.
///
/// `HEXYIELD_CONFIG` wins over [`DEFAULT_CONFIG_PATH`] when set and
/// non-empty.
pub fn config_path() -> PathBuf {
    resolve_config_path(std::env::var(CONFIG_PATH_ENV).ok())
}

fn resolve_config_path(env_value: Option<String>) -> PathBuf {
    env_value
        .filter(|value| !value.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Map selection and gameplay state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapConfig {
    /// Display name of the map.
    #[serde(default = "default_map_name")]
    pub name: String,

    /// JSON tile list to load instead of generating from the layout.
    #[serde(default)]
    pub saved_state: Option<PathBuf>,

    /// Tiles to mark as worked after the map is built.
    #[serde(default)]
    pub worked: Vec<TileId>,

    /// Check every catalog effect definition before computing production.
    #[serde(default = "default_validate_effects")]
    pub validate_effects: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            name: default_map_name(),
            saved_state: None,
            worked: Vec::new(),
            validate_effects: default_validate_effects(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_map_name() -> String {
    "Starting Valley".to_owned()
}

const fn default_validate_effects() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_owned()
}
