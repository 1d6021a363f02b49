//! Configuration and reporting for hexyield.
//!
//! This crate sits between the terrain engine in `hexyield-world` and the
//! binary: it turns `hexyield-config.yaml` into a catalog, a layout or saved
//! grid, and a set of worked tiles, and it folds a whole map's production
//! into one serializable report.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `hexyield-config.yaml` into
//!   strongly-typed structs, plus saved-state loading.
//! - [`report`] -- [`ProductionReport`]: per-tile output and the worked-tile
//!   total.
//!
//! [`ProductionReport`]: report::ProductionReport

pub mod config;
pub mod report;
