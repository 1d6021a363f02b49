//! Error types for the engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes between startup and printing the report.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration or saved state loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: hexyield_core::config::ConfigError,
    },

    /// Map construction or a production query failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: hexyield_world::WorldError,
    },

    /// The report could not be serialized.
    #[error("report serialization error: {source}")]
    Report {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
