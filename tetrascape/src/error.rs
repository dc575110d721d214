//! Error types for scene construction

use thiserror::Error;

/// Errors raised while validating inputs or building a scene.
///
/// Geometry helpers (line breaking, point shifting, ring construction) are
/// total and never produce these; only the entry points that accept
/// external sizes, colors, or configuration do.
#[derive(Error, Debug)]
pub enum TetraError {
    #[error("Invalid viewport {width}x{height}: dimensions must be positive and finite")]
    InvalidViewport { width: f64, height: f64 },

    #[error("Degenerate tile {width}x{height}: dimensions must be positive and finite")]
    DegenerateTile { width: f64, height: f64 },

    #[error("Invalid color {0:?}: expected six hex digits")]
    InvalidColor(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TetraError>;
