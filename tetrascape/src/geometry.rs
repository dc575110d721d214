//! Viewport and tile dimensions
//!
//! All coordinates are device-independent units with +Y pointing down, the
//! same convention the host surface uses for its view box.

use crate::error::{Result, TetraError};

/// Visible coordinate window, centered on the origin by convention.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// Create a viewport of the given size centered on the origin
    ///
    /// Fails with [`TetraError::InvalidViewport`] when either dimension is
    /// not a positive finite number.
    pub fn centered(width: f64, height: f64) -> Result<Self> {
        if !is_positive(width) || !is_positive(height) {
            return Err(TetraError::InvalidViewport { width, height });
        }

        Ok(Self {
            x: -width / 2.0,
            y: -height / 2.0,
            width,
            height,
        })
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f64 {
        self.y
    }

    /// Bottom edge y coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !is_positive(self.width) || !is_positive(self.height) {
            return Err(TetraError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Tile footprint. Height is `width / sqrt(3)`, giving equilateral faces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile {
    pub width: f64,
    pub height: f64,
}

impl Tile {
    /// Create a tile from its width
    pub fn from_width(width: f64) -> Result<Self> {
        let tile = Self {
            width,
            height: width / 3f64.sqrt(),
        };
        tile.validate()?;
        Ok(tile)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !is_positive(self.width) || !is_positive(self.height) {
            return Err(TetraError::DegenerateTile {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
