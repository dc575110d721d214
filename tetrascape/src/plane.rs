//! Tile plane layout
//!
//! Lays out tile centers on a triangular lattice: rows are half a tile
//! height apart and alternate their column parity, so neighbouring rows
//! interleave by half a tile width. The plane spans twice the viewport in
//! each direction so panning never exposes a gap.

use glam::DVec2;
use tracing::debug;

use crate::error::Result;
use crate::geometry::{Tile, Viewport};

/// One lattice position
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileCell {
    pub row: i32,
    pub col: i32,
    /// Tile center in viewport coordinates
    pub offset: DVec2,
}

/// Lattice of tile centers covering the viewport with margin
#[derive(Clone, Debug)]
pub struct TilePlane {
    pub rows: u32,
    pub cols: u32,
    pub width: f64,
    pub height: f64,
    /// Offset of the plane's corner relative to the viewport's corner
    pub offset: DVec2,
    /// Cells in row-major order, top row first
    pub tiles: Vec<TileCell>,
}

/// Center of the tile at `(row, col)`
pub fn tile_offset(row: i32, col: i32, tile: &Tile) -> DVec2 {
    DVec2::new(tile.width * col as f64 / 2.0, tile.height * row as f64 / 2.0)
}

/// Build the tile plane for a viewport
///
/// Rows run over `-rows/2 ..= rows/2` so the lattice is point-symmetric
/// about the origin. Columns start at `-cols/2 + row.rem_euclid(2)` and step
/// by two, which keeps `row + col` parity constant across the plane.
pub fn make_tile_plane(tile: &Tile, viewport: &Viewport) -> Result<TilePlane> {
    tile.validate()?;
    viewport.validate()?;

    let cols = (2.0 * viewport.width / tile.width).ceil() as u32;
    let rows = (2.0 * viewport.height / tile.height).ceil() as u32;
    let width = cols.div_ceil(2) as f64 * tile.width;
    let height = rows.div_ceil(2) as f64 * tile.height;

    let half_rows = (rows / 2) as i32;
    let half_cols = (cols / 2) as i32;

    let mut tiles = Vec::with_capacity(((rows + 1) * (cols / 2 + 1)) as usize);
    for row in -half_rows..=half_rows {
        let mut col = -half_cols + row.rem_euclid(2);
        while col <= half_cols {
            tiles.push(TileCell {
                row,
                col,
                offset: tile_offset(row, col, tile),
            });
            col += 2;
        }
    }

    debug!(
        rows,
        cols,
        tiles = tiles.len(),
        "Tile plane {:.1}x{:.1}",
        width,
        height
    );

    Ok(TilePlane {
        rows,
        cols,
        width,
        height,
        offset: DVec2::new(
            (viewport.width - width) / 2.0,
            (viewport.height - height) / 2.0,
        ),
        tiles,
    })
}

impl TilePlane {
    /// Number of cells
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the plane has no cells
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
