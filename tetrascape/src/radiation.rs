//! Radiation fields and Serlio rings
//!
//! A radiation field is a stack of identical rings centered on one tile.
//! The ring outline is Serlio's four-arc oval: two small arcs at the sharp
//! ends and two large arcs along the flat sides, each pair of neighbours
//! meeting tangentially.

use std::f64::consts::PI;
use std::fmt::Write;

use glam::DVec2;
use rand::Rng;

use crate::plane::TilePlane;
use crate::surface::NodeId;

/// One circular arc of a ring, swept counter-clockwise in screen space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcSegment {
    pub center: DVec2,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl ArcSegment {
    pub fn point_at(&self, angle: f64) -> DVec2 {
        self.center + DVec2::from_angle(angle) * self.radius
    }

    pub fn start(&self) -> DVec2 {
        self.point_at(self.start_angle)
    }

    pub fn end(&self) -> DVec2 {
        self.point_at(self.end_angle)
    }
}

/// Closed four-arc oval
#[derive(Clone, Debug, PartialEq)]
pub struct SerlioRing {
    pub center: DVec2,
    pub width: f64,
    pub arcs: [ArcSegment; 4],
}

impl SerlioRing {
    /// Build the oval spanning `width` centered on `center`
    ///
    /// Arc order is left, top, right, bottom. The large arcs' centers sit
    /// `width / (2 * sqrt(3))` off the axis so each arc picks up exactly
    /// where the previous one ended.
    pub fn new(center: DVec2, width: f64) -> Self {
        let small = width / 6.0;
        let large = width / 2.0;
        let rise = width / (2.0 * 3f64.sqrt());

        let arcs = [
            ArcSegment {
                center: center + DVec2::new(-small, 0.0),
                radius: small,
                start_angle: 2.0 * PI / 3.0,
                end_angle: 4.0 * PI / 3.0,
            },
            ArcSegment {
                center: center + DVec2::new(0.0, rise),
                radius: large,
                start_angle: 4.0 * PI / 3.0,
                end_angle: 5.0 * PI / 3.0,
            },
            ArcSegment {
                center: center + DVec2::new(small, 0.0),
                radius: small,
                start_angle: 5.0 * PI / 3.0,
                end_angle: PI / 3.0,
            },
            ArcSegment {
                center: center + DVec2::new(0.0, -rise),
                radius: large,
                start_angle: PI / 3.0,
                end_angle: 2.0 * PI / 3.0,
            },
        ];

        Self {
            center,
            width,
            arcs,
        }
    }

    /// Starting point of the outline
    pub fn start(&self) -> DVec2 {
        self.arcs[0].start()
    }

    /// Last arc's end point; coincides with [`Self::start`]
    pub fn end(&self) -> DVec2 {
        self.arcs[3].end()
    }

    /// SVG path data: a move, four arc commands, and a close
    pub fn path_data(&self) -> String {
        let start = self.start();
        let mut data = format!("M{},{}", start.x, start.y);
        for arc in &self.arcs {
            let end = arc.end();
            // Writing to a String cannot fail
            let _ = write!(data, " A{},{} 0 0 1 {},{}", arc.radius, arc.radius, end.x, end.y);
        }
        data.push_str(" z");
        data
    }
}

/// One ring of a field
#[derive(Clone, Debug, PartialEq)]
pub struct Band {
    /// Position within the field; drives the startup stagger
    pub index: u32,
    pub node: NodeId,
    pub class: String,
}

/// Rings pulsing out of a single tile
#[derive(Clone, Debug, PartialEq)]
pub struct RadiationField {
    pub index: u32,
    /// Index of the epicenter tile in the plane
    pub tile_index: usize,
    pub epicenter: DVec2,
    /// Shared outline of every band
    pub ring: SerlioRing,
    /// Expansion scale reached at the end of each pulse
    pub scale: f64,
    pub bands: Vec<Band>,
}

/// CSS class for a band: `serlio epicenter-{field} delay-{band}`
pub fn band_class(field: u32, band: u32) -> String {
    format!("serlio epicenter-{} delay-{}", field, band)
}

/// Pick an epicenter tile uniformly, with replacement
///
/// Returns the tile index and the epicenter, optionally shifted left by
/// half a tile width. `None` when the plane is empty.
pub fn choose_epicenter<R: Rng + ?Sized>(
    plane: &TilePlane,
    tile_width: f64,
    shift_left: bool,
    rng: &mut R,
) -> Option<(usize, DVec2)> {
    if plane.is_empty() {
        return None;
    }
    let index = rng.random_range(0..plane.len());
    let mut epicenter = plane.tiles[index].offset;
    if shift_left {
        epicenter.x -= tile_width / 2.0;
    }
    Some((index, epicenter))
}

/// Pick a field's expansion scale from the candidate steps
pub fn choose_scale<R: Rng + ?Sized>(steps: &[f64], rng: &mut R) -> f64 {
    match steps.len() {
        0 => 0.0,
        n => steps[rng.random_range(0..n)],
    }
}
