//! Tetra mesh generation
//!
//! A tetra is a flat triangle footprint (`a`, `b`, `c`) lifted toward a
//! displaced apex `g`, with one jittered midpoint on each rising edge
//! (`d`, `e`, `f`). Three polygons over those seven points render as a
//! small three-faced pyramid:
//!
//! ```text
//!            b
//!          / | \
//!        /   e   \
//!      a --d-g-f-- c
//! ```
//!
//! The apex drops further below the footprint the lower the tile sits in
//! the viewport, which reads as a receding landscape.

use std::f64::consts::PI;

use glam::DVec2;
use rand::Rng;

use crate::color::{ColorPair, Rgb};
use crate::config::MeshConfig;
use crate::geometry::{Tile, Viewport};

/// Perturbation parameters for tetra generation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshParams {
    /// Maximum displacement radius as a fraction of tile width
    pub shift_fraction: f64,
    /// Edge break fraction range `[break_min, break_max)`
    pub break_min: f64,
    pub break_max: f64,
    /// Apex elevation scale in tile heights
    pub elevation_tiles: f64,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self::from(&MeshConfig::default())
    }
}

impl From<&MeshConfig> for MeshParams {
    fn from(config: &MeshConfig) -> Self {
        Self {
            shift_fraction: config.shift_fraction,
            break_min: config.break_min,
            break_max: config.break_max,
            elevation_tiles: config.elevation_tiles,
        }
    }
}

/// A filled polygon
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    pub points: Vec<DVec2>,
    pub fill: Rgb,
}

/// The seven control points of a tetra
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TetraVertices {
    pub a: DVec2,
    pub b: DVec2,
    pub c: DVec2,
    pub d: DVec2,
    pub e: DVec2,
    pub f: DVec2,
    pub g: DVec2,
}

/// Three polygons forming one tetra
#[derive(Clone, Debug, PartialEq)]
pub struct TetraMesh {
    pub vertices: TetraVertices,
    /// `[a, b, c, f, g, d]`
    pub ground: Polygon,
    /// `[a, b, e, g, d]`
    pub face_a: Polygon,
    /// `[b, c, f, g, e]`
    pub face_b: Polygon,
}

impl TetraMesh {
    /// Polygons in paint order: ground, right face, left face
    pub fn paint_order(&self) -> [&Polygon; 3] {
        [&self.ground, &self.face_b, &self.face_a]
    }

    /// Polygons in declaration order: ground, left face, right face
    pub fn polygons(&self) -> [&Polygon; 3] {
        [&self.ground, &self.face_a, &self.face_b]
    }
}

/// Point a random fraction of the way from `from` to `to`
///
/// The fraction is uniform in `[min, max)`; with equal bounds the split is
/// deterministic.
pub fn break_line_within<R: Rng + ?Sized>(
    from: DVec2,
    to: DVec2,
    min: f64,
    max: f64,
    rng: &mut R,
) -> DVec2 {
    let fraction = if max > min {
        rng.random_range(min..max)
    } else {
        min
    };
    from + (to - from) * fraction
}

/// Point between 20% and 80% of the way from `from` to `to`
pub fn break_line<R: Rng + ?Sized>(from: DVec2, to: DVec2, rng: &mut R) -> DVec2 {
    break_line_within(from, to, 0.2, 0.8, rng)
}

/// Displace a point by a uniform radius in `[0, max_radius)` in a uniformly
/// random direction
pub fn point_shift<R: Rng + ?Sized>(point: DVec2, max_radius: f64, rng: &mut R) -> DVec2 {
    let radius = rng.random::<f64>() * max_radius;
    let theta = rng.random::<f64>() * 2.0 * PI;
    point + DVec2::from_angle(theta) * radius
}

/// Apex drop for a tile whose center sits at `y`
///
/// Measured from the viewport's horizontal half-extent rather than its top
/// edge, so even the top row keeps a visible apex.
pub fn elevate(y: f64, tile: &Tile, viewport: &Viewport, elevation_tiles: f64) -> f64 {
    let depth = (y - viewport.x) / viewport.height;
    tile.height * elevation_tiles * depth
}

/// Generate one perturbed tetra centered at `offset`
pub fn draw_tetra<R: Rng + ?Sized>(
    tile: &Tile,
    offset: DVec2,
    colors: ColorPair,
    viewport: &Viewport,
    params: &MeshParams,
    rng: &mut R,
) -> TetraMesh {
    let shift = params.shift_fraction * tile.width;
    let breaker = |from: DVec2, to: DVec2, rng: &mut R| {
        break_line_within(from, to, params.break_min, params.break_max, rng)
    };

    let a = offset + DVec2::new(-tile.width / 2.0, 0.0);
    let b = offset + DVec2::new(0.0, -tile.height / 2.0);
    let c = offset + DVec2::new(tile.width / 2.0, 0.0);

    let apex = offset + DVec2::new(0.0, elevate(offset.y, tile, viewport, params.elevation_tiles));
    let g = point_shift(apex, shift, rng);

    let d = breaker(a, g, rng);
    let d = point_shift(d, shift, rng);
    let e = breaker(b, g, rng);
    let e = point_shift(e, shift, rng);
    let f = breaker(c, g, rng);
    let f = point_shift(f, shift, rng);

    TetraMesh {
        vertices: TetraVertices { a, b, c, d, e, f, g },
        ground: Polygon {
            points: vec![a, b, c, f, g, d],
            fill: colors.color_a,
        },
        face_a: Polygon {
            points: vec![a, b, e, g, d],
            fill: colors.color_a,
        },
        face_b: Polygon {
            points: vec![b, c, f, g, e],
            fill: colors.color_b,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::tetra_color;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn rng() -> Pcg64 {
        Pcg64::seed_from_u64(0x7e7a)
    }

    fn edges(points: &[DVec2]) -> Vec<(DVec2, DVec2)> {
        (0..points.len())
            .map(|i| (points[i], points[(i + 1) % points.len()]))
            .collect()
    }

    fn shares_edge(p: &Polygon, q: &Polygon, from: DVec2, to: DVec2) -> bool {
        let has = |poly: &Polygon| {
            edges(&poly.points)
                .iter()
                .any(|&(s, e)| (s == from && e == to) || (s == to && e == from))
        };
        has(p) && has(q)
    }

    #[test]
    fn test_break_line_fraction_bounds() {
        let mut rng = rng();
        for _ in 0..10_000 {
            let a = DVec2::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0));
            let b = DVec2::new(rng.random_range(-500.0..500.0), rng.random_range(-500.0..500.0));
            let length = a.distance(b);
            let p = break_line(a, b, &mut rng);
            let dist = a.distance(p);

            assert!(dist >= 0.2 * length - 1e-9, "{} < 20% of {}", dist, length);
            assert!(dist <= 0.8 * length + 1e-9, "{} > 80% of {}", dist, length);
            // stays on the segment
            assert!((dist + p.distance(b) - length).abs() < 1e-6);
        }
    }

    #[test]
    fn test_break_line_fixed_fraction() {
        let mut rng = rng();
        let p = break_line_within(DVec2::ZERO, DVec2::new(10.0, 0.0), 0.5, 0.5, &mut rng);
        assert_eq!(p, DVec2::new(5.0, 0.0));
    }

    #[test]
    fn test_point_shift_radius() {
        let mut rng = rng();
        let origin = DVec2::new(3.0, -7.0);
        for _ in 0..10_000 {
            let p = point_shift(origin, 35.0, &mut rng);
            assert!(p.distance(origin) < 35.0 + 1e-9);
        }
        assert_eq!(point_shift(origin, 0.0, &mut rng), origin);
    }

    #[test]
    fn test_elevation_grows_downward() {
        let tile = Tile::from_width(175.0).unwrap();
        let vp = Viewport::centered(800.0, 600.0).unwrap();
        let top = elevate(vp.top(), &tile, &vp, 2.0);
        let bottom = elevate(vp.bottom(), &tile, &vp, 2.0);
        assert!(bottom > top);
        assert!((bottom - top - 2.0 * tile.height).abs() < 1e-9);
    }

    #[test]
    fn test_tetra_shares_edges() {
        let tile = Tile::from_width(175.0).unwrap();
        let vp = Viewport::centered(800.0, 600.0).unwrap();
        let params = MeshParams::default();
        let mut rng = rng();

        for i in 0..200 {
            let offset = DVec2::new(i as f64 * 7.0 - 700.0, i as f64 * 3.0 - 300.0);
            let mesh = draw_tetra(&tile, offset, tetra_color(offset.y, &vp), &vp, &params, &mut rng);
            let v = mesh.vertices;

            assert_eq!(mesh.polygons().len(), 3);
            assert_eq!(mesh.ground.points.len(), 6);
            assert_eq!(mesh.face_a.points.len(), 5);
            assert_eq!(mesh.face_b.points.len(), 5);

            for p in [v.a, v.b, v.g, v.d] {
                assert!(mesh.face_a.points.contains(&p));
                assert!(mesh.ground.points.contains(&p));
            }
            for p in [v.b, v.c, v.g, v.e, v.f] {
                assert!(mesh.face_b.points.contains(&p));
            }

            assert!(shares_edge(&mesh.ground, &mesh.face_a, v.a, v.b));
            assert!(shares_edge(&mesh.ground, &mesh.face_a, v.g, v.d));
            assert!(shares_edge(&mesh.ground, &mesh.face_b, v.b, v.c));
            assert!(shares_edge(&mesh.ground, &mesh.face_b, v.f, v.g));
            assert!(shares_edge(&mesh.face_a, &mesh.face_b, v.e, v.g));
        }
    }

    #[test]
    fn test_tetra_footprint_and_colors() {
        let tile = Tile::from_width(100.0).unwrap();
        let vp = Viewport::centered(800.0, 600.0).unwrap();
        let colors = tetra_color(0.0, &vp);
        let offset = DVec2::new(50.0, 25.0);
        let mesh = draw_tetra(&tile, offset, colors, &vp, &MeshParams::default(), &mut rng());

        assert_eq!(mesh.vertices.a, DVec2::new(0.0, 25.0));
        assert_eq!(mesh.vertices.b, DVec2::new(50.0, 25.0 - tile.height / 2.0));
        assert_eq!(mesh.vertices.c, DVec2::new(100.0, 25.0));
        assert_eq!(mesh.ground.fill, colors.color_a);
        assert_eq!(mesh.face_a.fill, colors.color_a);
        assert_eq!(mesh.face_b.fill, colors.color_b);

        let apex = offset.y + elevate(offset.y, &tile, &vp, 2.0);
        assert!((mesh.vertices.g - DVec2::new(offset.x, apex)).length() < 0.2 * tile.width);
    }

    #[test]
    fn test_same_seed_same_mesh() {
        let tile = Tile::from_width(175.0).unwrap();
        let vp = Viewport::centered(800.0, 600.0).unwrap();
        let colors = tetra_color(0.0, &vp);
        let params = MeshParams::default();

        let first = draw_tetra(&tile, DVec2::ZERO, colors, &vp, &params, &mut rng());
        let second = draw_tetra(&tile, DVec2::ZERO, colors, &vp, &params, &mut rng());
        assert_eq!(first, second);
    }
}
