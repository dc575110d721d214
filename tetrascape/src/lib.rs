//! Procedural tetra landscape with pulsing radiation fields
//!
//! Lays a triangular lattice of small three-faced "tetra" pyramids over a
//! viewport, shades them with a vertical gradient, and overlays rings of
//! radiation that pulse outward from random tiles.
//!
//! The crate only does geometry and scheduling. Drawing goes through the
//! [`Surface`] trait; [`SvgSurface`] records a scene graph and writes SVG.
//!
//! # Example
//! ```no_run
//! use std::time::Duration;
//! use rand::SeedableRng;
//! use rand_pcg::Pcg64;
//! use tetrascape::{Scene, SceneConfig, SvgSurface};
//!
//! let mut rng = Pcg64::seed_from_u64(42);
//! let mut svg = SvgSurface::new();
//! let mut scene = Scene::build(&SceneConfig::default(), 800.0, 600.0, &mut svg, &mut rng)?;
//!
//! // Advance the radiation pulse by one 60 Hz frame
//! scene.tick(Duration::from_micros(16_667), &mut svg);
//! let document = svg.to_svg_string();
//! # Ok::<(), tetrascape::TetraError>(())
//! ```

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod plane;
pub mod pulse;
pub mod radiation;
pub mod scene;
pub mod surface;
pub mod svg;
pub mod tetra;

pub use color::{BackgroundGradient, ColorPair, Rgb, Shading, split_rgb, tetra_color};
pub use config::SceneConfig;
pub use error::{Result, TetraError};
pub use geometry::{Tile, Viewport};
pub use plane::{TileCell, TilePlane, make_tile_plane, tile_offset};
pub use pulse::{AnimatorStatus, BandState, BandTransform, BandUpdate, PulseAnimator, PulsePhase, PulseTiming};
pub use radiation::{ArcSegment, Band, RadiationField, SerlioRing};
pub use scene::{PlacedTetra, Scene, apply_updates};
pub use surface::{Fill, GradientAxis, GradientId, GradientStop, NodeId, Surface};
pub use svg::SvgSurface;
pub use tetra::{MeshParams, Polygon, TetraMesh, break_line, draw_tetra, point_shift};
