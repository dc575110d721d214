//! Drawing surface abstraction
//!
//! The scene never touches a concrete renderer. It draws through this
//! trait, which maps one-to-one onto a retained vector scene graph (SVG,
//! a canvas scene, a GPU path renderer). Nodes are addressed by opaque
//! handles handed out by the surface.

use glam::{DAffine2, DVec2};

use crate::color::Rgb;
use crate::geometry::Viewport;

/// Handle to a drawn node
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// Handle to a gradient definition
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GradientId(pub u32);

/// Fill paint
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fill {
    Solid(Rgb),
    Gradient(GradientId),
}

impl From<Rgb> for Fill {
    fn from(color: Rgb) -> Self {
        Fill::Solid(color)
    }
}

/// One stop of a linear gradient
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the gradient axis, 0.0 to 1.0
    pub offset: f64,
    pub color: Rgb,
}

/// Gradient axis in bounding-box units
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientAxis {
    pub from: DVec2,
    pub to: DVec2,
}

impl GradientAxis {
    /// Top to bottom
    pub const VERTICAL: Self = Self {
        from: DVec2::new(0.0, 0.0),
        to: DVec2::new(0.0, 1.0),
    };
}

/// Vector drawing capability consumed by the scene
///
/// Handles passed back into a surface must have been issued by that same
/// surface; anything else is a programming error and implementations may
/// panic.
pub trait Surface {
    /// Declare the visible coordinate window and output size
    fn set_view_box(&mut self, viewport: &Viewport);

    /// Draw a closed filled polygon
    fn draw_polygon(&mut self, points: &[DVec2], fill: Fill) -> NodeId;

    /// Draw a path from SVG path data
    fn draw_path(&mut self, data: &str, fill: Fill, class: Option<&str>) -> NodeId;

    /// Draw an axis-aligned rectangle
    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Fill) -> NodeId;

    /// Define a linear gradient
    fn linear_gradient(&mut self, axis: GradientAxis, stops: &[GradientStop]) -> GradientId;

    /// Move nodes into a new group, in order
    fn group(&mut self, children: &[NodeId]) -> NodeId;

    /// Move `child` to the front of `parent`'s children (painted first)
    fn prepend(&mut self, parent: NodeId, child: NodeId);

    /// Replace a node's transform
    fn set_transform(&mut self, node: NodeId, transform: DAffine2);

    /// Replace a node's opacity and solid fill
    fn set_style(&mut self, node: NodeId, opacity: f64, fill: Rgb);
}
