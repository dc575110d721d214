//! Retained SVG surface
//!
//! Records draw calls into a node arena and serializes the result as a
//! standalone SVG document. Nodes live in one flat `Vec`; grouping moves
//! node ids between child lists, so a `NodeId` stays valid for the life of
//! the surface.

use std::fmt::Write;

use glam::{DAffine2, DVec2};

use crate::color::Rgb;
use crate::geometry::Viewport;
use crate::surface::{Fill, GradientAxis, GradientId, GradientStop, NodeId, Surface};

/// Kind of recorded node
#[derive(Clone, Debug, PartialEq)]
pub enum SvgShape {
    Polygon(Vec<DVec2>),
    Path(String),
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Group(Vec<NodeId>),
}

/// One recorded node with its paint state
#[derive(Clone, Debug, PartialEq)]
pub struct SvgNode {
    pub shape: SvgShape,
    pub fill: Option<Fill>,
    pub class: Option<String>,
    pub opacity: Option<f64>,
    pub transform: Option<DAffine2>,
    parent: Option<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
struct SvgGradient {
    axis: GradientAxis,
    stops: Vec<GradientStop>,
}

/// [`Surface`] that builds an SVG document
#[derive(Clone, Debug, Default)]
pub struct SvgSurface {
    view_box: Option<Viewport>,
    nodes: Vec<SvgNode>,
    gradients: Vec<SvgGradient>,
    /// Top-level nodes in paint order
    roots: Vec<NodeId>,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view_box(&self) -> Option<&Viewport> {
        self.view_box.as_ref()
    }

    /// Look up a node
    ///
    /// # Panics
    /// If `id` was not issued by this surface.
    pub fn node(&self, id: NodeId) -> &SvgNode {
        &self.nodes[id.0 as usize]
    }

    /// Number of recorded nodes, grouped or not
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Top-level nodes in paint order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of a group, empty for leaf nodes
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).shape {
            SvgShape::Group(children) => children,
            _ => &[],
        }
    }

    pub fn gradient_count(&self) -> usize {
        self.gradients.len()
    }

    fn push(&mut self, shape: SvgShape, fill: Option<Fill>, class: Option<&str>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SvgNode {
            shape,
            fill,
            class: class.map(str::to_string),
            opacity: None,
            transform: None,
            parent: None,
        });
        self.roots.push(id);
        id
    }

    fn node_mut(&mut self, id: NodeId) -> &mut SvgNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Unlink a node from wherever it currently sits
    fn detach(&mut self, id: NodeId) {
        let parent = self.node(id).parent;
        match parent {
            Some(parent) => {
                if let SvgShape::Group(children) = &mut self.node_mut(parent).shape {
                    children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&c| c != id),
        }
        self.node_mut(id).parent = None;
    }

    /// Serialize the document
    pub fn to_svg_string(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail
        let _ = self.write_document(&mut out);
        out
    }

    fn write_document(&self, out: &mut String) -> std::fmt::Result {
        match &self.view_box {
            Some(vb) => writeln!(
                out,
                r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}">"#,
                vb.x, vb.y, vb.width, vb.height, vb.width, vb.height
            )?,
            None => writeln!(out, r#"<svg xmlns="http://www.w3.org/2000/svg">"#)?,
        }

        if !self.gradients.is_empty() {
            writeln!(out, "<defs>")?;
            for (i, gradient) in self.gradients.iter().enumerate() {
                writeln!(
                    out,
                    r#"<linearGradient id="{}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
                    gradient_ref(GradientId(i as u32)),
                    gradient.axis.from.x,
                    gradient.axis.from.y,
                    gradient.axis.to.x,
                    gradient.axis.to.y
                )?;
                for stop in &gradient.stops {
                    writeln!(
                        out,
                        r#"<stop offset="{}" stop-color="{}"/>"#,
                        stop.offset, stop.color
                    )?;
                }
                writeln!(out, "</linearGradient>")?;
            }
            writeln!(out, "</defs>")?;
        }

        for &root in &self.roots {
            self.write_node(out, root, 1)?;
        }
        writeln!(out, "</svg>")
    }

    fn write_node(&self, out: &mut String, id: NodeId, depth: usize) -> std::fmt::Result {
        let node = self.node(id);
        let indent = "  ".repeat(depth);
        let attrs = self.attributes(node);

        match &node.shape {
            SvgShape::Polygon(points) => {
                let mut list = String::new();
                for (i, p) in points.iter().enumerate() {
                    if i > 0 {
                        list.push(' ');
                    }
                    write!(list, "{},{}", p.x, p.y)?;
                }
                writeln!(out, r#"{}<polygon points="{}"{}/>"#, indent, list, attrs)
            }
            SvgShape::Path(data) => writeln!(out, r#"{}<path d="{}"{}/>"#, indent, data, attrs),
            SvgShape::Rect {
                x,
                y,
                width,
                height,
            } => writeln!(
                out,
                r#"{}<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
                indent, x, y, width, height, attrs
            ),
            SvgShape::Group(children) => {
                writeln!(out, "{}<g{}>", indent, attrs)?;
                for &child in children {
                    self.write_node(out, child, depth + 1)?;
                }
                writeln!(out, "{}</g>", indent)
            }
        }
    }

    fn attributes(&self, node: &SvgNode) -> String {
        let mut attrs = String::new();
        // Writing to a String cannot fail
        if let Some(class) = &node.class {
            let _ = write!(attrs, r#" class="{}""#, class);
        }
        match node.fill {
            Some(Fill::Solid(color)) => {
                let _ = write!(attrs, r#" fill="{}""#, color);
            }
            Some(Fill::Gradient(id)) => {
                let _ = write!(attrs, r#" fill="url(#{})""#, gradient_ref(id));
            }
            None => {}
        }
        if let Some(opacity) = node.opacity {
            let _ = write!(attrs, r#" opacity="{}""#, opacity);
        }
        if let Some(m) = node.transform {
            let _ = write!(
                attrs,
                r#" transform="matrix({} {} {} {} {} {})""#,
                m.matrix2.x_axis.x,
                m.matrix2.x_axis.y,
                m.matrix2.y_axis.x,
                m.matrix2.y_axis.y,
                m.translation.x,
                m.translation.y
            );
        }
        attrs
    }
}

fn gradient_ref(id: GradientId) -> String {
    format!("gradient-{}", id.0)
}

impl Surface for SvgSurface {
    fn set_view_box(&mut self, viewport: &Viewport) {
        self.view_box = Some(*viewport);
    }

    fn draw_polygon(&mut self, points: &[DVec2], fill: Fill) -> NodeId {
        self.push(SvgShape::Polygon(points.to_vec()), Some(fill), None)
    }

    fn draw_path(&mut self, data: &str, fill: Fill, class: Option<&str>) -> NodeId {
        self.push(SvgShape::Path(data.to_string()), Some(fill), class)
    }

    fn draw_rect(&mut self, x: f64, y: f64, width: f64, height: f64, fill: Fill) -> NodeId {
        self.push(
            SvgShape::Rect {
                x,
                y,
                width,
                height,
            },
            Some(fill),
            None,
        )
    }

    fn linear_gradient(&mut self, axis: GradientAxis, stops: &[GradientStop]) -> GradientId {
        let id = GradientId(self.gradients.len() as u32);
        self.gradients.push(SvgGradient {
            axis,
            stops: stops.to_vec(),
        });
        id
    }

    fn group(&mut self, children: &[NodeId]) -> NodeId {
        let group = self.push(SvgShape::Group(Vec::with_capacity(children.len())), None, None);
        for &child in children {
            self.detach(child);
            self.node_mut(child).parent = Some(group);
            if let SvgShape::Group(list) = &mut self.node_mut(group).shape {
                list.push(child);
            }
        }
        group
    }

    fn prepend(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.node_mut(child).parent = Some(parent);
        match &mut self.node_mut(parent).shape {
            SvgShape::Group(list) => list.insert(0, child),
            other => panic!("prepend target {:?} is not a group: {:?}", parent, other),
        }
    }

    fn set_transform(&mut self, node: NodeId, transform: DAffine2) {
        self.node_mut(node).transform = Some(transform);
    }

    fn set_style(&mut self, node: NodeId, opacity: f64, fill: Rgb) {
        let node = self.node_mut(node);
        node.opacity = Some(opacity);
        node.fill = Some(Fill::Solid(fill));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Rgb {
        Rgb::new(255, 0, 0)
    }

    #[test]
    fn test_group_moves_children() {
        let mut svg = SvgSurface::new();
        let a = svg.draw_polygon(&[DVec2::ZERO, DVec2::X, DVec2::Y], red().into());
        let b = svg.draw_rect(0.0, 0.0, 1.0, 1.0, red().into());
        assert_eq!(svg.roots(), &[a, b]);

        let g = svg.group(&[b, a]);
        assert_eq!(svg.roots(), &[g]);
        assert_eq!(svg.children(g), &[b, a]);
    }

    #[test]
    fn test_prepend_paints_first() {
        let mut svg = SvgSurface::new();
        let a = svg.draw_polygon(&[DVec2::ZERO, DVec2::X, DVec2::Y], red().into());
        let g = svg.group(&[a]);
        let ring = svg.draw_path("M0,0 z", red().into(), Some("serlio"));

        svg.prepend(g, ring);
        assert_eq!(svg.children(g), &[ring, a]);
        assert_eq!(svg.roots(), &[g]);
    }

    #[test]
    #[should_panic]
    fn test_prepend_into_leaf_panics() {
        let mut svg = SvgSurface::new();
        let a = svg.draw_rect(0.0, 0.0, 1.0, 1.0, red().into());
        let b = svg.draw_rect(0.0, 0.0, 1.0, 1.0, red().into());
        svg.prepend(a, b);
    }

    #[test]
    fn test_document_output() {
        let mut svg = SvgSurface::new();
        svg.set_view_box(&Viewport::centered(800.0, 600.0).unwrap());
        let gradient = svg.linear_gradient(
            GradientAxis::VERTICAL,
            &[
                GradientStop {
                    offset: 0.0,
                    color: Rgb::new(0x37, 0x37, 0x37),
                },
                GradientStop {
                    offset: 1.0,
                    color: Rgb::new(0xc8, 0xc8, 0xc8),
                },
            ],
        );
        svg.draw_rect(-400.0, -300.0, 800.0, 600.0, Fill::Gradient(gradient));
        let ring = svg.draw_path("M0,0 z", red().into(), Some("serlio delay-0"));
        svg.set_transform(ring, DAffine2::from_scale(DVec2::splat(2.0)));
        svg.set_style(ring, 0.4, Rgb::new(0x2d, 0x2f, 0xb5));

        let doc = svg.to_svg_string();
        assert!(doc.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-400 -300 800 600" width="800" height="600">"#));
        assert!(doc.contains(r##"<stop offset="0" stop-color="#373737"/>"##));
        assert!(doc.contains(r##"fill="url(#gradient-0)""##));
        assert!(doc.contains(r##"<path d="M0,0 z" class="serlio delay-0" fill="#2d2fb5" opacity="0.4" transform="matrix(2 0 0 2 0 0)"/>"##));
        assert!(doc.trim_end().ends_with("</svg>"));
    }
}
