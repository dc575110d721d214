//! Scene assembly
//!
//! Builds the whole picture on a [`Surface`] in one pass: view box,
//! gradient background, one tetra group per tile, then the radiation rings
//! tucked inside their epicenter tiles. The returned [`Scene`] keeps the
//! static geometry for inspection and owns the pulse animator that keeps
//! the rings moving.

use std::time::Duration;

use rand::Rng;
use tracing::{debug, info};

use crate::color::{Rgb, Shading};
use crate::config::SceneConfig;
use crate::error::{Result, TetraError};
use crate::geometry::{Tile, Viewport};
use crate::plane::{TilePlane, make_tile_plane};
use crate::pulse::{AnimatorStatus, BandUpdate, PulseAnimator, PulseTiming};
use crate::radiation::{Band, RadiationField, SerlioRing, band_class, choose_epicenter, choose_scale};
use crate::surface::{Fill, GradientAxis, GradientStop, NodeId, Surface};
use crate::tetra::{MeshParams, TetraMesh, draw_tetra};

/// A tetra and the group node it was drawn into
#[derive(Clone, Debug)]
pub struct PlacedTetra {
    pub mesh: TetraMesh,
    pub node: NodeId,
}

/// Landscape plus animated radiation overlay
#[derive(Debug)]
pub struct Scene {
    viewport: Viewport,
    tile: Tile,
    plane: TilePlane,
    background: NodeId,
    /// Indexed like `plane.tiles`
    tetras: Vec<PlacedTetra>,
    fields: Vec<RadiationField>,
    animator: PulseAnimator,
}

impl Scene {
    /// Build the scene for a `width` x `height` viewport
    ///
    /// All randomness (mesh jitter, epicenters, field scales) is drawn from
    /// `rng`; the same seed and config reproduce the same picture.
    pub fn build<S, R>(
        config: &SceneConfig,
        width: f64,
        height: f64,
        surface: &mut S,
        rng: &mut R,
    ) -> Result<Self>
    where
        S: Surface + ?Sized,
        R: Rng + ?Sized,
    {
        config.validate()?;
        let viewport = Viewport::centered(width, height)?;
        let tile = Tile::from_width(config.tile.size)?;
        let shading = Shading::from_config(&config.shading)?;
        let rest_color = Rgb::from_hex(&config.radiation.color)?;
        let pulse_color = Rgb::from_hex(&config.radiation.pulse_color)?;

        surface.set_view_box(&viewport);

        let gradient = shading.background(&viewport);
        let gradient = surface.linear_gradient(
            GradientAxis::VERTICAL,
            &[
                GradientStop {
                    offset: 0.0,
                    color: gradient.top,
                },
                GradientStop {
                    offset: 1.0,
                    color: gradient.bottom,
                },
            ],
        );
        let background = surface.draw_rect(
            viewport.x,
            viewport.y,
            viewport.width,
            viewport.height,
            Fill::Gradient(gradient),
        );

        let plane = make_tile_plane(&tile, &viewport)?;
        let params = MeshParams::from(&config.mesh);
        let tetras = draw_tetras(&plane, &tile, &viewport, &shading, &params, surface, rng);

        let timing = PulseTiming::from_config(&config.pulse, &tile, rest_color, pulse_color);
        let mut animator = PulseAnimator::new(timing);
        let mut fields = Vec::with_capacity(config.radiation.fields as usize);

        for index in 0..config.radiation.fields {
            let scale = choose_scale(&config.radiation.scale_steps, rng);
            let (tile_index, epicenter) =
                choose_epicenter(&plane, tile.width, config.radiation.shift_epicenter, rng)
                    .ok_or_else(|| TetraError::InvalidConfig("tile plane is empty".to_string()))?;
            debug!(
                field = index,
                tile = tile_index,
                scale,
                "Radiation field epicenter ({:.1}, {:.1})",
                epicenter.x,
                epicenter.y
            );

            let ring = SerlioRing::new(epicenter, tile.width);
            let path = ring.path_data();
            let host = tetras[tile_index].node;

            let bands = (0..config.radiation.bands)
                .map(|band| {
                    let class = band_class(index, band);
                    let node = surface.draw_path(&path, Fill::Solid(rest_color), Some(&class));
                    surface.prepend(host, node);
                    Band { index: band, node, class }
                })
                .collect();

            let field = RadiationField {
                index,
                tile_index,
                epicenter,
                ring,
                scale,
                bands,
            };
            animator.add_field(&field);
            fields.push(field);
        }

        apply_updates(surface, &animator.snapshot());

        info!(
            tiles = plane.len(),
            fields = fields.len(),
            bands = animator.channels().len(),
            "Scene built for {}x{} viewport",
            width,
            height
        );

        Ok(Self {
            viewport,
            tile,
            plane,
            background,
            tetras,
            fields,
            animator,
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tile(&self) -> &Tile {
        &self.tile
    }

    pub fn plane(&self) -> &TilePlane {
        &self.plane
    }

    pub fn background(&self) -> NodeId {
        self.background
    }

    pub fn tetras(&self) -> &[PlacedTetra] {
        &self.tetras
    }

    pub fn fields(&self) -> &[RadiationField] {
        &self.fields
    }

    pub fn animator(&self) -> &PulseAnimator {
        &self.animator
    }

    /// Advance the pulse animation and repaint changed bands
    ///
    /// Returns the number of bands repainted.
    pub fn tick<S: Surface + ?Sized>(&mut self, dt: Duration, surface: &mut S) -> usize {
        let updates = self.animator.tick(dt);
        apply_updates(surface, &updates);
        updates.len()
    }

    pub fn pause(&mut self) {
        self.animator.pause();
    }

    pub fn resume(&mut self) {
        self.animator.resume();
    }

    pub fn status(&self) -> AnimatorStatus {
        self.animator.status()
    }

    /// Halt all bands at their reset appearance
    pub fn stop<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let updates = self.animator.stop();
        apply_updates(surface, &updates);
    }

    /// Restart the pulse from the initial staggered state
    pub fn restart<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        let updates = self.animator.restart();
        apply_updates(surface, &updates);
    }
}

/// Draw one tetra group per tile, last tile first
///
/// Later rows sit lower on screen and must be covered by the rows above
/// them, so painting runs back to front.
fn draw_tetras<S, R>(
    plane: &TilePlane,
    tile: &Tile,
    viewport: &Viewport,
    shading: &Shading,
    params: &MeshParams,
    surface: &mut S,
    rng: &mut R,
) -> Vec<PlacedTetra>
where
    S: Surface + ?Sized,
    R: Rng + ?Sized,
{
    let mut placed: Vec<PlacedTetra> = plane
        .tiles
        .iter()
        .rev()
        .map(|cell| {
            let colors = shading.tetra_color(cell.offset.y, viewport);
            let mesh = draw_tetra(tile, cell.offset, colors, viewport, params, rng);
            let children: Vec<NodeId> = mesh
                .paint_order()
                .iter()
                .map(|poly| surface.draw_polygon(&poly.points, Fill::Solid(poly.fill)))
                .collect();
            let node = surface.group(&children);
            PlacedTetra { mesh, node }
        })
        .collect();
    placed.reverse();
    placed
}

/// Push band states to the surface
pub fn apply_updates<S: Surface + ?Sized>(surface: &mut S, updates: &[BandUpdate]) {
    for update in updates {
        surface.set_transform(update.node, update.state.transform.to_affine());
        surface.set_style(update.node, update.state.opacity, update.state.fill);
    }
}
