//! Vertical shading and background gradient
//!
//! Tiles fade from a dark, high-contrast shade at the top of the viewport
//! to a light, low-contrast shade at the bottom. Each tile gets two shades
//! straddling the interpolated base color so its faces read as lit and
//! unlit sides.

use std::fmt;

use crate::config::ShadingConfig;
use crate::error::{Result, TetraError};
use crate::geometry::Viewport;

/// 8-bit RGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse a six digit hex color, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Result<Self> {
        split_rgb(hex).map(Self)
    }

    /// Per-channel linear interpolation, rounded to nearest
    pub fn lerp(&self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8;
        Rgb([
            mix(self.0[0], other.0[0]),
            mix(self.0[1], other.0[1]),
            mix(self.0[2], other.0[2]),
        ])
    }
}

/// Zero-padded `#rrggbb`
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

/// Split a six digit hex string into its three channels
///
/// Accepts an optional leading `#`. Anything other than exactly six hex
/// digits is rejected.
pub fn split_rgb(hex: &str) -> Result<[u8; 3]> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(TetraError::InvalidColor(hex.to_string()));
    }

    let mut channels = [0u8; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
            .map_err(|_| TetraError::InvalidColor(hex.to_string()))?;
    }
    Ok(channels)
}

/// Two shades used for one tetra's faces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPair {
    /// Darker shade (ground and left face)
    pub color_a: Rgb,
    /// Lighter shade (right face)
    pub color_b: Rgb,
}

/// Parsed shading ramp
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shading {
    pub dark: Rgb,
    pub light: Rgb,
    pub contrast_top: f64,
    pub contrast_bottom: f64,
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            dark: Rgb::new(0x44, 0x44, 0x44),
            light: Rgb::new(0xCC, 0xCC, 0xCC),
            contrast_top: 0.1,
            contrast_bottom: 0.03,
        }
    }
}

impl Shading {
    pub fn from_config(config: &ShadingConfig) -> Result<Self> {
        Ok(Self {
            dark: Rgb::from_hex(&config.dark)?,
            light: Rgb::from_hex(&config.light)?,
            contrast_top: config.contrast_top,
            contrast_bottom: config.contrast_bottom,
        })
    }

    /// Shade pair for a tile whose center sits at `y`
    ///
    /// `t` runs from 0 at the viewport's top edge to 1 at its bottom and is
    /// not clamped, so tiles in the margin extrapolate the ramp. Channels
    /// are truncated toward zero and clamped to `[0, 255]` independently.
    pub fn tetra_color(&self, y: f64, viewport: &Viewport) -> ColorPair {
        let t = (y - viewport.y) / viewport.height;
        let contrast = self.contrast_top + t * (self.contrast_bottom - self.contrast_top);
        let spread = 255.0 * contrast / 2.0;

        let mut color_a = [0u8; 3];
        let mut color_b = [0u8; 3];
        for i in 0..3 {
            let start = self.dark.0[i] as f64;
            let end = self.light.0[i] as f64;
            let base = (start + t * (end - start)).trunc();
            color_a[i] = clamp_channel((base - spread).trunc());
            color_b[i] = clamp_channel((base + spread).trunc());
        }

        ColorPair {
            color_a: Rgb(color_a),
            color_b: Rgb(color_b),
        }
    }

    /// Top-to-bottom background gradient for the viewport
    pub fn background(&self, viewport: &Viewport) -> BackgroundGradient {
        BackgroundGradient {
            top: self.tetra_color(viewport.top(), viewport).color_a,
            bottom: self.tetra_color(viewport.bottom(), viewport).color_a,
        }
    }
}

/// Shade pair using the default ramp
pub fn tetra_color(y: f64, viewport: &Viewport) -> ColorPair {
    Shading::default().tetra_color(y, viewport)
}

fn clamp_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Vertical two-stop gradient painted behind the tiles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackgroundGradient {
    pub top: Rgb,
    pub bottom: Rgb,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::centered(800.0, 600.0).unwrap()
    }

    #[test]
    fn test_split_rgb() {
        assert_eq!(split_rgb("000000").unwrap(), [0, 0, 0]);
        assert_eq!(split_rgb("FFFFFF").unwrap(), [255, 255, 255]);
        assert_eq!(split_rgb("#2d2fb5").unwrap(), [0x2d, 0x2f, 0xb5]);
    }

    #[test]
    fn test_split_rgb_rejects_malformed() {
        for bad in ["", "fff", "#12345", "1234567", "GG0000", "#-12345"] {
            assert!(
                matches!(split_rgb(bad), Err(TetraError::InvalidColor(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_hex_is_zero_padded() {
        assert_eq!(Rgb::new(5, 0, 255).to_string(), "#0500ff");
        assert_eq!(Rgb::from_hex("#0a0b0c").unwrap().to_string(), "#0a0b0c");
    }

    #[test]
    fn test_top_edge_color() {
        let vp = viewport();
        let pair = tetra_color(vp.y, &vp);

        // base 0x44 = 68, spread 12.75
        assert_eq!(pair.color_a, Rgb::new(55, 55, 55));
        assert_eq!(pair.color_b, Rgb::new(80, 80, 80));
    }

    #[test]
    fn test_bottom_edge_color() {
        let vp = viewport();
        let pair = tetra_color(vp.bottom(), &vp);

        // base 0xCC = 204, spread 3.825
        assert_eq!(pair.color_a, Rgb::new(200, 200, 200));
        assert_eq!(pair.color_b, Rgb::new(207, 207, 207));
    }

    #[test]
    fn test_monotonic_down_the_viewport() {
        let vp = viewport();

        // color_a only ever gains; color_b may dip by one unit where the
        // shrinking contrast crosses an integer before the base steps up
        let mut prev = tetra_color(vp.top(), &vp);
        for step in 1..=600 {
            let pair = tetra_color(vp.top() + step as f64, &vp);
            for i in 0..3 {
                assert!(pair.color_a.0[i] >= prev.color_a.0[i]);
                assert!(pair.color_b.0[i] + 1 >= prev.color_b.0[i]);
                assert!(pair.color_a.0[i] <= pair.color_b.0[i]);
            }
            prev = pair;
        }

        let mut prev = tetra_color(vp.top(), &vp);
        for step in 1..=24 {
            let pair = tetra_color(vp.top() + step as f64 * 25.0, &vp);
            assert!(pair.color_b.0[0] > prev.color_b.0[0]);
            prev = pair;
        }
    }

    #[test]
    fn test_clamps_outside_viewport() {
        let vp = viewport();
        let shading = Shading {
            dark: Rgb::new(0, 0, 0),
            light: Rgb::new(255, 255, 255),
            contrast_top: 0.5,
            contrast_bottom: 0.5,
        };

        let above = shading.tetra_color(vp.top() - 600.0, &vp);
        assert_eq!(above.color_a, Rgb::new(0, 0, 0));

        let below = shading.tetra_color(vp.bottom() + 600.0, &vp);
        assert_eq!(below.color_b, Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_background_uses_edge_shades() {
        let vp = viewport();
        let bg = Shading::default().background(&vp);
        assert_eq!(bg.top, tetra_color(vp.top(), &vp).color_a);
        assert_eq!(bg.bottom, tetra_color(vp.bottom(), &vp).color_a);
    }

    #[test]
    fn test_lerp_endpoints() {
        let from = Rgb::from_hex("2d2fb5").unwrap();
        let to = Rgb::from_hex("6ba2ea").unwrap();
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
    }
}
