//! Scene configuration (TOML)
//!
//! Every tunable of the landscape and the radiation overlay lives here.
//! Defaults reproduce the reference look; a TOML file may override any
//! subset of fields.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{Result, TetraError};

/// Complete scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SceneConfig {
    /// Tile footprint
    #[serde(default)]
    pub tile: TileConfig,
    /// Vertical shading ramp
    #[serde(default)]
    pub shading: ShadingConfig,
    /// Tetra perturbation
    #[serde(default)]
    pub mesh: MeshConfig,
    /// Radiation field placement
    #[serde(default)]
    pub radiation: RadiationConfig,
    /// Pulse animation timing
    #[serde(default)]
    pub pulse: PulseConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileConfig {
    /// Tile width (default: 175)
    #[serde(default = "default_tile_size")]
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadingConfig {
    /// Base color at the top edge (default: 444444)
    #[serde(default = "default_dark")]
    pub dark: String,
    /// Base color at the bottom edge (default: CCCCCC)
    #[serde(default = "default_light")]
    pub light: String,
    /// Face contrast at the top edge, fraction of full range (default: 0.10)
    #[serde(default = "default_contrast_top")]
    pub contrast_top: f64,
    /// Face contrast at the bottom edge (default: 0.03)
    #[serde(default = "default_contrast_bottom")]
    pub contrast_bottom: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Maximum vertex displacement, fraction of tile width (default: 0.2)
    #[serde(default = "default_shift_fraction")]
    pub shift_fraction: f64,
    /// Lower bound of the edge break fraction (default: 0.2)
    #[serde(default = "default_break_min")]
    pub break_min: f64,
    /// Upper bound of the edge break fraction (default: 0.8)
    #[serde(default = "default_break_max")]
    pub break_max: f64,
    /// Apex elevation at full depth, in tile heights (default: 2)
    #[serde(default = "default_elevation_tiles")]
    pub elevation_tiles: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadiationConfig {
    /// Number of fields (default: 3)
    #[serde(default = "default_fields")]
    pub fields: u32,
    /// Bands per field (default: 5)
    #[serde(default = "default_bands")]
    pub bands: u32,
    /// Band color at rest (default: #2d2fb5)
    #[serde(default = "default_radiation_color")]
    pub color: String,
    /// Band color at full expansion (default: #6ba2ea)
    #[serde(default = "default_pulse_color")]
    pub pulse_color: String,
    /// Shift each epicenter left by half a tile (default: false)
    #[serde(default)]
    pub shift_epicenter: bool,
    /// Candidate expansion scales, one picked per field (default: 6, 8, 10)
    #[serde(default = "default_scale_steps")]
    pub scale_steps: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PulseConfig {
    /// Expansion duration in milliseconds (default: 10000)
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Startup delay between sibling bands in milliseconds (default: 2000)
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,
    /// Downward drift at full expansion, in tile heights (default: 4.3301)
    #[serde(default = "default_drop_tiles")]
    pub drop_tiles: f64,
    /// Opacity before the first expansion (default: 0.5)
    #[serde(default = "default_initial_opacity")]
    pub initial_opacity: f64,
    /// Opacity after each reset (default: 0.4)
    #[serde(default = "default_reset_opacity")]
    pub reset_opacity: f64,
    /// Ease-out exponent applied to progress (default: 0.48)
    #[serde(default = "default_ease_exponent")]
    pub ease_exponent: f64,
}

fn default_tile_size() -> f64 {
    175.0
}
fn default_dark() -> String {
    "444444".to_string()
}
fn default_light() -> String {
    "CCCCCC".to_string()
}
fn default_contrast_top() -> f64 {
    0.1
}
fn default_contrast_bottom() -> f64 {
    0.03
}
fn default_shift_fraction() -> f64 {
    0.2
}
fn default_break_min() -> f64 {
    0.2
}
fn default_break_max() -> f64 {
    0.8
}
fn default_elevation_tiles() -> f64 {
    2.0
}
fn default_fields() -> u32 {
    3
}
fn default_bands() -> u32 {
    5
}
fn default_radiation_color() -> String {
    "#2d2fb5".to_string()
}
fn default_pulse_color() -> String {
    "#6ba2ea".to_string()
}
fn default_scale_steps() -> Vec<f64> {
    vec![6.0, 8.0, 10.0]
}
fn default_duration_ms() -> u64 {
    10_000
}
fn default_stagger_ms() -> u64 {
    2_000
}
fn default_drop_tiles() -> f64 {
    4.3301
}
fn default_initial_opacity() -> f64 {
    0.5
}
fn default_reset_opacity() -> f64 {
    0.4
}
fn default_ease_exponent() -> f64 {
    0.48
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            size: default_tile_size(),
        }
    }
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            dark: default_dark(),
            light: default_light(),
            contrast_top: default_contrast_top(),
            contrast_bottom: default_contrast_bottom(),
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            shift_fraction: default_shift_fraction(),
            break_min: default_break_min(),
            break_max: default_break_max(),
            elevation_tiles: default_elevation_tiles(),
        }
    }
}

impl Default for RadiationConfig {
    fn default() -> Self {
        Self {
            fields: default_fields(),
            bands: default_bands(),
            color: default_radiation_color(),
            pulse_color: default_pulse_color(),
            shift_epicenter: false,
            scale_steps: default_scale_steps(),
        }
    }
}

impl Default for PulseConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            stagger_ms: default_stagger_ms(),
            drop_tiles: default_drop_tiles(),
            initial_opacity: default_initial_opacity(),
            reset_opacity: default_reset_opacity(),
            ease_exponent: default_ease_exponent(),
        }
    }
}

impl SceneConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values no scene can be built from
    pub fn validate(&self) -> Result<()> {
        if !(self.tile.size.is_finite() && self.tile.size > 0.0) {
            return Err(TetraError::DegenerateTile {
                width: self.tile.size,
                height: self.tile.size / 3f64.sqrt(),
            });
        }

        Rgb::from_hex(&self.shading.dark)?;
        Rgb::from_hex(&self.shading.light)?;
        Rgb::from_hex(&self.radiation.color)?;
        Rgb::from_hex(&self.radiation.pulse_color)?;

        let mesh = &self.mesh;
        if !(mesh.shift_fraction >= 0.0 && mesh.shift_fraction.is_finite()) {
            return Err(invalid("mesh.shift_fraction must be a non-negative number"));
        }
        if !(0.0..=1.0).contains(&mesh.break_min)
            || !(0.0..=1.0).contains(&mesh.break_max)
            || mesh.break_min > mesh.break_max
        {
            return Err(invalid("mesh.break_min..break_max must be an ordered range within [0, 1]"));
        }
        if !mesh.elevation_tiles.is_finite() {
            return Err(invalid("mesh.elevation_tiles must be finite"));
        }

        let radiation = &self.radiation;
        if radiation.fields > 0 && radiation.bands == 0 {
            return Err(invalid("radiation.bands must be at least 1"));
        }
        if radiation.fields > 0 && radiation.scale_steps.is_empty() {
            return Err(invalid("radiation.scale_steps must not be empty"));
        }
        if radiation.scale_steps.iter().any(|s| !(s.is_finite() && *s >= 0.0)) {
            return Err(invalid("radiation.scale_steps must be non-negative numbers"));
        }

        let pulse = &self.pulse;
        if pulse.duration_ms == 0 {
            return Err(invalid("pulse.duration_ms must be at least 1"));
        }
        for (name, opacity) in [
            ("pulse.initial_opacity", pulse.initial_opacity),
            ("pulse.reset_opacity", pulse.reset_opacity),
        ] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(invalid(&format!("{} must be within [0, 1]", name)));
            }
        }
        if !(pulse.ease_exponent.is_finite() && pulse.ease_exponent > 0.0) {
            return Err(invalid("pulse.ease_exponent must be positive"));
        }
        if !pulse.drop_tiles.is_finite() {
            return Err(invalid("pulse.drop_tiles must be finite"));
        }

        Ok(())
    }
}

fn invalid(message: &str) -> TetraError {
    TetraError::InvalidConfig(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SceneConfig::default();
        config.validate().unwrap();
        assert_eq!(config.tile.size, 175.0);
        assert_eq!(config.radiation.fields, 3);
        assert_eq!(config.radiation.bands, 5);
        assert_eq!(config.pulse.duration_ms, 10_000);
        assert_eq!(config.pulse.stagger_ms, 2_000);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SceneConfig::from_toml_str(
            r#"
            [tile]
            size = 120.0

            [radiation]
            bands = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.tile.size, 120.0);
        assert_eq!(config.radiation.bands, 2);
        assert_eq!(config.radiation.fields, 3);
        assert_eq!(config.shading, ShadingConfig::default());
        assert_eq!(config.pulse, PulseConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SceneConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases = [
            "[tile]\nsize = 0.0",
            "[shading]\ndark = \"not-a-color\"",
            "[mesh]\nbreak_min = 0.9\nbreak_max = 0.1",
            "[radiation]\nbands = 0",
            "[radiation]\nscale_steps = []",
            "[pulse]\nduration_ms = 0",
            "[pulse]\nreset_opacity = 1.5",
        ];
        for case in cases {
            assert!(SceneConfig::from_toml_str(case).is_err(), "{}", case);
        }
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(
            SceneConfig::from_toml_str("[tile\nsize = 1"),
            Err(TetraError::ConfigParse(_))
        ));
    }
}
