//! tetra-export library
//!
//! Scene loading and SVG rendering used by the `tetra-export` binary.

pub mod config;
pub mod render;

pub use config::{default_config_toml, load_config};
pub use render::{FrameSequence, RenderSettings, render_snapshot, scene_rng, write_frames};
