//! tetra-export - Tetrascape export tool
//!
//! Renders tetra landscapes with their radiation pulse to SVG, either as a
//! single snapshot or as a numbered frame sequence.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use tetra_export::{FrameSequence, RenderSettings, config, render};

#[derive(Parser)]
#[command(name = "tetra-export")]
#[command(about = "Tetrascape export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one SVG snapshot
    Render {
        /// Viewport width
        #[arg(long, default_value_t = 800.0)]
        width: f64,

        /// Viewport height
        #[arg(long, default_value_t = 600.0)]
        height: f64,

        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Advance the pulse by this many milliseconds before capturing
        #[arg(long, default_value_t = 0)]
        at_ms: u64,

        /// Scene config TOML
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output .svg file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a numbered SVG frame sequence
    Frames {
        /// Viewport width
        #[arg(long, default_value_t = 800.0)]
        width: f64,

        /// Viewport height
        #[arg(long, default_value_t = 600.0)]
        height: f64,

        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Frames per second
        #[arg(long, default_value_t = 30)]
        fps: u32,

        /// Length of the sequence
        #[arg(long, default_value_t = 12)]
        seconds: u32,

        /// Scene config TOML
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the default scene config
    Config,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            width,
            height,
            seed,
            at_ms,
            config: config_path,
            output,
        } => {
            let scene_config = config::load_config(config_path.as_deref())?;
            let settings = RenderSettings { width, height, seed };
            let document =
                render::render_snapshot(&scene_config, &settings, Duration::from_millis(at_ms))?;

            match output {
                Some(path) => {
                    std::fs::write(&path, document)
                        .with_context(|| format!("Failed to write SVG: {}", path.display()))?;
                    tracing::info!("Wrote {}", path.display());
                }
                None => print!("{}", document),
            }
        }

        Commands::Frames {
            width,
            height,
            seed,
            fps,
            seconds,
            config: config_path,
            output,
        } => {
            let scene_config = config::load_config(config_path.as_deref())?;
            let settings = RenderSettings { width, height, seed };
            render::write_frames(
                &scene_config,
                &settings,
                FrameSequence { fps, seconds },
                &output,
            )?;
            tracing::info!("Done!");
        }

        Commands::Config => {
            print!("{}", config::default_config_toml()?);
        }
    }

    Ok(())
}
