//! Scene config loading

use std::path::Path;

use anyhow::{Context, Result};
use tetrascape::SceneConfig;

/// Load a scene config from a TOML file, or the defaults when `path` is `None`
pub fn load_config(path: Option<&Path>) -> Result<SceneConfig> {
    let Some(path) = path else {
        return Ok(SceneConfig::default());
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config = SceneConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;

    tracing::debug!("Loaded scene config from {}", path.display());
    Ok(config)
}

/// Default config as TOML, suitable as a starting point for edits
pub fn default_config_toml() -> Result<String> {
    Ok(SceneConfig::default().to_toml_string()?)
}
