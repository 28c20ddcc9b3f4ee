//! Tool configuration.
//!
//! Settings are layered: stock defaults, then an optional TOML file passed
//! with `--config`, then command-line flags. The file is sparse; only the keys
//! it sets override the defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [effects]
//! colour = true       # Desaturate, flatten contrast, tint blue
//! corners = true      # Randomly rounded corners
//! edges = true        # Two-pixel soft edge
//! offset = true       # Random position jitter inside the case
//! rotation = true     # Random rotation of up to half a degree
//! reflection = true   # Diagonal light glare
//! force = false       # Process images that already look framed
//!
//! [processing]
//! max_processes = 4   # Max parallel workers for --recursive (omit for auto = CPU cores)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::process::Options;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JewelcaseConfig {
    /// Which effects to apply.
    pub effects: EffectsConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl JewelcaseConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Effect toggles. Mirrors [`Options`] with the short names used on the
/// command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    pub colour: bool,
    pub corners: bool,
    pub edges: bool,
    pub offset: bool,
    pub rotation: bool,
    pub reflection: bool,
    pub force: bool,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self::from(Options::default())
    }
}

impl From<Options> for EffectsConfig {
    fn from(opts: Options) -> Self {
        Self {
            colour: opts.colour_correction,
            corners: opts.rounded_corners,
            edges: opts.edge_softening,
            offset: opts.random_offset,
            rotation: opts.random_rotation,
            reflection: opts.reflection,
            force: opts.force,
        }
    }
}

impl From<&EffectsConfig> for Options {
    fn from(effects: &EffectsConfig) -> Self {
        Self {
            colour_correction: effects.colour,
            rounded_corners: effects.corners,
            edge_softening: effects.edges,
            random_offset: effects.offset,
            random_rotation: effects.rotation,
            reflection: effects.reflection,
            force: effects.force,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel image processing workers.
    /// When absent or null, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Load and validate a config file.
pub fn load_config(path: &Path) -> Result<JewelcaseConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: JewelcaseConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Load a config file if one was given, otherwise return the stock defaults.
pub fn resolve_config(path: Option<&Path>) -> Result<JewelcaseConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => Ok(JewelcaseConfig::default()),
    }
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `--print-config` flag.
pub fn stock_config_toml() -> &'static str {
    r##"# Jewelcase Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags such as
# --no-rotation or --force override whatever is set here.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Effects
# ---------------------------------------------------------------------------
[effects]
# Slightly desaturate, reduce contrast and add a faint blue tint.
colour = true

# Round each corner with a random radius between 6 and 12 pixels.
corners = true

# Fade the outermost two pixels of the art to transparent.
edges = true

# Nudge the art up to 8px sideways and 5px vertically inside the case.
offset = true

# Rotate the art by a random angle of up to half a degree.
rotation = true

# Add a soft diagonal glare, brightest at the top-left.
reflection = true

# Process images even if they are already the size of the case
# (which usually means they have been framed before).
force = false

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers when processing a directory with --recursive.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
