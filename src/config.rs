//! Application configuration.
//!
//! The configuration is loaded from a JSON file, by default
//! `$XDG_CONFIG_HOME/xwinctl/config.json`, or from the path passed with
//! `--config <path>`.
//!
//! # Example
//!
//! ```json
//! {
//!   "presets": {
//!     "left-half":  { "x": "0", "y": "0", "w": "(/ sw 2)", "h": "sh" },
//!     "right-half": { "x": "(/ sw 2)", "y": "0", "w": "(/ sw 2)", "h": "sh" },
//!     "centered":   { "x": "(/ (- sw w) 2)", "y": "(/ (- sh h) 2)" }
//!   },
//!   "placement": { "honor_struts": true }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Top-level configuration.
///
/// Every field is optional; a minimal `{}` file is valid and all sections
/// fall back to their compiled-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Named placements usable as `moveresize preset=<name>`.
    #[serde(default)]
    pub presets: HashMap<String, Preset>,

    /// How the usable area of a head is computed.
    #[serde(default)]
    pub placement: PlacementConfig,
}

/// A named set of placement expressions.
///
/// Dimensions left out keep their current value unless given on the command
/// line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub x: Option<String>,
    pub y: Option<String>,
    pub w: Option<String>,
    pub h: Option<String>,
}

/// Usable-area settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Subtract space reserved by docks and panels from each head.
    /// Default: `true`.
    pub honor_struts: bool,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self { honor_struts: true }
    }
}

impl Config {
    /// Load configuration from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| ConfigError(format!("failed to parse {}: {}", path.display(), e)))?;
        Ok(config)
    }
}

/// Error from loading or parsing a configuration file.
#[derive(Debug, thiserror::Error)]
#[error("config error: {0}")]
pub struct ConfigError(String);
