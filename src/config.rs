//! Optional JSON configuration file.
//!
//! All fields default, so a config file only needs to name the values it
//! overrides. CLI flags take precedence over the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlotCamResult;
use crate::gcode::GcodeParameters;
use crate::toolpath::ToolpathParameters;

fn default_threshold() -> u8 {
    128
}

/// Full plotter configuration: binarization, toolpath and G-code parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotterConfig {
    /// Luma threshold for binarizing the image (0-255).
    #[serde(default = "default_threshold")]
    pub threshold: u8,
    /// Draw light pixels instead of dark ones.
    #[serde(default)]
    pub invert: bool,
    #[serde(default)]
    pub toolpath: ToolpathParameters,
    #[serde(default)]
    pub gcode: GcodeParameters,
}

impl Default for PlotterConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            invert: false,
            toolpath: ToolpathParameters::default(),
            gcode: GcodeParameters::default(),
        }
    }
}

impl PlotterConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> PlotCamResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}
