//! Picker configuration.
//!
//! Every field has a default, so a JSON file only needs the values it changes:
//!
//! ```no_run
//! use image_color_picker::config::PickerConfig;
//! use std::path::Path;
//!
//! let config = PickerConfig::from_json_file(Path::new("picker.json"))?;
//! # Ok::<(), image_color_picker::PickerError>(())
//! ```
//!
//! ```json
//! { "probe_radius": 4, "pooling": "brightest" }
//! ```

use crate::core_modules::pooling::pooling::PoolingStrategy;
use crate::error::{PickerError, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable behavior of a `ColorPicker`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Half-width of the square sampling window, in pixels. 0 samples one pixel.
    pub probe_radius: i32,
    /// Strategy used to reduce the probe window to one color.
    pub pooling: PoolingStrategy,
    /// Horizontal distance between the view origin and the image's left edge.
    pub padding_left: i32,
    /// Vertical distance between the view origin and the image's top edge.
    pub padding_top: i32,
    /// When false, touches are ignored entirely.
    pub enabled: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            probe_radius: 0,
            pooling: PoolingStrategy::Average,
            padding_left: 0,
            padding_top: 0,
            enabled: true,
        }
    }
}

impl PickerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: PickerConfig = serde_json::from_str(json)
            .map_err(|e| PickerError::config("invalid picker configuration", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| PickerError::config(format!("cannot read {}", path.display()), e))?;
        let config = Self::from_json_str(&json)?;
        info!("loaded picker config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PickerError::config("cannot serialize picker configuration", e))
    }

    pub fn validate(&self) -> Result<()> {
        if self.probe_radius < 0 {
            return Err(PickerError::invalid_argument(
                "probe_radius",
                format!("must be >= 0, got {}", self.probe_radius),
            ));
        }
        Ok(())
    }
}
