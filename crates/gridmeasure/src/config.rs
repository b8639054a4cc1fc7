use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{MeasureError, Result};

/// Hole detection tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DetectionConfig {
    /// Lower hysteresis threshold of the Canny edge detector
    pub canny_low: f32,
    /// Upper hysteresis threshold of the Canny edge detector
    pub canny_high: f32,
    /// Contours with an area at or above this are treated as background
    pub max_area: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            canny_low: 80.0,
            canny_high: 200.0,
            max_area: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SelectionConfig {
    /// Clicks must land strictly closer than this (in pixels) to snap to a hole
    pub threshold_distance: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self { threshold_distance: 15.0 }
    }
}

/// Values normally supplied on the command line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StartupConfig {
    pub image_path: PathBuf,
    /// Real-world distance per pixel
    pub scale_factor: f64,
    pub pen_color: [u8; 3],
    /// Export file type name: `numpy`, `csv` or `tsv`
    pub file_type: String,
    pub output_dir: PathBuf,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            image_path: PathBuf::from("grid.png"),
            scale_factor: 1.0,
            pen_color: [255, 255, 0],
            file_type: "numpy".to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MeasureConfig {
    pub detection: DetectionConfig,
    pub selection: SelectionConfig,
    pub startup: StartupConfig,
}

impl MeasureConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&fs::read_to_string(path)?),
            Some("json") => Self::from_json(&fs::read_to_string(path)?),
            _ => Err(MeasureError::UnsupportedConfigFormat),
        }
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values that would make indexing or scaling meaningless
    pub fn validate(&self) -> Result<()> {
        let scale = self.startup.scale_factor;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(MeasureError::InvalidConfig(format!(
                "scale factor must be a positive number, got {scale}"
            )));
        }
        let (low, high) = (self.detection.canny_low, self.detection.canny_high);
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(MeasureError::InvalidConfig(format!(
                "canny thresholds must be finite with canny_low ({}) <= canny_high ({})",
                self.detection.canny_low, self.detection.canny_high
            )));
        }
        if !self.detection.max_area.is_finite() || self.detection.max_area <= 0.0 {
            return Err(MeasureError::InvalidConfig(format!(
                "max_area must be positive, got {}",
                self.detection.max_area
            )));
        }
        let threshold = self.selection.threshold_distance;
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(MeasureError::InvalidConfig(format!(
                "threshold_distance must be positive, got {}",
                self.selection.threshold_distance
            )));
        }
        Ok(())
    }
}
