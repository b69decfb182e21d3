//! Runtime inspection parameters.
//!
//! Every stage reads its thresholds from an explicit [`InspectConfig`]; there
//! are no process-wide constants. Configs load from JSON where every field is
//! optional and falls back to its default.

use std::path::Path;

use crate::binarize::{validate_adaptive, AdaptiveMethod, Binarization};
use crate::classify::{DiameterRule, ToothAreaBand};
use crate::error::InspectError;
use crate::filter::DEFAULT_MIN_CONTOUR_POINTS;

const DEFAULT_MASK_RADIUS: i32 = 110;
const DEFAULT_BLOCK_SIZE: u32 = 11;
const DEFAULT_BIAS: f32 = 2.0;

/// Placement of the inner-diameter disc.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaskConfig {
    /// Disc center in pixels; `None` uses the image center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[i32; 2]>,
    /// Disc radius in pixels.
    pub radius: i32,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            center: None,
            radius: DEFAULT_MASK_RADIUS,
        }
    }
}

/// Local-threshold parameters for the toothed rim.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdaptiveConfig {
    pub method: AdaptiveMethod,
    /// Odd window side length in pixels.
    pub block_size: u32,
    /// Subtracted from the local mean.
    pub bias: f32,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            method: AdaptiveMethod::Gaussian,
            block_size: DEFAULT_BLOCK_SIZE,
            bias: DEFAULT_BIAS,
        }
    }
}

impl AdaptiveConfig {
    pub fn binarization(&self) -> Binarization {
        Binarization::Adaptive {
            method: self.method,
            block_size: self.block_size,
            bias: self.bias,
        }
    }
}

/// Canvas drawing parameters.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Line width for tooth and part outlines.
    pub contour_thickness: u32,
    /// Line width for inner-diameter deviation outlines.
    pub diameter_thickness: u32,
    /// Douglas-Peucker tolerance for the reference/test outline canvases.
    pub approx_epsilon: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            contour_thickness: 2,
            diameter_thickness: 1,
            approx_epsilon: 1.0,
        }
    }
}

/// Complete inspection configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InspectConfig {
    pub mask: MaskConfig,
    pub diameter: DiameterRule,
    pub adaptive: AdaptiveConfig,
    pub tooth_band: ToothAreaBand,
    /// Contours with fewer border points are treated as noise.
    pub min_contour_points: usize,
    pub render: RenderConfig,
}

impl Default for InspectConfig {
    fn default() -> Self {
        Self {
            mask: MaskConfig::default(),
            diameter: DiameterRule::default(),
            adaptive: AdaptiveConfig::default(),
            tooth_band: ToothAreaBand::default(),
            min_contour_points: DEFAULT_MIN_CONTOUR_POINTS,
            render: RenderConfig::default(),
        }
    }
}

impl InspectConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&data)?)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(data: &str) -> Result<Self, InspectError> {
        let config: Self = serde_json::from_str(data)
            .map_err(|e| InspectError::InvalidConfig(format!("malformed config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations no inspection can run with.
    pub fn validate(&self) -> Result<(), InspectError> {
        let band = &self.tooth_band;
        if !band.min_area.is_finite() || !band.max_area.is_finite() {
            return Err(InspectError::InvalidConfig(
                "tooth area band must be finite".to_string(),
            ));
        }
        if band.min_area > band.max_area {
            return Err(InspectError::InvalidConfig(format!(
                "tooth area band is inverted: min {} > max {}",
                band.min_area, band.max_area
            )));
        }
        if !self.diameter.inner_diameter_normal_size.is_finite() {
            return Err(InspectError::InvalidConfig(
                "inner_diameter_normal_size must be finite".to_string(),
            ));
        }
        validate_adaptive(self.adaptive.block_size, self.adaptive.bias)
            .map_err(|e| InspectError::InvalidConfig(e.to_string()))?;
        if self.render.approx_epsilon.is_nan() || self.render.approx_epsilon < 0.0 {
            return Err(InspectError::InvalidConfig(format!(
                "approx_epsilon must be >= 0, got {}",
                self.render.approx_epsilon
            )));
        }
        Ok(())
    }

    /// Pretty JSON rendering, e.g. for writing a config template.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
