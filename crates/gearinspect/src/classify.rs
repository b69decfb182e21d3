//! Defect classification by enclosed contour area.
//!
//! Tooth defects are bucketed with a closed area band: inside the band the
//! tooth is missing, anywhere else it is worn. The bore uses a single
//! reference area, where an exact match is reported as `Missing`.

use image::GrayImage;

use crate::binarize::binarize_global;
use crate::contour::{extract_outer_contours, Contour};
use crate::diff;
use crate::error::InspectError;

/// Inclusive area band (px²) identifying a missing tooth.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToothAreaBand {
    pub min_area: f64,
    pub max_area: f64,
}

impl Default for ToothAreaBand {
    fn default() -> Self {
        Self {
            min_area: 1000.0,
            max_area: 1900.0,
        }
    }
}

impl ToothAreaBand {
    /// `min_area <= area <= max_area`.
    pub fn contains(&self, area: f64) -> bool {
        self.min_area <= area && area <= self.max_area
    }
}

/// Kind of tooth defect a difference contour represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToothDefect {
    MissingTooth,
    WornTooth,
}

/// Running worn/missing totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ToothCounts {
    pub worn: usize,
    pub missing: usize,
}

impl ToothCounts {
    pub fn total(&self) -> usize {
        self.worn + self.missing
    }

    fn record(&mut self, defect: ToothDefect) {
        match defect {
            ToothDefect::MissingTooth => self.missing += 1,
            ToothDefect::WornTooth => self.worn += 1,
        }
    }
}

/// Classify one contour by its enclosed area.
pub fn classify_contour(contour: &Contour, band: &ToothAreaBand) -> ToothDefect {
    if band.contains(contour.area()) {
        ToothDefect::MissingTooth
    } else {
        ToothDefect::WornTooth
    }
}

/// Count every contour exactly once, starting from `start`.
///
/// Passing the counts of a previous call accumulates across batches; a fresh
/// inspection starts from `ToothCounts::default()`.
pub fn classify_teeth(
    contours: &[Contour],
    band: &ToothAreaBand,
    start: ToothCounts,
) -> ToothCounts {
    let mut counts = start;
    for c in contours {
        let defect = classify_contour(c, band);
        tracing::trace!(
            "Contour: {} points, area {:.1} -> {:?}",
            c.len(),
            c.area(),
            defect
        );
        counts.record(defect);
    }
    counts
}

/// Condition of the inner diameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiameterStatus {
    /// No measurable deviation.
    Normal,
    /// Deviation area equal to the reference area.
    Missing,
    /// Deviation area above the reference area.
    Bigger,
    /// Deviation area below the reference area.
    Smaller,
}

impl DiameterStatus {
    /// Status for a measured deviation area.
    ///
    /// Note that equality with `normal_size` maps to `Missing`, not `Normal`;
    /// `Normal` is reserved for the absence of any deviation contour.
    pub fn from_area(area: f64, normal_size: f64) -> Self {
        if area == normal_size {
            Self::Missing
        } else if area > normal_size {
            Self::Bigger
        } else {
            Self::Smaller
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Missing => "Missing",
            Self::Bigger => "Bigger",
            Self::Smaller => "Smaller",
        }
    }
}

impl std::fmt::Display for DiameterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of the inner-diameter rule.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiameterRule {
    /// Global binarization threshold for the bore region.
    pub threshold: u8,
    /// Reference deviation area (px²), see [`DiameterStatus::from_area`].
    pub inner_diameter_normal_size: f64,
}

impl Default for DiameterRule {
    fn default() -> Self {
        Self {
            threshold: 90,
            inner_diameter_normal_size: 5000.0,
        }
    }
}

/// Outcome of the inner-diameter comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct DiameterAssessment {
    pub status: DiameterStatus,
    /// Difference map; `None` when the status is `Normal`.
    pub difference: Option<GrayImage>,
    /// Every outer contour of the difference map (unfiltered).
    pub contours: Vec<Contour>,
    /// Area of the contour the status was derived from.
    pub measured_area: Option<f64>,
}

/// Compare the bore regions of reference and test.
///
/// Only the first extracted contour is measured. Additional disjoint
/// deviation regions are logged and ignored, not aggregated.
pub fn classify_diameter(
    reference: &GrayImage,
    test: &GrayImage,
    rule: &DiameterRule,
) -> Result<DiameterAssessment, InspectError> {
    let ref_bin = binarize_global(reference, rule.threshold);
    let test_bin = binarize_global(test, rule.threshold);
    let difference = diff::xor(&ref_bin, &test_bin)?;
    let contours = extract_outer_contours(&difference);

    if contours.is_empty() {
        tracing::debug!("Inner diameter: no deviation contour");
        return Ok(DiameterAssessment {
            status: DiameterStatus::Normal,
            difference: None,
            contours,
            measured_area: None,
        });
    }

    if contours.len() > 1 {
        tracing::warn!(
            "Inner diameter: {} deviation contours found, measuring the first and ignoring {}",
            contours.len(),
            contours.len() - 1
        );
    }

    let area = contours[0].area();
    let status = DiameterStatus::from_area(area, rule.inner_diameter_normal_size);
    tracing::debug!(
        "Inner diameter: area {:.1} vs reference {:.1} -> {}",
        area,
        rule.inner_diameter_normal_size,
        status
    );

    Ok(DiameterAssessment {
        status,
        difference: Some(difference),
        contours,
        measured_area: Some(area),
    })
}
