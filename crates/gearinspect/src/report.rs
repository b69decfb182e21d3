//! Inspection result records.

use image::{GrayImage, RgbImage};

use crate::classify::{DiameterStatus, ToothCounts};

/// Summary of one inspection run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InspectionReport {
    /// Number of worn teeth.
    pub worn_teeth: usize,
    /// Number of missing teeth.
    pub missing_teeth: usize,
    /// Inner-diameter condition.
    pub diameter_status: DiameterStatus,
    /// Area of the measured inner-diameter deviation contour, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diameter_contour_area: Option<f64>,
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
    /// Outer contours in the rim difference map before noise filtering.
    pub difference_contours: usize,
    /// Contours that survived the noise filter and were classified.
    pub significant_contours: usize,
}

impl InspectionReport {
    /// Assemble the report from stage outputs.
    pub fn new(
        counts: ToothCounts,
        diameter_status: DiameterStatus,
        diameter_contour_area: Option<f64>,
        image_size: [u32; 2],
        difference_contours: usize,
        significant_contours: usize,
    ) -> Self {
        Self {
            worn_teeth: counts.worn,
            missing_teeth: counts.missing,
            diameter_status,
            diameter_contour_area,
            image_size,
            difference_contours,
            significant_contours,
        }
    }

    /// `true` when no tooth defect was counted and the bore is unchanged.
    pub fn is_pass(&self) -> bool {
        self.worn_teeth == 0
            && self.missing_teeth == 0
            && self.diameter_status == DiameterStatus::Normal
    }
}

/// Images produced alongside the report.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionImages {
    /// Rim difference, united with the bore difference unless the bore is normal.
    pub overall_difference: GrayImage,
    /// Significant rim contours and bore deviation outlines in red.
    pub significant_contours: RgbImage,
    /// Outlines of the binarized reference rim in blue.
    pub reference_contours: RgbImage,
    /// Outlines of the binarized test rim in blue.
    pub test_contours: RgbImage,
}

/// Report plus images of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionOutcome {
    pub report: InspectionReport,
    pub images: InspectionImages,
}
