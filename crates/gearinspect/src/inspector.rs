//! High-level inspection API.
//!
//! [`Inspector`] is the primary entry point. It wraps an [`InspectConfig`]
//! and runs the full comparison of a test image against a reference image:
//! region split -> bore comparison -> rim binarization -> difference ->
//! contour extraction -> noise filter -> classification -> report.

use image::{DynamicImage, GrayImage};

use crate::binarize::as_single_channel;
use crate::classify::{classify_diameter, classify_teeth, DiameterStatus, ToothCounts};
use crate::config::InspectConfig;
use crate::contour::extract_outer_contours;
use crate::diff;
use crate::error::{ensure_same_dimensions, InspectError};
use crate::filter::filter_significant;
use crate::mask::{image_center, split_regions};
use crate::render::{blank_canvas, draw_contours_mut, outline_canvas, BLUE, RED};
use crate::report::{InspectionImages, InspectionOutcome, InspectionReport};

/// Primary inspection interface.
///
/// Create once, inspect many test images. Holds no state between runs, so
/// one inspector may be shared across threads.
///
/// # Examples
///
/// ```
/// use gearinspect::Inspector;
/// use image::{GrayImage, Luma};
///
/// let reference = GrayImage::from_pixel(64, 64, Luma([180]));
/// let outcome = Inspector::new().inspect(&reference, &reference).unwrap();
/// assert_eq!(outcome.report.worn_teeth, 0);
/// assert_eq!(outcome.report.missing_teeth, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Inspector {
    config: InspectConfig,
}

impl Inspector {
    /// Inspector with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: InspectConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut InspectConfig {
        &mut self.config
    }

    /// Compare `test` against `reference`.
    ///
    /// Both images must be grayscale, same size, and pre-aligned.
    pub fn inspect(
        &self,
        reference: &GrayImage,
        test: &GrayImage,
    ) -> Result<InspectionOutcome, InspectError> {
        let cfg = &self.config;
        cfg.validate()?;
        ensure_same_dimensions(reference, test)?;
        let (w, h) = reference.dimensions();

        let center = cfg.mask.center.unwrap_or_else(|| image_center(reference));
        let ref_regions = split_regions(reference, center, cfg.mask.radius);
        let test_regions = split_regions(test, center, cfg.mask.radius);

        let diameter = classify_diameter(&ref_regions.inner, &test_regions.inner, &cfg.diameter)?;

        let rim = cfg.adaptive.binarization();
        let ref_rim = rim.apply(&ref_regions.outer)?;
        let test_rim = rim.apply(&test_regions.outer)?;
        let rim_difference = diff::xor(&ref_rim, &test_rim)?;
        tracing::debug!(
            "Rim difference: {} set pixels",
            diff::count_set(&rim_difference)
        );

        let overall_difference = match &diameter.difference {
            Some(bore_difference) if diameter.status != DiameterStatus::Normal => {
                diff::union(&rim_difference, bore_difference)?
            }
            _ => rim_difference.clone(),
        };

        let difference_contours = extract_outer_contours(&rim_difference);
        let n_difference = difference_contours.len();
        let significant = filter_significant(difference_contours, cfg.min_contour_points);
        let counts = classify_teeth(&significant, &cfg.tooth_band, ToothCounts::default());

        let mut significant_canvas = blank_canvas(reference);
        draw_contours_mut(
            &mut significant_canvas,
            &diameter.contours,
            RED,
            cfg.render.diameter_thickness,
        );
        draw_contours_mut(
            &mut significant_canvas,
            &significant,
            RED,
            cfg.render.contour_thickness,
        );
        let reference_contours = outline_canvas(
            &ref_rim,
            &extract_outer_contours(&ref_rim),
            cfg.render.approx_epsilon,
            BLUE,
            cfg.render.contour_thickness,
        );
        let test_contours = outline_canvas(
            &test_rim,
            &extract_outer_contours(&test_rim),
            cfg.render.approx_epsilon,
            BLUE,
            cfg.render.contour_thickness,
        );

        let report = InspectionReport::new(
            counts,
            diameter.status,
            diameter.measured_area,
            [w, h],
            n_difference,
            significant.len(),
        );
        tracing::info!(
            "Inspection: {} missing, {} worn, inner diameter {} ({} of {} difference contours significant)",
            report.missing_teeth,
            report.worn_teeth,
            report.diameter_status,
            report.significant_contours,
            report.difference_contours,
        );

        Ok(InspectionOutcome {
            report,
            images: InspectionImages {
                overall_difference,
                significant_contours: significant_canvas,
                reference_contours,
                test_contours,
            },
        })
    }

    /// Same as [`Inspector::inspect`] for decoded images of unknown layout.
    ///
    /// Anything other than 8-bit single-channel fails with
    /// [`InspectError::InvalidInput`].
    pub fn inspect_dynamic(
        &self,
        reference: &DynamicImage,
        test: &DynamicImage,
    ) -> Result<InspectionOutcome, InspectError> {
        self.inspect(as_single_channel(reference)?, as_single_channel(test)?)
    }
}
