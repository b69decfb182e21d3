//! gearinspect — visual wear and defect inspection of toothed rings.
//!
//! A test image of a gear ring is compared against a reference image of an
//! ideal part. Both images must be grayscale, the same size, and pre-aligned.
//! The pipeline stages are:
//!
//! 1. **Mask** – split the part into the inner-diameter disc and the toothed rim.
//! 2. **Binarize** – fixed global cut for the bore, local adaptive cut for the rim.
//! 3. **Difference** – pixel-wise XOR of reference and test binaries.
//! 4. **Contours** – outer borders of the difference regions.
//! 5. **Filter** – drop contours too short to be a real deviation.
//! 6. **Classify** – area band for worn/missing teeth, reference area for the bore.
//! 7. **Report** – counts, bore status and visualization canvases.
//!
//! # Public API
//! - [`Inspector`] as the primary entry point
//! - [`InspectConfig`] for tuning every threshold
//! - stage functions in their modules for callers assembling their own flow

pub mod binarize;
pub mod classify;
pub mod config;
pub mod contour;
pub mod diff;
mod error;
pub mod filter;
mod inspector;
pub mod mask;
pub mod render;
mod report;

#[cfg(test)]
mod test_utils;

pub use binarize::{AdaptiveMethod, Binarization};
pub use classify::{
    DiameterAssessment, DiameterRule, DiameterStatus, ToothAreaBand, ToothCounts, ToothDefect,
};
pub use config::{AdaptiveConfig, InspectConfig, MaskConfig, RenderConfig};
pub use contour::Contour;
pub use error::InspectError;
pub use inspector::Inspector;
pub use report::{InspectionImages, InspectionOutcome, InspectionReport};
