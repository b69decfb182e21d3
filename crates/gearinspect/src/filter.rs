//! Noise rejection for difference contours.

use crate::contour::Contour;

/// Default minimum number of border points for a contour to count as a defect.
pub const DEFAULT_MIN_CONTOUR_POINTS: usize = 15;

/// Drop contours with fewer than `min_points` border points.
///
/// Removes single-pixel speckle and thin threshold artifacts. Survivors keep
/// their input order.
pub fn filter_significant(contours: Vec<Contour>, min_points: usize) -> Vec<Contour> {
    let n_in = contours.len();
    let kept: Vec<Contour> = contours
        .into_iter()
        .filter(|c| c.len() >= min_points)
        .collect();
    tracing::debug!(
        "Contour filter: kept {}/{} (min_points={})",
        kept.len(),
        n_in,
        min_points
    );
    kept
}
