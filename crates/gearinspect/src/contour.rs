//! Outer boundary extraction from binary difference maps.
//!
//! Border following is delegated to `imageproc::contours::find_contours`.
//! Only top-level outer borders are kept: holes and islands nested inside
//! holes are dropped, and every border pixel is retained (no simplification).

use image::GrayImage;
use imageproc::contours::{find_contours, BorderType};
use imageproc::point::Point;

/// Closed polygon through the border pixels of one connected region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    points: Vec<Point<i32>>,
}

impl Contour {
    pub fn new(points: Vec<Point<i32>>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point<i32>] {
        &self.points
    }

    /// Number of border points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosed polygon area (shoelace formula), always non-negative.
    ///
    /// Fewer than three points enclose nothing and yield 0.
    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    /// Douglas-Peucker simplification, for drawing only.
    pub fn approximate(&self, epsilon: f64) -> Contour {
        if self.points.len() < 3 {
            return self.clone();
        }
        Contour::new(imageproc::geometry::approximate_polygon_dp(
            &self.points,
            epsilon,
            true,
        ))
    }
}

/// Absolute shoelace area of a closed polygon.
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice: i64 = 0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }
    twice.abs() as f64 * 0.5
}

/// Outer borders of all top-level non-zero regions of `binary`.
///
/// Returns an empty list when nothing is set. Order follows the raster scan
/// of the border follower and carries no geometric meaning.
pub fn extract_outer_contours(binary: &GrayImage) -> Vec<Contour> {
    let contours: Vec<Contour> = find_contours::<i32>(binary)
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| Contour::new(c.points))
        .collect();
    tracing::debug!("Extracted {} outer contours", contours.len());
    contours
}
