//! Concentric region masking.
//!
//! The part is split into an inner disc (the bore and its immediate
//! surroundings) and the complement (the toothed rim). A pixel belongs to the
//! disc when its squared distance to the center is strictly below `radius²`,
//! so every pixel lands in exactly one of the two regions.

use image::{GrayImage, Luma};

use crate::error::{ensure_same_dimensions, InspectError};

/// Binary disc mask: 255 inside, 0 outside.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionMask {
    mask: GrayImage,
}

impl RegionMask {
    /// Build a disc mask of the given size.
    ///
    /// `radius <= 0` produces an empty disc. The center may lie outside the
    /// image; the disc is simply clipped.
    pub fn disc(width: u32, height: u32, center: [i32; 2], radius: i32) -> Self {
        let r_sq = if radius > 0 {
            (radius as i64) * (radius as i64)
        } else {
            0
        };
        let mask = GrayImage::from_fn(width, height, |x, y| {
            let dx = x as i64 - center[0] as i64;
            let dy = y as i64 - center[1] as i64;
            if dx * dx + dy * dy < r_sq {
                Luma([255])
            } else {
                Luma([0])
            }
        });
        Self { mask }
    }

    /// Logical complement of this mask.
    pub fn complement(&self) -> Self {
        let mut mask = self.mask.clone();
        for p in mask.pixels_mut() {
            p[0] = if p[0] == 0 { 255 } else { 0 };
        }
        Self { mask }
    }

    /// Keep `image` intensities where the mask is set, zero elsewhere.
    pub fn apply(&self, image: &GrayImage) -> Result<GrayImage, InspectError> {
        ensure_same_dimensions(&self.mask, image)?;
        Ok(self.select(image))
    }

    fn select(&self, image: &GrayImage) -> GrayImage {
        imageproc::map::map_colors2(&self.mask, image, |m, p| {
            if m[0] != 0 {
                p
            } else {
                Luma([0])
            }
        })
    }

    /// Underlying mask image.
    pub fn as_image(&self) -> &GrayImage {
        &self.mask
    }
}

/// Inner-disc and outer-rim views of one grayscale image.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSplit {
    /// Intensities inside the disc, zero elsewhere.
    pub inner: GrayImage,
    /// Intensities outside the disc, zero elsewhere.
    pub outer: GrayImage,
}

/// Split `image` into the disc around `center` and its complement.
pub fn split_regions(image: &GrayImage, center: [i32; 2], radius: i32) -> RegionSplit {
    let (w, h) = image.dimensions();
    let disc = RegionMask::disc(w, h, center, radius);
    let inner = disc.select(image);
    let outer = disc.complement().select(image);
    tracing::debug!(
        "Region split at ({}, {}) r={} on {}x{}",
        center[0],
        center[1],
        radius,
        w,
        h
    );
    RegionSplit { inner, outer }
}

/// Default mask center: the pixel at `(width / 2, height / 2)`.
pub fn image_center(image: &GrayImage) -> [i32; 2] {
    let (w, h) = image.dimensions();
    [(w / 2) as i32, (h / 2) as i32]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_image(w: u32, h: u32, seed: u64, min: u8) -> GrayImage {
        let mut rng = StdRng::seed_from_u64(seed);
        GrayImage::from_fn(w, h, |_, _| Luma([rng.gen_range(min..=255)]))
    }

    #[test]
    fn nonzero_pixels_land_in_exactly_one_region() {
        let img = random_image(64, 48, 7, 1);
        let split = split_regions(&img, [30, 20], 15);
        for (x, y, p) in img.enumerate_pixels() {
            let a = split.inner.get_pixel(x, y)[0];
            let b = split.outer.get_pixel(x, y)[0];
            assert!((a != 0) ^ (b != 0), "pixel ({x}, {y}) in both or neither");
            assert_eq!(a.max(b), p[0]);
        }
    }

    #[test]
    fn zero_source_pixels_are_zero_in_both() {
        let mut img = random_image(20, 20, 3, 1);
        img.put_pixel(10, 10, Luma([0]));
        img.put_pixel(0, 0, Luma([0]));
        let split = split_regions(&img, [10, 10], 5);
        for (x, y) in [(10, 10), (0, 0)] {
            assert_eq!(split.inner.get_pixel(x, y)[0], 0);
            assert_eq!(split.outer.get_pixel(x, y)[0], 0);
        }
    }

    #[test]
    fn non_positive_radius_keeps_everything_outer() {
        let img = random_image(16, 16, 11, 0);
        for r in [0, -4] {
            let split = split_regions(&img, [8, 8], r);
            assert!(split.inner.pixels().all(|p| p[0] == 0));
            assert_eq!(split.outer, img);
        }
    }

    #[test]
    fn oversized_radius_keeps_everything_inner() {
        let img = random_image(16, 12, 5, 0);
        let split = split_regions(&img, [8, 6], 1000);
        assert_eq!(split.inner, img);
        assert!(split.outer.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn disc_boundary_is_exclusive() {
        let mask = RegionMask::disc(21, 21, [10, 10], 3);
        let inside = |x, y| mask.as_image().get_pixel(x, y)[0] != 0;
        assert!(inside(10, 10));
        assert!(inside(12, 10));
        // Distance exactly 3 is outside.
        assert!(!inside(13, 10));
        assert!(!inside(10, 7));
    }

    #[test]
    fn complement_partitions_the_frame() {
        let mask = RegionMask::disc(32, 24, [5, 30], 12);
        let inv = mask.complement();
        for (x, y, p) in mask.as_image().enumerate_pixels() {
            let q = inv.as_image().get_pixel(x, y)[0];
            assert!((p[0] == 255 && q == 0) || (p[0] == 0 && q == 255));
        }
    }

    #[test]
    fn apply_matches_split() {
        let img = random_image(40, 40, 19, 0);
        let mask = RegionMask::disc(40, 40, [20, 20], 9);
        let split = split_regions(&img, [20, 20], 9);
        assert_eq!(mask.apply(&img).expect("same size"), split.inner);
        assert_eq!(mask.complement().apply(&img).expect("same size"), split.outer);
    }

    #[test]
    fn apply_rejects_other_sizes() {
        let mask = RegionMask::disc(10, 10, [5, 5], 3);
        let err = mask.apply(&GrayImage::new(10, 11)).expect_err("size differs");
        assert!(matches!(err, InspectError::DimensionMismatch { .. }));
    }
}
