//! Pixel-wise set operations on binary images.
//!
//! Any non-zero sample counts as "set"; outputs are strictly 0/255.

use image::{GrayImage, Luma};

use crate::error::{ensure_same_dimensions, InspectError};

#[inline]
fn level(set: bool) -> Luma<u8> {
    if set {
        Luma([255])
    } else {
        Luma([0])
    }
}

/// Symmetric difference: 255 where exactly one input is set.
pub fn xor(a: &GrayImage, b: &GrayImage) -> Result<GrayImage, InspectError> {
    ensure_same_dimensions(a, b)?;
    Ok(imageproc::map::map_colors2(a, b, |p, q| {
        level((p[0] != 0) ^ (q[0] != 0))
    }))
}

/// Union: 255 where either input is set.
pub fn union(a: &GrayImage, b: &GrayImage) -> Result<GrayImage, InspectError> {
    ensure_same_dimensions(a, b)?;
    Ok(imageproc::map::map_colors2(a, b, |p, q| {
        level(p[0] != 0 || q[0] != 0)
    }))
}

/// Number of set pixels.
pub fn count_set(image: &GrayImage) -> usize {
    image.pixels().filter(|p| p[0] != 0).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_binary(w: u32, h: u32, seed: u64) -> GrayImage {
        let mut rng = StdRng::seed_from_u64(seed);
        GrayImage::from_fn(w, h, |_, _| level(rng.gen_bool(0.5)))
    }

    #[test]
    fn xor_is_symmetric() {
        let a = random_binary(33, 17, 1);
        let b = random_binary(33, 17, 2);
        assert_eq!(xor(&a, &b).expect("same size"), xor(&b, &a).expect("same size"));
    }

    #[test]
    fn xor_with_self_is_empty() {
        let a = random_binary(25, 25, 9);
        let d = xor(&a, &a).expect("same size");
        assert_eq!(count_set(&d), 0);
    }

    #[test]
    fn xor_marks_disagreement_only() {
        let a = GrayImage::from_raw(4, 1, vec![0, 0, 255, 255]).expect("4 pixels");
        let b = GrayImage::from_raw(4, 1, vec![0, 255, 0, 255]).expect("4 pixels");
        assert_eq!(xor(&a, &b).expect("same size").as_raw(), &vec![0, 255, 255, 0]);
        assert_eq!(union(&a, &b).expect("same size").as_raw(), &vec![0, 255, 255, 255]);
    }

    #[test]
    fn mismatched_sizes_fail() {
        let err = xor(&GrayImage::new(3, 3), &GrayImage::new(3, 2)).expect_err("sizes differ");
        assert_eq!(
            err,
            InspectError::DimensionMismatch {
                expected: [3, 3],
                actual: [3, 2],
            }
        );
        assert!(union(&GrayImage::new(1, 3), &GrayImage::new(3, 3)).is_err());
    }
}
