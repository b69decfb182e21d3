//! Two-level conversion of grayscale regions.
//!
//! The bore is compared after a fixed global cut; the rim uses a local
//! (adaptive) cut so that uneven lighting around the ring does not show up
//! as a difference.

use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

use crate::error::InspectError;

/// Weighting of the neighborhood used by the adaptive variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptiveMethod {
    /// Gaussian-weighted window.
    #[default]
    Gaussian,
    /// Unweighted box window.
    Mean,
}

/// Binarization strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Binarization {
    /// `p >= threshold` maps to 255, everything else to 0.
    Global { threshold: u8 },
    /// `p >= local_mean - bias` maps to 255, everything else to 0.
    Adaptive {
        method: AdaptiveMethod,
        /// Odd window side length, at least 3.
        block_size: u32,
        bias: f32,
    },
}

impl Binarization {
    /// Binarize a single-channel image into a new 0/255 image.
    pub fn apply(&self, image: &GrayImage) -> Result<GrayImage, InspectError> {
        match *self {
            Self::Global { threshold } => Ok(binarize_global(image, threshold)),
            Self::Adaptive {
                method,
                block_size,
                bias,
            } => binarize_adaptive(image, method, block_size, bias),
        }
    }

    /// Same as [`Binarization::apply`], rejecting anything but 8-bit luma.
    pub fn apply_dynamic(&self, image: &DynamicImage) -> Result<GrayImage, InspectError> {
        self.apply(as_single_channel(image)?)
    }
}

/// Borrow the grayscale buffer of a dynamic image.
///
/// Only `ImageLuma8` is accepted; color or alpha layouts fail with
/// [`InspectError::InvalidInput`].
pub fn as_single_channel(image: &DynamicImage) -> Result<&GrayImage, InspectError> {
    match image {
        DynamicImage::ImageLuma8(gray) => Ok(gray),
        other => Err(InspectError::InvalidInput(format!(
            "expected single-channel 8-bit image, got {:?} ({} channels)",
            other.color(),
            other.color().channel_count()
        ))),
    }
}

/// Fixed-threshold binarization.
pub fn binarize_global(image: &GrayImage, threshold: u8) -> GrayImage {
    imageproc::map::map_colors(image, |p| {
        if p[0] >= threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Local-threshold binarization.
///
/// The threshold at each pixel is the weighted mean of its
/// `block_size x block_size` neighborhood minus `bias`, computed with
/// `imageproc`'s separable filter. Borders replicate the edge pixels.
pub fn binarize_adaptive(
    image: &GrayImage,
    method: AdaptiveMethod,
    block_size: u32,
    bias: f32,
) -> Result<GrayImage, InspectError> {
    validate_adaptive(block_size, bias)?;

    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Ok(GrayImage::new(w, h));
    }

    let kernel = match method {
        AdaptiveMethod::Gaussian => gaussian_kernel(block_size),
        AdaptiveMethod::Mean => vec![1.0 / block_size as f32; block_size as usize],
    };
    let local_mean = imageproc::filter::separable_filter_equal(&to_f32(image), &kernel);

    Ok(imageproc::map::map_colors2(image, &local_mean, |p, mean| {
        if p[0] as f32 >= mean[0] - bias {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    }))
}

/// Upper bound on the adaptive window side length.
pub const MAX_BLOCK_SIZE: u32 = 1001;

pub(crate) fn validate_adaptive(block_size: u32, bias: f32) -> Result<(), InspectError> {
    if block_size < 3 || block_size % 2 == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(InspectError::InvalidInput(format!(
            "adaptive block size must be odd and in 3..={}, got {}",
            MAX_BLOCK_SIZE, block_size
        )));
    }
    if !bias.is_finite() {
        return Err(InspectError::InvalidInput(format!(
            "adaptive bias must be finite, got {}",
            bias
        )));
    }
    Ok(())
}

/// Normalized 1-D Gaussian of odd length `size`.
///
/// sigma follows the usual size-derived rule `0.3 * ((size - 1) / 2 - 1) + 0.8`.
fn gaussian_kernel(size: u32) -> Vec<f32> {
    let sigma = 0.3 * ((size as f64 - 1.0) * 0.5 - 1.0) + 0.8;
    let half = (size / 2) as i64;
    let denom = 2.0 * sigma * sigma;
    let raw: Vec<f64> = (-half..=half)
        .map(|i| (-((i * i) as f64) / denom).exp())
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.into_iter().map(|v| (v / sum) as f32).collect()
}

/// Intensities as `f32` so the local mean is not rounded.
fn to_f32(image: &GrayImage) -> ImageBuffer<Luma<f32>, Vec<f32>> {
    let (w, h) = image.dimensions();
    let mut f = ImageBuffer::<Luma<f32>, Vec<f32>>::new(w, h);
    for (x, y, p) in image.enumerate_pixels() {
        f.put_pixel(x, y, Luma([p[0] as f32]));
    }
    f
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use image::{Rgb, RgbImage};

    fn is_binary(img: &GrayImage) -> bool {
        img.pixels().all(|p| p[0] == 0 || p[0] == 255)
    }

    #[test]
    fn global_threshold_is_inclusive() {
        let img = GrayImage::from_raw(4, 1, vec![0, 89, 90, 255]).expect("4 pixels");
        let out = binarize_global(&img, 90);
        assert_eq!(out.as_raw(), &vec![0, 0, 255, 255]);
    }

    #[test]
    fn gaussian_kernel_is_normalized_and_symmetric() {
        let k = gaussian_kernel(11);
        assert_eq!(k.len(), 11);
        assert_relative_eq!(k.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        for i in 0..5 {
            assert_relative_eq!(k[i], k[10 - i], epsilon = 1e-7);
        }
        assert!(k[5] > k[4]);
    }

    #[test]
    fn uniform_image_is_all_white() {
        let img = GrayImage::from_pixel(30, 20, Luma([137]));
        for method in [AdaptiveMethod::Gaussian, AdaptiveMethod::Mean] {
            let out = binarize_adaptive(&img, method, 11, 2.0).expect("valid params");
            assert!(out.pixels().all(|p| p[0] == 255));
        }
    }

    #[test]
    fn adaptive_marks_dark_edge_of_a_blob() {
        let mut img = GrayImage::from_pixel(40, 40, Luma([200]));
        for y in 15..25 {
            for x in 15..25 {
                img.put_pixel(x, y, Luma([50]));
            }
        }
        let out = binarize_adaptive(&img, AdaptiveMethod::Gaussian, 11, 2.0).expect("valid");
        assert!(is_binary(&out));
        // Dark corner next to bright surroundings falls below its local mean.
        assert_eq!(out.get_pixel(15, 15)[0], 0);
        // Bright pixels next to the blob stay above theirs.
        assert_eq!(out.get_pixel(14, 15)[0], 255);
        // Far background is uniform.
        assert_eq!(out.get_pixel(2, 2)[0], 255);
    }

    #[test]
    fn adaptive_tolerates_illumination_gradient() {
        // Smooth ramp: every pixel sits close to its local mean.
        let img = GrayImage::from_fn(64, 16, |x, _| Luma([(x + 20) as u8]));
        let out = binarize_adaptive(&img, AdaptiveMethod::Gaussian, 11, 2.0).expect("valid");
        assert!(out.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn adaptive_rejects_bad_block_size() {
        let img = GrayImage::new(8, 8);
        for bs in [0, 1, 2, 10, MAX_BLOCK_SIZE + 2] {
            let err = binarize_adaptive(&img, AdaptiveMethod::Mean, bs, 2.0)
                .expect_err("invalid block size");
            assert!(matches!(err, InspectError::InvalidInput(_)));
        }
        assert!(binarize_adaptive(&img, AdaptiveMethod::Mean, 3, f32::NAN).is_err());
    }

    #[test]
    fn dynamic_gate_rejects_color() {
        let rgb = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([1, 2, 3])));
        let err = Binarization::Global { threshold: 90 }
            .apply_dynamic(&rgb)
            .expect_err("multi-channel");
        assert!(matches!(err, InspectError::InvalidInput(_)));

        let gray = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([100])));
        let out = Binarization::Global { threshold: 90 }
            .apply_dynamic(&gray)
            .expect("single channel");
        assert!(out.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn empty_image_binarizes_to_empty() {
        let img = GrayImage::new(0, 0);
        let out = binarize_adaptive(&img, AdaptiveMethod::Gaussian, 11, 2.0).expect("valid");
        assert_eq!(out.dimensions(), (0, 0));
    }

    #[test]
    fn local_mean_uses_replicated_border() {
        // Left column dark, rest bright: the border pixel sees mostly its own
        // replicated value under a 3-tap box, so it stays above its mean.
        let img = GrayImage::from_fn(9, 9, |x, _| Luma([if x == 0 { 60 } else { 200 }]));
        let mean = imageproc::filter::separable_filter_equal(&to_f32(&img), &[1.0f32 / 3.0; 3]);
        assert_relative_eq!(mean.get_pixel(0, 4)[0], (60.0 + 60.0 + 200.0) / 3.0, epsilon = 1e-3);
        let out = binarize_adaptive(&img, AdaptiveMethod::Mean, 3, 2.0).expect("valid");
        assert_eq!(out.get_pixel(0, 4)[0], 0);
        assert_eq!(out.get_pixel(1, 4)[0], 255);
        assert_eq!(out.get_pixel(5, 4)[0], 255);
    }
}
