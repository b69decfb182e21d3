//! Shared synthetic-image helpers for unit tests.

use image::{GrayImage, Luma};

/// Fill the `w x h` block whose top-left pixel is `(x, y)`, clipped to the image.
pub(crate) fn fill_rect(img: &mut GrayImage, x: u32, y: u32, w: u32, h: u32, value: u8) {
    let (iw, ih) = img.dimensions();
    for yy in y..(y + h).min(ih) {
        for xx in x..(x + w).min(iw) {
            img.put_pixel(xx, yy, Luma([value]));
        }
    }
}

/// Fill pixels with `inner² <= d² < outer²` around `center`.
pub(crate) fn fill_ring(img: &mut GrayImage, center: [i32; 2], inner: i32, outer: i32, value: u8) {
    let lo = (inner as i64) * (inner as i64);
    let hi = (outer as i64) * (outer as i64);
    let (w, h) = img.dimensions();
    for y in 0..h {
        for x in 0..w {
            let dx = x as i64 - center[0] as i64;
            let dy = y as i64 - center[1] as i64;
            let d_sq = dx * dx + dy * dy;
            if d_sq >= lo && d_sq < hi {
                img.put_pixel(x, y, Luma([value]));
            }
        }
    }
}

/// Fill the open disc `d < radius` around `center`.
pub(crate) fn fill_disc(img: &mut GrayImage, center: [i32; 2], radius: i32, value: u8) {
    fill_ring(img, center, 0, radius, value);
}

/// Parametric toothed ring on a uniform background.
#[derive(Debug, Clone)]
pub(crate) struct GearSpec {
    pub center: [f32; 2],
    pub bore_radius: f32,
    pub root_radius: f32,
    pub tip_radius: f32,
    pub teeth: usize,
    /// Fraction of each angular pitch covered by the tooth.
    pub tooth_duty: f32,
    /// Tooth indices left out entirely.
    pub missing: Vec<usize>,
    /// Tooth indices whose tip is cut back to the midpoint of root and tip.
    pub worn: Vec<usize>,
    pub part_pix: u8,
    pub bg_pix: u8,
}

impl Default for GearSpec {
    fn default() -> Self {
        Self {
            center: [100.0, 100.0],
            bore_radius: 25.0,
            root_radius: 60.0,
            tip_radius: 80.0,
            teeth: 16,
            tooth_duty: 0.5,
            missing: Vec::new(),
            worn: Vec::new(),
            part_pix: 200,
            bg_pix: 30,
        }
    }
}

/// Render `spec` into a `w x h` grayscale image.
pub(crate) fn draw_gear_image(w: u32, h: u32, spec: &GearSpec) -> GrayImage {
    let pitch = std::f32::consts::TAU / spec.teeth.max(1) as f32;
    let mut img = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let dx = x as f32 - spec.center[0];
            let dy = y as f32 - spec.center[1];
            let d = (dx * dx + dy * dy).sqrt();

            let on_part = if d < spec.bore_radius {
                false
            } else if d <= spec.root_radius {
                true
            } else if d <= spec.tip_radius {
                let theta = dy.atan2(dx).rem_euclid(std::f32::consts::TAU);
                let tooth = ((theta / pitch) as usize).min(spec.teeth.saturating_sub(1));
                let phase = theta / pitch - tooth as f32;
                let tip = if spec.worn.contains(&tooth) {
                    0.5 * (spec.root_radius + spec.tip_radius)
                } else {
                    spec.tip_radius
                };
                phase < spec.tooth_duty && !spec.missing.contains(&tooth) && d <= tip
            } else {
                false
            };

            let pix = if on_part { spec.part_pix } else { spec.bg_pix };
            img.put_pixel(x, y, Luma([pix]));
        }
    }
    img
}
