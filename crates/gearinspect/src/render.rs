//! Visualization canvases.
//!
//! Nothing here feeds back into classification; canvases only help an
//! operator see where reference and test disagree.

use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::contour::Contour;

pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const BLUE: Rgb<u8> = Rgb([0, 0, 255]);

/// Black canvas matching the size of `like`.
pub fn blank_canvas(like: &GrayImage) -> RgbImage {
    RgbImage::new(like.width(), like.height())
}

/// Draw each contour as a closed polyline.
///
/// `thickness` > 1 repeats the outline with 1 px offsets down and right.
pub fn draw_contours_mut(
    canvas: &mut RgbImage,
    contours: &[Contour],
    color: Rgb<u8>,
    thickness: u32,
) {
    let thickness = thickness.max(1);
    for contour in contours {
        let pts = contour.points();
        match pts.len() {
            0 => continue,
            1 => {
                let p = pts[0];
                for o in 0..thickness as i32 {
                    put_clipped(canvas, p.x + o, p.y, color);
                    put_clipped(canvas, p.x, p.y + o, color);
                }
            }
            n => {
                for (i, &a) in pts.iter().enumerate() {
                    let b = pts[(i + 1) % n];
                    for o in 0..thickness {
                        let o = o as f32;
                        draw_line_segment_mut(
                            canvas,
                            (a.x as f32 + o, a.y as f32),
                            (b.x as f32 + o, b.y as f32),
                            color,
                        );
                        draw_line_segment_mut(
                            canvas,
                            (a.x as f32, a.y as f32 + o),
                            (b.x as f32, b.y as f32 + o),
                            color,
                        );
                    }
                }
            }
        }
    }
}

fn put_clipped(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, color);
    }
}

/// Canvas showing simplified outlines of `contours`.
pub fn outline_canvas(
    like: &GrayImage,
    contours: &[Contour],
    epsilon: f64,
    color: Rgb<u8>,
    thickness: u32,
) -> RgbImage {
    let simplified: Vec<Contour> = contours.iter().map(|c| c.approximate(epsilon)).collect();
    let mut canvas = blank_canvas(like);
    draw_contours_mut(&mut canvas, &simplified, color, thickness);
    canvas
}
