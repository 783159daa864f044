//! Synthetic masks for unit tests.

use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use crate::geometry::Point;

pub(crate) fn filled_mask(w: u32, h: u32, value: u8) -> GrayImage {
    GrayImage::from_pixel(w, h, Luma([value]))
}

/// Black mask with one saturated disk.
pub(crate) fn disk_mask(w: u32, h: u32, center: Point, radius: i32) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    draw_filled_circle_mut(&mut img, (center.x, center.y), radius, Luma([255u8]));
    img
}

/// Add a saturated disk to an existing mask.
pub(crate) fn add_disk(img: &mut GrayImage, center: Point, radius: i32) {
    draw_filled_circle_mut(img, (center.x, center.y), radius, Luma([255u8]));
}

/// Black mask with one saturated axis-aligned rectangle.
pub(crate) fn rect_mask(w: u32, h: u32, x: i32, y: i32, rw: u32, rh: u32) -> GrayImage {
    let mut img = GrayImage::new(w, h);
    draw_filled_rect_mut(&mut img, Rect::at(x, y).of_size(rw, rh), Luma([255u8]));
    img
}
