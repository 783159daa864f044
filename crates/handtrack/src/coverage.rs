//! Circular coverage: the objective behind every search and quality gate.

use image::{GenericImageView, GrayImage, Luma};

use crate::geometry::Point;
use crate::window::SearchWindow;

/// Number of pixel offsets `(dx, dy)` with `dx² + dy² <= radius²`.
pub(crate) fn disk_area(radius: u32) -> u64 {
    let r = radius as i64;
    let r_sq = r * r;
    (-r..=r)
        .map(|dy| {
            let half = ((r_sq - dy * dy) as f64).sqrt() as i64;
            (2 * half + 1) as u64
        })
        .sum()
}

/// Fraction of "on" intensity inside the disk of `radius` around `center`.
///
/// Sums pixel values over the in-bounds part of the disk and normalizes by the
/// full disk area times 255: pixels beyond the mask border count as off.
/// Returns `0.0` when `center` lies outside `mask`.
pub(crate) fn coverage<I>(mask: &I, center: Point, radius: u32) -> f64
where
    I: GenericImageView<Pixel = Luma<u8>>,
{
    let (w, h) = mask.dimensions();
    if !center.in_bounds(w, h) {
        return 0.0;
    }

    let r = radius as i32;
    let r_sq = (r as i64) * (r as i64);
    let x_lo = (center.x - r).max(0);
    let x_hi = (center.x + r).min(w as i32 - 1);
    let y_lo = (center.y - r).max(0);
    let y_hi = (center.y + r).min(h as i32 - 1);

    let mut sum: u64 = 0;
    for y in y_lo..=y_hi {
        let dy = (y - center.y) as i64;
        for x in x_lo..=x_hi {
            let dx = (x - center.x) as i64;
            if dx * dx + dy * dy > r_sq {
                continue;
            }
            sum += mask.get_pixel(x as u32, y as u32)[0] as u64;
        }
    }

    sum as f64 / (disk_area(radius) as f64 * 255.0)
}

/// Coverage of `point` evaluated on a window just large enough for the disk.
pub(crate) fn quality(mask: &GrayImage, point: Point, radius: u32) -> f64 {
    let window = SearchWindow::around(mask, point, radius);
    coverage(window.view(), window.to_local(point), radius)
}
