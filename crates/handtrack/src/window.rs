//! Bounded sub-views of a mask with their frame-space origin.

use image::{imageops, GenericImageView, GrayImage, Luma, SubImage};

use crate::geometry::Point;

/// Rectangular view into a mask, clipped to the frame.
///
/// Points are translated into window-local coordinates before searching and
/// back into frame coordinates afterwards.
pub(crate) struct SearchWindow<'a> {
    view: SubImage<&'a GrayImage>,
    origin: Point,
}

impl<'a> SearchWindow<'a> {
    /// Window covering `center ± half_extent` on both axes, clipped to `mask`.
    pub(crate) fn around(mask: &'a GrayImage, center: Point, half_extent: u32) -> Self {
        let (w, h) = mask.dimensions();
        let half = half_extent as i64;
        let clip = |v: i64, max: u32| v.clamp(0, max as i64) as u32;

        let x0 = clip(center.x as i64 - half, w);
        let y0 = clip(center.y as i64 - half, h);
        let x1 = clip(center.x as i64 + half + 1, w);
        let y1 = clip(center.y as i64 + half + 1, h);

        Self {
            view: imageops::crop_imm(mask, x0, y0, x1 - x0, y1 - y0),
            origin: Point::new(x0 as i32, y0 as i32),
        }
    }

    pub(crate) fn view(&self) -> &(impl GenericImageView<Pixel = Luma<u8>> + 'a) {
        &*self.view
    }

    /// Frame-space position of the window's top-left pixel.
    pub(crate) fn origin(&self) -> Point {
        self.origin
    }

    pub(crate) fn dimensions(&self) -> (u32, u32) {
        self.view.dimensions()
    }

    pub(crate) fn to_local(&self, p: Point) -> Point {
        p.offset(-self.origin.x, -self.origin.y)
    }

    pub(crate) fn to_frame(&self, p: Point) -> Point {
        p.offset(self.origin.x, self.origin.y)
    }
}
