//! Integer pixel coordinates and the few operations the solver needs on them.

/// Pixel coordinate in frame (or search-window) space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance in pixels.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Whether the point lies inside a `width x height` image.
    #[inline]
    pub fn in_bounds(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as i64) < width as i64 && (self.y as i64) < height as i64
    }

    /// Weighted blend `w * a + (1 - w) * b` per axis, rounded to the nearest pixel.
    pub(crate) fn blend(a: [f64; 2], b: Point, w: f64) -> Point {
        Point {
            x: (w * a[0] + (1.0 - w) * b.x as f64).round() as i32,
            y: (w * a[1] + (1.0 - w) * b.y as f64).round() as i32,
        }
    }

    /// Midpoint of two points, rounded to the nearest pixel.
    pub(crate) fn midpoint(a: Point, b: Point) -> Point {
        Point {
            x: (0.5 * (a.x + b.x) as f64).round() as i32,
            y: (0.5 * (a.y + b.y) as f64).round() as i32,
        }
    }
}
