//! Blob records produced by the external blob-extraction stage.
//!
//! The solver only reads these: bounding extremes decide which blob holds the
//! hand, the vertical category biases the local search direction.

use crate::geometry::Point;

/// Vertical position class of a skin blob relative to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlobCategory {
    /// Torso / lap level.
    #[default]
    Low,
    Medium,
    /// Head / face level.
    High,
}

/// Bounding extremes and category of one connected skin region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct BlobInformation {
    /// Leftmost point of the region.
    pub left: Point,
    /// Rightmost point of the region.
    pub right: Point,
    /// Topmost point of the region.
    pub top: Point,
    /// Bottommost point of the region.
    pub bottom: Point,
    pub category: BlobCategory,
}

impl BlobInformation {
    /// Build a blob from an axis-aligned box; extremes sit at the box edge midpoints.
    pub fn from_bounds(x0: i32, y0: i32, x1: i32, y1: i32, category: BlobCategory) -> Self {
        let cx = (x0 + x1) / 2;
        let cy = (y0 + y1) / 2;
        Self {
            left: Point::new(x0, cy),
            right: Point::new(x1, cy),
            top: Point::new(cx, y0),
            bottom: Point::new(cx, y1),
            category,
        }
    }

    /// Inclusive bounding-box containment test.
    pub fn contains(&self, p: Point) -> bool {
        self.left.x <= p.x && self.right.x >= p.x && self.top.y <= p.y && self.bottom.y >= p.y
    }

    /// Vertical extent in pixels.
    pub fn height(&self) -> i32 {
        self.bottom.y - self.top.y
    }
}

/// Scene condition reported alongside a blob-derived estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateCondition {
    #[default]
    Normal,
    /// Only a head-like blob is visible in the frame.
    OnlyHead,
}

/// A blob-derived hand estimate pushed into the tracker for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EstimateInput {
    /// Candidate hand position in frame pixels.
    pub point: Point,
    /// Blob the candidate was derived from.
    pub blob: BlobInformation,
    /// Accept the estimate even if it conflicts with the other hand.
    #[serde(default)]
    pub force: bool,
    #[serde(default)]
    pub condition: EstimateCondition,
}
