//! handtrack: temporally stable 2D hand positions from skin, blob and motion masks.
//!
//! Inputs per frame come from external stages: a binary skin mask, a list of
//! classified skin blobs, a motion-intensity mask and, optionally, a
//! blob-derived estimate for each hand. The solver turns these into one
//! jitter-free position per hand:
//!
//! 1. **Fusion**: accept or reject the blob-derived estimate.
//! 2. **Recovery**: area search from the last position, or from a
//!    velocity-based prediction, when the estimate is missing or implausible.
//! 3. **Refinement**: greedy directional hill climb on circular skin coverage,
//!    biased by the category of the blob holding the hand.
//! 4. **Smoothing**: motion-adaptive blend with the recent position average.
//! 5. **Intersection**: push the hands apart when their estimates collide.
//!
//! # Public API
//! - [`HandTracker`] runs both hands frame by frame.
//! - [`Hand`] exposes the single-hand solver for callers driving the stages
//!   themselves.
//! - [`TrackerConfig`] holds every threshold and scale constant.

mod blob;
mod config;
mod coverage;
mod geometry;
mod hand;
mod history;
mod search;
mod tracker;
mod window;

#[cfg(test)]
mod test_utils;

pub use blob::{BlobCategory, BlobInformation, EstimateCondition, EstimateInput};
pub use config::{
    AreaSearchParams, IntersectionParams, QualityParams, RefineParams, ScaleParams,
    SmoothingParams, SmoothingTier, TrackerConfig,
};
pub use geometry::Point;
pub use hand::{
    FrameContext, FrameInputs, Hand, HandRole, IntersectionOutcome, Recovery, SolveReport,
};
pub use history::History;
pub use search::{SearchMode, SearchOutcome};
pub use tracker::{FrameResult, HandTracker};

/// Fraction of "on" mask intensity in the disk of `radius` pixels around `point`.
///
/// Evaluated on a window just large enough for the disk. Returns a value in
/// `[0, 1]`; points outside the mask score `0`.
pub fn point_coverage(mask: &image::GrayImage, point: Point, radius: u32) -> f64 {
    coverage::quality(mask, point, radius)
}

/// Run a single look-around search from `start` on `mask`.
///
/// Useful for tuning search budgets outside the full solver.
pub fn look_around(
    mask: &image::GrayImage,
    start: Point,
    mode: SearchMode,
    max_iterations: usize,
    step_px: i32,
    radius_px: u32,
) -> SearchOutcome {
    search::look_around(
        mask,
        start,
        search::LookAroundParams {
            max_iterations,
            step_px,
            radius_px,
        },
        mode,
    )
}
