//! Single-hand position solver.
//!
//! Per frame the caller:
//! 1. creates a fresh [`FrameContext`],
//! 2. optionally pushes a blob-derived estimate ([`Hand::set_estimate`]),
//! 3. runs [`Hand::solve`] against the frame's masks and blobs,
//! 4. once both hands are solved, runs [`Hand::handle_intersection`] with the
//!    other hand's position, handing over the context.
//!
//! `solve` itself chains: estimate adoption → recovery (area search, then
//! prediction) → search-mode selection → coverage refinement → temporal
//! smoothing → history update.

mod fusion;
mod intersection;
mod mode;
mod recovery;
mod smoothing;

use image::GrayImage;

use crate::blob::BlobInformation;
use crate::config::TrackerConfig;
use crate::coverage::quality;
use crate::geometry::Point;
use crate::history::History;
use crate::search::{look_around, LookAroundParams, SearchMode};

pub use intersection::IntersectionOutcome;
pub use recovery::Recovery;

/// Which of the subject's hands is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandRole {
    Left,
    Right,
}

impl HandRole {
    /// Direction a hand is pushed toward when it collides with the other one.
    pub fn intersection_bias(self) -> SearchMode {
        match self {
            Self::Left => SearchMode::SearchLeft,
            Self::Right => SearchMode::SearchRight,
        }
    }
}

/// Per-frame scratch state of one hand.
///
/// Start every frame from `FrameContext::default()`; the context is consumed
/// by [`Hand::handle_intersection`], so nothing leaks into the next frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameContext {
    estimate_updated: bool,
    ignore_intersect: bool,
}

impl FrameContext {
    /// A blob estimate was accepted and not yet consumed by `solve`.
    pub fn estimate_updated(&self) -> bool {
        self.estimate_updated
    }

    /// Proximity to the other hand must not mark this hand as intersecting.
    pub fn ignore_intersect(&self) -> bool {
        self.ignore_intersect
    }
}

/// Read-only inputs of one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs<'a> {
    /// Binary skin mask (0 / 255).
    pub skin_mask: &'a GrayImage,
    /// Motion intensity mask, same size as `skin_mask`.
    pub motion_mask: &'a GrayImage,
    pub blobs: &'a [BlobInformation],
}

/// What one `solve` call did.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub recovery: Recovery,
    /// Mode used for coverage refinement; `None` when the hand is untracked.
    pub search_mode: Option<SearchMode>,
    /// History weight applied by the smoother, if it blended at all.
    pub history_weight: Option<f64>,
    pub position: Option<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BlobObservation {
    estimate: Point,
    blob: BlobInformation,
}

/// Tracking state of one hand.
#[derive(Debug, Clone)]
pub struct Hand {
    role: HandRole,
    config: TrackerConfig,
    face_coverage_threshold_px: i32,
    position: Option<Point>,
    positions: History<Point>,
    observations: History<BlobObservation>,
    /// Set by the intersection resolver; suppresses recovery on the next frame.
    intersecting: bool,
}

impl Hand {
    pub fn new(role: HandRole, config: TrackerConfig) -> Self {
        let capacity = config.history_size;
        Self {
            role,
            face_coverage_threshold_px: config.scale.face_coverage_threshold_px,
            config,
            position: None,
            positions: History::new(capacity),
            observations: History::new(capacity),
            intersecting: false,
        }
    }

    pub fn role(&self) -> HandRole {
        self.role
    }

    /// Current best estimate; `None` while the hand is untracked.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn is_intersecting(&self) -> bool {
        self.intersecting
    }

    pub fn position_history(&self) -> &History<Point> {
        &self.positions
    }

    /// Most recently accepted blob estimate.
    pub fn blob_estimate(&self) -> Option<Point> {
        self.observations.latest().map(|o| o.estimate)
    }

    /// Blob the most recent accepted estimate came from.
    pub fn last_blob(&self) -> Option<BlobInformation> {
        self.observations.latest().map(|o| o.blob)
    }

    /// Stored trajectory, oldest first.
    pub fn trace(&self) -> Vec<Point> {
        self.positions.oldest_first()
    }

    pub fn face_coverage_threshold(&self) -> i32 {
        self.face_coverage_threshold_px
    }

    /// Update the image row separating "near the face" from "below the face".
    pub fn set_face_coverage_threshold(&mut self, px: i32) {
        self.face_coverage_threshold_px = px;
    }

    /// Refine the position for the current frame.
    pub fn solve(&mut self, ctx: &mut FrameContext, frame: &FrameInputs<'_>) -> SolveReport {
        if ctx.estimate_updated {
            if let Some(obs) = self.observations.latest() {
                self.position = Some(obs.estimate);
            }
        }

        let recovery = self.recover(ctx, frame.skin_mask);

        let mut search_mode = None;
        let mut history_weight = None;
        if let Some(pos) = self.position {
            let mode = self.search_mode_from_blobs(pos, frame.blobs);
            let refined = self.refine(frame.skin_mask, pos, mode, self.config.refine.max_iterations);
            let (smoothed, weight) = self.improve_using_history(refined, frame.motion_mask);

            self.position = Some(smoothed);
            self.positions.push(smoothed);
            self.backfill_midpoint();

            search_mode = Some(mode);
            history_weight = weight;
        }

        ctx.estimate_updated = false;

        let report = SolveReport {
            recovery,
            search_mode,
            history_weight,
            position: self.position,
        };
        tracing::debug!(role = ?self.role, ?report, "solved hand");
        report
    }

    /// Coverage refinement with the per-frame radius and step.
    fn refine(&self, mask: &GrayImage, start: Point, mode: SearchMode, max_iterations: usize) -> Point {
        let params = LookAroundParams {
            max_iterations,
            step_px: self.config.refine.step_px,
            radius_px: self.config.scale.cm_to_px(self.config.refine.radius_cm),
        };
        look_around(mask, start, params, mode).point
    }

    /// Coverage at `point` with the default quality radius.
    fn point_quality(&self, mask: &GrayImage, point: Point) -> f64 {
        let radius = self.config.scale.cm_to_px(self.config.quality.default_radius_cm);
        quality(mask, point, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::{BlobCategory, EstimateCondition};
    use crate::test_utils::{disk_mask, filled_mask};

    pub(super) fn hand(role: HandRole) -> Hand {
        Hand::new(role, TrackerConfig::default())
    }

    pub(super) fn blob_around(p: Point, category: BlobCategory) -> BlobInformation {
        BlobInformation::from_bounds(p.x - 20, p.y - 20, p.x + 20, p.y + 20, category)
    }

    /// Run a full frame with an accepted estimate at `p`.
    pub(super) fn solve_with_estimate(
        hand: &mut Hand,
        frame: &FrameInputs<'_>,
        p: Point,
    ) -> (FrameContext, SolveReport) {
        let mut ctx = FrameContext::default();
        let blob = blob_around(p, BlobCategory::Medium);
        hand.set_estimate(&mut ctx, p, &blob, false, EstimateCondition::Normal);
        let report = hand.solve(&mut ctx, frame);
        (ctx, report)
    }

    #[test]
    fn untracked_hand_stays_untracked_without_estimate() {
        let skin = filled_mask(200, 200, 0);
        let motion = filled_mask(200, 200, 0);
        let frame = FrameInputs {
            skin_mask: &skin,
            motion_mask: &motion,
            blobs: &[],
        };
        let mut h = hand(HandRole::Left);
        let mut ctx = FrameContext::default();
        let report = h.solve(&mut ctx, &frame);
        assert_eq!(report.position, None);
        assert_eq!(report.recovery, Recovery::Skipped);
        assert_eq!(h.position_history().latest(), None);
    }

    #[test]
    fn accepted_estimate_becomes_position_and_resets_flag() {
        let center = Point::new(100, 120);
        let skin = disk_mask(240, 240, center, 25);
        let motion = filled_mask(240, 240, 0);
        let frame = FrameInputs {
            skin_mask: &skin,
            motion_mask: &motion,
            blobs: &[],
        };
        let mut h = hand(HandRole::Right);
        let (ctx, report) = solve_with_estimate(&mut h, &frame, center);
        assert!(!ctx.estimate_updated());
        assert_eq!(report.position, Some(center));
        assert_eq!(report.search_mode, Some(SearchMode::FreeSearch));
        assert_eq!(h.position_history().latest(), Some(center));
        assert_eq!(h.blob_estimate(), Some(center));
    }

    #[test]
    fn repeated_solves_converge() {
        let center = Point::new(120, 110);
        let skin = disk_mask(240, 240, center, 25);
        let motion = filled_mask(240, 240, 0);
        let frame = FrameInputs {
            skin_mask: &skin,
            motion_mask: &motion,
            blobs: &[],
        };
        let mut h = hand(HandRole::Left);
        // Start slightly off-centre so the first frames have something to do.
        for _ in 0..6 {
            solve_with_estimate(&mut h, &frame, Point::new(126, 104));
        }
        let mut ctx = FrameContext::default();
        let first = h.solve(&mut ctx, &frame).position.expect("tracked");
        let mut ctx = FrameContext::default();
        let second = h.solve(&mut ctx, &frame).position.expect("tracked");
        assert!(second.distance(first) <= 2.0, "{first:?} -> {second:?}");
        assert!(second.distance(center) <= 6.0, "drifted to {second:?}");
    }

    #[test]
    fn trace_lists_positions_oldest_first() {
        let skin = filled_mask(300, 300, 255);
        let motion = filled_mask(300, 300, 255);
        let frame = FrameInputs {
            skin_mask: &skin,
            motion_mask: &motion,
            blobs: &[],
        };
        let mut h = hand(HandRole::Left);
        let (_, first) = solve_with_estimate(&mut h, &frame, Point::new(150, 150));
        let (_, second) = solve_with_estimate(&mut h, &frame, Point::new(150, 150));
        let trace = h.trace();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0], first.position.expect("tracked"));
        assert_eq!(trace[1], second.position.expect("tracked"));
    }

    #[test]
    fn roles_push_in_opposite_directions() {
        assert_eq!(HandRole::Left.intersection_bias(), SearchMode::SearchLeft);
        assert_eq!(HandRole::Right.intersection_bias(), SearchMode::SearchRight);
    }
}
