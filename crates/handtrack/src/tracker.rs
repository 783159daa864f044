//! Two-hand orchestration: fusion → solve → intersection, once per frame.

use crate::blob::EstimateInput;
use crate::config::TrackerConfig;
use crate::geometry::Point;
use crate::hand::{FrameContext, FrameInputs, Hand, HandRole, IntersectionOutcome, SolveReport};

/// Positions reported for one frame.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameResult {
    pub frame_index: u64,
    /// Left hand position; `None` means "hand missing".
    pub left: Option<Point>,
    pub right: Option<Point>,
    pub left_intersecting: bool,
    pub right_intersecting: bool,
}

/// Tracks the subject's left and right hand.
///
/// Create once, feed every frame in order.
///
/// # Examples
///
/// ```
/// use handtrack::{FrameInputs, HandTracker, TrackerConfig};
/// use image::GrayImage;
///
/// let skin = GrayImage::new(320, 240);
/// let motion = GrayImage::new(320, 240);
/// let mut tracker = HandTracker::new(TrackerConfig::default());
/// let frame = FrameInputs { skin_mask: &skin, motion_mask: &motion, blobs: &[] };
/// let result = tracker.track(&frame, None, None);
/// assert!(result.left.is_none() && result.right.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct HandTracker {
    left: Hand,
    right: Hand,
    frame_index: u64,
}

impl HandTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            left: Hand::new(HandRole::Left, config.clone()),
            right: Hand::new(HandRole::Right, config),
            frame_index: 0,
        }
    }

    pub fn left(&self) -> &Hand {
        &self.left
    }

    pub fn right(&self) -> &Hand {
        &self.right
    }

    /// Number of frames processed so far.
    pub fn frames_processed(&self) -> u64 {
        self.frame_index
    }

    /// Forward the current face threshold (image row) to both hands.
    pub fn set_face_coverage_threshold(&mut self, px: i32) {
        self.left.set_face_coverage_threshold(px);
        self.right.set_face_coverage_threshold(px);
    }

    /// Process one frame.
    ///
    /// Both hands are solved before either is checked for intersection, and the
    /// resolver sees the other hand's position as it was right after solving.
    pub fn track(
        &mut self,
        frame: &FrameInputs<'_>,
        left_estimate: Option<&EstimateInput>,
        right_estimate: Option<&EstimateInput>,
    ) -> FrameResult {
        let mut left_ctx = FrameContext::default();
        let mut right_ctx = FrameContext::default();
        if let Some(est) = left_estimate {
            self.left.apply_estimate(&mut left_ctx, est);
        }
        if let Some(est) = right_estimate {
            self.right.apply_estimate(&mut right_ctx, est);
        }

        let left_report = self.left.solve(&mut left_ctx, frame);
        let right_report = self.right.solve(&mut right_ctx, frame);

        let left_solved = self.left.position();
        let right_solved = self.right.position();
        let left_outcome = self
            .left
            .handle_intersection(left_ctx, right_solved, frame.skin_mask);
        let right_outcome = self
            .right
            .handle_intersection(right_ctx, left_solved, frame.skin_mask);

        log_frame(self.frame_index, &left_report, &right_report, left_outcome, right_outcome);

        let result = FrameResult {
            frame_index: self.frame_index,
            left: self.left.position(),
            right: self.right.position(),
            left_intersecting: self.left.is_intersecting(),
            right_intersecting: self.right.is_intersecting(),
        };
        self.frame_index += 1;
        result
    }
}

fn log_frame(
    frame_index: u64,
    left: &SolveReport,
    right: &SolveReport,
    left_outcome: IntersectionOutcome,
    right_outcome: IntersectionOutcome,
) {
    tracing::debug!(
        frame_index,
        left_recovery = ?left.recovery,
        right_recovery = ?right.recovery,
        ?left_outcome,
        ?right_outcome,
        "frame tracked"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::{BlobCategory, BlobInformation, EstimateCondition};
    use crate::test_utils::{add_disk, filled_mask};

    fn estimate(p: Point) -> EstimateInput {
        EstimateInput {
            point: p,
            blob: BlobInformation::from_bounds(p.x - 25, p.y - 25, p.x + 25, p.y + 25, BlobCategory::Medium),
            force: false,
            condition: EstimateCondition::Normal,
        }
    }

    #[test]
    fn separated_hands_are_tracked_independently() {
        let l = Point::new(420, 300);
        let r = Point::new(180, 300);
        let mut skin = filled_mask(640, 480, 0);
        add_disk(&mut skin, l, 25);
        add_disk(&mut skin, r, 25);
        let motion = filled_mask(640, 480, 0);
        let frame = FrameInputs {
            skin_mask: &skin,
            motion_mask: &motion,
            blobs: &[],
        };

        let mut tracker = HandTracker::new(TrackerConfig::default());
        let mut last = None;
        for _ in 0..8 {
            last = Some(tracker.track(&frame, Some(&estimate(l)), Some(&estimate(r))));
        }
        let result = last.expect("frames tracked");
        assert_eq!(result.frame_index, 7);
        assert_eq!(result.left, Some(l));
        assert_eq!(result.right, Some(r));
        assert!(!result.left_intersecting && !result.right_intersecting);
        assert_eq!(tracker.frames_processed(), 8);
    }

    #[test]
    fn coincident_estimates_flag_both_hands() {
        let p = Point::new(320, 240);
        let mut skin = filled_mask(640, 480, 0);
        add_disk(&mut skin, p, 60);
        let motion = filled_mask(640, 480, 255);
        let frame = FrameInputs {
            skin_mask: &skin,
            motion_mask: &motion,
            blobs: &[],
        };

        let mut tracker = HandTracker::new(TrackerConfig::default());
        let result = tracker.track(&frame, Some(&estimate(p)), Some(&estimate(p)));
        assert!(result.left_intersecting);
        assert!(result.right_intersecting);
        let (lp, rp) = (result.left.expect("left"), result.right.expect("right"));
        // Both solved to the same point, then were pushed to their own sides.
        assert!(lp.x > rp.x, "left {lp:?}, right {rp:?}");
    }

    #[test]
    fn missing_hands_are_reported_as_none() {
        let skin = filled_mask(320, 240, 0);
        let motion = filled_mask(320, 240, 0);
        let frame = FrameInputs {
            skin_mask: &skin,
            motion_mask: &motion,
            blobs: &[],
        };
        let mut tracker = HandTracker::new(TrackerConfig::default());
        let result = tracker.track(&frame, None, None);
        assert_eq!(result.left, None);
        assert_eq!(result.right, None);
        let json = serde_json::to_string(&result).expect("serialize");
        assert!(json.contains("\"left\":null"));
    }

    #[test]
    fn face_threshold_reaches_both_hands() {
        let mut tracker = HandTracker::new(TrackerConfig::default());
        tracker.set_face_coverage_threshold(123);
        assert_eq!(tracker.left().face_coverage_threshold(), 123);
        assert_eq!(tracker.right().face_coverage_threshold(), 123);
    }
}
