//! Acceptance of externally computed blob estimates.

use super::{BlobObservation, FrameContext, Hand};
use crate::blob::{BlobCategory, BlobInformation, EstimateCondition, EstimateInput};
use crate::geometry::Point;

impl Hand {
    /// Offer a blob-derived estimate for the current frame.
    ///
    /// Head-level blobs and forced estimates exempt the hand from being marked
    /// as intersecting this frame. When only a head is visible, the estimate is
    /// dropped unless the hand was last seen above the face threshold, so a lone
    /// face blob is not mistaken for a hand.
    pub fn set_estimate(
        &mut self,
        ctx: &mut FrameContext,
        estimate: Point,
        blob: &BlobInformation,
        force: bool,
        condition: EstimateCondition,
    ) {
        if blob.category == BlobCategory::High || force {
            ctx.ignore_intersect = true;
        }

        if condition == EstimateCondition::OnlyHead {
            let near_face = self
                .position
                .is_some_and(|p| p.y <= self.face_coverage_threshold_px);
            if !near_face {
                tracing::debug!(role = ?self.role, ?estimate, "only-head estimate rejected");
                return;
            }
        }

        self.observations.push(BlobObservation {
            estimate,
            blob: *blob,
        });
        ctx.estimate_updated = true;
    }

    /// [`Hand::set_estimate`] taking a bundled [`EstimateInput`].
    pub fn apply_estimate(&mut self, ctx: &mut FrameContext, input: &EstimateInput) {
        self.set_estimate(ctx, input.point, &input.blob, input.force, input.condition);
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{blob_around, hand};
    use super::super::{FrameInputs, HandRole};
    use super::*;
    use crate::test_utils::{disk_mask, filled_mask};

    #[test]
    fn normal_estimate_is_recorded() {
        let mut h = hand(HandRole::Left);
        let mut ctx = FrameContext::default();
        let p = Point::new(40, 300);
        let blob = blob_around(p, BlobCategory::Low);
        h.set_estimate(&mut ctx, p, &blob, false, EstimateCondition::Normal);
        assert!(ctx.estimate_updated());
        assert!(!ctx.ignore_intersect());
        assert_eq!(h.blob_estimate(), Some(p));
        assert_eq!(h.last_blob(), Some(blob));
    }

    #[test]
    fn high_blob_or_force_sets_ignore_intersect() {
        let mut h = hand(HandRole::Right);
        let p = Point::new(60, 60);

        let mut ctx = FrameContext::default();
        h.set_estimate(&mut ctx, p, &blob_around(p, BlobCategory::High), false, EstimateCondition::Normal);
        assert!(ctx.ignore_intersect());

        let mut ctx = FrameContext::default();
        h.set_estimate(&mut ctx, p, &blob_around(p, BlobCategory::Low), true, EstimateCondition::Normal);
        assert!(ctx.ignore_intersect());
    }

    #[test]
    fn only_head_rejected_when_hand_untracked() {
        let mut h = hand(HandRole::Left);
        let mut ctx = FrameContext::default();
        let p = Point::new(100, 80);
        h.set_estimate(&mut ctx, p, &blob_around(p, BlobCategory::High), false, EstimateCondition::OnlyHead);
        assert!(!ctx.estimate_updated());
        assert_eq!(h.position(), None);
        assert_eq!(h.blob_estimate(), None);
    }

    #[test]
    fn only_head_depends_on_last_vertical_position() {
        let skin = disk_mask(400, 400, Point::new(150, 300), 25);
        let motion = filled_mask(400, 400, 0);
        let frame = FrameInputs {
            skin_mask: &skin,
            motion_mask: &motion,
            blobs: &[],
        };
        let mut h = hand(HandRole::Left);
        let mut ctx = FrameContext::default();
        let low = Point::new(150, 300);
        h.set_estimate(&mut ctx, low, &blob_around(low, BlobCategory::Low), false, EstimateCondition::Normal);
        h.solve(&mut ctx, &frame);
        assert_eq!(h.position(), Some(low));

        // Below the face threshold (y grows downward): reject.
        let face = Point::new(200, 60);
        let mut ctx = FrameContext::default();
        h.set_estimate(&mut ctx, face, &blob_around(face, BlobCategory::High), false, EstimateCondition::OnlyHead);
        assert!(!ctx.estimate_updated());
        assert_eq!(h.blob_estimate(), Some(low));

        // Raising the threshold past the hand: accept.
        h.set_face_coverage_threshold(350);
        let mut ctx = FrameContext::default();
        h.set_estimate(&mut ctx, face, &blob_around(face, BlobCategory::High), false, EstimateCondition::OnlyHead);
        assert!(ctx.estimate_updated());
        assert_eq!(h.blob_estimate(), Some(face));
    }
}
