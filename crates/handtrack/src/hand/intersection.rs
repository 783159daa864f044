//! Repulsion between the two tracked hands.

use image::GrayImage;

use super::{FrameContext, Hand};
use crate::geometry::Point;

/// How the resolver treated this hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionOutcome {
    /// One of the hands is untracked.
    Untracked,
    /// Far enough apart.
    Clear,
    /// Close: nudged toward this hand's side without flagging.
    Gentle,
    /// Overlapping: flagged as intersecting and pushed with the wide budget.
    Forced,
}

impl Hand {
    /// Push this hand away from `other` when the two estimates collide.
    ///
    /// Consumes the frame context; estimates from head-level blobs or forced
    /// estimates keep the hand from being flagged as intersecting.
    pub fn handle_intersection(
        &mut self,
        ctx: FrameContext,
        other: Option<Point>,
        skin_mask: &GrayImage,
    ) -> IntersectionOutcome {
        let (Some(pos), Some(other)) = (self.position, other) else {
            self.intersecting = false;
            return IntersectionOutcome::Untracked;
        };

        self.intersecting = false;
        let min_distance = self.config.intersection.min_distance_cm * self.config.scale.px_per_cm;
        let distance = pos.distance(other).max(1.0);
        let bias = self.role.intersection_bias();

        let outcome = if distance < min_distance {
            self.intersecting = true;
            let budget = self.config.intersection.forced_iterations;
            self.position = Some(self.refine(skin_mask, pos, bias, budget));
            IntersectionOutcome::Forced
        } else if distance < 2.0 * min_distance {
            let budget = self.config.intersection.gentle_iterations;
            self.position = Some(self.refine(skin_mask, pos, bias, budget));
            IntersectionOutcome::Gentle
        } else {
            IntersectionOutcome::Clear
        };

        if ctx.ignore_intersect {
            self.intersecting = false;
        }

        if outcome != IntersectionOutcome::Clear {
            tracing::debug!(
                role = ?self.role,
                distance,
                ?outcome,
                intersecting = self.intersecting,
                "hands close"
            );
        }
        outcome
    }
}
