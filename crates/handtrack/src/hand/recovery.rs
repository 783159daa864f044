//! Recovery when the fresh estimate is missing or implausible.
//!
//! First an area search is run from the last stored position. If that point
//! is not skin-covered enough to search from, the position is extrapolated
//! from the last three history entries and the area search is anchored there.

use image::GrayImage;

use super::{FrameContext, Hand};
use crate::geometry::Point;
use crate::search::{look_around, LookAroundParams, SearchMode};

/// Recovery path taken by one `solve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// No stored position yet, or the hand was intersecting last frame.
    Skipped,
    /// The fresh estimate is consistent with the last position.
    NotNeeded,
    /// Area search from the last position moved the hand.
    AreaSearch,
    /// Area search from an extrapolated position moved the hand.
    Prediction,
    /// Neither the last nor a predicted position passed the quality gate.
    Unrecovered,
}

/// Outcome of a single area-search attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AreaSearch {
    /// Displacement was plausible and a fresh estimate exists.
    NotTriggered,
    /// Triggered, but the reference point failed the quality gate.
    GateFailed,
    Searched,
}

impl Hand {
    pub(super) fn recover(&mut self, ctx: &FrameContext, mask: &GrayImage) -> Recovery {
        let Some(last) = self.positions.latest() else {
            return Recovery::Skipped;
        };
        if self.intersecting {
            return Recovery::Skipped;
        }

        match self.improve_by_area_search(ctx, mask, last) {
            AreaSearch::NotTriggered => Recovery::NotNeeded,
            AreaSearch::Searched => Recovery::AreaSearch,
            AreaSearch::GateFailed => {
                let Some(predicted) = self.predicted_position(mask) else {
                    tracing::debug!(role = ?self.role, "no usable prediction");
                    return Recovery::Unrecovered;
                };
                match self.improve_by_area_search(ctx, mask, predicted) {
                    AreaSearch::Searched => Recovery::Prediction,
                    AreaSearch::NotTriggered => Recovery::NotNeeded,
                    AreaSearch::GateFailed => Recovery::Unrecovered,
                }
            }
        }
    }

    /// Search the neighbourhood of `reference` for the hand.
    ///
    /// Only runs when the current position jumped further than the hand can
    /// plausibly move in one frame, or no fresh estimate was accepted.
    pub(crate) fn improve_by_area_search(
        &mut self,
        ctx: &FrameContext,
        mask: &GrayImage,
        reference: Point,
    ) -> AreaSearch {
        let displacement = self
            .position
            .map_or(f64::INFINITY, |p| reference.distance(p));
        let max_displacement = self.config.scale.max_frame_displacement_px();

        if displacement <= max_displacement && ctx.estimate_updated {
            return AreaSearch::NotTriggered;
        }

        let q = self.point_quality(mask, reference);
        if q <= self.config.quality.gate {
            tracing::debug!(
                role = ?self.role,
                ?reference,
                quality = q,
                "area search skipped by quality gate"
            );
            return AreaSearch::GateFailed;
        }

        let params = LookAroundParams {
            max_iterations: self.config.area_search.max_iterations,
            step_px: self.config.area_search.step_px,
            radius_px: self.config.scale.cm_to_px(self.config.area_search.radius_cm),
        };
        let outcome = look_around(mask, reference, params, SearchMode::FreeSearch);
        self.position = Some(outcome.point);
        AreaSearch::Searched
    }

    /// Extrapolate the next position from the last three stored positions.
    ///
    /// Compares a pure linear step with a step using the mean of the last two
    /// displacements and keeps the better-covered one, provided it passes the
    /// quality gate.
    pub(crate) fn predicted_position(&self, mask: &GrayImage) -> Option<Point> {
        let p1 = self.positions.back(0)?;
        let p2 = self.positions.back(1)?;
        let p3 = self.positions.back(2)?;

        let d1 = (p1.x - p2.x, p1.y - p2.y);
        let d2 = (p2.x - p3.x, p2.y - p3.y);

        let linear = p1.offset(d1.0, d1.1);
        let averaged = p1.offset((d1.0 + d2.0) / 2, (d1.1 + d2.1) / 2);

        let q_linear = self.point_quality(mask, linear);
        let q_averaged = self.point_quality(mask, averaged);
        let (best, q) = if q_averaged > q_linear {
            (averaged, q_averaged)
        } else {
            (linear, q_linear)
        };

        if q > self.config.quality.gate {
            tracing::debug!(role = ?self.role, predicted = ?best, quality = q, "using prediction");
            Some(best)
        } else {
            None
        }
    }
}
