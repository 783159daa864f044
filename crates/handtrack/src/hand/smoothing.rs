//! Motion-adaptive temporal smoothing of the refined position.

use image::GrayImage;

use super::Hand;
use crate::coverage::quality;
use crate::geometry::Point;

impl Hand {
    /// Blend `current` toward the mean of the recent history.
    ///
    /// The less motion around `current`, the more the history average wins.
    /// Returns the smoothed point and the history weight used, if any. No
    /// blending happens until the averaging window is fully populated.
    pub(crate) fn improve_using_history(&self, current: Point, motion: &GrayImage) -> (Point, Option<f64>) {
        let params = &self.config.smoothing;
        let Some(recent) = self.positions.recent(params.window) else {
            return (current, None);
        };
        if recent.is_empty() {
            return (current, None);
        }

        let n = recent.len() as f64;
        let avg = [
            recent.iter().map(|p| p.x as f64).sum::<f64>() / n,
            recent.iter().map(|p| p.y as f64).sum::<f64>() / n,
        ];

        let motion_coverage = quality(motion, current, params.motion_radius_px);
        let Some(tier) = params.tiers.iter().find(|t| motion_coverage < t.below) else {
            return (current, None);
        };

        tracing::trace!(
            role = ?self.role,
            motion_coverage,
            history_weight = tier.history_weight,
            "smoothing with history"
        );
        (Point::blend(avg, current, tier.history_weight), Some(tier.history_weight))
    }

    /// Replace the second-newest history entry by the midpoint of its neighbours.
    pub(crate) fn backfill_midpoint(&mut self) {
        let (Some(newest), Some(third)) = (self.positions.back(0), self.positions.back(2)) else {
            return;
        };
        self.positions.set_back(1, Point::midpoint(newest, third));
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::hand;
    use super::super::HandRole;
    use super::*;
    use crate::test_utils::{disk_mask, filled_mask};

    fn hand_with_history(points: &[Point]) -> Hand {
        let mut h = hand(HandRole::Left);
        for &p in points {
            h.positions.push(p);
        }
        h
    }

    #[test]
    fn static_hand_stays_put() {
        let p = Point::new(100, 100);
        let h = hand_with_history(&[p; 5]);
        let motion = filled_mask(200, 200, 0);
        let (out, weight) = h.improve_using_history(p, &motion);
        assert_eq!(out, p);
        assert_eq!(weight, Some(0.95));
    }

    #[test]
    fn incomplete_history_disables_smoothing() {
        let h = hand_with_history(&[Point::new(100, 100); 4]);
        let motion = filled_mask(200, 200, 0);
        let (out, weight) = h.improve_using_history(Point::new(140, 100), &motion);
        assert_eq!(out, Point::new(140, 100));
        assert_eq!(weight, None);
    }

    #[test]
    fn motion_tiers_select_blend_weight() {
        let h = hand_with_history(&[Point::new(100, 100); 5]);
        let current = Point::new(200, 100);

        // No motion: 95% history.
        let still = filled_mask(300, 300, 0);
        assert_eq!(h.improve_using_history(current, &still).0, Point::new(105, 100));

        // Uniform low motion (2%): 80% history.
        let low = filled_mask(300, 300, 5);
        assert_eq!(h.improve_using_history(current, &low).0, Point::new(120, 100));

        // Moderate motion (10%): 50/50.
        let moderate = filled_mask(300, 300, 26);
        assert_eq!(h.improve_using_history(current, &moderate).0, Point::new(150, 100));

        // Strong motion: keep the fresh position.
        let strong = disk_mask(300, 300, current, 40);
        assert_eq!(h.improve_using_history(current, &strong), (current, None));
    }

    #[test]
    fn midpoint_backfill_smooths_corner() {
        let mut h = hand_with_history(&[Point::new(0, 0), Point::new(10, 30), Point::new(20, 0)]);
        h.backfill_midpoint();
        assert_eq!(h.positions.back(1), Some(Point::new(10, 0)));
        assert_eq!(h.positions.back(0), Some(Point::new(20, 0)));
        assert_eq!(h.positions.back(2), Some(Point::new(0, 0)));
    }

    #[test]
    fn midpoint_backfill_needs_third_point() {
        let mut h = hand_with_history(&[Point::new(10, 30), Point::new(20, 0)]);
        h.backfill_midpoint();
        assert_eq!(h.positions.back(1), Some(Point::new(10, 30)));
    }
}
