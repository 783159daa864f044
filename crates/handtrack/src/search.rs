//! Greedy directional hill climb over mask coverage ("look-around").
//!
//! Each iteration scores a fixed set of neighbours of the current point and
//! moves to the best unvisited one as long as coverage does not drop. Equal
//! coverage still moves, which lets biased modes slide along elongated blobs.

use std::collections::HashSet;

use image::GrayImage;

use crate::coverage::coverage;
use crate::geometry::Point;
use crate::window::SearchWindow;

/// Directional bias of a look-around search.
///
/// `SearchLeft`/`SearchRight` refer to the subject's sides, which are mirrored
/// in the image: `SearchRight` moves toward decreasing x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    #[default]
    FreeSearch,
    SearchUp,
    SearchDown,
    SearchLeft,
    SearchRight,
}

const FREE_OFFSETS: [[i32; 2]; 8] = [
    [1, 1],
    [1, -1],
    [1, 0],
    [-1, 1],
    [-1, -1],
    [-1, 0],
    [0, 1],
    [0, -1],
];
const UP_OFFSETS: [[i32; 2]; 5] = [[-1, 0], [1, 0], [1, -1], [-1, -1], [0, -1]];
const DOWN_OFFSETS: [[i32; 2]; 5] = [[-1, 0], [1, 0], [1, 1], [-1, 1], [0, 1]];
const LEFT_OFFSETS: [[i32; 2]; 5] = [[0, 1], [0, -1], [1, 1], [1, -1], [1, 0]];
const RIGHT_OFFSETS: [[i32; 2]; 5] = [[0, 1], [0, -1], [-1, 1], [-1, -1], [-1, 0]];

impl SearchMode {
    /// Unit candidate offsets in evaluation order; ties go to the earliest entry.
    pub fn offsets(self) -> &'static [[i32; 2]] {
        match self {
            Self::FreeSearch => &FREE_OFFSETS,
            Self::SearchUp => &UP_OFFSETS,
            Self::SearchDown => &DOWN_OFFSETS,
            Self::SearchLeft => &LEFT_OFFSETS,
            Self::SearchRight => &RIGHT_OFFSETS,
        }
    }
}

/// Budget of one look-around call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LookAroundParams {
    pub max_iterations: usize,
    pub step_px: i32,
    pub radius_px: u32,
}

impl LookAroundParams {
    /// Half-size of a window that contains every reachable disk.
    fn window_half_extent(&self) -> u32 {
        let reach = self.max_iterations as u64 * self.step_px.max(0) as u64;
        (reach + self.radius_px as u64 + 1).min(u32::MAX as u64) as u32
    }
}

/// Result of a look-around search, in frame coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Final (locally coverage-maximal) point.
    pub point: Point,
    /// Coverage at `point`.
    pub coverage: f64,
    /// Accepted moves in order; its length is the number of iterations used.
    pub trail: Vec<Point>,
}

/// Climb from `start` toward higher coverage on `mask`.
pub(crate) fn look_around(
    mask: &GrayImage,
    start: Point,
    params: LookAroundParams,
    mode: SearchMode,
) -> SearchOutcome {
    let window = SearchWindow::around(mask, start, params.window_half_extent());
    let view = window.view();
    let (w, h) = window.dimensions();

    let mut current = window.to_local(start);
    let mut best = coverage(view, current, params.radius_px);
    let mut trail = Vec::new();

    if !current.in_bounds(w, h) {
        return SearchOutcome {
            point: start,
            coverage: best,
            trail,
        };
    }

    let mut visited: HashSet<Point> = HashSet::new();
    visited.insert(current);
    let offsets = mode.offsets();

    for _ in 0..params.max_iterations {
        let mut candidate: Option<(Point, f64)> = None;
        for &[ux, uy] in offsets {
            let p = current.offset(ux * params.step_px, uy * params.step_px);
            if !p.in_bounds(w, h) || visited.contains(&p) {
                continue;
            }
            let c = coverage(view, p, params.radius_px);
            if candidate.map_or(true, |(_, best_c)| c > best_c) {
                candidate = Some((p, c));
            }
        }

        let Some((p, c)) = candidate else {
            break;
        };
        if c < best {
            break;
        }
        best = c;
        current = p;
        visited.insert(p);
        trail.push(window.to_frame(p));
    }

    let point = window.to_frame(current);
    tracing::trace!(
        ?mode,
        steps = trail.len(),
        from = ?start,
        to = ?point,
        coverage = best,
        "look-around finished"
    );

    SearchOutcome {
        point,
        coverage: best,
        trail,
    }
}
