//! Tracker configuration.
//!
//! Physical quantities (cm, cm/s) are converted to pixel thresholds through
//! [`ScaleParams`]; everything else is expressed directly in pixels or as a
//! coverage fraction.

use std::path::Path;

/// Camera/scene scale constants.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScaleParams {
    /// Pixels per centimetre at the subject's distance.
    pub px_per_cm: f64,
    /// Maximum plausible hand speed (cm/s).
    pub max_velocity_cm_s: f64,
    /// Capture frame rate (frames/s).
    pub fps: f64,
    /// Image row below which a hand is no longer considered near the face.
    pub face_coverage_threshold_px: i32,
}

impl Default for ScaleParams {
    fn default() -> Self {
        Self {
            px_per_cm: 5.0,
            max_velocity_cm_s: 150.0,
            fps: 30.0,
            face_coverage_threshold_px: 200,
        }
    }
}

impl ScaleParams {
    /// Convert a physical length to whole pixels (truncating).
    #[inline]
    pub fn cm_to_px(&self, cm: f64) -> u32 {
        (cm * self.px_per_cm).max(0.0) as u32
    }

    /// Largest displacement a hand can plausibly make between two frames.
    ///
    /// Allows twice the configured maximum velocity.
    pub fn max_frame_displacement_px(&self) -> f64 {
        2.0 * self.max_velocity_cm_s * self.px_per_cm / self.fps
    }
}

/// Coverage gate used to accept or reject candidate points.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct QualityParams {
    /// Minimum coverage (exclusive) for a point to be trusted.
    pub gate: f64,
    /// Radius used for point quality checks when none is given (cm).
    pub default_radius_cm: f64,
}

impl Default for QualityParams {
    fn default() -> Self {
        Self {
            gate: 0.2,
            default_radius_cm: 5.0,
        }
    }
}

/// Recovery search around the last known (or predicted) position.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AreaSearchParams {
    pub radius_cm: f64,
    pub max_iterations: usize,
    pub step_px: i32,
}

impl Default for AreaSearchParams {
    fn default() -> Self {
        Self {
            radius_cm: 8.5,
            max_iterations: 10,
            step_px: 4,
        }
    }
}

/// Per-frame coverage refinement and search-mode selection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RefineParams {
    pub radius_cm: f64,
    pub max_iterations: usize,
    pub step_px: i32,
    /// Blobs shorter than this are searched freely.
    pub compact_blob_height_cm: f64,
    /// Medium blobs taller than this are searched downward.
    pub tall_blob_height_cm: f64,
}

impl Default for RefineParams {
    fn default() -> Self {
        Self {
            radius_cm: 5.0,
            max_iterations: 5,
            step_px: 3,
            compact_blob_height_cm: 15.0,
            tall_blob_height_cm: 40.0,
        }
    }
}

/// One motion band of the temporal smoother.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SmoothingTier {
    /// Applies while motion coverage is strictly below this value.
    pub below: f64,
    /// Weight of the history average; the fresh position gets `1 - weight`.
    pub history_weight: f64,
}

/// Motion-adaptive blending with the recent position average.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SmoothingParams {
    /// Number of history entries averaged.
    pub window: usize,
    /// Radius for motion coverage (pixels).
    pub motion_radius_px: u32,
    /// Bands ordered by increasing `below`; above the last band no blending happens.
    pub tiers: Vec<SmoothingTier>,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        Self {
            window: 5,
            motion_radius_px: 30,
            tiers: vec![
                SmoothingTier {
                    below: 0.001,
                    history_weight: 0.95,
                },
                SmoothingTier {
                    below: 0.05,
                    history_weight: 0.8,
                },
                SmoothingTier {
                    below: 0.2,
                    history_weight: 0.5,
                },
            ],
        }
    }
}

/// Two-hand proximity handling.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct IntersectionParams {
    /// Below this distance the hands are intersecting (cm).
    /// Up to twice this distance a gentle push is applied.
    pub min_distance_cm: f64,
    pub forced_iterations: usize,
    pub gentle_iterations: usize,
}

impl Default for IntersectionParams {
    fn default() -> Self {
        Self {
            min_distance_cm: 8.0,
            forced_iterations: 20,
            gentle_iterations: 5,
        }
    }
}

/// Full configuration shared by both hands.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub scale: ScaleParams,
    /// Capacity of the position and blob histories.
    pub history_size: usize,
    pub quality: QualityParams,
    pub area_search: AreaSearchParams,
    pub refine: RefineParams,
    pub smoothing: SmoothingParams,
    pub intersection: IntersectionParams,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            scale: ScaleParams::default(),
            history_size: 10,
            quality: QualityParams::default(),
            area_search: AreaSearchParams::default(),
            refine: RefineParams::default(),
            smoothing: SmoothingParams::default(),
            intersection: IntersectionParams::default(),
        }
    }
}

impl TrackerConfig {
    /// Load a configuration overlay from JSON; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let config: TrackerConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency.
    pub fn validate(&self) -> Result<(), String> {
        let s = &self.scale;
        for (name, v) in [
            ("scale.px_per_cm", s.px_per_cm),
            ("scale.max_velocity_cm_s", s.max_velocity_cm_s),
            ("scale.fps", s.fps),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(format!("{name} must be finite and > 0"));
            }
        }

        if self.history_size < 3 {
            return Err("history_size must be >= 3".to_string());
        }
        if self.smoothing.window == 0 || self.smoothing.window > self.history_size {
            return Err(format!(
                "smoothing.window must be in [1, history_size={}]",
                self.history_size
            ));
        }

        if !(self.quality.gate > 0.0 && self.quality.gate <= 1.0) {
            return Err("quality.gate must be in (0, 1]".to_string());
        }

        for (name, step) in [
            ("area_search.step_px", self.area_search.step_px),
            ("refine.step_px", self.refine.step_px),
        ] {
            if step <= 0 {
                return Err(format!("{name} must be > 0"));
            }
        }

        let mut prev = f64::NEG_INFINITY;
        for tier in &self.smoothing.tiers {
            if !tier.below.is_finite() || tier.below <= prev {
                return Err("smoothing.tiers must have strictly increasing thresholds".to_string());
            }
            if !(0.0..=1.0).contains(&tier.history_weight) {
                return Err("smoothing tier weights must be in [0, 1]".to_string());
            }
            prev = tier.below;
        }

        if self.refine.compact_blob_height_cm > self.refine.tall_blob_height_cm {
            return Err(
                "refine.compact_blob_height_cm must be <= refine.tall_blob_height_cm".to_string(),
            );
        }
        Ok(())
    }
}
