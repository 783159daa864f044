//! Recorded session manifest: mask image paths and per-frame blob records.

use handtrack::{BlobInformation, EstimateInput};
use image::GrayImage;
use std::path::{Path, PathBuf};

/// One recorded frame.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SessionFrame {
    /// Skin mask image, relative to the manifest directory.
    pub skin_mask: PathBuf,
    /// Motion mask image, relative to the manifest directory.
    pub motion_mask: PathBuf,
    #[serde(default)]
    pub blobs: Vec<BlobInformation>,
    #[serde(default)]
    pub left: Option<EstimateInput>,
    #[serde(default)]
    pub right: Option<EstimateInput>,
    /// Face threshold observed in this frame, if the face was found.
    #[serde(default)]
    pub face_coverage_threshold_px: Option<i32>,
}

#[derive(Debug, Clone, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct SessionManifest {
    frames: Vec<SessionFrame>,
}

/// Loaded manifest plus the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct Session {
    pub frames: Vec<SessionFrame>,
    base_dir: PathBuf,
}

/// Decoded masks of one frame.
pub struct FrameMasks {
    pub skin: GrayImage,
    pub motion: GrayImage,
}

impl Session {
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let manifest: SessionManifest = serde_json::from_str(&data)?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(Self {
            frames: manifest.frames,
            base_dir,
        })
    }

    fn resolve(&self, p: &Path) -> PathBuf {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.base_dir.join(p)
        }
    }

    /// Decode both masks of `frame` as 8-bit luma and check they agree in size.
    pub fn load_masks(&self, frame: &SessionFrame) -> Result<FrameMasks, String> {
        let skin = open_luma(&self.resolve(&frame.skin_mask))?;
        let motion = open_luma(&self.resolve(&frame.motion_mask))?;
        if skin.dimensions() != motion.dimensions() {
            return Err(format!(
                "mask size mismatch: skin {:?} vs motion {:?}",
                skin.dimensions(),
                motion.dimensions()
            ));
        }
        Ok(FrameMasks { skin, motion })
    }
}

fn open_luma(path: &Path) -> Result<GrayImage, String> {
    image::open(path)
        .map(|img| img.to_luma8())
        .map_err(|e| format!("Failed to open image {}: {}", path.display(), e))
}
