//! Search-mode choice from the blob holding the hand.

use super::Hand;
use crate::blob::{BlobCategory, BlobInformation};
use crate::geometry::Point;
use crate::search::SearchMode;

impl Hand {
    /// Pick the refinement bias from the blob that contains `pos`.
    ///
    /// Compact blobs are searched freely. Tall blobs are merged with the body:
    /// a torso-level blob hides the hand at its bottom, a head-level blob at
    /// its top.
    pub(crate) fn search_mode_from_blobs(&self, pos: Point, blobs: &[BlobInformation]) -> SearchMode {
        let Some(blob) = blobs.iter().find(|b| b.contains(pos)) else {
            return SearchMode::FreeSearch;
        };

        let px_per_cm = self.config.scale.px_per_cm;
        let height = blob.height() as f64;
        if height < self.config.refine.compact_blob_height_cm * px_per_cm {
            return SearchMode::FreeSearch;
        }

        match blob.category {
            BlobCategory::Low => SearchMode::SearchDown,
            BlobCategory::Medium if height > self.config.refine.tall_blob_height_cm * px_per_cm => {
                SearchMode::SearchDown
            }
            BlobCategory::Medium => SearchMode::FreeSearch,
            BlobCategory::High => SearchMode::SearchUp,
        }
    }
}
