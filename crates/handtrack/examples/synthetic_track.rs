//! Track two synthetic hands moving across a blank frame.
//!
//! Usage: synthetic_track [frames] [out.json]

use handtrack::{
    BlobCategory, BlobInformation, EstimateInput, FrameInputs, HandTracker, Point, TrackerConfig,
};
use image::{GrayImage, Luma};
use std::error::Error;

const W: u32 = 320;
const H: u32 = 240;
const HAND_RADIUS: i32 = 22;

fn render(hands: &[Point]) -> GrayImage {
    GrayImage::from_fn(W, H, |x, y| {
        let on = hands.iter().any(|c| {
            let dx = x as i32 - c.x;
            let dy = y as i32 - c.y;
            dx * dx + dy * dy <= HAND_RADIUS * HAND_RADIUS
        });
        Luma([if on { 255 } else { 0 }])
    })
}

fn blob_for(p: Point) -> BlobInformation {
    BlobInformation::from_bounds(
        p.x - HAND_RADIUS,
        p.y - HAND_RADIUS,
        p.x + HAND_RADIUS,
        p.y + HAND_RADIUS,
        BlobCategory::Low,
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    let n_frames: i32 = match args.get(1) {
        Some(s) => s.parse()?,
        None => 30,
    };

    let mut tracker = HandTracker::new(TrackerConfig::default());
    tracker.set_face_coverage_threshold(60);

    let mut results = Vec::new();
    for i in 0..n_frames {
        // Hands sweep toward each other, then back out.
        let phase = (i % 40 - 20).abs();
        let left = Point::new(60 + 2 * (20 - phase), 150);
        let right = Point::new(260 - 2 * (20 - phase), 150);

        let skin = render(&[left, right]);
        let motion = GrayImage::new(W, H);
        let blobs = vec![blob_for(left), blob_for(right)];

        // The blob stage only reports every third frame.
        let (le, re) = if i % 3 == 0 {
            (
                Some(EstimateInput {
                    point: left,
                    blob: blobs[0],
                    force: false,
                    condition: Default::default(),
                }),
                Some(EstimateInput {
                    point: right,
                    blob: blobs[1],
                    force: false,
                    condition: Default::default(),
                }),
            )
        } else {
            (None, None)
        };

        let inputs = FrameInputs {
            skin_mask: &skin,
            motion_mask: &motion,
            blobs: &blobs,
        };
        let result = tracker.track(&inputs, le.as_ref(), re.as_ref());
        println!(
            "frame {:3}: left {:?} (truth {:?}), right {:?} (truth {:?})",
            result.frame_index, result.left, left, result.right, right
        );
        results.push(result);
    }

    if let Some(out_path) = args.get(2) {
        let json = serde_json::to_string_pretty(&results)?;
        std::fs::write(out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}
