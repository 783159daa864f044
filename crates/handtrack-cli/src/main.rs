//! handtrack CLI: replay recorded mask sessions through the hand tracker.

mod session;

use clap::{Args, Parser, Subcommand};
use handtrack::{FrameInputs, FrameResult, HandTracker, TrackerConfig};
use std::path::PathBuf;

use session::Session;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "handtrack")]
#[command(about = "Track left/right hand positions from skin, blob and motion masks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded session and write per-frame hand positions.
    Track(CliTrackArgs),

    /// Print the default tracker configuration as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct CliTrackArgs {
    /// Path to the session manifest (JSON).
    #[arg(long)]
    session: PathBuf,

    /// Path to write per-frame positions (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Optional tracker configuration overlay (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Face coverage threshold (image row) used when a frame does not carry one.
    #[arg(long)]
    face_threshold: Option<i32>,

    /// Pixels per centimetre, overriding the configuration.
    #[arg(long)]
    px_per_cm: Option<f64>,

    /// Capture frame rate, overriding the configuration.
    #[arg(long)]
    fps: Option<f64>,
}

impl CliTrackArgs {
    fn build_config(&self) -> CliResult<TrackerConfig> {
        let mut config = match &self.config {
            Some(path) => TrackerConfig::from_json_file(path).map_err(|e| -> CliError {
                format!("Failed to load config {}: {}", path.display(), e).into()
            })?,
            None => TrackerConfig::default(),
        };

        if let Some(px_per_cm) = self.px_per_cm {
            config.scale.px_per_cm = px_per_cm;
        }
        if let Some(fps) = self.fps {
            config.scale.fps = fps;
        }
        if let Some(face) = self.face_threshold {
            config.scale.face_coverage_threshold_px = face;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Track(args) => run_track(&args),
        Commands::DefaultConfig => run_default_config(),
    }
}

// ── default-config ─────────────────────────────────────────────────────

fn run_default_config() -> CliResult<()> {
    let json = serde_json::to_string_pretty(&TrackerConfig::default())?;
    println!("{json}");
    Ok(())
}

// ── track ──────────────────────────────────────────────────────────────

fn run_track(args: &CliTrackArgs) -> CliResult<()> {
    let config = args.build_config()?;

    tracing::info!("Loading session: {}", args.session.display());
    let session = Session::from_json_file(&args.session)?;
    tracing::info!("Session has {} frames", session.frames.len());

    let mut tracker = HandTracker::new(config);
    let mut results: Vec<FrameResult> = Vec::with_capacity(session.frames.len());

    for (i, frame) in session.frames.iter().enumerate() {
        let masks = session.load_masks(frame).map_err(|e| -> CliError {
            format!("frame {}: {}", i, e).into()
        })?;

        if let Some(face) = frame.face_coverage_threshold_px {
            tracker.set_face_coverage_threshold(face);
        }

        let inputs = FrameInputs {
            skin_mask: &masks.skin,
            motion_mask: &masks.motion,
            blobs: &frame.blobs,
        };
        let result = tracker.track(&inputs, frame.left.as_ref(), frame.right.as_ref());
        results.push(result);
    }

    let n_left = results.iter().filter(|r| r.left.is_some()).count();
    let n_right = results.iter().filter(|r| r.right.is_some()).count();
    tracing::info!(
        "Tracked {} frames (left present in {}, right present in {})",
        results.len(),
        n_left,
        n_right,
    );

    let json = serde_json::to_string_pretty(&results)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Results written to {}", args.out.display());

    Ok(())
}
