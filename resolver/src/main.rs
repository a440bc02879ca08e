//! `stuffplus` command line scorer
//!
//! Scores a pitch from flags, scores the built-in samples, or uploads a
//! Trackman screenshot for scoring.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use shared::config::{DEFAULT_SCORING_URL, SCORING_URL_ENV};
use shared::{Handedness, Pitch, PitchForm, PitchIdGenerator, ScoringEndpoint, ServiceId, logging, sample_pitches};

use resolver::{OfflineScoringClient, RealScoringClient, ScoringClient, ScreenshotUpload, StuffPlusResolver};

#[derive(Parser, Debug)]
#[command(name = "stuffplus")]
#[command(about = "Score baseball pitches with the Stuff+ model")]
struct Cli {
    /// Base URL of the remote scoring API
    #[arg(long, global = true, env = SCORING_URL_ENV, default_value = DEFAULT_SCORING_URL)]
    api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Skip the remote model and score with the local formula
    #[arg(long, global = true)]
    local_only: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one pitch from its metrics
    Score(ScoreArgs),
    /// Score the built-in sample pitches
    Samples,
    /// Upload a screenshot to be read and scored remotely
    Upload(UploadArgs),
}

/// Raw metric text, normalized the same way as the entry form
#[derive(Args, Debug)]
struct ScoreArgs {
    #[arg(long, default_value_t)]
    name: String,
    #[arg(long, default_value_t)]
    pitch_type: String,
    #[arg(long, default_value_t)]
    handedness: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    release_speed: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pfx_x: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    pfx_z: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    release_extension: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    release_spin_rate: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    spin_axis: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    release_pos_x: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    release_pos_z: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    fb_velo: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    fb_ivb: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    fb_hmov: String,
}

impl From<ScoreArgs> for PitchForm {
    fn from(args: ScoreArgs) -> Self {
        PitchForm {
            name: args.name,
            pitch_type: args.pitch_type,
            handedness: args.handedness,
            release_speed: args.release_speed,
            pfx_x: args.pfx_x,
            pfx_z: args.pfx_z,
            release_extension: args.release_extension,
            release_spin_rate: args.release_spin_rate,
            spin_axis: args.spin_axis,
            release_pos_x: args.release_pos_x,
            release_pos_z: args.release_pos_z,
            fb_velo: args.fb_velo,
            fb_ivb: args.fb_ivb,
            fb_hmov: args.fb_hmov,
        }
    }
}

#[derive(Args, Debug)]
struct UploadArgs {
    /// Screenshot image (jpeg or png)
    path: PathBuf,
    #[arg(long, default_value = "FF")]
    pitch_type: String,
    #[arg(long, default_value = "R")]
    handedness: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    fb_velo: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    fb_ivb: String,
    #[arg(long, default_value_t, allow_hyphen_values = true)]
    fb_hmov: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    ServiceId::init_cli();
    logging::init_tracing_with_level(Some(&cli.log_level));

    if cli.local_only {
        run(StuffPlusResolver::new(OfflineScoringClient), cli.command).await
    } else {
        let endpoint = ScoringEndpoint::parse(&cli.api_url).context("invalid --api-url")?;
        run(StuffPlusResolver::new(RealScoringClient::new(endpoint)), cli.command).await
    }
}

async fn run<C: ScoringClient>(resolver: StuffPlusResolver<C>, command: Command) -> anyhow::Result<()> {
    let ids = PitchIdGenerator::new();

    match command {
        Command::Score(args) => {
            let form = PitchForm::from(args);
            let input = form.normalize();
            let resolution = resolver.resolve_detailed(&input).await;
            let pitch = Pitch::new(ids.next_id(), form.name, input, resolution.into_result());
            println!("{pitch}");
            println!("  Source: {}", resolution.source());
        }
        Command::Samples => {
            for input in sample_pitches() {
                let result = resolver.resolve(&input).await;
                let name = format!("Sample {}", input.pitch_type);
                println!("{}\n", Pitch::new(ids.next_id(), name, input, result));
            }
        }
        Command::Upload(args) => {
            let upload = ScreenshotUpload::from_path(&args.path)
                .await
                .with_context(|| format!("failed to read {}", args.path.display()))?
                .with_pitch(args.pitch_type, Handedness::from_text(&args.handedness))
                .with_fastball(args.fb_velo, args.fb_ivb, args.fb_hmov);

            let score = resolver
                .score_screenshot(upload)
                .await
                .with_context(|| format!("screenshot scoring via {} failed", resolver.describe()))?;
            println!("{score}");
        }
    }

    Ok(())
}
