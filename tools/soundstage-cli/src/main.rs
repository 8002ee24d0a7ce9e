//! Soundstage CLI: caption tooling, scene inspection, and headless
//! playback.
//!
//! Usage:
//!   soundstage captions <TRANSCRIPT>   Group a transcript into caption cues
//!   soundstage scenes <SCENES>         Validate and inspect a scene list
//!   soundstage link <URL>              Parse a deep link into a playback source
//!   soundstage play [OPTIONS]          Run a headless playback session

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "soundstage",
    about = "Audio-synchronized scene overlays and captions",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Group a transcript into caption cues
    Captions {
        /// Path to the transcript JSON (words or pre-grouped cues)
        transcript: PathBuf,

        /// Span threshold for closing a caption group (ms)
        #[arg(long, default_value = "4000")]
        group_ms: u64,

        /// Output format: json, srt, or vtt
        #[arg(long, default_value = "json")]
        format: String,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate and inspect a scene list
    Scenes {
        /// Path to the scene list JSON
        scenes: PathBuf,

        /// Resolve the active scene at this playback time (ms)
        #[arg(long)]
        at: Option<u64>,
    },

    /// Parse a deep link into a playback source
    Link {
        /// Full URL or bare query string with audio, transcript,
        /// and visualizer parameters
        url: String,
    },

    /// Run a headless playback session and print its events
    Play {
        /// Audio asset URL
        #[arg(long)]
        audio: String,

        /// Transcript URL or local JSON path
        #[arg(long)]
        transcript: Option<String>,

        /// Remote visualizer module URL
        #[arg(long)]
        visualizer: Option<String>,

        /// Explicit export binding name for the visualizer module
        #[arg(long)]
        export_name: Option<String>,

        /// Presentation mode: landscape or portrait
        #[arg(long, default_value = "landscape")]
        mode: String,

        /// Show the scene debug badge in frame summaries
        #[arg(long)]
        scene_debug: bool,

        /// Register a built-in demo renderer for the module URL
        #[arg(long)]
        demo_visualizer: bool,

        /// How long to run (seconds)
        #[arg(long, default_value = "12")]
        duration_secs: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    soundstage_common::logging::init_logging(&soundstage_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Captions {
            transcript,
            group_ms,
            format,
            output,
        } => commands::captions::run(transcript, group_ms, format, output),
        Commands::Scenes { scenes, at } => commands::scenes::run(scenes, at),
        Commands::Link { url } => commands::link::run(url),
        Commands::Play {
            audio,
            transcript,
            visualizer,
            export_name,
            mode,
            scene_debug,
            demo_visualizer,
            duration_secs,
        } => {
            commands::play::run(
                audio,
                transcript,
                visualizer,
                export_name,
                mode,
                scene_debug,
                demo_visualizer,
                duration_secs,
            )
            .await
        }
    }
}
