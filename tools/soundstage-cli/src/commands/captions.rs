//! Group a transcript into caption cues.

use std::path::PathBuf;

use soundstage_overlay_model::parse_transcript;
use soundstage_sync_core::captions::sentences_from_input;
use soundstage_sync_core::subtitles::{generate_srt, generate_vtt};

pub fn run(
    transcript: PathBuf,
    group_ms: u64,
    format: String,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&transcript)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", transcript.display()))?;
    let input = parse_transcript(&json)
        .map_err(|e| anyhow::anyhow!("Invalid transcript {}: {e}", transcript.display()))?;

    let sentences = sentences_from_input(input, group_ms);
    tracing::info!(cues = sentences.len(), group_ms, "Grouped transcript");

    let rendered = match format.as_str() {
        "srt" => generate_srt(&sentences),
        "vtt" => generate_vtt(&sentences),
        "json" => serde_json::to_string_pretty(&sentences)?,
        other => anyhow::bail!("Unknown format '{other}' (expected json, srt, or vtt)"),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            println!(
                "Wrote {} cue(s) to {} ({format})",
                sentences.len(),
                path.display()
            );
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
