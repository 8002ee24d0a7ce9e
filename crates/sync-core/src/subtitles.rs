//! Subtitle generation in SRT and VTT formats.

use soundstage_common::error::StageResult;
use soundstage_overlay_model::Sentence;

/// Generate SRT subtitle content from caption sentences.
pub fn generate_srt(sentences: &[Sentence]) -> String {
    let mut output = String::new();

    for (i, sentence) in sentences.iter().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_srt_time(sentence.start_ms),
            format_srt_time(sentence.end_ms),
        ));
        output.push_str(&sentence.text);
        output.push_str("\n\n");
    }

    output
}

/// Generate WebVTT subtitle content from caption sentences.
pub fn generate_vtt(sentences: &[Sentence]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for sentence in sentences {
        output.push_str(&format!(
            "{} --> {}\n",
            format_vtt_time(sentence.start_ms),
            format_vtt_time(sentence.end_ms),
        ));
        output.push_str(&sentence.text);
        output.push_str("\n\n");
    }

    output
}

/// Format milliseconds as SRT timestamp: HH:MM:SS,mmm
fn format_srt_time(total_ms: u64) -> String {
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02},{millis:03}")
}

/// Format milliseconds as VTT timestamp: HH:MM:SS.mmm
fn format_vtt_time(total_ms: u64) -> String {
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}.{millis:03}")
}

/// Save subtitles to a file, picking the format from the extension.
pub fn save_subtitles(sentences: &[Sentence], path: &std::path::Path) -> StageResult<()> {
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("vtt") => generate_vtt(sentences),
        _ => generate_srt(sentences), // default to SRT
    };
    std::fs::write(path, content)?;
    Ok(())
}
