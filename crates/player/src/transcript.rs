//! Transcript resolution.
//!
//! In-memory transcript data takes precedence; a URL is fetched only
//! when nothing was supplied inline. Failures leave the caption list
//! empty and never disturb playback.

use soundstage_common::error::{StageError, StageResult};
use soundstage_overlay_model::{Sentence, TranscriptInput, TranscriptSource};
use soundstage_sync_core::captions::sentences_from_input;

/// Resolve a transcript source into caption sentences.
pub async fn resolve_transcript(
    source: &TranscriptSource,
    group_span_ms: u64,
) -> StageResult<Vec<Sentence>> {
    match source {
        TranscriptSource::Inline(input) => {
            Ok(sentences_from_input(input.clone(), group_span_ms))
        }
        TranscriptSource::Remote(url) => {
            let input = fetch_transcript(url).await?;
            Ok(sentences_from_input(input, group_span_ms))
        }
        TranscriptSource::None => {
            tracing::warn!("No transcript data or URL provided");
            Ok(Vec::new())
        }
    }
}

/// Fetch and parse a remote transcript in either accepted shape.
async fn fetch_transcript(url: &str) -> StageResult<TranscriptInput> {
    tracing::debug!(url, "Fetching transcript");

    let response = reqwest::get(url)
        .await
        .map_err(|e| StageError::transcript(format!("fetch failed for {url}: {e}")))?;

    let response = response
        .error_for_status()
        .map_err(|e| StageError::transcript(format!("fetch failed for {url}: {e}")))?;

    response
        .json::<TranscriptInput>()
        .await
        .map_err(|e| StageError::transcript(format!("invalid transcript at {url}: {e}")))
}
