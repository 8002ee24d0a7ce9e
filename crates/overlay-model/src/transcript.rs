//! Transcript wire shapes.
//!
//! Two input shapes are accepted from collaborators:
//! - raw word timings: `[{"word": "...", "start_ms": 0, "end_ms": 400}, ...]`
//! - pre-grouped cues: `[{"start": 0, "end": 4000, "text": "..."}, ...]`
//!
//! Word sequences carry non-decreasing `start_ms` values and are grouped
//! into caption sentences by `soundstage-sync-core`.

use serde::{Deserialize, Serialize};

/// A single transcribed word with timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// The word text.
    pub word: String,

    /// Start time (ms).
    pub start_ms: u64,

    /// End time (ms).
    pub end_ms: u64,
}

/// A caption sentence: a contiguous, time-bounded group of words shown
/// together as one caption unit. Derived, never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// Bound of the first word (ms).
    pub start_ms: u64,

    /// Bound of the last word (ms).
    pub end_ms: u64,

    /// Words joined with single spaces.
    pub text: String,
}

/// Pre-grouped cue wire shape (`{start, end, text}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCue {
    pub start: u64,
    pub end: u64,
    pub text: String,
}

impl From<RawCue> for Sentence {
    fn from(cue: RawCue) -> Self {
        Self {
            start_ms: cue.start,
            end_ms: cue.end,
            text: cue.text,
        }
    }
}

/// The two transcript shapes collaborators may supply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TranscriptInput {
    /// Word-level timings that still need grouping.
    Words(Vec<Word>),
    /// Already-grouped cues, used verbatim.
    Cues(Vec<RawCue>),
}

impl TranscriptInput {
    pub fn is_empty(&self) -> bool {
        match self {
            TranscriptInput::Words(words) => words.is_empty(),
            TranscriptInput::Cues(cues) => cues.is_empty(),
        }
    }
}

/// Parse transcript JSON in either accepted shape.
pub fn parse_transcript(json: &str) -> Result<TranscriptInput, serde_json::Error> {
    serde_json::from_str(json)
}
