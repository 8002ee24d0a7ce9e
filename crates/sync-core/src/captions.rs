//! Caption segmentation: word timings to sentence cues.
//!
//! # Grouping
//!
//! A single left-to-right pass over the word sequence. A group opens at
//! its first word's `start_ms`; each word joins the current group; the
//! group closes when the span from the group start to the current word's
//! `end_ms` reaches the threshold, or at the final word. Sentence text
//! joins the words with single spaces. Regrouping requires reprocessing
//! the full sequence.
//!
//! The result is a total, order-preserving partition: every word lands
//! in exactly one sentence, in original order.

use soundstage_overlay_model::{Sentence, TranscriptInput, Word};

/// Default span threshold for closing a caption group (ms).
pub const DEFAULT_GROUP_SPAN_MS: u64 = 4000;

/// Group word timings into caption sentences.
pub fn group_words(words: &[Word], max_span_ms: u64) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut group: Vec<&Word> = Vec::new();
    let mut group_start = 0u64;

    for (i, word) in words.iter().enumerate() {
        if group.is_empty() {
            group_start = word.start_ms;
        }
        group.push(word);

        let span = word.end_ms.saturating_sub(group_start);
        if span >= max_span_ms || i == words.len() - 1 {
            sentences.push(Sentence {
                start_ms: group_start,
                end_ms: word.end_ms,
                text: group
                    .iter()
                    .map(|w| w.word.as_str())
                    .collect::<Vec<_>>()
                    .join(" "),
            });
            group.clear();
        }
    }

    sentences
}

/// Normalize either transcript input shape into sentence cues.
pub fn sentences_from_input(input: TranscriptInput, max_span_ms: u64) -> Vec<Sentence> {
    match input {
        TranscriptInput::Words(words) => group_words(&words, max_span_ms),
        TranscriptInput::Cues(cues) => cues.into_iter().map(Sentence::from).collect(),
    }
}

/// Resolve the caption to show at a playback time.
///
/// Prefers the sentence whose `[start_ms, end_ms]` contains `t`; failing
/// that, accepts a sentence within the forward grace window past its
/// `end_ms`, so a caption lingers briefly instead of flickering out
/// between cues. At most one sentence is ever returned.
pub fn active_sentence(sentences: &[Sentence], t_ms: f64, grace_ms: u64) -> Option<&Sentence> {
    sentences
        .iter()
        .find(|s| t_ms >= s.start_ms as f64 && t_ms <= s.end_ms as f64)
        .or_else(|| {
            sentences.iter().find(|s| {
                t_ms >= s.start_ms as f64 && t_ms <= (s.end_ms + grace_ms) as f64
            })
        })
}
