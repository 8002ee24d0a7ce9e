//! Property tests for the synchronization math.

use proptest::prelude::*;

use soundstage_overlay_model::{Scene, Size, Word};
use soundstage_sync_core::captions::group_words;
use soundstage_sync_core::scale::{compute_scale, MAX_INLINE_SCALE};
use soundstage_sync_core::scene_tracker::active_index;

/// Ascending, non-overlapping scene lists built from gap/duration pairs.
fn scene_list() -> impl Strategy<Value = Vec<Scene>> {
    prop::collection::vec((0u64..2000, 1u64..5000), 0..12).prop_map(|pairs| {
        let mut scenes = Vec::with_capacity(pairs.len());
        let mut cursor = 0u64;
        for (gap, duration) in pairs {
            let start = cursor + gap;
            let end = start + duration;
            scenes.push(Scene::new(start, end));
            cursor = end;
        }
        scenes
    })
}

/// Word sequences with non-decreasing timings.
fn word_list() -> impl Strategy<Value = Vec<Word>> {
    prop::collection::vec(("[a-z]{1,8}", 0u64..800, 1u64..1500), 0..40).prop_map(|items| {
        let mut words = Vec::with_capacity(items.len());
        let mut cursor = 0u64;
        for (text, gap, duration) in items {
            let start_ms = cursor + gap;
            let end_ms = start_ms + duration;
            words.push(Word {
                word: text,
                start_ms,
                end_ms,
            });
            cursor = end_ms;
        }
        words
    })
}

proptest! {
    #[test]
    fn active_index_matches_linear_scan(scenes in scene_list(), t in 0u64..40_000) {
        let t_ms = t as f64;
        let expected = scenes.iter().position(|s| s.contains(t_ms));
        prop_assert_eq!(active_index(&scenes, t_ms), expected);
    }

    #[test]
    fn active_index_is_monotone_in_time(scenes in scene_list()) {
        let mut last_seen: Option<usize> = None;
        let horizon = scenes.last().map(|s| s.end + 100).unwrap_or(100);

        let mut t = 0u64;
        while t < horizon {
            if let Some(index) = active_index(&scenes, t as f64) {
                if let Some(prev) = last_seen {
                    prop_assert!(index >= prev);
                }
                last_seen = Some(index);
            }
            t += 37; // coarse sweep is enough to cross every boundary
        }
    }

    #[test]
    fn grouping_is_a_lossless_ordered_partition(
        words in word_list(),
        max_span_ms in 500u64..10_000,
    ) {
        let sentences = group_words(&words, max_span_ms);

        // Concatenating all words across all sentences reproduces the
        // input sequence exactly.
        let rebuilt: Vec<String> = sentences
            .iter()
            .flat_map(|s| s.text.split_whitespace().map(str::to_string))
            .collect();
        let original: Vec<String> = words.iter().map(|w| w.word.clone()).collect();
        prop_assert_eq!(rebuilt, original);

        // Sentence order follows word order.
        for window in sentences.windows(2) {
            prop_assert!(window[0].start_ms <= window[1].start_ms);
            prop_assert!(window[0].end_ms <= window[1].start_ms);
        }
        if let (Some(first_word), Some(first_sentence)) = (words.first(), sentences.first()) {
            prop_assert_eq!(first_sentence.start_ms, first_word.start_ms);
        }
        if let (Some(last_word), Some(last_sentence)) = (words.last(), sentences.last()) {
            prop_assert_eq!(last_sentence.end_ms, last_word.end_ms);
        }
    }

    #[test]
    fn inline_scale_is_monotone_and_capped(
        w1 in 1.0f64..5000.0,
        h1 in 1.0f64..5000.0,
        dw in 0.0f64..5000.0,
        dh in 0.0f64..5000.0,
    ) {
        let viewport = Size::new(2560.0, 1440.0);
        let small = compute_scale(Size::new(w1, h1), viewport, 1920, 1080, false);
        let large = compute_scale(Size::new(w1 + dw, h1 + dh), viewport, 1920, 1080, false);

        prop_assert!(large + 1e-12 >= small);
        prop_assert!(small <= MAX_INLINE_SCALE);
        prop_assert!(large <= MAX_INLINE_SCALE);
    }
}
