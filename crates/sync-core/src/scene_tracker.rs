//! Active-scene resolution and change tracking.
//!
//! Scene lists are ordered, non-overlapping, half-open intervals. The
//! active index for a time `t` is the unique scene containing `t`, found
//! by binary search. The tracker remembers the index it last reported so
//! redundant notifications are suppressed.

use soundstage_overlay_model::{validate_scene_list, Scene, SceneListError};

/// Resolve the active scene index for a playback time.
///
/// Returns the greatest `i` with `scenes[i].start <= t < scenes[i].end`,
/// or `None` when no scene contains `t`.
pub fn active_index(scenes: &[Scene], t_ms: f64) -> Option<usize> {
    let idx = scenes.partition_point(|s| (s.start as f64) <= t_ms);
    if idx == 0 {
        return None;
    }
    let candidate = idx - 1;
    scenes[candidate].contains(t_ms).then_some(candidate)
}

/// Tracks the displayed scene index across playback ticks.
#[derive(Debug, Clone)]
pub struct SceneTracker {
    scenes: Vec<Scene>,
    /// Index currently shown to the user. Starts at 0, matching the
    /// initial state of every scene-aware surface.
    current: usize,
}

impl SceneTracker {
    /// Create a tracker with no scenes yet.
    pub fn new() -> Self {
        Self {
            scenes: Vec::new(),
            current: 0,
        }
    }

    /// Create a tracker over a validated scene list.
    pub fn with_scenes(scenes: Vec<Scene>) -> Result<Self, SceneListError> {
        validate_scene_list(&scenes)?;
        Ok(Self { scenes, current: 0 })
    }

    /// Replace the boundary list with one the renderer reported.
    ///
    /// The renderer knows its own internal cuts better than any
    /// externally supplied list, so a valid report is authoritative.
    pub fn report_scenes(&mut self, scenes: Vec<Scene>) -> Result<(), SceneListError> {
        validate_scene_list(&scenes)?;
        if self.current >= scenes.len() {
            self.current = 0;
        }
        self.scenes = scenes;
        Ok(())
    }

    /// Advance to a playback time.
    ///
    /// Returns `Some(index)` only when the computed index is in bounds
    /// and differs from the displayed one; the displayed index is
    /// updated in the same step. Out-of-scene times report nothing and
    /// leave the displayed index alone.
    pub fn update(&mut self, t_ms: f64) -> Option<usize> {
        let computed = active_index(&self.scenes, t_ms)?;
        if computed == self.current {
            return None;
        }
        self.current = computed;
        Some(computed)
    }

    /// Select a scene by index (e.g., from a menu).
    ///
    /// Validates the range, updates the displayed index immediately, and
    /// returns the scene's start time (ms) for the caller to seek the
    /// time source. Out-of-range selection is a no-op.
    pub fn select(&mut self, index: usize) -> Option<u64> {
        let scene = self.scenes.get(index)?;
        self.current = index;
        Some(scene.start)
    }

    /// The displayed scene index.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of known scenes.
    pub fn total(&self) -> usize {
        self.scenes.len()
    }

    /// The current boundary list.
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

impl Default for SceneTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_scenes() -> Vec<Scene> {
        vec![Scene::new(0, 5000), Scene::new(5000, 12000)]
    }

    #[test]
    fn test_active_index_half_open_bounds() {
        let scenes = two_scenes();
        assert_eq!(active_index(&scenes, 0.0), Some(0));
        assert_eq!(active_index(&scenes, 4999.0), Some(0));
        assert_eq!(active_index(&scenes, 5000.0), Some(1));
        assert_eq!(active_index(&scenes, 11999.0), Some(1));
        assert_eq!(active_index(&scenes, 12000.0), None);
        assert_eq!(active_index(&scenes, -1.0), None);
    }

    #[test]
    fn test_active_index_with_gap() {
        let scenes = vec![Scene::new(0, 1000), Scene::new(3000, 4000)];
        assert_eq!(active_index(&scenes, 2000.0), None);
        assert_eq!(active_index(&scenes, 3500.0), Some(1));
    }

    #[test]
    fn test_update_fires_exactly_once_per_transition() {
        let mut tracker = SceneTracker::with_scenes(two_scenes()).unwrap();

        let mut fired = Vec::new();
        for t in [0.0, 4999.0, 5000.0, 11999.0] {
            if let Some(index) = tracker.update(t) {
                fired.push(index);
            }
        }

        assert_eq!(fired, vec![1]); // one transition, 0 -> 1 at t=5000
        assert_eq!(tracker.current_index(), 1);
    }

    #[test]
    fn test_update_suppresses_redundant_indices() {
        let mut tracker = SceneTracker::with_scenes(two_scenes()).unwrap();
        assert_eq!(tracker.update(6000.0), Some(1));
        assert_eq!(tracker.update(7000.0), None);
        assert_eq!(tracker.update(8000.0), None);
    }

    #[test]
    fn test_select_validates_range() {
        let mut tracker = SceneTracker::with_scenes(two_scenes()).unwrap();
        assert_eq!(tracker.select(1), Some(5000));
        assert_eq!(tracker.current_index(), 1);

        assert_eq!(tracker.select(7), None); // no-op
        assert_eq!(tracker.current_index(), 1);
    }

    #[test]
    fn test_report_scenes_rejects_invalid_list() {
        let mut tracker = SceneTracker::new();
        let invalid = vec![Scene::new(0, 5000), Scene::new(4000, 9000)];
        assert!(tracker.report_scenes(invalid).is_err());
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_report_scenes_clamps_displayed_index() {
        let mut tracker = SceneTracker::with_scenes(two_scenes()).unwrap();
        tracker.select(1);
        tracker
            .report_scenes(vec![Scene::new(0, 3000)])
            .unwrap();
        assert_eq!(tracker.current_index(), 0);
        assert_eq!(tracker.total(), 1);
    }
}
