//! Scene boundary types.
//!
//! A scene is a half-open interval `[start, end)` in milliseconds during
//! which one visual segment of the renderer is active. Scene lists are
//! ordered ascending by `start` and never overlap.

use serde::{Deserialize, Serialize};

/// A single scene interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Start of the interval (ms, inclusive).
    pub start: u64,

    /// End of the interval (ms, exclusive).
    pub end: u64,

    /// Optional precomputed duration (ms). Informational only;
    /// `end - start` is authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
}

impl Scene {
    /// Create a scene from its bounds.
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end,
            duration: None,
        }
    }

    /// Interval length in milliseconds.
    pub fn span_ms(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Whether a playback time falls inside `[start, end)`.
    pub fn contains(&self, t_ms: f64) -> bool {
        t_ms >= self.start as f64 && t_ms < self.end as f64
    }
}

/// Validation failures for a scene list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneListError {
    #[error("scene {index} has end <= start ({start}..{end})")]
    EmptyInterval { index: usize, start: u64, end: u64 },

    #[error("scene {index} starts before the previous scene ends")]
    Overlap { index: usize },

    #[error("scene {index} is out of ascending order")]
    Unordered { index: usize },
}

/// Check ordering, non-overlap, and non-empty intervals.
///
/// An empty list is valid (scenes are optional input).
pub fn validate_scene_list(scenes: &[Scene]) -> Result<(), SceneListError> {
    for (index, scene) in scenes.iter().enumerate() {
        if scene.end <= scene.start {
            return Err(SceneListError::EmptyInterval {
                index,
                start: scene.start,
                end: scene.end,
            });
        }
        if index > 0 {
            let prev = &scenes[index - 1];
            if scene.start < prev.start {
                return Err(SceneListError::Unordered { index });
            }
            if scene.start < prev.end {
                return Err(SceneListError::Overlap { index });
            }
        }
    }
    Ok(())
}

/// Parse a JSON array of scenes.
pub fn parse_scene_list(json: &str) -> Result<Vec<Scene>, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let scene = Scene::new(1000, 2000);
        assert!(scene.contains(1000.0));
        assert!(scene.contains(1999.9));
        assert!(!scene.contains(2000.0));
        assert!(!scene.contains(999.9));
    }

    #[test]
    fn test_validate_accepts_touching_intervals() {
        let scenes = vec![Scene::new(0, 5000), Scene::new(5000, 12000)];
        assert!(validate_scene_list(&scenes).is_ok());
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let scenes = vec![Scene::new(0, 5000), Scene::new(4000, 9000)];
        assert_eq!(
            validate_scene_list(&scenes),
            Err(SceneListError::Overlap { index: 1 })
        );
    }

    #[test]
    fn test_validate_rejects_empty_interval() {
        let scenes = vec![Scene::new(3000, 3000)];
        assert!(matches!(
            validate_scene_list(&scenes),
            Err(SceneListError::EmptyInterval { index: 0, .. })
        ));
    }

    #[test]
    fn test_parse_scene_list_with_optional_duration() {
        let json = r#"[{"start":0,"end":5000,"duration":5000},{"start":5000,"end":12000}]"#;
        let scenes = parse_scene_list(json).unwrap();
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].duration, Some(5000));
        assert_eq!(scenes[1].duration, None);
        assert_eq!(scenes[1].span_ms(), 7000);
    }
}
