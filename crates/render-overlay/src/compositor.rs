//! Overlay frame composition.
//!
//! This module defines the composition instructions produced once per
//! render tick. It is the only place that sees every upstream state at
//! once, and it does nothing but choose what to show: the scaled
//! renderer canvas, the active caption, and the debug scene badge.

use soundstage_overlay_model::{ScaleState, Sentence};

/// Everything the compositor consults for one tick.
#[derive(Debug, Clone)]
pub struct OverlayInputs<'a> {
    /// Playback time for this tick (ms).
    pub time_ms: f64,

    /// Latest scale transform.
    pub scale: ScaleState,

    /// Whether a renderer is available to place.
    pub has_renderer: bool,

    /// Whether the user enabled captions.
    pub captions_enabled: bool,

    /// Caption active at this tick, if any.
    pub active_sentence: Option<&'a Sentence>,

    /// Whether the debug scene indicator is enabled.
    pub scene_debug: bool,

    /// Displayed scene index and total, when scenes are known.
    pub scene_info: Option<SceneInfo>,
}

/// Displayed scene position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneInfo {
    /// Zero-based displayed index.
    pub current_index: usize,

    /// Total number of known scenes.
    pub total: usize,
}

/// One tick's composition instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    /// Playback time the frame was composed for (ms).
    pub time_ms: f64,

    /// Renderer canvas placement, absent when no renderer resolved.
    pub visual: Option<VisualPlacement>,

    /// Caption to draw, absent unless enabled and a sentence is active.
    pub caption: Option<CaptionOverlay>,

    /// Debug badge, absent unless enabled and scenes are known.
    pub scene_badge: Option<SceneBadge>,
}

/// Placement of the renderer's fixed-resolution canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualPlacement {
    /// Canvas width at authoring resolution (px).
    pub width: u32,

    /// Canvas height at authoring resolution (px).
    pub height: u32,

    /// Uniform scale applied to the canvas.
    pub scale: f64,

    /// Transform anchor.
    pub anchor: Anchor,

    /// Time handed to the renderer (ms).
    pub time_ms: f64,
}

/// Where the scale transform is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Inline presentation anchors at the container origin.
    TopLeft,

    /// Fullscreen presentation centers the canvas.
    Center,
}

/// Caption text drawn over the canvas, bottom-centered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionOverlay {
    pub text: String,
}

/// The "scene N / total" debug indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneBadge {
    /// Zero-based displayed index.
    pub current_index: usize,

    /// Total number of known scenes.
    pub total: usize,
}

impl SceneBadge {
    /// Human-readable badge text, one-based.
    pub fn label(&self) -> String {
        format!("Scene {} / {}", self.current_index + 1, self.total)
    }
}

/// Compose one tick's overlay frame.
pub fn compose(inputs: &OverlayInputs<'_>) -> OverlayFrame {
    let visual = inputs.has_renderer.then(|| VisualPlacement {
        width: inputs.scale.base_width,
        height: inputs.scale.base_height,
        scale: inputs.scale.scale,
        anchor: if inputs.scale.is_fullscreen {
            Anchor::Center
        } else {
            Anchor::TopLeft
        },
        time_ms: inputs.time_ms,
    });

    let caption = if inputs.captions_enabled {
        inputs.active_sentence.map(|sentence| CaptionOverlay {
            text: sentence.text.clone(),
        })
    } else {
        None
    };

    let scene_badge = if inputs.scene_debug {
        inputs
            .scene_info
            .filter(|info| info.total > 0)
            .map(|info| SceneBadge {
                current_index: info.current_index,
                total: info.total,
            })
    } else {
        None
    };

    OverlayFrame {
        time_ms: inputs.time_ms,
        visual,
        caption,
        scene_badge,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soundstage_overlay_model::{OverlayMode, ScaleState};

    fn base_inputs() -> OverlayInputs<'static> {
        OverlayInputs {
            time_ms: 1234.0,
            scale: ScaleState::identity(OverlayMode::Landscape),
            has_renderer: true,
            captions_enabled: false,
            active_sentence: None,
            scene_debug: false,
            scene_info: None,
        }
    }

    #[test]
    fn test_inline_anchors_top_left() {
        let frame = compose(&base_inputs());
        let visual = frame.visual.unwrap();
        assert_eq!(visual.anchor, Anchor::TopLeft);
        assert_eq!(visual.width, 1920);
        assert_eq!(visual.time_ms, 1234.0);
    }

    #[test]
    fn test_fullscreen_centers() {
        let mut inputs = base_inputs();
        inputs.scale.is_fullscreen = true;
        inputs.scale.scale = 0.9;

        let visual = compose(&inputs).visual.unwrap();
        assert_eq!(visual.anchor, Anchor::Center);
        assert_eq!(visual.scale, 0.9);
    }

    #[test]
    fn test_no_renderer_means_no_visual() {
        let mut inputs = base_inputs();
        inputs.has_renderer = false;
        assert!(compose(&inputs).visual.is_none());
    }

    #[test]
    fn test_caption_requires_toggle_and_active_sentence() {
        let sentence = Sentence {
            start_ms: 1000,
            end_ms: 3000,
            text: "hello".to_string(),
        };

        let mut inputs = base_inputs();
        inputs.active_sentence = Some(&sentence);
        assert!(compose(&inputs).caption.is_none()); // disabled

        inputs.captions_enabled = true;
        assert_eq!(compose(&inputs).caption.unwrap().text, "hello");

        inputs.active_sentence = None;
        assert!(compose(&inputs).caption.is_none()); // nothing active
    }

    #[test]
    fn test_badge_omits_itself_without_scenes() {
        let mut inputs = base_inputs();
        inputs.scene_debug = true;
        assert!(compose(&inputs).scene_badge.is_none());

        inputs.scene_info = Some(SceneInfo {
            current_index: 1,
            total: 4,
        });
        let badge = compose(&inputs).scene_badge.unwrap();
        assert_eq!(badge.label(), "Scene 2 / 4");
    }
}
