//! Canvas geometry: base resolutions, measured sizes, and scale state.
//!
//! The renderer is authored against a fixed pixel canvas (the base
//! resolution); the host container and viewport are measured at runtime
//! and a uniform scale maps one onto the other without distortion.

use serde::{Deserialize, Serialize};

/// Landscape base canvas, 16:9.
pub const LANDSCAPE_BASE: (u32, u32) = (1920, 1080);

/// Portrait base canvas, 9:16.
pub const PORTRAIT_BASE: (u32, u32) = (1080, 1920);

/// Presentation mode: selects the base resolution and the
/// orientation-lock target used in fullscreen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    #[default]
    Landscape,
    Portrait,
}

impl OverlayMode {
    /// The fixed canvas the renderer is authored against.
    pub fn base_resolution(&self) -> (u32, u32) {
        match self {
            OverlayMode::Landscape => LANDSCAPE_BASE,
            OverlayMode::Portrait => PORTRAIT_BASE,
        }
    }

    /// Orientation to lock while fullscreen.
    pub fn orientation_lock(&self) -> OrientationLock {
        match self {
            OverlayMode::Landscape => OrientationLock::Landscape,
            OverlayMode::Portrait => OrientationLock::Portrait,
        }
    }

    /// Aspect ratio width/height.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = self.base_resolution();
        w as f64 / h as f64
    }
}

/// Orientation-lock target for fullscreen presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrientationLock {
    Landscape,
    Portrait,
}

/// A measured width/height in CSS-style pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };
}

/// The current scale transform applied to the overlay canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleState {
    /// Uniform scale factor.
    pub scale: f64,

    /// Base canvas width (px).
    pub base_width: u32,

    /// Base canvas height (px).
    pub base_height: u32,

    /// Whether the fullscreen formula produced this scale.
    pub is_fullscreen: bool,
}

impl ScaleState {
    /// Identity scale for a mode's base canvas.
    pub fn identity(mode: OverlayMode) -> Self {
        let (base_width, base_height) = mode.base_resolution();
        Self {
            scale: 1.0,
            base_width,
            base_height,
            is_fullscreen: false,
        }
    }
}
