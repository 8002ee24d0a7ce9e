//! Uniform scale fitting for the fixed-resolution overlay canvas.
//!
//! The renderer is authored against a fixed base canvas; containers and
//! viewports are whatever the host measures. One uniform factor scales
//! the canvas without distortion:
//!
//! - Inline: `min(cw/bw, ch/bh)`, capped at 3x. A container with no
//!   measured height falls back to the width-only ratio (still capped).
//! - Fullscreen: `min(vw/bw, vh/bh) * 0.9`, uncapped; the 10% margin
//!   leaves breathing room instead of an edge-to-edge fit.

use soundstage_overlay_model::{OverlayMode, ScaleState, Size};

/// Upper bound for inline scaling.
pub const MAX_INLINE_SCALE: f64 = 3.0;

/// Fraction of the fullscreen fit actually used.
pub const FULLSCREEN_FILL: f64 = 0.9;

/// Compute the uniform scale factor for the overlay canvas.
///
/// `container` is the measured element the canvas sits in; `viewport`
/// is the full display area and is only consulted in fullscreen.
pub fn compute_scale(
    container: Size,
    viewport: Size,
    base_width: u32,
    base_height: u32,
    is_fullscreen: bool,
) -> f64 {
    let bw = base_width as f64;
    let bh = base_height as f64;

    if is_fullscreen {
        let scale_x = viewport.width / bw;
        let scale_y = viewport.height / bh;
        scale_x.min(scale_y) * FULLSCREEN_FILL
    } else if container.width > 0.0 && container.height > 0.0 {
        let scale_x = container.width / bw;
        let scale_y = container.height / bh;
        scale_x.min(scale_y).min(MAX_INLINE_SCALE)
    } else {
        // Height not measured yet; fit on width alone.
        (container.width / bw).min(MAX_INLINE_SCALE)
    }
}

/// Compute a full [`ScaleState`] for a mode and measured geometry.
pub fn compute_scale_state(
    mode: OverlayMode,
    container: Size,
    viewport: Size,
    is_fullscreen: bool,
) -> ScaleState {
    let (base_width, base_height) = mode.base_resolution();
    ScaleState {
        scale: compute_scale(container, viewport, base_width, base_height, is_fullscreen),
        base_width,
        base_height,
        is_fullscreen,
    }
}
