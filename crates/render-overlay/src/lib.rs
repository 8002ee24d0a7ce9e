//! Soundstage Render Overlay
//!
//! Turns per-tick playback state into composition instructions for the
//! embedding host:
//!
//! ```text
//! time ──────┐
//! scale ─────┤
//! renderer ──┼── compose ──► OverlayFrame { visual, caption, badge }
//! captions ──┤
//! scenes ────┘
//! ```
//!
//! The frame says what to show and where; the host draws it.

pub mod compositor;

pub use compositor::*;
