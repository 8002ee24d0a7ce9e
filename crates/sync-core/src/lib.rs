//! Soundstage Sync Core
//!
//! The synchronization math that keeps the overlay in lock-step with the
//! audio clock:
//! - **Scale:** Fit a fixed-resolution canvas into measured geometry
//! - **Scene Tracking:** Resolve and follow the active scene index
//! - **Captions:** Group word timings into sentence cues and resolve the
//!   active cue for a playback time
//! - **Subtitles:** Render sentence cues as SRT/WebVTT
//!
//! Everything here is computation over data; the only I/O is the
//! convenience subtitle file writer.

pub mod captions;
pub mod scale;
pub mod scene_tracker;
pub mod subtitles;

pub use captions::*;
pub use scale::*;
pub use scene_tracker::SceneTracker;
pub use subtitles::*;
