//! Soundstage Overlay Model
//!
//! Defines the core data contracts for overlay playback:
//! - **Scenes:** Ordered, non-overlapping time intervals of the visual layer
//! - **Transcript:** Word-level timings and derived caption sentences
//! - **Geometry:** Base canvas resolutions, measured sizes, scale state
//! - **Visualizer:** The pluggable renderer handle and module export shapes
//! - **Sources:** Everything external collaborators hand the engine,
//!   including the three-parameter deep-link contract
//!
//! All playback times are milliseconds unless a field name says otherwise.

pub mod geometry;
pub mod scene;
pub mod source;
pub mod transcript;
pub mod visualizer;

pub use geometry::*;
pub use scene::*;
pub use source::*;
pub use transcript::*;
pub use visualizer::*;
