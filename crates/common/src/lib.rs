//! Soundstage Common Utilities
//!
//! Shared infrastructure for all Soundstage crates:
//! - Error types and result aliases
//! - Playback clock and tick pacing utilities
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
