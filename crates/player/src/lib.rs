//! Soundstage Player
//!
//! One playback session wires everything together:
//!
//! ```text
//! AudioTransport ──► tick loop ──► SessionCore ──► OverlayFrame watch
//!                        │             │
//! commands (mpsc) ───────┘             ├──► events (mpsc)
//! transcript fetch ────────────────────┤
//! module loader ───────────────────────┘
//! ```
//!
//! The tick loop samples the transport once per tick and propagates that
//! single reading to scene tracking, caption lookup, and frame
//! composition; no tick observes time moving mid-computation. All
//! session state lives on one task and dies with it.

pub mod core;
pub mod fullscreen;
pub mod host;
pub mod session;
pub mod transcript;
pub mod transport;

pub use crate::core::{PlayerCommand, PlayerConfig, PlayerEvent, SessionCore};
pub use fullscreen::{FullscreenAction, FullscreenController, FullscreenState};
pub use host::{FixedGeometry, GeometryHost, HeadlessPlatform, FullscreenPlatform};
pub use session::PlayerSession;
pub use transport::{AudioTransport, ClockTransport, PlaybackTime};
