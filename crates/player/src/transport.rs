//! The authoritative playback clock.
//!
//! The audio transport is the only source of truth for time; everything
//! downstream derives from one sample of it per tick. Its native unit
//! is seconds, matching audio element positions; the engine republishes
//! milliseconds.

use parking_lot::Mutex;
use soundstage_common::clock::PlaybackClock;

/// One sample of the playback clock. Recreated every tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackTime {
    /// Playback position in milliseconds.
    pub current_ms: f64,

    /// Whether the transport is advancing.
    pub playing: bool,
}

impl PlaybackTime {
    pub const ZERO: PlaybackTime = PlaybackTime {
        current_ms: 0.0,
        playing: false,
    };
}

/// The external audio clock the session samples and seeks.
///
/// Real hosts wrap their audio element; headless hosts use
/// [`ClockTransport`].
pub trait AudioTransport: Send + Sync {
    /// Current position in seconds (the transport's native unit).
    fn position_secs(&self) -> f64;

    /// Whether playback is advancing.
    fn is_playing(&self) -> bool;

    /// Begin or resume playback.
    fn play(&self);

    /// Pause playback.
    fn pause(&self);

    /// Jump to a position in seconds.
    fn seek_secs(&self, secs: f64);

    /// Sample position and play state as a [`PlaybackTime`].
    fn sample(&self) -> PlaybackTime {
        PlaybackTime {
            current_ms: PlaybackClock::secs_to_ms(self.position_secs()),
            playing: self.is_playing(),
        }
    }
}

/// A monotonic-clock transport for headless playback and tests.
#[derive(Debug, Default)]
pub struct ClockTransport {
    clock: Mutex<PlaybackClock>,
}

impl ClockTransport {
    pub fn new() -> Self {
        Self {
            clock: Mutex::new(PlaybackClock::new()),
        }
    }
}

impl AudioTransport for ClockTransport {
    fn position_secs(&self) -> f64 {
        self.clock.lock().position_secs()
    }

    fn is_playing(&self) -> bool {
        self.clock.lock().is_playing()
    }

    fn play(&self) {
        self.clock.lock().play();
    }

    fn pause(&self) {
        self.clock.lock().pause();
    }

    fn seek_secs(&self, secs: f64) {
        self.clock.lock().seek_secs(secs);
    }
}
