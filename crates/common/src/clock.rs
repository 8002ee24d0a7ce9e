//! Playback clock and tick pacing utilities.
//!
//! The authoritative time source for an overlay session is the audio
//! transport; its native unit is seconds. This module provides:
//! - A monotonic playback clock for hosts without a real audio element
//! - Pacing for fixed-rate tick loops
//! - Conversions between seconds and milliseconds

use std::time::Instant;

/// A playback position clock with play/pause/seek semantics.
///
/// Position advances monotonically (via `Instant`) while playing and
/// holds still while paused. Used by headless transports and tests;
/// real hosts sample their audio element instead.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    /// Instant the current play/pause segment began.
    origin: Instant,

    /// Playback position (seconds) at `origin`.
    base_secs: f64,

    /// Whether position is currently advancing.
    playing: bool,

    /// Wall-clock time at clock creation (ISO 8601 string).
    started_wall: String,
}

impl PlaybackClock {
    /// Create a paused clock at position zero.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            base_secs: 0.0,
            playing: false,
            started_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Current playback position in seconds.
    pub fn position_secs(&self) -> f64 {
        if self.playing {
            self.base_secs + self.origin.elapsed().as_secs_f64()
        } else {
            self.base_secs
        }
    }

    /// Whether the clock is advancing.
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start advancing from the current position.
    pub fn play(&mut self) {
        if !self.playing {
            self.origin = Instant::now();
            self.playing = true;
        }
    }

    /// Freeze the position.
    pub fn pause(&mut self) {
        if self.playing {
            self.base_secs = self.position_secs();
            self.playing = false;
        }
    }

    /// Jump to a position in seconds. Play/pause state is unchanged.
    pub fn seek_secs(&mut self, secs: f64) {
        self.base_secs = secs.max(0.0);
        self.origin = Instant::now();
    }

    /// Wall-clock time at clock creation.
    pub fn started_wall(&self) -> &str {
        &self.started_wall
    }

    /// Convert seconds to milliseconds.
    pub fn secs_to_ms(secs: f64) -> f64 {
        secs * 1000.0
    }

    /// Convert milliseconds to seconds.
    pub fn ms_to_secs(ms: f64) -> f64 {
        ms / 1000.0
    }
}

impl Default for PlaybackClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Pacing for a fixed-rate tick loop.
#[derive(Debug)]
pub struct TickPacer {
    target_interval_ms: f64,
    last_tick_ms: Option<f64>,
}

impl TickPacer {
    /// Create a pacer targeting the given Hz rate.
    pub fn new(target_hz: u32) -> Self {
        Self {
            target_interval_ms: 1000.0 / target_hz.max(1) as f64,
            last_tick_ms: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ms: f64) -> bool {
        match self.last_tick_ms {
            None => {
                self.last_tick_ms = Some(current_ms);
                true
            }
            Some(last) if current_ms >= last + self.target_interval_ms => {
                self.last_tick_ms = Some(current_ms);
                true
            }
            _ => false,
        }
    }

    /// Target interval in milliseconds.
    pub fn interval_ms(&self) -> f64 {
        self.target_interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clock_is_paused_at_zero() {
        let clock = PlaybackClock::new();
        assert!(!clock.is_playing());
        assert_eq!(clock.position_secs(), 0.0);
    }

    #[test]
    fn test_seek_moves_position_while_paused() {
        let mut clock = PlaybackClock::new();
        clock.seek_secs(12.5);
        assert!((clock.position_secs() - 12.5).abs() < 1e-9);

        clock.seek_secs(-3.0);
        assert_eq!(clock.position_secs(), 0.0); // clamped
    }

    #[test]
    fn test_pause_holds_position() {
        let mut clock = PlaybackClock::new();
        clock.seek_secs(5.0);
        clock.play();
        clock.pause();
        let held = clock.position_secs();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert_eq!(clock.position_secs(), held);
    }

    #[test]
    fn test_play_advances_position() {
        let mut clock = PlaybackClock::new();
        clock.play();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(clock.position_secs() > 0.0);
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(PlaybackClock::secs_to_ms(1.5), 1500.0);
        assert_eq!(PlaybackClock::ms_to_secs(250.0), 0.25);
    }

    #[test]
    fn test_tick_pacer() {
        let mut pacer = TickPacer::new(60);
        assert!(pacer.should_tick(0.0)); // first tick always fires
        assert!(!pacer.should_tick(1.0)); // 1ms later, too soon
        assert!(pacer.should_tick(17.0)); // ~17ms later, should fire (60Hz ~ 16.67ms)
    }
}
