//! Fullscreen presentation state machine.
//!
//! ```text
//! Inline ──request──► Entering ──platform──► Fullscreen
//!   ▲                                            │
//!   └── platform ◄── Exiting ◄──── request ──────┘
//! ```
//!
//! The machine is pure: transitions emit actions the session executes
//! against the platform. Platform-change notifications, not request
//! acknowledgements, drive the confirmed states, because the platform
//! can enter or leave fullscreen on its own (external navigation,
//! escape key, window manager).

use soundstage_overlay_model::{OrientationLock, OverlayMode};

/// Presentation states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenState {
    Inline,
    Entering,
    Fullscreen,
    Exiting,
}

/// Actions for the session to execute after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenAction {
    /// Ask the platform to enter fullscreen.
    RequestEnter,

    /// Ask the platform to exit fullscreen.
    RequestExit,

    /// Lock orientation to the mode's target (best effort).
    LockOrientation(OrientationLock),

    /// Release the orientation lock.
    UnlockOrientation,

    /// Re-measure and rescale once layout settles.
    ScheduleRescale,
}

/// The fullscreen controller for one session.
#[derive(Debug, Clone)]
pub struct FullscreenController {
    state: FullscreenState,
    mode: OverlayMode,
}

impl FullscreenController {
    pub fn new(mode: OverlayMode) -> Self {
        Self {
            state: FullscreenState::Inline,
            mode,
        }
    }

    pub fn state(&self) -> FullscreenState {
        self.state
    }

    /// Whether the confirmed presentation is fullscreen.
    pub fn active(&self) -> bool {
        self.state == FullscreenState::Fullscreen
    }

    /// User asked to enter fullscreen.
    pub fn request_enter(&mut self) -> Vec<FullscreenAction> {
        match self.state {
            FullscreenState::Inline => {
                self.state = FullscreenState::Entering;
                vec![FullscreenAction::RequestEnter]
            }
            _ => Vec::new(),
        }
    }

    /// User asked to leave fullscreen.
    pub fn request_exit(&mut self) -> Vec<FullscreenAction> {
        match self.state {
            FullscreenState::Fullscreen | FullscreenState::Entering => {
                self.state = FullscreenState::Exiting;
                vec![FullscreenAction::RequestExit]
            }
            _ => Vec::new(),
        }
    }

    /// The platform reported its fullscreen element changed.
    pub fn platform_changed(&mut self, fullscreen_active: bool) -> Vec<FullscreenAction> {
        if fullscreen_active {
            if self.state == FullscreenState::Fullscreen {
                return Vec::new();
            }
            self.state = FullscreenState::Fullscreen;
            vec![
                FullscreenAction::LockOrientation(self.mode.orientation_lock()),
                FullscreenAction::ScheduleRescale,
            ]
        } else {
            if self.state == FullscreenState::Inline {
                return Vec::new();
            }
            self.state = FullscreenState::Inline;
            vec![
                FullscreenAction::UnlockOrientation,
                FullscreenAction::ScheduleRescale,
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_round_trip() {
        let mut fs = FullscreenController::new(OverlayMode::Landscape);
        assert_eq!(fs.state(), FullscreenState::Inline);

        assert_eq!(fs.request_enter(), vec![FullscreenAction::RequestEnter]);
        assert_eq!(fs.state(), FullscreenState::Entering);
        assert!(!fs.active());

        let actions = fs.platform_changed(true);
        assert_eq!(
            actions,
            vec![
                FullscreenAction::LockOrientation(OrientationLock::Landscape),
                FullscreenAction::ScheduleRescale,
            ]
        );
        assert!(fs.active());

        assert_eq!(fs.request_exit(), vec![FullscreenAction::RequestExit]);
        assert_eq!(fs.state(), FullscreenState::Exiting);

        let actions = fs.platform_changed(false);
        assert_eq!(
            actions,
            vec![
                FullscreenAction::UnlockOrientation,
                FullscreenAction::ScheduleRescale,
            ]
        );
        assert_eq!(fs.state(), FullscreenState::Inline);
    }

    #[test]
    fn test_platform_driven_exit() {
        let mut fs = FullscreenController::new(OverlayMode::Portrait);
        fs.request_enter();
        fs.platform_changed(true);

        // The platform exits on its own, no request from us.
        let actions = fs.platform_changed(false);
        assert!(actions.contains(&FullscreenAction::UnlockOrientation));
        assert_eq!(fs.state(), FullscreenState::Inline);
    }

    #[test]
    fn test_portrait_locks_portrait() {
        let mut fs = FullscreenController::new(OverlayMode::Portrait);
        fs.request_enter();
        let actions = fs.platform_changed(true);
        assert!(actions
            .contains(&FullscreenAction::LockOrientation(OrientationLock::Portrait)));
    }

    #[test]
    fn test_redundant_requests_are_noops() {
        let mut fs = FullscreenController::new(OverlayMode::Landscape);
        assert!(fs.request_exit().is_empty()); // inline already
        fs.request_enter();
        assert!(fs.request_enter().is_empty()); // already entering

        fs.platform_changed(true);
        assert!(fs.platform_changed(true).is_empty()); // no change
    }
}
