//! Session state and command handling.
//!
//! `SessionCore` owns every piece of per-session state and advances it
//! synchronously: one tick in, one overlay frame plus events and
//! effects out. The async shell in [`crate::session`] only moves
//! messages and executes effects, which keeps the interesting behavior
//! testable without a runtime.

use soundstage_common::config::PlayerTuning;
use soundstage_overlay_model::{
    OrientationLock, OverlayMode, PlaybackSource, RendererHandle, ScaleState, Scene, Sentence,
    Size,
};
use soundstage_render_overlay::{compose, OverlayFrame, OverlayInputs, SceneInfo};
use soundstage_sync_core::captions::active_sentence;
use soundstage_sync_core::scale::compute_scale_state;
use soundstage_sync_core::SceneTracker;

use crate::fullscreen::{FullscreenAction, FullscreenController, FullscreenState};
use crate::transport::PlaybackTime;

/// A tick below this position counts as "playback has not started".
const FIRST_TICK_EPSILON_MS: f64 = 10.0;

/// Everything needed to start a session.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Audio, transcript, and visualizer inputs.
    pub source: PlaybackSource,

    /// Presentation mode; selects the base canvas and orientation lock.
    pub mode: OverlayMode,

    /// Show the "scene N / total" debug badge.
    pub scene_debug: bool,

    /// Externally supplied scene boundaries, if any. A renderer that
    /// reports its own boundaries overrides these.
    pub scenes: Vec<Scene>,

    /// Timing knobs.
    pub tuning: PlayerTuning,
}

impl PlayerConfig {
    pub fn new(source: PlaybackSource) -> Self {
        Self {
            source,
            mode: OverlayMode::default(),
            scene_debug: false,
            scenes: Vec::new(),
            tuning: PlayerTuning::default(),
        }
    }
}

/// Commands into a running session. Everything external flows through
/// this one channel; there are no imperative cross-component handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCommand {
    /// Jump to a scene chosen by the user (e.g., from a menu).
    SelectScene { index: usize, start_ms: u64 },

    /// Enable or disable the caption layer.
    SetCaptions(bool),

    /// Toggle control visibility; also nudges playback to start.
    ToggleControls,

    /// Ask the platform for fullscreen presentation.
    RequestFullscreen,

    /// Ask the platform to leave fullscreen.
    ExitFullscreen,

    /// The host observed a platform fullscreen change.
    PlatformFullscreenChanged(bool),

    /// The host observed a resize or orientation change.
    GeometryChanged,

    /// Tear the session down.
    Shutdown,
}

/// Events a session reports to its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerEvent {
    /// The renderer published its authoritative scene list (fires once).
    SceneSetup(Vec<Scene>),

    /// The active scene changed to this index.
    SceneChanged(usize),

    /// A renderer resolved and the visual layer is available.
    RendererReady,

    /// No renderer could be resolved; overlay continues without one.
    RendererUnavailable(String),

    /// Transcript could not be loaded; captions stay empty.
    TranscriptUnavailable(String),
}

/// Side effects for the shell to execute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEffect {
    /// Seek the transport (seconds, its native unit).
    Seek { secs: f64 },

    /// Start or resume the transport.
    StartPlayback,

    /// Re-measure geometry and rescale after the settle delay.
    ScheduleRescale,

    /// Forward a fullscreen-enter request to the platform.
    PlatformEnter,

    /// Forward a fullscreen-exit request to the platform.
    PlatformExit,

    /// Lock orientation (best effort, failures swallowed).
    LockOrientation(OrientationLock),

    /// Release the orientation lock.
    UnlockOrientation,
}

/// Events and effects produced by one state step.
#[derive(Debug, Default)]
pub struct StepOutput {
    pub events: Vec<PlayerEvent>,
    pub effects: Vec<SessionEffect>,
}

/// The synchronous state of one playback session.
pub struct SessionCore {
    mode: OverlayMode,
    scene_debug: bool,
    tuning: PlayerTuning,
    tracker: SceneTracker,
    sentences: Vec<Sentence>,
    scale: ScaleState,
    fullscreen: FullscreenController,
    captions_enabled: bool,
    controls_visible: bool,
    has_renderer: bool,
    scaled_once: bool,
}

impl SessionCore {
    pub fn new(
        mode: OverlayMode,
        scene_debug: bool,
        scenes: Vec<Scene>,
        tuning: PlayerTuning,
    ) -> Self {
        let tracker = match SceneTracker::with_scenes(scenes) {
            Ok(tracker) => tracker,
            Err(error) => {
                tracing::warn!(%error, "Ignoring invalid externally supplied scene list");
                SceneTracker::new()
            }
        };

        Self {
            mode,
            scene_debug,
            tuning,
            tracker,
            sentences: Vec::new(),
            scale: ScaleState::identity(mode),
            fullscreen: FullscreenController::new(mode),
            captions_enabled: false,
            controls_visible: true,
            has_renderer: false,
            scaled_once: false,
        }
    }

    /// Advance one tick: single time reading in, frame plus step out.
    pub fn handle_tick(&mut self, time: PlaybackTime) -> (OverlayFrame, StepOutput) {
        let mut step = StepOutput::default();

        // First non-zero tick: layout has had a chance to settle, so the
        // initial measurement can finally happen.
        if !self.scaled_once && time.current_ms > FIRST_TICK_EPSILON_MS {
            self.scaled_once = true;
            step.effects.push(SessionEffect::ScheduleRescale);
        }

        if let Some(index) = self.tracker.update(time.current_ms) {
            step.events.push(PlayerEvent::SceneChanged(index));
        }

        (self.compose_frame(time.current_ms), step)
    }

    /// Apply a command from the host.
    pub fn apply_command(&mut self, command: PlayerCommand) -> StepOutput {
        let mut step = StepOutput::default();

        match command {
            PlayerCommand::SelectScene { index, start_ms } => {
                // Out-of-range selection is a no-op, never an error.
                if self.tracker.select(index).is_some() {
                    step.effects.push(SessionEffect::Seek {
                        secs: start_ms as f64 / 1000.0,
                    });
                }
            }
            PlayerCommand::SetCaptions(enabled) => {
                self.captions_enabled = enabled;
            }
            PlayerCommand::ToggleControls => {
                self.controls_visible = !self.controls_visible;
                step.effects.push(SessionEffect::StartPlayback);
            }
            PlayerCommand::RequestFullscreen => {
                let actions = self.fullscreen.request_enter();
                step.effects.extend(map_fullscreen_actions(&actions));
            }
            PlayerCommand::ExitFullscreen => {
                let actions = self.fullscreen.request_exit();
                step.effects.extend(map_fullscreen_actions(&actions));
            }
            PlayerCommand::PlatformFullscreenChanged(active) => {
                let actions = self.fullscreen.platform_changed(active);
                step.effects.extend(map_fullscreen_actions(&actions));
            }
            PlayerCommand::GeometryChanged => {
                step.effects.push(SessionEffect::ScheduleRescale);
            }
            PlayerCommand::Shutdown => {
                // The shell ends the loop; nothing to do here.
            }
        }

        step
    }

    /// A renderer resolved (remote or in-process).
    pub fn renderer_resolved(&mut self, handle: &RendererHandle) -> StepOutput {
        let mut step = StepOutput::default();
        self.has_renderer = true;
        step.events.push(PlayerEvent::RendererReady);

        if let Some(scenes) = handle.scene_boundaries() {
            if !scenes.is_empty() {
                match self.tracker.report_scenes(scenes.clone()) {
                    Ok(()) => step.events.push(PlayerEvent::SceneSetup(scenes)),
                    Err(error) => {
                        tracing::warn!(%error, renderer = handle.name(),
                            "Renderer reported an invalid scene list");
                    }
                }
            }
        }

        // Module load completion changes layout; measure again.
        step.effects.push(SessionEffect::ScheduleRescale);
        step
    }

    /// Replace the caption sentences (transcript resolved).
    pub fn set_sentences(&mut self, sentences: Vec<Sentence>) {
        self.sentences = sentences;
    }

    /// Recompute the scale from fresh measurements.
    pub fn rescale(&mut self, container: Size, viewport: Size) {
        self.scale = compute_scale_state(self.mode, container, viewport, self.fullscreen.active());
        tracing::debug!(scale = self.scale.scale, fullscreen = self.scale.is_fullscreen,
            "Rescaled overlay canvas");
    }

    /// Compose the overlay frame for a playback time.
    pub fn compose_frame(&self, time_ms: f64) -> OverlayFrame {
        let scene_info = (!self.tracker.is_empty()).then(|| SceneInfo {
            current_index: self.tracker.current_index(),
            total: self.tracker.total(),
        });

        compose(&OverlayInputs {
            time_ms,
            scale: self.scale,
            has_renderer: self.has_renderer,
            captions_enabled: self.captions_enabled,
            active_sentence: active_sentence(
                &self.sentences,
                time_ms,
                self.tuning.caption_grace_ms,
            ),
            scene_debug: self.scene_debug,
            scene_info,
        })
    }

    pub fn captions_enabled(&self) -> bool {
        self.captions_enabled
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn fullscreen_state(&self) -> FullscreenState {
        self.fullscreen.state()
    }

    pub fn scale(&self) -> ScaleState {
        self.scale
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }
}

fn map_fullscreen_actions(actions: &[FullscreenAction]) -> Vec<SessionEffect> {
    actions
        .iter()
        .map(|action| match action {
            FullscreenAction::RequestEnter => SessionEffect::PlatformEnter,
            FullscreenAction::RequestExit => SessionEffect::PlatformExit,
            FullscreenAction::LockOrientation(target) => SessionEffect::LockOrientation(*target),
            FullscreenAction::UnlockOrientation => SessionEffect::UnlockOrientation,
            FullscreenAction::ScheduleRescale => SessionEffect::ScheduleRescale,
        })
        .collect()
}
