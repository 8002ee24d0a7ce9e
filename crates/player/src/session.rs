//! The asynchronous session shell.
//!
//! Owns the cooperative tick loop: sample the transport, advance the
//! core, publish the frame, execute effects. All session state lives on
//! this one task, so teardown is deterministic: once the loop ends
//! nothing can mutate the session again, and late settle timers land on
//! a closed channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use soundstage_module_host::{ModuleProvider, RemoteModuleLoader};
use soundstage_overlay_model::{RendererHandle, Sentence, VisualizerSource};
use soundstage_render_overlay::OverlayFrame;

use crate::core::{PlayerCommand, PlayerConfig, PlayerEvent, SessionCore, SessionEffect, StepOutput};
use crate::host::{FullscreenPlatform, GeometryHost};
use crate::transcript::resolve_transcript;
use crate::transport::{AudioTransport, PlaybackTime};

/// Handle to a running playback session.
pub struct PlayerSession {
    commands: mpsc::UnboundedSender<PlayerCommand>,
    time: watch::Receiver<PlaybackTime>,
    frames: watch::Receiver<OverlayFrame>,
    task: JoinHandle<()>,
}

/// Messages from the session's own background work.
enum InternalMsg {
    TranscriptReady(Vec<Sentence>),
    TranscriptFailed(String),
    RendererResolved(RendererHandle),
    RendererFailed(String),
    Rescale,
}

impl PlayerSession {
    /// Spawn a session.
    ///
    /// Returns the handle and the event stream. `loader` is only needed
    /// when the visualizer source is remote; an in-process renderer
    /// bypasses it entirely.
    pub fn spawn<P>(
        config: PlayerConfig,
        transport: Arc<dyn AudioTransport>,
        geometry: Arc<dyn GeometryHost>,
        platform: Arc<dyn FullscreenPlatform>,
        loader: Option<RemoteModuleLoader<P>>,
    ) -> (Self, mpsc::UnboundedReceiver<PlayerEvent>)
    where
        P: ModuleProvider + 'static,
    {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (internal_tx, internal_rx) = mpsc::unbounded_channel();

        let core = SessionCore::new(
            config.mode,
            config.scene_debug,
            config.scenes.clone(),
            config.tuning.clone(),
        );

        let (time_tx, time_rx) = watch::channel(PlaybackTime::ZERO);
        let (frame_tx, frame_rx) = watch::channel(core.compose_frame(0.0));

        spawn_transcript_task(&config, internal_tx.clone());
        spawn_renderer_task(&config, loader, internal_tx.clone());

        let tuning = config.tuning.clone();
        let task = tokio::spawn(run_loop(
            core,
            transport,
            geometry,
            platform,
            command_rx,
            internal_rx,
            internal_tx,
            event_tx,
            time_tx,
            frame_tx,
            tuning.tick_rate_hz,
            Duration::from_millis(tuning.settle_delay_ms),
        ));

        (
            Self {
                commands: command_tx,
                time: time_rx,
                frames: frame_rx,
                task,
            },
            event_rx,
        )
    }

    /// Send a command; false if the session already shut down.
    pub fn command(&self, command: PlayerCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    /// Select a scene by index, validated inside the session.
    pub fn select_scene(&self, index: usize, start_ms: u64) -> bool {
        self.command(PlayerCommand::SelectScene { index, start_ms })
    }

    pub fn set_captions(&self, enabled: bool) -> bool {
        self.command(PlayerCommand::SetCaptions(enabled))
    }

    pub fn toggle_controls(&self) -> bool {
        self.command(PlayerCommand::ToggleControls)
    }

    pub fn request_fullscreen(&self) -> bool {
        self.command(PlayerCommand::RequestFullscreen)
    }

    pub fn exit_fullscreen(&self) -> bool {
        self.command(PlayerCommand::ExitFullscreen)
    }

    /// Forward a platform fullscreen-change notification.
    pub fn notify_platform_fullscreen(&self, active: bool) -> bool {
        self.command(PlayerCommand::PlatformFullscreenChanged(active))
    }

    /// Forward a resize or orientation change.
    pub fn notify_geometry_changed(&self) -> bool {
        self.command(PlayerCommand::GeometryChanged)
    }

    /// The republished playback time, updated once per tick.
    pub fn time(&self) -> watch::Receiver<PlaybackTime> {
        self.time.clone()
    }

    /// The latest composed overlay frame.
    pub fn frames(&self) -> watch::Receiver<OverlayFrame> {
        self.frames.clone()
    }

    /// Stop the tick loop and wait for the session task to finish.
    /// No callbacks fire after this returns.
    pub async fn shutdown(self) {
        let _ = self.commands.send(PlayerCommand::Shutdown);
        let _ = self.task.await;
    }
}

fn spawn_transcript_task(config: &PlayerConfig, internal_tx: mpsc::UnboundedSender<InternalMsg>) {
    let source = config.source.transcript.clone();
    let group_span_ms = config.tuning.caption_group_ms;

    tokio::spawn(async move {
        let msg = match resolve_transcript(&source, group_span_ms).await {
            Ok(sentences) => InternalMsg::TranscriptReady(sentences),
            Err(error) => {
                tracing::warn!(%error, "Failed to load transcript");
                InternalMsg::TranscriptFailed(error.to_string())
            }
        };
        let _ = internal_tx.send(msg);
    });
}

fn spawn_renderer_task<P>(
    config: &PlayerConfig,
    loader: Option<RemoteModuleLoader<P>>,
    internal_tx: mpsc::UnboundedSender<InternalMsg>,
) where
    P: ModuleProvider + 'static,
{
    match config.source.visualizer.clone() {
        VisualizerSource::InProcess(handle) => {
            let _ = internal_tx.send(InternalMsg::RendererResolved(handle));
        }
        VisualizerSource::Remote { url, .. } => match loader {
            Some(loader) => {
                tokio::spawn(async move {
                    let msg = match loader.load(&url).await {
                        Ok(Some(handle)) => InternalMsg::RendererResolved(handle),
                        Ok(None) => return, // empty URL: no renderer, not a failure
                        Err(error) => InternalMsg::RendererFailed(error.to_string()),
                    };
                    let _ = internal_tx.send(msg);
                });
            }
            None => {
                let _ = internal_tx.send(InternalMsg::RendererFailed(
                    "remote visualizer requested but no module loader configured".to_string(),
                ));
            }
        },
        VisualizerSource::None => {}
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_loop(
    mut core: SessionCore,
    transport: Arc<dyn AudioTransport>,
    geometry: Arc<dyn GeometryHost>,
    platform: Arc<dyn FullscreenPlatform>,
    mut command_rx: mpsc::UnboundedReceiver<PlayerCommand>,
    mut internal_rx: mpsc::UnboundedReceiver<InternalMsg>,
    internal_tx: mpsc::UnboundedSender<InternalMsg>,
    event_tx: mpsc::UnboundedSender<PlayerEvent>,
    time_tx: watch::Sender<PlaybackTime>,
    frame_tx: watch::Sender<OverlayFrame>,
    tick_rate_hz: u32,
    settle_delay: Duration,
) {
    let mut interval = tokio::time::interval(Duration::from_secs_f64(1.0 / tick_rate_hz.max(1) as f64));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(tick_rate_hz, "Playback session started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                // One reading per tick; everything downstream sees it.
                let time = transport.sample();
                let (frame, step) = core.handle_tick(time);
                time_tx.send_replace(time);
                frame_tx.send_replace(frame);
                execute_step(step, &transport, &platform, &internal_tx, &event_tx, settle_delay);
            }

            command = command_rx.recv() => {
                match command {
                    Some(PlayerCommand::Shutdown) | None => break,
                    Some(command) => {
                        let step = core.apply_command(command);
                        execute_step(step, &transport, &platform, &internal_tx, &event_tx, settle_delay);
                    }
                }
            }

            Some(msg) = internal_rx.recv() => {
                match msg {
                    InternalMsg::TranscriptReady(sentences) => {
                        tracing::info!(sentences = sentences.len(), "Transcript ready");
                        core.set_sentences(sentences);
                    }
                    InternalMsg::TranscriptFailed(message) => {
                        let _ = event_tx.send(PlayerEvent::TranscriptUnavailable(message));
                    }
                    InternalMsg::RendererResolved(handle) => {
                        let step = core.renderer_resolved(&handle);
                        execute_step(step, &transport, &platform, &internal_tx, &event_tx, settle_delay);
                    }
                    InternalMsg::RendererFailed(message) => {
                        let _ = event_tx.send(PlayerEvent::RendererUnavailable(message));
                    }
                    InternalMsg::Rescale => {
                        core.rescale(geometry.container_size(), geometry.viewport_size());
                    }
                }
            }
        }
    }

    tracing::info!("Playback session stopped");
}

fn execute_step(
    step: StepOutput,
    transport: &Arc<dyn AudioTransport>,
    platform: &Arc<dyn FullscreenPlatform>,
    internal_tx: &mpsc::UnboundedSender<InternalMsg>,
    event_tx: &mpsc::UnboundedSender<PlayerEvent>,
    settle_delay: Duration,
) {
    for event in step.events {
        let _ = event_tx.send(event);
    }

    for effect in step.effects {
        match effect {
            SessionEffect::Seek { secs } => transport.seek_secs(secs),
            SessionEffect::StartPlayback => transport.play(),
            SessionEffect::ScheduleRescale => {
                let internal_tx = internal_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(settle_delay).await;
                    let _ = internal_tx.send(InternalMsg::Rescale);
                });
            }
            SessionEffect::PlatformEnter => {
                if let Err(error) = platform.request_enter() {
                    tracing::warn!(%error, "Fullscreen enter request failed");
                }
            }
            SessionEffect::PlatformExit => {
                if let Err(error) = platform.request_exit() {
                    tracing::warn!(%error, "Fullscreen exit request failed");
                }
            }
            SessionEffect::LockOrientation(target) => {
                // Best effort; an unsupported or rejecting platform is fine.
                if let Err(error) = platform.lock_orientation(target) {
                    tracing::debug!(%error, "Orientation lock unavailable");
                }
            }
            SessionEffect::UnlockOrientation => platform.unlock_orientation(),
        }
    }
}
