//! Run a headless playback session and print its events.
//!
//! Drives a real session with a monotonic-clock transport: scene
//! changes, renderer resolution, and caption state all behave exactly
//! as they would under a UI host, minus the pixels.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use soundstage_common::config::PlayerTuning;
use soundstage_module_host::provider::derive_export_name;
use soundstage_module_host::{ExportRegistry, RegistryProvider, RemoteModuleLoader, SharedModuleCache};
use soundstage_overlay_model::{
    parse_transcript, ModuleExports, OverlayMode, PlaybackSource, RendererHandle, Scene,
    Size, TranscriptSource, Visualizer, VisualizerSource,
};
use soundstage_player::{
    AudioTransport, ClockTransport, FixedGeometry, HeadlessPlatform, PlayerConfig, PlayerEvent,
    PlayerSession,
};

/// Built-in renderer that cuts a scene every five seconds.
struct DemoVisualizer {
    scenes: Vec<Scene>,
}

impl DemoVisualizer {
    fn covering(duration_secs: u64) -> Self {
        let total_ms = duration_secs.max(1) * 1000;
        let scenes = (0..total_ms)
            .step_by(5000)
            .map(|start| Scene::new(start, (start + 5000).min(total_ms)))
            .collect();
        Self { scenes }
    }
}

impl Visualizer for DemoVisualizer {
    fn name(&self) -> &str {
        "demo-visualizer"
    }

    fn scene_boundaries(&self) -> Option<Vec<Scene>> {
        Some(self.scenes.clone())
    }
}

#[allow(clippy::too_many_arguments)]
pub async fn run(
    audio: String,
    transcript: Option<String>,
    visualizer: Option<String>,
    export_name: Option<String>,
    mode: String,
    scene_debug: bool,
    demo_visualizer: bool,
    duration_secs: u64,
) -> anyhow::Result<()> {
    let mode = match mode.as_str() {
        "portrait" => OverlayMode::Portrait,
        "landscape" => OverlayMode::Landscape,
        other => anyhow::bail!("Unknown mode '{other}' (expected landscape or portrait)"),
    };

    let transcript = resolve_transcript_arg(transcript)?;
    let tuning = PlayerTuning::default();

    // The registry plays the role of the host runtime's global bindings;
    // --demo-visualizer publishes a built-in module there so a remote
    // URL resolves end to end.
    let registry = Arc::new(ExportRegistry::new());
    let demo: RendererHandle = Arc::new(DemoVisualizer::covering(duration_secs));

    let visualizer_source = match visualizer {
        Some(url) => {
            if demo_visualizer {
                let binding = derive_export_name(&url, export_name.as_deref());
                registry.publish(binding, ModuleExports::Renderer(demo.clone()));
            }
            VisualizerSource::Remote {
                url,
                export_hint: export_name.clone(),
            }
        }
        None if demo_visualizer => VisualizerSource::InProcess(demo.clone()),
        None => VisualizerSource::None,
    };

    let mut provider = RegistryProvider::new(registry)
        .with_export_grace(Duration::from_millis(tuning.export_grace_ms));
    if let Some(name) = export_name {
        provider = provider.with_export_hint(name);
    }
    let loader = RemoteModuleLoader::new(Arc::new(SharedModuleCache::new()), provider)
        .with_poll_interval(Duration::from_millis(tuning.module_poll_ms));

    let mut config = PlayerConfig::new(PlaybackSource {
        audio_url: audio.clone(),
        transcript,
        visualizer: visualizer_source,
    });
    config.mode = mode;
    config.scene_debug = scene_debug;
    config.tuning = tuning;

    let transport = Arc::new(ClockTransport::new());
    let geometry = Arc::new(FixedGeometry::new(
        Size::new(960.0, 540.0),
        Size::new(1920.0, 1080.0),
    ));
    let platform = Arc::new(HeadlessPlatform);

    println!("Playing {audio} for {duration_secs}s ({mode:?})");

    let (session, mut events) = PlayerSession::spawn(
        config,
        transport.clone() as Arc<dyn AudioTransport>,
        geometry,
        platform,
        Some(loader),
    );

    session.set_captions(true);
    transport.play();

    let deadline = tokio::time::sleep(Duration::from_secs(duration_secs));
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            _ = &mut deadline => break,
            Some(event) = events.recv() => print_event(&event, transport.position_secs()),
        }
    }

    let frame = session.frames().borrow().clone();
    println!("\nFinal frame at {:.0} ms:", frame.time_ms);
    match frame.visual {
        Some(visual) => println!(
            "  Visual: {}x{} @ {:.3}x ({:?})",
            visual.width, visual.height, visual.scale, visual.anchor
        ),
        None => println!("  Visual: none"),
    }
    match frame.caption {
        Some(caption) => println!("  Caption: {}", caption.text),
        None => println!("  Caption: none"),
    }
    if let Some(badge) = frame.scene_badge {
        println!("  {}", badge.label());
    }

    session.shutdown().await;
    Ok(())
}

fn resolve_transcript_arg(arg: Option<String>) -> anyhow::Result<TranscriptSource> {
    let Some(arg) = arg else {
        return Ok(TranscriptSource::None);
    };

    if arg.starts_with("http://") || arg.starts_with("https://") {
        return Ok(TranscriptSource::Remote(arg));
    }

    let path = Path::new(&arg);
    let json = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read transcript {arg}: {e}"))?;
    let input = parse_transcript(&json)
        .map_err(|e| anyhow::anyhow!("Invalid transcript {arg}: {e}"))?;
    Ok(TranscriptSource::Inline(input))
}

fn print_event(event: &PlayerEvent, position_secs: f64) {
    match event {
        PlayerEvent::SceneSetup(scenes) => {
            println!("[{position_secs:7.2}s] renderer published {} scene(s)", scenes.len());
        }
        PlayerEvent::SceneChanged(index) => {
            println!("[{position_secs:7.2}s] scene changed -> {index}");
        }
        PlayerEvent::RendererReady => {
            println!("[{position_secs:7.2}s] renderer ready");
        }
        PlayerEvent::RendererUnavailable(message) => {
            println!("[{position_secs:7.2}s] renderer unavailable: {message}");
        }
        PlayerEvent::TranscriptUnavailable(message) => {
            println!("[{position_secs:7.2}s] transcript unavailable: {message}");
        }
    }
}
