//! Playback sources: what external collaborators hand the engine.
//!
//! Route/page UI, asset discovery, and manifest loading live outside this
//! repository; they show up here only as resolved URLs, in-memory data,
//! and the three-parameter deep-link contract.

use serde::{Deserialize, Serialize};

use crate::transcript::TranscriptInput;
use crate::visualizer::RendererHandle;

/// Where caption data comes from.
///
/// In-memory input takes precedence over a URL; when both are supplied
/// no fetch occurs.
#[derive(Debug, Clone)]
pub enum TranscriptSource {
    /// Transcript supplied directly, in either accepted shape.
    Inline(TranscriptInput),

    /// URL resolving to a JSON transcript.
    Remote(String),

    /// No captions available.
    None,
}

/// Where the visual renderer comes from.
#[derive(Clone)]
pub enum VisualizerSource {
    /// Externally hosted module, loaded at runtime.
    Remote {
        url: String,
        /// Explicit binding name; derived from the URL when absent.
        export_hint: Option<String>,
    },

    /// Renderer supplied in-process; bypasses the loader entirely.
    InProcess(RendererHandle),

    /// No visual layer.
    None,
}

impl std::fmt::Debug for VisualizerSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VisualizerSource::Remote { url, export_hint } => f
                .debug_struct("Remote")
                .field("url", url)
                .field("export_hint", export_hint)
                .finish(),
            VisualizerSource::InProcess(handle) => {
                f.debug_tuple("InProcess").field(&handle.name()).finish()
            }
            VisualizerSource::None => write!(f, "None"),
        }
    }
}

/// Everything the engine needs to start playback.
#[derive(Debug, Clone)]
pub struct PlaybackSource {
    /// Location of the authoritative audio asset.
    pub audio_url: String,

    /// Caption input.
    pub transcript: TranscriptSource,

    /// Visual renderer input.
    pub visualizer: VisualizerSource,
}

/// The three URL query parameters of the deep-link contract, each a
/// URL-encoded absolute URL. The engine is not usable until all three
/// are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeepLink {
    pub audio: String,
    pub transcript: String,
    pub visualizer: String,
}

/// Deep-link parse failures: the "content not ready" condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeepLinkError {
    #[error("missing deep-link parameter: {0}")]
    MissingParam(&'static str),

    #[error("malformed percent-encoding in parameter {0}")]
    BadEncoding(&'static str),
}

impl DeepLink {
    /// Parse the deep-link parameters from a URL or bare query string.
    pub fn parse(url_or_query: &str) -> Result<Self, DeepLinkError> {
        let query = url_or_query
            .split_once('?')
            .map(|(_, q)| q)
            .unwrap_or(url_or_query);

        let mut audio = None;
        let mut transcript = None;
        let mut visualizer = None;

        for pair in query.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "audio" => audio = Some(decode("audio", value)?),
                "transcript" => transcript = Some(decode("transcript", value)?),
                "visualizer" => visualizer = Some(decode("visualizer", value)?),
                _ => {}
            }
        }

        Ok(Self {
            audio: audio.ok_or(DeepLinkError::MissingParam("audio"))?,
            transcript: transcript.ok_or(DeepLinkError::MissingParam("transcript"))?,
            visualizer: visualizer.ok_or(DeepLinkError::MissingParam("visualizer"))?,
        })
    }

    /// Turn a parsed deep link into a playback source.
    pub fn into_source(self) -> PlaybackSource {
        PlaybackSource {
            audio_url: self.audio,
            transcript: TranscriptSource::Remote(self.transcript),
            visualizer: VisualizerSource::Remote {
                url: self.visualizer,
                export_hint: None,
            },
        }
    }
}

fn decode(param: &'static str, value: &str) -> Result<String, DeepLinkError> {
    urlencoding::decode(value)
        .map(|decoded| decoded.into_owned())
        .map_err(|_| DeepLinkError::BadEncoding(param))
}
