//! Error types shared across Soundstage crates.

use std::path::PathBuf;

/// Top-level error type for Soundstage operations.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("Playback error: {message}")]
    Playback { message: String },

    #[error("Module error: {message}")]
    Module { message: String },

    #[error("Transcript error: {message}")]
    Transcript { message: String },

    #[error("Scene error: {message}")]
    Scene { message: String },

    #[error("Fullscreen error: {message}")]
    Fullscreen { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using StageError.
pub type StageResult<T> = Result<T, StageError>;

impl StageError {
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback {
            message: msg.into(),
        }
    }

    pub fn module(msg: impl Into<String>) -> Self {
        Self::Module {
            message: msg.into(),
        }
    }

    pub fn transcript(msg: impl Into<String>) -> Self {
        Self::Transcript {
            message: msg.into(),
        }
    }

    pub fn scene(msg: impl Into<String>) -> Self {
        Self::Scene {
            message: msg.into(),
        }
    }

    pub fn fullscreen(msg: impl Into<String>) -> Self {
        Self::Fullscreen {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
