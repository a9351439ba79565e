//! Error types for BurnedPlayer Core

use thiserror::Error;

/// Result type alias for player operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown in the error panel when the stream cannot be loaded
pub const STREAM_FAILED_MESSAGE: &str = "Failed to load video stream";

/// Message shown in the error panel when neither hls.js nor the browser can play HLS
pub const UNSUPPORTED_MESSAGE: &str = "HLS not supported in this browser";

/// Player error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lifecycle errors
    #[error("Mount target not found: {0}")]
    MountTargetNotFound(String),

    #[error("Failed to load streaming engine: {0}")]
    CapabilityLoadFailed(String),

    #[error("Player already destroyed")]
    AlreadyDestroyed,

    // Stream errors
    #[error("Fatal stream error: {0}")]
    StreamFatal(String),

    #[error("Stream error: {0}")]
    StreamNonFatal(String),

    #[error("Streaming not supported on this platform")]
    UnsupportedPlatform,

    // Selection errors
    #[error("Rendition not found: {label}")]
    RenditionNotFound { label: String },

    // Playback errors
    #[error("Playback rejected: {0}")]
    PlaybackRejected(String),

    #[error("Invalid player state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    /// Returns true if the player keeps working after this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::CapabilityLoadFailed(_)
                | Error::StreamNonFatal(_)
                | Error::RenditionNotFound { .. }
                | Error::PlaybackRejected(_)
        )
    }

    /// Text for the in-overlay error panel, if this error is user-visible
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            Error::StreamFatal(_) => Some(STREAM_FAILED_MESSAGE),
            Error::UnsupportedPlatform => Some(UNSUPPORTED_MESSAGE),
            _ => None,
        }
    }

    /// Returns the error code used in log fields
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::MountTargetNotFound(_) => "MOUNT_NOT_FOUND",
            Error::CapabilityLoadFailed(_) => "CAPABILITY_LOAD",
            Error::AlreadyDestroyed => "DESTROYED",
            Error::StreamFatal(_) => "STREAM_FATAL",
            Error::StreamNonFatal(_) => "STREAM_NON_FATAL",
            Error::UnsupportedPlatform => "UNSUPPORTED",
            Error::RenditionNotFound { .. } => "NO_RENDITION",
            Error::PlaybackRejected(_) => "PLAY_REJECTED",
            Error::InvalidStateTransition { .. } => "INVALID_STATE",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}
