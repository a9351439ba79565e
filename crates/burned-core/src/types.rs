//! Core types for BurnedPlayer

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique player instance identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Load phase of the current source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPhase {
    /// No source assigned
    Idle,
    /// Waiting for the engine or manifest
    Loading,
    /// Stream is playable
    Ready,
    /// Source failed; needs a fresh source
    Errored,
}

impl LoadPhase {
    /// Check if transition to target phase is valid
    pub fn can_transition_to(&self, target: LoadPhase) -> bool {
        use LoadPhase::*;
        matches!(
            (self, target),
            // From Idle
            (Idle, Loading) | (Idle, Errored) |
            // From Loading
            (Loading, Loading) | (Loading, Ready) | (Loading, Errored) | (Loading, Idle) |
            // From Ready
            (Ready, Loading) | (Ready, Errored) | (Ready, Idle) |
            // From Errored
            (Errored, Loading) | (Errored, Idle)
        )
    }
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadPhase::Idle => write!(f, "idle"),
            LoadPhase::Loading => write!(f, "loading"),
            LoadPhase::Ready => write!(f, "ready"),
            LoadPhase::Errored => write!(f, "errored"),
        }
    }
}

/// User-facing player state, derived from the load phase and the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerState {
    Idle,
    Loading,
    Paused,
    Playing,
    Errored,
}

impl PlayerState {
    pub fn derive(phase: LoadPhase, is_playing: bool) -> Self {
        match phase {
            LoadPhase::Idle => PlayerState::Idle,
            LoadPhase::Loading => PlayerState::Loading,
            LoadPhase::Ready if is_playing => PlayerState::Playing,
            LoadPhase::Ready => PlayerState::Paused,
            LoadPhase::Errored => PlayerState::Errored,
        }
    }
}

impl fmt::Display for PlayerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerState::Idle => write!(f, "idle"),
            PlayerState::Loading => write!(f, "loading"),
            PlayerState::Paused => write!(f, "paused"),
            PlayerState::Playing => write!(f, "playing"),
            PlayerState::Errored => write!(f, "errored"),
        }
    }
}

/// Playback state mirrored from the media element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackState {
    /// Last play/pause event reported by the media element
    pub is_playing: bool,
    /// Current position in seconds
    pub current_time: f64,
    /// Content duration in seconds, once metadata is loaded
    pub duration: Option<f64>,
    /// Volume in [0, 1]
    pub volume: f64,
    /// Muted flag
    pub muted: bool,
    /// Waiting for the stream to become playable
    pub is_loading: bool,
    /// User-visible error message
    pub error: Option<String>,
    /// Player root is fullscreen
    pub is_fullscreen: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            is_playing: false,
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            muted: false,
            is_loading: false,
            error: None,
            is_fullscreen: false,
        }
    }
}

impl PlaybackState {
    /// Record a reported position, keeping it within `[0, duration]`
    pub fn set_current_time(&mut self, time: f64) {
        let time = if time.is_finite() { time.max(0.0) } else { 0.0 };
        self.current_time = match self.duration {
            Some(duration) => time.min(duration),
            None => time,
        };
    }

    /// Record the reported duration; NaN and infinite durations stay unknown
    pub fn set_duration(&mut self, duration: f64) {
        self.duration = (duration.is_finite() && duration >= 0.0).then_some(duration);
        if let Some(duration) = self.duration {
            self.current_time = self.current_time.min(duration);
        }
    }

    /// Reset position data for a new source
    pub fn reset_timeline(&mut self) {
        self.current_time = 0.0;
        self.duration = None;
    }
}
