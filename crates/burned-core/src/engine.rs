//! Streaming engine (decode capability) abstraction
//!
//! The adaptive-streaming engine is an external collaborator. In the browser it
//! is hls.js; the controller only sees [`EngineFactory`] and [`StreamEngine`].
//! Each engine instance is tagged with an [`AttachmentId`] so that events from
//! an engine that has since been replaced are recognized and dropped.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one engine attachment of one controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AttachmentId(pub u64);

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Engine construction options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Demux in a web worker
    #[serde(rename = "enableWorker")]
    pub worker_enabled: bool,
    /// Low-latency live mode
    pub low_latency_mode: bool,
    /// Seconds of already-played media kept in the buffer
    #[serde(rename = "backBufferLength")]
    pub back_buffer_seconds: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            worker_enabled: true,
            low_latency_mode: true,
            back_buffer_seconds: 90.0,
        }
    }
}

/// A rendition reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    /// Vertical resolution in pixels
    pub height: u32,
}

impl Level {
    pub fn new(height: u32) -> Self {
        Self { height }
    }

    /// User-facing label, e.g. `720p`
    pub fn label(&self) -> String {
        format!("{}p", self.height)
    }
}

/// Events emitted by the engine
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Manifest parsed; levels are available
    ManifestParsed,
    /// Engine error
    Error { fatal: bool, details: String },
}

/// One engine instance, attached to the player's media element
pub trait StreamEngine {
    fn load_source(&mut self, url: &str);

    /// Bind the engine to the player's media element
    fn attach_media(&mut self);

    /// Levels in engine order
    fn levels(&self) -> Vec<Level>;

    /// Pin a level by index; `-1` hands control back to adaptive selection
    fn set_current_level(&mut self, index: i32);

    fn subtitle_track_count(&self) -> usize {
        0
    }

    /// Tear down the engine and drop its event subscriptions
    fn destroy(&mut self);
}

/// Creates engines once the capability has been acquired
pub trait EngineFactory {
    /// Whether the engine can run on this platform
    fn is_supported(&self) -> bool;

    /// Build an engine whose events are delivered tagged with `attachment`
    fn create(&self, config: &EngineConfig, attachment: AttachmentId) -> Result<Box<dyn StreamEngine>>;
}
