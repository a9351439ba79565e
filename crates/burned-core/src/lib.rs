//! BurnedPlayer Core - Player controller for the embeddable video widget
//!
//! This crate provides the platform-independent part of the widget:
//! - Playback state machine over an abstract media element
//! - Streaming engine (hls.js) attachment and rendition selection
//! - Controls auto-hide timer
//! - Page-wide load-once engine acquisition
//! - Theme stylesheet, time formatting and embed URL glue
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       BurnedPlayer Core                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐           │
//! │  │ MediaElement │  │ EngineFactory│  │  Scheduler   │           │
//! │  │   (events)   │  │ StreamEngine │  │   (timer)    │           │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘           │
//! │         │                 │                 │                   │
//! │         └─────────────────┼─────────────────┘                   │
//! │                           │                                     │
//! │                    ┌──────┴──────┐                              │
//! │                    │   Player    │                              │
//! │                    │ Controller  │                              │
//! │                    └──────┬──────┘                              │
//! │                           │                                     │
//! │  ┌──────────────┐  ┌──────┴──────┐  ┌──────────────┐            │
//! │  │   Quality    │  │    View     │  │   Controls   │            │
//! │  │    State     │  │  (updates)  │  │  Visibility  │            │
//! │  └──────────────┘  └─────────────┘  └──────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod capability;
pub mod config;
pub mod controller;
pub mod embed;
pub mod engine;
pub mod error;
pub mod format;
pub mod media;
pub mod quality;
pub mod scheduler;
pub mod theme;
pub mod types;
pub mod view;
pub mod visibility;

pub use capability::{Acquisition, LoadOnce, LoadStatus};
pub use config::PlayerConfig;
pub use controller::{PlayerController, PlayerSnapshot};
pub use engine::{AttachmentId, EngineConfig, EngineEvent, EngineFactory, Level, StreamEngine};
pub use error::{Error, Result};
pub use media::{MediaElement, MediaEvent, PlayOutcome};
pub use quality::QualityState;
pub use scheduler::{Scheduler, TimerToken};
pub use types::*;
pub use view::{LoadDisplay, QualityOption, UiEvent, View};
pub use visibility::{ControlsVisibility, HIDE_DELAY};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log library initialization
pub fn init() {
    tracing::info!(version = VERSION, "BurnedPlayer Core initialized");
}
