//! Player configuration
//!
//! A [`PlayerConfig`] comes from one of two places:
//! - the options object passed to the `BurnedPlayer` constructor (deserialized with serde)
//! - the `data-*` attributes of an auto-initialized container

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Attribute marking a container for auto-initialization
pub const PLAYER_ATTRIBUTE: &str = "data-burned-player";

/// Attribute set on containers that already host a player
pub const INITIALIZED_ATTRIBUTE: &str = "data-initialized";

/// Widget configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerConfig {
    /// Stream URL; empty means no source yet
    #[serde(alias = "src")]
    pub source: String,
    /// Start playback as soon as the stream is ready
    pub autoplay: bool,
    /// Show the control overlay
    #[serde(alias = "controls")]
    pub controls_enabled: bool,
    /// CSS width applied to the container
    pub width: String,
    /// CSS height applied to the container
    pub height: String,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            source: String::new(),
            autoplay: false,
            controls_enabled: true,
            width: "100%".to_string(),
            height: "auto".to_string(),
        }
    }
}

impl PlayerConfig {
    /// Config with only a source set
    pub fn with_source(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Parse config from a JSON options object
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Build config from declarative container attributes.
    ///
    /// `attr` looks up a `data-*` key without its prefix (`"src"`, `"autoplay"`, ...).
    /// Flags follow the embed convention: autoplay only when `"true"`,
    /// controls unless `"false"`.
    pub fn from_attributes<F>(attr: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            source: attr("src").unwrap_or_default(),
            autoplay: attr("autoplay").as_deref() == Some("true"),
            controls_enabled: attr("controls").as_deref() != Some("false"),
            width: attr("width").filter(|w| !w.is_empty()).unwrap_or(defaults.width),
            height: attr("height").filter(|h| !h.is_empty()).unwrap_or(defaults.height),
        }
        .normalized()
    }

    /// The configured source, if any
    pub fn source(&self) -> Option<&str> {
        let source = self.source.trim();
        (!source.is_empty()).then_some(source)
    }

    /// Trim the source and restore default dimensions for blank values
    pub fn normalized(mut self) -> Self {
        self.source = self.source.trim().to_string();
        if self.width.trim().is_empty() {
            self.width = Self::default().width;
        }
        if self.height.trim().is_empty() {
            self.height = Self::default().height;
        }
        self
    }
}
