//! Embed page glue
//!
//! Hosting pages embed the player through an iframe. Two lookups feed that
//! iframe's `src`: a `?id=` video id forwarded to the hosted player, or a
//! fixed server name mapped to a stream URL.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::{form_urlencoded, Url};

/// Hosted player page
pub const PLAYER_HOST: &str = "https://burnedplayer.pages.dev/";

/// Query parameter carrying the video id on embedding pages
pub const ID_PARAM: &str = "id";

/// Query parameter carrying the video id on the hosted player
pub const VIDEO_PARAM: &str = "v";

/// Characters left as-is in the id, as `encodeURIComponent` does.
/// `'` is escaped since `Url` would escape it in a query anyway.
const ID_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'(')
    .remove(b')');

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmbedError {
    #[error("No video ID provided. Please use ?id= in the URL.")]
    MissingVideoId,

    #[error("Unknown server: {0}")]
    UnknownServer(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Extract the video id from a query string (with or without the leading `?`)
pub fn video_id_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == ID_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Hosted player URL for a video id
pub fn player_url(video_id: &str) -> Result<Url, EmbedError> {
    let video_id = video_id.trim();
    if video_id.is_empty() {
        return Err(EmbedError::MissingVideoId);
    }
    let mut url = Url::parse(PLAYER_HOST).map_err(|e| EmbedError::InvalidUrl(e.to_string()))?;
    let encoded = utf8_percent_encode(video_id, ID_ENCODE_SET);
    url.set_query(Some(&format!("{VIDEO_PARAM}={encoded}")));
    Ok(url)
}

/// Hosted player URL for the id found in an embedding page's query string
pub fn player_url_from_query(query: &str) -> Result<Url, EmbedError> {
    let id = video_id_from_query(query).ok_or(EmbedError::MissingVideoId)?;
    player_url(&id)
}

/// Fixed mapping from server names to stream URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerMap {
    servers: BTreeMap<String, Url>,
}

impl ServerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `{"name": "url", ...}` object
    pub fn from_json(json: &str) -> Result<Self, EmbedError> {
        serde_json::from_str(json).map_err(|e| EmbedError::InvalidUrl(e.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, url: &str) -> Result<(), EmbedError> {
        let url = Url::parse(url).map_err(|e| EmbedError::InvalidUrl(e.to_string()))?;
        self.servers.insert(name.into(), url);
        Ok(())
    }

    pub fn resolve(&self, name: &str) -> Result<&Url, EmbedError> {
        self.servers
            .get(name)
            .ok_or_else(|| EmbedError::UnknownServer(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }
}
