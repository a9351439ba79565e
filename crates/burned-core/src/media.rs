//! Media primitive abstraction
//!
//! The controller never talks to a `<video>` element directly. The browser
//! binding implements [`MediaElement`] over `HtmlVideoElement` and forwards the
//! element's events as [`MediaEvent`]s; tests use an in-memory double.

use crate::Result;
use futures_util::future::LocalBoxFuture;

/// MIME type of HLS playlists
pub const HLS_MIME: &str = "application/vnd.apple.mpegurl";

/// Settled result of a `play()` request
pub type PlayOutcome = LocalBoxFuture<'static, Result<()>>;

/// Events emitted by the media element, in platform order
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// `loadedmetadata`, with the reported duration
    LoadedMetadata { duration: f64 },
    /// `timeupdate`, with the reported position
    TimeUpdate { current_time: f64 },
    /// `play`
    Play,
    /// `pause`
    Pause,
    /// `volumechange`
    VolumeChange { volume: f64, muted: bool },
    /// `addtrack`/`removetrack` on the element's text track list
    TextTracksChanged,
}

/// Playback primitive bound to a single player
pub trait MediaElement {
    /// Request playback; the outcome settles when the platform accepts or rejects it
    fn play(&mut self) -> PlayOutcome;

    fn pause(&mut self);

    fn set_current_time(&mut self, seconds: f64);

    fn volume(&self) -> f64;

    fn set_volume(&mut self, volume: f64);

    fn muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    /// Assign a source for native playback
    fn set_source(&mut self, url: &str);

    /// Whether the platform reports it may play `mime`
    fn can_play_type(&self, mime: &str) -> bool;

    /// Number of text tracks on the element
    fn text_track_count(&self) -> usize;

    /// Switch every text track between `showing` and `disabled`
    fn set_text_tracks_showing(&mut self, showing: bool);
}

/// Media type used for native support detection
pub fn media_type_for(url: &str) -> &'static str {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if path.ends_with(".mp4") || path.ends_with(".m4v") {
        "video/mp4"
    } else if path.ends_with(".webm") {
        "video/webm"
    } else if path.ends_with(".mpd") {
        "application/dash+xml"
    } else {
        HLS_MIME
    }
}
