//! `<video>` element adapter

use burned_core::{Error, MediaElement, MediaEvent, PlayOutcome};
use futures_util::future::{self, FutureExt};
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlVideoElement, TextTrackMode};

use crate::events::Listener;
use crate::player::PlayerHandle;

/// Readable message from a thrown JS value
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    js_sys::Reflect::get(value, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

pub struct VideoMedia {
    video: HtmlVideoElement,
}

impl VideoMedia {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }
}

impl MediaElement for VideoMedia {
    fn play(&mut self) -> PlayOutcome {
        match self.video.play() {
            Ok(promise) => JsFuture::from(promise)
                .map(|settled| {
                    settled
                        .map(|_| ())
                        .map_err(|e| Error::PlaybackRejected(js_message(&e)))
                })
                .boxed_local(),
            Err(e) => future::ready(Err(Error::PlaybackRejected(js_message(&e)))).boxed_local(),
        }
    }

    fn pause(&mut self) {
        let _ = self.video.pause();
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn volume(&self) -> f64 {
        self.video.volume()
    }

    fn set_volume(&mut self, volume: f64) {
        self.video.set_volume(volume);
    }

    fn muted(&self) -> bool {
        self.video.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn set_source(&mut self, url: &str) {
        self.video.set_src(url);
    }

    fn can_play_type(&self, mime: &str) -> bool {
        !self.video.can_play_type(mime).is_empty()
    }

    fn text_track_count(&self) -> usize {
        self.video.text_tracks().map_or(0, |tracks| tracks.length() as usize)
    }

    fn set_text_tracks_showing(&mut self, showing: bool) {
        let Some(tracks) = self.video.text_tracks() else {
            return;
        };
        let mode = if showing { TextTrackMode::Showing } else { TextTrackMode::Disabled };
        for i in 0..tracks.length() {
            if let Some(track) = tracks.get(i) {
                track.set_mode(mode);
            }
        }
    }
}

fn forward<F>(video: &HtmlVideoElement, name: &'static str, handle: &PlayerHandle, read: F) -> Listener
where
    F: Fn(&HtmlVideoElement) -> MediaEvent + 'static,
{
    let element = video.clone();
    let handle = handle.clone();
    Listener::new(video, name, move |_| {
        let event = read(&element);
        handle.dispatch(move |player| player.handle_media_event(event));
    })
}

/// Forward element events to the controller
pub fn bind_media_events(video: &HtmlVideoElement, handle: &PlayerHandle) -> Vec<Listener> {
    let mut listeners = vec![
        forward(video, "loadedmetadata", handle, |v| MediaEvent::LoadedMetadata {
            duration: v.duration(),
        }),
        forward(video, "timeupdate", handle, |v| MediaEvent::TimeUpdate {
            current_time: v.current_time(),
        }),
        forward(video, "play", handle, |_| MediaEvent::Play),
        forward(video, "pause", handle, |_| MediaEvent::Pause),
        forward(video, "volumechange", handle, |v| MediaEvent::VolumeChange {
            volume: v.volume(),
            muted: v.muted(),
        }),
    ];

    if let Some(tracks) = video.text_tracks() {
        for name in ["addtrack", "removetrack"] {
            let handle = handle.clone();
            listeners.push(Listener::new(&tracks, name, move |_| {
                handle.dispatch(|player| player.handle_media_event(MediaEvent::TextTracksChanged));
            }));
        }
    }

    listeners
}
