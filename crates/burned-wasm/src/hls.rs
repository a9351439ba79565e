//! hls.js bindings
//!
//! [`HlsFactory`] and [`HlsEngine`] implement the core engine traits over the
//! global `Hls` constructor once it has been loaded.

use burned_core::{AttachmentId, EngineConfig, EngineEvent, EngineFactory, Error, Level, Result, StreamEngine};
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlVideoElement;

use crate::media::js_message;
use crate::player::PlayerHandle;

const MANIFEST_PARSED: &str = "hlsManifestParsed";
const ERROR: &str = "hlsError";

#[wasm_bindgen]
extern "C" {
    /// `window.Hls`
    pub type Hls;

    #[wasm_bindgen(static_method_of = Hls, js_name = isSupported, catch)]
    fn is_supported() -> std::result::Result<bool, JsValue>;

    #[wasm_bindgen(constructor, catch)]
    fn new(config: &JsValue) -> std::result::Result<Hls, JsValue>;

    #[wasm_bindgen(method, js_name = loadSource)]
    fn load_source(this: &Hls, url: &str);

    #[wasm_bindgen(method, js_name = attachMedia)]
    fn attach_media(this: &Hls, media: &HtmlVideoElement);

    #[wasm_bindgen(method)]
    fn destroy(this: &Hls);

    #[wasm_bindgen(method, getter)]
    fn levels(this: &Hls) -> JsValue;

    #[wasm_bindgen(method, setter = currentLevel)]
    fn set_current_level(this: &Hls, index: i32);

    #[wasm_bindgen(method, getter = subtitleTracks)]
    fn subtitle_tracks(this: &Hls) -> JsValue;

    #[wasm_bindgen(method)]
    fn on(this: &Hls, event: &str, callback: &js_sys::Function);
}

fn array_len(value: &JsValue) -> usize {
    value
        .dyn_ref::<js_sys::Array>()
        .map_or(0, |array| array.length() as usize)
}

/// Creates engines bound to one player's `<video>`
pub struct HlsFactory {
    video: HtmlVideoElement,
    player: PlayerHandle,
}

impl HlsFactory {
    pub fn new(video: HtmlVideoElement, player: PlayerHandle) -> Self {
        Self { video, player }
    }
}

impl EngineFactory for HlsFactory {
    fn is_supported(&self) -> bool {
        Hls::is_supported().unwrap_or(false)
    }

    fn create(&self, config: &EngineConfig, attachment: AttachmentId) -> Result<Box<dyn StreamEngine>> {
        let options = serde_wasm_bindgen::to_value(config)
            .map_err(|e| Error::StreamFatal(format!("engine config: {e}")))?;
        let hls = Hls::new(&options).map_err(|e| Error::StreamFatal(js_message(&e)))?;

        let player = self.player.clone();
        let on_manifest = Closure::<dyn FnMut()>::new(move || {
            player.dispatch(move |c| c.handle_engine_event(attachment, EngineEvent::ManifestParsed));
        });

        let player = self.player.clone();
        let on_error = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |_event: JsValue, data: JsValue| {
            let fatal = js_sys::Reflect::get(&data, &"fatal".into())
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(false);
            let details = js_sys::Reflect::get(&data, &"details".into())
                .ok()
                .and_then(|v| v.as_string())
                .unwrap_or_default();
            player.dispatch(move |c| c.handle_engine_event(attachment, EngineEvent::Error { fatal, details }));
        });

        hls.on(MANIFEST_PARSED, on_manifest.as_ref().unchecked_ref());
        hls.on(ERROR, on_error.as_ref().unchecked_ref());
        debug!(%attachment, "hls.js instance created");

        Ok(Box::new(HlsEngine {
            hls,
            video: self.video.clone(),
            callbacks: Some((on_manifest, on_error)),
        }))
    }
}

type Callbacks = (Closure<dyn FnMut()>, Closure<dyn FnMut(JsValue, JsValue)>);

/// One hls.js instance attached to a `<video>`
pub struct HlsEngine {
    hls: Hls,
    video: HtmlVideoElement,
    /// Present until destroyed; the instance calls into these
    callbacks: Option<Callbacks>,
}

impl StreamEngine for HlsEngine {
    fn load_source(&mut self, url: &str) {
        self.hls.load_source(url);
    }

    fn attach_media(&mut self) {
        self.hls.attach_media(&self.video);
    }

    fn levels(&self) -> Vec<Level> {
        let Ok(levels) = self.hls.levels().dyn_into::<js_sys::Array>() else {
            return Vec::new();
        };
        levels
            .iter()
            .map(|level| {
                let height = js_sys::Reflect::get(&level, &"height".into())
                    .ok()
                    .and_then(|h| h.as_f64())
                    .unwrap_or(0.0);
                Level::new(height as u32)
            })
            .collect()
    }

    fn set_current_level(&mut self, index: i32) {
        self.hls.set_current_level(index);
    }

    fn subtitle_track_count(&self) -> usize {
        array_len(&self.hls.subtitle_tracks())
    }

    fn destroy(&mut self) {
        if let Some(callbacks) = self.callbacks.take() {
            self.hls.destroy();
            drop(callbacks);
        }
    }
}

impl Drop for HlsEngine {
    fn drop(&mut self) {
        self.destroy();
    }
}
