//! Page-wide loading of the hls.js script
//!
//! The first player that finds `window.Hls` missing injects the script; every
//! other player waits on the same `<script>` element.

use burned_core::{Acquisition, Error, LoadOnce, Result};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, EventTarget, HtmlScriptElement, Window};

/// CDN location of hls.js
pub const HLS_SCRIPT_URL: &str = "https://cdn.jsdelivr.net/npm/hls.js@latest";

const SCRIPT_ID: &str = "burned-player-hls";

static ENGINE_SCRIPT: LoadOnce = LoadOnce::new();

fn engine_present(window: &Window) -> bool {
    js_sys::Reflect::get(window, &"Hls".into())
        .map(|hls| !hls.is_undefined() && !hls.is_null())
        .unwrap_or(false)
}

/// Resolves `true` on `load` and `false` on `error`
fn settled(script: &EventTarget) -> js_sys::Promise {
    js_sys::Promise::new(&mut |resolve, _reject| {
        let on_error = resolve.clone();
        let load = Closure::once_into_js(move || {
            let _ = resolve.call1(&JsValue::NULL, &JsValue::TRUE);
        });
        let error = Closure::once_into_js(move || {
            let _ = on_error.call1(&JsValue::NULL, &JsValue::FALSE);
        });
        let _ = script.add_event_listener_with_callback("load", load.unchecked_ref());
        let _ = script.add_event_listener_with_callback("error", error.unchecked_ref());
    })
}

async fn wait_for(script: &EventTarget) -> bool {
    JsFuture::from(settled(script))
        .await
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

fn inject(document: &Document) -> std::result::Result<HtmlScriptElement, JsValue> {
    let script = document
        .create_element("script")?
        .dyn_into::<HtmlScriptElement>()
        .map_err(JsValue::from)?;
    script.set_id(SCRIPT_ID);
    script.set_src(HLS_SCRIPT_URL);
    script.set_async(true);

    // Registered before any waiter so the state is settled when they wake
    let done = Closure::once_into_js(|| ENGINE_SCRIPT.complete(true));
    let failed = Closure::once_into_js(|| ENGINE_SCRIPT.complete(false));
    script.add_event_listener_with_callback("load", done.unchecked_ref())?;
    script.add_event_listener_with_callback("error", failed.unchecked_ref())?;

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
    head.append_child(&script)?;
    Ok(script)
}

/// Make `window.Hls` available, loading it at most once per page
pub async fn acquire() -> Result<()> {
    let window = web_sys::window().ok_or(Error::UnsupportedPlatform)?;
    let document = window.document().ok_or(Error::UnsupportedPlatform)?;

    let loaded = match ENGINE_SCRIPT.begin(engine_present(&window)) {
        Acquisition::Present => return Ok(()),
        Acquisition::Failed => {
            return Err(Error::CapabilityLoadFailed("hls.js failed to load earlier".into()))
        }
        Acquisition::Acquire => {
            info!(url = HLS_SCRIPT_URL, "Loading hls.js");
            let script = inject(&document).map_err(|e| {
                ENGINE_SCRIPT.complete(false);
                Error::CapabilityLoadFailed(crate::media::js_message(&e))
            })?;
            wait_for(&script).await
        }
        Acquisition::InFlight => match document.get_element_by_id(SCRIPT_ID) {
            Some(script) => wait_for(&script).await,
            None => {
                warn!("hls.js load in flight but script element is missing");
                false
            }
        },
    };

    if loaded && engine_present(&window) {
        Ok(())
    } else {
        Err(Error::CapabilityLoadFailed(format!("could not load {HLS_SCRIPT_URL}")))
    }
}
