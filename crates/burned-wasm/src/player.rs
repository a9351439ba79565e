//! The `BurnedPlayer` JavaScript class

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use burned_core::{EngineFactory, Error, PlayerConfig, PlayerController};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::HtmlElement;

use crate::capability;
use crate::events::Listener;
use crate::hls::HlsFactory;
use crate::media::{bind_media_events, VideoMedia};
use crate::scheduler::BrowserScheduler;
use crate::view::{bind_ui_events, inject_stylesheet, DomView};

pub(crate) type Controller = PlayerController<VideoMedia, DomView, BrowserScheduler>;

/// Weak reference used by every callback that reaches the controller
#[derive(Clone)]
pub struct PlayerHandle(Weak<RefCell<Controller>>);

impl PlayerHandle {
    /// Run `f` against the controller if it is still alive.
    ///
    /// Events raised while the controller is already borrowed (a `pause` fired
    /// from inside `set_source`, say) are re-queued as a microtask.
    pub fn dispatch<F>(&self, f: F)
    where
        F: FnOnce(&mut Controller) + 'static,
    {
        let Some(player) = self.0.upgrade() else {
            return;
        };
        match player.try_borrow_mut() {
            Ok(mut controller) => f(&mut controller),
            Err(_) => {
                let handle = self.clone();
                spawn_local(async move { handle.dispatch(f) });
            }
        };
    }
}

fn to_js(error: Error) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

fn resolve_container(target: &JsValue) -> Result<HtmlElement, Error> {
    if let Some(element) = target.dyn_ref::<HtmlElement>() {
        return Ok(element.clone());
    }

    let selector = target
        .as_string()
        .ok_or_else(|| Error::MountTargetNotFound(format!("{target:?}")))?;
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or(Error::UnsupportedPlatform)?;

    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .ok_or(Error::MountTargetNotFound(selector))
}

/// Embeddable HLS player
#[wasm_bindgen]
pub struct BurnedPlayer {
    inner: Rc<RefCell<Controller>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl BurnedPlayer {
    /// Mount a player into an element or the first match of a CSS selector
    #[wasm_bindgen(constructor)]
    pub fn new(container: JsValue, options: JsValue) -> Result<BurnedPlayer, JsValue> {
        let config = if options.is_undefined() || options.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value::<PlayerConfig>(options)
                .map_err(|e| to_js(Error::InvalidConfig(e.to_string())))?
                .normalized()
        };
        let container = resolve_container(&container).map_err(to_js)?;
        Self::mount(&container, config).map_err(to_js)
    }

    /// Start playback. Resolves to `false` when the browser refuses.
    pub fn play(&self) -> js_sys::Promise {
        let outcome = self.inner.borrow_mut().play();
        future_to_promise(async move {
            match outcome.await {
                Ok(()) => Ok(JsValue::TRUE),
                Err(e) => {
                    debug!(error = %e, "play() did not start playback");
                    Ok(JsValue::FALSE)
                }
            }
        })
    }

    pub fn pause(&self) {
        Self::report("pause", self.inner.borrow_mut().pause());
    }

    #[wasm_bindgen(js_name = setSource)]
    pub fn set_source(&self, url: &str) {
        Self::report("setSource", self.inner.borrow_mut().set_source(url));
    }

    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f64) {
        Self::report("setVolume", self.inner.borrow_mut().set_volume(volume));
    }

    pub fn seek(&self, seconds: f64) {
        Self::report("seek", self.inner.borrow_mut().seek(seconds));
    }

    /// Available renditions, `"auto"` first
    pub fn qualities(&self) -> Vec<String> {
        self.inner.borrow().list_renditions()
    }

    #[wasm_bindgen(js_name = setQuality)]
    pub fn set_quality(&self, label: &str) {
        Self::report("setQuality", self.inner.borrow_mut().select_rendition(label));
    }

    /// Tear the widget down. Further calls are ignored.
    pub fn destroy(&mut self) {
        self.inner.borrow_mut().destroy();
        self.listeners.clear();
    }

    /// Snapshot of the player state as a plain object
    pub fn state(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.inner.borrow().snapshot();
        serde_wasm_bindgen::to_value(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl BurnedPlayer {
    /// Build the widget in `container` and start acquiring the engine
    pub fn mount(container: &HtmlElement, config: PlayerConfig) -> Result<BurnedPlayer, Error> {
        let document = container
            .owner_document()
            .ok_or_else(|| Error::MountTargetNotFound("container is detached".into()))?;
        let build_failed = |e: JsValue| Error::MountTargetNotFound(crate::media::js_message(&e));

        inject_stylesheet(&document).map_err(build_failed)?;
        let view = DomView::build(&document, container, &config).map_err(build_failed)?;
        let video = view.video().clone();

        let inner = Rc::new_cyclic(|weak: &Weak<RefCell<Controller>>| {
            let scheduler = BrowserScheduler::new(PlayerHandle(weak.clone()));
            RefCell::new(PlayerController::new(config, VideoMedia::new(video.clone()), view, scheduler))
        });
        let handle = PlayerHandle(Rc::downgrade(&inner));

        let mut listeners = bind_media_events(&video, &handle);
        listeners.extend(bind_ui_events(inner.borrow().view(), &handle));

        spawn_local(async move {
            let resolved = capability::acquire()
                .await
                .map(|()| Box::new(HlsFactory::new(video, handle.clone())) as Box<dyn EngineFactory>);
            handle.dispatch(move |controller| controller.on_capability_resolved(resolved));
        });

        Ok(BurnedPlayer { inner, listeners })
    }

    fn report(command: &str, result: burned_core::Result<()>) {
        if let Err(e) = result {
            warn!(command, code = e.error_code(), error = %e, "Command ignored");
        }
    }
}
