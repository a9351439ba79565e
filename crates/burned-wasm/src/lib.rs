//! BurnedPlayer WASM - embeddable HLS video widget for the browser
//!
//! Binds the platform-independent controller in `burned-core` to the DOM:
//! - `<video>` element and hls.js adapters
//! - Widget rendering and input handling
//! - Auto-initialization of `data-burned-player` containers
//!
//! ## Usage
//!
//! ```html
//! <div data-burned-player data-src="https://cdn.example.com/live.m3u8" data-autoplay="true"></div>
//! ```
//!
//! ```javascript
//! import init, { BurnedPlayer } from '@burned/player';
//!
//! await init();
//! const player = new BurnedPlayer('#player', { src: 'https://cdn.example.com/live.m3u8' });
//! await player.play();
//! ```

use std::cell::RefCell;

use burned_core::config::{INITIALIZED_ATTRIBUTE, PLAYER_ATTRIBUTE};
use burned_core::{embed, PlayerConfig};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

mod capability;
mod events;
mod hls;
mod logging;
mod media;
mod player;
mod scheduler;
mod view;

pub use player::BurnedPlayer;

thread_local! {
    /// Players created from markup; they live as long as the page
    static DECLARED: RefCell<Vec<BurnedPlayer>> = const { RefCell::new(Vec::new()) };
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logging::init();
    burned_core::init();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| {
            initialize_players();
        });
        let _ = document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
    } else {
        initialize_players();
    }
}

/// Library version
#[wasm_bindgen]
pub fn version() -> String {
    burned_core::VERSION.to_string()
}

/// Mount a player in every `[data-burned-player]` container not yet initialized.
///
/// Returns the number of players created.
#[wasm_bindgen(js_name = initializePlayers)]
pub fn initialize_players() -> usize {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return 0;
    };
    let selector = format!("[{PLAYER_ATTRIBUTE}]:not([{INITIALIZED_ATTRIBUTE}])");
    let Ok(nodes) = document.query_selector_all(&selector) else {
        return 0;
    };

    let mut created = 0;
    for i in 0..nodes.length() {
        let Some(container) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
            continue;
        };

        let dataset = container.dataset();
        let config = PlayerConfig::from_attributes(|key| dataset.get(key));
        let _ = container.set_attribute(INITIALIZED_ATTRIBUTE, "true");

        match BurnedPlayer::mount(&container, config) {
            Ok(player) => {
                DECLARED.with(|players| players.borrow_mut().push(player));
                created += 1;
            }
            Err(e) => warn!(code = e.error_code(), error = %e, "Failed to mount declared player"),
        }
    }

    if created > 0 {
        info!(count = created, "Initialized declared players");
    }
    created
}

/// Player page URL for an embed query string such as `?id=abc123`
#[wasm_bindgen(js_name = embedUrl)]
pub fn embed_url(query: &str) -> Result<String, JsValue> {
    embed::player_url_from_query(query)
        .map(|url| url.to_string())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
