//! DOM rendering of the widget
//!
//! [`DomView`] builds the widget tree inside the host container and keeps typed
//! handles to every element the controller updates. [`bind_ui_events`] wires
//! the user-facing elements back to the controller as [`UiEvent`]s.

use burned_core::theme::{icons, Stylesheet, ROOT_CLASS, STYLESHEET_ID};
use burned_core::{LoadDisplay, PlayerConfig, QualityOption, UiEvent, View};
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, HtmlVideoElement, MouseEvent};

use crate::events::Listener;
use crate::player::PlayerHandle;

const QUALITY_ATTRIBUTE: &str = "data-quality";

/// Inject the shared stylesheet unless another widget already did
pub fn inject_stylesheet(document: &Document) -> Result<(), JsValue> {
    if document.get_element_by_id(STYLESHEET_ID).is_some() {
        return Ok(());
    }

    let style = document.create_element("style")?;
    style.set_id(STYLESHEET_ID);
    style.set_text_content(Some(&Stylesheet::generate()));
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;
    head.append_child(&style)?;
    Ok(())
}

fn element(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.dyn_into::<HtmlElement>().map_err(JsValue::from)
}

fn button(document: &Document, class: &str, icon: &str) -> Result<HtmlElement, JsValue> {
    let btn = element(document, "button", &format!("control-btn {class}"))?;
    btn.set_inner_html(&icons::svg(icon));
    Ok(btn)
}

/// Widget DOM with typed handles
pub struct DomView {
    document: Document,
    container: HtmlElement,
    pub(crate) root: HtmlElement,
    pub(crate) video: HtmlVideoElement,
    pub(crate) loading: HtmlElement,
    pub(crate) controls: HtmlElement,
    pub(crate) progress_container: HtmlElement,
    pub(crate) progress_bar: HtmlElement,
    pub(crate) play_pause_btn: HtmlElement,
    pub(crate) volume_btn: HtmlElement,
    pub(crate) volume_slider: HtmlInputElement,
    pub(crate) time_display: HtmlElement,
    pub(crate) subtitles_btn: HtmlElement,
    pub(crate) quality_dropdown: HtmlElement,
    pub(crate) settings_btn: HtmlElement,
    pub(crate) dropdown_content: HtmlElement,
    pub(crate) fullscreen_btn: HtmlElement,
}

impl DomView {
    /// Replace the container's content with a fresh widget
    pub fn build(document: &Document, container: &HtmlElement, config: &PlayerConfig) -> Result<Self, JsValue> {
        let style = container.style();
        style.set_property("width", &config.width)?;
        style.set_property("height", &config.height)?;
        container.set_inner_html("");

        let root = element(document, "div", ROOT_CLASS)?;

        let video = document
            .create_element("video")?
            .dyn_into::<HtmlVideoElement>()
            .map_err(JsValue::from)?;
        video.set_preload("metadata");
        video.set_cross_origin(Some("anonymous"));
        video.set_attribute("playsinline", "")?;

        let loading = element(document, "div", "loading-spinner")?;

        let controls_class = if config.controls_enabled {
            "burned-player-controls"
        } else {
            "burned-player-controls disabled"
        };
        let controls = element(document, "div", controls_class)?;

        let progress_container = element(document, "div", "progress-container")?;
        let progress_bar = element(document, "div", "progress-bar")?;
        progress_container.append_child(&progress_bar)?;

        let row = element(document, "div", "controls-row")?;
        let left = element(document, "div", "controls-left")?;
        let right = element(document, "div", "controls-right")?;

        let play_pause_btn = button(document, "play-pause-btn", icons::PLAY)?;

        let volume_control = element(document, "div", "volume-control")?;
        let volume_btn = button(document, "volume-btn", icons::VOLUME)?;
        let slider_wrap = element(document, "div", "volume-slider")?;
        let volume_slider = document
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()
            .map_err(JsValue::from)?;
        volume_slider.set_type("range");
        volume_slider.set_min("0");
        volume_slider.set_max("100");
        volume_slider.set_value("100");
        slider_wrap.append_child(&volume_slider)?;
        volume_control.append_child(&volume_btn)?;
        volume_control.append_child(&slider_wrap)?;

        let time_display = element(document, "span", "time-display")?;

        left.append_child(&play_pause_btn)?;
        left.append_child(&volume_control)?;
        left.append_child(&time_display)?;

        let subtitles_btn = button(document, "subtitles-btn", icons::SUBTITLES)?;
        subtitles_btn.style().set_property("display", "none")?;

        let quality_dropdown = element(document, "div", "dropdown quality-dropdown")?;
        let settings_btn = button(document, "settings-btn", icons::SETTINGS)?;
        let dropdown_content = element(document, "div", "dropdown-content")?;
        quality_dropdown.append_child(&settings_btn)?;
        quality_dropdown.append_child(&dropdown_content)?;

        let fullscreen_btn = button(document, "fullscreen-btn", icons::FULLSCREEN)?;

        right.append_child(&subtitles_btn)?;
        right.append_child(&quality_dropdown)?;
        right.append_child(&fullscreen_btn)?;

        row.append_child(&left)?;
        row.append_child(&right)?;
        controls.append_child(&progress_container)?;
        controls.append_child(&row)?;

        root.append_child(&video)?;
        root.append_child(&loading)?;
        root.append_child(&controls)?;
        container.append_child(&root)?;

        Ok(Self {
            document: document.clone(),
            container: container.clone(),
            root,
            video,
            loading,
            controls,
            progress_container,
            progress_bar,
            play_pause_btn,
            volume_btn,
            volume_slider,
            time_display,
            subtitles_btn,
            quality_dropdown,
            settings_btn,
            dropdown_content,
            fullscreen_btn,
        })
    }

    pub fn video(&self) -> &HtmlVideoElement {
        &self.video
    }

    fn render_error(&self, message: &str) -> Result<(), JsValue> {
        self.loading.set_inner_html("");
        let panel = element(&self.document, "div", "error-message")?;
        let title = element(&self.document, "h3", "")?;
        title.set_text_content(Some("Error loading video"));
        let body = element(&self.document, "p", "")?;
        body.set_text_content(Some(message));
        panel.append_child(&title)?;
        panel.append_child(&body)?;
        self.loading.append_child(&panel)?;
        Ok(())
    }

    fn render_quality_items(&self, options: &[QualityOption]) -> Result<(), JsValue> {
        self.dropdown_content.set_inner_html("");
        let header = element(&self.document, "div", "dropdown-header")?;
        header.set_text_content(Some("Quality"));
        self.dropdown_content.append_child(&header)?;

        for option in options {
            let class = if option.selected { "dropdown-item selected" } else { "dropdown-item" };
            let item = element(&self.document, "div", class)?;
            item.set_attribute(QUALITY_ATTRIBUTE, &option.label)?;
            item.set_text_content(Some(&option.display));
            if option.selected {
                let check = element(&self.document, "span", "")?;
                check.set_text_content(Some("✓"));
                item.append_child(&check)?;
            }
            self.dropdown_content.append_child(&item)?;
        }
        Ok(())
    }
}

fn log_dom_error(operation: &str, result: Result<(), JsValue>) {
    if let Err(e) = result {
        warn!(operation, error = ?e, "DOM update failed");
    }
}

impl View for DomView {
    fn show_load_state(&mut self, display: &LoadDisplay) {
        let style = self.loading.style();
        let result = match display {
            LoadDisplay::Hidden => style.set_property("display", "none"),
            LoadDisplay::Spinner => {
                self.loading.set_inner_html(r#"<div class="spinner"></div>"#);
                style.set_property("display", "block")
            }
            LoadDisplay::Error(message) => self
                .render_error(message)
                .and_then(|()| style.set_property("display", "block")),
        };
        log_dom_error("show_load_state", result);
    }

    fn set_playing(&mut self, playing: bool) {
        let icon = if playing { icons::PAUSE } else { icons::PLAY };
        self.play_pause_btn.set_inner_html(&icons::svg(icon));
    }

    fn set_progress(&mut self, fraction: f64) {
        let width = format!("{}%", fraction * 100.0);
        log_dom_error("set_progress", self.progress_bar.style().set_property("width", &width));
    }

    fn set_time_text(&mut self, text: &str) {
        self.time_display.set_text_content(Some(text));
    }

    fn set_volume(&mut self, volume: f64, muted: bool) {
        self.volume_btn.set_inner_html(&icons::svg(icons::volume(volume, muted)));
        let level = if muted { 0.0 } else { volume * 100.0 };
        self.volume_slider.set_value(&level.round().to_string());
    }

    fn set_controls_visible(&mut self, visible: bool) {
        log_dom_error(
            "set_controls_visible",
            self.controls.class_list().toggle_with_force("active", visible).map(|_| ()),
        );
    }

    fn set_dropdown_open(&mut self, open: bool) {
        log_dom_error(
            "set_dropdown_open",
            self.quality_dropdown.class_list().toggle_with_force("active", open).map(|_| ()),
        );
    }

    fn render_qualities(&mut self, options: &[QualityOption]) {
        log_dom_error("render_qualities", self.render_quality_items(options));
    }

    fn set_subtitles_available(&mut self, available: bool) {
        let display = if available { "flex" } else { "none" };
        log_dom_error(
            "set_subtitles_available",
            self.subtitles_btn.style().set_property("display", display),
        );
    }

    fn set_subtitles_active(&mut self, active: bool) {
        log_dom_error(
            "set_subtitles_active",
            self.subtitles_btn.class_list().toggle_with_force("active", active).map(|_| ()),
        );
    }

    fn request_fullscreen(&mut self) {
        log_dom_error("request_fullscreen", self.root.request_fullscreen());
    }

    fn exit_fullscreen(&mut self) {
        self.document.exit_fullscreen();
    }

    fn clear(&mut self) {
        self.container.set_inner_html("");
    }
}

fn on_click(target: &EventTarget, handle: &PlayerHandle, event: UiEvent) -> Listener {
    let handle = handle.clone();
    Listener::new(target, "click", move |e: Event| {
        e.stop_propagation();
        let event = event.clone();
        handle.dispatch(move |player| player.handle_ui_event(event));
    })
}

fn forward(target: &EventTarget, name: &'static str, handle: &PlayerHandle, event: UiEvent) -> Listener {
    let handle = handle.clone();
    Listener::new(target, name, move |_| {
        let event = event.clone();
        handle.dispatch(move |player| player.handle_ui_event(event));
    })
}

/// Forward user interaction on the widget to the controller
pub fn bind_ui_events(view: &DomView, handle: &PlayerHandle) -> Vec<Listener> {
    let mut listeners = vec![
        on_click(&view.play_pause_btn, handle, UiEvent::PlayPauseClicked),
        on_click(&view.volume_btn, handle, UiEvent::MuteClicked),
        on_click(&view.subtitles_btn, handle, UiEvent::SubtitlesClicked),
        on_click(&view.settings_btn, handle, UiEvent::SettingsClicked),
        on_click(&view.fullscreen_btn, handle, UiEvent::FullscreenClicked),
        forward(&view.root, "mousemove", handle, UiEvent::PointerMoved),
        forward(&view.root, "mouseenter", handle, UiEvent::PointerEntered),
        forward(&view.root, "mouseleave", handle, UiEvent::PointerLeft),
    ];

    let slider = view.volume_slider.clone();
    let h = handle.clone();
    listeners.push(Listener::new(&view.volume_slider, "input", move |_| {
        if let Ok(value) = slider.value().parse::<f64>() {
            h.dispatch(move |player| player.handle_ui_event(UiEvent::VolumeInput(value / 100.0)));
        }
    }));

    let progress = view.progress_container.clone();
    let h = handle.clone();
    listeners.push(Listener::new(&view.progress_container, "click", move |e: Event| {
        let Some(mouse) = e.dyn_ref::<MouseEvent>() else {
            return;
        };
        let rect = progress.get_bounding_client_rect();
        if rect.width() <= 0.0 {
            return;
        }
        let fraction = (f64::from(mouse.client_x()) - rect.left()) / rect.width();
        h.dispatch(move |player| player.handle_ui_event(UiEvent::ProgressClicked(fraction)));
    }));

    let h = handle.clone();
    listeners.push(Listener::new(&view.dropdown_content, "click", move |e: Event| {
        e.stop_propagation();
        let label = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(".dropdown-item").ok().flatten())
            .and_then(|item| item.get_attribute(QUALITY_ATTRIBUTE));
        if let Some(label) = label {
            h.dispatch(move |player| player.handle_ui_event(UiEvent::QualitySelected(label)));
        }
    }));

    // Taps on the bare surface toggle the overlay; taps on controls bubble here too
    for name in ["click", "touchend"] {
        let root: EventTarget = view.root.clone().into();
        let video: EventTarget = view.video.clone().into();
        let h = handle.clone();
        listeners.push(Listener::new(&view.root, name, move |e: Event| {
            let target = e.target();
            if target.as_ref() == Some(&root) || target.as_ref() == Some(&video) {
                h.dispatch(|player| player.handle_ui_event(UiEvent::SurfaceTapped));
            }
        }));
    }

    let root: Element = view.root.clone().into();
    let document = view.document.clone();
    let h = handle.clone();
    listeners.push(Listener::new(&view.document, "fullscreenchange", move |_| {
        let active = document.fullscreen_element().as_ref() == Some(&root);
        h.dispatch(move |player| player.handle_ui_event(UiEvent::FullscreenChanged(active)));
    }));

    listeners
}
