//! BurnedPlayer theme - colour palette, stylesheet and control icons
//!
//! Single source of truth for the widget's look. The browser binding injects
//! [`Stylesheet::generate`] once per page under [`STYLESHEET_ID`].
//!
//! # Usage
//!
//! ```rust
//! use burned_core::theme::{PlayerColors, Stylesheet};
//!
//! let css = Stylesheet::generate();
//! assert!(css.contains(PlayerColors::default().accent));
//! ```

use serde::{Deserialize, Serialize};

/// Id of the injected `<style>` element
pub const STYLESHEET_ID: &str = "burned-player-styles";

/// Root class of every widget
pub const ROOT_CLASS: &str = "burned-player";

/// Player colour palette
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerColors {
    /// Accent red - #E50914 (RGB: 229, 9, 20)
    pub accent: &'static str,
    /// Video background - #000
    pub background: &'static str,
    /// Main text and icon colour
    pub text: &'static str,
    /// Muted text (time display, dropdown header) - #B3B3B3
    pub text_soft: &'static str,
    /// Dropdown separator - #333
    pub separator: &'static str,
}

impl Default for PlayerColors {
    fn default() -> Self {
        Self {
            accent: "#E50914",
            background: "#000",
            text: "white",
            text_soft: "#B3B3B3",
            separator: "#333",
        }
    }
}

impl PlayerColors {
    /// Accent colour as RGBA with custom alpha
    pub fn accent_rgba(&self, alpha: f32) -> String {
        format!("rgba(229, 9, 20, {})", alpha)
    }
}

/// Widget stylesheet
pub struct Stylesheet;

impl Stylesheet {
    /// Generate the CSS for all widgets on the page
    pub fn generate() -> String {
        let c = PlayerColors::default();
        format!(
            r#".burned-player {{
  position: relative;
  width: 100%;
  background: {background};
  aspect-ratio: 16/9;
  max-height: 80vh;
  font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
  color: {text};
}}
.burned-player * {{ box-sizing: border-box; }}
.burned-player video {{ width: 100%; height: 100%; object-fit: cover; cursor: pointer; }}
.burned-player-controls {{
  position: absolute; bottom: 0; left: 0; right: 0;
  background: linear-gradient(transparent, rgba(0,0,0,0.8));
  padding: 20px; z-index: 10; opacity: 0; transition: opacity 0.3s ease;
}}
.burned-player-controls.active {{ opacity: 1; }}
.burned-player-controls.disabled {{ display: none; }}
.burned-player .progress-container {{
  background: rgba(255,255,255,0.3); height: 4px; border-radius: 2px;
  margin-bottom: 12px; cursor: pointer;
}}
.burned-player .progress-bar {{
  background: {accent}; height: 100%; border-radius: 2px; width: 0%; transition: width 0.1s;
}}
.burned-player .controls-row {{ display: flex; align-items: center; justify-content: space-between; }}
.burned-player .controls-left,
.burned-player .controls-right {{ display: flex; align-items: center; gap: 8px; }}
.burned-player .control-btn {{
  background: none; border: none; color: {text}; cursor: pointer; padding: 8px;
  border-radius: 4px; transition: background-color 0.2s;
  display: flex; align-items: center; justify-content: center;
}}
.burned-player .control-btn:hover {{ background-color: rgba(255,255,255,0.1); }}
.burned-player .control-btn.active {{ color: {accent}; }}
.burned-player .volume-control {{ display: flex; align-items: center; }}
.burned-player .volume-slider {{
  width: 0; opacity: 0; transition: all 0.3s ease; overflow: hidden; margin-left: 0;
}}
.burned-player .volume-control:hover .volume-slider {{ width: 80px; opacity: 1; margin-left: 8px; }}
.burned-player .volume-slider input {{
  width: 100%; height: 3px; background: rgba(255,255,255,0.3); border-radius: 2px;
  outline: none; -webkit-appearance: none; appearance: none;
}}
.burned-player .volume-slider input::-webkit-slider-thumb {{
  -webkit-appearance: none; appearance: none; background: {accent};
  height: 12px; width: 12px; border-radius: 50%; cursor: pointer;
}}
.burned-player .time-display {{ font-size: 14px; color: {text_soft}; margin-left: 12px; }}
.burned-player .dropdown {{ position: relative; }}
.burned-player .dropdown-content {{
  display: none; position: absolute; bottom: 100%; right: 0; background: rgba(0,0,0,0.9);
  min-width: 120px; border-radius: 4px; margin-bottom: 8px; z-index: 20; overflow: hidden;
}}
.burned-player .dropdown.active .dropdown-content {{ display: block; }}
.burned-player .dropdown-header {{
  padding: 8px 12px; font-size: 12px; color: {text_soft}; border-bottom: 1px solid {separator};
}}
.burned-player .dropdown-item {{
  padding: 8px 12px; cursor: pointer; font-size: 14px;
  display: flex; align-items: center; justify-content: space-between;
}}
.burned-player .dropdown-item:hover {{ background-color: rgba(255,255,255,0.1); }}
.burned-player .dropdown-item.selected {{ color: {accent}; background-color: {accent_soft}; }}
.burned-player .loading-spinner {{
  position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); z-index: 10;
}}
.burned-player .spinner {{
  border: 3px solid rgba(255,255,255,0.3); border-radius: 50%; border-top: 3px solid {accent};
  width: 40px; height: 40px; animation: burned-player-spin 1s linear infinite;
}}
@keyframes burned-player-spin {{
  0% {{ transform: rotate(0deg); }}
  100% {{ transform: rotate(360deg); }}
}}
.burned-player .error-message {{ text-align: center; color: {text}; }}
.burned-player .error-message h3 {{ font-size: 18px; margin-bottom: 8px; }}
.burned-player .error-message p {{ font-size: 14px; color: {text_soft}; }}"#,
            background = c.background,
            text = c.text,
            text_soft = c.text_soft,
            accent = c.accent,
            accent_soft = c.accent_rgba(0.1),
            separator = c.separator,
        )
    }
}

/// Inline SVG icons for the control buttons
pub mod icons {
    pub const PLAY: &str = r#"<path d="M8 5v14l11-7z"/>"#;
    pub const PAUSE: &str = r#"<path d="M6 19h4V5H6v14zm8-14v14h4V5h-4z"/>"#;
    pub const VOLUME: &str = r#"<path d="M3 9v6h4l5 5V4L7 9H3zm13.5 3c0-1.77-1.02-3.29-2.5-4.03v8.05c1.48-.73 2.5-2.25 2.5-4.02z"/>"#;
    pub const MUTED: &str = r#"<path d="M16.5 12c0-1.77-1.02-3.29-2.5-4.03v2.21l2.45 2.45c.03-.2.05-.41.05-.63zm2.5 0c0 .94-.2 1.82-.54 2.64l1.51 1.51C20.63 14.91 21 13.5 21 12c0-4.28-2.99-7.86-7-8.77v2.06c2.89.86 5 3.54 5 6.71zM4.27 3L3 4.27 7.73 9H3v6h4l5 5v-6.73l4.25 4.25c-.67.52-1.42.93-2.25 1.18v2.06c1.38-.31 2.63-.95 3.69-1.81L19.73 21 21 19.73l-9-9L4.27 3zM12 4L9.91 6.09 12 8.18V4z"/>"#;
    pub const SUBTITLES: &str = r#"<path d="M20 4H4c-1.1 0-2 .9-2 2v12c0 1.1.9 2 2 2h16c1.1 0 2-.9 2-2V6c0-1.1-.9-2-2-2zM4 12h4v2H4v-2zm10 6H4v-2h10v2zm6 0h-4v-2h4v2zm0-4H10v-2h10v2z"/>"#;
    pub const SETTINGS: &str = r#"<path d="M19.14,12.94c0.04-0.3,0.06-0.61,0.06-0.94c0-0.32-0.02-0.64-0.07-0.94l2.03-1.58c0.18-0.14,0.23-0.41,0.12-0.61 l-1.92-3.32c-0.12-0.22-0.37-0.29-0.59-0.22l-2.39,0.96c-0.5-0.38-1.03-0.7-1.62-0.94L14.4,2.81c-0.04-0.24-0.24-0.41-0.48-0.41 h-3.84c-0.24,0-0.43,0.17-0.47,0.41L9.25,5.35C8.66,5.59,8.12,5.92,7.63,6.29L5.24,5.33c-0.22-0.08-0.47,0-0.59,0.22L2.74,8.87 C2.62,9.08,2.66,9.34,2.86,9.48l2.03,1.58C4.84,11.36,4.82,11.69,4.82,12s0.02,0.64,0.07,0.94l-2.03,1.58 c-0.18,0.14-0.23,0.41-0.12,0.61l1.92,3.32c0.12,0.22,0.37,0.29,0.59,0.22l2.39-0.96c0.5,0.38,1.03,0.7,1.62,0.94l0.36,2.54 c0.05,0.24,0.24,0.41,0.48,0.41h3.84c0.24,0,0.43-0.17,0.47-0.41l0.36-2.54c0.59-0.24,1.13-0.56,1.62-0.94l2.39,0.96 c0.22,0.08,0.47,0,0.59-0.22l1.92-3.32c0.12-0.22,0.07-0.47-0.12-0.61L19.14,12.94z M12,15.6c-1.98,0-3.6-1.62-3.6-3.6 s1.62-3.6,3.6-3.6s3.6,1.62,3.6,3.6S13.98,15.6,12,15.6z"/>"#;
    pub const FULLSCREEN: &str = r#"<path d="M7 14H5v5h5v-2H7v-3zm-2-4h2V7h3V5H5v5zm12 7h-3v2h5v-5h-2v3zM14 5v2h3v3h2V5h-5z"/>"#;

    /// Wrap icon paths in a 20px SVG
    pub fn svg(paths: &str) -> String {
        format!(
            r#"<svg width="20" height="20" viewBox="0 0 24 24" fill="currentColor">{}</svg>"#,
            paths
        )
    }

    /// Volume button icon for the current volume
    pub fn volume(volume: f64, muted: bool) -> &'static str {
        if muted || volume == 0.0 {
            MUTED
        } else {
            VOLUME
        }
    }
}
