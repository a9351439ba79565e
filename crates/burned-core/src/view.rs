//! View abstraction
//!
//! The controller pushes narrow updates into a [`View`]; it never rebuilds the
//! whole widget. High-frequency time updates touch only the progress width and
//! the time text. User input arrives back as [`UiEvent`]s.

/// What the loading overlay shows
#[derive(Debug, Clone, PartialEq)]
pub enum LoadDisplay {
    Hidden,
    Spinner,
    Error(String),
}

/// One entry of the quality dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityOption {
    /// Rendition label passed back on selection
    pub label: String,
    /// Text shown to the user
    pub display: String,
    pub selected: bool,
}

impl QualityOption {
    pub fn new(label: &str, selected: bool) -> Self {
        let display = if label == crate::quality::AUTO {
            "Auto".to_string()
        } else {
            label.to_string()
        };
        Self {
            label: label.to_string(),
            display,
            selected,
        }
    }
}

/// User input on the widget
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    PlayPauseClicked,
    MuteClicked,
    /// Volume slider moved, value in [0, 1]
    VolumeInput(f64),
    /// Click on the progress bar at a fraction of its width
    ProgressClicked(f64),
    SubtitlesClicked,
    SettingsClicked,
    FullscreenClicked,
    QualitySelected(String),
    PointerMoved,
    PointerEntered,
    PointerLeft,
    /// Click or touch on the video surface itself
    SurfaceTapped,
    /// Document fullscreen state changed
    FullscreenChanged(bool),
}

/// Rendered widget
pub trait View {
    fn show_load_state(&mut self, display: &LoadDisplay);

    fn set_playing(&mut self, playing: bool);

    /// Progress bar fill, fraction in [0, 1]
    fn set_progress(&mut self, fraction: f64);

    fn set_time_text(&mut self, text: &str);

    fn set_volume(&mut self, volume: f64, muted: bool);

    fn set_controls_visible(&mut self, visible: bool);

    fn set_dropdown_open(&mut self, open: bool);

    fn render_qualities(&mut self, options: &[QualityOption]);

    fn set_subtitles_available(&mut self, available: bool);

    fn set_subtitles_active(&mut self, active: bool);

    fn request_fullscreen(&mut self);

    fn exit_fullscreen(&mut self);

    /// Remove the widget from its container
    fn clear(&mut self);
}
