//! Player Controller - the widget's state machine
//!
//! Coordinates:
//! - Source loading through the streaming engine or native playback
//! - Load phase transitions and the user-visible error panel
//! - Playback state mirrored from media element events
//! - Controls auto-hide timer and quality dropdown
//! - Rendition and subtitle selection
//!
//! All input arrives through method calls made by the host binding: media
//! events, engine events, UI events, timer fires and public commands. The
//! controller reacts synchronously and pushes narrow updates into the [`View`].

use crate::{
    config::PlayerConfig,
    engine::{AttachmentId, EngineConfig, EngineEvent, EngineFactory, StreamEngine},
    error::STREAM_FAILED_MESSAGE,
    format::{progress_fraction, seek_target, time_display},
    media::{media_type_for, MediaElement, MediaEvent, PlayOutcome},
    quality::{self, QualityState, AUTO},
    scheduler::{Scheduler, TimerToken},
    types::{LoadPhase, PlaybackState, PlayerId, PlayerState},
    view::{LoadDisplay, UiEvent, View},
    visibility::{ControlsVisibility, HIDE_DELAY},
    Error, Result,
};
use futures_util::{future, FutureExt};
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

/// Availability of the streaming engine
enum Capability {
    /// Acquisition has not settled yet
    Pending,
    Available(Box<dyn EngineFactory>),
    Unavailable,
}

/// The engine currently bound to the media element
struct Attachment {
    id: AttachmentId,
    engine: Box<dyn StreamEngine>,
}

/// Serializable view of the controller for hosts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub state: PlayerState,
    pub phase: LoadPhase,
    pub playback: PlaybackState,
    pub renditions: Vec<String>,
    pub selected_rendition: String,
    pub controls_visible: bool,
    pub subtitles_enabled: bool,
}

/// Controller for one widget instance
pub struct PlayerController<M, V, S>
where
    M: MediaElement,
    V: View,
    S: Scheduler,
{
    id: PlayerId,
    config: PlayerConfig,
    engine_config: EngineConfig,
    phase: LoadPhase,
    playback: PlaybackState,
    quality: QualityState,
    controls: ControlsVisibility,
    subtitles_enabled: bool,
    subtitles_available: bool,
    capability: Capability,
    engine: Option<Attachment>,
    next_attachment: u64,
    /// Source waiting for the capability to settle
    pending_source: Option<String>,
    media: M,
    view: V,
    scheduler: S,
    destroyed: bool,
}

impl<M, V, S> PlayerController<M, V, S>
where
    M: MediaElement,
    V: View,
    S: Scheduler,
{
    /// Create a controller over an already-built view.
    ///
    /// If the config carries a source the controller enters `Loading` right
    /// away; the load itself starts once [`Self::on_capability_resolved`] is called.
    pub fn new(config: PlayerConfig, media: M, view: V, scheduler: S) -> Self {
        let playback = PlaybackState {
            volume: media.volume().clamp(0.0, 1.0),
            muted: media.muted(),
            ..Default::default()
        };

        let mut controller = Self {
            id: PlayerId::new(),
            config,
            engine_config: EngineConfig::default(),
            phase: LoadPhase::Idle,
            playback,
            quality: QualityState::new(),
            controls: ControlsVisibility::new(),
            subtitles_enabled: false,
            subtitles_available: false,
            capability: Capability::Pending,
            engine: None,
            next_attachment: 0,
            pending_source: None,
            media,
            view,
            scheduler,
            destroyed: false,
        };

        controller.initial_render();
        info!(player = %controller.id, "Player created");

        if let Some(source) = controller.config.source().map(str::to_owned) {
            let _ = controller.set_source(&source);
        }

        controller
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    /// Current state, derived from the load phase and the last media event
    pub fn state(&self) -> PlayerState {
        PlayerState::derive(self.phase, self.playback.is_playing)
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn quality(&self) -> &QualityState {
        &self.quality
    }

    pub fn controls_visible(&self) -> bool {
        self.controls.is_visible()
    }

    pub fn dropdown_open(&self) -> bool {
        self.controls.is_dropdown_open()
    }

    pub fn subtitles_enabled(&self) -> bool {
        self.subtitles_enabled
    }

    pub fn subtitles_available(&self) -> bool {
        self.subtitles_available
    }

    pub fn has_engine(&self) -> bool {
        self.engine.is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            id: self.id,
            state: self.state(),
            phase: self.phase,
            playback: self.playback.clone(),
            renditions: self.list_renditions(),
            selected_rendition: self.quality.selected().to_string(),
            controls_visible: self.controls.is_visible(),
            subtitles_enabled: self.subtitles_enabled,
        }
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Record the outcome of engine acquisition and start any waiting load
    #[instrument(skip(self, resolved), fields(player = %self.id))]
    pub fn on_capability_resolved(&mut self, resolved: Result<Box<dyn EngineFactory>>) {
        if self.destroyed {
            return;
        }
        if !matches!(self.capability, Capability::Pending) {
            debug!("Capability already resolved");
            return;
        }

        self.capability = match resolved {
            Ok(factory) => {
                info!(supported = factory.is_supported(), "Streaming engine available");
                Capability::Available(factory)
            }
            Err(e) => {
                warn!(code = e.error_code(), error = %e, "Streaming engine unavailable, using native playback");
                Capability::Unavailable
            }
        };

        if let Some(source) = self.pending_source.take() {
            self.begin_load(&source);
        }
    }

    /// Release the engine, cancel the hide timer and clear the widget
    #[instrument(skip(self), fields(player = %self.id))]
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }

        self.release_engine();
        self.controls.hide();
        self.scheduler.cancel_hide();
        self.view.clear();
        self.pending_source = None;
        self.capability = Capability::Unavailable;
        self.destroyed = true;

        info!("Player destroyed");
    }

    // ---------------------------------------------------------------------
    // Public commands
    // ---------------------------------------------------------------------

    /// Request playback. The outcome reports platform rejection instead of failing the player.
    pub fn play(&mut self) -> PlayOutcome {
        if self.destroyed {
            return future::ready(Err(Error::AlreadyDestroyed)).boxed_local();
        }
        self.media.play()
    }

    pub fn pause(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.media.pause();
        Ok(())
    }

    /// Set volume, clamped to [0, 1]
    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        self.ensure_alive()?;
        if volume.is_nan() {
            warn!("Ignoring NaN volume");
            return Ok(());
        }
        self.media.set_volume(volume.clamp(0.0, 1.0));
        Ok(())
    }

    /// Seek without validation; the media element enforces its own bounds
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        self.ensure_alive()?;
        self.media.set_current_time(seconds);
        Ok(())
    }

    /// Replace the source. An empty url returns the player to idle.
    #[instrument(skip(self), fields(player = %self.id))]
    pub fn set_source(&mut self, url: &str) -> Result<()> {
        self.ensure_alive()?;
        let url = url.trim();

        self.release_engine();
        self.pending_source = None;
        self.config.source = url.to_string();
        self.quality = QualityState::new();
        self.playback.reset_timeline();
        self.playback.error = None;
        self.render_qualities();
        self.render_time();

        if url.is_empty() {
            self.media.pause();
            self.set_phase(LoadPhase::Idle)?;
            self.playback.is_loading = false;
            self.view.show_load_state(&LoadDisplay::Hidden);
            return Ok(());
        }

        info!(url, "Loading source");
        self.set_phase(LoadPhase::Loading)?;
        self.playback.is_loading = true;
        self.view.show_load_state(&LoadDisplay::Spinner);

        if matches!(self.capability, Capability::Pending) {
            debug!("Waiting for streaming engine");
            self.pending_source = Some(url.to_string());
        } else {
            self.begin_load(url);
        }

        Ok(())
    }

    // ---------------------------------------------------------------------
    // Renditions and subtitles
    // ---------------------------------------------------------------------

    /// Renditions offered to the user, "auto" first
    pub fn list_renditions(&self) -> Vec<String> {
        self.quality.available().to_vec()
    }

    /// Switch rendition. Unknown labels are logged and ignored.
    #[instrument(skip(self), fields(player = %self.id))]
    pub fn select_rendition(&mut self, label: &str) -> Result<()> {
        self.ensure_alive()?;

        let Some(attachment) = self.engine.as_mut() else {
            debug!("No streaming engine attached, ignoring selection");
            return Ok(());
        };

        let offered = label == AUTO || self.quality.available().iter().any(|l| l == label);
        let index = if offered {
            quality::level_index(&attachment.engine.levels(), label)
        } else {
            None
        };

        let Some(index) = index else {
            let err = Error::RenditionNotFound {
                label: label.to_string(),
            };
            warn!(code = err.error_code(), error = %err, "Ignoring stale rendition selection");
            return Ok(());
        };

        attachment.engine.set_current_level(index);
        self.quality.set_selected(label);
        info!(level = index, "Rendition selected");

        self.render_qualities();
        self.controls.close_dropdown();
        self.view.set_dropdown_open(false);
        Ok(())
    }

    /// Flip subtitles on every text track
    pub fn toggle_subtitles(&mut self) -> Result<()> {
        self.ensure_alive()?;
        self.subtitles_enabled = !self.subtitles_enabled;
        self.view.set_subtitles_active(self.subtitles_enabled);
        self.media.set_text_tracks_showing(self.subtitles_enabled);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Controls visibility
    // ---------------------------------------------------------------------

    /// Show the overlay and (re)arm the auto-hide timer
    pub fn show_temporarily(&mut self) {
        if self.destroyed || !self.config.controls_enabled {
            return;
        }
        let (token, previous) = self.controls.show_and_arm();
        if previous.is_some() {
            self.scheduler.cancel_hide();
        }
        self.view.set_controls_visible(true);
        self.scheduler.arm_hide(HIDE_DELAY, token);
    }

    /// Hide the overlay and the quality dropdown now
    pub fn hide_now(&mut self) {
        if self.destroyed {
            return;
        }
        if self.controls.hide().is_some() {
            self.scheduler.cancel_hide();
        }
        self.view.set_controls_visible(false);
        self.view.set_dropdown_open(false);
    }

    /// Hide timer fired; paused playback keeps the overlay
    pub fn on_hide_timer(&mut self, token: TimerToken) {
        if self.destroyed {
            return;
        }
        if !self.controls.fire(token) {
            debug!(token = token.0, "Stale hide timer");
            return;
        }
        if self.playback.is_playing {
            self.hide_now();
        }
    }

    fn pin_controls(&mut self) {
        if !self.config.controls_enabled {
            return;
        }
        if self.controls.pin().is_some() {
            self.scheduler.cancel_hide();
        }
        self.view.set_controls_visible(true);
    }

    // ---------------------------------------------------------------------
    // Event handlers
    // ---------------------------------------------------------------------

    /// React to a media element event
    pub fn handle_media_event(&mut self, event: MediaEvent) {
        if self.destroyed {
            return;
        }

        match event {
            MediaEvent::LoadedMetadata { duration } => {
                self.playback.set_duration(duration);
                debug!(duration = ?self.playback.duration, "Metadata loaded");
                self.render_time();
            }
            MediaEvent::TimeUpdate { current_time } => {
                self.playback.set_current_time(current_time);
                self.render_time();
            }
            MediaEvent::Play => {
                self.playback.is_playing = true;
                self.view.set_playing(true);
                self.show_temporarily();
            }
            MediaEvent::Pause => {
                self.playback.is_playing = false;
                self.view.set_playing(false);
                self.pin_controls();
            }
            MediaEvent::VolumeChange { volume, muted } => {
                if volume.is_finite() {
                    self.playback.volume = volume.clamp(0.0, 1.0);
                }
                self.playback.muted = muted;
                self.view.set_volume(self.playback.volume, muted);
            }
            MediaEvent::TextTracksChanged => self.refresh_subtitles(),
        }
    }

    /// React to an event from the engine tagged `attachment`
    pub fn handle_engine_event(&mut self, attachment: AttachmentId, event: EngineEvent) {
        if self.destroyed {
            return;
        }
        let Some(current) = self.engine.as_ref() else {
            debug!(%attachment, "Engine event without attached engine");
            return;
        };
        if current.id != attachment {
            debug!(%attachment, current = %current.id, "Dropping event from released engine");
            return;
        }

        match event {
            EngineEvent::ManifestParsed => {
                if self.phase != LoadPhase::Loading {
                    debug!(phase = %self.phase, "Manifest parsed outside loading phase");
                    return;
                }
                let levels = current.engine.levels();
                info!(renditions = levels.len(), "Manifest parsed");
                self.quality = QualityState::from_levels(&levels);
                self.mark_ready();
            }
            EngineEvent::Error { fatal: true, details } => {
                if matches!(self.phase, LoadPhase::Loading | LoadPhase::Ready) {
                    self.fail(Error::StreamFatal(details));
                } else {
                    debug!(phase = %self.phase, details = %details, "Fatal engine error after failure");
                }
            }
            EngineEvent::Error { fatal: false, details } => {
                let err = Error::StreamNonFatal(details);
                warn!(code = err.error_code(), error = %err, "Stream error");
            }
        }
    }

    /// React to user input
    pub fn handle_ui_event(&mut self, event: UiEvent) {
        if self.destroyed {
            return;
        }

        match event {
            UiEvent::PlayPauseClicked => self.toggle_play_pause(),
            UiEvent::MuteClicked => {
                let muted = self.media.muted();
                self.media.set_muted(!muted);
            }
            UiEvent::VolumeInput(volume) => {
                let _ = self.set_volume(volume);
            }
            UiEvent::ProgressClicked(fraction) => {
                if let Some(target) = seek_target(fraction, self.playback.duration) {
                    self.media.set_current_time(target);
                }
            }
            UiEvent::SubtitlesClicked => {
                let _ = self.toggle_subtitles();
            }
            UiEvent::SettingsClicked => {
                let open = self.controls.toggle_dropdown();
                self.view.set_dropdown_open(open);
            }
            UiEvent::FullscreenClicked => {
                if self.playback.is_fullscreen {
                    self.view.exit_fullscreen();
                } else {
                    self.view.request_fullscreen();
                }
            }
            UiEvent::QualitySelected(label) => {
                let _ = self.select_rendition(&label);
            }
            UiEvent::PointerMoved => self.show_temporarily(),
            UiEvent::PointerEntered => self.pin_controls(),
            UiEvent::PointerLeft => {
                if self.playback.is_playing {
                    self.show_temporarily();
                }
            }
            UiEvent::SurfaceTapped => {
                if self.controls.is_visible() {
                    self.hide_now();
                } else {
                    self.show_temporarily();
                }
            }
            UiEvent::FullscreenChanged(fullscreen) => {
                self.playback.is_fullscreen = fullscreen;
            }
        }
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            Err(Error::AlreadyDestroyed)
        } else {
            Ok(())
        }
    }

    fn set_phase(&mut self, next: LoadPhase) -> Result<()> {
        let current = self.phase;
        if current == next && next != LoadPhase::Loading {
            return Ok(());
        }
        if !current.can_transition_to(next) {
            return Err(Error::InvalidStateTransition {
                from: current.to_string(),
                to: next.to_string(),
            });
        }

        self.phase = next;
        info!(player = %self.id, from = %current, to = %next, "State transition");
        Ok(())
    }

    fn begin_load(&mut self, url: &str) {
        self.next_attachment += 1;
        let id = AttachmentId(self.next_attachment);

        let created = match &self.capability {
            Capability::Available(factory) if factory.is_supported() => {
                Some(factory.create(&self.engine_config, id))
            }
            _ => None,
        };

        match created {
            Some(Ok(mut engine)) => {
                engine.load_source(url);
                engine.attach_media();
                self.engine = Some(Attachment { id, engine });
                debug!(attachment = %id, "Streaming engine attached");
            }
            Some(Err(e)) => self.fail(Error::StreamFatal(e.to_string())),
            None => {
                let mime = media_type_for(url);
                if self.media.can_play_type(mime) {
                    info!(mime, "Using native playback");
                    self.media.set_source(url);
                    self.quality = QualityState::native();
                    self.mark_ready();
                } else {
                    self.fail(Error::UnsupportedPlatform);
                }
            }
        }
    }

    fn mark_ready(&mut self) {
        if let Err(e) = self.set_phase(LoadPhase::Ready) {
            warn!(error = %e, "Ignoring ready signal");
            return;
        }
        self.playback.is_loading = false;
        self.playback.error = None;
        self.view.show_load_state(&LoadDisplay::Hidden);
        self.render_qualities();
        self.refresh_subtitles();

        if self.config.autoplay {
            let outcome = self.media.play();
            self.scheduler.spawn(
                async move {
                    if let Err(e) = outcome.await {
                        debug!(error = %e, "Autoplay blocked");
                    }
                }
                .boxed_local(),
            );
        }
    }

    fn fail(&mut self, err: Error) {
        error!(code = err.error_code(), error = %err, "Stream failed");
        let message = err.user_message().unwrap_or(STREAM_FAILED_MESSAGE).to_string();

        if let Err(e) = self.set_phase(LoadPhase::Errored) {
            warn!(error = %e, "Ignoring stream failure");
            return;
        }
        self.playback.is_loading = false;
        self.playback.error = Some(message.clone());
        self.view.show_load_state(&LoadDisplay::Error(message));
    }

    fn release_engine(&mut self) {
        if let Some(mut attachment) = self.engine.take() {
            attachment.engine.destroy();
            debug!(attachment = %attachment.id, "Streaming engine released");
        }
    }

    fn toggle_play_pause(&mut self) {
        if self.playback.is_playing {
            self.media.pause();
            return;
        }
        let outcome = self.media.play();
        self.scheduler.spawn(
            async move {
                if let Err(e) = outcome.await {
                    warn!(error = %e, "Play request rejected");
                }
            }
            .boxed_local(),
        );
    }

    fn refresh_subtitles(&mut self) {
        let engine_tracks = self
            .engine
            .as_ref()
            .map_or(0, |a| a.engine.subtitle_track_count());
        self.subtitles_available = self.media.text_track_count() + engine_tracks > 0;
        self.view.set_subtitles_available(self.subtitles_available);

        // Tracks that appear after a toggle follow the toggle
        if self.subtitles_enabled {
            self.media.set_text_tracks_showing(true);
        }
    }

    fn render_time(&mut self) {
        let fraction = progress_fraction(self.playback.current_time, self.playback.duration);
        self.view.set_progress(fraction.unwrap_or(0.0));
        self.view
            .set_time_text(&time_display(self.playback.current_time, self.playback.duration));
    }

    fn render_qualities(&mut self) {
        self.view.render_qualities(&self.quality.options());
    }

    fn initial_render(&mut self) {
        self.view.show_load_state(&LoadDisplay::Hidden);
        self.view.set_playing(false);
        self.view.set_time_text(&time_display(0.0, None));
        self.view.set_volume(self.playback.volume, self.playback.muted);
        self.view.set_controls_visible(false);
        self.view.set_dropdown_open(false);
        self.view.render_qualities(&[]);
        self.view.set_subtitles_available(false);
    }
}
