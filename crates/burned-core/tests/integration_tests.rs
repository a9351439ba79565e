//! Integration tests for BurnedPlayer Core
//!
//! The controller is driven through in-memory doubles of the media element,
//! streaming engine, view and scheduler.

use burned_core::{
    error::{STREAM_FAILED_MESSAGE, UNSUPPORTED_MESSAGE},
    media::PlayOutcome,
    AttachmentId, EngineConfig, EngineEvent, EngineFactory, Error, Level, LoadDisplay, LoadPhase,
    MediaElement, MediaEvent, PlayerConfig, PlayerController, PlayerState, QualityOption, Result,
    Scheduler, StreamEngine, TimerToken, UiEvent, View, HIDE_DELAY,
};
use futures_util::future::{self, LocalBoxFuture};
use futures_util::FutureExt;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

// =============================================================================
// Test doubles
// =============================================================================

#[derive(Default)]
struct FakeMedia {
    source: Option<String>,
    native_hls: bool,
    reject_play: bool,
    play_calls: usize,
    pause_calls: usize,
    current_time: f64,
    volume: f64,
    muted: bool,
    text_tracks: usize,
    tracks_showing: bool,
}

impl FakeMedia {
    fn new() -> Self {
        Self {
            volume: 1.0,
            ..Default::default()
        }
    }

    fn native() -> Self {
        Self {
            native_hls: true,
            ..Self::new()
        }
    }
}

impl MediaElement for FakeMedia {
    fn play(&mut self) -> PlayOutcome {
        self.play_calls += 1;
        if self.reject_play {
            future::ready(Err(Error::PlaybackRejected("NotAllowedError".into()))).boxed_local()
        } else {
            future::ready(Ok(())).boxed_local()
        }
    }

    fn pause(&mut self) {
        self.pause_calls += 1;
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    fn muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_string());
    }

    fn can_play_type(&self, mime: &str) -> bool {
        self.native_hls && mime == burned_core::media::HLS_MIME
    }

    fn text_track_count(&self) -> usize {
        self.text_tracks
    }

    fn set_text_tracks_showing(&mut self, showing: bool) {
        self.tracks_showing = showing;
    }
}

#[derive(Default)]
struct EngineLog {
    created: Vec<AttachmentId>,
    loaded: Vec<String>,
    attached: usize,
    destroyed: usize,
    current_level: Option<i32>,
}

struct FakeEngine {
    log: Rc<RefCell<EngineLog>>,
    levels: Vec<Level>,
    subtitle_tracks: usize,
}

impl StreamEngine for FakeEngine {
    fn load_source(&mut self, url: &str) {
        self.log.borrow_mut().loaded.push(url.to_string());
    }

    fn attach_media(&mut self) {
        self.log.borrow_mut().attached += 1;
    }

    fn levels(&self) -> Vec<Level> {
        self.levels.clone()
    }

    fn set_current_level(&mut self, index: i32) {
        self.log.borrow_mut().current_level = Some(index);
    }

    fn subtitle_track_count(&self) -> usize {
        self.subtitle_tracks
    }

    fn destroy(&mut self) {
        self.log.borrow_mut().destroyed += 1;
    }
}

struct FakeFactory {
    log: Rc<RefCell<EngineLog>>,
    supported: bool,
    levels: Vec<Level>,
    subtitle_tracks: usize,
}

impl EngineFactory for FakeFactory {
    fn is_supported(&self) -> bool {
        self.supported
    }

    fn create(&self, _config: &EngineConfig, attachment: AttachmentId) -> Result<Box<dyn StreamEngine>> {
        self.log.borrow_mut().created.push(attachment);
        Ok(Box::new(FakeEngine {
            log: Rc::clone(&self.log),
            levels: self.levels.clone(),
            subtitle_tracks: self.subtitle_tracks,
        }))
    }
}

#[derive(Default)]
struct FakeView {
    load: Option<LoadDisplay>,
    playing: bool,
    progress: Option<f64>,
    time_text: String,
    volume: (f64, bool),
    controls_visible: bool,
    dropdown_open: bool,
    qualities: Vec<QualityOption>,
    quality_renders: usize,
    subtitles_available: bool,
    subtitles_active: bool,
    fullscreen_requests: usize,
    fullscreen_exits: usize,
    cleared: bool,
}

impl View for FakeView {
    fn show_load_state(&mut self, display: &LoadDisplay) {
        self.load = Some(display.clone());
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    fn set_progress(&mut self, fraction: f64) {
        self.progress = Some(fraction);
    }

    fn set_time_text(&mut self, text: &str) {
        self.time_text = text.to_string();
    }

    fn set_volume(&mut self, volume: f64, muted: bool) {
        self.volume = (volume, muted);
    }

    fn set_controls_visible(&mut self, visible: bool) {
        self.controls_visible = visible;
    }

    fn set_dropdown_open(&mut self, open: bool) {
        self.dropdown_open = open;
    }

    fn render_qualities(&mut self, options: &[QualityOption]) {
        self.qualities = options.to_vec();
        self.quality_renders += 1;
    }

    fn set_subtitles_available(&mut self, available: bool) {
        self.subtitles_available = available;
    }

    fn set_subtitles_active(&mut self, active: bool) {
        self.subtitles_active = active;
    }

    fn request_fullscreen(&mut self) {
        self.fullscreen_requests += 1;
    }

    fn exit_fullscreen(&mut self) {
        self.fullscreen_exits += 1;
    }

    fn clear(&mut self) {
        self.cleared = true;
    }
}

#[derive(Default)]
struct FakeScheduler {
    armed: Option<(Duration, TimerToken)>,
    cancels: usize,
    tasks: Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>,
}

impl Scheduler for FakeScheduler {
    fn arm_hide(&mut self, delay: Duration, token: TimerToken) {
        self.armed = Some((delay, token));
    }

    fn cancel_hide(&mut self) {
        self.armed = None;
        self.cancels += 1;
    }

    fn spawn(&mut self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push(task);
    }
}

type TestController = PlayerController<FakeMedia, FakeView, FakeScheduler>;

fn factory(log: &Rc<RefCell<EngineLog>>, heights: &[u32]) -> Box<dyn EngineFactory> {
    Box::new(FakeFactory {
        log: Rc::clone(log),
        supported: true,
        levels: heights.iter().copied().map(Level::new).collect(),
        subtitle_tracks: 0,
    })
}

fn controller(config: PlayerConfig, media: FakeMedia) -> TestController {
    PlayerController::new(config, media, FakeView::default(), FakeScheduler::default())
}

/// Controller with an engine attached to `a.m3u8` whose manifest has been parsed
fn ready_with_engine(heights: &[u32]) -> (TestController, Rc<RefCell<EngineLog>>) {
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let mut player = controller(PlayerConfig::with_source("a.m3u8"), FakeMedia::new());
    player.on_capability_resolved(Ok(factory(&log, heights)));
    let attachment = log.borrow().created[0];
    player.handle_engine_event(attachment, EngineEvent::ManifestParsed);
    (player, log)
}

fn armed_token(player: &TestController) -> TimerToken {
    player.scheduler().armed.expect("hide timer armed").1
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_empty_source_renders_without_loading() {
    let mut player = controller(PlayerConfig::default(), FakeMedia::new());
    let log = Rc::new(RefCell::new(EngineLog::default()));
    player.on_capability_resolved(Ok(factory(&log, &[480, 720])));

    assert_eq!(player.state(), PlayerState::Idle);
    assert!(!player.playback().is_loading);
    assert!(player.list_renditions().is_empty());
    assert!(log.borrow().created.is_empty());
    assert_eq!(player.view().load, Some(LoadDisplay::Hidden));
    assert_eq!(player.view().time_text, "0:00 / 0:00");
}

#[test]
fn test_source_waits_for_capability() {
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let mut player = controller(PlayerConfig::with_source("a.m3u8"), FakeMedia::new());

    assert_eq!(player.state(), PlayerState::Loading);
    assert_eq!(player.view().load, Some(LoadDisplay::Spinner));
    assert!(!player.has_engine());

    player.on_capability_resolved(Ok(factory(&log, &[720])));
    assert!(player.has_engine());
    assert_eq!(log.borrow().loaded, ["a.m3u8"]);
    assert_eq!(log.borrow().attached, 1);
}

#[test]
fn test_capability_resolves_once() {
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let mut player = controller(PlayerConfig::default(), FakeMedia::native());
    player.on_capability_resolved(Err(Error::CapabilityLoadFailed("script error".into())));
    player.on_capability_resolved(Ok(factory(&log, &[720])));

    player.set_source("a.m3u8").unwrap();
    assert!(!player.has_engine());
    assert_eq!(player.media().source.as_deref(), Some("a.m3u8"));
}

#[test]
fn test_destroy_releases_engine_exactly_once() {
    let (mut player, log) = ready_with_engine(&[480]);
    player.show_temporarily();

    player.destroy();
    player.destroy();

    assert_eq!(log.borrow().destroyed, 1);
    assert!(player.is_destroyed());
    assert!(player.view().cleared);
    assert!(player.scheduler().armed.is_none());
    assert!(player.scheduler().cancels >= 1);
    assert_eq!(player.set_source("b.m3u8"), Err(Error::AlreadyDestroyed));
    assert_eq!(player.pause(), Err(Error::AlreadyDestroyed));
    assert_eq!(log.borrow().destroyed, 1);
}

#[test]
fn test_events_after_destroy_are_ignored() {
    let (mut player, log) = ready_with_engine(&[480]);
    let attachment = log.borrow().created[0];
    player.destroy();

    player.handle_media_event(MediaEvent::Play);
    player.handle_engine_event(attachment, EngineEvent::Error { fatal: true, details: "x".into() });

    assert!(!player.playback().is_playing);
    assert_eq!(player.phase(), LoadPhase::Ready);
}

// =============================================================================
// Playback state machine
// =============================================================================

#[test]
fn test_manifest_parsed_populates_renditions() {
    let (player, _log) = ready_with_engine(&[480, 720]);

    assert_eq!(player.state(), PlayerState::Paused);
    assert_eq!(player.list_renditions(), ["auto", "480p", "720p"]);
    assert_eq!(player.view().load, Some(LoadDisplay::Hidden));
    assert!(!player.playback().is_loading);
    assert_eq!(player.view().qualities.len(), 3);
    assert!(player.view().qualities[0].selected);
}

#[test]
fn test_fatal_error_shows_error_panel() {
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let mut player = controller(PlayerConfig::default(), FakeMedia::new());
    player.on_capability_resolved(Ok(factory(&log, &[720])));
    player.set_source("a.m3u8").unwrap();

    let attachment = log.borrow().created[0];
    player.handle_engine_event(
        attachment,
        EngineEvent::Error { fatal: true, details: "manifestLoadError".into() },
    );

    assert_eq!(player.state(), PlayerState::Errored);
    assert_eq!(player.playback().error.as_deref(), Some(STREAM_FAILED_MESSAGE));
    assert!(!player.playback().is_loading);
    assert_eq!(
        player.view().load,
        Some(LoadDisplay::Error(STREAM_FAILED_MESSAGE.to_string()))
    );
}

#[test]
fn test_non_fatal_error_keeps_state() {
    let (mut player, log) = ready_with_engine(&[720]);
    let attachment = log.borrow().created[0];

    player.handle_engine_event(
        attachment,
        EngineEvent::Error { fatal: false, details: "bufferStalledError".into() },
    );

    assert_eq!(player.phase(), LoadPhase::Ready);
    assert_eq!(player.playback().error, None);
}

#[test]
fn test_native_playback_without_engine() {
    let mut player = controller(PlayerConfig::with_source("a.m3u8"), FakeMedia::native());
    player.on_capability_resolved(Err(Error::CapabilityLoadFailed("network".into())));

    assert_eq!(player.media().source.as_deref(), Some("a.m3u8"));
    assert_eq!(player.phase(), LoadPhase::Ready);
    assert_eq!(player.list_renditions(), ["auto"]);
    assert!(!player.has_engine());
}

#[test]
fn test_unsupported_engine_falls_back_to_native() {
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let unsupported: Box<dyn EngineFactory> = Box::new(FakeFactory {
        log: Rc::clone(&log),
        supported: false,
        levels: vec![],
        subtitle_tracks: 0,
    });
    let mut player = controller(PlayerConfig::with_source("a.m3u8"), FakeMedia::native());
    player.on_capability_resolved(Ok(unsupported));

    assert!(log.borrow().created.is_empty());
    assert_eq!(player.phase(), LoadPhase::Ready);
}

#[test]
fn test_no_platform_support() {
    let mut player = controller(PlayerConfig::with_source("a.m3u8"), FakeMedia::new());
    player.on_capability_resolved(Err(Error::CapabilityLoadFailed("blocked".into())));

    assert_eq!(player.state(), PlayerState::Errored);
    assert_eq!(player.playback().error.as_deref(), Some(UNSUPPORTED_MESSAGE));
    assert_eq!(player.media().source, None);
}

#[test]
fn test_set_source_recovers_from_error() {
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let mut player = controller(PlayerConfig::with_source("bad.m3u8"), FakeMedia::new());
    player.on_capability_resolved(Ok(factory(&log, &[720])));
    let first = log.borrow().created[0];
    player.handle_engine_event(first, EngineEvent::Error { fatal: true, details: "x".into() });
    assert_eq!(player.phase(), LoadPhase::Errored);

    player.set_source("good.m3u8").unwrap();
    assert_eq!(player.phase(), LoadPhase::Loading);
    assert_eq!(player.playback().error, None);
    assert_eq!(log.borrow().destroyed, 1);

    let second = log.borrow().created[1];
    player.handle_engine_event(second, EngineEvent::ManifestParsed);
    assert_eq!(player.phase(), LoadPhase::Ready);
}

#[test]
fn test_stale_engine_events_are_dropped() {
    let (mut player, log) = ready_with_engine(&[720]);
    let old = log.borrow().created[0];

    player.set_source("b.m3u8").unwrap();
    player.handle_engine_event(old, EngineEvent::ManifestParsed);
    assert_eq!(player.phase(), LoadPhase::Loading);

    player.handle_engine_event(old, EngineEvent::Error { fatal: true, details: "old".into() });
    assert_eq!(player.phase(), LoadPhase::Loading);
    assert_eq!(player.playback().error, None);
}

#[test]
fn test_set_source_resets_timeline_and_renditions() {
    let (mut player, _log) = ready_with_engine(&[480, 720]);
    player.handle_media_event(MediaEvent::LoadedMetadata { duration: 120.0 });
    player.handle_media_event(MediaEvent::TimeUpdate { current_time: 60.0 });

    assert_eq!(player.view().progress, Some(0.5));

    player.set_source("b.m3u8").unwrap();
    assert!(player.list_renditions().is_empty());
    assert_eq!(player.playback().duration, None);
    assert_eq!(player.playback().current_time, 0.0);
    assert_eq!(player.view().time_text, "0:00 / 0:00");
    assert_eq!(player.view().progress, Some(0.0));
}

#[test]
fn test_empty_source_returns_to_idle() {
    let (mut player, log) = ready_with_engine(&[720]);
    player.set_source("").unwrap();

    assert_eq!(player.state(), PlayerState::Idle);
    assert!(!player.has_engine());
    assert_eq!(log.borrow().destroyed, 1);
    assert_eq!(player.media().pause_calls, 1);
    assert_eq!(player.view().load, Some(LoadDisplay::Hidden));
}

#[test]
fn test_is_playing_mirrors_media_events() {
    let (mut player, _log) = ready_with_engine(&[720]);

    drop(player.play());
    assert!(!player.playback().is_playing);
    assert_eq!(player.media().play_calls, 1);

    player.handle_media_event(MediaEvent::Play);
    assert_eq!(player.state(), PlayerState::Playing);
    assert!(player.view().playing);

    player.pause().unwrap();
    assert!(player.playback().is_playing);

    player.handle_media_event(MediaEvent::Pause);
    assert_eq!(player.state(), PlayerState::Paused);
    assert!(!player.view().playing);
}

#[test]
fn test_time_updates_touch_only_time_display() {
    let (mut player, _log) = ready_with_engine(&[720]);
    let renders = player.view().quality_renders;

    player.handle_media_event(MediaEvent::LoadedMetadata { duration: 125.0 });
    player.handle_media_event(MediaEvent::TimeUpdate { current_time: 25.0 });

    assert_eq!(player.view().time_text, "0:25 / 2:05");
    assert_eq!(player.view().progress, Some(0.2));
    assert_eq!(player.view().quality_renders, renders);
}

#[test]
fn test_volume_change_mirrors_into_state() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.handle_media_event(MediaEvent::VolumeChange { volume: 0.4, muted: true });

    assert_eq!(player.playback().volume, 0.4);
    assert!(player.playback().muted);
    assert_eq!(player.view().volume, (0.4, true));
}

// =============================================================================
// Public commands
// =============================================================================

#[test]
fn test_set_volume_clamps() {
    let (mut player, _log) = ready_with_engine(&[720]);

    player.set_volume(1.7).unwrap();
    assert_eq!(player.media().volume, 1.0);
    player.set_volume(-0.2).unwrap();
    assert_eq!(player.media().volume, 0.0);
    player.set_volume(f64::NAN).unwrap();
    assert_eq!(player.media().volume, 0.0);
}

#[test]
fn test_seek_is_unvalidated() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.seek(9_999.0).unwrap();
    assert_eq!(player.media().current_time, 9_999.0);
}

#[tokio::test]
async fn test_play_outcome_reports_rejection() {
    let media = FakeMedia {
        reject_play: true,
        ..FakeMedia::native()
    };
    let mut player = controller(PlayerConfig::with_source("a.m3u8"), media);
    player.on_capability_resolved(Err(Error::CapabilityLoadFailed("x".into())));

    let outcome = player.play().await;
    assert!(matches!(outcome, Err(Error::PlaybackRejected(_))));
    assert_eq!(player.phase(), LoadPhase::Ready);
    assert_eq!(player.playback().error, None);
}

#[tokio::test]
async fn test_play_after_destroy() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.destroy();
    assert_eq!(player.play().await, Err(Error::AlreadyDestroyed));
}

#[tokio::test]
async fn test_autoplay_rejection_is_swallowed() {
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let config = PlayerConfig {
        autoplay: true,
        ..PlayerConfig::with_source("a.m3u8")
    };
    let media = FakeMedia {
        reject_play: true,
        ..FakeMedia::new()
    };
    let mut player = controller(config, media);
    player.on_capability_resolved(Ok(factory(&log, &[720])));
    assert_eq!(player.media().play_calls, 0);

    let attachment = log.borrow().created[0];
    player.handle_engine_event(attachment, EngineEvent::ManifestParsed);
    assert_eq!(player.media().play_calls, 1);

    let tasks: Vec<_> = player.scheduler().tasks.borrow_mut().drain(..).collect();
    assert_eq!(tasks.len(), 1);
    for task in tasks {
        task.await;
    }
    assert_eq!(player.phase(), LoadPhase::Ready);
    assert_eq!(player.playback().error, None);
}

// =============================================================================
// Controls visibility
// =============================================================================

#[test]
fn test_controls_hide_after_delay_while_playing() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.handle_media_event(MediaEvent::Play);

    assert!(player.controls_visible());
    let (delay, token) = player.scheduler().armed.unwrap();
    assert_eq!(delay, HIDE_DELAY);
    assert_eq!(delay, Duration::from_secs(4));

    player.on_hide_timer(token);
    assert!(!player.controls_visible());
    assert!(!player.view().controls_visible);
}

#[test]
fn test_controls_stay_visible_when_paused() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.show_temporarily();
    let token = armed_token(&player);

    player.on_hide_timer(token);
    assert!(player.controls_visible());
}

#[test]
fn test_superseded_timer_is_ignored() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.handle_media_event(MediaEvent::Play);
    let first = armed_token(&player);

    player.handle_ui_event(UiEvent::PointerMoved);
    let second = armed_token(&player);
    assert_ne!(first, second);

    player.on_hide_timer(first);
    assert!(player.controls_visible());
    player.on_hide_timer(second);
    assert!(!player.controls_visible());
}

#[test]
fn test_pause_pins_controls() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.handle_media_event(MediaEvent::Play);
    player.handle_media_event(MediaEvent::Pause);

    assert!(player.controls_visible());
    assert!(player.scheduler().armed.is_none());
}

#[test]
fn test_pointer_leave_rearms_only_while_playing() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.handle_ui_event(UiEvent::PointerLeft);
    assert!(player.scheduler().armed.is_none());

    player.handle_media_event(MediaEvent::Play);
    player.hide_now();
    player.handle_ui_event(UiEvent::PointerLeft);
    assert!(player.controls_visible());
    assert!(player.scheduler().armed.is_some());
}

#[test]
fn test_pointer_enter_pins_controls_while_playing() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.handle_media_event(MediaEvent::Play);
    let stale = armed_token(&player);
    player.hide_now();

    player.handle_ui_event(UiEvent::PointerEntered);
    assert!(player.controls_visible());
    assert!(player.view().controls_visible);
    assert!(player.scheduler().armed.is_none());

    // A hovering pointer keeps the overlay even if an old timer fires
    player.on_hide_timer(stale);
    assert!(player.controls_visible());

    player.handle_ui_event(UiEvent::PointerMoved);
    assert!(player.scheduler().armed.is_some());
}

#[test]
fn test_hide_now_closes_dropdown() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.show_temporarily();
    player.handle_ui_event(UiEvent::SettingsClicked);
    assert!(player.view().dropdown_open);

    player.hide_now();
    assert!(!player.dropdown_open());
    assert!(!player.view().dropdown_open);
    assert!(player.scheduler().armed.is_none());
}

#[test]
fn test_surface_tap_toggles_controls() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.handle_ui_event(UiEvent::SurfaceTapped);
    assert!(player.controls_visible());
    player.handle_ui_event(UiEvent::SurfaceTapped);
    assert!(!player.controls_visible());
}

#[test]
fn test_disabled_controls_never_show() {
    let config = PlayerConfig {
        controls_enabled: false,
        ..PlayerConfig::default()
    };
    let mut player = controller(config, FakeMedia::native());
    player.handle_ui_event(UiEvent::PointerMoved);
    player.handle_media_event(MediaEvent::Pause);

    assert!(!player.controls_visible());
    assert!(player.scheduler().armed.is_none());
}

// =============================================================================
// Quality and subtitles
// =============================================================================

#[test]
fn test_select_auto_and_manual_renditions() {
    let (mut player, log) = ready_with_engine(&[480, 720]);

    player.select_rendition("720p").unwrap();
    assert_eq!(log.borrow().current_level, Some(1));
    assert_eq!(player.quality().selected(), "720p");

    player.select_rendition("auto").unwrap();
    assert_eq!(log.borrow().current_level, Some(-1));
    assert_eq!(player.quality().selected(), "auto");
}

#[test]
fn test_unknown_rendition_is_ignored() {
    let (mut player, log) = ready_with_engine(&[480, 720]);
    player.select_rendition("480p").unwrap();

    player.select_rendition("1080p").unwrap();
    assert_eq!(player.quality().selected(), "480p");
    assert_eq!(log.borrow().current_level, Some(0));
}

#[test]
fn test_selection_closes_dropdown() {
    let (mut player, _log) = ready_with_engine(&[480, 720]);
    player.handle_ui_event(UiEvent::SettingsClicked);
    assert!(player.dropdown_open());

    player.handle_ui_event(UiEvent::QualitySelected("480p".into()));
    assert!(!player.dropdown_open());
    let selected: Vec<_> = player
        .view()
        .qualities
        .iter()
        .filter(|o| o.selected)
        .map(|o| o.label.as_str())
        .collect();
    assert_eq!(selected, ["480p"]);
}

#[test]
fn test_selection_without_engine_is_noop() {
    let mut player = controller(PlayerConfig::with_source("a.m3u8"), FakeMedia::native());
    player.on_capability_resolved(Err(Error::CapabilityLoadFailed("x".into())));

    player.select_rendition("auto").unwrap();
    assert_eq!(player.quality().selected(), "auto");
    assert_eq!(player.list_renditions(), ["auto"]);
}

#[test]
fn test_subtitles_button_follows_tracks() {
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let with_subs: Box<dyn EngineFactory> = Box::new(FakeFactory {
        log: Rc::clone(&log),
        supported: true,
        levels: vec![Level::new(720)],
        subtitle_tracks: 2,
    });
    let mut player = controller(PlayerConfig::with_source("a.m3u8"), FakeMedia::new());
    player.on_capability_resolved(Ok(with_subs));
    assert!(!player.view().subtitles_available);

    let attachment = log.borrow().created[0];
    player.handle_engine_event(attachment, EngineEvent::ManifestParsed);
    assert!(player.subtitles_available());
    assert!(player.view().subtitles_available);
}

#[test]
fn test_subtitle_toggle_applies_to_late_tracks() {
    let (mut player, _log) = ready_with_engine(&[720]);
    assert!(!player.subtitles_available());

    player.handle_ui_event(UiEvent::SubtitlesClicked);
    assert!(player.subtitles_enabled());
    assert!(player.view().subtitles_active);
    assert!(player.media().tracks_showing);

    // A track added later starts disabled
    player.media_mut().text_tracks = 1;
    player.media_mut().tracks_showing = false;
    player.handle_media_event(MediaEvent::TextTracksChanged);

    assert!(player.subtitles_available());
    assert!(player.view().subtitles_available);
    assert!(player.media().tracks_showing);
}

#[test]
fn test_toggle_subtitles_after_destroy() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.destroy();

    assert_eq!(player.toggle_subtitles(), Err(Error::AlreadyDestroyed));
    assert!(!player.subtitles_enabled());
    assert!(!player.view().subtitles_active);
    assert!(!player.media().tracks_showing);
}

#[test]
fn test_progress_click_seeks_fraction_of_duration() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.handle_ui_event(UiEvent::ProgressClicked(0.5));
    assert_eq!(player.media().current_time, 0.0);

    player.handle_media_event(MediaEvent::LoadedMetadata { duration: 300.0 });
    player.handle_ui_event(UiEvent::ProgressClicked(0.5));
    assert_eq!(player.media().current_time, 150.0);
}

#[test]
fn test_fullscreen_toggle_follows_document_state() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.handle_ui_event(UiEvent::FullscreenClicked);
    assert_eq!(player.view().fullscreen_requests, 1);

    player.handle_ui_event(UiEvent::FullscreenChanged(true));
    player.handle_ui_event(UiEvent::FullscreenClicked);
    assert_eq!(player.view().fullscreen_exits, 1);
    assert!(player.playback().is_fullscreen);
}

#[test]
fn test_mute_button_toggles_media() {
    let (mut player, _log) = ready_with_engine(&[720]);
    player.handle_ui_event(UiEvent::MuteClicked);
    assert!(player.media().muted);
    player.handle_ui_event(UiEvent::MuteClicked);
    assert!(!player.media().muted);
}

#[test]
fn test_snapshot_serializes() {
    let (player, _log) = ready_with_engine(&[480]);
    let json = serde_json::to_value(player.snapshot()).unwrap();
    assert_eq!(json["state"], "paused");
    assert_eq!(json["renditions"][1], "480p");
    assert_eq!(json["playback"]["isPlaying"], false);
}
