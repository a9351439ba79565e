//! Controls overlay visibility
//!
//! Pure bookkeeping for the auto-hide timer. At most one hide timer is
//! outstanding; every re-arm produces a fresh [`TimerToken`], so a timer that
//! fires after being superseded is recognized as stale.

use crate::scheduler::TimerToken;
use std::time::Duration;

/// Delay before the overlay hides during playback
pub const HIDE_DELAY: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Default)]
pub struct ControlsVisibility {
    visible: bool,
    pending_hide: Option<TimerToken>,
    dropdown_open: bool,
    next_token: u64,
}

impl ControlsVisibility {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn pending_hide(&self) -> Option<TimerToken> {
        self.pending_hide
    }

    /// Show and allocate a token for a new hide timer.
    /// Returns the superseded token, if one was pending.
    pub fn show_and_arm(&mut self) -> (TimerToken, Option<TimerToken>) {
        self.visible = true;
        self.next_token += 1;
        let token = TimerToken(self.next_token);
        let previous = self.pending_hide.replace(token);
        (token, previous)
    }

    /// Show with no hide timer. Returns the cancelled token, if any.
    pub fn pin(&mut self) -> Option<TimerToken> {
        self.visible = true;
        self.pending_hide.take()
    }

    /// Hide and close the dropdown. Returns the cancelled token, if any.
    pub fn hide(&mut self) -> Option<TimerToken> {
        self.visible = false;
        self.dropdown_open = false;
        self.pending_hide.take()
    }

    /// Consume a fired timer; false if it was cancelled or superseded
    pub fn fire(&mut self, token: TimerToken) -> bool {
        if self.pending_hide == Some(token) {
            self.pending_hide = None;
            true
        } else {
            false
        }
    }

    pub fn toggle_dropdown(&mut self) -> bool {
        self.dropdown_open = !self.dropdown_open;
        self.dropdown_open
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }
}
