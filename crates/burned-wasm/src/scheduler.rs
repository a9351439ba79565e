//! Browser timers and task spawning

use std::time::Duration;

use burned_core::{Scheduler, TimerToken};
use futures_util::future::LocalBoxFuture;
use gloo_timers::callback::Timeout;

use crate::player::PlayerHandle;

/// [`Scheduler`] over `setTimeout` and the microtask queue
pub struct BrowserScheduler {
    player: PlayerHandle,
    /// Pending hide timer; dropping it clears the timeout
    hide: Option<Timeout>,
}

impl BrowserScheduler {
    pub fn new(player: PlayerHandle) -> Self {
        Self { player, hide: None }
    }
}

impl Scheduler for BrowserScheduler {
    fn arm_hide(&mut self, delay: Duration, token: TimerToken) {
        let player = self.player.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        self.hide = Some(Timeout::new(millis, move || {
            player.dispatch(move |controller| controller.on_hide_timer(token));
        }));
    }

    fn cancel_hide(&mut self) {
        self.hide = None;
    }

    fn spawn(&mut self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
