//! Event-loop hooks used by the controller

use futures_util::future::LocalBoxFuture;
use std::time::Duration;

/// Token of one armed hide timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(pub u64);

/// Timers and background tasks on the host event loop
pub trait Scheduler {
    /// Arm the hide timer; when it fires the host calls
    /// `PlayerController::on_hide_timer(token)`
    fn arm_hide(&mut self, delay: Duration, token: TimerToken);

    /// Cancel the armed hide timer, if any
    fn cancel_hide(&mut self);

    /// Run a task to completion without blocking the caller
    fn spawn(&mut self, task: LocalBoxFuture<'static, ()>);
}
