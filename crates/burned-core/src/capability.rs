//! Page-wide, load-once acquisition of the streaming engine
//!
//! Every player on a page asks for the engine. Only the first request while
//! the engine is absent performs the acquisition (the script injection); the
//! rest either find it present or wait for the in-flight load.
//!
//! ```rust
//! use burned_core::capability::{Acquisition, LoadOnce};
//!
//! static ENGINE: LoadOnce = LoadOnce::new();
//!
//! match ENGINE.begin(false) {
//!     Acquisition::Acquire => { /* inject the script, then call ENGINE.complete(ok) */ }
//!     Acquisition::InFlight => { /* wait for the injected script */ }
//!     Acquisition::Present => { /* use the engine */ }
//!     Acquisition::Failed => { /* fall back to native playback */ }
//! }
//! ```

use std::sync::atomic::{AtomicU8, Ordering};

const ABSENT: u8 = 0;
const LOADING: u8 = 1;
const READY: u8 = 2;
const FAILED: u8 = 3;

/// What a caller of [`LoadOnce::begin`] should do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquisition {
    /// Engine is available
    Present,
    /// Caller owns the acquisition and must call [`LoadOnce::complete`]
    Acquire,
    /// Another caller is acquiring; wait for it
    InFlight,
    /// A previous acquisition failed
    Failed,
}

/// Observed state of the acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Absent,
    Loading,
    Ready,
    Failed,
}

/// Lock-free idempotent initializer
#[derive(Debug)]
pub struct LoadOnce {
    state: AtomicU8,
}

impl LoadOnce {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(ABSENT),
        }
    }

    /// Start an acquisition. `present` is the host's own check for the engine
    /// (e.g. a global already defined by another script tag).
    pub fn begin(&self, present: bool) -> Acquisition {
        if present {
            self.state.store(READY, Ordering::Release);
            return Acquisition::Present;
        }

        match self
            .state
            .compare_exchange(ABSENT, LOADING, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => Acquisition::Acquire,
            Err(LOADING) => Acquisition::InFlight,
            Err(READY) => Acquisition::Present,
            Err(_) => Acquisition::Failed,
        }
    }

    /// Record the result of the acquisition started by [`Acquisition::Acquire`]
    pub fn complete(&self, ok: bool) {
        let next = if ok { READY } else { FAILED };
        let _ = self
            .state
            .compare_exchange(LOADING, next, Ordering::AcqRel, Ordering::Acquire);
    }

    pub fn status(&self) -> LoadStatus {
        match self.state.load(Ordering::Acquire) {
            ABSENT => LoadStatus::Absent,
            LOADING => LoadStatus::Loading,
            READY => LoadStatus::Ready,
            _ => LoadStatus::Failed,
        }
    }
}

impl Default for LoadOnce {
    fn default() -> Self {
        Self::new()
    }
}
