//! Frame-loop lifecycle, decoupled from the host scheduling API.
//!
//! The web frontend adapts this over `requestAnimationFrame`; tests drive it
//! with a mock scheduler and assert that teardown leaves nothing registered.

use std::sync::atomic::{AtomicU64, Ordering};

/// Host-environment frame scheduling. `request_frame` returns an opaque
/// handle usable with `cancel_frame` until the frame fires.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> u64;
    fn cancel_frame(&mut self, id: u64);
}

/// Tracks the single in-flight frame request of one animation loop.
///
/// Invariant: after `stop` returns, no request is outstanding and `on_frame`
/// never again reports the tick as runnable, so no callback body can execute
/// after teardown even if the host still delivers a stray frame.
#[derive(Debug)]
pub struct FrameLoop {
    pending: Option<u64>,
    stopped: bool,
}

impl FrameLoop {
    /// Register the first frame request and start the chain.
    pub fn start(sched: &mut impl FrameScheduler) -> Self {
        Self {
            pending: Some(sched.request_frame()),
            stopped: false,
        }
    }

    /// Called by the adapter when the scheduled frame fires.
    ///
    /// Returns `true` if the tick should run, re-registering the next frame;
    /// returns `false` once stopped, registering nothing.
    pub fn on_frame(&mut self, sched: &mut impl FrameScheduler) -> bool {
        self.pending = None;
        if self.stopped {
            return false;
        }
        self.pending = Some(sched.request_frame());
        true
    }

    /// Cancel any in-flight request and bar all future ticks. Idempotent.
    pub fn stop(&mut self, sched: &mut impl FrameScheduler) {
        self.stopped = true;
        if let Some(id) = self.pending.take() {
            sched.cancel_frame(id);
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn pending(&self) -> Option<u64> {
        self.pending
    }
}

/// Teardown counter for mounts that cross an await point.
///
/// A mount records the epoch when it begins; teardown bumps the counter, so
/// any still-awaiting mount sees a stale token when it resumes and discards
/// whatever it built instead of installing it.
#[derive(Debug, Default)]
pub struct TeardownEpoch {
    counter: AtomicU64,
}

impl TeardownEpoch {
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(0),
        }
    }

    /// Token for a mount starting now.
    pub fn begin(&self) -> u64 {
        self.counter.load(Ordering::SeqCst)
    }

    /// Invalidate every token issued so far.
    pub fn invalidate(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.counter.load(Ordering::SeqCst) == token
    }
}
