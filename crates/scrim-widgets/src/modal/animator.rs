#![forbid(unsafe_code)]

//! Debounced reaction to the owner's open flag.

use scrim_core::cancellation::CancellationToken;
use scrim_core::timer::{Fired, TimerSlot};
use web_time::{Duration, Instant};

/// Tracks the last observed open flag and the pending settle timer.
///
/// Each change of the flag (re)starts the settle timer with the new value;
/// a flip back before the deadline replaces the pending entry, so only the
/// latest value ever reaches the surface.
#[derive(Debug)]
pub struct VisibilityAnimator {
    settle: TimerSlot<bool>,
    last_observed: Option<bool>,
}

impl VisibilityAnimator {
    /// An animator that has observed nothing yet.
    pub const fn new() -> Self {
        Self {
            settle: TimerSlot::new("settle"),
            last_observed: None,
        }
    }

    /// Record the owner's open flag.
    ///
    /// Returns `true` if the value changed (or is the first one seen) and a
    /// settle was scheduled.
    pub fn observe(&mut self, open: bool, now: Instant, delay: Duration) -> bool {
        if self.last_observed == Some(open) {
            return false;
        }
        self.last_observed = Some(open);
        self.settle.schedule(now, delay, open);
        true
    }

    /// The last flag passed to [`observe`](Self::observe).
    #[inline]
    pub fn last_observed(&self) -> Option<bool> {
        self.last_observed
    }

    /// Take the settled value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Fired<bool>> {
        self.settle.poll(now)
    }

    /// Cancel the pending settle. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.settle.cancel()
    }

    /// Deadline of the pending settle.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.settle.deadline()
    }

    /// Token of the pending settle.
    #[inline]
    pub fn token(&self) -> Option<CancellationToken> {
        self.settle.token()
    }

    /// Whether a settle is pending.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.settle.is_pending()
    }

    /// Cancel and forget the last observation.
    pub fn reset(&mut self) {
        self.settle.cancel();
        self.last_observed = None;
    }
}

impl Default for VisibilityAnimator {
    fn default() -> Self {
        Self::new()
    }
}
