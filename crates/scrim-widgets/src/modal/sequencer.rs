#![forbid(unsafe_code)]

//! Deferred close callbacks.

use scrim_core::cancellation::CancellationToken;
use scrim_core::timer::TimerSlot;
use std::fmt;
use std::rc::Rc;
use web_time::{Duration, Instant};

/// The owner's close callback.
///
/// Cheap to clone; every clone invokes the same function.
#[derive(Clone)]
pub struct CloseCallback(Rc<dyn Fn()>);

impl CloseCallback {
    /// Wrap a function.
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// A callback that does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Invoke the callback.
    #[inline]
    pub fn invoke(&self) {
        (self.0)();
    }
}

impl fmt::Debug for CloseCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CloseCallback(..)")
    }
}

/// Result of a close request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The exit animation started; the callback fires at `deadline`.
    Scheduled {
        /// When the callback is due.
        deadline: Instant,
    },
    /// No surface was mounted; the callback already ran.
    Immediate,
    /// A close is already in flight; nothing new was scheduled.
    AlreadyPending,
}

/// Holds at most one pending close callback.
#[derive(Debug)]
pub struct CloseSequencer {
    exit: TimerSlot<CloseCallback>,
}

impl CloseSequencer {
    /// An idle sequencer.
    pub const fn new() -> Self {
        Self {
            exit: TimerSlot::new("exit"),
        }
    }

    /// Schedule `callback` to run `delay` after `now`.
    ///
    /// A request while one is pending keeps the first deadline and drops
    /// `callback`.
    pub fn request(&mut self, now: Instant, delay: Duration, callback: CloseCallback) -> CloseOutcome {
        if self.exit.is_pending() {
            return CloseOutcome::AlreadyPending;
        }
        self.exit.schedule(now, delay, callback);
        CloseOutcome::Scheduled {
            deadline: now + delay,
        }
    }

    /// Take the callback once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<CloseCallback> {
        self.exit.poll(now).map(|fired| fired.payload)
    }

    /// Drop the pending callback without running it.
    pub fn cancel(&mut self) -> bool {
        self.exit.cancel()
    }

    /// Whether a close is in flight.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.exit.is_pending()
    }

    /// Token of the pending callback.
    #[inline]
    pub fn token(&self) -> Option<CancellationToken> {
        self.exit.token()
    }

    /// Deadline of the pending callback.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.exit.deadline()
    }
}

impl Default for CloseSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const DELAY: Duration = Duration::from_millis(200);

    fn counter() -> (Rc<Cell<u32>>, CloseCallback) {
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        (calls, CloseCallback::new(move || c.set(c.get() + 1)))
    }

    #[test]
    fn callback_invokes_shared_fn() {
        let (calls, cb) = counter();
        let clone = cb.clone();
        cb.invoke();
        clone.invoke();
        assert_eq!(calls.get(), 2);
        assert_eq!(format!("{cb:?}"), "CloseCallback(..)");
    }

    #[test]
    fn request_schedules_at_delay() {
        let t0 = Instant::now();
        let (calls, cb) = counter();
        let mut seq = CloseSequencer::new();
        assert_eq!(
            seq.request(t0, DELAY, cb),
            CloseOutcome::Scheduled { deadline: t0 + DELAY }
        );
        assert!(seq.poll(t0 + Duration::from_millis(199)).is_none());
        seq.poll(t0 + DELAY).expect("due").invoke();
        assert_eq!(calls.get(), 1);
        assert!(!seq.is_pending());
    }

    #[test]
    fn second_request_keeps_first() {
        let t0 = Instant::now();
        let (first, cb1) = counter();
        let (second, cb2) = counter();
        let mut seq = CloseSequencer::new();
        seq.request(t0, DELAY, cb1);
        assert_eq!(
            seq.request(t0 + Duration::from_millis(50), DELAY, cb2),
            CloseOutcome::AlreadyPending
        );
        assert_eq!(seq.deadline(), Some(t0 + DELAY));
        seq.poll(t0 + DELAY).expect("due").invoke();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn cancel_drops_callback() {
        let t0 = Instant::now();
        let (calls, cb) = counter();
        let mut seq = CloseSequencer::new();
        seq.request(t0, DELAY, cb);
        assert!(seq.cancel());
        assert!(seq.poll(t0 + DELAY * 10).is_none());
        assert_eq!(calls.get(), 0);
        assert_eq!(Rc::strong_count(&calls), 1);
    }
}
