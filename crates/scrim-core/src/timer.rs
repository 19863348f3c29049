#![forbid(unsafe_code)]

//! Single-slot deadline timers.
//!
//! A [`TimerSlot`] holds at most one pending action. Scheduling a new action
//! cancels and replaces the old one; clearing or dropping the slot cancels
//! whatever is pending. The slot never fires on its own: the owner calls
//! [`poll`](TimerSlot::poll) from its event loop, which hands back the
//! payload once the deadline has passed.
//!
//! # Invariants
//!
//! - At most one entry is pending per slot.
//! - A superseded or cleared entry's [`CancellationToken`] reports
//!   `is_cancelled() == true`; its payload is dropped without being returned.
//! - `poll` returns a payload at most once per `schedule`.

use crate::cancellation::{CancellationSource, CancellationToken};
use web_time::{Duration, Instant};

/// A payload whose deadline has passed.
#[derive(Debug)]
pub struct Fired<T> {
    /// The scheduled payload.
    pub payload: T,
    /// When the entry was due.
    pub deadline: Instant,
    /// Generation of the entry (1 for the first `schedule` on a slot).
    pub generation: u64,
}

struct Pending<T> {
    deadline: Instant,
    payload: T,
    source: CancellationSource,
    generation: u64,
}

/// A timer that holds at most one outstanding action.
pub struct TimerSlot<T> {
    label: &'static str,
    pending: Option<Pending<T>>,
    generation: u64,
}

impl<T> TimerSlot<T> {
    /// Create an empty slot. `label` tags log events.
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            pending: None,
            generation: 0,
        }
    }

    /// Label used in log events.
    #[inline]
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Schedule `payload` to fire `delay` after `now`.
    ///
    /// Any pending entry is cancelled first. Returns the token of the new
    /// entry.
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> CancellationToken {
        if self.cancel() {
            tracing::trace!(
                target: "scrim.timer",
                timer = self.label,
                "pending entry superseded"
            );
        }

        self.generation += 1;
        let source = CancellationSource::new();
        let token = source.token();
        self.pending = Some(Pending {
            deadline: now + delay,
            payload,
            source,
            generation: self.generation,
        });

        tracing::debug!(
            target: "scrim.timer",
            timer = self.label,
            generation = self.generation,
            delay_ms = delay.as_millis() as u64,
            "timer scheduled"
        );
        token
    }

    /// Cancel the pending entry, if any.
    ///
    /// Returns `true` if something was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                pending.source.cancel();
                tracing::debug!(
                    target: "scrim.timer",
                    timer = self.label,
                    generation = pending.generation,
                    "timer cancelled"
                );
                true
            }
            None => false,
        }
    }

    /// Whether an entry is pending.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending entry.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Token of the pending entry.
    pub fn token(&self) -> Option<CancellationToken> {
        self.pending.as_ref().map(|p| p.source.token())
    }

    /// Number of entries ever scheduled on this slot.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Time left until the pending entry is due (zero if overdue).
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Take the payload if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Fired<T>> {
        let due = self.pending.as_ref().is_some_and(|p| now >= p.deadline);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        tracing::trace!(
            target: "scrim.timer",
            timer = self.label,
            generation = pending.generation,
            "timer fired"
        );
        Some(Fired {
            payload: pending.payload,
            deadline: pending.deadline,
            generation: pending.generation,
        })
    }
}

impl<T> Drop for TimerSlot<T> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.source.cancel();
        }
    }
}

impl<T> std::fmt::Debug for TimerSlot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerSlot")
            .field("label", &self.label)
            .field("generation", &self.generation)
            .field("deadline", &self.deadline())
            .finish_non_exhaustive()
    }
}
