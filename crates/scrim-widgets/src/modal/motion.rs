#![forbid(unsafe_code)]

//! Interpolated motion for hosts that cannot run CSS transitions.
//!
//! A [`MotionTrack`] follows the overlay's class switches: each switch
//! retargets the track, which then eases from wherever it currently is to the
//! new target over the transition duration. Sampling is pure; the track only
//! changes when [`retarget`](MotionTrack::retarget) is called.

use crate::frame::Motion;
use web_time::{Duration, Instant};

/// Motion values matching the off-screen transition tokens
/// (`translate-y-96 scale-50 opacity-0`).
pub const OFF_SCREEN: Motion = Motion {
    translate_y: 384.0,
    scale: 0.5,
    opacity: 0.0,
};

/// Motion values for the on-screen presentation.
pub const ON_SCREEN: Motion = Motion::IDENTITY;

/// Easing curve applied to transition progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "policy-config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "policy-config", serde(rename_all = "kebab-case"))]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Decelerating.
    EaseOut,
    /// Accelerating.
    EaseIn,
    /// Smooth S-curve; what `transition-all` uses by default.
    #[default]
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a progress value (0.0 to 1.0).
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// A single retargetable transition between two [`Motion`] values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionTrack {
    from: Motion,
    to: Motion,
    started: Option<Instant>,
    duration: Duration,
    easing: Easing,
}

impl MotionTrack {
    /// A track resting at `at`.
    pub fn resting(at: Motion, duration: Duration, easing: Easing) -> Self {
        Self {
            from: at,
            to: at,
            started: None,
            duration,
            easing,
        }
    }

    /// The value the track is heading towards.
    #[inline]
    pub fn target(&self) -> Motion {
        self.to
    }

    /// Linear progress in `[0, 1]` at `now`.
    pub fn progress(&self, now: Instant) -> f64 {
        let Some(started) = self.started else {
            return 1.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(started);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Whether the track has reached its target at `now`.
    pub fn is_settled(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Interpolated value at `now`.
    pub fn sample(&self, now: Instant) -> Motion {
        let t = self.progress(now);
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp(self.to, self.easing.apply(t))
    }

    /// Start moving towards `target` from the current value.
    ///
    /// With `snap` set the track jumps straight to `target`. Retargeting to
    /// the value already being approached keeps the running transition.
    pub fn retarget(&mut self, target: Motion, now: Instant, snap: bool) {
        if snap {
            *self = Self::resting(target, self.duration, self.easing);
            return;
        }
        if target == self.to {
            return;
        }
        self.from = self.sample(now);
        self.to = target;
        self.started = Some(now);
    }
}
