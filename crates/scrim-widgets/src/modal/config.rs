#![forbid(unsafe_code)]

//! Overlay timing and behavior configuration.
//!
//! [`ModalOverlayConfig`] is the runtime form, built in code. Its defaults
//! are the overlay's standard timings: a 100 ms settle delay before a class
//! switch, a 200 ms exit delay before the close callback, and a 150 ms
//! `transition-all`.
//!
//! [`ModalOverlayPolicy`] is the same data with millisecond fields, loadable
//! from TOML or JSON when the `policy-config` feature is enabled:
//!
//! ```toml
//! settle_delay_ms = 100
//! exit_delay_ms = 200
//! transition_ms = 150
//! close_on_escape = true
//! close_on_backdrop = false
//! reduced_motion = false
//! easing = "ease-in-out"
//! ```

#[cfg(feature = "policy-config")]
use std::path::Path;

use super::motion::Easing;
use web_time::Duration;

/// Default wait before applying the visible/hidden presentation.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);
/// Default wait between an explicit close and the close callback.
pub const DEFAULT_EXIT_DELAY: Duration = Duration::from_millis(200);
/// Default length of the `transition-all` animation.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(150);

/// Upper bound accepted for the settle and exit delays.
pub const MAX_DELAY_MS: u64 = 60_000;
/// Upper bound accepted for the transition length.
pub const MAX_TRANSITION_MS: u64 = 10_000;

/// Configuration for [`ModalOverlay`](super::ModalOverlay).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalOverlayConfig {
    /// Wait after an open-flag change before switching classes.
    pub settle_delay: Duration,
    /// Wait after an explicit close before invoking the callback.
    pub exit_delay: Duration,
    /// Length of the interpolated motion.
    pub transition: Duration,
    /// Easing of the interpolated motion.
    pub easing: Easing,
    /// Close when Escape is pressed.
    pub close_on_escape: bool,
    /// Close when the backdrop outside the panel is clicked.
    pub close_on_backdrop: bool,
    /// Snap motion values instead of interpolating.
    pub reduced_motion: bool,
}

impl Default for ModalOverlayConfig {
    fn default() -> Self {
        Self {
            settle_delay: DEFAULT_SETTLE_DELAY,
            exit_delay: DEFAULT_EXIT_DELAY,
            transition: DEFAULT_TRANSITION,
            easing: Easing::EaseInOut,
            close_on_escape: true,
            close_on_backdrop: false,
            reduced_motion: false,
        }
    }
}

impl ModalOverlayConfig {
    /// Set the settle delay.
    #[must_use]
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set the exit delay.
    #[must_use]
    pub fn exit_delay(mut self, delay: Duration) -> Self {
        self.exit_delay = delay;
        self
    }

    /// Set the motion length.
    #[must_use]
    pub fn transition(mut self, duration: Duration) -> Self {
        self.transition = duration;
        self
    }

    /// Set the motion easing.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set whether Escape closes the overlay.
    #[must_use]
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Set whether a backdrop click closes the overlay.
    #[must_use]
    pub fn close_on_backdrop(mut self, close: bool) -> Self {
        self.close_on_backdrop = close;
        self
    }

    /// Set reduced-motion mode.
    #[must_use]
    pub fn reduced_motion(mut self, reduced: bool) -> Self {
        self.reduced_motion = reduced;
        self
    }
}

/// Serializable overlay configuration with millisecond fields.
///
/// Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "policy-config",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "policy-config", serde(default))]
pub struct ModalOverlayPolicy {
    /// Settle delay in milliseconds.
    pub settle_delay_ms: u64,
    /// Exit delay in milliseconds. Zero fires the callback on the next tick.
    pub exit_delay_ms: u64,
    /// Motion length in milliseconds.
    pub transition_ms: u64,
    /// Motion easing.
    pub easing: Easing,
    /// Close when Escape is pressed.
    pub close_on_escape: bool,
    /// Close when the backdrop is clicked.
    pub close_on_backdrop: bool,
    /// Snap motion values.
    pub reduced_motion: bool,
}

impl Default for ModalOverlayPolicy {
    fn default() -> Self {
        ModalOverlayConfig::default().into()
    }
}

/// Durations are stored in whole milliseconds; any sub-millisecond part is
/// truncated, so a config with such delays does not round-trip exactly.
impl From<ModalOverlayConfig> for ModalOverlayPolicy {
    fn from(config: ModalOverlayConfig) -> Self {
        Self {
            settle_delay_ms: config.settle_delay.as_millis() as u64,
            exit_delay_ms: config.exit_delay.as_millis() as u64,
            transition_ms: config.transition.as_millis() as u64,
            easing: config.easing,
            close_on_escape: config.close_on_escape,
            close_on_backdrop: config.close_on_backdrop,
            reduced_motion: config.reduced_motion,
        }
    }
}

impl ModalOverlayPolicy {
    /// Load from a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PolicyError> {
        toml::from_str(s).map_err(PolicyError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PolicyError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "policy-config")]
    pub fn from_json_str(s: &str) -> Result<Self, PolicyError> {
        serde_json::from_str(s).map_err(PolicyError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "policy-config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PolicyError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "policy-config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the policy
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.settle_delay_ms > MAX_DELAY_MS {
            errors.push(format!(
                "settle_delay_ms must be <= {MAX_DELAY_MS}, got {}",
                self.settle_delay_ms
            ));
        }
        if self.exit_delay_ms > MAX_DELAY_MS {
            errors.push(format!(
                "exit_delay_ms must be <= {MAX_DELAY_MS}, got {}",
                self.exit_delay_ms
            ));
        }
        if self.transition_ms > MAX_TRANSITION_MS {
            errors.push(format!(
                "transition_ms must be <= {MAX_TRANSITION_MS}, got {}",
                self.transition_ms
            ));
        }

        errors
    }

    /// Validate and convert to the runtime configuration.
    pub fn into_config(self) -> Result<ModalOverlayConfig, PolicyError> {
        let errors = self.validate();
        if !errors.is_empty() {
            return Err(PolicyError::Validation(errors));
        }
        Ok(ModalOverlayConfig {
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            exit_delay: Duration::from_millis(self.exit_delay_ms),
            transition: Duration::from_millis(self.transition_ms),
            easing: self.easing,
            close_on_escape: self.close_on_escape,
            close_on_backdrop: self.close_on_backdrop,
            reduced_motion: self.reduced_motion,
        })
    }
}

/// Errors from loading or validating a [`ModalOverlayPolicy`].
#[derive(Debug)]
pub enum PolicyError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "policy-config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "policy-config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PolicyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for PolicyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "policy-config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for PolicyError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
