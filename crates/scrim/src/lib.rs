#![forbid(unsafe_code)]

//! scrim public facade crate.
//!
//! Re-exports the overlay widget and the primitives it is driven by, plus a
//! prelude for day-to-day use.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use scrim_core::clock::{Clock, ManualClock, SystemClock};
pub use scrim_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, MouseEvent, MouseEventKind,
};
pub use scrim_core::geometry::{Rect, Sides, Size};

// --- Widget re-exports -----------------------------------------------------

pub use scrim_widgets::frame::{Frame, HitId, HitRegion, Motion, NodeKind};
pub use scrim_widgets::modal::{
    ClassListSurface, CloseCallback, CloseOutcome, ModalAction, ModalOverlay, ModalOverlayConfig,
    ModalOverlayPolicy, ModalOverlayState, PolicyError, PresentationSurface, SizeVariant,
    TickReport, TransitionState,
};
pub use scrim_widgets::{ClassList, StatefulWidget, Widget};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for scrim hosts.
#[derive(Debug)]
pub enum Error {
    /// I/O failure.
    Io(std::io::Error),
    /// Overlay policy failed to load or validate.
    Policy(PolicyError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Policy(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Policy(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<PolicyError> for Error {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Io(err) => Self::Io(err),
            other => Self::Policy(other),
        }
    }
}

/// Standard result type for scrim APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load an overlay configuration from a TOML file.
#[cfg(feature = "policy-config")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> Result<ModalOverlayConfig> {
    let policy = ModalOverlayPolicy::from_toml_file(path)?;
    Ok(policy.into_config()?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ClassListSurface, CloseOutcome, Error, Event, Frame, KeyCode, KeyEvent, ModalAction,
        ModalOverlay, ModalOverlayConfig, ModalOverlayState, Rect, Result, SizeVariant,
        StatefulWidget, TransitionState, Widget,
    };

    pub use crate::{core, widgets};
}

pub use scrim_core as core;
pub use scrim_widgets as widgets;
