#![forbid(unsafe_code)]

//! Animated modal overlay.
//!
//! # Architecture
//!
//! - [`ModalOverlay`]: the props (open flag, close callback, children, size)
//!   and the render pass that emits the node tree.
//! - [`ModalOverlayState`]: owns the mounted [`PresentationSurface`], the
//!   settle and exit timers, and the interpolated motion.
//! - [`VisibilityAnimator`]: debounces the open flag behind the settle delay.
//! - [`CloseSequencer`]: holds the owner's callback until the exit delay
//!   has passed.
//! - [`TransitionState`]: the Hidden/Entering/Visible/Exiting state machine.
//!
//! Nothing here runs on its own; the host drives time through
//! [`ModalOverlayState::tick`].

mod animator;
mod config;
mod motion;
mod overlay;
mod presentation;
mod sequencer;
mod size;

pub use animator::VisibilityAnimator;
pub use config::{
    DEFAULT_EXIT_DELAY, DEFAULT_SETTLE_DELAY, DEFAULT_TRANSITION, MAX_DELAY_MS,
    MAX_TRANSITION_MS, ModalOverlayConfig, ModalOverlayPolicy, PolicyError,
};
pub use motion::{Easing, MotionTrack, OFF_SCREEN, ON_SCREEN};
pub use overlay::{
    CLOSE_ICON_INSET, CLOSE_ICON_SIZE, MODAL_HIT_BACKDROP, MODAL_HIT_CLOSE, MODAL_HIT_CONTENT,
    ModalAction, ModalOverlay, ModalOverlayState, PANEL_PADDING, TickReport, close_icon_rect,
    content_rect, panel_rect,
};
pub use presentation::{
    CLOSE_ICON_CLASSES, CONTENT_SLOT_CLASSES, ClassListSurface, OVERLAY_BASE_CLASSES,
    OVERLAY_CLOSED_CLASS, OVERLAY_OPEN_CLASSES, PANEL_BASE_CLASSES, POINTER_CLASS, Presentation,
    PresentationSurface, TRANSITION_CLASSES, TransitionEvent, TransitionState,
    presentation_classes,
};
pub use sequencer::{CloseCallback, CloseOutcome, CloseSequencer};
pub use size::{SMALL_PANEL, SizeVariant, UnknownSizeVariant};
