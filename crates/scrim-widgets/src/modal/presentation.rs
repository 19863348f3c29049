#![forbid(unsafe_code)]

//! Presentation state machine and the surface it drives.
//!
//! The overlay's look is a function of two facts: which [`TransitionState`]
//! it is in, and whether the panel accepts pointer input. Both are pushed to
//! a [`PresentationSurface`], the capability that stands in for the two
//! styled nodes (overlay root and panel body). [`ClassListSurface`] is the
//! default surface: it toggles the class tokens the external styling system
//! understands.
//!
//! State machine: Hidden → Entering → Visible → Exiting → Hidden
//!
//! Rapid toggling can skip phases (e.g. Entering → Exiting directly).

use crate::class_list::ClassList;
use std::cell::RefCell;
use std::rc::Rc;

/// Tokens present on the overlay root while off-screen.
pub const TRANSITION_CLASSES: [&str; 3] = ["translate-y-96", "scale-50", "opacity-0"];

/// Token present on the panel while it accepts pointer input.
pub const POINTER_CLASS: &str = "pointer-events-auto";

/// Static tokens on the overlay root.
pub const OVERLAY_BASE_CLASSES: &str = "fixed top-0 left-0 z-50 w-screen max-w-[100vw] h-d-screen max-h-[100vh] transition-all pointer-events-none";

/// Layout tokens on the overlay root while open.
pub const OVERLAY_OPEN_CLASSES: &str = "flex items-center justify-center";

/// Layout token on the overlay root while closed.
pub const OVERLAY_CLOSED_CLASS: &str = "hidden";

/// Static tokens on the panel body.
pub const PANEL_BASE_CLASSES: &str =
    "relative max-w-full max-h-full p-14 bg-black border border-secondary rounded-md";

/// Tokens on the close icon.
pub const CLOSE_ICON_CLASSES: &str = "absolute top-5 right-5 cursor-pointer";

/// Tokens on the content slot.
pub const CONTENT_SLOT_CLASSES: &str = "w-full h-full overflow-scroll";

/// Presentation phase of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransitionState {
    /// Off-screen, scaled down, transparent, non-interactive.
    #[default]
    Hidden,
    /// Open was observed; waiting for the settle delay before appearing.
    Entering,
    /// On-screen, full scale, opaque, interactive.
    Visible,
    /// Leaving: either a hide is settling or an explicit close is running.
    Exiting,
}

/// Inputs to the presentation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionEvent {
    /// The owner's open flag became true.
    OpenObserved,
    /// The owner's open flag became false.
    HideObserved,
    /// The settle delay elapsed with the given open flag.
    SettleElapsed { open: bool },
    /// An explicit close was requested.
    CloseRequested,
    /// The exit delay of an explicit close elapsed.
    ExitElapsed,
}

impl TransitionState {
    /// Apply an event, returning the next state.
    pub fn next(self, event: TransitionEvent) -> Self {
        use TransitionEvent as E;
        match (self, event) {
            (_, E::SettleElapsed { open: true }) => Self::Visible,
            (_, E::SettleElapsed { open: false }) => Self::Hidden,
            (_, E::CloseRequested) => Self::Exiting,

            (Self::Hidden | Self::Exiting, E::OpenObserved) => Self::Entering,
            (state @ (Self::Entering | Self::Visible), E::OpenObserved) => state,

            (Self::Entering | Self::Visible, E::HideObserved) => Self::Exiting,
            (state @ (Self::Hidden | Self::Exiting), E::HideObserved) => state,

            (Self::Exiting, E::ExitElapsed) => Self::Hidden,
            (state, E::ExitElapsed) => state,
        }
    }

    /// Whether the on-screen presentation applies.
    #[inline]
    pub fn is_on_screen(self) -> bool {
        matches!(self, Self::Visible)
    }

    /// Whether the panel should accept pointer input.
    #[inline]
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::Visible)
    }

    /// Whether a change is in flight.
    #[inline]
    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Entering | Self::Exiting)
    }
}

/// Snapshot of what was last pushed to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presentation {
    /// Current presentation phase.
    pub transition: TransitionState,
    /// Whether the panel accepts pointer input.
    pub interactive: bool,
}

impl Presentation {
    /// The initial, fully hidden presentation.
    pub const HIDDEN: Self = Self {
        transition: TransitionState::Hidden,
        interactive: false,
    };
}

/// Capability over the two styled nodes of a mounted overlay.
pub trait PresentationSurface {
    /// Toggle pointer interactivity on the panel.
    fn set_interactive(&mut self, interactive: bool);

    /// Apply the presentation for a transition state to the overlay root.
    fn set_transition_state(&mut self, state: TransitionState);
}

impl<S: PresentationSurface + ?Sized> PresentationSurface for Box<S> {
    fn set_interactive(&mut self, interactive: bool) {
        (**self).set_interactive(interactive);
    }

    fn set_transition_state(&mut self, state: TransitionState) {
        (**self).set_transition_state(state);
    }
}

/// Shared surfaces let the owner keep a handle for inspection.
impl<S: PresentationSurface + ?Sized> PresentationSurface for Rc<RefCell<S>> {
    fn set_interactive(&mut self, interactive: bool) {
        self.borrow_mut().set_interactive(interactive);
    }

    fn set_transition_state(&mut self, state: TransitionState) {
        self.borrow_mut().set_transition_state(state);
    }
}

/// Surface backed by two class lists (overlay root and panel body).
///
/// Only the animation tokens live here; static layout tokens are added at
/// render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassListSurface {
    overlay: ClassList,
    panel: ClassList,
}

impl ClassListSurface {
    /// A surface in the initial hidden presentation.
    pub fn new() -> Self {
        Self {
            overlay: TRANSITION_CLASSES.into_iter().collect(),
            panel: ClassList::new(),
        }
    }

    /// Class tokens on the overlay root.
    #[inline]
    pub fn overlay(&self) -> &ClassList {
        &self.overlay
    }

    /// Class tokens on the panel body.
    #[inline]
    pub fn panel(&self) -> &ClassList {
        &self.panel
    }
}

impl Default for ClassListSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PresentationSurface for ClassListSurface {
    fn set_interactive(&mut self, interactive: bool) {
        self.panel.set(POINTER_CLASS, interactive);
    }

    fn set_transition_state(&mut self, state: TransitionState) {
        if state.is_on_screen() {
            self.overlay.remove_all(TRANSITION_CLASSES);
        } else {
            self.overlay.add_all(TRANSITION_CLASSES);
        }
    }
}

/// Class tokens for a presentation, independent of any surface.
///
/// Returns `(overlay, panel)` animation tokens; used when rendering.
pub fn presentation_classes(presentation: Presentation) -> (ClassList, ClassList) {
    let mut surface = ClassListSurface::new();
    surface.set_transition_state(presentation.transition);
    surface.set_interactive(presentation.interactive);
    (surface.overlay, surface.panel)
}
