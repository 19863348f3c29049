#![forbid(unsafe_code)]

//! The modal overlay widget and its state.
//!
//! # Lifecycle
//!
//! 1. The host mounts a [`PresentationSurface`] on the state.
//! 2. Every frame it renders [`ModalOverlay`] with the current open flag.
//!    Rendering emits the node tree and then feeds the flag to
//!    [`ModalOverlayState::observe_open`].
//! 3. The host calls [`ModalOverlayState::tick`] from its event loop (or
//!    sleeps until [`next_deadline`](ModalOverlayState::next_deadline)), which
//!    applies settled presentations and runs due close callbacks.
//!
//! # Example
//!
//! ```
//! use scrim_core::clock::ManualClock;
//! use scrim_widgets::frame::{Frame, NodeKind};
//! use scrim_widgets::modal::{ClassListSurface, ModalOverlay, ModalOverlayState, TransitionState};
//! use scrim_widgets::StatefulWidget;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let mut state = ModalOverlayState::with_clock(clock.clone());
//! state.mount(ClassListSurface::new());
//!
//! let mut frame = Frame::new(120, 40);
//! ModalOverlay::new("hello").open(true).render(frame.bounds(), &mut frame, &mut state);
//! assert!(frame.find(&NodeKind::ContentSlot).is_some());
//! assert_eq!(state.transition(), TransitionState::Entering);
//!
//! clock.advance(Duration::from_millis(100));
//! state.tick();
//! assert_eq!(state.transition(), TransitionState::Visible);
//! ```

use super::animator::VisibilityAnimator;
use super::config::ModalOverlayConfig;
use super::motion::{MotionTrack, OFF_SCREEN, ON_SCREEN};
use super::presentation::{
    CLOSE_ICON_CLASSES, CONTENT_SLOT_CLASSES, OVERLAY_BASE_CLASSES, OVERLAY_CLOSED_CLASS,
    OVERLAY_OPEN_CLASSES, PANEL_BASE_CLASSES, Presentation, PresentationSurface,
    TransitionEvent, TransitionState, presentation_classes,
};
use super::sequencer::{CloseCallback, CloseOutcome, CloseSequencer};
use super::size::SizeVariant;
use crate::frame::{Frame, HitData, HitId, HitRegion, Motion, NodeId, NodeKind};
use crate::{StatefulWidget, Widget};
use scrim_core::cancellation::CancellationToken;
use scrim_core::clock::{Clock, SystemClock};
use scrim_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};
use scrim_core::geometry::{Rect, Sides};
use std::fmt;
use web_time::Instant;

/// Hit region tag for the backdrop around the panel.
pub const MODAL_HIT_BACKDROP: HitRegion = HitRegion::Custom(1);
/// Hit region tag for the panel body.
pub const MODAL_HIT_CONTENT: HitRegion = HitRegion::Custom(2);
/// Hit region tag for the close icon.
pub const MODAL_HIT_CLOSE: HitRegion = HitRegion::Custom(3);

/// Side length of the close icon.
pub const CLOSE_ICON_SIZE: u16 = 50;
/// Gap between the close icon and the panel's top-right corner.
pub const CLOSE_ICON_INSET: u16 = 20;
/// Padding between the panel edge and its content.
pub const PANEL_PADDING: u16 = 56;

/// Action emitted by [`ModalOverlay::handle_event`] when a close starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// The close icon was clicked.
    CloseButtonClicked,
    /// The backdrop was clicked.
    BackdropClicked,
    /// Escape was pressed.
    EscapePressed,
}

/// What a call to [`ModalOverlayState::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickReport {
    /// The open flag whose presentation was just applied.
    pub settled: Option<bool>,
    /// Whether the close callback ran.
    pub closed: bool,
}

impl TickReport {
    /// Whether nothing happened.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.settled.is_none() && !self.closed
    }
}

/// Panel rectangle for a size variant inside `area`.
pub fn panel_rect(area: Rect, size: SizeVariant) -> Rect {
    size.panel_rect(area)
}

/// Close icon rectangle: inset from the panel's top-right corner.
pub fn close_icon_rect(panel: Rect) -> Rect {
    let x = panel
        .right()
        .saturating_sub(CLOSE_ICON_INSET + CLOSE_ICON_SIZE)
        .max(panel.x);
    let y = panel.y.saturating_add(CLOSE_ICON_INSET);
    Rect::new(x, y, CLOSE_ICON_SIZE, CLOSE_ICON_SIZE)
        .intersection_opt(&panel)
        .unwrap_or_default()
}

/// Content slot rectangle: the panel minus its padding.
pub fn content_rect(panel: Rect) -> Rect {
    panel.inner(Sides::all(PANEL_PADDING))
}

/// A full-viewport overlay hosting a centered panel.
///
/// Rendering emits this tree:
///
/// ```text
/// Overlay                (whole area)
/// └── Panel              (sized by SizeVariant, centered)
///     ├── CloseIcon      (always present)
///     └── ContentSlot    (only while open)
///         └── children
/// ```
pub struct ModalOverlay<C = ()> {
    children: C,
    is_open: bool,
    on_close: Option<CloseCallback>,
    class_name: Option<String>,
    size: SizeVariant,
    config: ModalOverlayConfig,
    hit_id: Option<HitId>,
}

impl<C> ModalOverlay<C> {
    /// Create a closed overlay around `children`.
    pub fn new(children: C) -> Self {
        Self {
            children,
            is_open: false,
            on_close: None,
            class_name: None,
            size: SizeVariant::default(),
            config: ModalOverlayConfig::default(),
            hit_id: None,
        }
    }

    /// Set the owner's open flag.
    #[must_use]
    pub fn open(mut self, is_open: bool) -> Self {
        self.is_open = is_open;
        self
    }

    /// Set the callback run once a close sequence finishes.
    #[must_use]
    pub fn on_close(mut self, f: impl Fn() + 'static) -> Self {
        self.on_close = Some(CloseCallback::new(f));
        self
    }

    /// Set a styling override carried onto the panel node.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Set the panel size.
    #[must_use]
    pub fn size(mut self, size: SizeVariant) -> Self {
        self.size = size;
        self
    }

    /// Set timing and behavior.
    #[must_use]
    pub fn config(mut self, config: ModalOverlayConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the hit id used for pointer regions.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    /// The owner's open flag.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// The panel size.
    #[inline]
    pub fn size_variant(&self) -> SizeVariant {
        self.size
    }

    /// The child content.
    #[inline]
    pub fn children(&self) -> &C {
        &self.children
    }

    fn callback(&self) -> CloseCallback {
        self.on_close.clone().unwrap_or_else(CloseCallback::noop)
    }

    /// Start the close sequence with this overlay's callback.
    pub fn handle_close(&self, state: &mut ModalOverlayState) -> CloseOutcome {
        state.configure(self.config);
        state.request_close(self.callback())
    }

    /// Route an input event.
    ///
    /// Escape (when enabled), a left click on the close icon, and a left
    /// click on the backdrop (when enabled) start the close sequence. Clicks
    /// are ignored while the panel is not interactive. Returns the action
    /// only if a new close actually started.
    pub fn handle_event(
        &self,
        event: &Event,
        hit: Option<(HitId, HitRegion, HitData)>,
        state: &mut ModalOverlayState,
    ) -> Option<ModalAction> {
        if !self.is_open {
            return None;
        }

        let action = match event {
            Event::Key(KeyEvent {
                code: KeyCode::Escape,
                kind: KeyEventKind::Press,
                ..
            }) if self.config.close_on_escape => ModalAction::EscapePressed,
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                // The panel takes no pointer input until it has settled open.
                if !state.presentation().interactive {
                    return None;
                }
                let (id, region, _) = hit?;
                if Some(id) != self.hit_id {
                    return None;
                }
                if region == MODAL_HIT_CLOSE {
                    ModalAction::CloseButtonClicked
                } else if region == MODAL_HIT_BACKDROP && self.config.close_on_backdrop {
                    ModalAction::BackdropClicked
                } else {
                    return None;
                }
            }
            _ => return None,
        };

        match self.handle_close(state) {
            CloseOutcome::AlreadyPending => None,
            _ => Some(action),
        }
    }

    fn style(frame: &mut Frame, id: NodeId, f: impl FnOnce(&mut crate::frame::Node)) {
        if let Some(node) = frame.node_mut(id) {
            f(node);
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for ModalOverlay<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalOverlay")
            .field("children", &self.children)
            .field("is_open", &self.is_open)
            .field("class_name", &self.class_name)
            .field("size", &self.size)
            .field("config", &self.config)
            .field("hit_id", &self.hit_id)
            .finish_non_exhaustive()
    }
}

impl<C: Widget> StatefulWidget for ModalOverlay<C> {
    type State = ModalOverlayState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State) {
        let (overlay_tokens, panel_tokens) = presentation_classes(state.presentation());
        let motion = state.motion_values();

        let overlay = frame.begin(NodeKind::Overlay, area);
        Self::style(frame, overlay, |node| {
            node.classes.add_all(OVERLAY_BASE_CLASSES.split_whitespace());
            let layout = if self.is_open {
                OVERLAY_OPEN_CLASSES
            } else {
                OVERLAY_CLOSED_CLASS
            };
            node.classes.add_all(layout.split_whitespace());
            node.classes.extend(overlay_tokens.iter());
            node.motion = Some(motion);
        });

        let panel_area = panel_rect(area, self.size);
        let panel = frame.begin(NodeKind::Panel, panel_area);
        Self::style(frame, panel, |node| {
            node.classes.add_all(PANEL_BASE_CLASSES.split_whitespace());
            node.classes.add_all(self.size.classes().split_whitespace());
            node.classes.extend(panel_tokens.iter());
            node.class_override = self.class_name.clone();
        });

        let icon_area = close_icon_rect(panel_area);
        let icon = frame.leaf(NodeKind::CloseIcon, icon_area);
        Self::style(frame, icon, |node| {
            node.classes.add_all(CLOSE_ICON_CLASSES.split_whitespace());
        });

        if self.is_open {
            let slot_area = content_rect(panel_area);
            let slot = frame.begin(NodeKind::ContentSlot, slot_area);
            Self::style(frame, slot, |node| {
                node.classes.add_all(CONTENT_SLOT_CLASSES.split_whitespace());
            });
            self.children.render(slot_area, frame);
            frame.end();
        }

        frame.end();
        frame.end();

        if self.is_open {
            if let Some(hit_id) = self.hit_id {
                frame.register_hit(area, hit_id, MODAL_HIT_BACKDROP, 0);
                frame.register_hit(panel_area, hit_id, MODAL_HIT_CONTENT, 0);
                frame.register_hit(icon_area, hit_id, MODAL_HIT_CLOSE, 0);
            }
        }

        state.configure(self.config);
        state.observe_open(self.is_open);
    }
}

/// Mutable state behind a [`ModalOverlay`]: surface, timers, and motion.
pub struct ModalOverlayState {
    surface: Option<Box<dyn PresentationSurface>>,
    clock: Box<dyn Clock>,
    config: ModalOverlayConfig,
    transition: TransitionState,
    presentation: Presentation,
    animator: VisibilityAnimator,
    sequencer: CloseSequencer,
    motion: MotionTrack,
}

impl ModalOverlayState {
    /// Unmounted state reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Unmounted state reading `clock`.
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        let config = ModalOverlayConfig::default();
        Self {
            surface: None,
            clock: Box::new(clock),
            config,
            transition: TransitionState::Hidden,
            presentation: Presentation::HIDDEN,
            animator: VisibilityAnimator::new(),
            sequencer: CloseSequencer::new(),
            motion: MotionTrack::resting(OFF_SCREEN, config.transition, config.easing),
        }
    }

    /// Set the initial configuration.
    #[must_use]
    pub fn with_config(mut self, config: ModalOverlayConfig) -> Self {
        self.configure(config);
        self
    }

    /// Replace the configuration.
    ///
    /// Pending timers keep their deadlines; new delays apply to the next
    /// schedule.
    pub fn configure(&mut self, config: ModalOverlayConfig) {
        if self.config == config {
            return;
        }
        let now = self.clock.now();
        let at = self.motion.sample(now);
        let target = self.motion_target();
        self.motion = MotionTrack::resting(at, config.transition, config.easing);
        self.motion.retarget(target, now, config.reduced_motion);
        self.config = config;
    }

    /// Current configuration.
    #[inline]
    pub fn config(&self) -> &ModalOverlayConfig {
        &self.config
    }

    /// Attach the presentation surface.
    ///
    /// The surface is brought in line with the current transition state,
    /// including any settles that ran while nothing was mounted. Any
    /// previously mounted surface is dropped.
    pub fn mount(&mut self, surface: impl PresentationSurface + 'static) {
        let replaced = self.surface.replace(Box::new(surface)).is_some();
        if replaced {
            tracing::debug!(target: "scrim.modal", "surface replaced");
        } else {
            tracing::debug!(target: "scrim.modal", "surface mounted");
        }
        let now = self.clock.now();
        self.apply(self.transition, now);
    }

    /// Detach the surface and tear down.
    ///
    /// Both timers are cancelled; a pending close callback is dropped without
    /// running. Returns `true` if a surface was mounted.
    pub fn unmount(&mut self) -> bool {
        let settle = self.animator.cancel();
        let exit = self.sequencer.cancel();
        self.animator.reset();
        self.transition = TransitionState::Hidden;
        self.presentation = Presentation::HIDDEN;
        self.motion = MotionTrack::resting(OFF_SCREEN, self.config.transition, self.config.easing);
        let was_mounted = self.surface.take().is_some();
        tracing::debug!(
            target: "scrim.modal",
            settle_cancelled = settle,
            close_dropped = exit,
            "surface unmounted"
        );
        was_mounted
    }

    /// Whether a surface is attached.
    #[inline]
    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    /// Feed the owner's open flag.
    ///
    /// A change (or the first observation) restarts the settle timer and
    /// returns `true`; an unchanged flag is ignored.
    pub fn observe_open(&mut self, open: bool) -> bool {
        let now = self.clock.now();
        if !self.animator.observe(open, now, self.config.settle_delay) {
            return false;
        }
        let event = if open {
            TransitionEvent::OpenObserved
        } else {
            TransitionEvent::HideObserved
        };
        self.transition = self.transition.next(event);
        tracing::debug!(
            target: "scrim.modal",
            open,
            transition = ?self.transition,
            "open flag observed"
        );
        true
    }

    /// Start the close sequence.
    ///
    /// While mounted: the panel turns non-interactive and off-screen at once,
    /// the settle timer is cancelled, and `callback` runs after the exit
    /// delay. Without a surface the callback runs before this returns. A
    /// request while a close is in flight does nothing.
    pub fn request_close(&mut self, callback: CloseCallback) -> CloseOutcome {
        if self.sequencer.is_pending() {
            tracing::trace!(target: "scrim.modal", "close already pending");
            return CloseOutcome::AlreadyPending;
        }
        if self.surface.is_none() {
            tracing::debug!(target: "scrim.modal", "close without surface; invoking callback");
            callback.invoke();
            return CloseOutcome::Immediate;
        }

        let now = self.clock.now();
        self.animator.cancel();
        let next = self.transition.next(TransitionEvent::CloseRequested);
        self.apply(next, now);
        let outcome = self.sequencer.request(now, self.config.exit_delay, callback);
        tracing::debug!(
            target: "scrim.modal",
            exit_delay_ms = self.config.exit_delay.as_millis() as u64,
            "close sequence started"
        );
        outcome
    }

    /// Run everything that is due.
    pub fn tick(&mut self) -> TickReport {
        let now = self.clock.now();
        let mut report = TickReport::default();

        if let Some(fired) = self.animator.poll(now) {
            let open = fired.payload;
            let next = self
                .transition
                .next(TransitionEvent::SettleElapsed { open });
            self.apply(next, now);
            report.settled = Some(open);
        }

        if let Some(callback) = self.sequencer.poll(now) {
            self.transition = self.transition.next(TransitionEvent::ExitElapsed);
            tracing::debug!(target: "scrim.modal", "close callback invoked");
            callback.invoke();
            report.closed = true;
        }

        report
    }

    fn apply(&mut self, next: TransitionState, now: Instant) {
        self.transition = next;
        let Some(surface) = self.surface.as_mut() else {
            tracing::trace!(
                target: "scrim.modal",
                transition = ?next,
                "no surface; presentation unchanged"
            );
            return;
        };
        let presentation = Presentation {
            transition: next,
            interactive: next.is_interactive(),
        };
        surface.set_interactive(presentation.interactive);
        surface.set_transition_state(presentation.transition);
        self.presentation = presentation;
        let target = self.motion_target();
        self.motion.retarget(target, now, self.config.reduced_motion);
        tracing::debug!(
            target: "scrim.modal",
            transition = ?next,
            interactive = presentation.interactive,
            "presentation applied"
        );
    }

    fn motion_target(&self) -> Motion {
        if self.presentation.transition.is_on_screen() {
            ON_SCREEN
        } else {
            OFF_SCREEN
        }
    }

    /// What was last pushed to the surface.
    #[inline]
    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    /// Current state machine position.
    #[inline]
    pub fn transition(&self) -> TransitionState {
        self.transition
    }

    /// Interpolated motion values at the current instant.
    pub fn motion_values(&self) -> Motion {
        self.motion.sample(self.clock.now())
    }

    /// Whether motion values are still changing.
    pub fn is_animating(&self) -> bool {
        !self.motion.is_settled(self.clock.now())
    }

    /// Earliest pending timer deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.animator.deadline(), self.sequencer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether a close sequence is in flight.
    #[inline]
    pub fn is_closing(&self) -> bool {
        self.sequencer.is_pending()
    }

    /// Token of the pending settle.
    ///
    /// It reports cancelled once the settle is superseded by a newer flag,
    /// cancelled by a close, or dropped on unmount. Hosts that mirror
    /// [`next_deadline`](Self::next_deadline) into their own scheduler can
    /// use it to discard stale wake-ups.
    pub fn settle_token(&self) -> Option<CancellationToken> {
        self.animator.token()
    }

    /// Token of the pending close callback.
    pub fn close_token(&self) -> Option<CancellationToken> {
        self.sequencer.token()
    }
}

impl Default for ModalOverlayState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ModalOverlayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModalOverlayState")
            .field("mounted", &self.is_mounted())
            .field("config", &self.config)
            .field("transition", &self.transition)
            .field("presentation", &self.presentation)
            .field("animator", &self.animator)
            .field("sequencer", &self.sequencer)
            .finish_non_exhaustive()
    }
}
