#![forbid(unsafe_code)]

//! Widgets for scrim.
//!
//! The only widget shipped here is the animated [`ModalOverlay`]; the rest of
//! the crate is the small render surface it draws into: a node-tree
//! [`Frame`](frame::Frame) with hit regions, and ordered
//! [`ClassList`](class_list::ClassList)s carrying the presentation tokens an
//! external styling system interprets.

pub mod class_list;
pub mod frame;
pub mod modal;

pub use class_list::ClassList;
pub use frame::{Frame, HitData, HitId, HitRegion, Motion, Node, NodeId, NodeKind};
pub use modal::{
    ClassListSurface, CloseCallback, CloseOutcome, ModalAction, ModalOverlay, ModalOverlayConfig,
    ModalOverlayState, PresentationSurface, SizeVariant, TickReport, TransitionEvent,
    TransitionState,
};

use scrim_core::geometry::Rect;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a [`Frame`](frame::Frame) within a given
/// `Rect`. Nodes pushed while rendering nest under whichever node the caller
/// currently has open.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut frame::Frame);
}

/// A `StatefulWidget` is a widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;

    /// Render the widget into the frame with mutable state.
    fn render(&self, area: Rect, frame: &mut frame::Frame, state: &mut Self::State);
}

impl<W: Widget + ?Sized> Widget for &W {
    fn render(&self, area: Rect, frame: &mut frame::Frame) {
        (**self).render(area, frame);
    }
}

impl<W: Widget + ?Sized> Widget for Box<W> {
    fn render(&self, area: Rect, frame: &mut frame::Frame) {
        (**self).render(area, frame);
    }
}

/// Renders nothing. Useful as placeholder content.
impl Widget for () {
    fn render(&self, _area: Rect, _frame: &mut frame::Frame) {}
}

/// Plain text content.
impl Widget for str {
    fn render(&self, area: Rect, frame: &mut frame::Frame) {
        frame.leaf(frame::NodeKind::Text(self.to_owned()), area);
    }
}

impl Widget for String {
    fn render(&self, area: Rect, frame: &mut frame::Frame) {
        self.as_str().render(area, frame);
    }
}
