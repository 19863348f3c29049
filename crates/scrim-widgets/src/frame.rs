#![forbid(unsafe_code)]

//! Frame = node tree + hit regions for a render pass.
//!
//! The `Frame` is the render target widgets write to. Instead of a cell grid
//! it collects a tree of presentation nodes, each carrying a rectangle, a
//! [`ClassList`], and optional motion values, which a host maps onto its own
//! rendering (DOM elements, terminal cells, canvas draws).
//!
//! # Usage
//!
//! ```
//! use scrim_core::geometry::Rect;
//! use scrim_widgets::frame::{Frame, NodeKind};
//!
//! let mut frame = Frame::new(80, 24);
//! let root = frame.begin(NodeKind::Element("list".into()), Rect::new(0, 0, 80, 24));
//! frame.leaf(NodeKind::Text("item".into()), Rect::new(0, 0, 80, 1));
//! frame.end();
//!
//! assert_eq!(frame.children(root).len(), 1);
//! ```
//!
//! # Invariants
//!
//! - Nodes are stored in pre-order: a parent always precedes its children.
//! - `end()` without a matching `begin()` is ignored.

use crate::class_list::ClassList;
use scrim_core::geometry::Rect;

/// Identifier for a clickable region.
///
/// Widgets register hit regions with unique IDs to enable pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    /// Create a new hit ID from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data for hit callbacks.
pub type HitData = u64;

/// Regions within a widget for pointer interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    /// No interactive region.
    #[default]
    None,
    /// Main content area.
    Content,
    /// Clickable button.
    Button,
    /// Custom region tag.
    Custom(u8),
}

/// Index of a node within a [`Frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Raw index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// What a node represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Full-viewport backdrop hosting a modal panel.
    Overlay,
    /// The centered modal panel.
    Panel,
    /// The close affordance inside a panel.
    CloseIcon,
    /// Container for caller-supplied content.
    ContentSlot,
    /// A generic element rendered by content widgets.
    Element(String),
    /// A run of text.
    Text(String),
}

/// Interpolated transform values for a node.
///
/// Hosts that cannot run CSS transitions apply these directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Vertical offset in units (positive = below resting position).
    pub translate_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
    /// Opacity in `[0.0, 1.0]`.
    pub opacity: f64,
}

impl Motion {
    /// Resting, fully visible values.
    pub const IDENTITY: Self = Self {
        translate_y: 0.0,
        scale: 1.0,
        opacity: 1.0,
    };

    /// Linear interpolation between `self` and `to` at `t` in `[0, 1]`.
    ///
    /// Each component stays between its two endpoints.
    pub fn lerp(self, to: Motion, t: f64) -> Motion {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f64, b: f64| (a + (b - a) * t).clamp(a.min(b), a.max(b));
        Motion {
            translate_y: mix(self.translate_y, to.translate_y),
            scale: mix(self.scale, to.scale),
            opacity: mix(self.opacity, to.opacity).clamp(0.0, 1.0),
        }
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A node in the render tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// What the node represents.
    pub kind: NodeKind,
    /// Layout rectangle.
    pub rect: Rect,
    /// Presentation class tokens.
    pub classes: ClassList,
    /// Interpolated transform, when the widget animates this node.
    pub motion: Option<Motion>,
    /// Caller-supplied styling override, passed through uninterpreted.
    pub class_override: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    fn new(kind: NodeKind, rect: Rect, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            rect,
            classes: ClassList::new(),
            motion: None,
            class_override: None,
            parent,
            children: Vec::new(),
        }
    }

    /// Parent node, if any.
    #[inline]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in render order.
    #[inline]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HitEntry {
    rect: Rect,
    id: HitId,
    region: HitRegion,
    data: HitData,
}

/// Node tree + metadata for a render pass.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u16,
    height: u16,
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    open: Vec<NodeId>,
    /// When `Some`, widgets can register clickable regions.
    hits: Option<Vec<HitEntry>>,
}

impl Frame {
    /// Create a new frame with given dimensions and no hit testing.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            nodes: Vec::new(),
            roots: Vec::new(),
            open: Vec::new(),
            hits: None,
        }
    }

    /// Create a frame with hit testing enabled.
    pub fn with_hit_testing(width: u16, height: u16) -> Self {
        Self {
            hits: Some(Vec::new()),
            ..Self::new(width, height)
        }
    }

    /// Frame width in units.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Frame height in units.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Bounding rectangle of the frame.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Clear nodes and hit regions for the next render.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.open.clear();
        if let Some(hits) = self.hits.as_mut() {
            hits.clear();
        }
    }

    fn push(&mut self, kind: NodeKind, rect: Rect) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.open.last().copied();
        self.nodes.push(Node::new(kind, rect, parent));
        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Push a node and make it the parent of subsequent nodes until `end()`.
    pub fn begin(&mut self, kind: NodeKind, rect: Rect) -> NodeId {
        let id = self.push(kind, rect);
        self.open.push(id);
        id
    }

    /// Close the most recently begun node.
    pub fn end(&mut self) {
        self.open.pop();
    }

    /// Push a node without children.
    pub fn leaf(&mut self, kind: NodeKind, rect: Rect) -> NodeId {
        self.push(kind, rect)
    }

    /// Look up a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Look up a node mutably.
    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Top-level nodes.
    #[inline]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Children of `id` (empty if the id is unknown).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(Node::children).unwrap_or(&[])
    }

    /// Total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no nodes were rendered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// First node (pre-order) of the given kind.
    pub fn find(&self, kind: &NodeKind) -> Option<(NodeId, &Node)> {
        self.iter().find(|(_, n)| &n.kind == kind)
    }

    /// Number of nodes of the given kind.
    pub fn count(&self, kind: &NodeKind) -> usize {
        self.nodes.iter().filter(|n| &n.kind == kind).count()
    }

    /// Whether `descendant` sits anywhere below `ancestor`.
    pub fn is_descendant(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        let mut cursor = self.node(descendant).and_then(Node::parent);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.node(id).and_then(Node::parent);
        }
        false
    }

    /// Register a hit region (if hit testing is enabled).
    ///
    /// Returns `true` if the region was registered. A region clipped away by
    /// the frame bounds is not registered. Later registrations sit on top of
    /// earlier ones.
    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) -> bool {
        let bounds = self.bounds();
        match self.hits.as_mut() {
            Some(hits) => {
                let rect = rect.intersection_opt(&bounds).unwrap_or_default();
                if rect.is_empty() {
                    return false;
                }
                hits.push(HitEntry {
                    rect,
                    id,
                    region,
                    data,
                });
                true
            }
            None => false,
        }
    }

    /// Hit test at the given position (if hit testing is enabled).
    ///
    /// Returns the topmost region containing the point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hits.as_ref().and_then(|hits| {
            hits.iter()
                .rev()
                .find(|h| h.rect.contains(x, y))
                .map(|h| (h.id, h.region, h.data))
        })
    }
}

impl Default for Frame {
    /// Create a 1x1 frame (minimum size).
    fn default() -> Self {
        Self::new(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodes_nest_under_begin() {
        let mut frame = Frame::new(10, 10);
        let outer = frame.begin(NodeKind::Overlay, Rect::new(0, 0, 10, 10));
        let inner = frame.begin(NodeKind::Panel, Rect::new(2, 2, 6, 6));
        let text = frame.leaf(NodeKind::Text("hi".into()), Rect::new(3, 3, 2, 1));
        frame.end();
        frame.end();

        assert_eq!(frame.roots(), &[outer]);
        assert_eq!(frame.children(outer), &[inner]);
        assert_eq!(frame.children(inner), &[text]);
        assert!(frame.is_descendant(text, outer));
        assert!(!frame.is_descendant(outer, text));
        assert_eq!(frame.node(text).and_then(Node::parent), Some(inner));
    }

    #[test]
    fn unmatched_end_is_ignored() {
        let mut frame = Frame::new(4, 4);
        frame.end();
        let a = frame.leaf(NodeKind::ContentSlot, Rect::new(0, 0, 1, 1));
        assert_eq!(frame.roots(), &[a]);
    }

    #[test]
    fn find_and_count() {
        let mut frame = Frame::new(4, 4);
        frame.leaf(NodeKind::Text("a".into()), Rect::default());
        frame.leaf(NodeKind::Text("b".into()), Rect::default());
        frame.leaf(NodeKind::CloseIcon, Rect::default());
        assert_eq!(frame.count(&NodeKind::CloseIcon), 1);
        assert_eq!(frame.count(&NodeKind::Text("a".into())), 1);
        assert!(frame.find(&NodeKind::Panel).is_none());
        assert_eq!(frame.len(), 3);
    }

    #[test]
    fn clear_resets_everything() {
        let mut frame = Frame::with_hit_testing(4, 4);
        frame.begin(NodeKind::Overlay, Rect::new(0, 0, 4, 4));
        frame.register_hit(Rect::new(0, 0, 4, 4), HitId::new(1), HitRegion::Content, 0);
        frame.clear();
        assert!(frame.is_empty());
        assert!(frame.roots().is_empty());
        assert_eq!(frame.hit_test(1, 1), None);
        let root = frame.leaf(NodeKind::Panel, Rect::default());
        assert_eq!(frame.roots(), &[root]);
    }

    #[test]
    fn hit_test_without_grid() {
        let mut frame = Frame::new(10, 10);
        assert!(!frame.register_hit(Rect::new(0, 0, 5, 5), HitId::new(1), HitRegion::Content, 0));
        assert_eq!(frame.hit_test(1, 1), None);
    }

    #[test]
    fn later_hits_are_on_top() {
        let mut frame = Frame::with_hit_testing(20, 20);
        frame.register_hit(Rect::new(0, 0, 10, 10), HitId::new(1), HitRegion::Content, 1);
        frame.register_hit(Rect::new(5, 5, 10, 10), HitId::new(2), HitRegion::Button, 2);

        assert_eq!(frame.hit_test(2, 2), Some((HitId::new(1), HitRegion::Content, 1)));
        assert_eq!(frame.hit_test(6, 6), Some((HitId::new(2), HitRegion::Button, 2)));
        assert_eq!(frame.hit_test(14, 14), Some((HitId::new(2), HitRegion::Button, 2)));
        assert_eq!(frame.hit_test(19, 19), None);
    }

    #[test]
    fn hits_are_clipped_to_frame() {
        let mut frame = Frame::with_hit_testing(5, 5);
        frame.register_hit(Rect::new(3, 3, 10, 10), HitId::new(9), HitRegion::Content, 0);
        assert!(frame.hit_test(4, 4).is_some());
        assert!(frame.hit_test(5, 5).is_none());
    }

    #[test]
    fn hit_outside_frame_is_not_registered() {
        let mut frame = Frame::with_hit_testing(5, 5);
        assert!(!frame.register_hit(Rect::new(8, 8, 4, 4), HitId::new(3), HitRegion::Content, 0));
        assert!(!frame.register_hit(Rect::new(1, 1, 0, 3), HitId::new(3), HitRegion::Content, 0));
        assert!(frame.register_hit(Rect::new(1, 1, 2, 2), HitId::new(3), HitRegion::Content, 0));
    }

    #[test]
    fn hit_id_roundtrip() {
        let id = HitId::new(42);
        assert_eq!(id.id(), 42);
        assert_eq!(id, HitId(42));
    }

    #[test]
    fn motion_lerp_endpoints_and_clamp() {
        let hidden = Motion {
            translate_y: 384.0,
            scale: 0.5,
            opacity: 0.0,
        };
        assert_eq!(hidden.lerp(Motion::IDENTITY, 0.0), hidden);
        assert_eq!(hidden.lerp(Motion::IDENTITY, 1.0), Motion::IDENTITY);
        assert_eq!(hidden.lerp(Motion::IDENTITY, 7.0), Motion::IDENTITY);
        let mid = hidden.lerp(Motion::IDENTITY, 0.5);
        assert!((mid.scale - 0.75).abs() < 1e-10);
        assert!((mid.translate_y - 192.0).abs() < 1e-10);
    }
}
