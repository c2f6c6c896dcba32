//! Render surface abstraction.
//!
//! The splash screen never talks to a concrete rendering technology. It is
//! written against [`RenderSurface`], a small set of DOM-like primitives that
//! a host embeds: element construction, tree edits, style/attribute writes,
//! and two awaitable events (resource load and CSS transition end).

use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a render surface implementation.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// A handle did not refer to a live node on this surface.
    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    /// The element signalled its error event instead of its load event.
    #[error("Element failed to load: {locator}")]
    ElementFailed {
        /// The locator the element was pointed at (src/href).
        locator: String,
    },

    /// Any other surface-specific failure.
    #[error("Surface failure: {0}")]
    Backend(String),
}

/// Opaque handle to one node on a render surface.
///
/// Handles are allocated by the surface implementation and are only
/// meaningful to the surface that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a handle from a raw id.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Style properties the splash screen writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Width,
    Opacity,
    BackgroundColor,
}

impl StyleProperty {
    /// The CSS property name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Opacity => "opacity",
            Self::BackgroundColor => "background-color",
        }
    }
}

impl std::fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// DOM-like primitives the splash screen is rendered through.
///
/// Implementations must be callable from spawned tasks, so the trait is
/// `Send + Sync`; all mutation goes through `&self`.
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// Creates a detached element with the given tag and class list.
    fn create_element(&self, tag: &str, classes: &[&str]) -> NodeId;

    /// The document body node.
    fn body(&self) -> NodeId;

    /// The document head node.
    fn head(&self) -> NodeId;

    /// Appends `child` as the last child of `parent`.
    fn append_child(&self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError>;

    /// Detaches a node from its parent.
    fn remove(&self, node: NodeId) -> Result<(), SurfaceError>;

    /// Writes one style property on a node.
    fn set_style(&self, node: NodeId, property: StyleProperty, value: &str)
        -> Result<(), SurfaceError>;

    /// Writes one attribute on a node.
    fn set_attribute(&self, node: NodeId, name: &str, value: &str) -> Result<(), SurfaceError>;

    /// Replaces a node's text content.
    fn set_text(&self, node: NodeId, text: &str) -> Result<(), SurfaceError>;

    /// Adds a class to a node's class list.
    fn add_class(&self, node: NodeId, class: &str) -> Result<(), SurfaceError>;

    /// Looks up an element of the host page by id.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Resolves when the node fires its load event; fails with
    /// [`SurfaceError::ElementFailed`] when it fires its error event instead.
    async fn await_load(&self, node: NodeId) -> Result<(), SurfaceError>;

    /// Resolves when the node's current CSS transition ends.
    async fn await_transition_end(&self, node: NodeId) -> Result<(), SurfaceError>;

    /// Raises a blocking user-facing alert.
    fn alert(&self, message: &str);
}
