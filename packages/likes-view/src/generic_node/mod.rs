//! Rendering backends.

#[cfg(feature = "dom")]
pub mod dom_node;
#[cfg(feature = "ssr")]
pub mod ssr_node;

use std::fmt;

use crate::reactive::ScopeRef;

/// A node of the tree being rendered into. Implemented by every backend.
///
/// Nodes are cheap handles: cloning one gives another handle to the same node, and equality is
/// identity.
pub trait GenericNode: fmt::Debug + Clone + PartialEq + Eq + 'static {
    /// The argument passed to event handlers.
    type EventType;

    /// Creates an element with the given tag name.
    fn element(tag: &str) -> Self;

    /// Creates a text node.
    fn text_node(text: &str) -> Self;

    /// Sets an attribute on an element.
    fn set_attribute(&self, name: &str, value: &str);

    /// Appends `child` as the last child of this node.
    fn append_child(&self, child: &Self);

    /// Replaces the text of this node. For an element, the existing children are replaced by a
    /// single text node.
    fn update_inner_text(&self, text: &str);

    /// Attaches an event listener. The listener stays attached until `ctx` is disposed.
    fn event<'a>(&self, ctx: ScopeRef<'a>, name: &str, handler: Box<dyn Fn(Self::EventType) + 'a>);
}

/// Backends that render HTML.
pub trait Html: GenericNode {
    /// Whether the backend renders into a live browser document.
    const IS_BROWSER: bool;
}
