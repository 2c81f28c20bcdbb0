//! Rendering backend for the browser DOM.

use std::fmt;

use wasm_bindgen::prelude::*;
use wasm_bindgen::{intern, JsCast};
use web_sys::{Document, Element, Event, Node};

use crate::generic_node::{GenericNode, Html};
use crate::reactive::*;
use crate::view::View;
use crate::MountError;

fn document() -> Document {
    web_sys::window().unwrap_throw().document().unwrap_throw()
}

/// A node of a browser document.
#[derive(Clone, PartialEq, Eq)]
pub struct DomNode {
    node: Node,
}

impl DomNode {
    /// The underlying `web_sys` node.
    pub fn inner_element(&self) -> Node {
        self.node.clone()
    }

    /// Wraps an existing `web_sys` node.
    pub fn from_web_sys(node: Node) -> Self {
        Self { node }
    }
}

impl fmt::Debug for DomNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.dyn_ref::<Element>() {
            Some(element) => write!(f, "DomNode({})", element.outer_html()),
            None => write!(f, "DomNode({:?})", self.node.text_content()),
        }
    }
}

impl GenericNode for DomNode {
    type EventType = Event;

    fn element(tag: &str) -> Self {
        let node = document().create_element(intern(tag)).unwrap_throw().into();
        Self { node }
    }

    fn text_node(text: &str) -> Self {
        let node = document().create_text_node(text).into();
        Self { node }
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.node
            .unchecked_ref::<Element>()
            .set_attribute(intern(name), value)
            .unwrap_throw();
    }

    fn append_child(&self, child: &Self) {
        self.node.append_child(&child.node).unwrap_throw();
    }

    fn update_inner_text(&self, text: &str) {
        self.node.set_text_content(Some(text));
    }

    fn event<'a>(&self, ctx: ScopeRef<'a>, name: &str, handler: Box<dyn Fn(Self::EventType) + 'a>) {
        // SAFETY: the listener is removed and the closure dropped when `ctx` is disposed, which
        // happens before anything borrowed for 'a is freed.
        let handler: Box<dyn Fn(Self::EventType) + 'static> =
            unsafe { std::mem::transmute(handler) };
        let closure = Closure::wrap(handler);
        self.node
            .add_event_listener_with_callback(intern(name), closure.as_ref().unchecked_ref())
            .unwrap_throw();

        let node = self.node.clone();
        let name = name.to_string();
        ctx.on_cleanup(move || {
            let _ = node
                .remove_event_listener_with_callback(&name, closure.as_ref().unchecked_ref());
            drop(closure);
        });
    }
}

impl Html for DomNode {
    const IS_BROWSER: bool = true;
}

/// Renders a view into the document `<body>`. The view lives as long as the page.
pub fn render(f: impl FnOnce(ScopeRef<'_>) -> View<DomNode>) {
    let body = document().body().unwrap_throw();
    render_to(f, &body);
}

/// Renders a view as the last children of `parent`. The view lives as long as the page.
pub fn render_to(f: impl FnOnce(ScopeRef<'_>) -> View<DomNode>, parent: &Node) {
    // Dropping the handle leaks the scope on purpose.
    let _ = render_get_scope(f, parent);
}

/// Renders a view into the element with the given id. The view lives as long as the page.
///
/// Fails without rendering anything if there is no document or no such element.
pub fn render_to_id(
    id: &str,
    f: impl FnOnce(ScopeRef<'_>) -> View<DomNode>,
) -> Result<(), MountError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or(MountError::NoDocument)?;
    let target = document
        .get_element_by_id(id)
        .ok_or_else(|| MountError::MissingTarget { id: id.to_string() })?;
    render_to(f, &target);
    Ok(())
}

/// Renders a view as the last children of `parent` and returns a handle that can unmount it.
///
/// Dropping the handle without calling [`MountedView::unmount`] keeps the view mounted for the
/// lifetime of the page.
pub fn render_get_scope(
    f: impl FnOnce(ScopeRef<'_>) -> View<DomNode>,
    parent: &Node,
) -> MountedView {
    let mut nodes = Vec::new();
    let disposer = create_scope(|ctx| {
        let view = f(ctx);
        for node in view.flatten() {
            parent.append_child(&node.node).unwrap_throw();
            nodes.push(node.node);
        }
    });
    log::debug!("mounted {} node(s)", nodes.len());

    MountedView {
        parent: parent.clone(),
        nodes,
        disposer,
    }
}

/// A view rendered by [`render_get_scope`].
pub struct MountedView {
    parent: Node,
    nodes: Vec<Node>,
    disposer: ScopeDisposer,
}

impl MountedView {
    /// The top-level nodes that were attached to the parent.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Removes the rendered nodes from the parent and disposes the reactive scope, which
    /// detaches every event listener the view registered.
    pub fn unmount(self) {
        for node in &self.nodes {
            let _ = self.parent.remove_child(node);
        }
        self.disposer.dispose();
        log::debug!("unmounted {} node(s)", self.nodes.len());
    }
}
