//! The [`View`] type.

use std::rc::Rc;

use crate::generic_node::GenericNode;

#[derive(Clone, Debug)]
enum ViewType<G: GenericNode> {
    Node(G),
    Fragment(Rc<[View<G>]>),
}

/// The result of rendering: a single node or a fragment of views.
#[derive(Clone, Debug)]
pub struct View<G: GenericNode> {
    inner: ViewType<G>,
}

impl<G: GenericNode> View<G> {
    /// Creates a view from a single node.
    pub fn new_node(node: G) -> Self {
        Self {
            inner: ViewType::Node(node),
        }
    }

    /// Creates a view from a list of views.
    pub fn new_fragment(fragment: Vec<View<G>>) -> Self {
        Self {
            inner: ViewType::Fragment(fragment.into()),
        }
    }

    /// An empty view.
    pub fn empty() -> Self {
        Self::new_fragment(Vec::new())
    }

    /// Returns the node if this view is a single node.
    pub fn as_node(&self) -> Option<&G> {
        match &self.inner {
            ViewType::Node(node) => Some(node),
            ViewType::Fragment(_) => None,
        }
    }

    /// Returns the views of a fragment.
    pub fn as_fragment(&self) -> Option<&[View<G>]> {
        match &self.inner {
            ViewType::Node(_) => None,
            ViewType::Fragment(fragment) => Some(fragment),
        }
    }

    /// Top-level nodes, in order, with nested fragments expanded.
    pub fn flatten(&self) -> Vec<G> {
        match &self.inner {
            ViewType::Node(node) => vec![node.clone()],
            ViewType::Fragment(fragment) => fragment.iter().flat_map(View::flatten).collect(),
        }
    }

    /// Appends every top-level node to `parent`.
    pub fn append_to(&self, parent: &G) {
        for node in self.flatten() {
            parent.append_child(&node);
        }
    }
}

impl<G: GenericNode> From<G> for View<G> {
    fn from(node: G) -> Self {
        Self::new_node(node)
    }
}
