//! A small VDOM-less view layer.
//!
//! Views are built once from a [`GenericNode`](generic_node::GenericNode) backend. Only the parts
//! that depend on reactive state are wrapped in effects, so updating a signal touches exactly the
//! nodes that read it.
//!
//! Backends:
//! - `dom` (default): [`DomNode`], rendering into a browser document through `web-sys`.
//! - `ssr`: [`SsrNode`], an in-memory tree that serializes to HTML and can dispatch events
//!   without a browser.

pub mod builder;
pub mod component;
mod error;
pub mod generic_node;
pub mod reactive {
    pub use likes_reactive::*;
}
pub mod view;

pub use error::MountError;
#[cfg(feature = "dom")]
pub use generic_node::dom_node::{
    render, render_get_scope, render_to, render_to_id, DomNode, MountedView,
};
#[cfg(feature = "ssr")]
pub use generic_node::ssr_node::{render_to_string, SsrNode};
pub use likes_macro::*;

/// The likes-view prelude.
pub mod prelude {
    pub use crate::builder::{h, ElementBuilder};
    pub use crate::generic_node::{GenericNode, Html};
    pub use crate::reactive::*;
    pub use crate::view::View;
    pub use likes_macro::*;
}
