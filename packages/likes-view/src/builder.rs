//! The element builder.
//!
//! ```no_run
//! # use likes_view::prelude::*;
//! # likes_view::render(|ctx| {
//! let count = ctx.create_signal(0);
//! h(ctx, "div")
//!     .class("panel")
//!     .c(h(ctx, "p").t("Count: ").dyn_t(move || count.get().to_string()).view())
//!     .c(h(ctx, "button").t("+").on("click", move |_| count.set(*count.get() + 1)).view())
//!     .view()
//! # });
//! ```

use crate::generic_node::GenericNode;
use crate::reactive::*;
use crate::view::View;

/// Builds an element. Create one with [`h`].
pub struct ElementBuilder<'a, G: GenericNode> {
    ctx: ScopeRef<'a>,
    el: G,
}

/// Starts building an element with the given tag.
pub fn h<'a, G: GenericNode>(ctx: ScopeRef<'a>, tag: &str) -> ElementBuilder<'a, G> {
    ElementBuilder {
        ctx,
        el: G::element(tag),
    }
}

impl<'a, G: GenericNode> ElementBuilder<'a, G> {
    /// Sets an attribute.
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.el.set_attribute(name, value);
        self
    }

    /// Sets the `class` attribute.
    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Appends static text.
    pub fn t(self, text: &str) -> Self {
        self.el.append_child(&G::text_node(text));
        self
    }

    /// Appends a text node whose content is recomputed whenever a signal read by `f` changes.
    ///
    /// Only this text node is touched on an update.
    pub fn dyn_t<S: AsRef<str>>(self, mut f: impl FnMut() -> S + 'a) -> Self {
        let node = G::text_node("");
        self.el.append_child(&node);
        self.ctx
            .create_effect(move || node.update_inner_text(f().as_ref()));
        self
    }

    /// Appends a child view.
    pub fn c(self, child: View<G>) -> Self {
        child.append_to(&self.el);
        self
    }

    /// Attaches an event handler for as long as the builder's scope lives.
    pub fn on(self, event: &str, handler: impl Fn(G::EventType) + 'a) -> Self {
        self.el.event(self.ctx, event, Box::new(handler));
        self
    }

    /// The built element.
    pub fn build(self) -> G {
        self.el
    }

    /// The built element, as a [`View`].
    pub fn view(self) -> View<G> {
        View::new_node(self.el)
    }
}
