//! Rendering backend for server side rendering and headless use.
//!
//! An [`SsrNode`] tree lives in memory. It serializes to HTML through [`Display`](fmt::Display)
//! and can fire its event listeners with [`SsrNode::dispatch_event`], which is how views are
//! driven without a browser.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;
use indexmap::IndexMap;
use once_cell::sync::Lazy;

use crate::generic_node::{GenericNode, Html};
use crate::reactive::*;
use crate::view::View;

type Listener = Rc<dyn Fn(())>;

static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    vec![
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ]
    .into_iter()
    .collect()
});

enum SsrNodeType {
    Element {
        tag: String,
        attributes: IndexMap<String, String>,
        children: Vec<SsrNode>,
        listeners: AHashMap<String, Vec<Listener>>,
    },
    Text(String),
}

/// A node of an in-memory tree.
#[derive(Clone)]
pub struct SsrNode(Rc<RefCell<SsrNodeType>>);

impl SsrNode {
    fn new(ty: SsrNodeType) -> Self {
        Self(Rc::new(RefCell::new(ty)))
    }

    /// The tag name, or `None` for a text node.
    pub fn tag(&self) -> Option<String> {
        match &*self.0.borrow() {
            SsrNodeType::Element { tag, .. } => Some(tag.clone()),
            SsrNodeType::Text(_) => None,
        }
    }

    /// The value of an attribute.
    pub fn attribute(&self, name: &str) -> Option<String> {
        match &*self.0.borrow() {
            SsrNodeType::Element { attributes, .. } => attributes.get(name).cloned(),
            SsrNodeType::Text(_) => None,
        }
    }

    /// The child nodes, in order.
    pub fn children(&self) -> Vec<SsrNode> {
        match &*self.0.borrow() {
            SsrNodeType::Element { children, .. } => children.clone(),
            SsrNodeType::Text(_) => Vec::new(),
        }
    }

    /// The concatenated text of this node and all of its descendants.
    pub fn text_content(&self) -> String {
        match &*self.0.borrow() {
            SsrNodeType::Element { children, .. } => {
                children.iter().map(SsrNode::text_content).collect()
            }
            SsrNodeType::Text(text) => text.clone(),
        }
    }

    /// Every descendant element with the given tag, in document order.
    pub fn descendants_by_tag(&self, tag: &str) -> Vec<SsrNode> {
        let mut found = Vec::new();
        self.collect_by_tag(tag, &mut found);
        found
    }

    fn collect_by_tag(&self, tag: &str, found: &mut Vec<SsrNode>) {
        for child in self.children() {
            if child.tag().as_deref() == Some(tag) {
                found.push(child.clone());
            }
            child.collect_by_tag(tag, found);
        }
    }

    /// Calls every listener registered for `name` on this node, in registration order.
    ///
    /// Events do not bubble.
    pub fn dispatch_event(&self, name: &str) {
        // Cloned so that listeners are free to mutate the tree.
        let listeners = match &*self.0.borrow() {
            SsrNodeType::Element { listeners, .. } => {
                listeners.get(name).cloned().unwrap_or_default()
            }
            SsrNodeType::Text(_) => Vec::new(),
        };
        log::trace!("dispatching `{}` to {} listener(s)", name, listeners.len());
        for listener in listeners {
            listener(());
        }
    }

    /// Shorthand for dispatching a `click` event.
    pub fn click(&self) {
        self.dispatch_event("click");
    }

    fn remove_listener(&self, name: &str, listener: &Listener) {
        if let SsrNodeType::Element { listeners, .. } = &mut *self.0.borrow_mut() {
            if let Some(registered) = listeners.get_mut(name) {
                registered.retain(|other| !Rc::ptr_eq(other, listener));
            }
        }
    }
}

impl PartialEq for SsrNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for SsrNode {}

impl fmt::Display for SsrNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0.borrow() {
            SsrNodeType::Element {
                tag,
                attributes,
                children,
                ..
            } => {
                write!(f, "<{}", tag)?;
                for (name, value) in attributes {
                    write!(
                        f,
                        r#" {}="{}""#,
                        name,
                        html_escape::encode_double_quoted_attribute(value)
                    )?;
                }
                f.write_str(">")?;
                if VOID_ELEMENTS.contains(tag.as_str()) {
                    return Ok(());
                }
                for child in children {
                    write!(f, "{}", child)?;
                }
                write!(f, "</{}>", tag)
            }
            SsrNodeType::Text(text) => f.write_str(&html_escape::encode_text(text)),
        }
    }
}

impl fmt::Debug for SsrNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SsrNode({})", self)
    }
}

impl GenericNode for SsrNode {
    type EventType = ();

    fn element(tag: &str) -> Self {
        Self::new(SsrNodeType::Element {
            tag: tag.to_string(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            listeners: AHashMap::new(),
        })
    }

    fn text_node(text: &str) -> Self {
        Self::new(SsrNodeType::Text(text.to_string()))
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let SsrNodeType::Element { attributes, .. } = &mut *self.0.borrow_mut() {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn append_child(&self, child: &Self) {
        if let SsrNodeType::Element { children, .. } = &mut *self.0.borrow_mut() {
            children.push(child.clone());
        }
    }

    fn update_inner_text(&self, text: &str) {
        match &mut *self.0.borrow_mut() {
            SsrNodeType::Element { children, .. } => {
                *children = vec![SsrNode::text_node(text)];
            }
            SsrNodeType::Text(current) => *current = text.to_string(),
        }
    }

    fn event<'a>(&self, ctx: ScopeRef<'a>, name: &str, handler: Box<dyn Fn(()) + 'a>) {
        // SAFETY: the listener is unregistered when `ctx` is disposed, before anything borrowed
        // for 'a is freed.
        let handler: Box<dyn Fn(()) + 'static> = unsafe { std::mem::transmute(handler) };
        let listener: Listener = Rc::from(handler);

        match &mut *self.0.borrow_mut() {
            SsrNodeType::Element { listeners, .. } => listeners
                .entry(name.to_string())
                .or_default()
                .push(listener.clone()),
            SsrNodeType::Text(_) => return,
        }

        let node = self.clone();
        let name = name.to_string();
        ctx.on_cleanup(move || node.remove_listener(&name, &listener));
    }
}

impl Html for SsrNode {
    const IS_BROWSER: bool = false;
}

/// Renders a view to an HTML string.
///
/// The reactive scope is disposed before returning, so effects run exactly once.
pub fn render_to_string(f: impl FnOnce(ScopeRef<'_>) -> View<SsrNode>) -> String {
    let mut html = String::new();
    create_scope_immediate(|ctx| {
        for node in f(ctx).flatten() {
            html.push_str(&node.to_string());
        }
    });
    html
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn escapes_text_and_attributes() {
        let node = SsrNode::element("p");
        node.set_attribute("title", r#"say "hi""#);
        node.append_child(&SsrNode::text_node("<b> & co"));
        assert_eq!(
            node.to_string(),
            r#"<p title="say &quot;hi&quot;">&lt;b&gt; &amp; co</p>"#
        );
        // Only the serialized form is escaped.
        assert_eq!(node.attribute("title").as_deref(), Some(r#"say "hi""#));
        assert_eq!(node.attribute("id"), None);
    }

    #[test]
    fn is_not_a_browser_backend() {
        assert!(!SsrNode::IS_BROWSER);
        assert_eq!(SsrNode::text_node("t").attribute("class"), None);
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node = SsrNode::element("div");
        node.append_child(&SsrNode::element("br"));
        node.append_child(&SsrNode::element("input"));
        assert_eq!(node.to_string(), "<div><br><input></div>");
    }

    #[test]
    fn update_inner_text_replaces_children() {
        let node = SsrNode::element("h3");
        node.append_child(&SsrNode::element("span"));
        node.update_inner_text("plain");
        assert_eq!(node.to_string(), "<h3>plain</h3>");

        let text = SsrNode::text_node("before");
        text.update_inner_text("after");
        assert_eq!(text.text_content(), "after");
    }

    #[test]
    fn queries() {
        let root = SsrNode::element("div");
        let first = SsrNode::element("button");
        let inner = SsrNode::element("div");
        let second = SsrNode::element("button");
        first.append_child(&SsrNode::text_node("one"));
        second.append_child(&SsrNode::text_node("two"));
        inner.append_child(&second);
        root.append_child(&first);
        root.append_child(&inner);

        assert_eq!(root.descendants_by_tag("button"), [first.clone(), second]);
        assert_eq!(root.text_content(), "onetwo");
        assert_eq!(first.tag().as_deref(), Some("button"));
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn listeners_run_until_scope_is_disposed() {
        let clicks = Rc::new(Cell::new(0));
        let button = SsrNode::element("button");

        let counter = clicks.clone();
        let target = button.clone();
        let disposer = create_scope(move |ctx| {
            target.event(ctx, "click", Box::new(move |_: ()| counter.set(counter.get() + 1)));
        });

        button.click();
        button.click();
        button.dispatch_event("focus");
        assert_eq!(clicks.get(), 2);

        disposer.dispose();
        button.click();
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn render_to_string_serializes_fragments() {
        let html = render_to_string(|_| {
            View::new_fragment(vec![
                SsrNode::text_node("a").into(),
                SsrNode::element("hr").into(),
            ])
        });
        assert_eq!(html, "a<hr>");
    }
}
