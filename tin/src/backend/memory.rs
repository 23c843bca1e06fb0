use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use crate::{
    vdom::{Event, EventHandler},
    Result,
};

use super::Backend;

/// Elements serialized without a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

enum NodeKind {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        listeners: Vec<(String, EventHandler)>,
    },
    Text(String),
}

struct NodeData {
    kind: NodeKind,
    parent: Weak<RefCell<NodeData>>,
    children: Vec<MemNode>,
}

/// A node of an in-memory document.
///
/// Cloning yields another handle to the same node. Equality is identity.
#[derive(Clone)]
pub struct MemNode(Rc<RefCell<NodeData>>);

impl MemNode {
    fn new(kind: NodeKind) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            kind,
            parent: Weak::new(),
            children: Vec::new(),
        })))
    }

    /// Create a detached element, eg. to serve as a render host.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::new(NodeKind::Element {
            tag: tag.into(),
            attributes: Vec::new(),
            listeners: Vec::new(),
        })
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::new(NodeKind::Text(value.into()))
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Text(_))
    }

    pub fn tag(&self) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { tag, .. } => Some(tag.clone()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        match &self.0.borrow().kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attributes(&self) -> Vec<(String, String)> {
        match &self.0.borrow().kind {
            NodeKind::Element { attributes, .. } => attributes.clone(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    pub fn children(&self) -> Vec<MemNode> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<MemNode> {
        self.0.borrow().parent.upgrade().map(MemNode)
    }

    /// Concatenated text of this node and all descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Text(value) => out.push_str(value),
            NodeKind::Element { .. } => {
                for child in &data.children {
                    child.write_text(out);
                }
            }
        }
    }

    pub fn inner_html(&self) -> String {
        let mut out = String::new();
        for child in &self.0.borrow().children {
            child.write_html(&mut out);
        }
        out
    }

    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let data = self.0.borrow();
        match &data.kind {
            NodeKind::Text(value) => escape_into(out, value, false),
            NodeKind::Element {
                tag, attributes, ..
            } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(out, value, true);
                    out.push('"');
                }
                out.push('>');
                if VOID_TAGS.contains(&tag.as_str()) && data.children.is_empty() {
                    return;
                }
                for child in &data.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    /// Number of listeners registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        match &self.0.borrow().kind {
            NodeKind::Element { listeners, .. } => {
                listeners.iter().filter(|(name, _)| name == event).count()
            }
            NodeKind::Text(_) => 0,
        }
    }

    /// The handlers registered for `event`, in registration order.
    pub fn listeners(&self, event: &str) -> Vec<EventHandler> {
        match &self.0.borrow().kind {
            NodeKind::Element { listeners, .. } => listeners
                .iter()
                .filter(|(name, _)| name == event)
                .map(|(_, handler)| handler.clone())
                .collect(),
            NodeKind::Text(_) => Vec::new(),
        }
    }

    /// Fire a synthetic event at this node.
    ///
    /// Runs every handler registered for `event` in order and returns how many
    /// ran. The first failing handler stops dispatch and its error is returned.
    /// Events do not bubble.
    pub fn dispatch(&self, event: &str) -> Result<usize> {
        // Handlers may replace this very node, so no borrow is held while
        // they run.
        let handlers = self.listeners(event);
        let ev = Event::new(event);
        for handler in &handlers {
            handler.call(&ev)?;
        }
        Ok(handlers.len())
    }

    /// Depth-first search, starting with this node.
    pub fn find<F>(&self, pred: F) -> Option<MemNode>
    where
        F: Fn(&MemNode) -> bool + Copy,
    {
        if pred(self) {
            return Some(self.clone());
        }
        self.children().iter().find_map(|child| child.find(pred))
    }

    pub fn find_by_id(&self, id: &str) -> Option<MemNode> {
        self.find(|node| node.attribute("id").as_deref() == Some(id))
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<MemNode> {
        self.find(|node| node.tag().as_deref() == Some(tag))
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.0.borrow_mut().kind {
            if let Some(entry) = attributes.iter_mut().find(|(k, _)| k == name) {
                entry.1 = value.to_string();
            } else {
                attributes.push((name.to_string(), value.to_string()));
            }
        }
    }

    fn add_listener(&self, event: &str, handler: EventHandler) {
        if let NodeKind::Element { listeners, .. } = &mut self.0.borrow_mut().kind {
            listeners.push((event.to_string(), handler));
        }
    }

    /// Remove this node from its parent, if any.
    fn detach(&self) {
        let parent = self.0.borrow().parent.upgrade();
        if let Some(parent) = parent {
            parent
                .borrow_mut()
                .children
                .retain(|child| !child.ptr_eq(self));
        }
        self.0.borrow_mut().parent = Weak::new();
    }

    fn append_child(&self, child: &MemNode) {
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    fn replace_with(&self, new: &MemNode) {
        if self.ptr_eq(new) {
            return;
        }
        let parent = match self.0.borrow().parent.upgrade() {
            Some(p) => p,
            None => return,
        };

        new.detach();
        {
            let mut parent_data = parent.borrow_mut();
            if let Some(slot) = parent_data
                .children
                .iter_mut()
                .find(|child| child.ptr_eq(self))
            {
                *slot = new.clone();
            }
        }
        new.0.borrow_mut().parent = Rc::downgrade(&parent);
        self.0.borrow_mut().parent = Weak::new();
    }

    fn clear_children(&self) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in children {
            child.0.borrow_mut().parent = Weak::new();
        }
    }
}

impl PartialEq for MemNode {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for MemNode {}

impl std::fmt::Debug for MemNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("MemNode").field(&self.outer_html()).finish()
    }
}

fn escape_into(out: &mut String, value: &str, attribute: bool) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

/// Counters of the dom operations performed by a [`MemoryBackend`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub elements_created: usize,
    pub texts_created: usize,
    pub listeners_added: usize,
    pub replacements: usize,
}

/// A [`Backend`] rendering into an in-memory document of [`MemNode`]s.
///
/// Useful for tests and for running components without a browser.
#[derive(Default)]
pub struct MemoryBackend {
    stats: Cell<Stats>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> Stats {
        self.stats.get()
    }

    fn record(&self, f: impl FnOnce(&mut Stats)) {
        let mut stats = self.stats.get();
        f(&mut stats);
        self.stats.set(stats);
    }
}

impl Backend for MemoryBackend {
    type Node = MemNode;

    fn create_element(&self, tag: &str) -> Result<MemNode> {
        self.record(|s| s.elements_created += 1);
        Ok(MemNode::element(tag))
    }

    fn create_text_node(&self, text: &str) -> Result<MemNode> {
        self.record(|s| s.texts_created += 1);
        Ok(MemNode::text(text))
    }

    fn set_attribute(&self, node: &MemNode, name: &str, value: &str) -> Result<()> {
        node.set_attribute(name, value);
        Ok(())
    }

    fn add_event_listener(&self, node: &MemNode, event: &str, handler: EventHandler) -> Result<()> {
        self.record(|s| s.listeners_added += 1);
        node.add_listener(event, handler);
        Ok(())
    }

    fn append_child(&self, parent: &MemNode, child: &MemNode) -> Result<()> {
        parent.append_child(child);
        Ok(())
    }

    fn replace_with(&self, old: &MemNode, new: &MemNode) -> Result<()> {
        self.record(|s| s.replacements += 1);
        old.replace_with(new);
        Ok(())
    }

    fn clear_children(&self, node: &MemNode) -> Result<()> {
        node.clear_children();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::Error;

    #[test]
    fn test_serialize() {
        let backend = MemoryBackend::new();
        let div = backend.create_element("div").unwrap();
        backend.set_attribute(&div, "class", "a \"b\"").unwrap();
        let input = backend.create_element("input").unwrap();
        let text = backend.create_text_node("1 < 2").unwrap();
        backend.append_child(&div, &input).unwrap();
        backend.append_child(&div, &text).unwrap();

        assert_eq!(
            div.outer_html(),
            r#"<div class="a &quot;b&quot;"><input>1 &lt; 2</div>"#
        );
        assert_eq!(div.text_content(), "1 < 2");
        assert_eq!(backend.stats().elements_created, 2);
        assert_eq!(backend.stats().texts_created, 1);
    }

    #[test]
    fn test_replace_keeps_position() {
        let parent = MemNode::element("ul");
        let a = MemNode::element("li");
        let b = MemNode::element("li");
        let c = MemNode::element("p");
        parent.append_child(&a);
        parent.append_child(&b);

        a.replace_with(&c);

        let children = parent.children();
        assert_eq!(children.len(), 2);
        assert!(children[0].ptr_eq(&c));
        assert!(children[1].ptr_eq(&b));
        assert!(a.parent().is_none());
        assert_eq!(c.parent(), Some(parent));
    }

    #[test]
    fn test_replace_detached_is_noop() {
        let a = MemNode::element("div");
        let b = MemNode::element("div");
        a.replace_with(&b);
        assert!(b.parent().is_none());
    }

    #[test]
    fn test_append_moves_node() {
        let first = MemNode::element("div");
        let second = MemNode::element("div");
        let child = MemNode::text("x");

        first.append_child(&child);
        second.append_child(&child);

        assert!(first.children().is_empty());
        assert_eq!(second.children(), vec![child]);
    }

    #[test]
    fn test_dispatch_runs_handlers_in_order() {
        let node = MemNode::element("button");
        let calls = Rc::new(Cell::new(0));

        let c1 = calls.clone();
        node.add_listener(
            "click",
            EventHandler::new(move |ev| {
                assert_eq!(ev.name(), "click");
                c1.set(c1.get() * 10 + 1);
                Ok(())
            }),
        );
        let c2 = calls.clone();
        node.add_listener(
            "click",
            EventHandler::new(move |_| {
                c2.set(c2.get() * 10 + 2);
                Ok(())
            }),
        );

        assert_eq!(node.dispatch("click").unwrap(), 2);
        assert_eq!(calls.get(), 12);
        assert_eq!(node.dispatch("input").unwrap(), 0);
    }

    #[test]
    fn test_dispatch_propagates_errors() {
        let node = MemNode::element("button");
        node.add_listener(
            "click",
            EventHandler::new(|_| Err(Error::NoActiveComponent)),
        );
        assert!(matches!(
            node.dispatch("click"),
            Err(Error::NoActiveComponent)
        ));
    }
}
