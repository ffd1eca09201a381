//! Arena backed document for running the manager without a browser.
//!
//! Nodes are never freed, a removed node keeps its data (listeners included)
//! and can still be inspected, it just has no parent anymore. Memory grows
//! with every element created, which is fine for tests and short preview
//! runs but not for a long lived session.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use model::TrustedMarkup;

use crate::dom::{Dom, DomError, Listener};

/// Height reported for every element carrying text or markup
pub const LINE_HEIGHT: i32 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const BODY: NodeId = NodeId(0);

#[derive(Default)]
enum Content {
    #[default]
    Empty,
    Text(String),
    Markup(TrustedMarkup),
}

#[derive(Default)]
struct Element {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    content: Content,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    listeners: Vec<Listener<NodeId>>,
}

struct Arena {
    nodes: Vec<Element>,
    loading: bool,
    ready: Vec<Box<dyn FnOnce()>>,
}

/// In-memory document. Clones share the same tree.
///
/// Node ids are only meaningful for the document that created them, passing
/// a foreign id panics.
#[derive(Clone)]
pub struct MemoryDom {
    arena: Rc<RefCell<Arena>>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

fn valid_tag(tag: &str) -> bool {
    let mut chars = tag.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric() || c == '-'),
        _ => false,
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

impl MemoryDom {
    /// A fully loaded document with an empty body
    pub fn new() -> Self {
        Self::with_state(false)
    }

    /// A document that is still loading, see [`MemoryDom::finish_loading`]
    pub fn loading() -> Self {
        Self::with_state(true)
    }

    fn with_state(loading: bool) -> Self {
        let body = Element {
            tag: "body".to_string(),
            ..Default::default()
        };

        Self {
            arena: Rc::new(RefCell::new(Arena {
                nodes: vec![body],
                loading,
                ready: Vec::new(),
            })),
        }
    }

    /// Mark the document loaded and fire the ready callbacks in registration order
    pub fn finish_loading(&self) {
        let ready = {
            let mut arena = self.arena.borrow_mut();
            arena.loading = false;
            std::mem::take(&mut arena.ready)
        };

        for f in ready {
            f();
        }
    }

    /// Simulate a click, running every listener on `node`
    pub fn click(&self, node: NodeId) {
        let listeners = self.arena.borrow().nodes[node.0].listeners.clone();
        for listener in listeners {
            listener(&node);
        }
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.arena.borrow().nodes[node.0].tag.clone()
    }

    pub fn element_id(&self, node: NodeId) -> Option<String> {
        self.arena.borrow().nodes[node.0].id.clone()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.arena.borrow().nodes[node.0].classes.clone()
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.arena.borrow().nodes[node.0].attributes.get(name).cloned()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.arena.borrow().nodes[node.0].style.get(property).cloned()
    }

    /// Markup set through `set_inner_html`, if any
    pub fn inner_html(&self, node: NodeId) -> Option<String> {
        match &self.arena.borrow().nodes[node.0].content {
            Content::Markup(m) => Some(m.as_str().to_string()),
            _ => None,
        }
    }

    pub fn listener_count(&self, node: NodeId) -> usize {
        self.arena.borrow().nodes[node.0].listeners.len()
    }

    /// Concatenated text of `node` and its descendants, markup excluded
    pub fn text_content(&self, node: NodeId) -> String {
        let arena = self.arena.borrow();
        let mut out = String::new();
        Self::collect_text(&arena, node, &mut out);
        out
    }

    fn collect_text(arena: &Arena, node: NodeId, out: &mut String) {
        let elem = &arena.nodes[node.0];
        if let Content::Text(t) = &elem.content {
            out.push_str(t);
        }
        for child in &elem.children {
            Self::collect_text(arena, *child, out);
        }
    }

    /// Descendants of `root` carrying `class`, in document order
    pub fn find_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        let arena = self.arena.borrow();
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = arena.nodes[root.0].children.iter().rev().copied().collect();

        while let Some(node) = stack.pop() {
            let elem = &arena.nodes[node.0];
            if elem.classes.iter().any(|c| c == class) {
                found.push(node);
            }
            stack.extend(elem.children.iter().rev().copied());
        }

        found
    }

    /// Serialize `node` and its subtree. Text is escaped, trusted markup is not.
    pub fn to_html(&self, node: NodeId) -> String {
        let arena = self.arena.borrow();
        let mut out = String::new();
        Self::write_html(&arena, node, &mut out);
        out
    }

    fn write_html(arena: &Arena, node: NodeId, out: &mut String) {
        let elem = &arena.nodes[node.0];

        out.push('<');
        out.push_str(&elem.tag);
        if let Some(id) = &elem.id {
            out.push_str(&format!(" id=\"{}\"", escape(id)));
        }
        if !elem.classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", escape(&elem.classes.join(" "))));
        }
        if !elem.style.is_empty() {
            let style: String = elem.style.iter()
                .map(|(k, v)| format!("{}: {};", k, v))
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&format!(" style=\"{}\"", escape(&style)));
        }
        for (name, value) in &elem.attributes {
            out.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        out.push('>');

        match &elem.content {
            Content::Empty => (),
            Content::Text(t) => out.push_str(&escape(t)),
            Content::Markup(m) => out.push_str(m.as_str()),
        }
        for child in &elem.children {
            Self::write_html(arena, *child, out);
        }

        out.push_str(&format!("</{}>", elem.tag));
    }

    fn detach(arena: &mut Arena, node: NodeId) {
        if let Some(parent) = arena.nodes[node.0].parent.take() {
            arena.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    fn height(arena: &Arena, node: NodeId) -> i32 {
        let elem = &arena.nodes[node.0];
        let own = match elem.content {
            Content::Empty => 0,
            _ => LINE_HEIGHT,
        };
        own + elem.children.iter().map(|c| Self::height(arena, *c)).sum::<i32>()
    }

    fn connected(arena: &Arena, mut node: NodeId) -> bool {
        loop {
            if node == BODY {
                return true;
            }
            match arena.nodes[node.0].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    // Replacing content drops the children, like assigning innerText/innerHTML
    fn replace_content(&self, node: NodeId, content: Content) {
        let mut arena = self.arena.borrow_mut();
        let children = std::mem::take(&mut arena.nodes[node.0].children);
        for child in children {
            arena.nodes[child.0].parent = None;
        }
        arena.nodes[node.0].content = content;
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn is_loading(&self) -> bool {
        self.arena.borrow().loading
    }

    fn when_ready(&self, f: Box<dyn FnOnce()>) -> Result<(), DomError> {
        self.arena.borrow_mut().ready.push(f);
        Ok(())
    }

    fn body(&self) -> Option<NodeId> {
        Some(BODY)
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        if !valid_tag(tag) {
            return Err(DomError::InvalidTagName(tag.to_string()));
        }

        let mut arena = self.arena.borrow_mut();
        arena.nodes.push(Element {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        });

        Ok(NodeId(arena.nodes.len() - 1))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        let mut arena = self.arena.borrow_mut();

        // child may not be parent itself or one of its ancestors
        let mut cursor = Some(*parent);
        while let Some(node) = cursor {
            if node == *child {
                return Err(DomError::Hierarchy);
            }
            cursor = arena.nodes[node.0].parent;
        }

        Self::detach(&mut arena, *child);
        arena.nodes[child.0].parent = Some(*parent);
        arena.nodes[parent.0].children.push(*child);

        Ok(())
    }

    fn remove(&self, node: &NodeId) {
        Self::detach(&mut self.arena.borrow_mut(), *node);
    }

    fn is_connected(&self, node: &NodeId) -> bool {
        Self::connected(&self.arena.borrow(), *node)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        self.arena.borrow().nodes[node.0].parent
    }

    fn last_child(&self, parent: &NodeId) -> Option<NodeId> {
        self.arena.borrow().nodes[parent.0].children.last().copied()
    }

    fn children(&self, parent: &NodeId) -> Vec<NodeId> {
        self.arena.borrow().nodes[parent.0].children.clone()
    }

    fn add_class(&self, node: &NodeId, class: &str) -> Result<(), DomError> {
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(DomError::InvalidToken(class.to_string()));
        }

        let mut arena = self.arena.borrow_mut();
        let classes = &mut arena.nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }

        Ok(())
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.arena.borrow().nodes[node.0].classes.iter().any(|c| c == class)
    }

    fn set_id(&self, node: &NodeId, id: &str) {
        self.arena.borrow_mut().nodes[node.0].id = Some(id.to_string());
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.replace_content(*node, Content::Text(text.to_string()));
    }

    fn set_inner_html(&self, node: &NodeId, markup: &TrustedMarkup) {
        self.replace_content(*node, Content::Markup(markup.clone()));
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        if !valid_tag(name) {
            return Err(DomError::Host(format!("invalid attribute name {:?}", name)));
        }
        self.arena.borrow_mut().nodes[node.0].attributes.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) -> Result<(), DomError> {
        self.arena.borrow_mut().nodes[node.0].style.insert(property.to_string(), value.to_string());
        Ok(())
    }

    fn offset_height(&self, node: &NodeId) -> i32 {
        let arena = self.arena.borrow();
        if !Self::connected(&arena, *node) {
            return 0;
        }
        Self::height(&arena, *node)
    }

    fn on_click(&self, node: &NodeId, listener: Listener<NodeId>) {
        self.arena.borrow_mut().nodes[node.0].listeners.push(listener);
    }
}

impl fmt::Debug for MemoryDom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "MemoryDom({})", self.to_html(BODY))
    }
}
