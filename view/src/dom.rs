//! Arena-backed element tree standing in for a browser document.
//!
//! # Design
//! Elements live in a `Vec` and are addressed by `NodeId`, so handles stay
//! `Copy` and the tree can be mutated through a single `&mut Document`.
//! Removing a node only detaches it; its id remains valid and the subtree can
//! be re-attached. Every element holds its own text plus ordered children,
//! and the listener payload `L` is chosen by whoever drives the document.

use std::fmt::{self, Write};

use crate::error::ViewError;

/// Handle to an element inside one `Document`.
///
/// Ids are only meaningful for the document that created them; using one
/// with another document panics or addresses an unrelated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Debug)]
struct Element<L> {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    listeners: Vec<L>,
}

impl<L> Element<L> {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
            listeners: Vec::new(),
        }
    }
}

/// An element tree rooted at a `body` element.
#[derive(Debug)]
pub struct Document<L> {
    nodes: Vec<Element<L>>,
    root: NodeId,
}

impl<L> Default for Document<L> {
    fn default() -> Self {
        Self::with_body()
    }
}

impl<L> Document<L> {
    /// Create a document holding only its `body` root.
    pub fn with_body() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Element::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
    }

    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].id.as_deref()
    }

    /// Find the first connected element carrying `id`.
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if self.nodes[node.0].id.as_deref() == Some(id) {
                return Some(node);
            }
            stack.extend(self.nodes[node.0].children.iter().rev());
        }
        None
    }

    /// Add classes, skipping any the element already has.
    pub fn add_classes(&mut self, node: NodeId, classes: &[&str]) {
        let list = &mut self.nodes[node.0].classes;
        for class in classes {
            if !list.iter().any(|c| c == class) {
                list.push((*class).to_string());
            }
        }
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.nodes[node.0].classes
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    /// Replace the element's contents with `text`, detaching any children.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        self.nodes[node.0].text = text.to_string();
    }

    /// The element's own text followed by that of its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let element = &self.nodes[node.0];
        out.push_str(&element.text);
        for child in &element.children {
            self.collect_text(*child, out);
        }
    }

    /// Append `child` as the last child of `parent`, moving it out of any
    /// previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), ViewError> {
        if self.is_inclusive_ancestor(child, parent) {
            return Err(ViewError::HierarchyRequest { parent, child });
        }
        self.remove(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    /// Detach `node` from its parent. No-op for detached nodes.
    pub fn remove(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Whether `node` is reachable from the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root, node)
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.nodes[n.0].parent;
        }
        false
    }

    pub fn add_event_listener(&mut self, node: NodeId, listener: L) {
        self.nodes[node.0].listeners.push(listener);
    }

    pub fn listeners(&self, node: NodeId) -> &[L] {
        &self.nodes[node.0].listeners
    }

    /// Serialize `node` and its subtree as HTML.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let element = &self.nodes[node.0];
        out.push('<');
        out.push_str(&element.tag);
        if let Some(id) = &element.id {
            let _ = write!(out, " id=\"{}\"", escape(id));
        }
        if !element.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape(&element.classes.join(" ")));
        }
        out.push('>');
        out.push_str(&escape(&element.text));
        for child in &element.children {
            self.write_html(*child, out);
        }
        let _ = write!(out, "</{}>", element.tag);
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
