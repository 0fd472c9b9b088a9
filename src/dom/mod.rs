//! In-memory document model the sanitizer operates on.
//!
//! A [`Document`] owns an [`ego_tree::Tree`] of [`Node`]s. Elements keep their
//! attributes as an ordered `Vec`, so insertion order and duplicate keys from
//! malformed markup survive until a rule removes them.
//!
//! Documents are built from text by the [`scraper`] parser (see
//! [`Document::parse`]) and rendered back with [`Document::to_html`].

mod charset;
mod parse;
mod serialize;

pub use charset::Charset;

use ego_tree::iter::Edge;
use ego_tree::{NodeId, NodeRef, Tree};

/// A single node of the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// The tree root.
    Document,
    Doctype(Doctype),
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    /// Returns the element payload, if this node is an element.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// A `<!DOCTYPE>` declaration with its optional public and system identifiers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Doctype {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

impl Doctype {
    /// A doctype without identifiers, like `<!DOCTYPE html>`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// An attribute as produced by the parser. Namespaced attributes keep their
/// prefix in `name` (`xlink:href`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element: a tag name plus its attributes in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<Attribute>,
}

impl Element {
    pub fn new(name: impl Into<String>, attrs: Vec<Attribute>) -> Self {
        Self {
            name: name.into(),
            attrs,
        }
    }

    /// The tag name as produced by the parser (lowercase for HTML elements).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Value of the first attribute called `name`, if any.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub(crate) fn attrs_mut(&mut self) -> &mut Vec<Attribute> {
        &mut self.attrs
    }
}

/// A parsed HTML document.
///
/// The document exclusively owns its tree. Sanitizing consumes the document
/// (see [`Cleaner::clean`](crate::Cleaner::clean)); clone it first if the
/// unsanitized tree is still needed.
#[derive(Clone, Debug)]
pub struct Document {
    tree: Tree<Node>,
}

impl Document {
    /// Create a document containing only the root node.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(Node::Document),
        }
    }

    /// The root node. Detached subtrees are never reachable from here.
    pub fn root(&self) -> NodeRef<'_, Node> {
        self.tree.root()
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_, Node>> {
        self.tree.get(id)
    }

    /// All reachable elements in document (pre-order) order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> + '_ {
        self.root()
            .descendants()
            .filter_map(|node| node.value().as_element())
    }

    /// All reachable elements with the given tag name, in document order.
    pub fn elements_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements()
            .filter(move |el| el.name().eq_ignore_ascii_case(tag))
    }

    /// Concatenated text of every reachable text node.
    pub fn text(&self) -> String {
        self.root()
            .descendants()
            .filter_map(|node| match node.value() {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if `id` is still reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let root = self.tree.root().id();
        self.tree.get(id).is_some_and(|node| {
            node.id() == root || node.ancestors().last().is_some_and(|top| top.id() == root)
        })
    }

    /// Append a node under `parent`, returning the new node's id.
    ///
    /// Used while building a document; the sanitizer never adds nodes.
    pub fn append(&mut self, parent: NodeId, value: Node) -> Option<NodeId> {
        let mut parent = self.tree.get_mut(parent)?;
        Some(parent.append(value).id())
    }

    /// Run `f` against the element stored at `id`.
    ///
    /// Returns `None` if `id` does not refer to an element.
    pub(crate) fn with_element_mut<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut Element) -> R,
    ) -> Option<R> {
        let mut node = self.tree.get_mut(id)?;
        match node.value() {
            Node::Element(el) => Some(f(el)),
            _ => None,
        }
    }

    /// Detach `id` and its subtree from the document.
    ///
    /// Returns `false` without touching the tree if the node is already
    /// unreachable, e.g. because an ancestor was detached first.
    pub(crate) fn detach(&mut self, id: NodeId) -> bool {
        if id == self.tree.root().id() || !self.is_attached(id) {
            return false;
        }
        match self.tree.get_mut(id) {
            Some(mut node) => {
                node.detach();
                true
            }
            None => false,
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Structural equality over the reachable tree; detached nodes are ignored.
impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        let mut left = self.root().traverse();
        let mut right = other.root().traverse();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(Edge::Open(a)), Some(Edge::Open(b))) if a.value() == b.value() => {}
                (Some(Edge::Close(_)), Some(Edge::Close(_))) => {}
                _ => return false,
            }
        }
    }
}

impl Eq for Document {}
