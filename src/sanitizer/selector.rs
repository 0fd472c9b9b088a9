//! Tag-name selectors over a [`Document`].

use ego_tree::NodeId;

use crate::dom::{Document, Element, Node};

/// Which elements a rule applies to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// Every element, at any depth, including ones the parser synthesized.
    Universal,
    /// Elements whose tag matches one of the names (ASCII case-insensitive).
    Tags(Vec<String>),
}

impl Selector {
    /// Selector matching a single tag name.
    pub fn tag(name: impl Into<String>) -> Self {
        Selector::Tags(vec![name.into()])
    }

    /// Selector matching any of the given tag names.
    pub fn tags<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selector::Tags(names.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, el: &Element) -> bool {
        match self {
            Selector::Universal => true,
            Selector::Tags(names) => names.iter().any(|n| n.eq_ignore_ascii_case(el.name())),
        }
    }

    /// Ids of the matching elements reachable from the root, in pre-order.
    ///
    /// Read-only: two calls against an unmodified document return the same ids.
    pub fn select(&self, doc: &Document) -> Vec<NodeId> {
        doc.root()
            .descendants()
            .filter(|node| match node.value() {
                Node::Element(el) => self.matches(el),
                _ => false,
            })
            .map(|node| node.id())
            .collect()
    }
}
