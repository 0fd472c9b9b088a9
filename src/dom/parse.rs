//! Building a [`Document`] from HTML text with the `scraper` parser.
//!
//! `scraper` (html5ever) performs the HTML5 error recovery: unbalanced tags
//! are closed and missing `<html>`/`<head>`/`<body>` are synthesized.

use scraper::Html;
use scraper::node::Node as ParsedNode;

use super::{Attribute, Charset, Doctype, Document, Element, Node};

impl Document {
    /// Parse a complete HTML document.
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        Self::from_parsed(parsed.tree.root())
    }

    /// Parse an HTML fragment. The synthetic `<html>` wrapper the parser
    /// creates for fragments is not part of the result.
    pub fn parse_fragment(html: &str) -> Self {
        let parsed = Html::parse_fragment(html);
        let root = parsed.root_element();
        Self::from_parsed(*root)
    }

    /// Decode `bytes` (see [`Charset::decode`]) and parse them as a complete
    /// document. The charset is returned so the output can be encoded the
    /// same way.
    pub fn from_bytes(bytes: Vec<u8>) -> (Self, Charset) {
        let (text, charset) = Charset::decode(bytes);
        (Self::parse(&text), charset)
    }

    /// Copy the children of `source` under a fresh document root.
    fn from_parsed(source: ego_tree::NodeRef<'_, ParsedNode>) -> Self {
        let mut doc = Document::new();
        let mut pending = vec![(source, doc.root().id())];

        while let Some((src, parent)) = pending.pop() {
            for child in src.children() {
                // `<template>` contents hang off a fragment node; lift them
                // under the template element itself.
                if let ParsedNode::Fragment = child.value() {
                    pending.push((child, parent));
                    continue;
                }
                let Some(value) = convert(child.value()) else {
                    continue;
                };
                if let Some(id) = doc.append(parent, value) {
                    pending.push((child, id));
                }
            }
        }

        doc
    }
}

fn convert(node: &ParsedNode) -> Option<Node> {
    match node {
        ParsedNode::Doctype(doctype) => Some(Node::Doctype(Doctype {
            name: doctype.name().to_string(),
            public_id: doctype.public_id().to_string(),
            system_id: doctype.system_id().to_string(),
        })),
        ParsedNode::Element(el) => {
            let attrs = el
                .attrs
                .iter()
                .map(|(name, value)| {
                    let value = value.to_string();
                    match &name.prefix {
                        Some(prefix) => {
                            Attribute::new(format!("{prefix}:{}", name.local), value)
                        }
                        None => Attribute::new(name.local.to_string(), value),
                    }
                })
                .collect();
            Some(Node::Element(Element::new(el.name(), attrs)))
        }
        ParsedNode::Text(text) => Some(Node::Text(text.to_string())),
        ParsedNode::Comment(comment) => Some(Node::Comment(comment.to_string())),
        _ => None,
    }
}
