//! Rendering a [`Document`] back to HTML text.

use std::fmt::{self, Write};

use ego_tree::NodeRef;
use ego_tree::iter::Edge;

use super::{Doctype, Document, Element, Node};

/// HTML5 void elements that must not have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are emitted without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

impl Document {
    /// Serialize the reachable tree to an HTML string.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_html(&mut out);
        out
    }

    /// Serialize the reachable tree into `out`.
    pub fn write_html<W: Write>(&self, out: &mut W) -> fmt::Result {
        for edge in self.root().traverse() {
            match edge {
                Edge::Open(node) => open(node, out)?,
                Edge::Close(node) => {
                    if let Node::Element(el) = node.value() {
                        if !VOID_ELEMENTS.contains(&el.name()) {
                            write!(out, "</{}>", el.name())?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn open<W: Write>(node: NodeRef<'_, Node>, out: &mut W) -> fmt::Result {
    match node.value() {
        Node::Document => Ok(()),
        Node::Doctype(doctype) => open_doctype(doctype, out),
        Node::Element(el) => open_tag(el, out),
        Node::Text(text) => {
            if in_raw_text(node) {
                out.write_str(text)
            } else {
                escape(text, false, out)
            }
        }
        Node::Comment(comment) => write!(out, "<!--{comment}-->"),
    }
}

fn open_doctype<W: Write>(doctype: &Doctype, out: &mut W) -> fmt::Result {
    write!(out, "<!DOCTYPE {}", doctype.name)?;
    if !doctype.public_id.is_empty() {
        write!(out, " PUBLIC \"{}\"", doctype.public_id)?;
        if !doctype.system_id.is_empty() {
            write!(out, " \"{}\"", doctype.system_id)?;
        }
    } else if !doctype.system_id.is_empty() {
        write!(out, " SYSTEM \"{}\"", doctype.system_id)?;
    }
    out.write_char('>')
}

fn open_tag<W: Write>(el: &Element, out: &mut W) -> fmt::Result {
    out.write_char('<')?;
    out.write_str(el.name())?;
    for attr in el.attrs() {
        out.write_char(' ')?;
        out.write_str(&attr.name)?;
        out.write_str("=\"")?;
        escape(&attr.value, true, out)?;
        out.write_char('"')?;
    }
    out.write_char('>')
}

fn in_raw_text(node: NodeRef<'_, Node>) -> bool {
    node.parent()
        .and_then(|parent| parent.value().as_element())
        .is_some_and(|el| RAW_TEXT_ELEMENTS.contains(&el.name()))
}

fn escape<W: Write>(text: &str, attr_mode: bool, out: &mut W) -> fmt::Result {
    for c in text.chars() {
        match c {
            '&' => out.write_str("&amp;")?,
            '\u{00A0}' => out.write_str("&nbsp;")?,
            '"' if attr_mode => out.write_str("&quot;")?,
            '<' if !attr_mode => out.write_str("&lt;")?,
            '>' if !attr_mode => out.write_str("&gt;")?,
            c => out.write_char(c)?,
        }
    }
    Ok(())
}
