//! # noscript_html
//!
//! Removes active content from untrusted HTML so the markup can be rendered
//! or stored without running attacker-controlled script.
//!
//! ## Overview
//!
//! A document is parsed into a [`Document`] tree, handed to a [`Cleaner`]
//! which runs an ordered [`Pipeline`] of [`Rule`]s over it, and serialized
//! back to text. The default policy:
//!
//! - removes `<script>` elements and their contents;
//! - blanks `src`/`dynsrc`/`lowsrc` values that are not `http://`,
//!   `https://` or root-relative URLs;
//! - strips `on*` event-handler attributes and `seekSegmentTime`;
//! - strips `src` from frames, `http-equiv` from `<meta>` and `background`
//!   from `<body>`.
//!
//! Every change is recorded in a [`Report`] returned with the sanitized tree.
//!
//! ## Quick start
//!
//! ```
//! let html = r#"<body background="bg.gif"><img src="javascript:alert(1)" onclick="steal()"></body>"#;
//! let clean = noscript_html::sanitize_html(html);
//! assert!(clean.contains(r#"<body><img src=""></body>"#));
//! ```

pub mod batch;
pub mod config;
pub mod dom;
pub mod engine;
pub mod error;
pub mod sanitizer;
pub mod storage;

pub use config::CleanerBuilder;
pub use dom::{Attribute, Charset, Doctype, Document, Element, Node};
pub use engine::{Cleaned, Cleaner};
pub use error::{NoScriptError, Result};
pub use sanitizer::{
    Action, Finding, FindingKind, NameMatching, Pipeline, Report, Rule, Selector, SrcPolicy,
};
pub use storage::{FsStorage, Storage, StdoutStorage};

/// Sanitize `document` with the default policy.
///
/// Takes ownership of the tree and returns it with all active content
/// removed. Use [`Cleaner::clean`] to also get the [`Report`].
pub fn sanitize(document: Document) -> Document {
    Cleaner::new().clean(document).into_document()
}

/// Parse `html` as a complete document, sanitize it with the default policy
/// and serialize the result.
pub fn sanitize_html(html: &str) -> String {
    Cleaner::new().sanitize(html)
}
