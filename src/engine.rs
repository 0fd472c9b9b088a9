//! The sanitization engine: runs the fixed active-content policy over a
//! document it owns for the duration of the pass.

use crate::config::CleanerBuilder;
use crate::dom::Document;
use crate::sanitizer::{Pipeline, Report};

/// Names of the rules in the default policy, in execution order.
pub mod rules {
    /// Remove `<script>` elements with their contents.
    pub const REMOVE_SCRIPTS: &str = "remove-scripts";
    /// Blank unsafe URLs and strip event handlers on every element.
    pub const NEUTRALIZE_ALL: &str = "neutralize-all";
    /// Remove `src` from `<iframe>` and `<frame>`.
    pub const FRAME_SRC: &str = "frame-src";
    /// Remove `http-equiv` from `<meta>`.
    pub const META_HTTP_EQUIV: &str = "meta-http-equiv";
    /// Remove `background` from `<body>`.
    pub const BODY_BACKGROUND: &str = "body-background";
}

/// Owns a policy [`Pipeline`] and applies it to documents.
///
/// ```
/// use noscript_html::{Cleaner, Document};
///
/// let cleaner = Cleaner::new();
/// let doc = Document::parse(r#"<img src="javascript:alert(1)" onerror="x()"><script>y()</script>"#);
/// let cleaned = cleaner.clean(doc);
/// assert_eq!(cleaned.report().removed_subtrees(), 1);
/// assert!(cleaned.document().to_html().contains(r#"<img src="">"#));
/// ```
#[derive(Clone, Debug)]
pub struct Cleaner {
    pipeline: Pipeline,
}

impl Cleaner {
    /// A cleaner running the default policy.
    pub fn new() -> Self {
        CleanerBuilder::new().build()
    }

    pub fn builder() -> CleanerBuilder {
        CleanerBuilder::new()
    }

    /// A cleaner running an arbitrary pipeline instead of the default policy.
    pub fn from_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Sanitize `document`, taking ownership of it.
    ///
    /// Clone the document beforehand if the unsanitized tree is still needed.
    pub fn clean(&self, document: Document) -> Cleaned {
        Pass::start(&self.pipeline, document).finish()
    }

    /// Parse `html` as a complete document and sanitize it.
    pub fn clean_html(&self, html: &str) -> Cleaned {
        self.clean(Document::parse(html))
    }

    /// Text in, text out: parse, sanitize and serialize `html`.
    pub fn sanitize(&self, html: &str) -> String {
        self.clean_html(html).document().to_html()
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// A pass in progress. Finishing consumes it, so a pass can neither be
/// resumed nor run twice over the same tree.
struct Pass<'p> {
    pipeline: &'p Pipeline,
    document: Document,
    report: Report,
}

impl<'p> Pass<'p> {
    fn start(pipeline: &'p Pipeline, document: Document) -> Self {
        Self {
            pipeline,
            document,
            report: Report::new(),
        }
    }

    fn finish(mut self) -> Cleaned {
        self.pipeline.run(&mut self.document, &mut self.report);
        tracing::debug!(
            "Pass done: {} removed, {} blanked, {} stripped",
            self.report.removed_subtrees(),
            self.report.blanked_values(),
            self.report.stripped_attributes()
        );
        Cleaned {
            document: self.document,
            report: self.report,
        }
    }
}

/// The outcome of a finished pass: the sanitized tree, now read-only, and
/// the diagnostics collected while producing it.
#[derive(Clone, Debug)]
pub struct Cleaned {
    document: Document,
    report: Report,
}

impl Cleaned {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Take back ownership of the tree, e.g. to sanitize it again.
    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn into_parts(self) -> (Document, Report) {
        (self.document, self.report)
    }
}
