//! Builder for configuring the sanitization policy.

use crate::engine::{Cleaner, rules};
use crate::sanitizer::{Action, NameMatching, Pipeline, Rule, Selector, SrcPolicy};

/// Builder for configuring a [`Cleaner`].
///
/// Starts from the default policy:
///
/// 1. remove `<script>` subtrees;
/// 2. on every element, blank unsafe `src`/`dynsrc`/`lowsrc` values, strip
///    `on*` event handlers and strip `seekSegmentTime`;
/// 3. strip `src` from `<iframe>` and `<frame>`;
/// 4. strip `http-equiv` from `<meta>`;
/// 5. strip `background` from `<body>`.
///
/// # Example
///
/// ```
/// use noscript_html::{Action, CleanerBuilder, NameMatching, Rule, Selector};
///
/// let cleaner = CleanerBuilder::new()
///     .name_matching(NameMatching::AsciiCaseInsensitive)
///     .strip_attribute("formaction")
///     .add_rule(Rule::new("drop-object", Selector::tag("object"), vec![Action::RemoveSubtree]))
///     .build();
/// assert_eq!(cleaner.pipeline().rules().len(), 6);
/// ```
#[derive(Clone, Debug)]
pub struct CleanerBuilder {
    matching: NameMatching,
    src_policy: SrcPolicy,
    extra_stripped: Vec<String>,
    extra_rules: Vec<Rule>,
}

impl CleanerBuilder {
    /// Create a builder with the default policy parameters.
    ///
    /// Defaults: exact attribute-name matching, `src`/`dynsrc`/`lowsrc`
    /// checked against `https://`, `http://` and `/`.
    pub fn new() -> Self {
        Self {
            matching: NameMatching::Exact,
            src_policy: SrcPolicy::default(),
            extra_stripped: Vec::new(),
            extra_rules: Vec::new(),
        }
    }

    /// How attribute names in the policy are compared with parsed names.
    pub fn name_matching(mut self, matching: NameMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Replace the list of URL prefixes a `src`-like value may start with.
    pub fn safe_src_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.src_policy = SrcPolicy::new(self.src_policy.attributes().to_vec(), prefixes);
        self
    }

    /// Replace the list of attributes checked by the URL policy.
    pub fn src_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.src_policy = SrcPolicy::new(attributes, self.src_policy.safe_prefixes().to_vec());
        self
    }

    /// Strip an additional attribute from every element, after the default
    /// ones.
    pub fn strip_attribute(mut self, name: impl Into<String>) -> Self {
        self.extra_stripped.push(name.into());
        self
    }

    /// Append a rule that runs after the default policy.
    pub fn add_rule(mut self, rule: Rule) -> Self {
        self.extra_rules.push(rule);
        self
    }

    /// Assemble the pipeline and return the [`Cleaner`].
    pub fn build(self) -> Cleaner {
        let mut pipeline = Pipeline::new().with_matching(self.matching);

        pipeline.add(Rule::new(
            rules::REMOVE_SCRIPTS,
            Selector::tag("script"),
            vec![Action::RemoveSubtree],
        ));

        let mut neutralize = vec![
            Action::BlankUnsafeSrc(self.src_policy),
            Action::strip_prefix("on"),
        ];
        neutralize.extend(Action::strip_attributes(
            std::iter::once("seekSegmentTime".to_string()).chain(self.extra_stripped),
        ));
        pipeline.add(Rule::new(rules::NEUTRALIZE_ALL, Selector::Universal, neutralize));

        pipeline.add(Rule::new(
            rules::FRAME_SRC,
            Selector::tags(["iframe", "frame"]),
            vec![Action::strip_attribute("src")],
        ));
        pipeline.add(Rule::new(
            rules::META_HTTP_EQUIV,
            Selector::tag("meta"),
            vec![Action::strip_attribute("http-equiv")],
        ));
        pipeline.add(Rule::new(
            rules::BODY_BACKGROUND,
            Selector::tag("body"),
            vec![Action::strip_attribute("background")],
        ));

        for rule in self.extra_rules {
            pipeline.add(rule);
        }

        Cleaner::from_pipeline(pipeline)
    }
}

impl Default for CleanerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_builder_has_five_rules() {
        let cleaner = CleanerBuilder::new().build();
        assert_eq!(cleaner.pipeline().rules().len(), 5);
        assert_eq!(cleaner.pipeline().matching(), NameMatching::Exact);
    }

    #[test]
    fn extra_stripped_attributes_follow_the_defaults() {
        let cleaner = CleanerBuilder::new().strip_attribute("formaction").build();
        let actions = cleaner.pipeline().rules()[1].actions();
        assert_eq!(actions.len(), 4);
        assert_eq!(actions[3], Action::strip_attribute("formaction"));

        let out = cleaner.sanitize(r#"<button formaction="javascript:x()">go</button>"#);
        assert!(!out.contains("formaction"));
    }

    #[test]
    fn safe_prefixes_can_be_narrowed() {
        let cleaner = CleanerBuilder::new().safe_src_prefixes(["https://"]).build();
        let out = cleaner.sanitize(r#"<img src="http://plain.example/a.png">"#);
        assert!(out.contains(r#"<img src="">"#));
    }

    #[test]
    fn src_attributes_can_be_extended() {
        let cleaner = CleanerBuilder::new()
            .src_attributes(["src", "dynsrc", "lowsrc", "poster"])
            .build();
        let out = cleaner.sanitize(r#"<video poster="javascript:x()"></video>"#);
        assert!(out.contains(r#"<video poster="">"#));
    }

    #[test]
    fn extra_rules_run_last() {
        let cleaner = CleanerBuilder::new()
            .add_rule(Rule::new(
                "drop-object",
                Selector::tag("object"),
                vec![Action::RemoveSubtree],
            ))
            .build();
        let rules = cleaner.pipeline().rules();
        assert_eq!(rules.last().map(Rule::name), Some("drop-object"));
        let out = cleaner.sanitize(r#"<object data="x.swf"></object><p>kept</p>"#);
        assert!(!out.contains("<object"));
        assert!(out.contains("<p>kept</p>"));
    }
}
