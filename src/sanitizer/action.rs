//! The mutations a rule can apply to its matched elements.

use ego_tree::NodeId;

use super::report::{FindingKind, Report};
use crate::dom::{Attribute, Document};

/// How attribute names in a rule are compared with the parsed names.
///
/// The parser lowercases HTML attribute names, so `Exact` and
/// `AsciiCaseInsensitive` only differ for documents built by hand or for
/// rules written with uppercase letters (such as `seekSegmentTime`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NameMatching {
    /// Byte-for-byte comparison.
    #[default]
    Exact,
    /// ASCII case-insensitive comparison, as HTML attribute names are defined.
    AsciiCaseInsensitive,
}

impl NameMatching {
    pub fn matches(self, name: &str, wanted: &str) -> bool {
        match self {
            NameMatching::Exact => name == wanted,
            NameMatching::AsciiCaseInsensitive => name.eq_ignore_ascii_case(wanted),
        }
    }

    pub fn matches_prefix(self, name: &str, prefix: &str) -> bool {
        match self {
            NameMatching::Exact => name.starts_with(prefix),
            NameMatching::AsciiCaseInsensitive => name
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix)),
        }
    }
}

/// Which attributes carry resource URLs and which values are allowed to stay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SrcPolicy {
    attributes: Vec<String>,
    safe_prefixes: Vec<String>,
}

impl SrcPolicy {
    pub fn new<A, P>(attributes: A, safe_prefixes: P) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            attributes: attributes.into_iter().map(Into::into).collect(),
            safe_prefixes: safe_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn safe_prefixes(&self) -> &[String] {
        &self.safe_prefixes
    }

    /// A value is safe when it starts with one of the allowed prefixes.
    pub fn is_safe(&self, value: &str) -> bool {
        self.safe_prefixes.iter().any(|p| value.starts_with(p.as_str()))
    }

    fn covers(&self, name: &str, matching: NameMatching) -> bool {
        self.attributes.iter().any(|a| matching.matches(name, a))
    }
}

impl Default for SrcPolicy {
    /// `src`, `dynsrc` and `lowsrc`; only absolute `http(s)://` URLs and
    /// root-relative paths are kept.
    fn default() -> Self {
        Self::new(["src", "dynsrc", "lowsrc"], ["https://", "http://", "/"])
    }
}

/// A mutation applied to every element a rule matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Detach the element and everything beneath it.
    RemoveSubtree,
    /// Remove every attribute with this name.
    StripAttribute(String),
    /// Remove every attribute whose name starts with this prefix.
    StripAttributesByPrefix(String),
    /// Erase the value of URL attributes that fail the [`SrcPolicy`].
    BlankUnsafeSrc(SrcPolicy),
}

impl Action {
    pub fn strip_attribute(name: impl Into<String>) -> Self {
        Action::StripAttribute(name.into())
    }

    pub fn strip_prefix(prefix: impl Into<String>) -> Self {
        Action::StripAttributesByPrefix(prefix.into())
    }

    /// One `StripAttribute` per name.
    pub fn strip_attributes<I, S>(names: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        names.into_iter().map(Self::strip_attribute).collect()
    }

    pub(crate) fn apply(
        &self,
        doc: &mut Document,
        ids: &[NodeId],
        matching: NameMatching,
        rule: &str,
        report: &mut Report,
    ) {
        match self {
            Action::RemoveSubtree => {
                for &id in ids {
                    let Some(tag) = tag_of(doc, id) else { continue };
                    if doc.detach(id) {
                        report.record(rule, &tag, FindingKind::RemovedSubtree);
                    }
                }
            }
            Action::StripAttribute(name) => {
                strip_where(doc, ids, rule, report, |attr| matching.matches(&attr.name, name));
            }
            Action::StripAttributesByPrefix(prefix) => {
                strip_where(doc, ids, rule, report, |attr| {
                    matching.matches_prefix(&attr.name, prefix)
                });
            }
            Action::BlankUnsafeSrc(policy) => {
                for &id in ids {
                    let Some((tag, blanked)) = doc.with_element_mut(id, |el| {
                        let tag = el.name().to_string();
                        let mut blanked = Vec::new();
                        for attr in el.attrs_mut().iter_mut() {
                            if policy.covers(&attr.name, matching) && !policy.is_safe(&attr.value)
                            {
                                let value = std::mem::take(&mut attr.value);
                                if !value.is_empty() {
                                    blanked.push((attr.name.clone(), value));
                                }
                            }
                        }
                        (tag, blanked)
                    }) else {
                        continue;
                    };
                    for (attr, value) in blanked {
                        report.record(rule, &tag, FindingKind::BlankedValue { attr, value });
                    }
                }
            }
        }
    }
}

fn tag_of(doc: &Document, id: NodeId) -> Option<String> {
    doc.get(id)
        .and_then(|node| node.value().as_element().map(|el| el.name().to_string()))
}

/// Remove the attributes selected by `pred`, keeping the order of the rest.
fn strip_where(
    doc: &mut Document,
    ids: &[NodeId],
    rule: &str,
    report: &mut Report,
    pred: impl Fn(&Attribute) -> bool,
) {
    for &id in ids {
        let Some((tag, stripped)) = doc.with_element_mut(id, |el| {
            let tag = el.name().to_string();
            let mut stripped = Vec::new();
            el.attrs_mut().retain(|attr| {
                if pred(attr) {
                    stripped.push(attr.name.clone());
                    false
                } else {
                    true
                }
            });
            (tag, stripped)
        }) else {
            continue;
        };
        if !stripped.is_empty() {
            tracing::trace!("{rule}: stripped {stripped:?} from <{tag}>");
        }
        for attr in stripped {
            report.record(rule, &tag, FindingKind::StrippedAttribute { attr });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, Node};

    fn doc_with(attrs: Vec<Attribute>) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root().id();
        let id = doc
            .append(root, Node::Element(Element::new("img", attrs)))
            .unwrap();
        (doc, id)
    }

    fn attrs_of(doc: &Document) -> Vec<(String, String)> {
        doc.elements()
            .next()
            .unwrap()
            .attrs()
            .iter()
            .map(|a| (a.name.clone(), a.value.clone()))
            .collect()
    }

    fn run(action: Action, doc: &mut Document, id: NodeId, matching: NameMatching) -> Report {
        let mut report = Report::new();
        action.apply(doc, &[id], matching, "test", &mut report);
        report
    }

    #[test]
    fn strip_attribute_removes_all_duplicates() {
        let (mut doc, id) = doc_with(vec![
            Attribute::new("src", "a"),
            Attribute::new("alt", "x"),
            Attribute::new("src", "b"),
        ]);
        let report = run(Action::strip_attribute("src"), &mut doc, id, NameMatching::Exact);
        assert_eq!(attrs_of(&doc), [("alt".to_string(), "x".to_string())]);
        assert_eq!(report.stripped_attributes(), 2);
    }

    #[test]
    fn strip_missing_attribute_is_a_no_op() {
        let (mut doc, id) = doc_with(vec![Attribute::new("alt", "x")]);
        let report = run(Action::strip_attribute("src"), &mut doc, id, NameMatching::Exact);
        assert_eq!(attrs_of(&doc).len(), 1);
        assert!(report.is_empty());
    }

    #[test]
    fn strip_prefix_preserves_survivor_order() {
        let (mut doc, id) = doc_with(vec![
            Attribute::new("a", "1"),
            Attribute::new("onclick", "x()"),
            Attribute::new("b", "2"),
            Attribute::new("onload", "y()"),
            Attribute::new("c", "3"),
        ]);
        run(Action::strip_prefix("on"), &mut doc, id, NameMatching::Exact);
        let names: Vec<String> = attrs_of(&doc).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn exact_matching_is_case_sensitive() {
        let (mut doc, id) = doc_with(vec![Attribute::new("ONCLICK", "x()")]);
        run(Action::strip_prefix("on"), &mut doc, id, NameMatching::Exact);
        assert_eq!(attrs_of(&doc).len(), 1);
    }

    #[test]
    fn case_insensitive_matching_strips_uppercase_names() {
        let (mut doc, id) = doc_with(vec![
            Attribute::new("ONCLICK", "x()"),
            Attribute::new("SeekSegmentTime", "1"),
        ]);
        run(
            Action::strip_prefix("on"),
            &mut doc,
            id,
            NameMatching::AsciiCaseInsensitive,
        );
        run(
            Action::strip_attribute("seekSegmentTime"),
            &mut doc,
            id,
            NameMatching::AsciiCaseInsensitive,
        );
        assert!(attrs_of(&doc).is_empty());
    }

    #[test]
    fn blank_unsafe_src_keeps_attribute_and_order() {
        let (mut doc, id) = doc_with(vec![
            Attribute::new("lowsrc", "data:image/png;base64,AAAA"),
            Attribute::new("alt", "x"),
            Attribute::new("src", "javascript:alert(1)"),
            Attribute::new("dynsrc", "movie.avi"),
        ]);
        let report = run(
            Action::BlankUnsafeSrc(SrcPolicy::default()),
            &mut doc,
            id,
            NameMatching::Exact,
        );
        let expected = [("lowsrc", ""), ("alt", "x"), ("src", ""), ("dynsrc", "")];
        let actual = attrs_of(&doc);
        assert_eq!(actual.len(), expected.len());
        for ((name, value), (want_name, want_value)) in actual.iter().zip(expected) {
            assert_eq!(name, want_name);
            assert_eq!(value, want_value);
        }
        assert_eq!(report.blanked_values(), 3);
    }

    #[test]
    fn blank_unsafe_src_leaves_safe_values() {
        let safe = [
            "https://good.example/a.png",
            "http://good.example/a.png",
            "/static/a.png",
            "//cdn.example/a.png",
        ];
        for value in safe {
            let (mut doc, id) = doc_with(vec![Attribute::new("src", value)]);
            let report = run(
                Action::BlankUnsafeSrc(SrcPolicy::default()),
                &mut doc,
                id,
                NameMatching::Exact,
            );
            assert_eq!(attrs_of(&doc)[0].1, value);
            assert!(report.is_empty());
        }
    }

    #[test]
    fn blank_unsafe_src_catches_common_schemes() {
        let unsafe_values = [
            "javascript:alert(1)",
            "data:text/html,x",
            "mailto:a@b.c",
            "img/a.png",
            "HTTPS://upper.example/",
            " https://leading-space.example/",
        ];
        let policy = SrcPolicy::default();
        for value in unsafe_values {
            assert!(!policy.is_safe(value), "{value} should be unsafe");
        }
    }

    #[test]
    fn blanking_an_empty_value_is_not_reported() {
        let (mut doc, id) = doc_with(vec![Attribute::new("src", "")]);
        let report = run(
            Action::BlankUnsafeSrc(SrcPolicy::default()),
            &mut doc,
            id,
            NameMatching::Exact,
        );
        assert_eq!(attrs_of(&doc)[0].1, "");
        assert!(report.is_empty());
    }

    #[test]
    fn remove_subtree_handles_nested_matches() {
        let mut doc = Document::parse_fragment("<div><div><p>x</p></div></div>");
        let ids = crate::sanitizer::Selector::tag("div").select(&doc);
        let mut report = Report::new();
        Action::RemoveSubtree.apply(&mut doc, &ids, NameMatching::Exact, "test", &mut report);
        assert_eq!(doc.elements().count(), 0);
        assert_eq!(report.removed_subtrees(), 1);
    }

    #[test]
    fn strip_attributes_builds_one_action_per_name() {
        let actions = Action::strip_attributes(["src", "background"]);
        assert_eq!(
            actions,
            [
                Action::StripAttribute("src".into()),
                Action::StripAttribute("background".into()),
            ]
        );
    }
}
