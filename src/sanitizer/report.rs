//! Diagnostics collected during a sanitization pass.

use std::collections::BTreeMap;
use std::fmt;

/// What a rule did to one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FindingKind {
    /// The element and its subtree were removed.
    RemovedSubtree,
    /// The attribute was kept but its unsafe value was erased.
    BlankedValue { attr: String, value: String },
    /// The attribute was removed.
    StrippedAttribute { attr: String },
}

/// A single change made by a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Finding {
    /// Name of the rule that made the change.
    pub rule: String,
    /// Tag of the affected element.
    pub tag: String,
    pub kind: FindingKind,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FindingKind::RemovedSubtree => write!(f, "[{}] removed <{}>", self.rule, self.tag),
            FindingKind::BlankedValue { attr, value } => {
                write!(f, "[{}] blanked @{attr} '{value}' in <{}>", self.rule, self.tag)
            }
            FindingKind::StrippedAttribute { attr } => {
                write!(f, "[{}] stripped @{attr} from <{}>", self.rule, self.tag)
            }
        }
    }
}

/// Every change made during one pass, in the order it was made.
///
/// Returned alongside the sanitized document instead of being written to a
/// global logger, so callers decide what to do with it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    findings: Vec<Finding>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, rule: &str, tag: &str, kind: FindingKind) {
        self.findings.push(Finding {
            rule: rule.to_string(),
            tag: tag.to_string(),
            kind,
        });
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Returns `true` if the pass changed nothing.
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// Number of findings recorded by the named rule.
    pub fn count(&self, rule: &str) -> usize {
        self.findings.iter().filter(|f| f.rule == rule).count()
    }

    /// Number of findings per rule name.
    pub fn counts_by_rule(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for finding in &self.findings {
            *counts.entry(finding.rule.as_str()).or_insert(0) += 1;
        }
        counts
    }

    pub fn removed_subtrees(&self) -> usize {
        self.count_kind(|k| matches!(k, FindingKind::RemovedSubtree))
    }

    pub fn blanked_values(&self) -> usize {
        self.count_kind(|k| matches!(k, FindingKind::BlankedValue { .. }))
    }

    pub fn stripped_attributes(&self) -> usize {
        self.count_kind(|k| matches!(k, FindingKind::StrippedAttribute { .. }))
    }

    fn count_kind(&self, pred: impl Fn(&FindingKind) -> bool) -> usize {
        self.findings.iter().filter(|f| pred(&f.kind)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        let mut report = Report::new();
        report.record("remove-scripts", "script", FindingKind::RemovedSubtree);
        report.record(
            "neutralize-all",
            "img",
            FindingKind::BlankedValue {
                attr: "src".into(),
                value: "javascript:x()".into(),
            },
        );
        report.record(
            "neutralize-all",
            "img",
            FindingKind::StrippedAttribute {
                attr: "onclick".into(),
            },
        );
        report
    }

    #[test]
    fn counts_per_kind() {
        let report = sample();
        assert_eq!(report.removed_subtrees(), 1);
        assert_eq!(report.blanked_values(), 1);
        assert_eq!(report.stripped_attributes(), 1);
        assert!(!report.is_empty());
    }

    #[test]
    fn counts_per_rule() {
        let report = sample();
        assert_eq!(report.count("neutralize-all"), 2);
        assert_eq!(report.count("body-background"), 0);
        let counts = report.counts_by_rule();
        assert_eq!(counts.get("remove-scripts"), Some(&1));
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn findings_render_for_logs() {
        let report = sample();
        let lines: Vec<String> = report.findings().iter().map(ToString::to_string).collect();
        assert_eq!(lines[0], "[remove-scripts] removed <script>");
        assert_eq!(lines[1], "[neutralize-all] blanked @src 'javascript:x()' in <img>");
        assert_eq!(lines[2], "[neutralize-all] stripped @onclick from <img>");
    }

    #[test]
    fn new_report_is_empty() {
        assert!(Report::new().is_empty());
    }
}
