//! Ordered execution of [`Rule`]s against a document.

use super::action::{Action, NameMatching};
use super::report::Report;
use super::rule::Rule;
use crate::dom::Document;

/// An ordered chain of [`Rule`]s applied sequentially.
///
/// Each rule sees the cumulative result of the rules before it. An empty
/// pipeline is a no-op.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pipeline {
    rules: Vec<Rule>,
    matching: NameMatching,
}

impl Pipeline {
    /// Create an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how attribute names in rules are compared.
    pub fn with_matching(mut self, matching: NameMatching) -> Self {
        self.matching = matching;
        self
    }

    /// Append a rule to the end of the pipeline.
    pub fn add(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look up a rule by name for further configuration.
    pub fn rule_mut(&mut self, name: &str) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|r| r.name() == name)
    }

    pub fn matching(&self) -> NameMatching {
        self.matching
    }

    /// Returns `true` if no rules have been added.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule in order, recording changes into `report`.
    pub fn run(&self, doc: &mut Document, report: &mut Report) {
        for rule in &self.rules {
            let mut matched = rule.selector().select(doc);
            tracing::debug!("Rule {} matched {} elements", rule.name(), matched.len());

            for action in rule.actions() {
                action.apply(doc, &matched, self.matching, rule.name(), report);
                if matches!(action, Action::RemoveSubtree) {
                    matched.retain(|id| doc.is_attached(*id));
                }
            }
        }
    }
}
