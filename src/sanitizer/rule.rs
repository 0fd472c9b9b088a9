//! A rule pairs a [`Selector`] with the actions applied to its matches.

use super::action::Action;
use super::selector::Selector;

/// A named unit of policy.
///
/// All actions of a rule run against the same matched set, computed once
/// immediately before the rule runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    name: String,
    selector: Selector,
    actions: Vec<Action>,
}

impl Rule {
    pub fn new(name: impl Into<String>, selector: Selector, actions: Vec<Action>) -> Self {
        Self {
            name: name.into(),
            selector,
            actions,
        }
    }

    /// Identifier used in the diagnostics [`Report`](super::Report).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Append an action after the existing ones.
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }
}
