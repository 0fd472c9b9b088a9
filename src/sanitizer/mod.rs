//! Rule-driven sanitization over the [`Document`](crate::Document) tree.
//!
//! A [`Rule`] pairs a [`Selector`] with a list of [`Action`]s. Rules are
//! composed into a [`Pipeline`] that runs them sequentially; every change is
//! recorded in a [`Report`].
//!
//! Available actions:
//!
//! - [`Action::RemoveSubtree`] -- detach matched elements and their contents.
//! - [`Action::StripAttribute`] -- remove attributes by exact name.
//! - [`Action::StripAttributesByPrefix`] -- remove attributes by name prefix.
//! - [`Action::BlankUnsafeSrc`] -- erase resource URLs that fail a [`SrcPolicy`].

mod action;
mod pipeline;
mod report;
mod rule;
mod selector;

pub use action::{Action, NameMatching, SrcPolicy};
pub use pipeline::Pipeline;
pub use report::{Finding, FindingKind, Report};
pub use rule::Rule;
pub use selector::Selector;
