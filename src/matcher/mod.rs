//! Matchers compiled from parsed rules.
//!
//! This module handles:
//! - Compiling a [`Rule`] into a matcher (prefix, regexp or versioned)
//! - Deciding for a single import path whether it changes and what it becomes
//! - Applying a list of compiled rules where the first match wins
//!
//! All fallibility lives in construction. A compiled matcher never fails on a path.

pub mod compiled;
pub mod prefix;
pub mod regexp;
pub mod versioned;

pub use compiled::{CompiledRule, compile_rules, find_replacement};
pub use prefix::PrefixMatcher;
pub use regexp::RegexMatcher;
pub use versioned::VersionedMatcher;

use crate::error::Result;
use crate::rule::Rule;

/// Outcome of matching one import path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
	/// The path is not affected by the rule.
	NoMatch,

	/// The path must be replaced with this one.
	Replacement(String),
}

impl MatchResult {
	pub fn is_match(&self) -> bool {
		matches!(self, MatchResult::Replacement(_))
	}

	/// The new path, if any.
	pub fn replacement(&self) -> Option<&str> {
		match self {
			MatchResult::Replacement(path) => Some(path),
			MatchResult::NoMatch => None,
		}
	}

	pub fn into_replacement(self) -> Option<String> {
		match self {
			MatchResult::Replacement(path) => Some(path),
			MatchResult::NoMatch => None,
		}
	}
}

/// Decides whether an import path is affected by a rule.
///
/// Implementations are immutable once built and can be shared between threads.
pub trait Matcher: Send + Sync {
	fn match_path(&self, path: &str) -> MatchResult;
}

/// A matcher for any kind of rule.
#[derive(Debug, Clone)]
pub enum RuleMatcher {
	Prefix(PrefixMatcher),
	Regexp(RegexMatcher),
	Versioned(VersionedMatcher),
}

impl RuleMatcher {
	/// Compile a parsed rule.
	pub fn new(rule: &Rule) -> Result<Self> {
		let matcher = match rule {
			Rule::Prefix { from, to } => RuleMatcher::Prefix(PrefixMatcher::new(from, to)),
			Rule::Regexp { from, to } => RuleMatcher::Regexp(RegexMatcher::new(from, to)?),
			Rule::VersionJump { import, jump } => {
				RuleMatcher::Versioned(VersionedMatcher::new(import, *jump)?)
			}
		};
		Ok(matcher)
	}
}

impl Matcher for RuleMatcher {
	fn match_path(&self, path: &str) -> MatchResult {
		match self {
			RuleMatcher::Prefix(m) => m.match_path(path),
			RuleMatcher::Regexp(m) => m.match_path(path),
			RuleMatcher::Versioned(m) => m.match_path(path),
		}
	}
}

/// Compile a parsed rule into its matcher.
pub fn compile(rule: &Rule) -> Result<RuleMatcher> {
	RuleMatcher::new(rule)
}
