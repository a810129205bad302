use crate::config::types::{MergedConfig, RuleSource, RuleWithSource};
use crate::error::Result;
use crate::matcher::{MatchResult, Matcher, RuleMatcher};
use crate::rule::Rule;

/// A rule compiled and ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledRule {
	/// The original rule.
	pub rule: Rule,

	/// Matcher built from the rule.
	pub matcher: RuleMatcher,

	/// Where the rule was written (for debugging).
	pub source: RuleSource,
}

impl CompiledRule {
	/// Compile a rule from a RuleWithSource.
	pub fn from_rule_with_source(rws: &RuleWithSource) -> Result<Self> {
		let matcher = RuleMatcher::new(&rws.rule)?;
		tracing::debug!(rule = %rws.rule, source = %rws.source, "compiled rule");

		Ok(CompiledRule {
			rule: rws.rule.clone(),
			matcher,
			source: rws.source.clone(),
		})
	}
}

impl Matcher for CompiledRule {
	fn match_path(&self, path: &str) -> MatchResult {
		self.matcher.match_path(path)
	}
}

/// Compile all rules in a merged config.
pub fn compile_rules(config: &MergedConfig) -> Result<Vec<CompiledRule>> {
	config
		.rules
		.iter()
		.map(CompiledRule::from_rule_with_source)
		.collect()
}

/// Find the first rule that replaces `path`, with the replacement it produced.
pub fn find_replacement<'a>(
	rules: &'a [CompiledRule],
	path: &str,
) -> Option<(&'a CompiledRule, String)> {
	rules.iter().find_map(|rule| {
		rule.match_path(path)
			.into_replacement()
			.map(|replacement| (rule, replacement))
	})
}
