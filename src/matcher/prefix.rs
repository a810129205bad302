use crate::matcher::{MatchResult, Matcher};

/// Replaces a leading path prefix.
///
/// A prefix ending in a slash also matches the bare package path, so `pkg/ => other/`
/// rewrites both `pkg/sub` and `pkg`.
#[derive(Debug, Clone)]
pub struct PrefixMatcher {
	from: String,
	to: String,
}

impl PrefixMatcher {
	pub fn new(from: &str, to: &str) -> Self {
		PrefixMatcher {
			from: from.to_string(),
			to: to.to_string(),
		}
	}
}

impl Matcher for PrefixMatcher {
	fn match_path(&self, path: &str) -> MatchResult {
		match path.strip_prefix(self.from.as_str()) {
			Some(rest) => MatchResult::Replacement(format!("{}{}", self.to, rest)),
			None if path == self.from.trim_end_matches('/') => {
				MatchResult::Replacement(self.to.trim_end_matches('/').to_string())
			}
			None => MatchResult::NoMatch,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const SCHEMA: &str = "gitlab.example.com/common/schema/";

	#[test]
	fn test_mismatch() {
		let matcher = PrefixMatcher::new("gen/", SCHEMA);
		assert_eq!(
			matcher.match_path("github.com/sirkon/message"),
			MatchResult::NoMatch
		);
		assert_eq!(matcher.match_path("gene/marker"), MatchResult::NoMatch);
	}

	#[test]
	fn test_match() {
		let matcher = PrefixMatcher::new("gen/", SCHEMA);
		assert_eq!(
			matcher.match_path("gen/marker"),
			MatchResult::Replacement("gitlab.example.com/common/schema/marker".to_string())
		);
		assert_eq!(
			matcher.match_path("gen/a/b/c"),
			MatchResult::Replacement("gitlab.example.com/common/schema/a/b/c".to_string())
		);
	}

	#[test]
	fn test_full_match_trims_slashes() {
		let matcher =
			PrefixMatcher::new("github.com/sirkon/goproxy/", "github.com/sirkon/goproxy/v2/");
		assert_eq!(
			matcher.match_path("github.com/sirkon/goproxy"),
			MatchResult::Replacement("github.com/sirkon/goproxy/v2".to_string())
		);
	}

	#[test]
	fn test_prefix_without_slash_matches_partial_segment() {
		let matcher = PrefixMatcher::new("gen", "out");
		assert_eq!(
			matcher.match_path("general/x"),
			MatchResult::Replacement("outeral/x".to_string())
		);
		assert_eq!(
			matcher.match_path("gen"),
			MatchResult::Replacement("out".to_string())
		);
	}
}
