use crate::error::{RenameError, Result};
use crate::matcher::{MatchResult, Matcher};
use regex::Regex;

/// Rewrites paths matching a regexp through a substitution template (`$1`, `${name}`, ...).
#[derive(Debug, Clone)]
pub struct RegexMatcher {
	from: Regex,
	to: String,
}

impl RegexMatcher {
	/// Compile `from`; fails if it is not a valid regexp.
	pub fn new(from: &str, to: &str) -> Result<Self> {
		Ok(RegexMatcher {
			from: compile_regex(from)?,
			to: to.to_string(),
		})
	}
}

impl Matcher for RegexMatcher {
	fn match_path(&self, path: &str) -> MatchResult {
		if !self.from.is_match(path) {
			return MatchResult::NoMatch;
		}
		MatchResult::Replacement(self.from.replace_all(path, self.to.as_str()).into_owned())
	}
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| RenameError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}
