use crate::error::{RenameError, Result};
use crate::matcher::{MatchResult, Matcher};

/// Bumps the major version suffix (`/vN`) of an import path and everything below it.
///
/// A path without a suffix is implicitly at major version 1, so going from
/// `github.com/user/project` to `github.com/user/project/v2` takes one step:
///
/// ```text
/// base github.com/user/project, jump 1:
///   github.com/user/project         => github.com/user/project/v2
///   github.com/user/project/data    => github.com/user/project/v2/data
///   github.com/user/project/v3/data    untouched, already another major version
/// base github.com/user/project/v2, jump 1:
///   github.com/user/project/v2/data => github.com/user/project/v3/data
/// ```
#[derive(Debug, Clone)]
pub struct VersionedMatcher {
	/// Base import path without trailing slashes.
	base: String,

	/// `base` followed by a slash, the prefix of every sub-package.
	base_dir: String,

	/// Replacement for `base` itself, ends with the new suffix.
	import_head: String,

	/// Major version declared by the suffix of `base`, 0 when there is none.
	current: u32,

	target: u32,
}

impl VersionedMatcher {
	/// Prepare a matcher moving `base` up by `jump` major versions.
	///
	/// Fails on a zero jump, on a `v0`/`v1` suffix in `base`, and when the new major version
	/// does not fit in a `u32`.
	pub fn new(base: &str, jump: u32) -> Result<Self> {
		if jump == 0 {
			return Err(RenameError::InvalidVersionJump {
				import: base.to_string(),
			});
		}

		let base = base.trim_end_matches('/');
		let (head, tail) = match base.rfind('/') {
			Some(pos) => (&base[..pos], &base[pos + 1..]),
			None => ("", base),
		};

		let (head, current) = match major_suffix(tail) {
			Some(major) if major < 2 => {
				return Err(RenameError::InvalidVersionSuffix {
					import: base.to_string(),
					major,
				});
			}
			Some(major) => (head.trim_end_matches('/'), major),
			None => (base, 0),
		};

		// leaving the implicit v1 costs one extra step
		let effective = if current == 0 {
			jump.checked_add(1)
		} else {
			Some(jump)
		};
		let target = effective
			.and_then(|jump| current.checked_add(jump))
			.ok_or_else(|| RenameError::VersionOverflow {
				import: base.to_string(),
				jump,
			})?;

		let import_head = if head.is_empty() {
			format!("v{target}")
		} else {
			format!("{head}/v{target}")
		};

		tracing::debug!(base, current, target, %import_head, "prepared version jump");

		Ok(VersionedMatcher {
			base: base.to_string(),
			base_dir: format!("{base}/"),
			import_head,
			current,
			target,
		})
	}

	/// Major version of the base path, 0 when it has no suffix.
	pub fn current_version(&self) -> u32 {
		self.current
	}

	/// Major version paths are moved to.
	pub fn target_version(&self) -> u32 {
		self.target
	}
}

impl Matcher for VersionedMatcher {
	fn match_path(&self, path: &str) -> MatchResult {
		let Some(rest) = path.strip_prefix(self.base_dir.as_str()) else {
			if path == self.base {
				return MatchResult::Replacement(self.import_head.clone());
			}
			return MatchResult::NoMatch;
		};

		// under a suffixless base, `vN/...` is a different major version already
		if self.current == 0 && rest.split('/').next().and_then(major_suffix).is_some() {
			return MatchResult::NoMatch;
		}

		MatchResult::Replacement(clean_path(&format!("{}/{}", self.import_head, rest)))
	}
}

/// Lexically normalize a slash separated path.
///
/// Empty and `.` segments are dropped and `..` removes the segment before it. A `..` that
/// climbs above a relative path is kept, one above the root of an absolute path is dropped.
fn clean_path(path: &str) -> String {
	let rooted = path.starts_with('/');
	let mut segments: Vec<&str> = Vec::new();

	for segment in path.split('/') {
		match segment {
			"" | "." => {}
			".." => match segments.last() {
				Some(&last) if last != ".." => {
					segments.pop();
				}
				_ if rooted => {}
				_ => segments.push(".."),
			},
			segment => segments.push(segment),
		}
	}

	let joined = segments.join("/");
	match (rooted, joined.is_empty()) {
		(true, _) => format!("/{joined}"),
		(false, true) => ".".to_string(),
		(false, false) => joined,
	}
}

/// Parse a `vN` path segment.
fn major_suffix(segment: &str) -> Option<u32> {
	let digits = segment.strip_prefix('v')?;
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	digits.parse().ok()
}
