use crate::rule::ParseError;
use std::path::PathBuf;

/// Library-level structured errors for import-rename.
///
/// Rule text problems are reported as [`crate::rule::ParseError`], which carries the diagnostic.
/// A rule read from a config file wraps it in [`RenameError::InvalidRule`] so the span survives.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum RenameError {
	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid rule `{rule}` in {path}")]
	InvalidRule {
		rule: String,
		path: PathBuf,
		#[source]
		source: ParseError,
	},

	#[error("Invalid from regexp for regexp matcher: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Major version suffix v{major} in {import} is not allowed, suffixes start at v2")]
	InvalidVersionSuffix { import: String, major: u32 },

	#[error("Version jump for {import} must be positive")]
	InvalidVersionJump { import: String },

	#[error("Version jump of {jump} for {import} overflows the major version")]
	VersionOverflow { import: String, jump: u32 },

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using RenameError.
pub type Result<T> = std::result::Result<T, RenameError>;
