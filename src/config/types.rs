use crate::error::RenameError;
use crate::rule::{ParseError, Rule, parse};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Top-level configuration from a `.import-rename.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop directory cascade and jump directly to ~/.import-rename.toml.
	#[serde(default)]
	pub root: bool,

	/// Environment variable name that, if truthy, skips ~/.import-rename.toml lookup.
	/// Useful for CI environments.
	#[serde(default)]
	pub root_config_lookup_disable_env_var: Option<String>,

	/// Rules applied to every import path.
	/// First matching rule wins.
	#[serde(default)]
	pub rules: Vec<RuleEntry>,
}

/// A rule as written in a config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleEntry {
	/// Rule text, e.g. `github.com/old/ => github.com/new/`.
	pub rule: String,

	/// Free-form note shown by `config show`.
	pub description: Option<String>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Merged configuration from multiple config files in the cascade.
#[derive(Debug, Clone, Default)]
pub struct MergedConfig {
	/// All rules from all configs, in cascade order (first match wins).
	pub rules: Vec<RuleWithSource>,
}

/// Where a rule came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
	CommandLine,
	File(PathBuf),
}

impl fmt::Display for RuleSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			RuleSource::CommandLine => f.write_str("command line"),
			RuleSource::File(path) => write!(f, "{}", path.display()),
		}
	}
}

/// A parsed rule with its origin for debugging/display.
#[derive(Debug, Clone)]
pub struct RuleWithSource {
	/// The rule itself.
	pub rule: Rule,

	/// Where the rule was written.
	pub source: RuleSource,
}

impl RuleEntry {
	/// Parse the rule text.
	pub fn parse(&self) -> Result<Rule, ParseError> {
		parse(&self.rule)
	}

	/// Parse the rule text, reporting failures against the config file.
	pub fn parse_in(&self, path: &Path) -> Result<Rule, RenameError> {
		self.parse().map_err(|err| RenameError::InvalidRule {
			rule: self.rule.clone(),
			path: path.to_path_buf(),
			source: err,
		})
	}
}

impl Config {
	/// Validate that every rule parses.
	pub fn validate(&self, path: &Path) -> Result<(), RenameError> {
		for entry in &self.rules {
			entry.parse_in(path)?;
		}
		Ok(())
	}
}
