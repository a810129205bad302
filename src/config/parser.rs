use crate::config::types::Config;
use crate::error::{RenameError, Result};
use std::path::Path;

/// Parse a config file from the given path.
pub fn parse_config_file(path: &Path) -> Result<Config> {
	let config = read_config_file(path)?;
	// Every rule must parse before the config is accepted
	config.validate(path)?;
	Ok(config)
}

/// Parse a config from a string (useful for testing).
pub fn parse_config_str(content: &str, path: &Path) -> Result<Config> {
	let config = read_config_str(content, path)?;
	config.validate(path)?;
	Ok(config)
}

/// Read a config file without parsing its rules.
///
/// Only the TOML structure is checked, so every broken rule can be reported afterwards.
pub fn read_config_file(path: &Path) -> Result<Config> {
	let content = std::fs::read_to_string(path).map_err(|source| RenameError::ConfigReadError {
		path: path.to_path_buf(),
		source,
	})?;

	read_config_str(&content, path)
}

/// Read a config from a string without parsing its rules.
pub fn read_config_str(content: &str, path: &Path) -> Result<Config> {
	let config: Config =
		toml::from_str(content).map_err(|source| RenameError::ConfigParseError {
			path: path.to_path_buf(),
			source,
		})?;

	tracing::debug!(path = %path.display(), rules = config.rules.len(), "read config");

	Ok(config)
}
