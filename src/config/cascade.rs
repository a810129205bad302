use crate::config::parser::{parse_config_file, read_config_file};
use crate::config::types::{Config, LoadedConfig, MergedConfig, RuleSource, RuleWithSource};
use crate::error::{RenameError, Result};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in every directory and in the home directory.
pub const CONFIG_FILE_NAME: &str = ".import-rename.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.import-rename.toml`
/// 2. If found and `root = true`, skip to user config only
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.import-rename.toml (unless disabled)
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	discover_with(start_dir, parse_config_file)
}

/// Same cascade as [`discover_configs`], but rules are left unparsed.
///
/// Used to report every broken rule at once instead of stopping at the first one.
pub fn discover_configs_unchecked(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	discover_with(start_dir, read_config_file)
}

fn discover_with(
	start_dir: &Path,
	load: impl Fn(&Path) -> Result<Config>,
) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = Some(start_dir);

	// Walk up the directory tree
	while let Some(dir) = current_dir {
		let config_path = dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			let config = load(&config_path)?;
			let is_root = config.root;
			tracing::debug!(path = %config_path.display(), root = is_root, "loaded config");

			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if is_root {
				break;
			}
		}

		current_dir = dir.parent();
	}

	// Check user config unless disabled by env var
	if let Some(user_config) = load_user_config(&configs, &load)? {
		configs.push(user_config);
	}

	Ok(configs)
}

/// Load the user's ~/.import-rename.toml if it exists and isn't disabled.
fn load_user_config(
	existing_configs: &[LoadedConfig],
	load: &impl Fn(&Path) -> Result<Config>,
) -> Result<Option<LoadedConfig>> {
	// Check if any config disables user config lookup via env var
	for loaded in existing_configs {
		if let Some(ref env_var) = loaded.config.root_config_lookup_disable_env_var
			&& is_env_truthy(env_var)
		{
			tracing::debug!(env_var, "user config lookup disabled");
			return Ok(None);
		}
	}

	let user_config_path = user_config_path()?;

	// Already picked up while walking up from inside the home directory
	if existing_configs
		.iter()
		.any(|loaded| loaded.path == user_config_path)
	{
		return Ok(None);
	}

	if user_config_path.exists() {
		let config = load(&user_config_path)?;
		Ok(Some(LoadedConfig {
			config,
			path: user_config_path,
		}))
	} else {
		Ok(None)
	}
}

/// Check if an environment variable is set to a truthy value.
fn is_env_truthy(var_name: &str) -> bool {
	match std::env::var(var_name) {
		Ok(value) => {
			let lower = value.to_lowercase();
			!value.is_empty() && lower != "0" && lower != "false" && lower != "no"
		}
		Err(_) => false,
	}
}

/// Merge multiple configs into a single list of parsed rules.
///
/// Rules are collected in cascade order (first match wins).
pub fn merge_configs(configs: &[LoadedConfig]) -> Result<MergedConfig> {
	let mut merged = MergedConfig::default();

	for loaded in configs {
		for entry in &loaded.config.rules {
			merged.rules.push(RuleWithSource {
				rule: entry.parse_in(&loaded.path)?,
				source: RuleSource::File(loaded.path.clone()),
			});
		}
	}

	Ok(merged)
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	merge_configs(&configs)
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(RenameError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
