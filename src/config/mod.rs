//! Configuration loading and parsing for import-rename.
//!
//! This module handles:
//! - TOML config file parsing
//! - Directory cascade discovery
//! - Merging rules from every config into one ordered list

pub mod cascade;
pub mod parser;
pub mod template;
pub mod types;

pub use cascade::{
	CONFIG_FILE_NAME, discover_configs, discover_configs_unchecked, load_merged_config,
	merge_configs, user_config_path,
};
pub use parser::{parse_config_file, parse_config_str, read_config_file, read_config_str};
pub use template::generate_init_template;
pub use types::{Config, LoadedConfig, MergedConfig, RuleEntry, RuleSource, RuleWithSource};
