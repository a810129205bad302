use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::io::{BufRead, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use import_rename::config::{
	CONFIG_FILE_NAME, MergedConfig, RuleSource, RuleWithSource, discover_configs,
	discover_configs_unchecked, generate_init_template, load_merged_config, user_config_path,
};
use import_rename::error::RenameError;
use import_rename::matcher::{CompiledRule, RuleMatcher, compile_rules, find_replacement};
use import_rename::rule::{AnsiRenderer, ParseError, PlainRenderer, Rule, parse};

#[derive(Parser)]
#[command(name = "import-rename")]
#[command(
	author,
	version,
	about = "Rename import paths with prefix, major version and regexp rules"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Rule to apply, may be repeated (defaults to the rules from .import-rename.toml)
	#[arg(short, long = "rule", value_name = "RULE")]
	rules: Vec<String>,

	/// Create a template .import-rename.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .import-rename.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// When to color rule diagnostics
	#[arg(long, value_enum, default_value_t = ColorChoice::Auto, global = true)]
	color: ColorChoice,

	/// Increase log verbosity (-v, -vv, -vvv)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	/// Import paths to check, one per line on stdin when omitted
	paths: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
	/// Parse and compile a single rule, then describe it
	Check {
		/// Rule text, e.g. "github.com/user/project ++"
		rule: String,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the config cascade with source annotations
	Show,
	/// Check all config files for errors without matching anything
	Validate,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
	Auto,
	Always,
	Never,
}

impl ColorChoice {
	fn use_color(self) -> bool {
		match self {
			ColorChoice::Auto => std::io::stderr().is_terminal(),
			ColorChoice::Always => true,
			ColorChoice::Never => false,
		}
	}
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	match run(cli) {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};
	let filter = EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| EnvFilter::new(format!("import_rename={level}")));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run(cli: Cli) -> Result<ExitCode> {
	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	// Handle subcommands
	if let Some(command) = cli.command {
		return match command {
			Commands::Check { rule } => handle_check(&rule, cli.color),
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(),
				ConfigAction::Validate => handle_config_validate(cli.color),
			},
		};
	}

	handle_rename(&cli.rules, &cli.paths, cli.color)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

/// Print a rule parse failure with its rendered diagnostic.
fn report_parse_error(err: &ParseError, color: ColorChoice) {
	eprintln!("error: invalid rule, {}", err.report);
	print_details(err, color);
}

/// Print a broken config rule, with its diagnostic when the rule text did not parse.
fn report_config_error(path: &Path, err: &RenameError, color: ColorChoice) {
	match err {
		RenameError::InvalidRule { source, .. } => {
			eprintln!("error: invalid rule in {}, {}", path.display(), source.report);
			print_details(source, color);
		}
		other => eprintln!("Configuration error in {}: {}", path.display(), other),
	}
}

fn print_details(err: &ParseError, color: ColorChoice) {
	let details = if color.use_color() {
		err.details_with(&AnsiRenderer)
	} else {
		err.details_with(&PlainRenderer)
	};
	for line in details.lines() {
		eprintln!("    {line}");
	}
}

fn handle_check(text: &str, color: ColorChoice) -> Result<ExitCode> {
	let rule = match parse(text) {
		Ok(rule) => rule,
		Err(err) => {
			report_parse_error(&err, color);
			return Ok(ExitCode::FAILURE);
		}
	};

	let matcher = RuleMatcher::new(&rule).with_context(|| format!("Invalid rule: {rule}"))?;

	match &rule {
		Rule::Prefix { from, to } => {
			println!("prefix rule: {rule}");
			println!("  from: {from}");
			println!("  to:   {to}");
		}
		Rule::Regexp { from, to } => {
			println!("regexp rule: {rule}");
			println!("  pattern:  {from}");
			println!("  template: {to}");
		}
		Rule::VersionJump { import, jump } => {
			println!("version jump rule: {rule}");
			println!("  import: {import}");
			println!("  jump:   {jump}");
			if let RuleMatcher::Versioned(versioned) = &matcher {
				let target = versioned.target_version();
				match versioned.current_version() {
					0 => println!("  major:  v1 (no suffix) -> v{target}"),
					current => println!("  major:  v{current} -> v{target}"),
				}
			}
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_rename(rule_texts: &[String], paths: &[String], color: ColorChoice) -> Result<ExitCode> {
	let config = if rule_texts.is_empty() {
		let cwd = std::env::current_dir().context("Failed to get current directory")?;
		let config = match load_merged_config(&cwd) {
			Ok(config) => config,
			Err(err) => {
				if let RenameError::InvalidRule { path, .. } = &err {
					report_config_error(path, &err, color);
					return Ok(ExitCode::FAILURE);
				}
				return Err(err).context("Failed to load configuration");
			}
		};
		if config.rules.is_empty() {
			anyhow::bail!("No rules given. Pass --rule or add rules to {CONFIG_FILE_NAME}.");
		}
		config
	} else {
		let mut config = MergedConfig::default();
		for text in rule_texts {
			match parse(text) {
				Ok(rule) => config.rules.push(RuleWithSource {
					rule,
					source: RuleSource::CommandLine,
				}),
				Err(err) => {
					report_parse_error(&err, color);
					return Ok(ExitCode::FAILURE);
				}
			}
		}
		config
	};

	let rules = compile_rules(&config).context("Failed to compile rules")?;

	let paths = if paths.is_empty() {
		read_paths(std::io::stdin().lock()).context("Failed to read import paths from stdin")?
	} else {
		paths.iter().map(|path| normalize_path(path)).collect()
	};

	let changes = print_replacements(&rules, &paths);
	match changes {
		0 => tracing::info!("no changes detected in {} import paths", paths.len()),
		1 => tracing::info!("1 change detected in {} import paths", paths.len()),
		n => tracing::info!("{n} changes detected in {} import paths", paths.len()),
	}

	Ok(ExitCode::SUCCESS)
}

/// Print `path => replacement` for every affected path and return how many there were.
fn print_replacements(rules: &[CompiledRule], paths: &[String]) -> usize {
	let mut changes = 0;
	for path in paths {
		if let Some((rule, replacement)) = find_replacement(rules, path) {
			tracing::debug!(rule = %rule.rule, source = %rule.source, "{path} matched");
			println!("{path} => {replacement}");
			changes += 1;
		}
	}
	changes
}

fn read_paths(input: impl BufRead) -> std::io::Result<Vec<String>> {
	let mut paths = Vec::new();
	for line in input.lines() {
		let path = normalize_path(&line?);
		if !path.is_empty() {
			paths.push(path);
		}
	}
	Ok(paths)
}

/// Strip surrounding whitespace and the quotes of an import spec.
fn normalize_path(path: &str) -> String {
	path.trim().trim_matches('"').to_string()
}

fn handle_config_show() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = discover_configs(&cwd).context("Failed to discover config files")?;

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	println!("Configuration files (in cascade order):\n");

	for loaded in &configs {
		println!("# Source: {}", loaded.path.display());
		println!("# root: {}", loaded.config.root);
		if let Some(ref env_var) = loaded.config.root_config_lookup_disable_env_var {
			println!("# root-config-lookup-disable-env-var: {}", env_var);
		}
		println!("# rules: {}", loaded.config.rules.len());
		println!();

		for (i, entry) in loaded.config.rules.iter().enumerate() {
			println!("  Rule {}:", i + 1);
			println!("    rule: {}", entry.rule);
			if let Some(ref description) = entry.description {
				println!("    description: {}", description);
			}
			println!();
		}
	}

	// Show user config path
	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(color: ColorChoice) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	// Rules are checked below so that every broken one gets reported
	let configs = match discover_configs_unchecked(&cwd) {
		Ok(configs) => configs,
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			return Ok(ExitCode::FAILURE);
		}
	};

	if configs.is_empty() {
		println!("No configuration files found.");
		return Ok(ExitCode::SUCCESS);
	}

	// Rules can parse and still fail to compile, e.g. a bad regexp
	let mut failed = false;
	for loaded in &configs {
		for entry in &loaded.config.rules {
			let compiled = entry
				.parse_in(&loaded.path)
				.and_then(|rule| RuleMatcher::new(&rule));
			if let Err(e) = compiled {
				report_config_error(&loaded.path, &e, color);
				failed = true;
			}
		}
	}
	if failed {
		return Ok(ExitCode::FAILURE);
	}

	println!("All configuration files are valid:");
	for loaded in &configs {
		println!(
			"  {} ({} rules)",
			loaded.path.display(),
			loaded.config.rules.len()
		);
	}
	Ok(ExitCode::SUCCESS)
}
