#![allow(deprecated)] // assert_cmd::Command::cargo_bin is deprecated but replacement requires nightly

use predicates::prelude::*;
use std::fs;

fn import_rename_cmd() -> assert_cmd::Command {
	let mut cmd = assert_cmd::Command::cargo_bin("import-rename").unwrap();
	// keep the user's own config out of the tests
	cmd.env("HOME", "/nonexistent-import-rename-home");
	cmd
}

// ============================================================================
// CLI flag tests
// ============================================================================

#[test]
fn test_help_flag() {
	import_rename_cmd()
		.arg("--help")
		.assert()
		.success()
		.stdout(predicate::str::contains("Rename import paths"));
}

#[test]
fn test_version_flag() {
	import_rename_cmd()
		.arg("--version")
		.assert()
		.success()
		.stdout(predicate::str::contains("import-rename"));
}

// ============================================================================
// Matching paths from the command line
// ============================================================================

#[test]
fn test_prefix_rule_on_args() {
	import_rename_cmd()
		.args([
			"--rule",
			"gen/ => example.com/schema/",
			"gen/marker",
			"gen",
			"fmt",
		])
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"gen/marker => example.com/schema/marker",
		))
		.stdout(predicate::str::contains("gen => example.com/schema\n"))
		.stdout(predicate::str::contains("fmt").not());
}

#[test]
fn test_version_increment_rule() {
	import_rename_cmd()
		.args([
			"-r",
			"github.com/user/project ++",
			"github.com/user/project",
			"github.com/user/project/data",
			"github.com/user/project/v2/data",
		])
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"github.com/user/project => github.com/user/project/v2\n",
		))
		.stdout(predicate::str::contains(
			"github.com/user/project/data => github.com/user/project/v2/data",
		))
		.stdout(predicate::str::contains("github.com/user/project/v2/data =>").not());
}

#[test]
fn test_version_add_rule() {
	import_rename_cmd()
		.args([
			"-r",
			"github.com/user/project/v2 += 3",
			"github.com/user/project/v2/data",
		])
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"github.com/user/project/v2/data => github.com/user/project/v5/data",
		));
}

#[test]
fn test_regexp_rule() {
	import_rename_cmd()
		.args(["-r", "^gen/(.*)$ // example.com/schema/$1", "gen/caddy/marker"])
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"gen/caddy/marker => example.com/schema/caddy/marker",
		));
}

#[test]
fn test_first_rule_wins() {
	import_rename_cmd()
		.args(["-r", "a/ => first/", "-r", "a/ => second/", "a/pkg"])
		.assert()
		.success()
		.stdout(predicate::str::contains("a/pkg => first/pkg"))
		.stdout(predicate::str::contains("second").not());
}

#[test]
fn test_paths_from_stdin() {
	import_rename_cmd()
		.args(["-r", "old/ => new/"])
		.write_stdin("\"old/pkg\"\n\nunrelated\nold/other\n")
		.assert()
		.success()
		.stdout(predicate::str::contains("old/pkg => new/pkg"))
		.stdout(predicate::str::contains("old/other => new/other"))
		.stdout(predicate::str::contains("unrelated").not());
}

// ============================================================================
// Rule errors
// ============================================================================

#[test]
fn test_parse_error_shows_diagnostic() {
	import_rename_cmd()
		.args(["--color", "never", "-r", "path --", "path/pkg"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("invalid rule, operator expected"))
		.stderr(predicate::str::contains("    path --\n         ^^"));
}

#[test]
fn test_unexpected_data_error() {
	import_rename_cmd()
		.args(["--color", "never", "-r", "path ++ extra", "path"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("unexpected data"));
}

#[test]
fn test_invalid_regex_error() {
	import_rename_cmd()
		.args(["-r", "^gen/(.*$ // x/$1", "gen/a"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("Failed to compile rules"));
}

#[test]
fn test_low_version_suffix_error() {
	import_rename_cmd()
		.args(["-r", "github.com/user/project/v1 ++", "github.com/user/project/v1"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("v1"));
}

#[test]
fn test_no_rules_anywhere() {
	let temp_dir = tempfile::tempdir().unwrap();

	import_rename_cmd()
		.arg("some/path")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("No rules given"));
}

// ============================================================================
// check subcommand tests
// ============================================================================

#[test]
fn test_check_version_jump() {
	import_rename_cmd()
		.args(["check", "github.com/user/project += 2"])
		.assert()
		.success()
		.stdout(predicate::str::contains("version jump rule"))
		.stdout(predicate::str::contains("v1 (no suffix) -> v3"));
}

#[test]
fn test_check_prefix() {
	import_rename_cmd()
		.args(["check", r"my\ dir/ => other/"])
		.assert()
		.success()
		.stdout(predicate::str::contains("prefix rule"))
		.stdout(predicate::str::contains("from: my dir/"));
}

#[test]
fn test_check_missing_replacement() {
	import_rename_cmd()
		.args(["--color", "never", "check", "path =>"])
		.assert()
		.failure()
		.stderr(predicate::str::contains("missing replacement import path"))
		.stderr(predicate::str::contains("?????"));
}

// ============================================================================
// --init tests
// ============================================================================

#[test]
fn test_init_creates_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".import-rename.toml");

	import_rename_cmd()
		.arg("--init")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("Created .import-rename.toml"));

	assert!(config_path.exists());

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
	assert!(content.contains("[[rules]]"));
}

#[test]
fn test_init_fails_if_exists() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".import-rename.toml");

	// Create existing file
	fs::write(&config_path, "# existing").unwrap();

	import_rename_cmd()
		.arg("--init")
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_overwrites() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".import-rename.toml");

	// Create existing file
	fs::write(&config_path, "# existing").unwrap();

	import_rename_cmd()
		.args(["--init", "--force"])
		.current_dir(temp_dir.path())
		.assert()
		.success();

	let content = fs::read_to_string(&config_path).unwrap();
	assert!(content.contains("root = true"));
}

// ============================================================================
// config subcommand tests
// ============================================================================

#[test]
fn test_config_validate_no_config() {
	let temp_dir = tempfile::tempdir().unwrap();

	import_rename_cmd()
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("No configuration files found"));
}

#[test]
fn test_config_validate_valid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".import-rename.toml");

	fs::write(
		&config_path,
		r#"
root = true

[[rules]]
rule = "github.com/old/ => github.com/new/"
"#,
	)
	.unwrap();

	import_rename_cmd()
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("valid"));
}

#[test]
fn test_config_validate_invalid_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".import-rename.toml");

	fs::write(&config_path, "invalid toml [[[").unwrap();

	import_rename_cmd()
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.failure();
}

#[test]
fn test_config_validate_bad_regexp() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".import-rename.toml");

	fs::write(
		&config_path,
		r#"
root = true

[[rules]]
rule = '^gen/(.*$ // x/$1'
"#,
	)
	.unwrap();

	import_rename_cmd()
		.args(["config", "validate"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("Invalid from regexp"));
}

#[test]
fn test_config_validate_reports_every_broken_rule() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".import-rename.toml");

	fs::write(
		&config_path,
		r#"
root = true

[[rules]]
rule = "a/ --"

[[rules]]
rule = "b/ => c/"

[[rules]]
rule = "d/ =>"
"#,
	)
	.unwrap();

	import_rename_cmd()
		.args(["config", "validate", "--color", "never"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("operator expected"))
		.stderr(predicate::str::contains("    a/ --\n       ^^"))
		.stderr(predicate::str::contains("missing replacement import path"));
}

#[test]
fn test_config_show_displays_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".import-rename.toml");

	fs::write(
		&config_path,
		r#"
root = true

[[rules]]
rule = "github.com/user/project ++"
description = "next major"
"#,
	)
	.unwrap();

	import_rename_cmd()
		.args(["config", "show"])
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains("rule: github.com/user/project ++"))
		.stdout(predicate::str::contains("description: next major"));
}

// ============================================================================
// Rules from config files
// ============================================================================

#[test]
fn test_rules_from_config() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".import-rename.toml");

	fs::write(
		&config_path,
		r#"
root = true

[[rules]]
rule = "github.com/old/ => github.com/new/"
"#,
	)
	.unwrap();

	import_rename_cmd()
		.arg("github.com/old/pkg")
		.current_dir(temp_dir.path())
		.assert()
		.success()
		.stdout(predicate::str::contains(
			"github.com/old/pkg => github.com/new/pkg",
		));
}

#[test]
fn test_broken_config_rule_shows_diagnostic() {
	let temp_dir = tempfile::tempdir().unwrap();
	let config_path = temp_dir.path().join(".import-rename.toml");

	fs::write(
		&config_path,
		r#"
root = true

[[rules]]
rule = "github.com/old/ --"
"#,
	)
	.unwrap();

	import_rename_cmd()
		.args(["--color", "never", "github.com/old/pkg"])
		.current_dir(temp_dir.path())
		.assert()
		.failure()
		.stderr(predicate::str::contains("invalid rule in"))
		.stderr(predicate::str::contains("operator expected"))
		.stderr(predicate::str::contains(
			"    github.com/old/ --\n                    ^^",
		));
}

#[test]
fn test_config_cascade_from_subdirectory() {
	let temp_dir = tempfile::tempdir().unwrap();
	let sub_dir = temp_dir.path().join("nested").join("deeper");
	fs::create_dir_all(&sub_dir).unwrap();

	fs::write(
		temp_dir.path().join(".import-rename.toml"),
		r#"
root = true

[[rules]]
rule = "host/project ++"
"#,
	)
	.unwrap();

	import_rename_cmd()
		.arg("host/project/pkg")
		.current_dir(&sub_dir)
		.assert()
		.success()
		.stdout(predicate::str::contains("host/project/pkg => host/project/v2/pkg"));
}

#[test]
fn test_inner_config_rules_come_first() {
	let temp_dir = tempfile::tempdir().unwrap();
	let sub_dir = temp_dir.path().join("inner");
	fs::create_dir(&sub_dir).unwrap();

	fs::write(
		temp_dir.path().join(".import-rename.toml"),
		r#"
root = true

[[rules]]
rule = "a/ => outer/"
"#,
	)
	.unwrap();
	fs::write(
		sub_dir.join(".import-rename.toml"),
		r#"
[[rules]]
rule = "a/ => inner/"
"#,
	)
	.unwrap();

	import_rename_cmd()
		.arg("a/pkg")
		.current_dir(&sub_dir)
		.assert()
		.success()
		.stdout(predicate::str::contains("a/pkg => inner/pkg"));
}
