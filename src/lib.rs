//! import-rename - rule language and matcher for renaming import paths.
//!
//! This library provides the core functionality for import-rename, including:
//! - Scanning and parsing rule text into typed rules, with positioned diagnostics
//! - Compiling rules into prefix, regexp and major-version matchers
//! - Configuration file parsing and cascade discovery
//!
//! # Example
//!
//! ```
//! use import_rename::matcher::{MatchResult, Matcher, compile};
//! use import_rename::rule::parse;
//!
//! let rule = parse("github.com/user/project ++").unwrap();
//! let matcher = compile(&rule).unwrap();
//!
//! assert_eq!(
//!     matcher.match_path("github.com/user/project/pkg"),
//!     MatchResult::Replacement("github.com/user/project/v2/pkg".to_string())
//! );
//! assert_eq!(matcher.match_path("example.com/other"), MatchResult::NoMatch);
//! ```

pub mod config;
pub mod error;
pub mod matcher;
pub mod rule;

pub use error::{RenameError, Result};
