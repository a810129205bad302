//! Rule language front end.
//!
//! This module handles:
//! - Scanning a single line of rule text into tokens, operators and integers
//! - Parsing it into a typed [`Rule`]
//! - Positioned diagnostics for rules that fail to parse

pub mod diagnostic;
pub mod parser;
pub mod scanner;
pub mod types;

pub use diagnostic::{AnsiRenderer, Diagnostic, PlainRenderer, Renderer};
pub use parser::{ParseError, parse};
pub use scanner::{ScanError, Scanner};
pub use types::{Operator, Rule};
