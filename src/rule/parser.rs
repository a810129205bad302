use crate::rule::diagnostic::{AnsiRenderer, Diagnostic, Renderer};
use crate::rule::scanner::{ScanError, Scanner};
use crate::rule::types::{Operator, Rule};

/// Filler marks shown where a whole operand is missing.
const MISSING_OPERAND_FILLER: usize = 25;

/// Filler marks shown where the operator is missing.
const MISSING_OPERATOR_FILLER: usize = 2;

/// Filler marks shown where the version jump value is missing.
const MISSING_JUMP_FILLER: usize = 4;

/// A rule that failed to parse.
///
/// `report` is a one-line message, the diagnostic points into the original rule text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{report}")]
pub struct ParseError {
	pub report: String,
	pub diagnostic: Diagnostic,
}

impl ParseError {
	fn new(report: impl Into<String>, diagnostic: Diagnostic) -> Self {
		ParseError {
			report: report.into(),
			diagnostic,
		}
	}

	/// The diagnostic rendered for a terminal.
	pub fn details(&self) -> String {
		self.details_with(&AnsiRenderer)
	}

	/// The diagnostic rendered with the given renderer.
	pub fn details_with(&self, renderer: &impl Renderer) -> String {
		renderer.render(&self.diagnostic)
	}
}

/// Parse a single line of rule text.
///
/// ```text
/// <path-or-pattern> => <replacement-path>
/// <path> ++
/// <path> += <positive-integer>
/// <pattern> // <template>
/// ```
pub fn parse(input: &str) -> Result<Rule, ParseError> {
	let mut scanner = Scanner::new(input);

	let first = scanner
		.next_token()
		.map_err(|err| token_error(&scanner, err, "missing opening import path or regexp"))?;

	let before_operator = scanner.snapshot();
	let operator = match scanner.next_operator() {
		Ok(operator) => operator,
		Err(ScanError::EndOfInput) => {
			return Err(ParseError::new(
				format!("missing operator ({})", operator_list()),
				scanner.diagnostic(1, MISSING_OPERATOR_FILLER),
			));
		}
		Err(_) => {
			return Err(ParseError::new(
				format!("operator expected ({})", operator_list()),
				before_operator.diagnostic(2, 0),
			));
		}
	};

	match operator {
		Operator::Prefix => {
			let to = scanner
				.next_token()
				.map_err(|err| token_error(&scanner, err, "missing replacement import path"))?;
			finish(&mut scanner)?;
			Ok(Rule::Prefix { from: first, to })
		}
		Operator::VersionIncrement => {
			finish(&mut scanner)?;
			Ok(Rule::VersionJump {
				import: first,
				jump: 1,
			})
		}
		Operator::VersionAdd => {
			let jump = version_jump(&mut scanner)?;
			finish(&mut scanner)?;
			Ok(Rule::VersionJump {
				import: first,
				jump,
			})
		}
		Operator::Regexp => {
			let to = scanner
				.next_token()
				.map_err(|err| token_error(&scanner, err, "missing replacement regexp"))?;
			finish(&mut scanner)?;
			Ok(Rule::Regexp { from: first, to })
		}
	}
}

fn version_jump(scanner: &mut Scanner) -> Result<u32, ParseError> {
	let before = scanner.snapshot();
	let jump = match scanner.next_integer() {
		Ok(jump) => jump,
		Err(ScanError::EndOfInput) => {
			return Err(ParseError::new(
				"missing version jump value",
				scanner.diagnostic(1, MISSING_JUMP_FILLER),
			));
		}
		Err(ScanError::IntegerOverflow) => {
			return Err(ParseError::new(
				"version jump value is too large",
				before.diagnostic(scanner.cursor() - before.position() + 1, 0),
			));
		}
		Err(_) => {
			return Err(ParseError::new(
				"version jump value expected",
				scanner.diagnostic(1, 0),
			));
		}
	};

	if jump == 0 {
		return Err(ParseError::new(
			"version jump value must be positive",
			before.diagnostic(scanner.cursor() - before.position(), 0),
		));
	}

	Ok(jump)
}

fn token_error(scanner: &Scanner, err: ScanError, missing: &str) -> ParseError {
	match err {
		ScanError::EndOfInput => {
			ParseError::new(missing, scanner.diagnostic(1, MISSING_OPERAND_FILLER))
		}
		err => ParseError::new(err.to_string(), scanner.diagnostic(err.span_len(), 0)),
	}
}

/// Trailing content after a complete rule; the whole tail is highlighted.
fn finish(scanner: &mut Scanner) -> Result<(), ParseError> {
	scanner.at_end().map_err(|err| {
		ParseError::new(err.to_string(), scanner.diagnostic(scanner.remaining(), 0))
	})
}

fn operator_list() -> String {
	let [prefix, increment, add, regexp] = Operator::ALL.map(|op| op.as_str());
	format!("one of {prefix}, {increment}, {add} or {regexp}")
}
