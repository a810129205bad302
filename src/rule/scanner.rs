use crate::rule::diagnostic::Diagnostic;
use crate::rule::types::Operator;

/// Errors produced while scanning rule text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
	#[error("end of input")]
	EndOfInput,

	#[error("space expected after \\")]
	SpaceExpectedAfterEscape,

	#[error("{0} characters are not allowed")]
	ForbiddenCharacter(&'static str),

	#[error("non-printable characters are not allowed, got {0} in the input")]
	NonPrintable(u32),

	#[error("operator expected")]
	OperatorExpected,

	#[error("digit expected")]
	DigitExpected,

	#[error("integer value is too large")]
	IntegerOverflow,

	#[error("unexpected data")]
	UnexpectedData,
}

impl ScanError {
	/// Number of characters at the cursor that caused the error.
	pub fn span_len(&self) -> usize {
		match self {
			// the backslash and the character after it
			ScanError::SpaceExpectedAfterEscape => 2,
			_ => 1,
		}
	}
}

/// Cursor over a single line of rule text.
///
/// The original text is never modified; extraction only moves the cursor. Every extraction
/// skips a leading run of spaces first.
#[derive(Debug, Clone)]
pub struct Scanner {
	chars: Vec<char>,
	cursor: usize,
}

impl Scanner {
	/// Create a scanner positioned at the start of `input`.
	pub fn new(input: &str) -> Self {
		Scanner {
			chars: input.chars().collect(),
			cursor: 0,
		}
	}

	/// An independent scanner positioned identically, for lookahead and diagnostics.
	pub fn snapshot(&self) -> Self {
		self.clone()
	}

	/// Position of the next unconsumed non-space character (in chars).
	pub fn position(&self) -> usize {
		let mut pos = self.cursor;
		while self.chars.get(pos) == Some(&' ') {
			pos += 1;
		}
		pos
	}

	/// Number of characters left after skipping spaces.
	pub fn remaining(&self) -> usize {
		self.chars.len() - self.position()
	}

	/// Build a diagnostic anchored at the current position.
	pub fn diagnostic(&self, len: usize, filler: usize) -> Diagnostic {
		Diagnostic::new(self.chars.iter().collect(), self.position(), len, filler)
	}

	pub(crate) fn cursor(&self) -> usize {
		self.cursor
	}

	fn skip_spaces(&mut self) {
		self.cursor = self.position();
	}

	/// Next contiguous run of characters up to an unescaped space.
	///
	/// `\ ` is un-escaped into a literal space.
	pub fn next_token(&mut self) -> Result<String, ScanError> {
		self.skip_spaces();
		if self.cursor == self.chars.len() {
			return Err(ScanError::EndOfInput);
		}

		let mut token = String::new();
		while let Some(&c) = self.chars.get(self.cursor) {
			match c {
				' ' => break,
				'\\' => {
					if self.chars.get(self.cursor + 1) != Some(&' ') {
						return Err(ScanError::SpaceExpectedAfterEscape);
					}
					token.push(' ');
					self.cursor += 2;
				}
				'\t' => return Err(ScanError::ForbiddenCharacter("\\t")),
				'\r' => return Err(ScanError::ForbiddenCharacter("\\r")),
				'\n' => return Err(ScanError::ForbiddenCharacter("\\n")),
				c if c < ' ' => return Err(ScanError::NonPrintable(c as u32)),
				c => {
					token.push(c);
					self.cursor += 1;
				}
			}
		}

		Ok(token)
	}

	/// Next two-character operator, one of `=>`, `++`, `+=` and `//`.
	pub fn next_operator(&mut self) -> Result<Operator, ScanError> {
		self.skip_spaces();
		if self.cursor == self.chars.len() {
			return Err(ScanError::EndOfInput);
		}

		let (Some(&first), Some(&second)) =
			(self.chars.get(self.cursor), self.chars.get(self.cursor + 1))
		else {
			return Err(ScanError::OperatorExpected);
		};
		let operator = Operator::from_pair(first, second).ok_or(ScanError::OperatorExpected)?;
		self.cursor += 2;

		Ok(operator)
	}

	/// Next run of decimal digits, terminated by a space or the end of input.
	pub fn next_integer(&mut self) -> Result<u32, ScanError> {
		self.skip_spaces();
		if self.cursor == self.chars.len() {
			return Err(ScanError::EndOfInput);
		}

		let mut value: u32 = 0;
		while let Some(&c) = self.chars.get(self.cursor) {
			if c == ' ' {
				break;
			}
			let digit = c
				.is_ascii_digit()
				.then(|| c as u32 - '0' as u32)
				.ok_or(ScanError::DigitExpected)?;
			value = value
				.checked_mul(10)
				.and_then(|v| v.checked_add(digit))
				.ok_or(ScanError::IntegerOverflow)?;
			self.cursor += 1;
		}

		Ok(value)
	}

	/// Check that nothing but spaces is left.
	pub fn at_end(&mut self) -> Result<(), ScanError> {
		self.skip_spaces();
		if self.cursor < self.chars.len() {
			return Err(ScanError::UnexpectedData);
		}
		Ok(())
	}
}
