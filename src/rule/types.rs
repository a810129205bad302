use std::fmt;

/// Rule operators, always exactly two characters wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
	/// `=>`: replace a path prefix.
	Prefix,

	/// `++`: bump the major version suffix by one.
	VersionIncrement,

	/// `+=`: bump the major version suffix by an explicit amount.
	VersionAdd,

	/// `//`: regexp match with a substitution template.
	Regexp,
}

impl Operator {
	/// All operators, in the order they are listed in diagnostics.
	pub const ALL: [Operator; 4] = [
		Operator::Prefix,
		Operator::VersionIncrement,
		Operator::VersionAdd,
		Operator::Regexp,
	];

	/// Get the textual form of the operator.
	pub fn as_str(&self) -> &'static str {
		match self {
			Operator::Prefix => "=>",
			Operator::VersionIncrement => "++",
			Operator::VersionAdd => "+=",
			Operator::Regexp => "//",
		}
	}

	/// Recognize an operator from its two characters.
	pub fn from_pair(first: char, second: char) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|op| op.as_str().chars().eq([first, second]))
	}
}

impl fmt::Display for Operator {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A parsed rewriting rule.
///
/// Operands are kept as surface text: regexps are compiled and version suffixes are checked
/// only when the rule is turned into a matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
	/// `from => to`
	Prefix { from: String, to: String },

	/// `import ++` (jump of 1) or `import += N`
	VersionJump { import: String, jump: u32 },

	/// `from // to`, where `to` may reference capture groups as `$1`, `$2`, ...
	Regexp { from: String, to: String },
}

impl Rule {
	/// The operator this rule is written with.
	pub fn operator(&self) -> Operator {
		match self {
			Rule::Prefix { .. } => Operator::Prefix,
			Rule::VersionJump { jump: 1, .. } => Operator::VersionIncrement,
			Rule::VersionJump { .. } => Operator::VersionAdd,
			Rule::Regexp { .. } => Operator::Regexp,
		}
	}
}

/// Writes the rule back in rule syntax, escaping spaces inside operands.
impl fmt::Display for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Rule::Prefix { from, to } | Rule::Regexp { from, to } => {
				write!(
					f,
					"{} {} {}",
					escape_spaces(from),
					self.operator(),
					escape_spaces(to)
				)
			}
			Rule::VersionJump { import, jump: 1 } => write!(f, "{} ++", escape_spaces(import)),
			Rule::VersionJump { import, jump } => {
				write!(f, "{} += {}", escape_spaces(import), jump)
			}
		}
	}
}

fn escape_spaces(operand: &str) -> String {
	operand.replace(' ', "\\ ")
}
