//! Positioned diagnostics over rule text.
//!
//! A [`Diagnostic`] only records where the problem is. Turning it into something a human can
//! look at is the job of a [`Renderer`]: [`AnsiRenderer`] for terminals, [`PlainRenderer`] for
//! logs and tests.

use owo_colors::OwoColorize;

/// Marker appended after the text to show that something is missing.
const FILLER_MARK: char = '?';

/// A span of the original rule text to point at, plus an optional run of filler marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
	source: String,
	start: usize,
	len: usize,
	filler: usize,
}

/// How a rendered piece of the diagnostic should look.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
	/// Printable text outside of the span.
	Text,
	/// Escaped control character outside of the span.
	Control,
	/// Printable text inside the span.
	Marked,
	/// Escaped control character inside the span.
	MarkedControl,
	/// Space between the text and the filler marks.
	Separator,
	/// Placeholder marks for missing input.
	Filler,
}

impl SegmentKind {
	/// Whether this piece points at the problem.
	pub fn is_marked(&self) -> bool {
		matches!(
			self,
			SegmentKind::Marked | SegmentKind::MarkedControl | SegmentKind::Filler
		)
	}
}

/// A run of rendered characters sharing one [`SegmentKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
	pub kind: SegmentKind,
	pub text: String,
}

impl Diagnostic {
	/// Point at `len` characters starting at char offset `start` of `source`, then append
	/// `filler` placeholder marks.
	pub fn new(source: String, start: usize, len: usize, filler: usize) -> Self {
		Diagnostic {
			source,
			start,
			len,
			filler,
		}
	}

	/// The full original rule text.
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Char offset where the span starts.
	pub fn start(&self) -> usize {
		self.start
	}

	/// Length of the span in chars.
	pub fn len(&self) -> usize {
		self.len
	}

	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Number of filler marks after the text.
	pub fn filler(&self) -> usize {
		self.filler
	}

	/// Split the escaped source text into styled segments.
	pub fn segments(&self) -> Vec<Segment> {
		let mut segments: Vec<Segment> = Vec::new();
		let end = self.start.saturating_add(self.len);

		for (i, c) in self.source.chars().enumerate() {
			let in_span = self.start <= i && i < end;
			let (text, kind) = match escape_control(c) {
				Some(escaped) if in_span => (escaped, SegmentKind::MarkedControl),
				Some(escaped) => (escaped, SegmentKind::Control),
				None if in_span => (c.to_string(), SegmentKind::Marked),
				None => (c.to_string(), SegmentKind::Text),
			};
			push_segment(&mut segments, kind, &text);
		}

		if self.filler > 0 {
			if !self.source.ends_with([' ', '\t']) {
				push_segment(&mut segments, SegmentKind::Separator, " ");
			}
			let marks: String = std::iter::repeat_n(FILLER_MARK, self.filler).collect();
			push_segment(&mut segments, SegmentKind::Filler, &marks);
		}

		segments
	}
}

fn push_segment(segments: &mut Vec<Segment>, kind: SegmentKind, text: &str) {
	match segments.last_mut() {
		Some(last) if last.kind == kind => last.text.push_str(text),
		_ => segments.push(Segment {
			kind,
			text: text.to_string(),
		}),
	}
}

/// Two-character mnemonic or numeric escape for control characters.
fn escape_control(c: char) -> Option<String> {
	match c {
		'\t' => Some("\\t".to_string()),
		'\r' => Some("\\r".to_string()),
		'\n' => Some("\\n".to_string()),
		c if c < ' ' => Some(format!("\\{}", c as u32)),
		_ => None,
	}
}

/// Presentation strategy for diagnostics.
pub trait Renderer {
	fn render(&self, diagnostic: &Diagnostic) -> String;
}

/// Terminal rendering: the text in bold, the span and filler marks in red.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiRenderer;

impl Renderer for AnsiRenderer {
	fn render(&self, diagnostic: &Diagnostic) -> String {
		let mut out = String::new();
		for segment in diagnostic.segments() {
			let text = segment.text.as_str();
			let styled = match segment.kind {
				SegmentKind::Text => text.bold().to_string(),
				SegmentKind::Control | SegmentKind::Separator => text.to_string(),
				SegmentKind::Marked => text.red().bold().to_string(),
				SegmentKind::MarkedControl | SegmentKind::Filler => text.red().to_string(),
			};
			out.push_str(&styled);
		}
		out
	}
}

/// Plain text rendering: the escaped text with a caret line underneath.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
	fn render(&self, diagnostic: &Diagnostic) -> String {
		let mut text = String::new();
		let mut carets = String::new();
		for segment in diagnostic.segments() {
			let mark = if segment.kind.is_marked() { '^' } else { ' ' };
			carets.extend(std::iter::repeat_n(mark, segment.text.chars().count()));
			text.push_str(&segment.text);
		}

		let carets = carets.trim_end();
		if carets.is_empty() {
			text
		} else {
			format!("{text}\n{carets}")
		}
	}
}
