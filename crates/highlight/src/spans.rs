//! Span-based highlighter output to per-line tokens.
//!
//! Tree-sitter style highlighters report byte-range spans tagged with a
//! capture index. [`HighlightStyles`] resolves capture indices to styles up
//! front and [`lines_from_spans`] cuts the source into the per-line token
//! lists the engine consumes.

use codeshift_primitives::{HighlightedLine, Style, Token};

use crate::Theme;

/// Index of a highlight capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Highlight(u32);

impl Highlight {
	pub const fn new(idx: u32) -> Self {
		Self(idx)
	}

	#[inline]
	pub fn idx(self) -> usize {
		self.0 as usize
	}
}

/// Styles of a grammar's captures, in capture order.
///
/// Built once per theme so tokenizing never looks up scope names.
#[derive(Debug, Clone)]
pub struct HighlightStyles {
	styles: Vec<Style>,
}

impl HighlightStyles {
	/// Resolves `scopes` with `resolver`; the style of capture `i` is the
	/// resolved style of `scopes[i]`.
	pub fn new<F>(scopes: &[impl AsRef<str>], resolver: F) -> Self
	where
		F: Fn(&str) -> Style,
	{
		let styles = scopes.iter().map(|s| resolver(s.as_ref())).collect();
		Self { styles }
	}

	/// Resolves every scope through [`Theme::style_for_scope`].
	pub fn from_theme(scopes: &[impl AsRef<str>], theme: &Theme) -> Self {
		Self::new(scopes, |scope| theme.style_for_scope(scope))
	}

	pub fn len(&self) -> usize {
		self.styles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.styles.is_empty()
	}

	/// Style of `highlight`, or the default style for an unknown capture.
	#[inline]
	pub fn style_for_highlight(&self, highlight: Highlight) -> Style {
		self.styles.get(highlight.idx()).copied().unwrap_or_default()
	}
}

/// A span of text with a specific highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan {
	/// Start byte offset (inclusive).
	pub start: u32,
	/// End byte offset (exclusive).
	pub end: u32,
	/// The highlight to apply.
	pub highlight: Highlight,
}

impl HighlightSpan {
	/// Returns the byte range.
	pub fn range(&self) -> std::ops::Range<usize> {
		self.start as usize..self.end as usize
	}

	/// Returns true if the span is empty.
	pub fn is_empty(&self) -> bool {
		self.start >= self.end
	}
}

/// Builds per-line tokens from `source` and its highlight spans.
///
/// Text outside every span gets `base`. Spans must be sorted; a span that
/// overlaps the previous one, runs past the source, or splits a UTF-8
/// sequence is ignored. Adjacent pieces with the same style are joined.
pub fn lines_from_spans(source: &str, spans: &[HighlightSpan], styles: &HighlightStyles, base: Style) -> Vec<HighlightedLine> {
	let mut builder = LineBuilder::default();
	let mut cursor = 0;

	for span in spans {
		let range = span.range();
		if span.is_empty()
			|| range.start < cursor
			|| range.end > source.len()
			|| !source.is_char_boundary(range.start)
			|| !source.is_char_boundary(range.end)
		{
			continue;
		}
		builder.push(&source[cursor..range.start], base);
		builder.push(&source[range.clone()], base.patch(styles.style_for_highlight(span.highlight)));
		cursor = range.end;
	}
	builder.push(&source[cursor..], base);
	builder.finish()
}

#[derive(Default)]
struct LineBuilder {
	lines: Vec<HighlightedLine>,
	current: Vec<Token>,
	pending_line: bool,
}

impl LineBuilder {
	fn push(&mut self, text: &str, style: Style) {
		let mut pieces = text.split('\n').peekable();
		while let Some(piece) = pieces.next() {
			if !piece.is_empty() {
				self.pending_line = true;
				match self.current.last_mut() {
					Some(last) if last.style == style => last.content.push_str(piece),
					_ => self.current.push(Token::new(piece, style)),
				}
			}
			if pieces.peek().is_some() {
				self.lines.push(HighlightedLine::new(std::mem::take(&mut self.current)));
				self.pending_line = false;
			}
		}
	}

	fn finish(mut self) -> Vec<HighlightedLine> {
		if self.pending_line {
			self.lines.push(HighlightedLine::new(self.current));
		}
		self.lines
	}
}
