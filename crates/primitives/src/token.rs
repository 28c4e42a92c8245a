//! Highlighted tokens and grapheme-aware slicing.
//!
//! Columns throughout the engine count extended grapheme clusters, so a
//! combining sequence or an emoji occupies a single column.

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::Style;

/// A run of text sharing one style, as produced by a highlighter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
	pub content: String,
	pub style: Style,
}

impl Token {
	pub fn new(content: impl Into<String>, style: Style) -> Self {
		Self {
			content: content.into(),
			style,
		}
	}

	/// Width of the token in columns.
	pub fn width(&self) -> usize {
		self.content.graphemes(true).count()
	}
}

/// The tokens of one source line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
pub struct HighlightedLine {
	pub tokens: Vec<Token>,
}

impl HighlightedLine {
	pub fn new(tokens: Vec<Token>) -> Self {
		Self { tokens }
	}

	/// A line made of a single token (or no token for empty text).
	pub fn plain(text: &str, style: Style) -> Self {
		if text.is_empty() {
			return Self::default();
		}
		Self::new(vec![Token::new(text, style)])
	}

	/// Concatenated token text.
	pub fn text(&self) -> String {
		line_text(&self.tokens)
	}

	/// Width of the line in columns.
	pub fn width(&self) -> usize {
		line_width(&self.tokens)
	}
}

/// Concatenated text of a token slice.
pub fn line_text(tokens: &[Token]) -> String {
	tokens.iter().map(|t| t.content.as_str()).collect()
}

/// Total width in columns of a token slice.
pub fn line_width(tokens: &[Token]) -> usize {
	tokens.iter().map(Token::width).sum()
}

/// Returns the tokens covering the zero-based column span `[from, to)`.
///
/// Tokens crossing a boundary are cut at the grapheme boundary and keep
/// their style. Empty pieces are never emitted.
pub fn slice_tokens(tokens: &[Token], from: usize, to: usize) -> Vec<Token> {
	let mut out = Vec::new();
	if from >= to {
		return out;
	}

	let mut col = 0;
	for token in tokens {
		let width = token.width();
		let (start, end) = (col, col + width);
		col = end;

		if end <= from {
			continue;
		}
		if start >= to {
			break;
		}

		if start >= from && end <= to {
			out.push(token.clone());
			continue;
		}

		let skip = from.saturating_sub(start);
		let take = to.min(end) - start.max(from);
		let content: String = token.content.graphemes(true).skip(skip).take(take).collect();
		if !content.is_empty() {
			out.push(Token::new(content, token.style));
		}
	}
	out
}
