//! The tokenizer seam.

use codeshift_primitives::{BoxFutureSend, HighlightedLine};

use crate::Theme;
use crate::error::Result;

/// An external syntax highlighter.
///
/// Loading is asynchronous and happens at most once per (language, theme)
/// pair; tokenizing is synchronous and only called after a successful load.
pub trait Tokenizer: Send + Sync {
	/// Short identifier used in log events.
	fn name(&self) -> &str;

	/// Prepares grammars and theme data for `lang`.
	fn load<'a>(&'a self, lang: &'a str, theme: &'a Theme) -> BoxFutureSend<'a, Result<()>>;

	/// Splits `code` into styled lines.
	///
	/// `code` is normalized text ending with a single newline; the result has
	/// one entry per line, with no entry for the empty text after the final
	/// newline.
	fn tokenize(&self, code: &str, lang: &str, theme: &Theme) -> Result<Vec<HighlightedLine>>;
}

/// Emits one token per line in the theme's base style.
///
/// Used for placeholders while a real tokenizer warms up and as the fallback
/// when it fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTokenizer;

impl PlainTokenizer {
	/// Tokenizes without going through the fallible trait surface.
	pub fn lines(code: &str, theme: &Theme) -> Vec<HighlightedLine> {
		let style = theme.base_style();
		code.lines().map(|line| HighlightedLine::plain(line, style)).collect()
	}
}

impl Tokenizer for PlainTokenizer {
	fn name(&self) -> &str {
		"plain"
	}

	fn load<'a>(&'a self, _lang: &'a str, _theme: &'a Theme) -> BoxFutureSend<'a, Result<()>> {
		Box::pin(std::future::ready(Ok(())))
	}

	fn tokenize(&self, code: &str, _lang: &str, theme: &Theme) -> Result<Vec<HighlightedLine>> {
		Ok(Self::lines(code, theme))
	}
}

#[cfg(test)]
mod tests {
	use codeshift_primitives::{Color, Style};

	use super::*;

	#[test]
	fn plain_lines_use_base_style() {
		let mut theme = Theme::plain();
		theme.foreground = Color::White;
		let lines = PlainTokenizer.tokenize("fn main() {\n\n}\n", "rust", &theme).unwrap();
		assert_eq!(lines.len(), 3);
		assert_eq!(lines[0].tokens[0].style, Style::new().fg(Color::White));
		assert!(lines[1].tokens.is_empty());
		assert_eq!(lines[2].text(), "}");
	}

	#[test]
	fn single_newline_is_one_empty_line() {
		let lines = PlainTokenizer::lines("\n", &Theme::plain());
		assert_eq!(lines, vec![HighlightedLine::default()]);
	}
}
