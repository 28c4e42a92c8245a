//! Text canonicalization before tokenizing.

use std::num::NonZeroUsize;

use unicode_segmentation::UnicodeSegmentation;

/// Canonicalizes one snapshot's text.
///
/// Absent text counts as empty. CRLF becomes LF, trailing whitespace of the
/// whole text is dropped, and exactly one newline is appended. With a tab
/// width, tabs are expanded to the next tab stop, counting columns in grapheme
/// clusters.
pub fn normalize(text: Option<&str>, tab_width: Option<NonZeroUsize>) -> String {
	let text = text.unwrap_or_default().replace("\r\n", "\n");
	let mut out = match tab_width {
		Some(width) => expand_tabs(text.trim_end(), width.get()),
		None => text.trim_end().to_string(),
	};
	out.push('\n');
	out
}

fn expand_tabs(text: &str, width: usize) -> String {
	let mut out = String::with_capacity(text.len());
	let mut column = 0;
	for grapheme in text.graphemes(true) {
		match grapheme {
			"\t" => {
				let pad = width - column % width;
				out.extend(std::iter::repeat_n(' ', pad));
				column += pad;
			}
			"\n" => {
				out.push('\n');
				column = 0;
			}
			_ => {
				out.push_str(grapheme);
				column += 1;
			}
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn trims_and_terminates() {
		assert_eq!(normalize(Some("a\nb  \n\n\n"), None), "a\nb\n");
		assert_eq!(normalize(Some("  a"), None), "  a\n");
	}

	#[test]
	fn absent_text_is_one_empty_line() {
		assert_eq!(normalize(None, None), "\n");
		assert_eq!(normalize(Some(" \n\t"), None), "\n");
	}

	#[test]
	fn crlf_becomes_lf() {
		assert_eq!(normalize(Some("a\r\nb\r\n"), None), "a\nb\n");
	}

	#[test]
	fn tabs_expand_to_stops() {
		let width = NonZeroUsize::new(4);
		assert_eq!(normalize(Some("\tx\nab\ty"), width), "    x\nab  y\n");
	}

	#[test]
	fn tab_stops_count_graphemes() {
		let width = NonZeroUsize::new(4);
		assert_eq!(normalize(Some("e\u{301}\tx"), width), "e\u{301}   x\n");
		assert_eq!(normalize(Some("\u{1f469}\u{200d}\u{1f52c}ab\tc"), width), "\u{1f469}\u{200d}\u{1f52c}ab c\n");
	}

	#[test]
	fn tabs_are_kept_without_width() {
		assert_eq!(normalize(Some("\tx"), None), "\tx\n");
	}
}
