//! Splits merged lines into focused and unfocused token groups.

use codeshift_primitives::token::{line_width, slice_tokens};
use codeshift_primitives::{ColumnRange, FullTween, Side, Token};
use serde::Serialize;

use crate::annotations::InlineAnnotations;
use crate::differ::{LineMeta, MergedCode, MergedLine};
use crate::focus::Focus;

/// A contiguous slice of a line's tokens with one focus state per side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenGroup {
	pub tokens: Vec<Token>,
	/// Columns covered by the slice.
	pub columns: ColumnRange,
	pub focused: FullTween<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusedLine {
	#[serde(flatten)]
	pub meta: LineMeta,
	pub groups: Vec<TokenGroup>,
	/// Whether any part of the line is focused.
	pub focused: FullTween<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusedCode {
	pub lines: Vec<FocusedLine>,
	pub enter_count: usize,
	pub exit_count: usize,
	pub line_count: FullTween<usize>,
	pub first_focused_line_number: FullTween<usize>,
	pub last_focused_line_number: FullTween<usize>,
}

/// Splits every line of `merged` at focus and inline-annotation boundaries.
///
/// A line present on one side only uses that side's focus on both sides.
pub fn split_by_focus(merged: MergedCode, focus: &FullTween<Focus>, inline: &FullTween<InlineAnnotations>) -> FocusedCode {
	let line_count = FullTween::from_fn(|side| merged.line_count(side));
	let lines: Vec<FocusedLine> = merged.lines.into_iter().map(|line| split_line(line, focus, inline)).collect();

	let mut first_focused_line_number = FullTween::both(0);
	let mut last_focused_line_number = FullTween::both(0);
	for side in Side::BOTH {
		// Line numbers of one side ascend in merged order.
		let focused: Vec<usize> = lines
			.iter()
			.filter(|l| *l.focused.get(side))
			.filter_map(|l| l.meta.number(side))
			.collect();
		let (first, last) = match (focused.first(), focused.last()) {
			(Some(&first), Some(&last)) => (first, last),
			_ => {
				let count = *line_count.get(side);
				(count.min(1), count)
			}
		};
		*first_focused_line_number.get_mut(side) = first;
		*last_focused_line_number.get_mut(side) = last;
	}

	tracing::trace!(lines = lines.len(), "step.split");
	FocusedCode {
		lines,
		enter_count: merged.enter_count,
		exit_count: merged.exit_count,
		line_count,
		first_focused_line_number,
		last_focused_line_number,
	}
}

/// Side and line number whose focus applies to `meta` on `side`.
fn focus_source(meta: &LineMeta, side: Side) -> (Side, usize) {
	match meta.number(side) {
		Some(n) => (side, n),
		None => (side.other(), meta.number(side.other()).unwrap_or_default()),
	}
}

/// Zero-based offsets where a group must start or end.
#[derive(Default)]
struct Cuts {
	offsets: Vec<usize>,
}

impl Cuts {
	fn add(&mut self, range: &ColumnRange, width: usize) {
		let span = range.offsets();
		self.offsets.push(span.start.min(width));
		self.offsets.push(span.end.min(width));
	}

	fn segments(mut self, width: usize) -> Vec<(usize, usize)> {
		self.offsets.push(0);
		self.offsets.push(width);
		self.offsets.sort_unstable();
		self.offsets.dedup();
		self.offsets.windows(2).map(|w| (w[0], w[1])).collect()
	}
}

fn split_line(line: MergedLine, focus: &FullTween<Focus>, inline: &FullTween<InlineAnnotations>) -> FocusedLine {
	let MergedLine { meta, tokens } = line;
	let width = line_width(&tokens);
	let sources = FullTween::from_fn(|side| focus_source(&meta, side));

	let mut cuts = Cuts::default();
	for side in Side::BOTH {
		let (source, n) = *sources.get(side);
		for range in focus.get(source).columns(n) {
			cuts.add(range, width);
		}
		if let Some(n) = meta.number(side) {
			for annotation in inline.get(side).get(&n).into_iter().flatten() {
				cuts.add(&annotation.column_numbers, width);
			}
		}
	}

	// Covering annotation indices per side, so slices under different
	// annotations never merge.
	let covering = |side: Side, column: usize| -> Vec<usize> {
		meta.number(side)
			.and_then(|n| inline.get(side).get(&n))
			.map(|annotations| {
				annotations
					.iter()
					.enumerate()
					.filter(|(_, a)| a.column_numbers.contains(column))
					.map(|(idx, _)| idx)
					.collect()
			})
			.unwrap_or_default()
	};

	let mut groups: Vec<(TokenGroup, FullTween<Vec<usize>>)> = Vec::new();
	for (from, to) in cuts.segments(width) {
		let column = from + 1;
		let focused = FullTween::from_fn(|side| {
			let (source, n) = *sources.get(side);
			focus.get(source).is_column_focused(n, column)
		});
		let annotated = FullTween::from_fn(|side| covering(side, column));

		if let Some((last, last_annotated)) = groups.last_mut()
			&& last.focused == focused
			&& *last_annotated == annotated
		{
			last.tokens = slice_tokens(&tokens, last.columns.start - 1, to);
			last.columns = ColumnRange::new(last.columns.start, to);
			continue;
		}
		groups.push((
			TokenGroup {
				tokens: slice_tokens(&tokens, from, to),
				columns: ColumnRange::new(column, to),
				focused,
			},
			annotated,
		));
	}

	let focused = FullTween::from_fn(|side| {
		let (source, n) = *sources.get(side);
		focus.get(source).is_line_focused(n)
	});

	FocusedLine {
		meta,
		groups: groups.into_iter().map(|(group, _)| group).collect(),
		focused,
	}
}
