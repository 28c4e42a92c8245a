//! Focus expressions.
//!
//! A focus expression selects lines, and optionally columns within a line,
//! that stay bright while everything else is dimmed:
//!
//! * `3` - line 3
//! * `2:5` - lines 2 through 5
//! * `4[3:9]` - columns 3 through 9 of line 4
//! * `4[1,5:7]` - column 1 and columns 5 through 7 of line 4
//!
//! Parts are comma separated and may be mixed: `1,3:4,7[2:5]`. Numbers are
//! 1-based and ranges inclusive.

use std::collections::BTreeMap;

use codeshift_primitives::{ColumnRange, LineRange};

use crate::error::FocusError;

/// What part of a line is focused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineFocus<'a> {
	/// The whole line.
	Whole,
	/// Only these columns, in the order written.
	Columns(&'a [ColumnRange]),
}

impl<'a> LineFocus<'a> {
	/// Returns true if `column` (1-based) is focused.
	pub fn contains_column(self, column: usize) -> bool {
		match self {
			LineFocus::Whole => true,
			LineFocus::Columns(ranges) => ranges.iter().any(|r| r.contains(column)),
		}
	}

	/// Column ranges, empty for a whole line.
	pub fn columns(self) -> &'a [ColumnRange] {
		match self {
			LineFocus::Whole => &[],
			LineFocus::Columns(ranges) => ranges,
		}
	}
}

/// Parsed focus expression.
///
/// Line ranges are kept as written and answered by containment, so the cost
/// of a query does not depend on how many lines a range spans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FocusMap {
	wholes: Vec<LineRange>,
	columns: BTreeMap<usize, Vec<ColumnRange>>,
}

impl FocusMap {
	/// Focus for line `n`, if any. A whole-line mention wins over columns.
	pub fn line(&self, n: usize) -> Option<LineFocus<'_>> {
		if self.wholes.iter().any(|r| r.contains(n)) {
			return Some(LineFocus::Whole);
		}
		self.columns.get(&n).map(|c| LineFocus::Columns(c.as_slice()))
	}

	pub fn is_empty(&self) -> bool {
		self.wholes.is_empty() && self.columns.is_empty()
	}

	/// Smallest and largest focused line number.
	pub fn bounds(&self) -> Option<(usize, usize)> {
		let starts = self.wholes.iter().map(|r| r.start).chain(self.columns.keys().next().copied());
		let ends = self.wholes.iter().map(|r| r.end).chain(self.columns.keys().next_back().copied());
		Some((starts.min()?, ends.max()?))
	}
}

/// Focus for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Focus {
	/// No focus expression: every line and column is focused.
	#[default]
	All,
	/// Only the listed lines (and columns) are focused.
	Lines(FocusMap),
}

impl Focus {
	/// Lenient parse: absent, blank, or malformed input focuses everything.
	pub fn parse(expr: Option<&str>) -> Focus {
		let Some(expr) = expr.filter(|e| !e.trim().is_empty()) else {
			return Focus::All;
		};
		match parse_focus(expr) {
			Ok(map) => Focus::Lines(map),
			Err(error) => {
				tracing::debug!(expr, %error, "malformed focus expression; focusing everything");
				Focus::All
			}
		}
	}

	pub fn is_all(&self) -> bool {
		matches!(self, Focus::All)
	}

	/// Returns true if any part of line `n` is focused.
	pub fn is_line_focused(&self, n: usize) -> bool {
		match self {
			Focus::All => true,
			Focus::Lines(map) => map.line(n).is_some(),
		}
	}

	/// Returns true if column `column` of line `n` is focused.
	pub fn is_column_focused(&self, n: usize, column: usize) -> bool {
		match self {
			Focus::All => true,
			Focus::Lines(map) => map.line(n).is_some_and(|f| f.contains_column(column)),
		}
	}

	/// Column ranges of line `n` (empty when the line is whole or unfocused).
	pub fn columns(&self, n: usize) -> &[ColumnRange] {
		match self {
			Focus::All => &[],
			Focus::Lines(map) => map.line(n).map(LineFocus::columns).unwrap_or_default(),
		}
	}
}

/// Strict parse of a focus expression.
pub fn parse_focus(expr: &str) -> Result<FocusMap, FocusError> {
	let mut map = FocusMap::default();
	for part in split_top_level(expr)? {
		let part = part.trim();
		if part.is_empty() {
			return Err(FocusError::Empty);
		}
		match part.split_once('[') {
			Some((line, rest)) => {
				let inner = rest.strip_suffix(']').ok_or_else(|| FocusError::Unbalanced(part.to_string()))?;
				let line = parse_position(line)?;
				let mut columns = Vec::new();
				for col in inner.split(',') {
					let (start, end) = parse_span(col)?;
					columns.push(ColumnRange::new(start, end));
				}
				map.columns.entry(line).or_default().extend(columns);
			}
			None => {
				let (start, end) = parse_span(part)?;
				map.wholes.push(LineRange::new(start, end));
			}
		}
	}
	Ok(map)
}

/// Splits on commas that are not inside brackets.
fn split_top_level(expr: &str) -> Result<Vec<&str>, FocusError> {
	let mut parts = Vec::new();
	let mut depth = 0usize;
	let mut start = 0;
	for (idx, ch) in expr.char_indices() {
		match ch {
			'[' => depth += 1,
			']' => depth = depth.checked_sub(1).ok_or_else(|| FocusError::Unbalanced(expr.to_string()))?,
			',' if depth == 0 => {
				parts.push(&expr[start..idx]);
				start = idx + 1;
			}
			_ => {}
		}
	}
	if depth != 0 {
		return Err(FocusError::Unbalanced(expr.to_string()));
	}
	parts.push(&expr[start..]);
	Ok(parts)
}

/// Parses `n` or `a:b`.
fn parse_span(s: &str) -> Result<(usize, usize), FocusError> {
	match s.split_once(':') {
		Some((a, b)) => {
			let (start, end) = (parse_position(a)?, parse_position(b)?);
			if start > end {
				return Err(FocusError::ReversedRange { start, end });
			}
			Ok((start, end))
		}
		None => {
			let n = parse_position(s)?;
			Ok((n, n))
		}
	}
}

fn parse_position(s: &str) -> Result<usize, FocusError> {
	let s = s.trim();
	if s.is_empty() {
		return Err(FocusError::Empty);
	}
	let n: usize = s.parse().map_err(|_| FocusError::InvalidNumber(s.to_string()))?;
	if n == 0 {
		return Err(FocusError::ZeroPosition(s.to_string()));
	}
	Ok(n)
}

#[cfg(test)]
mod tests;
