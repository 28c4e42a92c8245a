//! Line merger: aligns prev and next lines into one merged sequence.

use codeshift_primitives::{HighlightedLine, Side, Token, Tween};
use serde::Serialize;
use similar::{Algorithm, DiffOp, capture_diff_slices};

/// How a merged line relates to the other snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Movement {
	/// Only in next.
	Enter,
	/// Only in prev.
	Exit,
	/// In both.
	Stay,
}

/// Position data every later stage carries along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineMeta {
	/// Position in the merged sequence; stable key on both sides.
	pub index: usize,
	/// 1-based line number in each snapshot that has the line.
	pub line_number: Tween<usize>,
	#[serde(rename = "move")]
	pub movement: Movement,
	/// Ordinal among entering lines.
	pub enter_index: Option<usize>,
	/// Ordinal among exiting lines.
	pub exit_index: Option<usize>,
}

impl LineMeta {
	/// Line number on `side`, if the line exists there.
	pub fn number(&self, side: Side) -> Option<usize> {
		self.line_number.at(side)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergedLine {
	#[serde(flatten)]
	pub meta: LineMeta,
	pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergedCode {
	pub lines: Vec<MergedLine>,
	pub enter_count: usize,
	pub exit_count: usize,
}

impl MergedCode {
	/// Number of lines that exist on `side`.
	pub fn line_count(&self, side: Side) -> usize {
		self.lines.iter().filter(|l| l.meta.number(side).is_some()).count()
	}

	pub fn stay_count(&self) -> usize {
		self.lines.len() - self.enter_count - self.exit_count
	}
}

/// Aligns two line sequences by exact line text.
///
/// Matched lines stay, prev-only lines exit, next-only lines enter. In a
/// replaced hunk the exiting lines come before the entering ones. Staying
/// lines keep the next snapshot's tokens.
pub fn merge_lines(prev: &[HighlightedLine], next: &[HighlightedLine]) -> MergedCode {
	let prev_keys: Vec<String> = prev.iter().map(HighlightedLine::text).collect();
	let next_keys: Vec<String> = next.iter().map(HighlightedLine::text).collect();
	let ops = capture_diff_slices(Algorithm::Myers, &prev_keys, &next_keys);

	let mut builder = MergeBuilder::default();
	for op in ops {
		match op {
			DiffOp::Equal {
				old_index,
				new_index,
				len,
			} => {
				for i in 0..len {
					builder.stay(old_index + i, new_index + i, &next[new_index + i]);
				}
			}
			DiffOp::Delete { old_index, old_len, .. } => {
				for i in old_index..old_index + old_len {
					builder.exit(i, &prev[i]);
				}
			}
			DiffOp::Insert { new_index, new_len, .. } => {
				for i in new_index..new_index + new_len {
					builder.enter(i, &next[i]);
				}
			}
			DiffOp::Replace {
				old_index,
				old_len,
				new_index,
				new_len,
			} => {
				for i in old_index..old_index + old_len {
					builder.exit(i, &prev[i]);
				}
				for i in new_index..new_index + new_len {
					builder.enter(i, &next[i]);
				}
			}
		}
	}

	let merged = builder.finish();
	debug_assert_eq!(merged.line_count(Side::Prev), prev.len(), "every prev line must be merged once");
	debug_assert_eq!(merged.line_count(Side::Next), next.len(), "every next line must be merged once");
	tracing::trace!(
		lines = merged.lines.len(),
		enter = merged.enter_count,
		exit = merged.exit_count,
		"step.merge"
	);
	merged
}

#[derive(Default)]
struct MergeBuilder {
	lines: Vec<MergedLine>,
	enter_count: usize,
	exit_count: usize,
}

impl MergeBuilder {
	fn push(&mut self, line_number: Tween<usize>, movement: Movement, tokens: &[Token]) {
		debug_assert!(
			line_number.prev.is_some() || line_number.next.is_some(),
			"merged line without a line number"
		);
		let (enter_index, exit_index) = match movement {
			Movement::Enter => {
				self.enter_count += 1;
				(Some(self.enter_count - 1), None)
			}
			Movement::Exit => {
				self.exit_count += 1;
				(None, Some(self.exit_count - 1))
			}
			Movement::Stay => (None, None),
		};
		self.lines.push(MergedLine {
			meta: LineMeta {
				index: self.lines.len(),
				line_number,
				movement,
				enter_index,
				exit_index,
			},
			tokens: tokens.to_vec(),
		});
	}

	fn stay(&mut self, prev_idx: usize, next_idx: usize, line: &HighlightedLine) {
		self.push(Tween::new(Some(prev_idx + 1), Some(next_idx + 1)), Movement::Stay, &line.tokens);
	}

	fn exit(&mut self, prev_idx: usize, line: &HighlightedLine) {
		self.push(Tween::new(Some(prev_idx + 1), None), Movement::Exit, &line.tokens);
	}

	fn enter(&mut self, next_idx: usize, line: &HighlightedLine) {
		self.push(Tween::new(None, Some(next_idx + 1)), Movement::Enter, &line.tokens);
	}

	fn finish(self) -> MergedCode {
		MergedCode {
			lines: self.lines,
			enter_count: self.enter_count,
			exit_count: self.exit_count,
		}
	}
}
