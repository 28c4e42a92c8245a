//! Per-line motion parameters and the final [`CodeStep`].
//!
//! Progress runs from 0 (prev) to 1 (next). Exiting lines slide out to the
//! left before the vertical reflow, entering lines slide in from the right
//! after it, and staying lines move between their two rows during it.

use codeshift_primitives::{FullTween, Side, TweenParams};
use serde::Serialize;

use crate::differ::{LineMeta, Movement};
use crate::grouper::{AnnotatedCode, AnnotatedLine, HasLineMeta, LineGroup};

/// Share of its window a single line's slide takes.
const SLIDE_SHARE: f64 = 0.75;

const FOCUSED_OPACITY: f64 = 0.99;
const UNFOCUSED_OPACITY: f64 = 0.33;

/// Progress window in which staying lines reflow vertically.
pub fn vertical_interval(enter_count: usize, exit_count: usize) -> [f64; 2] {
	match (enter_count > 0, exit_count > 0) {
		(false, false) => [0.0, 1.0],
		(false, true) => [0.33, 1.0],
		(true, false) => [0.0, 0.67],
		(true, true) => [0.25, 0.75],
	}
}

/// Opacity of a line or token group at `progress`, faded by horizontal offset `dx`.
pub fn opacity(focused: FullTween<bool>, progress: f64, dx: f64) -> f64 {
	let level = |on: bool| if on { FOCUSED_OPACITY } else { UNFOCUSED_OPACITY };
	let (from, to) = (level(focused.prev), level(focused.next));
	from + (to - from) * progress - dx.abs()
}

/// An annotated line with its renderer key and motion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineWithGeometry {
	#[serde(flatten)]
	pub line: AnnotatedLine,
	pub key: usize,
	/// Horizontal offset in line widths.
	pub tween_x: TweenParams,
	/// Row, 0-based.
	pub tween_y: TweenParams,
}

impl HasLineMeta for LineWithGeometry {
	fn meta(&self) -> &LineMeta {
		&self.line.meta
	}
}

/// Everything a renderer needs to draw a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStep {
	pub groups: FullTween<Vec<LineGroup<LineWithGeometry>>>,
	pub first_focused_line_number: FullTween<usize>,
	pub last_focused_line_number: FullTween<usize>,
	pub vertical_interval: [f64; 2],
	pub line_count: FullTween<usize>,
	pub enter_count: usize,
	pub exit_count: usize,
}

impl CodeStep {
	/// Lines of one side in order, across groups.
	pub fn lines(&self, side: Side) -> impl Iterator<Item = &LineWithGeometry> {
		self.groups.get(side).iter().flat_map(|g| g.lines.iter())
	}
}

/// Attaches keys and tweens to every line of `code`.
pub fn add_extra_stuff(code: AnnotatedCode) -> CodeStep {
	let AnnotatedCode {
		line_groups,
		enter_count,
		exit_count,
		line_count,
		first_focused_line_number,
		last_focused_line_number,
	} = code;
	let interval = vertical_interval(enter_count, exit_count);
	let motion = Motion {
		interval,
		enter_count,
		exit_count,
	};

	let groups = line_groups.map(|groups| {
		groups
			.into_iter()
			.map(|group| LineGroup {
				annotation: group.annotation,
				lines: group.lines.into_iter().map(|line| motion.place(line)).collect(),
			})
			.collect()
	});

	CodeStep {
		groups,
		first_focused_line_number,
		last_focused_line_number,
		vertical_interval: interval,
		line_count,
		enter_count,
		exit_count,
	}
}

struct Motion {
	interval: [f64; 2],
	enter_count: usize,
	exit_count: usize,
}

impl Motion {
	fn place(&self, line: AnnotatedLine) -> LineWithGeometry {
		let meta = line.meta;
		LineWithGeometry {
			key: meta.index,
			tween_x: self.tween_x(&meta),
			tween_y: self.tween_y(&meta),
			line,
		}
	}

	fn tween_y(&self, meta: &LineMeta) -> TweenParams {
		let row = |n: Option<usize>| n.unwrap_or(1).saturating_sub(1) as f64;
		match meta.movement {
			Movement::Stay => TweenParams::between(row(meta.line_number.prev), row(meta.line_number.next), self.interval),
			Movement::Exit => TweenParams::fixed(row(meta.line_number.prev)),
			Movement::Enter => TweenParams::fixed(row(meta.line_number.next)),
		}
	}

	fn tween_x(&self, meta: &LineMeta) -> TweenParams {
		let [v0, v1] = self.interval;
		match meta.movement {
			Movement::Stay => TweenParams::fixed(0.0),
			Movement::Exit => TweenParams::between(
				0.0,
				-1.0,
				stagger([0.0, v0], meta.exit_index.unwrap_or_default(), self.exit_count),
			),
			Movement::Enter => TweenParams::between(
				1.0,
				0.0,
				stagger([v1, 1.0], meta.enter_index.unwrap_or_default(), self.enter_count),
			),
		}
	}
}

/// Sub-window of `window` for the `index`-th of `count` staggered lines.
fn stagger([start, end]: [f64; 2], index: usize, count: usize) -> [f64; 2] {
	let span = end - start;
	let slide = span * SLIDE_SHARE;
	let offset = if count > 1 {
		(span - slide) * index as f64 / (count - 1) as f64
	} else {
		0.0
	};
	[start + offset, start + offset + slide]
}
