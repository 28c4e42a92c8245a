//! Sampling a [`CodeStep`] at one progress value.

use codeshift_primitives::token::line_text;
use codeshift_primitives::{Side, tween};
use serde::Serialize;

use crate::geometry::{CodeStep, LineWithGeometry, opacity};

/// One drawable state of a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
	pub progress: f64,
	/// Side whose groups are drawn.
	pub side: Side,
	pub groups: Vec<FrameGroup>,
}

/// Lines drawn together, boxed when annotated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameGroup {
	/// Renderer binding of the multi-line annotation, if any.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub binding: Option<String>,
	/// Top of the annotation box: the vertical position of its first line.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub y: Option<f64>,
	/// Height of the annotation box in rows.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub rows: Option<usize>,
	pub lines: Vec<FrameLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameLine {
	pub key: usize,
	pub dx: f64,
	pub dy: f64,
	pub opacity: f64,
	pub spans: Vec<FrameSpan>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSpan {
	pub text: String,
	pub opacity: f64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub binding: Option<String>,
}

impl FrameLine {
	/// Visible text of the line.
	pub fn text(&self) -> String {
		self.spans.iter().map(|s| s.text.as_str()).collect()
	}
}

impl CodeStep {
	/// Evaluates every tween at `progress` (clamped to `[0, 1]`).
	///
	/// The prev side is drawn for the first half, the next side after.
	pub fn frame(&self, progress: f64) -> Frame {
		let progress = progress.clamp(0.0, 1.0);
		let side = if progress < 0.5 { Side::Prev } else { Side::Next };
		let groups = self
			.groups
			.get(side)
			.iter()
			.map(|group| {
				let annotation = group.annotation.as_ref();
				FrameGroup {
					binding: annotation.map(|a| a.binding.clone()),
					y: annotation
						.and(group.lines.first())
						.map(|line| tween(&line.tween_y, progress)),
					rows: annotation.map(|a| a.line_numbers.len()),
					lines: group.lines.iter().map(|line| sample_line(line, side, progress)).collect(),
				}
			})
			.collect();
		Frame { progress, side, groups }
	}
}

fn sample_line(line: &LineWithGeometry, side: Side, progress: f64) -> FrameLine {
	let dx = tween(&line.tween_x, progress);
	let dy = tween(&line.tween_y, progress);
	let spans = line
		.line
		.annotated_groups
		.get(side)
		.iter()
		.flat_map(|cluster| {
			let binding = cluster.annotation.as_ref().map(|a| a.binding.clone());
			cluster.groups.iter().map(move |group| FrameSpan {
				text: line_text(&group.tokens),
				opacity: opacity(group.focused, progress, dx).max(0.0),
				binding: binding.clone(),
			})
		})
		.collect();

	FrameLine {
		key: line.key,
		dx,
		dy,
		opacity: opacity(line.line.focused, progress, dx).max(0.0),
		spans,
	}
}

#[cfg(test)]
mod tests;
