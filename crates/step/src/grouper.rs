//! Groups token slices under inline annotations and lines under
//! multi-line annotations.

use codeshift_primitives::{FullTween, Side};
use serde::Serialize;

use crate::annotations::{InlineAnnotation, InlineAnnotations, MultiLineAnnotation, ResolvedAnnotations};
use crate::differ::{LineMeta, MergedLine};
use crate::splitter::{FocusedCode, FocusedLine, TokenGroup};

/// Anything carrying a merged line's position.
pub trait HasLineMeta {
	fn meta(&self) -> &LineMeta;
}

impl HasLineMeta for MergedLine {
	fn meta(&self) -> &LineMeta {
		&self.meta
	}
}

impl HasLineMeta for FocusedLine {
	fn meta(&self) -> &LineMeta {
		&self.meta
	}
}

impl HasLineMeta for AnnotatedLine {
	fn meta(&self) -> &LineMeta {
		&self.meta
	}
}

/// Consecutive token groups under the same inline annotation (or none).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedTokenGroups {
	pub groups: Vec<TokenGroup>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub annotation: Option<InlineAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedLine {
	#[serde(flatten)]
	pub meta: LineMeta,
	pub focused: FullTween<bool>,
	pub annotated_groups: FullTween<Vec<AnnotatedTokenGroups>>,
}

/// A run of consecutive lines, optionally under one multi-line annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineGroup<L> {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub annotation: Option<MultiLineAnnotation>,
	pub lines: Vec<L>,
}

/// Clusters each line's token groups by covering inline annotation.
///
/// A slice covered by several annotations belongs to the first declared.
/// On a side where the line does not exist, the other side's clusters are
/// mirrored without annotations.
pub fn annotate_inline(lines: Vec<FocusedLine>, inline: &FullTween<InlineAnnotations>) -> Vec<AnnotatedLine> {
	let inline = FullTween::new(&inline.prev, &inline.next);
	lines.into_iter().map(|line| annotate_line(line, inline)).collect()
}

fn annotate_line(line: FocusedLine, inline: FullTween<&InlineAnnotations>) -> AnnotatedLine {
	let FocusedLine { meta, groups, focused } = line;
	let mut clusters: FullTween<Option<Vec<AnnotatedTokenGroups>>> = FullTween::default();

	for side in Side::BOTH {
		let Some(n) = meta.number(side) else {
			continue;
		};
		let annotations = inline.get(side).get(&n).map(Vec::as_slice).unwrap_or_default();
		*clusters.get_mut(side) = Some(cluster(&groups, annotations));
	}

	let annotated_groups = FullTween::from_fn(|side| match (clusters.get(side), clusters.get(side.other())) {
		(Some(own), _) => own.clone(),
		(None, Some(other)) => other
			.iter()
			.map(|c| AnnotatedTokenGroups {
				groups: c.groups.clone(),
				annotation: None,
			})
			.collect(),
		(None, None) => Vec::new(),
	});

	AnnotatedLine {
		meta,
		focused,
		annotated_groups,
	}
}

fn cluster(groups: &[TokenGroup], annotations: &[InlineAnnotation]) -> Vec<AnnotatedTokenGroups> {
	let mut clusters: Vec<(Option<usize>, AnnotatedTokenGroups)> = Vec::new();
	for group in groups {
		let owner = annotations.iter().position(|a| a.column_numbers.contains(group.columns.start));
		match clusters.last_mut() {
			Some((last_owner, cluster)) if *last_owner == owner => cluster.groups.push(group.clone()),
			_ => clusters.push((
				owner,
				AnnotatedTokenGroups {
					groups: vec![group.clone()],
					annotation: owner.map(|idx| annotations[idx].clone()),
				},
			)),
		}
	}
	clusters.into_iter().map(|(_, cluster)| cluster).collect()
}

/// Partitions `lines` into runs for one side.
///
/// An annotation opens at the line numbered with its start on `side` and
/// closes after the line numbered with its end. Lines missing on `side`
/// inside that span stay with the annotation. `annotations` must be
/// non-overlapping and ordered by start.
pub fn annotate_multiline<L: HasLineMeta + Clone>(
	lines: &[L],
	annotations: &[MultiLineAnnotation],
	side: Side,
) -> Vec<LineGroup<L>> {
	let mut groups = Vec::new();
	let mut pending = annotations.iter().peekable();
	let mut current = LineGroup {
		annotation: None,
		lines: Vec::new(),
	};

	for line in lines {
		let number = line.meta().number(side);

		if let Some(n) = number {
			while pending.next_if(|a| a.line_numbers.end < n).is_some() {}
			if let Some(annotation) = pending.next_if(|a| a.line_numbers.start == n) {
				flush(&mut groups, &mut current);
				current.annotation = Some(annotation.clone());
			}
		}

		current.lines.push(line.clone());

		let closes = match (&current.annotation, number) {
			(Some(annotation), Some(n)) => n >= annotation.line_numbers.end,
			_ => false,
		};
		if closes {
			flush(&mut groups, &mut current);
		}
	}
	flush(&mut groups, &mut current);
	groups
}

fn flush<L>(groups: &mut Vec<LineGroup<L>>, current: &mut LineGroup<L>) {
	let group = std::mem::replace(
		current,
		LineGroup {
			annotation: None,
			lines: Vec::new(),
		},
	);
	if !group.lines.is_empty() {
		groups.push(group);
	}
}

/// Focused code with both annotation kinds applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotatedCode {
	pub line_groups: FullTween<Vec<LineGroup<AnnotatedLine>>>,
	pub enter_count: usize,
	pub exit_count: usize,
	pub line_count: FullTween<usize>,
	pub first_focused_line_number: FullTween<usize>,
	pub last_focused_line_number: FullTween<usize>,
}

/// Applies inline then multi-line annotations to `focused`.
pub fn add_annotations(focused: FocusedCode, annotations: &FullTween<ResolvedAnnotations>) -> AnnotatedCode {
	let FocusedCode {
		lines,
		enter_count,
		exit_count,
		line_count,
		first_focused_line_number,
		last_focused_line_number,
	} = focused;

	let inline = FullTween::new(&annotations.prev.inline, &annotations.next.inline);
	let lines = lines.into_iter().map(|line| annotate_line(line, inline)).collect::<Vec<_>>();
	let line_groups = FullTween::from_fn(|side| annotate_multiline(&lines, &annotations.get(side).multiline, side));

	tracing::trace!(
		prev_groups = line_groups.prev.len(),
		next_groups = line_groups.next.len(),
		"step.group"
	);
	AnnotatedCode {
		line_groups,
		enter_count,
		exit_count,
		line_count,
		first_focused_line_number,
		last_focused_line_number,
	}
}
