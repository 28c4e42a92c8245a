use std::sync::Arc;

use codeshift_highlight::Theme;
use codeshift_primitives::{FullTween, HighlightedLine, Side, Style};

use super::FrameLine;
use crate::annotations::{CodeAnnotation, resolve_annotations};
use crate::differ::merge_lines;
use crate::focus::Focus;
use crate::geometry::{CodeStep, add_extra_stuff};
use crate::grouper::add_annotations;
use crate::splitter::split_by_focus;

fn step(prev: &[&str], next: &[&str], focus: [Option<&str>; 2]) -> CodeStep {
	let lines = |texts: &[&str]| -> Vec<HighlightedLine> {
		texts.iter().map(|t| HighlightedLine::plain(t, Style::default())).collect()
	};
	let merged = merge_lines(&lines(prev), &lines(next));
	let focus = FullTween::new(Focus::parse(focus[0]), Focus::parse(focus[1]));
	let focused = split_by_focus(merged, &focus, &FullTween::default());
	add_extra_stuff(add_annotations(focused, &FullTween::default()))
}

#[test]
fn first_half_draws_prev_side() {
	let step = step(&["a", "b"], &["a", "c"], [None, None]);
	assert_eq!(step.frame(0.0).side, Side::Prev);
	assert_eq!(step.frame(0.49).side, Side::Prev);
	assert_eq!(step.frame(0.5).side, Side::Next);
	assert_eq!(step.frame(2.0).progress, 1.0);
}

#[test]
fn exiting_line_fades_as_it_slides() {
	let step = step(&["a", "b"], &["a"], [None, None]);
	let start = step.frame(0.0);
	let exit = &start.groups[0].lines[1];
	assert_eq!(exit.text(), "b");
	assert_eq!(exit.dx, 0.0);
	assert!((exit.opacity - 0.99).abs() < 1e-9);

	let gone = step.frame(0.4);
	let exit = &gone.groups[0].lines[1];
	assert_eq!(exit.dx, -1.0);
	assert_eq!(exit.opacity, 0.0);
}

#[test]
fn focus_change_dims_between_sides() {
	let step = step(&["a", "b"], &["a", "b"], [Some("1"), Some("2")]);
	let start = step.frame(0.0);
	let opacities: Vec<_> = start.groups[0].lines.iter().map(|l| l.opacity).collect();
	assert!((opacities[0] - 0.99).abs() < 1e-9);
	assert!((opacities[1] - 0.33).abs() < 1e-9);

	let end = step.frame(1.0);
	let spans: Vec<_> = end.groups[0].lines.iter().map(|l| l.spans[0].opacity).collect();
	assert!((spans[0] - 0.33).abs() < 1e-9);
	assert!((spans[1] - 0.99).abs() < 1e-9);
}

#[test]
fn entering_line_arrives_at_its_row() {
	let step = step(&["a"], &["a", "b"], [None, None]);
	let end = step.frame(1.0);
	let enter = &end.groups[0].lines[1];
	assert_eq!((enter.dx, enter.dy), (0.0, 1.0));
	assert_eq!(enter.text(), "b");
}

#[test]
fn annotated_group_carries_box_geometry() {
	let lines = |texts: &[&str]| -> Vec<HighlightedLine> {
		texts.iter().map(|t| HighlightedLine::plain(t, Style::default())).collect()
	};
	let (prev, next) = (lines(&["a", "b", "c", "d"]), lines(&["x", "a", "b", "c", "d"]));
	let theme = Arc::new(Theme::plain());
	let annotations = FullTween::new(
		resolve_annotations(&[CodeAnnotation::new("2:3")], &prev, &theme),
		resolve_annotations(&[CodeAnnotation::new("3:4")], &next, &theme),
	);
	let merged = merge_lines(&prev, &next);
	let focused = split_by_focus(merged, &FullTween::default(), &FullTween::default());
	let step = add_extra_stuff(add_annotations(focused, &annotations));

	let boxed = |progress: f64| {
		let frame = step.frame(progress);
		let group = frame.groups.into_iter().find(|g| g.binding.is_some()).unwrap();
		(group.y, group.rows, group.lines.iter().map(FrameLine::text).collect::<Vec<_>>())
	};
	assert_eq!(boxed(0.0), (Some(1.0), Some(2), vec!["b".to_string(), "c".to_string()]));
	assert_eq!(boxed(1.0), (Some(2.0), Some(2), vec!["b".to_string(), "c".to_string()]));

	let plain = step.frame(1.0);
	assert!(plain.groups.iter().filter(|g| g.binding.is_none()).all(|g| g.y.is_none() && g.rows.is_none()));
}
