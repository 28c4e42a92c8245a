//! End-to-end transitions through the step engine.

use std::sync::Arc;

use codeshift_highlight::Theme;
use codeshift_primitives::{FullTween, Side, TweenParams};
use codeshift_step::{CodeAnnotation, CodeStep, Movement, StepInput, StepParser};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

async fn run(input: &StepInput) -> CodeStep {
	StepParser::default().step_when_ready(input).await
}

fn code(prev: &str, next: &str) -> StepInput {
	StepInput::new("text", Arc::new(Theme::plain())).with_code(Some(prev), Some(next))
}

#[tokio::test]
async fn replaced_middle_line() {
	let step = run(&code("a\nb\nc", "a\nx\nc")).await;

	let moves: Vec<_> = step
		.lines(Side::Next)
		.map(|l| (l.line.meta.movement, l.line.meta.line_number.prev, l.line.meta.line_number.next))
		.collect();
	assert_eq!(
		moves,
		[
			(Movement::Stay, Some(1), Some(1)),
			(Movement::Exit, Some(2), None),
			(Movement::Enter, None, Some(2)),
			(Movement::Stay, Some(3), Some(3)),
		]
	);
	assert_eq!((step.enter_count, step.exit_count), (1, 1));
	assert_eq!(step.vertical_interval, [0.25, 0.75]);
	assert_eq!(step.line_count, FullTween::both(3));
}

#[tokio::test]
async fn focus_on_one_line() {
	let step = run(&code("a\nb\nc", "a\nb\nc").with_focus(Some("2"), Some("2"))).await;
	let focused: Vec<_> = step.lines(Side::Prev).map(|l| l.line.focused).collect();
	assert_eq!(
		focused,
		[FullTween::both(false), FullTween::both(true), FullTween::both(false)]
	);
	assert_eq!(step.first_focused_line_number, FullTween::both(2));
	assert_eq!(step.last_focused_line_number, FullTween::both(2));
}

#[tokio::test]
async fn multiline_annotation_groups() {
	let text = "1\n2\n3\n4\n5";
	let annotation = vec![CodeAnnotation::new("2:4").with_binding("bg")];
	let step = run(&code(text, text).with_annotations(annotation.clone(), annotation)).await;

	for side in Side::BOTH {
		let groups: Vec<Vec<usize>> = step
			.groups
			.get(side)
			.iter()
			.map(|g| g.lines.iter().map(|l| l.key).collect())
			.collect();
		assert_eq!(groups, [vec![0], vec![1, 2, 3], vec![4]]);
		let bindings: Vec<_> = step
			.groups
			.get(side)
			.iter()
			.map(|g| g.annotation.as_ref().map(|a| a.binding.as_str()))
			.collect();
		assert_eq!(bindings, [None, Some("bg"), None]);
	}
}

#[tokio::test]
async fn identical_snapshots_do_not_move() {
	let step = run(&code("fn main() {\n}\n", "fn main() {\n}")).await;
	assert_eq!((step.enter_count, step.exit_count), (0, 0));
	assert_eq!(step.vertical_interval, [0.0, 1.0]);
	assert!(step.lines(Side::Prev).all(|l| l.tween_x == TweenParams::fixed(0.0)));
	assert!(step.lines(Side::Prev).all(|l| matches!(l.tween_y, TweenParams::Fixed { .. })));
}

#[tokio::test]
async fn empty_prev_enters_every_line() {
	let mut input = code("", "a\nb");
	input.code.prev = None;
	let step = run(&input).await;

	let entering: Vec<_> = step
		.lines(Side::Next)
		.filter(|l| l.line.meta.movement == Movement::Enter)
		.map(|l| l.line.meta.enter_index)
		.collect();
	assert_eq!(entering, [Some(0), Some(1)]);
	assert_eq!(step.line_count, FullTween::new(1, 2));
}

#[tokio::test]
async fn frames_run_from_prev_to_next() {
	let step = run(&code("a\nb", "a\nc")).await;
	let first = step.frame(0.0);
	let last = step.frame(1.0);
	assert_eq!(first.side, Side::Prev);
	assert_eq!(last.side, Side::Next);

	let visible = |frame: &codeshift_step::Frame| -> Vec<String> {
		frame
			.groups
			.iter()
			.flat_map(|g| g.lines.iter())
			.filter(|l| l.dx == 0.0)
			.map(|l| l.text())
			.collect()
	};
	assert_eq!(visible(&first), ["a", "b"]);
	assert_eq!(visible(&last), ["a", "c"]);
}

#[tokio::test]
async fn json_output_is_stable() {
	let input = code("let a;", "let a;\nlet b;").with_annotations(vec![], vec![CodeAnnotation::new("2[5]")]);
	let first = serde_json::to_string(&run(&input).await).unwrap();
	let second = serde_json::to_string(&run(&input).await).unwrap();
	assert_eq!(first, second);
	assert!(first.contains("\"verticalInterval\":[0.0,0.67]"));
	assert!(first.contains("\"binding\":\"box\""));
}

fn run_blocking(input: &StepInput) -> CodeStep {
	tokio::runtime::Builder::new_current_thread()
		.build()
		.unwrap()
		.block_on(run(input))
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(64))]

	#[test]
	fn unfocused_input_focuses_every_line(
		prev in prop::collection::vec("[a-c ]{0,4}", 1..6),
		next in prop::collection::vec("[a-c ]{0,4}", 1..6),
	) {
		let step = run_blocking(&code(&prev.join("\n"), &next.join("\n")));
		for side in Side::BOTH {
			for line in step.lines(side) {
				prop_assert_eq!(line.line.focused, FullTween::both(true));
			}
		}
		for side in Side::BOTH {
			prop_assert_eq!(*step.first_focused_line_number.get(side), 1);
			prop_assert_eq!(*step.last_focused_line_number.get(side), *step.line_count.get(side));
		}
	}

	#[test]
	fn opacity_is_bounded_at_rest(prev in any::<bool>(), next in any::<bool>(), t in 0.0f64..=1.0) {
		let value = codeshift_step::opacity(FullTween::new(prev, next), t, 0.0);
		prop_assert!((0.33 - 1e-9..=0.99 + 1e-9).contains(&value));
	}
}
