//! The full pipeline from two code snapshots to a [`CodeStep`].

use std::sync::Arc;

use codeshift_highlight::{HighlightAdapter, Readiness, Theme, TokenSource};
use codeshift_primitives::{FullTween, HighlightedLine, Side, Tween};

use crate::annotations::{CodeAnnotation, resolve_annotations};
use crate::config::StepOptions;
use crate::differ::merge_lines;
use crate::focus::Focus;
use crate::geometry::{CodeStep, add_extra_stuff};
use crate::grouper::add_annotations;
use crate::normalize::normalize;
use crate::splitter::split_by_focus;

/// Everything a step depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct StepInput {
	pub code: Tween<String>,
	pub focus: Tween<String>,
	pub annotations: FullTween<Vec<CodeAnnotation>>,
	pub lang: String,
	pub theme: Arc<Theme>,
}

impl StepInput {
	pub fn new(lang: impl Into<String>, theme: Arc<Theme>) -> Self {
		Self {
			code: Tween::default(),
			focus: Tween::default(),
			annotations: FullTween::default(),
			lang: lang.into(),
			theme,
		}
	}

	pub fn with_code(mut self, prev: Option<&str>, next: Option<&str>) -> Self {
		self.code = Tween::new(prev.map(str::to_string), next.map(str::to_string));
		self
	}

	pub fn with_focus(mut self, prev: Option<&str>, next: Option<&str>) -> Self {
		self.focus = Tween::new(prev.map(str::to_string), next.map(str::to_string));
		self
	}

	pub fn with_annotations(mut self, prev: Vec<CodeAnnotation>, next: Vec<CodeAnnotation>) -> Self {
		self.annotations = FullTween::new(prev, next);
		self
	}
}

/// Runs every synchronous stage over already tokenized lines.
pub fn parse(input: &StepInput, lines: FullTween<Vec<HighlightedLine>>) -> CodeStep {
	let focus = FullTween::from_fn(|side| Focus::parse(input.focus.get(side).map(String::as_str)));
	let annotations = FullTween::from_fn(|side| {
		resolve_annotations(input.annotations.get(side), lines.get(side), &input.theme)
	});
	let inline = FullTween::new(annotations.prev.inline.clone(), annotations.next.inline.clone());

	let merged = merge_lines(&lines.prev, &lines.next);
	let focused = split_by_focus(merged, &focus, &inline);
	let annotated = add_annotations(focused, &annotations);
	add_extra_stuff(annotated)
}

/// Result of [`StepParser::step`].
pub enum StepOutcome {
	/// Built with the real tokenizer, or with the final fallback.
	Ready(CodeStep),
	/// Built with placeholder tokens; `ready` resolves once the tokenizer
	/// has loaded and the step should be recomputed.
	Pending { placeholder: CodeStep, ready: Readiness },
}

impl std::fmt::Debug for StepOutcome {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			StepOutcome::Ready(step) => f.debug_tuple("Ready").field(step).finish(),
			StepOutcome::Pending { placeholder, .. } => f
				.debug_struct("Pending")
				.field("placeholder", placeholder)
				.finish_non_exhaustive(),
		}
	}
}

impl StepOutcome {
	/// The step to draw now, placeholder or not.
	pub fn step(&self) -> &CodeStep {
		match self {
			StepOutcome::Ready(step) => step,
			StepOutcome::Pending { placeholder, .. } => placeholder,
		}
	}

	pub fn is_ready(&self) -> bool {
		matches!(self, StepOutcome::Ready(_))
	}
}

/// Step engine: tokenizes through a [`HighlightAdapter`] and runs [`parse`].
#[derive(Debug, Clone)]
pub struct StepParser {
	adapter: Arc<HighlightAdapter>,
	options: StepOptions,
}

impl Default for StepParser {
	fn default() -> Self {
		Self::new(Arc::new(HighlightAdapter::default()), StepOptions::default())
	}
}

impl StepParser {
	pub fn new(adapter: Arc<HighlightAdapter>, options: StepOptions) -> Self {
		Self { adapter, options }
	}

	pub fn adapter(&self) -> &Arc<HighlightAdapter> {
		&self.adapter
	}

	pub fn options(&self) -> &StepOptions {
		&self.options
	}

	/// Builds the step now, with placeholder tokens if the tokenizer is
	/// still warming up.
	pub fn step(&self, input: &StepInput) -> StepOutcome {
		let (lines, placeholder) = self.highlight(input);
		let step = parse(input, lines);
		if placeholder {
			tracing::debug!(lang = %input.lang, theme = %input.theme.name, "step.placeholder");
			StepOutcome::Pending {
				placeholder: step,
				ready: self.adapter.readiness(&input.lang, &input.theme),
			}
		} else {
			StepOutcome::Ready(step)
		}
	}

	/// Waits for the tokenizer, then builds the step.
	pub async fn step_when_ready(&self, input: &StepInput) -> CodeStep {
		self.adapter.ensure_ready(&input.lang, &input.theme).await;
		let (lines, _) = self.highlight(input);
		parse(input, lines)
	}

	fn highlight(&self, input: &StepInput) -> (FullTween<Vec<HighlightedLine>>, bool) {
		let mut placeholder = false;
		let lines = FullTween::from_fn(|side: Side| {
			let code = normalize(input.code.get(side).map(String::as_str), self.options.tab_width);
			let highlighted = self.adapter.highlight_or_placeholder(&code, &input.lang, &input.theme);
			placeholder |= highlighted.source == TokenSource::Placeholder;
			highlighted.lines
		});
		(lines, placeholder)
	}
}
