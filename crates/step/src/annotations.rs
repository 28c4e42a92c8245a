//! Annotation descriptors and their resolution against one snapshot.
//!
//! A descriptor names a region with a focus expression. A single line with
//! column ranges becomes one [`InlineAnnotation`] per range; anything else
//! becomes a [`MultiLineAnnotation`] spanning the named lines.

use std::collections::BTreeMap;
use std::sync::Arc;

use codeshift_highlight::Theme;
use codeshift_primitives::{ColumnRange, HighlightedLine, LineRange};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::focus::{LineFocus, parse_focus};

/// Renderer key used when a descriptor names none.
pub const DEFAULT_BINDING: &str = "box";

/// A raw annotation as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeAnnotation {
	/// Focus expression selecting the annotated region.
	pub focus: String,
	/// Opaque payload handed to the renderer.
	#[serde(default)]
	pub data: Value,
	/// Renderer key; [`DEFAULT_BINDING`] when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub binding: Option<String>,
}

impl CodeAnnotation {
	pub fn new(focus: impl Into<String>) -> Self {
		Self {
			focus: focus.into(),
			data: Value::Null,
			binding: None,
		}
	}

	pub fn with_data(mut self, data: Value) -> Self {
		self.data = data;
		self
	}

	pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
		self.binding = Some(binding.into());
		self
	}

	fn resolved_binding(&self) -> String {
		self.binding.clone().unwrap_or_else(|| DEFAULT_BINDING.to_string())
	}
}

/// An annotation over a column range of one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineAnnotation {
	pub column_numbers: ColumnRange,
	pub data: Value,
	#[serde(serialize_with = "theme_name")]
	pub theme: Arc<Theme>,
	pub binding: String,
}

/// An annotation over an inclusive range of lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiLineAnnotation {
	pub line_numbers: LineRange,
	pub data: Value,
	#[serde(serialize_with = "theme_name")]
	pub theme: Arc<Theme>,
	pub binding: String,
}

fn theme_name<S: Serializer>(theme: &Arc<Theme>, serializer: S) -> Result<S::Ok, S::Error> {
	serializer.serialize_str(&theme.name)
}

/// Inline annotations keyed by line number, in declaration order per line.
pub type InlineAnnotations = BTreeMap<usize, Vec<InlineAnnotation>>;

/// Annotations of one snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedAnnotations {
	pub inline: InlineAnnotations,
	/// Non-overlapping, ordered by start line.
	pub multiline: Vec<MultiLineAnnotation>,
}

/// Resolves `descriptors` against the lines of one snapshot.
///
/// Descriptors that cannot be placed are dropped; the rest still resolve.
pub fn resolve_annotations(
	descriptors: &[CodeAnnotation],
	lines: &[HighlightedLine],
	theme: &Arc<Theme>,
) -> ResolvedAnnotations {
	let mut resolved = ResolvedAnnotations::default();

	for descriptor in descriptors {
		let map = match parse_focus(&descriptor.focus) {
			Ok(map) if !map.is_empty() => map,
			Ok(_) => continue,
			Err(error) => {
				tracing::debug!(focus = %descriptor.focus, %error, "dropping annotation with malformed focus");
				continue;
			}
		};
		let Some((first, last)) = map.bounds() else {
			continue;
		};
		if last > lines.len() {
			tracing::debug!(focus = %descriptor.focus, line_count = lines.len(), "dropping annotation past the last line");
			continue;
		}

		if first == last
			&& let Some(LineFocus::Columns(columns)) = map.line(first)
		{
			let width = lines[first - 1].width();
			for range in columns {
				let Some(column_numbers) = range.clamp_end(width) else {
					tracing::debug!(focus = %descriptor.focus, width, "dropping inline annotation past the line end");
					continue;
				};
				resolved.inline.entry(first).or_default().push(InlineAnnotation {
					column_numbers,
					data: descriptor.data.clone(),
					theme: Arc::clone(theme),
					binding: descriptor.resolved_binding(),
				});
			}
			continue;
		}

		let line_numbers = LineRange::new(first, last);
		if let Some(kept) = resolved.multiline.iter().find(|a| a.line_numbers.overlaps(&line_numbers)) {
			tracing::debug!(
				focus = %descriptor.focus,
				kept_start = kept.line_numbers.start,
				kept_end = kept.line_numbers.end,
				"dropping multi-line annotation overlapping an earlier one"
			);
			continue;
		}
		resolved.multiline.push(MultiLineAnnotation {
			line_numbers,
			data: descriptor.data.clone(),
			theme: Arc::clone(theme),
			binding: descriptor.resolved_binding(),
		});
	}

	resolved.multiline.sort_by_key(|a| a.line_numbers.start);
	tracing::trace!(
		inline = resolved.inline.values().map(Vec::len).sum::<usize>(),
		multiline = resolved.multiline.len(),
		"step.annotations"
	);
	resolved
}
