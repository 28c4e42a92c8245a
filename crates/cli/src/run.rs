//! Command execution.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use codeshift_highlight::{HighlightAdapter, Theme};
use codeshift_primitives::Side;
use codeshift_step::{CodeAnnotation, Config, Frame, StepCache, StepInput, StepParser};
use serde::Deserialize;

use crate::cli::{Command, InputArgs};

/// Contents of an `--annotations` file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnnotationsFile {
	#[serde(default)]
	prev: Vec<CodeAnnotation>,
	#[serde(default)]
	next: Vec<CodeAnnotation>,
}

/// Runs `command`, writing its output to `out`.
pub async fn run(command: Command, out: &mut impl Write) -> anyhow::Result<()> {
	match command {
		Command::Step { input, pretty } => {
			let (parser, input) = prepare(&input)?;
			let mut cache = StepCache::from_options(parser.options());
			let step = cache.step_when_ready(&parser, &input).await;
			if pretty {
				serde_json::to_writer_pretty(&mut *out, &step)?;
			} else {
				serde_json::to_writer(&mut *out, &step)?;
			}
			writeln!(out)?;
		}
		Command::Frames { input, count } => {
			let (parser, input) = prepare(&input)?;
			let mut cache = StepCache::from_options(parser.options());
			for i in 0..=count {
				let step = cache.step_when_ready(&parser, &input).await;
				write_frame(out, i, &step.frame(f64::from(i) / f64::from(count)))?;
			}
			let (hits, misses) = cache.stats();
			tracing::debug!(hits, misses, capacity = cache.capacity().get(), "codeshift.frames");
		}
	}
	Ok(())
}

fn prepare(args: &InputArgs) -> anyhow::Result<(StepParser, StepInput)> {
	let config = match &args.config {
		Some(path) => {
			let text = read(path)?;
			Config::parse(&text).with_context(|| format!("invalid config {}", path.display()))?
		}
		None => Config::default(),
	};
	let annotations = match &args.annotations {
		Some(path) => {
			let text = read(path)?;
			serde_json::from_str::<AnnotationsFile>(&text)
				.with_context(|| format!("invalid annotations {}", path.display()))?
		}
		None => AnnotationsFile::default(),
	};
	let prev = args.prev.as_deref().map(read).transpose()?;
	let next = args.next.as_deref().map(read).transpose()?;

	let theme = config.theme.clone().unwrap_or_else(|| Arc::new(Theme::plain()));
	tracing::debug!(lang = %args.lang, theme = %theme.name, tab_width = ?config.options.tab_width, "codeshift.prepare");

	let input = StepInput::new(args.lang.clone(), theme)
		.with_code(prev.as_deref(), next.as_deref())
		.with_focus(args.focus_prev.as_deref(), args.focus_next.as_deref())
		.with_annotations(annotations.prev, annotations.next);
	let parser = StepParser::new(Arc::new(HighlightAdapter::default()), config.options);
	Ok((parser, input))
}

fn read(path: &Path) -> anyhow::Result<String> {
	std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_frame(out: &mut impl Write, index: u32, frame: &Frame) -> std::io::Result<()> {
	let side = match frame.side {
		Side::Prev => "prev",
		Side::Next => "next",
	};
	writeln!(out, "frame {index} progress={:.2} side={side}", frame.progress)?;
	for group in &frame.groups {
		if let (Some(binding), Some(y), Some(rows)) = (&group.binding, group.y, group.rows) {
			writeln!(out, "  [{binding}] y={y:.2} rows={rows}")?;
		}
		for line in &group.lines {
			writeln!(
				out,
				"  {:>5.2} {:>+5.2} {:.2} | {}",
				line.dy,
				line.dx,
				line.opacity,
				line.text()
			)?;
		}
	}
	Ok(())
}
