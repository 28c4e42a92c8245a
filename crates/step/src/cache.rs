//! Caller-owned memoization of finished steps.

use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;

use lru::LruCache;
use rustc_hash::FxHasher;

use crate::config::StepOptions;
use crate::geometry::CodeStep;
use crate::parser::{StepInput, StepOutcome, StepParser};

/// Least-recently-used cache of finished steps.
///
/// Placeholder steps are never stored. A hit is checked against the full
/// stored input, so hash collisions only cost a recomputation.
#[derive(Debug)]
pub struct StepCache {
	entries: LruCache<u64, (StepInput, CodeStep)>,
	hits: u64,
	misses: u64,
}

impl StepCache {
	pub fn new(capacity: NonZeroUsize) -> Self {
		Self {
			entries: LruCache::new(capacity),
			hits: 0,
			misses: 0,
		}
	}

	/// Cache sized by [`StepOptions::cache_capacity`].
	pub fn from_options(options: &StepOptions) -> Self {
		Self::new(options.cache_capacity)
	}

	pub fn capacity(&self) -> NonZeroUsize {
		self.entries.cap()
	}

	/// Cached step for `input`, if any.
	pub fn get(&mut self, input: &StepInput) -> Option<&CodeStep> {
		let key = input_hash(input);
		match self.entries.get(&key) {
			Some((stored, step)) if stored == input => {
				self.hits += 1;
				Some(step)
			}
			_ => {
				self.misses += 1;
				None
			}
		}
	}

	pub fn insert(&mut self, input: StepInput, step: CodeStep) {
		self.entries.put(input_hash(&input), (input, step));
	}

	/// Serves `input` from the cache or runs `parser` and stores the result.
	pub fn step(&mut self, parser: &StepParser, input: &StepInput) -> StepOutcome {
		if let Some(step) = self.get(input) {
			return StepOutcome::Ready(step.clone());
		}
		let outcome = parser.step(input);
		if let StepOutcome::Ready(step) = &outcome {
			self.insert(input.clone(), step.clone());
		}
		tracing::trace!(hits = self.hits, misses = self.misses, len = self.entries.len(), "step.cache");
		outcome
	}

	/// Async variant of [`StepCache::step`] that waits for the tokenizer.
	pub async fn step_when_ready(&mut self, parser: &StepParser, input: &StepInput) -> CodeStep {
		if let Some(step) = self.get(input) {
			return step.clone();
		}
		let step = parser.step_when_ready(input).await;
		self.insert(input.clone(), step.clone());
		step
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	/// `(hits, misses)` since creation.
	pub fn stats(&self) -> (u64, u64) {
		(self.hits, self.misses)
	}
}

fn input_hash(input: &StepInput) -> u64 {
	let mut hasher = FxHasher::default();
	input.code.hash(&mut hasher);
	input.focus.hash(&mut hasher);
	input.lang.hash(&mut hasher);
	input.theme.hash(&mut hasher);
	for side in [&input.annotations.prev, &input.annotations.next] {
		side.len().hash(&mut hasher);
		for annotation in side {
			annotation.focus.hash(&mut hasher);
			annotation.binding.hash(&mut hasher);
			annotation.data.to_string().hash(&mut hasher);
		}
	}
	hasher.finish()
}
