//! Lazy tokenizer warm-up with placeholder output.
//!
//! Each (language, theme) pair is loaded at most once. Until its load
//! completes, [`HighlightAdapter::highlight_or_placeholder`] answers with
//! plain tokens so the caller never blocks; [`HighlightAdapter::readiness`]
//! hands out a one-shot future that resolves when the load has finished.
//! A failed load is remembered and the pair keeps using the fallback.

use std::collections::HashMap;
use std::sync::Arc;

use codeshift_primitives::{BoxFutureStatic, HighlightedLine};
use parking_lot::Mutex;
use tokio::sync::OnceCell;

use crate::tokenizer::{PlainTokenizer, Tokenizer};
use crate::Theme;

/// Future resolving once a (language, theme) load has finished.
///
/// Yields `true` when the real tokenizer is usable, `false` when the load
/// failed and the pair is pinned to the fallback.
pub type Readiness = BoxFutureStatic<bool>;

/// Where a batch of lines came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
	/// The real tokenizer produced them.
	Tokenizer,
	/// The tokenizer is still loading; these are temporary plain lines.
	Placeholder,
	/// The tokenizer failed (load or tokenize); these plain lines are final.
	Fallback,
}

/// Tokenized lines plus their provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlighted {
	pub lines: Vec<HighlightedLine>,
	pub source: TokenSource,
}

/// Load state of one (language, theme) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
	/// Not requested yet, or still loading.
	Pending,
	Ready,
	Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ReadyKey {
	lang: String,
	theme: String,
}

impl ReadyKey {
	fn new(lang: &str, theme: &Theme) -> Self {
		Self {
			lang: lang.to_string(),
			theme: theme.name.clone(),
		}
	}
}

/// Wraps a [`Tokenizer`] with readiness tracking and a plain fallback.
pub struct HighlightAdapter {
	tokenizer: Arc<dyn Tokenizer>,
	loads: Mutex<HashMap<ReadyKey, Arc<OnceCell<LoadStatus>>>>,
}

impl std::fmt::Debug for HighlightAdapter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HighlightAdapter")
			.field("tokenizer", &self.tokenizer.name())
			.field("loads", &self.loads.lock().len())
			.finish()
	}
}

impl Default for HighlightAdapter {
	fn default() -> Self {
		Self::new(Arc::new(PlainTokenizer))
	}
}

impl HighlightAdapter {
	pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
		Self {
			tokenizer,
			loads: Mutex::new(HashMap::new()),
		}
	}

	fn cell(&self, lang: &str, theme: &Theme) -> Arc<OnceCell<LoadStatus>> {
		self.loads.lock().entry(ReadyKey::new(lang, theme)).or_default().clone()
	}

	/// Current load state without starting a load.
	pub fn status(&self, lang: &str, theme: &Theme) -> LoadStatus {
		self.loads
			.lock()
			.get(&ReadyKey::new(lang, theme))
			.and_then(|cell| cell.get().copied())
			.unwrap_or(LoadStatus::Pending)
	}

	/// Returns true if the real tokenizer can be used synchronously.
	pub fn is_ready(&self, lang: &str, theme: &Theme) -> bool {
		self.status(lang, theme) == LoadStatus::Ready
	}

	/// Loads the tokenizer for `lang`/`theme` if needed and waits for it.
	///
	/// Concurrent callers share one load. Returns true when the tokenizer is
	/// usable.
	pub async fn ensure_ready(&self, lang: &str, theme: &Theme) -> bool {
		let cell = self.cell(lang, theme);
		let status = cell
			.get_or_init(|| async {
				tracing::debug!(tokenizer = self.tokenizer.name(), lang, theme = %theme.name, "highlight.load.start");
				match self.tokenizer.load(lang, theme).await {
					Ok(()) => {
						tracing::debug!(tokenizer = self.tokenizer.name(), lang, "highlight.load.ready");
						LoadStatus::Ready
					}
					Err(error) => {
						tracing::warn!(tokenizer = self.tokenizer.name(), lang, %error, "tokenizer load failed; using plain fallback");
						LoadStatus::Failed
					}
				}
			})
			.await;
		*status == LoadStatus::Ready
	}

	/// Owned variant of [`HighlightAdapter::ensure_ready`] for handing to a scheduler.
	pub fn readiness(self: &Arc<Self>, lang: &str, theme: &Theme) -> Readiness {
		let adapter = Arc::clone(self);
		let lang = lang.to_string();
		let theme = theme.clone();
		Box::pin(async move { adapter.ensure_ready(&lang, &theme).await })
	}

	/// Tokenizes with the real tokenizer when ready, with plain text otherwise.
	pub fn highlight_or_placeholder(&self, code: &str, lang: &str, theme: &Theme) -> Highlighted {
		match self.status(lang, theme) {
			LoadStatus::Ready => match self.tokenizer.tokenize(code, lang, theme) {
				Ok(lines) => Highlighted {
					lines,
					source: TokenSource::Tokenizer,
				},
				Err(error) => {
					tracing::warn!(tokenizer = self.tokenizer.name(), lang, %error, "tokenize failed; using plain fallback");
					Highlighted {
						lines: PlainTokenizer::lines(code, theme),
						source: TokenSource::Fallback,
					}
				}
			},
			LoadStatus::Pending => Highlighted {
				lines: PlainTokenizer::lines(code, theme),
				source: TokenSource::Placeholder,
			},
			LoadStatus::Failed => Highlighted {
				lines: PlainTokenizer::lines(code, theme),
				source: TokenSource::Fallback,
			},
		}
	}
}

#[cfg(test)]
mod tests;
