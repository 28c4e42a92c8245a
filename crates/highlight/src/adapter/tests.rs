use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use codeshift_primitives::{BoxFutureSend, Color, HighlightedLine, Style};
use tokio::sync::Notify;

use super::*;
use crate::error::{HighlightError, Result};

/// Loads only after `gate` is notified; counts load attempts.
struct GatedTokenizer {
	gate: Arc<Notify>,
	loads: AtomicUsize,
	fail_load: bool,
	fail_tokenize: bool,
}

impl GatedTokenizer {
	fn new(fail_load: bool, fail_tokenize: bool) -> Self {
		Self {
			gate: Arc::new(Notify::new()),
			loads: AtomicUsize::new(0),
			fail_load,
			fail_tokenize,
		}
	}
}

impl Tokenizer for GatedTokenizer {
	fn name(&self) -> &str {
		"gated"
	}

	fn load<'a>(&'a self, lang: &'a str, theme: &'a Theme) -> BoxFutureSend<'a, Result<()>> {
		Box::pin(async move {
			self.loads.fetch_add(1, Ordering::SeqCst);
			self.gate.notified().await;
			if self.fail_load {
				Err(HighlightError::Load {
					lang: lang.to_string(),
					theme: theme.name.clone(),
					reason: "no grammar".into(),
				})
			} else {
				Ok(())
			}
		})
	}

	fn tokenize(&self, code: &str, _lang: &str, _theme: &Theme) -> Result<Vec<HighlightedLine>> {
		if self.fail_tokenize {
			return Err(HighlightError::Tokenize("boom".into()));
		}
		Ok(code.lines().map(|l| HighlightedLine::plain(l, Style::new().fg(Color::Red))).collect())
	}
}

#[tokio::test]
async fn placeholder_until_ready_then_real_tokens() {
	let tokenizer = Arc::new(GatedTokenizer::new(false, false));
	let gate = tokenizer.gate.clone();
	let adapter = Arc::new(HighlightAdapter::new(tokenizer.clone()));
	let theme = Theme::plain();

	let before = adapter.highlight_or_placeholder("a\nb\n", "rust", &theme);
	assert_eq!(before.source, TokenSource::Placeholder);
	assert_eq!(before.lines.len(), 2);
	assert_eq!(adapter.status("rust", &theme), LoadStatus::Pending);

	let ready = adapter.readiness("rust", &theme);
	let waiter = tokio::spawn(ready);
	tokio::task::yield_now().await;
	gate.notify_one();
	assert!(waiter.await.unwrap());

	assert!(adapter.is_ready("rust", &theme));
	let after = adapter.highlight_or_placeholder("a\nb\n", "rust", &theme);
	assert_eq!(after.source, TokenSource::Tokenizer);
	assert_eq!(after.lines[0].tokens[0].style.fg, Some(Color::Red));
}

#[tokio::test]
async fn concurrent_waiters_share_one_load() {
	let tokenizer = Arc::new(GatedTokenizer::new(false, false));
	let gate = tokenizer.gate.clone();
	let adapter = Arc::new(HighlightAdapter::new(tokenizer.clone()));
	let theme = Theme::plain();

	let first = tokio::spawn(adapter.readiness("js", &theme));
	let second = tokio::spawn(adapter.readiness("js", &theme));
	tokio::task::yield_now().await;
	gate.notify_one();

	assert!(first.await.unwrap());
	assert!(second.await.unwrap());
	assert_eq!(tokenizer.loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn failed_load_pins_fallback() {
	let tokenizer = Arc::new(GatedTokenizer::new(true, false));
	tokenizer.gate.notify_one();
	let adapter = HighlightAdapter::new(tokenizer.clone());
	let theme = Theme::plain();

	assert!(!adapter.ensure_ready("cobol", &theme).await);
	assert_eq!(adapter.status("cobol", &theme), LoadStatus::Failed);

	let out = adapter.highlight_or_placeholder("x\n", "cobol", &theme);
	assert_eq!(out.source, TokenSource::Fallback);
	assert!(!adapter.ensure_ready("cobol", &theme).await);
	assert_eq!(tokenizer.loads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn tokenize_error_degrades_to_plain_lines() {
	let tokenizer = Arc::new(GatedTokenizer::new(false, true));
	tokenizer.gate.notify_one();
	let adapter = HighlightAdapter::new(tokenizer);
	let theme = Theme::plain();

	assert!(adapter.ensure_ready("rust", &theme).await);
	let out = adapter.highlight_or_placeholder("let x;\n", "rust", &theme);
	assert_eq!(out.source, TokenSource::Fallback);
	assert_eq!(out.lines, vec![HighlightedLine::plain("let x;", Style::new())]);
}

#[tokio::test]
async fn default_adapter_is_ready_after_first_load() {
	let adapter = HighlightAdapter::default();
	let theme = Theme::plain();
	assert!(!adapter.is_ready("text", &theme));
	assert!(adapter.ensure_ready("text", &theme).await);
	assert!(adapter.is_ready("text", &theme));
}
