//! Error types for tokenization and theme parsing.

use thiserror::Error;

/// Errors reported by a [`Tokenizer`](crate::Tokenizer).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
	/// The tokenizer has no grammar for this language.
	#[error("unsupported language: {0}")]
	UnsupportedLanguage(String),

	/// Loading the grammar or theme failed.
	#[error("failed to load {lang} with theme {theme}: {reason}")]
	Load {
		/// Language being loaded.
		lang: String,
		/// Theme being loaded.
		theme: String,
		/// Human readable cause.
		reason: String,
	},

	/// `tokenize` was called before `load` completed.
	#[error("tokenizer not ready for {0}")]
	NotReady(String),

	/// Tokenization itself failed.
	#[error("tokenization failed: {0}")]
	Tokenize(String),
}

/// Errors that can occur when parsing a theme.
#[derive(Debug, Error)]
pub enum ThemeError {
	/// Error parsing TOML syntax or an invalid field value.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// A required field is missing or empty.
	#[error("missing required field: {0}")]
	MissingField(String),
}

/// Result type for tokenizer operations.
pub type Result<T> = std::result::Result<T, HighlightError>;
