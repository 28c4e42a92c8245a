//! Error types for the step engine.

use thiserror::Error;

/// Errors from the strict focus-expression parser.
///
/// The engine itself never surfaces these: a malformed focus expression
/// means "everything focused". They exist for callers validating input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FocusError {
	/// The expression (or one comma-separated part of it) is blank.
	#[error("empty focus expression")]
	Empty,

	/// A line or column is not a positive integer.
	#[error("invalid number in focus expression: {0:?}")]
	InvalidNumber(String),

	/// Line and column numbers start at 1.
	#[error("line and column numbers start at 1, got 0 in {0:?}")]
	ZeroPosition(String),

	/// A range whose start is after its end.
	#[error("reversed range {start}:{end}")]
	ReversedRange {
		/// Range start as written.
		start: usize,
		/// Range end as written.
		end: usize,
	},

	/// Brackets do not pair up.
	#[error("unbalanced brackets in focus expression: {0:?}")]
	Unbalanced(String),
}

/// Errors that can occur when parsing engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or an invalid field value.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The embedded theme is invalid.
	#[error("invalid theme: {0}")]
	Theme(#[from] codeshift_highlight::ThemeError),

	/// An option value is out of range.
	#[error("invalid value for {option}: {reason}")]
	InvalidValue {
		/// The option key.
		option: &'static str,
		/// Why the value was rejected.
		reason: String,
	},
}
