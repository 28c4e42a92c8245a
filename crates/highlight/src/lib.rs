// Library code reports through tracing; never write to stderr directly.
#![deny(clippy::print_stderr)]

//! Bridge between external syntax highlighters and the step engine.
//!
//! The engine never tokenizes code itself. It talks to a [`Tokenizer`]
//! through a [`HighlightAdapter`], which adds lazy per-(language, theme)
//! warm-up and a plain-text fallback so a caller always gets lines back.
//!
//! # Architecture
//!
//! * [`theme`]: theme model and TOML theme parsing
//! * [`tokenizer`]: the [`Tokenizer`] seam and the [`PlainTokenizer`] fallback
//! * [`spans`]: conversion from byte-range highlight spans to per-line tokens
//! * [`adapter`]: readiness tracking and placeholder tokenization

pub mod adapter;
pub mod error;
pub mod spans;
pub mod theme;
pub mod tokenizer;

pub use adapter::{HighlightAdapter, Highlighted, LoadStatus, Readiness, TokenSource};
pub use error::{HighlightError, Result, ThemeError};
pub use spans::{Highlight, HighlightSpan, HighlightStyles, lines_from_spans};
pub use theme::Theme;
pub use tokenizer::{PlainTokenizer, Tokenizer};
