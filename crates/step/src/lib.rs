//! Code-step transition engine.
//!
//! Given a previous and a next snapshot of a code listing, plus focus
//! expressions and annotations for each, [`StepParser`] computes a
//! [`CodeStep`]: lines classified as entering, exiting, or staying, split
//! into focused and unfocused token groups, grouped under annotations, and
//! given horizontal and vertical tweens. Renderers sample it at any
//! progress in `[0, 1]` with [`CodeStep::frame`].
//!
//! Stages run in order and are plain functions over owned data:
//!
//! 1. [`normalize()`] each snapshot's text
//! 2. tokenize through [`codeshift_highlight::HighlightAdapter`]
//! 3. [`merge_lines`]
//! 4. [`resolve_annotations`]
//! 5. [`split_by_focus`]
//! 6. [`add_annotations`] ([`annotate_inline`] then [`annotate_multiline`])
//! 7. [`add_extra_stuff`]

pub mod annotations;
pub mod cache;
pub mod config;
pub mod differ;
pub mod error;
pub mod focus;
pub mod frame;
pub mod geometry;
pub mod grouper;
pub mod normalize;
pub mod parser;
pub mod splitter;

pub use annotations::{
	CodeAnnotation, DEFAULT_BINDING, InlineAnnotation, InlineAnnotations, MultiLineAnnotation, ResolvedAnnotations,
	resolve_annotations,
};
pub use cache::StepCache;
pub use config::{Config, DEFAULT_CACHE_CAPACITY, StepOptions};
pub use differ::{LineMeta, MergedCode, MergedLine, Movement, merge_lines};
pub use error::{ConfigError, FocusError};
pub use focus::{Focus, FocusMap, LineFocus, parse_focus};
pub use frame::{Frame, FrameGroup, FrameLine, FrameSpan};
pub use geometry::{CodeStep, LineWithGeometry, add_extra_stuff, opacity, vertical_interval};
pub use grouper::{
	AnnotatedCode, AnnotatedLine, AnnotatedTokenGroups, HasLineMeta, LineGroup, add_annotations, annotate_inline,
	annotate_multiline,
};
pub use normalize::normalize;
pub use parser::{StepInput, StepOutcome, StepParser, parse};
pub use splitter::{FocusedCode, FocusedLine, TokenGroup, split_by_focus};
