//! Core value types shared by the highlighter bridge and the step engine.

/// Colors, text modifiers, and styles.
pub mod color;
/// Async future aliases.
pub mod future;
/// 1-based inclusive line and column ranges.
pub mod range;
/// Highlighted tokens and per-line token lists.
pub mod token;
/// Two-sided values and interpolation parameters.
pub mod tween;

pub use color::{Color, Modifier, ParseColorError, Style};
pub use future::{BoxFutureSend, BoxFutureStatic};
pub use range::{ColumnRange, LineRange};
pub use token::{HighlightedLine, Token};
pub use tween::{FullTween, Side, Tween, TweenParams, tween};
