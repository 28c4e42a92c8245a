//! Engine configuration.
//!
//! ```toml
//! tab_width = 4
//! cache_capacity = 32
//!
//! [theme]
//! name = "dark"
//! foreground = "#d4d4d4"
//!
//! [theme.scopes.keyword]
//! fg = "#569cd6"
//! modifiers = ["bold"]
//! ```

use std::num::NonZeroUsize;
use std::sync::Arc;

use codeshift_highlight::Theme;
use serde::Deserialize;

use crate::error::ConfigError;

/// Default number of steps kept by a [`StepCache`](crate::StepCache).
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Knobs of the step engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOptions {
	/// Expand tabs to this width before tokenizing; tabs are kept when unset.
	pub tab_width: Option<NonZeroUsize>,
	pub cache_capacity: NonZeroUsize,
}

impl Default for StepOptions {
	fn default() -> Self {
		Self {
			tab_width: None,
			cache_capacity: NonZeroUsize::new(DEFAULT_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
		}
	}
}

/// Parsed configuration file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Config {
	pub options: StepOptions,
	/// Theme from the `[theme]` table, if present.
	pub theme: Option<Arc<Theme>>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
	tab_width: Option<usize>,
	cache_capacity: Option<usize>,
	theme: Option<Theme>,
}

impl Config {
	/// Parses a TOML document into a [`Config`].
	pub fn parse(input: &str) -> Result<Self, ConfigError> {
		let raw: RawConfig = toml::from_str(input)?;
		let mut options = StepOptions::default();

		if let Some(width) = raw.tab_width {
			options.tab_width = Some(positive("tab_width", width)?);
		}
		if let Some(capacity) = raw.cache_capacity {
			options.cache_capacity = positive("cache_capacity", capacity)?;
		}
		let theme = raw.theme.map(Theme::validated).transpose()?.map(Arc::new);

		Ok(Config { options, theme })
	}
}

fn positive(option: &'static str, value: usize) -> Result<NonZeroUsize, ConfigError> {
	NonZeroUsize::new(value).ok_or_else(|| ConfigError::InvalidValue {
		option,
		reason: "must be greater than zero".to_string(),
	})
}

#[cfg(test)]
mod tests;
