//! Theme model shared by tokenizers, annotations, and renderers.
//!
//! Themes are plain data. A theme file is TOML:
//!
//! ```toml
//! name = "dark"
//! foreground = "#d4d4d4"
//! background = "#1e1e1e"
//!
//! [scopes.keyword]
//! fg = "#569cd6"
//! modifiers = ["bold"]
//!
//! [scopes."string.special"]
//! fg = "#ce9178"
//! ```

use std::collections::BTreeMap;

use codeshift_primitives::{Color, Style};
use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// A named color scheme.
///
/// Scope names are dotted (`keyword.control`); lookups fall back to shorter
/// prefixes, so `keyword.control.flow` resolves through `keyword.control` and
/// then `keyword`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Theme {
	pub name: String,
	#[serde(default)]
	pub foreground: Color,
	#[serde(default)]
	pub background: Color,
	#[serde(default)]
	pub scopes: BTreeMap<String, Style>,
}

impl Theme {
	/// The unstyled theme used for placeholder tokenization.
	pub fn plain() -> Self {
		Self {
			name: "plain".to_string(),
			foreground: Color::Reset,
			background: Color::Reset,
			scopes: BTreeMap::new(),
		}
	}

	/// Parses a standalone theme document.
	pub fn parse(input: &str) -> Result<Self, ThemeError> {
		let theme: Theme = toml::from_str(input)?;
		theme.validated()
	}

	/// Checks fields serde cannot express as required.
	pub fn validated(self) -> Result<Self, ThemeError> {
		if self.name.trim().is_empty() {
			return Err(ThemeError::MissingField("name".into()));
		}
		Ok(self)
	}

	/// Style for text outside any highlight scope.
	pub fn base_style(&self) -> Style {
		match self.foreground {
			Color::Reset => Style::new(),
			fg => Style::new().fg(fg),
		}
	}

	/// Resolves a scope name to a style layered over [`Theme::base_style`].
	pub fn style_for_scope(&self, scope: &str) -> Style {
		let mut candidate = scope;
		loop {
			if let Some(style) = self.scopes.get(candidate) {
				return self.base_style().patch(*style);
			}
			match candidate.rfind('.') {
				Some(idx) => candidate = &candidate[..idx],
				None => return self.base_style(),
			}
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::plain()
	}
}
