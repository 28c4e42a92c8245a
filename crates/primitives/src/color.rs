//! Abstract color and style types for token styling.
//!
//! These types describe how a token should look without depending on any
//! terminal or UI library. The step engine never inspects them; they travel
//! from the highlighter to the renderer untouched.

use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// An abstract color representation.
///
/// Serialized as a string: `#rrggbb` for true colors, `@n` for palette
/// indices, and a lowercase name for the 16 ANSI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Color {
	/// Renderer default color.
	#[default]
	Reset,
	Black,
	Red,
	Green,
	Yellow,
	Blue,
	Magenta,
	Cyan,
	Gray,
	DarkGray,
	LightRed,
	LightGreen,
	LightYellow,
	LightBlue,
	LightMagenta,
	LightCyan,
	White,
	/// True color RGB.
	Rgb(u8, u8, u8),
	/// 256-color palette index.
	Indexed(u8),
}

const NAMED: [(&str, Color); 17] = [
	("reset", Color::Reset),
	("black", Color::Black),
	("red", Color::Red),
	("green", Color::Green),
	("yellow", Color::Yellow),
	("blue", Color::Blue),
	("magenta", Color::Magenta),
	("cyan", Color::Cyan),
	("gray", Color::Gray),
	("dark_gray", Color::DarkGray),
	("light_red", Color::LightRed),
	("light_green", Color::LightGreen),
	("light_yellow", Color::LightYellow),
	("light_blue", Color::LightBlue),
	("light_magenta", Color::LightMagenta),
	("light_cyan", Color::LightCyan),
	("white", Color::White),
];

/// Error returned when a color or modifier string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseColorError {
	/// The color string is neither a known name nor a valid hex/index form.
	#[error("invalid color format: {0}")]
	InvalidColor(String),
	/// The modifier name is unknown.
	#[error("invalid modifier: {0}")]
	InvalidModifier(String),
}

impl fmt::Display for Color {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Color::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
			Color::Indexed(i) => write!(f, "@{i}"),
			named => {
				let name = NAMED.iter().find(|(_, c)| c == named).map_or("reset", |(n, _)| n);
				f.write_str(name)
			}
		}
	}
}

impl FromStr for Color {
	type Err = ParseColorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let s = s.trim();
		let invalid = || ParseColorError::InvalidColor(s.to_string());

		if let Some(hex) = s.strip_prefix('#') {
			let channel = |i: usize| hex.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());
			return match (hex.len(), channel(0), channel(2), channel(4)) {
				(6, Some(r), Some(g), Some(b)) => Ok(Color::Rgb(r, g, b)),
				_ => Err(invalid()),
			};
		}

		if let Some(idx) = s.strip_prefix('@') {
			return idx.parse().map(Color::Indexed).map_err(|_| invalid());
		}

		let normalized = s.to_ascii_lowercase().replace('-', "_");
		NAMED
			.iter()
			.find(|(name, _)| *name == normalized || name.replace('_', "") == normalized)
			.map(|(_, color)| *color)
			.ok_or_else(invalid)
	}
}

impl From<Color> for String {
	fn from(color: Color) -> Self {
		color.to_string()
	}
}

impl TryFrom<String> for Color {
	type Error = ParseColorError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

bitflags! {
	/// Text style modifiers (bold, italic, underline, etc.).
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct Modifier: u16 {
		const BOLD = 1 << 0;
		const DIM = 1 << 1;
		const ITALIC = 1 << 2;
		const UNDERLINED = 1 << 3;
		const REVERSED = 1 << 4;
		const CROSSED_OUT = 1 << 5;
	}
}

impl Modifier {
	/// Parses a single modifier name such as `bold` or `crossed-out`.
	pub fn parse_name(name: &str) -> Result<Self, ParseColorError> {
		let upper = name.trim().to_ascii_uppercase().replace('-', "_");
		Self::from_name_exact(&upper).ok_or_else(|| ParseColorError::InvalidModifier(name.to_string()))
	}

	fn from_name_exact(upper: &str) -> Option<Self> {
		Self::all().iter_names().find(|(n, _)| *n == upper).map(|(_, m)| m)
	}

	/// Lowercase names of the set modifiers, in declaration order.
	pub fn names(self) -> impl Iterator<Item = String> {
		self.iter_names().map(|(n, _)| n.to_ascii_lowercase())
	}
}

/// A complete text style with optional foreground, background, and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Style {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fg: Option<Color>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub bg: Option<Color>,
	#[serde(default, with = "modifier_names", skip_serializing_if = "Modifier::is_empty")]
	pub modifiers: Modifier,
}

impl Style {
	/// Creates an empty style.
	pub const fn new() -> Self {
		Self {
			fg: None,
			bg: None,
			modifiers: Modifier::empty(),
		}
	}

	/// Sets the foreground color.
	pub const fn fg(mut self, color: Color) -> Self {
		self.fg = Some(color);
		self
	}

	/// Sets the background color.
	pub const fn bg(mut self, color: Color) -> Self {
		self.bg = Some(color);
		self
	}

	/// Adds modifiers.
	pub const fn add_modifier(mut self, modifier: Modifier) -> Self {
		self.modifiers = self.modifiers.union(modifier);
		self
	}

	/// Layers `other` on top of `self`; colors set in `other` win.
	pub fn patch(self, other: Style) -> Self {
		Self {
			fg: other.fg.or(self.fg),
			bg: other.bg.or(self.bg),
			modifiers: self.modifiers | other.modifiers,
		}
	}
}

mod modifier_names {
	use serde::de::Error;
	use serde::{Deserialize, Deserializer, Serializer};

	use super::Modifier;

	pub fn serialize<S: Serializer>(modifiers: &Modifier, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_seq(modifiers.names())
	}

	pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Modifier, D::Error> {
		let names = Vec::<String>::deserialize(deserializer)?;
		names.iter().try_fold(Modifier::empty(), |acc, name| {
			Modifier::parse_name(name).map(|m| acc | m).map_err(D::Error::custom)
		})
	}
}
