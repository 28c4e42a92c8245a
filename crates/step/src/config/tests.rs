use codeshift_primitives::{Color, Modifier, Style};

use super::*;

#[test]
fn empty_document_uses_defaults() {
	let config = Config::parse("").unwrap();
	assert_eq!(config, Config::default());
	assert_eq!(config.options.cache_capacity.get(), DEFAULT_CACHE_CAPACITY);
	assert_eq!(config.options.tab_width, None);
}

#[test]
fn parses_options_and_theme() {
	let config = Config::parse(
		r##"
tab_width = 4
cache_capacity = 8

[theme]
name = "dark"
foreground = "#d4d4d4"

[theme.scopes.keyword]
fg = "#569cd6"
modifiers = ["bold"]
"##,
	)
	.unwrap();
	assert_eq!(config.options.tab_width.map(NonZeroUsize::get), Some(4));
	assert_eq!(config.options.cache_capacity.get(), 8);
	let theme = config.theme.unwrap();
	assert_eq!(theme.name, "dark");
	assert_eq!(
		theme.style_for_scope("keyword.control"),
		Style::new()
			.fg(Color::Rgb(0x56, 0x9c, 0xd6))
			.add_modifier(Modifier::BOLD)
	);
}

#[test]
fn zero_values_are_rejected() {
	let err = Config::parse("tab_width = 0").unwrap_err();
	assert!(matches!(err, ConfigError::InvalidValue { option: "tab_width", .. }));
	let err = Config::parse("cache_capacity = 0").unwrap_err();
	assert!(matches!(err, ConfigError::InvalidValue { option: "cache_capacity", .. }));
}

#[test]
fn unknown_keys_and_bad_colors_fail() {
	assert!(matches!(Config::parse("tabwidth = 2"), Err(ConfigError::Toml(_))));
	assert!(matches!(
		Config::parse("[theme]\nname = \"x\"\nforeground = \"#zzzzzz\""),
		Err(ConfigError::Toml(_))
	));
}

#[test]
fn theme_needs_a_name() {
	let err = Config::parse("[theme]\nname = \" \"").unwrap_err();
	assert!(matches!(err, ConfigError::Theme(_)));
}
