use codeshift_primitives::ColumnRange;

use super::*;

#[test]
fn parses_single_lines_and_ranges() {
	let map = parse_focus("1, 3:5").unwrap();
	let lines: Vec<_> = (1..=6).filter(|n| map.line(*n).is_some()).collect();
	assert_eq!(lines, [1, 3, 4, 5]);
	assert_eq!(map.bounds(), Some((1, 5)));
}

#[test]
fn parses_column_qualified_lines() {
	let map = parse_focus("2[3:9],4[1,5:7]").unwrap();
	assert_eq!(map.line(2), Some(LineFocus::Columns(&[ColumnRange::new(3, 9)])));
	assert_eq!(
		map.line(4),
		Some(LineFocus::Columns(&[ColumnRange::single(1), ColumnRange::new(5, 7)]))
	);
}

#[test]
fn whole_line_absorbs_columns() {
	let map = parse_focus("2[3:4],2").unwrap();
	assert_eq!(map.line(2), Some(LineFocus::Whole));
	let map = parse_focus("2,2[3:4]").unwrap();
	assert_eq!(map.line(2), Some(LineFocus::Whole));
}

#[test]
fn repeated_columns_accumulate() {
	let map = parse_focus("2[1:2],2[5]").unwrap();
	assert_eq!(map.line(2).unwrap().columns().len(), 2);
}

#[test]
fn rejects_malformed_expressions() {
	assert_eq!(parse_focus(""), Err(FocusError::Empty));
	assert_eq!(parse_focus("1,,2"), Err(FocusError::Empty));
	assert_eq!(parse_focus("x"), Err(FocusError::InvalidNumber("x".into())));
	assert_eq!(parse_focus("0"), Err(FocusError::ZeroPosition("0".into())));
	assert_eq!(parse_focus("5:2"), Err(FocusError::ReversedRange { start: 5, end: 2 }));
	assert!(matches!(parse_focus("2[1:3"), Err(FocusError::Unbalanced(_))));
	assert!(matches!(parse_focus("2]1["), Err(FocusError::Unbalanced(_))));
	assert!(matches!(parse_focus("2[]"), Err(FocusError::Empty)));
}

#[test]
fn lenient_parse_falls_back_to_all() {
	assert_eq!(Focus::parse(None), Focus::All);
	assert_eq!(Focus::parse(Some("   ")), Focus::All);
	assert_eq!(Focus::parse(Some("1:x")), Focus::All);
	assert!(!Focus::parse(Some("2")).is_all());
}

#[test]
fn focus_queries() {
	let focus = Focus::parse(Some("1,3[2:3]"));
	assert!(focus.is_line_focused(1));
	assert!(!focus.is_line_focused(2));
	assert!(focus.is_line_focused(3));
	assert!(focus.is_column_focused(1, 40));
	assert!(!focus.is_column_focused(3, 1));
	assert!(focus.is_column_focused(3, 3));
	assert_eq!(focus.columns(3), &[ColumnRange::new(2, 3)]);
	assert!(focus.columns(1).is_empty());
	assert!(Focus::All.is_column_focused(99, 99));
}

#[test]
fn huge_ranges_are_answered_without_expansion() {
	let focus = Focus::parse(Some("1:4000000000,7[2]"));
	let Focus::Lines(map) = &focus else {
		panic!("expected a line focus, got {focus:?}");
	};
	assert_eq!(map.bounds(), Some((1, 4_000_000_000)));
	assert!(focus.is_line_focused(3_999_999_999));
	assert!(!focus.is_line_focused(4_000_000_001));
	assert_eq!(map.line(7), Some(LineFocus::Whole));
	assert!(focus.columns(7).is_empty());
}

#[test]
fn column_bounds_extend_whole_ranges() {
	let map = parse_focus("3:4,9[1:2],1[5]").unwrap();
	assert_eq!(map.bounds(), Some((1, 9)));
	assert_eq!(map.line(9), Some(LineFocus::Columns(&[ColumnRange::new(1, 2)])));
	assert_eq!(map.line(5), None);
}
