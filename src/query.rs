//! # Query output parsing
//!
//! The display tool's text output has no versioned schema. Each piece of
//! information is pulled out by its own rule and any of them may come back
//! empty; parsing itself never fails.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::orientation::Rotation;

/// Connector names of internal panels, in lookup order.
pub const INTERNAL_CONNECTORS: [&str; 2] = ["eDP-1", "LVDS1"];

const ROTATION_KEY: &str = "rotation";
const BUILTIN_KEY: &str = "is-builtin";

lazy_static! {
    static ref ROTATION_FIELD: Regex = field_pattern(ROTATION_KEY);
    static ref BUILTIN_FIELD: Regex = field_pattern(BUILTIN_KEY);
}

/// Matches `key: value` inside a comma separated line. The value runs up to
/// the next comma.
fn field_pattern(key: &str) -> Regex {
    Regex::new(&format!(
        r"(?:^|[\s,]){}\s*:\s*([^,]*)",
        regex::escape(key)
    ))
    .expect("field pattern is a valid regex")
}

/// Parsed snapshot of one query invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DisplayQueryResult {
    pub rotation: Option<Rotation>,
    #[serde(skip)]
    pub raw_rotation: String,
    pub is_internal_display: bool,
    pub connector_name: String,
}

/// Parse the raw stdout of `<tool> query`.
pub fn parse_query_output(output: &str) -> DisplayQueryResult {
    let raw_rotation = field_value(output, ROTATION_KEY, &ROTATION_FIELD);
    let builtin = field_value(output, BUILTIN_KEY, &BUILTIN_FIELD);

    DisplayQueryResult {
        rotation: Rotation::from_token(&raw_rotation),
        is_internal_display: is_truthy(&builtin),
        connector_name: connector_name(output),
        raw_rotation,
    }
}

/// Value of `key` on the lines mentioning it. When several lines carry the
/// key, the last one wins.
fn field_value(output: &str, key: &str, pattern: &Regex) -> String {
    output
        .lines()
        .filter(|line| line.contains(key))
        .flat_map(|line| pattern.captures_iter(line))
        .filter_map(|cap| cap.get(1))
        .map(|value| value.as_str().trim().to_owned())
        .last()
        .unwrap_or_default()
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "yes" | "true" | "1"
    )
}

/// First internal connector found. `LVDS1` is only looked for when no line
/// mentions `eDP-1` at all.
fn connector_name(output: &str) -> String {
    for connector in INTERNAL_CONNECTORS.iter() {
        let mut lines = output
            .lines()
            .filter(|line| line.contains(connector))
            .peekable();
        if lines.peek().is_none() {
            continue;
        }

        return lines
            .flat_map(|line| line.split(|c: char| c.is_whitespace() || c == ','))
            .find(|token| token == connector)
            .map(String::from)
            .unwrap_or_default();
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAPTOP_ONLY: &str = "\
supports-mirroring: true
layout-mode: logical
supports-changing-layout-mode: false
global-scale-required: false

logical monitor 0:
x: 0, y: 0, scale: 1, rotation: normal, primary: yes
associated physical monitors:
\teDP-1 BOE 0x0a1d 0x00000000

eDP-1 BOE 0x0a1d 0x00000000
is-builtin: yes
display-name: Built-in display
\t1920x1080@60.020\t1920x1080\t60.0199\t1.0\t[1.0, 2.0]\tcurrent preferred
";

    #[test]
    fn parses_gnome_randr_output() {
        let state = parse_query_output(LAPTOP_ONLY);
        assert_eq!(state.rotation, Some(Rotation::Normal));
        assert_eq!(state.raw_rotation, "normal");
        assert!(state.is_internal_display);
        assert_eq!(state.connector_name, "eDP-1");
    }

    #[test]
    fn parses_single_line_report() {
        let state = parse_query_output(
            "eDP-1 connected primary 1920x1080... rotation: normal, is-builtin: true\n",
        );
        assert_eq!(
            state,
            DisplayQueryResult {
                rotation: Some(Rotation::Normal),
                raw_rotation: "normal".into(),
                is_internal_display: true,
                connector_name: "eDP-1".into(),
            }
        );
    }

    #[test]
    fn builtin_flag_values() {
        for (value, expected) in [
            ("yes", true),
            ("true", true),
            ("TRUE", true),
            ("1", true),
            ("no", false),
            ("false", false),
            ("", false),
        ]
        .iter()
        {
            let state = parse_query_output(&format!("is-builtin: {}\n", value));
            assert_eq!(state.is_internal_display, *expected, "value {:?}", value);
        }

        assert!(!parse_query_output("rotation: normal\n").is_internal_display);
    }

    #[test]
    fn connector_resolution() {
        assert_eq!(
            parse_query_output("foo eDP-1 bar\nLVDS1 baz\n").connector_name,
            "eDP-1"
        );
        assert_eq!(
            parse_query_output("monitor LVDS1 connected\n").connector_name,
            "LVDS1"
        );
        assert_eq!(
            parse_query_output("HDMI-1 connected\nrotation: left\n").connector_name,
            ""
        );
        // A line mentioning the connector without the exact token.
        assert_eq!(parse_query_output("eDP-10 connected\n").connector_name, "");
    }

    #[test]
    fn missing_fields_default() {
        let state = parse_query_output("");
        assert_eq!(state, DisplayQueryResult::default());

        let state = parse_query_output("rotation:\nis-builtin\n");
        assert_eq!(state.rotation, None);
        assert_eq!(state.raw_rotation, "");
        assert!(!state.is_internal_display);
    }

    #[test]
    fn unknown_rotation_keeps_raw_token() {
        let state = parse_query_output("x: 0, rotation: sideways, primary: no\n");
        assert_eq!(state.rotation, None);
        assert_eq!(state.raw_rotation, "sideways");
    }

    #[test]
    fn last_matching_line_wins() {
        let state = parse_query_output(
            "x: 0, rotation: normal, primary: yes\nx: 1920, rotation: left, primary: no\n",
        );
        assert_eq!(state.rotation, Some(Rotation::Left));
    }

    #[test]
    fn key_must_stand_alone() {
        let state = parse_query_output("autorotation: left\n");
        assert_eq!(state.rotation, None);
    }

    #[test]
    fn parsing_is_repeatable() {
        assert_eq!(
            parse_query_output(LAPTOP_ONLY),
            parse_query_output(LAPTOP_ONLY)
        );
    }
}
