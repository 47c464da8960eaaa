//! Fixed-pattern parsers for `xinput` text output.
//!
//! `xinput` has no machine-readable output mode, so the toggle matches two
//! fixed patterns against its human-readable listings.
//!
//! # Device listing
//!
//! ```text
//! ⎜   ↳ SYNA7DB5:01 06CB:19AC                   	id=11	[slave  pointer  (2)]
//! ```
//!
//! A line matches when it contains the hardware identifier followed, at
//! least one character later, by `id=<digits>`.  When a line carries several
//! `id=` tokens the last one wins.  Lines are scanned top to bottom.
//!
//! # Property listing
//!
//! ```text
//! Device 'SYNA7DB5:01 06CB:19AC':
//! 	Device Enabled (143):	1
//! ```
//!
//! A line matches when it contains the property label followed, at least one
//! character later, by `:`, one or more whitespace characters and a run of
//! digits.  Only `0` and `1` are accepted as values.

use crate::domain::device_id::DeviceId;

/// Returns the id of the first device whose listing line matches `identifier`.
///
/// Returns `None` if no line matches.
pub fn parse_device_id(output: &str, identifier: &str) -> Option<DeviceId> {
    output
        .lines()
        .find_map(|line| device_id_in_line(line, identifier))
}

/// Returns the ids of every listing line that matches `identifier`, in
/// output order.
///
/// The first element is the one [`parse_device_id`] would return.
pub fn find_device_ids(output: &str, identifier: &str) -> Vec<DeviceId> {
    output
        .lines()
        .filter_map(|line| device_id_in_line(line, identifier))
        .collect()
}

/// Reads the enabled flag from a `list-props` listing.
///
/// Returns `Some(true)` for `1`, `Some(false)` for `0`, and `None` when the
/// property is absent or its first matching line carries any other value.
pub fn parse_enabled_state(output: &str, label: &str) -> Option<bool> {
    let value = output
        .lines()
        .find_map(|line| property_value_in_line(line, label))?;

    match value {
        "1" => Some(true),
        "0" => Some(false),
        _ => None,
    }
}

fn device_id_in_line(line: &str, identifier: &str) -> Option<DeviceId> {
    let tail = after_marker(line, identifier)?;

    tail.rmatch_indices("id=").find_map(|(pos, token)| {
        let digits = leading_digits(&tail[pos + token.len()..]);
        DeviceId::new(digits).ok()
    })
}

fn property_value_in_line<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let tail = after_marker(line, label)?;

    tail.rmatch_indices(':').find_map(|(pos, _)| {
        let after_colon = &tail[pos + 1..];
        let value = after_colon.trim_start();
        if value.len() == after_colon.len() {
            return None;
        }
        let digits = leading_digits(value);
        (!digits.is_empty()).then_some(digits)
    })
}

/// Returns the part of `line` that starts one character after the first
/// occurrence of `marker`.
fn after_marker<'a>(line: &'a str, marker: &str) -> Option<&'a str> {
    if marker.is_empty() {
        return None;
    }
    let start = line.find(marker)? + marker.len();
    let mut rest = line[start..].chars();
    rest.next()?;
    Some(rest.as_str())
}

fn leading_digits(text: &str) -> &str {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENT: &str = "06CB:19AC";
    const LABEL: &str = "Device Enabled";

    // ── Device listing ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_device_id_extracts_trailing_id() {
        let out = "⎜   ↳ SYNA7DB5:01 06CB:19AC \tid=11\t[slave  pointer  (2)]";
        assert_eq!(parse_device_id(out, IDENT), Some(DeviceId::new("11").unwrap()));
    }

    #[test]
    fn test_parse_device_id_returns_none_without_identifier() {
        let out = "⎡ Virtual core pointer \tid=2\t[master pointer  (3)]\n\
                   ⎜   ↳ Virtual core XTEST pointer \tid=4\t[slave  pointer  (2)]";
        assert_eq!(parse_device_id(out, IDENT), None);
    }

    #[test]
    fn test_parse_device_id_ignores_id_on_a_different_line() {
        let out = "   ↳ Touch 06CB:19AC panel\n   ↳ Other device id=9";
        assert_eq!(parse_device_id(out, IDENT), None);
    }

    #[test]
    fn test_parse_device_id_ignores_id_before_identifier() {
        let out = "id=5 06CB:19AC touch";
        assert_eq!(parse_device_id(out, IDENT), None);
    }

    #[test]
    fn test_parse_device_id_requires_a_gap_after_identifier() {
        // The identifier must be followed by at least one character before `id=`.
        assert_eq!(parse_device_id("06CB:19ACid=3", IDENT), None);
        assert_eq!(
            parse_device_id("06CB:19AC id=3", IDENT),
            Some(DeviceId::new("3").unwrap())
        );
    }

    #[test]
    fn test_parse_device_id_prefers_last_id_token_on_line() {
        let out = "06CB:19AC pid=4 id=17";
        assert_eq!(parse_device_id(out, IDENT), Some(DeviceId::new("17").unwrap()));
    }

    #[test]
    fn test_parse_device_id_skips_trailing_id_token_without_digits() {
        let out = "06CB:19AC id=21 id=";
        assert_eq!(parse_device_id(out, IDENT), Some(DeviceId::new("21").unwrap()));
    }

    #[test]
    fn test_parse_device_id_is_case_sensitive() {
        assert_eq!(parse_device_id("06cb:19ac id=3", IDENT), None);
    }

    #[test]
    fn test_parse_device_id_first_matching_line_wins() {
        let out = "06CB:19AC Touch id=11\n06CB:19AC Stylus id=12";
        assert_eq!(parse_device_id(out, IDENT), Some(DeviceId::new("11").unwrap()));
    }

    #[test]
    fn test_find_device_ids_lists_every_match_in_order() {
        let out = "06CB:19AC Touch id=11\nkeyboard id=3\n06CB:19AC Stylus id=12";
        let ids: Vec<String> = find_device_ids(out, IDENT)
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(ids, vec!["11", "12"]);
    }

    #[test]
    fn test_empty_identifier_never_matches() {
        assert_eq!(parse_device_id("anything id=1", ""), None);
    }

    // ── Property listing ──────────────────────────────────────────────────────

    #[test]
    fn test_parse_enabled_state_one_means_enabled() {
        assert_eq!(parse_enabled_state("Device Enabled (143): 1", LABEL), Some(true));
    }

    #[test]
    fn test_parse_enabled_state_zero_means_disabled() {
        assert_eq!(parse_enabled_state("Device Enabled (143): 0", LABEL), Some(false));
    }

    #[test]
    fn test_parse_enabled_state_accepts_tab_separator() {
        let out = "Device 'SYNA7DB5:01 06CB:19AC':\n\tDevice Enabled (143):\t1\n";
        assert_eq!(parse_enabled_state(out, LABEL), Some(true));
    }

    #[test]
    fn test_parse_enabled_state_absent_label_is_none() {
        let out = "Device 'X':\n\tCoordinate Transformation Matrix (145):\t1.0, 0.0";
        assert_eq!(parse_enabled_state(out, LABEL), None);
    }

    #[test]
    fn test_parse_enabled_state_rejects_values_other_than_zero_or_one() {
        assert_eq!(parse_enabled_state("Device Enabled (143): 2", LABEL), None);
        assert_eq!(parse_enabled_state("Device Enabled (143): 10", LABEL), None);
    }

    #[test]
    fn test_parse_enabled_state_requires_whitespace_after_colon() {
        assert_eq!(parse_enabled_state("Device Enabled (143):1", LABEL), None);
    }

    #[test]
    fn test_parse_enabled_state_requires_a_digit_value() {
        assert_eq!(parse_enabled_state("Device Enabled (143): on", LABEL), None);
    }

    #[test]
    fn test_parse_enabled_state_skips_unusable_label_lines() {
        let out = "Device Enabled\n\tDevice Enabled (143):\t0";
        assert_eq!(parse_enabled_state(out, LABEL), Some(false));
    }
}
