//! Human duration strings.
//!
//! Input is `[[h:]m:]s` with non-negative integer fields; output is either a
//! compact label (`"1h 30m"`) or a zero-padded countdown (`"01:30:00"`).

/// Parse `s`, `m:s` or `h:m:s` into whole seconds.
///
/// Returns `None` for empty input, non-numeric or negative fields, more than
/// three fields, or a total of zero. Fields are not range-checked, so `"90:00"`
/// is 5400 seconds.
pub fn parse_duration(text: &str) -> Option<u64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let fields = trimmed
        .split(':')
        .map(parse_field)
        .collect::<Option<Vec<u64>>>()?;

    let total = match fields.as_slice() {
        [s] => *s,
        [m, s] => m.checked_mul(60)?.checked_add(*s)?,
        [h, m, s] => h
            .checked_mul(3600)?
            .checked_add(m.checked_mul(60)?)?
            .checked_add(*s)?,
        _ => return None,
    };

    (total > 0).then_some(total)
}

fn parse_field(field: &str) -> Option<u64> {
    let field = field.trim();
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// `"2h 5m"`, `"2h"`, `"5m 10s"`, `"5m"` or `"10s"`.
pub fn format_duration_label(total_seconds: u64) -> String {
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;

    match (h, m, s) {
        (h, m, _) if h > 0 && m > 0 => format!("{h}h {m}m"),
        (h, _, _) if h > 0 => format!("{h}h"),
        (_, m, s) if m > 0 && s > 0 => format!("{m}m {s}s"),
        (_, m, _) if m > 0 => format!("{m}m"),
        _ => format!("{s}s"),
    }
}

/// `H:MM:SS` (hours zero-padded to two digits) when there are hours, else `MM:SS`.
pub fn format_countdown(total_seconds: u64) -> String {
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;
    let s = total_seconds % 60;

    if h > 0 {
        format!("{h:02}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Hours and minutes only, for totals: `"3h 20m"`, `"3h"`, `"20m"`, `"0m"`.
pub fn format_hours_minutes(total_seconds: u64) -> String {
    let h = total_seconds / 3600;
    let m = (total_seconds % 3600) / 60;

    match (h, m) {
        (0, 0) => "0m".to_string(),
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_one_to_three_fields() {
        assert_eq!(parse_duration("45"), Some(45));
        assert_eq!(parse_duration("25:00"), Some(1500));
        assert_eq!(parse_duration("1:02:03"), Some(3723));
        assert_eq!(parse_duration(" 90:00 "), Some(5400));
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("   "), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("0:0:0:0"), None);
        assert_eq!(parse_duration("0"), None);
        assert_eq!(parse_duration("0:00"), None);
        assert_eq!(parse_duration("-5"), None);
        assert_eq!(parse_duration("1:"), None);
        assert_eq!(parse_duration("1.5"), None);
    }

    #[test]
    fn labels_prefer_compound_forms() {
        assert_eq!(format_duration_label(0), "0s");
        assert_eq!(format_duration_label(42), "42s");
        assert_eq!(format_duration_label(300), "5m");
        assert_eq!(format_duration_label(310), "5m 10s");
        assert_eq!(format_duration_label(7200), "2h");
        assert_eq!(format_duration_label(7210), "2h");
        assert_eq!(format_duration_label(5400), "1h 30m");
    }

    #[test]
    fn countdown_pads_fields() {
        assert_eq!(format_countdown(0), "00:00");
        assert_eq!(format_countdown(65), "01:05");
        assert_eq!(format_countdown(3723), "01:02:03");
    }

    #[test]
    fn hours_minutes_for_totals() {
        assert_eq!(format_hours_minutes(0), "0m");
        assert_eq!(format_hours_minutes(59), "0m");
        assert_eq!(format_hours_minutes(1200), "20m");
        assert_eq!(format_hours_minutes(3600), "1h");
        assert_eq!(format_hours_minutes(12000), "3h 20m");
    }

    proptest! {
        #[test]
        fn countdown_round_trips_parsed_totals(h in 0u64..200, m in 0u64..120, s in 0u64..120) {
            let input = format!("{h}:{m}:{s}");
            if let Some(total) = parse_duration(&input) {
                prop_assert_eq!(parse_duration(&format_countdown(total)), Some(total));
            } else {
                prop_assert_eq!(h * 3600 + m * 60 + s, 0);
            }
        }
    }
}
