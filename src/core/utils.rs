// Author: Dustin Pilgrim
// License: MIT

/// Milliseconds to whole seconds, truncating toward zero.
pub fn ms_to_secs(ms: u64) -> u64 {
    ms / 1000
}

/// Human readable rendering of a span of seconds.
///
/// Hours and minutes are shown when either is non-zero (leftover seconds are
/// dropped); otherwise the raw seconds are shown.
pub fn format_duration(total_secs: u64) -> String {
    let minutes_total = total_secs / 60;
    let hours = minutes_total / 60;
    let minutes = minutes_total % 60;

    if hours == 0 && minutes == 0 {
        return plural(total_secs, "second");
    }

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&plural(hours, "hour"));
    }
    if minutes > 0 {
        if hours > 0 {
            out.push_str(" and ");
        }
        out.push_str(&plural(minutes, "minute"));
    }
    out
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("{n} {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Re-sums "N hour(s) and M minute(s)" / "S second(s)" into seconds.
    fn parse_back(s: &str) -> u64 {
        let mut total = 0;
        for part in s.split(" and ") {
            let mut it = part.split_whitespace();
            let n: u64 = it.next().unwrap().parse().unwrap();
            let unit = it.next().unwrap();
            total += match unit.trim_end_matches('s') {
                "hour" => n * 3600,
                "minute" => n * 60,
                "second" => n,
                other => panic!("unexpected unit {other}"),
            };
        }
        total
    }

    #[test]
    fn zero_renders_seconds() {
        assert_eq!(format_duration(0), "0 seconds");
    }

    #[test]
    fn under_a_minute_renders_seconds() {
        assert_eq!(format_duration(1), "1 second");
        assert_eq!(format_duration(59), "59 seconds");
    }

    #[test]
    fn hours_and_minutes_drop_seconds() {
        assert_eq!(format_duration(3661), "1 hour and 1 minute");
        assert_eq!(format_duration(3150), "52 minutes");
        assert_eq!(format_duration(7200), "2 hours");
        assert_eq!(format_duration(90), "1 minute");
    }

    #[test]
    fn never_empty() {
        for t in (0..20_000).step_by(7) {
            assert!(!format_duration(t).is_empty(), "empty for {t}");
        }
    }

    #[test]
    fn whole_components_sum_back() {
        for t in 0..60 {
            assert_eq!(parse_back(&format_duration(t)), t);
        }
        for m in 0..300 {
            let t = m * 60;
            assert_eq!(parse_back(&format_duration(t)), t);
        }
    }

    #[test]
    fn ms_conversion_truncates() {
        assert_eq!(ms_to_secs(0), 0);
        assert_eq!(ms_to_secs(999), 0);
        assert_eq!(ms_to_secs(149_999), 149);
        assert_eq!(ms_to_secs(150_000), 150);
    }
}
