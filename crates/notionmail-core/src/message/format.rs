//! Human-readable timestamp rendering.

use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDate, TimeZone};

/// Renders an instant as e.g. `January 1st, 2023 @ 12:00am`.
#[must_use]
pub fn format_timestamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "{} @ {}",
        format_date(&instant.date_naive()),
        instant.format("%-I:%M%P")
    )
}

/// Renders a calendar date as e.g. `January 1st, 2023`.
#[must_use]
pub fn format_date(date: &NaiveDate) -> String {
    let day = date.day();
    format!(
        "{} {day}{}, {}",
        date.format("%B"),
        ordinal_suffix(day),
        date.year()
    )
}

/// Renders a stored timestamp for display.
///
/// RFC 3339 instants are shown in `offset`, or the local time zone when
/// `None`. Bare dates are shown without a time. Anything else is returned
/// unchanged.
#[must_use]
pub fn humanize(raw: &str, offset: Option<&FixedOffset>) -> String {
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return match offset {
            Some(offset) => format_timestamp(&instant.with_timezone(offset)),
            None => format_timestamp(&instant.with_timezone(&Local)),
        };
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |date| format_date(&date))
}

const fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_format_midnight() {
        let instant = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(&instant), "January 1st, 2023 @ 12:00am");
    }

    #[test]
    fn test_format_afternoon() {
        let instant = Utc.with_ymd_and_hms(2024, 3, 22, 15, 7, 0).unwrap();
        assert_eq!(format_timestamp(&instant), "March 22nd, 2024 @ 3:07pm");
    }

    #[test]
    fn test_ordinal_suffixes() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (30, "th"),
            (31, "st"),
        ];
        for (day, suffix) in cases {
            assert_eq!(ordinal_suffix(day), suffix, "day {day}");
        }
    }

    #[test]
    fn test_humanize_converts_offset() {
        let shown = humanize("2023-01-01T00:00:00Z", Some(&utc()));
        assert_eq!(shown, "January 1st, 2023 @ 12:00am");

        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let shown = humanize("2023-01-01T00:00:00Z", Some(&tokyo));
        assert_eq!(shown, "January 1st, 2023 @ 9:00am");
    }

    #[test]
    fn test_humanize_date_only() {
        assert_eq!(humanize("2023-07-04", Some(&utc())), "July 4th, 2023");
    }

    #[test]
    fn test_humanize_keeps_unparseable_input() {
        assert_eq!(humanize("yesterday", None), "yesterday");
    }

    proptest! {
        #[test]
        fn rendering_never_panics(secs in 0i64..4_102_444_800) {
            let instant = Utc.timestamp_opt(secs, 0).unwrap();
            let shown = humanize(&instant.to_rfc3339(), Some(&utc()));
            prop_assert!(shown.contains(" @ "));
            prop_assert!(shown.ends_with("am") || shown.ends_with("pm"));
        }
    }
}
