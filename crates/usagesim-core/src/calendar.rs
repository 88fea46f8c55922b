//! Date-range helpers for walking a simulated period.

use chrono::{Datelike, NaiveDate, Weekday};

/// Inclusive day count between two dates; both endpoints generate usage.
pub fn day_span(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Number of simulation weeks covering `days`, rounded up, never below 1.
pub fn weeks_in(days: i64) -> u32 {
    ((days.max(1) + 6) / 7) as u32
}

/// 1-based week index for a 1-based day of the range, clamped to the final
/// week so trailing partial weeks reuse the last computed thresholds.
pub fn week_of(day: i64, days: i64) -> u32 {
    let weeks = weeks_in(days);
    (((day.max(1) + 6) / 7) as u32).clamp(1, weeks)
}

/// Saturday or Sunday.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Whether this date should be skipped under the weekend-exclusion setting.
pub fn excluded_day(date: NaiveDate, exclude_weekends: bool) -> bool {
    exclude_weekends && is_weekend(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_span_is_inclusive() {
        assert_eq!(day_span(date(2024, 1, 1), date(2024, 1, 1)), 1);
        assert_eq!(day_span(date(2024, 1, 1), date(2024, 1, 28)), 28);
        assert_eq!(day_span(date(2024, 1, 1), date(2024, 1, 29)), 29);
    }

    #[test]
    fn weeks_round_up_with_floor_of_one() {
        assert_eq!(weeks_in(1), 1);
        assert_eq!(weeks_in(7), 1);
        assert_eq!(weeks_in(8), 2);
        assert_eq!(weeks_in(28), 4);
        assert_eq!(weeks_in(29), 5);
        assert_eq!(weeks_in(0), 1);
    }

    #[test]
    fn week_of_walks_the_range() {
        assert_eq!(week_of(1, 28), 1);
        assert_eq!(week_of(7, 28), 1);
        assert_eq!(week_of(8, 28), 2);
        assert_eq!(week_of(28, 28), 4);
        // Trailing partial week clamps to the final computed week.
        assert_eq!(week_of(29, 29), 5);
        assert_eq!(week_of(30, 29), 5);
    }

    #[test]
    fn weekend_detection() {
        // 2024-01-06 is a Saturday.
        assert!(is_weekend(date(2024, 1, 6)));
        assert!(is_weekend(date(2024, 1, 7)));
        assert!(!is_weekend(date(2024, 1, 8)));

        assert!(excluded_day(date(2024, 1, 6), true));
        assert!(!excluded_day(date(2024, 1, 6), false));
        assert!(!excluded_day(date(2024, 1, 8), true));
    }
}
