//! Relative "posted X ago" phrases to absolute dates.
//!
//! The closed set of idioms seen on job boards:
//! - `today`, `yesterday`
//! - `N day(s) ago`, `N week(s) ago`, `N month(s) ago`
//! - `N hour(s) ago`, `N minute(s) ago`
//!
//! Anything else resolves to today. Parsing never fails.

use chrono::{Duration, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DAYS: Regex = Regex::new(r"(\d+)\s+day").expect("valid regex");
    static ref WEEKS: Regex = Regex::new(r"(\d+)\s+week").expect("valid regex");
    static ref MONTHS: Regex = Regex::new(r"(\d+)\s+month").expect("valid regex");
}

/// Months are approximated, not calendar-accurate.
const DAYS_PER_MONTH: i64 = 30;

/// Resolve a posted phrase relative to `today`.
pub fn parse_posted_date(text: &str, today: NaiveDate) -> NaiveDate {
    let text = text.trim().to_lowercase();

    if text.contains("today") {
        return today;
    }
    if text.contains("yesterday") {
        return days_before(today, 1);
    }

    let units: [(&Regex, i64); 3] = [(&*DAYS, 1), (&*WEEKS, 7), (&*MONTHS, DAYS_PER_MONTH)];
    for (pattern, days_per_unit) in units {
        if let Some(count) = leading_count(pattern, &text) {
            return days_before(today, count.saturating_mul(days_per_unit));
        }
    }

    // "hour"/"minute" phrasing and unrecognized text both land on today.
    today
}

/// Resolve a posted phrase against the local calendar date.
pub fn posted_date_today(text: &str) -> NaiveDate {
    parse_posted_date(text, Local::now().date_naive())
}

fn leading_count(pattern: &Regex, text: &str) -> Option<i64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
}

/// Dates never go below 0001-01-01, so they always print as `YYYY-MM-DD`.
fn days_before(today: NaiveDate, days: i64) -> NaiveDate {
    let floor = NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN);
    Duration::try_days(days)
        .and_then(|delta| today.checked_sub_signed(delta))
        .map_or(floor, |date| date.max(floor))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn test_literal_phrases() {
        assert_eq!(parse_posted_date("Today", today()), today());
        assert_eq!(parse_posted_date("  Posted today ", today()), today());
        assert_eq!(
            parse_posted_date("Yesterday", today()),
            NaiveDate::from_ymd_opt(2024, 3, 14).unwrap()
        );
    }

    #[test]
    fn test_days_weeks_months() {
        assert_eq!(
            parse_posted_date("2 days ago", today()),
            NaiveDate::from_ymd_opt(2024, 3, 13).unwrap()
        );
        assert_eq!(
            parse_posted_date("1 week ago", today()),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap()
        );
        assert_eq!(
            parse_posted_date("3 Months ago", today()),
            today() - Duration::days(90)
        );
    }

    #[test]
    fn test_day_takes_priority_over_week() {
        // Contains both a day and a week count; day wins.
        assert_eq!(
            parse_posted_date("5 days ago (1 week window)", today()),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
    }

    #[test]
    fn test_hours_and_unknown_fall_back_to_today() {
        assert_eq!(parse_posted_date("3 hours ago", today()), today());
        assert_eq!(parse_posted_date("45 minutes ago", today()), today());
        assert_eq!(parse_posted_date("just now", today()), today());
        assert_eq!(parse_posted_date("", today()), today());
        assert_eq!(parse_posted_date("Few days ago", today()), today());
    }

    #[test]
    fn test_absurd_counts_do_not_panic() {
        let parsed = parse_posted_date("99999999999999999999 days ago", today());
        assert_eq!(parsed, today());

        let earliest = NaiveDate::from_ymd_opt(1, 1, 1).unwrap();
        for phrase in ["9999999999 months ago", "800000 days ago", "999999 weeks ago"] {
            let parsed = parse_posted_date(phrase, today());
            assert_eq!(parsed, earliest, "{phrase}");
            assert_eq!(parsed.to_string(), "0001-01-01");
        }
    }
}
