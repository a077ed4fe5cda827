//! Content-date detection.
//!
//! Rules, first satisfied wins:
//! 1. "last year"  → Jan 1 of the previous year
//! 2. "this year"  → Jan 1 of the current year
//! 3. month name + whitespace + 4 digits → 1st of that month; when several
//!    months appear the earliest calendar month is taken
//! 4. otherwise unset

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

static MONTH_YEAR: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"(?i)({})\s+(\d{{4}})", MONTHS.join("|"));
    Regex::new(&pattern).expect("month/year pattern is valid")
});

pub fn detect_content_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lower = text.to_lowercase();

    if lower.contains("last year") {
        return NaiveDate::from_ymd_opt(today.year() - 1, 1, 1);
    }
    if lower.contains("this year") {
        return NaiveDate::from_ymd_opt(today.year(), 1, 1);
    }

    MONTH_YEAR
        .captures_iter(&lower)
        .filter_map(|caps| {
            let month = MONTHS.iter().position(|m| *m == &caps[1])? as u32 + 1;
            let year: i32 = caps[2].parse().ok()?;
            Some((month, year))
        })
        // min_by_key keeps the first of equal keys, so ties go to the leftmost match.
        .min_by_key(|(month, _)| *month)
        .and_then(|(month, year)| NaiveDate::from_ymd_opt(year, month, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_last_year() {
        assert_eq!(detect_content_date("last year grid", today()), ymd(2024, 1, 1));
    }

    #[test]
    fn test_this_year() {
        assert_eq!(
            detect_content_date("This Year on tiktok", today()),
            ymd(2025, 1, 1)
        );
    }

    #[test]
    fn test_last_year_beats_month_name() {
        assert_eq!(
            detect_content_date("March 2021 vs last year", today()),
            ymd(2024, 1, 1)
        );
    }

    #[test]
    fn test_this_year_beats_month_name() {
        assert_eq!(
            detect_content_date("this year, not March 2021", today()),
            ymd(2025, 1, 1)
        );
    }

    #[test]
    fn test_last_year_beats_this_year() {
        assert_eq!(
            detect_content_date("this year vs last year", today()),
            ymd(2024, 1, 1)
        );
    }

    #[test]
    fn test_month_and_year() {
        assert_eq!(
            detect_content_date("Show my March 2024 TikToks", today()),
            ymd(2024, 3, 1)
        );
    }

    #[test]
    fn test_month_with_extra_whitespace_and_case() {
        assert_eq!(
            detect_content_date("SEPTEMBER \t 2019 recap", today()),
            ymd(2019, 9, 1)
        );
    }

    #[test]
    fn test_earliest_calendar_month_wins() {
        assert_eq!(
            detect_content_date("december 2023 and march 2024", today()),
            ymd(2024, 3, 1)
        );
    }

    #[test]
    fn test_same_month_twice_takes_leftmost() {
        assert_eq!(
            detect_content_date("may 2020 then may 2022", today()),
            ymd(2020, 5, 1)
        );
    }

    #[test]
    fn test_month_without_year_is_unset() {
        assert_eq!(detect_content_date("march madness", today()), None);
        assert_eq!(detect_content_date("march 24", today()), None);
    }

    #[test]
    fn test_no_date_phrase() {
        assert_eq!(detect_content_date("my best posts", today()), None);
    }
}
