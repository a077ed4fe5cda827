use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::store::DateRange;

/// The five fixed timeframe options of the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFilter {
    #[default]
    All,
    #[serde(rename = "past-7-days")]
    Past7Days,
    #[serde(rename = "past-30-days")]
    Past30Days,
    ThisYear,
    LastYear,
}

impl TimeFilter {
    pub const ALL: [TimeFilter; 5] = [
        TimeFilter::All,
        TimeFilter::Past7Days,
        TimeFilter::Past30Days,
        TimeFilter::ThisYear,
        TimeFilter::LastYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeFilter::All => "all",
            TimeFilter::Past7Days => "past-7-days",
            TimeFilter::Past30Days => "past-30-days",
            TimeFilter::ThisYear => "this-year",
            TimeFilter::LastYear => "last-year",
        }
    }

    /// Inclusive `content_date` range relative to `today`; `None` for `All`.
    pub fn range(&self, today: NaiveDate) -> Option<DateRange> {
        let year_bounds = |year: i32| {
            Some(DateRange {
                from: NaiveDate::from_ymd_opt(year, 1, 1)?,
                to: NaiveDate::from_ymd_opt(year, 12, 31)?,
            })
        };
        match self {
            TimeFilter::All => None,
            TimeFilter::Past7Days => Some(DateRange {
                from: today - Duration::days(7),
                to: today,
            }),
            TimeFilter::Past30Days => Some(DateRange {
                from: today - Duration::days(30),
                to: today,
            }),
            TimeFilter::ThisYear => year_bounds(today.year()),
            TimeFilter::LastYear => year_bounds(today.year() - 1),
        }
    }
}

impl fmt::Display for TimeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeFilter::ALL
            .into_iter()
            .find(|f| f.as_str() == s.trim())
            .ok_or_else(|| format!("unknown timeframe '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_all_has_no_range() {
        assert_eq!(TimeFilter::All.range(d(2025, 6, 15)), None);
    }

    #[test]
    fn test_past_days_ranges_end_today() {
        let today = d(2025, 3, 3);
        assert_eq!(
            TimeFilter::Past7Days.range(today),
            Some(DateRange {
                from: d(2025, 2, 24),
                to: today
            })
        );
        assert_eq!(
            TimeFilter::Past30Days.range(today),
            Some(DateRange {
                from: d(2025, 2, 1),
                to: today
            })
        );
    }

    #[test]
    fn test_year_ranges_cover_whole_year() {
        let today = d(2025, 6, 15);
        assert_eq!(
            TimeFilter::ThisYear.range(today),
            Some(DateRange {
                from: d(2025, 1, 1),
                to: d(2025, 12, 31)
            })
        );
        assert_eq!(
            TimeFilter::LastYear.range(today),
            Some(DateRange {
                from: d(2024, 1, 1),
                to: d(2024, 12, 31)
            })
        );
    }

    #[test]
    fn test_wire_names() {
        for filter in TimeFilter::ALL {
            let json = serde_json::to_string(&filter).unwrap();
            assert_eq!(json, format!("\"{}\"", filter.as_str()));
            assert_eq!(filter.as_str().parse::<TimeFilter>().unwrap(), filter);
        }
        assert!("yesterday".parse::<TimeFilter>().is_err());
    }
}
