//! Validated report date ranges.

use chrono::{NaiveDate, TimeDelta};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// An inclusive range of calendar days a report covers.
///
/// Construction enforces the caller-side limits, so the engine only ever sees
/// ranges it can process.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
/// let range = DateRange::new(start, end, 31).unwrap();
/// assert_eq!(range.num_days(), 5);
///
/// assert!(DateRange::new(end, start, 31).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting reversed ranges and spans over `max_days`.
    pub fn new(start: NaiveDate, end: NaiveDate, max_days: i64) -> EngineResult<Self> {
        if end < start {
            return Err(EngineError::InvalidDateRange {
                start,
                end,
                message: "end date is before start date".to_string(),
            });
        }

        let range = Self { start, end };
        if range.num_days() > max_days {
            return Err(EngineError::InvalidDateRange {
                start,
                end,
                message: format!(
                    "range spans {} days, the limit is {}",
                    range.num_days(),
                    max_days
                ),
            });
        }

        Ok(range)
    }

    /// First day of the range.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of calendar days in the range.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if `date` lies within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates over every calendar day in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Returns the window scans must be fetched for.
    ///
    /// Night-shift tails land on the day after their workday, so the window extends
    /// one day past each end of the range.
    pub fn query_window(&self) -> (NaiveDate, NaiveDate) {
        let one_day = TimeDelta::days(1);
        (
            self.start.checked_sub_signed(one_day).unwrap_or(self.start),
            self.end.checked_add_signed(one_day).unwrap_or(self.end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_single_day_range() {
        let range = DateRange::new(make_date("2025-03-03"), make_date("2025-03-03"), 1).unwrap();
        assert_eq!(range.num_days(), 1);
        assert_eq!(range.days().collect::<Vec<_>>(), vec![make_date("2025-03-03")]);
    }

    #[test]
    fn test_days_enumerates_inclusive_range() {
        let range = DateRange::new(make_date("2025-02-27"), make_date("2025-03-02"), 31).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(
            days,
            vec![
                make_date("2025-02-27"),
                make_date("2025-02-28"),
                make_date("2025-03-01"),
                make_date("2025-03-02"),
            ]
        );
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let result = DateRange::new(make_date("2025-03-10"), make_date("2025-03-01"), 31);
        match result {
            Err(EngineError::InvalidDateRange { message, .. }) => {
                assert!(message.contains("before start"));
            }
            _ => panic!("Expected InvalidDateRange error"),
        }
    }

    #[test]
    fn test_range_over_limit_is_rejected() {
        let result = DateRange::new(make_date("2025-01-01"), make_date("2025-02-01"), 31);
        match result {
            Err(EngineError::InvalidDateRange { message, .. }) => {
                assert!(message.contains("32 days"));
            }
            _ => panic!("Expected InvalidDateRange error"),
        }
    }

    #[test]
    fn test_query_window_extends_one_day_each_side() {
        let range = DateRange::new(make_date("2025-03-03"), make_date("2025-03-07"), 31).unwrap();
        assert_eq!(
            range.query_window(),
            (make_date("2025-03-02"), make_date("2025-03-08"))
        );
    }

    #[test]
    fn test_contains() {
        let range = DateRange::new(make_date("2025-03-03"), make_date("2025-03-07"), 31).unwrap();
        assert!(range.contains(make_date("2025-03-03")));
        assert!(range.contains(make_date("2025-03-07")));
        assert!(!range.contains(make_date("2025-03-08")));
    }
}
