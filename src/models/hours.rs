//! Hour arithmetic shared by the models and the engine.
//!
//! Durations are measured in whole seconds and converted to [`Decimal`] hours, so
//! sums of rounded daily figures reconcile exactly with their totals.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

const SECONDS_PER_HOUR: i64 = 3600;

/// Converts a number of seconds to unrounded hours.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::hours_from_seconds;
/// use rust_decimal::Decimal;
///
/// assert_eq!(hours_from_seconds(5400), Decimal::new(15, 1)); // 1.5 hours
/// ```
pub fn hours_from_seconds(seconds: i64) -> Decimal {
    Decimal::from(seconds) / Decimal::from(SECONDS_PER_HOUR)
}

/// Returns the unrounded number of hours between two instants.
///
/// Negative when `end` precedes `start`.
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    hours_from_seconds((end - start).num_seconds())
}

/// Rounds an hour figure to 2 decimal places, half away from zero.
///
/// # Examples
///
/// ```
/// use attendance_engine::models::round_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hours = Decimal::from_str("8.0666666").unwrap();
/// assert_eq!(round_hours(hours), Decimal::from_str("8.07").unwrap());
/// ```
pub fn round_hours(hours: Decimal) -> Decimal {
    hours.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a ratio (e.g. attendance rate) to 4 decimal places.
pub fn round_ratio(ratio: Decimal) -> Decimal {
    ratio.round_dp_with_strategy(4, RoundingStrategy::MidpointAwayFromZero)
}
