//! Night-shift day boundaries and logical workday remapping.
//!
//! A night shift that starts at 22:00 produces its exit scan on the next calendar
//! day. Each overnight shift gets a boundary hour halfway through its off-duty
//! window; scans before that hour belong to the previous day's workday.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use tracing::trace;

use crate::models::ShiftDefinition;

/// Returns the boundary hour for a shift, or `None` for day shifts.
///
/// # Examples
///
/// ```
/// use attendance_engine::engine::night_shift_boundary;
/// use attendance_engine::models::ShiftDefinition;
/// use chrono::NaiveTime;
///
/// let night = ShiftDefinition::new(
///     "Nocturno",
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
/// );
/// assert_eq!(night_shift_boundary(&night), Some(14));
/// ```
pub fn night_shift_boundary(shift: &ShiftDefinition) -> Option<u32> {
    shift.night_boundary_hour()
}

/// Returns the logical workday a scan belongs to.
///
/// Scans whose hour is before `boundary_hour` are attributed to the previous
/// calendar date. Without a boundary the calendar date is kept.
///
/// # Examples
///
/// ```
/// use attendance_engine::engine::logical_workday;
/// use chrono::NaiveDate;
///
/// let day2 = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// let exit = day2.and_hms_opt(6, 5, 0).unwrap();
///
/// assert_eq!(logical_workday(exit, Some(14)), NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
/// assert_eq!(logical_workday(exit, None), day2);
/// ```
pub fn logical_workday(timestamp: NaiveDateTime, boundary_hour: Option<u32>) -> NaiveDate {
    let date = timestamp.date();
    match boundary_hour {
        Some(boundary) if timestamp.hour() < boundary => date.pred_opt().unwrap_or(date),
        _ => date,
    }
}

/// Groups scan timestamps by logical workday.
///
/// `boundary_for` returns the boundary hour in effect on a scan's calendar date.
/// Timestamps keep their input order within a day; deduplication sorts them.
pub fn group_by_logical_workday<I, F>(
    timestamps: I,
    boundary_for: F,
) -> BTreeMap<NaiveDate, Vec<NaiveDateTime>>
where
    I: IntoIterator<Item = NaiveDateTime>,
    F: Fn(NaiveDate) -> Option<u32>,
{
    let mut by_day: BTreeMap<NaiveDate, Vec<NaiveDateTime>> = BTreeMap::new();
    for timestamp in timestamps {
        let logical = logical_workday(timestamp, boundary_for(timestamp.date()));
        if logical != timestamp.date() {
            trace!(%timestamp, %logical, "Remapped night-shift scan to previous workday");
        }
        by_day.entry(logical).or_default().push(timestamp);
    }
    by_day
}
