//! Duplicate badge read collapsing.
//!
//! Card re-swipes and hardware retries produce several reads for one physical
//! badge event. Reads closer than the dedup window to the last retained read are
//! dropped.

use chrono::{NaiveDateTime, TimeDelta};
use tracing::trace;

/// Default duplicate-read window in minutes.
pub const DEFAULT_DEDUP_WINDOW_MINUTES: i64 = 15;

/// Sorts scan timestamps and drops reads that repeat a retained read.
///
/// A read is retained only if it is at least `window` after the last retained
/// read; the first read is always retained.
///
/// # Examples
///
/// ```
/// use attendance_engine::engine::deduplicate_scans;
/// use chrono::{NaiveDate, TimeDelta};
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let scans = vec![
///     day.and_hms_opt(7, 0, 3).unwrap(),
///     day.and_hms_opt(7, 0, 0).unwrap(),
///     day.and_hms_opt(16, 0, 0).unwrap(),
/// ];
///
/// let retained = deduplicate_scans(&scans, TimeDelta::minutes(15));
/// assert_eq!(retained, vec![day.and_hms_opt(7, 0, 0).unwrap(), day.and_hms_opt(16, 0, 0).unwrap()]);
/// ```
pub fn deduplicate_scans(timestamps: &[NaiveDateTime], window: TimeDelta) -> Vec<NaiveDateTime> {
    let mut sorted = timestamps.to_vec();
    sorted.sort_unstable();

    let mut retained: Vec<NaiveDateTime> = Vec::with_capacity(sorted.len());
    for timestamp in sorted {
        match retained.last() {
            Some(last) if timestamp - *last < window => {
                trace!(%timestamp, retained = %last, "Dropping duplicate badge read");
            }
            _ => retained.push(timestamp),
        }
    }

    retained
}
