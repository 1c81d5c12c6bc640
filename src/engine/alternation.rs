//! Entry/exit inference by strict temporal alternation.
//!
//! Action codes reported by clock hardware are inconsistent across vendors, so
//! direction is inferred from position alone: after deduplication the first read
//! of a logical workday is an entry, the next an exit, and so on.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// The inferred direction of a badge read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanDirection {
    /// Arrival (even positions).
    Entry,
    /// Departure (odd positions).
    Exit,
}

impl ScanDirection {
    /// Returns the direction of the read at `index` in a sorted, deduplicated day.
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            ScanDirection::Entry
        } else {
            ScanDirection::Exit
        }
    }
}

/// A day's reads split by inferred direction, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryExitEvents {
    /// Entry reads.
    pub entries: Vec<NaiveDateTime>,
    /// Exit reads.
    pub exits: Vec<NaiveDateTime>,
}

/// Labels sorted, deduplicated reads as alternating entries and exits.
///
/// For `n` reads this yields `ceil(n / 2)` entries and `floor(n / 2)` exits.
///
/// # Examples
///
/// ```
/// use attendance_engine::engine::alternate_entries_exits;
/// use chrono::NaiveDate;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let reads = vec![
///     day.and_hms_opt(8, 0, 0).unwrap(),
///     day.and_hms_opt(12, 0, 0).unwrap(),
///     day.and_hms_opt(13, 0, 0).unwrap(),
/// ];
///
/// let events = alternate_entries_exits(&reads);
/// assert_eq!(events.entries.len(), 2);
/// assert_eq!(events.exits.len(), 1);
/// ```
pub fn alternate_entries_exits(scans: &[NaiveDateTime]) -> EntryExitEvents {
    let mut events = EntryExitEvents {
        entries: Vec::with_capacity(scans.len().div_ceil(2)),
        exits: Vec::with_capacity(scans.len() / 2),
    };

    for (index, timestamp) in scans.iter().enumerate() {
        match ScanDirection::for_index(index) {
            ScanDirection::Entry => events.entries.push(*timestamp),
            ScanDirection::Exit => events.exits.push(*timestamp),
        }
    }

    events
}
