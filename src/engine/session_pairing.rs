//! Pairing entry and exit reads into work sessions.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Session, hours_between, round_hours};

/// Sessions produced for one logical workday.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairingResult {
    /// Valid sessions in chronological order.
    pub sessions: Vec<Session>,
    /// Total worked hours, rounded to 2 decimals.
    pub total_hours: Decimal,
    /// Total worked hours without rounding.
    pub exact_hours: Decimal,
    /// Entries that did not become part of a session.
    pub unpaired_entries: usize,
    /// Exits that did not become part of a session.
    pub unpaired_exits: usize,
}

/// Pairs sorted entries with sorted exits using a two-pointer merge.
///
/// For each entry, exits at or before it are skipped as stale. The next exit
/// forms a session when the duration lies within `min_hours..=max_hours`;
/// otherwise the entry is discarded and the exit stays available. An entry that
/// starts before the previous session ended is discarded as well, so sessions
/// never overlap.
///
/// # Examples
///
/// ```
/// use attendance_engine::engine::pair_sessions;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let entries = vec![day.and_hms_opt(8, 58, 0).unwrap()];
/// let exits = vec![day.and_hms_opt(17, 2, 0).unwrap()];
///
/// let result = pair_sessions(&entries, &exits, Decimal::from_str("0.1").unwrap(), Decimal::from(24));
/// assert_eq!(result.sessions.len(), 1);
/// assert_eq!(result.total_hours, Decimal::from_str("8.07").unwrap());
/// ```
pub fn pair_sessions(
    entries: &[NaiveDateTime],
    exits: &[NaiveDateTime],
    min_hours: Decimal,
    max_hours: Decimal,
) -> PairingResult {
    let mut sessions: Vec<Session> = Vec::new();
    let mut exact_hours = Decimal::ZERO;
    let mut exit_index = 0;

    for &entry in entries {
        if sessions.last().is_some_and(|last| entry < last.exit) {
            debug!(%entry, "Discarding entry inside the previous session");
            continue;
        }

        while exit_index < exits.len() && exits[exit_index] <= entry {
            exit_index += 1;
        }
        let Some(&exit) = exits.get(exit_index) else {
            break;
        };

        let hours = hours_between(entry, exit);
        if hours >= min_hours && hours <= max_hours {
            exact_hours += hours;
            sessions.push(Session {
                entry,
                exit,
                hours: round_hours(hours),
            });
            exit_index += 1;
        } else {
            debug!(%entry, %exit, %hours, "Discarding entry with implausible session length");
        }
    }

    PairingResult {
        total_hours: round_hours(exact_hours),
        exact_hours,
        unpaired_entries: entries.len() - sessions.len(),
        unpaired_exits: exits.len() - sessions.len(),
        sessions,
    }
}
