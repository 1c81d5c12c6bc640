//! Paired work sessions.

use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::hours::hours_between;

/// A continuous presence interval between an entry scan and an exit scan.
///
/// `hours` is rounded to 2 decimals for display; [`Session::exact_hours`] gives
/// the unrounded figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The entry scan.
    pub entry: NaiveDateTime,
    /// The exit scan (always after `entry`).
    pub exit: NaiveDateTime,
    /// Session length in hours, rounded to 2 decimals.
    pub hours: Decimal,
}

impl Session {
    /// Returns the session length.
    pub fn duration(&self) -> TimeDelta {
        self.exit - self.entry
    }

    /// Returns the unrounded session length in hours.
    pub fn exact_hours(&self) -> Decimal {
        hours_between(self.entry, self.exit)
    }

    /// Returns true if this session shares any instant with `other`.
    pub fn overlaps(&self, other: &Session) -> bool {
        self.entry < other.exit && other.entry < self.exit
    }
}
