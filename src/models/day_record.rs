//! Classified attendance for one employee on one logical workday.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Session, ShiftSource};

/// The attendance status of a day.
///
/// Serialized with the labels plant supervisors read on their reports.
///
/// # Example
///
/// ```
/// use attendance_engine::models::DayStatus;
///
/// assert_eq!(DayStatus::MissingExit.to_string(), "Sin salida");
/// assert_eq!(serde_json::to_string(&DayStatus::Absent).unwrap(), "\"Ausente\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayStatus {
    /// No scans at all.
    #[serde(rename = "Ausente")]
    Absent,
    /// Sessions covering enough of the scheduled shift.
    #[serde(rename = "Completo")]
    Complete,
    /// Sessions of at least an hour, short of the completion threshold.
    #[serde(rename = "Parcial")]
    Partial,
    /// Entry scans but no exit scan.
    #[serde(rename = "Sin salida")]
    MissingExit,
    /// Scans that could not be paired into a usable session.
    #[serde(rename = "Incompleto")]
    Incomplete,
}

impl DayStatus {
    /// Returns the report label for the status.
    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::Absent => "Ausente",
            DayStatus::Complete => "Completo",
            DayStatus::Partial => "Parcial",
            DayStatus::MissingExit => "Sin salida",
            DayStatus::Incomplete => "Incompleto",
        }
    }

    /// Returns true if the employee badged at all.
    pub fn is_present(&self) -> bool {
        !matches!(self, DayStatus::Absent)
    }
}

impl std::fmt::Display for DayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One employee's classified attendance on one logical workday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// The logical workday (night-shift tails belong to the previous date).
    pub date: NaiveDate,
    /// The employee.
    pub employee_id: String,
    /// The day's status.
    pub status: DayStatus,
    /// Paired sessions in chronological order.
    pub sessions: Vec<Session>,
    /// The first entry scan of the day.
    pub first_entry: Option<NaiveDateTime>,
    /// The last exit scan of the day.
    pub last_exit: Option<NaiveDateTime>,
    /// Worked hours, rounded to 2 decimals.
    pub total_hours: Decimal,
    /// Minutes late against the scheduled start (0 when on time).
    pub late_minutes: i64,
    /// True when `late_minutes` is positive.
    pub is_late: bool,
    /// Overtime hours, rounded once to 2 decimals.
    pub overtime_hours: Decimal,
    /// Whether the shift schedules this weekday.
    pub is_workday: bool,
    /// Scans remaining after duplicate reads were collapsed.
    pub scan_count: usize,
    /// Entry scans that did not become part of a session.
    pub unpaired_entries: usize,
    /// Exit scans that did not become part of a session.
    pub unpaired_exits: usize,
    /// The shift the day was classified against.
    pub shift_name: String,
    /// Where that shift came from.
    pub shift_source: ShiftSource,
    /// The end time in effect on this weekday.
    pub effective_end_time: NaiveTime,
}
