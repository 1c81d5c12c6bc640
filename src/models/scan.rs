//! Raw badge scans.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single badge read from a plant time clock.
///
/// Scans arrive unordered and may contain near-duplicate reads. Any action code
/// reported by the clock hardware is deliberately not modeled: entry and exit are
/// inferred from temporal order alone.
///
/// # Example
///
/// ```
/// use attendance_engine::models::Scan;
/// use chrono::NaiveDate;
///
/// let scan = Scan::new(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap().and_hms_opt(8, 58, 0).unwrap(),
///     "plant_norte",
/// );
/// assert_eq!(scan.calendar_date(), NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scan {
    /// The employee whose badge was read.
    pub employee_id: String,
    /// Local plant time of the read.
    pub timestamp: NaiveDateTime,
    /// The plant the clock belongs to.
    #[serde(default)]
    pub plant_id: String,
}

impl Scan {
    /// Creates a new scan.
    pub fn new(
        employee_id: impl Into<String>,
        timestamp: NaiveDateTime,
        plant_id: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            timestamp,
            plant_id: plant_id.into(),
        }
    }

    /// Returns the calendar date of the read, before any night-shift remapping.
    pub fn calendar_date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
