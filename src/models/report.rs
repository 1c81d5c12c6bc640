//! Period summaries and the full attendance report.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DayRecord;

/// One employee's attendance summary over a report range.
///
/// Hour totals are sums of the rounded daily figures, so they reconcile exactly
/// with the day rows shown next to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// The employee.
    pub employee_id: String,
    /// First day of the range.
    pub start_date: NaiveDate,
    /// Last day of the range.
    pub end_date: NaiveDate,
    /// Days in range the employee's shift schedules.
    pub scheduled_workdays: u32,
    /// Days with any scan.
    pub days_present: u32,
    /// Scheduled workdays with any scan.
    pub workdays_present: u32,
    /// Days classified `Completo`.
    pub days_complete: u32,
    /// Days classified `Parcial`.
    pub days_partial: u32,
    /// Days classified `Sin salida`.
    pub days_missing_exit: u32,
    /// Days classified `Incompleto`.
    pub days_incomplete: u32,
    /// Scheduled workdays without any scan.
    pub days_absent: u32,
    /// Days with a late arrival.
    pub days_late: u32,
    /// Sum of late minutes.
    pub total_late_minutes: i64,
    /// Sum of daily worked hours.
    pub total_hours: Decimal,
    /// Sum of daily overtime hours.
    pub total_overtime_hours: Decimal,
    /// `days_present / scheduled_workdays`, 0 when nothing is scheduled.
    pub attendance_rate: Decimal,
}

/// Day rows and summary for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAttendance {
    /// The employee.
    pub employee_id: String,
    /// One record per calendar day of the range, in date order.
    pub days: Vec<DayRecord>,
    /// The period summary.
    pub summary: PeriodReport,
}

/// The engine's output for a report request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceReport {
    /// First day of the range.
    pub start_date: NaiveDate,
    /// Last day of the range.
    pub end_date: NaiveDate,
    /// Per-employee attendance, ordered by employee id.
    pub employees: Vec<EmployeeAttendance>,
}

impl AttendanceReport {
    /// Looks up one employee's attendance.
    pub fn employee(&self, employee_id: &str) -> Option<&EmployeeAttendance> {
        self.employees.iter().find(|e| e.employee_id == employee_id)
    }
}
