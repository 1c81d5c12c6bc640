//! Report orchestration: from raw scans to a classified attendance report.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, trace};

use crate::config::EngineSettings;
use crate::models::{AttendanceReport, DateRange, DayRecord, EmployeeAttendance, Scan};

use super::alternation::alternate_entries_exits;
use super::day_classification::classify_day;
use super::deduplication::deduplicate_scans;
use super::night_shift::{group_by_logical_workday, night_shift_boundary};
use super::period_aggregation::summarize_period;
use super::session_pairing::pair_sessions;
use super::shift_resolution::ShiftResolver;

/// The attendance engine.
///
/// Holds borrowed settings and shift data; every call is a pure function of its
/// arguments, so one engine can serve any number of reports.
///
/// # Example
///
/// ```
/// use attendance_engine::config::EngineSettings;
/// use attendance_engine::engine::{AttendanceEngine, ShiftResolver};
/// use attendance_engine::models::{DateRange, DayStatus, Scan, ShiftDefinition};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let settings = EngineSettings::default();
/// let resolver = ShiftResolver::new(
///     ShiftDefinition::new(
///         "General",
///         NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///         NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
///     ),
///     vec![],
/// );
/// let engine = AttendanceEngine::new(&settings, &resolver);
///
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let range = DateRange::new(day, day, settings.max_range_days).unwrap();
/// let scans = vec![
///     Scan::new("emp_001", day.and_hms_opt(7, 55, 0).unwrap(), "plant_norte"),
///     Scan::new("emp_001", day.and_hms_opt(17, 1, 0).unwrap(), "plant_norte"),
/// ];
///
/// let report = engine.build_report(&range, &[], &scans);
/// let employee = report.employee("emp_001").unwrap();
/// assert_eq!(employee.days[0].status, DayStatus::Complete);
/// assert_eq!(employee.summary.days_present, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AttendanceEngine<'a> {
    settings: &'a EngineSettings,
    resolver: &'a ShiftResolver,
}

impl<'a> AttendanceEngine<'a> {
    /// Creates an engine over the given settings and shift assignments.
    pub fn new(settings: &'a EngineSettings, resolver: &'a ShiftResolver) -> Self {
        Self { settings, resolver }
    }

    /// Builds the attendance report for `range`.
    ///
    /// `employees` are the registered employees; each one is reported even
    /// without scans. Employees that appear only in `scans` are reported too.
    /// Scans outside the range's query window are ignored, and scans whose
    /// logical workday falls outside the range do not count toward any day.
    pub fn build_report(
        &self,
        range: &DateRange,
        employees: &[String],
        scans: &[Scan],
    ) -> AttendanceReport {
        let (window_start, window_end) = range.query_window();

        let mut by_employee: BTreeMap<&str, Vec<NaiveDateTime>> = employees
            .iter()
            .map(|employee_id| (employee_id.as_str(), Vec::new()))
            .collect();

        for scan in scans {
            let date = scan.calendar_date();
            if date < window_start || date > window_end {
                trace!(employee_id = %scan.employee_id, timestamp = %scan.timestamp, "Ignoring scan outside query window");
                continue;
            }
            by_employee
                .entry(scan.employee_id.as_str())
                .or_default()
                .push(scan.timestamp);
        }

        let employees: Vec<EmployeeAttendance> = by_employee
            .into_iter()
            .map(|(employee_id, timestamps)| self.employee_attendance(employee_id, range, timestamps))
            .collect();

        debug!(
            start = %range.start(),
            end = %range.end(),
            employees = employees.len(),
            "Built attendance report"
        );

        AttendanceReport {
            start_date: range.start(),
            end_date: range.end(),
            employees,
        }
    }

    /// Classifies every day of `range` for one employee and summarizes them.
    ///
    /// `timestamps` are the employee's scans in any order.
    pub fn employee_attendance(
        &self,
        employee_id: &str,
        range: &DateRange,
        timestamps: Vec<NaiveDateTime>,
    ) -> EmployeeAttendance {
        let mut by_day = group_by_logical_workday(timestamps, |date| {
            night_shift_boundary(self.resolver.resolve(employee_id, date).shift)
        });

        let days: Vec<DayRecord> = range
            .days()
            .map(|date| {
                let scans = by_day.remove(&date).unwrap_or_default();
                self.classify(employee_id, date, &scans)
            })
            .collect();

        for (date, scans) in &by_day {
            trace!(employee_id, %date, scans = scans.len(), "Scans outside report range");
        }

        let summary = summarize_period(employee_id, range, &days);

        EmployeeAttendance {
            employee_id: employee_id.to_string(),
            days,
            summary,
        }
    }

    /// Runs the per-day pipeline for one logical workday.
    ///
    /// `timestamps` must already be grouped by logical workday; they are
    /// deduplicated, alternated into entries and exits, paired, and classified
    /// against the shift in effect on `date`.
    pub fn classify(
        &self,
        employee_id: &str,
        date: NaiveDate,
        timestamps: &[NaiveDateTime],
    ) -> DayRecord {
        let resolved = self.resolver.resolve(employee_id, date);

        let deduped = deduplicate_scans(timestamps, self.settings.dedup_window());
        let events = alternate_entries_exits(&deduped);
        let pairing = pair_sessions(
            &events.entries,
            &events.exits,
            self.settings.min_session_hours,
            self.settings.max_session_hours,
        );

        classify_day(employee_id, date, &events, pairing, &resolved, self.settings)
    }
}
