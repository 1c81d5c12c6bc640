//! Rolling daily records into a period summary.

use rust_decimal::Decimal;

use crate::models::{DateRange, DayRecord, DayStatus, PeriodReport, round_ratio};

/// Summarizes one employee's day records over `range`.
///
/// Records outside the range are ignored. Hour totals are plain sums of the
/// already-rounded daily figures and are not rounded again. The attendance rate
/// is `days_present / scheduled_workdays`, or 0 when the range schedules no
/// workdays. Work on non-workdays counts toward `days_present`, so the rate can
/// exceed 1.
///
/// # Examples
///
/// ```
/// use attendance_engine::engine::summarize_period;
/// use attendance_engine::models::DateRange;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
///     31,
/// )
/// .unwrap();
///
/// let summary = summarize_period("emp_001", &range, &[]);
/// assert_eq!(summary.days_present, 0);
/// assert_eq!(summary.attendance_rate, Decimal::ZERO);
/// ```
pub fn summarize_period(employee_id: &str, range: &DateRange, days: &[DayRecord]) -> PeriodReport {
    let mut report = PeriodReport {
        employee_id: employee_id.to_string(),
        start_date: range.start(),
        end_date: range.end(),
        scheduled_workdays: 0,
        days_present: 0,
        workdays_present: 0,
        days_complete: 0,
        days_partial: 0,
        days_missing_exit: 0,
        days_incomplete: 0,
        days_absent: 0,
        days_late: 0,
        total_late_minutes: 0,
        total_hours: Decimal::ZERO,
        total_overtime_hours: Decimal::ZERO,
        attendance_rate: Decimal::ZERO,
    };

    for day in days.iter().filter(|day| range.contains(day.date)) {
        let present = day.status.is_present();

        if day.is_workday {
            report.scheduled_workdays += 1;
            if present {
                report.workdays_present += 1;
            } else {
                report.days_absent += 1;
            }
        }

        match day.status {
            DayStatus::Absent => {}
            DayStatus::Complete => report.days_complete += 1,
            DayStatus::Partial => report.days_partial += 1,
            DayStatus::MissingExit => report.days_missing_exit += 1,
            DayStatus::Incomplete => report.days_incomplete += 1,
        }
        if present {
            report.days_present += 1;
        }

        if day.is_late {
            report.days_late += 1;
        }
        report.total_late_minutes += day.late_minutes;
        report.total_hours += day.total_hours;
        report.total_overtime_hours += day.overtime_hours;
    }

    if report.scheduled_workdays > 0 {
        report.attendance_rate = round_ratio(
            Decimal::from(report.days_present) / Decimal::from(report.scheduled_workdays),
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
    use proptest::prelude::*;
    use std::str::FromStr;

    use crate::models::ShiftSource;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn week() -> DateRange {
        DateRange::new(make_date("2025-03-03"), make_date("2025-03-09"), 31).unwrap()
    }

    fn record(date: &str, status: DayStatus, hours: &str, overtime: &str) -> DayRecord {
        let date = make_date(date);
        DayRecord {
            date,
            employee_id: "emp_001".to_string(),
            status,
            sessions: vec![],
            first_entry: None,
            last_exit: None,
            total_hours: dec(hours),
            late_minutes: 0,
            is_late: false,
            overtime_hours: dec(overtime),
            is_workday: !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            scan_count: 0,
            unpaired_entries: 0,
            unpaired_exits: 0,
            shift_name: "General".to_string(),
            shift_source: ShiftSource::SystemDefault,
            effective_end_time: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        }
    }

    fn absent_week() -> Vec<DayRecord> {
        week()
            .days()
            .map(|d| record(&d.to_string(), DayStatus::Absent, "0", "0"))
            .collect()
    }

    #[test]
    fn test_absent_week_has_zero_rate() {
        let summary = summarize_period("emp_001", &week(), &absent_week());
        assert_eq!(summary.scheduled_workdays, 5);
        assert_eq!(summary.days_absent, 5);
        assert_eq!(summary.days_present, 0);
        assert_eq!(summary.attendance_rate, Decimal::ZERO);
    }

    #[test]
    fn test_counts_by_status() {
        let mut days = absent_week();
        days[0] = record("2025-03-03", DayStatus::Complete, "8.07", "0");
        days[1] = record("2025-03-04", DayStatus::Partial, "3.5", "0");
        days[2] = record("2025-03-05", DayStatus::MissingExit, "0", "0");
        days[5] = record("2025-03-08", DayStatus::Partial, "4", "4");

        let summary = summarize_period("emp_001", &week(), &days);
        assert_eq!(summary.days_present, 4);
        assert_eq!(summary.workdays_present, 3);
        assert_eq!(summary.days_complete, 1);
        assert_eq!(summary.days_partial, 2);
        assert_eq!(summary.days_missing_exit, 1);
        assert_eq!(summary.days_absent, 2);
        assert_eq!(summary.total_hours, dec("15.57"));
        assert_eq!(summary.total_overtime_hours, dec("4"));
        assert_eq!(summary.attendance_rate, dec("0.8"));
    }

    #[test]
    fn test_weekend_work_counts_toward_rate() {
        let mut days = absent_week();
        days[0] = record("2025-03-03", DayStatus::Complete, "9", "0");
        days[5] = record("2025-03-08", DayStatus::Partial, "4", "4");

        let summary = summarize_period("emp_001", &week(), &days);
        assert_eq!(summary.scheduled_workdays, 5);
        assert_eq!(summary.days_present, 2);
        assert_eq!(summary.workdays_present, 1);
        assert_eq!(summary.attendance_rate, dec("0.4"));
    }

    #[test]
    fn test_full_week_with_weekend_exceeds_one() {
        let days: Vec<_> = week()
            .days()
            .map(|d| record(&d.to_string(), DayStatus::Complete, "8", "0"))
            .collect();

        let summary = summarize_period("emp_001", &week(), &days);
        assert_eq!(summary.days_present, 7);
        assert_eq!(summary.attendance_rate, dec("1.4"));
    }

    #[test]
    fn test_rate_is_rounded_to_four_places() {
        let range = DateRange::new(make_date("2025-03-03"), make_date("2025-03-05"), 31).unwrap();
        let days = vec![
            record("2025-03-03", DayStatus::Complete, "8", "0"),
            record("2025-03-04", DayStatus::Absent, "0", "0"),
            record("2025-03-05", DayStatus::Absent, "0", "0"),
        ];

        let summary = summarize_period("emp_001", &range, &days);
        assert_eq!(summary.attendance_rate, dec("0.3333"));
    }

    #[test]
    fn test_no_scheduled_workdays_gives_zero_rate() {
        let range = DateRange::new(make_date("2025-03-08"), make_date("2025-03-09"), 31).unwrap();
        let days = vec![
            record("2025-03-08", DayStatus::Complete, "8", "8"),
            record("2025-03-09", DayStatus::Absent, "0", "0"),
        ];

        let summary = summarize_period("emp_001", &range, &days);
        assert_eq!(summary.scheduled_workdays, 0);
        assert_eq!(summary.days_present, 1);
        assert_eq!(summary.attendance_rate, Decimal::ZERO);
    }

    #[test]
    fn test_lateness_totals() {
        let mut days = absent_week();
        for (index, minutes) in [(0, 15), (3, 40)] {
            days[index].status = DayStatus::Complete;
            days[index].late_minutes = minutes;
            days[index].is_late = true;
        }

        let summary = summarize_period("emp_001", &week(), &days);
        assert_eq!(summary.days_late, 2);
        assert_eq!(summary.total_late_minutes, 55);
    }

    #[test]
    fn test_records_outside_range_are_ignored() {
        let range = DateRange::new(make_date("2025-03-03"), make_date("2025-03-03"), 31).unwrap();
        let days = vec![
            record("2025-03-02", DayStatus::Complete, "8", "8"),
            record("2025-03-03", DayStatus::Complete, "8", "0"),
        ];

        let summary = summarize_period("emp_001", &range, &days);
        assert_eq!(summary.days_present, 1);
        assert_eq!(summary.total_overtime_hours, dec("0"));
    }

    proptest! {
        #[test]
        fn prop_overtime_total_matches_daily_sum(cents in proptest::collection::vec(0i64..2_000, 7)) {
            let mut days = absent_week();
            for (day, value) in days.iter_mut().zip(&cents) {
                day.status = DayStatus::Complete;
                day.overtime_hours = Decimal::new(*value, 2);
            }

            let summary = summarize_period("emp_001", &week(), &days);
            let expected: Decimal = days.iter().map(|d| d.overtime_hours).sum();
            prop_assert_eq!(summary.total_overtime_hours, expected);
            prop_assert!(summary.total_overtime_hours.scale() <= 2);
        }
    }
}
