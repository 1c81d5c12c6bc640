//! Per-day status, lateness and overtime classification.
//!
//! ## Status
//!
//! | Condition                                          | Status       |
//! |----------------------------------------------------|--------------|
//! | no entries and no exits                            | `Ausente`    |
//! | sessions, hours >= max(ratio x shift hours, floor) | `Completo`   |
//! | sessions, hours >= floor                           | `Parcial`    |
//! | entries but no exits                               | `Sin salida` |
//! | anything else                                      | `Incompleto` |
//!
//! ## Overtime
//!
//! On non-workdays every worked hour is overtime. On workdays only the part of
//! each session after the effective shift end counts. Daily overtime under the
//! noise threshold is discarded, and the figure is rounded once per day.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::EngineSettings;
use crate::models::{DayRecord, DayStatus, Session, ShiftDefinition, hours_from_seconds, round_hours};

use super::alternation::EntryExitEvents;
use super::session_pairing::PairingResult;
use super::shift_resolution::ResolvedShift;

/// Nominal start candidates of an overnight shift are searched within this window.
const OVERNIGHT_START_WINDOW_HOURS: i64 = 12;

/// Returns the worked hours a day needs to count as complete.
///
/// This is `max(complete_shift_ratio x scheduled hours, min_complete_hours)`.
pub fn completion_threshold(
    shift: &ShiftDefinition,
    date: NaiveDate,
    settings: &EngineSettings,
) -> Decimal {
    (settings.complete_shift_ratio * shift.scheduled_hours_on(date)).max(settings.min_complete_hours)
}

/// Determines a day's status from its events and sessions.
///
/// # Examples
///
/// ```
/// use attendance_engine::engine::{EntryExitEvents, PairingResult, determine_status};
/// use attendance_engine::models::DayStatus;
/// use rust_decimal::Decimal;
///
/// let status = determine_status(
///     &EntryExitEvents::default(),
///     &PairingResult::default(),
///     Decimal::from(5),
///     Decimal::ONE,
/// );
/// assert_eq!(status, DayStatus::Absent);
/// ```
pub fn determine_status(
    events: &EntryExitEvents,
    pairing: &PairingResult,
    completion_threshold: Decimal,
    min_partial_hours: Decimal,
) -> DayStatus {
    let has_sessions = !pairing.sessions.is_empty();

    if events.entries.is_empty() && events.exits.is_empty() {
        DayStatus::Absent
    } else if has_sessions && pairing.exact_hours >= completion_threshold {
        DayStatus::Complete
    } else if has_sessions && pairing.exact_hours >= min_partial_hours {
        DayStatus::Partial
    } else if !events.entries.is_empty() && events.exits.is_empty() {
        DayStatus::MissingExit
    } else {
        DayStatus::Incomplete
    }
}

/// Returns the scheduled start instant closest to `first_entry`.
///
/// Day shifts start on `date`. For overnight shifts the start on the previous,
/// same and next day are considered and the nearest one within 12 hours of the
/// entry is used.
fn nominal_start(
    first_entry: NaiveDateTime,
    shift: &ShiftDefinition,
    date: NaiveDate,
) -> Option<NaiveDateTime> {
    let on_day = shift.start_on(date);
    if !shift.is_overnight() {
        return Some(on_day);
    }

    let window = TimeDelta::hours(OVERNIGHT_START_WINDOW_HOURS).num_seconds();
    [on_day - TimeDelta::days(1), on_day, on_day + TimeDelta::days(1)]
        .into_iter()
        .map(|candidate| (candidate, (first_entry - candidate).num_seconds().abs()))
        .filter(|(_, distance)| *distance <= window)
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculates minutes late for the first entry of a scheduled workday.
///
/// Arrivals that are early or within the shift's tolerance yield 0. Lateness
/// above `max_late_minutes` indicates the scans belong to another shift or day
/// and also yields 0.
///
/// # Examples
///
/// ```
/// use attendance_engine::engine::calculate_late_minutes;
/// use attendance_engine::models::ShiftDefinition;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let shift = ShiftDefinition::new(
///     "General",
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// )
/// .with_tolerance(10);
/// let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
///
/// assert_eq!(calculate_late_minutes(date.and_hms_opt(9, 20, 0).unwrap(), &shift, date, 720), 80);
/// assert_eq!(calculate_late_minutes(date.and_hms_opt(8, 9, 0).unwrap(), &shift, date, 720), 0);
/// ```
pub fn calculate_late_minutes(
    first_entry: NaiveDateTime,
    shift: &ShiftDefinition,
    date: NaiveDate,
    max_late_minutes: i64,
) -> i64 {
    let Some(start) = nominal_start(first_entry, shift, date) else {
        return 0;
    };

    let late = (first_entry - start).num_minutes();
    if late <= i64::from(shift.tolerance_minutes) {
        return 0;
    }
    if late > max_late_minutes {
        debug!(%first_entry, %start, late, "Discarding lateness beyond plausible limit");
        return 0;
    }
    late
}

/// Calculates a day's overtime hours, rounded once to 2 decimals.
///
/// # Examples
///
/// ```
/// use attendance_engine::engine::calculate_overtime;
/// use attendance_engine::models::{Session, ShiftDefinition};
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
///
/// let shift = ShiftDefinition::new(
///     "General",
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// );
/// let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// let session = Session {
///     entry: date.and_hms_opt(8, 0, 0).unwrap(),
///     exit: date.and_hms_opt(18, 30, 0).unwrap(),
///     hours: Decimal::new(1050, 2),
/// };
///
/// assert_eq!(calculate_overtime(&[session], &shift, date, true, 5), Decimal::new(150, 2));
/// ```
pub fn calculate_overtime(
    sessions: &[Session],
    shift: &ShiftDefinition,
    date: NaiveDate,
    is_workday: bool,
    noise_minutes: i64,
) -> Decimal {
    let overtime_seconds: i64 = if is_workday {
        let shift_end = shift.end_on(date);
        sessions
            .iter()
            .filter(|session| session.exit > shift_end)
            .map(|session| (session.exit - session.entry.max(shift_end)).num_seconds())
            .sum()
    } else {
        sessions
            .iter()
            .map(|session| session.duration().num_seconds())
            .sum()
    };

    if overtime_seconds < noise_minutes * 60 {
        if overtime_seconds > 0 {
            debug!(%date, overtime_seconds, "Discarding overtime below noise threshold");
        }
        return Decimal::ZERO;
    }

    round_hours(hours_from_seconds(overtime_seconds))
}

/// Classifies one employee's logical workday.
///
/// `scan_count` is the number of reads left after deduplication.
pub fn classify_day(
    employee_id: &str,
    date: NaiveDate,
    events: &EntryExitEvents,
    pairing: PairingResult,
    resolved: &ResolvedShift<'_>,
    settings: &EngineSettings,
) -> DayRecord {
    let shift = resolved.shift;
    let is_workday = shift.is_workday(date);

    let threshold = completion_threshold(shift, date, settings);
    let status = determine_status(events, &pairing, threshold, settings.min_complete_hours);

    let first_entry = events.entries.first().copied();
    let late_minutes = match first_entry {
        Some(entry) if is_workday => {
            calculate_late_minutes(entry, shift, date, settings.max_late_minutes)
        }
        _ => 0,
    };

    let overtime_hours = calculate_overtime(
        &pairing.sessions,
        shift,
        date,
        is_workday,
        settings.overtime_noise_minutes,
    );

    DayRecord {
        date,
        employee_id: employee_id.to_string(),
        status,
        first_entry,
        last_exit: events.exits.last().copied(),
        total_hours: pairing.total_hours,
        late_minutes,
        is_late: late_minutes > 0,
        overtime_hours,
        is_workday,
        scan_count: events.entries.len() + events.exits.len(),
        unpaired_entries: pairing.unpaired_entries,
        unpaired_exits: pairing.unpaired_exits,
        shift_name: shift.name.clone(),
        shift_source: resolved.source,
        effective_end_time: shift.end_time_on(date),
        sessions: pairing.sessions,
    }
}
