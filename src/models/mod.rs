//! Core data models for the Attendance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod assignment;
mod date_range;
mod day_record;
mod hours;
mod report;
mod scan;
mod session;
mod shift;

pub use assignment::{AssignmentSource, ShiftAssignment, ShiftSource};
pub use date_range::DateRange;
pub use day_record::{DayRecord, DayStatus};
pub use hours::{hours_between, hours_from_seconds, round_hours, round_ratio};
pub use report::{AttendanceReport, EmployeeAttendance, PeriodReport};
pub use scan::Scan;
pub use session::Session;
pub use shift::{ShiftDefinition, WeekdayOverrides, WorkdaySet, parse_clock_time, parse_weekday};
