//! Attendance inference and classification.
//!
//! This module contains the pipeline that turns raw badge scans into classified
//! attendance: duplicate-read collapsing, entry/exit alternation, night-shift
//! day boundaries, session pairing, shift resolution, day classification,
//! and period aggregation. Every stage is a pure function of its inputs.

mod alternation;
mod attendance;
mod day_classification;
mod deduplication;
mod night_shift;
mod period_aggregation;
mod session_pairing;
mod shift_resolution;

pub use alternation::{EntryExitEvents, ScanDirection, alternate_entries_exits};
pub use attendance::AttendanceEngine;
pub use day_classification::{
    calculate_late_minutes, calculate_overtime, classify_day, completion_threshold,
    determine_status,
};
pub use deduplication::{DEFAULT_DEDUP_WINDOW_MINUTES, deduplicate_scans};
pub use night_shift::{group_by_logical_workday, logical_workday, night_shift_boundary};
pub use period_aggregation::summarize_period;
pub use session_pairing::{PairingResult, pair_sessions};
pub use shift_resolution::{ResolvedShift, ShiftResolver};
