//! Configuration types for attendance classification.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::TimeDelta;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ShiftDefinition;

/// Thresholds that drive scan inference and day classification.
///
/// Every field has a default, so a configuration file only needs to list the
/// values a deployment changes.
///
/// # Example
///
/// ```
/// use attendance_engine::config::EngineSettings;
///
/// let settings = EngineSettings::default();
/// assert_eq!(settings.dedup_window_minutes, 15);
/// assert_eq!(settings.overtime_noise_minutes, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Reads closer together than this are one physical badge event.
    pub dedup_window_minutes: i64,
    /// Shortest plausible session.
    pub min_session_hours: Decimal,
    /// Longest plausible session.
    pub max_session_hours: Decimal,
    /// Share of the scheduled shift a day needs to count as complete.
    pub complete_shift_ratio: Decimal,
    /// Floor for the completion threshold, and the minimum for a partial day.
    pub min_complete_hours: Decimal,
    /// Daily overtime below this is treated as scan-timing noise.
    pub overtime_noise_minutes: i64,
    /// Lateness above this signals a shift/day mismatch and is discarded.
    pub max_late_minutes: i64,
    /// Longest report range a caller may request.
    pub max_range_days: i64,
    /// Name fragments that mark a shift as role-specific (case-insensitive).
    pub specific_shift_markers: Vec<String>,
}

impl EngineSettings {
    /// Returns the duplicate-read window.
    pub fn dedup_window(&self) -> TimeDelta {
        TimeDelta::minutes(self.dedup_window_minutes)
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            dedup_window_minutes: 15,
            min_session_hours: Decimal::new(1, 1),
            max_session_hours: Decimal::from(24),
            complete_shift_ratio: Decimal::new(6, 1),
            min_complete_hours: Decimal::ONE,
            overtime_noise_minutes: 5,
            max_late_minutes: 12 * 60,
            max_range_days: 366,
            specific_shift_markers: ["oficina", "office", "chofer", "driver"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct AttendanceConfig {
    settings: EngineSettings,
    default_shift: ShiftDefinition,
}

impl AttendanceConfig {
    /// Creates a new AttendanceConfig from its component parts.
    pub fn new(settings: EngineSettings, default_shift: ShiftDefinition) -> Self {
        Self {
            settings,
            default_shift,
        }
    }

    /// Returns the classification thresholds.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns the system-wide fallback shift.
    pub fn default_shift(&self) -> &ShiftDefinition {
        &self.default_shift
    }
}
