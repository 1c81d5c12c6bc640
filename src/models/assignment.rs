//! Shift assignments and where they come from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ShiftDefinition;

/// The origin of a shift assignment.
///
/// Variants are declared in precedence order: an earlier variant wins over a
/// later one when several assignments apply to the same employee and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentSource {
    /// Entered by an administrator; always wins.
    Manual,
    /// Synced from the plant the employee badges at.
    PlantSpecific,
    /// Synced from a plant's generic default schedule.
    DefaultFallback,
}

/// The source of the shift a day was classified against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftSource {
    /// A manual assignment.
    Manual,
    /// A plant-specific assignment.
    PlantSpecific,
    /// A plant default-fallback assignment.
    DefaultFallback,
    /// No assignment applied; the system-wide default shift was used.
    SystemDefault,
}

impl From<AssignmentSource> for ShiftSource {
    fn from(source: AssignmentSource) -> Self {
        match source {
            AssignmentSource::Manual => ShiftSource::Manual,
            AssignmentSource::PlantSpecific => ShiftSource::PlantSpecific,
            AssignmentSource::DefaultFallback => ShiftSource::DefaultFallback,
        }
    }
}

/// Binds an employee to a shift definition for an optional date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftAssignment {
    /// The employee the shift applies to.
    pub employee_id: String,
    /// The plant that contributed the assignment, if any.
    #[serde(default)]
    pub plant_id: Option<String>,
    /// Where the assignment came from.
    pub source: AssignmentSource,
    /// The assigned schedule.
    pub shift: ShiftDefinition,
    /// First day the assignment applies (inclusive, unbounded when absent).
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    /// Last day the assignment applies (inclusive, unbounded when absent).
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
}

impl ShiftAssignment {
    /// Creates an open-ended assignment.
    pub fn new(
        employee_id: impl Into<String>,
        source: AssignmentSource,
        shift: ShiftDefinition,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            plant_id: None,
            source,
            shift,
            effective_from: None,
            effective_to: None,
        }
    }

    /// Sets the contributing plant.
    pub fn with_plant(mut self, plant_id: impl Into<String>) -> Self {
        self.plant_id = Some(plant_id.into());
        self
    }

    /// Restricts the assignment to an inclusive date range.
    pub fn effective_between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.effective_from = from;
        self.effective_to = to;
        self
    }

    /// Returns true if the assignment is in effect on `date`.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.effective_from.is_none_or(|from| from <= date)
            && self.effective_to.is_none_or(|to| date <= to)
    }
}
