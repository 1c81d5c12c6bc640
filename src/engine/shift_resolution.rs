//! Effective shift resolution.
//!
//! An employee may have assignments from an administrator and from every plant
//! they badge at. For a given day the resolver picks one:
//!
//! 1. A manual assignment always wins (latest `effective_from` first).
//! 2. Otherwise the remaining candidates are ranked: role-specific shifts before
//!    generic ones, then plant-specific before default-fallback sources, then by
//!    plant id and shift name so the choice is deterministic.
//! 3. Without any assignment the system-wide default shift applies.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AssignmentSource, ShiftAssignment, ShiftDefinition, ShiftSource};

/// The shift in effect for one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedShift<'a> {
    /// The effective shift.
    pub shift: &'a ShiftDefinition,
    /// Where it came from.
    pub source: ShiftSource,
    /// The plant that contributed it, if any.
    pub plant_id: Option<&'a str>,
}

/// Resolves effective shifts from a set of assignments.
///
/// # Example
///
/// ```
/// use attendance_engine::engine::ShiftResolver;
/// use attendance_engine::models::{AssignmentSource, ShiftAssignment, ShiftDefinition, ShiftSource};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let default_shift = ShiftDefinition::new(
///     "General",
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// );
/// let night = ShiftDefinition::new(
///     "Nocturno",
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(6, 0, 0).unwrap(),
/// );
///
/// let resolver = ShiftResolver::new(default_shift, vec![])
///     .with_assignments([ShiftAssignment::new("emp_002", AssignmentSource::Manual, night)]);
/// let date = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
///
/// assert_eq!(resolver.resolve("emp_002", date).shift.name, "Nocturno");
/// assert_eq!(resolver.resolve("emp_001", date).source, ShiftSource::SystemDefault);
/// ```
#[derive(Debug, Clone)]
pub struct ShiftResolver {
    default_shift: ShiftDefinition,
    specific_markers: Vec<String>,
    assignments: BTreeMap<String, Vec<ShiftAssignment>>,
}

impl ShiftResolver {
    /// Creates a resolver with no assignments.
    ///
    /// `specific_markers` are name fragments (matched case-insensitively) that make
    /// a shift count as role-specific.
    pub fn new(default_shift: ShiftDefinition, specific_markers: Vec<String>) -> Self {
        Self {
            default_shift,
            specific_markers: specific_markers
                .into_iter()
                .map(|marker| marker.to_lowercase())
                .collect(),
            assignments: BTreeMap::new(),
        }
    }

    /// Adds assignments to the resolver.
    pub fn with_assignments<I>(mut self, assignments: I) -> Self
    where
        I: IntoIterator<Item = ShiftAssignment>,
    {
        for assignment in assignments {
            self.add_assignment(assignment);
        }
        self
    }

    /// Adds one assignment.
    pub fn add_assignment(&mut self, assignment: ShiftAssignment) {
        self.assignments
            .entry(assignment.employee_id.clone())
            .or_default()
            .push(assignment);
    }

    /// Returns the system-wide default shift.
    pub fn default_shift(&self) -> &ShiftDefinition {
        &self.default_shift
    }

    /// Returns true if `shift` is preferred over the generic default.
    ///
    /// A shift is specific when its start differs from the default shift's start,
    /// or its name contains a role marker such as "oficina" or "chofer".
    pub fn is_specific(&self, shift: &ShiftDefinition) -> bool {
        if shift.start_time != self.default_shift.start_time {
            return true;
        }
        let name = shift.name.to_lowercase();
        self.specific_markers
            .iter()
            .any(|marker| name.contains(marker.as_str()))
    }

    /// Resolves the shift in effect for `employee_id` on `date`.
    pub fn resolve(&self, employee_id: &str, date: NaiveDate) -> ResolvedShift<'_> {
        let candidates: Vec<(usize, &ShiftAssignment)> = self
            .assignments
            .get(employee_id)
            .map(|list| {
                list.iter()
                    .enumerate()
                    .filter(|(_, assignment)| assignment.applies_on(date))
                    .collect()
            })
            .unwrap_or_default();

        let manual = candidates
            .iter()
            .filter(|(_, assignment)| assignment.source == AssignmentSource::Manual)
            .min_by_key(|(index, assignment)| (Reverse(assignment.effective_from), *index));

        let chosen = manual.or_else(|| {
            candidates.iter().min_by_key(|(index, assignment)| {
                (
                    !self.is_specific(&assignment.shift),
                    assignment.source,
                    assignment.plant_id.as_deref(),
                    assignment.shift.name.as_str(),
                    *index,
                )
            })
        });

        match chosen {
            Some((_, assignment)) => ResolvedShift {
                shift: &assignment.shift,
                source: assignment.source.into(),
                plant_id: assignment.plant_id.as_deref(),
            },
            None => ResolvedShift {
                shift: &self.default_shift,
                source: ShiftSource::SystemDefault,
                plant_id: None,
            },
        }
    }
}
