//! Request types for the Attendance Engine API.
//!
//! This module defines the JSON request structures for the `/attendance/report`
//! endpoint.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{AssignmentSource, Scan, ShiftAssignment, ShiftDefinition};

/// Request body for the `/attendance/report` endpoint.
///
/// Carries everything the persistence layer would otherwise supply: the
/// registered employees, raw scans for the range (plus one day either side),
/// and shift assignments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// First day of the report (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the report (inclusive).
    pub end_date: NaiveDate,
    /// Registered employees, reported even without scans.
    #[serde(default)]
    pub employees: Vec<String>,
    /// Raw badge scans, in any order.
    #[serde(default)]
    pub scans: Vec<ScanRequest>,
    /// Shift assignments for the employees.
    #[serde(default)]
    pub assignments: Vec<AssignmentRequest>,
}

/// A badge scan in a report request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanRequest {
    /// The employee whose badge was read.
    pub employee_id: String,
    /// Local plant time of the read.
    pub timestamp: NaiveDateTime,
    /// The plant the clock belongs to.
    #[serde(default)]
    pub plant_id: String,
}

/// A shift assignment in a report request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRequest {
    /// The assigned employee.
    pub employee_id: String,
    /// The plant that supplied the assignment.
    #[serde(default)]
    pub plant_id: Option<String>,
    /// Where the assignment came from.
    pub source: AssignmentSource,
    /// The assigned shift.
    pub shift: ShiftDefinition,
    /// First day the assignment applies.
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    /// Last day the assignment applies.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
}

impl ReportRequest {
    /// Checks the fields serde cannot: blank ids and reversed assignment bounds.
    ///
    /// The date range itself is validated when the `DateRange` is built.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employees.iter().any(|id| id.trim().is_empty()) {
            return Err(invalid("employees", "employee ids must not be blank"));
        }
        if self.scans.iter().any(|scan| scan.employee_id.trim().is_empty()) {
            return Err(invalid("scans.employee_id", "employee ids must not be blank"));
        }

        for assignment in &self.assignments {
            if assignment.employee_id.trim().is_empty() {
                return Err(invalid(
                    "assignments.employee_id",
                    "employee ids must not be blank",
                ));
            }
            if let (Some(from), Some(to)) = (assignment.effective_from, assignment.effective_to) {
                if to < from {
                    return Err(invalid(
                        "assignments.effective_to",
                        format!(
                            "assignment for '{}' ends {} before it starts {}",
                            assignment.employee_id, to, from
                        ),
                    ));
                }
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidRequest {
        field: field.to_string(),
        message: message.into(),
    }
}

impl From<ScanRequest> for Scan {
    fn from(req: ScanRequest) -> Self {
        Scan {
            employee_id: req.employee_id,
            timestamp: req.timestamp,
            plant_id: req.plant_id,
        }
    }
}

impl From<AssignmentRequest> for ShiftAssignment {
    fn from(req: AssignmentRequest) -> Self {
        ShiftAssignment {
            employee_id: req.employee_id,
            plant_id: req.plant_id,
            source: req.source,
            shift: req.shift,
            effective_from: req.effective_from,
            effective_to: req.effective_to,
        }
    }
}
