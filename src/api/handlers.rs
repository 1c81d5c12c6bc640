//! HTTP request handlers for the Attendance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::engine::AttendanceEngine;
use crate::error::EngineResult;
use crate::models::{AttendanceReport, DateRange, Scan, ShiftAssignment};

use super::request::ReportRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/attendance/report", post(report_handler))
        .with_state(state)
}

/// Handler for POST /attendance/report endpoint.
///
/// Accepts scans and shift assignments for a date range and returns the
/// classified attendance report.
async fn report_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing attendance report request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries serde's message, including missing fields
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return (
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response();
        }
    };

    let start_date = request.start_date;
    let end_date = request.end_date;
    let scans_count = request.scans.len();

    let start_time = Instant::now();
    match build_report(request, state.config()) {
        Ok(report) => {
            let duration = start_time.elapsed();
            info!(
                correlation_id = %correlation_id,
                start_date = %start_date,
                end_date = %end_date,
                scans_count,
                employees_count = report.employees.len(),
                duration_us = duration.as_micros(),
                "Attendance report completed successfully"
            );
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                Json(report),
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Attendance report rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

/// Validates a request and runs the engine over it.
fn build_report(request: ReportRequest, config: &ConfigLoader) -> EngineResult<AttendanceReport> {
    request.validate()?;

    let settings = config.settings();
    let range = DateRange::new(request.start_date, request.end_date, settings.max_range_days)?;

    let resolver = config.shift_resolver(
        request
            .assignments
            .into_iter()
            .map(ShiftAssignment::from),
    );
    let scans: Vec<Scan> = request.scans.into_iter().map(Into::into).collect();

    let engine = AttendanceEngine::new(settings, &resolver);
    Ok(engine.build_report(&range, &request.employees, &scans))
}
