//! HTTP API module for the Attendance Engine.
//!
//! A thin adapter over the engine: it validates the request, builds the shift
//! resolver from the supplied assignments, and renders the report as JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AssignmentRequest, ReportRequest, ScanRequest};
pub use response::ApiError;
pub use state::AppState;
