//! Error types for the Attendance Engine.
//!
//! The inference stages themselves never fail: malformed shift data degrades to a
//! labeled default and implausible sessions are dropped. Errors only arise while
//! loading configuration or when a caller hands over an invalid request.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The requested report range is unusable.
    #[error("Invalid date range {start} to {end}: {message}")]
    InvalidDateRange {
        /// First day of the requested range.
        start: NaiveDate,
        /// Last day of the requested range.
        end: NaiveDate,
        /// Why the range was rejected.
        message: String,
    },

    /// A request field was missing or inconsistent.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/engine.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/engine.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_date_range_displays_bounds() {
        let error = EngineError::InvalidDateRange {
            start: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            message: "end date is before start date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid date range 2025-03-10 to 2025-03-01: end date is before start date"
        );
    }

    #[test]
    fn test_invalid_request_displays_field_and_message() {
        let error = EngineError::InvalidRequest {
            field: "scans[0].employee_id".to_string(),
            message: "must not be empty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid request field 'scans[0].employee_id': must not be empty"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_config_not_found() -> EngineResult<()> {
            Err(EngineError::ConfigNotFound {
                path: "/test".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_config_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
