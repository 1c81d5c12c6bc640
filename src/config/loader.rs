//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use crate::engine::ShiftResolver;
use crate::error::{EngineError, EngineResult};
use crate::models::{ShiftAssignment, ShiftDefinition};

use super::types::{AttendanceConfig, EngineSettings};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/standard/
/// ├── engine.yaml         # Classification thresholds
/// └── default_shift.yaml  # System-wide fallback shift
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/standard").unwrap();
/// println!("Default shift: {}", loader.default_shift().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AttendanceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let default_shift = Self::load_yaml::<ShiftDefinition>(&path.join("default_shift.yaml"))?;

        Ok(Self {
            config: AttendanceConfig::new(settings, default_shift),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the classification thresholds.
    pub fn settings(&self) -> &EngineSettings {
        self.config.settings()
    }

    /// Returns the system-wide fallback shift.
    pub fn default_shift(&self) -> &ShiftDefinition {
        self.config.default_shift()
    }

    /// Builds a shift resolver over `assignments` using the configured default
    /// shift and role markers.
    pub fn shift_resolver<I>(&self, assignments: I) -> ShiftResolver
    where
        I: IntoIterator<Item = ShiftAssignment>,
    {
        ShiftResolver::new(
            self.default_shift().clone(),
            self.settings().specific_shift_markers.clone(),
        )
        .with_assignments(assignments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Weekday};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/standard"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().dedup_window_minutes, 15);
        assert_eq!(
            loader.settings().complete_shift_ratio,
            Decimal::from_str("0.6").unwrap()
        );
        assert_eq!(loader.settings().max_range_days, 366);
    }

    #[test]
    fn test_default_shift_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let shift = loader.default_shift();

        assert_eq!(shift.name, "General");
        assert_eq!(shift.start_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
        assert_eq!(shift.end_time, NaiveTime::from_hms_opt(17, 0, 0).unwrap());
        assert_eq!(shift.tolerance_minutes, 10);
        assert!(shift.workdays.contains(Weekday::Fri));
        assert!(!shift.workdays.contains(Weekday::Sat));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_shift_resolver_uses_configured_default() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let resolver = loader.shift_resolver(Vec::new());
        let date = chrono::NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();

        assert_eq!(resolver.resolve("emp_001", date).shift.name, "General");
    }
}
