//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the classification thresholds and the system-wide default
//! shift from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/standard").unwrap();
//! println!("Dedup window: {} min", config.settings().dedup_window_minutes);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AttendanceConfig, EngineSettings};
