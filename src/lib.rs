//! Attendance Inference & Classification Engine
//!
//! This crate turns raw, unordered badge scans from plant time clocks into
//! classified attendance: paired work sessions, daily status, late minutes and
//! overtime, honoring per-employee shifts including overnight shifts.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
