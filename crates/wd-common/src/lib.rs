//! Defender Check common types and errors.
//!
//! This crate provides foundational types shared across wd-core modules:
//! - Monitoring states with worst-of aggregation
//! - Tri-state service flags (true / false / unknown)
//! - Date-format families with their candidate timestamp layouts
//! - Human-readable timespan rendering
//! - Common error types

pub mod dateformat;
pub mod error;
pub mod output;
pub mod state;
pub mod timespan;
pub mod tristate;

pub use dateformat::DateFormat;
pub use error::{Error, Result};
pub use output::OutputFormat;
pub use state::State;
pub use timespan::timespan;
pub use tristate::TriState;

/// Current schema version for all JSON outputs.
///
/// Follows semver: MAJOR.MINOR.PATCH
/// - MAJOR: Breaking changes (field removals, type changes)
/// - MINOR: Additive changes (new optional fields)
/// - PATCH: Bug fixes, documentation
pub const SCHEMA_VERSION: &str = "1.0.0";
