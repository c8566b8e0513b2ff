//! Defender Check parameter loading and validation.
//!
//! This crate provides:
//! - Typed structs for the check-parameter JSON file
//! - Embedded defaults matching the shipped ruleset prefills
//! - Loading with semantic validation (warn must not exceed crit)

pub mod levels;
pub mod params;
pub mod resolve;

pub use levels::{Levels, LevelsSpec};
pub use params::{CheckParams, ServiceState};

/// Schema version for parameter files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
