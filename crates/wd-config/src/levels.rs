//! Upper-bound alert levels for age values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wd_common::State;

/// Fixed (warn, crit) thresholds in seconds, compared as upper bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Levels {
    pub warn: f64,
    pub crit: f64,
}

impl Levels {
    pub const fn new(warn: f64, crit: f64) -> Self {
        Self { warn, crit }
    }

    /// Days are the natural unit for signature and scan ages.
    pub const fn days(warn: f64, crit: f64) -> Self {
        Self::new(warn * 86400.0, crit * 86400.0)
    }

    /// Compare a value against the thresholds. A value exactly at a
    /// threshold triggers it.
    pub fn evaluate(&self, value: f64) -> State {
        if value >= self.crit {
            State::Crit
        } else if value >= self.warn {
            State::Warn
        } else {
            State::Ok
        }
    }

    /// Semantic validation; `field` names the offending parameter in the error.
    pub fn validate(&self, field: &str) -> Result<(), String> {
        if !self.warn.is_finite() || !self.crit.is_finite() {
            return Err(format!("{field}: levels must be finite"));
        }
        if self.warn < 0.0 {
            return Err(format!("{field}: warn level must be non-negative"));
        }
        if self.warn > self.crit {
            return Err(format!(
                "{field}: warn level {} exceeds crit level {}",
                self.warn, self.crit
            ));
        }
        Ok(())
    }
}

/// A configured level slot: fixed thresholds, or an explicit "do not alert".
///
/// Under `NoLevels` the age is still computed and its metric still emitted,
/// so time-series history keeps flowing while alerting is off.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LevelsSpec {
    Fixed(Levels),
    NoLevels,
}

impl LevelsSpec {
    pub const fn fixed(warn: f64, crit: f64) -> Self {
        LevelsSpec::Fixed(Levels::new(warn, crit))
    }

    /// The fixed thresholds, if alerting is enabled.
    pub fn levels(&self) -> Option<&Levels> {
        match self {
            LevelsSpec::Fixed(levels) => Some(levels),
            LevelsSpec::NoLevels => None,
        }
    }

    pub fn validate(&self, field: &str) -> Result<(), String> {
        match self {
            LevelsSpec::Fixed(levels) => levels.validate(field),
            LevelsSpec::NoLevels => Ok(()),
        }
    }
}
