//! Finding and metric types emitted by the evaluator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wd_common::State;
use wd_config::Levels;

/// A named numeric value for time-series recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Metric {
    pub name: String,
    /// Value in seconds; raw signed age, not clamped.
    pub value: f64,
    /// (warn, crit) levels for perfdata rendering, when alerting is on.
    pub levels: Option<Levels>,
}

impl Metric {
    pub fn new(name: &str, value: f64, levels: Option<Levels>) -> Self {
        Self {
            name: name.to_string(),
            value,
            levels,
        }
    }
}

/// One emitted check result.
///
/// `notice` marks low-visibility informational findings (version listings)
/// that belong in the long output, not the summary line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub state: State,
    pub summary: String,
    pub notice: bool,
    pub metric: Option<Metric>,
}

impl Finding {
    pub fn new(state: State, summary: impl Into<String>) -> Self {
        Self {
            state,
            summary: summary.into(),
            notice: false,
            metric: None,
        }
    }

    /// An informational result that never affects the summary line.
    pub fn notice(summary: impl Into<String>) -> Self {
        Self {
            state: State::Ok,
            summary: summary.into(),
            notice: true,
            metric: None,
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }
}
