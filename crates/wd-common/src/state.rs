//! Monitoring states and worst-of aggregation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Severity of a single finding and of the overall verdict.
///
/// Aggregation ranks `Crit` above `Unknown`: an unparseable field must not
/// mask a hard failure elsewhere, but still outranks a plain warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Ok,
    Warn,
    Crit,
    Unknown,
}

impl State {
    /// Lowercase name, matching the serde representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            State::Ok => "ok",
            State::Warn => "warn",
            State::Crit => "crit",
            State::Unknown => "unknown",
        }
    }

    /// Uppercase badge for plugin text output ("WARN - ...").
    pub const fn badge(self) -> &'static str {
        match self {
            State::Ok => "OK",
            State::Warn => "WARN",
            State::Crit => "CRIT",
            State::Unknown => "UNKNOWN",
        }
    }

    /// Severity rank used by [`State::worst`]: ok < warn < unknown < crit.
    const fn rank(self) -> u8 {
        match self {
            State::Ok => 0,
            State::Warn => 1,
            State::Unknown => 2,
            State::Crit => 3,
        }
    }

    /// The more severe of two states.
    pub fn worst(self, other: State) -> State {
        if other.rank() > self.rank() {
            other
        } else {
            self
        }
    }

    /// Fold an iterator of states into the overall verdict.
    /// An empty iterator yields `Ok`.
    pub fn overall<I: IntoIterator<Item = State>>(states: I) -> State {
        states.into_iter().fold(State::Ok, State::worst)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
