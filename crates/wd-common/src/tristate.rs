//! Tri-state service flags.
//!
//! The agent reports service flags as the literal strings `True` / `False`.
//! Anything else (missing key, empty value, locale surprises) is `Unknown`,
//! and `Unknown` must survive evaluation as its own state rather than
//! collapsing to `False`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A boolean that may also be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    True,
    False,
    Unknown,
}

impl TriState {
    /// Parse an agent value. Only the exact literals `"True"` and `"False"`
    /// are recognized.
    pub fn from_agent(value: &str) -> TriState {
        match value {
            "True" => TriState::True,
            "False" => TriState::False,
            _ => TriState::Unknown,
        }
    }

    /// Parse an optional agent value; a missing field is `Unknown`.
    pub fn from_agent_opt(value: Option<&str>) -> TriState {
        value.map_or(TriState::Unknown, TriState::from_agent)
    }

    pub fn is_unknown(self) -> bool {
        self == TriState::Unknown
    }

    /// The known value, if any.
    pub fn as_bool(self) -> Option<bool> {
        match self {
            TriState::True => Some(true),
            TriState::False => Some(false),
            TriState::Unknown => None,
        }
    }

    /// "Yes" / "No" for info output; `None` when unknown.
    pub fn yes_no(self) -> Option<&'static str> {
        self.as_bool().map(|b| if b { "Yes" } else { "No" })
    }
}
