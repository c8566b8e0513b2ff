//! Date-format families for agent timestamps.
//!
//! Windows hosts emit timestamps in whatever shape the locale dictates, and
//! hosts have been observed mixing shapes within one dump. Each family is an
//! ordered list of candidate layouts; the first layout that parses a given
//! string (and passes the future-tolerance gate in `wd-core`) wins. The
//! order matters: trying `%d/%m` before `%m/%d` in the `eu` family is what
//! keeps a European date from being silently misread as a US one.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which locale family the monitored host uses for timestamps.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    /// European: `25.02.2021 22:37:07` or `25/02/2021 22:37:07`.
    #[default]
    Eu,
    /// US: `11/18/2021 10:38:19 PM` or `11/18/2021 22:38:19`.
    Us,
    /// ISO 8601: `2021-02-25 22:37:07` or `2021-02-25T22:37:07`.
    Iso,
}

impl DateFormat {
    /// Candidate chrono layouts, in acceptance order.
    ///
    /// The `eu` list includes the unambiguous US AM/PM layout because mixed
    /// formats on one host are an observed reality, not a hypothetical.
    pub const fn layouts(self) -> &'static [&'static str] {
        match self {
            DateFormat::Us => &["%m/%d/%Y %I:%M:%S %p", "%m/%d/%Y %H:%M:%S"],
            DateFormat::Eu => &[
                "%d.%m.%Y %H:%M:%S",
                "%m/%d/%Y %I:%M:%S %p",
                "%d/%m/%Y %H:%M:%S",
                "%d/%m/%Y %I:%M:%S %p",
            ],
            DateFormat::Iso => &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"],
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DateFormat::Eu => "eu",
            DateFormat::Us => "us",
            DateFormat::Iso => "iso",
        }
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eu_tries_dotted_layout_first() {
        assert_eq!(DateFormat::Eu.layouts()[0], "%d.%m.%Y %H:%M:%S");
    }

    #[test]
    fn every_family_has_candidates() {
        for fmt in [DateFormat::Eu, DateFormat::Us, DateFormat::Iso] {
            assert!(!fmt.layouts().is_empty());
        }
    }

    #[test]
    fn default_is_eu() {
        assert_eq!(DateFormat::default(), DateFormat::Eu);
    }
}
