//! Output format selection.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How check results are rendered on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Monitoring-plugin text: summary line with perfdata, notices as long output.
    #[default]
    Text,
    /// JSON envelope with schema version, overall state, and all findings.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
