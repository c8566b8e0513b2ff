//! Rendering of findings for monitoring consumers.
//!
//! Text mode follows the classic plugin convention: one summary line with
//! the overall badge, finding summaries joined by `"; "`, and perfdata
//! after `|` as `name=value;warn;crit`. Notices become long-output lines
//! below the summary. JSON mode wraps the findings in a stable envelope.

use schemars::JsonSchema;
use serde::Serialize;
use wd_common::{Result, State, SCHEMA_VERSION};

use crate::check::{Finding, Metric};

/// Worst severity across all findings; `Ok` for an empty list.
pub fn overall(findings: &[Finding]) -> State {
    State::overall(findings.iter().map(|f| f.state))
}

/// JSON envelope for one evaluation.
#[derive(Debug, Serialize, JsonSchema)]
pub struct CheckReport<'a> {
    pub schema_version: &'static str,
    pub overall: State,
    pub findings: &'a [Finding],
}

/// Render the findings as a JSON report.
pub fn render_json(findings: &[Finding]) -> Result<String> {
    let report = CheckReport {
        schema_version: SCHEMA_VERSION,
        overall: overall(findings),
        findings,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Render the findings as plugin text output.
pub fn render_text(findings: &[Finding]) -> String {
    let state = overall(findings);

    let summaries: Vec<&str> = findings
        .iter()
        .filter(|f| !f.notice)
        .map(|f| f.summary.as_str())
        .collect();
    let summary = if summaries.is_empty() {
        "no findings".to_string()
    } else {
        summaries.join("; ")
    };

    let perfdata: Vec<String> = findings
        .iter()
        .filter_map(|f| f.metric.as_ref())
        .map(render_perfdata)
        .collect();

    let mut out = format!("{} - {}", state.badge(), summary);
    if !perfdata.is_empty() {
        out.push_str(" | ");
        out.push_str(&perfdata.join(" "));
    }
    for notice in findings.iter().filter(|f| f.notice) {
        out.push('\n');
        out.push_str(&notice.summary);
    }
    out
}

/// `name=value;warn;crit`, levels omitted when alerting is off.
fn render_perfdata(metric: &Metric) -> String {
    match &metric.levels {
        Some(levels) => format!(
            "{}={};{};{}",
            metric.name,
            format_value(metric.value),
            format_value(levels.warn),
            format_value(levels.crit)
        ),
        None => format!("{}={}", metric.name, format_value(metric.value)),
    }
}

/// Integral values print without a fraction; perfdata consumers are picky.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.3}")
    }
}
