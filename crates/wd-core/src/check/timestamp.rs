//! Timestamp parsing under ambiguous locale formats.

use chrono::NaiveDateTime;
use tracing::debug;
use wd_common::DateFormat;

/// How far into the future a parsed timestamp may land and still be
/// accepted. Covers timezone-induced skew between host and monitoring
/// server; anything further ahead means the candidate layout misread the
/// date (e.g. a DD/MM date taken as MM/DD).
pub const FUTURE_TOLERANCE_SECS: f64 = 86_400.0;

/// Parse a raw agent timestamp and return its age in seconds at `now`.
///
/// Tries each candidate layout of `format` in order. A candidate is
/// accepted only when it parses the whole string *and* the resulting age is
/// within [`FUTURE_TOLERANCE_SECS`] of the future; a candidate that parses
/// but lands further ahead falls through to the next layout. Returns `None`
/// when no candidate is accepted — the caller degrades to `unknown`, never
/// an error.
///
/// The returned age may be slightly negative (clock skew inside the
/// tolerance window); display code clamps it, threshold comparison keeps
/// the raw value.
pub fn age_seconds(raw: &str, now: NaiveDateTime, format: DateFormat) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for layout in format.layouts() {
        let Ok(parsed) = NaiveDateTime::parse_from_str(raw, layout) else {
            continue;
        };
        let age = now.signed_duration_since(parsed).num_seconds() as f64;
        if age >= -FUTURE_TOLERANCE_SECS {
            return Some(age);
        }
    }

    debug!(raw, format = %format, "timestamp matched no candidate layout");
    None
}
