//! Human-readable timespan rendering.

const MINUTE: u64 = 60;
const HOUR: u64 = 3600;
const DAY: u64 = 86400;

/// Render a number of seconds as a short human-readable span.
///
/// Shows the largest unit plus one sub-unit when the sub-unit is nonzero:
/// `"3 days"`, `"3 days 2 hours"`, `"2 hours 30 minutes"`, `"45 seconds"`.
/// Negative inputs are clamped to zero; ages shown to operators are never
/// "in the future".
pub fn timespan(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };

    let (major, major_unit, rest, minor_unit) = if total >= DAY {
        (total / DAY, "day", (total % DAY) / HOUR, "hour")
    } else if total >= HOUR {
        (total / HOUR, "hour", (total % HOUR) / MINUTE, "minute")
    } else if total >= MINUTE {
        (total / MINUTE, "minute", total % MINUTE, "second")
    } else {
        return plural(total, "second");
    };

    if rest == 0 {
        plural(major, major_unit)
    } else {
        format!("{} {}", plural(major, major_unit), plural(rest, minor_unit))
    }
}

fn plural(n: u64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}
