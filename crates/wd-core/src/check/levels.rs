//! Shared age-against-levels comparison.

use wd_common::{timespan, State};
use wd_config::Levels;

use crate::check::finding::{Finding, Metric};

/// Compare an age against optional upper levels and build the finding.
///
/// The summary shows the age clamped to zero (operators never read
/// "-30 minutes old"); comparison and the emitted metric keep the raw
/// signed value. Threshold text is appended only on non-ok results, and the
/// metric is emitted regardless of severity — also under `no_levels`.
pub fn check_levels(age: f64, levels: Option<&Levels>, metric_name: &str, label: &str) -> Finding {
    let state = levels.map_or(State::Ok, |l| l.evaluate(age));

    let mut summary = format!("{label}: {}", timespan(age.max(0.0)));
    if state != State::Ok {
        if let Some(l) = levels {
            summary.push_str(&render_thresholds(l));
        }
    }

    Finding::new(state, summary).with_metric(Metric::new(metric_name, age, levels.copied()))
}

/// " (warn/crit at {warn}/{crit})" suffix.
pub fn render_thresholds(levels: &Levels) -> String {
    format!(
        " (warn/crit at {}/{})",
        timespan(levels.warn),
        timespan(levels.crit)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: f64 = 86_400.0;

    #[test]
    fn ok_has_no_threshold_text() {
        let finding = check_levels(DAY, Some(&Levels::days(2.0, 7.0)), "sig_age", "signature age");
        assert_eq!(finding.state, State::Ok);
        assert_eq!(finding.summary, "signature age: 1 day");
    }

    #[test]
    fn warn_and_crit_show_thresholds() {
        let levels = Levels::days(2.0, 7.0);
        let warn = check_levels(3.0 * DAY, Some(&levels), "sig_age", "signature age");
        assert_eq!(warn.state, State::Warn);
        assert_eq!(
            warn.summary,
            "signature age: 3 days (warn/crit at 2 days/7 days)"
        );

        let crit = check_levels(8.0 * DAY, Some(&levels), "sig_age", "signature age");
        assert_eq!(crit.state, State::Crit);
    }

    #[test]
    fn metric_keeps_raw_value_even_when_ok() {
        let finding = check_levels(-1800.0, Some(&Levels::days(2.0, 7.0)), "sig_age", "age");
        assert_eq!(finding.state, State::Ok);
        // Display clamps, metric does not.
        assert_eq!(finding.summary, "age: 0 seconds");
        assert_eq!(finding.metric.unwrap().value, -1800.0);
    }

    #[test]
    fn no_levels_still_emits_metric() {
        let finding = check_levels(30.0 * DAY, None, "full_scan_age", "Last Full Scan");
        assert_eq!(finding.state, State::Ok);
        let metric = finding.metric.unwrap();
        assert_eq!(metric.value, 30.0 * DAY);
        assert_eq!(metric.levels, None);
    }
}
