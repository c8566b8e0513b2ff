//! Threshold evaluation of a parsed Defender section.
//!
//! `check_defender` walks the snapshot in a fixed, documented order so
//! downstream consumers can rely on it for display grouping:
//! signature ages → service states → scan ages → version/info notices.
//! Nothing in here is fatal: a missing field or unparseable timestamp
//! degrades to a per-field `unknown` finding.

pub mod finding;
pub mod levels;
pub mod timestamp;

pub use finding::{Finding, Metric};
pub use levels::check_levels;
pub use timestamp::age_seconds;

use chrono::NaiveDateTime;
use wd_common::State;
use wd_config::{CheckParams, Levels, ServiceState};

use crate::collect::DefenderSection;
use levels::render_thresholds;

/// Thresholds shown in the "never executed" message when a scan slot is
/// configured as `no_levels` and there is nothing better to display.
const NEVER_RUN_FALLBACK: Levels = Levels::days(7.0, 14.0);

/// Evaluate a snapshot against check parameters at a given instant.
///
/// `now` is an explicit input so runs are reproducible; the CLI passes
/// wall-clock time, tests pass a fixed instant.
pub fn check_defender(
    section: &DefenderSection,
    params: &CheckParams,
    now: NaiveDateTime,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    check_signature_ages(section, params, now, &mut findings);
    check_service_states(section, params, &mut findings);
    check_scan_ages(section, params, now, &mut findings);
    version_info(section, &mut findings);
    findings
}

fn check_signature_ages(
    section: &DefenderSection,
    params: &CheckParams,
    now: NaiveDateTime,
    findings: &mut Vec<Finding>,
) {
    let signatures = [
        (
            "AntiSpyware signature",
            "antispyware_sig_age",
            section.antispyware_signature_last_updated.as_deref(),
            &params.antispyware_signature,
        ),
        (
            "AntiVirus signature",
            "antivirus_sig_age",
            section.antivirus_signature_last_updated.as_deref(),
            &params.antivirus_signature,
        ),
        (
            "NIS signature",
            "nis_sig_age",
            section.nis_signature_last_updated.as_deref(),
            &params.nis_signature,
        ),
    ];

    for (label, metric_name, raw, spec) in signatures {
        let age = raw.and_then(|r| age_seconds(r, now, params.date_format));

        match age {
            None => findings.push(Finding::new(
                State::Unknown,
                format!("Age of {label} is unknown"),
            )),
            Some(age) => findings.push(check_levels(
                age,
                spec.levels(),
                metric_name,
                &format!("{label} age"),
            )),
        }
    }
}

fn check_service_states(
    section: &DefenderSection,
    params: &CheckParams,
    findings: &mut Vec<Finding>,
) {
    let services = [
        ("AM Service", section.am_service_enabled, params.am_service),
        (
            "Behavior Monitor",
            section.behavior_monitor_enabled,
            params.behavior_monitor,
        ),
        (
            "Antispyware",
            section.antispyware_enabled,
            params.antispyware,
        ),
        ("Antivirus", section.antivirus_enabled, params.antivirus),
        ("NIS", section.nis_enabled, params.nis),
        (
            "RealTimeProtection",
            section.realtime_protection_enabled,
            params.realtime_protection,
        ),
        (
            "OnAccessProtection",
            section.onaccess_protection_enabled,
            params.onaccess_protection,
        ),
    ];

    let mut issues = 0usize;
    let mut conforming = 0usize;

    for (description, flag, expected) in services {
        match ServiceState::from_flag(flag) {
            None => {
                findings.push(Finding::new(
                    State::Unknown,
                    format!("service \"{description}\" state is unknown"),
                ));
                issues += 1;
            }
            Some(actual) if actual != expected => {
                findings.push(Finding::new(
                    State::Warn,
                    format!("service \"{description}\" is {actual} (expected {expected})"),
                ));
                issues += 1;
            }
            Some(_) => conforming += 1,
        }
    }

    // One aggregate line instead of seven; suppressed as soon as any
    // mismatch or unknown was reported, so the output never reads
    // "all fine" next to a warning.
    if issues == 0 {
        findings.push(Finding::new(
            State::Ok,
            format!("All {conforming} services in expected state"),
        ));
    }
}

fn check_scan_ages(
    section: &DefenderSection,
    params: &CheckParams,
    now: NaiveDateTime,
    findings: &mut Vec<Finding>,
) {
    let scans = [
        (
            "Full Scan",
            "full_scan_age",
            section.full_scan_end_time.as_deref(),
            params.full_scan.as_ref(),
        ),
        (
            "Quick Scan",
            "quick_scan_age",
            section.quick_scan_end_time.as_deref(),
            params.quick_scan.as_ref(),
        ),
    ];

    for (label, metric_name, raw, spec) in scans {
        // An unconfigured scan check is skipped entirely, not defaulted.
        let Some(spec) = spec else {
            continue;
        };

        let age = raw.and_then(|r| age_seconds(r, now, params.date_format));

        match age {
            None => {
                // A scan that apparently never ran is a hard failure, and
                // the zero metric keeps the time series unbroken.
                let shown = spec.levels().unwrap_or(&NEVER_RUN_FALLBACK);
                findings.push(
                    Finding::new(
                        State::Crit,
                        format!(
                            "{label} has never been executed{}",
                            render_thresholds(shown)
                        ),
                    )
                    .with_metric(Metric::new(metric_name, 0.0, spec.levels().copied())),
                );
            }
            Some(age) => findings.push(check_levels(
                age,
                spec.levels(),
                metric_name,
                &format!("Last {label}"),
            )),
        }
    }
}

fn version_info(section: &DefenderSection, findings: &mut Vec<Finding>) {
    let versions: Vec<String> = [
        ("AM Engine", &section.am_engine_version),
        ("AM Product", &section.am_product_version),
        ("NIS Sig", &section.nis_signature_version),
        ("AV Sig", &section.antivirus_signature_version),
        ("AS Sig", &section.antispyware_signature_version),
    ]
    .into_iter()
    .filter_map(|(label, version)| version.as_ref().map(|v| format!("{label}: {v}")))
    .collect();

    if !versions.is_empty() {
        findings.push(Finding::notice(format!(
            "Versions - {}",
            versions.join(", ")
        )));
    }

    let mut details: Vec<String> = Vec::new();
    if let Some(mode) = &section.am_running_mode {
        details.push(format!("Running Mode: {mode}"));
    }
    if let Some(answer) = section.is_tamper_protected.yes_no() {
        details.push(format!("Tamper Protected: {answer}"));
    }
    if let Some(answer) = section.is_virtual_machine.yes_no() {
        details.push(format!("Virtual Machine: {answer}"));
    }

    if !details.is_empty() {
        findings.push(Finding::notice(details.join(" | ")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wd_common::TriState;
    use wd_config::LevelsSpec;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn empty_section() -> DefenderSection {
        DefenderSection {
            am_engine_version: None,
            am_product_version: None,
            am_service_version: None,
            nis_engine_version: None,
            antispyware_signature_version: None,
            antivirus_signature_version: None,
            nis_signature_version: None,
            antispyware_signature_last_updated: None,
            antivirus_signature_last_updated: None,
            nis_signature_last_updated: None,
            full_scan_end_time: None,
            quick_scan_end_time: None,
            am_service_enabled: TriState::Unknown,
            behavior_monitor_enabled: TriState::Unknown,
            antispyware_enabled: TriState::Unknown,
            antivirus_enabled: TriState::Unknown,
            nis_enabled: TriState::Unknown,
            realtime_protection_enabled: TriState::Unknown,
            onaccess_protection_enabled: TriState::Unknown,
            am_running_mode: None,
            computer_state: None,
            is_tamper_protected: TriState::Unknown,
            is_virtual_machine: TriState::Unknown,
        }
    }

    fn all_services(section: &mut DefenderSection, flag: TriState) {
        section.am_service_enabled = flag;
        section.behavior_monitor_enabled = flag;
        section.antispyware_enabled = flag;
        section.antivirus_enabled = flag;
        section.nis_enabled = flag;
        section.realtime_protection_enabled = flag;
        section.onaccess_protection_enabled = flag;
    }

    #[test]
    fn missing_timestamps_are_unknown_not_crit() {
        let section = empty_section();
        let findings = check_defender(&section, &CheckParams::default(), at(2021, 3, 1, 0, 0, 0));

        let sig_findings: Vec<_> = findings
            .iter()
            .filter(|f| f.summary.contains("signature"))
            .collect();
        assert_eq!(sig_findings.len(), 3);
        for finding in sig_findings {
            assert_eq!(finding.state, State::Unknown);
            assert!(finding.summary.starts_with("Age of "));
            assert!(finding.metric.is_none());
        }
    }

    #[test]
    fn signature_warn_with_metric_at_three_days() {
        let mut section = empty_section();
        section.antivirus_signature_last_updated = Some("25.02.2021 22:37:08".to_string());
        all_services(&mut section, TriState::True);

        // Exactly three days later; antivirus defaults are warn 2d / crit 7d.
        let now = at(2021, 2, 28, 22, 37, 8);
        let findings = check_defender(&section, &CheckParams::default(), now);

        let av = findings
            .iter()
            .find(|f| f.summary.contains("AntiVirus"))
            .unwrap();
        assert_eq!(av.state, State::Warn);
        assert!(av.summary.contains("3 days"));
        let metric = av.metric.as_ref().unwrap();
        assert_eq!(metric.name, "antivirus_sig_age");
        assert_eq!(metric.value, 259_200.0);
    }

    #[test]
    fn all_services_conforming_yields_single_aggregate() {
        let mut section = empty_section();
        all_services(&mut section, TriState::True);

        let findings = check_defender(&section, &CheckParams::default(), at(2021, 3, 1, 0, 0, 0));
        let aggregate: Vec<_> = findings
            .iter()
            .filter(|f| f.summary.contains("services in expected state"))
            .collect();
        assert_eq!(aggregate.len(), 1);
        assert_eq!(aggregate[0].summary, "All 7 services in expected state");
        assert!(!findings.iter().any(|f| f.summary.starts_with("service \"")));
    }

    #[test]
    fn single_mismatch_warns_and_suppresses_aggregate() {
        let mut section = empty_section();
        all_services(&mut section, TriState::True);
        section.nis_enabled = TriState::False;

        let findings = check_defender(&section, &CheckParams::default(), at(2021, 3, 1, 0, 0, 0));
        let mismatches: Vec<_> = findings
            .iter()
            .filter(|f| f.summary.starts_with("service \""))
            .collect();
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].state, State::Warn);
        assert_eq!(
            mismatches[0].summary,
            "service \"NIS\" is disabled (expected enabled)"
        );
        assert!(!findings
            .iter()
            .any(|f| f.summary.contains("services in expected state")));
    }

    #[test]
    fn expected_disabled_service_is_conforming() {
        let mut section = empty_section();
        all_services(&mut section, TriState::True);
        section.nis_enabled = TriState::False;

        let mut params = CheckParams::default();
        params.nis = ServiceState::Disabled;

        let findings = check_defender(&section, &params, at(2021, 3, 1, 0, 0, 0));
        assert!(findings
            .iter()
            .any(|f| f.summary == "All 7 services in expected state"));
    }

    #[test]
    fn unknown_service_reported_individually() {
        let mut section = empty_section();
        all_services(&mut section, TriState::True);
        section.onaccess_protection_enabled = TriState::Unknown;

        let findings = check_defender(&section, &CheckParams::default(), at(2021, 3, 1, 0, 0, 0));
        let unknown = findings
            .iter()
            .find(|f| f.summary == "service \"OnAccessProtection\" state is unknown")
            .unwrap();
        assert_eq!(unknown.state, State::Unknown);
        // The aggregate would contradict the unknown, so it is suppressed.
        assert!(!findings
            .iter()
            .any(|f| f.summary.contains("services in expected state")));
    }

    #[test]
    fn unconfigured_scan_produces_no_findings() {
        let section = empty_section();
        let findings = check_defender(&section, &CheckParams::default(), at(2021, 3, 1, 0, 0, 0));
        assert!(!findings.iter().any(|f| f.summary.contains("Scan")));
        assert!(!findings
            .iter()
            .any(|f| f.metric.as_ref().is_some_and(|m| m.name.contains("scan"))));
    }

    #[test]
    fn configured_scan_with_missing_timestamp_is_crit_with_zero_metric() {
        let section = empty_section();
        let mut params = CheckParams::default();
        params.full_scan = Some(LevelsSpec::fixed(7.0 * 86_400.0, 14.0 * 86_400.0));

        let findings = check_defender(&section, &params, at(2021, 3, 1, 0, 0, 0));
        let scan = findings
            .iter()
            .find(|f| f.summary.contains("Full Scan"))
            .unwrap();
        assert_eq!(scan.state, State::Crit);
        assert_eq!(
            scan.summary,
            "Full Scan has never been executed (warn/crit at 7 days/14 days)"
        );
        let metric = scan.metric.as_ref().unwrap();
        assert_eq!(metric.name, "full_scan_age");
        assert_eq!(metric.value, 0.0);
    }

    #[test]
    fn configured_scan_under_levels_is_ok() {
        let mut section = empty_section();
        section.quick_scan_end_time = Some("28.02.2021 12:00:00".to_string());
        let mut params = CheckParams::default();
        params.quick_scan = Some(LevelsSpec::fixed(2.0 * 86_400.0, 7.0 * 86_400.0));

        let findings = check_defender(&section, &params, at(2021, 3, 1, 12, 0, 0));
        let scan = findings
            .iter()
            .find(|f| f.summary.contains("Quick Scan"))
            .unwrap();
        assert_eq!(scan.state, State::Ok);
        assert_eq!(scan.summary, "Last Quick Scan: 1 day");
    }

    #[test]
    fn version_notice_lists_present_fields_only() {
        let mut section = empty_section();
        section.am_engine_version = Some("1.1.17800.5".to_string());
        section.antivirus_signature_version = Some("1.331.1839.0".to_string());
        section.am_running_mode = Some("EDR Block Mode".to_string());
        section.is_virtual_machine = TriState::True;
        all_services(&mut section, TriState::True);

        let findings = check_defender(&section, &CheckParams::default(), at(2021, 3, 1, 0, 0, 0));

        let versions = findings.iter().find(|f| f.summary.starts_with("Versions")).unwrap();
        assert!(versions.notice);
        assert_eq!(versions.state, State::Ok);
        assert_eq!(
            versions.summary,
            "Versions - AM Engine: 1.1.17800.5, AV Sig: 1.331.1839.0"
        );

        let info = findings.iter().find(|f| f.summary.contains("Running Mode")).unwrap();
        assert!(info.notice);
        assert_eq!(info.summary, "Running Mode: EDR Block Mode | Virtual Machine: Yes");
    }

    #[test]
    fn notices_come_last_and_never_alert() {
        let mut section = empty_section();
        section.am_engine_version = Some("1.1.17800.5".to_string());
        all_services(&mut section, TriState::False);

        let findings = check_defender(&section, &CheckParams::default(), at(2021, 3, 1, 0, 0, 0));
        let last = findings.last().unwrap();
        assert!(last.notice);
        assert_eq!(last.state, State::Ok);
    }

    #[test]
    fn findings_keep_documented_order() {
        let mut section = empty_section();
        section.antivirus_signature_last_updated = Some("25.02.2021 22:37:08".to_string());
        section.full_scan_end_time = Some("20.02.2021 01:00:00".to_string());
        section.am_engine_version = Some("1.1.17800.5".to_string());
        all_services(&mut section, TriState::True);

        let mut params = CheckParams::default();
        params.full_scan = Some(LevelsSpec::fixed(30.0 * 86_400.0, 60.0 * 86_400.0));

        let findings = check_defender(&section, &params, at(2021, 2, 26, 0, 0, 0));
        let position = |needle: &str| {
            findings
                .iter()
                .position(|f| f.summary.contains(needle))
                .unwrap()
        };

        assert!(position("AntiVirus signature age") < position("services in expected state"));
        assert!(position("services in expected state") < position("Last Full Scan"));
        assert!(position("Last Full Scan") < position("Versions"));
    }
}
