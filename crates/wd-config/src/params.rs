//! Check parameters and their embedded defaults.
//!
//! Field names in the JSON file keep the agent's key spelling
//! (`AntivirusSignatureLastUpdated`, `NISEnabled`, ...) so a parameter file
//! reads against the raw dump it configures.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use wd_common::{DateFormat, TriState};

use crate::levels::LevelsSpec;

/// Expected state of a monitored service flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceState {
    #[default]
    Enabled,
    Disabled,
}

impl ServiceState {
    /// The state a known tri-state flag reports.
    pub fn from_flag(flag: TriState) -> Option<ServiceState> {
        flag.as_bool().map(|enabled| {
            if enabled {
                ServiceState::Enabled
            } else {
                ServiceState::Disabled
            }
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            ServiceState::Enabled => "enabled",
            ServiceState::Disabled => "disabled",
        }
    }
}

impl std::fmt::Display for ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete check parameters for one evaluation.
///
/// Every field has a default matching the shipped ruleset prefills, so a
/// partial (or absent) parameter file configures only what it names. The
/// scan slots default to `None`: an unconfigured scan check is skipped, not
/// defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CheckParams {
    /// Timestamp locale family of the monitored host.
    pub date_format: DateFormat,

    // Signature ages
    #[serde(rename = "AntispywareSignatureLastUpdated")]
    pub antispyware_signature: LevelsSpec,

    #[serde(rename = "AntivirusSignatureLastUpdated")]
    pub antivirus_signature: LevelsSpec,

    #[serde(rename = "NISSignatureLastUpdated")]
    pub nis_signature: LevelsSpec,

    // Scan ages; absent means "do not check"
    #[serde(rename = "FullScanEndTime")]
    pub full_scan: Option<LevelsSpec>,

    #[serde(rename = "QuickScanEndTime")]
    pub quick_scan: Option<LevelsSpec>,

    // Expected service states
    #[serde(rename = "AMServiceEnabled")]
    pub am_service: ServiceState,

    #[serde(rename = "BehaviorMonitorEnabled")]
    pub behavior_monitor: ServiceState,

    #[serde(rename = "AntispywareEnabled")]
    pub antispyware: ServiceState,

    #[serde(rename = "AntivirusEnabled")]
    pub antivirus: ServiceState,

    #[serde(rename = "NISEnabled")]
    pub nis: ServiceState,

    #[serde(rename = "RealTimeProtectionEnabled")]
    pub realtime_protection: ServiceState,

    #[serde(rename = "OnAccessProtectionEnabled")]
    pub onaccess_protection: ServiceState,
}

impl Default for CheckParams {
    fn default() -> Self {
        Self {
            date_format: DateFormat::Eu,
            antispyware_signature: LevelsSpec::fixed(3.0 * 86400.0, 7.0 * 86400.0),
            antivirus_signature: LevelsSpec::fixed(2.0 * 86400.0, 7.0 * 86400.0),
            nis_signature: LevelsSpec::fixed(5.0 * 86400.0, 7.0 * 86400.0),
            full_scan: None,
            quick_scan: None,
            am_service: ServiceState::Enabled,
            behavior_monitor: ServiceState::Enabled,
            antispyware: ServiceState::Enabled,
            antivirus: ServiceState::Enabled,
            nis: ServiceState::Enabled,
            realtime_protection: ServiceState::Enabled,
            onaccess_protection: ServiceState::Enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::Levels;

    #[test]
    fn defaults_match_ruleset_prefills() {
        let params = CheckParams::default();
        assert_eq!(
            params.antivirus_signature.levels(),
            Some(&Levels::days(2.0, 7.0))
        );
        assert_eq!(
            params.antispyware_signature.levels(),
            Some(&Levels::days(3.0, 7.0))
        );
        assert_eq!(params.nis_signature.levels(), Some(&Levels::days(5.0, 7.0)));
        assert!(params.full_scan.is_none());
        assert!(params.quick_scan.is_none());
        assert_eq!(params.realtime_protection, ServiceState::Enabled);
        assert_eq!(params.date_format, DateFormat::Eu);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let params: CheckParams = serde_json::from_str(
            r#"{
                "date_format": "iso",
                "FullScanEndTime": {"fixed": {"warn": 604800.0, "crit": 1209600.0}},
                "NISEnabled": "disabled"
            }"#,
        )
        .unwrap();

        assert_eq!(params.date_format, DateFormat::Iso);
        assert_eq!(
            params.full_scan.and_then(|s| s.levels().copied()),
            Some(Levels::days(7.0, 14.0))
        );
        assert_eq!(params.nis, ServiceState::Disabled);
        // Untouched fields keep the shipped defaults.
        assert_eq!(
            params.antivirus_signature.levels(),
            Some(&Levels::days(2.0, 7.0))
        );
        assert_eq!(params.am_service, ServiceState::Enabled);
    }

    #[test]
    fn service_state_from_flag() {
        assert_eq!(
            ServiceState::from_flag(TriState::True),
            Some(ServiceState::Enabled)
        );
        assert_eq!(
            ServiceState::from_flag(TriState::False),
            Some(ServiceState::Disabled)
        );
        assert_eq!(ServiceState::from_flag(TriState::Unknown), None);
    }
}
