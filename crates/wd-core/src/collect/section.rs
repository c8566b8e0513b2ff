//! Section parsing for the Windows Defender agent dump.
//!
//! The agent ships one section of `key<SEP>value` lines, historically with
//! `:` (ASCII 58) as separator:
//!
//! ```text
//! <<<windows_defender:sep(58)>>>
//! AMEngineVersion                 : 1.1.17800.5
//! AMServiceEnabled                : True
//! AntivirusSignatureLastUpdated   : 25.02.2021 22:37:08
//! FullScanEndTime                 :
//! ```
//!
//! Values may themselves contain the separator (timestamps do, with `:`),
//! so a line is split into fields and everything after the first field is
//! rejoined with the original separator rather than truncated.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wd_common::TriState;

/// Separator the stock agent plugin uses (`sep(58)`).
pub const DEFAULT_SEPARATOR: char = ':';

/// Raw rows as received: one row per line, fields split on the separator.
pub type StringTable = Vec<Vec<String>>;

/// `<<<name>>>` or `<<<name:sep(NN)>>>` transport header.
static SECTION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<<<[A-Za-z0-9_]+(?::sep\((\d+)\))?>>>\s*$").expect("header pattern is valid")
});

/// Split raw agent text into a [`StringTable`].
///
/// A leading transport header is consumed, and its `sep(NN)` (decimal ASCII
/// code) overrides the passed separator for the rest of the section. Blank
/// lines are skipped. Returns the rows together with the separator that was
/// actually in effect, which [`parse_section`] needs for value rejoining.
pub fn split_section(text: &str, separator: char) -> (StringTable, char) {
    let mut sep = separator;
    let mut rows = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if let Some(caps) = SECTION_HEADER.captures(line) {
            if let Some(code) = caps.get(1) {
                let parsed = code
                    .as_str()
                    .parse::<u32>()
                    .ok()
                    .and_then(char::from_u32);
                if let Some(c) = parsed {
                    debug!(separator = %c, "section header overrides separator");
                    sep = c;
                }
            }
            continue;
        }
        rows.push(line.split(sep).map(str::to_string).collect());
    }

    (rows, sep)
}

/// Rejoin a row's value fields with the separator they were split on.
fn rejoin_value(fields: &[String], separator: char) -> String {
    fields.join(&separator.to_string())
}

/// Typed snapshot of one Windows Defender status dump.
///
/// Timestamp fields stay raw strings: their format is ambiguous until the
/// configured date format is applied at evaluation time. Absent or empty
/// fields are `None` / [`TriState::Unknown`], never a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DefenderSection {
    // Version information
    pub am_engine_version: Option<String>,
    pub am_product_version: Option<String>,
    pub am_service_version: Option<String>,
    pub nis_engine_version: Option<String>,
    pub antispyware_signature_version: Option<String>,
    pub antivirus_signature_version: Option<String>,
    pub nis_signature_version: Option<String>,

    // Signature timestamps, raw
    pub antispyware_signature_last_updated: Option<String>,
    pub antivirus_signature_last_updated: Option<String>,
    pub nis_signature_last_updated: Option<String>,

    // Scan timestamps, raw
    pub full_scan_end_time: Option<String>,
    pub quick_scan_end_time: Option<String>,

    // Service flags
    pub am_service_enabled: TriState,
    pub behavior_monitor_enabled: TriState,
    pub antispyware_enabled: TriState,
    pub antivirus_enabled: TriState,
    pub nis_enabled: TriState,
    pub realtime_protection_enabled: TriState,
    pub onaccess_protection_enabled: TriState,

    // Additional info
    pub am_running_mode: Option<String>,
    pub computer_state: Option<String>,
    pub is_tamper_protected: TriState,
    pub is_virtual_machine: TriState,
}

/// Build a [`DefenderSection`] from raw rows.
///
/// Each row's first field (trimmed) is the key; the value is the remaining
/// fields rejoined with `separator`, then trimmed. Rows with a single field
/// are ignored. Duplicate keys: last occurrence wins. Returns `None` when
/// the input holds no usable rows ("no data").
pub fn parse_section(table: &[Vec<String>], separator: char) -> Option<DefenderSection> {
    let mut raw: HashMap<&str, String> = HashMap::new();
    for row in table {
        if row.len() < 2 {
            continue;
        }
        let key = row[0].trim();
        let value = rejoin_value(&row[1..], separator).trim().to_string();
        raw.insert(key, value);
    }

    if raw.is_empty() {
        return None;
    }
    debug!(fields = raw.len(), "parsed agent section");

    let field = |key: &str| -> Option<String> {
        raw.get(key).filter(|v| !v.is_empty()).map(|v| v.to_string())
    };
    let flag = |key: &str| -> TriState { TriState::from_agent_opt(raw.get(key).map(String::as_str)) };

    Some(DefenderSection {
        am_engine_version: field("AMEngineVersion"),
        am_product_version: field("AMProductVersion"),
        am_service_version: field("AMServiceVersion"),
        nis_engine_version: field("NISEngineVersion"),
        antispyware_signature_version: field("AntispywareSignatureVersion"),
        antivirus_signature_version: field("AntivirusSignatureVersion"),
        nis_signature_version: field("NISSignatureVersion"),
        antispyware_signature_last_updated: field("AntispywareSignatureLastUpdated"),
        antivirus_signature_last_updated: field("AntivirusSignatureLastUpdated"),
        nis_signature_last_updated: field("NISSignatureLastUpdated"),
        full_scan_end_time: field("FullScanEndTime"),
        quick_scan_end_time: field("QuickScanEndTime"),
        am_service_enabled: flag("AMServiceEnabled"),
        behavior_monitor_enabled: flag("BehaviorMonitorEnabled"),
        antispyware_enabled: flag("AntispywareEnabled"),
        antivirus_enabled: flag("AntivirusEnabled"),
        nis_enabled: flag("NISEnabled"),
        realtime_protection_enabled: flag("RealTimeProtectionEnabled"),
        onaccess_protection_enabled: flag("OnAccessProtectionEnabled"),
        am_running_mode: field("AMRunningMode"),
        computer_state: field("ComputerState"),
        is_tamper_protected: flag("IsTamperProtected"),
        is_virtual_machine: flag("IsVirtualMachine"),
    })
}
