//! Parameter file loading with semantic validation.

use std::path::Path;

use wd_common::{Error, Result};

use crate::params::CheckParams;

impl CheckParams {
    /// Parse parameters from JSON, then validate them.
    pub fn from_json(json: &str) -> Result<Self> {
        let params: CheckParams =
            serde_json::from_str(json).map_err(|e| Error::InvalidParams(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    /// Load parameters from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Semantic validation beyond what serde enforces.
    pub fn validate(&self) -> Result<()> {
        let slots = [
            (&self.antispyware_signature, "AntispywareSignatureLastUpdated"),
            (&self.antivirus_signature, "AntivirusSignatureLastUpdated"),
            (&self.nis_signature, "NISSignatureLastUpdated"),
        ];
        for (spec, field) in slots {
            spec.validate(field).map_err(Error::InvalidParams)?;
        }
        for (spec, field) in [
            (&self.full_scan, "FullScanEndTime"),
            (&self.quick_scan, "QuickScanEndTime"),
        ] {
            if let Some(spec) = spec {
                spec.validate(field).map_err(Error::InvalidParams)?;
            }
        }
        Ok(())
    }
}
