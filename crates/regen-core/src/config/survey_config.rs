//! Survey analysis configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Species codes accepted when no explicit list is configured.
pub const DEFAULT_SPECIES: &[&str] = &["BF", "BW", "CE", "LA", "PO", "PT", "SB", "SW"];

/// Configuration for the survey analysis engine.
///
/// All scalar fields are optional; `effective_*()` accessors apply the
/// documented defaults so a plain `SurveyConfig::default()` is usable as-is.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SurveyConfig {
    /// Number of plots surveyed per cluster. Default: 8.
    pub num_plots: Option<u32>,
    /// Upper bound on plausible stems per square metre, used to cap
    /// data-entry outliers before density calculation. Default: 0.5.
    pub max_trees_per_sqm: Option<f64>,
    /// Confidence level for interval statistics. Default: 0.95.
    pub confidence_level: Option<f64>,
    /// Accepted species codes. Defaults to [`DEFAULT_SPECIES`] when empty.
    #[serde(default)]
    pub accepted_species: Vec<String>,
    /// Species group → member codes. Groups must partition the accepted
    /// set. Defaults to identity groups plus SX = {SB, SW} when empty.
    #[serde(default)]
    pub species_groups: BTreeMap<String, Vec<String>>,
}

impl SurveyConfig {
    /// Returns the effective number of plots per cluster, defaulting to 8.
    pub fn effective_num_plots(&self) -> u32 {
        self.num_plots.unwrap_or(8)
    }

    /// Returns the effective stems-per-m² cap, defaulting to 0.5.
    pub fn effective_max_trees_per_sqm(&self) -> f64 {
        self.max_trees_per_sqm.unwrap_or(0.5)
    }

    /// Returns the effective confidence level, defaulting to 0.95.
    pub fn effective_confidence_level(&self) -> f64 {
        self.confidence_level.unwrap_or(0.95)
    }

    /// Returns the effective accepted species list.
    pub fn effective_accepted_species(&self) -> Vec<String> {
        if self.accepted_species.is_empty() {
            DEFAULT_SPECIES.iter().map(|s| s.to_string()).collect()
        } else {
            self.accepted_species.clone()
        }
    }

    /// Returns the effective species group mapping.
    pub fn effective_species_groups(&self) -> BTreeMap<String, Vec<String>> {
        if !self.species_groups.is_empty() {
            return self.species_groups.clone();
        }
        let accepted = self.effective_accepted_species();
        let mut groups: BTreeMap<String, Vec<String>> = accepted
            .iter()
            .map(|code| (code.clone(), vec![code.clone()]))
            .collect();
        // Spruces are conventionally reported as one SX group.
        if accepted.iter().any(|c| c == "SB") && accepted.iter().any(|c| c == "SW") {
            groups.remove("SB");
            groups.remove("SW");
            groups.insert("SX".to_string(), vec!["SB".to_string(), "SW".to_string()]);
        }
        groups
    }

    /// Validates scalar fields. Group membership is validated when the
    /// species catalog is built from this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.effective_num_plots() == 0 {
            return Err(ConfigError::ZeroPlots);
        }
        let cap = self.effective_max_trees_per_sqm();
        if !cap.is_finite() || cap <= 0.0 {
            return Err(ConfigError::InvalidTreeCap(cap));
        }
        let confidence = self.effective_confidence_level();
        if !confidence.is_finite() || confidence <= 0.0 || confidence >= 1.0 {
            return Err(ConfigError::InvalidConfidence(confidence));
        }
        Ok(())
    }
}
