//! Project summary types.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::cluster::EcositeRecord;
use crate::stats::SampleStats;

/// Whether a project's surveyed cluster count met its plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum CompletionStatus {
    /// No usable planned count on the boundary record.
    Unknown,
    /// Fewer clusters surveyed than planned.
    No,
    /// Exactly the planned number surveyed.
    Yes,
    /// Surveyed more than planned, by this many clusters.
    YesPlus(u32),
}

impl fmt::Display for CompletionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionStatus::Unknown => f.write_str("unknown"),
            CompletionStatus::No => f.write_str("no"),
            CompletionStatus::Yes => f.write_str("yes"),
            CompletionStatus::YesPlus(extra) => write!(f, "yes (+{extra})"),
        }
    }
}

impl From<CompletionStatus> for String {
    fn from(status: CompletionStatus) -> Self {
        status.to_string()
    }
}

/// Aggregated view of one project: planning attributes, survey metadata,
/// per-cluster series and population statistics.
///
/// Keyed maps use the cluster number as key and `BTreeMap` throughout so
/// iteration and serialization order are stable.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectSummary {
    // boundary attributes
    pub project_id: String,
    pub planned_clusters: Option<i64>,
    pub area_ha: String,
    pub plot_size: String,
    pub spatial_fmu: String,
    pub spatial_district: String,
    pub sfl_spcomp: String,
    pub sfl_site_occ: String,
    pub sfl_fu: String,
    pub sfl_eff_den: String,
    pub sfl_as_yr: String,
    pub latitude: String,
    pub longitude: String,

    // survey form metadata
    pub assessment_date: String,
    pub surveyors: String,
    pub surveyor_comments: String,
    pub surveyor_fmu: String,
    pub surveyor_district: String,
    pub matching_meta_records: usize,

    // survey progress
    pub completion: CompletionStatus,
    pub clusters_surveyed: usize,
    pub clusters_occupied: usize,
    /// Cluster numbers in input order.
    pub cluster_numbers: Vec<String>,
    pub last_survey_date: String,

    // per-cluster series
    pub density_by_cluster: BTreeMap<String, f64>,
    pub site_occ_by_cluster: BTreeMap<String, f64>,
    pub site_occ_reasons: BTreeMap<String, Vec<String>>,
    pub ecosite_by_cluster: BTreeMap<String, EcositeRecord>,

    // population statistics
    pub density_stats: SampleStats,
    pub site_occ_stats: SampleStats,

    // species composition over occupied clusters
    pub species_found: Vec<String>,
    pub species_groups_found: Vec<String>,
    /// species → cluster number → percent, zero-filled over occupied clusters.
    pub species_percent_by_cluster: BTreeMap<String, BTreeMap<String, f64>>,
    pub group_percent_by_cluster: BTreeMap<String, BTreeMap<String, f64>>,
    pub species_stats: BTreeMap<String, SampleStats>,
    pub group_stats: BTreeMap<String, SampleStats>,

    // residual overstory
    pub residual_by_cluster: BTreeMap<String, BTreeMap<String, u32>>,
    pub residual_counts: BTreeMap<String, u32>,
    pub residual_percent: BTreeMap<String, f64>,
    pub residual_basal_area: BTreeMap<String, f64>,

    // ecosite
    pub moisture_percent: BTreeMap<String, f64>,

    /// Data-quality and sufficiency notes accumulated during analysis.
    pub analysis_comments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_renders_like_report_text() {
        assert_eq!(CompletionStatus::Unknown.to_string(), "unknown");
        assert_eq!(CompletionStatus::No.to_string(), "no");
        assert_eq!(CompletionStatus::Yes.to_string(), "yes");
        assert_eq!(CompletionStatus::YesPlus(2).to_string(), "yes (+2)");
    }

    #[test]
    fn completion_serializes_as_string() {
        let json = serde_json::to_string(&CompletionStatus::YesPlus(3)).unwrap();
        assert_eq!(json, "\"yes (+3)\"");
    }
}
