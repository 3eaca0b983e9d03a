//! Project-level aggregation over cluster summaries.

use std::collections::{BTreeMap, BTreeSet};

use tracing::warn;

use regen_core::{ProjectBoundary, SurveyConfig, SurveyMeta};

use crate::cluster::ClusterSummary;
use crate::project::types::{CompletionStatus, ProjectSummary};
use crate::stats::{mean_std_ci, round1, round2, SampleStats};

/// Rolls matching cluster summaries and survey metadata up into one
/// [`ProjectSummary`] per boundary record.
pub struct ProjectAggregator {
    confidence: f64,
}

impl ProjectAggregator {
    pub fn new(config: &SurveyConfig) -> Self {
        Self {
            confidence: config.effective_confidence_level(),
        }
    }

    /// Summarizes one project. `meta_matches` and `clusters` are the
    /// records already matched to this boundary's project id; clusters
    /// keep their input order.
    pub fn summarize(
        &self,
        boundary: &ProjectBoundary,
        meta_matches: &[&SurveyMeta],
        clusters: &[&ClusterSummary],
    ) -> ProjectSummary {
        let mut analysis_comments: Vec<String> = Vec::new();

        // survey form metadata
        let meta = match meta_matches {
            [] => {
                if !clusters.is_empty() {
                    let msg = format!(
                        "no project survey record found for project {}",
                        boundary.project_id
                    );
                    warn!(project = %boundary.project_id, "{msg}");
                    analysis_comments.push(msg);
                }
                None
            }
            [only] => Some(*only),
            [first, ..] => {
                let msg = format!(
                    "{} project survey records found for project {}; using the first",
                    meta_matches.len(),
                    boundary.project_id
                );
                warn!(project = %boundary.project_id, "{msg}");
                analysis_comments.push(msg);
                Some(*first)
            }
        };

        // duplicate cluster numbers
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut duplicates: BTreeSet<String> = BTreeSet::new();
        for c in clusters {
            if !seen.insert(c.cluster_number.as_str()) {
                duplicates.insert(c.cluster_number.clone());
            }
        }
        if !duplicates.is_empty() {
            let dupes = duplicates.iter().cloned().collect::<Vec<_>>().join(", ");
            let msg = format!(
                "Duplicate cluster number(s) found in project {}: {}",
                boundary.project_id, dupes
            );
            warn!(project = %boundary.project_id, "{msg}");
            analysis_comments.push(msg);
        }

        let clusters_surveyed = clusters.len();
        let distinct_clusters = seen.len();
        let completion = completion_status(boundary.planned_clusters, clusters_surveyed);

        if distinct_clusters > 0 && distinct_clusters < 2 {
            analysis_comments.push(
                "Less than 2 distinct clusters collected - unable to run statistics on just one sample."
                    .to_string(),
            );
        }

        // per-cluster series, keyed by cluster number (later duplicates win,
        // matching the duplicate warning above)
        let mut density_by_cluster: BTreeMap<String, f64> = BTreeMap::new();
        let mut site_occ_by_cluster: BTreeMap<String, f64> = BTreeMap::new();
        let mut site_occ_reasons: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut ecosite_by_cluster = BTreeMap::new();
        let mut residual_by_cluster: BTreeMap<String, BTreeMap<String, u32>> = BTreeMap::new();
        let mut last_survey_date = String::new();

        for c in clusters {
            let num = c.cluster_number.clone();
            density_by_cluster.insert(num.clone(), c.effective_density);
            site_occ_by_cluster.insert(num.clone(), c.site_occ);
            let reasons: Vec<String> = c
                .plots
                .iter()
                .filter(|p| !p.occupied && !p.unoccupied_reason.is_empty())
                .map(|p| p.unoccupied_reason.clone())
                .collect();
            if !reasons.is_empty() {
                site_occ_reasons.insert(num.clone(), reasons);
            }
            ecosite_by_cluster.insert(num.clone(), c.ecosite.clone());
            if !c.residual.is_empty() {
                residual_by_cluster.insert(num.clone(), c.residual.clone());
            }
            if c.creation_date.as_str() > last_survey_date.as_str() {
                last_survey_date = c.creation_date.clone();
            }
            for w in &c.warnings {
                analysis_comments.push(format!("Cluster {num}: {w}"));
            }
        }

        // occupied-cluster composition matrices
        let occupied: Vec<&ClusterSummary> =
            clusters.iter().copied().filter(|c| c.is_occupied()).collect();
        let clusters_occupied = occupied.len();

        let mut species_found: BTreeSet<String> = BTreeSet::new();
        let mut groups_found: BTreeSet<String> = BTreeSet::new();
        for c in &occupied {
            species_found.extend(c.spc_comp_perc.keys().cloned());
            groups_found.extend(c.spc_comp_grp_perc.keys().cloned());
        }

        let species_percent_by_cluster =
            percent_matrix(&species_found, &occupied, |c| &c.spc_comp_perc);
        let group_percent_by_cluster =
            percent_matrix(&groups_found, &occupied, |c| &c.spc_comp_grp_perc);

        let species_stats = self.stats_per_key(&species_percent_by_cluster);
        let group_stats = self.stats_per_key(&group_percent_by_cluster);

        // residual roll-up
        let mut residual_counts: BTreeMap<String, u32> = BTreeMap::new();
        for per_cluster in residual_by_cluster.values() {
            for (code, &count) in per_cluster {
                let cell = residual_counts.entry(code.clone()).or_insert(0);
                *cell = cell.saturating_add(count);
            }
        }
        let residual_total = residual_counts
            .values()
            .fold(0u32, |acc, &n| acc.saturating_add(n));
        let mut residual_percent = BTreeMap::new();
        let mut residual_basal_area = BTreeMap::new();
        if residual_total > 0 && clusters_surveyed > 0 {
            for (code, &count) in &residual_counts {
                residual_percent.insert(
                    code.clone(),
                    round1(100.0 * f64::from(count) / f64::from(residual_total)),
                );
                residual_basal_area.insert(
                    code.clone(),
                    round2(f64::from(count) * 2.0 / clusters_surveyed as f64),
                );
            }
        }

        // ecosite moisture shares; blanks count as their own category so
        // the percentages always cover every surveyed cluster
        let mut moisture_tally: BTreeMap<String, u32> = BTreeMap::new();
        for c in clusters {
            let moisture = c.ecosite.moisture.trim();
            let key = if moisture.is_empty() {
                "not recorded"
            } else {
                moisture
            };
            *moisture_tally.entry(key.to_string()).or_insert(0) += 1;
        }
        let moisture_percent: BTreeMap<String, f64> = moisture_tally
            .into_iter()
            .map(|(k, v)| {
                (
                    k,
                    round1(100.0 * f64::from(v) / clusters_surveyed as f64),
                )
            })
            .collect();

        ProjectSummary {
            project_id: boundary.project_id.clone(),
            planned_clusters: boundary.planned_clusters,
            area_ha: boundary.area_ha.clone(),
            plot_size: boundary.plot_size.clone(),
            spatial_fmu: boundary.fmu.clone(),
            spatial_district: boundary.district.clone(),
            sfl_spcomp: boundary.sfl_spcomp.clone(),
            sfl_site_occ: boundary.sfl_site_occ.clone(),
            sfl_fu: boundary.sfl_fu.clone(),
            sfl_eff_den: boundary.sfl_eff_den.clone(),
            sfl_as_yr: boundary.sfl_as_yr.clone(),
            latitude: boundary.latitude.clone(),
            longitude: boundary.longitude.clone(),

            assessment_date: meta.map(|m| m.assessment_date.clone()).unwrap_or_default(),
            surveyors: meta.map(|m| m.surveyors.clone()).unwrap_or_default(),
            surveyor_comments: meta.map(|m| m.comments.clone()).unwrap_or_default(),
            surveyor_fmu: meta.map(|m| m.fmu.clone()).unwrap_or_default(),
            surveyor_district: meta.map(|m| m.district.clone()).unwrap_or_default(),
            matching_meta_records: meta_matches.len(),

            completion,
            clusters_surveyed,
            clusters_occupied,
            cluster_numbers: clusters.iter().map(|c| c.cluster_number.clone()).collect(),
            last_survey_date,

            density_stats: mean_std_ci(&density_by_cluster, self.confidence),
            site_occ_stats: mean_std_ci(&site_occ_by_cluster, self.confidence),
            density_by_cluster,
            site_occ_by_cluster,
            site_occ_reasons,
            ecosite_by_cluster,

            species_found: species_found.into_iter().collect(),
            species_groups_found: groups_found.into_iter().collect(),
            species_percent_by_cluster,
            group_percent_by_cluster,
            species_stats,
            group_stats,

            residual_by_cluster,
            residual_counts,
            residual_percent,
            residual_basal_area,

            moisture_percent,
            analysis_comments,
        }
    }

    fn stats_per_key(
        &self,
        matrix: &BTreeMap<String, BTreeMap<String, f64>>,
    ) -> BTreeMap<String, SampleStats> {
        matrix
            .iter()
            .map(|(key, series)| (key.clone(), mean_std_ci(series, self.confidence)))
            .collect()
    }
}

fn completion_status(planned: Option<i64>, surveyed: usize) -> CompletionStatus {
    match planned {
        None => CompletionStatus::Unknown,
        Some(p) if p < 1 => CompletionStatus::Unknown,
        Some(p) => {
            let surveyed = surveyed as i64;
            if surveyed < p {
                CompletionStatus::No
            } else if surveyed == p {
                CompletionStatus::Yes
            } else {
                CompletionStatus::YesPlus((surveyed - p) as u32)
            }
        }
    }
}

/// Builds species → cluster number → percent, zero-filling every occupied
/// cluster so each species' sample covers the whole occupied population.
fn percent_matrix<F>(
    keys: &BTreeSet<String>,
    occupied: &[&ClusterSummary],
    percents: F,
) -> BTreeMap<String, BTreeMap<String, f64>>
where
    F: Fn(&ClusterSummary) -> &BTreeMap<String, f64>,
{
    let mut matrix: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    for key in keys {
        let series: BTreeMap<String, f64> = occupied
            .iter()
            .map(|c| {
                let pct = percents(c).get(key).copied().unwrap_or(0.0);
                (c.cluster_number.clone(), pct)
            })
            .collect();
        matrix.insert(key.clone(), series);
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_thresholds() {
        assert_eq!(completion_status(None, 5), CompletionStatus::Unknown);
        assert_eq!(completion_status(Some(0), 5), CompletionStatus::Unknown);
        assert_eq!(completion_status(Some(-1), 5), CompletionStatus::Unknown);
        assert_eq!(completion_status(Some(5), 3), CompletionStatus::No);
        assert_eq!(completion_status(Some(5), 5), CompletionStatus::Yes);
        assert_eq!(completion_status(Some(5), 7), CompletionStatus::YesPlus(2));
    }
}
