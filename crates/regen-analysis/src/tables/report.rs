//! Per-project report table: one row per distinct cluster number.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::project::ProjectSummary;

/// One cluster in a project report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub cluster_number: String,
    pub site_occ: f64,
    pub effective_density: f64,
    pub moisture: String,
    /// Percent per species, zero-filled over the project's species set.
    /// Fully unoccupied clusters report 0 for every species.
    pub species_percent: BTreeMap<String, f64>,
}

/// A named report table for one project.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectReportTable {
    /// `z_<sanitized project id>`, safe as a database table name.
    pub name: String,
    pub rows: Vec<ReportRow>,
}

pub struct ProjectReportTableBuilder;

impl ProjectReportTableBuilder {
    /// Builds the report table, or `None` when the project has no
    /// surveyed clusters. Rows are sorted numeric-aware ascending by
    /// cluster number and deduplicated (the per-cluster series already
    /// keep one entry per number).
    pub fn build(project: &ProjectSummary) -> Option<ProjectReportTable> {
        if project.clusters_surveyed == 0 {
            return None;
        }

        let mut numbers: Vec<String> = project.density_by_cluster.keys().cloned().collect();
        numbers.sort_by_cached_key(|n| sort_key(n));

        let rows = numbers
            .into_iter()
            .map(|num| {
                let species_percent: BTreeMap<String, f64> = project
                    .species_found
                    .iter()
                    .map(|code| {
                        let pct = project
                            .species_percent_by_cluster
                            .get(code)
                            .and_then(|series| series.get(&num))
                            .copied()
                            .unwrap_or(0.0);
                        (code.clone(), pct)
                    })
                    .collect();
                ReportRow {
                    site_occ: project.site_occ_by_cluster.get(&num).copied().unwrap_or(0.0),
                    effective_density: project
                        .density_by_cluster
                        .get(&num)
                        .copied()
                        .unwrap_or(0.0),
                    moisture: project
                        .ecosite_by_cluster
                        .get(&num)
                        .map(|e| e.moisture.clone())
                        .unwrap_or_default(),
                    species_percent,
                    cluster_number: num,
                }
            })
            .collect();

        Some(ProjectReportTable {
            name: table_name(&project.project_id),
            rows,
        })
    }
}

/// Derives a database-safe table name from the project id: non-alphanumeric
/// characters become underscores and a `z_` prefix keeps generated tables
/// grouped after hand-made ones.
pub fn table_name(project_id: &str) -> String {
    let sanitized: String = project_id
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("z_{sanitized}")
}

/// Total-order sort key ordering numeric cluster numbers before
/// non-numeric ones. Mixed comparators over string-vs-number are not
/// transitive, so the key carries all three components.
fn sort_key(number: &str) -> (bool, i64, String) {
    match number.trim().parse::<i64>() {
        Ok(n) => (false, n, number.to_string()),
        Err(_) => (true, 0, number.to_string()),
    }
}
