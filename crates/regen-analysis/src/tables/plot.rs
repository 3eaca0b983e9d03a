//! Plot-level export table: one row per (cluster, plot).

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::cluster::ClusterSummary;

/// One plot as a flat export row. Species counts are zero-filled over the
/// table-wide species column set.
#[derive(Debug, Clone, Serialize)]
pub struct PlotRow {
    pub project_id: String,
    pub cluster_number: String,
    pub plot_number: u32,
    pub species_counts: BTreeMap<String, u32>,
    pub total_trees: u32,
    pub occupied: bool,
    pub unoccupied_reason: String,
    pub photos: String,
}

impl PlotRow {
    /// Flattens the row into a JSON object with one key per column, the
    /// shape consumed by tabular exporters.
    pub fn to_row(&self) -> Map<String, Value> {
        let mut row = Map::new();
        row.insert("project_id".into(), json!(self.project_id));
        row.insert("cluster_number".into(), json!(self.cluster_number));
        row.insert("plot_number".into(), json!(self.plot_number));
        for (code, count) in &self.species_counts {
            row.insert(code.clone(), json!(count));
        }
        row.insert("total_trees".into(), json!(self.total_trees));
        row.insert("occupied".into(), json!(self.occupied));
        row.insert("unoccupied_reason".into(), json!(self.unoccupied_reason));
        row.insert("photos".into(), json!(self.photos));
        row
    }
}

/// The full plot table: row count is always clusters × plots-per-cluster.
#[derive(Debug, Clone, Serialize)]
pub struct PlotTable {
    /// Sorted union of species codes observed anywhere in the input.
    pub species_columns: Vec<String>,
    pub rows: Vec<PlotRow>,
}

pub struct PlotTableBuilder;

impl PlotTableBuilder {
    pub fn build(clusters: &[ClusterSummary]) -> PlotTable {
        let mut species_columns: BTreeSet<String> = BTreeSet::new();
        for cluster in clusters {
            species_columns.extend(cluster.spc_comp.keys().cloned());
        }

        let mut rows = Vec::new();
        for cluster in clusters {
            for plot in &cluster.plots {
                let mut species_counts: BTreeMap<String, u32> = species_columns
                    .iter()
                    .map(|code| (code.clone(), 0))
                    .collect();
                let mut total_trees = 0u32;
                if let Some(tally) = &plot.species {
                    for (code, &count) in tally.inner_8m2.iter().chain(tally.outer_16m2.iter()) {
                        if let Some(cell) = species_counts.get_mut(code) {
                            *cell = cell.saturating_add(count);
                        }
                        total_trees = total_trees.saturating_add(count);
                    }
                }
                rows.push(PlotRow {
                    project_id: cluster.project_id.clone(),
                    cluster_number: cluster.cluster_number.clone(),
                    plot_number: plot.plot_number,
                    species_counts,
                    total_trees,
                    occupied: plot.occupied,
                    unoccupied_reason: plot.unoccupied_reason.clone(),
                    photos: plot.photos.clone(),
                });
            }
        }

        PlotTable {
            species_columns: species_columns.into_iter().collect(),
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use regen_core::{RawRecord, SilvSys, SurveyConfig};

    use crate::cluster::ClusterAggregator;
    use crate::species::SpeciesCatalog;

    #[test]
    fn rows_zero_filled_over_table_columns() {
        let config = SurveyConfig::default();
        let catalog = SpeciesCatalog::from_config(&config).unwrap();
        let agg = ClusterAggregator::new(&config, &catalog);
        let c1 = agg.summarize(
            &RawRecord::from_pairs([
                ("ClusterNumber", "1"),
                ("ProjectID", "P1"),
                ("Species1SpeciesNamePlot1", "Sw"),
                ("Species1NumberofTreesPlot1", "3"),
            ]),
            SilvSys::Cc,
        );
        let c2 = agg.summarize(
            &RawRecord::from_pairs([
                ("ClusterNumber", "2"),
                ("ProjectID", "P1"),
                ("Species1SpeciesNamePlot2", "Bf"),
                ("Species1NumberofTreesPlot2", "1"),
            ]),
            SilvSys::Cc,
        );

        let table = PlotTableBuilder::build(&[c1, c2]);
        assert_eq!(table.species_columns, vec!["BF", "SW"]);
        assert_eq!(table.rows.len(), 16);

        // cluster 1, plot 1: SW seen, BF zero-filled
        let row = &table.rows[0];
        assert_eq!(row.species_counts["SW"], 3);
        assert_eq!(row.species_counts["BF"], 0);
        assert_eq!(row.total_trees, 3);

        let flat = row.to_row();
        assert_eq!(flat["cluster_number"], "1");
        assert_eq!(flat["SW"], 3);
        assert_eq!(flat["occupied"], true);
    }
}
