//! Cluster summary types.

use std::collections::BTreeMap;

use serde::Serialize;

use regen_core::SilvSys;

/// Species tree counts for one plot, split by the subplot the slot was
/// tallied over. Clearcut plots only ever fill the 8 m² bin.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SubplotTally {
    pub inner_8m2: BTreeMap<String, u32>,
    pub outer_16m2: BTreeMap<String, u32>,
}

impl SubplotTally {
    pub fn total(&self) -> u32 {
        self.inner_8m2
            .values()
            .chain(self.outer_16m2.values())
            .fold(0u32, |acc, &n| acc.saturating_add(n))
    }
}

/// One plot within a cluster. `species` is `None` for unoccupied plots,
/// which is distinct from an occupied plot with nothing tallied.
#[derive(Debug, Clone, Serialize)]
pub struct PlotSummary {
    pub plot_number: u32,
    pub occupied: bool,
    pub unoccupied_reason: String,
    pub comments: String,
    pub photos: String,
    pub species: Option<SubplotTally>,
}

/// Ecosite observations recorded once per cluster.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EcositeRecord {
    pub moisture: String,
    pub nutrient: String,
    pub comment: String,
}

/// Aggregated view of one surveyed cluster.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSummary {
    pub cluster_uid: String,
    pub cluster_number: String,
    pub project_id: String,
    pub silvsys: SilvSys,
    /// `YYYY-MM-DD`, from the first 10 characters of the creation timestamp.
    pub creation_date: String,
    pub latitude: String,
    pub longitude: String,
    pub cluster_photo: String,
    pub plots: Vec<PlotSummary>,
    /// Occupied plots / total plots, in [0, 1].
    pub site_occ: f64,
    /// Total trees tallied across all plots and slots, uncapped.
    pub total_trees: u32,
    /// Stems per hectare, with per-bin data-entry caps applied.
    pub effective_density: f64,
    /// Raw species entries that normalized to an unaccepted code.
    pub invalid_species: Vec<String>,
    /// Cluster-wide tree counts per accepted species code.
    pub spc_comp: BTreeMap<String, u32>,
    /// Cluster-wide tree counts per species group.
    pub spc_comp_grp: BTreeMap<String, u32>,
    /// Percent share per species; empty when no trees were tallied.
    pub spc_comp_perc: BTreeMap<String, f64>,
    /// Percent share per species group; empty when no trees were tallied.
    pub spc_comp_grp_perc: BTreeMap<String, f64>,
    pub ecosite: EcositeRecord,
    /// Residual overstory tree counts per reported species code.
    pub residual: BTreeMap<String, u32>,
    /// Data-quality warnings raised while summarizing this cluster.
    pub warnings: Vec<String>,
}

impl ClusterSummary {
    /// Whether at least one plot in the cluster was occupied.
    pub fn is_occupied(&self) -> bool {
        self.site_occ > 0.0
    }
}
