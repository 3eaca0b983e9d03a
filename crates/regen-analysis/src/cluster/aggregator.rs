//! Cluster-level aggregation over raw survey records.

use std::collections::BTreeMap;

use tracing::warn;

use regen_core::{RawRecord, SilvSys, SurveyConfig};

use crate::cluster::types::{ClusterSummary, EcositeRecord, PlotSummary, SubplotTally};
use crate::species::{code_token, NormalizedSpecies, SpeciesCatalog};
use crate::stats::round1;

/// Square metres per hectare, for stems/ha scaling.
const M2_PER_HA: f64 = 10_000.0;

/// Summarizes raw cluster records into [`ClusterSummary`] values.
pub struct ClusterAggregator<'a> {
    catalog: &'a SpeciesCatalog,
    num_plots: u32,
    max_trees_per_sqm: f64,
}

impl<'a> ClusterAggregator<'a> {
    pub fn new(config: &SurveyConfig, catalog: &'a SpeciesCatalog) -> Self {
        Self {
            catalog,
            num_plots: config.effective_num_plots(),
            max_trees_per_sqm: config.effective_max_trees_per_sqm(),
        }
    }

    /// Aggregates one raw cluster record.
    ///
    /// Walks every plot, tallies species counts per subplot bin, and
    /// derives site occupancy, effective density and composition. Data
    /// problems never abort: invalid species are collected, count
    /// mismatches become warnings on the summary.
    pub fn summarize(&self, record: &RawRecord, silvsys: SilvSys) -> ClusterSummary {
        let cluster_number = record.field("ClusterNumber").trim().to_string();
        let project_id = record.field("ProjectID").trim().to_string();

        let mut plots = Vec::with_capacity(self.num_plots as usize);
        let mut occupied_plots = 0u32;
        let mut invalid_species: Vec<String> = Vec::new();
        let mut spc_comp: BTreeMap<String, u32> = BTreeMap::new();
        let mut total_8m2 = 0u32;
        let mut total_16m2 = 0u32;

        for plot in 1..=self.num_plots {
            let suffix = plot.to_string();
            let comments = record
                .field(&format!("CommentsPlot{suffix}"))
                .replace('\'', "");
            let photos = record.field(&format!("PhotosPlot{suffix}")).to_string();

            if record.field(&format!("UnoccupiedPlot{suffix}")) == "Yes" {
                plots.push(PlotSummary {
                    plot_number: plot,
                    occupied: false,
                    unoccupied_reason: record
                        .field(&format!("UnoccupiedreasonPlot{suffix}"))
                        .to_string(),
                    comments,
                    photos,
                    species: None,
                });
                continue;
            }
            occupied_plots += 1;

            let mut tally = SubplotTally::default();
            for slot in 1..=silvsys.species_slots() {
                let name_field = format!("Species{slot}SpeciesNamePlot{suffix}");
                let count_field = format!("Species{slot}NumberofTreesPlot{suffix}");
                let code = match self.catalog.normalize(record.field(&name_field)) {
                    NormalizedSpecies::Empty => continue,
                    NormalizedSpecies::Invalid(raw) => {
                        warn!(
                            cluster = %cluster_number,
                            plot,
                            slot,
                            species = %raw,
                            "unrecognized species entry skipped"
                        );
                        invalid_species.push(raw);
                        continue;
                    }
                    NormalizedSpecies::Valid(code) => code,
                };
                let count_raw = record.field(&count_field).trim();
                let count = match count_raw.parse::<u32>() {
                    Ok(n) if n > 0 => n,
                    Ok(_) => continue,
                    Err(_) => {
                        if !count_raw.is_empty() {
                            warn!(
                                cluster = %cluster_number,
                                plot,
                                slot,
                                count = %count_raw,
                                "unparseable tree count skipped"
                            );
                        }
                        continue;
                    }
                };

                // saturating adds: the density cap discards implausible
                // magnitudes anyway, so an absurd tally must not panic
                let bin = if silvsys.subplot_area_m2(slot) <= 8.0 {
                    total_8m2 = total_8m2.saturating_add(count);
                    &mut tally.inner_8m2
                } else {
                    total_16m2 = total_16m2.saturating_add(count);
                    &mut tally.outer_16m2
                };
                let cell = bin.entry(code.clone()).or_insert(0);
                *cell = cell.saturating_add(count);
                let comp = spc_comp.entry(code).or_insert(0);
                *comp = comp.saturating_add(count);
            }

            plots.push(PlotSummary {
                plot_number: plot,
                occupied: true,
                unoccupied_reason: String::new(),
                comments,
                photos,
                species: Some(tally),
            });
        }

        let total_trees = total_8m2.saturating_add(total_16m2);
        let mut warnings = Vec::new();
        let comp_total = spc_comp
            .values()
            .fold(0u32, |acc, &n| acc.saturating_add(n));
        if comp_total != total_trees {
            let msg = format!(
                "species composition total ({comp_total}) does not match tree tally ({total_trees})"
            );
            warn!(cluster = %cluster_number, "{msg}");
            warnings.push(msg);
        }

        let site_occ = f64::from(occupied_plots) / f64::from(self.num_plots);
        let effective_density = self.effective_density(total_8m2, total_16m2);

        let (spc_comp_perc, spc_comp_grp, spc_comp_grp_perc) = self.composition(&spc_comp);

        ClusterSummary {
            cluster_uid: record.field("unique_id").to_string(),
            cluster_number,
            project_id,
            silvsys,
            creation_date: record
                .field("CreationDateTime")
                .chars()
                .take(10)
                .collect(),
            latitude: record.field("latitude").to_string(),
            longitude: record.field("longitude").to_string(),
            cluster_photo: record.field("ClusterPhoto").to_string(),
            plots,
            site_occ,
            total_trees,
            effective_density,
            invalid_species,
            spc_comp,
            spc_comp_grp,
            spc_comp_perc,
            spc_comp_grp_perc,
            ecosite: EcositeRecord {
                moisture: record.field("MoistureEcosite").to_string(),
                nutrient: record.field("NutrientEcosite01").to_string(),
                comment: record.field("CommentsEcosite").replace('\'', ""),
            },
            residual: self.residual_tally(record),
            warnings,
        }
    }

    /// Stems per hectare over the cluster, each subplot bin capped at the
    /// plausible maximum before scaling so one fat-fingered tally cannot
    /// dominate the project statistics.
    fn effective_density(&self, total_8m2: u32, total_16m2: u32) -> f64 {
        let n = f64::from(self.num_plots);
        let cap_8 = n * 8.0 * self.max_trees_per_sqm;
        let cap_16 = n * 16.0 * self.max_trees_per_sqm;
        let t8 = f64::from(total_8m2).min(cap_8);
        let t16 = f64::from(total_16m2).min(cap_16);
        t8 * M2_PER_HA / (n * 8.0) + t16 * M2_PER_HA / (n * 16.0)
    }

    /// Percent shares plus group roll-up. Percent maps stay empty when
    /// nothing was tallied.
    fn composition(
        &self,
        spc_comp: &BTreeMap<String, u32>,
    ) -> (
        BTreeMap<String, f64>,
        BTreeMap<String, u32>,
        BTreeMap<String, f64>,
    ) {
        let total = spc_comp
            .values()
            .fold(0u32, |acc, &n| acc.saturating_add(n));

        let mut spc_comp_grp: BTreeMap<String, u32> = BTreeMap::new();
        for (code, &count) in spc_comp {
            let cell = spc_comp_grp.entry(self.catalog.group_of(code)).or_insert(0);
            *cell = cell.saturating_add(count);
        }

        if total == 0 {
            return (BTreeMap::new(), spc_comp_grp, BTreeMap::new());
        }
        let perc = |count: u32| round1(100.0 * f64::from(count) / f64::from(total));
        let spc_comp_perc = spc_comp.iter().map(|(k, &v)| (k.clone(), perc(v))).collect();
        let spc_comp_grp_perc = spc_comp_grp
            .iter()
            .map(|(k, &v)| (k.clone(), perc(v)))
            .collect();
        (spc_comp_perc, spc_comp_grp, spc_comp_grp_perc)
    }

    /// Residual overstory tally. Species codes are reported verbatim
    /// (normalized but not checked against the accepted list). Slots are
    /// found by enumerating the record's fields, so a blank slot omitted
    /// by ingestion never hides the slots after it.
    fn residual_tally(&self, record: &RawRecord) -> BTreeMap<String, u32> {
        let mut residual: BTreeMap<String, u32> = BTreeMap::new();
        if record.field("Anyresidualoverstorytreesnearby") != "Yes" {
            return residual;
        }
        for (field, value) in record.fields() {
            let slot = match field
                .strip_prefix("Species")
                .and_then(|rest| rest.strip_suffix("SpeciesNameResiduals"))
            {
                Some(slot) => slot,
                None => continue,
            };
            if let Some(code) = code_token(value) {
                let count_field = format!("Species{slot}NumberofTreesResiduals");
                if let Ok(count) = record.field(&count_field).trim().parse::<u32>() {
                    if count > 0 {
                        let cell = residual.entry(code).or_insert(0);
                        *cell = cell.saturating_add(count);
                    }
                }
            }
        }
        residual
    }
}
