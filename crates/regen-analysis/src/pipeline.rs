//! Full analysis run: raw records in, summaries and tables out.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use regen_core::{ConfigError, ProjectBoundary, RawRecord, SilvSys, SurveyConfig, SurveyMeta};

use crate::cluster::{ClusterAggregator, ClusterSummary};
use crate::project::{ProjectAggregator, ProjectSummary};
use crate::species::SpeciesCatalog;
use crate::tables::{PlotTable, PlotTableBuilder, ProjectReportTable, ProjectReportTableBuilder};

/// Raw records for one analysis run, as handed over by ingestion.
#[derive(Debug, Default)]
pub struct AnalysisInput {
    pub clearcut: Vec<RawRecord>,
    pub shelterwood: Vec<RawRecord>,
    pub boundaries: Vec<RawRecord>,
    pub survey_meta: Vec<RawRecord>,
}

/// Everything one run produces.
#[derive(Debug, Serialize)]
pub struct AnalysisResult {
    /// Cluster summaries in input order, clearcut before shelterwood.
    pub clusters: Vec<ClusterSummary>,
    /// Project summaries in boundary-record order.
    pub projects: Vec<ProjectSummary>,
    pub plot_table: PlotTable,
    pub project_tables: Vec<ProjectReportTable>,
    pub diagnostics: AnalysisDiagnostics,
}

/// Run-level counters, reported once per run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct AnalysisDiagnostics {
    pub clusters_analyzed: usize,
    pub projects_analyzed: usize,
    pub skipped_boundaries: usize,
    pub skipped_meta: usize,
    pub clusters_without_project: usize,
}

impl fmt::Display for AnalysisDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "analyzed {} clusters across {} projects ({} boundary and {} survey records skipped, {} clusters without a matching project)",
            self.clusters_analyzed,
            self.projects_analyzed,
            self.skipped_boundaries,
            self.skipped_meta,
            self.clusters_without_project
        )
    }
}

/// Orchestrates cluster aggregation, project roll-up and table building
/// over one batch of survey records.
pub struct AnalysisPipeline {
    config: SurveyConfig,
    catalog: SpeciesCatalog,
}

impl AnalysisPipeline {
    /// Validates the configuration and builds the species catalog.
    pub fn new(config: SurveyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = SpeciesCatalog::from_config(&config)?;
        Ok(Self { config, catalog })
    }

    /// Runs the full analysis. Malformed boundary and survey records are
    /// skipped with a warning and counted in the diagnostics; cluster
    /// records always produce a summary.
    pub fn run(&self, input: &AnalysisInput) -> AnalysisResult {
        let mut diagnostics = AnalysisDiagnostics::default();

        let cluster_agg = ClusterAggregator::new(&self.config, &self.catalog);
        let mut clusters: Vec<ClusterSummary> = Vec::new();
        for record in &input.clearcut {
            clusters.push(cluster_agg.summarize(record, SilvSys::Cc));
        }
        for record in &input.shelterwood {
            clusters.push(cluster_agg.summarize(record, SilvSys::Sh));
        }
        diagnostics.clusters_analyzed = clusters.len();

        let mut boundaries: Vec<ProjectBoundary> = Vec::new();
        for record in &input.boundaries {
            match ProjectBoundary::from_record(record) {
                Ok(boundary) => boundaries.push(boundary),
                Err(err) => {
                    warn!(%err, "skipping boundary record");
                    diagnostics.skipped_boundaries += 1;
                }
            }
        }

        let mut survey_meta: Vec<SurveyMeta> = Vec::new();
        for record in &input.survey_meta {
            match SurveyMeta::from_record(record) {
                Ok(meta) => survey_meta.push(meta),
                Err(err) => {
                    warn!(%err, "skipping project survey record");
                    diagnostics.skipped_meta += 1;
                }
            }
        }

        let project_agg = ProjectAggregator::new(&self.config);
        let mut projects: Vec<ProjectSummary> = Vec::new();
        for boundary in &boundaries {
            // cluster match is exact; the survey form id is typed by the
            // crew, so that match is case-insensitive
            let matching_clusters: Vec<&ClusterSummary> = clusters
                .iter()
                .filter(|c| c.project_id == boundary.project_id)
                .collect();
            let matching_meta: Vec<&SurveyMeta> = survey_meta
                .iter()
                .filter(|m| m.project_id.eq_ignore_ascii_case(&boundary.project_id))
                .collect();
            debug!(
                project = %boundary.project_id,
                clusters = matching_clusters.len(),
                meta = matching_meta.len(),
                "summarizing project"
            );
            projects.push(project_agg.summarize(boundary, &matching_meta, &matching_clusters));
        }
        diagnostics.projects_analyzed = projects.len();

        diagnostics.clusters_without_project = clusters
            .iter()
            .filter(|c| !boundaries.iter().any(|b| b.project_id == c.project_id))
            .count();
        if diagnostics.clusters_without_project > 0 {
            warn!(
                count = diagnostics.clusters_without_project,
                "clusters reference project ids with no boundary record"
            );
        }

        let plot_table = PlotTableBuilder::build(&clusters);
        let project_tables: Vec<ProjectReportTable> = projects
            .iter()
            .filter_map(ProjectReportTableBuilder::build)
            .collect();

        info!(%diagnostics, "analysis run complete");

        AnalysisResult {
            clusters,
            projects,
            plot_table,
            project_tables,
            diagnostics,
        }
    }
}
