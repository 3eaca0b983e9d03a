//! regen-analysis: aggregation and statistics for regeneration surveys.
//!
//! The engine turns raw cluster survey records into three levels of
//! output:
//! - [`cluster::ClusterSummary`]: per-cluster occupancy, density and
//!   species composition
//! - [`project::ProjectSummary`]: per-project roll-up with confidence
//!   intervals over the cluster population
//! - [`tables`]: flat plot-level and per-project report tables for export
//!
//! [`pipeline::AnalysisPipeline`] orchestrates the full run.

pub mod cluster;
pub mod pipeline;
pub mod project;
pub mod species;
pub mod stats;
pub mod tables;

pub use cluster::{ClusterAggregator, ClusterSummary};
pub use pipeline::{AnalysisInput, AnalysisPipeline, AnalysisResult};
pub use project::{ProjectAggregator, ProjectSummary};
pub use species::SpeciesCatalog;
pub use stats::SampleStats;
