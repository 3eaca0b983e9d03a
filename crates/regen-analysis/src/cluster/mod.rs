//! Per-cluster aggregation: occupancy, density, species composition.

pub mod aggregator;
pub mod types;

pub use aggregator::ClusterAggregator;
pub use types::{ClusterSummary, EcositeRecord, PlotSummary, SubplotTally};
