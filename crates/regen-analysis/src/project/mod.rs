//! Project-level roll-up over cluster summaries.

pub mod aggregator;
pub mod types;

pub use aggregator::ProjectAggregator;
pub use types::{CompletionStatus, ProjectSummary};
