//! Configuration validation errors.

use thiserror::Error;

/// Errors raised when validating a [`crate::config::SurveyConfig`] or
/// building a species catalog from it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("num_plots must be at least 1")]
    ZeroPlots,

    #[error("max_trees_per_sqm must be a positive finite number, got {0}")]
    InvalidTreeCap(f64),

    #[error("confidence_level must be strictly between 0 and 1, got {0}")]
    InvalidConfidence(f64),

    #[error("species code {code} belongs to both group {first} and group {second}")]
    DuplicateGroupMembership {
        code: String,
        first: String,
        second: String,
    },

    #[error("group {group} lists {code}, which is not an accepted species code")]
    UnknownGroupMember { group: String, code: String },
}
