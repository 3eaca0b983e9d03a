//! regen-core: shared types for the regeneration survey analysis engine.
//!
//! This crate holds everything the analysis stages agree on:
//! - Config: survey geometry, statistical and species configuration
//! - Errors: one error enum per subsystem
//! - Records: the raw field-name → value input model handed over by the
//!   ingestion collaborator, plus the typed boundary/metadata records
//!   parsed from it

pub mod config;
pub mod errors;
pub mod records;

// Re-exports for convenience
pub use config::SurveyConfig;
pub use errors::{ConfigError, RecordError};
pub use records::{ProjectBoundary, RawRecord, SilvSys, SurveyMeta};
