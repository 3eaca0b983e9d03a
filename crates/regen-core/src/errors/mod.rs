//! Error types for the regeneration survey engine.
//!
//! One enum per subsystem, all `thiserror`-derived. Analysis code
//! propagates these with `?`; recoverable per-record problems are
//! reported as diagnostics instead of errors.

pub mod config_error;
pub mod record_error;

pub use config_error::ConfigError;
pub use record_error::RecordError;
