//! Input record model.
//!
//! Ingestion hands the engine flat field-name → value maps, one per
//! collected form. [`RawRecord`] wraps that map; [`ProjectBoundary`] and
//! [`SurveyMeta`] are the typed records parsed out of it. Cluster records
//! stay raw because their field names are positional (`...Plot3`,
//! `Species2...`) and are walked by the cluster aggregator.

pub mod boundary;
pub mod meta;
pub mod raw;
pub mod silvsys;

pub use boundary::ProjectBoundary;
pub use meta::SurveyMeta;
pub use raw::RawRecord;
pub use silvsys::SilvSys;
