//! Flat export tables built from summaries.

pub mod plot;
pub mod report;

pub use plot::{PlotRow, PlotTable, PlotTableBuilder};
pub use report::{ProjectReportTable, ProjectReportTableBuilder, ReportRow};
