//! Project boundary record.

use serde::Serialize;

use crate::errors::RecordError;
use crate::records::RawRecord;

/// Planning attributes for one project, parsed from its boundary record.
///
/// Most attributes are carried verbatim as text for reporting; only the
/// planned cluster count is numeric because completion status is computed
/// from it. An empty planned count means planning data was never filled
/// in, which is distinct from a malformed value.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectBoundary {
    pub project_id: String,
    pub planned_clusters: Option<i64>,
    pub area_ha: String,
    pub plot_size: String,
    pub fmu: String,
    pub district: String,
    pub sfl_spcomp: String,
    pub sfl_site_occ: String,
    pub sfl_fu: String,
    pub sfl_eff_den: String,
    pub sfl_as_yr: String,
    pub latitude: String,
    pub longitude: String,
}

impl ProjectBoundary {
    /// Parses a boundary record. The project id is required; the planned
    /// cluster count must be a whole number when present.
    pub fn from_record(record: &RawRecord) -> Result<Self, RecordError> {
        let project_id = record.field("ProjectID").trim().to_string();
        if project_id.is_empty() {
            return Err(RecordError::MissingField {
                kind: "boundary",
                field: "ProjectID",
            });
        }

        let planned_raw = record.field("NumClusters").trim();
        let planned_clusters = if planned_raw.is_empty() {
            None
        } else {
            Some(planned_raw.parse::<i64>().map_err(|_| {
                RecordError::InvalidNumber {
                    kind: "boundary",
                    field: "NumClusters",
                    value: planned_raw.to_string(),
                }
            })?)
        };

        Ok(Self {
            project_id,
            planned_clusters,
            area_ha: record.field("Area_ha").to_string(),
            plot_size: record.field("PlotSize").to_string(),
            fmu: record.field("FMU").to_string(),
            district: record.field("District").to_string(),
            sfl_spcomp: record.field("SFL_SPCOMP").to_string(),
            sfl_site_occ: record.field("SFL_SiteOc").to_string(),
            sfl_fu: record.field("SFL_FU").to_string(),
            sfl_eff_den: record.field("SFL_EffDen").to_string(),
            sfl_as_yr: record.field("SFL_AS_YR").to_string(),
            latitude: record.field("latitude").to_string(),
            longitude: record.field("longitude").to_string(),
        })
    }
}
