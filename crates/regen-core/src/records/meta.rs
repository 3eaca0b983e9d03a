//! Project survey metadata record.

use serde::Serialize;

use crate::errors::RecordError;
use crate::records::RawRecord;

/// One project survey form: who surveyed the project, when, and any
/// project-level comments left by the crew.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyMeta {
    pub project_id: String,
    /// Assessment date, truncated to `YYYY-MM-DD`.
    pub assessment_date: String,
    pub surveyors: String,
    pub comments: String,
    pub fmu: String,
    pub district: String,
}

impl SurveyMeta {
    pub fn from_record(record: &RawRecord) -> Result<Self, RecordError> {
        let project_id = record.field("ProjectID").trim().to_string();
        if project_id.is_empty() {
            return Err(RecordError::MissingField {
                kind: "survey meta",
                field: "ProjectID",
            });
        }

        let date_raw = record.field("Date");
        let assessment_date = date_raw.chars().take(10).collect::<String>();

        Ok(Self {
            project_id,
            assessment_date,
            surveyors: record.field("Surveyors").to_string(),
            comments: record.field("Comments").to_string(),
            fmu: record.field("ForestManagementUnit").to_string(),
            district: record.field("DistrictName").to_string(),
        })
    }
}
