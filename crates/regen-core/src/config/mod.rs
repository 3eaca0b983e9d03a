//! Configuration for the survey analysis engine.

pub mod survey_config;

pub use survey_config::SurveyConfig;
