//! Integration tests for survey configuration defaults and validation.

use std::collections::BTreeMap;

use regen_core::config::survey_config::DEFAULT_SPECIES;
use regen_core::{ConfigError, SurveyConfig};

#[test]
fn default_config_is_valid_and_usable() {
    let cfg = SurveyConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.effective_num_plots(), 8);
    assert_eq!(cfg.effective_max_trees_per_sqm(), 0.5);
    assert_eq!(cfg.effective_confidence_level(), 0.95);
    assert_eq!(
        cfg.effective_accepted_species(),
        DEFAULT_SPECIES
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
    );
}

#[test]
fn default_groups_fold_spruces_into_sx() {
    let groups = SurveyConfig::default().effective_species_groups();
    assert_eq!(groups.get("SX"), Some(&vec!["SB".to_string(), "SW".to_string()]));
    assert!(!groups.contains_key("SB"));
    assert!(!groups.contains_key("SW"));
    assert_eq!(groups.get("BF"), Some(&vec!["BF".to_string()]));
}

#[test]
fn custom_species_without_spruces_keeps_identity_groups() {
    let cfg = SurveyConfig {
        accepted_species: vec!["PJ".to_string(), "PR".to_string()],
        ..Default::default()
    };
    let groups = cfg.effective_species_groups();
    assert!(!groups.contains_key("SX"));
    assert_eq!(groups.get("PJ"), Some(&vec!["PJ".to_string()]));
    assert_eq!(groups.len(), 2);
}

#[test]
fn explicit_groups_win_over_defaults() {
    let mut species_groups = BTreeMap::new();
    species_groups.insert("CON".to_string(), vec!["BF".to_string(), "SW".to_string()]);
    let cfg = SurveyConfig {
        species_groups,
        ..Default::default()
    };
    let groups = cfg.effective_species_groups();
    assert_eq!(groups.len(), 1);
    assert!(groups.contains_key("CON"));
}

#[test]
fn validate_rejects_bad_scalars() {
    let cfg = SurveyConfig {
        num_plots: Some(0),
        ..Default::default()
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::ZeroPlots)));

    let cfg = SurveyConfig {
        max_trees_per_sqm: Some(-1.0),
        ..Default::default()
    };
    assert!(matches!(cfg.validate(), Err(ConfigError::InvalidTreeCap(_))));

    let cfg = SurveyConfig {
        confidence_level: Some(1.0),
        ..Default::default()
    };
    assert!(matches!(
        cfg.validate(),
        Err(ConfigError::InvalidConfidence(_))
    ));
}

#[test]
fn config_round_trips_through_json() {
    let json = r#"{"num_plots": 6, "confidence_level": 0.9}"#;
    let cfg: SurveyConfig = serde_json::from_str(json).unwrap();
    assert_eq!(cfg.effective_num_plots(), 6);
    assert_eq!(cfg.effective_confidence_level(), 0.9);
    // unspecified fields take defaults
    assert_eq!(cfg.effective_max_trees_per_sqm(), 0.5);
}
