//! Species code normalization and grouping.
//!
//! Field crews record species as free text like `"Bf (fir, balsam)"` or
//! `"sw"`. The catalog normalizes that text to a short code, checks it
//! against the accepted list, and maps codes to reporting groups.

use std::collections::{BTreeMap, BTreeSet};

use regen_core::{ConfigError, SurveyConfig};

/// Outcome of normalizing a raw species name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedSpecies {
    /// Blank or too short to be a species entry at all.
    Empty,
    /// Recognized code from the accepted list.
    Valid(String),
    /// Looked like a species entry but the code is not accepted.
    /// Carries the raw text for diagnostics.
    Invalid(String),
}

/// Accepted species codes and their reporting groups, built once per run
/// from the survey configuration.
#[derive(Debug, Clone)]
pub struct SpeciesCatalog {
    accepted: BTreeSet<String>,
    group_of: BTreeMap<String, String>,
}

impl SpeciesCatalog {
    /// Builds the catalog, checking that groups partition the accepted
    /// set: every member accepted, no code in two groups.
    pub fn from_config(config: &SurveyConfig) -> Result<Self, ConfigError> {
        let accepted: BTreeSet<String> = config.effective_accepted_species().into_iter().collect();
        let mut group_of: BTreeMap<String, String> = BTreeMap::new();
        for (group, members) in config.effective_species_groups() {
            for code in members {
                if !accepted.contains(&code) {
                    return Err(ConfigError::UnknownGroupMember { group, code });
                }
                if let Some(first) = group_of.get(&code) {
                    return Err(ConfigError::DuplicateGroupMembership {
                        code,
                        first: first.clone(),
                        second: group,
                    });
                }
                group_of.insert(code, group.clone());
            }
        }
        Ok(Self { accepted, group_of })
    }

    /// Normalizes a raw species name to its code and checks acceptance.
    pub fn normalize(&self, raw: &str) -> NormalizedSpecies {
        match code_token(raw) {
            None => NormalizedSpecies::Empty,
            Some(code) => {
                if self.accepted.contains(&code) {
                    NormalizedSpecies::Valid(code)
                } else {
                    NormalizedSpecies::Invalid(raw.trim().to_string())
                }
            }
        }
    }

    /// Reporting group for an accepted code. Codes outside any group fall
    /// back to themselves, which only happens with explicit partial group
    /// configuration.
    pub fn group_of(&self, code: &str) -> String {
        self.group_of
            .get(code)
            .cloned()
            .unwrap_or_else(|| code.to_string())
    }

    pub fn is_accepted(&self, code: &str) -> bool {
        self.accepted.contains(code)
    }
}

/// Extracts the bare species code from raw text without acceptance
/// checking: trim, then the first three characters uppercased and
/// re-trimmed. Entries shorter than two characters are noise, not codes.
///
/// Residual overstory tallies use this directly since their codes are
/// reported verbatim rather than validated.
pub fn code_token(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.chars().count() < 2 {
        return None;
    }
    let code: String = trimmed.chars().take(3).collect::<String>().trim().to_uppercase();
    Some(code)
}
