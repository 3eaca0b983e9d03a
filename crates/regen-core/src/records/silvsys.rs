//! Silvicultural system and its plot geometry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Silvicultural system a cluster was surveyed under.
///
/// The system fixes the plot geometry: how many species slots each plot
/// form carries, and which subplot area each slot was tallied over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SilvSys {
    /// Clearcut: 4 species slots per plot, all tallied on the 8 m² subplot.
    Cc,
    /// Shelterwood: 6 slots per plot; slots 1-3 on the 8 m² subplot,
    /// slots 4-6 on the 16 m² subplot.
    Sh,
}

impl SilvSys {
    pub fn code(&self) -> &'static str {
        match self {
            SilvSys::Cc => "CC",
            SilvSys::Sh => "SH",
        }
    }

    /// Number of species slots on each plot form.
    pub fn species_slots(&self) -> u32 {
        match self {
            SilvSys::Cc => 4,
            SilvSys::Sh => 6,
        }
    }

    /// Subplot area in m² that the given 1-based slot was tallied over.
    pub fn subplot_area_m2(&self, slot: u32) -> f64 {
        match self {
            SilvSys::Cc => 8.0,
            SilvSys::Sh => {
                if slot <= 3 {
                    8.0
                } else {
                    16.0
                }
            }
        }
    }
}

impl fmt::Display for SilvSys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_per_system() {
        assert_eq!(SilvSys::Cc.species_slots(), 4);
        assert_eq!(SilvSys::Sh.species_slots(), 6);
        for slot in 1..=4 {
            assert_eq!(SilvSys::Cc.subplot_area_m2(slot), 8.0);
        }
        assert_eq!(SilvSys::Sh.subplot_area_m2(3), 8.0);
        assert_eq!(SilvSys::Sh.subplot_area_m2(4), 16.0);
    }

    #[test]
    fn serde_codes() {
        let json = serde_json::to_string(&SilvSys::Sh).unwrap();
        assert_eq!(json, "\"SH\"");
        let back: SilvSys = serde_json::from_str("\"CC\"").unwrap();
        assert_eq!(back, SilvSys::Cc);
    }
}
