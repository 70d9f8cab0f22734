//! # Circuit Types
//!
//! Phase system and conductor material shared by the conductor and
//! device engines.

use serde::{Deserialize, Serialize};

/// Resistance multiplier for aluminum relative to copper
pub const ALUMINUM_RESISTANCE_FACTOR: f64 = 1.64;

/// Supply phase arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseSystem {
    Dc,
    SinglePhase,
    ThreePhase,
}

impl PhaseSystem {
    pub fn from_str_flexible(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "dc" | "direct" => Ok(PhaseSystem::Dc),
            "single_phase" | "single" | "1_phase" | "1ph" | "ac" => Ok(PhaseSystem::SinglePhase),
            "three_phase" | "three" | "3_phase" | "3ph" => Ok(PhaseSystem::ThreePhase),
            other => Err(format!(
                "Unknown phase system '{}' (expected dc, single_phase or three_phase)",
                other
            )),
        }
    }

    pub fn is_ac(&self) -> bool {
        !matches!(self, PhaseSystem::Dc)
    }

    /// Multiplier applied to per-conductor power loss
    pub fn loss_multiplier(&self) -> f64 {
        match self {
            PhaseSystem::ThreePhase => 3.0,
            _ => 1.0,
        }
    }
}

impl std::fmt::Display for PhaseSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PhaseSystem::Dc => "DC",
            PhaseSystem::SinglePhase => "single-phase AC",
            PhaseSystem::ThreePhase => "three-phase AC",
        };
        write!(f, "{}", name)
    }
}

/// Conductor metal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConductorMaterial {
    #[default]
    Copper,
    Aluminum,
}

impl ConductorMaterial {
    pub fn from_str_flexible(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "copper" | "cu" => Ok(ConductorMaterial::Copper),
            "aluminum" | "aluminium" | "al" => Ok(ConductorMaterial::Aluminum),
            other => Err(format!("Unknown conductor material '{}' (expected copper or aluminum)", other)),
        }
    }

    /// Catalog resistances are for copper
    pub fn resistance_multiplier(&self) -> f64 {
        match self {
            ConductorMaterial::Copper => 1.0,
            ConductorMaterial::Aluminum => ALUMINUM_RESISTANCE_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_parse() {
        assert_eq!(PhaseSystem::from_str_flexible("3-phase").unwrap(), PhaseSystem::ThreePhase);
        assert!(PhaseSystem::from_str_flexible("polyphase").is_err());
        assert_eq!(PhaseSystem::from_str_flexible("three phase").unwrap(), PhaseSystem::ThreePhase);
        assert_eq!(PhaseSystem::from_str_flexible("DC").unwrap(), PhaseSystem::Dc);
        assert!(PhaseSystem::SinglePhase.is_ac());
    }

    #[test]
    fn test_material_multiplier() {
        assert_eq!(ConductorMaterial::default(), ConductorMaterial::Copper);
        assert!(ConductorMaterial::Aluminum.resistance_multiplier() > 1.0);
        assert_eq!(ConductorMaterial::from_str_flexible("Al").unwrap(), ConductorMaterial::Aluminum);
    }
}
