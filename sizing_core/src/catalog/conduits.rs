//! Conduit and wire-area tables for fill calculations.

use serde::{Deserialize, Serialize};

/// Raceway material / type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConduitType {
    /// Electrical metallic tubing
    Emt,
    /// Rigid metal conduit
    Rmc,
    /// Intermediate metal conduit
    Imc,
    PvcSchedule40,
    PvcSchedule80,
    /// Flexible metal conduit
    Fmc,
    /// IEC 61386 rigid PVC
    PvcRigid,
    /// IEC 61386 heavy-gauge steel
    SteelHeavy,
    /// IEC 61386 corrugated flexible
    Flexible,
}

impl ConduitType {
    pub fn from_str_flexible(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "emt" => Ok(ConduitType::Emt),
            "rmc" | "rigid" | "grc" => Ok(ConduitType::Rmc),
            "imc" => Ok(ConduitType::Imc),
            "pvc" | "pvc40" | "pvc_40" | "pvc_schedule_40" | "pvc_sch40" => Ok(ConduitType::PvcSchedule40),
            "pvc80" | "pvc_80" | "pvc_schedule_80" | "pvc_sch80" => Ok(ConduitType::PvcSchedule80),
            "fmc" | "flex" => Ok(ConduitType::Fmc),
            "pvc_rigid" | "rigid_pvc" => Ok(ConduitType::PvcRigid),
            "steel_heavy" | "heavy_steel" | "steel" => Ok(ConduitType::SteelHeavy),
            "flexible" | "corrugated" => Ok(ConduitType::Flexible),
            other => Err(format!("Unknown conduit type '{}'", other)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConduitType::Emt => "EMT",
            ConduitType::Rmc => "RMC",
            ConduitType::Imc => "IMC",
            ConduitType::PvcSchedule40 => "PVC Schedule 40",
            ConduitType::PvcSchedule80 => "PVC Schedule 80",
            ConduitType::Fmc => "FMC",
            ConduitType::PvcRigid => "Rigid PVC",
            ConduitType::SteelHeavy => "Heavy-gauge steel",
            ConduitType::Flexible => "Flexible corrugated",
        }
    }
}

impl std::fmt::Display for ConduitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One conduit trade size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitSpec {
    pub conduit_type: ConduitType,
    /// Trade size label ("1/2", "1-1/4", "25 mm")
    pub size: String,
    /// Total internal area (100 %) in the standard's area unit
    pub internal_area: f64,
}

/// Build one conduit type's rows from `(size, area)` pairs
pub(crate) fn conduit_rows(conduit_type: ConduitType, rows: &[(&str, f64)]) -> Vec<ConduitSpec> {
    rows.iter()
        .map(|(size, area)| ConduitSpec {
            conduit_type,
            size: size.to_string(),
            internal_area: *area,
        })
        .collect()
}

/// Cross-section of one insulated wire, including insulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireArea {
    pub area_group: String,
    pub size: String,
    pub area: f64,
}

pub(crate) fn wire_rows(area_group: &str, rows: &[(&str, f64)]) -> Vec<WireArea> {
    rows.iter()
        .map(|(size, area)| WireArea {
            area_group: area_group.to_string(),
            size: size.to_string(),
            area: *area,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conduit_type() {
        assert_eq!(ConduitType::from_str_flexible("EMT").unwrap(), ConduitType::Emt);
        assert_eq!(ConduitType::from_str_flexible("PVC-80").unwrap(), ConduitType::PvcSchedule80);
        assert_eq!(ConduitType::from_str_flexible("heavy steel").unwrap(), ConduitType::SteelHeavy);
        assert!(ConduitType::from_str_flexible("garden hose").is_err());
    }

    #[test]
    fn test_serde_name() {
        let json = serde_json::to_string(&ConduitType::PvcSchedule40).unwrap();
        assert_eq!(json, "\"pvc_schedule40\"");
    }
}
