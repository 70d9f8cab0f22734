//! Conductor tables and insulation systems.
//!
//! A [`ConductorTable`] holds one row per size, smallest first, with
//! ampacity columns keyed by conductor temperature rating. The insulation
//! system in use picks the column: the highest column rated at or below
//! the insulation rating.

use serde::{Deserialize, Serialize};

use crate::application::ApplicationType;
use crate::standards::metric_label;
use crate::units::{awg_to_mm2, kcmil_to_mm2};

/// Conductor insulation system (THHN, XLPE, GXL, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsulationSystem {
    /// Code as written on the cable jacket
    pub code: String,
    pub description: String,
    /// Maximum conductor operating temperature (°C)
    pub temperature_rating_c: u16,
    /// Lowest ambient the insulation is rated for (°C)
    pub min_temperature_c: f64,
    /// Permitted in wet locations
    pub wet_rated: bool,
    /// Wire-area table group used for conduit fill
    pub area_group: String,
}

impl InsulationSystem {
    pub fn new(
        code: &str,
        description: &str,
        temperature_rating_c: u16,
        min_temperature_c: f64,
        wet_rated: bool,
        area_group: &str,
    ) -> Self {
        Self {
            code: code.to_string(),
            description: description.to_string(),
            temperature_rating_c,
            min_temperature_c,
            wet_rated,
            area_group: area_group.to_string(),
        }
    }

    /// Ambient within the insulation's rated range
    pub fn rated_for_ambient(&self, ambient_c: f64) -> bool {
        ambient_c >= self.min_temperature_c && ambient_c <= self.temperature_rating_c as f64
    }
}

/// One conductor size in a standard's table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorSpec {
    /// Canonical size label ("12 AWG", "250 kcmil", "2.5 mm²")
    pub size: String,
    /// Nominal copper cross-section (mm²)
    pub area_mm2: f64,
    /// DC resistance per 1000 length units (Ω)
    pub resistance: f64,
    /// AC reactance per 1000 length units (Ω); zero for DC-only tables
    pub reactance: f64,
    /// Ampacity per table column (A), same order as [`ConductorTable::columns`]
    pub ampacity: Vec<f64>,
    /// Intermittent-duty ampacity (A), DC catalogs only
    pub intermittent_ampacity: Option<f64>,
}

impl ConductorSpec {
    /// AWG or kcmil row. The area is derived from the size label.
    pub fn awg(size: &str, resistance: f64, reactance: f64, ampacity: &[f64]) -> Self {
        Self {
            size: size.to_string(),
            area_mm2: nominal_awg_area(size),
            resistance,
            reactance,
            ampacity: ampacity.to_vec(),
            intermittent_ampacity: None,
        }
    }

    /// Metric row keyed by cross-section in mm²
    pub fn metric(mm2: f64, resistance: f64, reactance: f64, ampacity: &[f64]) -> Self {
        Self {
            size: metric_label(mm2),
            area_mm2: mm2,
            resistance,
            reactance,
            ampacity: ampacity.to_vec(),
            intermittent_ampacity: None,
        }
    }

    pub fn with_intermittent(mut self, amps: f64) -> Self {
        self.intermittent_ampacity = Some(amps);
        self
    }
}

/// Cross-section of an AWG/kcmil label in mm²
fn nominal_awg_area(label: &str) -> f64 {
    if let Some(kcmil) = label.strip_suffix(" kcmil") {
        return kcmil_to_mm2(kcmil.parse().unwrap_or(0.0));
    }
    let gauge = match label.trim_end_matches(" AWG") {
        "1/0" => 0,
        "2/0" => -1,
        "3/0" => -2,
        "4/0" => -3,
        n => n.parse().unwrap_or(0),
    };
    awg_to_mm2(gauge)
}

/// Ampacity table of one standard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorTable {
    /// Column temperature ratings (°C), ascending
    pub columns: Vec<u16>,
    /// Rows ordered smallest to largest
    pub rows: Vec<ConductorSpec>,
    /// Column used for the simplified wire-compatibility map
    pub reference_column: usize,
    pub applications: Vec<ApplicationType>,
    pub reference: String,
}

impl ConductorTable {
    /// Index of the highest column at or below `rating_c`; the lowest
    /// column when every column is rated higher.
    pub fn column_for(&self, rating_c: u16) -> usize {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| **c <= rating_c)
            .map(|(i, _)| i)
            .last()
            .unwrap_or(0)
    }

    pub fn find(&self, size: &str) -> Option<(usize, &ConductorSpec)> {
        self.rows.iter().enumerate().find(|(_, row)| row.size == size)
    }

    pub fn sizes(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.size.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ConductorTable {
        ConductorTable {
            columns: vec![60, 75, 90],
            rows: vec![
                ConductorSpec::awg("12 AWG", 1.98, 0.054, &[20.0, 25.0, 30.0]),
                ConductorSpec::awg("1/0 AWG", 0.122, 0.044, &[125.0, 150.0, 170.0]),
                ConductorSpec::awg("250 kcmil", 0.0515, 0.041, &[215.0, 255.0, 290.0]),
            ],
            reference_column: 1,
            applications: vec![ApplicationType::Residential],
            reference: "NEC Table 310.16".to_string(),
        }
    }

    #[test]
    fn test_column_selection() {
        let t = table();
        assert_eq!(t.column_for(90), 2);
        assert_eq!(t.column_for(80), 1);
        assert_eq!(t.column_for(75), 1);
        assert_eq!(t.column_for(40), 0);
    }

    #[test]
    fn test_awg_area_from_label() {
        let t = table();
        assert!((t.rows[0].area_mm2 - 3.31).abs() < 0.01);
        assert!((t.rows[1].area_mm2 - 53.5).abs() < 0.1);
        assert!((t.rows[2].area_mm2 - 126.7).abs() < 0.1);
    }

    #[test]
    fn test_find_by_label() {
        let t = table();
        assert_eq!(t.find("1/0 AWG").map(|(i, _)| i), Some(1));
        assert!(t.find("2 AWG").is_none());
    }

    #[test]
    fn test_insulation_ambient_range() {
        let thhn = InsulationSystem::new("THHN", "Thermoplastic", 90, -10.0, false, "THHN");
        assert!(thhn.rated_for_ambient(40.0));
        assert!(!thhn.rated_for_ambient(-20.0));
    }
}
