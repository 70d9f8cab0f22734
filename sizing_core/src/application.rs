//! # Application Profiles
//!
//! Per-application design rules shared by every standard: voltage-drop
//! limits, safety factors, valid voltage and temperature ranges, and any
//! application-specific factor addenda applied when sizing protection.
//!
//! | Application  | VD normal | VD critical | SF cont. | SF int. | Addenda               |
//! |--------------|-----------|-------------|----------|---------|-----------------------|
//! | Residential  | 5 %       | 3 %         | 1.25     | 1.00    |                       |
//! | Commercial   | 5 %       | 3 %         | 1.25     | 1.00    |                       |
//! | Industrial   | 5 %       | 3 %         | 1.25     | 1.15    |                       |
//! | Automotive   | 5 %       | 3 %         | 1.25     | 1.00    |                       |
//! | Marine       | 10 %      | 3 %         | 1.25     | 1.00    |                       |
//! | Solar        | 3 %       | 1.5 %       | 1.25     | 1.25    | PV Isc × 1.25         |
//! | Telecom      | 2 %       | 1 %         | 1.25     | 1.00    |                       |
//! | Battery      | 2 %       | 1 %         | 1.25     | 1.00    | Thermal runaway × 1.2 |
//! | LED          | 5 %       | 3 %         | 1.25     | 1.00    |                       |
//!
//! The critical limit is the tighter one, selected for loads whose
//! function depends on terminal voltage (navigation lights, bilge pumps,
//! control electronics).

use serde::{Deserialize, Serialize};

use crate::standards::code_ref;

/// Load application type (shared enumeration across all standards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationType {
    Residential,
    Commercial,
    Industrial,
    Automotive,
    Marine,
    Solar,
    Telecom,
    Battery,
    Led,
}

impl ApplicationType {
    pub const ALL: [ApplicationType; 9] = [
        ApplicationType::Residential,
        ApplicationType::Commercial,
        ApplicationType::Industrial,
        ApplicationType::Automotive,
        ApplicationType::Marine,
        ApplicationType::Solar,
        ApplicationType::Telecom,
        ApplicationType::Battery,
        ApplicationType::Led,
    ];

    pub fn from_str_flexible(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "residential" | "dwelling" => Ok(ApplicationType::Residential),
            "commercial" => Ok(ApplicationType::Commercial),
            "industrial" => Ok(ApplicationType::Industrial),
            "automotive" | "vehicle" => Ok(ApplicationType::Automotive),
            "marine" | "boat" => Ok(ApplicationType::Marine),
            "solar" | "pv" | "photovoltaic" => Ok(ApplicationType::Solar),
            "telecom" | "telecommunications" => Ok(ApplicationType::Telecom),
            "battery" | "energy_storage" | "ess" => Ok(ApplicationType::Battery),
            "led" | "lighting" | "led_lighting" => Ok(ApplicationType::Led),
            other => Err(format!("Unknown application type '{}'", other)),
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ApplicationType::Residential => "residential",
            ApplicationType::Commercial => "commercial",
            ApplicationType::Industrial => "industrial",
            ApplicationType::Automotive => "automotive",
            ApplicationType::Marine => "marine",
            ApplicationType::Solar => "solar",
            ApplicationType::Telecom => "telecom",
            ApplicationType::Battery => "battery",
            ApplicationType::Led => "led",
        }
    }

    /// Applications whose protection is sized through the blade-fuse classifier
    pub fn uses_fuse_classifier(&self) -> bool {
        matches!(
            self,
            ApplicationType::Automotive | ApplicationType::Marine | ApplicationType::Led
        )
    }

    /// Design profile for this application
    pub fn profile(&self) -> &'static ApplicationProfile {
        let index = match self {
            ApplicationType::Residential => 0,
            ApplicationType::Commercial => 1,
            ApplicationType::Industrial => 2,
            ApplicationType::Automotive => 3,
            ApplicationType::Marine => 4,
            ApplicationType::Solar => 5,
            ApplicationType::Telecom => 6,
            ApplicationType::Battery => 7,
            ApplicationType::Led => 8,
        };
        &PROFILES[index]
    }
}

impl std::fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Load duty cycle; selects the continuous or intermittent safety factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DutyCycle {
    /// Maximum current expected for 3 hours or more
    #[default]
    Continuous,
    Intermittent,
}

impl DutyCycle {
    pub fn from_str_flexible(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "continuous" | "cont" => Ok(DutyCycle::Continuous),
            "intermittent" | "noncontinuous" | "non_continuous" | "non-continuous" => {
                Ok(DutyCycle::Intermittent)
            }
            other => Err(format!("Unknown duty cycle '{}' (expected continuous or intermittent)", other)),
        }
    }
}

/// A named multiplicative adjustment with its code reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NamedFactor {
    pub name: &'static str,
    pub value: f64,
    pub reference: &'static str,
}

/// Design rules for one application type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ApplicationProfile {
    pub application: ApplicationType,
    /// Voltage-drop limit for ordinary loads (%)
    pub voltage_drop_normal_pct: f64,
    /// Tighter voltage-drop limit for critical loads (%)
    pub voltage_drop_critical_pct: f64,
    pub continuous_safety_factor: f64,
    pub intermittent_safety_factor: f64,
    /// Valid circuit voltage range (V)
    pub voltage_range: (f64, f64),
    /// Valid ambient temperature range (°C)
    pub temperature_range_c: (f64, f64),
    /// Ambient above which protective devices are derated (°C)
    pub baseline_temperature_c: f64,
    /// Load efficiency assumed for power-based requests
    pub default_efficiency: f64,
    /// Extra factors applied last in the protective-device chain
    pub addenda: &'static [NamedFactor],
    pub compliance_references: &'static [&'static str],
}

impl ApplicationProfile {
    pub fn safety_factor(&self, duty: DutyCycle) -> f64 {
        match duty {
            DutyCycle::Continuous => self.continuous_safety_factor,
            DutyCycle::Intermittent => self.intermittent_safety_factor,
        }
    }

    pub fn voltage_drop_limit(&self, critical: bool) -> f64 {
        if critical {
            self.voltage_drop_critical_pct
        } else {
            self.voltage_drop_normal_pct
        }
    }

    pub fn voltage_in_range(&self, volts: f64) -> bool {
        volts >= self.voltage_range.0 && volts <= self.voltage_range.1
    }

    pub fn temperature_in_range(&self, ambient_c: f64) -> bool {
        ambient_c >= self.temperature_range_c.0 && ambient_c <= self.temperature_range_c.1
    }
}

const PV_SHORT_CIRCUIT: NamedFactor = NamedFactor {
    name: "PV short-circuit current multiplier",
    value: 1.25,
    reference: code_ref::NEC_PV_CURRENT,
};

const BATTERY_THERMAL_RUNAWAY: NamedFactor = NamedFactor {
    name: "Battery thermal-runaway margin",
    value: 1.2,
    reference: code_ref::NEC_STORAGE_BATTERY,
};

static PROFILES: [ApplicationProfile; 9] = [
    ApplicationProfile {
        application: ApplicationType::Residential,
        voltage_drop_normal_pct: 5.0,
        voltage_drop_critical_pct: 3.0,
        continuous_safety_factor: 1.25,
        intermittent_safety_factor: 1.0,
        voltage_range: (100.0, 480.0),
        temperature_range_c: (-30.0, 50.0),
        baseline_temperature_c: 30.0,
        default_efficiency: 1.0,
        addenda: &[],
        compliance_references: &[code_ref::NEC_CONTINUOUS_LOAD, code_ref::NEC_VOLTAGE_DROP],
    },
    ApplicationProfile {
        application: ApplicationType::Commercial,
        voltage_drop_normal_pct: 5.0,
        voltage_drop_critical_pct: 3.0,
        continuous_safety_factor: 1.25,
        intermittent_safety_factor: 1.0,
        voltage_range: (100.0, 600.0),
        temperature_range_c: (-30.0, 50.0),
        baseline_temperature_c: 30.0,
        default_efficiency: 1.0,
        addenda: &[],
        compliance_references: &[code_ref::NEC_CONTINUOUS_LOAD, code_ref::NEC_VOLTAGE_DROP],
    },
    ApplicationProfile {
        application: ApplicationType::Industrial,
        voltage_drop_normal_pct: 5.0,
        voltage_drop_critical_pct: 3.0,
        continuous_safety_factor: 1.25,
        intermittent_safety_factor: 1.15,
        voltage_range: (100.0, 1000.0),
        temperature_range_c: (-40.0, 60.0),
        baseline_temperature_c: 30.0,
        default_efficiency: 0.9,
        addenda: &[],
        compliance_references: &[code_ref::NEC_CONTINUOUS_LOAD, code_ref::IEC_OVERLOAD],
    },
    ApplicationProfile {
        application: ApplicationType::Automotive,
        voltage_drop_normal_pct: 5.0,
        voltage_drop_critical_pct: 3.0,
        continuous_safety_factor: 1.25,
        intermittent_safety_factor: 1.0,
        voltage_range: (6.0, 48.0),
        temperature_range_c: (-40.0, 125.0),
        baseline_temperature_c: 30.0,
        default_efficiency: 1.0,
        addenda: &[],
        compliance_references: &[code_ref::SAE_J1128, code_ref::ISO_8820],
    },
    ApplicationProfile {
        application: ApplicationType::Marine,
        voltage_drop_normal_pct: 10.0,
        voltage_drop_critical_pct: 3.0,
        continuous_safety_factor: 1.25,
        intermittent_safety_factor: 1.0,
        voltage_range: (6.0, 48.0),
        temperature_range_c: (-30.0, 80.0),
        baseline_temperature_c: 30.0,
        default_efficiency: 1.0,
        addenda: &[],
        compliance_references: &[code_ref::ABYC_E11_VOLTAGE_DROP, code_ref::ABYC_E11_OCP],
    },
    ApplicationProfile {
        application: ApplicationType::Solar,
        voltage_drop_normal_pct: 3.0,
        voltage_drop_critical_pct: 1.5,
        continuous_safety_factor: 1.25,
        intermittent_safety_factor: 1.25,
        voltage_range: (12.0, 1500.0),
        temperature_range_c: (-40.0, 90.0),
        baseline_temperature_c: 30.0,
        default_efficiency: 0.96,
        addenda: &[PV_SHORT_CIRCUIT],
        compliance_references: &[code_ref::NEC_PV_CURRENT, code_ref::NEC_PV_OCPD],
    },
    ApplicationProfile {
        application: ApplicationType::Telecom,
        voltage_drop_normal_pct: 2.0,
        voltage_drop_critical_pct: 1.0,
        continuous_safety_factor: 1.25,
        intermittent_safety_factor: 1.0,
        voltage_range: (12.0, 60.0),
        temperature_range_c: (-5.0, 55.0),
        baseline_temperature_c: 30.0,
        default_efficiency: 0.92,
        addenda: &[],
        compliance_references: &[code_ref::TELCORDIA_GR513, code_ref::ANSI_T1_311],
    },
    ApplicationProfile {
        application: ApplicationType::Battery,
        voltage_drop_normal_pct: 2.0,
        voltage_drop_critical_pct: 1.0,
        continuous_safety_factor: 1.25,
        intermittent_safety_factor: 1.0,
        voltage_range: (6.0, 1000.0),
        temperature_range_c: (-20.0, 60.0),
        baseline_temperature_c: 30.0,
        default_efficiency: 0.95,
        addenda: &[BATTERY_THERMAL_RUNAWAY],
        compliance_references: &[code_ref::NEC_STORAGE_BATTERY],
    },
    ApplicationProfile {
        application: ApplicationType::Led,
        voltage_drop_normal_pct: 5.0,
        voltage_drop_critical_pct: 3.0,
        continuous_safety_factor: 1.25,
        intermittent_safety_factor: 1.0,
        voltage_range: (5.0, 48.0),
        temperature_range_c: (-30.0, 60.0),
        baseline_temperature_c: 30.0,
        default_efficiency: 0.9,
        addenda: &[],
        compliance_references: &[code_ref::SAE_J2077, code_ref::ABYC_E11_VOLTAGE_DROP],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_lookup_matches_type() {
        for app in ApplicationType::ALL {
            assert_eq!(app.profile().application, app);
        }
    }

    #[test]
    fn test_safety_factor_ordering() {
        for app in ApplicationType::ALL {
            let p = app.profile();
            assert!(p.continuous_safety_factor >= p.intermittent_safety_factor, "{}", app);
            assert!(p.intermittent_safety_factor >= 1.0, "{}", app);
        }
    }

    #[test]
    fn test_critical_limit_is_tighter() {
        for app in ApplicationType::ALL {
            let p = app.profile();
            assert!(p.voltage_drop_limit(true) <= p.voltage_drop_limit(false));
        }
    }

    #[test]
    fn test_fuse_classifier_applications() {
        assert!(ApplicationType::Automotive.uses_fuse_classifier());
        assert!(ApplicationType::Led.uses_fuse_classifier());
        assert!(!ApplicationType::Battery.uses_fuse_classifier());
    }

    #[test]
    fn test_parse_application() {
        assert_eq!(ApplicationType::from_str_flexible("PV").unwrap(), ApplicationType::Solar);
        assert!(ApplicationType::from_str_flexible("aerospace").is_err());
        assert_eq!(DutyCycle::from_str_flexible("non-continuous").unwrap(), DutyCycle::Intermittent);
    }
}
