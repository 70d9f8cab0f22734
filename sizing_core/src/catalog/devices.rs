//! Protective device families.
//!
//! A [`DeviceFamily`] is one product line (plug-on breaker, ATO blade
//! fuse, gPV fuse link) with its discrete rating ladder. A concrete
//! [`ProtectiveDeviceSpec`] is a family at one rating.

use serde::{Deserialize, Serialize};

use crate::application::ApplicationType;
use crate::standards::Standard;

/// Breaker or fuse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
    CircuitBreaker,
    Fuse,
}

/// Blade-fuse size class used by the low-voltage DC fuse classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuseType {
    Micro,
    Regular,
    Maxi,
}

impl FuseType {
    /// Upper current bound of each class (A)
    pub const MICRO_MAX: f64 = 15.0;
    pub const REGULAR_MAX: f64 = 40.0;
    pub const MAXI_MAX: f64 = 120.0;

    /// Class for an adjusted current, or `None` above the maxi range
    pub fn classify(adjusted_current: f64) -> Option<FuseType> {
        if adjusted_current <= Self::MICRO_MAX {
            Some(FuseType::Micro)
        } else if adjusted_current <= Self::REGULAR_MAX {
            Some(FuseType::Regular)
        } else if adjusted_current <= Self::MAXI_MAX {
            Some(FuseType::Maxi)
        } else {
            None
        }
    }
}

impl std::fmt::Display for FuseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FuseType::Micro => "micro",
            FuseType::Regular => "regular",
            FuseType::Maxi => "maxi",
        };
        write!(f, "{}", name)
    }
}

/// One product line of protective devices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceFamily {
    pub name: &'static str,
    /// Physical form factor ("plug_on", "blade_ato", "nh_gpv")
    pub form_factor: &'static str,
    pub kind: DeviceKind,
    pub fuse_type: Option<FuseType>,
    /// Standard ratings, ascending (A)
    pub ratings: &'static [f64],
    /// Maximum system voltage (V)
    pub voltage_max: f64,
    pub applications: &'static [ApplicationType],
    pub temperature_range_c: (f64, f64),
    /// Interrupting capacity (kA)
    pub interrupt_capacity_ka: f64,
    pub industrial_duty: bool,
    pub thermal_runaway_protected: bool,
    pub reference: &'static str,
}

impl DeviceFamily {
    pub fn supports(&self, application: ApplicationType, voltage: Option<f64>) -> bool {
        self.applications.contains(&application)
            && voltage.map_or(true, |v| v <= self.voltage_max)
    }

    pub fn has_rating(&self, rating: f64) -> bool {
        self.ratings.iter().any(|r| (r - rating).abs() < 1e-9)
    }

    pub fn spec_at(&self, standard: Standard, rating: f64) -> ProtectiveDeviceSpec {
        ProtectiveDeviceSpec {
            rating,
            name: self.name.to_string(),
            form_factor: self.form_factor.to_string(),
            kind: self.kind,
            fuse_type: self.fuse_type,
            voltage_max: self.voltage_max,
            standard,
            applications: self.applications.to_vec(),
            temperature_range_c: self.temperature_range_c,
            interrupt_capacity_ka: self.interrupt_capacity_ka,
            industrial_duty: self.industrial_duty,
            thermal_runaway_protected: self.thermal_runaway_protected,
            reference: self.reference.to_string(),
        }
    }
}

/// A concrete breaker or fuse at one rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectiveDeviceSpec {
    /// Current rating (A)
    pub rating: f64,
    pub name: String,
    pub form_factor: String,
    pub kind: DeviceKind,
    pub fuse_type: Option<FuseType>,
    pub voltage_max: f64,
    pub standard: Standard,
    pub applications: Vec<ApplicationType>,
    pub temperature_range_c: (f64, f64),
    pub interrupt_capacity_ka: f64,
    pub industrial_duty: bool,
    pub thermal_runaway_protected: bool,
    pub reference: String,
}

impl ProtectiveDeviceSpec {
    pub fn rated_for_ambient(&self, ambient_c: f64) -> bool {
        ambient_c >= self.temperature_range_c.0 && ambient_c <= self.temperature_range_c.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuse_classification_bounds() {
        assert_eq!(FuseType::classify(15.0), Some(FuseType::Micro));
        assert_eq!(FuseType::classify(15.01), Some(FuseType::Regular));
        assert_eq!(FuseType::classify(40.0), Some(FuseType::Regular));
        assert_eq!(FuseType::classify(120.0), Some(FuseType::Maxi));
        assert_eq!(FuseType::classify(120.5), None);
    }

    #[test]
    fn test_fuse_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&FuseType::Regular).unwrap(), "\"regular\"");
    }
}
