//! # Engine Settings
//!
//! Defaults the engines fall back on when a request leaves a value out.
//! Settings are plain data; load them from JSON with
//! [`EngineSettings::from_json`] (missing fields take their defaults).
//!
//! ```rust
//! use sizing_core::settings::EngineSettings;
//!
//! let settings = EngineSettings::from_json(r#"{ "max_alternatives": 3 }"#).unwrap();
//! assert_eq!(settings.max_alternatives, 3);
//! assert_eq!(settings.default_ambient_c, 30.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcResult, Validator};

/// Upper bound on reported alternative candidates
const MAX_ALTERNATIVES_LIMIT: usize = 50;

/// Engine-wide defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Alternative conductor candidates reported per result
    pub max_alternatives: usize,

    /// Ambient temperature assumed when a request omits one (°C)
    pub default_ambient_c: f64,

    /// Power factor for three-phase voltage drop and power-based device
    /// sizing when the request omits one
    pub default_power_factor: f64,

    /// Spare conduit capacity reserved for future wires (%)
    pub default_future_fill_reserve_pct: f64,

    /// Use the application's critical voltage-drop limit unless a request
    /// overrides it
    pub use_critical_voltage_drop: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            max_alternatives: 5,
            default_ambient_c: 30.0,
            default_power_factor: 1.0,
            default_future_fill_reserve_pct: 0.0,
            use_critical_voltage_drop: false,
        }
    }
}

impl EngineSettings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> CalcResult<()> {
        let mut v = Validator::new();
        if self.max_alternatives > MAX_ALTERNATIVES_LIMIT {
            v.push(
                "max_alternatives",
                self.max_alternatives.to_string(),
                format!("Must be at most {}", MAX_ALTERNATIVES_LIMIT),
            );
        }
        v.in_range("default_ambient_c", self.default_ambient_c, -60.0, 150.0);
        if !(self.default_power_factor > 0.0 && self.default_power_factor <= 1.0) {
            v.push(
                "default_power_factor",
                self.default_power_factor.to_string(),
                "Must be greater than 0 and at most 1",
            );
        }
        v.in_range(
            "default_future_fill_reserve_pct",
            self.default_future_fill_reserve_pct,
            0.0,
            100.0,
        );
        v.finish()
    }
}
