//! # Sizing Calculations
//!
//! The three sizing engines. Each follows the pattern:
//!
//! - `*Input` - request parameters (JSON-serializable, typed enums)
//! - `*Result` - selection, metrics, compliance flags, alternatives and
//!   [`CalculationMetadata`] (JSON-serializable)
//! - `calculate(catalog, settings, input) -> CalcResult<*Result>` - pure
//!   function of the catalog and the input
//!
//! [`SizingEngine`] binds one standard's catalog to the engine settings;
//! the [`crate::router::Router`] holds one engine per standard.
//!
//! ## Available Calculations
//!
//! - [`conductor`] - minimum conductor for ampacity and voltage drop
//! - [`conduit`] - minimum conduit for a wire bundle under the fill tiers
//! - [`device`] - breaker or fuse rating from the device factor chain

pub mod conductor;
pub mod conduit;
pub mod device;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::ApplicationType;
use crate::catalog::{catalog_for, InsulationSystem, StandardCatalog};
use crate::circuit::PhaseSystem;
use crate::corrections::{Environment, InstallationMethod};
use crate::errors::{CalcResult, Validator};
use crate::settings::EngineSettings;
use crate::standards::Standard;

pub use conductor::{ConductorCandidate, ConductorCompliance, ConductorSizingInput, ConductorSizingResult};
pub use conduit::{ConduitCandidate, ConduitFillInput, ConduitFillResult, WireEntry, WireShare};
pub use device::{DeviceCompliance, DeviceSizingInput, DeviceSizingResult, LoadSpec};

/// Lowest and highest ambient temperature accepted by any engine (°C)
const AMBIENT_LIMITS_C: (f64, f64) = (-60.0, 150.0);

/// Audit record attached to every result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationMetadata {
    pub standard: Standard,
    pub standard_name: String,
    /// Code sections consulted, in the order they were applied
    pub sections_applied: Vec<String>,
    pub application: Option<ApplicationType>,
    pub ambient_c: Option<f64>,
    pub installation_method: Option<InstallationMethod>,
    pub environment: Option<Environment>,
    /// Human-readable rendering of the calculation
    pub calculation_method: String,
    pub timestamp: DateTime<Utc>,
    pub engine_version: String,
}

impl CalculationMetadata {
    /// Metadata stamped with `evaluated_at`, or the current time
    pub fn new(standard: Standard, evaluated_at: Option<DateTime<Utc>>) -> Self {
        CalculationMetadata {
            standard,
            standard_name: standard.display_name().to_string(),
            sections_applied: Vec::new(),
            application: None,
            ambient_c: None,
            installation_method: None,
            environment: None,
            calculation_method: String::new(),
            timestamp: evaluated_at.unwrap_or_else(Utc::now),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Record a code section once, keeping first-use order
    pub fn cite(&mut self, section: impl Into<String>) {
        let section = section.into();
        if !section.is_empty() && !self.sections_applied.contains(&section) {
            self.sections_applied.push(section);
        }
    }
}

// ============================================================================
// Shared input checks
// ============================================================================

pub(crate) fn check_application(v: &mut Validator, catalog: &StandardCatalog, application: ApplicationType) {
    if !catalog.supports(application) {
        let supported: Vec<&str> = catalog.applications.iter().map(|a| a.id()).collect();
        v.push(
            "application",
            application.id(),
            format!(
                "Not covered by {} (supported: {})",
                catalog.standard.display_name(),
                supported.join(", ")
            ),
        );
    }
}

/// Voltage must be positive and inside the application's range
pub(crate) fn check_voltage(v: &mut Validator, field: &str, application: ApplicationType, voltage: f64) {
    let profile = application.profile();
    if !voltage.is_finite() || voltage <= 0.0 {
        v.push(field, voltage.to_string(), "Must be a positive number");
    } else if !profile.voltage_in_range(voltage) {
        v.push(
            field,
            voltage.to_string(),
            format!(
                "Outside the {} voltage range {}-{} V",
                application, profile.voltage_range.0, profile.voltage_range.1
            ),
        );
    }
}

/// Phase system assumed when a request omits one
pub(crate) fn default_phase(standard: Standard) -> PhaseSystem {
    if standard.is_dc() {
        PhaseSystem::Dc
    } else {
        PhaseSystem::SinglePhase
    }
}

/// DC standards take DC circuits only; AC standards take single- or three-phase
pub(crate) fn check_phase(v: &mut Validator, standard: Standard, phase: PhaseSystem) {
    if standard.is_dc() && phase.is_ac() {
        v.push("phase", format!("{:?}", phase), format!("{} covers DC circuits only", standard));
    } else if !standard.is_dc() && !phase.is_ac() {
        v.push(
            "phase",
            format!("{:?}", phase),
            format!("{} requires single_phase or three_phase", standard),
        );
    }
}

pub(crate) fn check_ambient(v: &mut Validator, ambient_c: f64) {
    v.in_range("ambient_c", ambient_c, AMBIENT_LIMITS_C.0, AMBIENT_LIMITS_C.1);
}

pub(crate) fn check_power_factor(v: &mut Validator, power_factor: Option<f64>) {
    if let Some(pf) = power_factor {
        if !(pf > 0.0 && pf <= 1.0) {
            v.push("power_factor", pf.to_string(), "Must be greater than 0 and at most 1");
        }
    }
}

/// Insulation by code, or the catalog default when none is given
pub(crate) fn resolve_insulation<'c>(
    v: &mut Validator,
    catalog: &'c StandardCatalog,
    field: &str,
    code: Option<&str>,
) -> Option<&'c InsulationSystem> {
    let code = code.unwrap_or(catalog.default_insulation);
    let found = catalog.insulation(code);
    if found.is_none() {
        v.push(
            field,
            code,
            format!(
                "Not a {} insulation (expected one of: {})",
                catalog.standard.display_name(),
                catalog.insulation_codes().join(", ")
            ),
        );
    }
    found
}

/// Normalize a size label against the catalog ladder
pub(crate) fn check_size(v: &mut Validator, catalog: &StandardCatalog, field: &str, raw: &str) -> Option<String> {
    v.parse(field, raw, catalog.normalize_size(raw))
}

// ============================================================================
// Engine
// ============================================================================

/// One standard's catalog bound to the engine settings.
///
/// Engines hold only `'static` read-only data, so they are cheap to clone
/// and safe to share between threads.
#[derive(Debug, Clone)]
pub struct SizingEngine {
    catalog: &'static StandardCatalog,
    settings: EngineSettings,
}

impl SizingEngine {
    pub fn new(standard: Standard, settings: EngineSettings) -> Self {
        SizingEngine {
            catalog: catalog_for(standard),
            settings,
        }
    }

    pub fn standard(&self) -> Standard {
        self.catalog.standard
    }

    pub fn catalog(&self) -> &'static StandardCatalog {
        self.catalog
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn size_conductor(&self, input: &ConductorSizingInput) -> CalcResult<ConductorSizingResult> {
        conductor::calculate(self.catalog, &self.settings, input)
    }

    pub fn fill_conduit(&self, input: &ConduitFillInput) -> CalcResult<ConduitFillResult> {
        conduit::calculate(self.catalog, &self.settings, input)
    }

    pub fn size_device(&self, input: &DeviceSizingInput) -> CalcResult<DeviceSizingResult> {
        device::calculate(self.catalog, &self.settings, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_metadata_uses_supplied_timestamp() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let meta = CalculationMetadata::new(Standard::Iec, Some(at));
        assert_eq!(meta.timestamp, at);
        assert_eq!(meta.standard_name, "IEC 60364");
        assert!(!meta.engine_version.is_empty());
    }

    #[test]
    fn test_cite_keeps_first_use_order() {
        let mut meta = CalculationMetadata::new(Standard::Nec, None);
        meta.cite("NEC Table 310.16");
        meta.cite("NEC 310.15(B)(1)");
        meta.cite("NEC Table 310.16");
        meta.cite("");
        assert_eq!(meta.sections_applied, vec!["NEC Table 310.16", "NEC 310.15(B)(1)"]);
    }

    #[test]
    fn test_phase_rules() {
        let mut v = Validator::new();
        check_phase(&mut v, Standard::DcMarine, PhaseSystem::Dc);
        check_phase(&mut v, Standard::Nec, PhaseSystem::ThreePhase);
        assert!(v.is_empty());
        check_phase(&mut v, Standard::DcSolar, PhaseSystem::SinglePhase);
        check_phase(&mut v, Standard::Iec, PhaseSystem::Dc);
        assert_eq!(v.into_errors().len(), 2);
    }

    #[test]
    fn test_voltage_outside_profile() {
        let mut v = Validator::new();
        check_voltage(&mut v, "voltage", ApplicationType::Automotive, 12.0);
        assert!(v.is_empty());
        check_voltage(&mut v, "voltage", ApplicationType::Automotive, 240.0);
        check_voltage(&mut v, "voltage", ApplicationType::Residential, -1.0);
        let errors = v.into_errors();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].reason.contains("voltage range"));
    }

    #[test]
    fn test_insulation_default_and_unknown() {
        let nec = catalog_for(Standard::Nec);
        let mut v = Validator::new();
        let default = resolve_insulation(&mut v, nec, "insulation", None).map(|i| i.code.clone());
        assert_eq!(default.as_deref(), Some(nec.default_insulation));
        assert!(resolve_insulation(&mut v, nec, "insulation", Some("thhn")).is_some());
        assert!(resolve_insulation(&mut v, nec, "insulation", Some("PVC")).is_none());
        assert_eq!(v.into_errors().len(), 1);
    }

    #[test]
    fn test_engine_binds_catalog() {
        let engine = SizingEngine::new(Standard::Bs7671, EngineSettings::default());
        assert_eq!(engine.standard(), Standard::Bs7671);
        assert!(engine.catalog().conductor("2.5 mm²").is_some());
    }
}
