//! # Protective Device Sizing
//!
//! Picks a breaker or fuse rating for a load.
//!
//! ## Method
//!
//! 1. Load current: given directly, or from power as
//!    `I = P / (V × η × cosφ)`, further divided by √3 for three-phase.
//! 2. Adjusted current: the load current run through the device factor
//!    chain (safety factor, temperature derating, environment, addenda).
//! 3. Automotive, marine and LED requests with a voltage go through the
//!    blade-fuse classifier (micro ≤ 15 A, regular ≤ 40 A, maxi ≤ 120 A).
//!    Above 120 A the request fails with `ExceedsFuseRange`. When no blade
//!    fuse is rated for the voltage, the full ladder is used instead.
//! 4. The adjusted current is rounded up to the next rating on the
//!    ladder. Nothing on the ladder at or above it is `NoSuitableDevice`.
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::application::ApplicationType;
//! use sizing_core::calculations::device::{calculate, DeviceSizingInput, LoadSpec};
//! use sizing_core::catalog::{catalog_for, FuseType};
//! use sizing_core::settings::EngineSettings;
//! use sizing_core::standards::Standard;
//!
//! let mut input = DeviceSizingInput::new(LoadSpec::current(20.0), ApplicationType::Automotive);
//! input.voltage = Some(12.0);
//! let result = calculate(catalog_for(Standard::DcAutomotive), &EngineSettings::default(), &input).unwrap();
//!
//! assert_eq!(result.device.rating, 25.0);
//! assert_eq!(result.fuse_type, Some(FuseType::Regular));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    check_ambient, check_application, check_phase, check_power_factor, check_size, check_voltage,
    default_phase, CalculationMetadata,
};
use crate::application::{ApplicationType, DutyCycle};
use crate::catalog::{DeviceFamily, FuseType, ProtectiveDeviceSpec, StandardCatalog};
use crate::circuit::PhaseSystem;
use crate::corrections::{Environment, FactorChain};
use crate::errors::{CalcError, CalcResult, Validator};
use crate::settings::EngineSettings;
use crate::standards::Standard;

/// Rating comparisons tolerate float noise from the factor chain
const RATING_EPSILON: f64 = 1e-9;

/// What the device protects: a known current or a power draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoadSpec {
    Current {
        amps: f64,
    },
    Power {
        watts: f64,
        /// Load efficiency (0, 1]; the application default when omitted
        #[serde(default)]
        efficiency: Option<f64>,
        #[serde(default)]
        power_factor: Option<f64>,
    },
}

impl LoadSpec {
    pub fn current(amps: f64) -> Self {
        LoadSpec::Current { amps }
    }

    pub fn power(watts: f64) -> Self {
        LoadSpec::Power {
            watts,
            efficiency: None,
            power_factor: None,
        }
    }
}

/// Input parameters for protective device sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "load": { "type": "power", "watts": 24000.0, "power_factor": 0.9 },
///   "voltage": 480.0,
///   "application": "commercial",
///   "phase": "three_phase",
///   "ambient_c": 40.0,
///   "wire_size": "8"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSizingInput {
    pub load: LoadSpec,

    /// System voltage (V). Required for power loads and for the
    /// blade-fuse classifier.
    #[serde(default)]
    pub voltage: Option<f64>,

    pub application: ApplicationType,

    #[serde(default)]
    pub duty_cycle: DutyCycle,

    #[serde(default)]
    pub phase: Option<PhaseSystem>,

    #[serde(default)]
    pub ambient_c: Option<f64>,

    #[serde(default)]
    pub environment: Environment,

    /// Conductor to cross-check against the selected rating
    #[serde(default)]
    pub wire_size: Option<String>,

    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl DeviceSizingInput {
    pub fn new(load: LoadSpec, application: ApplicationType) -> Self {
        DeviceSizingInput {
            load,
            voltage: None,
            application,
            duty_cycle: DutyCycle::Continuous,
            phase: None,
            ambient_c: None,
            environment: Environment::Indoor,
            wire_size: None,
            evaluated_at: None,
        }
    }

    pub fn phase_for(&self, standard: Standard) -> PhaseSystem {
        self.phase.unwrap_or_else(|| default_phase(standard))
    }

    pub(crate) fn checks(&self, standard: Standard) -> DeviceChecks<'_> {
        DeviceChecks {
            load: Some(&self.load),
            voltage: self.voltage,
            application: Some(self.application),
            phase: Some(self.phase_for(standard)),
            ambient_c: self.ambient_c,
            wire_size: self.wire_size.as_deref(),
        }
    }

    pub fn validate(&self, catalog: &StandardCatalog) -> CalcResult<()> {
        let mut v = Validator::new();
        self.checks(catalog.standard).run(catalog, &mut v);
        v.finish()
    }
}

/// Request fields checked against a catalog. `load` is `None` when the
/// request described it ambiguously; enumerations are `None` when they
/// failed to parse.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DeviceChecks<'a> {
    pub load: Option<&'a LoadSpec>,
    pub voltage: Option<f64>,
    pub application: Option<ApplicationType>,
    pub phase: Option<PhaseSystem>,
    pub ambient_c: Option<f64>,
    pub wire_size: Option<&'a str>,
}

impl DeviceChecks<'_> {
    pub(crate) fn run(&self, catalog: &StandardCatalog, v: &mut Validator) {
        match self.load {
            Some(LoadSpec::Current { amps }) => v.positive("load.amps", *amps),
            Some(LoadSpec::Power {
                watts,
                efficiency,
                power_factor,
            }) => {
                v.positive("load.watts", *watts);
                if let Some(eff) = efficiency {
                    if !(*eff > 0.0 && *eff <= 1.0) {
                        v.push("load.efficiency", eff.to_string(), "Must be greater than 0 and at most 1");
                    }
                }
                check_power_factor(v, *power_factor);
                if self.voltage.is_none() {
                    v.push("voltage", "null", "Required for a power load");
                }
            }
            None => {}
        }
        if let Some(voltage) = self.voltage {
            match self.application {
                Some(application) => check_voltage(v, "voltage", application, voltage),
                None => v.positive("voltage", voltage),
            }
        }
        if let Some(application) = self.application {
            check_application(v, catalog, application);
        }
        if let Some(phase) = self.phase {
            check_phase(v, catalog.standard, phase);
        }
        if let Some(ambient) = self.ambient_c {
            check_ambient(v, ambient);
        }
        if let Some(size) = self.wire_size {
            check_size(v, catalog, "wire_size", size);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCompliance {
    /// All other flags hold
    pub standard_compliant: bool,
    /// Device is listed for the request's application
    pub application_compliant: bool,
    /// Ambient inside the device's rated range and the application's
    /// operating range
    pub temperature_compliant: bool,
    /// Rating within the simplified ampacity of `wire_size`; absent when
    /// no wire was given
    pub wire_compatible: Option<bool>,
}

/// Protective device sizing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSizingResult {
    pub device: ProtectiveDeviceSpec,
    /// Current before the factor chain (A)
    pub load_current: f64,
    /// Current after the factor chain (A)
    pub adjusted_current: f64,
    /// Blade-fuse class when the classifier was used
    pub fuse_type: Option<FuseType>,
    pub factor_chain: FactorChain,
    pub net_factor: f64,
    pub compliance: DeviceCompliance,
    /// Same rating in other form factors
    pub alternatives: Vec<ProtectiveDeviceSpec>,
    pub calculation_metadata: CalculationMetadata,
}

/// Size a breaker or fuse.
pub fn calculate(
    catalog: &StandardCatalog,
    settings: &EngineSettings,
    input: &DeviceSizingInput,
) -> CalcResult<DeviceSizingResult> {
    input.validate(catalog)?;
    calculate_validated(catalog, settings, input)
}

pub(crate) fn calculate_validated(
    catalog: &StandardCatalog,
    settings: &EngineSettings,
    input: &DeviceSizingInput,
) -> CalcResult<DeviceSizingResult> {
    let application = input.application;
    let phase = input.phase_for(catalog.standard);
    let ambient_c = input.ambient_c.unwrap_or(settings.default_ambient_c);
    let load_current = load_current(input, phase, settings)?;

    let chain = catalog
        .corrections
        .device_chain(application, input.duty_cycle, ambient_c, input.environment);
    let adjusted_current = chain.apply(load_current);

    let classified = match (application.uses_fuse_classifier(), input.voltage) {
        (true, Some(voltage)) if !blade_fuses_available(catalog, application, voltage) => {
            tracing::warn!(
                standard = catalog.standard.id(),
                application = application.id(),
                voltage,
                "no blade fuse is rated for this voltage; sizing on the full ladder"
            );
            None
        }
        (true, Some(_)) => Some(FuseType::classify(adjusted_current).ok_or(
            CalcError::ExceedsFuseRange {
                adjusted_current,
                max_fuse_rating: FuseType::MAXI_MAX,
            },
        )?),
        _ => None,
    };

    let ladder = match classified {
        Some(fuse_type) => catalog.fuse_ladder(application, input.voltage, fuse_type),
        None => catalog.rating_ladder(application, input.voltage),
    };
    let no_device = || CalcError::NoSuitableDevice {
        standard: catalog.standard.id().to_string(),
        application: application.id().to_string(),
        adjusted_current,
    };
    let rating = ladder
        .iter()
        .copied()
        .find(|r| *r >= adjusted_current - RATING_EPSILON)
        .ok_or_else(no_device)?;

    let candidates: Vec<&DeviceFamily> = catalog
        .families_for(application, input.voltage)
        .filter(|f| classified.map_or(true, |t| f.fuse_type == Some(t)))
        .filter(|f| f.has_rating(rating))
        .collect();
    let primary = preferred_family(&candidates, application).ok_or_else(no_device)?;

    let mut alternatives: Vec<ProtectiveDeviceSpec> = Vec::new();
    for family in &candidates {
        let taken = family.form_factor == primary.form_factor
            || alternatives.iter().any(|a| a.form_factor == family.form_factor);
        if !taken {
            alternatives.push(family.spec_at(catalog.standard, rating));
        }
    }

    let device = primary.spec_at(catalog.standard, rating);
    let compliance = compliance(catalog, input, &device, ambient_c);

    let mut metadata = CalculationMetadata::new(catalog.standard, input.evaluated_at);
    metadata.application = Some(application);
    metadata.ambient_c = Some(ambient_c);
    metadata.environment = Some(input.environment);
    for reference in chain.references() {
        metadata.cite(reference);
    }
    metadata.cite(catalog.references.devices);
    metadata.cite(device.reference.as_str());
    if compliance.wire_compatible.is_some() {
        metadata.cite(catalog.references.ampacity);
    }
    metadata.calculation_method = format!(
        "{} → {:.0} A {}",
        chain.describe(load_current, "A"),
        rating,
        device.name
    );

    tracing::debug!(
        standard = catalog.standard.id(),
        application = application.id(),
        load_current,
        adjusted_current,
        rating,
        family = %device.name,
        "protective device selected"
    );

    Ok(DeviceSizingResult {
        device,
        load_current,
        adjusted_current,
        fuse_type: classified,
        net_factor: chain.net_factor(),
        factor_chain: chain,
        compliance,
        alternatives,
        calculation_metadata: metadata,
    })
}

fn load_current(input: &DeviceSizingInput, phase: PhaseSystem, settings: &EngineSettings) -> CalcResult<f64> {
    match &input.load {
        LoadSpec::Current { amps } => Ok(*amps),
        LoadSpec::Power {
            watts,
            efficiency,
            power_factor,
        } => {
            let voltage = input
                .voltage
                .ok_or_else(|| CalcError::invalid_field("voltage", "null", "Required for a power load"))?;
            let efficiency = efficiency.unwrap_or(input.application.profile().default_efficiency);
            let power_factor = if phase.is_ac() {
                power_factor.unwrap_or(settings.default_power_factor)
            } else {
                1.0
            };
            let current = watts / (voltage * efficiency * power_factor);
            Ok(match phase {
                PhaseSystem::ThreePhase => current / 3f64.sqrt(),
                _ => current,
            })
        }
    }
}

fn blade_fuses_available(catalog: &StandardCatalog, application: ApplicationType, voltage: f64) -> bool {
    catalog
        .families_for(application, Some(voltage))
        .any(|family| family.fuse_type.is_some())
}

/// Battery loads prefer thermal-runaway protection; industrial and solar
/// loads prefer industrial-duty devices. Otherwise catalog order wins.
fn preferred_family<'c>(candidates: &[&'c DeviceFamily], application: ApplicationType) -> Option<&'c DeviceFamily> {
    let preferred = candidates.iter().find(|f| match application {
        ApplicationType::Battery => f.thermal_runaway_protected,
        ApplicationType::Industrial | ApplicationType::Solar => f.industrial_duty,
        _ => false,
    });
    preferred.or_else(|| candidates.first()).copied()
}

fn compliance(
    catalog: &StandardCatalog,
    input: &DeviceSizingInput,
    device: &ProtectiveDeviceSpec,
    ambient_c: f64,
) -> DeviceCompliance {
    let application_compliant = device.applications.contains(&input.application);
    let temperature_compliant =
        device.rated_for_ambient(ambient_c) && input.application.profile().temperature_in_range(ambient_c);
    let wire_compatible = input
        .wire_size
        .as_deref()
        .and_then(|raw| catalog.normalize_size(raw).ok())
        .and_then(|size| catalog.wire_ampacity_map(&size))
        .map(|ampacity| device.rating <= ampacity + RATING_EPSILON);

    DeviceCompliance {
        standard_compliant: application_compliant
            && temperature_compliant
            && wire_compatible.unwrap_or(true),
        application_compliant,
        temperature_compliant,
        wire_compatible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{catalog_for, DeviceKind};

    fn size(standard: Standard, input: &DeviceSizingInput) -> CalcResult<DeviceSizingResult> {
        calculate(catalog_for(standard), &EngineSettings::default(), input)
    }

    fn at_voltage(load: LoadSpec, application: ApplicationType, voltage: f64) -> DeviceSizingInput {
        let mut input = DeviceSizingInput::new(load, application);
        input.voltage = Some(voltage);
        input
    }

    #[test]
    fn test_automotive_regular_blade() {
        let input = at_voltage(LoadSpec::current(20.0), ApplicationType::Automotive, 12.0);
        let result = size(Standard::DcAutomotive, &input).unwrap();
        assert!((result.adjusted_current - 25.0).abs() < 1e-9);
        assert_eq!(result.device.rating, 25.0);
        assert_eq!(result.fuse_type, Some(FuseType::Regular));
        assert_eq!(result.device.form_factor, "blade_ato");
        assert_eq!(result.alternatives.len(), 1);
        assert_eq!(result.alternatives[0].form_factor, "blade_atm");
        assert!(result.compliance.standard_compliant);
        assert_eq!(result.compliance.wire_compatible, None);
    }

    #[test]
    fn test_micro_fuse_exact_rating() {
        // 8 × 1.25 = 10 A sits exactly on the ladder
        let input = at_voltage(LoadSpec::current(8.0), ApplicationType::Automotive, 12.0);
        let result = size(Standard::DcAutomotive, &input).unwrap();
        assert_eq!(result.fuse_type, Some(FuseType::Micro));
        assert_eq!(result.device.rating, 10.0);
    }

    #[test]
    fn test_exceeds_fuse_range() {
        let input = at_voltage(LoadSpec::current(160.0), ApplicationType::Automotive, 12.0);
        let err = size(Standard::DcAutomotive, &input).unwrap_err();
        assert_eq!(err.error_code(), "EXCEEDS_FUSE_RANGE");
        match err {
            CalcError::ExceedsFuseRange {
                adjusted_current,
                max_fuse_rating,
            } => {
                assert!((adjusted_current - 200.0).abs() < 1e-9);
                assert_eq!(max_fuse_rating, 120.0);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_48v_automotive_skips_blade_fuses() {
        // Blade fuses stop at 32 V; the surface-mount breaker is rated to 48 V
        let input = at_voltage(LoadSpec::current(20.0), ApplicationType::Automotive, 48.0);
        let result = size(Standard::DcAutomotive, &input).unwrap();
        assert_eq!(result.fuse_type, None);
        assert_eq!(result.device.rating, 25.0);
        assert_eq!(result.device.form_factor, "surface_breaker");
        assert!(result.compliance.standard_compliant);
    }

    #[test]
    fn test_automotive_without_voltage_uses_ladder() {
        let input = DeviceSizingInput::new(LoadSpec::current(160.0), ApplicationType::Automotive);
        let result = size(Standard::DcAutomotive, &input).unwrap();
        assert_eq!(result.fuse_type, None);
        assert_eq!(result.device.rating, 200.0);
        assert_eq!(result.device.form_factor, "anl");
        assert_eq!(result.alternatives[0].form_factor, "mrbf");
    }

    #[test]
    fn test_marine_environment_factor() {
        let mut input = at_voltage(LoadSpec::current(10.0), ApplicationType::Marine, 12.0);
        input.environment = Environment::Marine;
        let result = size(Standard::DcMarine, &input).unwrap();
        // 10 × 1.25 × 1.1 = 13.75 A
        assert!((result.adjusted_current - 13.75).abs() < 1e-9);
        assert_eq!(result.fuse_type, Some(FuseType::Micro));
        assert_eq!(result.device.rating, 15.0);
        assert_eq!(result.factor_chain.steps.len(), 2);
    }

    #[test]
    fn test_residential_breaker_with_derating() {
        let mut input = at_voltage(LoadSpec::current(16.0), ApplicationType::Residential, 240.0);
        let result = size(Standard::Nec, &input).unwrap();
        assert_eq!(result.device.rating, 20.0);
        assert_eq!(result.device.kind, DeviceKind::CircuitBreaker);

        // 16 × 1.25 ÷ 0.88 = 22.7 A
        input.ambient_c = Some(40.0);
        let hot = size(Standard::Nec, &input).unwrap();
        assert!((hot.adjusted_current - 20.0 / 0.88).abs() < 1e-9);
        assert_eq!(hot.device.rating, 25.0);
        assert!(hot.calculation_metadata.calculation_method.contains("÷ 0.880"));
    }

    #[test]
    fn test_industrial_prefers_industrial_duty() {
        let input = at_voltage(LoadSpec::current(100.0), ApplicationType::Industrial, 480.0);
        let result = size(Standard::Nec, &input).unwrap();
        assert_eq!(result.device.rating, 125.0);
        assert_eq!(result.device.form_factor, "mccb");
        let forms: Vec<&str> = result.alternatives.iter().map(|a| a.form_factor.as_str()).collect();
        assert_eq!(forms, vec!["bolt_on", "class_j", "class_rk5"]);
    }

    #[test]
    fn test_battery_prefers_thermal_runaway() {
        // 80 × 1.25 × 1.2 = 120 A → 125 A
        let input = at_voltage(LoadSpec::current(80.0), ApplicationType::Battery, 48.0);
        let result = size(Standard::DcSolar, &input).unwrap();
        assert_eq!(result.device.rating, 125.0);
        assert!(result.device.thermal_runaway_protected);
        assert_eq!(result.device.form_factor, "class_t");
    }

    #[test]
    fn test_solar_short_circuit_multiplier() {
        let input = at_voltage(LoadSpec::current(20.0), ApplicationType::Solar, 600.0);
        let result = size(Standard::DcSolar, &input).unwrap();
        assert!((result.adjusted_current - 31.25).abs() < 1e-9);
        assert_eq!(result.device.rating, 32.0);
        assert_eq!(result.device.form_factor, "gpv_10x38");
        assert!(result
            .calculation_metadata
            .sections_applied
            .iter()
            .any(|s| s == "NEC 690.8(A)(1)"));
    }

    #[test]
    fn test_power_load_single_phase() {
        let input = at_voltage(LoadSpec::power(2400.0), ApplicationType::Residential, 120.0);
        let result = size(Standard::Nec, &input).unwrap();
        assert!((result.load_current - 20.0).abs() < 1e-9);
        assert_eq!(result.device.rating, 25.0);
    }

    #[test]
    fn test_power_load_three_phase() {
        let mut input = at_voltage(
            LoadSpec::Power {
                watts: 24000.0,
                efficiency: None,
                power_factor: Some(0.9),
            },
            ApplicationType::Commercial,
            480.0,
        );
        input.phase = Some(PhaseSystem::ThreePhase);
        let result = size(Standard::Nec, &input).unwrap();
        let expected = 24000.0 / (3f64.sqrt() * 480.0 * 0.9);
        assert!((result.load_current - expected).abs() < 1e-9);
        assert_eq!(result.device.rating, 45.0);
    }

    #[test]
    fn test_wire_compatibility() {
        let mut input = at_voltage(LoadSpec::current(16.0), ApplicationType::Residential, 240.0);
        input.wire_size = Some("12".to_string());
        let ok = size(Standard::Nec, &input).unwrap();
        assert_eq!(ok.compliance.wire_compatible, Some(true));
        assert!(ok.compliance.standard_compliant);

        input.wire_size = Some("14 AWG".to_string());
        let undersized = size(Standard::Nec, &input).unwrap();
        assert_eq!(undersized.compliance.wire_compatible, Some(false));
        assert!(!undersized.compliance.standard_compliant);
    }

    #[test]
    fn test_hot_ambient_outside_device_range() {
        let mut input = at_voltage(LoadSpec::current(16.0), ApplicationType::Residential, 240.0);
        input.ambient_c = Some(65.0);
        let result = size(Standard::Nec, &input).unwrap();
        assert!(!result.compliance.temperature_compliant);
        assert!(!result.compliance.standard_compliant);
    }

    #[test]
    fn test_ambient_outside_application_range() {
        // Every NEC device is rated to at least 60 °C; residential stops at 50 °C
        let mut input = at_voltage(LoadSpec::current(16.0), ApplicationType::Residential, 240.0);
        input.ambient_c = Some(55.0);
        let residential = size(Standard::Nec, &input).unwrap();
        assert!(!residential.compliance.temperature_compliant);
        assert!(residential.compliance.application_compliant);

        let mut input = at_voltage(LoadSpec::current(16.0), ApplicationType::Industrial, 480.0);
        input.ambient_c = Some(55.0);
        let industrial = size(Standard::Nec, &input).unwrap();
        assert!(industrial.compliance.temperature_compliant);
    }

    #[test]
    fn test_no_suitable_device() {
        let input = at_voltage(LoadSpec::current(300.0), ApplicationType::Residential, 240.0);
        let err = size(Standard::Nec, &input).unwrap_err();
        assert_eq!(err.error_code(), "NO_SUITABLE_DEVICE");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_validation_batches_errors() {
        let mut input = DeviceSizingInput::new(LoadSpec::power(-10.0), ApplicationType::Residential);
        input.phase = Some(PhaseSystem::Dc);
        input.wire_size = Some("banana".to_string());
        let err = input.validate(catalog_for(Standard::Nec)).unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["load.watts", "voltage", "phase", "wire_size"]);
    }

    #[test]
    fn test_input_from_json() {
        let json = r#"{
            "load": { "type": "current", "amps": 20.0 },
            "voltage": 12.0,
            "application": "automotive",
            "environment": "automotive"
        }"#;
        let input: DeviceSizingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.load, LoadSpec::current(20.0));
        assert_eq!(input.environment, Environment::Automotive);
        let result = size(Standard::DcAutomotive, &input).unwrap();
        // 20 × 1.25 × 1.1 = 27.5 A
        assert_eq!(result.device.rating, 30.0);
    }
}
