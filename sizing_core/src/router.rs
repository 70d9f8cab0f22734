//! # Standards Router
//!
//! Entry point for untyped requests. A request names a standard and a
//! calculation kind and carries the kind's parameters as plain JSON
//! values. The router:
//!
//! 1. resolves the standard (`UnsupportedStandard` when unknown),
//! 2. parses every enumerated field and checks the request against the
//!    standard's catalog, collecting all violations into one `Validation`
//!    error (a check that needs a field which failed to parse is skipped),
//! 3. dispatches the typed input to the standard's engine and returns the
//!    engine's result unchanged.
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::router::{CalculationResult, Router};
//! use sizing_core::settings::EngineSettings;
//!
//! let router = Router::new(EngineSettings::default());
//! let result = router
//!     .route_json(r#"{
//!         "standard": "dc_automotive",
//!         "kind": "device_sizing",
//!         "current": 20.0,
//!         "voltage": 12.0,
//!         "application": "automotive"
//!     }"#)
//!     .unwrap();
//!
//! match result {
//!     CalculationResult::DeviceSizing(device) => assert_eq!(device.device.rating, 25.0),
//!     _ => unreachable!(),
//! }
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationType, DutyCycle};
use crate::calculations::conductor::{self, ConductorChecks};
use crate::calculations::conduit::{self, ConduitChecks};
use crate::calculations::device::{self, DeviceChecks};
use crate::calculations::{
    default_phase, ConductorSizingInput, ConductorSizingResult, ConduitFillInput, ConduitFillResult,
    DeviceSizingInput, DeviceSizingResult, LoadSpec, SizingEngine, WireEntry,
};
use crate::catalog::{ConduitType, StandardCatalog};
use crate::circuit::{ConductorMaterial, PhaseSystem};
use crate::corrections::{Environment, InstallationMethod};
use crate::errors::{CalcError, CalcResult, Validator};
use crate::settings::EngineSettings;
use crate::standards::Standard;
use crate::units::LengthUnit;

/// A routed request: standard identifier plus one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub standard: String,
    #[serde(flatten)]
    pub calculation: RawCalculation,
}

/// Calculation kind with its raw parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawCalculation {
    ConductorSizing(RawConductorRequest),
    ConduitFill(RawConduitRequest),
    DeviceSizing(RawDeviceRequest),
}

impl RawCalculation {
    pub fn kind(&self) -> &'static str {
        match self {
            RawCalculation::ConductorSizing(_) => "conductor_sizing",
            RawCalculation::ConduitFill(_) => "conduit_fill",
            RawCalculation::DeviceSizing(_) => "device_sizing",
        }
    }
}

/// Result of a routed calculation, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculationResult {
    ConductorSizing(ConductorSizingResult),
    ConduitFill(ConduitFillResult),
    DeviceSizing(DeviceSizingResult),
}

impl CalculationResult {
    /// Overall compliance of the selection
    pub fn is_compliant(&self) -> bool {
        match self {
            CalculationResult::ConductorSizing(r) => r.compliance.standard_compliant,
            CalculationResult::ConduitFill(r) => r.compliance.standard_compliant,
            CalculationResult::DeviceSizing(r) => r.compliance.standard_compliant,
        }
    }
}

/// Parse an optional enumerated field; absent stays `None`
fn parse_opt<T>(
    v: &mut Validator,
    field: &str,
    raw: Option<&str>,
    parse: fn(&str) -> Result<T, String>,
) -> Option<Option<T>> {
    match raw {
        None => Some(None),
        Some(raw) => v.parse(field, raw, parse(raw)).map(Some),
    }
}

/// Parse a required enumerated field
fn parse_required<T>(
    v: &mut Validator,
    field: &str,
    raw: Option<&str>,
    parse: fn(&str) -> Result<T, String>,
) -> Option<T> {
    match raw {
        None => {
            v.push(field, "null", "Field is required");
            None
        }
        Some(raw) => v.parse(field, raw, parse(raw)),
    }
}

// ============================================================================
// Raw requests
// ============================================================================

/// Conductor sizing parameters as received.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConductorRequest {
    pub current: Option<f64>,
    pub length: Option<f64>,
    pub length_unit: Option<String>,
    pub voltage: Option<f64>,
    pub material: Option<String>,
    pub application: Option<String>,
    pub duty_cycle: Option<String>,
    pub phase: Option<String>,
    pub power_factor: Option<f64>,
    pub ambient_c: Option<f64>,
    pub installation_method: Option<String>,
    pub insulation: Option<String>,
    pub conductor_count: Option<u32>,
    pub termination_rating_c: Option<u16>,
    pub critical: bool,
    pub voltage_drop_limit_pct: Option<f64>,
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl RawConductorRequest {
    fn parse(&self, catalog: &StandardCatalog, v: &mut Validator) -> Option<ConductorSizingInput> {
        let current = v.required("current", self.current);
        let length = v.required("length", self.length);
        let voltage = v.required("voltage", self.voltage);
        let application = parse_required(v, "application", self.application.as_deref(), ApplicationType::from_str_flexible);
        let length_unit = parse_opt(v, "length_unit", self.length_unit.as_deref(), LengthUnit::from_str_flexible);
        let material = parse_opt(v, "material", self.material.as_deref(), ConductorMaterial::from_str_flexible);
        let duty_cycle = parse_opt(v, "duty_cycle", self.duty_cycle.as_deref(), DutyCycle::from_str_flexible);
        let phase = parse_opt(v, "phase", self.phase.as_deref(), PhaseSystem::from_str_flexible);
        let installation_method = parse_opt(
            v,
            "installation_method",
            self.installation_method.as_deref(),
            InstallationMethod::from_str_flexible,
        );

        ConductorChecks {
            current,
            length,
            voltage,
            application,
            phase: resolved_phase(catalog.standard, phase),
            power_factor: self.power_factor,
            ambient_c: self.ambient_c,
            insulation: self.insulation.as_deref(),
            conductor_count: self.conductor_count,
            termination_rating_c: self.termination_rating_c,
            voltage_drop_limit_pct: self.voltage_drop_limit_pct,
        }
        .run(catalog, v);

        Some(ConductorSizingInput {
            current: current?,
            length: length?,
            length_unit: length_unit?,
            voltage: voltage?,
            material: material?.unwrap_or_default(),
            application: application?,
            duty_cycle: duty_cycle?.unwrap_or_default(),
            phase: phase?,
            power_factor: self.power_factor,
            ambient_c: self.ambient_c,
            installation_method: installation_method?,
            insulation: self.insulation.clone(),
            conductor_count: self.conductor_count,
            termination_rating_c: self.termination_rating_c,
            critical: self.critical,
            voltage_drop_limit_pct: self.voltage_drop_limit_pct,
            evaluated_at: self.evaluated_at,
        })
    }
}

/// Conduit fill parameters as received.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConduitRequest {
    pub conduit_type: Option<String>,
    pub wires: Vec<WireEntry>,
    pub wire_count_override: Option<u32>,
    pub future_fill_reserve_pct: Option<f64>,
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl RawConduitRequest {
    fn parse(&self, catalog: &StandardCatalog, v: &mut Validator) -> Option<ConduitFillInput> {
        let conduit_type = parse_required(v, "conduit_type", self.conduit_type.as_deref(), ConduitType::from_str_flexible);

        ConduitChecks {
            conduit_type,
            wires: &self.wires,
            wire_count_override: self.wire_count_override,
            future_fill_reserve_pct: self.future_fill_reserve_pct,
        }
        .run(catalog, v);

        Some(ConduitFillInput {
            conduit_type: conduit_type?,
            wires: self.wires.clone(),
            wire_count_override: self.wire_count_override,
            future_fill_reserve_pct: self.future_fill_reserve_pct,
            evaluated_at: self.evaluated_at,
        })
    }
}

/// Device sizing parameters as received. Exactly one of `current` (A)
/// and `power` (W) describes the load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawDeviceRequest {
    pub current: Option<f64>,
    pub power: Option<f64>,
    pub efficiency: Option<f64>,
    pub power_factor: Option<f64>,
    pub voltage: Option<f64>,
    pub application: Option<String>,
    pub duty_cycle: Option<String>,
    pub phase: Option<String>,
    pub ambient_c: Option<f64>,
    pub environment: Option<String>,
    pub wire_size: Option<String>,
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl RawDeviceRequest {
    fn parse(&self, catalog: &StandardCatalog, v: &mut Validator) -> Option<DeviceSizingInput> {
        let load = match (self.current, self.power) {
            (Some(amps), None) => Some(LoadSpec::current(amps)),
            (None, Some(watts)) => Some(LoadSpec::Power {
                watts,
                efficiency: self.efficiency,
                power_factor: self.power_factor,
            }),
            (Some(_), Some(_)) => {
                v.push("load", "current+power", "Give either current or power, not both");
                None
            }
            (None, None) => {
                v.push("load", "null", "Either current or power is required");
                None
            }
        };
        let application = parse_required(v, "application", self.application.as_deref(), ApplicationType::from_str_flexible);
        let duty_cycle = parse_opt(v, "duty_cycle", self.duty_cycle.as_deref(), DutyCycle::from_str_flexible);
        let phase = parse_opt(v, "phase", self.phase.as_deref(), PhaseSystem::from_str_flexible);
        let environment = parse_opt(v, "environment", self.environment.as_deref(), Environment::from_str_flexible);

        DeviceChecks {
            load: load.as_ref(),
            voltage: self.voltage,
            application,
            phase: resolved_phase(catalog.standard, phase),
            ambient_c: self.ambient_c,
            wire_size: self.wire_size.as_deref(),
        }
        .run(catalog, v);

        Some(DeviceSizingInput {
            load: load?,
            voltage: self.voltage,
            application: application?,
            duty_cycle: duty_cycle?.unwrap_or_default(),
            phase: phase?,
            ambient_c: self.ambient_c,
            environment: environment?.unwrap_or_default(),
            wire_size: self.wire_size.clone(),
            evaluated_at: self.evaluated_at,
        })
    }
}

/// Phase to check: the request's, the standard's default when omitted,
/// `None` when it failed to parse
fn resolved_phase(standard: Standard, phase: Option<Option<PhaseSystem>>) -> Option<PhaseSystem> {
    phase.map(|phase| phase.unwrap_or_else(|| default_phase(standard)))
}

/// Parse and check a raw request into one batch of violations. Checks
/// that depend on a field that failed to parse are skipped; all others
/// still run.
fn typed<T>(
    catalog: &StandardCatalog,
    parse: impl FnOnce(&StandardCatalog, &mut Validator) -> Option<T>,
) -> CalcResult<T> {
    let mut v = Validator::new();
    let input = parse(catalog, &mut v);
    v.finish()?;
    input.ok_or_else(|| CalcError::internal("request parsed with errors but none were recorded"))
}

// ============================================================================
// Router
// ============================================================================

/// Dispatch table from standard to engine.
#[derive(Debug, Clone)]
pub struct Router {
    engines: BTreeMap<Standard, SizingEngine>,
}

impl Router {
    /// One engine per supported standard, all sharing `settings`
    pub fn new(settings: EngineSettings) -> Self {
        let engines = Standard::ALL
            .iter()
            .map(|standard| (*standard, SizingEngine::new(*standard, settings.clone())))
            .collect();
        Router { engines }
    }

    pub fn standards(&self) -> impl Iterator<Item = Standard> + '_ {
        self.engines.keys().copied()
    }

    pub fn engine(&self, standard: Standard) -> Option<&SizingEngine> {
        self.engines.get(&standard)
    }

    fn resolve(&self, standard_id: &str) -> CalcResult<&SizingEngine> {
        Standard::from_str_flexible(standard_id)
            .and_then(|standard| self.engines.get(&standard))
            .ok_or_else(|| CalcError::unsupported_standard(standard_id))
    }

    /// Validate `calculation` against the standard and run it
    pub fn route(&self, standard_id: &str, calculation: &RawCalculation) -> CalcResult<CalculationResult> {
        let engine = self.resolve(standard_id)?;
        let catalog = engine.catalog();
        let settings = engine.settings();
        tracing::debug!(standard = engine.standard().id(), kind = calculation.kind(), "routing calculation");

        match calculation {
            RawCalculation::ConductorSizing(raw) => {
                let input = typed(catalog, |c, v| raw.parse(c, v))?;
                conductor::calculate_validated(catalog, settings, &input).map(CalculationResult::ConductorSizing)
            }
            RawCalculation::ConduitFill(raw) => {
                let input = typed(catalog, |c, v| raw.parse(c, v))?;
                conduit::calculate_validated(catalog, settings, &input).map(CalculationResult::ConduitFill)
            }
            RawCalculation::DeviceSizing(raw) => {
                let input = typed(catalog, |c, v| raw.parse(c, v))?;
                device::calculate_validated(catalog, settings, &input).map(CalculationResult::DeviceSizing)
            }
        }
    }

    pub fn route_request(&self, request: &CalculationRequest) -> CalcResult<CalculationResult> {
        self.route(&request.standard, &request.calculation)
    }

    /// Parse a JSON request and route it
    pub fn route_json(&self, json: &str) -> CalcResult<CalculationResult> {
        let request: CalculationRequest = serde_json::from_str(json)?;
        self.route_request(&request)
    }
}

impl Default for Router {
    fn default() -> Self {
        Router::new(EngineSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(json: &str) -> CalcResult<CalculationResult> {
        Router::default().route_json(json)
    }

    #[test]
    fn test_every_standard_has_an_engine() {
        let router = Router::default();
        assert_eq!(router.standards().count(), Standard::ALL.len());
        assert!(router.engine(Standard::DcTelecom).is_some());
    }

    #[test]
    fn test_unknown_standard() {
        let err = route(r#"{ "standard": "jis", "kind": "conduit_fill", "conduit_type": "emt" }"#).unwrap_err();
        assert_eq!(err, CalcError::unsupported_standard("jis"));
    }

    #[test]
    fn test_conductor_request_dispatch() {
        let result = route(
            r#"{
                "standard": "NEC",
                "kind": "conductor_sizing",
                "current": 16.0,
                "length": 50.0,
                "voltage": 120.0,
                "application": "residential",
                "insulation": "thhn"
            }"#,
        )
        .unwrap();
        match result {
            CalculationResult::ConductorSizing(r) => assert_eq!(r.conductor.size, "14 AWG"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_conduit_request_dispatch() {
        let result = route(
            r#"{
                "standard": "nec",
                "kind": "conduit_fill",
                "conduit_type": "EMT",
                "wires": [{ "size": "12", "insulation": "THHN", "quantity": 3 }]
            }"#,
        )
        .unwrap();
        assert!(result.is_compliant());
        match result {
            CalculationResult::ConduitFill(r) => assert_eq!(r.conduit.size, "1/2"),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_enum_errors_are_batched() {
        let err = route(
            r#"{
                "standard": "iec",
                "kind": "conductor_sizing",
                "current": 20.0,
                "voltage": 230.0,
                "application": "spaceship",
                "material": "gold",
                "installation_method": "B9"
            }"#,
        )
        .unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["length", "application", "material", "installation_method"]);
    }

    #[test]
    fn test_catalog_checks_run_beside_enum_errors() {
        let err = route(
            r#"{
                "standard": "nec",
                "kind": "conductor_sizing",
                "current": 20.0,
                "length": 50.0,
                "voltage": 120.0,
                "application": "spaceship",
                "insulation": "FOO"
            }"#,
        )
        .unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["application", "insulation"]);
    }

    #[test]
    fn test_wire_errors_reported_with_bad_conduit_type() {
        let err = route(
            r#"{
                "standard": "nec",
                "kind": "conduit_fill",
                "conduit_type": "bogus",
                "wires": [{ "size": "banana", "insulation": "FOO", "quantity": 0 }]
            }"#,
        )
        .unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["conduit_type", "wires[0].size", "wires[0].insulation", "wires[0].quantity"]
        );
    }

    #[test]
    fn test_device_checks_skip_only_the_unparsed_phase() {
        let err = route(
            r#"{
                "standard": "nec",
                "kind": "device_sizing",
                "current": 10.0,
                "voltage": 5000.0,
                "application": "residential",
                "phase": "quad",
                "wire_size": "banana"
            }"#,
        )
        .unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["phase", "voltage", "wire_size"]);
    }

    #[test]
    fn test_huge_quantities_are_a_validation_error() {
        let err = route(
            r#"{
                "standard": "nec",
                "kind": "conduit_fill",
                "conduit_type": "emt",
                "wires": [
                    { "size": "12", "insulation": "THHN", "quantity": 4000000000 },
                    { "size": "12", "insulation": "THHN", "quantity": 4000000000 }
                ]
            }"#,
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["wires[0].quantity", "wires[1].quantity"]);
    }

    #[test]
    fn test_catalog_errors_after_parsing() {
        let err = route(
            r#"{
                "standard": "iec",
                "kind": "conductor_sizing",
                "current": 20.0,
                "length": 30.0,
                "voltage": 230.0,
                "application": "automotive",
                "insulation": "THHN"
            }"#,
        )
        .unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"application"));
        assert!(fields.contains(&"insulation"));
    }

    #[test]
    fn test_device_load_must_be_unique() {
        let err = route(
            r#"{ "standard": "nec", "kind": "device_sizing", "current": 10, "power": 1200, "application": "residential" }"#,
        )
        .unwrap_err();
        assert_eq!(err.field_errors()[0].field, "load");
    }

    #[test]
    fn test_device_power_request() {
        let result = route(
            r#"{
                "standard": "nec",
                "kind": "device_sizing",
                "power": 2400,
                "voltage": 120,
                "application": "residential",
                "evaluated_at": "2024-05-01T12:00:00Z"
            }"#,
        )
        .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "device_sizing");
        assert_eq!(json["device"]["rating"], 25.0);
        assert_eq!(json["calculation_metadata"]["timestamp"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_malformed_json() {
        let err = route(r#"{ "standard": "nec", "kind": "teleport" }"#).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_request_round_trip() {
        let request = CalculationRequest {
            standard: "bs7671".to_string(),
            calculation: RawCalculation::ConduitFill(RawConduitRequest {
                conduit_type: Some("pvc_rigid".to_string()),
                wires: vec![WireEntry::new("2.5", "PVC", 4)],
                ..Default::default()
            }),
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: CalculationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
