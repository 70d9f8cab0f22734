//! # Conductor Sizing
//!
//! Selects the smallest conductor whose corrected ampacity carries the
//! load with its safety margin and whose voltage drop stays within the
//! application limit.
//!
//! ## Method
//!
//! 1. Voltage-drop limit: request override, else the application's
//!    normal (or critical) limit.
//! 2. Required ampacity: `I × SF(duty)`.
//! 3. Corrected ampacity per row: `I_table × C_temp × C_group × C_install`,
//!    optionally capped at the termination column. Rows below the
//!    required ampacity are discarded; if none remain the request fails
//!    with `NoAmpacitySolution`.
//! 4. Voltage drop per remaining row:
//!    - DC / single-phase: `Vd = 2·I·R·L / 1000`
//!    - three-phase: `Vd = √3·I·L·(R·cosφ + X·sinφ) / 1000`
//!
//!    with `R` scaled by 1.64 for aluminum.
//! 5. The first row within the limit is selected. When no row meets the
//!    limit the row with the lowest drop is returned with
//!    `voltage_drop_compliant = false`.
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::application::ApplicationType;
//! use sizing_core::calculations::conductor::{calculate, ConductorSizingInput};
//! use sizing_core::catalog::catalog_for;
//! use sizing_core::settings::EngineSettings;
//! use sizing_core::standards::Standard;
//!
//! let input = ConductorSizingInput::new(16.0, 50.0, 120.0, ApplicationType::Residential);
//! let result = calculate(catalog_for(Standard::Nec), &EngineSettings::default(), &input).unwrap();
//!
//! assert_eq!(result.conductor.size, "14 AWG");
//! assert!(result.compliance.standard_compliant);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    check_ambient, check_application, check_phase, check_power_factor, check_voltage, default_phase,
    resolve_insulation, CalculationMetadata,
};
use crate::application::{ApplicationType, DutyCycle};
use crate::catalog::{ConductorSpec, InsulationSystem, StandardCatalog};
use crate::circuit::{ConductorMaterial, PhaseSystem};
use crate::corrections::{CompositeFactor, FactorInputs, InstallationMethod};
use crate::errors::{CalcError, CalcResult, Validator};
use crate::settings::EngineSettings;
use crate::standards::{code_ref, Standard};
use crate::units::{LengthUnit, UNIT_SCALE};

/// Input parameters for conductor sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "current": 32.0,
///   "length": 45.0,
///   "voltage": 400.0,
///   "application": "commercial",
///   "phase": "three_phase",
///   "power_factor": 0.85,
///   "ambient_c": 40.0,
///   "installation_method": "B1",
///   "insulation": "XLPE",
///   "conductor_count": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorSizingInput {
    /// Load current (A)
    pub current: f64,

    /// One-way circuit length, in `length_unit` or the standard's unit
    pub length: f64,

    #[serde(default)]
    pub length_unit: Option<LengthUnit>,

    /// Nominal circuit voltage (V)
    pub voltage: f64,

    #[serde(default)]
    pub material: ConductorMaterial,

    pub application: ApplicationType,

    #[serde(default)]
    pub duty_cycle: DutyCycle,

    /// DC for DC standards, single-phase for AC standards when omitted
    #[serde(default)]
    pub phase: Option<PhaseSystem>,

    /// cos φ for three-phase drop
    #[serde(default)]
    pub power_factor: Option<f64>,

    #[serde(default)]
    pub ambient_c: Option<f64>,

    #[serde(default)]
    pub installation_method: Option<InstallationMethod>,

    /// Insulation code from the standard's vocabulary
    #[serde(default)]
    pub insulation: Option<String>,

    /// Current-carrying conductors (or cables) grouped together
    #[serde(default)]
    pub conductor_count: Option<u32>,

    /// Terminal temperature rating (°C); caps the usable ampacity
    #[serde(default)]
    pub termination_rating_c: Option<u16>,

    /// Use the application's critical voltage-drop limit
    #[serde(default)]
    pub critical: bool,

    #[serde(default)]
    pub voltage_drop_limit_pct: Option<f64>,

    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl ConductorSizingInput {
    /// Minimal request; every optional field takes its default
    pub fn new(current: f64, length: f64, voltage: f64, application: ApplicationType) -> Self {
        ConductorSizingInput {
            current,
            length,
            length_unit: None,
            voltage,
            material: ConductorMaterial::Copper,
            application,
            duty_cycle: DutyCycle::Continuous,
            phase: None,
            power_factor: None,
            ambient_c: None,
            installation_method: None,
            insulation: None,
            conductor_count: None,
            termination_rating_c: None,
            critical: false,
            voltage_drop_limit_pct: None,
            evaluated_at: None,
        }
    }

    pub fn phase_for(&self, standard: Standard) -> PhaseSystem {
        self.phase.unwrap_or_else(|| default_phase(standard))
    }

    pub(crate) fn checks(&self, standard: Standard) -> ConductorChecks<'_> {
        ConductorChecks {
            current: Some(self.current),
            length: Some(self.length),
            voltage: Some(self.voltage),
            application: Some(self.application),
            phase: Some(self.phase_for(standard)),
            power_factor: self.power_factor,
            ambient_c: self.ambient_c,
            insulation: self.insulation.as_deref(),
            conductor_count: self.conductor_count,
            termination_rating_c: self.termination_rating_c,
            voltage_drop_limit_pct: self.voltage_drop_limit_pct,
        }
    }

    /// Validate against a standard's catalog, reporting every violation
    pub fn validate(&self, catalog: &StandardCatalog) -> CalcResult<()> {
        let mut v = Validator::new();
        self.checks(catalog.standard).run(catalog, &mut v);
        v.finish()
    }
}

/// Request fields checked against a catalog. A `None` number was missing
/// and a `None` enumeration failed to parse; both were already reported,
/// so checks that need them are skipped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConductorChecks<'a> {
    pub current: Option<f64>,
    pub length: Option<f64>,
    pub voltage: Option<f64>,
    pub application: Option<ApplicationType>,
    pub phase: Option<PhaseSystem>,
    pub power_factor: Option<f64>,
    pub ambient_c: Option<f64>,
    pub insulation: Option<&'a str>,
    pub conductor_count: Option<u32>,
    pub termination_rating_c: Option<u16>,
    pub voltage_drop_limit_pct: Option<f64>,
}

impl ConductorChecks<'_> {
    pub(crate) fn run(&self, catalog: &StandardCatalog, v: &mut Validator) {
        if let Some(current) = self.current {
            v.positive("current", current);
        }
        if let Some(length) = self.length {
            v.positive("length", length);
        }
        match (self.application, self.voltage) {
            (Some(application), voltage) => {
                check_application(v, catalog, application);
                if let Some(voltage) = voltage {
                    check_voltage(v, "voltage", application, voltage);
                }
            }
            (None, Some(voltage)) => v.positive("voltage", voltage),
            (None, None) => {}
        }
        if let Some(phase) = self.phase {
            check_phase(v, catalog.standard, phase);
        }
        check_power_factor(v, self.power_factor);
        if let Some(ambient) = self.ambient_c {
            check_ambient(v, ambient);
        }
        resolve_insulation(v, catalog, "insulation", self.insulation);
        if self.conductor_count == Some(0) {
            v.push("conductor_count", "0", "Must be at least 1");
        }
        if self.termination_rating_c == Some(0) {
            v.push("termination_rating_c", "0", "Must be a positive temperature");
        }
        if let Some(limit) = self.voltage_drop_limit_pct {
            if !(limit > 0.0 && limit <= 100.0) {
                v.push(
                    "voltage_drop_limit_pct",
                    limit.to_string(),
                    "Must be greater than 0 and at most 100",
                );
            }
        }
    }
}

/// Compliance flags for the selected conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConductorCompliance {
    pub ampacity_compliant: bool,
    pub voltage_drop_compliant: bool,
    /// Ambient inside the insulation's rated range and the application's
    /// operating range
    pub temperature_compliant: bool,
    /// Wet locations require wet-rated insulation
    pub installation_method_valid: bool,
    pub standard_compliant: bool,
}

/// One conductor size evaluated against the request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorCandidate {
    pub size: String,
    pub area_mm2: f64,
    pub table_ampacity: f64,
    pub corrected_ampacity: f64,
    pub voltage_drop_v: f64,
    pub voltage_drop_pct: f64,
    pub power_loss_w: f64,
    pub ampacity_compliant: bool,
    pub voltage_drop_compliant: bool,
    /// Copper area relative to the selected conductor
    pub relative_cost: f64,
}

/// Conductor sizing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductorSizingResult {
    pub conductor: ConductorSpec,
    pub insulation: InsulationSystem,
    pub material: ConductorMaterial,
    pub phase: PhaseSystem,
    /// Length used, in the standard's unit
    pub length: f64,
    pub length_unit: LengthUnit,
    /// Load current × safety factor (A)
    pub required_ampacity: f64,
    pub table_ampacity: f64,
    pub corrected_ampacity: f64,
    pub correction: CompositeFactor,
    pub voltage_drop_v: f64,
    pub voltage_drop_pct: f64,
    pub voltage_drop_limit_pct: f64,
    pub power_loss_w: f64,
    pub efficiency_pct: f64,
    pub compliance: ConductorCompliance,
    /// Next-larger sizes for comparison
    pub alternatives: Vec<ConductorCandidate>,
    pub calculation_metadata: CalculationMetadata,
}

impl ConductorSizingResult {
    pub fn is_compliant(&self) -> bool {
        self.compliance.standard_compliant
    }
}

/// Per-request circuit values shared by every row evaluation
struct Circuit {
    phase: PhaseSystem,
    current: f64,
    voltage: f64,
    length: f64,
    power_factor: f64,
    resistance_multiplier: f64,
}

impl Circuit {
    fn voltage_drop(&self, row: &ConductorSpec) -> f64 {
        let r = row.resistance * self.resistance_multiplier;
        match self.phase {
            PhaseSystem::Dc | PhaseSystem::SinglePhase => {
                2.0 * self.current * r * self.length / UNIT_SCALE
            }
            PhaseSystem::ThreePhase => {
                let sin_phi = (1.0 - self.power_factor * self.power_factor).max(0.0).sqrt();
                3f64.sqrt() * self.current * self.length * (r * self.power_factor + row.reactance * sin_phi)
                    / UNIT_SCALE
            }
        }
    }

    fn power_loss(&self, row: &ConductorSpec) -> f64 {
        let r = row.resistance * self.resistance_multiplier;
        self.current * self.current * r * self.length / UNIT_SCALE * self.phase.loss_multiplier()
    }

    fn percent(&self, volts: f64) -> f64 {
        volts / self.voltage * 100.0
    }
}

/// Ampacity lookup for one row: table column (or intermittent rating),
/// times the composite factor, capped at the termination column
struct AmpacityRule {
    column: usize,
    termination_column: Option<usize>,
    intermittent: bool,
    combined: f64,
}

impl AmpacityRule {
    fn table(&self, row: &ConductorSpec) -> f64 {
        let continuous = row.ampacity.get(self.column).copied().unwrap_or(0.0);
        if self.intermittent {
            row.intermittent_ampacity.unwrap_or(continuous)
        } else {
            continuous
        }
    }

    fn corrected(&self, row: &ConductorSpec) -> f64 {
        let corrected = self.table(row) * self.combined;
        match self.termination_column.and_then(|c| row.ampacity.get(c)) {
            Some(cap) => corrected.min(*cap),
            None => corrected,
        }
    }
}

/// Size a conductor.
pub fn calculate(
    catalog: &StandardCatalog,
    settings: &EngineSettings,
    input: &ConductorSizingInput,
) -> CalcResult<ConductorSizingResult> {
    input.validate(catalog)?;
    calculate_validated(catalog, settings, input)
}

/// Size a conductor for an input that already passed validation.
pub(crate) fn calculate_validated(
    catalog: &StandardCatalog,
    settings: &EngineSettings,
    input: &ConductorSizingInput,
) -> CalcResult<ConductorSizingResult> {
    let standard = catalog.standard;
    let profile = input.application.profile();
    let insulation_code = input.insulation.as_deref().unwrap_or(catalog.default_insulation);
    let insulation = catalog
        .insulation(insulation_code)
        .ok_or_else(|| CalcError::internal(format!("insulation {} vanished from catalog", insulation_code)))?;

    let ambient_c = input.ambient_c.unwrap_or(settings.default_ambient_c);
    let method = input.installation_method.unwrap_or_else(|| catalog.default_installation());
    let length = match input.length_unit {
        Some(unit) => catalog.length_unit.convert(input.length, unit),
        None => input.length,
    };
    let limit_pct = input.voltage_drop_limit_pct.unwrap_or_else(|| {
        profile.voltage_drop_limit(input.critical || settings.use_critical_voltage_drop)
    });

    let correction = catalog.corrections.compose(&FactorInputs {
        ambient_c,
        item_count: input.conductor_count.unwrap_or(1),
        installation_method: method,
        application: input.application,
        duty_cycle: input.duty_cycle,
        rating_class_c: insulation.temperature_rating_c,
    })?;
    let required = input.current * correction.safety_factor;

    let table = &catalog.conductors;
    let rule = AmpacityRule {
        column: table.column_for(insulation.temperature_rating_c),
        termination_column: input.termination_rating_c.map(|t| table.column_for(t)),
        intermittent: input.duty_cycle == DutyCycle::Intermittent,
        combined: correction.combined,
    };
    let circuit = Circuit {
        phase: input.phase_for(standard),
        current: input.current,
        voltage: input.voltage,
        length,
        power_factor: input.power_factor.unwrap_or(settings.default_power_factor),
        resistance_multiplier: input.material.resistance_multiplier(),
    };

    let qualifying: Vec<usize> = table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| rule.corrected(row) >= required)
        .map(|(i, _)| i)
        .collect();

    if qualifying.is_empty() {
        let largest = table
            .rows
            .last()
            .ok_or_else(|| CalcError::internal("empty conductor table"))?;
        return Err(CalcError::NoAmpacitySolution {
            standard: standard.display_name().to_string(),
            required_ampacity: required,
            largest_size: largest.size.clone(),
            largest_corrected_ampacity: rule.corrected(largest),
        });
    }

    let within_limit = qualifying
        .iter()
        .copied()
        .find(|&i| circuit.percent(circuit.voltage_drop(&table.rows[i])) <= limit_pct);

    let selected_index = match within_limit {
        Some(i) => i,
        None => {
            let mut best = qualifying[0];
            for &i in &qualifying[1..] {
                if circuit.voltage_drop(&table.rows[i]) < circuit.voltage_drop(&table.rows[best]) {
                    best = i;
                }
            }
            tracing::warn!(
                standard = standard.id(),
                limit_pct,
                size = %table.rows[best].size,
                voltage_drop_pct = circuit.percent(circuit.voltage_drop(&table.rows[best])),
                "no conductor meets the voltage-drop limit; returning lowest-drop size"
            );
            best
        }
    };

    let selected = &table.rows[selected_index];
    let voltage_drop_v = circuit.voltage_drop(selected);
    let voltage_drop_pct = circuit.percent(voltage_drop_v);
    let corrected_ampacity = rule.corrected(selected);

    let compliance = {
        let ampacity_compliant = corrected_ampacity >= required;
        let voltage_drop_compliant = voltage_drop_pct <= limit_pct;
        let temperature_compliant =
            insulation.rated_for_ambient(ambient_c) && profile.temperature_in_range(ambient_c);
        let installation_method_valid = !method.requires_wet_rating() || insulation.wet_rated;
        ConductorCompliance {
            ampacity_compliant,
            voltage_drop_compliant,
            temperature_compliant,
            installation_method_valid,
            standard_compliant: ampacity_compliant
                && voltage_drop_compliant
                && temperature_compliant
                && installation_method_valid,
        }
    };

    let alternatives: Vec<ConductorCandidate> = table
        .rows
        .iter()
        .skip(selected_index + 1)
        .take(settings.max_alternatives)
        .map(|row| {
            let drop_v = circuit.voltage_drop(row);
            let drop_pct = circuit.percent(drop_v);
            let corrected = rule.corrected(row);
            ConductorCandidate {
                size: row.size.clone(),
                area_mm2: row.area_mm2,
                table_ampacity: rule.table(row),
                corrected_ampacity: corrected,
                voltage_drop_v: drop_v,
                voltage_drop_pct: drop_pct,
                power_loss_w: circuit.power_loss(row),
                ampacity_compliant: corrected >= required,
                voltage_drop_compliant: drop_pct <= limit_pct,
                relative_cost: row.area_mm2 / selected.area_mm2,
            }
        })
        .collect();

    let mut metadata = CalculationMetadata::new(standard, input.evaluated_at);
    metadata.application = Some(input.application);
    metadata.ambient_c = Some(ambient_c);
    metadata.installation_method = Some(method);
    metadata.cite(table.reference.clone());
    for reference in correction.chain.references() {
        metadata.cite(reference);
    }
    if input.termination_rating_c.is_some() {
        metadata.cite(code_ref::NEC_TERMINATIONS);
    }
    metadata.cite(catalog.references.resistance);
    metadata.cite(catalog.references.voltage_drop);
    metadata.calculation_method = format!(
        "{} (required {:.2} A = {:.2} A × {:.2}); Vd = {:.3} V ({:.2}% vs {:.2}% limit, {})",
        correction.chain.describe(rule.table(selected), "A"),
        required,
        input.current,
        correction.safety_factor,
        voltage_drop_v,
        voltage_drop_pct,
        limit_pct,
        circuit.phase,
    );

    tracing::debug!(
        standard = standard.id(),
        size = %selected.size,
        required,
        corrected_ampacity,
        voltage_drop_pct,
        "conductor selected"
    );

    Ok(ConductorSizingResult {
        conductor: selected.clone(),
        insulation: insulation.clone(),
        material: input.material,
        phase: circuit.phase,
        length,
        length_unit: catalog.length_unit,
        required_ampacity: required,
        table_ampacity: rule.table(selected),
        corrected_ampacity,
        power_loss_w: circuit.power_loss(selected),
        efficiency_pct: (input.voltage - voltage_drop_v) / input.voltage * 100.0,
        voltage_drop_v,
        voltage_drop_pct,
        voltage_drop_limit_pct: limit_pct,
        correction,
        compliance,
        alternatives,
        calculation_metadata: metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog_for;

    fn nec() -> &'static StandardCatalog {
        catalog_for(Standard::Nec)
    }

    fn size(catalog: &StandardCatalog, input: &ConductorSizingInput) -> ConductorSizingResult {
        calculate(catalog, &EngineSettings::default(), input).unwrap()
    }

    #[test]
    fn test_branch_circuit_selection() {
        // 16 A continuous -> 20 A required; 14 AWG THHN (25 A) drops 4.19% over 50 ft
        let input = ConductorSizingInput::new(16.0, 50.0, 120.0, ApplicationType::Residential);
        let result = size(nec(), &input);
        assert_eq!(result.conductor.size, "14 AWG");
        assert!((result.required_ampacity - 20.0).abs() < 1e-9);
        assert!((result.voltage_drop_v - 2.0 * 16.0 * 3.14 * 50.0 / 1000.0).abs() < 1e-9);
        assert!(result.compliance.standard_compliant);
        assert_eq!(result.calculation_metadata.sections_applied[0], "NEC Table 310.16");
    }

    #[test]
    fn test_critical_limit_upsizes() {
        let mut input = ConductorSizingInput::new(16.0, 50.0, 120.0, ApplicationType::Residential);
        input.critical = true;
        let result = size(nec(), &input);
        assert_eq!(result.conductor.size, "12 AWG");
        assert_eq!(result.voltage_drop_limit_pct, 3.0);
    }

    #[test]
    fn test_termination_rating_caps_ampacity() {
        let mut input = ConductorSizingInput::new(17.0, 10.0, 120.0, ApplicationType::Residential);
        assert_eq!(size(nec(), &input).conductor.size, "14 AWG");

        input.termination_rating_c = Some(75);
        let result = size(nec(), &input);
        assert_eq!(result.conductor.size, "12 AWG");
        assert!(result.calculation_metadata.sections_applied.iter().any(|s| s == "NEC 110.14(C)"));
    }

    #[test]
    fn test_aluminum_raises_drop() {
        let mut input = ConductorSizingInput::new(40.0, 100.0, 240.0, ApplicationType::Commercial);
        input.voltage_drop_limit_pct = Some(100.0);
        let copper = size(nec(), &input);
        input.material = ConductorMaterial::Aluminum;
        let aluminum = size(nec(), &input);
        assert_eq!(copper.conductor.size, aluminum.conductor.size);
        assert!((aluminum.voltage_drop_v / copper.voltage_drop_v - 1.64).abs() < 1e-9);
    }

    #[test]
    fn test_three_phase_drop_formula() {
        let iec = catalog_for(Standard::Iec);
        let mut input = ConductorSizingInput::new(32.0, 100.0, 400.0, ApplicationType::Commercial);
        input.phase = Some(PhaseSystem::ThreePhase);
        input.power_factor = Some(0.85);
        let result = size(iec, &input);

        let sin_phi = (1.0f64 - 0.85 * 0.85).sqrt();
        let expected = 3f64.sqrt()
            * 32.0
            * 100.0
            * (result.conductor.resistance * 0.85 + result.conductor.reactance * sin_phi)
            / 1000.0;
        assert!((result.voltage_drop_v - expected).abs() < 1e-9);
        let loss = 3.0 * 32.0 * 32.0 * result.conductor.resistance * 100.0 / 1000.0;
        assert!((result.power_loss_w - loss).abs() < 1e-9);
    }

    #[test]
    fn test_unattainable_limit_falls_back() {
        let mut input = ConductorSizingInput::new(20.0, 2000.0, 120.0, ApplicationType::Residential);
        input.voltage_drop_limit_pct = Some(0.1);
        let result = size(nec(), &input);
        assert_eq!(result.conductor.size, "750 kcmil");
        assert!(!result.compliance.voltage_drop_compliant);
        assert!(result.compliance.ampacity_compliant);
        assert!(!result.is_compliant());
        assert!(result.alternatives.is_empty());
    }

    #[test]
    fn test_no_ampacity_solution() {
        let input = ConductorSizingInput::new(600.0, 10.0, 480.0, ApplicationType::Industrial);
        let err = calculate(nec(), &EngineSettings::default(), &input).unwrap_err();
        match err {
            CalcError::NoAmpacitySolution { largest_size, required_ampacity, .. } => {
                assert_eq!(largest_size, "750 kcmil");
                assert!((required_ampacity - 750.0).abs() < 1e-9);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_wet_location_needs_wet_insulation() {
        let mut input = ConductorSizingInput::new(20.0, 30.0, 240.0, ApplicationType::Residential);
        input.installation_method = Some(InstallationMethod::DirectBurial);
        let dry = size(nec(), &input);
        assert!(!dry.compliance.installation_method_valid);
        assert!(!dry.compliance.standard_compliant);

        input.insulation = Some("thwn-2".to_string());
        let wet = size(nec(), &input);
        assert!(wet.compliance.installation_method_valid);
        assert_eq!(wet.insulation.code, "THWN-2");
    }

    #[test]
    fn test_ambient_outside_application_range() {
        // THHN is rated to 90 °C, but residential wiring tops out at 50 °C
        let mut input = ConductorSizingInput::new(20.0, 30.0, 240.0, ApplicationType::Residential);
        input.ambient_c = Some(55.0);
        let hot = size(nec(), &input);
        assert!(hot.compliance.ampacity_compliant);
        assert!(!hot.compliance.temperature_compliant);
        assert!(!hot.compliance.standard_compliant);

        input.application = ApplicationType::Industrial;
        let industrial = size(nec(), &input);
        assert!(industrial.compliance.temperature_compliant);
    }

    #[test]
    fn test_unknown_installation_for_standard() {
        let mut input = ConductorSizingInput::new(20.0, 30.0, 240.0, ApplicationType::Residential);
        input.installation_method = Some(InstallationMethod::MethodB1);
        let err = calculate(nec(), &EngineSettings::default(), &input).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_INSTALLATION_METHOD");
    }

    #[test]
    fn test_length_unit_conversion() {
        let iec = catalog_for(Standard::Iec);
        let mut input = ConductorSizingInput::new(10.0, 328.084, 230.0, ApplicationType::Residential);
        input.length_unit = Some(LengthUnit::Feet);
        let result = size(iec, &input);
        assert_eq!(result.length_unit, LengthUnit::Meters);
        assert!((result.length - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_intermittent_ampacity_for_dc() {
        let automotive = catalog_for(Standard::DcAutomotive);
        let mut input = ConductorSizingInput::new(30.0, 1.0, 12.0, ApplicationType::Automotive);
        assert_eq!(size(automotive, &input).conductor.size, "8 AWG");

        input.duty_cycle = DutyCycle::Intermittent;
        let result = size(automotive, &input);
        assert_eq!(result.conductor.size, "12 AWG");
        assert_eq!(result.phase, PhaseSystem::Dc);
        assert_eq!(result.table_ampacity, 35.0);
    }

    #[test]
    fn test_alternatives_are_larger() {
        let input = ConductorSizingInput::new(16.0, 50.0, 120.0, ApplicationType::Residential);
        let result = size(nec(), &input);
        assert_eq!(result.alternatives.len(), 5);
        assert_eq!(result.alternatives[0].size, "12 AWG");
        for alt in &result.alternatives {
            assert!(alt.relative_cost > 1.0);
            assert!(alt.voltage_drop_v < result.voltage_drop_v);
        }
    }

    #[test]
    fn test_validation_is_batched() {
        let mut input = ConductorSizingInput::new(-1.0, 10.0, 12.0, ApplicationType::Marine);
        input.insulation = Some("FOO".to_string());
        input.phase = Some(PhaseSystem::ThreePhase);
        let err = input.validate(catalog_for(Standard::DcMarine)).unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["current", "phase", "insulation"]);
    }

    #[test]
    fn test_json_roundtrip() {
        let json = r#"{
            "current": 32.0, "length": 45.0, "voltage": 400.0,
            "application": "commercial", "phase": "three_phase",
            "power_factor": 0.85, "installation_method": "B1", "insulation": "XLPE"
        }"#;
        let input: ConductorSizingInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.installation_method, Some(InstallationMethod::MethodB1));
        assert_eq!(input.material, ConductorMaterial::Copper);
        let back: ConductorSizingInput = serde_json::from_str(&serde_json::to_string(&input).unwrap()).unwrap();
        assert_eq!(input, back);
    }
}
