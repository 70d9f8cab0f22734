//! # Correction Factors
//!
//! Derating of conductor ampacity and uprating of protective-device
//! current for adverse conditions.
//!
//! ## Conductor ampacity
//!
//! ```text
//! I_corrected = I_table × C_temp × C_group × C_install
//! ```
//!
//! | Factor    | Source                                   | Lookup rule                         |
//! |-----------|------------------------------------------|-------------------------------------|
//! | C_temp    | Ambient temperature table per rating     | first rung ≥ ambient, else lowest   |
//! | C_group   | Conductor/cable count table              | first key ≥ count, else last key    |
//! | C_install | Installation method (temperature factor) | exact key, else error               |
//!
//! The installation method also carries an environment factor which is
//! reported but not folded into the ampacity multiplier.
//!
//! ## Protective devices
//!
//! Device current is adjusted by an ordered chain of named steps:
//!
//! ```text
//! I_adj = I_load × SF(duty) ÷ C_temp (ambient > baseline) × C_env (harsh) × addenda...
//! ```
//!
//! The chain is kept as a list so the calculation-method text shown to
//! the user is rebuilt from exactly the steps that produced the number.

use serde::{Deserialize, Serialize};

use crate::application::{ApplicationType, DutyCycle};
use crate::errors::{CalcError, CalcResult};
use crate::standards::Standard;

// ============================================================================
// Installation conditions
// ============================================================================

/// How a conductor or cable is installed (shared enumeration).
///
/// Each standard's [`CorrectionRules`] covers a subset of these; using a
/// method the standard has no factors for is an
/// [`CalcError::UnknownInstallationMethod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationMethod {
    /// Raceway or conduit in air
    Conduit,
    CableTray,
    FreeAir,
    /// Directly buried cable (wet location)
    DirectBurial,
    /// Conduit on a sunlit rooftop (wet location, heat gain)
    RooftopConduit,
    /// IEC/BS reference methods
    #[serde(rename = "A1")]
    MethodA1,
    #[serde(rename = "A2")]
    MethodA2,
    #[serde(rename = "B1")]
    MethodB1,
    #[serde(rename = "B2")]
    MethodB2,
    #[serde(rename = "C")]
    MethodC,
    #[serde(rename = "D1")]
    MethodD1,
    #[serde(rename = "D2")]
    MethodD2,
    #[serde(rename = "E")]
    MethodE,
    #[serde(rename = "F")]
    MethodF,
    /// Wiring harness or loom
    Harness,
    /// Inside an engine compartment or engine room
    EngineCompartment,
}

impl InstallationMethod {
    pub const ALL: [InstallationMethod; 16] = [
        InstallationMethod::Conduit,
        InstallationMethod::CableTray,
        InstallationMethod::FreeAir,
        InstallationMethod::DirectBurial,
        InstallationMethod::RooftopConduit,
        InstallationMethod::MethodA1,
        InstallationMethod::MethodA2,
        InstallationMethod::MethodB1,
        InstallationMethod::MethodB2,
        InstallationMethod::MethodC,
        InstallationMethod::MethodD1,
        InstallationMethod::MethodD2,
        InstallationMethod::MethodE,
        InstallationMethod::MethodF,
        InstallationMethod::Harness,
        InstallationMethod::EngineCompartment,
    ];

    pub fn from_str_flexible(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "conduit" | "raceway" => Ok(InstallationMethod::Conduit),
            "cable_tray" | "tray" => Ok(InstallationMethod::CableTray),
            "free_air" | "open_air" | "air" => Ok(InstallationMethod::FreeAir),
            "direct_burial" | "buried" | "underground" => Ok(InstallationMethod::DirectBurial),
            "rooftop_conduit" | "rooftop" => Ok(InstallationMethod::RooftopConduit),
            "a1" | "method_a1" => Ok(InstallationMethod::MethodA1),
            "a2" | "method_a2" => Ok(InstallationMethod::MethodA2),
            "b1" | "method_b1" => Ok(InstallationMethod::MethodB1),
            "b2" | "method_b2" => Ok(InstallationMethod::MethodB2),
            "c" | "method_c" | "clipped_direct" => Ok(InstallationMethod::MethodC),
            "d1" | "method_d1" => Ok(InstallationMethod::MethodD1),
            "d2" | "method_d2" => Ok(InstallationMethod::MethodD2),
            "e" | "method_e" => Ok(InstallationMethod::MethodE),
            "f" | "method_f" => Ok(InstallationMethod::MethodF),
            "harness" | "loom" | "bundle" => Ok(InstallationMethod::Harness),
            "engine_compartment" | "engine_room" | "engine_space" => {
                Ok(InstallationMethod::EngineCompartment)
            }
            other => Err(format!("Unknown installation method '{}'", other)),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            InstallationMethod::Conduit => "Conduit / raceway",
            InstallationMethod::CableTray => "Cable tray",
            InstallationMethod::FreeAir => "Free air",
            InstallationMethod::DirectBurial => "Direct burial",
            InstallationMethod::RooftopConduit => "Rooftop conduit",
            InstallationMethod::MethodA1 => "Method A1 (insulated wall, conduit)",
            InstallationMethod::MethodA2 => "Method A2 (insulated wall, multicore in conduit)",
            InstallationMethod::MethodB1 => "Method B1 (conduit on wall)",
            InstallationMethod::MethodB2 => "Method B2 (multicore in conduit on wall)",
            InstallationMethod::MethodC => "Method C (clipped direct)",
            InstallationMethod::MethodD1 => "Method D1 (ducts in ground)",
            InstallationMethod::MethodD2 => "Method D2 (direct in ground)",
            InstallationMethod::MethodE => "Method E (multicore in free air)",
            InstallationMethod::MethodF => "Method F (single-core touching in free air)",
            InstallationMethod::Harness => "Wiring harness",
            InstallationMethod::EngineCompartment => "Engine compartment",
        }
    }

    /// Methods that place the conductor in a wet location
    pub fn requires_wet_rating(&self) -> bool {
        matches!(
            self,
            InstallationMethod::DirectBurial
                | InstallationMethod::RooftopConduit
                | InstallationMethod::MethodD1
                | InstallationMethod::MethodD2
        )
    }
}

impl std::fmt::Display for InstallationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Operating environment of a protective device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    #[default]
    Indoor,
    Outdoor,
    /// Salt-spray / bilge exposure
    Marine,
    /// Under-hood vibration and heat cycling
    Automotive,
    /// Classified (hazardous) location
    Hazardous,
}

impl Environment {
    pub fn from_str_flexible(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "indoor" | "normal" | "dry" => Ok(Environment::Indoor),
            "outdoor" | "exterior" => Ok(Environment::Outdoor),
            "marine" => Ok(Environment::Marine),
            "automotive" | "vehicle" | "under_hood" => Ok(Environment::Automotive),
            "hazardous" | "classified" => Ok(Environment::Hazardous),
            other => Err(format!("Unknown environment '{}'", other)),
        }
    }

    /// Environments that add an environment factor to the device chain
    pub fn is_harsh(&self) -> bool {
        matches!(
            self,
            Environment::Marine | Environment::Automotive | Environment::Hazardous
        )
    }

    pub fn factor(&self) -> f64 {
        match self {
            Environment::Indoor | Environment::Outdoor => 1.0,
            Environment::Marine => 1.1,
            Environment::Automotive => 1.1,
            Environment::Hazardous => 1.2,
        }
    }
}

// ============================================================================
// Tables
// ============================================================================

/// Ambient-temperature correction for one insulation rating class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemperatureTable {
    /// Conductor temperature rating the column applies to (°C)
    pub rating_c: u16,
    /// `(upper ambient bound °C, factor)` rungs in ascending order
    pub rungs: &'static [(f64, f64)],
}

impl TemperatureTable {
    /// Factor for an ambient temperature.
    ///
    /// Uses the first rung whose bound is at or above the ambient. Beyond
    /// the last rung the lowest factor of the table applies; values are
    /// never extrapolated.
    pub fn factor(&self, ambient_c: f64) -> f64 {
        self.rungs
            .iter()
            .find(|(bound, _)| ambient_c <= *bound)
            .map(|(_, factor)| *factor)
            .unwrap_or_else(|| self.lowest())
    }

    fn lowest(&self) -> f64 {
        self.rungs
            .iter()
            .map(|(_, factor)| *factor)
            .fold(f64::INFINITY, f64::min)
    }
}

/// Bundling/grouping correction keyed by conductor or cable count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupingTable {
    /// `(max count, factor)` rows in ascending count order
    pub rows: &'static [(u32, f64)],
}

impl GroupingTable {
    /// Factor for `count` items. Counts past the last key reuse its factor.
    pub fn factor(&self, count: u32) -> f64 {
        self.rows
            .iter()
            .find(|(max_count, _)| count <= *max_count)
            .or_else(|| self.rows.last())
            .map(|(_, factor)| *factor)
            .unwrap_or(1.0)
    }
}

/// Installation-method correction pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstallationFactor {
    /// Multiplies ampacity
    pub temperature_factor: f64,
    /// Reported for the installation environment; not applied to ampacity
    pub environment_factor: f64,
}

impl InstallationFactor {
    pub const fn new(temperature_factor: f64, environment_factor: f64) -> Self {
        Self {
            temperature_factor,
            environment_factor,
        }
    }
}

/// Correction-factor rules for one standard.
#[derive(Debug, Clone, Serialize)]
pub struct CorrectionRules {
    pub standard: Standard,
    pub temperature_tables: Vec<TemperatureTable>,
    pub grouping: GroupingTable,
    pub installation: Vec<(InstallationMethod, InstallationFactor)>,
    pub default_installation: InstallationMethod,
    /// Rating class used to derate protective devices for ambient
    pub device_rating_class_c: u16,
    pub temperature_reference: &'static str,
    pub grouping_reference: &'static str,
    pub installation_reference: &'static str,
}

/// Inputs to [`CorrectionRules::compose`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorInputs {
    pub ambient_c: f64,
    pub item_count: u32,
    pub installation_method: InstallationMethod,
    pub application: ApplicationType,
    pub duty_cycle: DutyCycle,
    /// Conductor insulation rating (°C) selecting the temperature table
    pub rating_class_c: u16,
}

impl CorrectionRules {
    /// Temperature table for a rating class: the highest table rated at or
    /// below `rating_c`, or the lowest table when none is.
    pub fn temperature_table(&self, rating_c: u16) -> Option<&TemperatureTable> {
        self.temperature_tables
            .iter()
            .filter(|t| t.rating_c <= rating_c)
            .max_by_key(|t| t.rating_c)
            .or_else(|| self.temperature_tables.iter().min_by_key(|t| t.rating_c))
    }

    pub fn temperature_factor(&self, rating_c: u16, ambient_c: f64) -> f64 {
        self.temperature_table(rating_c)
            .map(|t| t.factor(ambient_c))
            .unwrap_or(1.0)
    }

    pub fn grouping_factor(&self, count: u32) -> f64 {
        self.grouping.factor(count)
    }

    /// Installation-method factors, or `UnknownInstallationMethod`
    pub fn installation_factor(&self, method: InstallationMethod) -> CalcResult<InstallationFactor> {
        self.installation
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, f)| *f)
            .ok_or_else(|| {
                CalcError::unknown_installation_method(
                    format!("{:?}", method),
                    self.standard.display_name(),
                )
            })
    }

    pub fn supports_installation(&self, method: InstallationMethod) -> bool {
        self.installation.iter().any(|(m, _)| *m == method)
    }

    /// Compose the ampacity correction for a conductor.
    ///
    /// The combined multiplier is `C_temp × C_group × C_install`. The
    /// application safety factor is looked up for the duty cycle and
    /// reported alongside; it scales the load, not the ampacity.
    pub fn compose(&self, inputs: &FactorInputs) -> CalcResult<CompositeFactor> {
        let installation = self.installation_factor(inputs.installation_method)?;
        let temperature = self.temperature_factor(inputs.rating_class_c, inputs.ambient_c);
        let grouping = self.grouping_factor(inputs.item_count);
        let safety = inputs.application.profile().safety_factor(inputs.duty_cycle);

        let mut chain = FactorChain::new();
        chain.push(FactorStep::multiply(
            format!("Ambient {:.0} °C ({} °C insulation)", inputs.ambient_c, inputs.rating_class_c),
            temperature,
            self.temperature_reference,
        ));
        chain.push(FactorStep::multiply(
            format!("{} current-carrying item(s)", inputs.item_count),
            grouping,
            self.grouping_reference,
        ));
        chain.push(FactorStep::multiply(
            inputs.installation_method.display_name(),
            installation.temperature_factor,
            self.installation_reference,
        ));

        let combined = chain.net_factor();

        tracing::debug!(
            standard = self.standard.id(),
            temperature,
            grouping,
            installation = installation.temperature_factor,
            combined,
            "composed ampacity correction"
        );

        Ok(CompositeFactor {
            temperature_factor: temperature,
            grouping_factor: grouping,
            installation_temperature_factor: installation.temperature_factor,
            installation_environment_factor: installation.environment_factor,
            safety_factor: safety,
            combined,
            chain,
        })
    }

    /// Ordered factor chain for protective-device sizing.
    ///
    /// Steps, in order: application safety factor; division by the
    /// temperature factor when ambient exceeds the profile baseline;
    /// environment factor for harsh environments; application addenda.
    pub fn device_chain(
        &self,
        application: ApplicationType,
        duty_cycle: DutyCycle,
        ambient_c: f64,
        environment: Environment,
    ) -> FactorChain {
        let profile = application.profile();
        let mut chain = FactorChain::new();

        let safety_name = match duty_cycle {
            DutyCycle::Continuous => "Continuous load safety factor",
            DutyCycle::Intermittent => "Intermittent load safety factor",
        };
        let safety_reference = profile.compliance_references.first().copied().unwrap_or("");
        chain.push(FactorStep::multiply(
            safety_name,
            profile.safety_factor(duty_cycle),
            safety_reference,
        ));

        if ambient_c > profile.baseline_temperature_c {
            let derating = self.temperature_factor(self.device_rating_class_c, ambient_c);
            if derating > 0.0 {
                chain.push(FactorStep::divide(
                    format!("Ambient {:.0} °C temperature derating", ambient_c),
                    derating,
                    self.temperature_reference,
                ));
            }
        }

        if environment.is_harsh() {
            chain.push(FactorStep::multiply(
                format!("{:?} environment", environment),
                environment.factor(),
                self.installation_reference,
            ));
        }

        for addendum in profile.addenda {
            chain.push(FactorStep::multiply(addendum.name, addendum.value, addendum.reference));
        }

        chain
    }
}

// ============================================================================
// Factor chains
// ============================================================================

/// How a step combines with the running value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorOperation {
    Multiply,
    Divide,
}

/// One named "then apply X" step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorStep {
    pub name: String,
    pub value: f64,
    pub operation: FactorOperation,
    pub reference: String,
}

impl FactorStep {
    pub fn multiply(name: impl Into<String>, value: f64, reference: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            operation: FactorOperation::Multiply,
            reference: reference.into(),
        }
    }

    pub fn divide(name: impl Into<String>, value: f64, reference: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            operation: FactorOperation::Divide,
            reference: reference.into(),
        }
    }

    pub fn apply(&self, running: f64) -> f64 {
        match self.operation {
            FactorOperation::Multiply => running * self.value,
            FactorOperation::Divide => running / self.value,
        }
    }

    fn symbol(&self) -> &'static str {
        match self.operation {
            FactorOperation::Multiply => "×",
            FactorOperation::Divide => "÷",
        }
    }
}

/// Ordered list of factor steps. Applied front to back.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FactorChain {
    pub steps: Vec<FactorStep>,
}

impl FactorChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: FactorStep) {
        self.steps.push(step);
    }

    /// Apply every step in order to `base`
    pub fn apply(&self, base: f64) -> f64 {
        self.steps.iter().fold(base, |running, step| step.apply(running))
    }

    /// Net multiplier of the whole chain
    pub fn net_factor(&self) -> f64 {
        self.apply(1.0)
    }

    /// Render the chain as a one-line calculation method, e.g.
    /// `20.00 A × 1.25 (Continuous load safety factor) = 25.00 A`
    pub fn describe(&self, base: f64, unit: &str) -> String {
        let mut text = format!("{:.2} {}", base, unit);
        for step in &self.steps {
            text.push_str(&format!(" {} {:.3} ({})", step.symbol(), step.value, step.name));
        }
        text.push_str(&format!(" = {:.2} {}", self.apply(base), unit));
        text
    }

    /// Distinct code references in step order
    pub fn references(&self) -> Vec<String> {
        let mut refs: Vec<String> = Vec::new();
        for step in &self.steps {
            if !step.reference.is_empty() && !refs.contains(&step.reference) {
                refs.push(step.reference.clone());
            }
        }
        refs
    }
}

/// Result of composing the ampacity correction factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeFactor {
    pub temperature_factor: f64,
    pub grouping_factor: f64,
    pub installation_temperature_factor: f64,
    pub installation_environment_factor: f64,
    /// Application safety factor for the duty cycle (applied to the load)
    pub safety_factor: f64,
    /// Ampacity multiplier: temperature × grouping × installation
    pub combined: f64,
    pub chain: FactorChain,
}

impl CompositeFactor {
    /// Format as a multi-line report block
    pub fn format_report(&self) -> String {
        format!(
            "Ampacity Correction Factors\n\
             ================================\n\
             C_temp    (Ambient)        = {:.3}\n\
             C_group   (Grouping)       = {:.3}\n\
             C_install (Installation)   = {:.3}\n\
             C_env     (Environment)    = {:.3}  (reported only)\n\
             --------------------------------\n\
             Combined ampacity factor   = {:.3}\n\
             Load safety factor         = {:.2}",
            self.temperature_factor,
            self.grouping_factor,
            self.installation_temperature_factor,
            self.installation_environment_factor,
            self.combined,
            self.safety_factor,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNGS: &[(f64, f64)] = &[(25.0, 1.05), (30.0, 1.0), (40.0, 0.88), (50.0, 0.75)];

    fn rules() -> CorrectionRules {
        CorrectionRules {
            standard: Standard::Nec,
            temperature_tables: vec![
                TemperatureTable { rating_c: 75, rungs: RUNGS },
                TemperatureTable { rating_c: 90, rungs: &[(30.0, 1.0), (40.0, 0.91), (50.0, 0.82)] },
            ],
            grouping: GroupingTable { rows: &[(3, 1.0), (6, 0.8), (9, 0.7)] },
            installation: vec![
                (InstallationMethod::Conduit, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::RooftopConduit, InstallationFactor::new(0.8, 1.1)),
            ],
            default_installation: InstallationMethod::Conduit,
            device_rating_class_c: 75,
            temperature_reference: "T",
            grouping_reference: "G",
            installation_reference: "I",
        }
    }

    #[test]
    fn test_temperature_rung_lookup() {
        let table = TemperatureTable { rating_c: 75, rungs: RUNGS };
        assert_eq!(table.factor(20.0), 1.05);
        assert_eq!(table.factor(30.0), 1.0);
        assert_eq!(table.factor(31.0), 0.88);
        // Beyond the last rung: most conservative value, no extrapolation
        assert_eq!(table.factor(75.0), 0.75);
    }

    #[test]
    fn test_grouping_reuses_last_key() {
        let table = GroupingTable { rows: &[(3, 1.0), (6, 0.8), (9, 0.7)] };
        assert_eq!(table.factor(1), 1.0);
        assert_eq!(table.factor(4), 0.8);
        assert_eq!(table.factor(40), 0.7);
    }

    #[test]
    fn test_temperature_table_selection() {
        let r = rules();
        assert_eq!(r.temperature_table(90).unwrap().rating_c, 90);
        assert_eq!(r.temperature_table(80).unwrap().rating_c, 75);
        // Lower than every table: fall back to the lowest class
        assert_eq!(r.temperature_table(60).unwrap().rating_c, 75);
    }

    #[test]
    fn test_compose_combined_factor() {
        let composite = rules()
            .compose(&FactorInputs {
                ambient_c: 40.0,
                item_count: 5,
                installation_method: InstallationMethod::RooftopConduit,
                application: ApplicationType::Residential,
                duty_cycle: DutyCycle::Continuous,
                rating_class_c: 90,
            })
            .unwrap();
        assert!((composite.combined - 0.91 * 0.8 * 0.8).abs() < 1e-12);
        assert_eq!(composite.installation_environment_factor, 1.1);
        assert_eq!(composite.safety_factor, 1.25);
        assert_eq!(composite.chain.steps.len(), 3);
    }

    #[test]
    fn test_unknown_installation_method() {
        let err = rules()
            .compose(&FactorInputs {
                ambient_c: 30.0,
                item_count: 1,
                installation_method: InstallationMethod::MethodA1,
                application: ApplicationType::Residential,
                duty_cycle: DutyCycle::Continuous,
                rating_class_c: 75,
            })
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_INSTALLATION_METHOD");
    }

    #[test]
    fn test_device_chain_order() {
        let chain = rules().device_chain(
            ApplicationType::Solar,
            DutyCycle::Continuous,
            40.0,
            Environment::Hazardous,
        );
        let names: Vec<_> = chain.steps.iter().map(|s| s.operation).collect();
        assert_eq!(
            names,
            vec![
                FactorOperation::Multiply,
                FactorOperation::Divide,
                FactorOperation::Multiply,
                FactorOperation::Multiply
            ]
        );
        // 10 A × 1.25 ÷ 0.88 × 1.2 × 1.25
        let expected = 10.0 * 1.25 / 0.88 * 1.2 * 1.25;
        assert!((chain.apply(10.0) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_device_chain_skips_mild_conditions() {
        let chain = rules().device_chain(
            ApplicationType::Residential,
            DutyCycle::Intermittent,
            25.0,
            Environment::Outdoor,
        );
        assert_eq!(chain.steps.len(), 1);
        assert_eq!(chain.apply(16.0), 16.0);
    }

    #[test]
    fn test_describe_is_deterministic() {
        let mut chain = FactorChain::new();
        chain.push(FactorStep::multiply("Safety", 1.25, "NEC 210.20(A)"));
        chain.push(FactorStep::divide("Ambient", 0.8, "NEC 310.15(B)(1)"));
        let text = chain.describe(20.0, "A");
        assert_eq!(text, "20.00 A × 1.250 (Safety) ÷ 0.800 (Ambient) = 31.25 A");
        assert_eq!(text, chain.describe(20.0, "A"));
        assert_eq!(chain.references().len(), 2);
    }
}
