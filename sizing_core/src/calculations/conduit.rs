//! # Conduit Fill
//!
//! Selects the smallest conduit of a given type that holds a wire bundle
//! within the maximum fill percentage.
//!
//! ## Fill tiers
//!
//! | Wires | Max fill |
//! |-------|----------|
//! | 1     | 53 %     |
//! | 2     | 31 %     |
//! | 3+    | 40 %     |
//!
//! The tiers are the same for every standard. When even the largest
//! catalog size is over the limit, that size is returned with
//! `fill_compliant = false`.
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::calculations::conduit::{calculate, ConduitFillInput, WireEntry};
//! use sizing_core::catalog::{catalog_for, ConduitType};
//! use sizing_core::settings::EngineSettings;
//! use sizing_core::standards::Standard;
//!
//! let input = ConduitFillInput::new(ConduitType::Emt, vec![WireEntry::new("12 AWG", "THHN", 3)]);
//! let result = calculate(catalog_for(Standard::Nec), &EngineSettings::default(), &input).unwrap();
//!
//! assert_eq!(result.conduit.size, "1/2");
//! assert_eq!(result.max_fill_pct, 40.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_size, resolve_insulation, CalculationMetadata};
use crate::catalog::{ConduitSpec, ConduitType, StandardCatalog};
use crate::errors::{CalcError, CalcResult, Validator};
use crate::settings::EngineSettings;
use crate::units::AreaUnit;

/// Maximum fill percentage for a wire count
pub fn max_fill_percent(wire_count: u32) -> f64 {
    match wire_count {
        1 => 53.0,
        2 => 31.0,
        _ => 40.0,
    }
}

/// Largest bundle the engine accepts
pub const MAX_BUNDLE_WIRES: u32 = 10_000;

fn default_quantity() -> u32 {
    1
}

/// Identical wires in the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireEntry {
    pub size: String,
    /// Insulation code; the standard's default when omitted
    #[serde(default)]
    pub insulation: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

impl WireEntry {
    pub fn new(size: &str, insulation: &str, quantity: u32) -> Self {
        WireEntry {
            size: size.to_string(),
            insulation: Some(insulation.to_string()),
            quantity,
        }
    }
}

/// Input parameters for conduit fill.
///
/// ## JSON Example
///
/// ```json
/// {
///   "conduit_type": "emt",
///   "wires": [
///     { "size": "4/0", "insulation": "THHN", "quantity": 3 },
///     { "size": "4", "insulation": "THW", "quantity": 1 }
///   ],
///   "future_fill_reserve_pct": 25.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitFillInput {
    pub conduit_type: ConduitType,
    pub wires: Vec<WireEntry>,
    /// Wire count used for the fill tier instead of the summed quantities
    #[serde(default)]
    pub wire_count_override: Option<u32>,
    /// Extra area reserved for future wires (%)
    #[serde(default)]
    pub future_fill_reserve_pct: Option<f64>,
    #[serde(default)]
    pub evaluated_at: Option<DateTime<Utc>>,
}

impl ConduitFillInput {
    pub fn new(conduit_type: ConduitType, wires: Vec<WireEntry>) -> Self {
        ConduitFillInput {
            conduit_type,
            wires,
            wire_count_override: None,
            future_fill_reserve_pct: None,
            evaluated_at: None,
        }
    }

    pub(crate) fn checks(&self) -> ConduitChecks<'_> {
        ConduitChecks {
            conduit_type: Some(self.conduit_type),
            wires: &self.wires,
            wire_count_override: self.wire_count_override,
            future_fill_reserve_pct: self.future_fill_reserve_pct,
        }
    }

    pub fn validate(&self, catalog: &StandardCatalog) -> CalcResult<()> {
        let mut v = Validator::new();
        self.checks().run(catalog, &mut v);
        v.finish()
    }

    /// Wires in the bundle for the fill tier
    pub fn wire_count(&self) -> u32 {
        self.wire_count_override.unwrap_or_else(|| {
            self.wires
                .iter()
                .fold(0u32, |count, wire| count.saturating_add(wire.quantity))
        })
    }
}

/// Request fields checked against a catalog; `conduit_type` is `None`
/// when it failed to parse.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConduitChecks<'a> {
    pub conduit_type: Option<ConduitType>,
    pub wires: &'a [WireEntry],
    pub wire_count_override: Option<u32>,
    pub future_fill_reserve_pct: Option<f64>,
}

impl ConduitChecks<'_> {
    pub(crate) fn run(&self, catalog: &StandardCatalog, v: &mut Validator) {
        if let Some(conduit_type) = self.conduit_type {
            if !catalog.conduit_types().contains(&conduit_type) {
                let available: Vec<&str> = catalog
                    .conduit_types()
                    .iter()
                    .map(|t| t.display_name())
                    .collect();
                v.push(
                    "conduit_type",
                    conduit_type.display_name(),
                    format!(
                        "Not a {} conduit type (available: {})",
                        catalog.standard.display_name(),
                        available.join(", ")
                    ),
                );
            }
        }
        if self.wires.is_empty() {
            v.push("wires", "[]", "At least one wire is required");
        }
        for (i, wire) in self.wires.iter().enumerate() {
            let size = check_size(v, catalog, &format!("wires[{}].size", i), &wire.size);
            let insulation = resolve_insulation(
                v,
                catalog,
                &format!("wires[{}].insulation", i),
                wire.insulation.as_deref(),
            );
            check_wire_count(v, &format!("wires[{}].quantity", i), wire.quantity);
            if let (Some(size), Some(insulation)) = (size, insulation) {
                if catalog.wire_area(insulation, &size).is_none() {
                    v.push(
                        format!("wires[{}].size", i),
                        wire.size.as_str(),
                        format!("No {} wire area listed for {}", insulation.code, size),
                    );
                }
            }
        }
        // Per-wire overruns are already reported
        let total: u64 = self.wires.iter().map(|w| u64::from(w.quantity)).sum();
        let entries_in_range = self.wires.iter().all(|w| w.quantity <= MAX_BUNDLE_WIRES);
        if entries_in_range && total > u64::from(MAX_BUNDLE_WIRES) {
            v.push(
                "wires",
                total.to_string(),
                format!("A bundle holds at most {} wires", MAX_BUNDLE_WIRES),
            );
        }
        if let Some(count) = self.wire_count_override {
            check_wire_count(v, "wire_count_override", count);
        }
        if let Some(reserve) = self.future_fill_reserve_pct {
            v.in_range("future_fill_reserve_pct", reserve, 0.0, 100.0);
        }
    }
}

fn check_wire_count(v: &mut Validator, field: &str, count: u32) {
    if count == 0 {
        v.push(field, "0", "Must be at least 1");
    } else if count > MAX_BUNDLE_WIRES {
        v.push(
            field,
            count.to_string(),
            format!("Must be at most {}", MAX_BUNDLE_WIRES),
        );
    }
}

/// One conduit size evaluated against the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitCandidate {
    pub size: String,
    pub internal_area: f64,
    /// Internal area × max fill
    pub allowable_area: f64,
    pub fill_pct: f64,
    pub fill_compliant: bool,
}

/// Share of one wire entry in the bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireShare {
    pub size: String,
    pub insulation: String,
    pub quantity: u32,
    pub unit_area: f64,
    pub total_area: f64,
    /// Percentage of the total wire area
    pub share_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConduitCompliance {
    pub fill_compliant: bool,
    pub standard_compliant: bool,
}

/// Conduit fill result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConduitFillResult {
    pub conduit: ConduitSpec,
    pub area_unit: AreaUnit,
    /// Wire count that chose the fill tier
    pub wire_count: u32,
    /// Sum of wire areas before the reserve
    pub total_wire_area: f64,
    pub future_fill_reserve_pct: f64,
    /// Total wire area inflated by the reserve
    pub required_area: f64,
    pub max_fill_pct: f64,
    pub fill_pct: f64,
    pub compliance: ConduitCompliance,
    /// Every catalog size of the requested type, smallest first
    pub alternatives: Vec<ConduitCandidate>,
    pub breakdown: Vec<WireShare>,
    pub calculation_metadata: CalculationMetadata,
}

/// Size a conduit for a wire bundle.
pub fn calculate(
    catalog: &StandardCatalog,
    settings: &EngineSettings,
    input: &ConduitFillInput,
) -> CalcResult<ConduitFillResult> {
    input.validate(catalog)?;
    calculate_validated(catalog, settings, input)
}

pub(crate) fn calculate_validated(
    catalog: &StandardCatalog,
    settings: &EngineSettings,
    input: &ConduitFillInput,
) -> CalcResult<ConduitFillResult> {
    let mut breakdown = Vec::with_capacity(input.wires.len());
    for wire in &input.wires {
        let size = catalog.normalize_size(&wire.size).map_err(CalcError::internal)?;
        let code = wire.insulation.as_deref().unwrap_or(catalog.default_insulation);
        let insulation = catalog
            .insulation(code)
            .ok_or_else(|| CalcError::internal(format!("insulation {} vanished from catalog", code)))?;
        let unit_area = catalog
            .wire_area(insulation, &size)
            .ok_or_else(|| CalcError::internal(format!("no wire area for {} {}", insulation.code, size)))?;
        breakdown.push(WireShare {
            size,
            insulation: insulation.code.clone(),
            quantity: wire.quantity,
            unit_area,
            total_area: unit_area * wire.quantity as f64,
            share_pct: 0.0,
        });
    }

    let total_wire_area: f64 = breakdown.iter().map(|w| w.total_area).sum();
    for share in &mut breakdown {
        share.share_pct = share.total_area / total_wire_area * 100.0;
    }

    let wire_count = input.wire_count();
    let reserve_pct = input
        .future_fill_reserve_pct
        .unwrap_or(settings.default_future_fill_reserve_pct);
    let required_area = total_wire_area * (1.0 + reserve_pct / 100.0);
    let max_fill_pct = max_fill_percent(wire_count);

    let sizes = catalog.conduits_of(input.conduit_type);
    let alternatives: Vec<ConduitCandidate> = sizes
        .iter()
        .map(|conduit| {
            let allowable_area = conduit.internal_area * max_fill_pct / 100.0;
            ConduitCandidate {
                size: conduit.size.clone(),
                internal_area: conduit.internal_area,
                allowable_area,
                fill_pct: required_area / conduit.internal_area * 100.0,
                fill_compliant: required_area <= allowable_area,
            }
        })
        .collect();

    let selected_index = match alternatives.iter().position(|c| c.fill_compliant) {
        Some(i) => i,
        None => {
            let last = alternatives
                .len()
                .checked_sub(1)
                .ok_or_else(|| CalcError::internal("conduit type has no sizes"))?;
            tracing::warn!(
                standard = catalog.standard.id(),
                conduit_type = %input.conduit_type,
                required_area,
                largest = %alternatives[last].size,
                "bundle exceeds the largest conduit; returning it as non-compliant"
            );
            last
        }
    };
    let selected = &alternatives[selected_index];
    let fill_compliant = selected.fill_compliant;

    let mut metadata = CalculationMetadata::new(catalog.standard, input.evaluated_at);
    metadata.cite(catalog.references.conduit_fill);
    metadata.cite(catalog.references.wire_area);
    metadata.calculation_method = format!(
        "{} wire(s) → {:.0}% max fill; {:.4} {} × (1 + {:.1}%) = {:.4} {} vs {} {} allowable {:.4} {} ({:.1}% fill)",
        wire_count,
        max_fill_pct,
        total_wire_area,
        catalog.area_unit.symbol(),
        reserve_pct,
        required_area,
        catalog.area_unit.symbol(),
        input.conduit_type,
        selected.size,
        selected.allowable_area,
        catalog.area_unit.symbol(),
        selected.fill_pct,
    );

    tracing::debug!(
        standard = catalog.standard.id(),
        conduit_type = %input.conduit_type,
        size = %selected.size,
        wire_count,
        fill_pct = selected.fill_pct,
        "conduit selected"
    );

    Ok(ConduitFillResult {
        conduit: sizes[selected_index].clone(),
        area_unit: catalog.area_unit,
        wire_count,
        total_wire_area,
        future_fill_reserve_pct: reserve_pct,
        required_area,
        max_fill_pct,
        fill_pct: selected.fill_pct,
        compliance: ConduitCompliance {
            fill_compliant,
            standard_compliant: fill_compliant,
        },
        alternatives,
        breakdown,
        calculation_metadata: metadata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::catalog_for;
    use crate::standards::Standard;

    fn fill(standard: Standard, input: &ConduitFillInput) -> ConduitFillResult {
        calculate(catalog_for(standard), &EngineSettings::default(), input).unwrap()
    }

    #[test]
    fn test_three_small_wires_in_emt() {
        let input = ConduitFillInput::new(ConduitType::Emt, vec![WireEntry::new("12", "THHN", 3)]);
        let result = fill(Standard::Nec, &input);
        assert_eq!(result.conduit.size, "1/2");
        assert_eq!(result.wire_count, 3);
        assert!((result.total_wire_area - 0.0399).abs() < 1e-9);
        assert!((result.fill_pct - 0.0399 / 0.304 * 100.0).abs() < 1e-9);
        assert!(result.compliance.fill_compliant);
    }

    #[test]
    fn test_large_feeders_in_emt() {
        // 3 × 0.3237 = 0.9711 in²; 1-1/2 allows 0.8144, 2 allows 1.3424
        let input = ConduitFillInput::new(ConduitType::Emt, vec![WireEntry::new("4/0", "THHN", 3)]);
        let result = fill(Standard::Nec, &input);
        assert_eq!(result.conduit.size, "2");
        assert!(!result.alternatives[4].fill_compliant);
        assert!(result.alternatives[5].fill_compliant);
    }

    #[test]
    fn test_fill_tiers() {
        assert_eq!(max_fill_percent(1), 53.0);
        assert_eq!(max_fill_percent(2), 31.0);
        assert_eq!(max_fill_percent(3), 40.0);
        assert_eq!(max_fill_percent(40), 40.0);

        let single = fill(Standard::Nec, &ConduitFillInput::new(ConduitType::Emt, vec![WireEntry::new("1/0", "THHN", 1)]));
        assert_eq!(single.max_fill_pct, 53.0);
        let pair = fill(Standard::Nec, &ConduitFillInput::new(ConduitType::Emt, vec![WireEntry::new("1/0", "THHN", 2)]));
        assert_eq!(pair.max_fill_pct, 31.0);
    }

    #[test]
    fn test_wire_count_override_selects_tier() {
        let mut input = ConduitFillInput::new(ConduitType::Emt, vec![WireEntry::new("12 AWG", "THHN", 3)]);
        input.wire_count_override = Some(1);
        let result = fill(Standard::Nec, &input);
        assert_eq!(result.wire_count, 1);
        assert_eq!(result.max_fill_pct, 53.0);
    }

    #[test]
    fn test_future_reserve_inflates_area() {
        let mut input = ConduitFillInput::new(ConduitType::Emt, vec![WireEntry::new("12", "THHN", 3)]);
        input.future_fill_reserve_pct = Some(25.0);
        let result = fill(Standard::Nec, &input);
        assert!((result.required_area - 0.0399 * 1.25).abs() < 1e-12);
        assert_eq!(result.future_fill_reserve_pct, 25.0);
    }

    #[test]
    fn test_overflow_returns_largest() {
        let input = ConduitFillInput::new(ConduitType::Emt, vec![WireEntry::new("4/0", "THHN", 60)]);
        let result = fill(Standard::Nec, &input);
        assert_eq!(result.conduit.size, "4");
        assert!(!result.compliance.fill_compliant);
        assert!(!result.compliance.standard_compliant);
        assert_eq!(result.alternatives.len(), 10);
        assert!(result.alternatives.iter().all(|c| !c.fill_compliant));
    }

    #[test]
    fn test_breakdown_shares() {
        let input = ConduitFillInput::new(
            ConduitType::Rmc,
            vec![WireEntry::new("4/0", "THHN", 3), WireEntry::new("4", "THW", 1)],
        );
        let result = fill(Standard::Nec, &input);
        assert_eq!(result.breakdown.len(), 2);
        assert_eq!(result.breakdown[1].size, "4 AWG");
        let total: f64 = result.breakdown.iter().map(|w| w.share_pct).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!((result.total_wire_area - (3.0 * 0.3237 + 0.0973)).abs() < 1e-9);
    }

    #[test]
    fn test_metric_conduit() {
        let input = ConduitFillInput::new(ConduitType::PvcRigid, vec![WireEntry::new("2.5", "PVC", 3)]);
        let result = fill(Standard::Iec, &input);
        assert_eq!(result.conduit.size, "16 mm");
        assert_eq!(result.area_unit, AreaUnit::SquareMillimeters);
        assert_eq!(result.calculation_metadata.sections_applied, vec!["IEC 61386"]);
    }

    #[test]
    fn test_validation_reports_each_wire() {
        let input = ConduitFillInput::new(
            ConduitType::PvcRigid,
            vec![WireEntry::new("2.5", "THHN", 3), WireEntry::new("12", "PVC", 0)],
        );
        let err = input.validate(catalog_for(Standard::Nec)).unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["conduit_type", "wires[0].size", "wires[1].insulation", "wires[1].quantity"]
        );
    }

    #[test]
    fn test_oversized_quantities_are_rejected() {
        let input = ConduitFillInput::new(
            ConduitType::Emt,
            vec![WireEntry::new("12", "THHN", 4_000_000_000), WireEntry::new("12", "THHN", 4_000_000_000)],
        );
        let err = calculate(catalog_for(Standard::Nec), &EngineSettings::default(), &input).unwrap_err();
        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["wires[0].quantity", "wires[1].quantity"]);
        assert_eq!(input.wire_count(), u32::MAX);

        // Each entry fits, the bundle does not
        let input = ConduitFillInput::new(
            ConduitType::Emt,
            vec![WireEntry::new("12", "THHN", 6_000), WireEntry::new("10", "THHN", 6_000)],
        );
        let err = input.validate(catalog_for(Standard::Nec)).unwrap_err();
        assert_eq!(err.field_errors().len(), 1);
        assert_eq!(err.field_errors()[0].field, "wires");
        assert_eq!(err.field_errors()[0].value, "12000");
    }

    #[test]
    fn test_default_quantity_in_json() {
        let input: ConduitFillInput =
            serde_json::from_str(r#"{ "conduit_type": "emt", "wires": [{ "size": "10" }] }"#).unwrap();
        assert_eq!(input.wires[0].quantity, 1);
        assert!(input.wires[0].insulation.is_none());
        let result = fill(Standard::Nec, &input);
        assert_eq!(result.breakdown[0].insulation, "THHN");
    }
}
