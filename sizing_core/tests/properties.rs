//! Property-based tests for the sizing engines.
//!
//! Uses proptest to check that selections behave for every input in a
//! range, not just the hand-picked cases in the unit tests.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use sizing_core::application::ApplicationType;
use sizing_core::calculations::{
    ConductorSizingInput, ConduitFillInput, DeviceSizingInput, LoadSpec, SizingEngine, WireEntry,
};
use sizing_core::catalog::ConduitType;
use sizing_core::circuit::ConductorMaterial;
use sizing_core::settings::EngineSettings;
use sizing_core::standards::Standard;

fn engine(standard: Standard) -> SizingEngine {
    SizingEngine::new(standard, EngineSettings::default())
}

fn size_index(engine: &SizingEngine, size: &str) -> usize {
    engine
        .catalog()
        .conductors
        .find(size)
        .map(|(index, _)| index)
        .unwrap()
}

// =============================================================================
// Monotonicity
// =============================================================================

proptest! {
    /// More current never selects a smaller conductor
    #[test]
    fn prop_conductor_monotonic(current in 1.0f64..150.0, extra in 0.0f64..50.0, length in 5.0f64..300.0) {
        let nec = engine(Standard::Nec);
        let lower = ConductorSizingInput::new(current, length, 240.0, ApplicationType::Commercial);
        let higher = ConductorSizingInput::new(current + extra, length, 240.0, ApplicationType::Commercial);

        let a = nec.size_conductor(&lower).unwrap();
        let b = nec.size_conductor(&higher).unwrap();
        prop_assert!(size_index(&nec, &b.conductor.size) >= size_index(&nec, &a.conductor.size));
    }

    /// More current never selects a smaller device rating
    #[test]
    fn prop_device_monotonic(current in 1.0f64..150.0, extra in 0.0f64..50.0) {
        let nec = engine(Standard::Nec);
        let mut lower = DeviceSizingInput::new(LoadSpec::current(current), ApplicationType::Commercial);
        lower.voltage = Some(480.0);
        let mut higher = lower.clone();
        higher.load = LoadSpec::current(current + extra);

        let a = nec.size_device(&lower).unwrap();
        let b = nec.size_device(&higher).unwrap();
        prop_assert!(b.device.rating >= a.device.rating);
    }
}

// =============================================================================
// Ladder rounding
// =============================================================================

proptest! {
    /// The rating is the smallest ladder value at or above the adjusted current
    #[test]
    fn prop_device_rounds_up_to_ladder(current in 0.5f64..400.0, ambient in 20.0f64..45.0) {
        let nec = engine(Standard::Nec);
        let mut input = DeviceSizingInput::new(LoadSpec::current(current), ApplicationType::Industrial);
        input.voltage = Some(480.0);
        input.ambient_c = Some(ambient);

        let result = nec.size_device(&input).unwrap();
        prop_assert!(result.device.rating >= result.adjusted_current - 1e-9);

        let ladder = nec.catalog().rating_ladder(ApplicationType::Industrial, Some(480.0));
        prop_assert!(ladder
            .iter()
            .filter(|r| **r < result.device.rating)
            .all(|r| *r < result.adjusted_current));
    }

    /// Blade fuses: the class always matches the adjusted current
    #[test]
    fn prop_fuse_class_matches_current(current in 0.5f64..96.0) {
        let auto = engine(Standard::DcAutomotive);
        let mut input = DeviceSizingInput::new(LoadSpec::current(current), ApplicationType::Automotive);
        input.voltage = Some(12.0);

        let result = auto.size_device(&input).unwrap();
        prop_assert_eq!(
            result.fuse_type,
            sizing_core::catalog::FuseType::classify(result.adjusted_current)
        );
        prop_assert!(result.device.rating >= result.adjusted_current - 1e-9);
    }
}

// =============================================================================
// Aluminum penalty
// =============================================================================

proptest! {
    /// Aluminum never drops less than copper on the same conductor, and
    /// never selects a smaller one
    #[test]
    fn prop_aluminum_penalty(current in 5.0f64..100.0, length in 10.0f64..400.0) {
        let nec = engine(Standard::Nec);
        let copper = ConductorSizingInput::new(current, length, 240.0, ApplicationType::Commercial);
        let mut aluminum = copper.clone();
        aluminum.material = ConductorMaterial::Aluminum;

        let cu = nec.size_conductor(&copper).unwrap();
        let al = nec.size_conductor(&aluminum).unwrap();

        prop_assert!(size_index(&nec, &al.conductor.size) >= size_index(&nec, &cu.conductor.size));
        if al.conductor.size == cu.conductor.size {
            prop_assert!(al.voltage_drop_v >= cu.voltage_drop_v);
        }
    }
}

// =============================================================================
// Fill tiers
// =============================================================================

proptest! {
    /// 1 wire → 53 %, 2 → 31 %, 3+ → 40 % in every standard
    #[test]
    fn prop_fill_tiers(count in 1u32..40) {
        let expected = match count {
            1 => 53.0,
            2 => 31.0,
            _ => 40.0,
        };

        let nec = engine(Standard::Nec);
        let input = ConduitFillInput::new(ConduitType::Rmc, vec![WireEntry::new("12", "THHN", count)]);
        prop_assert_eq!(nec.fill_conduit(&input).unwrap().max_fill_pct, expected);

        let iec = engine(Standard::Iec);
        let input = ConduitFillInput::new(ConduitType::SteelHeavy, vec![WireEntry::new("2.5", "PVC", count)]);
        prop_assert_eq!(iec.fill_conduit(&input).unwrap().max_fill_pct, expected);
    }
}

// =============================================================================
// Idempotence
// =============================================================================

proptest! {
    /// Same input, same bytes
    #[test]
    fn prop_idempotent(current in 1.0f64..100.0, length in 5.0f64..200.0) {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
        let nec = engine(Standard::Nec);

        let mut conductor = ConductorSizingInput::new(current, length, 240.0, ApplicationType::Commercial);
        conductor.evaluated_at = Some(at);
        let first = serde_json::to_string(&nec.size_conductor(&conductor).unwrap()).unwrap();
        let second = serde_json::to_string(&nec.size_conductor(&conductor).unwrap()).unwrap();
        prop_assert_eq!(first, second);

        let mut device = DeviceSizingInput::new(LoadSpec::current(current), ApplicationType::Commercial);
        device.evaluated_at = Some(at);
        let first = serde_json::to_string(&nec.size_device(&device).unwrap()).unwrap();
        let second = serde_json::to_string(&nec.size_device(&device).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }
}
