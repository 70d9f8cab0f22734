//! IEC 60364-5-52 catalog: copper mm², reference method C, IEC 61386
//! conduits and IEC 60898/60947/60269 devices.

use super::conductors::{ConductorSpec, ConductorTable, InsulationSystem};
use super::conduits::{conduit_rows, wire_rows, ConduitSpec, ConduitType, WireArea};
use super::devices::{DeviceFamily, DeviceKind};
use super::{CatalogReferences, StandardCatalog};
use crate::application::ApplicationType::{Commercial, Industrial, Residential};
use crate::corrections::{
    CorrectionRules, GroupingTable, InstallationFactor, InstallationMethod, TemperatureTable,
};
use crate::standards::{code_ref, metric_label, SizeSystem, Standard};
use crate::units::{circle_area, AreaUnit, LengthUnit};

/// Table B.52.4 (PVC 70 °C) and B.52.5 (XLPE 90 °C), method C, two loaded
/// conductors; IEC 60228 class 2 resistance at 20 °C (Ω/km)
const COPPER: &[(f64, f64, [f64; 2])] = &[
    (1.5, 12.1, [19.5, 24.0]),
    (2.5, 7.41, [27.0, 33.0]),
    (4.0, 4.61, [36.0, 45.0]),
    (6.0, 3.08, [46.0, 58.0]),
    (10.0, 1.83, [63.0, 80.0]),
    (16.0, 1.15, [85.0, 107.0]),
    (25.0, 0.727, [112.0, 138.0]),
    (35.0, 0.524, [138.0, 171.0]),
    (50.0, 0.387, [168.0, 209.0]),
    (70.0, 0.268, [213.0, 269.0]),
    (95.0, 0.193, [258.0, 328.0]),
    (120.0, 0.153, [299.0, 382.0]),
    (150.0, 0.124, [344.0, 441.0]),
    (185.0, 0.0991, [392.0, 506.0]),
    (240.0, 0.0754, [461.0, 599.0]),
    (300.0, 0.0601, [530.0, 693.0]),
];

/// Typical single-core reactance at 50 Hz (Ω/km)
pub(crate) const REACTANCE_OHM_PER_KM: f64 = 0.08;

/// H07V-U/R overall diameters (mm) by cross-section
const H07V_DIAMETERS: &[(f64, f64)] = &[
    (1.0, 2.7),
    (1.5, 3.0),
    (2.5, 3.6),
    (4.0, 4.4),
    (6.0, 4.9),
    (10.0, 6.4),
    (16.0, 7.3),
    (25.0, 9.0),
    (35.0, 10.2),
    (50.0, 12.0),
    (70.0, 13.6),
    (95.0, 15.9),
    (120.0, 17.4),
    (150.0, 19.3),
    (185.0, 21.5),
    (240.0, 24.5),
    (300.0, 27.2),
];

fn copper_table() -> ConductorTable {
    ConductorTable {
        columns: vec![70, 90],
        rows: COPPER
            .iter()
            .map(|(mm2, r, amps)| ConductorSpec::metric(*mm2, *r, REACTANCE_OHM_PER_KM, amps))
            .collect(),
        reference_column: 0,
        applications: vec![Residential, Commercial, Industrial],
        reference: code_ref::IEC_AMPACITY.to_string(),
    }
}

fn insulations() -> Vec<InsulationSystem> {
    vec![
        InsulationSystem::new("PVC", "Polyvinyl chloride 70 °C", 70, -15.0, false, "H07V"),
        InsulationSystem::new("XLPE", "Cross-linked polyethylene 90 °C", 90, -40.0, true, "H07V"),
        InsulationSystem::new("EPR", "Ethylene propylene rubber 90 °C", 90, -40.0, true, "H07V"),
        InsulationSystem::new("LSZH", "Low smoke zero halogen 70 °C", 70, -15.0, false, "H07V"),
    ]
}

/// IEC 61386 conduit internal areas (mm²), from nominal internal diameters
pub(crate) fn metric_conduits() -> Vec<ConduitSpec> {
    let mut rows = diameter_rows(
        ConduitType::PvcRigid,
        &[
            ("16 mm", 13.7),
            ("20 mm", 17.4),
            ("25 mm", 22.1),
            ("32 mm", 28.6),
            ("40 mm", 35.8),
            ("50 mm", 45.1),
            ("63 mm", 57.0),
        ],
    );
    rows.extend(diameter_rows(
        ConduitType::SteelHeavy,
        &[
            ("16 mm", 13.0),
            ("20 mm", 16.9),
            ("25 mm", 21.4),
            ("32 mm", 27.8),
            ("40 mm", 35.4),
            ("50 mm", 44.3),
        ],
    ));
    rows.extend(diameter_rows(
        ConduitType::Flexible,
        &[
            ("16 mm", 10.7),
            ("20 mm", 14.1),
            ("25 mm", 18.3),
            ("32 mm", 24.3),
            ("40 mm", 31.2),
            ("50 mm", 39.6),
            ("63 mm", 50.6),
        ],
    ));
    rows
}

fn diameter_rows(conduit_type: ConduitType, diameters: &[(&str, f64)]) -> Vec<ConduitSpec> {
    let areas: Vec<(&str, f64)> = diameters
        .iter()
        .map(|(size, id)| (*size, circle_area(*id)))
        .collect();
    conduit_rows(conduit_type, &areas)
}

/// Single-core insulated wire areas (mm²)
pub(crate) fn metric_wire_areas() -> Vec<WireArea> {
    let labels: Vec<(String, f64)> = H07V_DIAMETERS
        .iter()
        .map(|(mm2, od)| (metric_label(*mm2), circle_area(*od)))
        .collect();
    let pairs: Vec<(&str, f64)> = labels.iter().map(|(s, a)| (s.as_str(), *a)).collect();
    wire_rows("H07V", &pairs)
}

/// Table B.52.14, 30 °C air reference
pub(crate) fn temperature_tables() -> Vec<TemperatureTable> {
    vec![
        TemperatureTable {
            rating_c: 70,
            rungs: &[
                (10.0, 1.22),
                (15.0, 1.17),
                (20.0, 1.12),
                (25.0, 1.06),
                (30.0, 1.00),
                (35.0, 0.94),
                (40.0, 0.87),
                (45.0, 0.79),
                (50.0, 0.71),
                (55.0, 0.61),
                (60.0, 0.50),
            ],
        },
        TemperatureTable {
            rating_c: 90,
            rungs: &[
                (10.0, 1.15),
                (15.0, 1.12),
                (20.0, 1.08),
                (25.0, 1.04),
                (30.0, 1.00),
                (35.0, 0.96),
                (40.0, 0.91),
                (45.0, 0.87),
                (50.0, 0.82),
                (55.0, 0.76),
                (60.0, 0.71),
                (65.0, 0.65),
                (70.0, 0.58),
                (75.0, 0.50),
                (80.0, 0.41),
            ],
        },
    ]
}

/// Table B.52.17 row 1, bunched in air or on a surface
pub(crate) const GROUPING: GroupingTable = GroupingTable {
    rows: &[
        (1, 1.00),
        (2, 0.80),
        (3, 0.70),
        (4, 0.65),
        (5, 0.60),
        (6, 0.57),
        (7, 0.54),
        (8, 0.52),
        (9, 0.50),
        (12, 0.45),
        (16, 0.41),
        (20, 0.38),
    ],
};

const MCB_RATINGS: &[f64] = &[6.0, 10.0, 13.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0];

const MCCB_RATINGS: &[f64] = &[
    16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 315.0,
    400.0, 500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0,
];

const GG_RATINGS: &[f64] = &[
    2.0, 4.0, 6.0, 10.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0,
    200.0, 250.0, 315.0, 400.0, 500.0, 630.0,
];

fn devices() -> Vec<DeviceFamily> {
    vec![
        DeviceFamily {
            name: "MCB type B (IEC 60898-1)",
            form_factor: "din_mcb_b",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: MCB_RATINGS,
            voltage_max: 400.0,
            applications: &[Residential, Commercial],
            temperature_range_c: (-25.0, 55.0),
            interrupt_capacity_ka: 6.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::IEC_OVERLOAD,
        },
        DeviceFamily {
            name: "MCB type C (IEC 60898-1)",
            form_factor: "din_mcb_c",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: MCB_RATINGS,
            voltage_max: 400.0,
            applications: &[Commercial, Industrial],
            temperature_range_c: (-25.0, 55.0),
            interrupt_capacity_ka: 10.0,
            industrial_duty: true,
            thermal_runaway_protected: false,
            reference: code_ref::IEC_OVERLOAD,
        },
        DeviceFamily {
            name: "MCCB (IEC 60947-2)",
            form_factor: "mccb",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: MCCB_RATINGS,
            voltage_max: 690.0,
            applications: &[Commercial, Industrial],
            temperature_range_c: (-25.0, 70.0),
            interrupt_capacity_ka: 36.0,
            industrial_duty: true,
            thermal_runaway_protected: false,
            reference: code_ref::IEC_OVERLOAD,
        },
        DeviceFamily {
            name: "gG fuse link (IEC 60269-2)",
            form_factor: "nh_gg",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: GG_RATINGS,
            voltage_max: 500.0,
            applications: &[Commercial, Industrial],
            temperature_range_c: (-40.0, 70.0),
            interrupt_capacity_ka: 120.0,
            industrial_duty: true,
            thermal_runaway_protected: false,
            reference: code_ref::IEC_OVERLOAD,
        },
    ]
}

pub(crate) fn catalog() -> StandardCatalog {
    StandardCatalog {
        standard: Standard::Iec,
        size_system: SizeSystem::Metric,
        length_unit: LengthUnit::Meters,
        area_unit: AreaUnit::SquareMillimeters,
        applications: vec![Residential, Commercial, Industrial],
        insulations: insulations(),
        default_insulation: "PVC",
        conductors: copper_table(),
        conduits: metric_conduits(),
        wire_areas: metric_wire_areas(),
        devices: devices(),
        corrections: CorrectionRules {
            standard: Standard::Iec,
            temperature_tables: temperature_tables(),
            grouping: GROUPING,
            installation: vec![
                (InstallationMethod::MethodA1, InstallationFactor::new(0.72, 1.0)),
                (InstallationMethod::MethodA2, InstallationFactor::new(0.69, 1.0)),
                (InstallationMethod::MethodB1, InstallationFactor::new(0.89, 1.0)),
                (InstallationMethod::MethodB2, InstallationFactor::new(0.85, 1.0)),
                (InstallationMethod::MethodC, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::MethodD1, InstallationFactor::new(0.90, 1.1)),
                (InstallationMethod::MethodD2, InstallationFactor::new(0.95, 1.1)),
                (InstallationMethod::MethodE, InstallationFactor::new(1.11, 1.0)),
                (InstallationMethod::MethodF, InstallationFactor::new(1.17, 1.0)),
            ],
            default_installation: InstallationMethod::MethodC,
            device_rating_class_c: 70,
            temperature_reference: code_ref::IEC_TEMPERATURE,
            grouping_reference: code_ref::IEC_GROUPING,
            installation_reference: code_ref::IEC_METHODS,
        },
        small_conductor_caps: &[],
        references: CatalogReferences {
            ampacity: code_ref::IEC_AMPACITY,
            resistance: code_ref::IEC_RESISTANCE,
            voltage_drop: code_ref::IEC_VOLTAGE_DROP,
            conduit_fill: code_ref::IEC_CONDUIT,
            wire_area: code_ref::IEC_CONDUIT,
            devices: code_ref::IEC_OVERLOAD,
        },
    }
}
