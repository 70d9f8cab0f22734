//! BS 7671 catalog: copper mm² from Appendix 4, BS EN 60898 / BS 88 /
//! BS 3036 devices. Conduit and wire areas are shared with IEC 61386.

use super::conductors::{ConductorSpec, ConductorTable, InsulationSystem};
use super::devices::{DeviceFamily, DeviceKind};
use super::iec::{metric_conduits, metric_wire_areas, REACTANCE_OHM_PER_KM};
use super::{CatalogReferences, StandardCatalog};
use crate::application::ApplicationType::{Commercial, Industrial, Residential};
use crate::corrections::{
    CorrectionRules, GroupingTable, InstallationFactor, InstallationMethod, TemperatureTable,
};
use crate::standards::{code_ref, SizeSystem, Standard};
use crate::units::{AreaUnit, LengthUnit};

/// Tables 4D1A (70 °C thermoplastic) and 4E1A (90 °C thermosetting),
/// method C, single-phase; resistance Ω/km at 20 °C
const COPPER: &[(f64, f64, [f64; 2])] = &[
    (1.0, 18.1, [15.5, 19.0]),
    (1.5, 12.1, [20.0, 25.0]),
    (2.5, 7.41, [27.0, 33.0]),
    (4.0, 4.61, [37.0, 43.0]),
    (6.0, 3.08, [47.0, 59.0]),
    (10.0, 1.83, [65.0, 79.0]),
    (16.0, 1.15, [87.0, 104.0]),
    (25.0, 0.727, [114.0, 138.0]),
    (35.0, 0.524, [141.0, 172.0]),
    (50.0, 0.387, [182.0, 210.0]),
    (70.0, 0.268, [234.0, 271.0]),
    (95.0, 0.193, [284.0, 332.0]),
    (120.0, 0.153, [330.0, 387.0]),
    (150.0, 0.124, [381.0, 448.0]),
    (185.0, 0.0991, [436.0, 515.0]),
    (240.0, 0.0754, [515.0, 611.0]),
    (300.0, 0.0601, [594.0, 708.0]),
];

fn insulations() -> Vec<InsulationSystem> {
    vec![
        InsulationSystem::new("PVC", "Thermoplastic 70 °C (6491X)", 70, -15.0, false, "H07V"),
        InsulationSystem::new("XLPE", "Thermosetting 90 °C (6181Y/SWA)", 90, -40.0, true, "H07V"),
        InsulationSystem::new("LSF", "Low smoke and fume 70 °C (6491B)", 70, -15.0, false, "H07V"),
    ]
}

/// Table 4B1
fn temperature_tables() -> Vec<TemperatureTable> {
    vec![
        TemperatureTable {
            rating_c: 70,
            rungs: &[
                (25.0, 1.03),
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
                (25.0, 1.02),
                (30.0, 1.00),
                (35.0, 0.96),
                (40.0, 0.91),
                (45.0, 0.87),
                (50.0, 0.82),
                (55.0, 0.76),
                (60.0, 0.71),
                (65.0, 0.65),
                (70.0, 0.58),
            ],
        },
    ]
}

/// Table 4C1 row 1, bunched and enclosed
const GROUPING: GroupingTable = GroupingTable {
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

const MCB_RATINGS: &[f64] = &[6.0, 10.0, 16.0, 20.0, 25.0, 32.0, 40.0, 45.0, 50.0, 63.0];
const RCBO_RATINGS: &[f64] = &[6.0, 10.0, 16.0, 20.0, 25.0, 32.0, 40.0, 45.0];
const BS88_2_RATINGS: &[f64] = &[
    2.0, 4.0, 6.0, 10.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0,
    200.0, 250.0, 315.0, 400.0, 500.0, 630.0, 800.0,
];
const BS88_3_RATINGS: &[f64] = &[5.0, 15.0, 20.0, 30.0, 45.0, 60.0, 80.0, 100.0];
const BS3036_RATINGS: &[f64] = &[5.0, 15.0, 20.0, 30.0, 45.0, 60.0, 100.0];

fn devices() -> Vec<DeviceFamily> {
    vec![
        DeviceFamily {
            name: "MCB type B (BS EN 60898)",
            form_factor: "din_mcb_b",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: MCB_RATINGS,
            voltage_max: 400.0,
            applications: &[Residential, Commercial, Industrial],
            temperature_range_c: (-25.0, 55.0),
            interrupt_capacity_ka: 6.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::BS_DEVICES,
        },
        DeviceFamily {
            name: "RCBO type B (BS EN 61009)",
            form_factor: "din_rcbo",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: RCBO_RATINGS,
            voltage_max: 240.0,
            applications: &[Residential, Commercial],
            temperature_range_c: (-25.0, 40.0),
            interrupt_capacity_ka: 6.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::BS_DEVICES,
        },
        DeviceFamily {
            name: "BS 88-2 gG fuse",
            form_factor: "bs88_2",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: BS88_2_RATINGS,
            voltage_max: 415.0,
            applications: &[Commercial, Industrial],
            temperature_range_c: (-40.0, 70.0),
            interrupt_capacity_ka: 80.0,
            industrial_duty: true,
            thermal_runaway_protected: false,
            reference: code_ref::BS_DEVICES,
        },
        DeviceFamily {
            name: "BS 88-3 cartridge fuse",
            form_factor: "bs88_3",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: BS88_3_RATINGS,
            voltage_max: 240.0,
            applications: &[Residential],
            temperature_range_c: (-25.0, 60.0),
            interrupt_capacity_ka: 16.5,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::BS_DEVICES,
        },
        DeviceFamily {
            name: "BS 3036 semi-enclosed rewireable fuse",
            form_factor: "bs3036",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: BS3036_RATINGS,
            voltage_max: 240.0,
            applications: &[Residential],
            temperature_range_c: (-10.0, 40.0),
            interrupt_capacity_ka: 1.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::BS_DEVICES,
        },
    ]
}

pub(crate) fn catalog() -> StandardCatalog {
    let applications = vec![Residential, Commercial, Industrial];
    StandardCatalog {
        standard: Standard::Bs7671,
        size_system: SizeSystem::Metric,
        length_unit: LengthUnit::Meters,
        area_unit: AreaUnit::SquareMillimeters,
        applications: applications.clone(),
        insulations: insulations(),
        default_insulation: "PVC",
        conductors: ConductorTable {
            columns: vec![70, 90],
            rows: COPPER
                .iter()
                .map(|(mm2, r, amps)| ConductorSpec::metric(*mm2, *r, REACTANCE_OHM_PER_KM, amps))
                .collect(),
            reference_column: 0,
            applications,
            reference: code_ref::BS_AMPACITY.to_string(),
        },
        conduits: metric_conduits(),
        wire_areas: metric_wire_areas(),
        devices: devices(),
        corrections: CorrectionRules {
            standard: Standard::Bs7671,
            temperature_tables: temperature_tables(),
            grouping: GROUPING,
            installation: vec![
                (InstallationMethod::MethodA1, InstallationFactor::new(0.74, 1.0)),
                (InstallationMethod::MethodA2, InstallationFactor::new(0.70, 1.0)),
                (InstallationMethod::MethodB1, InstallationFactor::new(0.89, 1.0)),
                (InstallationMethod::MethodB2, InstallationFactor::new(0.86, 1.0)),
                (InstallationMethod::MethodC, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::MethodD1, InstallationFactor::new(0.88, 1.1)),
                (InstallationMethod::MethodE, InstallationFactor::new(1.07, 1.0)),
                (InstallationMethod::MethodF, InstallationFactor::new(1.13, 1.0)),
            ],
            default_installation: InstallationMethod::MethodC,
            device_rating_class_c: 70,
            temperature_reference: code_ref::BS_TEMPERATURE,
            grouping_reference: code_ref::BS_GROUPING,
            installation_reference: code_ref::BS_METHODS,
        },
        small_conductor_caps: &[],
        references: CatalogReferences {
            ampacity: code_ref::BS_AMPACITY,
            resistance: code_ref::IEC_RESISTANCE,
            voltage_drop: code_ref::BS_VOLTAGE_DROP,
            conduit_fill: code_ref::IEC_CONDUIT,
            wire_area: code_ref::IEC_CONDUIT,
            devices: code_ref::BS_DEVICES,
        },
    }
}
