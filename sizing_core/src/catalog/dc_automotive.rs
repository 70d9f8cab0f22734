//! Low-voltage DC automotive catalog: SAE J1128 cross-linked wire at
//! 125 °C, ISO 8820 blade fuses and battery-terminal protection.

use super::conductors::{ConductorSpec, ConductorTable, InsulationSystem};
use super::conduits::{wire_rows, WireArea};
use super::devices::{DeviceFamily, DeviceKind, FuseType};
use super::nec;
use super::{CatalogReferences, StandardCatalog};
use crate::application::ApplicationType::{Automotive, Battery, Led, Marine};
use crate::corrections::{
    CorrectionRules, GroupingTable, InstallationFactor, InstallationMethod, TemperatureTable,
};
use crate::standards::{code_ref, SizeSystem, Standard};
use crate::units::{circle_area, AreaUnit, LengthUnit};

const MM_PER_INCH: f64 = 25.4;

/// Size, resistance (Ω/1000 ft), continuous and intermittent ampacity at 125 °C
const GXL: &[(&str, f64, f64, f64)] = &[
    ("18 AWG", 7.95, 10.0, 15.0),
    ("16 AWG", 4.99, 13.0, 20.0),
    ("14 AWG", 3.14, 17.0, 25.0),
    ("12 AWG", 1.98, 23.0, 35.0),
    ("10 AWG", 1.24, 33.0, 50.0),
    ("8 AWG", 0.778, 46.0, 70.0),
    ("6 AWG", 0.491, 60.0, 90.0),
    ("4 AWG", 0.308, 80.0, 120.0),
    ("2 AWG", 0.194, 100.0, 150.0),
    ("1 AWG", 0.154, 125.0, 185.0),
    ("1/0 AWG", 0.122, 150.0, 225.0),
    ("2/0 AWG", 0.0967, 175.0, 260.0),
    ("3/0 AWG", 0.0766, 200.0, 300.0),
    ("4/0 AWG", 0.0608, 225.0, 340.0),
];

/// SAE J1128 GXL maximum outside diameters (mm)
const GXL_DIAMETERS: &[(&str, f64)] = &[
    ("18 AWG", 2.23),
    ("16 AWG", 2.49),
    ("14 AWG", 2.90),
    ("12 AWG", 3.48),
    ("10 AWG", 4.32),
    ("8 AWG", 5.71),
    ("6 AWG", 6.86),
    ("4 AWG", 8.20),
    ("2 AWG", 9.80),
    ("1 AWG", 11.0),
    ("1/0 AWG", 12.2),
    ("2/0 AWG", 13.5),
    ("3/0 AWG", 15.0),
    ("4/0 AWG", 16.6),
];

/// Wire areas in in² from outside diameters in mm
pub(crate) fn areas_from_diameters(area_group: &str, diameters: &[(&str, f64)]) -> Vec<WireArea> {
    let areas: Vec<(&str, f64)> = diameters
        .iter()
        .map(|(size, od_mm)| (*size, circle_area(od_mm / MM_PER_INCH)))
        .collect();
    wire_rows(area_group, &areas)
}

const MICRO_RATINGS: &[f64] = &[2.0, 3.0, 4.0, 5.0, 7.5, 10.0, 15.0];
const ATO_RATINGS: &[f64] = &[
    1.0, 2.0, 3.0, 4.0, 5.0, 7.5, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0,
];
const ATM_RATINGS: &[f64] = &[2.0, 3.0, 4.0, 5.0, 7.5, 10.0, 15.0, 20.0, 25.0, 30.0];
const MAXI_RATINGS: &[f64] = &[20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 100.0, 120.0];
const ANL_RATINGS: &[f64] = &[
    35.0, 40.0, 50.0, 60.0, 80.0, 100.0, 125.0, 150.0, 175.0, 200.0, 225.0, 250.0, 300.0, 325.0,
    350.0, 400.0, 500.0,
];
const MRBF_RATINGS: &[f64] = &[
    30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 125.0, 150.0, 175.0, 200.0, 225.0, 250.0,
    300.0,
];
const SURFACE_BREAKER_RATINGS: &[f64] = &[
    25.0, 30.0, 35.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 120.0, 135.0, 150.0,
];

/// Blade fuses, battery-terminal fuses and surface-mount breakers used on
/// 12/24 V vehicle and vessel systems
pub(crate) fn low_voltage_devices(reference: &'static str) -> Vec<DeviceFamily> {
    let blade = |name: &'static str,
                 form_factor: &'static str,
                 fuse_type: FuseType,
                 ratings: &'static [f64]| DeviceFamily {
        name,
        form_factor,
        kind: DeviceKind::Fuse,
        fuse_type: Some(fuse_type),
        ratings,
        voltage_max: 32.0,
        applications: &[Automotive, Marine, Led],
        temperature_range_c: (-40.0, 125.0),
        interrupt_capacity_ka: 1.0,
        industrial_duty: false,
        thermal_runaway_protected: false,
        reference,
    };
    vec![
        blade("Micro2 blade fuse", "blade_micro2", FuseType::Micro, MICRO_RATINGS),
        blade("ATO regular blade fuse", "blade_ato", FuseType::Regular, ATO_RATINGS),
        blade("ATM mini blade fuse", "blade_atm", FuseType::Regular, ATM_RATINGS),
        blade("Maxi blade fuse", "blade_maxi", FuseType::Maxi, MAXI_RATINGS),
        DeviceFamily {
            name: "ANL bolt-down fuse",
            form_factor: "anl",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: ANL_RATINGS,
            voltage_max: 32.0,
            applications: &[Automotive, Marine, Battery],
            temperature_range_c: (-40.0, 85.0),
            interrupt_capacity_ka: 6.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference,
        },
        DeviceFamily {
            name: "MRBF battery-terminal fuse",
            form_factor: "mrbf",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: MRBF_RATINGS,
            voltage_max: 58.0,
            applications: &[Automotive, Marine, Battery],
            temperature_range_c: (-40.0, 85.0),
            interrupt_capacity_ka: 10.0,
            industrial_duty: false,
            thermal_runaway_protected: true,
            reference,
        },
        DeviceFamily {
            name: "Surface-mount thermal breaker",
            form_factor: "surface_breaker",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: SURFACE_BREAKER_RATINGS,
            voltage_max: 48.0,
            applications: &[Automotive, Marine, Battery, Led],
            temperature_range_c: (-40.0, 85.0),
            interrupt_capacity_ka: 3.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference,
        },
    ]
}

pub(crate) fn catalog() -> StandardCatalog {
    let applications = vec![Automotive, Led, Battery];
    StandardCatalog {
        standard: Standard::DcAutomotive,
        size_system: SizeSystem::Awg,
        length_unit: LengthUnit::Feet,
        area_unit: AreaUnit::SquareInches,
        applications: applications.clone(),
        insulations: vec![
            InsulationSystem::new("GXL", "Cross-linked polyethylene, general wall", 125, -40.0, true, "GXL"),
            InsulationSystem::new("SXL", "Cross-linked polyethylene, heavy wall", 125, -40.0, true, "GXL"),
            InsulationSystem::new("TXL", "Cross-linked polyethylene, thin wall", 125, -40.0, true, "GXL"),
        ],
        default_insulation: "GXL",
        conductors: ConductorTable {
            columns: vec![125],
            rows: GXL
                .iter()
                .map(|(size, r, cont, int)| {
                    ConductorSpec::awg(size, *r, 0.0, &[*cont]).with_intermittent(*int)
                })
                .collect(),
            reference_column: 0,
            applications,
            reference: code_ref::SAE_J1128.to_string(),
        },
        conduits: nec::conduits(),
        wire_areas: areas_from_diameters("GXL", GXL_DIAMETERS),
        devices: low_voltage_devices(code_ref::ISO_8820),
        corrections: CorrectionRules {
            standard: Standard::DcAutomotive,
            temperature_tables: vec![TemperatureTable {
                rating_c: 125,
                rungs: &[
                    (30.0, 1.00),
                    (40.0, 0.95),
                    (50.0, 0.90),
                    (60.0, 0.85),
                    (70.0, 0.79),
                    (80.0, 0.71),
                    (90.0, 0.64),
                    (100.0, 0.55),
                    (110.0, 0.45),
                    (120.0, 0.32),
                ],
            }],
            grouping: GroupingTable {
                rows: &[
                    (1, 1.00),
                    (3, 0.85),
                    (6, 0.75),
                    (9, 0.70),
                    (15, 0.65),
                    (24, 0.60),
                    (30, 0.55),
                ],
            },
            installation: vec![
                (InstallationMethod::Harness, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::FreeAir, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::Conduit, InstallationFactor::new(0.9, 1.0)),
                (InstallationMethod::EngineCompartment, InstallationFactor::new(0.8, 1.2)),
            ],
            default_installation: InstallationMethod::Harness,
            device_rating_class_c: 125,
            temperature_reference: code_ref::SAE_J1128,
            grouping_reference: code_ref::SAE_J1128,
            installation_reference: code_ref::SAE_J1128,
        },
        small_conductor_caps: &[],
        references: CatalogReferences {
            ampacity: code_ref::SAE_J1128,
            resistance: code_ref::NEC_RESISTANCE,
            voltage_drop: code_ref::SAE_J1128,
            conduit_fill: code_ref::NEC_CONDUIT_FILL,
            wire_area: code_ref::SAE_J1128,
            devices: code_ref::ISO_8820,
        },
    }
}
