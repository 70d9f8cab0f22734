//! DC photovoltaic catalog (NEC Article 690): PV wire in free air, gPV
//! fuses and DC-rated breakers.

use super::conductors::{ConductorSpec, ConductorTable, InsulationSystem};
use super::devices::{DeviceFamily, DeviceKind};
use super::nec;
use super::{CatalogReferences, StandardCatalog};
use crate::application::ApplicationType::{Battery, Solar};
use crate::corrections::{CorrectionRules, InstallationFactor, InstallationMethod};
use crate::standards::{code_ref, SizeSystem, Standard};
use crate::units::{AreaUnit, LengthUnit};

/// Table 310.17 copper in free air (75/90 °C), Table 8 resistance
const PV_WIRE: &[(&str, f64, [f64; 2])] = &[
    ("14 AWG", 3.14, [30.0, 35.0]),
    ("12 AWG", 1.98, [35.0, 40.0]),
    ("10 AWG", 1.24, [50.0, 55.0]),
    ("8 AWG", 0.778, [70.0, 80.0]),
    ("6 AWG", 0.491, [95.0, 105.0]),
    ("4 AWG", 0.308, [125.0, 140.0]),
    ("3 AWG", 0.245, [145.0, 165.0]),
    ("2 AWG", 0.194, [170.0, 190.0]),
    ("1 AWG", 0.154, [195.0, 220.0]),
    ("1/0 AWG", 0.122, [230.0, 260.0]),
    ("2/0 AWG", 0.0967, [265.0, 300.0]),
    ("3/0 AWG", 0.0766, [310.0, 350.0]),
    ("4/0 AWG", 0.0608, [360.0, 405.0]),
    ("250 kcmil", 0.0515, [405.0, 455.0]),
    ("300 kcmil", 0.0429, [445.0, 500.0]),
    ("350 kcmil", 0.0367, [505.0, 570.0]),
    ("400 kcmil", 0.0321, [545.0, 615.0]),
    ("500 kcmil", 0.0258, [620.0, 700.0]),
];

const GPV_RATINGS: &[f64] = &[
    1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 12.0, 15.0, 20.0, 25.0, 30.0, 32.0,
];
const NH_GPV_RATINGS: &[f64] = &[
    40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 315.0, 400.0, 500.0, 630.0,
];
const DC_MCB_RATINGS: &[f64] = &[
    1.0, 2.0, 3.0, 4.0, 6.0, 10.0, 16.0, 20.0, 25.0, 32.0, 40.0, 50.0, 63.0,
];
const CLASS_T_RATINGS: &[f64] = &[
    30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 125.0, 150.0, 175.0, 200.0, 225.0,
    250.0, 300.0, 350.0, 400.0,
];

fn devices() -> Vec<DeviceFamily> {
    vec![
        DeviceFamily {
            name: "gPV cylindrical fuse 10x38",
            form_factor: "gpv_10x38",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: GPV_RATINGS,
            voltage_max: 1500.0,
            applications: &[Solar],
            temperature_range_c: (-40.0, 90.0),
            interrupt_capacity_ka: 30.0,
            industrial_duty: true,
            thermal_runaway_protected: false,
            reference: code_ref::IEC_60269_6,
        },
        DeviceFamily {
            name: "NH gPV fuse link",
            form_factor: "nh_gpv",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: NH_GPV_RATINGS,
            voltage_max: 1500.0,
            applications: &[Solar, Battery],
            temperature_range_c: (-40.0, 90.0),
            interrupt_capacity_ka: 50.0,
            industrial_duty: true,
            thermal_runaway_protected: false,
            reference: code_ref::IEC_60269_6,
        },
        DeviceFamily {
            name: "DC miniature circuit breaker",
            form_factor: "dc_mcb",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: DC_MCB_RATINGS,
            voltage_max: 1000.0,
            applications: &[Solar, Battery],
            temperature_range_c: (-25.0, 70.0),
            interrupt_capacity_ka: 6.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::NEC_PV_OCPD,
        },
        DeviceFamily {
            name: "Class T fast-acting fuse",
            form_factor: "class_t",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: CLASS_T_RATINGS,
            voltage_max: 160.0,
            applications: &[Solar, Battery],
            temperature_range_c: (-40.0, 70.0),
            interrupt_capacity_ka: 20.0,
            industrial_duty: false,
            thermal_runaway_protected: true,
            reference: code_ref::NEC_STORAGE_BATTERY,
        },
    ]
}

pub(crate) fn catalog() -> StandardCatalog {
    let applications = vec![Solar, Battery];
    StandardCatalog {
        standard: Standard::DcSolar,
        size_system: SizeSystem::Awg,
        length_unit: LengthUnit::Feet,
        area_unit: AreaUnit::SquareInches,
        applications: applications.clone(),
        insulations: vec![
            InsulationSystem::new("PV", "UL 4703 photovoltaic wire", 90, -40.0, true, "THW"),
            InsulationSystem::new("USE-2", "Underground service entrance", 90, -40.0, true, "THW"),
            InsulationSystem::new("RHW-2", "Thermoset rubber, wet 90 °C", 90, -40.0, true, "THW"),
            InsulationSystem::new("THWN-2", "Thermoplastic nylon jacket, wet 90 °C", 90, -10.0, true, "THHN"),
        ],
        default_insulation: "PV",
        conductors: ConductorTable {
            columns: vec![75, 90],
            rows: PV_WIRE
                .iter()
                .map(|(size, r, amps)| ConductorSpec::awg(size, *r, 0.0, amps))
                .collect(),
            reference_column: 0,
            applications,
            reference: code_ref::NEC_FREE_AIR_AMPACITY.to_string(),
        },
        conduits: nec::conduits(),
        wire_areas: nec::wire_areas(),
        devices: devices(),
        corrections: CorrectionRules {
            standard: Standard::DcSolar,
            temperature_tables: nec::temperature_tables(),
            grouping: nec::GROUPING,
            installation: vec![
                (InstallationMethod::FreeAir, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::Conduit, InstallationFactor::new(0.76, 1.0)),
                (InstallationMethod::RooftopConduit, InstallationFactor::new(0.62, 1.1)),
                (InstallationMethod::DirectBurial, InstallationFactor::new(0.80, 1.1)),
                (InstallationMethod::CableTray, InstallationFactor::new(0.90, 1.0)),
            ],
            default_installation: InstallationMethod::FreeAir,
            device_rating_class_c: 90,
            temperature_reference: code_ref::NEC_TEMPERATURE,
            grouping_reference: code_ref::NEC_GROUPING,
            installation_reference: code_ref::NEC_ROOFTOP,
        },
        small_conductor_caps: nec::SMALL_CONDUCTOR_CAPS,
        references: CatalogReferences {
            ampacity: code_ref::NEC_FREE_AIR_AMPACITY,
            resistance: code_ref::NEC_RESISTANCE,
            voltage_drop: code_ref::NEC_VOLTAGE_DROP,
            conduit_fill: code_ref::NEC_CONDUIT_FILL,
            wire_area: code_ref::UL_4703,
            devices: code_ref::NEC_PV_OCPD,
        },
    }
}
