//! DC telecom power-plant catalog (-48 V): NEC copper, TPL/GMT fuses and
//! bullet breakers.

use super::conductors::InsulationSystem;
use super::devices::{DeviceFamily, DeviceKind};
use super::nec;
use super::{CatalogReferences, StandardCatalog};
use crate::application::ApplicationType::{Battery, Telecom};
use crate::corrections::{CorrectionRules, InstallationFactor, InstallationMethod};
use crate::standards::{code_ref, SizeSystem, Standard};
use crate::units::{AreaUnit, LengthUnit};

const TPL_RATINGS: &[f64] = &[
    70.0, 80.0, 90.0, 100.0, 125.0, 150.0, 175.0, 200.0, 225.0, 250.0, 300.0, 350.0, 400.0, 450.0,
    500.0, 600.0, 700.0, 800.0,
];
const GMT_RATINGS: &[f64] = &[
    0.25, 0.5, 0.75, 1.0, 1.33, 2.0, 3.0, 4.0, 5.0, 7.5, 10.0, 12.0, 15.0,
];
const BULLET_RATINGS: &[f64] = &[
    1.0, 3.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0,
];

fn devices() -> Vec<DeviceFamily> {
    vec![
        DeviceFamily {
            name: "GMT alarm-indicating fuse",
            form_factor: "gmt",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: GMT_RATINGS,
            voltage_max: 60.0,
            applications: &[Telecom],
            temperature_range_c: (-5.0, 55.0),
            interrupt_capacity_ka: 0.45,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::TELCORDIA_GR513,
        },
        DeviceFamily {
            name: "Bullet-style DC breaker",
            form_factor: "bullet_breaker",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: BULLET_RATINGS,
            voltage_max: 80.0,
            applications: &[Telecom, Battery],
            temperature_range_c: (-5.0, 55.0),
            interrupt_capacity_ka: 10.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::ANSI_T1_311,
        },
        DeviceFamily {
            name: "TPL telecom protector fuse",
            form_factor: "tpl",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: TPL_RATINGS,
            voltage_max: 170.0,
            applications: &[Telecom, Battery],
            temperature_range_c: (-40.0, 70.0),
            interrupt_capacity_ka: 100.0,
            industrial_duty: true,
            thermal_runaway_protected: true,
            reference: code_ref::TELCORDIA_GR513,
        },
    ]
}

pub(crate) fn catalog() -> StandardCatalog {
    let applications = vec![Telecom, Battery];
    StandardCatalog {
        standard: Standard::DcTelecom,
        size_system: SizeSystem::Awg,
        length_unit: LengthUnit::Feet,
        area_unit: AreaUnit::SquareInches,
        applications: applications.clone(),
        insulations: vec![
            InsulationSystem::new("RHW-2", "Thermoset rubber, wet 90 °C", 90, -40.0, true, "THW"),
            InsulationSystem::new("THHN", "Thermoplastic high-heat nylon jacket, dry", 90, -10.0, false, "THHN"),
            InsulationSystem::new("XHHW-2", "Cross-linked polyethylene, wet 90 °C", 90, -40.0, true, "XHHW"),
        ],
        default_insulation: "RHW-2",
        conductors: nec::copper_table(applications),
        conduits: nec::conduits(),
        wire_areas: nec::wire_areas(),
        devices: devices(),
        corrections: CorrectionRules {
            standard: Standard::DcTelecom,
            temperature_tables: nec::temperature_tables(),
            grouping: nec::GROUPING,
            installation: vec![
                (InstallationMethod::CableTray, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::Conduit, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::FreeAir, InstallationFactor::new(1.0, 1.0)),
            ],
            default_installation: InstallationMethod::CableTray,
            device_rating_class_c: 90,
            temperature_reference: code_ref::NEC_TEMPERATURE,
            grouping_reference: code_ref::NEC_GROUPING,
            installation_reference: code_ref::TELCORDIA_GR513,
        },
        small_conductor_caps: nec::SMALL_CONDUCTOR_CAPS,
        references: CatalogReferences {
            ampacity: code_ref::NEC_AMPACITY,
            resistance: code_ref::NEC_RESISTANCE,
            voltage_drop: code_ref::ANSI_T1_311,
            conduit_fill: code_ref::NEC_CONDUIT_FILL,
            wire_area: code_ref::NEC_WIRE_AREA,
            devices: code_ref::TELCORDIA_GR513,
        },
    }
}
