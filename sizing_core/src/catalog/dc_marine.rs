//! Low-voltage DC marine catalog (ABYC E-11).

use super::conductors::{ConductorSpec, ConductorTable, InsulationSystem};
use super::dc_automotive::{areas_from_diameters, low_voltage_devices};
use super::nec;
use super::{CatalogReferences, StandardCatalog};
use crate::application::ApplicationType::{Battery, Led, Marine};
use crate::corrections::{
    CorrectionRules, GroupingTable, InstallationFactor, InstallationMethod, TemperatureTable,
};
use crate::standards::{code_ref, SizeSystem, Standard};
use crate::units::{AreaUnit, LengthUnit};

/// ABYC E-11 Table VI outside engine spaces, 75/90/105 °C
const BOAT_CABLE: &[(&str, f64, [f64; 3])] = &[
    ("18 AWG", 7.95, [10.0, 20.0, 20.0]),
    ("16 AWG", 4.99, [15.0, 25.0, 25.0]),
    ("14 AWG", 3.14, [20.0, 30.0, 35.0]),
    ("12 AWG", 1.98, [25.0, 40.0, 45.0]),
    ("10 AWG", 1.24, [40.0, 55.0, 60.0]),
    ("8 AWG", 0.778, [65.0, 70.0, 80.0]),
    ("6 AWG", 0.491, [95.0, 100.0, 120.0]),
    ("4 AWG", 0.308, [125.0, 135.0, 160.0]),
    ("2 AWG", 0.194, [170.0, 180.0, 210.0]),
    ("1 AWG", 0.154, [195.0, 210.0, 245.0]),
    ("1/0 AWG", 0.122, [230.0, 245.0, 285.0]),
    ("2/0 AWG", 0.0967, [265.0, 285.0, 330.0]),
    ("3/0 AWG", 0.0766, [310.0, 330.0, 385.0]),
    ("4/0 AWG", 0.0608, [360.0, 385.0, 445.0]),
];

/// UL 1426 tinned boat cable outside diameters (mm)
const BOAT_CABLE_DIAMETERS: &[(&str, f64)] = &[
    ("18 AWG", 2.8),
    ("16 AWG", 3.05),
    ("14 AWG", 3.43),
    ("12 AWG", 3.94),
    ("10 AWG", 4.57),
    ("8 AWG", 6.6),
    ("6 AWG", 7.62),
    ("4 AWG", 8.89),
    ("2 AWG", 10.7),
    ("1 AWG", 11.9),
    ("1/0 AWG", 13.0),
    ("2/0 AWG", 14.0),
    ("3/0 AWG", 15.5),
    ("4/0 AWG", 17.0),
];

pub(crate) fn catalog() -> StandardCatalog {
    let applications = vec![Marine, Led, Battery];
    let mut wire_areas = nec::wire_areas();
    wire_areas.extend(areas_from_diameters("BOAT", BOAT_CABLE_DIAMETERS));

    StandardCatalog {
        standard: Standard::DcMarine,
        size_system: SizeSystem::Awg,
        length_unit: LengthUnit::Feet,
        area_unit: AreaUnit::SquareInches,
        applications: applications.clone(),
        insulations: vec![
            InsulationSystem::new("BC5W2", "UL 1426 boat cable 105 °C", 105, -30.0, true, "BOAT"),
            InsulationSystem::new("UL1426", "Tinned boat cable 105 °C", 105, -30.0, true, "BOAT"),
            InsulationSystem::new("THWN-2", "Thermoplastic nylon jacket, wet 90 °C", 90, -10.0, true, "THHN"),
            InsulationSystem::new("THW", "Thermoplastic heat-resistant, wet", 75, -10.0, true, "THW"),
        ],
        default_insulation: "BC5W2",
        conductors: ConductorTable {
            columns: vec![75, 90, 105],
            rows: BOAT_CABLE
                .iter()
                .map(|(size, r, amps)| ConductorSpec::awg(size, *r, 0.0, amps))
                .collect(),
            reference_column: 2,
            applications,
            reference: code_ref::ABYC_E11_AMPACITY.to_string(),
        },
        conduits: nec::conduits(),
        wire_areas,
        devices: low_voltage_devices(code_ref::ABYC_E11_OCP),
        corrections: CorrectionRules {
            standard: Standard::DcMarine,
            temperature_tables: vec![
                TemperatureTable {
                    rating_c: 75,
                    rungs: &[(30.0, 1.00), (40.0, 0.88), (50.0, 0.75), (60.0, 0.58), (70.0, 0.33)],
                },
                TemperatureTable {
                    rating_c: 90,
                    rungs: &[
                        (30.0, 1.00),
                        (40.0, 0.91),
                        (50.0, 0.82),
                        (60.0, 0.71),
                        (70.0, 0.58),
                        (80.0, 0.41),
                    ],
                },
                TemperatureTable {
                    rating_c: 105,
                    rungs: &[
                        (30.0, 1.00),
                        (40.0, 0.94),
                        (50.0, 0.87),
                        (60.0, 0.79),
                        (70.0, 0.71),
                        (80.0, 0.61),
                    ],
                },
            ],
            // ABYC E-11 Table VI note: conductors bundled with others
            grouping: GroupingTable {
                rows: &[(2, 1.00), (3, 0.70), (6, 0.60), (24, 0.50), (25, 0.40)],
            },
            installation: vec![
                (InstallationMethod::FreeAir, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::Harness, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::Conduit, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::EngineCompartment, InstallationFactor::new(0.82, 1.2)),
            ],
            default_installation: InstallationMethod::FreeAir,
            device_rating_class_c: 105,
            temperature_reference: code_ref::ABYC_E11_AMPACITY,
            grouping_reference: code_ref::ABYC_E11_AMPACITY,
            installation_reference: code_ref::ABYC_E11_AMPACITY,
        },
        small_conductor_caps: &[],
        references: CatalogReferences {
            ampacity: code_ref::ABYC_E11_AMPACITY,
            resistance: code_ref::NEC_RESISTANCE,
            voltage_drop: code_ref::ABYC_E11_VOLTAGE_DROP,
            conduit_fill: code_ref::NEC_CONDUIT_FILL,
            wire_area: code_ref::NEC_WIRE_AREA,
            devices: code_ref::ABYC_E11_OCP,
        },
    }
}
