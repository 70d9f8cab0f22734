//! NEC (NFPA 70) catalog: copper AWG/kcmil, Chapter 9 raceway and wire
//! areas, 240.6(A) device ladders.

use super::conductors::{ConductorSpec, ConductorTable, InsulationSystem};
use super::conduits::{conduit_rows, wire_rows, ConduitSpec, ConduitType, WireArea};
use super::devices::{DeviceFamily, DeviceKind};
use super::{CatalogReferences, StandardCatalog};
use crate::application::ApplicationType::{self, Commercial, Industrial, Residential};
use crate::corrections::{
    CorrectionRules, GroupingTable, InstallationFactor, InstallationMethod, TemperatureTable,
};
use crate::standards::{code_ref, SizeSystem, Standard};
use crate::units::{AreaUnit, LengthUnit};

/// Table 310.16 copper (60/75/90 °C), Table 8 stranded DC resistance and
/// Table 9 reactance (PVC conduit), all per 1000 ft.
const COPPER: &[(&str, f64, f64, [f64; 3])] = &[
    ("14 AWG", 3.14, 0.058, [15.0, 20.0, 25.0]),
    ("12 AWG", 1.98, 0.054, [20.0, 25.0, 30.0]),
    ("10 AWG", 1.24, 0.050, [30.0, 35.0, 40.0]),
    ("8 AWG", 0.778, 0.052, [40.0, 50.0, 55.0]),
    ("6 AWG", 0.491, 0.051, [55.0, 65.0, 75.0]),
    ("4 AWG", 0.308, 0.048, [70.0, 85.0, 95.0]),
    ("3 AWG", 0.245, 0.047, [85.0, 100.0, 115.0]),
    ("2 AWG", 0.194, 0.045, [95.0, 115.0, 130.0]),
    ("1 AWG", 0.154, 0.046, [110.0, 130.0, 145.0]),
    ("1/0 AWG", 0.122, 0.044, [125.0, 150.0, 170.0]),
    ("2/0 AWG", 0.0967, 0.043, [145.0, 175.0, 195.0]),
    ("3/0 AWG", 0.0766, 0.042, [165.0, 200.0, 225.0]),
    ("4/0 AWG", 0.0608, 0.041, [195.0, 230.0, 260.0]),
    ("250 kcmil", 0.0515, 0.041, [215.0, 255.0, 290.0]),
    ("300 kcmil", 0.0429, 0.041, [240.0, 285.0, 320.0]),
    ("350 kcmil", 0.0367, 0.040, [260.0, 310.0, 350.0]),
    ("400 kcmil", 0.0321, 0.040, [280.0, 335.0, 380.0]),
    ("500 kcmil", 0.0258, 0.039, [320.0, 380.0, 430.0]),
    ("600 kcmil", 0.0214, 0.039, [350.0, 420.0, 475.0]),
    ("700 kcmil", 0.0184, 0.039, [385.0, 460.0, 520.0]),
    ("750 kcmil", 0.0171, 0.038, [400.0, 475.0, 535.0]),
];

pub(crate) fn copper_table(applications: Vec<ApplicationType>) -> ConductorTable {
    ConductorTable {
        columns: vec![60, 75, 90],
        rows: COPPER
            .iter()
            .map(|(size, r, x, amps)| ConductorSpec::awg(size, *r, *x, amps))
            .collect(),
        reference_column: 1,
        applications,
        reference: code_ref::NEC_AMPACITY.to_string(),
    }
}

pub(crate) fn insulations() -> Vec<InsulationSystem> {
    vec![
        InsulationSystem::new("TW", "Thermoplastic, wet", 60, -10.0, true, "THW"),
        InsulationSystem::new("THW", "Thermoplastic heat-resistant, wet", 75, -10.0, true, "THW"),
        InsulationSystem::new("THWN", "Thermoplastic nylon jacket, wet", 75, -10.0, true, "THHN"),
        InsulationSystem::new("THHN", "Thermoplastic high-heat nylon jacket, dry", 90, -10.0, false, "THHN"),
        InsulationSystem::new("THWN-2", "Thermoplastic nylon jacket, wet 90 °C", 90, -10.0, true, "THHN"),
        InsulationSystem::new("XHHW", "Cross-linked polyethylene, dry 90 °C", 90, -40.0, false, "XHHW"),
        InsulationSystem::new("XHHW-2", "Cross-linked polyethylene, wet 90 °C", 90, -40.0, true, "XHHW"),
        InsulationSystem::new("RHW", "Thermoset rubber, wet", 75, -40.0, true, "THW"),
        InsulationSystem::new("RHW-2", "Thermoset rubber, wet 90 °C", 90, -40.0, true, "THW"),
        InsulationSystem::new("USE-2", "Underground service entrance", 90, -40.0, true, "THW"),
    ]
}

/// Chapter 9 Table 4 internal areas (in², 100 %)
pub(crate) fn conduits() -> Vec<ConduitSpec> {
    let mut rows = conduit_rows(
        ConduitType::Emt,
        &[
            ("1/2", 0.304),
            ("3/4", 0.533),
            ("1", 0.864),
            ("1-1/4", 1.496),
            ("1-1/2", 2.036),
            ("2", 3.356),
            ("2-1/2", 5.858),
            ("3", 8.846),
            ("3-1/2", 11.545),
            ("4", 14.753),
        ],
    );
    rows.extend(conduit_rows(
        ConduitType::Rmc,
        &[
            ("1/2", 0.314),
            ("3/4", 0.549),
            ("1", 0.887),
            ("1-1/4", 1.526),
            ("1-1/2", 2.071),
            ("2", 3.408),
            ("2-1/2", 4.866),
            ("3", 7.499),
            ("3-1/2", 10.010),
            ("4", 12.882),
            ("5", 20.212),
            ("6", 29.158),
        ],
    ));
    rows.extend(conduit_rows(
        ConduitType::Imc,
        &[
            ("1/2", 0.342),
            ("3/4", 0.586),
            ("1", 0.959),
            ("1-1/4", 1.647),
            ("1-1/2", 2.225),
            ("2", 3.630),
            ("2-1/2", 5.135),
            ("3", 7.922),
            ("3-1/2", 10.584),
            ("4", 13.631),
        ],
    ));
    rows.extend(conduit_rows(
        ConduitType::PvcSchedule40,
        &[
            ("1/2", 0.285),
            ("3/4", 0.508),
            ("1", 0.832),
            ("1-1/4", 1.453),
            ("1-1/2", 1.986),
            ("2", 3.291),
            ("2-1/2", 4.695),
            ("3", 7.268),
            ("3-1/2", 9.737),
            ("4", 12.554),
            ("5", 19.761),
            ("6", 28.567),
        ],
    ));
    rows.extend(conduit_rows(
        ConduitType::PvcSchedule80,
        &[
            ("1/2", 0.217),
            ("3/4", 0.409),
            ("1", 0.688),
            ("1-1/4", 1.237),
            ("1-1/2", 1.711),
            ("2", 2.874),
            ("2-1/2", 4.119),
            ("3", 6.442),
            ("3-1/2", 8.688),
            ("4", 11.258),
            ("5", 17.855),
            ("6", 25.598),
        ],
    ));
    rows.extend(conduit_rows(
        ConduitType::Fmc,
        &[
            ("3/8", 0.116),
            ("1/2", 0.317),
            ("3/4", 0.533),
            ("1", 0.817),
            ("1-1/4", 1.277),
            ("1-1/2", 1.858),
            ("2", 3.269),
            ("2-1/2", 4.909),
            ("3", 7.069),
            ("3-1/2", 9.621),
            ("4", 12.566),
        ],
    ));
    rows
}

/// Chapter 9 Table 5 insulated conductor areas (in²)
pub(crate) fn wire_areas() -> Vec<WireArea> {
    let mut rows = wire_rows(
        "THHN",
        &[
            ("14 AWG", 0.0097),
            ("12 AWG", 0.0133),
            ("10 AWG", 0.0211),
            ("8 AWG", 0.0366),
            ("6 AWG", 0.0507),
            ("4 AWG", 0.0824),
            ("3 AWG", 0.0973),
            ("2 AWG", 0.1158),
            ("1 AWG", 0.1562),
            ("1/0 AWG", 0.1855),
            ("2/0 AWG", 0.2223),
            ("3/0 AWG", 0.2679),
            ("4/0 AWG", 0.3237),
            ("250 kcmil", 0.3970),
            ("300 kcmil", 0.4608),
            ("350 kcmil", 0.5242),
            ("400 kcmil", 0.5863),
            ("500 kcmil", 0.7073),
            ("600 kcmil", 0.8676),
            ("700 kcmil", 0.9887),
            ("750 kcmil", 1.0496),
        ],
    );
    // THW row of Table 5, shared with TW and RHW/RHW-2 without outer covering
    rows.extend(wire_rows(
        "THW",
        &[
            ("14 AWG", 0.0209),
            ("12 AWG", 0.0260),
            ("10 AWG", 0.0333),
            ("8 AWG", 0.0556),
            ("6 AWG", 0.0726),
            ("4 AWG", 0.0973),
            ("3 AWG", 0.1134),
            ("2 AWG", 0.1333),
            ("1 AWG", 0.1901),
            ("1/0 AWG", 0.2223),
            ("2/0 AWG", 0.2624),
            ("3/0 AWG", 0.3117),
            ("4/0 AWG", 0.3718),
            ("250 kcmil", 0.4596),
            ("300 kcmil", 0.5281),
            ("350 kcmil", 0.5958),
            ("400 kcmil", 0.6619),
            ("500 kcmil", 0.7901),
            ("600 kcmil", 0.9729),
            ("700 kcmil", 1.1010),
            ("750 kcmil", 1.1652),
        ],
    ));
    rows.extend(wire_rows(
        "XHHW",
        &[
            ("14 AWG", 0.0139),
            ("12 AWG", 0.0181),
            ("10 AWG", 0.0243),
            ("8 AWG", 0.0437),
            ("6 AWG", 0.0590),
            ("4 AWG", 0.0814),
            ("3 AWG", 0.0962),
            ("2 AWG", 0.1146),
            ("1 AWG", 0.1534),
            ("1/0 AWG", 0.1825),
            ("2/0 AWG", 0.2190),
            ("3/0 AWG", 0.2642),
            ("4/0 AWG", 0.3197),
            ("250 kcmil", 0.3904),
            ("300 kcmil", 0.4536),
            ("350 kcmil", 0.5166),
            ("400 kcmil", 0.5782),
            ("500 kcmil", 0.6984),
            ("600 kcmil", 0.8709),
            ("700 kcmil", 0.9923),
            ("750 kcmil", 1.0532),
        ],
    ));
    rows
}

/// 310.15(B)(1) ambient correction, 30 °C base
pub(crate) fn temperature_tables() -> Vec<TemperatureTable> {
    vec![
        TemperatureTable {
            rating_c: 60,
            rungs: &[
                (10.0, 1.29),
                (15.0, 1.22),
                (20.0, 1.15),
                (25.0, 1.08),
                (30.0, 1.00),
                (35.0, 0.91),
                (40.0, 0.82),
                (45.0, 0.71),
                (50.0, 0.58),
                (55.0, 0.41),
            ],
        },
        TemperatureTable {
            rating_c: 75,
            rungs: &[
                (10.0, 1.20),
                (15.0, 1.15),
                (20.0, 1.11),
                (25.0, 1.05),
                (30.0, 1.00),
                (35.0, 0.94),
                (40.0, 0.88),
                (45.0, 0.82),
                (50.0, 0.75),
                (55.0, 0.67),
                (60.0, 0.58),
                (70.0, 0.33),
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

/// 310.15(C)(1) more than three current-carrying conductors
pub(crate) const GROUPING: GroupingTable = GroupingTable {
    rows: &[
        (3, 1.00),
        (6, 0.80),
        (9, 0.70),
        (20, 0.50),
        (30, 0.45),
        (40, 0.40),
        (41, 0.35),
    ],
};

/// 240.4(D) small-conductor overcurrent limits
pub(crate) const SMALL_CONDUCTOR_CAPS: &[(&str, f64)] =
    &[("14 AWG", 15.0), ("12 AWG", 20.0), ("10 AWG", 30.0)];

const BREAKER_RATINGS: &[f64] = &[
    15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 125.0,
    150.0, 175.0, 200.0, 225.0,
];

const MCCB_RATINGS: &[f64] = &[
    15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 125.0,
    150.0, 175.0, 200.0, 225.0, 250.0, 300.0, 350.0, 400.0, 450.0, 500.0, 600.0, 700.0, 800.0,
    1000.0, 1200.0,
];

const FUSE_RATINGS: &[f64] = &[
    1.0, 3.0, 6.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 60.0, 70.0, 80.0, 90.0,
    100.0, 110.0, 125.0, 150.0, 175.0, 200.0, 225.0, 250.0, 300.0, 350.0, 400.0, 450.0, 500.0,
    600.0,
];

fn devices() -> Vec<DeviceFamily> {
    vec![
        DeviceFamily {
            name: "Plug-on branch breaker",
            form_factor: "plug_on",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: BREAKER_RATINGS,
            voltage_max: 240.0,
            applications: &[Residential, Commercial],
            temperature_range_c: (-25.0, 60.0),
            interrupt_capacity_ka: 10.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::NEC_STANDARD_RATINGS,
        },
        DeviceFamily {
            name: "Bolt-on panelboard breaker",
            form_factor: "bolt_on",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: BREAKER_RATINGS,
            voltage_max: 480.0,
            applications: &[Residential, Commercial, Industrial],
            temperature_range_c: (-25.0, 60.0),
            interrupt_capacity_ka: 14.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::NEC_STANDARD_RATINGS,
        },
        DeviceFamily {
            name: "Molded-case circuit breaker",
            form_factor: "mccb",
            kind: DeviceKind::CircuitBreaker,
            fuse_type: None,
            ratings: MCCB_RATINGS,
            voltage_max: 600.0,
            applications: &[Commercial, Industrial],
            temperature_range_c: (-25.0, 70.0),
            interrupt_capacity_ka: 35.0,
            industrial_duty: true,
            thermal_runaway_protected: false,
            reference: code_ref::NEC_STANDARD_RATINGS,
        },
        DeviceFamily {
            name: "Class J time-delay fuse",
            form_factor: "class_j",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: FUSE_RATINGS,
            voltage_max: 600.0,
            applications: &[Commercial, Industrial],
            temperature_range_c: (-40.0, 70.0),
            interrupt_capacity_ka: 200.0,
            industrial_duty: true,
            thermal_runaway_protected: false,
            reference: code_ref::NEC_STANDARD_RATINGS,
        },
        DeviceFamily {
            name: "Class RK5 dual-element fuse",
            form_factor: "class_rk5",
            kind: DeviceKind::Fuse,
            fuse_type: None,
            ratings: FUSE_RATINGS,
            voltage_max: 600.0,
            applications: &[Commercial, Industrial],
            temperature_range_c: (-40.0, 70.0),
            interrupt_capacity_ka: 200.0,
            industrial_duty: false,
            thermal_runaway_protected: false,
            reference: code_ref::NEC_STANDARD_RATINGS,
        },
    ]
}

pub(crate) fn catalog() -> StandardCatalog {
    let applications = vec![Residential, Commercial, Industrial];
    StandardCatalog {
        standard: Standard::Nec,
        size_system: SizeSystem::Awg,
        length_unit: LengthUnit::Feet,
        area_unit: AreaUnit::SquareInches,
        applications: applications.clone(),
        insulations: insulations(),
        default_insulation: "THHN",
        conductors: copper_table(applications),
        conduits: conduits(),
        wire_areas: wire_areas(),
        devices: devices(),
        corrections: CorrectionRules {
            standard: Standard::Nec,
            temperature_tables: temperature_tables(),
            grouping: GROUPING,
            installation: vec![
                (InstallationMethod::Conduit, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::CableTray, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::FreeAir, InstallationFactor::new(1.0, 1.0)),
                (InstallationMethod::DirectBurial, InstallationFactor::new(1.0, 1.1)),
                (InstallationMethod::RooftopConduit, InstallationFactor::new(0.71, 1.0)),
            ],
            default_installation: InstallationMethod::Conduit,
            device_rating_class_c: 75,
            temperature_reference: code_ref::NEC_TEMPERATURE,
            grouping_reference: code_ref::NEC_GROUPING,
            installation_reference: code_ref::NEC_ROOFTOP,
        },
        small_conductor_caps: SMALL_CONDUCTOR_CAPS,
        references: CatalogReferences {
            ampacity: code_ref::NEC_AMPACITY,
            resistance: code_ref::NEC_RESISTANCE,
            voltage_drop: code_ref::NEC_VOLTAGE_DROP,
            conduit_fill: code_ref::NEC_CONDUIT_FILL,
            wire_area: code_ref::NEC_WIRE_AREA,
            devices: code_ref::NEC_STANDARD_RATINGS,
        },
    }
}
