//! # Standards Catalog
//!
//! Immutable per-standard reference data: conductor tables, insulation
//! systems, conduit and wire-area tables, protective-device families and
//! the correction-factor rules. Every standard pairs one catalog set with
//! one [`CorrectionRules`].
//!
//! Catalogs are built once per process on first use (or eagerly through
//! [`init`]) and are read-only afterwards, so any number of threads may
//! read them without coordination.
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::catalog::catalog_for;
//! use sizing_core::application::ApplicationType;
//! use sizing_core::standards::Standard;
//!
//! let nec = catalog_for(Standard::Nec);
//! assert!(nec.conductor("12 AWG").is_some());
//!
//! let ladder = nec.rating_ladder(ApplicationType::Residential, Some(240.0));
//! assert_eq!(ladder.first(), Some(&15.0));
//! ```

pub mod conductors;
pub mod conduits;
pub mod devices;

mod bs7671;
mod dc_automotive;
mod dc_marine;
mod dc_solar;
mod dc_telecom;
mod iec;
mod nec;

pub use conductors::{ConductorSpec, ConductorTable, InsulationSystem};
pub use conduits::{ConduitSpec, ConduitType, WireArea};
pub use devices::{DeviceFamily, DeviceKind, FuseType, ProtectiveDeviceSpec};

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::application::ApplicationType;
use crate::corrections::{CorrectionRules, InstallationMethod};
use crate::standards::{SizeSystem, Standard};
use crate::units::{AreaUnit, LengthUnit};

/// Code sections a catalog cites in calculation metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogReferences {
    pub ampacity: &'static str,
    pub resistance: &'static str,
    pub voltage_drop: &'static str,
    pub conduit_fill: &'static str,
    pub wire_area: &'static str,
    pub devices: &'static str,
}

/// Reference data for one standard.
#[derive(Debug, Clone, Serialize)]
pub struct StandardCatalog {
    pub standard: Standard,
    pub size_system: SizeSystem,
    pub length_unit: LengthUnit,
    pub area_unit: AreaUnit,
    pub applications: Vec<ApplicationType>,
    pub insulations: Vec<InsulationSystem>,
    pub default_insulation: &'static str,
    pub conductors: ConductorTable,
    pub conduits: Vec<ConduitSpec>,
    pub wire_areas: Vec<WireArea>,
    pub devices: Vec<DeviceFamily>,
    pub corrections: CorrectionRules,
    /// Small-conductor overcurrent caps `(size, max A)`
    pub small_conductor_caps: &'static [(&'static str, f64)],
    pub references: CatalogReferences,
}

static NEC: Lazy<StandardCatalog> = Lazy::new(nec::catalog);
static IEC: Lazy<StandardCatalog> = Lazy::new(iec::catalog);
static BS7671: Lazy<StandardCatalog> = Lazy::new(bs7671::catalog);
static DC_AUTOMOTIVE: Lazy<StandardCatalog> = Lazy::new(dc_automotive::catalog);
static DC_MARINE: Lazy<StandardCatalog> = Lazy::new(dc_marine::catalog);
static DC_SOLAR: Lazy<StandardCatalog> = Lazy::new(dc_solar::catalog);
static DC_TELECOM: Lazy<StandardCatalog> = Lazy::new(dc_telecom::catalog);

/// Catalog for a standard
pub fn catalog_for(standard: Standard) -> &'static StandardCatalog {
    match standard {
        Standard::Nec => Lazy::force(&NEC),
        Standard::Iec => Lazy::force(&IEC),
        Standard::Bs7671 => Lazy::force(&BS7671),
        Standard::DcAutomotive => Lazy::force(&DC_AUTOMOTIVE),
        Standard::DcMarine => Lazy::force(&DC_MARINE),
        Standard::DcSolar => Lazy::force(&DC_SOLAR),
        Standard::DcTelecom => Lazy::force(&DC_TELECOM),
    }
}

/// Build every catalog now instead of on first use
pub fn init() {
    for standard in Standard::ALL {
        let catalog = catalog_for(standard);
        tracing::debug!(
            standard = standard.id(),
            conductors = catalog.conductors.rows.len(),
            conduits = catalog.conduits.len(),
            device_families = catalog.devices.len(),
            "catalog loaded"
        );
    }
}

impl StandardCatalog {
    pub fn supports(&self, application: ApplicationType) -> bool {
        self.applications.contains(&application)
    }

    pub fn conductor(&self, size: &str) -> Option<&ConductorSpec> {
        self.conductors.find(size).map(|(_, row)| row)
    }

    /// Normalize a raw size label and check it is in this catalog's ladder
    pub fn normalize_size(&self, raw: &str) -> Result<String, String> {
        let size = self.size_system.normalize(raw)?;
        if self.conductor(&size).is_some() {
            Ok(size)
        } else {
            Err(format!(
                "{} is not a {} conductor size (available: {} to {})",
                size,
                self.standard.display_name(),
                self.conductors.rows.first().map_or("-", |r| r.size.as_str()),
                self.conductors.rows.last().map_or("-", |r| r.size.as_str()),
            ))
        }
    }

    /// Insulation system by code, case-insensitive
    pub fn insulation(&self, code: &str) -> Option<&InsulationSystem> {
        let code = code.trim();
        self.insulations.iter().find(|i| i.code.eq_ignore_ascii_case(code))
    }

    pub fn insulation_codes(&self) -> Vec<&str> {
        self.insulations.iter().map(|i| i.code.as_str()).collect()
    }

    /// Conduit types available in this standard, in catalog order
    pub fn conduit_types(&self) -> Vec<ConduitType> {
        let mut types: Vec<ConduitType> = Vec::new();
        for conduit in &self.conduits {
            if !types.contains(&conduit.conduit_type) {
                types.push(conduit.conduit_type);
            }
        }
        types
    }

    /// Conduits of one type ordered smallest to largest internal area
    pub fn conduits_of(&self, conduit_type: ConduitType) -> Vec<&ConduitSpec> {
        let mut rows: Vec<&ConduitSpec> = self
            .conduits
            .iter()
            .filter(|c| c.conduit_type == conduit_type)
            .collect();
        rows.sort_by(|a, b| a.internal_area.total_cmp(&b.internal_area));
        rows
    }

    /// Area of one insulated wire (in the catalog's area unit)
    pub fn wire_area(&self, insulation: &InsulationSystem, size: &str) -> Option<f64> {
        self.wire_areas
            .iter()
            .find(|w| w.area_group == insulation.area_group && w.size == size)
            .map(|w| w.area)
    }

    /// Device families usable for an application at a voltage
    pub fn families_for(
        &self,
        application: ApplicationType,
        voltage: Option<f64>,
    ) -> impl Iterator<Item = &DeviceFamily> {
        self.devices
            .iter()
            .filter(move |family| family.supports(application, voltage))
    }

    /// Discrete rating ladder for a (standard, application, voltage) partition
    pub fn rating_ladder(&self, application: ApplicationType, voltage: Option<f64>) -> Vec<f64> {
        merge_ladders(self.families_for(application, voltage))
    }

    /// Rating ladder of one blade-fuse class
    pub fn fuse_ladder(
        &self,
        application: ApplicationType,
        voltage: Option<f64>,
        fuse_type: FuseType,
    ) -> Vec<f64> {
        merge_ladders(
            self.families_for(application, voltage)
                .filter(|family| family.fuse_type == Some(fuse_type)),
        )
    }

    /// Simplified conductor ampacity used to cross-check a device rating:
    /// the reference column, capped by the small-conductor rule.
    pub fn wire_ampacity_map(&self, size: &str) -> Option<f64> {
        let row = self.conductor(size)?;
        let ampacity = row
            .ampacity
            .get(self.conductors.reference_column)
            .or_else(|| row.ampacity.last())
            .copied()?;
        let cap = self
            .small_conductor_caps
            .iter()
            .find(|(capped, _)| *capped == size)
            .map(|(_, amps)| *amps);
        Some(cap.map_or(ampacity, |c| ampacity.min(c)))
    }

    pub fn default_installation(&self) -> InstallationMethod {
        self.corrections.default_installation
    }

    /// Introspection summary for front ends
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            standard: self.standard,
            name: self.standard.display_name().to_string(),
            length_unit: self.length_unit,
            area_unit: self.area_unit,
            conductor_sizes: self.conductors.sizes().iter().map(|s| s.to_string()).collect(),
            ampacity_columns_c: self.conductors.columns.clone(),
            insulations: self.insulation_codes().iter().map(|s| s.to_string()).collect(),
            conduit_types: self.conduit_types(),
            installation_methods: self.corrections.installation.iter().map(|(m, _)| *m).collect(),
            applications: self
                .applications
                .iter()
                .map(|app| ApplicationLadder {
                    application: *app,
                    ratings: self.rating_ladder(*app, None),
                })
                .collect(),
        }
    }
}

fn merge_ladders<'a>(families: impl Iterator<Item = &'a DeviceFamily>) -> Vec<f64> {
    let mut ladder: Vec<f64> = families.flat_map(|f| f.ratings.iter().copied()).collect();
    ladder.sort_by(|a, b| a.total_cmp(b));
    ladder.dedup_by(|a, b| (*a - *b).abs() < 1e-9);
    ladder
}

/// Serializable view of a catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    pub standard: Standard,
    pub name: String,
    pub length_unit: LengthUnit,
    pub area_unit: AreaUnit,
    pub conductor_sizes: Vec<String>,
    pub ampacity_columns_c: Vec<u16>,
    pub insulations: Vec<String>,
    pub conduit_types: Vec<ConduitType>,
    pub installation_methods: Vec<InstallationMethod>,
    pub applications: Vec<ApplicationLadder>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationLadder {
    pub application: ApplicationType,
    pub ratings: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conductor_tables_are_ordered() {
        for standard in Standard::ALL {
            let table = &catalog_for(standard).conductors;
            assert!(!table.rows.is_empty(), "{}", standard);
            for row in &table.rows {
                assert_eq!(row.ampacity.len(), table.columns.len(), "{} {}", standard, row.size);
                assert!(row.resistance > 0.0, "{} {}", standard, row.size);
                assert!(row.ampacity.iter().all(|a| *a > 0.0), "{} {}", standard, row.size);
            }
            for pair in table.rows.windows(2) {
                assert!(pair[1].area_mm2 > pair[0].area_mm2, "{} {}", standard, pair[1].size);
                for col in 0..table.columns.len() {
                    assert!(
                        pair[1].ampacity[col] >= pair[0].ampacity[col],
                        "{} {} column {}",
                        standard,
                        pair[1].size,
                        col
                    );
                }
            }
        }
    }

    #[test]
    fn test_conduit_areas_strictly_increase() {
        for standard in Standard::ALL {
            let catalog = catalog_for(standard);
            for conduit_type in catalog.conduit_types() {
                let rows: Vec<_> = catalog
                    .conduits
                    .iter()
                    .filter(|c| c.conduit_type == conduit_type)
                    .collect();
                for pair in rows.windows(2) {
                    assert!(
                        pair[1].internal_area > pair[0].internal_area,
                        "{} {} {}",
                        standard,
                        conduit_type,
                        pair[1].size
                    );
                }
            }
        }
    }

    #[test]
    fn test_device_ladders_ascend() {
        for standard in Standard::ALL {
            for family in &catalog_for(standard).devices {
                assert!(!family.ratings.is_empty(), "{}", family.name);
                for pair in family.ratings.windows(2) {
                    assert!(pair[1] > pair[0], "{} {}", standard, family.name);
                }
            }
        }
    }

    #[test]
    fn test_every_application_has_devices() {
        for standard in Standard::ALL {
            let catalog = catalog_for(standard);
            for app in &catalog.applications {
                assert!(
                    !catalog.rating_ladder(*app, None).is_empty(),
                    "{} {}",
                    standard,
                    app
                );
            }
        }
    }

    #[test]
    fn test_default_insulation_and_wire_areas() {
        for standard in Standard::ALL {
            let catalog = catalog_for(standard);
            let insulation = catalog
                .insulation(catalog.default_insulation)
                .unwrap_or_else(|| panic!("{} default insulation missing", standard));
            for row in &catalog.conductors.rows {
                assert!(
                    catalog.wire_area(insulation, &row.size).is_some(),
                    "{} {} has no wire area",
                    standard,
                    row.size
                );
            }
        }
    }

    #[test]
    fn test_correction_tables_non_increasing() {
        for standard in Standard::ALL {
            let rules = &catalog_for(standard).corrections;
            for table in &rules.temperature_tables {
                for pair in table.rungs.windows(2) {
                    assert!(pair[1].0 > pair[0].0);
                    assert!(pair[1].1 <= pair[0].1, "{} {} °C", standard, table.rating_c);
                }
            }
            for pair in rules.grouping.rows.windows(2) {
                assert!(pair[1].0 > pair[0].0);
                assert!(pair[1].1 <= pair[0].1, "{}", standard);
            }
            for (_, factor) in &rules.installation {
                assert!(factor.temperature_factor > 0.0 && factor.environment_factor > 0.0);
            }
            assert!(rules.supports_installation(rules.default_installation));
        }
    }

    #[test]
    fn test_normalize_size_against_ladder() {
        let nec = catalog_for(Standard::Nec);
        assert_eq!(nec.normalize_size("#12").unwrap(), "12 AWG");
        assert!(nec.normalize_size("40").is_err());
        let iec = catalog_for(Standard::Iec);
        assert_eq!(iec.normalize_size("2.5mm2").unwrap(), "2.5 mm²");
        assert!(iec.normalize_size("3").is_err());
    }

    #[test]
    fn test_wire_ampacity_map_small_conductor_cap() {
        let nec = catalog_for(Standard::Nec);
        assert_eq!(nec.wire_ampacity_map("12 AWG"), Some(20.0));
        assert_eq!(nec.wire_ampacity_map("8 AWG"), Some(50.0));
        let iec = catalog_for(Standard::Iec);
        assert_eq!(iec.wire_ampacity_map("2.5 mm²"), Some(27.0));
    }

    #[test]
    fn test_nec_residential_ladder() {
        let ladder = catalog_for(Standard::Nec).rating_ladder(ApplicationType::Residential, Some(240.0));
        assert!(ladder.contains(&15.0));
        assert!(ladder.contains(&225.0));
        assert!(ladder.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_blade_fuse_ladders() {
        let auto = catalog_for(Standard::DcAutomotive);
        let regular = auto.fuse_ladder(ApplicationType::Automotive, Some(12.0), FuseType::Regular);
        assert!(regular.contains(&25.0));
        assert_eq!(regular.last(), Some(&40.0));
        let maxi = auto.fuse_ladder(ApplicationType::Automotive, Some(12.0), FuseType::Maxi);
        assert_eq!(maxi.last(), Some(&120.0));
    }
}
