//! # sizing_core - Multi-Standard Electrical Sizing Engine
//!
//! `sizing_core` sizes conductors, conduits and overcurrent protective
//! devices against NEC, IEC 60364, BS 7671 and four low-voltage DC rule
//! sets. All inputs and outputs are JSON-serializable and every result
//! carries named compliance flags plus an audit record of the code
//! sections applied.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: engines are pure functions of a read-only catalog and
//!   the request
//! - **JSON-First**: all request and result types implement
//!   Serialize/Deserialize
//! - **Rich Errors**: structured, batched validation errors
//! - **Soft vs hard failures**: an over-limit voltage drop or conduit fill
//!   returns the best candidate flagged non-compliant; a load no catalog
//!   entry can carry is an error
//!
//! ## Quick Start
//!
//! ```rust
//! use sizing_core::application::ApplicationType;
//! use sizing_core::calculations::{ConductorSizingInput, SizingEngine};
//! use sizing_core::settings::EngineSettings;
//! use sizing_core::standards::Standard;
//!
//! let engine = SizingEngine::new(Standard::Nec, EngineSettings::default());
//! let input = ConductorSizingInput::new(24.0, 80.0, 240.0, ApplicationType::Residential);
//! let result = engine.size_conductor(&input).unwrap();
//!
//! let json = serde_json::to_string_pretty(&result).unwrap();
//! assert!(json.contains("voltage_drop_pct"));
//! ```
//!
//! ## Modules
//!
//! - [`router`] - untyped request validation and dispatch
//! - [`calculations`] - conductor, conduit fill and device engines
//! - [`catalog`] - per-standard conductor, conduit and device tables
//! - [`corrections`] - correction factors and ordered factor chains
//! - [`application`] - application profiles (limits, safety factors)
//! - [`standards`] - standard identifiers and code references
//! - [`settings`] - engine-wide defaults
//! - [`units`] - length and area units
//! - [`errors`] - structured error types

pub mod application;
pub mod calculations;
pub mod catalog;
pub mod circuit;
pub mod corrections;
pub mod errors;
pub mod router;
pub mod settings;
pub mod standards;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::SizingEngine;
pub use errors::{CalcError, CalcResult, FieldError};
pub use router::{CalculationRequest, CalculationResult, Router};
pub use settings::EngineSettings;
pub use standards::Standard;
