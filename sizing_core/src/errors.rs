//! # Error Types
//!
//! Structured error types for sizing_core. Errors serialize to JSON so a
//! caller (form, API, LLM tool) can tell which input field to fix.
//!
//! Two families matter to callers:
//!
//! - **Input errors** (`Validation`, `UnsupportedStandard`,
//!   `UnknownInstallationMethod`) - the request must change before it can
//!   succeed.
//! - **Hard physical failures** (`NoAmpacitySolution`, `NoSuitableDevice`,
//!   `ExceedsFuseRange`) - the input is well-formed but no catalog entry
//!   can carry the load.
//!
//! Soft non-compliance (voltage drop or conduit fill over the limit) is
//! never an error; it is reported through the result's compliance flags.
//!
//! ## Example
//!
//! ```rust
//! use sizing_core::errors::{CalcError, CalcResult, FieldError};
//!
//! fn check_length(length: f64) -> CalcResult<()> {
//!     if length <= 0.0 {
//!         return Err(CalcError::validation(vec![FieldError::new(
//!             "length",
//!             length.to_string(),
//!             "Length must be positive",
//!         )]));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_length(-1.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for sizing_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// One violated input constraint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    /// Request field name (e.g. "current", "wires[2].size")
    pub field: String,
    /// Offending value as supplied
    pub value: String,
    /// Human-readable constraint that was violated
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' = {}: {}", self.field, self.value, self.reason)
    }
}

/// Structured error type for sizing operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// One or more request fields are malformed or out of range.
    /// All violations found in the request are reported together.
    #[error("Validation failed: {}", format_field_errors(.errors))]
    Validation { errors: Vec<FieldError> },

    /// The standard identifier does not name a supported rule set
    #[error("Unsupported standard: '{standard}'")]
    UnsupportedStandard { standard: String },

    /// The installation method is a known method but the standard has no
    /// correction factors for it
    #[error("Unknown installation method '{method}' for {standard}")]
    UnknownInstallationMethod { method: String, standard: String },

    /// No conductor in the catalog reaches the required ampacity
    #[error("No conductor in {standard} carries {required_ampacity:.1} A after corrections (largest available: {largest_size} at {largest_corrected_ampacity:.1} A)")]
    NoAmpacitySolution {
        standard: String,
        required_ampacity: f64,
        largest_size: String,
        largest_corrected_ampacity: f64,
    },

    /// No protective device in the catalog is rated at or above the
    /// adjusted current
    #[error("No protective device in {standard} for {application} rated at or above {adjusted_current:.1} A")]
    NoSuitableDevice {
        standard: String,
        application: String,
        adjusted_current: f64,
    },

    /// Adjusted current is beyond the largest blade fuse; a circuit breaker
    /// is required instead
    #[error("Adjusted current {adjusted_current:.1} A exceeds the {max_fuse_rating:.0} A blade fuse range - use a circuit breaker")]
    ExceedsFuseRange {
        adjusted_current: f64,
        max_fuse_rating: f64,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (catalog inconsistency; should not happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl CalcError {
    /// Create a Validation error from a batch of field errors
    pub fn validation(errors: Vec<FieldError>) -> Self {
        CalcError::Validation { errors }
    }

    /// Create a Validation error for a single field
    pub fn invalid_field(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::Validation {
            errors: vec![FieldError::new(field, value, reason)],
        }
    }

    /// Create an UnsupportedStandard error
    pub fn unsupported_standard(standard: impl Into<String>) -> Self {
        CalcError::UnsupportedStandard {
            standard: standard.into(),
        }
    }

    /// Create an UnknownInstallationMethod error
    pub fn unknown_installation_method(method: impl Into<String>, standard: impl Into<String>) -> Self {
        CalcError::UnknownInstallationMethod {
            method: method.into(),
            standard: standard.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        CalcError::Internal {
            message: message.into(),
        }
    }

    /// Field errors carried by a Validation error (empty otherwise)
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CalcError::Validation { errors } => errors,
            _ => &[],
        }
    }

    /// True when the caller can fix the problem by changing the request
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            CalcError::Validation { .. }
                | CalcError::UnsupportedStandard { .. }
                | CalcError::UnknownInstallationMethod { .. }
                | CalcError::SerializationError { .. }
        )
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::Validation { .. } => "VALIDATION_ERROR",
            CalcError::UnsupportedStandard { .. } => "UNSUPPORTED_STANDARD",
            CalcError::UnknownInstallationMethod { .. } => "UNKNOWN_INSTALLATION_METHOD",
            CalcError::NoAmpacitySolution { .. } => "NO_AMPACITY_SOLUTION",
            CalcError::NoSuitableDevice { .. } => "NO_SUITABLE_DEVICE",
            CalcError::ExceedsFuseRange { .. } => "EXCEEDS_FUSE_RANGE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Collects field errors so a request can report every violation at once.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) {
        self.errors.push(FieldError::new(field, value, reason));
    }

    /// Require a value to be present
    pub fn required<T: Copy>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.push(field, "null", "Field is required");
        }
        value
    }

    /// Require a finite value strictly greater than zero
    pub fn positive(&mut self, field: &str, value: f64) {
        if !value.is_finite() || value <= 0.0 {
            self.push(field, value.to_string(), "Must be a positive number");
        }
    }

    /// Require a finite value inside `[min, max]`
    pub fn in_range(&mut self, field: &str, value: f64, min: f64, max: f64) {
        if !value.is_finite() || value < min || value > max {
            self.push(field, value.to_string(), format!("Must be between {} and {}", min, max));
        }
    }

    /// Run a parser and record its error message on failure
    pub fn parse<T>(&mut self, field: &str, raw: &str, parsed: Result<T, String>) -> Option<T> {
        match parsed {
            Ok(value) => Some(value),
            Err(reason) => {
                self.push(field, raw, reason);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }

    /// Ok when no violations were recorded, else one batched Validation error
    pub fn finish(self) -> CalcResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CalcError::validation(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = CalcError::invalid_field("current", "-5", "Must be a positive number");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"Validation\""));
        let roundtrip: CalcError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(CalcError::unsupported_standard("xyz").error_code(), "UNSUPPORTED_STANDARD");
        assert_eq!(
            CalcError::ExceedsFuseRange { adjusted_current: 200.0, max_fuse_rating: 120.0 }.error_code(),
            "EXCEEDS_FUSE_RANGE"
        );
    }

    #[test]
    fn test_input_vs_hard_failure() {
        assert!(CalcError::unknown_installation_method("A1", "NEC").is_input_error());
        let hard = CalcError::NoSuitableDevice {
            standard: "NEC".into(),
            application: "residential".into(),
            adjusted_current: 900.0,
        };
        assert!(!hard.is_input_error());
    }

    #[test]
    fn test_validator_batches_errors() {
        let mut v = Validator::new();
        v.positive("current", -1.0);
        v.positive("length", 0.0);
        v.in_range("power_factor", 1.5, 0.0, 1.0);
        let err = v.finish().unwrap_err();
        assert_eq!(err.field_errors().len(), 3);
        assert_eq!(err.field_errors()[1].field, "length");
    }

    #[test]
    fn test_validator_rejects_nan() {
        let mut v = Validator::new();
        v.positive("voltage", f64::NAN);
        assert!(!v.is_empty());
    }
}
