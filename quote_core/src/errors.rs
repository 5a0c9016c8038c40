//! # Error Types
//!
//! Structured error types for quote_core. Validation failures carry the
//! offending field name so a form can show the reason next to the right
//! control.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{CalcError, CalcResult};
//!
//! fn validate_quantity(quantity: u32) -> CalcResult<()> {
//!     if quantity < 1 {
//!         return Err(CalcError::invalid_input(
//!             "quantity",
//!             quantity.to_string(),
//!             "Quantity must be at least 1",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! let err = validate_quantity(0).unwrap_err();
//! assert_eq!(err.field(), Some("quantity"));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for costing and offer operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// An input value failed validation (out of range, not finite, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Material code not present in the catalog
    #[error("Material not found: {material_name}")]
    MaterialNotFound { material_name: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: offer version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a MaterialNotFound error
    pub fn material_not_found(material_name: impl Into<String>) -> Self {
        CalcError::MaterialNotFound {
            material_name: material_name.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// Field the error refers to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            CalcError::InvalidInput { field, .. } | CalcError::MissingField { field } => Some(field.as_str()),
            _ => None,
        }
    }

    /// Prefix the field name with a context, e.g. an offer line label.
    ///
    /// Errors without a field are returned unchanged.
    pub fn in_context(self, context: &str) -> Self {
        match self {
            CalcError::InvalidInput { field, value, reason } => CalcError::InvalidInput {
                field: format!("{}.{}", context, field),
                value,
                reason,
            },
            CalcError::MissingField { field } => CalcError::MissingField {
                field: format!("{}.{}", context, field),
            },
            other => other,
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::MaterialNotFound { .. } => "MATERIAL_NOT_FOUND",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
            CalcError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}
