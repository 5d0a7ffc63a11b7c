use thiserror::Error;

use crate::types::ValueType;

/// Errors raised while building or mutating column properties
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Property ID cannot be empty")]
    MissingPropertyId,

    #[error("Property '{0}' is read-only")]
    ReadOnly(String),

    #[error("Property '{0}' is not nullable")]
    NotNullable(String),

    #[error("Property '{property_id}' expects a {expected} value, got {found}")]
    TypeMismatch {
        property_id: String,
        expected: ValueType,
        found: &'static str,
    },

    #[error("Duplicate property ID: {0}")]
    DuplicateProperty(String),

    #[error("Unknown property: {0}")]
    UnknownProperty(String),
}

impl ValidationError {
    /// Stable error code for machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::MissingPropertyId => "MISSING_PROPERTY_ID",
            ValidationError::ReadOnly(_) => "READ_ONLY",
            ValidationError::NotNullable(_) => "NOT_NULLABLE",
            ValidationError::TypeMismatch { .. } => "TYPE_MISMATCH",
            ValidationError::DuplicateProperty(_) => "DUPLICATE_PROPERTY",
            ValidationError::UnknownProperty(_) => "UNKNOWN_PROPERTY",
        }
    }
}
