//! # Error Types
//!
//! Domain-specific error types for artbid-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  artbid-core errors (this file)                                        │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Form constraint failures                       │
//! │                                                                         │
//! │  artbid-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → web layer               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pricing engine itself never returns an error. Only the strict
//! category parse and the marketplace rules around it do.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Marketplace rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Category name is not one the pricing engine knows.
    ///
    /// ## When This Occurs
    /// - `"Sculpture".parse::<Category>()`
    /// - Empty category name from an unset form field
    ///
    /// The lenient [`crate::pricing::Category::from_name`] never raises this;
    /// it maps unknown names to `Category::Other`, which prices at zero.
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    /// Someone other than the owner tried to change an artwork.
    #[error("User {user_id} does not own artwork {artwork_id}")]
    NotArtworkOwner { artwork_id: String, user_id: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These mirror the constraints of the registration, account, artwork and
/// bid forms.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, mismatched password).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownCategory("Sculpture".to_string());
        assert_eq!(err.to_string(), "Unknown category: 'Sculpture'");

        let err = CoreError::NotArtworkOwner {
            artwork_id: "a-1".to_string(),
            user_id: "u-2".to_string(),
        };
        assert_eq!(err.to_string(), "User u-2 does not own artwork a-1");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::TooShort {
            field: "username".to_string(),
            min: 2,
        };
        assert_eq!(err.to_string(), "username must be at least 2 characters");

        let err = ValidationError::OutOfRange {
            field: "size".to_string(),
            min: 1,
            max: 10,
        };
        assert_eq!(err.to_string(), "size must be between 1 and 10");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
