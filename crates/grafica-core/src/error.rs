//! # Error Types
//!
//! Domain-specific error types for grafica-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  grafica-core errors (this file)                                    │
//! │  ├── DomainError      - Guard failures and broken references        │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  grafica-store errors (separate crate)                              │
//! │  └── StoreError       - Persistence and serialization failures      │
//! │                                                                     │
//! │  Flow: ValidationError → DomainError → StoreError → Frontend        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (order number, supply names, etc.)
//! 3. Errors are enum variants, never String
//! 4. Guard failures on state transitions are explicit: a refused
//!    transition is a variant the caller can match on, never a silent
//!    return

use thiserror::Error;

// =============================================================================
// Domain Error
// =============================================================================

/// Business rule violations and broken references.
///
/// Every order-workflow guard failure maps to one of these variants, so the
/// presentation layer can surface "out of stock" differently from "order is
/// already in production".
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced entity does not exist.
    ///
    /// ## When This Occurs
    /// - An operation names an ID that was deleted
    /// - A new order references a customer/product/seller that is gone
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The order is not in the source state the transition requires.
    ///
    /// ## When This Occurs
    /// - Approving files on an order that already left `analise`
    /// - Shipping an order that is not in `expedição`
    #[error("order {order_id} is '{current}', cannot {operation}")]
    InvalidStatus {
        order_id: String,
        current: String,
        operation: String,
    },

    /// The product's bill of materials cannot be covered by current stock.
    ///
    /// ## When This Occurs
    /// - Moving an order to production with insufficient supplies
    /// - The approve-files fast path falls back to `aprovado` instead
    #[error("insufficient supplies for product {product_id}: {insufficient:?}")]
    InsufficientStock {
        product_id: String,
        /// Names of the supplies that cannot cover the required amount.
        insufficient: Vec<String>,
    },

    /// The selected tube model has no units left to reserve.
    #[error("tube model {tube_model_id} has no stock left")]
    TubeUnavailable { tube_model_id: String },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl DomainError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DomainError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when form input doesn't meet requirements. Used for early
/// validation before the store mutates anything.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Floating point value is NaN or infinite.
    #[error("{field} is not a finite number")]
    NotFinite { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with DomainError.
pub type DomainResult<T> = Result<T, DomainError>;

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = DomainError::InvalidStatus {
            order_id: "o-1".to_string(),
            current: "entregue".to_string(),
            operation: "ship".to_string(),
        };
        assert_eq!(err.to_string(), "order o-1 is 'entregue', cannot ship");

        let err = DomainError::not_found("Supply", "s-9");
        assert_eq!(err.to_string(), "Supply not found: s-9");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn test_validation_converts_to_domain_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let domain_err: DomainError = validation_err.into();
        assert!(matches!(domain_err, DomainError::Validation(_)));
    }
}
