//! # Store Error Types
//!
//! Errors surfaced by the persistence layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                │
//! │                                                                     │
//! │  grafica-core DomainError  ─┐                                       │
//! │  serde_json::Error          ├──► StoreError ──► Frontend            │
//! │  sqlx::Error               ─┘                                       │
//! │                                                                     │
//! │  Domain variants keep their typed payloads so the UI can still      │
//! │  distinguish InsufficientStock from InvalidStatus.                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use grafica_core::{DomainError, ValidationError};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A business rule refused the operation (guard failure, broken
    /// reference, bad input). Collections are unchanged.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A collection could not be serialized for persistence.
    #[error("failed to serialize collection '{collection}': {source}")]
    Serialization {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The key-value storage failed.
    #[error("storage error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Domain(DomainError::from(err))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
