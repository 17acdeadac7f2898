//! # Validation Module
//!
//! Input validation rules applied by the store before any collection is
//! mutated. The browser forms validate for immediate feedback; this module
//! is the layer that actually holds the line.
//!
//! ## Usage
//! ```rust
//! use grafica_core::validation::{validate_name, validate_order_quantity};
//!
//! validate_name("name", "Tinta Preta DTF").unwrap();
//! validate_order_quantity(10.0).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};

/// Longest accepted free-text field (names, descriptions, notes).
pub const MAX_TEXT_LEN: usize = 500;

/// Validates a required display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_TEXT_LEN`] characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates a supply quantity or reorder point.
///
/// ## Rules
/// - Must be a finite number (liters/meters come from free-form inputs)
/// - Must not be negative; zero is allowed (empty shelf)
pub fn validate_supply_quantity(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    if value < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an order or purchase quantity.
///
/// ## Rules
/// - Must be finite
/// - Must be strictly positive - a zero-meter order is a form mistake
pub fn validate_order_quantity(value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "quantity".to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a price in centavos.
///
/// ## Rules
/// - Must be non-negative; zero is allowed (samples, reprints)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a discrete count (tube stock, reorder point).
pub fn validate_count(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
