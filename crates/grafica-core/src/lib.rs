//! # grafica-core: Pure Business Logic for the Gráfica DTF Console
//!
//! This crate is the **heart** of the print-shop management console. It holds
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Gráfica DTF Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (browser UI)                        │   │
//! │  │    CRM tables ──► Inventory tabs ──► Order workflow board       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ typed store contracts                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 grafica-store (Store façade)                    │   │
//! │  │    owns the collections, persists them after every mutation     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grafica-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌────────────┐        │   │
//! │  │   │  types   │ │  ledger  │ │ workflow │ │  sequence  │        │   │
//! │  │   │ entities │ │ stock ±  │ │ analise→ │ │ P001, P002 │        │   │
//! │  │   │  enums   │ │ clamp@0  │ │ entregue │ │ timestamps │        │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └────────────┘        │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (Customer, Supply, PrintOrder, etc.)
//! - [`sequence`] - Human-readable order numbers and creation stamps
//! - [`ledger`] - Inventory ledger (purchases, consumption, tube reservation)
//! - [`workflow`] - Order fulfillment state machine
//! - [`validation`] - Input validation rules
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: transitions take the entities they touch plus an
//!    explicit `now`; same input = same output
//! 2. **No I/O**: persistence lives entirely in `grafica-store`
//! 3. **Integer Money**: all monetary values are in centavos (i64)
//! 4. **Explicit Errors**: guard failures are typed, never silent no-ops

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod sequence;
pub mod types;
pub mod validation;
pub mod workflow;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use grafica_core::PrintOrder` instead of
// `use grafica_core::types::PrintOrder`.

pub use error::{DomainError, DomainResult, ValidationError};
pub use ledger::Availability;
pub use types::*;
pub use workflow::ApproveOutcome;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Exactly one shipping tube is reserved per completed order.
///
/// ## Why a constant?
/// The UI never asks for a tube count; an order ships in a single tube.
/// Making it a named constant keeps the rule visible where tubes are
/// reserved and where `tube_quantity` is stamped on the order.
pub const TUBE_UNITS_PER_ORDER: i64 = 1;
