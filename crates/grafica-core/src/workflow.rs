//! # Order Fulfillment State Machine
//!
//! Transitions a print order from file intake to delivery, invoking the
//! inventory ledger where the physical world changes.
//!
//! ## States & Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Order Fulfillment State Machine                        │
//! │                                                                         │
//! │            approve_files                    move_to_production          │
//! │  analise ────────────────► aprovado ──────────────────────┐             │
//! │     │                                                     ▼             │
//! │     │  approve_files (pago + supplies OK)             producao          │
//! │     ├────────────────────────────────────────────────────►│             │
//! │     │                        consumes supplies            │             │
//! │     │ reject_files                                        │ complete    │
//! │     ▼                                                     ▼ (1 tube)    │
//! │  rejeitado ✕                                          expedição         │
//! │                                                           │ ship        │
//! │                                                           ▼             │
//! │                                                       entregue ✕        │
//! │                                                                         │
//! │  ✕ = terminal                                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guard Semantics
//! Every guard is checked *before* anything mutates: a failed transition
//! returns a typed [`DomainError`] and leaves order, supplies and tubes
//! exactly as they were. The original console silently ignored guard
//! failures, which made "nothing happened" indistinguishable from "refused";
//! callers here can tell the difference.
//!
//! ## One Deduction Rule
//! Supplies are deducted on *every* entry into `producao` - both through
//! `move_to_production` and through the approve-files fast path. An order
//! in `producao` always means its bill of materials has been consumed,
//! whichever door it came through.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{DomainError, DomainResult};
use crate::ledger;
use crate::types::{OrderStatus, PaymentStatus, PrintOrder, Product, Supply, TubeModel};
use crate::TUBE_UNITS_PER_ORDER;

/// Where an order landed after its files were approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ApproveOutcome {
    /// Files approved; order waits in `aprovado` (unpaid or short on stock).
    Approved,
    /// Paid and fully stocked: jumped straight to `producao`, supplies
    /// deducted.
    SentToProduction,
}

fn require_status(order: &PrintOrder, expected: OrderStatus, operation: &str) -> DomainResult<()> {
    if order.status != expected {
        return Err(DomainError::InvalidStatus {
            order_id: order.id.clone(),
            current: order.status.to_string(),
            operation: operation.to_string(),
        });
    }
    Ok(())
}

fn insufficient_stock(order: &PrintOrder, availability: ledger::Availability) -> DomainError {
    DomainError::InsufficientStock {
        product_id: order.product_id.clone(),
        insufficient: availability
            .insufficient
            .into_iter()
            .map(|supply| supply.name)
            .collect(),
    }
}

// =============================================================================
// Transitions
// =============================================================================

/// Approves the order's files.
///
/// Legal only from `analise`. A paid order with sufficient supplies skips
/// the waiting room: supplies are consumed and the order lands directly in
/// `producao`. Otherwise (unpaid, short on stock, or unknown product) the
/// order moves to `aprovado` and waits.
pub fn approve_files(
    order: &mut PrintOrder,
    product: Option<&Product>,
    supplies: &mut [Supply],
    now: DateTime<Utc>,
) -> DomainResult<ApproveOutcome> {
    require_status(order, OrderStatus::Analise, "approve files")?;

    let fast_path = order.payment_status == PaymentStatus::Pago
        && ledger::check_availability(product, supplies, order.quantity).available;

    if fast_path {
        // `available` implies the product exists and has a BOM.
        if let Some(product) = product {
            ledger::consume_for_order(supplies, product, order.quantity);
        }
        order.status = OrderStatus::Producao;
    } else {
        order.status = OrderStatus::Aprovado;
    }
    order.updated_at = now;

    debug!(order = %order.order_number, status = %order.status, "files approved");
    Ok(if fast_path {
        ApproveOutcome::SentToProduction
    } else {
        ApproveOutcome::Approved
    })
}

/// Rejects the order's files. Legal only from `analise`; unconditional.
pub fn reject_files(order: &mut PrintOrder, now: DateTime<Utc>) -> DomainResult<()> {
    require_status(order, OrderStatus::Analise, "reject files")?;
    order.status = OrderStatus::Rejeitado;
    order.updated_at = now;
    debug!(order = %order.order_number, "files rejected");
    Ok(())
}

/// Moves an approved order into production, consuming its supplies.
///
/// ## Errors
/// - `InvalidStatus` when the order is not in `aprovado`
/// - `InsufficientStock` when the BOM cannot be covered; names the short
///   supplies so the UI can say which to restock
pub fn move_to_production(
    order: &mut PrintOrder,
    product: &Product,
    supplies: &mut [Supply],
    now: DateTime<Utc>,
) -> DomainResult<()> {
    require_status(order, OrderStatus::Aprovado, "move to production")?;

    let availability = ledger::check_availability(Some(product), supplies, order.quantity);
    if !availability.available {
        return Err(insufficient_stock(order, availability));
    }

    // Guard passed: consumption and the status change happen together.
    ledger::consume_for_order(supplies, product, order.quantity);
    order.status = OrderStatus::Producao;
    order.updated_at = now;

    debug!(order = %order.order_number, "moved to production");
    Ok(())
}

/// Completes production: reserves one tube of the selected model and moves
/// the order to `expedição`.
///
/// ## Errors
/// - `InvalidStatus` when the order is not in `producao`
/// - `TubeUnavailable` when the selected model has zero stock; the order
///   stays in `producao` and no tube is consumed
pub fn complete_production(
    order: &mut PrintOrder,
    tube: &mut TubeModel,
    now: DateTime<Utc>,
) -> DomainResult<()> {
    require_status(order, OrderStatus::Producao, "complete production")?;

    ledger::reserve_tube(tube)?;
    order.status = OrderStatus::Expedicao;
    order.tube_model_id = Some(tube.id.clone());
    order.tube_quantity = TUBE_UNITS_PER_ORDER;
    order.updated_at = now;

    debug!(order = %order.order_number, tube = %tube.name, "production complete");
    Ok(())
}

/// Ships the order. Legal only from `expedição`; unconditional.
pub fn ship(order: &mut PrintOrder, now: DateTime<Utc>) -> DomainResult<()> {
    require_status(order, OrderStatus::Expedicao, "ship")?;
    order.status = OrderStatus::Entregue;
    order.updated_at = now;
    debug!(order = %order.order_number, "order shipped");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
