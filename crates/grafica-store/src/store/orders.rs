//! # Print Order Operations
//!
//! Order CRUD plus the fulfillment transitions. The store resolves the
//! entities a transition touches, hands them to the pure state machine, and
//! persists every collection the transition changed.
//!
//! ## Collections Touched Per Transition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  approve_order_files        print-orders (+ supplies on fast path)  │
//! │  reject_order_files         print-orders                            │
//! │  move_order_to_production   print-orders + supplies                 │
//! │  complete_order             print-orders + tube-models              │
//! │  ship_order                 print-orders                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lifecycle fields (`status`, `tube_model_id`, `tube_quantity`) are owned
//! by the transitions; [`Store::update_print_order`] deliberately cannot
//! change them.

use chrono::Utc;
use tracing::info;

use grafica_core::types::{find_by_id, remove_by_id, replace_by_id};
use grafica_core::validation::{validate_order_quantity, validate_price_cents};
use grafica_core::{
    sequence, workflow, ApproveOutcome, DomainError, OrderStatus, PrintOrder, TubeModel,
};

use crate::error::StoreResult;

use super::{keys, persist, Store};

fn order_mut<'a>(orders: &'a mut [PrintOrder], id: &str) -> StoreResult<&'a mut PrintOrder> {
    orders
        .iter_mut()
        .find(|order| order.id == id)
        .ok_or_else(|| DomainError::not_found("PrintOrder", id).into())
}

fn tube_mut<'a>(tubes: &'a mut [TubeModel], id: &str) -> StoreResult<&'a mut TubeModel> {
    tubes
        .iter_mut()
        .find(|tube| tube.id == id)
        .ok_or_else(|| DomainError::not_found("TubeModel", id).into())
}

impl Store {
    // =========================================================================
    // CRUD
    // =========================================================================

    /// Creates a print order from a draft.
    ///
    /// The store assigns identity and lifecycle state: a fresh ID, the next
    /// order number, the creation stamp, status `analise`, no tube. The
    /// cached total is recomputed from quantity × unit price.
    ///
    /// ## Errors
    /// - validation errors for non-positive quantity or negative price
    /// - `NotFound` when the customer, product, seller or payment key
    ///   reference does not resolve
    pub async fn add_print_order(&mut self, mut order: PrintOrder) -> StoreResult<PrintOrder> {
        validate_order_quantity(order.quantity)?;
        validate_price_cents(order.price_cents)?;
        self.validate_order_references(&order)?;

        let stamp = sequence::creation_stamp(Utc::now());
        order.id = Self::generate_id();
        order.order_number = sequence::next_order_number(&self.print_orders);
        order.status = OrderStatus::Analise;
        order.tube_model_id = None;
        order.tube_quantity = 0;
        order.created_at = stamp.created_at;
        order.created_time = stamp.created_time;
        order.updated_at = stamp.updated_at;
        order.recompute_total();

        info!(order = %order.order_number, customer = %order.customer_id, "order created");
        self.print_orders.push(order.clone());
        persist(&self.db, keys::PRINT_ORDERS, &self.print_orders).await?;
        Ok(order)
    }

    /// Updates an order's editable fields.
    ///
    /// Identity (`id`, `order_number`, creation stamp) and lifecycle fields
    /// (`status`, tube assignment) are carried over from the stored record;
    /// everything else is taken from the argument. The total is recomputed
    /// and `updated_at` refreshed.
    pub async fn update_print_order(&mut self, mut order: PrintOrder) -> StoreResult<()> {
        validate_order_quantity(order.quantity)?;
        validate_price_cents(order.price_cents)?;
        self.validate_order_references(&order)?;

        let existing = find_by_id(&self.print_orders, &order.id)
            .ok_or_else(|| DomainError::not_found("PrintOrder", &order.id))?;

        order.order_number = existing.order_number.clone();
        order.status = existing.status;
        order.tube_model_id = existing.tube_model_id.clone();
        order.tube_quantity = existing.tube_quantity;
        order.created_at = existing.created_at;
        order.created_time = existing.created_time.clone();
        order.updated_at = Utc::now();
        order.recompute_total();

        replace_by_id(&mut self.print_orders, order);
        persist(&self.db, keys::PRINT_ORDERS, &self.print_orders).await
    }

    /// Deletes an order. Its number is not reissued as long as a higher one
    /// exists.
    pub async fn delete_print_order(&mut self, id: &str) -> StoreResult<()> {
        if !remove_by_id(&mut self.print_orders, id) {
            return Err(DomainError::not_found("PrintOrder", id).into());
        }
        persist(&self.db, keys::PRINT_ORDERS, &self.print_orders).await
    }

    fn validate_order_references(&self, order: &PrintOrder) -> StoreResult<()> {
        if find_by_id(&self.customers, &order.customer_id).is_none() {
            return Err(DomainError::not_found("Customer", &order.customer_id).into());
        }
        if find_by_id(&self.products, &order.product_id).is_none() {
            return Err(DomainError::not_found("Product", &order.product_id).into());
        }
        if find_by_id(&self.sellers, &order.seller_id).is_none() {
            return Err(DomainError::not_found("Seller", &order.seller_id).into());
        }
        if let Some(key_id) = &order.payment_key_id {
            if find_by_id(&self.payment_keys, key_id).is_none() {
                return Err(DomainError::not_found("PaymentKey", key_id).into());
            }
        }
        Ok(())
    }

    // =========================================================================
    // Fulfillment Transitions
    // =========================================================================

    /// Approves an order's files.
    ///
    /// A paid order with sufficient supplies goes straight to `producao`
    /// with its supplies consumed; otherwise it waits in `aprovado`.
    pub async fn approve_order_files(&mut self, order_id: &str) -> StoreResult<ApproveOutcome> {
        let order = order_mut(&mut self.print_orders, order_id)?;
        let product = find_by_id(&self.products, &order.product_id);

        let outcome = workflow::approve_files(order, product, &mut self.supplies, Utc::now())?;

        persist(&self.db, keys::PRINT_ORDERS, &self.print_orders).await?;
        if outcome == ApproveOutcome::SentToProduction {
            persist(&self.db, keys::SUPPLIES, &self.supplies).await?;
        }
        Ok(outcome)
    }

    /// Rejects an order's files (terminal).
    pub async fn reject_order_files(&mut self, order_id: &str) -> StoreResult<()> {
        let order = order_mut(&mut self.print_orders, order_id)?;
        workflow::reject_files(order, Utc::now())?;
        persist(&self.db, keys::PRINT_ORDERS, &self.print_orders).await
    }

    /// Moves an approved order into production, consuming its supplies.
    ///
    /// ## Errors
    /// - `NotFound` when the order or its product no longer exists
    /// - `InvalidStatus` when the order is not in `aprovado`
    /// - `InsufficientStock` naming the supplies that fall short
    pub async fn move_order_to_production(&mut self, order_id: &str) -> StoreResult<()> {
        let order = order_mut(&mut self.print_orders, order_id)?;
        let product = find_by_id(&self.products, &order.product_id)
            .ok_or_else(|| DomainError::not_found("Product", &order.product_id))?;

        workflow::move_to_production(order, product, &mut self.supplies, Utc::now())?;

        persist(&self.db, keys::PRINT_ORDERS, &self.print_orders).await?;
        persist(&self.db, keys::SUPPLIES, &self.supplies).await
    }

    /// Completes production: reserves one unit of the chosen tube model and
    /// moves the order to `expedição`.
    ///
    /// ## Errors
    /// - `NotFound` when the order or tube model does not exist
    /// - `InvalidStatus` when the order is not in `producao`
    /// - `TubeUnavailable` when the model has no stock; nothing changes
    pub async fn complete_order(&mut self, order_id: &str, tube_model_id: &str) -> StoreResult<()> {
        let order = order_mut(&mut self.print_orders, order_id)?;
        let tube = tube_mut(&mut self.tube_models, tube_model_id)?;

        workflow::complete_production(order, tube, Utc::now())?;

        persist(&self.db, keys::PRINT_ORDERS, &self.print_orders).await?;
        persist(&self.db, keys::TUBE_MODELS, &self.tube_models).await
    }

    /// Ships the order (terminal).
    pub async fn ship_order(&mut self, order_id: &str) -> StoreResult<()> {
        let order = order_mut(&mut self.print_orders, order_id)?;
        workflow::ship(order, Utc::now())?;
        persist(&self.db, keys::PRINT_ORDERS, &self.print_orders).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
