//! # Store Façade
//!
//! The single entry point for reading and mutating console state. Owns all
//! eight collections in memory, applies grafica-core logic, and writes every
//! touched collection back to storage before returning.
//!
//! ## Mutation Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Every Mutation, Same Shape                       │
//! │                                                                     │
//! │  1. validate inputs                 (grafica_core::validation)      │
//! │  2. apply pure domain logic         (ledger / workflow / sequence)  │
//! │  3. persist touched collections     (Database::put, whole array)    │
//! │                                                                     │
//! │  A failure in 1 or 2 returns before anything is persisted; the      │
//! │  in-memory collections are only mutated once the guards pass.       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Loading & Seeding
//! Each collection loads from its own storage key at [`Store::open`]. A key
//! that was never written, or whose value no longer parses, falls back to
//! the seed data and the seed is persisted immediately.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use grafica_core::{
    Customer, PaymentKey, PrintOrder, Product, Seller, Supply, SupplyPurchase, TubeModel,
};

use crate::error::{StoreError, StoreResult};
use crate::kv::Database;
use crate::seed;

mod crm;
mod inventory;
mod orders;

// =============================================================================
// Collection Keys
// =============================================================================

/// Storage keys, one per collection. Part of the persisted layout: renaming
/// one orphans existing data.
pub(crate) mod keys {
    pub const CUSTOMERS: &str = "crm-customers";
    pub const SUPPLIES: &str = "supplies";
    pub const SUPPLY_PURCHASES: &str = "supply-purchases";
    pub const TUBE_MODELS: &str = "tube-models";
    pub const PRODUCTS: &str = "products";
    pub const SELLERS: &str = "sellers";
    pub const PAYMENT_KEYS: &str = "payment-keys";
    pub const PRINT_ORDERS: &str = "print-orders";
}

// =============================================================================
// Load & Persist Helpers
// =============================================================================

/// Serializes and writes one whole collection under its key.
pub(crate) async fn persist<T: Serialize>(
    db: &Database,
    key: &'static str,
    items: &[T],
) -> StoreResult<()> {
    let json = serde_json::to_string(items).map_err(|source| StoreError::Serialization {
        collection: key,
        source,
    })?;
    db.put(key, &json).await?;
    Ok(())
}

/// Loads one collection, seeding when the key is absent or unreadable.
///
/// Unreadable data is replaced rather than propagated: a corrupted row
/// would otherwise brick the whole console at startup.
async fn load_collection<T>(
    db: &Database,
    key: &'static str,
    seed: fn() -> Vec<T>,
) -> StoreResult<Vec<T>>
where
    T: Serialize + DeserializeOwned,
{
    if let Some(raw) = db.get(key).await? {
        match serde_json::from_str(&raw) {
            Ok(items) => return Ok(items),
            Err(err) => {
                warn!(key, error = %err, "stored collection unreadable, reseeding");
            }
        }
    } else {
        info!(key, "collection not yet persisted, seeding");
    }

    let items = seed();
    persist(db, key, &items).await?;
    Ok(items)
}

// =============================================================================
// Store
// =============================================================================

/// In-memory collections plus their storage handle.
///
/// All reads go through the slice accessors; all writes go through the
/// operation methods in the `crm`, `inventory` and `orders` submodules.
#[derive(Debug)]
pub struct Store {
    db: Database,
    customers: Vec<Customer>,
    supplies: Vec<Supply>,
    supply_purchases: Vec<SupplyPurchase>,
    tube_models: Vec<TubeModel>,
    products: Vec<Product>,
    sellers: Vec<Seller>,
    payment_keys: Vec<PaymentKey>,
    print_orders: Vec<PrintOrder>,
}

impl Store {
    /// Loads every collection from storage, seeding missing or unreadable
    /// ones.
    pub async fn open(db: Database) -> StoreResult<Store> {
        let customers = load_collection(&db, keys::CUSTOMERS, seed::customers).await?;
        let supplies = load_collection(&db, keys::SUPPLIES, seed::supplies).await?;
        let supply_purchases =
            load_collection(&db, keys::SUPPLY_PURCHASES, seed::supply_purchases).await?;
        let tube_models = load_collection(&db, keys::TUBE_MODELS, seed::tube_models).await?;
        let products = load_collection(&db, keys::PRODUCTS, seed::products).await?;
        let sellers = load_collection(&db, keys::SELLERS, seed::sellers).await?;
        let payment_keys = load_collection(&db, keys::PAYMENT_KEYS, seed::payment_keys).await?;
        let print_orders = load_collection(&db, keys::PRINT_ORDERS, seed::print_orders).await?;

        info!(
            customers = customers.len(),
            supplies = supplies.len(),
            orders = print_orders.len(),
            "store opened"
        );

        Ok(Store {
            db,
            customers,
            supplies,
            supply_purchases,
            tube_models,
            products,
            sellers,
            payment_keys,
            print_orders,
        })
    }

    /// Generates the opaque ID assigned to every new record.
    pub(crate) fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Installs a test-writer subscriber so ledger warnings and store logs
    /// show up in test output. Safe to call from every fixture; only the
    /// first call installs.
    #[cfg(test)]
    pub(crate) fn init_test_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    }

    // =========================================================================
    // Read Accessors
    // =========================================================================

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn supplies(&self) -> &[Supply] {
        &self.supplies
    }

    pub fn supply_purchases(&self) -> &[SupplyPurchase] {
        &self.supply_purchases
    }

    pub fn tube_models(&self) -> &[TubeModel] {
        &self.tube_models
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn sellers(&self) -> &[Seller] {
        &self.sellers
    }

    pub fn payment_keys(&self) -> &[PaymentKey] {
        &self.payment_keys
    }

    pub fn print_orders(&self) -> &[PrintOrder] {
        &self.print_orders
    }

    /// The underlying storage handle, for shutdown and health checks.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
