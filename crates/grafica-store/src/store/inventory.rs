//! # Inventory Operations
//!
//! Supplies, supply purchases, tube models and products. Purchase mutations
//! route through the inventory ledger so on-hand quantities always equal the
//! net of recorded events.
//!
//! ## Purchase ↔ Supply Coupling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  add_supply_purchase     ──► ledger::record_purchase                │
//! │  update_supply_purchase  ──► ledger::reconcile_purchase             │
//! │  delete_supply_purchase  ──► ledger::revert_purchase                │
//! │                                                                     │
//! │  Each persists BOTH `supplies` and `supply-purchases`, in that      │
//! │  order, only after the ledger accepted the event.                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use grafica_core::types::{find_by_id, remove_by_id, replace_by_id};
use grafica_core::validation::{
    validate_count, validate_name, validate_order_quantity, validate_price_cents,
    validate_supply_quantity,
};
use grafica_core::{ledger, Availability, DomainError, Product, Supply, SupplyPurchase, TubeModel};

use crate::error::StoreResult;

use super::{keys, persist, Store};

impl Store {
    // =========================================================================
    // Supplies
    // =========================================================================

    /// Adds a supply, assigning its ID.
    pub async fn add_supply(&mut self, mut supply: Supply) -> StoreResult<Supply> {
        Self::validate_supply(&supply)?;
        supply.id = Self::generate_id();
        self.supplies.push(supply.clone());
        persist(&self.db, keys::SUPPLIES, &self.supplies).await?;
        Ok(supply)
    }

    /// Replaces a supply record wholesale, quantity override included.
    pub async fn update_supply(&mut self, supply: Supply) -> StoreResult<()> {
        Self::validate_supply(&supply)?;
        let id = supply.id.clone();
        if !replace_by_id(&mut self.supplies, supply) {
            return Err(DomainError::not_found("Supply", &id).into());
        }
        persist(&self.db, keys::SUPPLIES, &self.supplies).await
    }

    /// Deletes a supply. Purchases and BOM lines that reference it become
    /// dangling; readers tolerate that.
    pub async fn delete_supply(&mut self, id: &str) -> StoreResult<()> {
        if !remove_by_id(&mut self.supplies, id) {
            return Err(DomainError::not_found("Supply", id).into());
        }
        persist(&self.db, keys::SUPPLIES, &self.supplies).await
    }

    /// Supplies whose on-hand quantity fell below their reorder point.
    pub fn supplies_needing_reorder(&self) -> Vec<&Supply> {
        self.supplies.iter().filter(|s| s.needs_reorder()).collect()
    }

    fn validate_supply(supply: &Supply) -> StoreResult<()> {
        validate_name("name", &supply.name)?;
        validate_supply_quantity("quantity", supply.quantity)?;
        validate_supply_quantity("reorderPoint", supply.reorder_point)?;
        if let Some(rate) = supply.consumption_per_meter {
            validate_supply_quantity("consumptionPerMeter", rate)?;
        }
        Ok(())
    }

    // =========================================================================
    // Supply Purchases
    // =========================================================================

    /// Records a purchase, assigning its ID and crediting the supply.
    ///
    /// ## Errors
    /// `NotFound` when the purchase references a supply that does not exist.
    pub async fn add_supply_purchase(
        &mut self,
        mut purchase: SupplyPurchase,
    ) -> StoreResult<SupplyPurchase> {
        Self::validate_purchase(&purchase)?;
        ledger::record_purchase(&mut self.supplies, &purchase)?;

        purchase.id = Self::generate_id();
        self.supply_purchases.push(purchase.clone());

        persist(&self.db, keys::SUPPLIES, &self.supplies).await?;
        persist(&self.db, keys::SUPPLY_PURCHASES, &self.supply_purchases).await?;
        Ok(purchase)
    }

    /// Replaces a purchase record, reconciling supply quantities against the
    /// previous version (delta when the supply is unchanged, move when it
    /// was swapped).
    pub async fn update_supply_purchase(&mut self, purchase: SupplyPurchase) -> StoreResult<()> {
        Self::validate_purchase(&purchase)?;
        let previous = find_by_id(&self.supply_purchases, &purchase.id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("SupplyPurchase", &purchase.id))?;

        ledger::reconcile_purchase(&mut self.supplies, &previous, &purchase)?;
        replace_by_id(&mut self.supply_purchases, purchase);

        persist(&self.db, keys::SUPPLIES, &self.supplies).await?;
        persist(&self.db, keys::SUPPLY_PURCHASES, &self.supply_purchases).await
    }

    /// Deletes a purchase, debiting the supply it had credited (clamped at
    /// zero).
    pub async fn delete_supply_purchase(&mut self, id: &str) -> StoreResult<()> {
        let purchase = find_by_id(&self.supply_purchases, id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("SupplyPurchase", id))?;

        ledger::revert_purchase(&mut self.supplies, &purchase);
        remove_by_id(&mut self.supply_purchases, id);

        persist(&self.db, keys::SUPPLIES, &self.supplies).await?;
        persist(&self.db, keys::SUPPLY_PURCHASES, &self.supply_purchases).await
    }

    fn validate_purchase(purchase: &SupplyPurchase) -> StoreResult<()> {
        validate_order_quantity(purchase.quantity)?;
        validate_price_cents(purchase.price_cents)?;
        validate_name("supplier", &purchase.supplier)?;
        Ok(())
    }

    // =========================================================================
    // Tube Models
    // =========================================================================

    /// Adds a tube model, assigning its ID.
    pub async fn add_tube_model(&mut self, mut tube: TubeModel) -> StoreResult<TubeModel> {
        validate_name("name", &tube.name)?;
        validate_count("quantity", tube.quantity)?;
        validate_count("reorderPoint", tube.reorder_point)?;
        tube.id = Self::generate_id();
        self.tube_models.push(tube.clone());
        persist(&self.db, keys::TUBE_MODELS, &self.tube_models).await?;
        Ok(tube)
    }

    /// Replaces a tube model record wholesale.
    pub async fn update_tube_model(&mut self, tube: TubeModel) -> StoreResult<()> {
        validate_name("name", &tube.name)?;
        validate_count("quantity", tube.quantity)?;
        validate_count("reorderPoint", tube.reorder_point)?;
        let id = tube.id.clone();
        if !replace_by_id(&mut self.tube_models, tube) {
            return Err(DomainError::not_found("TubeModel", &id).into());
        }
        persist(&self.db, keys::TUBE_MODELS, &self.tube_models).await
    }

    /// Deletes a tube model.
    pub async fn delete_tube_model(&mut self, id: &str) -> StoreResult<()> {
        if !remove_by_id(&mut self.tube_models, id) {
            return Err(DomainError::not_found("TubeModel", id).into());
        }
        persist(&self.db, keys::TUBE_MODELS, &self.tube_models).await
    }

    /// Tube models whose count fell below their reorder point.
    pub fn tube_models_needing_reorder(&self) -> Vec<&TubeModel> {
        self.tube_models
            .iter()
            .filter(|t| t.needs_reorder())
            .collect()
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Adds a product, assigning its ID.
    ///
    /// ## Errors
    /// `NotFound` when a bill-of-materials line references a supply that
    /// does not exist - BOM references must resolve at the time they are
    /// set.
    pub async fn add_product(&mut self, mut product: Product) -> StoreResult<Product> {
        self.validate_product(&product)?;
        product.id = Self::generate_id();
        self.products.push(product.clone());
        persist(&self.db, keys::PRODUCTS, &self.products).await?;
        Ok(product)
    }

    /// Replaces a product record wholesale, BOM included.
    pub async fn update_product(&mut self, product: Product) -> StoreResult<()> {
        self.validate_product(&product)?;
        let id = product.id.clone();
        if !replace_by_id(&mut self.products, product) {
            return Err(DomainError::not_found("Product", &id).into());
        }
        persist(&self.db, keys::PRODUCTS, &self.products).await
    }

    /// Deletes a product. Existing orders keep their dangling reference.
    pub async fn delete_product(&mut self, id: &str) -> StoreResult<()> {
        if !remove_by_id(&mut self.products, id) {
            return Err(DomainError::not_found("Product", id).into());
        }
        persist(&self.db, keys::PRODUCTS, &self.products).await
    }

    fn validate_product(&self, product: &Product) -> StoreResult<()> {
        validate_name("name", &product.name)?;
        validate_price_cents(product.price_cents)?;
        for line in &product.supplies {
            validate_supply_quantity("consumptionPerMeter", line.consumption_per_meter)?;
            if find_by_id(&self.supplies, &line.supply_id).is_none() {
                return Err(DomainError::not_found("Supply", &line.supply_id).into());
            }
        }
        Ok(())
    }

    // =========================================================================
    // Availability
    // =========================================================================

    /// Checks whether current stock covers `quantity` units of the product.
    ///
    /// Read-only; nothing is reserved. An unknown product reports
    /// unavailable with an empty shortage list.
    pub fn check_supplies_availability(&self, product_id: &str, quantity: f64) -> Availability {
        let product = find_by_id(&self.products, product_id);
        ledger::check_availability(product, &self.supplies, quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::kv::{Database, DbConfig};
    use chrono::NaiveDate;
    use grafica_core::{BomLine, SupplyKind};

    async fn open_store() -> Store {
        Store::init_test_tracing();
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Store::open(db).await.unwrap()
    }

    fn purchase(supply_id: &str, quantity: f64) -> SupplyPurchase {
        SupplyPurchase {
            id: String::new(),
            supply_id: supply_id.to_string(),
            quantity,
            purchase_date: NaiveDate::from_ymd_opt(2023, 10, 2).unwrap(),
            supplier: "Insumos DTF Ltda".to_string(),
            price_cents: 25_000,
            notes: None,
        }
    }

    fn on_hand(store: &Store, supply_id: &str) -> f64 {
        find_by_id(store.supplies(), supply_id).unwrap().quantity
    }

    #[tokio::test]
    async fn test_purchase_credits_the_supply() {
        let mut store = open_store().await;
        // Seeded black ink starts at 2.5 L.
        assert!((on_hand(&store, "1") - 2.5).abs() < 1e-9);

        store.add_supply_purchase(purchase("1", 5.0)).await.unwrap();

        assert!((on_hand(&store, "1") - 7.5).abs() < 1e-9);
        assert_eq!(store.supply_purchases().len(), 3);
    }

    #[tokio::test]
    async fn test_purchase_for_unknown_supply_changes_nothing() {
        let mut store = open_store().await;

        let err = store
            .add_supply_purchase(purchase("no-such-supply", 5.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(DomainError::NotFound { .. })
        ));
        assert_eq!(store.supply_purchases().len(), 2);
    }

    #[tokio::test]
    async fn test_update_purchase_adjusts_by_delta() {
        let mut store = open_store().await;
        let added = store.add_supply_purchase(purchase("1", 5.0)).await.unwrap();
        // 2.5 + 5.0 = 7.5 on hand.

        let mut edited = added.clone();
        edited.quantity = 3.0;
        store.update_supply_purchase(edited).await.unwrap();

        assert!((on_hand(&store, "1") - 5.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_update_purchase_moves_between_supplies() {
        let mut store = open_store().await;
        let added = store.add_supply_purchase(purchase("1", 5.0)).await.unwrap();

        let mut moved = added.clone();
        moved.supply_id = "2".to_string();
        store.update_supply_purchase(moved).await.unwrap();

        // Black ink back to its seed level, cyan credited.
        assert!((on_hand(&store, "1") - 2.5).abs() < 1e-9);
        assert!((on_hand(&store, "2") - 7.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_delete_middle_purchase_reverts_only_its_quantity() {
        let mut store = open_store().await;
        let first = store.add_supply_purchase(purchase("1", 5.0)).await.unwrap();
        let second = store.add_supply_purchase(purchase("1", 2.0)).await.unwrap();
        store.add_supply_purchase(purchase("1", 1.0)).await.unwrap();
        // 2.5 + 5 + 2 + 1 = 10.5 on hand.

        store.delete_supply_purchase(&second.id).await.unwrap();

        assert!((on_hand(&store, "1") - 8.5).abs() < 1e-9);
        assert!(find_by_id(store.supply_purchases(), &first.id).is_some());
        assert!(find_by_id(store.supply_purchases(), &second.id).is_none());
    }

    #[tokio::test]
    async fn test_delete_purchase_clamps_at_zero() {
        let mut store = open_store().await;
        let added = store.add_supply_purchase(purchase("1", 5.0)).await.unwrap();

        // Operator override shrinks the stock below what the purchase added.
        let mut ink = find_by_id(store.supplies(), "1").unwrap().clone();
        ink.quantity = 1.0;
        store.update_supply(ink).await.unwrap();

        // Reverting the 5.0 purchase clamps at zero (and warns) instead of
        // going negative.
        store.delete_supply_purchase(&added.id).await.unwrap();
        assert_eq!(on_hand(&store, "1"), 0.0);
    }

    #[tokio::test]
    async fn test_supply_crud_and_reorder_listing() {
        let mut store = open_store().await;

        let added = store
            .add_supply(Supply {
                id: String::new(),
                name: "Tinta Laranja DTF".to_string(),
                description: "Tinta especial".to_string(),
                kind: SupplyKind::Tinta,
                quantity: 0.2,
                unit: "L".to_string(),
                reorder_point: 0.5,
                consumption_per_meter: Some(0.005),
            })
            .await
            .unwrap();

        let short: Vec<&str> = store
            .supplies_needing_reorder()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert!(short.contains(&added.id.as_str()));

        store.delete_supply(&added.id).await.unwrap();
        assert_eq!(store.supplies().len(), 7);
    }

    #[tokio::test]
    async fn test_supply_rejects_negative_quantity() {
        let mut store = open_store().await;
        let mut supply = store.supplies()[0].clone();
        supply.quantity = -1.0;

        let err = store.update_supply(supply).await.unwrap_err();
        assert!(matches!(err, StoreError::Domain(_)));
    }

    #[tokio::test]
    async fn test_product_bom_must_reference_existing_supplies() {
        let mut store = open_store().await;

        let err = store
            .add_product(Product {
                id: String::new(),
                name: "DTF Neon".to_string(),
                description: String::new(),
                unit: "m".to_string(),
                price_cents: 7000,
                supplies: vec![BomLine {
                    supply_id: "missing".to_string(),
                    consumption_per_meter: 0.01,
                }],
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Supply not found: missing");
        assert_eq!(store.products().len(), 3);
    }

    #[tokio::test]
    async fn test_check_supplies_availability() {
        let store = open_store().await;

        // 10 m of DTF Padrão fits comfortably in the seed stock.
        assert!(store.check_supplies_availability("1", 10.0).available);

        // 10 000 m exhausts the 100 m of PET film.
        let short = store.check_supplies_availability("1", 10_000.0);
        assert!(!short.available);
        assert!(short.insufficient.iter().any(|s| s.name == "Filme PET DTF"));

        // Unknown product: unavailable, nobody to blame.
        let unknown = store.check_supplies_availability("missing", 1.0);
        assert!(!unknown.available);
        assert!(unknown.insufficient.is_empty());
    }

    #[tokio::test]
    async fn test_tube_model_crud() {
        let mut store = open_store().await;

        let mut added = store
            .add_tube_model(TubeModel {
                id: String::new(),
                name: "Tubete Mini".to_string(),
                size: "5cm x 30cm".to_string(),
                quantity: 5,
                reorder_point: 10,
            })
            .await
            .unwrap();
        assert!(store
            .tube_models_needing_reorder()
            .iter()
            .any(|t| t.id == added.id));

        added.quantity = 40;
        store.update_tube_model(added.clone()).await.unwrap();
        assert!(!store
            .tube_models_needing_reorder()
            .iter()
            .any(|t| t.id == added.id));

        store.delete_tube_model(&added.id).await.unwrap();
        assert_eq!(store.tube_models().len(), 2);
    }
}
