//! # Domain Types
//!
//! Core domain types for the print-shop console.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │     Supply      │   │   PrintOrder    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  status         │   │  kind           │   │  order_number   │       │
//! │  │  cnpj_cpf       │   │  quantity (f64) │   │  status         │       │
//! │  │  last_contact   │   │  reorder_point  │   │  total_cents    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Supporting: SupplyPurchase, TubeModel, Product (+ BomLine),            │
//! │              Seller, PaymentKey                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A print order has:
//! - `id`: UUID v4 - opaque, immutable, used for references
//! - `order_number`: `P001`-style sequence - human-readable, shown on labels
//!
//! ## Units
//! - Monetary values are centavos (i64) - never floats
//! - Supply quantities are f64 (liters of ink, meters of film)
//! - Tube counts are i64 (discrete physical objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Entity Trait
// =============================================================================

/// Anything stored in a collection and addressed by its opaque ID.
///
/// The store manipulates whole collections (replace-by-id, remove-by-id),
/// so every entity exposes its ID through this seam instead of each
/// collection growing its own copy of the same loop.
pub trait Entity {
    /// The opaque, immutable ID assigned at creation.
    fn id(&self) -> &str;
}

/// Finds an entity by ID.
pub fn find_by_id<'a, T: Entity>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Replaces the entity with the same ID, returning whether a match existed.
///
/// Full-record replacement: the incoming value wins wholesale, mirroring the
/// edit-form contract (`update E (full record)`).
pub fn replace_by_id<T: Entity>(items: &mut [T], replacement: T) -> bool {
    match items.iter_mut().find(|item| item.id() == replacement.id()) {
        Some(slot) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}

/// Removes the entity with the given ID, returning whether a match existed.
pub fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: &str) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

macro_rules! impl_entity {
    ($($ty:ty),* $(,)?) => {
        $(impl Entity for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        })*
    };
}

// =============================================================================
// Customer
// =============================================================================

/// Customer lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    /// Prospect who has not ordered yet.
    Lead,
    /// Ordering regularly.
    Active,
    /// Gone quiet.
    Inactive,
}

/// A CRM customer record.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    /// CNPJ or CPF tax identifier.
    pub cnpj_cpf: String,
    /// State registration ("Isento" when exempt).
    pub state_registration: String,
    pub delivery_address: String,
    pub status: CustomerStatus,
    /// Date of the last contact with this customer.
    #[ts(as = "String")]
    pub last_contact: NaiveDate,
}

// =============================================================================
// Supply
// =============================================================================

/// Category of consumable printing input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SupplyKind {
    /// Ink (black, CMY, white).
    Tinta,
    /// Adhesive powder.
    Cola,
    /// PET base film.
    Filme,
    /// Shipping tube stock tracked as a supply.
    Tubete,
}

/// A consumable supply tracked by quantity and reorder threshold.
///
/// ## Quantity Ownership
/// `quantity` is mutated only by the inventory ledger (purchases add,
/// production consumption subtracts). The edit form is an override escape
/// hatch, not the normal path.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Supply {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: SupplyKind,
    /// On-hand quantity in `unit`. Never negative.
    pub quantity: f64,
    /// Unit of measure ("L", "kg", "m").
    pub unit: String,
    /// Threshold below which the supply is flagged for replenishment.
    pub reorder_point: f64,
    /// Default consumption per meter of printed product, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumption_per_meter: Option<f64>,
}

impl Supply {
    /// Whether on-hand quantity has fallen below the reorder point.
    pub fn needs_reorder(&self) -> bool {
        self.quantity < self.reorder_point
    }
}

// =============================================================================
// Supply Purchase
// =============================================================================

/// A purchase of a supply, feeding the inventory ledger.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SupplyPurchase {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// The supply this purchase replenishes.
    pub supply_id: String,
    /// Quantity bought, in the supply's unit.
    pub quantity: f64,
    #[ts(as = "String")]
    pub purchase_date: NaiveDate,
    pub supplier: String,
    /// Price paid in centavos.
    pub price_cents: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// Tube Model
// =============================================================================

/// A reusable shipping-tube variant, tracked by discrete count.
///
/// Exactly one unit is consumed per completed order that selects it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TubeModel {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    /// Size descriptor, e.g. "8cm x 50cm".
    pub size: String,
    /// On-hand count. Never negative.
    pub quantity: i64,
    pub reorder_point: i64,
}

impl TubeModel {
    /// Whether the on-hand count has fallen below the reorder point.
    pub fn needs_reorder(&self) -> bool {
        self.quantity < self.reorder_point
    }
}

// =============================================================================
// Product
// =============================================================================

/// One line of a product's bill of materials.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BomLine {
    pub supply_id: String,
    /// How much of the supply one meter of product consumes.
    pub consumption_per_meter: f64,
}

/// A sellable print product with its bill of materials.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub description: String,
    /// Unit of sale ("m").
    pub unit: String,
    /// Price per unit in centavos.
    pub price_cents: i64,
    /// Bill of materials: the supplies one unit of product consumes.
    pub supplies: Vec<BomLine>,
}

// =============================================================================
// Seller
// =============================================================================

/// Reference data: a salesperson who can be attached to an order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub email: String,
}

// =============================================================================
// Payment Key
// =============================================================================

/// Kind of payment key (PIX key types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKeyKind {
    Cpf,
    Cnpj,
    Email,
    Telefone,
    Aleatoria,
}

/// Reference data: a payment identifier the shop accepts transfers on.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentKey {
    /// Unique identifier (UUID v4).
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PaymentKeyKind,
    /// The key value itself (CPF, e-mail address, random key, ...).
    pub key: String,
    pub description: String,
}

// =============================================================================
// Print Order
// =============================================================================

/// Fulfillment state of a print order.
///
/// ```text
/// analise ──► aprovado ──► producao ──► expedição ──► entregue
///    │                        ▲
///    ├────────────────────────┘  (pago + supplies available)
///    └──► rejeitado
/// ```
///
/// `rejeitado` and `entregue` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Files under review (initial state).
    Analise,
    /// Files approved, waiting for payment or supplies.
    Aprovado,
    /// On the printer; supplies have been consumed.
    Producao,
    /// Produced and tubed, waiting to ship.
    #[serde(rename = "expedição")]
    Expedicao,
    /// Shipped/delivered (terminal).
    Entregue,
    /// Files rejected (terminal).
    Rejeitado,
}

impl OrderStatus {
    /// Whether no further transitions leave this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Entregue | OrderStatus::Rejeitado)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Analise => "analise",
            OrderStatus::Aprovado => "aprovado",
            OrderStatus::Producao => "producao",
            OrderStatus::Expedicao => "expedição",
            OrderStatus::Entregue => "entregue",
            OrderStatus::Rejeitado => "rejeitado",
        };
        f.write_str(name)
    }
}

/// Payment settlement state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pendente,
    Pago,
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Pix,
    Credito,
    Dinheiro,
    Boleto,
    Transferencia,
}

/// The central workflow entity: a customer's print job from intake to
/// delivery.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PrintOrder {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Human-readable sequential number (`P001`). Unique, monotonic.
    pub order_number: String,
    pub customer_id: String,
    pub product_id: String,
    /// Quantity in the product's unit of sale (meters).
    pub quantity: f64,
    /// Unit price in centavos, frozen at order time.
    pub price_cents: i64,
    /// quantity × price. Cached for display, always recomputed before
    /// persistence - never trusted independently of its inputs.
    pub total_cents: i64,
    pub seller_id: String,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    /// The payment key used, when the method involves one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_key_id: Option<String>,
    pub payment_status: PaymentStatus,
    /// Set when production completes and a tube is reserved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tube_model_id: Option<String>,
    /// Tube units reserved for this order (0 until production completes).
    pub tube_quantity: i64,
    #[ts(as = "String")]
    pub delivery_date: NaiveDate,
    /// Calendar date of creation.
    #[ts(as = "String")]
    pub created_at: NaiveDate,
    /// Wall-clock time of creation, "HH:MM".
    pub created_time: String,
    /// Refreshed on every mutation.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
    pub notes: String,
}

impl PrintOrder {
    /// Recomputes the cached total from quantity and unit price.
    ///
    /// Called on every add/update so the cache can never drift from its
    /// inputs once the record is persisted.
    pub fn recompute_total(&mut self) {
        self.total_cents = order_total_cents(self.quantity, self.price_cents);
    }
}

/// Order total in centavos: quantity × unit price, rounded to the nearest
/// centavo.
pub fn order_total_cents(quantity: f64, price_cents: i64) -> i64 {
    (quantity * price_cents as f64).round() as i64
}

impl_entity!(
    Customer,
    Supply,
    SupplyPurchase,
    TubeModel,
    Product,
    Seller,
    PaymentKey,
    PrintOrder,
);

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tube(id: &str, quantity: i64) -> TubeModel {
        TubeModel {
            id: id.to_string(),
            name: format!("Tubete {id}"),
            size: "8cm x 50cm".to_string(),
            quantity,
            reorder_point: 20,
        }
    }

    #[test]
    fn test_order_total_cents() {
        // 10 m × R$ 40,00 = R$ 400,00
        assert_eq!(order_total_cents(10.0, 4000), 40_000);
        // fractional meters round to the nearest centavo
        assert_eq!(order_total_cents(2.5, 5500), 13_750);
        assert_eq!(order_total_cents(0.0, 4000), 0);
    }

    #[test]
    fn test_needs_reorder() {
        let supply = Supply {
            id: "1".to_string(),
            name: "Tinta Preta DTF".to_string(),
            description: String::new(),
            kind: SupplyKind::Tinta,
            quantity: 0.4,
            unit: "L".to_string(),
            reorder_point: 0.5,
            consumption_per_meter: Some(0.01),
        };
        assert!(supply.needs_reorder());

        assert!(tube("1", 10).needs_reorder());
        assert!(!tube("1", 20).needs_reorder());
    }

    #[test]
    fn test_replace_by_id_full_record() {
        let mut tubes = vec![tube("a", 5), tube("b", 7)];
        let mut updated = tube("b", 99);
        updated.name = "Tubete Grande".to_string();

        assert!(replace_by_id(&mut tubes, updated));
        assert_eq!(tubes[1].quantity, 99);
        assert_eq!(tubes[1].name, "Tubete Grande");

        assert!(!replace_by_id(&mut tubes, tube("missing", 1)));
        assert_eq!(tubes.len(), 2);
    }

    #[test]
    fn test_remove_by_id() {
        let mut tubes = vec![tube("a", 5), tube("b", 7)];
        assert!(remove_by_id(&mut tubes, "a"));
        assert_eq!(tubes.len(), 1);
        assert!(!remove_by_id(&mut tubes, "a"));
    }

    #[test]
    fn test_find_by_id() {
        let tubes = vec![tube("a", 5)];
        assert!(find_by_id(&tubes, "a").is_some());
        assert!(find_by_id(&tubes, "z").is_none());
    }

    #[test]
    fn test_order_status_serde_names() {
        // The persisted layout keeps the original Portuguese labels,
        // including the accent on "expedição".
        let json = serde_json::to_string(&OrderStatus::Expedicao).unwrap();
        assert_eq!(json, "\"expedição\"");
        let back: OrderStatus = serde_json::from_str("\"expedição\"").unwrap();
        assert_eq!(back, OrderStatus::Expedicao);

        assert_eq!(
            serde_json::to_string(&OrderStatus::Analise).unwrap(),
            "\"analise\""
        );
    }

    #[test]
    fn test_order_status_terminal() {
        assert!(OrderStatus::Entregue.is_terminal());
        assert!(OrderStatus::Rejeitado.is_terminal());
        assert!(!OrderStatus::Producao.is_terminal());
    }

    #[test]
    fn test_supply_kind_uses_type_field() {
        let supply = Supply {
            id: "1".to_string(),
            name: "Cola em Pó DTF".to_string(),
            description: String::new(),
            kind: SupplyKind::Cola,
            quantity: 5.0,
            unit: "kg".to_string(),
            reorder_point: 1.0,
            consumption_per_meter: Some(0.01),
        };
        let json = serde_json::to_value(&supply).unwrap();
        assert_eq!(json["type"], "cola");
    }
}
