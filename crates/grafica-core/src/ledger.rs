//! # Inventory Ledger
//!
//! Pure functions that keep Supply and TubeModel quantities consistent with
//! purchase and consumption events.
//!
//! ## Event Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Inventory Ledger Events                            │
//! │                                                                         │
//! │  Purchase added ───────► supply.quantity += purchase.quantity           │
//! │                                                                         │
//! │  Purchase edited ──────► reconcile against the PREVIOUS record:         │
//! │                          same supply → adjust by (new − old)            │
//! │                          supply swapped → old supply −old qty,          │
//! │                                           new supply +new qty           │
//! │                                                                         │
//! │  Purchase deleted ─────► supply.quantity −= purchase.quantity           │
//! │                                                                         │
//! │  Order → producao ─────► per BOM line:                                  │
//! │                          supply.quantity −= order qty × rate            │
//! │                                                                         │
//! │  Production complete ──► tube_model.quantity −= 1                       │
//! │                                                                         │
//! │  Every decrement clamps at zero and logs a warning when the clamp       │
//! │  actually truncates - negative stock is a bug worth seeing.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{DomainError, DomainResult};
use crate::types::{Product, Supply, SupplyPurchase, TubeModel};

// =============================================================================
// Clamped Decrements
// =============================================================================

/// Subtracts `amount`, clamping the result at zero.
///
/// The clamp is a defensive invariant - quantities must never go negative -
/// but a clamp that actually truncates means the ledger and reality have
/// diverged, so it is logged rather than swallowed.
fn clamped_sub(current: f64, amount: f64, supply_name: &str) -> f64 {
    let next = current - amount;
    if next < 0.0 {
        warn!(
            supply = %supply_name,
            current,
            amount,
            "decrement clamped at zero"
        );
        return 0.0;
    }
    next
}

// =============================================================================
// Purchase Reconciliation
// =============================================================================

/// Applies a newly recorded purchase: the referenced supply gains the
/// purchased quantity.
///
/// ## Errors
/// `NotFound` when the purchase references a supply that does not exist -
/// references must resolve at the time they are set.
pub fn record_purchase(supplies: &mut [Supply], purchase: &SupplyPurchase) -> DomainResult<()> {
    let supply = supplies
        .iter_mut()
        .find(|s| s.id == purchase.supply_id)
        .ok_or_else(|| DomainError::not_found("Supply", &purchase.supply_id))?;

    supply.quantity += purchase.quantity;
    debug!(
        supply = %supply.name,
        purchased = purchase.quantity,
        on_hand = supply.quantity,
        "purchase recorded"
    );
    Ok(())
}

/// Reconciles an edited purchase against its previous version.
///
/// ## Two Cases
/// - Supply unchanged: adjust that supply by (new − old), clamped at zero.
/// - Supply changed: subtract the old quantity from the old supply (clamped)
///   and add the new quantity to the new supply.
///
/// ## Errors
/// `NotFound` when the *new* supply reference does not resolve. The old
/// supply may have been deleted since the purchase was recorded; that is a
/// dangling reference tolerated defensively (logged, not fatal).
pub fn reconcile_purchase(
    supplies: &mut [Supply],
    previous: &SupplyPurchase,
    updated: &SupplyPurchase,
) -> DomainResult<()> {
    if updated.supply_id == previous.supply_id {
        let supply = supplies
            .iter_mut()
            .find(|s| s.id == updated.supply_id)
            .ok_or_else(|| DomainError::not_found("Supply", &updated.supply_id))?;

        let delta = updated.quantity - previous.quantity;
        if delta >= 0.0 {
            supply.quantity += delta;
        } else {
            supply.quantity = clamped_sub(supply.quantity, -delta, &supply.name);
        }
        return Ok(());
    }

    // Supply reference changed: the new supply must exist before anything
    // is mutated, so a failed edit leaves quantities untouched.
    if !supplies.iter().any(|s| s.id == updated.supply_id) {
        return Err(DomainError::not_found("Supply", &updated.supply_id));
    }

    match supplies.iter_mut().find(|s| s.id == previous.supply_id) {
        Some(old_supply) => {
            old_supply.quantity =
                clamped_sub(old_supply.quantity, previous.quantity, &old_supply.name);
        }
        None => {
            warn!(
                supply_id = %previous.supply_id,
                "previous supply of edited purchase no longer exists"
            );
        }
    }

    if let Some(new_supply) = supplies.iter_mut().find(|s| s.id == updated.supply_id) {
        new_supply.quantity += updated.quantity;
    }

    Ok(())
}

/// Reverts a deleted purchase: the referenced supply loses the purchased
/// quantity, clamped at zero.
///
/// A purchase whose supply was deleted in the meantime reverts to a no-op
/// (dangling references are tolerated at read time).
pub fn revert_purchase(supplies: &mut [Supply], purchase: &SupplyPurchase) {
    match supplies.iter_mut().find(|s| s.id == purchase.supply_id) {
        Some(supply) => {
            supply.quantity = clamped_sub(supply.quantity, purchase.quantity, &supply.name);
        }
        None => {
            warn!(
                supply_id = %purchase.supply_id,
                "deleted purchase references a missing supply"
            );
        }
    }
}

// =============================================================================
// Availability & Consumption
// =============================================================================

/// Result of a supplies-availability check for a candidate order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    /// Whether every BOM line can be covered by current stock.
    pub available: bool,
    /// The supplies whose on-hand quantity is below the required amount.
    pub insufficient: Vec<Supply>,
}

impl Availability {
    /// The safety default: not available, nothing to blame.
    ///
    /// Returned for an unknown product or one without a bill of materials,
    /// where "insufficient stock" would be the wrong diagnosis but letting
    /// the order into production would be worse.
    fn unavailable() -> Self {
        Availability {
            available: false,
            insufficient: Vec::new(),
        }
    }
}

/// Checks whether current stock covers a candidate order.
///
/// Required amount per BOM line is `quantity × consumption_per_meter`; a
/// supply is insufficient when its on-hand quantity is below that. BOM lines
/// referencing deleted supplies are skipped (dangling references tolerated).
///
/// ## Monotonicity
/// All consumption rates are non-negative, so a product insufficient at
/// quantity `q` stays insufficient for every `q' > q`.
pub fn check_availability(
    product: Option<&Product>,
    supplies: &[Supply],
    quantity: f64,
) -> Availability {
    let product = match product {
        Some(p) if !p.supplies.is_empty() => p,
        _ => return Availability::unavailable(),
    };

    let mut insufficient = Vec::new();
    for line in &product.supplies {
        let Some(supply) = supplies.iter().find(|s| s.id == line.supply_id) else {
            continue;
        };
        let required = quantity * line.consumption_per_meter;
        if supply.quantity < required {
            insufficient.push(supply.clone());
        }
    }

    Availability {
        available: insufficient.is_empty(),
        insufficient,
    }
}

/// Consumes supplies for an order entering production.
///
/// For each BOM line, subtracts `quantity × consumption_per_meter` from the
/// matching supply, clamped at zero. The caller guards with
/// [`check_availability`] first and applies this together with the status
/// transition, so both happen or neither does.
pub fn consume_for_order(supplies: &mut [Supply], product: &Product, quantity: f64) {
    for line in &product.supplies {
        if let Some(supply) = supplies.iter_mut().find(|s| s.id == line.supply_id) {
            let consumed = quantity * line.consumption_per_meter;
            supply.quantity = clamped_sub(supply.quantity, consumed, &supply.name);
        }
    }
    debug!(product = %product.name, quantity, "supplies consumed for production");
}

/// Reserves one tube unit for a completed order.
///
/// ## Errors
/// `TubeUnavailable` when the model has no stock; the count is left
/// untouched in that case.
pub fn reserve_tube(tube: &mut TubeModel) -> DomainResult<()> {
    if tube.quantity < crate::TUBE_UNITS_PER_ORDER {
        return Err(DomainError::TubeUnavailable {
            tube_model_id: tube.id.clone(),
        });
    }
    tube.quantity -= crate::TUBE_UNITS_PER_ORDER;
    debug!(tube = %tube.name, remaining = tube.quantity, "tube reserved");
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BomLine, SupplyKind};
    use chrono::NaiveDate;

    fn supply(id: &str, name: &str, quantity: f64) -> Supply {
        Supply {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            kind: SupplyKind::Tinta,
            quantity,
            unit: "L".to_string(),
            reorder_point: 0.5,
            consumption_per_meter: Some(0.01),
        }
    }

    fn purchase(id: &str, supply_id: &str, quantity: f64) -> SupplyPurchase {
        SupplyPurchase {
            id: id.to_string(),
            supply_id: supply_id.to_string(),
            quantity,
            purchase_date: NaiveDate::from_ymd_opt(2023, 9, 15).unwrap(),
            supplier: "Insumos DTF Ltda".to_string(),
            price_cents: 25_000,
            notes: None,
        }
    }

    fn product_with_bom(lines: &[(&str, f64)]) -> Product {
        Product {
            id: "prod-1".to_string(),
            name: "DTF Padrão".to_string(),
            description: String::new(),
            unit: "m".to_string(),
            price_cents: 4000,
            supplies: lines
                .iter()
                .map(|(supply_id, rate)| BomLine {
                    supply_id: supply_id.to_string(),
                    consumption_per_meter: *rate,
                })
                .collect(),
        }
    }

    #[test]
    fn test_record_purchase_adds_quantity() {
        // Seed scenario: Tinta Preta DTF at 2.5 L, purchase of 5 L → 7.5 L.
        let mut supplies = vec![supply("1", "Tinta Preta DTF", 2.5)];
        record_purchase(&mut supplies, &purchase("p1", "1", 5.0)).unwrap();
        assert_eq!(supplies[0].quantity, 7.5);
    }

    #[test]
    fn test_record_purchase_unknown_supply_fails() {
        let mut supplies = vec![supply("1", "Tinta Preta DTF", 2.5)];
        let err = record_purchase(&mut supplies, &purchase("p1", "missing", 5.0)).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(supplies[0].quantity, 2.5);
    }

    #[test]
    fn test_reconcile_same_supply_quantity_change() {
        let mut supplies = vec![supply("1", "Tinta Preta DTF", 7.5)];
        let previous = purchase("p1", "1", 5.0);
        let mut updated = previous.clone();
        updated.quantity = 3.0;

        reconcile_purchase(&mut supplies, &previous, &updated).unwrap();
        assert_eq!(supplies[0].quantity, 5.5);
    }

    #[test]
    fn test_reconcile_shrinking_purchase_clamps_at_zero() {
        // On-hand already below the old purchase quantity (manual override).
        let mut supplies = vec![supply("1", "Tinta Preta DTF", 1.0)];
        let previous = purchase("p1", "1", 5.0);
        let mut updated = previous.clone();
        updated.quantity = 0.5;

        reconcile_purchase(&mut supplies, &previous, &updated).unwrap();
        assert_eq!(supplies[0].quantity, 0.0);
    }

    #[test]
    fn test_reconcile_supply_switch_moves_quantity() {
        let mut supplies = vec![
            supply("1", "Tinta Preta DTF", 7.5),
            supply("2", "Tinta Ciano DTF", 2.0),
        ];
        let previous = purchase("p1", "1", 5.0);
        let mut updated = previous.clone();
        updated.supply_id = "2".to_string();
        updated.quantity = 4.0;

        reconcile_purchase(&mut supplies, &previous, &updated).unwrap();
        assert_eq!(supplies[0].quantity, 2.5);
        assert_eq!(supplies[1].quantity, 6.0);
    }

    #[test]
    fn test_reconcile_switch_to_unknown_supply_is_untouched() {
        let mut supplies = vec![supply("1", "Tinta Preta DTF", 7.5)];
        let previous = purchase("p1", "1", 5.0);
        let mut updated = previous.clone();
        updated.supply_id = "missing".to_string();

        let err = reconcile_purchase(&mut supplies, &previous, &updated).unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(supplies[0].quantity, 7.5);
    }

    #[test]
    fn test_revert_purchase_subtracts_clamped() {
        let mut supplies = vec![supply("1", "Tinta Preta DTF", 3.0)];
        revert_purchase(&mut supplies, &purchase("p1", "1", 5.0));
        assert_eq!(supplies[0].quantity, 0.0);

        // Dangling supply reference: no-op.
        revert_purchase(&mut supplies, &purchase("p2", "missing", 1.0));
        assert_eq!(supplies[0].quantity, 0.0);
    }

    #[test]
    fn test_net_purchases_property() {
        // Final quantity equals seed + net purchases for an add/update/delete
        // sequence.
        let mut supplies = vec![supply("1", "Tinta Preta DTF", 2.5)];

        let first = purchase("p1", "1", 5.0);
        let second = purchase("p2", "1", 1.5);
        let third = purchase("p3", "1", 2.0);
        record_purchase(&mut supplies, &first).unwrap();
        record_purchase(&mut supplies, &second).unwrap();
        record_purchase(&mut supplies, &third).unwrap();

        // Delete the middle purchase: only the remaining two count.
        revert_purchase(&mut supplies, &second);
        assert_eq!(supplies[0].quantity, 2.5 + 5.0 + 2.0);

        // Shrink the first purchase.
        let mut smaller = first.clone();
        smaller.quantity = 4.0;
        reconcile_purchase(&mut supplies, &first, &smaller).unwrap();
        assert_eq!(supplies[0].quantity, 2.5 + 4.0 + 2.0);
    }

    #[test]
    fn test_availability_sufficient() {
        // 10 m × 0.01 L/m = 0.1 L required ≤ 2.5 L on hand.
        let supplies = vec![supply("1", "Tinta Preta DTF", 2.5)];
        let product = product_with_bom(&[("1", 0.01)]);

        let result = check_availability(Some(&product), &supplies, 10.0);
        assert!(result.available);
        assert!(result.insufficient.is_empty());
    }

    #[test]
    fn test_availability_insufficient_names_supplies() {
        let supplies = vec![
            supply("1", "Tinta Preta DTF", 0.05),
            supply("2", "Tinta Ciano DTF", 2.0),
        ];
        let product = product_with_bom(&[("1", 0.01), ("2", 0.01)]);

        let result = check_availability(Some(&product), &supplies, 10.0);
        assert!(!result.available);
        assert_eq!(result.insufficient.len(), 1);
        assert_eq!(result.insufficient[0].name, "Tinta Preta DTF");
    }

    #[test]
    fn test_availability_unknown_product_is_safety_default() {
        let supplies = vec![supply("1", "Tinta Preta DTF", 2.5)];
        let result = check_availability(None, &supplies, 10.0);
        assert!(!result.available);
        assert!(result.insufficient.is_empty());
    }

    #[test]
    fn test_availability_empty_bom_is_safety_default() {
        let supplies = vec![supply("1", "Tinta Preta DTF", 2.5)];
        let product = product_with_bom(&[]);
        let result = check_availability(Some(&product), &supplies, 10.0);
        assert!(!result.available);
        assert!(result.insufficient.is_empty());
    }

    #[test]
    fn test_availability_is_monotonic_in_quantity() {
        let supplies = vec![supply("1", "Tinta Preta DTF", 2.5)];
        let product = product_with_bom(&[("1", 0.01)]);

        let mut seen_insufficient = false;
        for q in 1..600 {
            let result = check_availability(Some(&product), &supplies, q as f64);
            if seen_insufficient {
                assert!(!result.available, "availability flipped back at q={q}");
            }
            if !result.available {
                seen_insufficient = true;
            }
        }
        assert!(seen_insufficient, "expected stock to run out within range");
    }

    #[test]
    fn test_consume_for_order() {
        let mut supplies = vec![
            supply("1", "Tinta Preta DTF", 2.5),
            supply("7", "Filme PET DTF", 100.0),
        ];
        let product = product_with_bom(&[("1", 0.01), ("7", 1.0)]);

        consume_for_order(&mut supplies, &product, 10.0);
        assert!((supplies[0].quantity - 2.4).abs() < 1e-9);
        assert_eq!(supplies[1].quantity, 90.0);
    }

    #[test]
    fn test_consume_clamps_at_zero() {
        let mut supplies = vec![supply("1", "Tinta Preta DTF", 0.05)];
        let product = product_with_bom(&[("1", 0.01)]);

        consume_for_order(&mut supplies, &product, 10.0);
        assert_eq!(supplies[0].quantity, 0.0);
    }

    #[test]
    fn test_reserve_tube() {
        let mut tube = TubeModel {
            id: "t1".to_string(),
            name: "Tubete Padrão".to_string(),
            size: "8cm x 50cm".to_string(),
            quantity: 2,
            reorder_point: 20,
        };
        reserve_tube(&mut tube).unwrap();
        assert_eq!(tube.quantity, 1);
        reserve_tube(&mut tube).unwrap();
        assert_eq!(tube.quantity, 0);

        let err = reserve_tube(&mut tube).unwrap_err();
        assert!(matches!(err, DomainError::TubeUnavailable { .. }));
        assert_eq!(tube.quantity, 0);
    }
}
