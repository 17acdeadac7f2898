//! # CRM & Reference Data Operations
//!
//! Customers, sellers and payment keys. Plain collection CRUD: no derived
//! state, no cross-collection effects. Deleting a record that orders still
//! reference is allowed; those references dangle and readers tolerate them.

use grafica_core::types::{remove_by_id, replace_by_id};
use grafica_core::validation::validate_name;
use grafica_core::{Customer, DomainError, PaymentKey, Seller};

use crate::error::StoreResult;

use super::{keys, persist, Store};

impl Store {
    // =========================================================================
    // Customers
    // =========================================================================

    /// Adds a customer, assigning its ID.
    pub async fn add_customer(&mut self, mut customer: Customer) -> StoreResult<Customer> {
        validate_name("name", &customer.name)?;
        customer.id = Self::generate_id();
        self.customers.push(customer.clone());
        persist(&self.db, keys::CUSTOMERS, &self.customers).await?;
        Ok(customer)
    }

    /// Replaces a customer record wholesale.
    ///
    /// ## Errors
    /// `NotFound` when no customer has the record's ID.
    pub async fn update_customer(&mut self, customer: Customer) -> StoreResult<()> {
        validate_name("name", &customer.name)?;
        let id = customer.id.clone();
        if !replace_by_id(&mut self.customers, customer) {
            return Err(DomainError::not_found("Customer", &id).into());
        }
        persist(&self.db, keys::CUSTOMERS, &self.customers).await
    }

    /// Deletes a customer.
    ///
    /// ## Errors
    /// `NotFound` when no customer has the given ID.
    pub async fn delete_customer(&mut self, id: &str) -> StoreResult<()> {
        if !remove_by_id(&mut self.customers, id) {
            return Err(DomainError::not_found("Customer", id).into());
        }
        persist(&self.db, keys::CUSTOMERS, &self.customers).await
    }

    // =========================================================================
    // Sellers
    // =========================================================================

    /// Adds a seller, assigning its ID.
    pub async fn add_seller(&mut self, mut seller: Seller) -> StoreResult<Seller> {
        validate_name("name", &seller.name)?;
        seller.id = Self::generate_id();
        self.sellers.push(seller.clone());
        persist(&self.db, keys::SELLERS, &self.sellers).await?;
        Ok(seller)
    }

    /// Replaces a seller record wholesale.
    pub async fn update_seller(&mut self, seller: Seller) -> StoreResult<()> {
        validate_name("name", &seller.name)?;
        let id = seller.id.clone();
        if !replace_by_id(&mut self.sellers, seller) {
            return Err(DomainError::not_found("Seller", &id).into());
        }
        persist(&self.db, keys::SELLERS, &self.sellers).await
    }

    /// Deletes a seller.
    pub async fn delete_seller(&mut self, id: &str) -> StoreResult<()> {
        if !remove_by_id(&mut self.sellers, id) {
            return Err(DomainError::not_found("Seller", id).into());
        }
        persist(&self.db, keys::SELLERS, &self.sellers).await
    }

    // =========================================================================
    // Payment Keys
    // =========================================================================

    /// Adds a payment key, assigning its ID.
    pub async fn add_payment_key(&mut self, mut payment_key: PaymentKey) -> StoreResult<PaymentKey> {
        validate_name("key", &payment_key.key)?;
        payment_key.id = Self::generate_id();
        self.payment_keys.push(payment_key.clone());
        persist(&self.db, keys::PAYMENT_KEYS, &self.payment_keys).await?;
        Ok(payment_key)
    }

    /// Replaces a payment key record wholesale.
    pub async fn update_payment_key(&mut self, payment_key: PaymentKey) -> StoreResult<()> {
        validate_name("key", &payment_key.key)?;
        let id = payment_key.id.clone();
        if !replace_by_id(&mut self.payment_keys, payment_key) {
            return Err(DomainError::not_found("PaymentKey", &id).into());
        }
        persist(&self.db, keys::PAYMENT_KEYS, &self.payment_keys).await
    }

    /// Deletes a payment key.
    pub async fn delete_payment_key(&mut self, id: &str) -> StoreResult<()> {
        if !remove_by_id(&mut self.payment_keys, id) {
            return Err(DomainError::not_found("PaymentKey", id).into());
        }
        persist(&self.db, keys::PAYMENT_KEYS, &self.payment_keys).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
