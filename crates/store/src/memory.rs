use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{AddressId, CartId, CustomerId, OrderId};
use domain::{Address, Cart, Customer, DefaultsUpdate, Order};
use tokio::sync::RwLock;

use crate::error::Result;
use crate::repository::{AddressRepository, CartRepository, CustomerRepository, OrderRepository};

/// In-memory storage backend for testing and local development.
///
/// Implements every repository trait over the same shared state, matching
/// the interface of the PostgreSQL backend. Address insertion order is
/// preserved so per-customer listings come back oldest first.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    customers: Arc<RwLock<HashMap<CustomerId, Customer>>>,
    addresses: Arc<RwLock<Vec<Address>>>,
    carts: Arc<RwLock<HashMap<CartId, Cart>>>,
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored addresses.
    pub async fn address_count(&self) -> usize {
        self.addresses.read().await.len()
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    /// Clears all stored aggregates.
    pub async fn clear(&self) {
        self.customers.write().await.clear();
        self.addresses.write().await.clear();
        self.carts.write().await.clear();
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn save_customer(&self, customer: &Customer) -> Result<()> {
        self.customers
            .write()
            .await
            .insert(customer.id, customer.clone());
        Ok(())
    }

    async fn update_default_addresses(
        &self,
        customer: &Customer,
        update: DefaultsUpdate,
    ) -> Result<()> {
        let mut customers = self.customers.write().await;
        if let Some(stored) = customers.get_mut(&customer.id) {
            if update.billing_changed {
                stored.default_billing = customer.default_billing;
            }
            if update.shipping_changed {
                stored.default_shipping = customer.default_shipping;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl AddressRepository for InMemoryStore {
    async fn find_address(&self, id: AddressId) -> Result<Option<Address>> {
        let addresses = self.addresses.read().await;
        Ok(addresses.iter().find(|a| a.id == Some(id)).cloned())
    }

    async fn find_addresses_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Address>> {
        let addresses = self.addresses.read().await;
        Ok(addresses
            .iter()
            .filter(|a| a.customer_id == Some(customer_id))
            .cloned()
            .collect())
    }

    async fn save_address(&self, address: &Address) -> Result<AddressId> {
        let id = address.id.unwrap_or_else(AddressId::new);
        let mut record = address.clone();
        record.id = Some(id);

        let mut addresses = self.addresses.write().await;
        match addresses.iter_mut().find(|a| a.id == Some(id)) {
            Some(existing) => *existing = record,
            None => addresses.push(record),
        }
        Ok(id)
    }

    async fn delete_address(&self, id: AddressId) -> Result<()> {
        self.addresses.write().await.retain(|a| a.id != Some(id));
        Ok(())
    }
}

#[async_trait]
impl CartRepository for InMemoryStore {
    async fn find_cart(&self, id: CartId) -> Result<Option<Cart>> {
        Ok(self.carts.read().await.get(&id).cloned())
    }

    async fn save_cart(&self, cart: &Cart) -> Result<()> {
        self.carts.write().await.insert(cart.id(), cart.clone());
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn insert_order(&self, order: &Order) -> Result<()> {
        self.orders.write().await.push(order.clone());
        Ok(())
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>> {
        let orders = self.orders.read().await;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn find_orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut found: Vec<Order> = orders
            .iter()
            .filter(|o| o.customer_id == Some(customer_id))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Ok(found)
    }
}
