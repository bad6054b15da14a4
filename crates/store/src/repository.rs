//! Repository traits for the checkout bridge aggregates.
//!
//! Components receive these as explicit constructor arguments; there is no
//! global registry. Both backends implement every trait so a single store
//! value can be handed to each consumer.

use async_trait::async_trait;
use common::{AddressId, CartId, CustomerId, OrderId};
use domain::{Address, Cart, Customer, DefaultsUpdate, Order};

use crate::error::Result;

/// Persistence for customer aggregates.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Loads a customer by id.
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>>;

    /// Persists the full customer aggregate.
    async fn save_customer(&self, customer: &Customer) -> Result<()>;

    /// Persists only the default-address pointers named by `update`.
    ///
    /// Minimizes write amplification after default reassignment; callers may
    /// fall back to [`save_customer`](Self::save_customer) instead.
    async fn update_default_addresses(
        &self,
        customer: &Customer,
        update: DefaultsUpdate,
    ) -> Result<()>;
}

/// Persistence for customer addresses.
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Loads an address by id.
    async fn find_address(&self, id: AddressId) -> Result<Option<Address>>;

    /// Lists all addresses owned by a customer, oldest first.
    async fn find_addresses_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Address>>;

    /// Persists the address, assigning an id when it has none yet.
    /// Returns the persisted id.
    async fn save_address(&self, address: &Address) -> Result<AddressId>;

    /// Deletes an address by id.
    async fn delete_address(&self, id: AddressId) -> Result<()>;
}

/// Persistence for cart (quote) aggregates.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Loads a cart by id.
    async fn find_cart(&self, id: CartId) -> Result<Option<Cart>>;

    /// Persists the full cart aggregate.
    async fn save_cart(&self, cart: &Cart) -> Result<()>;
}

/// Persistence for placed orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Inserts a newly placed order.
    async fn insert_order(&self, order: &Order) -> Result<()>;

    /// Loads an order by id.
    async fn find_order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Lists a customer's orders, most recent first.
    async fn find_orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>>;
}
