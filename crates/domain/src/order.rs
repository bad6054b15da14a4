//! Order, the terminal artifact of a submitted cart.

use chrono::{DateTime, Utc};
use common::{CustomerId, OrderId};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartAddress};
use crate::money::{Money, ProductId};

/// A line item snapshot carried on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl OrderItem {
    /// Returns the total price for this line (quantity * unit price).
    pub fn row_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// An order derived 1:1 from a successfully submitted cart.
///
/// Orders are created only at submission time and never mutated by the
/// address or cart components afterwards; their lifetime is independent of
/// the source cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: Option<CustomerId>,
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub items: Vec<OrderItem>,
    pub billing_address: Option<CartAddress>,
    pub shipping_address: Option<CartAddress>,
    pub shipping_method: Option<String>,
    pub payment_method: Option<String>,
    pub grand_total: Money,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Snapshots a fully assembled cart into a new order.
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            id: OrderId::new(),
            customer_id: cart.customer_id(),
            email: cart.email.clone(),
            firstname: cart.firstname.clone(),
            lastname: cart.lastname.clone(),
            items: cart
                .items()
                .iter()
                .map(|item| OrderItem {
                    product_id: item.product_id.clone(),
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
            billing_address: cart.billing_address.clone(),
            shipping_address: cart.shipping_address.clone(),
            shipping_method: cart.shipping_method.clone(),
            payment_method: cart.payment.as_ref().map(|p| p.method.clone()),
            grand_total: cart.grand_total(),
            placed_at: Utc::now(),
        }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
