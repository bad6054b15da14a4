//! Cart (quote) aggregate.

use std::collections::HashMap;

use common::{CartId, CustomerId, ItemId, RegionId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::customer::Customer;
use crate::money::{Money, ProductId};

/// The state of a cart in its lifecycle.
///
/// A cart is mutable while `Active`; once `Submitted` it is immutable and
/// has produced exactly one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CartState {
    /// Cart is open; items and addresses can change.
    #[default]
    Active,

    /// Cart has produced an order (terminal state).
    Submitted,
}

impl CartState {
    /// Returns true if the cart contents can still be modified.
    pub fn can_modify(&self) -> bool {
        matches!(self, CartState::Active)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CartState::Active => "Active",
            CartState::Submitted => "Submitted",
        }
    }
}

impl std::fmt::Display for CartState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// A client-declared item does not exist in the cart.
    #[error("item not found in cart: {item_id}")]
    ItemNotFound { item_id: ItemId },

    /// The cart has already produced an order.
    #[error("cart has already been submitted")]
    AlreadySubmitted,

    /// The cart holds no items.
    #[error("cart has no items")]
    NoItems,
}

/// A line entry in a cart with a server-assigned stable identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Server-assigned identity; the only handle clients may reference.
    pub id: ItemId,
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
}

impl CartItem {
    /// Creates a new cart item with a fresh server identity.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            id: ItemId::new(),
            product_id: product_id.into(),
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    /// Returns the total price for this line (quantity * unit price).
    pub fn row_total(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}

/// An address bound onto a cart slot.
///
/// The street is held in its canonical single-field form; multi-line wire
/// input is collapsed before binding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartAddress {
    pub firstname: String,
    pub lastname: String,
    pub company: Option<String>,
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub country_id: String,
    pub region: Option<String>,
    pub region_id: Option<RegionId>,
    pub telephone: String,
    pub email: Option<String>,
}

/// Payment selection attached to a cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub method: String,
    pub additional_information: HashMap<String, serde_json::Value>,
}

/// A mutable pre-order shopping session aggregate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    customer_id: Option<CustomerId>,
    is_guest: bool,
    state: CartState,
    /// Ordered; reconciliation preserves the original order of survivors.
    items: Vec<CartItem>,
    pub billing_address: Option<CartAddress>,
    pub shipping_address: Option<CartAddress>,
    pub shipping_method: Option<String>,
    pub payment: Option<PaymentDetails>,
    /// Denormalized from the billing address, consumed downstream by
    /// order display and search.
    pub email: Option<String>,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    subtotal: Money,
    shipping_amount: Money,
    grand_total: Money,
}

// Query methods
impl Cart {
    /// Creates a new empty guest cart.
    pub fn new() -> Self {
        Self {
            is_guest: true,
            ..Self::default()
        }
    }

    /// Creates a new empty cart bound to a customer.
    pub fn for_customer(customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Self::default()
        }
    }

    pub fn id(&self) -> CartId {
        self.id
    }

    pub fn customer_id(&self) -> Option<CustomerId> {
        self.customer_id
    }

    pub fn is_guest(&self) -> bool {
        self.is_guest
    }

    pub fn state(&self) -> CartState {
        self.state
    }

    /// Returns the items in their original order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Finds an item by its server identity.
    pub fn find_item(&self, item_id: ItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn shipping_amount(&self) -> Money {
        self.shipping_amount
    }

    pub fn grand_total(&self) -> Money {
        self.grand_total
    }
}

// Command methods
impl Cart {
    /// Adds an item to the cart.
    pub fn add_item(&mut self, item: CartItem) -> Result<ItemId, CartError> {
        if !self.state.can_modify() {
            return Err(CartError::AlreadySubmitted);
        }
        let id = item.id;
        self.items.push(item);
        Ok(id)
    }

    /// Reconciles the cart against a client-declared item list.
    ///
    /// Every declared id must name an existing server item; an unknown id
    /// aborts the whole operation before any mutation, leaving the item set
    /// completely unchanged. When all ids match, server items the client
    /// omitted are removed, preserving the original order of the rest. The
    /// client can only shrink the cart to a subset it is aware of; matching
    /// is by identity only, never by product or quantity.
    pub fn reconcile_items(&mut self, declared: &[ItemId]) -> Result<(), CartError> {
        if !self.state.can_modify() {
            return Err(CartError::AlreadySubmitted);
        }

        for item_id in declared {
            if self.find_item(*item_id).is_none() {
                return Err(CartError::ItemNotFound { item_id: *item_id });
            }
        }

        self.items.retain(|item| declared.contains(&item.id));
        Ok(())
    }

    /// Attaches a registered customer to the cart.
    pub fn assign_customer(&mut self, customer: &Customer) {
        self.customer_id = Some(customer.id);
        self.is_guest = false;
    }

    /// Flags the cart as a guest checkout.
    pub fn mark_guest(&mut self) {
        self.is_guest = true;
    }

    /// Recomputes the cart totals from its items and the shipping amount.
    pub fn collect_totals(&mut self, shipping_amount: Money) {
        self.subtotal = self.items.iter().map(CartItem::row_total).sum();
        self.shipping_amount = shipping_amount;
        self.grand_total = self.subtotal + shipping_amount;
    }

    /// Marks the cart as having produced an order.
    pub fn mark_submitted(&mut self) -> Result<(), CartError> {
        if !self.state.can_modify() {
            return Err(CartError::AlreadySubmitted);
        }
        self.state = CartState::Submitted;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with_items(count: usize) -> (Cart, Vec<ItemId>) {
        let mut cart = Cart::new();
        let ids = (0..count)
            .map(|i| {
                cart.add_item(CartItem::new(
                    format!("SKU-{i:03}"),
                    format!("Product {i}"),
                    1,
                    Money::from_cents(1000),
                ))
                .unwrap()
            })
            .collect();
        (cart, ids)
    }

    #[test]
    fn reconcile_subset_removes_only_unmentioned_items() {
        let (mut cart, ids) = cart_with_items(3);

        cart.reconcile_items(&[ids[0], ids[2]]).unwrap();

        let remaining: Vec<ItemId> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(remaining, vec![ids[0], ids[2]]);
    }

    #[test]
    fn reconcile_preserves_original_order() {
        let (mut cart, ids) = cart_with_items(4);

        // Declared in reverse; survivors keep server order.
        cart.reconcile_items(&[ids[3], ids[1]]).unwrap();

        let remaining: Vec<ItemId> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(remaining, vec![ids[1], ids[3]]);
    }

    #[test]
    fn reconcile_unknown_item_fails_without_mutation() {
        let (mut cart, ids) = cart_with_items(3);

        let result = cart.reconcile_items(&[ids[0], ItemId::new()]);

        assert!(matches!(result, Err(CartError::ItemNotFound { .. })));
        assert_eq!(cart.item_count(), 3);
        let remaining: Vec<ItemId> = cart.items().iter().map(|i| i.id).collect();
        assert_eq!(remaining, ids);
    }

    #[test]
    fn reconcile_full_list_keeps_everything() {
        let (mut cart, ids) = cart_with_items(2);
        cart.reconcile_items(&ids).unwrap();
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn reconcile_empty_list_clears_cart() {
        let (mut cart, _) = cart_with_items(2);
        cart.reconcile_items(&[]).unwrap();
        assert!(!cart.has_items());
    }

    #[test]
    fn submitted_cart_rejects_modification() {
        let (mut cart, ids) = cart_with_items(1);
        cart.mark_submitted().unwrap();

        assert!(matches!(
            cart.reconcile_items(&ids),
            Err(CartError::AlreadySubmitted)
        ));
        assert!(matches!(
            cart.add_item(CartItem::new("SKU-X", "X", 1, Money::from_cents(1))),
            Err(CartError::AlreadySubmitted)
        ));
        assert!(matches!(
            cart.mark_submitted(),
            Err(CartError::AlreadySubmitted)
        ));
    }

    #[test]
    fn collect_totals_sums_rows_and_shipping() {
        let mut cart = Cart::new();
        cart.add_item(CartItem::new("SKU-001", "Widget", 2, Money::from_cents(1000)))
            .unwrap();
        cart.add_item(CartItem::new("SKU-002", "Gadget", 1, Money::from_cents(500)))
            .unwrap();

        cart.collect_totals(Money::from_cents(495));

        assert_eq!(cart.subtotal().cents(), 2500);
        assert_eq!(cart.shipping_amount().cents(), 495);
        assert_eq!(cart.grand_total().cents(), 2995);
    }

    #[test]
    fn assign_customer_clears_guest_flag() {
        let mut cart = Cart::new();
        assert!(cart.is_guest());

        let customer = Customer::new("jane@example.com", "Jane", "Doe");
        cart.assign_customer(&customer);

        assert!(!cart.is_guest());
        assert_eq!(cart.customer_id(), Some(customer.id));
    }

    #[test]
    fn serialization_roundtrip() {
        let (mut cart, _) = cart_with_items(2);
        cart.collect_totals(Money::from_cents(100));

        let json = serde_json::to_string(&cart).unwrap();
        let deserialized: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(cart, deserialized);
    }
}
