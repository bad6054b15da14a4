//! Domain layer for the checkout bridge.
//!
//! This crate provides the core aggregates and domain services:
//! - Customer and Address aggregates with normalization and
//!   default-address reassignment
//! - Cart (quote) aggregate with client item reconciliation
//! - Order, the terminal artifact produced from a submitted cart
//! - Region directory and address validation collaborator traits
//!
//! The crate performs no I/O; persistence lives behind the repository
//! traits implemented in the `store` crate.

pub mod address;
pub mod cart;
pub mod customer;
pub mod money;
pub mod order;
pub mod region;

pub use address::{
    Address, AddressError, AddressNormalizer, AddressPayload, AddressRegion, AddressValidator,
    DefaultsUpdate, RegionPayload, RuleValidator, reassign_defaults,
};
pub use cart::{Cart, CartAddress, CartError, CartItem, CartState, PaymentDetails};
pub use customer::Customer;
pub use money::{Money, ProductId};
pub use order::{Order, OrderItem};
pub use region::{Region, RegionDirectory, StaticRegionDirectory};
