//! Storage layer for the checkout bridge.
//!
//! Defines the repository traits the domain services are wired against and
//! provides two backends:
//! - [`InMemoryStore`] for tests and local development
//! - [`PostgresStore`] persisting aggregates as JSONB documents

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use repository::{AddressRepository, CartRepository, CustomerRepository, OrderRepository};
