//! Shared identifier types used across the checkout bridge crates.

pub mod types;

pub use types::*;
