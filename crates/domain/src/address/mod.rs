//! Customer address aggregate, normalization, and default reassignment.

mod aggregate;
mod defaults;
mod normalizer;
mod payload;
mod validator;

pub use aggregate::{Address, AddressRegion};
pub use defaults::{DefaultsUpdate, reassign_defaults};
pub use normalizer::AddressNormalizer;
pub use payload::{AddressPayload, RegionPayload};
pub use validator::{AddressValidator, RuleValidator};

use common::RegionId;
use thiserror::Error;

/// Errors that can occur during address normalization.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The supplied region identifier does not resolve to a directory record.
    #[error("unknown region: {region_id}")]
    UnknownRegion { region_id: RegionId },

    /// One or more address validation rules were violated.
    #[error("address validation failed: {rules}")]
    Invalid { rules: String },
}
