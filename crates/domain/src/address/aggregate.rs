//! Address aggregate.

use common::{AddressId, CustomerId, RegionId};
use serde::{Deserialize, Serialize};

/// The region slot of an address.
///
/// An address region is either resolved against the region directory
/// (canonical id and name) or a freeform name for countries without
/// directory subdivisions. The enum makes the two outcomes mutually
/// exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressRegion {
    /// Resolved directory region with its canonical display name.
    Resolved { id: RegionId, name: String },

    /// Client-supplied freeform region name, no directory identifier.
    Freeform { name: Option<String> },
}

impl AddressRegion {
    /// Returns the directory identifier, if resolved.
    pub fn id(&self) -> Option<RegionId> {
        match self {
            AddressRegion::Resolved { id, .. } => Some(*id),
            AddressRegion::Freeform { .. } => None,
        }
    }

    /// Returns the region display name, canonical or freeform.
    pub fn name(&self) -> Option<&str> {
        match self {
            AddressRegion::Resolved { name, .. } => Some(name),
            AddressRegion::Freeform { name } => name.as_deref(),
        }
    }
}

impl Default for AddressRegion {
    fn default() -> Self {
        AddressRegion::Freeform { name: None }
    }
}

/// A customer address.
///
/// `id` is absent until the address has been persisted. The street is held
/// in its canonical single-field form, lines joined with `\n`; splitting into
/// the two-line wire shape happens at the payload boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: Option<AddressId>,
    pub customer_id: Option<CustomerId>,
    pub region: AddressRegion,
    pub street: String,
    pub city: String,
    pub postcode: String,
    pub country_id: String,
    pub telephone: String,
    pub firstname: String,
    pub lastname: String,
    pub company: Option<String>,
    pub is_default_billing: bool,
    pub is_default_shipping: bool,
}

impl Address {
    /// Creates a fresh, unpersisted address owned by the given customer.
    pub fn new_for(customer_id: CustomerId) -> Self {
        Self {
            customer_id: Some(customer_id),
            ..Self::default()
        }
    }

    /// Returns true if this address belongs to the given customer.
    pub fn is_owned_by(&self, customer_id: CustomerId) -> bool {
        self.customer_id == Some(customer_id)
    }

    /// Returns the street as an ordered list of lines, padded with one empty
    /// trailing line when only a single line is present.
    pub fn street_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.street.split('\n').map(str::to_string).collect();
        if lines.len() < 2 {
            lines.push(String::new());
        }
        lines
    }
}
