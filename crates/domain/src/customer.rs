//! Customer aggregate.

use common::{AddressId, CustomerId};
use serde::{Deserialize, Serialize};

/// A registered customer owning zero or more addresses.
///
/// The `default_billing`/`default_shipping` pointers name the address used
/// automatically for billing or shipping unless overridden per order. At most
/// one owned address carries the corresponding default flag, reflected here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub email: String,
    pub firstname: String,
    pub lastname: String,
    pub default_billing: Option<AddressId>,
    pub default_shipping: Option<AddressId>,
}

impl Customer {
    /// Creates a new customer with no default addresses.
    pub fn new(
        email: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            id: CustomerId::new(),
            email: email.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
            default_billing: None,
            default_shipping: None,
        }
    }

    /// Returns true if the given address is the customer's default billing address.
    pub fn is_default_billing(&self, address_id: AddressId) -> bool {
        self.default_billing == Some(address_id)
    }

    /// Returns true if the given address is the customer's default shipping address.
    pub fn is_default_shipping(&self, address_id: AddressId) -> bool {
        self.default_shipping == Some(address_id)
    }
}
