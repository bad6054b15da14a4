//! Order creation request payloads.

use std::collections::HashMap;

use common::{CartId, ItemId, RegionId};
use domain::CartAddress;
use serde::{Deserialize, Serialize};

/// A client reference to a server cart item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    /// Server-assigned item identity; the only way clients may name items.
    pub server_item_id: ItemId,
}

/// An address as supplied in the order request body.
///
/// Distinct from the customer address payload: order addresses are bound
/// directly onto cart slots and never persisted to the address book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderAddressInput {
    #[serde(default)]
    pub firstname: Option<String>,

    #[serde(default)]
    pub lastname: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    /// Ordered street lines, collapsed to the canonical single field on
    /// binding.
    #[serde(default)]
    pub street: Vec<String>,

    #[serde(default)]
    pub city: Option<String>,

    #[serde(default)]
    pub postcode: Option<String>,

    #[serde(default)]
    pub country_id: Option<String>,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub region_id: Option<RegionId>,

    #[serde(default)]
    pub telephone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl OrderAddressInput {
    /// Converts the wire shape into a cart address slot, collapsing the
    /// street lines and dropping empty trailing ones.
    pub fn to_cart_address(&self) -> CartAddress {
        let last_filled = self
            .street
            .iter()
            .rposition(|line| !line.trim().is_empty());
        let street = match last_filled {
            Some(idx) => self.street[..=idx].join("\n"),
            None => String::new(),
        };

        CartAddress {
            firstname: self.firstname.clone().unwrap_or_default(),
            lastname: self.lastname.clone().unwrap_or_default(),
            company: self.company.clone(),
            street,
            city: self.city.clone().unwrap_or_default(),
            postcode: self.postcode.clone().unwrap_or_default(),
            country_id: self.country_id.clone().unwrap_or_default(),
            region: self.region.clone(),
            region_id: self.region_id,
            telephone: self.telephone.clone().unwrap_or_default(),
            email: self.email.clone(),
        }
    }
}

/// The address/shipping/payment portion of an order request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressInformation {
    #[serde(rename = "billingAddress")]
    pub billing_address: OrderAddressInput,

    #[serde(rename = "shippingAddress")]
    pub shipping_address: OrderAddressInput,

    pub shipping_method_code: String,
    pub shipping_carrier_code: String,
    pub payment_method_code: String,

    #[serde(default)]
    pub payment_method_additional: HashMap<String, serde_json::Value>,
}

impl AddressInformation {
    /// Canonical composite shipping-method identifier used by rate lookup.
    pub fn shipping_method(&self) -> String {
        format!(
            "{}_{}",
            self.shipping_carrier_code, self.shipping_method_code
        )
    }
}

/// Full order creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub cart_id: CartId,

    /// The client's declared view of the cart contents.
    #[serde(default)]
    pub products: Vec<ProductRef>,

    #[serde(rename = "addressInformation")]
    pub address_information: AddressInformation,
}
