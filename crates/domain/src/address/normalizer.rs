//! Address payload normalization and denormalization.

use crate::customer::Customer;
use crate::region::RegionDirectory;

use super::{Address, AddressError, AddressPayload, AddressRegion, AddressValidator, RegionPayload};

/// Converts raw address payloads into canonical `Address` records and back.
///
/// Normalization resolves the region against the directory, applies strict
/// default-flag semantics, and delegates full-record validation to the
/// configured validator. Denormalization produces the client-facing payload
/// with the documented blank-field fallbacks.
pub struct AddressNormalizer<D, V> {
    regions: D,
    validator: V,
    default_country: String,
}

impl<D, V> AddressNormalizer<D, V>
where
    D: RegionDirectory,
    V: AddressValidator,
{
    /// Creates a normalizer with the given region directory, validator, and
    /// process-wide default country.
    pub fn new(regions: D, validator: V, default_country: impl Into<String>) -> Self {
        Self {
            regions,
            validator,
            default_country: default_country.into(),
        }
    }

    /// Applies a raw payload onto an address owned by `customer`.
    ///
    /// Payload fields that are present replace the address's values; absent
    /// fields leave the current value untouched, except the default flags,
    /// which are always re-evaluated strictly from the payload.
    #[tracing::instrument(skip(self, address, payload, customer), fields(customer_id = %customer.id))]
    pub fn normalize(
        &self,
        address: &mut Address,
        payload: &AddressPayload,
        customer: &Customer,
    ) -> Result<(), AddressError> {
        address.customer_id = Some(customer.id);

        if let Some(firstname) = &payload.firstname {
            address.firstname = firstname.clone();
        }
        if let Some(lastname) = &payload.lastname {
            address.lastname = lastname.clone();
        }
        if !payload.street.is_empty() {
            address.street = payload.street_joined();
        }
        if let Some(city) = &payload.city {
            address.city = city.clone();
        }
        if let Some(postcode) = &payload.postcode {
            address.postcode = postcode.clone();
        }
        if let Some(country_id) = &payload.country_id {
            address.country_id = country_id.clone();
        }
        if let Some(telephone) = &payload.telephone {
            address.telephone = telephone.clone();
        }
        if payload.company.is_some() {
            address.company = payload.company.clone();
        }

        // A supplied region id must resolve; the canonical name wins over
        // any client-supplied text. Without an id the freeform name is
        // stored with no id. The two outcomes are mutually exclusive.
        address.region = match payload.region.region_id {
            Some(region_id) => {
                let region = self
                    .regions
                    .resolve(region_id)
                    .ok_or(AddressError::UnknownRegion { region_id })?;
                AddressRegion::Resolved {
                    id: region.id,
                    name: region.name,
                }
            }
            None => AddressRegion::Freeform {
                name: payload.region.region.clone(),
            },
        };

        address.is_default_billing = payload.default_billing;
        address.is_default_shipping = payload.default_shipping;

        let violations = self.validator.validate(address);
        if !violations.is_empty() {
            return Err(AddressError::Invalid {
                rules: violations.join(". "),
            });
        }

        Ok(())
    }

    /// Denormalizes an address back into the client-facing payload.
    pub fn to_payload(&self, address: &Address, customer: &Customer) -> AddressPayload {
        let firstname = if address.firstname.is_empty() {
            customer.firstname.clone()
        } else {
            address.firstname.clone()
        };
        let lastname = if address.lastname.is_empty() {
            customer.lastname.clone()
        } else {
            address.lastname.clone()
        };
        let country_id = if address.country_id.is_empty() {
            self.default_country.clone()
        } else {
            address.country_id.clone()
        };

        let default_billing = address.is_default_billing
            || address.id.is_some_and(|id| customer.is_default_billing(id));
        let default_shipping = address.is_default_shipping
            || address.id.is_some_and(|id| customer.is_default_shipping(id));

        AddressPayload {
            id: address.id,
            region: RegionPayload {
                region: address.region.name().map(str::to_string),
                region_id: address.region.id(),
            },
            street: address.street_lines(),
            firstname: Some(firstname),
            lastname: Some(lastname),
            city: Some(address.city.clone()),
            postcode: Some(address.postcode.clone()),
            country_id: Some(country_id),
            telephone: Some(address.telephone.clone()),
            company: address.company.clone(),
            default_billing,
            default_shipping,
        }
    }
}
