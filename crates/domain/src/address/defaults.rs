//! Default address reassignment.

use crate::customer::Customer;

use super::Address;

/// Which customer default pointers changed during reassignment.
///
/// Callers persist only the attributes that changed; re-persisting the whole
/// customer is an acceptable fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultsUpdate {
    pub billing_changed: bool,
    pub shipping_changed: bool,
}

impl DefaultsUpdate {
    /// Returns true if either pointer changed.
    pub fn any(&self) -> bool {
        self.billing_changed || self.shipping_changed
    }
}

/// Aligns the customer's default-address pointers with a persisted address.
///
/// If the address dropped its default-billing flag while being the
/// customer's current default billing address, the pointer is cleared; if it
/// gained the flag, the pointer is set. Symmetric for shipping. Keeps the
/// at-most-one-default invariant between the address flags and the customer
/// pointers.
///
/// The address must have been persisted (its id known); unpersisted
/// addresses produce no update.
pub fn reassign_defaults(customer: &mut Customer, address: &Address) -> DefaultsUpdate {
    let Some(address_id) = address.id else {
        return DefaultsUpdate::default();
    };

    let mut update = DefaultsUpdate::default();

    if address.is_default_billing {
        if customer.default_billing != Some(address_id) {
            customer.default_billing = Some(address_id);
            update.billing_changed = true;
        }
    } else if customer.default_billing == Some(address_id) {
        customer.default_billing = None;
        update.billing_changed = true;
    }

    if address.is_default_shipping {
        if customer.default_shipping != Some(address_id) {
            customer.default_shipping = Some(address_id);
            update.shipping_changed = true;
        }
    } else if customer.default_shipping == Some(address_id) {
        customer.default_shipping = None;
        update.shipping_changed = true;
    }

    update
}
