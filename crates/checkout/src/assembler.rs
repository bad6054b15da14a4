//! Order assembly: binds addresses, payment, and customer onto a cart.

use domain::{Cart, Customer, PaymentDetails};

use crate::request::AddressInformation;

/// Upstream systems use "NA" as a placeholder for "not applicable" in the
/// company field; it never names a real company.
const COMPANY_NOT_APPLICABLE: &str = "NA";

/// Applies the order request's address information onto the cart.
///
/// Binds the billing and shipping addresses (street lines collapsed to the
/// canonical single field), copies `email`/`firstname`/`lastname` from the
/// bound billing address up onto the cart, attaches the payment selection,
/// and flags guest vs registered checkout. Returns the composite shipping
/// method code; the caller applies it after shipping rates have been
/// recomputed.
pub fn assemble(cart: &mut Cart, customer: Option<&Customer>, info: &AddressInformation) -> String {
    match customer {
        Some(customer) => cart.assign_customer(customer),
        None => cart.mark_guest(),
    }

    let billing = info.billing_address.to_cart_address();
    cart.email = billing.email.clone();
    cart.firstname = Some(billing.firstname.clone());
    cart.lastname = Some(billing.lastname.clone());
    cart.billing_address = Some(billing);

    let mut shipping = info.shipping_address.to_cart_address();
    if shipping.company.as_deref() == Some(COMPANY_NOT_APPLICABLE) {
        shipping.company = None;
    }
    cart.shipping_address = Some(shipping);

    cart.payment = Some(PaymentDetails {
        method: info.payment_method_code.clone(),
        additional_information: info.payment_method_additional.clone(),
    });

    info.shipping_method()
}
