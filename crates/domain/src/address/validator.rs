//! Address record validation.

use super::Address;

/// Full-record address validation.
///
/// Returns the list of violated rules; an empty list means the record
/// is valid.
pub trait AddressValidator: Send + Sync {
    fn validate(&self, address: &Address) -> Vec<String>;
}

/// Required-field validator applied to every persisted address.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleValidator;

impl RuleValidator {
    pub fn new() -> Self {
        Self
    }
}

impl AddressValidator for RuleValidator {
    fn validate(&self, address: &Address) -> Vec<String> {
        let mut violations = Vec::new();

        if address.firstname.trim().is_empty() {
            violations.push("Please enter the first name".to_string());
        }
        if address.lastname.trim().is_empty() {
            violations.push("Please enter the last name".to_string());
        }
        if address.street.trim().is_empty() {
            violations.push("Please enter the street".to_string());
        }
        if address.city.trim().is_empty() {
            violations.push("Please enter the city".to_string());
        }
        if address.telephone.trim().is_empty() {
            violations.push("Please enter the telephone number".to_string());
        }
        if address.postcode.trim().is_empty() {
            violations.push("Please enter the zip/postal code".to_string());
        }
        if address.country_id.trim().is_empty() {
            violations.push("Please enter the country".to_string());
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::CustomerId;

    fn complete_address() -> Address {
        Address {
            street: "123 Main St".to_string(),
            city: "Austin".to_string(),
            postcode: "73301".to_string(),
            country_id: "US".to_string(),
            telephone: "555-0100".to_string(),
            firstname: "Jane".to_string(),
            lastname: "Doe".to_string(),
            ..Address::new_for(CustomerId::new())
        }
    }

    #[test]
    fn complete_address_passes() {
        assert!(RuleValidator::new().validate(&complete_address()).is_empty());
    }

    #[test]
    fn missing_fields_are_all_reported() {
        let address = Address::new_for(CustomerId::new());
        let violations = RuleValidator::new().validate(&address);
        assert_eq!(violations.len(), 7);
    }

    #[test]
    fn blank_telephone_is_reported() {
        let mut address = complete_address();
        address.telephone = "   ".to_string();

        let violations = RuleValidator::new().validate(&address);
        assert_eq!(violations, vec!["Please enter the telephone number"]);
    }
}
