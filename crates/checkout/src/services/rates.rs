//! Shipping rate service trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use domain::{CartAddress, Money};

use crate::error::CheckoutError;

/// A quoted shipping rate for a composite method code.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingRate {
    /// Composite `carrier_method` identifier the rate was quoted for.
    pub method: String,
    pub amount: Money,
}

/// Trait for shipping rate computation.
///
/// Rates are recomputed against the bound shipping address on every order
/// attempt; stale or missing rate data must not silently pass. `Ok(None)`
/// means the method cannot ship to the address.
#[async_trait]
pub trait ShippingRateService: Send + Sync {
    /// Quotes the rate for a composite method code against a shipping address.
    async fn quote(
        &self,
        address: &CartAddress,
        shipping_method: &str,
    ) -> Result<Option<ShippingRate>, CheckoutError>;
}

#[derive(Debug, Default)]
struct InMemoryRateState {
    rates: HashMap<String, Money>,
    fail_on_quote: bool,
}

/// In-memory shipping rate service for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryShippingRateService {
    state: Arc<RwLock<InMemoryRateState>>,
}

impl InMemoryShippingRateService {
    /// Creates a new rate service with no configured rates.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a rate service seeded with the given method rates.
    pub fn with_rates(rates: impl IntoIterator<Item = (String, Money)>) -> Self {
        let service = Self::new();
        service.state.write().unwrap().rates = rates.into_iter().collect();
        service
    }

    /// Sets the rate for a composite method code.
    pub fn set_rate(&self, method: impl Into<String>, amount: Money) {
        self.state.write().unwrap().rates.insert(method.into(), amount);
    }

    /// Configures the service to fail on the next quote call.
    pub fn set_fail_on_quote(&self, fail: bool) {
        self.state.write().unwrap().fail_on_quote = fail;
    }
}

#[async_trait]
impl ShippingRateService for InMemoryShippingRateService {
    async fn quote(
        &self,
        _address: &CartAddress,
        shipping_method: &str,
    ) -> Result<Option<ShippingRate>, CheckoutError> {
        let state = self.state.read().unwrap();

        if state.fail_on_quote {
            return Err(CheckoutError::RateService(
                "rate lookup unavailable".to_string(),
            ));
        }

        Ok(state.rates.get(shipping_method).map(|amount| ShippingRate {
            method: shipping_method.to_string(),
            amount: *amount,
        }))
    }
}
