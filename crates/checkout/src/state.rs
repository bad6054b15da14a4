//! Checkout stage machine.

use serde::{Deserialize, Serialize};

/// The stage reached by an order-creation run.
///
/// Stage progression:
/// ```text
/// QuoteLoaded ──► ItemsReconciled ──► AddressesBound ──► TotalsCollected
///                                       ──► Submitted | SubmitFailed
/// ```
///
/// Each arrow is a hard precondition for the next; failure at any stage
/// aborts without attempting later stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CheckoutState {
    /// The cart has been loaded and is open for submission.
    #[default]
    QuoteLoaded,

    /// Client-declared items have been reconciled against the cart.
    ItemsReconciled,

    /// Billing/shipping addresses, shipping method, and payment are bound.
    AddressesBound,

    /// Totals have been collected and the cart persisted.
    TotalsCollected,

    /// The cart produced an order (terminal state).
    Submitted,

    /// The submission capability yielded no order (terminal state).
    SubmitFailed,
}

impl CheckoutState {
    /// Returns true if this is a terminal stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CheckoutState::Submitted | CheckoutState::SubmitFailed)
    }

    /// Returns true if the run produced an order.
    pub fn is_placed(&self) -> bool {
        matches!(self, CheckoutState::Submitted)
    }

    /// Returns the stage name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::QuoteLoaded => "QuoteLoaded",
            CheckoutState::ItemsReconciled => "ItemsReconciled",
            CheckoutState::AddressesBound => "AddressesBound",
            CheckoutState::TotalsCollected => "TotalsCollected",
            CheckoutState::Submitted => "Submitted",
            CheckoutState::SubmitFailed => "SubmitFailed",
        }
    }
}

impl std::fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
