use serde::{Deserialize, Serialize};

use crate::payment::{Payment, PaymentState};

/// Checkout state of an order.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderCheckoutState {
    #[default]
    Cart,
    Addressed,
    ShippingSelected,
    PaymentSelected,
    Completed,
}

/// An order as the gateway integration sees it: a token-addressable checkout
/// carrying payment attempts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub number: String,
    /// Opaque token the gateway return URLs address the order by.
    pub token_value: String,
    pub checkout_state: OrderCheckoutState,
    pub currency_code: String,
    /// Order total in minor units of `currency_code`.
    pub items_total: i64,
    pub payments: Vec<Payment>,
}

impl Order {
    pub fn new(
        number: impl Into<String>,
        token_value: impl Into<String>,
        currency_code: impl Into<String>,
        items_total: i64,
    ) -> Self {
        Self {
            number: number.into(),
            token_value: token_value.into(),
            checkout_state: OrderCheckoutState::PaymentSelected,
            currency_code: currency_code.into(),
            items_total,
            payments: Vec::new(),
        }
    }

    pub fn add_payment(&mut self, payment: Payment) {
        self.payments.push(payment);
    }

    /// The most recent payment in the given state.
    pub fn last_payment(&self, state: PaymentState) -> Option<&Payment> {
        self.payments.iter().rev().find(|p| p.state == state)
    }

    /// Writes a processed payment back, matching on id; unknown ids are
    /// appended.
    pub fn replace_payment(&mut self, payment: Payment) {
        match self.payments.iter_mut().find(|p| p.id == payment.id) {
            Some(slot) => *slot = payment,
            None => self.payments.push(payment),
        }
    }
}
