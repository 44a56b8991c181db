use saferpay_domain::{Order, OrderCheckoutState, OrderRepository, Payment, PaymentState};

use crate::errors::ProviderError;

/// Looks orders up for gateway callbacks, enforcing checkout preconditions.
pub struct OrderProvider<R: OrderRepository> {
    orders: R,
}

impl<R: OrderRepository> OrderProvider<R> {
    pub fn new(orders: R) -> Self {
        Self { orders }
    }

    /// Order targeted by an assert callback.
    pub fn provide_for_assert(&self, token: &str) -> Result<Order, ProviderError> {
        self.provide(token)
    }

    /// Order targeted by a capture callback.
    pub fn provide_for_capture(&self, token: &str) -> Result<Order, ProviderError> {
        self.provide(token)
    }

    fn provide(&self, token: &str) -> Result<Order, ProviderError> {
        if let Some(order) = self.orders.find_one_by_token_value(token) {
            return Ok(order);
        }
        let order = self
            .orders
            .find_one_by_token(token)
            .ok_or_else(|| ProviderError::OrderNotFound {
                token: token.to_string(),
            })?;
        if order.checkout_state == OrderCheckoutState::Completed {
            return Err(ProviderError::OrderAlreadyCompleted {
                token: token.to_string(),
            });
        }
        Ok(order)
    }
}

/// Selects the payment a gateway callback operates on: the order's most
/// recent payment that is still new.
pub struct PaymentProvider;

impl PaymentProvider {
    pub fn provide_for_order(&self, order: &Order) -> Result<Payment, ProviderError> {
        order
            .last_payment(PaymentState::New)
            .cloned()
            .ok_or_else(|| ProviderError::PaymentNotFound {
                order_number: order.number.clone(),
            })
    }
}
