//! Flow handlers: one per checkout callback, tying providers, gateway
//! actions, the payment state machine and persistence together.

use error_stack::ResultExt;
use saferpay_client::{responses::TransactionStatus, CustomResult};
use saferpay_domain::{ObjectManager, OrderRepository, Payment};

use crate::{
    actions::{Gateway, Request},
    errors::FlowError,
    provider::{OrderProvider, PaymentProvider},
};

/// Applies the `complete` transition once a payment is captured.
fn finalize(payment: &mut Payment) -> CustomResult<(), FlowError> {
    if payment.details.status.as_deref() == Some(TransactionStatus::Captured.as_str()) {
        payment.complete().change_context(FlowError::Transition)?;
    }
    Ok(())
}

/// Drives the assert callback: look the order up, confirm the transaction
/// with the gateway, optionally capture right away, persist the result.
pub struct AssertPaymentHandler<R: OrderRepository, M: ObjectManager> {
    order_provider: OrderProvider<R>,
    payment_provider: PaymentProvider,
    gateway: Gateway,
    object_manager: M,
    /// Capture immediately after a successful authorization; set from the
    /// gateway config's `use_authorize` flag being off.
    auto_capture: bool,
}

impl<R, M> AssertPaymentHandler<R, M>
where
    R: OrderRepository,
    M: ObjectManager,
{
    pub fn new(
        order_provider: OrderProvider<R>,
        gateway: Gateway,
        object_manager: M,
        auto_capture: bool,
    ) -> Self {
        Self {
            order_provider,
            payment_provider: PaymentProvider,
            gateway,
            object_manager,
            auto_capture,
        }
    }

    pub async fn handle(&self, token: &str) -> CustomResult<Payment, FlowError> {
        let mut order = self
            .order_provider
            .provide_for_assert(token)
            .map_err(FlowError::Provider)?;
        let payment = self
            .payment_provider
            .provide_for_order(&order)
            .map_err(FlowError::Provider)?;

        let mut request = Request::Assert { payment };
        self.gateway
            .execute(&mut request)
            .await
            .change_context(FlowError::Action)?;
        let mut payment = request.into_payment();

        if self.auto_capture
            && payment.details.status.as_deref() == Some(TransactionStatus::Authorized.as_str())
        {
            let mut capture = Request::Capture { payment };
            self.gateway
                .execute(&mut capture)
                .await
                .change_context(FlowError::Action)?;
            payment = capture.into_payment();
        }
        finalize(&mut payment)?;

        tracing::info!(
            order = %order.number,
            status = payment.details.status.as_deref().unwrap_or("unknown"),
            "saferpay assert handled",
        );

        order.replace_payment(payment.clone());
        self.object_manager
            .flush(&order)
            .change_context(FlowError::Persistence)?;
        Ok(payment)
    }
}

/// Drives the capture callback: look the order up, settle the transaction,
/// complete the payment, persist the result.
pub struct CapturePaymentHandler<R: OrderRepository, M: ObjectManager> {
    order_provider: OrderProvider<R>,
    payment_provider: PaymentProvider,
    gateway: Gateway,
    object_manager: M,
}

impl<R, M> CapturePaymentHandler<R, M>
where
    R: OrderRepository,
    M: ObjectManager,
{
    pub fn new(order_provider: OrderProvider<R>, gateway: Gateway, object_manager: M) -> Self {
        Self {
            order_provider,
            payment_provider: PaymentProvider,
            gateway,
            object_manager,
        }
    }

    pub async fn handle(&self, token: &str) -> CustomResult<Payment, FlowError> {
        let mut order = self
            .order_provider
            .provide_for_capture(token)
            .map_err(FlowError::Provider)?;
        let payment = self
            .payment_provider
            .provide_for_order(&order)
            .map_err(FlowError::Provider)?;

        let mut request = Request::Capture { payment };
        self.gateway
            .execute(&mut request)
            .await
            .change_context(FlowError::Action)?;
        let mut payment = request.into_payment();
        finalize(&mut payment)?;

        tracing::info!(
            order = %order.number,
            status = payment.details.status.as_deref().unwrap_or("unknown"),
            "saferpay capture handled",
        );

        order.replace_payment(payment.clone());
        self.object_manager
            .flush(&order)
            .change_context(FlowError::Persistence)?;
        Ok(payment)
    }
}
