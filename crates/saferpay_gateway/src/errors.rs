/// Failures raised by gateway actions.
///
/// Business-level gateway rejections are not in here: those are recorded
/// into the payment details and never raised.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("The given request is not supported by this action")]
    RequestNotSupported,
    #[error("Gateway call failed")]
    Client,
}

/// Precondition failures raised by the order/payment providers.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Order with token \"{token}\" does not exist.")]
    OrderNotFound { token: String },
    #[error("Order with token \"{token}\" has already been completed.")]
    OrderAlreadyCompleted { token: String },
    #[error("Order {order_number} has no new payment to process.")]
    PaymentNotFound { order_number: String },
}

impl ProviderError {
    /// Transport-level status the outer boundary maps this error to.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::OrderNotFound { .. } | Self::PaymentNotFound { .. } => 404,
            Self::OrderAlreadyCompleted { .. } => 409,
        }
    }
}

/// Failures of a full assert/capture flow.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("{0}")]
    Provider(ProviderError),
    #[error("Gateway action failed")]
    Action,
    #[error("Payment state transition failed")]
    Transition,
    #[error("Failed to persist the processed order")]
    Persistence,
}
