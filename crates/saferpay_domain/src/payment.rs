use serde::{Deserialize, Serialize};

/// Lifecycle state of a payment, driven by the surrounding checkout workflow.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentState {
    #[default]
    New,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

/// Rejected payment state transition.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("payment cannot transition from {from} to {to}")]
pub struct StateTransitionError {
    pub from: PaymentState,
    pub to: PaymentState,
}

/// Gateway-specific state persisted inside the payment entity.
///
/// This is the integration's only persistent side channel. The serialized
/// keys (`status`, `transaction_id`, `capture_id`, `token`, `redirect_url`)
/// are part of the storage layout and must stay stable.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capture_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

/// A single payment attempt attached to an order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub state: PaymentState,
    /// Amount in minor units of `currency_code`.
    pub amount: i64,
    pub currency_code: String,
    pub details: PaymentDetails,
}

impl Payment {
    pub fn new(id: u64, amount: i64, currency_code: impl Into<String>) -> Self {
        Self {
            id,
            state: PaymentState::New,
            amount,
            currency_code: currency_code.into(),
            details: PaymentDetails::default(),
        }
    }

    /// Applies the `complete` transition.
    ///
    /// Only a payment that is still being processed can complete; anything
    /// else is a [`StateTransitionError`].
    pub fn complete(&mut self) -> Result<(), StateTransitionError> {
        match self.state {
            PaymentState::New | PaymentState::Processing => {
                self.state = PaymentState::Completed;
                Ok(())
            }
            from => Err(StateTransitionError {
                from,
                to: PaymentState::Completed,
            }),
        }
    }
}
