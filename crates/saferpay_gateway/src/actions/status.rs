use async_trait::async_trait;
use saferpay_client::{responses::TransactionStatus, CustomResult};
use saferpay_domain::PaymentDetails;

use super::{Action, Request};
use crate::errors::ActionError;

/// Plugin-assigned detail statuses; gateway transaction statuses are stored
/// verbatim next to these.
pub const STATUS_NEW: &str = "new";
pub const STATUS_CANCELLED: &str = "cancelled";
pub const STATUS_FAILED: &str = "failed";

/// Status the checkout workflow derives from the payment details.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum PaymentStatus {
    New,
    Authorized,
    Captured,
    Cancelled,
    Failed,
    #[default]
    Unknown,
}

/// Derives the payment status from the details map; no gateway call.
pub struct StatusAction;

impl StatusAction {
    fn resolve(details: &PaymentDetails) -> PaymentStatus {
        let Some(status) = details.status.as_deref() else {
            return PaymentStatus::New;
        };
        match status {
            STATUS_NEW => PaymentStatus::New,
            STATUS_CANCELLED => PaymentStatus::Cancelled,
            STATUS_FAILED => PaymentStatus::Failed,
            s if s == TransactionStatus::Authorized.as_str() => PaymentStatus::Authorized,
            s if s == TransactionStatus::Captured.as_str() => PaymentStatus::Captured,
            _ => PaymentStatus::Unknown,
        }
    }
}

#[async_trait]
impl Action for StatusAction {
    fn supports(&self, request: &Request) -> bool {
        matches!(request, Request::GetStatus { .. })
    }

    async fn execute(&self, request: &mut Request) -> CustomResult<(), ActionError> {
        let Request::GetStatus { payment, status } = request else {
            return Err(ActionError::RequestNotSupported.into());
        };
        *status = Self::resolve(&payment.details);
        Ok(())
    }
}
