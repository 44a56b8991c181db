//! Payment lifecycle actions and their dispatcher.
//!
//! Each action handles exactly one request kind; the [`Gateway`] hands a
//! request to the first action that supports it. Unsupported requests are
//! rejected immediately with [`ActionError::RequestNotSupported`].

mod assert;
mod capture;
mod initialize;
mod status;

use std::sync::Arc;

use async_trait::async_trait;
use saferpay_client::{
    consts, requests::ReturnUrls, responses::SaferpayError, CustomResult, SaferpayClient,
};
use saferpay_domain::{Payment, PaymentDetails};

pub use self::{
    assert::AssertAction,
    capture::CaptureAction,
    initialize::InitializeAction,
    status::{PaymentStatus, StatusAction, STATUS_CANCELLED, STATUS_FAILED, STATUS_NEW},
};
use crate::errors::ActionError;

/// Dispatch-level request handed to the gateway.
///
/// Every variant wraps the payment model the executing action mutates.
#[derive(Debug)]
pub enum Request {
    Initialize {
        payment: Payment,
        order_id: String,
        return_urls: ReturnUrls,
    },
    Assert {
        payment: Payment,
    },
    Capture {
        payment: Payment,
    },
    GetStatus {
        payment: Payment,
        status: PaymentStatus,
    },
}

impl Request {
    pub fn payment(&self) -> &Payment {
        match self {
            Self::Initialize { payment, .. }
            | Self::Assert { payment }
            | Self::Capture { payment }
            | Self::GetStatus { payment, .. } => payment,
        }
    }

    pub fn into_payment(self) -> Payment {
        match self {
            Self::Initialize { payment, .. }
            | Self::Assert { payment }
            | Self::Capture { payment }
            | Self::GetStatus { payment, .. } => payment,
        }
    }
}

/// One payment lifecycle step.
#[async_trait]
pub trait Action: Send + Sync {
    /// Whether this action can handle the request.
    fn supports(&self, request: &Request) -> bool;

    /// Executes the request, mutating the wrapped payment.
    async fn execute(&self, request: &mut Request) -> CustomResult<(), ActionError>;
}

/// Action dispatcher: the first supporting action executes the request.
pub struct Gateway {
    actions: Vec<Box<dyn Action>>,
}

impl Gateway {
    pub fn new(actions: Vec<Box<dyn Action>>) -> Self {
        Self { actions }
    }

    /// Gateway with the full Saferpay action set registered.
    pub fn saferpay(client: Arc<dyn SaferpayClient>) -> Self {
        Self::new(vec![
            Box::new(InitializeAction::new(client.clone())),
            Box::new(AssertAction::new(client.clone())),
            Box::new(CaptureAction::new(client)),
            Box::new(StatusAction),
        ])
    }

    pub async fn execute(&self, request: &mut Request) -> CustomResult<(), ActionError> {
        for action in &self.actions {
            if action.supports(request) {
                return action.execute(request).await;
            }
        }
        Err(ActionError::RequestNotSupported.into())
    }
}

/// Records a gateway error payload into the payment details.
///
/// The transaction id is always copied; an aborted transaction cancels the
/// payment, every other error fails it.
fn record_gateway_error(details: &mut PaymentDetails, error: &SaferpayError) {
    details.transaction_id = error.transaction_id.clone();
    let status = if error.error_name == consts::ERROR_NAME_TRANSACTION_ABORTED {
        STATUS_CANCELLED
    } else {
        STATUS_FAILED
    };
    details.status = Some(status.to_string());
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::{test_support::StubClient, *};
    use crate::errors::ActionError;

    #[tokio::test]
    async fn an_empty_gateway_supports_nothing() {
        let gateway = Gateway::new(vec![]);
        let mut request = Request::Assert {
            payment: Payment::new(1, 10000, "CHF"),
        };

        let report = gateway.execute(&mut request).await.unwrap_err();
        assert_eq!(report.current_context(), &ActionError::RequestNotSupported);
    }

    #[tokio::test]
    async fn the_saferpay_gateway_dispatches_status_requests() {
        let gateway = Gateway::saferpay(Arc::new(StubClient::default()));
        let mut payment = Payment::new(1, 10000, "CHF");
        payment.details.status = Some("AUTHORIZED".to_string());
        let mut request = Request::GetStatus {
            payment,
            status: PaymentStatus::Unknown,
        };

        gateway.execute(&mut request).await.unwrap();
        assert_eq!(request.payment().details.status.as_deref(), Some("AUTHORIZED"));
        let Request::GetStatus { status, .. } = request else {
            unreachable!()
        };
        assert_eq!(status, PaymentStatus::Authorized);
    }
}
