use std::sync::Arc;

use async_trait::async_trait;
use error_stack::ResultExt;
use saferpay_client::{responses::CaptureBody, CustomResult, SaferpayClient};

use super::{record_gateway_error, Action, Request};
use crate::errors::ActionError;

/// Settles an authorized transaction and copies the outcome into the payment
/// details.
pub struct CaptureAction {
    client: Arc<dyn SaferpayClient>,
}

impl CaptureAction {
    pub fn new(client: Arc<dyn SaferpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Action for CaptureAction {
    fn supports(&self, request: &Request) -> bool {
        matches!(request, Request::Capture { .. })
    }

    async fn execute(&self, request: &mut Request) -> CustomResult<(), ActionError> {
        let Request::Capture { payment } = request else {
            return Err(ActionError::RequestNotSupported.into());
        };

        let response = self
            .client
            .capture(payment)
            .await
            .change_context(ActionError::Client)?;

        match &response.body {
            CaptureBody::Failure(error) => record_gateway_error(&mut payment.details, error),
            CaptureBody::Success(body) => {
                payment.details.status = Some(body.status.to_string());
                payment.details.capture_id = Some(body.capture_id.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use saferpay_client::{
        consts,
        responses::{CaptureResponse, CaptureSuccess, TransactionStatus},
    };
    use saferpay_domain::Payment;
    use time::macros::datetime;

    use super::{
        super::test_support::{gateway_error, response_header, StubClient},
        *,
    };

    fn captured_response(capture_id: &str) -> CaptureResponse {
        CaptureResponse {
            status_code: 200,
            body: CaptureBody::Success(CaptureSuccess {
                response_header: response_header(),
                capture_id: capture_id.to_string(),
                status: TransactionStatus::Captured,
                date: datetime!(2015-01-30 12:45:22.258 +01:00),
            }),
        }
    }

    async fn run_capture(response: CaptureResponse) -> Payment {
        let action = CaptureAction::new(Arc::new(StubClient::with_capture(response)));
        let mut payment = Payment::new(1, 10000, "CHF");
        payment.details.transaction_id = Some("T1".to_string());
        let mut request = Request::Capture { payment };
        action.execute(&mut request).await.unwrap();
        request.into_payment()
    }

    #[tokio::test]
    async fn a_successful_capture_stores_status_and_capture_id() {
        let payment = run_capture(captured_response("CAPTURE-1")).await;
        assert_eq!(payment.details.status.as_deref(), Some("CAPTURED"));
        assert_eq!(payment.details.capture_id.as_deref(), Some("CAPTURE-1"));
        assert_eq!(payment.details.transaction_id.as_deref(), Some("T1"));
    }

    #[tokio::test]
    async fn an_aborted_capture_cancels_the_payment() {
        let payment = run_capture(CaptureResponse {
            status_code: 402,
            body: CaptureBody::Failure(gateway_error(
                consts::ERROR_NAME_TRANSACTION_ABORTED,
                Some("T1"),
            )),
        })
        .await;
        assert_eq!(payment.details.status.as_deref(), Some("cancelled"));
        assert_eq!(payment.details.capture_id, None);
    }

    #[tokio::test]
    async fn any_other_capture_error_fails_the_payment() {
        let payment = run_capture(CaptureResponse {
            status_code: 500,
            body: CaptureBody::Failure(gateway_error("INTERNAL_ERROR", Some("T1"))),
        })
        .await;
        assert_eq!(payment.details.status.as_deref(), Some("failed"));
    }
}
