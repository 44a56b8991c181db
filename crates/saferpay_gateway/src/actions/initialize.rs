use std::sync::Arc;

use async_trait::async_trait;
use error_stack::ResultExt;
use saferpay_client::{responses::InitializeBody, CustomResult, SaferpayClient};

use super::{record_gateway_error, Action, Request, STATUS_NEW};
use crate::errors::ActionError;

/// Opens a payment-page session and stores its token and redirect URL in the
/// payment details.
pub struct InitializeAction {
    client: Arc<dyn SaferpayClient>,
}

impl InitializeAction {
    pub fn new(client: Arc<dyn SaferpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Action for InitializeAction {
    fn supports(&self, request: &Request) -> bool {
        matches!(request, Request::Initialize { .. })
    }

    async fn execute(&self, request: &mut Request) -> CustomResult<(), ActionError> {
        let Request::Initialize {
            payment,
            order_id,
            return_urls,
        } = request
        else {
            return Err(ActionError::RequestNotSupported.into());
        };

        let response = self
            .client
            .initialize(payment, order_id, return_urls)
            .await
            .change_context(ActionError::Client)?;

        match &response.body {
            InitializeBody::Failure(error) => record_gateway_error(&mut payment.details, error),
            InitializeBody::Success(body) => {
                payment.details.token = Some(body.token.clone());
                payment.details.redirect_url = Some(body.redirect_url.to_string());
                payment.details.status = Some(STATUS_NEW.to_string());
            }
        }
        Ok(())
    }
}
