use std::sync::Arc;

use async_trait::async_trait;
use error_stack::ResultExt;
use saferpay_client::{responses::AssertBody, CustomResult, SaferpayClient};

use super::{record_gateway_error, Action, Request};
use crate::errors::ActionError;

/// Confirms a previously initialized transaction and copies the outcome into
/// the payment details.
pub struct AssertAction {
    client: Arc<dyn SaferpayClient>,
}

impl AssertAction {
    pub fn new(client: Arc<dyn SaferpayClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Action for AssertAction {
    fn supports(&self, request: &Request) -> bool {
        matches!(request, Request::Assert { .. })
    }

    async fn execute(&self, request: &mut Request) -> CustomResult<(), ActionError> {
        let Request::Assert { payment } = request else {
            return Err(ActionError::RequestNotSupported.into());
        };

        let response = self
            .client
            .assert(payment)
            .await
            .change_context(ActionError::Client)?;

        match &response.body {
            AssertBody::Failure(error) => record_gateway_error(&mut payment.details, error),
            AssertBody::Success(body) => {
                payment.details.status = Some(body.transaction.status.to_string());
                payment.details.transaction_id = Some(body.transaction.id.clone());
            }
        }
        Ok(())
    }
}
