use std::sync::Arc;

use async_trait::async_trait;
use error_stack::ResultExt;
use masking::{PeekInterface, Secret};
use saferpay_domain::Payment;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    config::SaferpayConfig,
    consts,
    errors::{ClientError, CustomResult},
    events::{ApiOperation, TracingLogDispatcher, TransactionLogDispatcher, TransactionLogEvent},
    requests::{
        Amount, AssertRequest, CaptureRequest, InitializeRequest, PaymentDescription,
        RequestHeader, ReturnUrls, TransactionReference,
    },
    responses::{AssertResponse, CaptureResponse, InitializeResponse},
};

/// Gateway operations the checkout integration calls.
///
/// Each operation is a single synchronous POST; the response is parsed into
/// its value object regardless of the HTTP status code, which becomes part
/// of the returned object.
#[async_trait]
pub trait SaferpayClient: Send + Sync {
    /// Opens a payment-page session for the payment.
    async fn initialize(
        &self,
        payment: &Payment,
        order_id: &str,
        return_urls: &ReturnUrls,
    ) -> CustomResult<InitializeResponse, ClientError>;

    /// Confirms the state of a previously initialized transaction.
    ///
    /// The payment must carry the token stored on initialize.
    async fn assert(&self, payment: &Payment) -> CustomResult<AssertResponse, ClientError>;

    /// Settles an authorized transaction.
    ///
    /// The payment must carry the transaction id stored on assert.
    async fn capture(&self, payment: &Payment) -> CustomResult<CaptureResponse, ClientError>;
}

/// `reqwest`-backed [`SaferpayClient`].
pub struct SaferpayHttpClient {
    config: SaferpayConfig,
    http: reqwest::Client,
    log_dispatcher: Arc<dyn TransactionLogDispatcher>,
}

impl SaferpayHttpClient {
    pub fn new(config: SaferpayConfig) -> Self {
        Self::with_dispatcher(config, Arc::new(TracingLogDispatcher))
    }

    pub fn with_dispatcher(
        config: SaferpayConfig,
        log_dispatcher: Arc<dyn TransactionLogDispatcher>,
    ) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            log_dispatcher,
        }
    }

    fn request_header(&self) -> RequestHeader {
        RequestHeader {
            spec_version: consts::SPEC_VERSION.to_string(),
            customer_id: self.config.customer_id.clone(),
            request_id: Uuid::new_v4().to_string(),
            retry_indicator: 0,
        }
    }

    async fn post<Req: Serialize>(
        &self,
        operation: ApiOperation,
        path: &str,
        body: &Req,
    ) -> CustomResult<(u16, bytes::Bytes), ClientError> {
        let url = self.config.endpoint(path)?;
        let response = self
            .http
            .post(url.clone())
            .basic_auth(
                self.config.username.peek(),
                Some(self.config.password.peek()),
            )
            .json(body)
            .send()
            .await
            .change_context(ClientError::RequestFailed)?;

        let status_code = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .change_context(ClientError::RequestFailed)?;

        let response_data =
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        self.log_dispatcher.dispatch(TransactionLogEvent::record(
            operation,
            status_code,
            &url,
            body,
            response_data,
        ));

        Ok((status_code, bytes))
    }
}

#[async_trait]
impl SaferpayClient for SaferpayHttpClient {
    async fn initialize(
        &self,
        payment: &Payment,
        order_id: &str,
        return_urls: &ReturnUrls,
    ) -> CustomResult<InitializeResponse, ClientError> {
        let request = InitializeRequest {
            request_header: self.request_header(),
            terminal_id: self.config.terminal_id.clone(),
            payment: PaymentDescription {
                amount: Amount {
                    value: payment.amount.to_string(),
                    currency_code: payment.currency_code.clone(),
                },
                order_id: order_id.to_string(),
                description: Some(format!("Payment for order {order_id}")),
            },
            payment_methods: (!self.config.allowed_payment_methods.is_empty())
                .then(|| self.config.allowed_payment_methods.clone()),
            return_urls: return_urls.clone(),
        };

        let (status_code, body) = self
            .post(
                ApiOperation::Initialize,
                consts::PAYMENT_PAGE_INITIALIZE,
                &request,
            )
            .await?;
        let response = InitializeResponse::from_parts(status_code, &body)?;
        tracing::info!(gateway_response = ?response, "saferpay initialize");
        Ok(response)
    }

    async fn assert(&self, payment: &Payment) -> CustomResult<AssertResponse, ClientError> {
        let token = payment
            .details
            .token
            .clone()
            .ok_or(ClientError::MissingRequiredField {
                field_name: "token",
            })?;
        let request = AssertRequest {
            request_header: self.request_header(),
            token: Secret::new(token),
        };

        let (status_code, body) = self
            .post(ApiOperation::Assert, consts::PAYMENT_PAGE_ASSERT, &request)
            .await?;
        let response = AssertResponse::from_parts(status_code, &body)?;
        tracing::info!(gateway_response = ?response, "saferpay assert");
        Ok(response)
    }

    async fn capture(&self, payment: &Payment) -> CustomResult<CaptureResponse, ClientError> {
        let transaction_id =
            payment
                .details
                .transaction_id
                .clone()
                .ok_or(ClientError::MissingRequiredField {
                    field_name: "transaction_id",
                })?;
        let request = CaptureRequest {
            request_header: self.request_header(),
            transaction_reference: TransactionReference { transaction_id },
        };

        let (status_code, body) = self
            .post(
                ApiOperation::Capture,
                consts::TRANSACTION_CAPTURE,
                &request,
            )
            .await?;
        let response = CaptureResponse::from_parts(status_code, &body)?;
        tracing::info!(gateway_response = ?response, "saferpay capture");
        Ok(response)
    }
}
