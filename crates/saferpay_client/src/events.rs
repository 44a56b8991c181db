//! Passive audit records of gateway request/response pairs.
//!
//! Events carry no behavior; the client emits one per call and a dispatcher
//! hands them to whatever audit subscriber the host wires in.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::{json, Value};
use time::OffsetDateTime;
use url::Url;

/// Gateway call an event records.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, strum::Display)]
pub enum ApiOperation {
    Initialize,
    Assert,
    Capture,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, strum::Display)]
pub enum ApiOutcome {
    Succeeded,
    Failed,
}

/// Immutable record of one gateway call.
///
/// The request body is stored through `masking::masked_serialize`, so
/// credentials and cardholder data never reach the audit log in the clear.
#[derive(Clone, Debug, Serialize)]
pub struct TransactionLogEvent {
    pub operation: ApiOperation,
    pub outcome: ApiOutcome,
    pub request_url: String,
    pub request_body: Value,
    pub response_data: Value,
    pub status_code: u16,
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

impl TransactionLogEvent {
    /// Records a completed call; the outcome follows the HTTP status code.
    pub fn record<Req: Serialize>(
        operation: ApiOperation,
        status_code: u16,
        request_url: &Url,
        request_body: &Req,
        response_data: Value,
    ) -> Self {
        let request_body = masking::masked_serialize(request_body)
            .unwrap_or_else(|err| json!({ "error": err.to_string() }));
        Self {
            operation,
            outcome: if status_code == 200 {
                ApiOutcome::Succeeded
            } else {
                ApiOutcome::Failed
            },
            request_url: request_url.to_string(),
            request_body,
            response_data,
            status_code,
            occurred_at: OffsetDateTime::now_utc(),
        }
    }
}

/// Receives transaction-log events for auditing.
pub trait TransactionLogDispatcher: Send + Sync {
    fn dispatch(&self, event: TransactionLogEvent);
}

/// Dispatcher forwarding events to the tracing subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogDispatcher;

impl TransactionLogDispatcher for TracingLogDispatcher {
    fn dispatch(&self, event: TransactionLogEvent) {
        tracing::info!(
            operation = %event.operation,
            outcome = %event.outcome,
            status_code = event.status_code,
            request_url = %event.request_url,
            request_body = %event.request_body,
            response_data = %event.response_data,
            "saferpay transaction log",
        );
    }
}

/// Dispatcher collecting events for later inspection; test double.
#[derive(Debug, Default)]
pub struct CollectingLogDispatcher {
    events: Mutex<Vec<TransactionLogEvent>>,
}

impl CollectingLogDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TransactionLogEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TransactionLogDispatcher for CollectingLogDispatcher {
    fn dispatch(&self, event: TransactionLogEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::{AssertRequest, RequestHeader};

    #[test]
    fn records_mask_secret_request_fields() {
        let request = AssertRequest {
            request_header: RequestHeader {
                spec_version: "1.33".to_string(),
                customer_id: "123".to_string(),
                request_id: "b27de121-ffa0-4f1d-b7aa-b48109a88486".to_string(),
                retry_indicator: 0,
            },
            token: masking::Secret::new("234uhfh78234hlasdfh8234e1234".to_string()),
        };
        let url = Url::parse("https://test.saferpay.com/api/Payment/v1/PaymentPage/Assert")
            .unwrap();

        let event = TransactionLogEvent::record(
            ApiOperation::Assert,
            200,
            &url,
            &request,
            Value::Null,
        );

        assert_eq!(event.outcome, ApiOutcome::Succeeded);
        assert_eq!(event.request_body["RequestHeader"]["CustomerId"], "123");
        assert_ne!(
            event.request_body["Token"],
            Value::String("234uhfh78234hlasdfh8234e1234".to_string()),
        );
    }

    #[test]
    fn non_200_statuses_record_a_failure() {
        let url = Url::parse("https://test.saferpay.com/api/Payment/v1/Transaction/Capture")
            .unwrap();
        let event = TransactionLogEvent::record(
            ApiOperation::Capture,
            402,
            &url,
            &serde_json::json!({}),
            Value::Null,
        );
        assert_eq!(event.outcome, ApiOutcome::Failed);
        assert_eq!(event.status_code, 402);
    }
}
