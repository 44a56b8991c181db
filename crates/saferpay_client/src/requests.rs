//! Request bodies of the Saferpay JSON API, spec version 1.33.

use masking::Secret;
use serde::{Deserialize, Serialize};
use url::Url;

/// Header sent with every gateway request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestHeader {
    pub spec_version: String,
    pub customer_id: String,
    pub request_id: String,
    /// Always 0: retries are owned by the surrounding workflow, never by
    /// this client.
    pub retry_indicator: u8,
}

/// Monetary amount in minor units.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Amount {
    pub value: String,
    pub currency_code: String,
}

/// The `Payment` section of an initialize request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentDescription {
    pub amount: Amount,
    pub order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Where the payment page sends the shopper back to.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReturnUrls {
    pub success: Url,
    pub fail: Url,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abort: Option<Url>,
}

/// Body of `Payment/v1/PaymentPage/Initialize`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitializeRequest {
    pub request_header: RequestHeader,
    pub terminal_id: String,
    pub payment: PaymentDescription,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_methods: Option<Vec<String>>,
    pub return_urls: ReturnUrls,
}

/// Body of `Payment/v1/PaymentPage/Assert`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssertRequest {
    pub request_header: RequestHeader,
    pub token: Secret<String>,
}

/// Reference to a previously created transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TransactionReference {
    pub transaction_id: String,
}

/// Body of `Payment/v1/Transaction/Capture`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CaptureRequest {
    pub request_header: RequestHeader,
    pub transaction_reference: TransactionReference,
}
