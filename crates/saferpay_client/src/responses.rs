//! Response bodies of the Saferpay JSON API, parsed into typed value
//! objects.
//!
//! Every operation yields `{ status_code, body }` where the body is either
//! the operation's success payload or the shared error payload, decided by
//! the HTTP status code: 200 means success, anything else means error. A
//! body that does not match the shape its status code implies fails to
//! parse and surfaces as [`ClientError::ResponseDeserializationFailed`].

use std::fmt;

use error_stack::ResultExt;
use masking::Secret;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use time::OffsetDateTime;
use url::Url;

use crate::{
    errors::{ClientError, CustomResult},
    requests::Amount,
};

/// Header returned with every gateway response.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResponseHeader {
    pub spec_version: String,
    pub request_id: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Payment,
    Refund,
}

/// State of a transaction or capture as the gateway reports it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Authorized,
    Canceled,
    Captured,
    Pending,
}

impl TransactionStatus {
    /// The wire value, verbatim.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Authorized => "AUTHORIZED",
            Self::Canceled => "CANCELED",
            Self::Captured => "CAPTURED",
            Self::Pending => "PENDING",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The settled or authorized transaction inside a successful assert.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    #[serde(rename = "Type")]
    pub transaction_type: TransactionType,
    pub status: TransactionStatus,
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub amount: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquirer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acquirer_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub six_transaction_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_code: Option<String>,
}

/// Brand of the payment means the shopper picked.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Brand {
    pub payment_method: String,
    pub name: String,
}

/// Card details attached to the payment means; numbers arrive pre-masked by
/// the gateway, cardholder data is still kept behind [`Secret`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Card {
    pub masked_number: Secret<String>,
    pub exp_year: u16,
    pub exp_month: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_name: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PaymentMeans {
    pub brand: Brand,
    pub display_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
}

/// 3-D Secure authentication outcome.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThreeDs {
    pub authenticated: bool,
    pub liability_shift: bool,
    pub xid: String,
}

/// Which party bears fraud liability for the transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Liability {
    pub liability_shift: bool,
    pub liable_entity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_ds: Option<ThreeDs>,
}

/// Error payload the gateway returns on a non-200 status.
///
/// `error_name` and `behavior` are copied verbatim; the known values are
/// named in [`crate::consts`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SaferpayError {
    pub response_header: ResponseHeader,
    pub behavior: String,
    pub error_name: String,
    pub error_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payer_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
}

fn parse_struct<T: DeserializeOwned>(
    bytes: &[u8],
    type_name: &'static str,
) -> CustomResult<T, ClientError> {
    serde_json::from_slice(bytes)
        .change_context(ClientError::ResponseDeserializationFailed)
        .attach_printable_lazy(|| format!("unable to parse {type_name} from gateway response"))
}

/// Success payload of `Payment/v1/PaymentPage/Initialize`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InitializeSuccess {
    pub response_header: ResponseHeader,
    pub token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expiration: OffsetDateTime,
    pub redirect_url: Url,
}

#[derive(Clone, Debug, PartialEq)]
pub enum InitializeBody {
    Success(InitializeSuccess),
    Failure(SaferpayError),
}

/// Outcome of a PaymentPage Initialize call.
#[derive(Clone, Debug, PartialEq)]
pub struct InitializeResponse {
    pub status_code: u16,
    pub body: InitializeBody,
}

impl InitializeResponse {
    pub fn from_parts(status_code: u16, body: &[u8]) -> CustomResult<Self, ClientError> {
        let body = if status_code == 200 {
            InitializeBody::Success(parse_struct(body, "InitializeSuccess")?)
        } else {
            InitializeBody::Failure(parse_struct(body, "SaferpayError")?)
        };
        Ok(Self { status_code, body })
    }

    pub fn success(&self) -> Option<&InitializeSuccess> {
        match &self.body {
            InitializeBody::Success(body) => Some(body),
            InitializeBody::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SaferpayError> {
        match &self.body {
            InitializeBody::Success(_) => None,
            InitializeBody::Failure(error) => Some(error),
        }
    }
}

/// Success payload of `Payment/v1/PaymentPage/Assert`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AssertSuccess {
    pub response_header: ResponseHeader,
    pub transaction: Transaction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_means: Option<PaymentMeans>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liability: Option<Liability>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AssertBody {
    Success(AssertSuccess),
    Failure(SaferpayError),
}

/// Outcome of a PaymentPage Assert call.
///
/// Exactly one of [`Self::transaction`] and [`Self::error`] is present,
/// decided by the status code.
#[derive(Clone, Debug, PartialEq)]
pub struct AssertResponse {
    pub status_code: u16,
    pub body: AssertBody,
}

impl AssertResponse {
    pub fn from_parts(status_code: u16, body: &[u8]) -> CustomResult<Self, ClientError> {
        let body = if status_code == 200 {
            AssertBody::Success(parse_struct(body, "AssertSuccess")?)
        } else {
            AssertBody::Failure(parse_struct(body, "SaferpayError")?)
        };
        Ok(Self { status_code, body })
    }

    pub fn response_header(&self) -> &ResponseHeader {
        match &self.body {
            AssertBody::Success(body) => &body.response_header,
            AssertBody::Failure(error) => &error.response_header,
        }
    }

    pub fn transaction(&self) -> Option<&Transaction> {
        match &self.body {
            AssertBody::Success(body) => Some(&body.transaction),
            AssertBody::Failure(_) => None,
        }
    }

    pub fn payment_means(&self) -> Option<&PaymentMeans> {
        match &self.body {
            AssertBody::Success(body) => body.payment_means.as_ref(),
            AssertBody::Failure(_) => None,
        }
    }

    pub fn liability(&self) -> Option<&Liability> {
        match &self.body {
            AssertBody::Success(body) => body.liability.as_ref(),
            AssertBody::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SaferpayError> {
        match &self.body {
            AssertBody::Success(_) => None,
            AssertBody::Failure(error) => Some(error),
        }
    }
}

/// Success payload of `Payment/v1/Transaction/Capture`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CaptureSuccess {
    pub response_header: ResponseHeader,
    pub capture_id: String,
    pub status: TransactionStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CaptureBody {
    Success(CaptureSuccess),
    Failure(SaferpayError),
}

/// Outcome of a Transaction Capture call.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptureResponse {
    pub status_code: u16,
    pub body: CaptureBody,
}

impl CaptureResponse {
    pub fn from_parts(status_code: u16, body: &[u8]) -> CustomResult<Self, ClientError> {
        let body = if status_code == 200 {
            CaptureBody::Success(parse_struct(body, "CaptureSuccess")?)
        } else {
            CaptureBody::Failure(parse_struct(body, "SaferpayError")?)
        };
        Ok(Self { status_code, body })
    }

    pub fn success(&self) -> Option<&CaptureSuccess> {
        match &self.body {
            CaptureBody::Success(body) => Some(body),
            CaptureBody::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&SaferpayError> {
        match &self.body {
            CaptureBody::Success(_) => None,
            CaptureBody::Failure(error) => Some(error),
        }
    }
}
