//! Saferpay JSON API constants.

/// Version of the Payment API spec this integration targets.
pub const SPEC_VERSION: &str = "1.33";

/// Production API base.
pub const PRODUCTION_BASE_URL: &str = "https://www.saferpay.com/api/";

/// Sandbox API base.
pub const SANDBOX_BASE_URL: &str = "https://test.saferpay.com/api/";

/// PaymentPage Initialize endpoint, relative to the API base.
pub const PAYMENT_PAGE_INITIALIZE: &str = "Payment/v1/PaymentPage/Initialize";

/// PaymentPage Assert endpoint, relative to the API base.
pub const PAYMENT_PAGE_ASSERT: &str = "Payment/v1/PaymentPage/Assert";

/// Transaction Capture endpoint, relative to the API base.
pub const TRANSACTION_CAPTURE: &str = "Payment/v1/Transaction/Capture";

/// Error name reported when the payer aborted the transaction.
pub const ERROR_NAME_TRANSACTION_ABORTED: &str = "TRANSACTION_ABORTED";

/// Error name reported when 3-D Secure authentication failed.
pub const ERROR_NAME_THREEDS_AUTHENTICATION_FAILED: &str = "3DS_AUTHENTICATION_FAILED";

/// Behavior hint telling the caller not to repeat the request.
pub const BEHAVIOR_DO_NOT_RETRY: &str = "DO_NOT_RETRY";

/// Behavior hint telling the caller to abandon the payment.
pub const BEHAVIOR_ABORT: &str = "ABORT";
