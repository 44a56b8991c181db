//! Gateway-side orchestration for the Saferpay integration.
//!
//! Actions translate one payment lifecycle step each into a client call and
//! copy the outcome into the payment details; providers enforce order
//! preconditions before an action runs; flow handlers tie both together with
//! the state machine and persistence.

pub mod actions;
pub mod errors;
pub mod handlers;
pub mod provider;

pub use actions::{
    Action, AssertAction, CaptureAction, Gateway, InitializeAction, PaymentStatus, Request,
    StatusAction,
};
pub use errors::{ActionError, FlowError, ProviderError};
pub use handlers::{AssertPaymentHandler, CapturePaymentHandler};
pub use provider::{OrderProvider, PaymentProvider};
