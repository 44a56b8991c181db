//! Commerce-side domain stand-ins for the Saferpay gateway integration.
//!
//! The real order/payment entities, their persistence and the checkout state
//! machine are owned by the surrounding platform; these types model exactly
//! the surface the gateway crates consume, behind constructor-injected
//! traits.

pub mod order;
pub mod payment;
pub mod repository;

pub use order::{Order, OrderCheckoutState};
pub use payment::{Payment, PaymentDetails, PaymentState, StateTransitionError};
pub use repository::{
    InMemoryObjectManager, InMemoryOrderRepository, ObjectManager, OrderRepository,
    PersistenceError,
};
