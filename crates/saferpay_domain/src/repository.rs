use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use crate::order::{Order, OrderCheckoutState};

/// Failure while writing entities back to storage.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("failed to persist order {number}")]
    FlushFailed { number: String },
}

/// Read access to orders, keyed by checkout token.
///
/// `find_one_by_token_value` only sees open checkouts; `find_one_by_token`
/// sees every order regardless of state. Callers that need to distinguish
/// "completed" from "gone" perform both lookups in sequence.
pub trait OrderRepository: Send + Sync {
    fn find_one_by_token_value(&self, token: &str) -> Option<Order>;

    fn find_one_by_token(&self, token: &str) -> Option<Order>;
}

/// Persistence barrier the flow handlers call once a payment was processed.
pub trait ObjectManager: Send + Sync {
    fn flush(&self, order: &Order) -> Result<(), PersistenceError>;
}

type SharedOrders = Arc<RwLock<HashMap<String, Order>>>;

/// In-memory [`OrderRepository`] used as a test fixture.
#[derive(Clone, Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: SharedOrders,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, order: Order) {
        self.orders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(order.token_value.clone(), order);
    }

    /// An [`ObjectManager`] flushing into the same storage.
    pub fn object_manager(&self) -> InMemoryObjectManager {
        InMemoryObjectManager {
            orders: Arc::clone(&self.orders),
        }
    }
}

impl OrderRepository for InMemoryOrderRepository {
    fn find_one_by_token_value(&self, token: &str) -> Option<Order> {
        self.find_one_by_token(token)
            .filter(|order| order.checkout_state != OrderCheckoutState::Completed)
    }

    fn find_one_by_token(&self, token: &str) -> Option<Order> {
        self.orders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
    }
}

/// In-memory [`ObjectManager`] sharing storage with its repository.
#[derive(Clone, Debug)]
pub struct InMemoryObjectManager {
    orders: SharedOrders,
}

impl ObjectManager for InMemoryObjectManager {
    fn flush(&self, order: &Order) -> Result<(), PersistenceError> {
        self.orders
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(order.token_value.clone(), order.clone());
        Ok(())
    }
}
