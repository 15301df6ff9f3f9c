use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::Order;

/// Repository trait for read-only Order access
///
/// Order writes belong to the external checkout flow; consumers in this
/// codebase only ever query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Fetch every order in the collection
    async fn find_all(&self) -> OrderResult<Vec<Order>>;

    /// Fetch orders recorded against a specific user
    async fn find_by_user(&self, user_id: Uuid) -> OrderResult<Vec<Order>>;
}

/// In-memory implementation of OrderRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryOrderRepository {
    orders: Arc<RwLock<Vec<Order>>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Seed an order directly, standing in for the external checkout writer.
    pub async fn insert(&self, order: Order) {
        self.orders.write().await.push(order);
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_all(&self) -> OrderResult<Vec<Order>> {
        Ok(self.orders.read().await.clone())
    }

    async fn find_by_user(&self, user_id: Uuid) -> OrderResult<Vec<Order>> {
        let orders = self.orders.read().await;
        Ok(orders
            .iter()
            .filter(|o| o.user_id == Some(user_id))
            .cloned()
            .collect())
    }
}
