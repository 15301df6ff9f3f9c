//! MongoDB implementation of OrderRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, to_bson, Bson},
    Collection, Database,
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::OrderResult;
use crate::models::Order;
use crate::repository::OrderRepository;

/// MongoDB implementation of the OrderRepository
pub struct MongoOrderRepository {
    collection: Collection<Order>,
}

impl MongoOrderRepository {
    /// Create a new MongoOrderRepository
    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Order>("orders");
        Self { collection }
    }
}

#[async_trait]
impl OrderRepository for MongoOrderRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> OrderResult<Vec<Order>> {
        use futures_util::TryStreamExt;

        let cursor = self.collection.find(doc! {}).await?;
        let orders: Vec<Order> = cursor.try_collect().await?;
        Ok(orders)
    }

    #[instrument(skip(self))]
    async fn find_by_user(&self, user_id: Uuid) -> OrderResult<Vec<Order>> {
        use futures_util::TryStreamExt;

        let filter = doc! { "user_id": to_bson(&user_id).unwrap_or(Bson::Null) };
        let cursor = self.collection.find(filter).await?;
        let orders: Vec<Order> = cursor.try_collect().await?;
        Ok(orders)
    }
}
