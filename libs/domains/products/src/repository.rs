use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Product};

/// Repository trait for Product persistence
///
/// This trait defines the data access interface for catalog entries.
/// Implementations can use different storage backends (MongoDB, in-memory).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Create a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// List every product, unfiltered
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Count all products
    async fn count(&self) -> ProductResult<u64>;

    /// Bulk-insert products (used by the seed operation)
    async fn insert_many(&self, inputs: Vec<CreateProduct>) -> ProductResult<Vec<Product>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;
        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn count(&self) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(products.len() as u64)
    }

    async fn insert_many(&self, inputs: Vec<CreateProduct>) -> ProductResult<Vec<Product>> {
        let mut products = self.products.write().await;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let product = Product::new(input);
            products.insert(product.id, product.clone());
            created.push(product);
        }
        Ok(created)
    }
}
