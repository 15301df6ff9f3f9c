//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product};
use crate::repository::ProductRepository;

/// Result of a seed request.
#[derive(Debug)]
pub enum SeedOutcome {
    /// The catalog was empty; the baseline products were inserted.
    Seeded(Vec<Product>),
    /// At least one product already existed; nothing was written.
    AlreadySeeded,
}

/// Product service providing business logic operations
///
/// The service layer handles validation, business rules, and orchestrates
/// repository operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List all products, unfiltered
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Populate the catalog with the baseline product set.
    ///
    /// The guard is a count check followed by a bulk insert, two separate
    /// round-trips: concurrent seed calls can both pass the check and
    /// double-seed the catalog. Callers that care should serialize seeding.
    #[instrument(skip(self))]
    pub async fn seed_products(&self) -> ProductResult<SeedOutcome> {
        let existing = self.repository.count().await?;
        if existing > 0 {
            tracing::info!(existing, "Seed skipped, catalog already populated");
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let products = self.repository.insert_many(seed_catalog()).await?;
        tracing::info!(count = products.len(), "Catalog seeded");
        Ok(SeedOutcome::Seeded(products))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

/// The fixed baseline catalog inserted by the seed operation.
pub fn seed_catalog() -> Vec<CreateProduct> {
    vec![
        CreateProduct {
            name: "Minimalist Watch".to_string(),
            price: 299.0,
            image: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500&h=500&fit=crop".to_string(),
            description: "Elegant timepiece with a clean, minimal design. Perfect for everyday wear.".to_string(),
            category: "Accessories".to_string(),
        },
        CreateProduct {
            name: "Wireless Headphones".to_string(),
            price: 199.0,
            image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500&h=500&fit=crop".to_string(),
            description: "Premium sound quality with noise cancellation. Sleek and comfortable design.".to_string(),
            category: "Electronics".to_string(),
        },
        CreateProduct {
            name: "Modern Backpack".to_string(),
            price: 129.0,
            image: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=500&h=500&fit=crop".to_string(),
            description: "Stylish and functional backpack for the modern professional.".to_string(),
            category: "Fashion".to_string(),
        },
        CreateProduct {
            name: "Desk Lamp".to_string(),
            price: 89.0,
            image: "https://images.unsplash.com/photo-1507473885765-e6ed057f782c?w=500&h=500&fit=crop".to_string(),
            description: "Contemporary design with adjustable brightness and warm light.".to_string(),
            category: "Home".to_string(),
        },
        CreateProduct {
            name: "Water Bottle".to_string(),
            price: 39.0,
            image: "https://images.unsplash.com/photo-1602143407151-7111542de6e8?w=500&h=500&fit=crop".to_string(),
            description: "Eco-friendly stainless steel bottle with elegant matte finish.".to_string(),
            category: "Lifestyle".to_string(),
        },
        CreateProduct {
            name: "Sunglasses".to_string(),
            price: 149.0,
            image: "https://images.unsplash.com/photo-1511499767150-a48a237f0083?w=500&h=500&fit=crop".to_string(),
            description: "Classic aviator style with UV protection and lightweight frame.".to_string(),
            category: "Accessories".to_string(),
        },
        CreateProduct {
            name: "Laptop Stand".to_string(),
            price: 79.0,
            image: "https://images.unsplash.com/photo-1527864550417-7fd91fc51a46?w=500&h=500&fit=crop".to_string(),
            description: "Ergonomic aluminum stand that elevates your workspace.".to_string(),
            category: "Home".to_string(),
        },
        CreateProduct {
            name: "Smart Speaker".to_string(),
            price: 249.0,
            image: "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=500&h=500&fit=crop".to_string(),
            description: "High-fidelity audio with voice assistant integration.".to_string(),
            category: "Electronics".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;

    fn sample_input(name: &str) -> CreateProduct {
        CreateProduct {
            name: name.to_string(),
            price: 10.0,
            image: "https://example.com/img.jpg".to_string(),
            description: "A product".to_string(),
            category: "General".to_string(),
        }
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let repo = MockProductRepository::new();
        let service = ProductService::new(repo);

        let result = service.create_product(sample_input("")).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn get_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        let service = ProductService::new(repo);

        let result = service.get_product(Uuid::now_v7()).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn seed_on_empty_catalog_inserts_baseline() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().returning(|| Ok(0));
        repo.expect_insert_many()
            .withf(|inputs| inputs.len() == 8)
            .returning(|inputs| Ok(inputs.into_iter().map(Product::new).collect()));
        let service = ProductService::new(repo);

        match service.seed_products().await.unwrap() {
            SeedOutcome::Seeded(products) => {
                assert_eq!(products.len(), 8);
                let watch = products
                    .iter()
                    .find(|p| p.name == "Minimalist Watch")
                    .unwrap();
                assert_eq!(watch.price, 299.0);
                assert_eq!(watch.category, "Accessories");
            }
            SeedOutcome::AlreadySeeded => panic!("expected a fresh seed"),
        }
    }

    #[tokio::test]
    async fn seed_on_populated_catalog_is_a_noop() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().returning(|| Ok(3));
        repo.expect_insert_many().never();
        let service = ProductService::new(repo);

        let outcome = service.seed_products().await.unwrap();
        assert!(matches!(outcome, SeedOutcome::AlreadySeeded));
    }

    #[tokio::test]
    async fn store_failures_surface_as_database_errors() {
        let mut repo = MockProductRepository::new();
        repo.expect_list()
            .returning(|| Err(ProductError::Database("connection reset".to_string())));
        let service = ProductService::new(repo);

        let result = service.list_products().await;
        assert!(matches!(result, Err(ProductError::Database(_))));
    }
}
