//! Product catalog routes

use axum::Router;
use domain_products::{MongoProductRepository, ProductService};
use mongodb::Database;

use crate::state::AppState;

/// Create the products router backed by MongoDB
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);
    let service = ProductService::new(repository);
    domain_products::handlers::router(service)
}

/// Initialize product collection indexes
pub async fn init_indexes(db: &Database) -> Result<(), domain_products::ProductError> {
    MongoProductRepository::new(db).init_indexes().await
}
