//! Database library providing the MongoDB connector and utilities
//!
//! This library owns connection construction, retry policy, and health
//! checks, so that application code receives an explicitly constructed
//! client handle instead of reaching for ambient process-wide state.
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb;
//!
//! let client = mongodb::connect("mongodb://localhost:27017").await?;
//! let db = client.database("ecommerce_db");
//! let collection = db.collection::<Document>("products");
//! ```

pub mod common;
pub mod mongodb;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult};
