//! Users Domain
//!
//! Account signup/login with stateless session tokens, profile reads and
//! updates, and the profile aggregation over the order collection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints + auth middleware
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, password hashing, aggregation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use axum_helpers::{JwtAuth, JwtConfig};
//! use domain_orders::MongoOrderRepository;
//! use domain_products::MongoProductRepository;
//! use domain_users::{
//!     handlers::{self, AuthState},
//!     mongodb::MongoUserRepository,
//!     service::{ProfileService, UserService},
//! };
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("mydb");
//!
//! let service = UserService::new(MongoUserRepository::new(&db));
//! let profile = ProfileService::new(
//!     MongoOrderRepository::new(&db),
//!     MongoProductRepository::new(&db),
//!     false,
//! );
//! let jwt = JwtAuth::new(&JwtConfig::new("a-secret-of-at-least-32-characters!!"));
//!
//! let router = handlers::router(AuthState { service, profile, jwt });
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, AuthState};
pub use middleware::CurrentUser;
pub use models::{
    AuthResponse, LoginRequest, ProfileResponse, PurchasedProduct, SignupRequest, UpdateProfile,
    UpdateProfilePicture, User, UserEnvelope, UserResponse,
};
pub use mongodb::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{ProfileService, UserService};
