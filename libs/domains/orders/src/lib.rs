//! Orders Domain
//!
//! Read-side access to the order collection. Orders are written by an
//! external checkout flow; this crate only exposes the queries the rest
//! of the system needs (profile aggregation, reporting).

pub mod error;
pub mod models;
pub mod mongodb;
pub mod repository;

pub use error::{OrderError, OrderResult};
pub use models::{Order, OrderItem};
pub use mongodb::MongoOrderRepository;
pub use repository::{InMemoryOrderRepository, OrderRepository};
