//! Shared application state.

use mongodb::{Client, Database};

/// State shared by the API routers.
///
/// Cloning is cheap: the Mongo client is a pooled handle and the
/// database is a thin view over it.
#[derive(Clone)]
pub struct AppState {
    /// Environment-derived configuration
    pub config: crate::config::Config,
    /// MongoDB client, kept around so shutdown can close the pool
    pub mongo_client: Client,
    /// Handle to the shop database
    pub db: Database,
}
