use axum_helpers::{create_permissive_cors_layer, create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    // Construct the client lazily: a dead store must not stop the
    // listener from starting. Requests that reach the store will fail
    // individually until it comes back.
    let mongo_client = database::mongodb::connect_lazy(&config.mongodb).await?;
    let db = mongo_client.database(config.mongodb.database());

    if database::mongodb::check_health(&mongo_client).await {
        info!(
            "Successfully connected to MongoDB database: {}",
            config.mongodb.database()
        );

        if let Err(e) = api::products::init_indexes(&db).await {
            warn!("Failed to initialize product indexes: {}", e);
        }
    } else {
        warn!("MongoDB is unreachable at startup; serving anyway");
    }

    // Initialize the application state
    let state = AppState {
        config,
        mongo_client,
        db,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;

    // Browser clients call this API directly from any origin
    let app = router.layer(create_permissive_cors_layer());

    info!("Starting shop API with production-ready shutdown (30s timeout)");

    // Production-ready server with graceful shutdown
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            // MongoDB client closes automatically on drop
            drop(state.mongo_client);
            info!("MongoDB connection closed successfully");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shop API shutdown complete");
    Ok(())
}
