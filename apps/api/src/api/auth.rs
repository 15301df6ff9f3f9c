//! Account and profile routes

use axum::Router;
use axum_helpers::JwtAuth;
use domain_orders::MongoOrderRepository;
use domain_products::MongoProductRepository;
use domain_users::{
    handlers::AuthState, mongodb::MongoUserRepository, ProfileService, UserService,
};

use crate::state::AppState;

/// Create the auth router backed by MongoDB
pub fn router(state: &AppState) -> Router {
    let service = UserService::new(MongoUserRepository::new(&state.db));
    let profile = ProfileService::new(
        MongoOrderRepository::new(&state.db),
        MongoProductRepository::new(&state.db),
        state.config.profile_scope_user_orders,
    );
    let jwt = JwtAuth::new(&state.config.jwt);

    domain_users::handlers::router(AuthState {
        service,
        profile,
        jwt,
    })
}
