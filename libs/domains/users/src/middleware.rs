//! Bearer-token authentication middleware
//!
//! Verifies the session token, resolves the account from the store, and
//! threads the result into handlers as an explicit [`CurrentUser`]
//! extension. Missing, invalid, and expired tokens all reject with 401.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_helpers::{bearer_token, AppError};
use uuid::Uuid;

use domain_orders::OrderRepository;
use domain_products::ProductRepository;

use crate::error::UserError;
use crate::handlers::AuthState;
use crate::models::User;
use crate::repository::UserRepository;

/// The authenticated account, resolved from the session token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

pub async fn authenticate<R, O, P>(
    State(state): State<AuthState<R, O, P>>,
    mut request: Request,
    next: Next,
) -> Response
where
    R: UserRepository,
    O: OrderRepository,
    P: ProductRepository,
{
    let Some(token) = bearer_token(request.headers()) else {
        return AppError::Unauthorized("Authentication required".to_string()).into_response();
    };

    let claims = match state.jwt.verify_token(&token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Session token rejected");
            return AppError::Unauthorized("Invalid or expired token".to_string()).into_response();
        }
    };

    let user_id = match Uuid::parse_str(&claims.sub) {
        Ok(id) => id,
        Err(_) => {
            return AppError::Unauthorized("Invalid or expired token".to_string()).into_response();
        }
    };

    // The token may outlive the account; resolve against the store.
    // Only a vanished account is an auth failure; store errors keep
    // their 500 mapping.
    let user = match state.service.get_user(user_id).await {
        Ok(user) => user,
        Err(UserError::NotFound(_)) => {
            return AppError::Unauthorized("Invalid or expired token".to_string()).into_response();
        }
        Err(e) => return e.into_response(),
    };

    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}
