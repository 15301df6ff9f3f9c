//! HTTP handlers for the Auth API

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestValidationResponse, ConflictResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
    JwtAuth, ValidatedJson,
};
use utoipa::OpenApi;

use domain_orders::OrderRepository;
use domain_products::ProductRepository;

use crate::error::{UserError, UserResult};
use crate::middleware::{authenticate, CurrentUser};
use crate::models::{
    AuthResponse, LoginRequest, ProfileResponse, PurchasedProduct, SignupRequest, UpdateProfile,
    UpdateProfilePicture, UserEnvelope, UserResponse,
};
use crate::repository::UserRepository;
use crate::service::{ProfileService, UserService};

/// OpenAPI documentation for the Auth API
#[derive(OpenApi)]
#[openapi(
    paths(signup, login, me, update_profile, update_profile_picture),
    components(
        schemas(
            SignupRequest, LoginRequest, UpdateProfile, UpdateProfilePicture,
            AuthResponse, UserEnvelope, UserResponse, ProfileResponse, PurchasedProduct
        ),
        responses(
            BadRequestValidationResponse,
            UnauthorizedResponse,
            NotFoundResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Auth", description = "Account and profile endpoints")
    )
)]
pub struct ApiDoc;

/// Application state for the auth router
pub struct AuthState<R: UserRepository, O: OrderRepository, P: ProductRepository> {
    pub service: UserService<R>,
    pub profile: ProfileService<O, P>,
    pub jwt: JwtAuth,
}

impl<R: UserRepository, O: OrderRepository, P: ProductRepository> Clone for AuthState<R, O, P> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            profile: self.profile.clone(),
            jwt: self.jwt.clone(),
        }
    }
}

/// Create the auth router with all HTTP endpoints
pub fn router<R, O, P>(state: AuthState<R, O, P>) -> Router
where
    R: UserRepository + 'static,
    O: OrderRepository + 'static,
    P: ProductRepository + 'static,
{
    let protected = Router::new()
        .route("/me", get(me::<R, O, P>))
        .route("/profile", put(update_profile::<R, O, P>))
        .route("/profile-picture", put(update_profile_picture::<R, O, P>))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            authenticate::<R, O, P>,
        ));

    Router::new()
        .route("/signup", post(signup::<R, O, P>))
        .route("/login", post(login::<R, O, P>))
        .merge(protected)
        .with_state(state)
}

fn issue_token(jwt: &JwtAuth, user: &UserResponse) -> UserResult<String> {
    jwt.create_session_token(&user.id.to_string(), &user.email, &user.name)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to create session token");
            UserError::Internal("Failed to create token".to_string())
        })
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn signup<R, O, P>(
    State(state): State<AuthState<R, O, P>>,
    ValidatedJson(input): ValidatedJson<SignupRequest>,
) -> UserResult<impl IntoResponse>
where
    R: UserRepository,
    O: OrderRepository,
    P: ProductRepository,
{
    let user = state.service.signup(input).await?;
    let token = issue_token(&state.jwt, &user)?;

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn login<R, O, P>(
    State(state): State<AuthState<R, O, P>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<AuthResponse>>
where
    R: UserRepository,
    O: OrderRepository,
    P: ProductRepository,
{
    let user = state.service.login(input).await?;
    let token = issue_token(&state.jwt, &user)?;

    Ok(Json(AuthResponse { user, token }))
}

/// The authenticated user's profile with order aggregates
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Profile with order aggregates", body = ProfileResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn me<R, O, P>(
    State(state): State<AuthState<R, O, P>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> UserResult<Json<ProfileResponse>>
where
    R: UserRepository,
    O: OrderRepository,
    P: ProductRepository,
{
    let aggregates = state.profile.aggregate(user.id).await?;

    Ok(Json(ProfileResponse {
        user: user.into(),
        order_count: aggregates.order_count,
        total_spent: aggregates.total_spent,
        purchased_products: aggregates.purchased_products,
    }))
}

/// Update profile fields
#[utoipa::path(
    put,
    path = "/profile",
    tag = "Auth",
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = UserEnvelope),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_profile<R, O, P>(
    State(state): State<AuthState<R, O, P>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(input): Json<UpdateProfile>,
) -> UserResult<Json<UserEnvelope>>
where
    R: UserRepository,
    O: OrderRepository,
    P: ProductRepository,
{
    let updated = state.service.update_profile(user.id, input).await?;
    Ok(Json(UserEnvelope { user: updated }))
}

/// Update the profile picture
#[utoipa::path(
    put,
    path = "/profile-picture",
    tag = "Auth",
    request_body = UpdateProfilePicture,
    responses(
        (status = 200, description = "Profile picture updated", body = UserEnvelope),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_profile_picture<R, O, P>(
    State(state): State<AuthState<R, O, P>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(input): Json<UpdateProfilePicture>,
) -> UserResult<Json<UserEnvelope>>
where
    R: UserRepository,
    O: OrderRepository,
    P: ProductRepository,
{
    let profile_picture = match input.profile_picture {
        Some(picture) if !picture.is_empty() => picture,
        _ => {
            return Err(UserError::Validation(
                "Profile picture is required".to_string(),
            ))
        }
    };

    let updated = state
        .service
        .update_profile_picture(user.id, profile_picture)
        .await?;
    Ok(Json(UserEnvelope { user: updated }))
}
