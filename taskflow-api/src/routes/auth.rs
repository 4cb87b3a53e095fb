/// Authentication endpoints
///
/// Signup and login delegate credential handling to the platform's auth
/// service, then mint a local session token from the identity it returns.
/// No user state is persisted here.
///
/// # Endpoints
///
/// - `POST /api/auth/signup` - Register a new user (201)
/// - `POST /api/auth/login` - Login with email/password
/// - `GET  /api/auth/me` - Current user (bearer)
/// - `POST /api/auth/logout` - Logout (bearer; stateless, client drops the token)

use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Deserialize;
use taskflow_shared::{
    auth::jwt,
    models::user::{Token, UserResponse},
    supabase::SupabaseError,
};
use validator::Validate;

use crate::{
    app::{AppState, AuthContext},
    error::{ApiError, ApiResult},
};

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password (min 6 characters)
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub full_name: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/signup
/// Content-Type: application/json
///
/// { "email": "user@example.com", "password": "secret123", "full_name": "Ada" }
/// ```
///
/// # Errors
///
/// - `409 Conflict`: Email already registered
/// - `422 Unprocessable Entity`: Validation failed
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<Token>)> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = state
        .supabase_anon
        .sign_up(&req.email, &req.password, req.full_name.as_deref())
        .await?;

    let claims = jwt::Claims::new(user.id, user.email.clone(), state.token_ttl());
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    let token = Token::bearer(access_token, user.into());
    Ok((StatusCode::CREATED, Json(token)))
}

/// Login with email and password
///
/// # Endpoint
///
/// ```text
/// POST /api/auth/login
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<Token>> {
    req.validate().map_err(ApiError::from_validation)?;

    let user = state
        .supabase_anon
        .sign_in_with_password(&req.email, &req.password)
        .await
        .map_err(|err| match err {
            // Any rejection of the password grant means bad credentials
            SupabaseError::Auth { status, .. } if (400..500).contains(&status) => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            other => ApiError::from(other),
        })?;

    let claims = jwt::Claims::new(user.id, user.email.clone(), state.token_ttl());
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(Token::bearer(access_token, user.into())))
}

/// Get the current authenticated user
///
/// Looks the token subject up via the platform's admin endpoint.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .supabase
        .admin_get_user(auth.user_id)
        .await
        .map_err(|err| {
            tracing::debug!(user_id = %auth.user_id, error = %err, "User lookup failed");
            ApiError::NotFound("User not found".to_string())
        })?;

    Ok(Json(user.into()))
}

/// Logout the current user
///
/// Session tokens are stateless; logout is handled client-side by dropping
/// the token.
pub async fn logout(
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<serde_json::Value>> {
    tracing::info!(user_id = %auth.user_id, "User logged out");

    Ok(Json(serde_json::json!({ "message": "Logged out successfully" })))
}
