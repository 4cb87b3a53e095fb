/// Application state, router builder, and the auth gate
///
/// This module defines the shared application state and builds the Axum
/// router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskflow_api::{app::{build_router, AppState}, config::Config};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use taskflow_shared::{auth::jwt, supabase::SupabaseClient};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;

use crate::{config::Config, error::ApiError};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The config
/// sits behind an `Arc`; the Supabase clients are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Service-role client: tables, storage, admin user lookups
    pub supabase: SupabaseClient,

    /// Anon client: signup and login only
    pub supabase_anon: SupabaseClient,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates application state, constructing both platform clients
    pub fn new(config: Config) -> Self {
        let supabase = SupabaseClient::new(&config.supabase.url, &config.supabase.service_key);
        let supabase_anon = SupabaseClient::new(&config.supabase.url, &config.supabase.anon_key);

        Self {
            supabase,
            supabase_anon,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }

    /// Gets the storage bucket for attachments
    pub fn storage_bucket(&self) -> &str {
        &self.config.supabase.storage_bucket
    }

    /// Session token lifetime
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.config.jwt.expiration_secs)
    }
}

/// Authentication context added to request extensions by the auth gate
///
/// Handlers extract it with Axum's `Extension` extractor.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authenticated user ID (token subject)
    pub user_id: Uuid,

    /// Email address from the token claims
    pub email: String,
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /                        # Liveness (public)
/// ├── GET  /health                  # Liveness (public)
/// ├── /api/auth/
/// │   ├── POST /signup              # Public
/// │   ├── POST /login               # Public
/// │   ├── GET  /me                  # Bearer
/// │   └── POST /logout              # Bearer
/// ├── /api/projects/                # Bearer, owner-scoped CRUD
/// ├── /tasks/                       # Bearer, owner-checked CRUD
/// └── POST /api/files/upload        # Bearer, multipart
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (per-route-group)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Liveness probes (public, no auth)
    let health_routes = Router::new()
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check));

    // Auth routes: signup/login public, me/logout behind the gate
    let auth_public = Router::new()
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login));

    let auth_protected = Router::new()
        .route("/me", get(routes::auth::me))
        .route("/logout", post(routes::auth::logout))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Project routes (owner-scoped). The spec names the collection endpoints
    // with a trailing slash; axum's `nest` maps an inner `/` route to the
    // bare prefix only, so both spellings are registered explicitly.
    let project_routes = Router::new()
        .route(
            "/api/projects",
            post(routes::projects::create_project).get(routes::projects::list_projects),
        )
        .route(
            "/api/projects/",
            post(routes::projects::create_project).get(routes::projects::list_projects),
        )
        .route("/api/projects/:id", put(routes::projects::update_project))
        .route("/api/projects/:id", delete(routes::projects::delete_project))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Task routes (owner-checked through the parent project)
    let task_routes = Router::new()
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks/", post(routes::tasks::create_task))
        .route("/tasks/:id", get(routes::tasks::get_task))
        .route("/tasks/:id", put(routes::tasks::update_task))
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .route("/tasks/project/:project_id", get(routes::tasks::list_project_tasks))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // File attachment routes. The body limit sits above the 10 MiB upload
    // cap so oversized files are rejected by the validation path with a 400
    // instead of a generic 413.
    let file_routes = Router::new()
        .route("/upload", post(routes::files::upload_file))
        .layer(axum::extract::DefaultBodyLimit::max(12 * 1024 * 1024))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Configure CORS based on the configured allow-list
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api/auth", auth_public.merge(auth_protected))
        .merge(project_routes)
        .merge(task_routes)
        .nest("/api/files", file_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// JWT authentication middleware layer (the auth gate)
///
/// Extracts and validates the bearer token from the Authorization header,
/// then injects [`AuthContext`] into request extensions. Missing, malformed,
/// expired, or tampered tokens all yield 401.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = jwt::validate_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthContext {
        user_id: claims.sub,
        email: claims.email,
    });

    Ok(next.run(req).await)
}
