/// Shared test support: an in-process stub of the Supabase platform
///
/// The stub serves just enough of the table and storage surface for the
/// handlers under test: inserts echo the submitted row back (the
/// `return=representation` contract), selects return whatever rows were
/// seeded for the table, and every storage operation is recorded so tests
/// can assert on the compensating-delete path.

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::post,
    Router,
};
use chrono::Duration;
use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use taskflow_api::app::AppState;
use taskflow_api::config::{ApiConfig, Config, JwtConfig, SupabaseConfig};
use taskflow_shared::auth::jwt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret-key-at-least-32-bytes-long";

/// Stub Supabase platform
///
/// Clone-and-share: all handles point at the same recorded state.
#[derive(Clone, Default)]
pub struct StubPlatform {
    rows: Arc<Mutex<HashMap<String, Vec<serde_json::Value>>>>,
    failing_inserts: Arc<Mutex<HashSet<String>>>,
    storage_ops: Arc<Mutex<Vec<(String, String)>>>,
}

impl StubPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the rows returned by selects against `table`
    pub fn seed_rows(&self, table: &str, rows: Vec<serde_json::Value>) {
        self.rows.lock().unwrap().insert(table.to_string(), rows);
    }

    /// Makes inserts into `table` fail with a 500
    pub fn fail_inserts(&self, table: &str) {
        self.failing_inserts
            .lock()
            .unwrap()
            .insert(table.to_string());
    }

    /// Storage operations seen so far, as (method, object path) pairs
    pub fn recorded_storage_ops(&self) -> Vec<(String, String)> {
        self.storage_ops.lock().unwrap().clone()
    }

    /// Binds the stub on an ephemeral port and serves it in the background
    pub async fn spawn(self) -> SocketAddr {
        let router = Router::new()
            .route("/rest/v1/:table", post(insert_row).get(select_rows))
            .route(
                "/storage/v1/object/:bucket/*path",
                post(store_object).delete(remove_object),
            )
            .with_state(self);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        addr
    }
}

async fn insert_row(
    State(stub): State<StubPlatform>,
    Path(table): Path<String>,
    Json(row): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    if stub.failing_inserts.lock().unwrap().contains(&table) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": "insert rejected" })),
        );
    }

    (StatusCode::CREATED, Json(serde_json::json!([row])))
}

async fn select_rows(
    State(stub): State<StubPlatform>,
    Path(table): Path<String>,
) -> Json<serde_json::Value> {
    let rows = stub
        .rows
        .lock()
        .unwrap()
        .get(&table)
        .cloned()
        .unwrap_or_default();

    Json(serde_json::Value::Array(rows))
}

async fn store_object(
    State(stub): State<StubPlatform>,
    Path((bucket, path)): Path<(String, String)>,
) -> Json<serde_json::Value> {
    stub.storage_ops
        .lock()
        .unwrap()
        .push(("POST".to_string(), format!("{}/{}", bucket, path)));

    Json(serde_json::json!({ "Key": path }))
}

async fn remove_object(
    State(stub): State<StubPlatform>,
    Path((bucket, path)): Path<(String, String)>,
) -> Json<serde_json::Value> {
    stub.storage_ops
        .lock()
        .unwrap()
        .push(("DELETE".to_string(), format!("{}/{}", bucket, path)));

    Json(serde_json::json!({ "message": "deleted" }))
}

/// Application state wired to a stub platform address
pub fn app_state(platform: SocketAddr) -> AppState {
    AppState::new(Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec!["http://localhost:3000".to_string()],
        },
        supabase: SupabaseConfig {
            url: format!("http://{}", platform),
            anon_key: "anon".to_string(),
            service_key: "service".to_string(),
            storage_bucket: "task-files".to_string(),
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            expiration_secs: 3600,
        },
    })
}

/// A valid bearer token for `user_id`
pub fn bearer_for(user_id: Uuid) -> String {
    let claims = jwt::Claims::new(user_id, "user@example.com".to_string(), Duration::hours(1));
    format!("Bearer {}", jwt::create_token(&claims, JWT_SECRET).unwrap())
}
